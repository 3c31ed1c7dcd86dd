pub mod config;
pub mod logging;

pub mod error;
pub mod hasher;
pub mod planner;
pub mod store;
