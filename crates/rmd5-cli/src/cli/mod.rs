//! CLI for the rmd5 remote-object MD5 hasher.

use anyhow::{Context, Result};
use clap::Parser;
use rmd5_core::config;
use rmd5_core::hasher;
use rmd5_core::store::{HttpStore, ObjectRef};
use std::time::Instant;

/// Compute the MD5 of a remote object with concurrent range fetches.
#[derive(Debug, Parser)]
#[command(name = "rmd5")]
#[command(about = "rmd5: concurrent ranged MD5 hashing of remote objects", long_about = None)]
pub struct Cli {
    /// Bucket (container) holding the object.
    pub bucket: String,

    /// Object key within the bucket.
    pub key: String,

    /// Object-store base URL, e.g. https://s3.example.com
    #[arg(long, value_name = "URL")]
    pub endpoint: String,

    /// Bytes per range request (defaults to the configured chunk size).
    #[arg(short = 'c', long, value_name = "BYTES")]
    pub chunk_size: Option<u64>,

    /// Cap on concurrent range fetches (default: one per range).
    #[arg(long, value_name = "N")]
    pub max_concurrent: Option<usize>,
}

impl Cli {
    pub fn run_from_args() -> Result<()> {
        Self::parse().run()
    }

    fn run(self) -> Result<()> {
        let cfg = config::load_or_init().context("load config")?;
        let chunk_size = self.chunk_size.unwrap_or(cfg.chunk_size);
        let max_concurrent = self.max_concurrent.or(cfg.max_concurrent_fetches);

        let store = HttpStore::new(&self.endpoint)?;
        let object = ObjectRef::new(self.bucket, self.key);

        let started = Instant::now();
        let digest = hasher::compute_md5(&store, &object, chunk_size, max_concurrent)
            .with_context(|| format!("hash {}", object))?;
        tracing::info!("md5 {} computed in {:.2?}", digest, started.elapsed());

        println!("{}", digest);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal() {
        let cli = Cli::try_parse_from([
            "rmd5",
            "my-bucket",
            "data.bin",
            "--endpoint",
            "http://localhost:9000",
        ])
        .unwrap();
        assert_eq!(cli.bucket, "my-bucket");
        assert_eq!(cli.key, "data.bin");
        assert_eq!(cli.endpoint, "http://localhost:9000");
        assert!(cli.chunk_size.is_none());
        assert!(cli.max_concurrent.is_none());
    }

    #[test]
    fn parse_overrides() {
        let cli = Cli::try_parse_from([
            "rmd5",
            "my-bucket",
            "data.bin",
            "--endpoint",
            "http://localhost:9000",
            "-c",
            "65536",
            "--max-concurrent",
            "8",
        ])
        .unwrap();
        assert_eq!(cli.chunk_size, Some(65_536));
        assert_eq!(cli.max_concurrent, Some(8));
    }

    #[test]
    fn missing_endpoint_is_an_error() {
        assert!(Cli::try_parse_from(["rmd5", "my-bucket", "data.bin"]).is_err());
    }
}
