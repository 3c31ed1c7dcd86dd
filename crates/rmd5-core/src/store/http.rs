//! Path-style HTTP object-store client over curl (libcurl).
//!
//! Works against anything that answers HEAD with `Content-Length` and GET
//! with `Range`, which covers S3-compatible stores with public or
//! presigned-style endpoints. Authentication is the deployment's problem
//! (presigned URLs, gateway, etc.), not this client's.

use std::str;
use std::time::Duration;

use anyhow::{Context, Result};
use url::Url;

use super::{ObjectRef, ObjectStore, StoreError};

/// Object-store client addressing objects as `<endpoint>/<bucket>/<key>`.
#[derive(Debug, Clone)]
pub struct HttpStore {
    endpoint: Url,
}

impl HttpStore {
    /// `endpoint` is the store base URL, e.g. `https://s3.example.com`.
    pub fn new(endpoint: &str) -> Result<Self> {
        let endpoint = Url::parse(endpoint).context("invalid endpoint URL")?;
        if endpoint.cannot_be_a_base() {
            anyhow::bail!("endpoint URL cannot carry a path: {}", endpoint);
        }
        Ok(Self { endpoint })
    }

    /// Appends `/<bucket>/<key>` to the endpoint, percent-encoding each
    /// path segment. Slashes in the key stay separators.
    fn object_url(&self, object: &ObjectRef) -> String {
        let mut url = self.endpoint.clone();
        {
            // new() rejects cannot-be-a-base URLs, so segments are available.
            let mut segments = url.path_segments_mut().expect("base URL");
            segments.pop_if_empty();
            segments.push(&object.bucket);
            segments.extend(object.key.split('/'));
        }
        url.to_string()
    }
}

impl ObjectStore for HttpStore {
    /// HEAD request; the size comes from `Content-Length`.
    fn head_size(&self, object: &ObjectRef) -> Result<u64, StoreError> {
        let mut headers: Vec<String> = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(&self.object_url(object)).map_err(StoreError::Curl)?;
        easy.nobody(true).map_err(StoreError::Curl)?;
        easy.follow_location(true).map_err(StoreError::Curl)?;
        easy.connect_timeout(Duration::from_secs(15))
            .map_err(StoreError::Curl)?;
        easy.timeout(Duration::from_secs(30))
            .map_err(StoreError::Curl)?;

        {
            let mut transfer = easy.transfer();
            transfer
                .header_function(|data| {
                    if let Ok(s) = str::from_utf8(data) {
                        headers.push(s.trim_end().to_string());
                    }
                    true
                })
                .map_err(StoreError::Curl)?;
            transfer.perform().map_err(StoreError::Curl)?;
        }

        let code = easy.response_code().map_err(StoreError::Curl)?;
        if !(200..300).contains(&code) {
            return Err(StoreError::Http(code));
        }

        content_length(&headers).ok_or(StoreError::MissingContentLength)
    }

    /// GET with the range applied; the body is checked against the span of
    /// the requested range so a server that ignores `Range` fails loudly
    /// instead of corrupting the digest.
    fn fetch_range(&self, object: &ObjectRef, range_spec: &str) -> Result<Vec<u8>, StoreError> {
        let expected = range_span(range_spec);
        let mut body: Vec<u8> = Vec::with_capacity(expected.unwrap_or(0) as usize);

        let mut easy = curl::easy::Easy::new();
        easy.url(&self.object_url(object)).map_err(StoreError::Curl)?;
        easy.follow_location(true).map_err(StoreError::Curl)?;
        easy.connect_timeout(Duration::from_secs(30))
            .map_err(StoreError::Curl)?;
        // Prefer low-speed timeout: abort if throughput drops below 1 KiB/s
        // for 60s, with a hard cap so a stuck transfer eventually fails.
        easy.low_speed_limit(1024).map_err(StoreError::Curl)?;
        easy.low_speed_time(Duration::from_secs(60))
            .map_err(StoreError::Curl)?;
        easy.timeout(Duration::from_secs(3600))
            .map_err(StoreError::Curl)?;

        // curl takes the bare `<start>-<end>` form.
        let range = range_spec.strip_prefix("bytes=").unwrap_or(range_spec);
        easy.range(range).map_err(StoreError::Curl)?;

        {
            let mut transfer = easy.transfer();
            transfer
                .write_function(|data| {
                    body.extend_from_slice(data);
                    Ok(data.len())
                })
                .map_err(StoreError::Curl)?;
            transfer.perform().map_err(StoreError::Curl)?;
        }

        let code = easy.response_code().map_err(StoreError::Curl)?;
        if !(200..300).contains(&code) {
            return Err(StoreError::Http(code));
        }

        if let Some(expected) = expected {
            if body.len() as u64 != expected {
                return Err(StoreError::ShortRead {
                    expected,
                    received: body.len() as u64,
                });
            }
        }
        Ok(body)
    }
}

/// Parse `Content-Length` out of response header lines.
fn content_length(lines: &[String]) -> Option<u64> {
    for line in lines {
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("content-length") {
                if let Ok(n) = value.trim().parse::<u64>() {
                    return Some(n);
                }
            }
        }
    }
    None
}

/// Byte count a `bytes=<start>-<end>` spec asks for, if it parses.
fn range_span(range_spec: &str) -> Option<u64> {
    let spec = range_spec.strip_prefix("bytes=")?;
    let (start, end) = spec.split_once('-')?;
    let start: u64 = start.parse().ok()?;
    let end: u64 = end.parse().ok()?;
    if end < start {
        return None;
    }
    Some(end - start + 1)
}
