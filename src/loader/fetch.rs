//! Network seam for the load controller.
//!
//! Load threads only see this trait; production runs the blocking
//! [`HttpFetcher`] there, tests inject scripted fetchers. Probe and fetch both
//! report transport failures as plain message strings so that failure
//! classification stays in one place, in the controller.

use std::io::Read;
use std::time::Duration;

/// Byte limit for a fetched asset body (64 MiB). The catalog assets are a
/// few megabytes each; anything past this is a server mistake.
const MAX_ASSET_BYTES: u64 = 64 * 1024 * 1024;

pub trait AssetFetcher {
    /// Metadata check with HEAD semantics. `Ok(status)` whenever an HTTP
    /// response arrived, regardless of the code; `Err(message)` when the
    /// request never produced a response.
    fn probe(&mut self, url: &str) -> Result<u16, String>;

    /// Full body download.
    fn fetch(&mut self, url: &str) -> Result<Vec<u8>, String>;
}

/// Blocking HTTP fetcher over `ureq`.
pub struct HttpFetcher {
    agent: ureq::Agent,
}

impl HttpFetcher {
    pub fn new() -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(30))
            .build();
        Self { agent }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetFetcher for HttpFetcher {
    fn probe(&mut self, url: &str) -> Result<u16, String> {
        match self.agent.head(url).call() {
            Ok(response) => Ok(response.status()),
            // Non-2xx still counts as a response; the controller maps it.
            Err(ureq::Error::Status(code, _)) => Ok(code),
            Err(err) => Err(err.to_string()),
        }
    }

    fn fetch(&mut self, url: &str) -> Result<Vec<u8>, String> {
        let response = match self.agent.get(url).call() {
            Ok(response) => response,
            Err(ureq::Error::Status(code, _)) => {
                return Err(format!("asset download returned status {code}"));
            }
            Err(err) => return Err(err.to_string()),
        };
        let mut bytes = Vec::new();
        response
            .into_reader()
            .take(MAX_ASSET_BYTES)
            .read_to_end(&mut bytes)
            .map_err(|err| err.to_string())?;
        Ok(bytes)
    }
}
