use crate::error::{CoreError, CoreResult};
use crate::location::Location;

/// Reads raw document text from the filesystem or over HTTP(S).
#[derive(Debug, Clone, Default)]
pub struct Resource {
    client: reqwest::Client,
}

impl Resource {
    pub fn new() -> Self {
        Self { client: reqwest::Client::new() }
    }

    /// Fetch the full text behind a location.
    pub async fn read(&self, location: &Location) -> CoreResult<String> {
        match location {
            Location::Path(path) => std::fs::read_to_string(path).map_err(|e| {
                CoreError::io(format!("failed to read {}: {}", path.display(), e))
            }),
            Location::Url(url) => {
                let response = self.client.get(url.clone()).send().await?;
                if !response.status().is_success() {
                    return Err(CoreError::network(format!(
                        "failed to fetch {}: HTTP {}",
                        url,
                        response.status().as_u16()
                    )));
                }
                Ok(response.text().await?)
            }
        }
    }
}
