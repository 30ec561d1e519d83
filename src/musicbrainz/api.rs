use crate::musicbrainz::error::{MusicBrainzError, MusicBrainzResult};
use crate::util::http::CLIENT;
use log::debug;
use reqwest::{Client, Method};
use std::time::Duration;
use tower::limit::RateLimit;
use tower::{Service, ServiceBuilder, ServiceExt};

pub const MUSICBRAINZ_HOST: &str = "https://musicbrainz.org";
pub const MUSICBRAINZ_PATH: &str = "/ws/2/";

/// Metadata web service that answers `GET <path><query>` with an XML document.
#[allow(async_fn_in_trait)]
pub trait WebService {
    /// Base path every query is appended to.
    fn path(&self) -> &str;

    async fn get(&mut self, query: &str) -> MusicBrainzResult<String>;
}

pub struct MusicBrainzApi {
    client: Client,
    service: RateLimit<Client>,
    host: String,
}

impl MusicBrainzApi {
    pub fn new(host: impl Into<String>) -> Self {
        let client = CLIENT.clone();

        // MusicBrainz allows one request per second per client.
        let service = ServiceBuilder::new()
            .rate_limit(1, Duration::from_secs(1))
            .service(client.clone());

        Self {
            client,
            service,
            host: host.into(),
        }
    }
}

impl Default for MusicBrainzApi {
    fn default() -> Self {
        Self::new(MUSICBRAINZ_HOST)
    }
}

impl WebService for MusicBrainzApi {
    fn path(&self) -> &str {
        MUSICBRAINZ_PATH
    }

    async fn get(&mut self, query: &str) -> MusicBrainzResult<String> {
        let url = format!("{}{query}", self.host);
        debug!("MusicBrainz request: {url}");

        let req = self
            .client
            .request(Method::GET, url)
            .header("Accept", "application/xml")
            .build()?;

        let res = self.service.ready().await?.call(req).await?;

        if !res.status().is_success() {
            return Err(MusicBrainzError::NoSuccessStatusCode(
                res.status(),
                res.text().await?,
            ));
        }

        Ok(res.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn queries_the_version_two_web_service() {
        let api = MusicBrainzApi::default();
        assert_eq!(api.path(), "/ws/2/");
        assert_eq!(api.host, "https://musicbrainz.org");
    }
}
