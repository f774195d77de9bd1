//! Fetching of remote resources referenced by the document, such as images.

use ecow::EcoString;

use crate::{Error, Result};

/// The bytes of a fetched resource.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchedResource {
    /// The payload.
    pub data: Vec<u8>,
    /// The MIME type reported by the source, if any.
    pub content_type: Option<EcoString>,
}

/// Resolves a resource reference into bytes.
///
/// Fetching is the only blocking point of a conversion; the converter waits
/// for each fetch before moving on to the next sibling.
pub trait ResourceFetcher: Send + Sync {
    /// Fetches the resource at `url`.
    fn fetch(&self, url: &str) -> Result<FetchedResource>;
}

/// A fetcher that refuses every request.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoFetch;

impl ResourceFetcher for NoFetch {
    fn fetch(&self, url: &str) -> Result<FetchedResource> {
        Err(Error::io(format!(
            "cannot fetch `{url}`: no resource fetcher is configured"
        )))
    }
}

impl<F> ResourceFetcher for F
where
    F: Fn(&str) -> Result<FetchedResource> + Send + Sync,
{
    fn fetch(&self, url: &str) -> Result<FetchedResource> {
        self(url)
    }
}

#[cfg(feature = "fetch")]
pub use http::HttpFetcher;

#[cfg(feature = "fetch")]
mod http {
    use log::debug;
    use reqwest::blocking::Client;
    use reqwest::header::CONTENT_TYPE;

    use super::{FetchedResource, ResourceFetcher};
    use crate::{Error, Result};

    /// Fetches resources over HTTP(S) with a blocking client.
    #[derive(Debug, Clone, Default)]
    pub struct HttpFetcher {
        client: Client,
    }

    impl HttpFetcher {
        /// Creates a fetcher with a default client.
        pub fn new() -> Self {
            Self::default()
        }

        /// Creates a fetcher using the given client.
        pub fn with_client(client: Client) -> Self {
            Self { client }
        }
    }

    impl ResourceFetcher for HttpFetcher {
        fn fetch(&self, url: &str) -> Result<FetchedResource> {
            debug!("docweave: fetching {url}");
            let response = self
                .client
                .get(url)
                .send()
                .map_err(|err| Error::io(format!("failed to fetch `{url}`: {err}")))?;

            let status = response.status();
            if !status.is_success() {
                return Err(Error::io(format!("failed to fetch `{url}`: HTTP {status}")));
            }

            let content_type = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
                .map(|value| value.split(';').next().unwrap_or(value).trim().into());
            let data = response
                .bytes()
                .map_err(|err| Error::io(format!("failed to read `{url}`: {err}")))?
                .to_vec();

            Ok(FetchedResource { data, content_type })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn no_fetch_fails_with_io() {
        let err = NoFetch.fetch("https://example.com/a.png").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn closures_are_fetchers() {
        let fetcher = |url: &str| -> Result<FetchedResource> {
            Ok(FetchedResource {
                data: url.as_bytes().to_vec(),
                content_type: Some("text/plain".into()),
            })
        };
        let fetched = fetcher.fetch("abc").unwrap();
        assert_eq!(fetched.data, b"abc");
    }
}
