//! HTTP GET with JSON decoding.

use log::debug;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use tokio::task::JoinHandle;

use super::error::{FetchError, FetchResult};

/// Fetches a URL and decodes the body as JSON into a caller-chosen type.
///
/// Each call performs exactly one request. Cloning is cheap and shares the
/// underlying connection pool.
#[derive(Debug, Clone, Default)]
pub struct JsonFetcher {
    client: Client,
}

impl JsonFetcher {
    /// Creates a fetcher with a default HTTP client.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a fetcher using an existing client (timeouts, proxies, headers).
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// GETs `url` and decodes the response body as `T`.
    ///
    /// A non-success status is reported as [`FetchError::Transport`] without
    /// reading the body, so an error page with a JSON body never decodes
    /// into `T`.
    ///
    /// # Errors
    ///
    /// - [`FetchError::Transport`] for an invalid URL, a failed connection,
    ///   a non-success status or an interrupted body.
    /// - [`FetchError::DataNotFound`] for an empty body.
    /// - [`FetchError::Decode`] if the body is not JSON for `T`.
    pub async fn get<T: DeserializeOwned>(&self, url: &str) -> FetchResult<T> {
        let parsed =
            Url::parse(url).map_err(|e| FetchError::Transport(format!("Invalid URL {url}: {e}")))?;

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Transport(format!("{url} answered {status}")));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        debug!("Fetched {} bytes from {url}", body.len());

        decode(&body)
    }

    /// Spawns [`get`](Self::get) and hands its result to `completion`.
    ///
    /// `completion` runs exactly once, with either the decoded value or the
    /// error. Must be called from within a tokio runtime.
    pub fn get_with_completion<T, F>(&self, url: impl Into<String>, completion: F) -> JoinHandle<()>
    where
        T: DeserializeOwned + Send + 'static,
        F: FnOnce(FetchResult<T>) + Send + 'static,
    {
        let fetcher = self.clone();
        let url = url.into();
        tokio::spawn(async move {
            completion(fetcher.get(&url).await);
        })
    }
}

/// Decodes a response body as JSON.
///
/// # Errors
///
/// Returns [`FetchError::DataNotFound`] for an empty body and
/// [`FetchError::Decode`] for anything that does not decode as `T`.
///
/// # Examples
///
/// ```
/// use locus_core::fetch::{decode, FetchError};
///
/// let numbers: Vec<u32> = decode(b"[1, 2, 3]").unwrap();
/// assert_eq!(numbers, vec![1, 2, 3]);
/// assert_eq!(decode::<Vec<u32>>(b""), Err(FetchError::DataNotFound));
/// ```
pub fn decode<T: DeserializeOwned>(body: &[u8]) -> FetchResult<T> {
    if body.is_empty() {
        return Err(FetchError::DataNotFound);
    }
    serde_json::from_slice(body).map_err(|e| FetchError::Decode(e.to_string()))
}

/// GETs `url` with a fresh [`JsonFetcher`] and decodes the body as `T`.
///
/// # Errors
///
/// See [`JsonFetcher::get`].
pub async fn get<T: DeserializeOwned>(url: &str) -> FetchResult<T> {
    JsonFetcher::new().get(url).await
}
