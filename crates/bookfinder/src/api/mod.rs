//! HTTP seam used by the search lifecycle.
//!
//! [`Client`] is implemented for [`reqwest::blocking::Client`]; tests swap in a mock that
//! produces canned bodies and records the requested URL.

use std::time::Duration;

use serde::de::DeserializeOwned;

pub mod open_library;

use crate::{Error, ErrorKind};

/// A client able to GET a URL and decode the JSON body of a successful response.
pub trait Client {
    /// Sends a GET request to `url` and deserializes the response body as `T`.
    ///
    /// # Errors
    ///
    /// An [`Err`] of kind [`ErrorKind::IO`] is returned when the request cannot be sent.
    /// An [`Err`] of kind [`ErrorKind::Status`] is returned for a non-success status code.
    /// An [`Err`] of kind [`ErrorKind::Deserialize`] is returned when the body is not a valid `T`.
    fn get_json<T>(&self, url: &str) -> Result<T, Error>
    where
        T: DeserializeOwned;
}

impl Client for reqwest::blocking::Client {
    fn get_json<T>(&self, url: &str) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        self.get(url)
            .send()
            .map_err(|e| Error::wrap(ErrorKind::IO, e))?
            .error_for_status()
            .map_err(|e| Error::wrap(ErrorKind::Status, e))?
            .json()
            .map_err(|e| Error::wrap(ErrorKind::Deserialize, e))
    }
}

/// Builds the blocking HTTP client used for searches.
///
/// `None` disables the request timeout so a hung request waits indefinitely.
///
/// # Errors
///
/// An [`Err`] is returned when the TLS backend cannot be initialised.
pub fn http_client(timeout: Option<Duration>) -> Result<reqwest::blocking::Client, Error> {
    reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| Error::wrap(ErrorKind::IO, e))
}

#[cfg(test)]
pub(crate) use test::{
    assert_url, impl_text_producer, MockClient, NetworkErrorProducer, Producer,
    ServerErrorProducer, URL_SINK,
};
