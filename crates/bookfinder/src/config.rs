//! Endpoints and request settings shared by searching and rendering.

use std::time::Duration;

use url::Url;

use crate::{Error, ErrorKind};

/// Endpoint of the Open Library title search.
pub const SEARCH_URL: &str = "https://openlibrary.org/search.json";
/// Base of the Open Library cover image service.
pub const COVERS_URL: &str = "https://covers.openlibrary.org/b/id";
/// Image shown for results without a cover identifier.
pub const PLACEHOLDER_COVER_URL: &str = "https://via.placeholder.com/150x200?text=No+Cover";
/// Storefront search page the "Buy Now" link points to.
pub const STOREFRONT_URL: &str = "https://www.amazon.in/s";

/// How the query is placed into the `title` parameter of the request URL.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum QueryEncoding {
    /// Appended verbatim, `&` and `#` in a query change the meaning of the URL.
    Raw,
    /// Percent-encoded as a form value.
    Encoded,
}

/// Settings shared by the search lifecycle and the renderer.
#[derive(Clone, Debug)]
pub struct Config {
    search: Url,
    covers: String,
    placeholder: String,
    storefront: Url,
    encoding: QueryEncoding,
    timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self::new(SEARCH_URL).expect("default search URL is valid")
    }
}

impl Config {
    /// Creates a config searching at `search_url` with every other setting at its default.
    ///
    /// # Errors
    ///
    /// An [`Err`] of kind [`ErrorKind::Config`] is returned when `search_url` is not a valid URL.
    pub fn new(search_url: &str) -> Result<Self, Error> {
        Ok(Self {
            search: parse_url(search_url)?,
            covers: COVERS_URL.to_owned(),
            placeholder: PLACEHOLDER_COVER_URL.to_owned(),
            storefront: parse_url(STOREFRONT_URL)?,
            encoding: QueryEncoding::Encoded,
            timeout: None,
        })
    }

    /// Sets how the query is written into the request URL.
    #[must_use]
    pub fn with_encoding(mut self, encoding: QueryEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Sets the request timeout, `None` waits forever.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the storefront search page used for purchase links.
    ///
    /// # Errors
    ///
    /// An [`Err`] of kind [`ErrorKind::Config`] is returned when `url` is not a valid URL.
    pub fn with_storefront(mut self, url: &str) -> Result<Self, Error> {
        self.storefront = parse_url(url)?;
        Ok(self)
    }

    /// The search endpoint.
    #[must_use]
    pub const fn search_url(&self) -> &Url {
        &self.search
    }

    /// The base URL cover identifiers are appended to.
    #[must_use]
    pub fn covers_url(&self) -> &str {
        &self.covers
    }

    /// The image used when a result has no cover.
    #[must_use]
    pub fn placeholder_url(&self) -> &str {
        &self.placeholder
    }

    /// The storefront search page.
    #[must_use]
    pub const fn storefront_url(&self) -> &Url {
        &self.storefront
    }

    /// The query encoding.
    #[must_use]
    pub const fn encoding(&self) -> QueryEncoding {
        self.encoding
    }

    /// The request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

fn parse_url(url: &str) -> Result<Url, Error> {
    Url::parse(url).map_err(|e| Error::wrap(ErrorKind::Config, e))
}

#[cfg(test)]
mod tests {
    use super::{Config, QueryEncoding, SEARCH_URL};
    use crate::ErrorKind;

    #[test]
    fn defaults_point_at_open_library() {
        let config = Config::default();

        assert_eq!(SEARCH_URL, config.search_url().as_str());
        assert_eq!(QueryEncoding::Encoded, config.encoding());
        assert!(config.timeout().is_none());
    }

    #[test]
    fn invalid_search_url_is_config_error() {
        let err = Config::new("not a url").expect_err("relative URL without base is invalid");
        assert_eq!(ErrorKind::Config, err.kind());
    }

    #[test]
    fn invalid_storefront_url_is_config_error() {
        let err = Config::default()
            .with_storefront("::")
            .expect_err("'::' is not a URL");
        assert_eq!(ErrorKind::Config, err.kind());
    }
}
