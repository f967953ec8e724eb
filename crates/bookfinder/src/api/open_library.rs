//! Title search against the Open Library `search.json` endpoint.

use log::{info, trace};
use serde::Deserialize;

use crate::{
    config::{Config, QueryEncoding},
    BookResult, Error,
};

use super::Client;

#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
struct SearchResponse {
    docs: Vec<BookResult>,
}

/// Builds the request URL for a title search.
///
/// With [`QueryEncoding::Raw`] the query is appended as typed, including any surrounding
/// whitespace.
#[must_use]
pub fn search_url(config: &Config, query: &str) -> String {
    let endpoint = config.search_url();
    match config.encoding() {
        QueryEncoding::Raw => {
            let separator = if endpoint.query().is_some() { '&' } else { '?' };
            format!("{endpoint}{separator}title={query}")
        }
        QueryEncoding::Encoded => {
            let mut url = endpoint.clone();
            url.query_pairs_mut().append_pair("title", query);
            url.into()
        }
    }
}

/// Requests `url` and returns the `docs` array of the response in the order given by the API.
///
/// # Errors
///
/// An [`Err`] is returned when the request fails, the status is not a success or the body has no
/// `docs` array.
pub fn get_docs<C: Client>(client: &C, url: &str) -> Result<Vec<BookResult>, Error> {
    info!("Searching Open Library: {url}");
    let SearchResponse { docs } = client.get_json(url)?;

    trace!("Request was successful - {} docs returned", docs.len());
    Ok(docs)
}
