//! The search component: query input, request lifecycle and the state the page is drawn from.
//!
//! A search runs in three steps, [`Finder::begin`] resets the state and hands out a [`Ticket`],
//! [`Finder::fetch`] performs the request and [`Finder::finish`] stores the outcome.
//! [`Finder::submit`] runs all three. Every ticket carries a sequence number and only the most
//! recently issued ticket may change the state, so when searches overlap the page always shows
//! the last search the user triggered.

use std::fmt;

use log::{debug, trace, warn};

use crate::{
    api::{open_library, Client},
    config::Config,
    render::Card,
    BookResult, Error, ErrorKind,
};

/// The most results kept from a single response.
pub const MAX_RESULTS: usize = 32;
/// Shown when a search succeeds without any match.
pub const NO_RESULTS_MESSAGE: &str = "No books found. Try another search.";
/// Shown for every failed search regardless of the cause.
pub const FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

/// The text typed into the search box.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Query(String);

impl Query {
    /// Replaces the query with `text` as typed, without trimming.
    pub fn set<S: Into<String>>(&mut self, text: S) {
        self.0 = text.into();
    }

    /// The query as typed.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// A query is searchable when it holds something other than whitespace or a byte order mark.
    #[must_use]
    pub fn is_searchable(&self) -> bool {
        !self
            .0
            .trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
            .is_empty()
    }
}

/// A message shown below the search bar in place of results.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    /// The search succeeded but matched nothing.
    NoResults,
    /// The search failed, the kind is kept for diagnostics only.
    Failed(ErrorKind),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoResults => f.write_str(NO_RESULTS_MESSAGE),
            Self::Failed(_) => f.write_str(FAILURE_MESSAGE),
        }
    }
}

/// What the page currently shows.
///
/// While loading, there is neither a notice nor any result.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchState {
    loading: bool,
    notice: Option<Notice>,
    results: Vec<BookResult>,
}

impl SearchState {
    /// `true` from the moment a search starts until its outcome has been stored.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// The message to show instead of results, if any.
    #[must_use]
    pub const fn notice(&self) -> Option<Notice> {
        self.notice
    }

    /// The results of the last completed search, at most [`MAX_RESULTS`].
    #[must_use]
    pub fn results(&self) -> &[BookResult] {
        &self.results
    }

    fn reset(&mut self) {
        self.loading = true;
        self.notice = None;
        self.results.clear();
    }

    fn complete(&mut self, outcome: Result<Vec<BookResult>, Error>) {
        match outcome {
            Ok(docs) if docs.is_empty() => self.notice = Some(Notice::NoResults),
            Ok(mut docs) => {
                docs.truncate(MAX_RESULTS);
                self.results = docs;
            }
            Err(err) => {
                warn!("Search failed: {err}");
                self.notice = Some(Notice::Failed(err.kind()));
            }
        }
        self.loading = false;
    }
}

/// A search in flight, returned by [`Finder::begin`].
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a search only completes when its ticket is passed to `Finder::finish`"]
pub struct Ticket {
    seq: u64,
    url: String,
}

impl Ticket {
    /// The sequence number, increasing with every search started.
    #[must_use]
    pub const fn seq(&self) -> u64 {
        self.seq
    }

    /// The request URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// The book finder component, owning the query, the search state and the HTTP client.
pub struct Finder<C: Client> {
    client: C,
    config: Config,
    query: Query,
    state: SearchState,
    issued: u64,
}

impl<C: Client> Finder<C> {
    /// Creates a finder with an empty query and nothing shown.
    pub fn new(client: C, config: Config) -> Self {
        Self {
            client,
            config,
            query: Query::default(),
            state: SearchState::default(),
            issued: 0,
        }
    }

    /// Change handler of the search box, replaces the query verbatim.
    pub fn set_query<S: Into<String>>(&mut self, text: S) {
        self.query.set(text);
    }

    /// The current query.
    #[must_use]
    pub const fn query(&self) -> &Query {
        &self.query
    }

    /// The current search state.
    #[must_use]
    pub const fn state(&self) -> &SearchState {
        &self.state
    }

    /// The config used for requests and cards.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// One card per result, in result order.
    #[must_use]
    pub fn cards(&self) -> Vec<Card> {
        Card::from_results(self.state.results(), &self.config)
    }

    /// Starts a search for the current query.
    ///
    /// Returns `None` and leaves everything untouched when the query is blank. Otherwise the
    /// state is reset to loading and a [`Ticket`] for the new search is returned.
    pub fn begin(&mut self) -> Option<Ticket> {
        if !self.query.is_searchable() {
            trace!("Ignoring search for blank query");
            return None;
        }

        self.issued += 1;
        self.state.reset();

        let url = open_library::search_url(&self.config, self.query.as_str());
        trace!("Search #{} started", self.issued);
        Some(Ticket {
            seq: self.issued,
            url,
        })
    }

    /// Performs the request for `ticket`.
    ///
    /// # Errors
    ///
    /// See [`open_library::get_docs`].
    pub fn fetch(&self, ticket: &Ticket) -> Result<Vec<BookResult>, Error> {
        open_library::get_docs(&self.client, &ticket.url)
    }

    /// Stores the outcome of the search `ticket` was issued for.
    ///
    /// Returns `false` without touching the state when a newer search has been started since.
    pub fn finish(&mut self, ticket: Ticket, outcome: Result<Vec<BookResult>, Error>) -> bool {
        if ticket.seq != self.issued {
            debug!(
                "Discarding response of search #{} - search #{} is newer",
                ticket.seq, self.issued
            );
            return false;
        }

        self.state.complete(outcome);
        trace!("Search #{} finished", ticket.seq);
        true
    }

    /// Triggers a search for the current query and waits for its outcome.
    ///
    /// Returns `false` when the query is blank and nothing happened.
    pub fn submit(&mut self) -> bool {
        match self.begin() {
            Some(ticket) => {
                let outcome = self.fetch(&ticket);
                self.finish(ticket, outcome)
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        Finder, Notice, Query, SearchState, FAILURE_MESSAGE, MAX_RESULTS, NO_RESULTS_MESSAGE,
    };
    use crate::{
        api::{
            assert_url, impl_text_producer, MockClient, NetworkErrorProducer, ServerErrorProducer,
        },
        config::Config,
        BookResult, Error, ErrorKind,
    };

    fn docs_json(count: usize) -> String {
        let docs = (0..count)
            .map(|i| format!(r#"{{ "title": "Book {i}" }}"#))
            .collect::<Vec<_>>()
            .join(",");
        format!(r#"{{ "docs": [{docs}] }}"#)
    }

    impl_text_producer! {
        DuneProducer => Ok(r#"{
            "docs": [{
                "title": "Dune",
                "author_name": ["Frank Herbert"],
                "first_publish_year": 1965,
                "cover_i": 12345
            }]
        }"#.to_owned()),
        EmptyDocsProducer => Ok(r#"{ "docs": [] }"#.to_owned()),
        MalformedProducer => Ok("{ docs: ".to_owned()),
        FortyDocsProducer => Ok(docs_json(40)),
        FiveDocsProducer => Ok(docs_json(5)),
        MixedDocsProducer => Ok(r#"{
            "docs": [
                { "title": "Dune", "author_name": ["Frank Herbert"], "cover_i": true },
                { "title": 1984, "first_publish_year": [1949] },
                { "key": "/works/OL1W" }
            ]
        }"#.to_owned()),
    }

    fn finder<P: crate::api::Producer<String>>(query: &str) -> Finder<MockClient<P>> {
        let mut finder = Finder::new(MockClient::<P>::default(), Config::default());
        finder.set_query(query);
        finder
    }

    fn titles(state: &SearchState) -> Vec<&str> {
        state.results().iter().map(BookResult::title).collect()
    }

    #[test]
    fn query_is_stored_verbatim() {
        let mut query = Query::default();
        query.set("  dune ");
        assert_eq!("  dune ", query.as_str());
        assert!(query.is_searchable());
    }

    #[test]
    fn blank_queries_are_not_searchable() {
        for text in ["", " ", "\t\n", "   \u{3000}", "\u{feff}", " \u{feff}\t"] {
            let mut query = Query::default();
            query.set(text);
            assert!(!query.is_searchable(), "{text:?} should not be searchable");
        }
    }

    #[test]
    fn blank_query_does_not_search_or_change_state() {
        let mut finder = finder::<DuneProducer>("dune");
        assert!(finder.submit());
        let before = finder.state().clone();

        crate::api::URL_SINK.with(|sink| *sink.borrow_mut() = None);
        finder.set_query("   ");

        assert!(finder.begin().is_none());
        assert!(!finder.submit());
        assert_eq!(&before, finder.state());
        assert_url!("", "no request should have been made");
    }

    #[test]
    fn dune_search_shows_one_result() {
        let mut finder = finder::<DuneProducer>("dune");

        assert!(finder.submit());

        let state = finder.state();
        assert!(!state.is_loading());
        assert_eq!(None, state.notice());
        assert_eq!(vec!["Dune"], titles(state));
        assert_url!("https://openlibrary.org/search.json?title=dune");
    }

    #[test]
    fn untrimmed_query_is_sent() {
        let mut finder = finder::<DuneProducer>(" dune ");
        assert!(finder.submit());
        assert_url!("https://openlibrary.org/search.json?title=+dune+");
    }

    #[test]
    fn empty_docs_shows_no_results_notice() {
        let mut finder = finder::<EmptyDocsProducer>("zzzzqqqq");

        assert!(finder.submit());

        let state = finder.state();
        assert_eq!(Some(Notice::NoResults), state.notice());
        assert_eq!(NO_RESULTS_MESSAGE, state.notice().unwrap().to_string());
        assert!(state.results().is_empty());
        assert!(!state.is_loading());
    }

    #[test]
    fn results_are_truncated_in_order() {
        let mut finder = finder::<FortyDocsProducer>("book");
        assert!(finder.submit());

        let expected: Vec<String> = (0..MAX_RESULTS).map(|i| format!("Book {i}")).collect();
        assert_eq!(expected, titles(finder.state()));
    }

    #[test]
    fn short_result_lists_are_kept_whole() {
        let mut finder = finder::<FiveDocsProducer>("book");
        assert!(finder.submit());

        assert_eq!(
            vec!["Book 0", "Book 1", "Book 2", "Book 3", "Book 4"],
            titles(finder.state())
        );
    }

    #[test]
    fn oddly_typed_entries_are_kept() {
        let mut finder = finder::<MixedDocsProducer>("dune");
        assert!(finder.submit());

        let state = finder.state();
        assert_eq!(None, state.notice());
        assert_eq!(vec!["Dune", "1984", ""], titles(state));

        let cards = finder.cards();
        assert_eq!("Frank Herbert", cards[0].author());
        assert_eq!(
            "https://via.placeholder.com/150x200?text=No+Cover",
            cards[0].cover().src()
        );
        assert_eq!("N/A", cards[1].year());
    }

    fn assert_failed(state: &SearchState, kind: ErrorKind) {
        assert_eq!(Some(Notice::Failed(kind)), state.notice());
        assert_eq!(FAILURE_MESSAGE, state.notice().unwrap().to_string());
        assert!(state.results().is_empty());
        assert!(!state.is_loading());
    }

    #[test]
    fn network_failure_shows_failure_notice() {
        let mut finder = finder::<NetworkErrorProducer>("dune");
        assert!(finder.submit());
        assert_failed(finder.state(), ErrorKind::IO);
    }

    #[test]
    fn server_error_shows_failure_notice() {
        let mut finder = finder::<ServerErrorProducer>("dune");
        assert!(finder.submit());
        assert_failed(finder.state(), ErrorKind::Status);
    }

    #[test]
    fn malformed_json_shows_failure_notice() {
        let mut finder = finder::<MalformedProducer>("dune");
        assert!(finder.submit());
        assert_failed(finder.state(), ErrorKind::Deserialize);
    }

    #[test]
    fn loading_only_while_search_is_in_flight() {
        let mut finder = finder::<DuneProducer>("dune");
        assert!(!finder.state().is_loading());

        let ticket = finder.begin().expect("query is searchable");
        assert!(finder.state().is_loading());

        let outcome = finder.fetch(&ticket);
        assert!(finder.state().is_loading());

        assert!(finder.finish(ticket, outcome));
        assert!(!finder.state().is_loading());
    }

    #[test]
    fn begin_clears_previous_outcome() {
        let mut finder = finder::<DuneProducer>("dune");
        assert!(finder.submit());
        assert_eq!(1, finder.state().results().len());

        let ticket = finder.begin().unwrap();
        let state = finder.state();
        assert!(state.is_loading());
        assert!(state.results().is_empty());
        assert_eq!(None, state.notice());
        drop(ticket);
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut finder = finder::<DuneProducer>("dune");
        let first = finder.begin().unwrap();

        finder.set_query("foundation");
        let second = finder.begin().unwrap();
        assert!(second.seq() > first.seq());
        assert_eq!(
            "https://openlibrary.org/search.json?title=foundation",
            second.url()
        );

        // the second search completes first
        assert!(finder.finish(second, Ok(vec![BookResult::new("Foundation")])));
        assert!(!finder.finish(first, Ok(vec![BookResult::new("Dune")])));

        assert_eq!(vec!["Foundation"], titles(finder.state()));
        assert!(!finder.state().is_loading());
    }

    #[test]
    fn stale_response_does_not_end_loading() {
        let mut finder = finder::<DuneProducer>("dune");
        let first = finder.begin().unwrap();
        let second = finder.begin().unwrap();

        let err = Error::new(ErrorKind::IO, "connection refused");
        assert!(!finder.finish(first, Err(err)));
        assert!(finder.state().is_loading());
        assert_eq!(None, finder.state().notice());

        assert!(finder.finish(second, Ok(Vec::new())));
        assert_eq!(Some(Notice::NoResults), finder.state().notice());
    }

    #[test]
    fn cards_follow_results() {
        let mut finder = finder::<DuneProducer>("dune");
        assert!(finder.cards().is_empty());

        assert!(finder.submit());
        let cards = finder.cards();
        assert_eq!(1, cards.len());
        assert_eq!("Dune", cards[0].title());
    }
}
