//! Cards drawn for each result and the two views of a [`SearchState`].

use std::fmt::{self, Display, Formatter};

use url::Url;

use crate::{config::Config, search::SearchState, BookResult};

/// Author line of a result without authors.
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";
/// Year line of a result without a publication year.
pub const UNKNOWN_YEAR: &str = "N/A";
/// Text shown while a search is in flight.
pub const LOADING_TEXT: &str = "Searching...";

/// URL of the medium sized cover image, or the placeholder when the result has no cover.
#[must_use]
pub fn cover_url(book: &BookResult, config: &Config) -> String {
    match book.cover_id() {
        Some(id) => format!("{}/{id}-M.jpg", config.covers_url()),
        None => config.placeholder_url().to_owned(),
    }
}

/// Authors joined with `", "`, or [`UNKNOWN_AUTHOR`].
#[must_use]
pub fn author_line(book: &BookResult) -> String {
    book.authors()
        .map_or_else(|| UNKNOWN_AUTHOR.to_owned(), |names| names.join(", "))
}

/// Year of first publication, or [`UNKNOWN_YEAR`].
#[must_use]
pub fn year_line(book: &BookResult) -> String {
    book.first_publish_year()
        .map_or_else(|| UNKNOWN_YEAR.to_owned(), ToString::to_string)
}

/// Storefront search for the title of `book`.
#[must_use]
pub fn purchase_link(book: &BookResult, config: &Config) -> Link {
    let mut href = config.storefront_url().clone();
    href.query_pairs_mut().append_pair("k", book.title());
    Link { href }
}

/// An outbound link opened in a new browsing context.
///
/// The new context gets no handle back to the page and no referrer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Link {
    href: Url,
}

impl Link {
    /// Browsing context the link opens in.
    pub const TARGET: &'static str = "_blank";
    /// Relationship keeping the opened page from reaching back to this one.
    pub const REL: &'static str = "noopener noreferrer";
    /// Text of the link.
    pub const LABEL: &'static str = "Buy Now";

    /// The link target.
    #[must_use]
    pub const fn href(&self) -> &Url {
        &self.href
    }
}

/// The cover image of a card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    src: String,
    alt: String,
}

impl Image {
    /// Image URL.
    #[must_use]
    pub fn src(&self) -> &str {
        &self.src
    }

    /// Alternative text, the book title.
    #[must_use]
    pub fn alt(&self) -> &str {
        &self.alt
    }
}

/// Everything drawn for one result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Card {
    key: usize,
    title: String,
    cover: Image,
    author: String,
    year: String,
    link: Link,
}

impl Card {
    /// Builds the card for the result at position `key` of the result list.
    #[must_use]
    pub fn from_book(key: usize, book: &BookResult, config: &Config) -> Self {
        Self {
            key,
            title: book.title().to_owned(),
            cover: Image {
                src: cover_url(book, config),
                alt: book.title().to_owned(),
            },
            author: author_line(book),
            year: year_line(book),
            link: purchase_link(book, config),
        }
    }

    /// One card per result, keyed by position.
    #[must_use]
    pub fn from_results(results: &[BookResult], config: &Config) -> Vec<Self> {
        results
            .iter()
            .enumerate()
            .map(|(key, book)| Self::from_book(key, book, config))
            .collect()
    }

    /// Position of the result in the result list.
    #[must_use]
    pub const fn key(&self) -> usize {
        self.key
    }

    /// The title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The cover image.
    #[must_use]
    pub const fn cover(&self) -> &Image {
        &self.cover
    }

    /// The author line.
    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }

    /// The year line.
    #[must_use]
    pub fn year(&self) -> &str {
        &self.year
    }

    /// The purchase link.
    #[must_use]
    pub const fn link(&self) -> &Link {
        &self.link
    }
}

/// Plain text view for terminals.
pub struct TextView<'a> {
    state: &'a SearchState,
    config: &'a Config,
}

impl<'a> TextView<'a> {
    /// Creates the view of `state`.
    #[must_use]
    pub const fn new(state: &'a SearchState, config: &'a Config) -> Self {
        Self { state, config }
    }
}

impl Display for TextView<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.state.is_loading() {
            writeln!(f, "{LOADING_TEXT}")?;
        }

        if let Some(notice) = self.state.notice() {
            writeln!(f, "{notice}")?;
        }

        for card in Card::from_results(self.state.results(), self.config) {
            writeln!(f, "[{}] {}", card.key + 1, card.title)?;
            writeln!(f, "    {}", card.author)?;
            writeln!(f, "    {}", card.year)?;
            writeln!(f, "    Cover:   {}", card.cover.src)?;
            writeln!(f, "    {}: {}", Link::LABEL, card.link.href)?;
        }
        Ok(())
    }
}

/// HTML fragment with the loading indicator, the notice and the grid of cards.
pub struct HtmlView<'a> {
    state: &'a SearchState,
    config: &'a Config,
}

impl<'a> HtmlView<'a> {
    /// Creates the view of `state`.
    #[must_use]
    pub const fn new(state: &'a SearchState, config: &'a Config) -> Self {
        Self { state, config }
    }
}

impl Display for HtmlView<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, r#"<div class="book-finder">"#)?;

        if self.state.is_loading() {
            writeln!(
                f,
                r#"  <div class="loading" role="status">{LOADING_TEXT}</div>"#
            )?;
        }

        if let Some(notice) = self.state.notice() {
            writeln!(f, r#"  <p class="notice">{}</p>"#, Escaped(&notice.to_string()))?;
        }

        writeln!(f, r#"  <div class="grid">"#)?;
        for card in Card::from_results(self.state.results(), self.config) {
            writeln!(f, r#"    <div class="card" data-key="{}">"#, card.key)?;
            writeln!(
                f,
                r#"      <img src="{}" alt="{}">"#,
                Escaped(&card.cover.src),
                Escaped(&card.cover.alt)
            )?;
            writeln!(f, "      <h2>{}</h2>", Escaped(&card.title))?;
            writeln!(f, r#"      <p class="author">{}</p>"#, Escaped(&card.author))?;
            writeln!(f, r#"      <p class="year">{}</p>"#, Escaped(&card.year))?;
            writeln!(
                f,
                r#"      <a href="{}" target="{}" rel="{}">{}</a>"#,
                Escaped(card.link.href.as_str()),
                Link::TARGET,
                Link::REL,
                Link::LABEL
            )?;
            writeln!(f, "    </div>")?;
        }
        writeln!(f, "  </div>")?;

        writeln!(f, "</div>")
    }
}

/// Escapes text for use in HTML content and quoted attribute values.
struct Escaped<'a>(&'a str);

impl Display for Escaped<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for c in self.0.chars() {
            match c {
                '&' => f.write_str("&amp;")?,
                '<' => f.write_str("&lt;")?,
                '>' => f.write_str("&gt;")?,
                '"' => f.write_str("&quot;")?,
                '\'' => f.write_str("&#39;")?,
                c => write!(f, "{c}")?,
            }
        }
        Ok(())
    }
}
