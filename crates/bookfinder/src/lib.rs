#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::perf,
    clippy::style,
    clippy::missing_safety_doc,
    clippy::missing_const_for_fn
)]
#![warn(missing_docs, rust_2018_idioms)]
#![allow(clippy::module_name_repetitions)]

//! # bookfinder
//!
//! bookfinder is a library for searching books by title using the Open Library search API and
//! turning the matches into cards with a cover image, an author line, a year and a link to buy
//! the book.
//!
//! The [`Finder`] component owns the query typed by the user and the [`SearchState`] the page
//! is drawn from, [`render`] turns that state into text or HTML.
//!
//! ```no_run
//! use bookfinder::{render::TextView, Config, Finder};
//!
//! let config = Config::default();
//! let client = bookfinder::api::http_client(config.timeout())?;
//! let mut finder = Finder::new(client, config);
//!
//! finder.set_query("dune");
//! finder.submit();
//!
//! print!("{}", TextView::new(finder.state(), finder.config()));
//! # Ok::<(), bookfinder::Error>(())
//! ```

pub mod api;
mod book;
pub mod config;
mod error;
pub mod render;
pub mod search;

pub use book::{BookResult, Scalar};
pub use config::Config;
pub use error::{Error, ErrorKind};
pub use search::{Finder, Notice, Query, SearchState, Ticket};

