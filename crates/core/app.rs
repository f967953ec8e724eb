use bookfinder::{
    api::Client,
    render::{HtmlView, TextView},
    Config, Finder, SearchState,
};
use clap::ArgEnum;
use log::trace;

use crate::interact::user_input;

const HEADER: &str = "📚 Book Finder";
const PROMPT: &str = "Search for books...";

/// How the page is printed.
#[derive(Clone, Copy, Debug, ArgEnum)]
pub enum Format {
    Text,
    Html,
}

impl Format {
    pub fn view(self, state: &SearchState, config: &Config) -> String {
        match self {
            Format::Text => TextView::new(state, config).to_string(),
            Format::Html => HtmlView::new(state, config).to_string(),
        }
    }
}

/// Submits the current query once and prints the outcome, a blank query prints nothing.
pub fn search_once<C: Client>(finder: &mut Finder<C>, format: Format) {
    if finder.submit() {
        print!("{}", format.view(finder.state(), finder.config()));
    } else {
        trace!("Nothing to search for in {:?}", finder.query().as_str());
    }
}

/// Runs the interactive page until input is cancelled.
///
/// Every line entered is a search, the loading line is printed before the request is sent.
pub fn browse<C: Client>(finder: &mut Finder<C>, format: Format) -> eyre::Result<()> {
    println!("{HEADER}\n");

    loop {
        let query = user_input(PROMPT)?;
        finder.set_query(query);

        if let Some(ticket) = finder.begin() {
            print!("{}", format.view(finder.state(), finder.config()));

            let outcome = finder.fetch(&ticket);
            finder.finish(ticket, outcome);

            println!("{}", format.view(finder.state(), finder.config()));
        }
    }
}
