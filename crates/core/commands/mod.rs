use crate::app::{self, Format};

use bookfinder::{api::Client, Finder};

use clap::Subcommand;
use log::trace;

#[derive(Subcommand)]
#[non_exhaustive]
pub enum Commands {
    /// Search books by title and print the matches
    ///
    /// A title made only of whitespace is not searched and nothing is printed.
    #[clap(arg_required_else_help = true)]
    Search {
        /// The title to search for, several words are joined with single spaces
        #[clap(required = true)]
        title: Vec<String>,
    },

    /// Search interactively, every line entered starts a new search
    ///
    /// Press Ctrl-C to leave.
    Browse,
}

impl Commands {
    pub fn execute<C: Client>(self, finder: &mut Finder<C>, format: Format) -> eyre::Result<()> {
        match self {
            Commands::Search { title } => {
                let title = title.join(" ");
                trace!("search subcommand called with the title '{title}'");
                finder.set_query(title);
                app::search_once(finder, format);
                Ok(())
            }
            Commands::Browse => {
                trace!("Starting interactive search");
                app::browse(finder, format)
            }
        }
    }
}
