#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::perf,
    clippy::style,
    clippy::missing_safety_doc,
    clippy::missing_const_for_fn
)]
#![allow(clippy::as_conversions, clippy::mod_module_files)]

use std::{error, process, time::Duration};

mod app;
mod commands;
mod interact;

use app::Format;
use commands::Commands;

use bookfinder::{config::QueryEncoding, Config, Finder};

use clap::{Args, Parser};
use log::trace;

fn main() {
    if let Err(err) = try_main() {
        eprintln!("{}", err);
        process::exit(2);
    }
}

fn try_main() -> Result<(), Box<dyn error::Error>> {
    let Cli {
        command,
        global_opts:
            GlobalOpts {
                endpoint,
                storefront,
                raw_query,
                timeout,
                format,
                verbosity,
                quiet,
            },
    } = Cli::parse();

    setup_errlog(verbosity as usize, quiet)?;

    let endpoint = endpoint
        .as_deref()
        .unwrap_or(bookfinder::config::SEARCH_URL);
    trace!("Using search endpoint '{endpoint}'");

    let encoding = if raw_query {
        trace!("Raw query mode enabled - the query is sent without encoding");
        QueryEncoding::Raw
    } else {
        QueryEncoding::Encoded
    };

    let mut config = Config::new(endpoint)?
        .with_encoding(encoding)
        .with_timeout(timeout.map(Duration::from_secs));

    if let Some(storefront) = storefront {
        trace!("Using storefront '{storefront}' for purchase links");
        config = config.with_storefront(&storefront)?;
    }

    let client = bookfinder::api::http_client(config.timeout())?;
    let mut finder = Finder::new(client, config);

    command.execute(&mut finder, format)?;
    Ok(())
}

fn setup_errlog(verbosity: usize, quiet: bool) -> Result<(), Box<dyn error::Error>> {
    // if quiet then ignore verbosity but still show errors
    let verbosity = if quiet { 1 } else { verbosity + 2 };

    stderrlog::new().verbosity(verbosity).init()?;
    Ok(())
}

#[derive(Parser)]
#[clap(name = "bookfinder")]
#[clap(about = "Find books by title using the Open Library search API")]
#[clap(version, author)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,

    #[clap(flatten)]
    global_opts: GlobalOpts,
}

#[derive(Debug, Args)]
struct GlobalOpts {
    /// The search endpoint, defaults to the Open Library search API
    #[clap(long, global = true)]
    endpoint: Option<String>,

    /// The storefront search page used for "Buy Now" links, the title is added as the `k`
    /// parameter
    #[clap(long, global = true)]
    storefront: Option<String>,

    /// Sends the query exactly as typed instead of percent-encoding it.
    ///
    /// Queries containing characters such as `&` or `#` will then change the meaning of the
    /// request URL.
    #[clap(long, global = true)]
    raw_query: bool,

    /// Gives up on a request after this many seconds, by default a request may wait forever
    #[clap(long, global = true)]
    timeout: Option<u64>,

    /// How results are printed
    #[clap(long, arg_enum, default_value = "text", global = true)]
    format: Format,

    /// How chatty the program is when performing commands
    ///
    /// The number of times this flag is used will increase how chatty
    /// the program is.
    #[clap(short, long, parse(from_occurrences), global = true)]
    verbosity: u8,

    /// Only log errors to stderr.
    #[clap(short, long, global = true)]
    quiet: bool,
}
