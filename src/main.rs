//! CDDB Lookup
//!
//! Command-line tool that identifies an audio CD from its table of contents
//! and fetches its record from a FreeDB-compatible server.

use clap::Parser;

use cddb_lookup::cli::Args;
use cddb_lookup::config::get_config;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(err) = cddb_lookup::app::run(args, get_config()) {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}
