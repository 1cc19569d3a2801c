//! Command-line arguments

use clap::Parser;
use std::path::PathBuf;

/// Look up a CD in a FreeDB/CDDB database from its table of contents
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
    /// TOC JSON file: { "trackOffsetsFrames": [..], "leadoutOffsetFrames": n }
    #[arg(long, value_name = "FILE")]
    pub toc: PathBuf,
    /// FreeDB-compatible CGI endpoint URL
    #[arg(long, value_name = "URL")]
    pub cgi: Option<String>,
    /// User name sent in the hello parameter
    #[arg(long)]
    pub user: Option<String>,
    /// Host name sent in the hello parameter
    #[arg(long)]
    pub host: Option<String>,
    /// Response encoding: euc-jp, shift_jis, utf-8, ...
    #[arg(long, value_name = "ENCODING")]
    pub encoding: Option<String>,
    /// CDDB protocol level
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=6))]
    pub proto: Option<u8>,
    /// Which match to read when the server returns several (0-based)
    #[arg(long = "match", value_name = "INDEX", default_value_t = 0)]
    pub match_index: usize,
    /// Save the fetched record as an .xmcd file in this directory
    #[arg(long, value_name = "DIR")]
    pub xmcd_out: Option<PathBuf>,
    /// Encoding for saved files (defaults to the response encoding)
    #[arg(long, value_name = "ENCODING")]
    pub out_encoding: Option<String>,
    /// Write the record re-serialized with this disc's TOC, for submission
    #[arg(long, value_name = "FILE")]
    pub write_xmcd: Option<PathBuf>,
    /// Export a cdplayer.ini entry for this volume serial number
    #[arg(long, value_name = "SERIAL")]
    pub cdplayer_ini: Option<String>,
    /// cdplayer.ini location (defaults to the Windows directory, required elsewhere)
    #[arg(long, value_name = "FILE", requires = "cdplayer_ini")]
    pub ini_path: Option<PathBuf>,
}
