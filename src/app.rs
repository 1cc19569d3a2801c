//! Lookup flow behind the command-line tool
//!
//! Query the server, read one match, print it, then run the requested exports.

use crate::cddb::charset;
use crate::cddb::{AppIdentity, FreedbClient, XmcdRecord};
use crate::cli::Args;
use crate::config::AppConfig;
use crate::disc::TableOfContents;
use crate::error::CddbResult;
use crate::export::{self, cdplayer, ExportTarget};

/// Run one lookup session
pub fn run(args: Args, config: &AppConfig) -> CddbResult<()> {
    let toc = TableOfContents::from_json_file(&args.toc)?;
    print_disc(&toc)?;

    let mut settings = config.cddb.client_settings();
    if let Some(cgi) = &args.cgi {
        settings.cgi_base = cgi.clone();
    }
    if let Some(user) = &args.user {
        settings.user = user.clone();
    }
    if let Some(host) = &args.host {
        settings.host = host.clone();
    }
    if let Some(encoding) = &args.encoding {
        settings.encoding = encoding.clone();
    }
    if let Some(proto) = args.proto {
        settings.proto = proto;
    }

    let client = FreedbClient::new(settings)?;

    let matches = client.query(&toc)?;
    if matches.is_empty() {
        println!("No match.");
        return Ok(());
    }

    println!("Matches:");
    for (index, m) in matches.iter().enumerate() {
        println!("  [{}] {} {} {}", index, m.category, m.disc_id, m.title);
    }

    let Some(chosen) = matches.get(args.match_index) else {
        println!("No match with index {}.", args.match_index);
        return Ok(());
    };

    let lines = match client.read(&chosen.category, &chosen.disc_id)? {
        Some(lines) if !lines.is_empty() => lines,
        _ => {
            println!("Failed to read XMCD.");
            return Ok(());
        }
    };

    let record = FreedbClient::parse_xmcd_record(&chosen.category, &chosen.disc_id, &lines);
    print_record(&record);

    let out_encoding = match args.out_encoding.as_deref().or(config.export.out_encoding.as_deref()) {
        Some(label) => charset::encoding_or_utf8(label),
        None => client.encoding(),
    };

    if let Some(dir) = &args.xmcd_out {
        let path = export::save_raw_lines(dir, &record, &lines, out_encoding)?;
        println!("Saved XMCD: {} ({})", path.display(), out_encoding.name());
    }

    if let Some(path) = &args.write_xmcd {
        export::write_record(path, &record, Some(&toc), Some(&AppIdentity::default()), out_encoding)?;
        println!("Wrote XMCD for submission: {}", path.display());
    }

    if let Some(serial) = &args.cdplayer_ini {
        let target = match &args.ini_path {
            Some(path) => Ok(ExportTarget::new(path)),
            None => ExportTarget::platform_default(),
        };
        let ini_encoding = charset::encoding_or_utf8(&config.export.cdplayer_ini_encoding);
        let exported = target.and_then(|target| {
            cdplayer::export(&target, serial, &record, toc.track_count(), None, ini_encoding)
        });
        match exported {
            Ok(path) => println!("Exported cdplayer.ini entry: {}", path.display()),
            Err(e) => println!("Failed to export cdplayer.ini: {}", e),
        }
    }

    Ok(())
}

fn print_disc(toc: &TableOfContents) -> CddbResult<()> {
    println!("FreeDB ID:      {}", toc.freedb_id()?);
    println!("MusicBrainz ID: {}", toc.musicbrainz_id());
    println!("Tracks:         {}", toc.track_count());
    println!("Length:         {} ({} s)", toc.total_time_string(), toc.total_seconds());
    println!();
    Ok(())
}

fn print_record(record: &XmcdRecord) {
    println!();
    println!("=== XMCD ===");
    println!("DTITLE: {}", record.dtitle);
    if !record.dyear.is_empty() {
        println!("DYEAR: {}", record.dyear);
    }
    if !record.dgenre.is_empty() {
        println!("DGENRE: {}", record.dgenre);
    }
    for (index, title) in record.track_titles.iter().enumerate() {
        println!("TTITLE{}: {}", index, title);
    }
}
