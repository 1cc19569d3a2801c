//! Saving XMCD records to disk

use std::fs;
use std::path::{Path, PathBuf};

use encoding_rs::Encoding;

use super::sanitize_file_name_component;
use crate::cddb::charset;
use crate::cddb::{AppIdentity, XmcdRecord};
use crate::disc::TableOfContents;
use crate::error::CddbResult;

/// File name for a record: `<Artist> - <Title>.xmcd`
pub fn record_file_name(record: &XmcdRecord) -> String {
    let (artist, title) = record.artist_and_title();
    format!(
        "{} - {}.xmcd",
        sanitize_file_name_component(&artist),
        sanitize_file_name_component(&title)
    )
}

/// Save the lines of a `cddb read` response as fetched, one per line
///
/// Creates `dir` if needed and returns the path written.
pub fn save_raw_lines<S: AsRef<str>>(
    dir: &Path,
    record: &XmcdRecord,
    lines: &[S],
    encoding: &'static Encoding,
) -> CddbResult<PathBuf> {
    fs::create_dir_all(dir)?;
    let destination = dir.join(record_file_name(record));

    let mut text = String::new();
    for line in lines {
        text.push_str(line.as_ref());
        text.push('\n');
    }

    fs::write(&destination, charset::encode(&text, encoding))?;
    log::info!("Saved XMCD: {} ({})", destination.display(), encoding.name());
    Ok(destination)
}

/// Write a serialized record, ready to be submitted to a CDDB server
///
/// The protocol terminator line is not appended.
pub fn write_record(
    path: &Path,
    record: &XmcdRecord,
    toc: Option<&TableOfContents>,
    app: Option<&AppIdentity>,
    encoding: &'static Encoding,
) -> CddbResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let text = record.to_xmcd(toc, app);
    fs::write(path, charset::encode(&text, encoding))?;
    log::info!("Wrote XMCD record to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cddb::parse_xmcd_record;
    use encoding_rs::{SHIFT_JIS, UTF_8};

    #[test]
    fn test_record_file_name() {
        let mut record = XmcdRecord::new("rock", "21088c03");
        record.dtitle = "AC/DC Tribute / Best: Of?".to_string();
        assert_eq!(record_file_name(&record), "AC - DC Tribute _ Best_ Of_.xmcd");

        let blank = XmcdRecord::new("rock", "21088c03");
        assert_eq!(blank.artist_and_title().0, "Unknown Artist");
        assert_eq!(record_file_name(&blank), "Unknown Artist - Unknown Title.xmcd");
    }

    #[test]
    fn test_save_raw_lines_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested").join("out");
        let lines = vec!["# xmcd", "DTITLE=Band / Album", "TTITLE0=One"];
        let record = parse_xmcd_record("rock", "21088c03", &lines);

        let path = save_raw_lines(&target, &record, &lines, UTF_8).unwrap();

        assert_eq!(path, target.join("Band - Album.xmcd"));
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "# xmcd\nDTITLE=Band / Album\nTTITLE0=One\n"
        );
    }

    #[test]
    fn test_save_raw_lines_encodes_output() {
        let dir = tempfile::tempdir().unwrap();
        let lines = vec!["DTITLE=歌手 / 作品"];
        let record = parse_xmcd_record("misc", "00000001", &lines);

        let path = save_raw_lines(dir.path(), &record, &lines, SHIFT_JIS).unwrap();

        let bytes = fs::read(&path).unwrap();
        assert_eq!(charset::decode(&bytes, SHIFT_JIS), "DTITLE=歌手 / 作品\n");
        assert!(String::from_utf8(bytes).is_err());
    }

    #[test]
    fn test_write_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("submit.xmcd");
        let toc = TableOfContents::new(vec![150, 22343, 46248], 164200).unwrap();
        let mut record = XmcdRecord::new("rock", "21088c03");
        record.dtitle = "Band / Album".to_string();

        write_record(&path, &record, Some(&toc), None, UTF_8).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("# xmcd\n# Track frame offsets:\n#\t150\n"));
        assert!(text.contains("# Disc length: 2188 seconds\n"));
        assert!(text.ends_with("DTITLE=Band / Album\n"));
    }
}
