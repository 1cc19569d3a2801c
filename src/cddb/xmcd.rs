//! XMCD record model, parser and serializer
//!
//! XMCD is the line-oriented `KEY=value` format CDDB servers use for disc
//! records. Lines starting with `#` are comments.

use std::sync::LazyLock;

use regex::Regex;

use super::command::AppIdentity;
use crate::disc::TableOfContents;

const UNKNOWN_ARTIST: &str = "Unknown Artist";
const UNKNOWN_TITLE: &str = "Unknown Title";

/// Highest track count a CDDB disc can have
pub const MAX_TRACKS: usize = 99;

static TRACK_TITLE_KEY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^TTITLE([0-9]+)$").unwrap());

/// Ordered `KEY=value` fields of a record
///
/// A key keeps the position where it was first inserted; inserting it again
/// replaces the value in place.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawFields {
    entries: Vec<(String, String)>,
}

impl RawFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a field, returning the previous value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Fields in first-insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A disc record as read from a CDDB server
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XmcdRecord {
    pub category: String,
    pub disc_id: String,
    /// "Artist / Album"
    pub dtitle: String,
    pub dyear: String,
    pub dgenre: String,
    /// Track titles by 0-based track number
    pub track_titles: Vec<String>,
    /// Every parsed field, including the ones modeled above
    pub raw_fields: RawFields,
}

impl XmcdRecord {
    pub fn new(category: impl Into<String>, disc_id: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            disc_id: disc_id.into(),
            ..Self::default()
        }
    }

    /// Set a track title, padding skipped indices with empty titles
    pub fn set_track_title(&mut self, index: usize, title: impl Into<String>) {
        if self.track_titles.len() <= index {
            self.track_titles.resize(index + 1, String::new());
        }
        self.track_titles[index] = title.into();
    }

    /// Split DTITLE into artist and album title
    ///
    /// Missing halves become "Unknown Artist" / "Unknown Title".
    pub fn artist_and_title(&self) -> (String, String) {
        let sanitized = sanitize_metadata(&self.dtitle);
        if sanitized.is_empty() {
            return (UNKNOWN_ARTIST.to_string(), UNKNOWN_TITLE.to_string());
        }

        match sanitized.split_once('/') {
            Some((artist, title)) => {
                let artist = artist.trim();
                let title = title.trim();
                (
                    if artist.is_empty() { UNKNOWN_ARTIST } else { artist }.to_string(),
                    if title.is_empty() { UNKNOWN_TITLE } else { title }.to_string(),
                )
            }
            None => (sanitized, UNKNOWN_TITLE.to_string()),
        }
    }

    /// Serialize to XMCD lines (without the protocol's terminating `.`)
    pub fn to_xmcd_lines(&self, toc: Option<&TableOfContents>, app: Option<&AppIdentity>) -> Vec<String> {
        let mut lines = vec!["# xmcd".to_string()];

        if let Some(toc) = toc {
            lines.push("# Track frame offsets:".to_string());
            lines.extend(toc.track_offsets.iter().map(|offset| format!("#\t{}", offset)));
            lines.push(format!("# Disc length: {} seconds", toc.total_seconds()));
        }

        if let Some(app) = app.filter(|app| !app.name.is_empty()) {
            if app.version.is_empty() {
                lines.push(format!("# Submitted via: {}", app.name));
            } else {
                lines.push(format!("# Submitted via: {} {}", app.name, app.version));
            }
        }

        for (key, value) in [
            ("DISCID", &self.disc_id),
            ("DTITLE", &self.dtitle),
            ("DYEAR", &self.dyear),
            ("DGENRE", &self.dgenre),
        ] {
            if !value.is_empty() {
                lines.push(field_line(key, value));
            }
        }

        for (index, title) in self.track_titles.iter().enumerate() {
            lines.push(field_line(&format!("TTITLE{}", index), title));
        }

        if let Some(extd) = self.raw_fields.get("EXTD") {
            lines.push(field_line("EXTD", extd));
        }
        for (key, value) in self.raw_fields.iter().filter(|(key, _)| key.starts_with("EXTT")) {
            lines.push(field_line(key, value));
        }
        if let Some(playorder) = self.raw_fields.get("PLAYORDER") {
            lines.push(field_line("PLAYORDER", playorder));
        }

        lines
    }

    /// Serialize to XMCD text, one line per field, each ending in `\n`
    pub fn to_xmcd(&self, toc: Option<&TableOfContents>, app: Option<&AppIdentity>) -> String {
        let mut text = String::new();
        for line in self.to_xmcd_lines(toc, app) {
            text.push_str(&line);
            text.push('\n');
        }
        text
    }
}

/// Parse the body lines of a `cddb read` response into a record
///
/// Comments, blank lines and lines without a `KEY=` prefix are skipped.
/// `TTITLE<n>` keys with `n` at or above [`MAX_TRACKS`] are kept in
/// `raw_fields` only.
pub fn parse_xmcd_record<S: AsRef<str>>(category: &str, disc_id: &str, lines: &[S]) -> XmcdRecord {
    let mut record = XmcdRecord::new(category, disc_id);

    for line in lines {
        let line: &str = line.as_ref();
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        if key.is_empty() {
            continue;
        }

        record.raw_fields.insert(key, value);

        match key {
            "DTITLE" => record.dtitle = value.to_string(),
            "DYEAR" => record.dyear = value.to_string(),
            "DGENRE" => record.dgenre = value.to_string(),
            _ => {
                if let Some(index) = track_title_index(key) {
                    record.set_track_title(index, value);
                }
            }
        }
    }

    log::debug!(
        "Parsed XMCD record {}/{}: {} field(s), {} track title(s)",
        category,
        disc_id,
        record.raw_fields.len(),
        record.track_titles.len()
    );
    record
}

fn track_title_index(key: &str) -> Option<usize> {
    TRACK_TITLE_KEY
        .captures(key)
        .and_then(|caps| caps[1].parse::<usize>().ok())
        .filter(|index| *index < MAX_TRACKS)
}

fn field_line(key: &str, value: &str) -> String {
    format!("{}={}", key, one_line(value))
}

/// Keep a value on a single line: drop CR, turn LF into a space
pub fn one_line(value: &str) -> String {
    value.replace('\r', "").replace('\n', " ")
}

/// CR/LF become spaces and surrounding whitespace is trimmed
pub fn sanitize_metadata(value: &str) -> String {
    value.replace(['\r', '\n'], " ").trim().to_string()
}
