//! Export module for fetched disc records
//!
//! Handles saving XMCD text files and writing cdplayer.ini entries.

pub mod cdplayer;
pub mod xmcd_file;

pub use cdplayer::ExportTarget;
pub use xmcd_file::{record_file_name, save_raw_lines, write_record};

/// Characters that are not allowed in file names on common platforms
const INVALID_FILE_NAME_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Make a string usable as part of a file name
///
/// Invalid characters become `_`; blank input becomes "Unknown".
pub fn sanitize_file_name_component(value: &str) -> String {
    let sanitized: String = value
        .trim()
        .chars()
        .map(|c| {
            if c.is_control() || INVALID_FILE_NAME_CHARS.contains(&c) {
                '_'
            } else {
                c
            }
        })
        .collect();

    let sanitized = sanitized.trim();
    if sanitized.is_empty() {
        "Unknown".to_string()
    } else {
        sanitized.to_string()
    }
}
