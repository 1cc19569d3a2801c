//! cdplayer.ini export
//!
//! Writes one `[<volume serial>]` section in the format read by the classic
//! Windows CD Player.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use encoding_rs::Encoding;

use crate::cddb::charset;
use crate::cddb::xmcd::sanitize_metadata;
use crate::cddb::XmcdRecord;
use crate::error::{CddbError, CddbResult};

/// Location the CD Player reads by default
pub const DEFAULT_INI_PATH: &str = r"C:\Windows\cdplayer.ini";

/// Where to write the file
#[derive(Debug, Clone)]
pub struct ExportTarget {
    pub primary: PathBuf,
    /// Used when writing `primary` is not permitted
    pub fallback: Option<PathBuf>,
}

impl ExportTarget {
    pub fn new(primary: impl Into<PathBuf>) -> Self {
        Self {
            primary: primary.into(),
            fallback: None,
        }
    }

    /// Standard Windows location, redirected to the VirtualStore copy when
    /// the Windows directory is read-only for the current user
    pub fn windows_default() -> Self {
        let fallback = std::env::var_os("LOCALAPPDATA").map(|base| {
            PathBuf::from(base)
                .join("VirtualStore")
                .join("Windows")
                .join("cdplayer.ini")
        });
        Self {
            primary: PathBuf::from(DEFAULT_INI_PATH),
            fallback,
        }
    }

    /// Default target for this platform
    ///
    /// Only Windows has a standard location; elsewhere the caller must name
    /// the file.
    pub fn platform_default() -> CddbResult<Self> {
        if cfg!(windows) {
            Ok(Self::windows_default())
        } else {
            Err(CddbError::Export(
                "no default cdplayer.ini location on this platform, use --ini-path".to_string(),
            ))
        }
    }
}

/// Build the ini section for a disc
///
/// `track_count` of 0 means "use as many titles as are available". Missing
/// titles are written as `TrackNN`.
pub fn build_content(
    volume_serial: &str,
    record: &XmcdRecord,
    track_count: usize,
    overrides: Option<&[String]>,
) -> CddbResult<String> {
    let volume_serial = volume_serial.trim();
    if volume_serial.is_empty() {
        return Err(CddbError::Export("volume serial number is required".to_string()));
    }

    let source = overrides.unwrap_or(&record.track_titles);
    let track_count = if track_count == 0 { source.len() } else { track_count };
    if track_count == 0 {
        return Err(CddbError::Export("track count must be greater than zero".to_string()));
    }

    let (artist, title) = record.artist_and_title();

    let mut content = String::new();
    content.push_str(&format!("[{}]\n", volume_serial));
    content.push_str(&format!("artist={}\n", artist));
    content.push_str(&format!("title={}\n", title));
    content.push_str(&format!("numtracks={}\n", track_count));
    for index in 0..track_count {
        let candidate = source
            .get(index)
            .map(|t| sanitize_metadata(t))
            .unwrap_or_default();
        let track_title = if candidate.is_empty() {
            format!("Track{:02}", index + 1)
        } else {
            candidate
        };
        content.push_str(&format!("{}={}\n", index, track_title));
    }

    Ok(content)
}

/// Write the ini section, trying the fallback path on permission errors
///
/// Returns the path actually written.
pub fn export(
    target: &ExportTarget,
    volume_serial: &str,
    record: &XmcdRecord,
    track_count: usize,
    overrides: Option<&[String]>,
    encoding: &'static Encoding,
) -> CddbResult<PathBuf> {
    let content = build_content(volume_serial, record, track_count, overrides)?;
    let bytes = charset::encode(&content, encoding);

    match write_file(&target.primary, &bytes) {
        Ok(()) => Ok(target.primary.clone()),
        Err(e) if e.kind() == ErrorKind::PermissionDenied => {
            let Some(fallback) = &target.fallback else {
                return Err(e.into());
            };
            log::warn!(
                "No permission to write {}, using {}",
                target.primary.display(),
                fallback.display()
            );
            write_file(fallback, &bytes)?;
            Ok(fallback.clone())
        }
        Err(e) => Err(e.into()),
    }
}

fn write_file(destination: &Path, bytes: &[u8]) -> std::io::Result<()> {
    if let Some(directory) = destination.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(directory)?;
    }
    fs::write(destination, bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::UTF_8;

    fn record() -> XmcdRecord {
        let mut record = XmcdRecord::new("rock", "21088c03");
        record.dtitle = "Band / Album".to_string();
        record.set_track_title(0, "Opening");
        record.set_track_title(2, "Line\r\nbreak ");
        record
    }

    #[test]
    fn test_build_content() {
        let content = build_content("1A2B3C4D", &record(), 4, None).unwrap();
        assert_eq!(
            content,
            "[1A2B3C4D]\n\
             artist=Band\n\
             title=Album\n\
             numtracks=4\n\
             0=Opening\n\
             1=Track02\n\
             2=Line  break\n\
             3=Track04\n"
        );
    }

    #[test]
    fn test_build_content_with_overrides_and_inferred_count() {
        let overrides = vec!["First".to_string(), "Second".to_string()];
        let content = build_content("ABCD", &record(), 0, Some(overrides.as_slice())).unwrap();
        assert!(content.contains("numtracks=2\n0=First\n1=Second\n"));
    }

    #[test]
    fn test_build_content_validation() {
        assert!(matches!(build_content("  ", &record(), 3, None), Err(CddbError::Export(_))));

        let empty = XmcdRecord::new("misc", "00000001");
        assert!(matches!(build_content("ABCD", &empty, 0, None), Err(CddbError::Export(_))));
    }

    #[test]
    fn test_platform_default_target() {
        let target = ExportTarget::platform_default();
        if cfg!(windows) {
            assert_eq!(target.unwrap().primary, PathBuf::from(DEFAULT_INI_PATH));
        } else {
            assert!(matches!(target, Err(CddbError::Export(_))));
        }
    }

    #[test]
    fn test_export_to_primary() {
        let dir = tempfile::tempdir().unwrap();
        let target = ExportTarget::new(dir.path().join("Windows").join("cdplayer.ini"));

        let written = export(&target, "ABCD", &record(), 3, None, UTF_8).unwrap();

        assert_eq!(written, target.primary);
        let text = fs::read_to_string(&written).unwrap();
        assert!(text.starts_with("[ABCD]\nartist=Band\n"));
    }

    #[test]
    fn test_export_non_permission_error_is_not_redirected() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"not a directory").unwrap();

        let target = ExportTarget {
            primary: blocker.join("cdplayer.ini"),
            fallback: Some(dir.path().join("fallback.ini")),
        };

        assert!(matches!(export(&target, "ABCD", &record(), 3, None, UTF_8), Err(CddbError::Io(_))));
        assert!(!dir.path().join("fallback.ini").exists());
    }
}
