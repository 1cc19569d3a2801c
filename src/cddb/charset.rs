//! Text encoding lookup for CDDB responses and exported files
//!
//! Many CDDB mirrors serve Japanese records in EUC-JP, so that is the default
//! response encoding.

use encoding_rs::{Encoding, UTF_8};

/// Response encoding used when none is configured
pub const DEFAULT_ENCODING: &str = "euc-jp";

/// Resolve a WHATWG encoding label such as `euc-jp`, `shift_jis` or `utf-8`
pub fn lookup_encoding(label: &str) -> Option<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
}

/// Resolve an encoding label, falling back to UTF-8 for unknown labels
pub fn encoding_or_utf8(label: &str) -> &'static Encoding {
    lookup_encoding(label).unwrap_or_else(|| {
        log::warn!("Unknown encoding '{}', falling back to UTF-8", label);
        UTF_8
    })
}

/// Decode raw response bytes without failing on malformed sequences
pub fn decode(bytes: &[u8], encoding: &'static Encoding) -> String {
    let (decoded, actual, had_errors) = encoding.decode(bytes);
    if had_errors {
        log::debug!("Response contained byte sequences invalid in {}", actual.name());
    }
    decoded.into_owned()
}

/// Encode text for writing to disk
pub fn encode(text: &str, encoding: &'static Encoding) -> Vec<u8> {
    let (encoded, _, had_unmappable) = encoding.encode(text);
    if had_unmappable {
        log::warn!("Some characters cannot be represented in {}", encoding.name());
    }
    encoded.into_owned()
}
