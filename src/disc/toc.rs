//! Table of Contents (TOC) value and disc ID calculation
//!
//! Implements the FreeDB/CDDB disc ID used for server lookups, plus the
//! MusicBrainz DiscID and TOC string shown alongside it.

use std::fs;
use std::path::Path;

use base64::Engine;
use serde::Deserialize;
use serde_json::{Map, Value};
use sha1::{Digest, Sha1};

use crate::error::{CddbError, CddbResult};

/// Frames per second (CD audio)
pub const FRAMES_PER_SECOND: u32 = 75;

/// Number of offset slots hashed into a MusicBrainz DiscID
const MUSICBRAINZ_OFFSET_SLOTS: usize = 99;

/// TOC (Table of Contents) data for an audio CD
///
/// Track 1 comes first in `track_offsets`. Built once from a disc reader or
/// a TOC JSON document and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableOfContents {
    /// Track start offsets in frames (75 per second)
    pub track_offsets: Vec<u32>,
    /// Lead-out offset in frames
    pub leadout_offset: u32,
}

/// TOC interchange document produced by external disc readers
///
/// Keys are lower-cased before deserializing, so property names match in any
/// case.
#[derive(Debug, Deserialize)]
struct TocDocument {
    #[serde(rename = "trackoffsetsframes")]
    track_offsets_frames: Option<Vec<u32>>,
    #[serde(default, rename = "leadoutoffsetframes")]
    leadout_offset_frames: u32,
}

impl TableOfContents {
    /// Create a TOC, rejecting discs without tracks
    pub fn new(track_offsets: Vec<u32>, leadout_offset: u32) -> CddbResult<Self> {
        if track_offsets.is_empty() {
            return Err(CddbError::InvalidToc("no track offsets".to_string()));
        }
        Ok(Self {
            track_offsets,
            leadout_offset,
        })
    }

    /// Parse a TOC from its JSON interchange form
    ///
    /// Expected shape: `{ "trackOffsetsFrames": [150, ...], "leadoutOffsetFrames": 180000 }`
    pub fn from_json_str(json: &str) -> CddbResult<Self> {
        let document: TocDocument = match serde_json::from_str::<Value>(json)? {
            Value::Object(fields) => {
                let folded: Map<String, Value> = fields
                    .into_iter()
                    .map(|(key, value)| (key.to_lowercase(), value))
                    .collect();
                serde_json::from_value(Value::Object(folded))?
            }
            other => serde_json::from_value(other)?,
        };
        let offsets = document
            .track_offsets_frames
            .filter(|offsets| !offsets.is_empty())
            .ok_or_else(|| CddbError::InvalidToc("trackOffsetsFrames is missing or empty".to_string()))?;
        Self::new(offsets, document.leadout_offset_frames)
    }

    /// Load a TOC JSON file from disk
    pub fn from_json_file(path: &Path) -> CddbResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| CddbError::TocFile {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Loaded TOC document from {}", path.display());
        Self::from_json_str(&content)
    }

    /// Get number of tracks
    pub fn track_count(&self) -> usize {
        self.track_offsets.len()
    }

    /// Playback length from the first track to the lead-out, in whole seconds
    ///
    /// Partial seconds round up. Returns 0 for an empty TOC or a lead-out that
    /// does not lie after the first track.
    pub fn total_seconds(&self) -> u32 {
        let Some(&start) = self.track_offsets.first() else {
            return 0;
        };
        if self.leadout_offset <= start {
            return 0;
        }
        let frames = self.leadout_offset - start;
        frames.div_ceil(FRAMES_PER_SECOND)
    }

    /// Get total disc length formatted as MM:SS
    pub fn total_time_string(&self) -> String {
        let seconds = self.total_seconds();
        format!("{:02}:{:02}", seconds / 60, seconds % 60)
    }

    /// FreeDB disc ID as 8 lowercase hex digits
    pub fn freedb_id(&self) -> CddbResult<String> {
        compute_disc_id(self)
    }

    /// Calculate MusicBrainz DiscID
    ///
    /// Reference: https://musicbrainz.org/doc/Disc_ID_Calculation
    pub fn musicbrainz_id(&self) -> String {
        let mut hasher = Sha1::new();

        // first track (1 byte) + last track (1 byte) + lead-out (4 bytes BE) + 99 offsets (4 bytes BE each)
        let mut data = Vec::with_capacity(2 + 4 + MUSICBRAINZ_OFFSET_SLOTS * 4);
        data.push(1u8);
        data.push(self.track_count().min(MUSICBRAINZ_OFFSET_SLOTS) as u8);
        data.extend_from_slice(&self.leadout_offset.to_be_bytes());

        for i in 0..MUSICBRAINZ_OFFSET_SLOTS {
            let offset = self.track_offsets.get(i).copied().unwrap_or(0);
            data.extend_from_slice(&offset.to_be_bytes());
        }

        hasher.update(&data);
        let result = hasher.finalize();

        base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(result)
    }

    /// TOC string for MusicBrainz fuzzy lookup
    ///
    /// Format: first_track + track_count + leadout + offset1 + offset2 + ...
    pub fn toc_string(&self) -> String {
        let mut parts = vec![
            "1".to_string(),
            self.track_count().to_string(),
            self.leadout_offset.to_string(),
        ];
        parts.extend(self.track_offsets.iter().map(|offset| offset.to_string()));
        parts.join("+")
    }
}

/// Compute the FreeDB/CDDB disc ID for a TOC
///
/// Reference: http://ftp.freedb.org/pub/freedb/latest/CDDBPROTO
pub fn compute_disc_id(toc: &TableOfContents) -> CddbResult<String> {
    if toc.track_offsets.is_empty() {
        return Err(CddbError::InvalidToc("cannot compute a disc ID without tracks".to_string()));
    }

    let checksum: u32 = toc
        .track_offsets
        .iter()
        .map(|offset| digit_sum(offset / FRAMES_PER_SECOND))
        .sum();

    let disc_id = ((checksum % 0xFF) << 24)
        | (toc.total_seconds() << 8)
        | toc.track_count() as u32;

    Ok(format!("{:08x}", disc_id))
}

/// Sum of decimal digits (for FreeDB checksum)
fn digit_sum(mut n: u32) -> u32 {
    let mut sum = 0;
    while n > 0 {
        sum += n % 10;
        n /= 10;
    }
    sum
}
