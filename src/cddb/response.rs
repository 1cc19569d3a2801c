//! CDDB response parsing
//!
//! A response is a status line (`<code> <message>`) optionally followed by
//! body lines up to a terminating `.` line. Parsing is lenient: malformed
//! input produces status 0 or skipped lines, never an error.

/// Found exact match; the match is on the status line
pub const STATUS_EXACT_MATCH: u16 = 200;
/// No match found
pub const STATUS_NO_MATCH: u16 = 202;
/// Multiple exact matches for `query`, or record data for `read`
pub const STATUS_OK_LIST: u16 = 210;
/// Inexact matches found
pub const STATUS_INEXACT_MATCHES: u16 = 211;

/// Line that terminates a multi-line body
const TERMINATOR: &str = ".";

/// One candidate disc returned by a `cddb query`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CddbMatch {
    /// Server genre bucket, e.g. "rock" or "misc"
    pub category: String,
    /// 8-hex-digit disc ID
    pub disc_id: String,
    /// Raw "Artist / Album" title
    pub title: String,
}

impl CddbMatch {
    /// Parse a `category discid title...` line
    ///
    /// Returns `None` when the line has fewer than three whitespace-separated
    /// tokens. The title keeps its inner spacing.
    pub fn parse_line(line: &str) -> Option<Self> {
        let (category, rest) = line.trim_start().split_once(char::is_whitespace)?;
        let (disc_id, title) = rest.trim_start().split_once(char::is_whitespace)?;
        let title = title.trim_start();
        if title.is_empty() {
            return None;
        }

        Some(Self {
            category: category.to_string(),
            disc_id: disc_id.to_string(),
            title: title.to_string(),
        })
    }
}

/// A decoded CDDB server response
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CddbResponse {
    pub status_code: u16,
    pub status_message: String,
    pub body_lines: Vec<String>,
}

impl CddbResponse {
    /// Parse decoded response text
    pub fn parse(text: &str) -> Self {
        let mut lines = text.lines();

        let Some(header) = lines.next() else {
            return Self::default();
        };
        let (status_code, status_message) = parse_status_line(header);

        let body_lines = lines
            .take_while(|line| *line != TERMINATOR)
            .map(str::to_string)
            .collect();

        Self {
            status_code,
            status_message,
            body_lines,
        }
    }

    /// Matches carried by a `cddb query` response
    ///
    /// Unknown and error status codes yield an empty list.
    pub fn matches(&self) -> Vec<CddbMatch> {
        match self.status_code {
            STATUS_EXACT_MATCH => self.single_match().into_iter().collect(),
            STATUS_OK_LIST | STATUS_INEXACT_MATCHES => self
                .body_lines
                .iter()
                .filter_map(|line| CddbMatch::parse_line(line))
                .collect(),
            STATUS_NO_MATCH => Vec::new(),
            other => {
                log::debug!("No matches for status {} ({})", other, self.status_message);
                Vec::new()
            }
        }
    }

    /// Body lines of a `cddb read` response, if the record was found
    pub fn into_record_lines(self) -> Option<Vec<String>> {
        (self.status_code == STATUS_OK_LIST).then_some(self.body_lines)
    }

    fn single_match(&self) -> Option<CddbMatch> {
        self.body_lines
            .first()
            .and_then(|line| CddbMatch::parse_line(line))
            .or_else(|| CddbMatch::parse_line(&self.status_message))
    }
}

/// Split `<code> <message>`; an unparseable code becomes 0 with an empty message
fn parse_status_line(header: &str) -> (u16, String) {
    let header = header.trim();
    let (code, message) = header.split_once(' ').unwrap_or((header, ""));

    match code.parse::<u16>() {
        Ok(code) => (code, message.to_string()),
        Err(_) => {
            log::debug!("Unparseable CDDB status line: {:?}", header);
            (0, String::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_match() {
        let response = CddbResponse::parse("202 No match found\n");
        assert_eq!(response.status_code, 202);
        assert_eq!(response.status_message, "No match found");
        assert!(response.matches().is_empty());
    }

    #[test]
    fn test_exact_match_on_status_line() {
        let response = CddbResponse::parse("200 rock abcd1234 Artist / Title\r\n");
        assert_eq!(
            response.matches(),
            vec![CddbMatch {
                category: "rock".to_string(),
                disc_id: "abcd1234".to_string(),
                title: "Artist / Title".to_string(),
            }]
        );
    }

    #[test]
    fn test_exact_match_prefers_body_line() {
        let response = CddbResponse::parse("200 Found exact match\nmisc 01020304 Someone / Something\n.\n");
        let matches = response.matches();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].category, "misc");
        assert_eq!(matches[0].title, "Someone / Something");
    }

    #[test]
    fn test_exact_match_falls_back_to_status_line() {
        let response = CddbResponse::parse("200 rock abcd1234 A / B\nbroken\n.\n");
        let matches = response.matches();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].category, "rock");
        assert_eq!(matches[0].disc_id, "abcd1234");
        assert_eq!(matches[0].title, "A / B");
    }

    #[test]
    fn test_inexact_matches_skip_short_lines() {
        let text = "211 Found inexact matches, list follows (until terminating `.')\r\n\
                    rock 11111111 Band A / First\r\n\
                    broken 22222222\r\n\
                    jazz  33333333   Band C / Third\r\n\
                    .\r\n\
                    misc 44444444 After / Terminator\r\n";
        let response = CddbResponse::parse(text);
        let matches = response.matches();
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].disc_id, "11111111");
        assert_eq!(matches[1].category, "jazz");
        assert_eq!(matches[1].disc_id, "33333333");
        assert_eq!(matches[1].title, "Band C / Third");
    }

    #[test]
    fn test_multiple_exact_matches() {
        let response = CddbResponse::parse("210 Found exact matches\nrock 1 A / B\nsoundtrack 2 C / D\n.");
        assert_eq!(response.matches().len(), 2);
    }

    #[test]
    fn test_terminator_excluded_from_body() {
        let response = CddbResponse::parse("210 rock abcd1234 CD database entry follows\n# xmcd\nDTITLE=A / B\n.\n");
        assert_eq!(response.body_lines, vec!["# xmcd", "DTITLE=A / B"]);
        assert!(!response.body_lines.iter().any(|line| line == "."));
    }

    #[test]
    fn test_body_without_terminator_runs_to_end() {
        let response = CddbResponse::parse("210 ok\nDTITLE=A\nDYEAR=1999");
        assert_eq!(response.body_lines, vec!["DTITLE=A", "DYEAR=1999"]);
    }

    #[test]
    fn test_unparseable_status_line() {
        let response = CddbResponse::parse("<html>oops</html>\nmore\n");
        assert_eq!(response.status_code, 0);
        assert_eq!(response.status_message, "");
        assert!(response.matches().is_empty());

        let empty = CddbResponse::parse("");
        assert_eq!(empty, CddbResponse::default());
    }

    #[test]
    fn test_status_without_message() {
        let response = CddbResponse::parse("202\n");
        assert_eq!(response.status_code, 202);
        assert_eq!(response.status_message, "");
    }

    #[test]
    fn test_error_codes_yield_no_matches() {
        for text in ["403 Database entry is corrupt", "409 No handshake", "500 Command syntax error"] {
            assert!(CddbResponse::parse(text).matches().is_empty());
        }
    }

    #[test]
    fn test_into_record_lines() {
        let found = CddbResponse::parse("210 rock abcd1234\nDTITLE=A / B\n.\n");
        assert_eq!(found.into_record_lines(), Some(vec!["DTITLE=A / B".to_string()]));

        let missing = CddbResponse::parse("401 rock abcd1234 No such CD entry in database\n");
        assert_eq!(missing.into_record_lines(), None);
    }

    #[test]
    fn test_parse_line_rejects_short_lines() {
        assert_eq!(CddbMatch::parse_line("rock abcd1234"), None);
        assert_eq!(CddbMatch::parse_line("rock abcd1234   "), None);
        assert_eq!(CddbMatch::parse_line(""), None);
    }
}
