//! FreeDB/CDDB HTTP client
//!
//! Speaks the CDDB protocol over the CGI interface offered by gnudb and other
//! FreeDB-compatible servers: one GET per command, text response decoded with
//! the configured encoding.

use std::time::Duration;

use encoding_rs::Encoding;
use reqwest::blocking::Client;

use super::charset;
use super::command::{self, AppIdentity, HelloIdentity, DEFAULT_PROTO_LEVEL};
use super::response::{CddbMatch, CddbResponse};
use super::xmcd::{self, XmcdRecord};
use crate::disc::{compute_disc_id, TableOfContents};
use crate::error::{CddbError, CddbResult};

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Settings needed to talk to a CDDB server
#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// CGI endpoint, e.g. `http://gnudb.gnudb.org/~cddb/cddb.cgi`
    pub cgi_base: String,
    pub user: String,
    pub host: String,
    pub app: AppIdentity,
    pub proto: u8,
    /// Encoding label for response bodies
    pub encoding: String,
    pub timeout: Duration,
}

impl ClientSettings {
    pub fn new(cgi_base: impl Into<String>, user: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            cgi_base: cgi_base.into(),
            user: user.into(),
            host: host.into(),
            app: AppIdentity::default(),
            proto: DEFAULT_PROTO_LEVEL,
            encoding: charset::DEFAULT_ENCODING.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Client for one CDDB server
///
/// Holds only read-only configuration, so a single instance can be shared.
#[derive(Debug)]
pub struct FreedbClient {
    http: Client,
    cgi_base: String,
    hello_param: String,
    proto: u8,
    encoding: &'static Encoding,
}

impl FreedbClient {
    /// Validate settings and build the HTTP client
    ///
    /// Blank user/host and malformed URLs are rejected here, before any
    /// request is made. An unknown encoding label is not an error: responses
    /// are then decoded as UTF-8.
    pub fn new(settings: ClientSettings) -> CddbResult<Self> {
        if settings.user.trim().is_empty() {
            return Err(CddbError::MissingIdentity("user"));
        }
        if settings.host.trim().is_empty() {
            return Err(CddbError::MissingIdentity("host"));
        }

        reqwest::Url::parse(&settings.cgi_base).map_err(|e| CddbError::InvalidUrl {
            url: settings.cgi_base.clone(),
            reason: e.to_string(),
        })?;

        let encoding = charset::encoding_or_utf8(&settings.encoding);

        let hello = HelloIdentity {
            user: settings.user,
            host: settings.host,
            app: settings.app,
        };

        let http = Client::builder()
            .timeout(settings.timeout)
            .user_agent(hello.app.user_agent())
            .build()?;

        log::debug!(
            "CDDB client for {} (proto {}, encoding {})",
            settings.cgi_base,
            settings.proto,
            encoding.name()
        );

        Ok(Self {
            http,
            cgi_base: settings.cgi_base,
            hello_param: hello.hello_param(),
            proto: settings.proto,
            encoding,
        })
    }

    /// Encoding used to decode responses (UTF-8 if the configured label was unknown)
    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    /// Look up candidate records for a disc
    ///
    /// "No match" and unrecognized status codes return an empty list.
    pub fn query(&self, toc: &TableOfContents) -> CddbResult<Vec<CddbMatch>> {
        let disc_id = compute_disc_id(toc)?;
        log::info!("Querying CDDB for disc ID {} ({} tracks)", disc_id, toc.track_count());

        let response = self.send_command(&command::query_command(&disc_id, toc))?;
        let matches = response.matches();

        log::info!("CDDB query returned status {} with {} match(es)", response.status_code, matches.len());
        Ok(matches)
    }

    /// Fetch the raw XMCD lines of a record
    ///
    /// Returns `Ok(None)` when the server does not answer with a record.
    pub fn read(&self, category: &str, disc_id: &str) -> CddbResult<Option<Vec<String>>> {
        log::info!("Reading CDDB record {}/{}", category, disc_id);

        let response = self.send_command(&command::read_command(category, disc_id))?;
        let status = response.status_code;
        let lines = response.into_record_lines();

        if lines.is_none() {
            log::warn!("No record for {}/{} (status {})", category, disc_id, status);
        }
        Ok(lines)
    }

    /// Parse lines returned by [`FreedbClient::read`] into a record
    pub fn parse_xmcd_record<S: AsRef<str>>(category: &str, disc_id: &str, lines: &[S]) -> XmcdRecord {
        xmcd::parse_xmcd_record(category, disc_id, lines)
    }

    fn send_command(&self, cmd: &str) -> CddbResult<CddbResponse> {
        let url = command::request_url(&self.cgi_base, cmd, &self.hello_param, self.proto);
        log::debug!("GET {}", url);

        let response = self.http.get(&url).send()?;

        if !response.status().is_success() {
            let status = response.status();
            log::warn!("CDDB server error response: {}", status);
            return Err(CddbError::HttpStatus(status.as_u16()));
        }

        let bytes = response.bytes()?;
        let text = charset::decode(&bytes, self.encoding);
        Ok(CddbResponse::parse(&text))
    }
}
