//! CDDB command construction
//!
//! Commands travel in the `cmd` query parameter of the CGI endpoint with
//! their words joined by `+`.

use crate::disc::TableOfContents;

/// Protocol level sent when none is configured (adds DYEAR/DGENRE to records)
pub const DEFAULT_PROTO_LEVEL: u8 = 6;

/// Application name and version, sent in the hello handshake and User-Agent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppIdentity {
    pub name: String,
    pub version: String,
}

impl AppIdentity {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    /// Value for the User-Agent header: `<name>/<version>`
    pub fn user_agent(&self) -> String {
        format!("{}/{}", self.name, self.version)
    }
}

impl Default for AppIdentity {
    fn default() -> Self {
        Self::new(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
    }
}

/// Identity announced to the server with every command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelloIdentity {
    pub user: String,
    pub host: String,
    pub app: AppIdentity,
}

impl HelloIdentity {
    /// `hello` parameter value: each component percent-encoded, joined with a literal `+`
    pub fn hello_param(&self) -> String {
        [
            self.user.as_str(),
            self.host.as_str(),
            self.app.name.as_str(),
            self.app.version.as_str(),
        ]
        .iter()
        .map(|part| urlencoding::encode(part).into_owned())
        .collect::<Vec<_>>()
        .join("+")
    }
}

/// Build `cddb+query+<discid>+<ntrks>+<off_1>+...+<off_n>+<nsecs>`
pub fn query_command(disc_id: &str, toc: &TableOfContents) -> String {
    let mut parts = vec![
        "cddb".to_string(),
        "query".to_string(),
        disc_id.to_string(),
        toc.track_count().to_string(),
    ];
    parts.extend(toc.track_offsets.iter().map(|offset| offset.to_string()));
    parts.push(toc.total_seconds().to_string());
    parts.join("+")
}

/// Build `cddb+read+<category>+<discid>`
pub fn read_command(category: &str, disc_id: &str) -> String {
    format!("cddb+read+{}+{}", category, disc_id)
}

/// Full CGI request URL for a command
pub fn request_url(cgi_base: &str, command: &str, hello_param: &str, proto: u8) -> String {
    format!(
        "{}?cmd={}&hello={}&proto={}",
        cgi_base, command, hello_param, proto
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> HelloIdentity {
        HelloIdentity {
            user: "jane doe".to_string(),
            host: "example.org".to_string(),
            app: AppIdentity::new("cddb-lookup", "0.1.0"),
        }
    }

    #[test]
    fn test_hello_param_escapes_each_component() {
        assert_eq!(
            identity().hello_param(),
            "jane%20doe+example.org+cddb-lookup+0.1.0"
        );

        let tricky = HelloIdentity {
            user: "a+b".to_string(),
            host: "h&st".to_string(),
            app: AppIdentity::new("app/x", "1 2"),
        };
        assert_eq!(tricky.hello_param(), "a%2Bb+h%26st+app%2Fx+1%202");
    }

    #[test]
    fn test_query_command() {
        let toc = TableOfContents::new(vec![150, 22343, 46248], 164200).unwrap();
        assert_eq!(
            query_command("21088c03", &toc),
            "cddb+query+21088c03+3+150+22343+46248+2188"
        );
    }

    #[test]
    fn test_read_command() {
        assert_eq!(read_command("rock", "abcd1234"), "cddb+read+rock+abcd1234");
    }

    #[test]
    fn test_request_url() {
        let url = request_url(
            "http://gnudb.gnudb.org/~cddb/cddb.cgi",
            "cddb+read+rock+abcd1234",
            &identity().hello_param(),
            DEFAULT_PROTO_LEVEL,
        );
        assert_eq!(
            url,
            "http://gnudb.gnudb.org/~cddb/cddb.cgi?cmd=cddb+read+rock+abcd1234&hello=jane%20doe+example.org+cddb-lookup+0.1.0&proto=6"
        );
    }

    #[test]
    fn test_user_agent() {
        assert_eq!(AppIdentity::new("cddb-lookup", "0.1.0").user_agent(), "cddb-lookup/0.1.0");
    }
}
