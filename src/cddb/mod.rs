//! CDDB protocol module
//!
//! Command construction, response parsing, the XMCD record format and the
//! HTTP client that ties them together.

pub mod charset;
pub mod client;
pub mod command;
pub mod response;
pub mod xmcd;

pub use client::{ClientSettings, FreedbClient};
pub use command::{AppIdentity, HelloIdentity, DEFAULT_PROTO_LEVEL};
pub use response::{CddbMatch, CddbResponse};
pub use xmcd::{parse_xmcd_record, RawFields, XmcdRecord};
