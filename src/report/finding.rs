//! Finding definitions for the audit report
//!
//! A finding is one problematic link: anything whose first response was not a
//! plain `200 OK`, or whose request failed outright.

use serde::{Serialize, Serializer};
use std::fmt;

/// Placeholder used when an anchor has no visible text (image-only links)
pub const NO_TEXT_PLACEHOLDER: &str = "[Image/No Text]";

/// Initial status of a checked link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkStatus {
    /// HTTP status of the first response in the chain
    Code(u16),

    /// The request failed (timeout, connection error, broken redirect chain)
    Error,
}

impl LinkStatus {
    /// Returns true only for a plain `200 OK`
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Code(200))
    }

    /// Returns true for 3xx codes
    pub fn is_redirect(&self) -> bool {
        matches!(self, Self::Code(code) if (300..400).contains(code))
    }

    /// Returns the numeric code, if any
    pub fn code(&self) -> Option<u16> {
        match self {
            Self::Code(code) => Some(*code),
            Self::Error => None,
        }
    }
}

impl fmt::Display for LinkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Code(code) => write!(f, "{}", code),
            Self::Error => f.write_str("Error/Timeout"),
        }
    }
}

impl Serialize for LinkStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Code(code) => serializer.serialize_u16(*code),
            Self::Error => serializer.collect_str(self),
        }
    }
}

/// Where a checked link ended up
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Destination {
    /// The URL reached after following redirects
    Url(String),

    /// No redirect occurred
    Direct,

    /// The request failed, so there is no destination
    NotApplicable,
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => f.write_str(url),
            Self::Direct => f.write_str("Direct"),
            Self::NotApplicable => f.write_str("N/A"),
        }
    }
}

impl Serialize for Destination {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One row of the audit report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// The seed page the link was found on
    #[serde(rename = "Source Page")]
    pub source_page: String,

    /// Visible anchor text, or [`NO_TEXT_PLACEHOLDER`]
    #[serde(rename = "Anchor Text")]
    pub anchor_text: String,

    /// Absolute link URL as resolved from the page
    #[serde(rename = "Link in Body")]
    pub link_url: String,

    /// Status of the first response
    #[serde(rename = "Status Code")]
    pub status: LinkStatus,

    /// Final URL after redirects
    #[serde(rename = "Final Destination")]
    pub final_destination: Destination,
}
