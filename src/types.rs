//! Wire types: channels, messages, pagination envelopes, and error payloads.
//!
//! DESIGN
//! ======
//! Plain data-transfer records mirroring the provider's JSON schema. Missing
//! fields fall back to defaults; fields the provider sends as `null` are
//! `Option`. Nothing here has behavior beyond field storage.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::IpMsgError;

// =============================================================================
// CHANNEL
// =============================================================================

/// Visibility of a channel within a service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "Option<String>")]
pub enum ChannelType {
    Public,
    Private,
    /// Missing, null, or a visibility value this client does not know about.
    #[default]
    Unknown,
}

impl ChannelType {
    /// Form value sent as the `Type` field on channel creation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
            Self::Unknown => "unknown",
        }
    }
}

impl From<Option<String>> for ChannelType {
    fn from(raw: Option<String>) -> Self {
        match raw.as_deref() {
            Some("public") => Self::Public,
            Some("private") => Self::Private,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for ChannelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChannelType {
    type Err = IpMsgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "public" => Ok(Self::Public),
            "private" => Ok(Self::Private),
            other => Err(IpMsgError::InvalidChannelType(other.to_owned())),
        }
    }
}

/// A named communication context within a service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Channel {
    pub sid: String,
    pub account_sid: String,
    pub service_sid: String,
    pub friendly_name: Option<String>,
    pub unique_name: Option<String>,
    /// Opaque JSON blob set by the application, passed through untouched.
    pub attributes: Option<String>,
    #[serde(rename = "type")]
    pub channel_type: ChannelType,
    pub date_created: String,
    pub date_updated: String,
    pub created_by: Option<String>,
    pub url: String,
}

// =============================================================================
// MESSAGE
// =============================================================================

/// A message posted to a channel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Message {
    pub sid: String,
    pub account_sid: String,
    pub service_sid: String,
    /// Channel the message was posted to.
    pub to: String,
    pub from: String,
    pub body: String,
    pub was_edited: bool,
    pub date_created: String,
    pub date_updated: String,
    pub url: String,
}

// =============================================================================
// PAGINATION
// =============================================================================

/// Page metadata returned with every list response. Never traversed by the client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageMeta {
    pub page: i64,
    pub page_size: i64,
    pub first_page_url: Option<String>,
    pub previous_page_url: Option<String>,
    pub url: String,
    pub next_page_url: Option<String>,
    pub key: Option<String>,
}

/// One page of channels as returned by the list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelPage {
    pub meta: PageMeta,
    pub channels: Vec<Channel>,
}

/// One page of messages as returned by the list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessagePage {
    pub meta: PageMeta,
    pub messages: Vec<Message>,
}

// =============================================================================
// ERROR PAYLOAD
// =============================================================================

/// Error body returned by the provider on a non-2xx status.
///
/// Every field is optional so any JSON object decodes. When the body is not
/// JSON at all the client keeps `Exception::default()`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Exception {
    pub status: u16,
    pub code: i64,
    pub message: String,
    pub more_info: Option<String>,
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
