//! Channel and message client.
//!
//! DESIGN
//! ======
//! Each operation is one REST call: format the URL, issue the request over
//! the injected [`HttpTransport`], decode the body. Identifiers are spliced
//! into the path as-is, so callers must pass URL-safe SIDs. Nothing is
//! cached, retried, or paginated; list calls return the first page the
//! server hands back.
//!
//! Non-2xx responses are decoded into an [`Exception`] on a best-effort
//! basis. If that decode fails the default `Exception` is kept and the raw
//! body still travels in the error, so callers always see what the server
//! said.

use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::config::{self, IpMsgConfig};
use crate::error::IpMsgError;
use crate::transport::{FormValues, HttpResponse, HttpTransport, ReqwestTransport};
use crate::types::{Channel, ChannelPage, ChannelType, Exception, Message, MessagePage};

/// Status a channel delete must return to count as success.
const DELETE_SUCCESS_STATUS: u16 = 204;

// =============================================================================
// CLIENT
// =============================================================================

/// Stateless client for the channel and message endpoints.
///
/// Holds only the base URL and a shared transport, so one instance can be
/// cloned across tasks freely.
#[derive(Clone)]
pub struct IpMsgClient {
    transport: Arc<dyn HttpTransport>,
    base_url: String,
}

impl IpMsgClient {
    /// Build a client against the default provider URL.
    #[must_use]
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport, base_url: config::DEFAULT_BASE_URL.to_string() }
    }

    /// Set a custom base URL (for testing or proxies).
    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = config::normalize_base_url(base_url);
        self
    }

    /// Build a client backed by [`ReqwestTransport`] from parsed config.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn from_config(config: &IpMsgConfig) -> Result<Self, IpMsgError> {
        let transport = ReqwestTransport::from_config(config)?;
        Ok(Self::new(Arc::new(transport)).with_base_url(&config.base_url))
    }

    /// Build a client from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if credentials are missing or the HTTP client fails.
    pub fn from_env() -> Result<Self, IpMsgError> {
        Self::from_config(&IpMsgConfig::from_env()?)
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // -------------------------------------------------------------------------
    // Channels
    // -------------------------------------------------------------------------

    /// List the channels of a service, in server order.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-2xx status, or a body
    /// that does not decode as a channel page.
    pub async fn list_channels(&self, service_sid: &str) -> Result<Vec<Channel>, IpMsgError> {
        Ok(self.list_channels_page(service_sid).await?.channels)
    }

    /// List the channels of a service along with the page metadata.
    ///
    /// # Errors
    ///
    /// Same as [`IpMsgClient::list_channels`].
    pub async fn list_channels_page(&self, service_sid: &str) -> Result<ChannelPage, IpMsgError> {
        let url = self.channels_url(service_sid);
        self.send_request(Request::Get, &url).await
    }

    /// Create a channel and return its SID.
    ///
    /// Empty `friendly_name` or `unique_name` are left out of the form
    /// entirely rather than sent blank. `ChannelType::Unknown` is rejected
    /// before any request is made.
    ///
    /// # Errors
    ///
    /// Returns [`IpMsgError::InvalidChannelType`] for `ChannelType::Unknown`,
    /// or an error on transport failure, a non-2xx status, or an undecodable
    /// body.
    pub async fn create_channel(
        &self,
        service_sid: &str,
        channel_type: ChannelType,
        friendly_name: &str,
        unique_name: &str,
    ) -> Result<String, IpMsgError> {
        if channel_type == ChannelType::Unknown {
            return Err(IpMsgError::InvalidChannelType(channel_type.as_str().to_owned()));
        }
        let url = self.channels_url(service_sid);
        let form = create_channel_form(channel_type, friendly_name, unique_name);
        let channel: Channel = self.send_request(Request::Post(&form), &url).await?;
        Ok(channel.sid)
    }

    /// Delete a channel.
    ///
    /// Only a 204 counts as success; every other status, 2xx included,
    /// collapses into [`IpMsgError::DeleteFailed`] and the body is ignored.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or any status other than 204.
    pub async fn delete_channel(&self, service_sid: &str, channel_sid: &str) -> Result<(), IpMsgError> {
        let url = self.channel_url(service_sid, channel_sid);
        tracing::debug!(method = "DELETE", %url, "ipmsg request");

        let response = self.transport.delete(&url).await?;
        check_delete_status(response.status)
    }

    // -------------------------------------------------------------------------
    // Messages
    // -------------------------------------------------------------------------

    /// Post a message to a channel and return the created message.
    ///
    /// `member_sid` is accepted for API compatibility but is not sent; only
    /// `Body` and `From` go on the wire.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-2xx status, or an
    /// undecodable body.
    pub async fn send_message(
        &self,
        service_sid: &str,
        channel_sid: &str,
        member_sid: &str,
        body: &str,
        from: &str,
    ) -> Result<Message, IpMsgError> {
        let url = self.messages_url(service_sid, channel_sid);
        if !member_sid.is_empty() {
            tracing::debug!(member_sid, "member sid is not transmitted on send");
        }
        let form = send_message_form(body, from);
        self.send_request(Request::Post(&form), &url).await
    }

    /// List the messages of a channel, in server order.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-2xx status, or a body
    /// that does not decode as a message page.
    pub async fn list_messages(&self, service_sid: &str, channel_sid: &str) -> Result<Vec<Message>, IpMsgError> {
        Ok(self.list_messages_page(service_sid, channel_sid).await?.messages)
    }

    /// List the messages of a channel along with the page metadata.
    ///
    /// # Errors
    ///
    /// Same as [`IpMsgClient::list_messages`].
    pub async fn list_messages_page(&self, service_sid: &str, channel_sid: &str) -> Result<MessagePage, IpMsgError> {
        let url = self.messages_url(service_sid, channel_sid);
        self.send_request(Request::Get, &url).await
    }

    // -------------------------------------------------------------------------
    // Shared request path
    // -------------------------------------------------------------------------

    async fn send_request<T: DeserializeOwned>(&self, request: Request<'_>, url: &str) -> Result<T, IpMsgError> {
        let response = match request {
            Request::Get => {
                tracing::debug!(method = "GET", %url, "ipmsg request");
                self.transport.get(url).await?
            }
            Request::Post(form) => {
                tracing::debug!(method = "POST", %url, fields = form.len(), "ipmsg request");
                self.transport.post(form, url).await?
            }
        };
        tracing::debug!(status = response.status, %url, "ipmsg response");
        decode_response(response)
    }

    fn channels_url(&self, service_sid: &str) -> String {
        format!("{}/Services/{service_sid}/Channels", self.base_url)
    }

    fn channel_url(&self, service_sid: &str, channel_sid: &str) -> String {
        format!("{}/Services/{service_sid}/Channels/{channel_sid}", self.base_url)
    }

    fn messages_url(&self, service_sid: &str, channel_sid: &str) -> String {
        format!("{}/Services/{service_sid}/Channels/{channel_sid}/Messages", self.base_url)
    }
}

enum Request<'a> {
    Get,
    Post(&'a FormValues),
}

// =============================================================================
// FORMS
// =============================================================================

fn create_channel_form(channel_type: ChannelType, friendly_name: &str, unique_name: &str) -> FormValues {
    let mut form = FormValues::new();
    form.set_if_present("FriendlyName", friendly_name);
    form.set_if_present("UniqueName", unique_name);
    form.set("Type", channel_type.as_str());
    form
}

fn send_message_form(body: &str, from: &str) -> FormValues {
    let mut form = FormValues::new();
    form.set("Body", body);
    form.set("From", from);
    form
}

// =============================================================================
// DECODING
// =============================================================================

/// Decode a response into `T`, or into an [`IpMsgError::Api`] on a non-2xx status.
fn decode_response<T: DeserializeOwned>(response: HttpResponse) -> Result<T, IpMsgError> {
    if !response.is_success() {
        let exception = decode_exception(&response.body);
        tracing::warn!(status = response.status, code = exception.code, message = %exception.message, "ipmsg API error");
        return Err(IpMsgError::Api { status: response.status, exception, body: response.body });
    }

    serde_json::from_str(&response.body).map_err(|e| IpMsgError::Decode(e.to_string()))
}

/// Best-effort decode of an error body. A malformed body yields the default.
fn decode_exception(body: &str) -> Exception {
    serde_json::from_str(body).unwrap_or_default()
}

fn check_delete_status(status: u16) -> Result<(), IpMsgError> {
    if status == DELETE_SUCCESS_STATUS {
        Ok(())
    } else {
        tracing::warn!(status, "ipmsg channel delete failed");
        Err(IpMsgError::DeleteFailed { status })
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
