//! Typed client for the IP Messaging REST API: channels and messages.
//!
//! DESIGN
//! ======
//! One stateless [`IpMsgClient`] maps each operation onto one REST call.
//! Requests go through the [`HttpTransport`] seam so the HTTP stack can be
//! swapped in tests; [`ReqwestTransport`] is the production implementation.
//!
//! ```rust,no_run
//! use ipmsg::{ChannelType, IpMsgClient};
//!
//! # async fn run() -> Result<(), ipmsg::IpMsgError> {
//! let client = IpMsgClient::from_env()?;
//! let sid = client.create_channel("IS123", ChannelType::Public, "General", "").await?;
//! client.send_message("IS123", &sid, "", "hello", "alice").await?;
//! for message in client.list_messages("IS123", &sid).await? {
//!     println!("{}: {}", message.from, message.body);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod transport;
pub mod types;

pub use client::IpMsgClient;
pub use config::{IpMsgConfig, IpMsgTimeouts};
pub use error::IpMsgError;
pub use transport::{FormValues, HttpResponse, HttpTransport, ReqwestTransport};
pub use types::{Channel, ChannelPage, ChannelType, Exception, Message, MessagePage, PageMeta};
