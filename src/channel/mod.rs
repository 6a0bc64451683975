//! Upstream channel types and outbound URL composition.

pub mod channel_type;
pub mod url;

pub use channel_type::ChannelType;
pub use url::{full_request_url, normalize_request_path, UrlComposer};
