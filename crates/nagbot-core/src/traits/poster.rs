//! Message sink trait for chat posts.

use async_trait::async_trait;

use crate::result::AppResult;

/// Posts a text message into a chat channel.
#[async_trait]
pub trait MessagePoster: Send + Sync + std::fmt::Debug + 'static {
    /// Post `text` into `channel_id`.
    async fn post(&self, channel_id: &str, text: &str) -> AppResult<()>;
}
