use crate::protocol::Message;

/// Link to the chat platform. Both directions may be used from several
/// tasks at once.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, msg: Message) -> anyhow::Result<()>;
    async fn recv(&self) -> anyhow::Result<Message>;
}

pub mod in_memory;
