use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use anyhow::anyhow;
use tokio::task::yield_now;

use crate::protocol::Message;
use crate::transport::Transport;

type Queue = Arc<Mutex<VecDeque<Message>>>;

/// One end of an in-process message pipe. `recv` fails once the other end
/// is dropped and the queue is drained.
pub struct InMemoryTransport {
    recv_queue: Queue,
    send_queue: Queue,
}

impl InMemoryTransport {
    pub fn pair() -> (Self, Self) {
        let q1: Queue = Arc::new(Mutex::new(VecDeque::new()));
        let q2: Queue = Arc::new(Mutex::new(VecDeque::new()));
        (
            Self {
                recv_queue: q1.clone(),
                send_queue: q2.clone(),
            },
            Self {
                recv_queue: q2,
                send_queue: q1,
            },
        )
    }

    fn pop(&self) -> anyhow::Result<Option<Message>> {
        let mut queue = self
            .recv_queue
            .lock()
            .map_err(|_| anyhow!("queue lock poisoned"))?;
        Ok(queue.pop_front())
    }
}

#[async_trait::async_trait]
impl Transport for InMemoryTransport {
    async fn send(&self, msg: Message) -> anyhow::Result<()> {
        if Arc::strong_count(&self.send_queue) == 1 {
            return Err(anyhow!("Channel closed"));
        }
        let mut queue = self
            .send_queue
            .lock()
            .map_err(|_| anyhow!("queue lock poisoned"))?;
        queue.push_back(msg);
        Ok(())
    }

    async fn recv(&self) -> anyhow::Result<Message> {
        loop {
            if let Some(msg) = self.pop()? {
                return Ok(msg);
            }
            if Arc::strong_count(&self.recv_queue) == 1 {
                return Err(anyhow!("Channel closed"));
            }
            yield_now().await;
        }
    }
}
