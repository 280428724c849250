//! Serve a [`Transport`]: every inbound event is handled in its own task
//! and answered on the same transport.

use std::sync::Arc;

use tokio::task::JoinSet;

use crate::dispatch::Dispatcher;
use crate::protocol::Message;
use crate::settings::SettingsStore;
use crate::transport::Transport;

pub struct Relay<S: SettingsStore, T: Transport> {
    dispatcher: Arc<Dispatcher<S>>,
    transport: Arc<T>,
}

impl<S, T> Relay<S, T>
where
    S: SettingsStore + 'static,
    T: Transport + 'static,
{
    pub fn new(dispatcher: Arc<Dispatcher<S>>, transport: Arc<T>) -> Self {
        Self {
            dispatcher,
            transport,
        }
    }

    /// Run until the transport closes, then wait for in-flight events.
    pub async fn run(&self) -> anyhow::Result<()> {
        let mut tasks = JoinSet::new();
        while let Ok(msg) = self.transport.recv().await {
            let dispatcher = Arc::clone(&self.dispatcher);
            let transport = Arc::clone(&self.transport);
            tasks.spawn(async move { serve(&dispatcher, transport.as_ref(), msg).await });
            while let Some(done) = tasks.try_join_next() {
                report(done);
            }
        }
        while let Some(done) = tasks.join_next().await {
            report(done);
        }
        log::info!("relay stopped: transport closed");
        Ok(())
    }
}

fn report(done: Result<anyhow::Result<()>, tokio::task::JoinError>) {
    match done {
        Ok(Ok(())) => {}
        Ok(Err(e)) => log::warn!("event failed: {:#}", e),
        Err(e) => log::warn!("event task aborted: {}", e),
    }
}

async fn serve<S, T>(dispatcher: &Dispatcher<S>, transport: &T, msg: Message) -> anyhow::Result<()>
where
    S: SettingsStore,
    T: Transport + ?Sized,
{
    match msg {
        Message::Interaction(event) => {
            let handled = dispatcher.handle(&event).await?;
            transport
                .send(Message::Reply {
                    to: event.id,
                    reply: handled.reply,
                })
                .await?;
            if let Some(direct) = handled.direct {
                transport.send(Message::Direct(direct)).await?;
            }
        }
        Message::Challenge(request) => {
            let reply = dispatcher.challenge(&request)?;
            transport
                .send(Message::Reply {
                    to: request.id,
                    reply,
                })
                .await?;
        }
        Message::SettingUpdate(request) => {
            let reply = dispatcher.update_setting(&request).await?;
            transport
                .send(Message::Reply {
                    to: request.id,
                    reply,
                })
                .await?;
        }
        Message::Reply { to, .. } => log::warn!("ignoring inbound reply to {}", to),
        Message::Direct(direct) => log::warn!("ignoring inbound direct message for {}", direct.user),
    }
    Ok(())
}
