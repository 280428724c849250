use std::sync::Arc;

use quiggle::transport::in_memory::InMemoryTransport;
use quiggle::transport::Transport;
use quiggle::{
    Challenge, DispatchConfig, Dispatcher, GameKind, InMemorySettings, Interaction, Message, Relay,
    Reply, Setting, SettingUpdate,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[tokio::test(flavor = "multi_thread")]
async fn test_pair_delivers_in_order_and_reports_close() -> anyhow::Result<()> {
    let (a, b) = InMemoryTransport::pair();
    for id in 0..3 {
        a.send(Message::Reply {
            to: id,
            reply: Reply::Delete,
        })
        .await?;
    }
    drop(a);
    for id in 0..3 {
        assert_eq!(
            b.recv().await?,
            Message::Reply {
                to: id,
                reply: Reply::Delete
            }
        );
    }
    assert!(b.recv().await.is_err());
    assert!(b.send(Message::Reply { to: 9, reply: Reply::Delete }).await.is_err());
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_relay_over_in_memory() -> anyhow::Result<()> {
    let (client, server) = InMemoryTransport::pair();
    let dispatcher = Arc::new(Dispatcher::new(
        InMemorySettings::new(),
        DispatchConfig::default(),
        SmallRng::seed_from_u64(12),
    ));
    let relay = Relay::new(dispatcher, Arc::new(server));
    let server = tokio::spawn(async move { relay.run().await });

    client
        .send(Message::Challenge(Challenge {
            id: 1,
            author: 10,
            author_is_bot: false,
            invitee: 20,
            invitee_is_bot: false,
            game: GameKind::ConnectFour,
            guild_id: None,
        }))
        .await?;
    let invite = match client.recv().await? {
        Message::Reply {
            to: 1,
            reply: Reply::Create(view),
        } => view,
        other => panic!("unexpected {:?}", other),
    };

    client
        .send(Message::Interaction(Interaction {
            id: 2,
            user: 20,
            custom_id: "yes".to_string(),
            values: Vec::new(),
            content: invite.content,
            link: None,
        }))
        .await?;
    assert!(matches!(
        client.recv().await?,
        Message::Reply {
            to: 2,
            reply: Reply::Update(_)
        }
    ));
    match client.recv().await? {
        Message::Direct(direct) => assert!(direct.user == 10 || direct.user == 20),
        other => panic!("unexpected {:?}", other),
    }

    client
        .send(Message::SettingUpdate(SettingUpdate {
            id: 3,
            user: 10,
            setting: Setting::DmNotifications,
            value: false,
        }))
        .await?;
    assert!(matches!(
        client.recv().await?,
        Message::Reply {
            to: 3,
            reply: Reply::Private(_)
        }
    ));

    drop(client);
    server.await??;
    Ok(())
}
