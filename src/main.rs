use std::sync::Arc;

use anyhow::{anyhow, bail};
use clap::{Parser, Subcommand};
use quiggle::transport::in_memory::InMemoryTransport;
use quiggle::transport::Transport;
use quiggle::{
    init_logging, Challenge, DispatchConfig, Dispatcher, GameKind, InMemorySettings, Interaction,
    Message, Relay, Reply, UserId, View,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a two-player game in this terminal, taking turns at the keyboard.
    Local {
        /// tictactoe, ulttictactoe, connectfour, battleship or chess.
        #[arg(long)]
        game: GameKind,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
    /// Decode a state token (or a whole game message) and draw it.
    Inspect {
        token: String,
    },
}

const PLAYERS: [UserId; 2] = [1, 2];

fn seeded(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(s) => SmallRng::seed_from_u64(s),
        None => {
            let mut seed_rng = rand::rng();
            SmallRng::from_rng(&mut seed_rng)
        }
    }
}

/// Wait for the reply to event `id`, printing any direct messages on the way.
async fn await_reply(transport: &InMemoryTransport, id: u64) -> anyhow::Result<Reply> {
    loop {
        match transport.recv().await? {
            Message::Reply { to, reply } if to == id => return Ok(reply),
            Message::Direct(direct) => {
                println!("(direct message to player {})\n{}", direct.user, direct.view);
            }
            other => log::debug!("skipping {:?}", other),
        }
    }
}

/// Parse `<1|2> <action>` into the acting user, component id and values.
fn parse_input(line: &str) -> anyhow::Result<(UserId, String, Vec<String>)> {
    let (who, action) = line
        .trim()
        .split_once(' ')
        .ok_or_else(|| anyhow!("expected `<1|2> <action>`"))?;
    let user = match who {
        "1" => PLAYERS[0],
        "2" => PLAYERS[1],
        _ => bail!("player must be 1 or 2"),
    };
    let action = action.trim();
    match action.strip_prefix("select ") {
        Some(value) => Ok((user, "select".to_string(), vec![value.trim().to_string()])),
        None => Ok((user, action.to_string(), Vec::new())),
    }
}

async fn play_local(game: GameKind, seed: Option<u64>) -> anyhow::Result<()> {
    let dispatcher = Arc::new(Dispatcher::new(
        InMemorySettings::new(),
        DispatchConfig::default(),
        seeded(seed),
    ));
    let (client, server) = InMemoryTransport::pair();
    let relay = Relay::new(dispatcher, Arc::new(server));
    let relay_task = tokio::spawn(async move { relay.run().await });

    client
        .send(Message::Challenge(Challenge {
            id: 0,
            author: PLAYERS[0],
            author_is_bot: false,
            invitee: PLAYERS[1],
            invitee_is_bot: false,
            game,
            guild_id: None,
        }))
        .await?;
    let mut current: View = match await_reply(&client, 0).await? {
        Reply::Create(view) => view,
        other => bail!("challenge refused: {:?}", other),
    };
    println!("{}", current);
    println!("Enter `<1|2> <action>` (button id, or `select <value>` for menus); `quit` to stop.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut next_id = 1;
    while let Some(line) = lines.next_line().await? {
        if line.trim() == "quit" {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }
        let (user, custom_id, values) = match parse_input(&line) {
            Ok(parsed) => parsed,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };
        let id = next_id;
        next_id += 1;
        client
            .send(Message::Interaction(Interaction {
                id,
                user,
                custom_id,
                values,
                content: current.content.clone(),
                link: None,
            }))
            .await?;
        match await_reply(&client, id).await? {
            Reply::Update(view) | Reply::Create(view) => {
                println!("{}", view);
                current = view;
            }
            Reply::Private(text) => println!("(only player {} sees this)\n{}", user, text),
            Reply::Delete => {
                println!("The challenge was declined.");
                break;
            }
        }
    }

    drop(client);
    relay_task.await??;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Local { game, seed } => {
            println!("Starting a local game of {}...", game);
            if let Some(s) = seed {
                println!("Using fixed seed: {} (game will be reproducible)", s);
            }
            play_local(game, seed).await?;
        }
        Commands::Inspect { token } => {
            let dispatcher = Dispatcher::new(
                InMemorySettings::new(),
                DispatchConfig::default(),
                seeded(None),
            );
            println!("{}", dispatcher.inspect(&token)?);
        }
    }
    Ok(())
}
