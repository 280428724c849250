use quiggle::games::Game;
use quiggle::{
    decode_message, Challenge, DispatchConfig, Dispatcher, GameKind, GameVariant, InMemorySettings,
    Interaction, Reply, Seat, Shot, UserId, Winner,
};
use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use serde_json::json;

const PLAYERS: [UserId; 2] = [1, 2];
const MAX_INTERACTIONS: usize = 2_000;

/// Next `(seat, tokens)` for a random but sensible player.
fn pick<R: Rng>(game: &Game, rng: &mut R) -> anyhow::Result<(Seat, Vec<String>)> {
    if let Game::Battleship(b) = game {
        if b.in_setup() {
            let seat = (0..2)
                .find(|s| !b.fleet(*s).is_deployed())
                .ok_or_else(|| anyhow::anyhow!("setup with both fleets deployed"))?;
            return Ok((seat, b.placement_tokens(seat, rng)?));
        }
        let seat = b.turn();
        let open: Vec<(usize, usize)> = b
            .shots(seat)
            .iter()
            .enumerate()
            .flat_map(|(r, row)| {
                row.iter()
                    .enumerate()
                    .filter(|(_, shot)| **shot == Shot::Unknown)
                    .map(move |(c, _)| (r, c))
            })
            .collect();
        let (r, c) = *open
            .choose(rng)
            .ok_or_else(|| anyhow::anyhow!("no open cells left"))?;
        return Ok((seat, vec![format!("x|{}", r), format!("y|{}", c)]));
    }
    let moves = game.legal_moves();
    // Chess destinations are longer than source squares; finish a started move.
    let finishing: Vec<&String> = match game {
        Game::Chess(_) => moves.iter().filter(|m| m.len() > 2).collect(),
        _ => Vec::new(),
    };
    let token = if finishing.is_empty() {
        moves.choose(rng)
    } else {
        finishing.choose(rng).copied()
    }
    .ok_or_else(|| anyhow::anyhow!("running game without legal moves"))?;
    Ok((game.turn(), vec![token.clone()]))
}

async fn play(kind: GameKind, seed: u64) -> anyhow::Result<serde_json::Value> {
    let dispatcher = Dispatcher::new(
        InMemorySettings::new(),
        DispatchConfig::default(),
        SmallRng::seed_from_u64(seed),
    );
    let mut rng = SmallRng::seed_from_u64(seed.wrapping_add(1));

    let challenge = Challenge {
        id: 0,
        author: PLAYERS[0],
        author_is_bot: false,
        invitee: PLAYERS[1],
        invitee_is_bot: false,
        game: kind,
        guild_id: None,
    };
    let Reply::Create(invite) = dispatcher.challenge(&challenge)? else {
        anyhow::bail!("challenge refused");
    };
    let mut content = invite.content;
    let mut interactions = 0;
    let mut notifications = 0;
    let mut send = |user: UserId, custom_id: String, values: Vec<String>, content: &str| Interaction {
        id: {
            interactions += 1;
            interactions as u64
        },
        user,
        custom_id,
        values,
        content: content.to_string(),
        link: None,
    };

    let accept = send(PLAYERS[1], "yes".to_string(), Vec::new(), &content);
    let handled = dispatcher.handle(&accept).await?;
    if handled.direct.is_some() {
        notifications += 1;
    }
    if let Reply::Update(view) = handled.reply {
        content = view.content;
    }

    let mut winner = None;
    for _ in 0..MAX_INTERACTIONS {
        let game = Game::from_state(decode_message(&content)?)?;
        if let Some(w) = game.winner() {
            winner = Some(w);
            break;
        }
        let (seat, tokens) = pick(&game, &mut rng)?;
        let user = game.players()[seat];
        for token in tokens {
            let event = match game {
                Game::Chess(_) => send(user, "select|-2".to_string(), vec![token], &content),
                _ => send(user, token, Vec::new(), &content),
            };
            let handled = dispatcher.handle(&event).await?;
            if handled.direct.is_some() {
                notifications += 1;
            }
            match handled.reply {
                Reply::Update(view) => content = view.content,
                Reply::Private(text) => log::debug!("private: {}", text),
                other => anyhow::bail!("unexpected reply {:?}", other),
            }
        }
    }

    let winner = match winner {
        Some(Winner::Seat(seat)) => json!(format!("player{}", seat + 1)),
        Some(Winner::Tie) => json!("tie"),
        None => json!(null),
    };
    Ok(json!({
        "game": kind.command(),
        "seed": seed,
        "winner": winner,
        "interactions": interactions,
        "notifications": notifications,
    }))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 || args.len() > 3 {
        eprintln!("Usage: {} <seed> [games-per-kind]", args[0]);
        std::process::exit(1);
    }
    let seed: u64 = args[1].parse()?;
    let rounds: u64 = match args.get(2) {
        Some(n) => n.parse()?,
        None => 1,
    };

    let mut results = Vec::new();
    for kind in GameKind::ALL {
        for round in 0..rounds {
            results.push(play(kind, seed.wrapping_add(round)).await?);
        }
    }
    println!("{}", serde_json::to_string(&json!({ "games": results }))?);
    Ok(())
}
