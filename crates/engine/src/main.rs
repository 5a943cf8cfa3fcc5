// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Hold'em table simulator with random players.
use anyhow::Result;
use clap::Parser;
use log::{error, info};
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::time::Duration;

use holdem_core::{
    game::{ActionRequest, PlayerAction},
    poker::{Chips, PlayerId, RoomId},
};
use holdem_engine::{State, Table, TableConfig, TableError};

#[derive(Debug, Parser)]
struct Cli {
    /// Number of players.
    #[clap(long, short, default_value_t = 4, value_parser = clap::value_parser!(u8).range(2..=10))]
    players: u8,
    /// Starting chips for each player.
    #[clap(long, default_value_t = 1_000)]
    chips: u32,
    /// The small blind amount.
    #[clap(long, default_value_t = 10)]
    small_blind: u32,
    /// The big blind amount.
    #[clap(long, default_value_t = 20)]
    big_blind: u32,
    /// Maximum number of hands to play.
    #[clap(long, default_value_t = 100)]
    hands: u32,
    /// Seed for a reproducible game.
    #[clap(long)]
    seed: Option<u64>,
    /// Player action timeout in seconds.
    #[clap(long)]
    timeout: Option<u64>,
}

static NICKNAMES: &[&str] = &[
    "Alice", "Bob", "Carol", "Dave", "Erin", "Frank", "Grace", "Heidi", "Mike", "Olivia",
];

#[tokio::main]
async fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        error!("{e}");
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = TableConfig::new(
        RoomId::new("sim"),
        Chips::new(cli.small_blind),
        Chips::new(cli.big_blind),
    )?;

    if let Some(secs) = cli.timeout {
        config = config.with_action_timeout(Duration::from_secs(secs));
    }

    let (state, mut rng) = match cli.seed {
        Some(seed) => (
            State::with_rng(config, StdRng::seed_from_u64(seed)),
            StdRng::seed_from_u64(seed.wrapping_add(1)),
        ),
        None => (State::new(config), StdRng::from_os_rng()),
    };

    let table = Table::with_state(state);

    for (idx, name) in NICKNAMES.iter().take(cli.players as usize).enumerate() {
        let player_id = PlayerId::new(name.to_lowercase());
        table
            .seat(&player_id, name, Chips::new(cli.chips), idx as u8 + 1)
            .await?;
    }

    for hand in 1..=cli.hands {
        match table.start_hand().await {
            Ok(()) => {}
            Err(TableError::NotEnoughPlayers) => {
                info!("Game over after {} hands", hand - 1);
                break;
            }
            Err(e) => return Err(e.into()),
        }

        while let Some(req) = table.action_request().await? {
            let action = choose_action(&req, &mut rng);
            table.action(&req.player_id, action).await?;
        }

        let view = table.view().await?;
        for payoff in &view.payoffs {
            match payoff.rank {
                Some(rank) => {
                    let cards = payoff
                        .cards
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join(" ");
                    info!(
                        "Hand {hand}: {} wins {} with {rank} [{cards}]",
                        payoff.player_id, payoff.chips
                    );
                }
                None => info!("Hand {hand}: {} wins {}", payoff.player_id, payoff.chips),
            }
        }
    }

    let view = table.view().await?;
    for player in &view.players {
        info!("{:<8} {:>10}", player.name, player.chips.to_string());
    }

    Ok(())
}

/// Picks a random legal action, bets are sized on the stack.
fn choose_action<R: Rng>(req: &ActionRequest, rng: &mut R) -> PlayerAction {
    let raise = req
        .actions
        .iter()
        .copied()
        .find(|a| matches!(a, PlayerAction::Bet(_) | PlayerAction::Raise(_)));

    match rng.random_range(0..100) {
        0..3 => PlayerAction::AllIn,
        3..20 if raise.is_some() => match raise {
            Some(PlayerAction::Bet(max)) => PlayerAction::Bet(bet_size(req, max, rng)),
            _ => PlayerAction::Raise(bet_size(req, req.chips, rng)),
        },
        _ if req.to_call == Chips::ZERO => PlayerAction::Check,
        20..35 => PlayerAction::Fold,
        _ => PlayerAction::Call,
    }
}

fn bet_size<R: Rng>(req: &ActionRequest, max: Chips, rng: &mut R) -> Chips {
    let extra = rng.random_range(1..=max.amount() / 4 + 1);
    (req.to_call + Chips::new(extra)).min(max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_actions_are_legal() {
        let mut rng = StdRng::seed_from_u64(3);
        let requests = [
            (Chips::ZERO, Chips::new(500), PlayerAction::Bet(Chips::new(500))),
            (Chips::new(20), Chips::new(500), PlayerAction::Raise(Chips::new(500))),
            (Chips::new(20), Chips::new(15), PlayerAction::AllIn),
        ];

        for (to_call, chips, bet) in requests {
            let mut actions = vec![PlayerAction::Fold];
            actions.push(if to_call == Chips::ZERO {
                PlayerAction::Check
            } else {
                PlayerAction::Call
            });
            if bet != PlayerAction::AllIn {
                actions.push(bet);
            }
            actions.push(PlayerAction::AllIn);

            let req = ActionRequest {
                player_id: PlayerId::new("p"),
                seat: 1,
                to_call,
                chips,
                actions,
            };

            for _ in 0..1_000 {
                match choose_action(&req, &mut rng) {
                    PlayerAction::Bet(amount) | PlayerAction::Raise(amount) => {
                        assert!(amount > Chips::ZERO && amount <= chips);
                        assert!(req.actions.contains(&bet));
                    }
                    PlayerAction::Check => assert_eq!(to_call, Chips::ZERO),
                    PlayerAction::Call => assert!(to_call > Chips::ZERO),
                    PlayerAction::Fold | PlayerAction::AllIn => {}
                }
            }
        }
    }

    #[test]
    fn cli_limits_players() {
        assert!(Cli::try_parse_from(["holdem-sim", "--players", "1"]).is_err());
        assert!(Cli::try_parse_from(["holdem-sim", "--players", "11"]).is_err());

        let cli = Cli::try_parse_from(["holdem-sim", "-p", "6", "--seed", "42"]).unwrap();
        assert_eq!(cli.players, 6);
        assert_eq!(cli.seed, Some(42));
        assert_eq!(cli.chips, 1_000);
    }
}
