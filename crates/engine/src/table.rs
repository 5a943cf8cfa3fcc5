// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Table task that serializes access to the table state.
use log::{info, warn};
use std::time::Duration;
use tokio::{
    sync::{mpsc, oneshot},
    time::{self, Instant},
};

use holdem_core::{
    game::{ActionRequest, PlayerAction, TableView},
    poker::{Card, Chips, PlayerId, RoomId},
};

use crate::{TableConfig, TableError};

mod player;
mod state;

pub use state::State;

type Response<T> = oneshot::Sender<T>;

/// Handle to a table task, clones share the same table.
#[derive(Debug, Clone)]
pub struct Table {
    /// Channel for sending commands.
    commands_tx: mpsc::Sender<TableCommand>,
}

/// Command for the table task.
#[derive(Debug)]
enum TableCommand {
    /// A player sits at the table.
    Seat {
        player_id: PlayerId,
        name: String,
        chips: Chips,
        seat: u8,
        resp_tx: Response<Result<(), TableError>>,
    },
    /// A player leaves the table.
    Leave {
        player_id: PlayerId,
        resp_tx: Response<Result<(), TableError>>,
    },
    /// A player sits out.
    SitOut {
        player_id: PlayerId,
        resp_tx: Response<Result<(), TableError>>,
    },
    /// A player sits in.
    SitIn {
        player_id: PlayerId,
        resp_tx: Response<Result<(), TableError>>,
    },
    /// Start a new hand.
    StartHand {
        resp_tx: Response<Result<(), TableError>>,
    },
    /// A player action.
    Action {
        player_id: PlayerId,
        action: PlayerAction,
        resp_tx: Response<Result<(), TableError>>,
    },
    /// Get the public table state.
    View { resp_tx: Response<TableView> },
    /// Get a player hole cards.
    HoleCards {
        player_id: PlayerId,
        resp_tx: Response<Option<(Card, Card)>>,
    },
    /// Get the request for the acting player.
    ActionRequest {
        resp_tx: Response<Option<ActionRequest>>,
    },
}

impl Table {
    /// Creates a new table and spawns its task.
    ///
    /// Must be called from a tokio runtime.
    pub fn new(config: TableConfig) -> Self {
        Self::with_state(State::new(config))
    }

    /// Creates a table task that owns the given state.
    pub fn with_state(state: State) -> Self {
        let (commands_tx, commands_rx) = mpsc::channel(128);
        let room_id = state.config().room_id.clone();

        let mut task = TableTask {
            state,
            commands_rx,
            timer: None,
        };

        tokio::spawn(async move {
            task.run().await;
            info!("Table task for room {room_id} stopped");
        });

        Self { commands_tx }
    }

    /// A player sits at the table.
    pub async fn seat(
        &self,
        player_id: &PlayerId,
        name: &str,
        chips: Chips,
        seat: u8,
    ) -> Result<(), TableError> {
        self.request(|resp_tx| TableCommand::Seat {
            player_id: player_id.clone(),
            name: name.to_string(),
            chips,
            seat,
            resp_tx,
        })
        .await?
    }

    /// A player leaves the table.
    pub async fn leave(&self, player_id: &PlayerId) -> Result<(), TableError> {
        self.request(|resp_tx| TableCommand::Leave {
            player_id: player_id.clone(),
            resp_tx,
        })
        .await?
    }

    /// A player sits out from the next hand.
    pub async fn sit_out(&self, player_id: &PlayerId) -> Result<(), TableError> {
        self.request(|resp_tx| TableCommand::SitOut {
            player_id: player_id.clone(),
            resp_tx,
        })
        .await?
    }

    /// A player sits in from the next hand.
    pub async fn sit_in(&self, player_id: &PlayerId) -> Result<(), TableError> {
        self.request(|resp_tx| TableCommand::SitIn {
            player_id: player_id.clone(),
            resp_tx,
        })
        .await?
    }

    /// Starts a new hand.
    pub async fn start_hand(&self) -> Result<(), TableError> {
        self.request(|resp_tx| TableCommand::StartHand { resp_tx })
            .await?
    }

    /// Submits a player action.
    pub async fn action(
        &self,
        player_id: &PlayerId,
        action: PlayerAction,
    ) -> Result<(), TableError> {
        self.request(|resp_tx| TableCommand::Action {
            player_id: player_id.clone(),
            action,
            resp_tx,
        })
        .await?
    }

    /// The public table state.
    pub async fn view(&self) -> Result<TableView, TableError> {
        self.request(|resp_tx| TableCommand::View { resp_tx }).await
    }

    /// A player own hole cards.
    pub async fn hole_cards(&self, player_id: &PlayerId) -> Result<Option<(Card, Card)>, TableError> {
        self.request(|resp_tx| TableCommand::HoleCards {
            player_id: player_id.clone(),
            resp_tx,
        })
        .await
    }

    /// The action request for the acting player, none if no one has to act.
    pub async fn action_request(&self) -> Result<Option<ActionRequest>, TableError> {
        self.request(|resp_tx| TableCommand::ActionRequest { resp_tx })
            .await
    }

    async fn request<T>(
        &self,
        command: impl FnOnce(Response<T>) -> TableCommand,
    ) -> Result<T, TableError> {
        let (resp_tx, resp_rx) = oneshot::channel();

        self.commands_tx
            .send(command(resp_tx))
            .await
            .map_err(|_| TableError::TableClosed)?;

        resp_rx.await.map_err(|_| TableError::TableClosed)
    }
}

/// The timer of the acting player.
#[derive(Debug)]
struct ActionTimer {
    player_id: PlayerId,
    started: Instant,
}

struct TableTask {
    /// The table state.
    state: State,
    /// Channel for receiving table commands.
    commands_rx: mpsc::Receiver<TableCommand>,
    /// The acting player timer.
    timer: Option<ActionTimer>,
}

impl TableTask {
    const TICK: Duration = Duration::from_millis(100);

    async fn run(&mut self) {
        let mut ticks = time::interval(Self::TICK);

        loop {
            tokio::select! {
                _ = ticks.tick() => {
                    self.tick();
                }
                res = self.commands_rx.recv() => match res {
                    Some(command) => self.command(command),
                    // All table handles have been dropped.
                    None => break,
                },
            }
        }
    }

    fn command(&mut self, command: TableCommand) {
        let state = &mut self.state;

        match command {
            TableCommand::Seat {
                player_id,
                name,
                chips,
                seat,
                resp_tx,
            } => {
                let _ = resp_tx.send(state.seat(&player_id, &name, chips, seat));
            }
            TableCommand::Leave { player_id, resp_tx } => {
                let _ = resp_tx.send(state.leave(&player_id));
            }
            TableCommand::SitOut { player_id, resp_tx } => {
                let _ = resp_tx.send(state.sit_out(&player_id));
            }
            TableCommand::SitIn { player_id, resp_tx } => {
                let _ = resp_tx.send(state.sit_in(&player_id));
            }
            TableCommand::StartHand { resp_tx } => {
                let _ = resp_tx.send(state.start_hand());
            }
            TableCommand::Action {
                player_id,
                action,
                resp_tx,
            } => {
                let res = state.action(&player_id, action);
                if res.is_ok() {
                    self.timer = None;
                }
                let _ = resp_tx.send(res);
            }
            TableCommand::View { resp_tx } => {
                let _ = resp_tx.send(state.view());
            }
            TableCommand::HoleCards { player_id, resp_tx } => {
                let _ = resp_tx.send(state.hole_cards(&player_id));
            }
            TableCommand::ActionRequest { resp_tx } => {
                let _ = resp_tx.send(state.action_request());
            }
        }

        self.update_timer();
    }

    /// Starts the timer when a new player has to act.
    fn update_timer(&mut self) {
        if self.state.config().action_timeout.is_none() {
            return;
        }

        match self.state.action_request() {
            Some(req) => {
                if self
                    .timer
                    .as_ref()
                    .is_none_or(|t| t.player_id != req.player_id)
                {
                    self.timer = Some(ActionTimer {
                        player_id: req.player_id,
                        started: Instant::now(),
                    });
                }
            }
            None => self.timer = None,
        }
    }

    /// Acts for the player if the action timer has expired, checks when
    /// possible or folds.
    fn tick(&mut self) {
        let Some(timeout) = self.state.config().action_timeout else {
            return;
        };

        let expired = self
            .timer
            .as_ref()
            .is_some_and(|t| t.started.elapsed() >= timeout);
        if !expired {
            return;
        }

        if let Some(req) = self.state.action_request() {
            let action = if req.actions.contains(&PlayerAction::Check) {
                PlayerAction::Check
            } else {
                PlayerAction::Fold
            };

            warn!(
                "Room {} player {} timed out, {action}",
                self.room_id(),
                req.player_id
            );

            if let Err(err) = self.state.action(&req.player_id, action) {
                warn!("Room {} timeout action failed: {err}", self.room_id());
            }
        }

        self.timer = None;
        self.update_timer();
    }

    fn room_id(&self) -> &RoomId {
        &self.state.config().room_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use holdem_core::game::Phase;
    use rand::{SeedableRng, rngs::StdRng};

    fn config() -> TableConfig {
        TableConfig::new(RoomId::new("test"), Chips::new(10), Chips::new(20)).unwrap()
    }

    async fn new_table(config: TableConfig, players: u8) -> Table {
        let state = State::with_rng(config, StdRng::seed_from_u64(11));
        let table = Table::with_state(state);

        for seat in 1..=players {
            table
                .seat(&pid(seat), &format!("Player {seat}"), Chips::new(1_000), seat)
                .await
                .unwrap();
        }

        table
    }

    fn pid(seat: u8) -> PlayerId {
        PlayerId::new(format!("p{seat}"))
    }

    #[tokio::test]
    async fn play_hand() {
        let table = new_table(config(), 3).await;

        assert_eq!(
            table.seat(&pid(1), "Again", Chips::new(100), 5).await,
            Err(TableError::AlreadySeated(pid(1)))
        );

        table.start_hand().await.unwrap();
        assert_eq!(
            table.start_hand().await,
            Err(TableError::HandInProgress)
        );

        let view = table.view().await.unwrap();
        assert_eq!(view.phase, Phase::PreFlop);
        assert_eq!(view.pot, Chips::new(30));
        assert_eq!(view.acting_seat, Some(3));
        assert!(table.hole_cards(&pid(3)).await.unwrap().is_some());
        assert!(table.hole_cards(&pid(9)).await.unwrap().is_none());

        assert_eq!(
            table.action(&pid(1), PlayerAction::Call).await,
            Err(TableError::NotYourTurn)
        );

        while let Some(req) = table.action_request().await.unwrap() {
            let action = if req.to_call > Chips::ZERO {
                PlayerAction::Call
            } else {
                PlayerAction::Check
            };
            table.action(&req.player_id, action).await.unwrap();
        }

        let view = table.view().await.unwrap();
        assert_eq!(view.phase, Phase::Showdown);
        assert_eq!(view.board.len(), 5);
        assert_eq!(
            view.payoffs.iter().map(|p| p.chips).sum::<Chips>(),
            Chips::new(60)
        );
    }

    #[tokio::test]
    async fn clones_share_table() {
        let table = new_table(config(), 2).await;
        let other = table.clone();

        other.sit_out(&pid(2)).await.unwrap();
        assert_eq!(
            table.start_hand().await,
            Err(TableError::NotEnoughPlayers)
        );

        table.sit_in(&pid(2)).await.unwrap();
        other.start_hand().await.unwrap();

        table.leave(&pid(1)).await.unwrap();
        let view = other.view().await.unwrap();
        assert_eq!(view.phase, Phase::Showdown);
        assert_eq!(view.players.len(), 1);
        assert_eq!(view.players[0].chips, Chips::new(1_010));
    }

    #[tokio::test]
    async fn timeout_folds_acting_player() {
        let config = config().with_action_timeout(Duration::from_millis(50));
        let table = new_table(config, 2).await;
        table.start_hand().await.unwrap();

        // The small blind has to call and folds when the time is up.
        let req = table.action_request().await.unwrap().unwrap();
        assert_eq!(req.player_id, pid(1));

        time::sleep(Duration::from_millis(500)).await;

        let view = table.view().await.unwrap();
        assert_eq!(view.phase, Phase::Showdown);
        assert_eq!(view.players[0].action, Some(PlayerAction::Fold));
        assert_eq!(view.payoffs[0].player_id, pid(2));
        assert_eq!(view.payoffs[0].chips, Chips::new(30));
    }
}
