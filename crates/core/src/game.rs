// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Game types exchanged between the table engine and its callers.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::poker::{Card, Chips, HandRank, PlayerCards, PlayerId, RoomId};

/// A Player action.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerAction {
    /// Player folds.
    Fold,
    /// Player checks.
    Check,
    /// Player calls.
    Call,
    /// Player adds the given chips to their bet in this round.
    Bet(Chips),
    /// Player adds the given chips to their bet in this round, a raise
    /// above the current bet reopens the betting.
    Raise(Chips),
    /// Player bets all the remaining chips.
    AllIn,
}

impl PlayerAction {
    /// The action label.
    pub fn label(&self) -> &'static str {
        match self {
            PlayerAction::Fold => "FOLD",
            PlayerAction::Check => "CHECK",
            PlayerAction::Call => "CALL",
            PlayerAction::Bet(_) => "BET",
            PlayerAction::Raise(_) => "RAISE",
            PlayerAction::AllIn => "ALL-IN",
        }
    }
}

impl fmt::Display for PlayerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerAction::Bet(chips) | PlayerAction::Raise(chips) => {
                write!(f, "{} {chips}", self.label())
            }
            _ => write!(f, "{}", self.label()),
        }
    }
}

/// The hand phase.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for a hand to start.
    #[default]
    Waiting,
    /// Betting before the flop.
    PreFlop,
    /// Betting after the flop.
    Flop,
    /// Betting after the turn.
    Turn,
    /// Betting after the river.
    River,
    /// The hand has ended and the pot has been paid.
    Showdown,
}

impl Phase {
    /// Checks if this is a betting phase.
    pub fn is_betting(&self) -> bool {
        matches!(
            self,
            Phase::PreFlop | Phase::Flop | Phase::Turn | Phase::River
        )
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let phase = match self {
            Phase::Waiting => "waiting",
            Phase::PreFlop => "pre-flop",
            Phase::Flop => "flop",
            Phase::Turn => "turn",
            Phase::River => "river",
            Phase::Showdown => "showdown",
        };

        write!(f, "{phase}")
    }
}

/// A player status at the table.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerStatus {
    /// The player is not sitting at the table.
    #[default]
    NotSeated,
    /// The player is sitting and gets dealt in.
    Seated,
    /// The player keeps the seat but sits out.
    Away,
}

/// A player public state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlayerView {
    /// The player id.
    pub player_id: PlayerId,
    /// The player name.
    pub name: String,
    /// The player seat number.
    pub seat: u8,
    /// The player status.
    pub status: PlayerStatus,
    /// The player chips.
    pub chips: Chips,
    /// The player bet in the current betting round.
    pub bet: Chips,
    /// The player has folded.
    pub is_folded: bool,
    /// The player is all in.
    pub is_all_in: bool,
    /// The last player action in this hand.
    pub action: Option<PlayerAction>,
    /// The player cards visible to everyone.
    pub cards: PlayerCards,
}

/// A table state snapshot safe to show to every player.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TableView {
    /// The table room.
    pub room_id: RoomId,
    /// The hand phase.
    pub phase: Phase,
    /// The chips in the pot.
    pub pot: Chips,
    /// The bet a player has to match to stay in the round.
    pub current_bet: Chips,
    /// The small blind amount.
    pub small_blind: Chips,
    /// The big blind amount.
    pub big_blind: Chips,
    /// The community cards.
    pub board: Vec<Card>,
    /// The dealer seat.
    pub dealer_seat: Option<u8>,
    /// The small blind seat.
    pub small_blind_seat: Option<u8>,
    /// The big blind seat.
    pub big_blind_seat: Option<u8>,
    /// The seat of the player who has to act.
    pub acting_seat: Option<u8>,
    /// The players in seat order.
    pub players: Vec<PlayerView>,
    /// The payoffs of the last hand.
    pub payoffs: Vec<HandPayoff>,
}

/// Chips paid to a player at the end of a hand.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandPayoff {
    /// The player id.
    pub player_id: PlayerId,
    /// The chips won.
    pub chips: Chips,
    /// The winning hand rank, none if everyone else folded.
    pub rank: Option<HandRank>,
    /// The winning five cards, empty if everyone else folded.
    pub cards: Vec<Card>,
}

/// The action request for the player who has to act.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ActionRequest {
    /// The player that should respond with an action.
    pub player_id: PlayerId,
    /// The player seat.
    pub seat: u8,
    /// The chips the player has to add to call.
    pub to_call: Chips,
    /// The player chips.
    pub chips: Chips,
    /// The list of legal actions, bet and raise carry the maximum amount.
    pub actions: Vec<PlayerAction>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_display() {
        assert_eq!(PlayerAction::Fold.to_string(), "FOLD");
        assert_eq!(PlayerAction::AllIn.to_string(), "ALL-IN");
        assert_eq!(PlayerAction::Raise(Chips::new(1_500)).to_string(), "RAISE 1,500");
    }

    #[test]
    fn betting_phases() {
        assert!(!Phase::Waiting.is_betting());
        assert!(Phase::PreFlop.is_betting());
        assert!(Phase::River.is_betting());
        assert!(!Phase::Showdown.is_betting());
        assert!(Phase::PreFlop < Phase::Flop);
    }
}
