// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Table errors.
use thiserror::Error;

use holdem_core::poker::{Chips, PlayerId};

/// Errors returned by table operations.
///
/// A rejected operation never changes the table state, callers can correct
/// the request and try again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// The table configuration is not valid.
    #[error("Invalid table configuration: {0}")]
    InvalidConfig(&'static str),
    /// The player is already at the table.
    #[error("Player {0} has already joined")]
    AlreadySeated(PlayerId),
    /// The seat is taken by another player.
    #[error("Seat {0} is taken")]
    SeatTaken(u8),
    /// The chips at the table would not fit a chips amount.
    #[error("Joining with {0} chips overflows the table chips")]
    ChipsOverflow(Chips),
    /// All seats are taken.
    #[error("Table full")]
    TableFull,
    /// The player is not at the table.
    #[error("Unknown player {0}")]
    UnknownPlayer(PlayerId),
    /// A hand is being played.
    #[error("Hand in progress")]
    HandInProgress,
    /// Fewer than two players can be dealt in.
    #[error("Not enough players to start a hand")]
    NotEnoughPlayers,
    /// There is no hand being played.
    #[error("No hand in progress")]
    NoHandInProgress,
    /// The player has not been dealt in this hand.
    #[error("Player is not in the hand")]
    NotInHand,
    /// The player has already folded.
    #[error("Player has folded")]
    AlreadyFolded,
    /// The player is all in and cannot act.
    #[error("Player is all in")]
    AlreadyAllIn,
    /// Another player has to act.
    #[error("Not the player turn")]
    NotYourTurn,
    /// The player must call or fold.
    #[error("Cannot check, {0} to call")]
    CannotCheck(Chips),
    /// The player has already matched the current bet.
    #[error("Nothing to call")]
    NothingToCall,
    /// The bet amount is zero or more than the player chips.
    #[error("Invalid amount {amount}, player has {chips}")]
    InvalidAmount {
        /// The requested amount.
        amount: Chips,
        /// The player chips.
        chips: Chips,
    },
    /// The table task has stopped.
    #[error("Table closed")]
    TableClosed,
}
