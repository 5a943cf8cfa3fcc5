// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Table configuration.
use std::time::Duration;

use holdem_core::poker::{Chips, RoomId};

use crate::TableError;

/// Table configuration.
#[derive(Debug, Clone)]
pub struct TableConfig {
    /// The table room.
    pub room_id: RoomId,
    /// The small blind amount.
    pub small_blind: Chips,
    /// The big blind amount.
    pub big_blind: Chips,
    /// Maximum number of players at the table.
    pub max_players: usize,
    /// Time a player has to act before the table acts on their behalf, used
    /// only by the [Table](crate::Table) task.
    pub action_timeout: Option<Duration>,
}

impl TableConfig {
    /// Default number of players.
    pub const MAX_PLAYERS: usize = 10;

    /// Players limit given by a 52 cards deck with 5 board cards.
    const DECK_PLAYERS: usize = 23;

    /// Creates a configuration with the given blinds.
    pub fn new(room_id: RoomId, small_blind: Chips, big_blind: Chips) -> Result<Self, TableError> {
        if small_blind == Chips::ZERO || big_blind == Chips::ZERO {
            return Err(TableError::InvalidConfig("blinds must be positive"));
        }

        Ok(Self {
            room_id,
            small_blind,
            big_blind,
            max_players: Self::MAX_PLAYERS,
            action_timeout: None,
        })
    }

    /// Sets the maximum number of players.
    pub fn with_max_players(mut self, max_players: usize) -> Result<Self, TableError> {
        if !(2..=Self::DECK_PLAYERS).contains(&max_players) {
            return Err(TableError::InvalidConfig("players must be between 2 and 23"));
        }

        self.max_players = max_players;
        Ok(self)
    }

    /// Sets the player action timeout.
    pub fn with_action_timeout(mut self, timeout: Duration) -> Self {
        self.action_timeout = Some(timeout);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation() {
        let room = RoomId::new("r");
        assert!(TableConfig::new(room.clone(), Chips::ZERO, Chips::new(20)).is_err());
        assert!(TableConfig::new(room.clone(), Chips::new(10), Chips::ZERO).is_err());

        let config = TableConfig::new(room, Chips::new(10), Chips::new(20)).unwrap();
        assert_eq!(config.max_players, TableConfig::MAX_PLAYERS);
        assert!(config.action_timeout.is_none());

        assert!(config.clone().with_max_players(1).is_err());
        assert!(config.clone().with_max_players(24).is_err());
        assert_eq!(config.with_max_players(23).unwrap().max_players, 23);
    }
}
