// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Table player types.
use ahash::AHashMap;
use std::{collections::BTreeMap, ops::Bound};

use holdem_core::{
    game::{PlayerAction, PlayerStatus, PlayerView},
    poker::{Card, Chips, PlayerCards, PlayerId},
};

/// A table player state.
#[derive(Debug)]
pub struct Player {
    /// The player id.
    pub player_id: PlayerId,
    /// This player name.
    pub name: String,
    /// The player seat number.
    pub seat: u8,
    /// The player status.
    pub status: PlayerStatus,
    /// This player chips.
    pub chips: Chips,
    /// The player bet in the current round.
    pub bet: Chips,
    /// The last player action.
    pub action: Option<PlayerAction>,
    /// This player cards that are visible to all other players.
    pub public_cards: PlayerCards,
    /// This player private cards.
    pub hole_cards: PlayerCards,
    /// The player has been dealt in the current hand.
    pub in_hand: bool,
    /// The player has folded.
    pub is_folded: bool,
    /// The player has no chips left to bet.
    pub is_all_in: bool,
    /// The player has acted in the current round.
    pub has_acted: bool,
}

impl Player {
    /// Creates a new seated player.
    pub fn new(player_id: PlayerId, name: String, chips: Chips, seat: u8) -> Self {
        Self {
            player_id,
            name,
            seat,
            status: PlayerStatus::Seated,
            chips,
            bet: Chips::ZERO,
            action: None,
            public_cards: PlayerCards::None,
            hole_cards: PlayerCards::None,
            in_hand: false,
            is_folded: false,
            is_all_in: false,
            has_acted: false,
        }
    }

    /// Moves up to `chips` from the player stack to the player bet and returns
    /// the amount moved, the player goes all in if the stack drops to zero.
    pub fn commit(&mut self, chips: Chips) -> Chips {
        let amount = chips.min(self.chips);
        self.chips -= amount;
        self.bet += amount;

        if self.chips == Chips::ZERO {
            self.is_all_in = true;
        }

        amount
    }

    /// Sets this player in fold state.
    pub fn fold(&mut self) {
        self.is_folded = true;
        self.public_cards = PlayerCards::None;
    }

    /// The player private cards.
    pub fn cards(&self) -> Option<(Card, Card)> {
        match self.hole_cards {
            PlayerCards::Cards(c1, c2) => Some((c1, c2)),
            _ => None,
        }
    }

    /// The player is still contesting the pot.
    pub fn is_contender(&self) -> bool {
        self.in_hand && !self.is_folded
    }

    /// The player can still take betting actions.
    pub fn can_act(&self) -> bool {
        self.is_contender() && !self.is_all_in
    }

    /// The player gets dealt in the next hand.
    pub fn is_ready(&self) -> bool {
        self.status == PlayerStatus::Seated && self.chips > Chips::ZERO
    }

    /// The player public view.
    pub fn view(&self) -> PlayerView {
        PlayerView {
            player_id: self.player_id.clone(),
            name: self.name.clone(),
            seat: self.seat,
            status: self.status,
            chips: self.chips,
            bet: self.bet,
            is_folded: self.is_folded,
            is_all_in: self.is_all_in,
            action: self.action,
            cards: self.public_cards,
        }
    }

    /// Reset state for a new hand.
    fn start_hand(&mut self) {
        self.in_hand = self.is_ready();
        self.bet = Chips::ZERO;
        self.action = None;
        self.public_cards = PlayerCards::None;
        self.hole_cards = PlayerCards::None;
        self.is_folded = false;
        self.is_all_in = false;
        self.has_acted = false;
    }

    /// Reset state for a new betting round.
    fn start_round(&mut self) {
        self.bet = Chips::ZERO;
        self.has_acted = false;
    }
}

/// The table players state ordered by seat.
#[derive(Debug, Default)]
pub struct PlayersState {
    players: BTreeMap<u8, Player>,
    seats: AHashMap<PlayerId, u8>,
    active_seat: Option<u8>,
}

impl PlayersState {
    /// Adds a player to the table, the seat must be free.
    pub fn join(&mut self, player: Player) {
        debug_assert!(!self.players.contains_key(&player.seat));
        self.seats.insert(player.player_id.clone(), player.seat);
        self.players.insert(player.seat, player);
    }

    /// Removes a player from the table.
    pub fn leave(&mut self, player_id: &PlayerId) -> Option<Player> {
        let seat = self.seats.remove(player_id)?;
        self.players.remove(&seat)
    }

    /// Returns the seat of a player.
    pub fn seat_of(&self, player_id: &PlayerId) -> Option<u8> {
        self.seats.get(player_id).copied()
    }

    /// Returns a player given its id.
    pub fn get(&self, player_id: &PlayerId) -> Option<&Player> {
        self.seat_of(player_id)
            .and_then(|seat| self.players.get(&seat))
    }

    /// Returns a mutable player given its id.
    pub fn get_mut(&mut self, player_id: &PlayerId) -> Option<&mut Player> {
        self.seat_of(player_id)
            .and_then(|seat| self.players.get_mut(&seat))
    }

    /// Returns the player sitting at a seat.
    pub fn by_seat(&self, seat: u8) -> Option<&Player> {
        self.players.get(&seat)
    }

    /// Returns the mutable player sitting at a seat.
    pub fn by_seat_mut(&mut self, seat: u8) -> Option<&mut Player> {
        self.players.get_mut(&seat)
    }

    /// Returns total number of players.
    pub fn count(&self) -> usize {
        self.players.len()
    }

    /// Returns the number of players that can be dealt in.
    pub fn count_ready(&self) -> usize {
        self.iter().filter(|p| p.is_ready()).count()
    }

    /// Returns the number of players contesting the pot.
    pub fn count_contenders(&self) -> usize {
        self.iter().filter(|p| p.is_contender()).count()
    }

    /// Returns an iterator to all players in seat order.
    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.values()
    }

    /// Returns a mutable iterator to all players in seat order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Player> {
        self.players.values_mut()
    }

    /// The seats of the players dealt in the current hand.
    pub fn in_hand_seats(&self) -> Vec<u8> {
        self.iter().filter(|p| p.in_hand).map(|p| p.seat).collect()
    }

    /// The seat of the player who has to act.
    pub fn active_seat(&self) -> Option<u8> {
        self.active_seat
    }

    /// Returns the player who has to act.
    pub fn active_player(&self) -> Option<&Player> {
        self.active_seat
            .and_then(|seat| self.players.get(&seat))
            .filter(|p| p.can_act())
    }

    /// Activates the first player that can act starting at the given seat and
    /// wrapping around the table.
    pub fn activate_from(&mut self, seat: u8) {
        self.active_seat = self
            .players
            .range(seat..)
            .chain(self.players.range(..seat))
            .find(|(_, p)| p.can_act())
            .map(|(seat, _)| *seat);
    }

    /// Activates the next player that can act after the active one.
    pub fn activate_next_player(&mut self) {
        if let Some(current) = self.active_seat {
            self.active_seat = self
                .players
                .range((Bound::Excluded(current), Bound::Unbounded))
                .chain(self.players.range(..=current))
                .find(|(_, p)| p.can_act())
                .map(|(seat, _)| *seat);
        }
    }

    /// Set state for a new hand.
    pub fn start_hand(&mut self) {
        self.active_seat = None;
        self.iter_mut().for_each(Player::start_hand);
    }

    /// Starts a new betting round with the lowest seat that can act.
    pub fn start_round(&mut self) {
        self.iter_mut().for_each(Player::start_round);
        self.activate_from(0);
    }

    /// The hand has ended, reveals the contenders cards if there is a contest.
    pub fn end_hand(&mut self, reveal: bool) {
        self.active_seat = None;

        for player in self.iter_mut() {
            player.bet = Chips::ZERO;
            if reveal && player.is_contender() {
                player.public_cards = player.hole_cards;
            }
        }
    }
}
