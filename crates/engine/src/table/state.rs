// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Table state types.
use log::{debug, info, warn};
use rand::{SeedableRng, rngs::StdRng};

use holdem_core::{
    game::{ActionRequest, HandPayoff, Phase, PlayerAction, PlayerStatus, TableView},
    poker::{Card, Chips, Deck, HandValue, PlayerCards, PlayerId},
};

use super::player::{Player, PlayersState};
use crate::{TableConfig, TableError};

/// The table state and betting rules.
///
/// All operations run to completion, a rejected operation leaves the state
/// unchanged. Callers that share a table across tasks must serialize calls,
/// see [Table](crate::Table).
#[derive(Debug)]
pub struct State {
    config: TableConfig,
    phase: Phase,
    players: PlayersState,
    deck: Deck,
    board: Vec<Card>,
    pot: Chips,
    current_bet: Chips,
    dealer_seat: Option<u8>,
    small_blind_seat: Option<u8>,
    big_blind_seat: Option<u8>,
    payoffs: Vec<HandPayoff>,
    hand_count: u64,
    rng: StdRng,
}

impl State {
    /// Create a new state.
    pub fn new(config: TableConfig) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    /// Create a new state with user initialized randomness.
    pub fn with_rng(config: TableConfig, mut rng: StdRng) -> Self {
        Self {
            config,
            phase: Phase::Waiting,
            players: PlayersState::default(),
            deck: Deck::new_and_shuffled(&mut rng),
            board: Vec::default(),
            pot: Chips::ZERO,
            current_bet: Chips::ZERO,
            dealer_seat: None,
            small_blind_seat: None,
            big_blind_seat: None,
            payoffs: Vec::default(),
            hand_count: 0,
            rng,
        }
    }

    /// A player sits at the table.
    pub fn seat(
        &mut self,
        player_id: &PlayerId,
        name: &str,
        chips: Chips,
        seat: u8,
    ) -> Result<(), TableError> {
        if self.players.seat_of(player_id).is_some() {
            return Err(TableError::AlreadySeated(player_id.clone()));
        }

        if self.players.by_seat(seat).is_some() {
            return Err(TableError::SeatTaken(seat));
        }

        if self.players.count() == self.config.max_players {
            return Err(TableError::TableFull);
        }

        // Stacks and pot must fit in a chips amount for every transfer to be exact.
        let total = self
            .players
            .iter()
            .map(|p| p.chips)
            .try_fold(self.pot, Chips::checked_add)
            .and_then(|total| total.checked_add(chips));
        if total.is_none() {
            return Err(TableError::ChipsOverflow(chips));
        }

        let player = Player::new(player_id.clone(), name.to_string(), chips, seat);
        self.players.join(player);

        info!(
            "Player {player_id} joined room {} at seat {seat} with {chips} chips",
            self.config.room_id
        );

        Ok(())
    }

    /// A player leaves the table.
    ///
    /// A player leaving during a hand folds, the chips already bet stay in the
    /// pot.
    pub fn leave(&mut self, player_id: &PlayerId) -> Result<(), TableError> {
        let seat = self
            .players
            .seat_of(player_id)
            .ok_or_else(|| TableError::UnknownPlayer(player_id.clone()))?;

        let was_active = self.players.active_seat() == Some(seat);
        let was_contending = self.phase.is_betting()
            && self.players.by_seat(seat).is_some_and(Player::is_contender);

        if let Some(player) = self.players.leave(player_id) {
            info!(
                "Player {player_id} left room {} with {} chips",
                self.config.room_id, player.chips
            );
        }

        if was_contending {
            self.update(was_active);
        }

        Ok(())
    }

    /// A player keeps the seat but is not dealt in the next hands.
    pub fn sit_out(&mut self, player_id: &PlayerId) -> Result<(), TableError> {
        self.set_status(player_id, PlayerStatus::Away)
    }

    /// A player that was sitting out is dealt in again from the next hand.
    pub fn sit_in(&mut self, player_id: &PlayerId) -> Result<(), TableError> {
        self.set_status(player_id, PlayerStatus::Seated)
    }

    fn set_status(&mut self, player_id: &PlayerId, status: PlayerStatus) -> Result<(), TableError> {
        let player = self
            .players
            .get_mut(player_id)
            .ok_or_else(|| TableError::UnknownPlayer(player_id.clone()))?;
        player.status = status;
        debug!("Player {player_id} status {status:?}");
        Ok(())
    }

    /// Starts a new hand: shuffles a new deck, deals the hole cards, and posts
    /// the blinds.
    pub fn start_hand(&mut self) -> Result<(), TableError> {
        if self.phase.is_betting() {
            return Err(TableError::HandInProgress);
        }

        if self.players.count_ready() < 2 {
            return Err(TableError::NotEnoughPlayers);
        }

        self.hand_count += 1;
        self.deck = Deck::new_and_shuffled(&mut self.rng);
        self.board.clear();
        self.pot = Chips::ZERO;
        self.current_bet = Chips::ZERO;
        self.payoffs.clear();

        self.players.start_hand();
        let seats = self.players.in_hand_seats();

        self.deal_hole_cards(&seats);
        self.post_blinds(&seats);

        self.phase = Phase::PreFlop;

        info!(
            "Room {} hand {} started with {} players",
            self.config.room_id,
            self.hand_count,
            seats.len()
        );

        // The first to act preflop is the player after the big blind.
        let first = if seats.len() >= 3 { seats[2] } else { seats[0] };
        self.players.activate_from(first);

        // Blinds may have put everyone all in.
        if self.is_round_complete() {
            self.next_round();
        }

        Ok(())
    }

    /// Handles an action from a player.
    pub fn action(&mut self, player_id: &PlayerId, action: PlayerAction) -> Result<(), TableError> {
        self.validate(player_id, action)?;

        let current_bet = self.current_bet;
        let player = self
            .players
            .get_mut(player_id)
            .ok_or_else(|| TableError::UnknownPlayer(player_id.clone()))?;

        let chips = match action {
            PlayerAction::Fold => {
                player.fold();
                Chips::ZERO
            }
            PlayerAction::Check => Chips::ZERO,
            PlayerAction::Call => player.commit(current_bet - player.bet),
            PlayerAction::Bet(amount) | PlayerAction::Raise(amount) => player.commit(amount),
            PlayerAction::AllIn => player.commit(player.chips),
        };

        player.action = Some(action);
        player.has_acted = true;

        let bet = player.bet;
        self.pot += chips;
        self.current_bet = self.current_bet.max(bet);

        debug!(
            "Room {} {} player {player_id} {action}, bet {bet} pot {}",
            self.config.room_id, self.phase, self.pot
        );

        self.update(true);
        Ok(())
    }

    /// Checks that an action is legal without changing any state.
    fn validate(&self, player_id: &PlayerId, action: PlayerAction) -> Result<(), TableError> {
        let player = self
            .players
            .get(player_id)
            .ok_or_else(|| TableError::UnknownPlayer(player_id.clone()))?;

        if !self.phase.is_betting() {
            return Err(TableError::NoHandInProgress);
        }

        if !player.in_hand {
            return Err(TableError::NotInHand);
        }

        if player.is_folded {
            return Err(TableError::AlreadyFolded);
        }

        if player.is_all_in {
            return Err(TableError::AlreadyAllIn);
        }

        if self.players.active_seat() != Some(player.seat) {
            return Err(TableError::NotYourTurn);
        }

        match action {
            PlayerAction::Check if player.bet != self.current_bet => {
                Err(TableError::CannotCheck(self.current_bet - player.bet))
            }
            PlayerAction::Call if player.bet >= self.current_bet => Err(TableError::NothingToCall),
            PlayerAction::Bet(amount) | PlayerAction::Raise(amount)
                if amount == Chips::ZERO || amount > player.chips =>
            {
                Err(TableError::InvalidAmount {
                    amount,
                    chips: player.chips,
                })
            }
            _ => Ok(()),
        }
    }

    /// The table public state, hole cards are covered until showdown.
    pub fn view(&self) -> TableView {
        TableView {
            room_id: self.config.room_id.clone(),
            phase: self.phase,
            pot: self.pot,
            current_bet: self.current_bet,
            small_blind: self.config.small_blind,
            big_blind: self.config.big_blind,
            board: self.board.clone(),
            dealer_seat: self.dealer_seat,
            small_blind_seat: self.small_blind_seat,
            big_blind_seat: self.big_blind_seat,
            acting_seat: self.players.active_seat(),
            players: self.players.iter().map(Player::view).collect(),
            payoffs: self.payoffs.clone(),
        }
    }

    /// A player own hole cards.
    pub fn hole_cards(&self, player_id: &PlayerId) -> Option<(Card, Card)> {
        self.players.get(player_id).and_then(Player::cards)
    }

    /// The action request for the player who has to act.
    pub fn action_request(&self) -> Option<ActionRequest> {
        if !self.phase.is_betting() {
            return None;
        }

        let player = self.players.active_player()?;
        let to_call = self.current_bet - player.bet;
        let mut actions = vec![PlayerAction::Fold];

        if to_call == Chips::ZERO {
            actions.push(PlayerAction::Check);
        } else {
            actions.push(PlayerAction::Call);
        }

        if self.current_bet == Chips::ZERO {
            actions.push(PlayerAction::Bet(player.chips));
        } else if player.chips > to_call {
            actions.push(PlayerAction::Raise(player.chips));
        }

        actions.push(PlayerAction::AllIn);

        Some(ActionRequest {
            player_id: player.player_id.clone(),
            seat: player.seat,
            to_call,
            chips: player.chips,
            actions,
        })
    }

    /// The table configuration.
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// The hand phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The chips in the pot.
    pub fn pot(&self) -> Chips {
        self.pot
    }

    /// The bet players have to match.
    pub fn current_bet(&self) -> Chips {
        self.current_bet
    }

    /// The seat of the player who has to act.
    pub fn acting_seat(&self) -> Option<u8> {
        self.players.active_seat()
    }

    /// The community cards.
    pub fn board(&self) -> &[Card] {
        &self.board
    }

    /// The payoffs of the last hand.
    pub fn payoffs(&self) -> &[HandPayoff] {
        &self.payoffs
    }

    /// The number of hands started at this table.
    pub fn hand_count(&self) -> u64 {
        self.hand_count
    }

    /// Deals two cards to each player, one card per player per pass.
    fn deal_hole_cards(&mut self, seats: &[u8]) {
        let first = seats.iter().map(|_| self.deck.deal()).collect::<Vec<_>>();

        for (&seat, c1) in seats.iter().zip(first) {
            let c2 = self.deck.deal();
            if let Some(player) = self.players.by_seat_mut(seat) {
                player.hole_cards = PlayerCards::Cards(c1, c2);
                player.public_cards = PlayerCards::Covered;
            }
        }
    }

    /// The two lowest seats pay the blinds, a short stack pays what it has.
    fn post_blinds(&mut self, seats: &[u8]) {
        let (sb_seat, bb_seat) = (seats[0], seats[1]);

        self.small_blind_seat = Some(sb_seat);
        self.big_blind_seat = Some(bb_seat);
        self.dealer_seat = if seats.len() > 2 {
            seats.last().copied()
        } else {
            Some(sb_seat)
        };

        for (seat, blind) in [
            (sb_seat, self.config.small_blind),
            (bb_seat, self.config.big_blind),
        ] {
            if let Some(player) = self.players.by_seat_mut(seat) {
                self.pot += player.commit(blind);
                self.current_bet = self.current_bet.max(player.bet);
            }
        }
    }

    /// Moves the hand forward after a player action or a player leaving.
    fn update(&mut self, advance_turn: bool) {
        if self.players.count_contenders() < 2 {
            self.enter_showdown();
        } else if self.is_round_complete() {
            self.next_round();
        } else if advance_turn {
            self.players.activate_next_player();
        }
    }

    /// Checks if all players in the hand have acted.
    fn is_round_complete(&self) -> bool {
        if self.players.count_contenders() < 2 {
            return true;
        }

        let mut actors = self.players.iter().filter(|p| p.can_act());
        match (actors.next(), actors.next()) {
            // Everybody is all in.
            (None, _) => true,
            // Only one player has chips, done once the bet is matched.
            (Some(player), None) => player.bet >= self.current_bet,
            _ => self
                .players
                .iter()
                .filter(|p| p.can_act())
                .all(|p| p.has_acted && p.bet == self.current_bet),
        }
    }

    /// Deals the next street, keeps dealing while nobody can bet.
    fn next_round(&mut self) {
        while self.is_round_complete() {
            match self.phase {
                Phase::PreFlop => {
                    for _ in 1..=3 {
                        self.board.push(self.deck.deal());
                    }
                    self.phase = Phase::Flop;
                }
                Phase::Flop => {
                    self.board.push(self.deck.deal());
                    self.phase = Phase::Turn;
                }
                Phase::Turn => {
                    self.board.push(self.deck.deal());
                    self.phase = Phase::River;
                }
                Phase::River => {
                    self.enter_showdown();
                    return;
                }
                Phase::Waiting | Phase::Showdown => return,
            }

            self.start_round();
        }
    }

    fn start_round(&mut self) {
        self.current_bet = Chips::ZERO;
        self.players.start_round();

        debug!(
            "Room {} {} board {:?} pot {}",
            self.config.room_id, self.phase, self.board, self.pot
        );
    }

    fn enter_showdown(&mut self) {
        self.phase = Phase::Showdown;
        self.current_bet = Chips::ZERO;

        let contest = self.players.count_contenders() > 1;
        self.pay_bets();
        self.players.end_hand(contest);

        for payoff in &self.payoffs {
            info!(
                "Room {} hand {} player {} wins {}",
                self.config.room_id, self.hand_count, payoff.player_id, payoff.chips
            );
        }
    }

    /// Pays the pot to the best hands, ties split the pot.
    fn pay_bets(&mut self) {
        let pot = std::mem::take(&mut self.pot);
        let contenders = self
            .players
            .iter()
            .filter(|p| p.is_contender())
            .map(|p| p.seat)
            .collect::<Vec<_>>();

        match contenders.as_slice() {
            [] => warn!("Room {} no contenders for {pot} chips", self.config.room_id),
            [seat] => {
                if let Some(player) = self.players.by_seat_mut(*seat) {
                    player.chips += pot;
                    self.payoffs.push(HandPayoff {
                        player_id: player.player_id.clone(),
                        chips: pot,
                        rank: None,
                        cards: Vec::default(),
                    });
                }
            }
            _ => {
                let hands = self
                    .players
                    .iter()
                    .filter(|p| p.is_contender())
                    .map(|p| {
                        let (c1, c2) = p.cards().expect("Contender without hole cards");
                        let value = HandValue::eval_with_board(&[c1, c2], &self.board)
                            .expect("Showdown with an incomplete board");
                        (p.seat, value)
                    })
                    .collect::<Vec<_>>();

                let Some(best) = hands.iter().map(|(_, v)| v).max().cloned() else {
                    return;
                };

                let winners = hands
                    .into_iter()
                    .filter(|(_, v)| *v == best)
                    .collect::<Vec<_>>();

                let share = pot / winners.len() as u32;
                let remainder = pot % winners.len() as u32;
                if remainder > Chips::ZERO {
                    warn!(
                        "Room {} split pot of {pot} drops {remainder} chips",
                        self.config.room_id
                    );
                }

                for (seat, value) in winners {
                    if let Some(player) = self.players.by_seat_mut(seat) {
                        player.chips += share;
                        self.payoffs.push(HandPayoff {
                            player_id: player.player_id.clone(),
                            chips: share,
                            rank: Some(value.rank()),
                            cards: value.hand().to_vec(),
                        });
                    }
                }
            }
        }
    }
}
