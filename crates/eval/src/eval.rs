// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Poker hand evaluator.
//!
//! A hand is evaluated by classifying each five cards subset of the available
//! cards and keeping the subset with the highest value, for a Texas Hold'em
//! hand this means comparing C(7, 5) = 21 subsets.
//!
//! Hand values are ordered by [HandRank] first and then by the tiebreakers list
//! compared position by position, so the ordering is total across hands of
//! different categories.
use holdem_cards::{Card, for_each_combination};
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt};
use thiserror::Error;

/// Hand evaluation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// A hand needs at least five cards.
    #[error("A hand needs at least 5 cards, got {0}")]
    NotEnoughCards(usize),
    /// The same card appears twice.
    #[error("Duplicate card {0}")]
    DuplicateCard(Card),
}

/// The hand category from the weakest to the strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HandRank {
    /// No pair.
    HighCard = 1,
    /// One pair.
    Pair,
    /// Two pair.
    TwoPair,
    /// Three of a kind.
    ThreeOfAKind,
    /// Five consecutive ranks.
    Straight,
    /// Five cards of the same suit.
    Flush,
    /// Three of a kind and a pair.
    FullHouse,
    /// Four of a kind.
    FourOfAKind,
    /// Straight and flush.
    StraightFlush,
    /// Ace high straight flush.
    RoyalFlush,
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HandRank::HighCard => "High Card",
            HandRank::Pair => "Pair",
            HandRank::TwoPair => "Two Pair",
            HandRank::ThreeOfAKind => "Three of a Kind",
            HandRank::Straight => "Straight",
            HandRank::Flush => "Flush",
            HandRank::FullHouse => "Full House",
            HandRank::FourOfAKind => "Four of a Kind",
            HandRank::StraightFlush => "Straight Flush",
            HandRank::RoyalFlush => "Royal Flush",
        };

        write!(f, "{name}")
    }
}

/// The value of the best five cards hand.
///
/// Equality and ordering only look at the rank and the tiebreakers, two hands
/// made of different cards with the same strength compare equal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandValue {
    rank: HandRank,
    tiebreakers: Vec<u8>,
    hand: [Card; 5],
}

impl HandValue {
    /// Evaluates the best five cards hand out of 5 or more cards.
    pub fn eval(cards: &[Card]) -> Result<Self, EvalError> {
        if cards.len() < 5 {
            return Err(EvalError::NotEnoughCards(cards.len()));
        }

        for (idx, card) in cards.iter().enumerate() {
            if cards[idx + 1..].contains(card) {
                return Err(EvalError::DuplicateCard(*card));
            }
        }

        let mut best: Option<HandValue> = None;
        for_each_combination(cards, 5, |hand| {
            let value = Self::classify(hand);
            if best.as_ref().is_none_or(|b| value > *b) {
                best = Some(value);
            }
        });

        best.ok_or(EvalError::NotEnoughCards(cards.len()))
    }

    /// Evaluates a player hand given the hole cards and the board cards.
    pub fn eval_with_board(hole: &[Card], board: &[Card]) -> Result<Self, EvalError> {
        let cards = hole.iter().chain(board).copied().collect::<Vec<_>>();
        Self::eval(&cards)
    }

    /// The hand category.
    pub fn rank(&self) -> HandRank {
        self.rank
    }

    /// The values used to break ties between hands of the same category, most
    /// significant first.
    pub fn tiebreakers(&self) -> &[u8] {
        &self.tiebreakers
    }

    /// The five cards that make this hand.
    pub fn hand(&self) -> &[Card; 5] {
        &self.hand
    }

    /// Three way comparison with another hand.
    pub fn compare(&self, other: &HandValue) -> Ordering {
        self.rank.cmp(&other.rank).then_with(|| {
            self.tiebreakers
                .iter()
                .zip(&other.tiebreakers)
                .map(|(t1, t2)| t1.cmp(t2))
                .find(|o| o.is_ne())
                .unwrap_or(Ordering::Equal)
        })
    }

    /// Checks if this hand beats the other hand.
    pub fn is_better_than(&self, other: &HandValue) -> bool {
        self.compare(other) == Ordering::Greater
    }

    /// Classifies a five cards hand.
    fn classify(cards: &[Card]) -> HandValue {
        debug_assert_eq!(cards.len(), 5);

        let mut counts = [0u8; 15];
        for card in cards {
            counts[card.rank().value() as usize] += 1;
        }

        // Rank groups sorted by group size and then by rank, so that the group
        // ranks are already the tiebreakers for the non straight hands.
        let mut groups = (2..=14u8)
            .rev()
            .filter(|&r| counts[r as usize] > 0)
            .map(|r| (counts[r as usize], r))
            .collect::<Vec<_>>();
        groups.sort_by(|g1, g2| g2.0.cmp(&g1.0));

        let pattern = groups.iter().map(|g| g.0).collect::<Vec<_>>();
        let group_ranks = groups.iter().map(|g| g.1).collect::<Vec<_>>();

        let mut ranks = cards.iter().map(|c| c.rank().value()).collect::<Vec<_>>();
        ranks.sort_unstable_by(|r1, r2| r2.cmp(r1));

        let is_flush = cards.iter().all(|c| c.suit() == cards[0].suit());
        let straight_high = Self::straight_high(&group_ranks);

        let (rank, tiebreakers) = match (straight_high, is_flush, pattern.as_slice()) {
            (Some(14), true, _) => (HandRank::RoyalFlush, vec![14]),
            (Some(high), true, _) => (HandRank::StraightFlush, vec![high]),
            (_, _, [4, 1]) => (HandRank::FourOfAKind, group_ranks),
            (_, _, [3, 2]) => (HandRank::FullHouse, group_ranks),
            (_, true, _) => (HandRank::Flush, ranks),
            (Some(high), false, _) => (HandRank::Straight, vec![high]),
            (_, _, [3, 1, 1]) => (HandRank::ThreeOfAKind, group_ranks),
            (_, _, [2, 2, 1]) => (HandRank::TwoPair, group_ranks),
            (_, _, [2, 1, 1, 1]) => (HandRank::Pair, group_ranks),
            _ => (HandRank::HighCard, ranks),
        };

        let mut hand = [cards[0]; 5];
        hand.copy_from_slice(cards);

        HandValue {
            rank,
            tiebreakers,
            hand,
        }
    }

    /// Returns the straight high card given five distinct ranks sorted in
    /// descending order, the wheel A-5-4-3-2 is a five high straight.
    fn straight_high(ranks: &[u8]) -> Option<u8> {
        match ranks {
            [14, 5, 4, 3, 2] => Some(5),
            [high, .., low] if ranks.len() == 5 && high - low == 4 => Some(*high),
            _ => None,
        }
    }
}

impl PartialEq for HandValue {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }
}

impl Eq for HandValue {}

impl PartialOrd for HandValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HandValue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

impl fmt::Display for HandValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rank)?;
        for card in &self.hand {
            write!(f, " {card}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use holdem_cards::Deck;
    use rand::prelude::*;

    fn cards(s: &str) -> Vec<Card> {
        s.split_whitespace().map(|c| c.parse().unwrap()).collect()
    }

    fn eval(s: &str) -> HandValue {
        HandValue::eval(&cards(s)).unwrap()
    }

    #[test]
    fn hand_categories() {
        let v = eval("AH KH QH JH TH");
        assert_eq!(v.rank(), HandRank::RoyalFlush);
        assert_eq!(v.tiebreakers(), &[14]);

        let v = eval("9C KC QC JC TC");
        assert_eq!(v.rank(), HandRank::StraightFlush);
        assert_eq!(v.tiebreakers(), &[13]);

        let v = eval("7S 7H 7D 7C 2H");
        assert_eq!(v.rank(), HandRank::FourOfAKind);
        assert_eq!(v.tiebreakers(), &[7, 2]);

        let v = eval("3S 3H 3D KC KH");
        assert_eq!(v.rank(), HandRank::FullHouse);
        assert_eq!(v.tiebreakers(), &[3, 13]);

        let v = eval("2D 9D JD 4D KD");
        assert_eq!(v.rank(), HandRank::Flush);
        assert_eq!(v.tiebreakers(), &[13, 11, 9, 4, 2]);

        let v = eval("6S 7H 8D 9C TH");
        assert_eq!(v.rank(), HandRank::Straight);
        assert_eq!(v.tiebreakers(), &[10]);

        let v = eval("QS QH QD 4C 9H");
        assert_eq!(v.rank(), HandRank::ThreeOfAKind);
        assert_eq!(v.tiebreakers(), &[12, 9, 4]);

        let v = eval("5S 5H JD JC 9H");
        assert_eq!(v.rank(), HandRank::TwoPair);
        assert_eq!(v.tiebreakers(), &[11, 5, 9]);

        let v = eval("8S 8H AD 3C 6H");
        assert_eq!(v.rank(), HandRank::Pair);
        assert_eq!(v.tiebreakers(), &[8, 14, 6, 3]);

        let v = eval("2S 8H AD 3C 6H");
        assert_eq!(v.rank(), HandRank::HighCard);
        assert_eq!(v.tiebreakers(), &[14, 8, 6, 3, 2]);
    }

    #[test]
    fn wheel_plays_five_high() {
        let v = eval("AS 2H 3D 4C 5H");
        assert_eq!(v.rank(), HandRank::Straight);
        assert_eq!(v.tiebreakers(), &[5]);

        // A six high straight beats the wheel.
        assert!(eval("2S 3H 4D 5C 6H") > v);

        let v = eval("AH 2H 3H 4H 5H");
        assert_eq!(v.rank(), HandRank::StraightFlush);
        assert_eq!(v.tiebreakers(), &[5]);

        // Not a straight, the ace does not wrap around.
        let v = eval("QS KH AD 2C 3H");
        assert_eq!(v.rank(), HandRank::HighCard);
    }

    #[test]
    fn royal_flush_beats_straight_flush() {
        let royal = HandValue::eval_with_board(
            &cards("AH KH"),
            &cards("QH JH TH 9S 2C"),
        )
        .unwrap();
        assert_eq!(royal.rank(), HandRank::RoyalFlush);
        assert_eq!(royal.tiebreakers(), &[14]);

        let straight_flush = eval("5S 6S 7S 8S 9S");
        assert_eq!(straight_flush.tiebreakers(), &[9]);
        assert!(royal.is_better_than(&straight_flush));
        assert_eq!(straight_flush.compare(&royal), Ordering::Less);
    }

    #[test]
    fn best_of_seven() {
        // Board pairs give a full house over the flush.
        let v = eval("KH KD 2H 7H 9H KS 9C");
        assert_eq!(v.rank(), HandRank::FullHouse);
        assert_eq!(v.tiebreakers(), &[13, 9]);

        // Best two pair with the best kicker.
        let v = eval("AS 4D 4C 8H 8S QD QH");
        assert_eq!(v.rank(), HandRank::TwoPair);
        assert_eq!(v.tiebreakers(), &[12, 8, 14]);

        // Highest straight out of a seven cards run.
        let v = eval("3C 4D 5H 6S 7C 8D 9H");
        assert_eq!(v.rank(), HandRank::Straight);
        assert_eq!(v.tiebreakers(), &[9]);

        let mut best = v.hand().iter().map(|c| c.rank().value()).collect::<Vec<_>>();
        best.sort_unstable();
        assert_eq!(best, vec![5, 6, 7, 8, 9]);
    }

    #[test]
    fn kickers_break_ties() {
        assert!(eval("8S 8H AD 3C 6H") > eval("8D 8C KD QC JH"));
        assert!(eval("7S 7H 7D 7C AH") > eval("7S 7H 7D 7C KH"));
        assert!(eval("5S 5H JD JC AH") > eval("5D 5C JS JH KH"));
        assert!(eval("2D 9D JD 4D KD") > eval("2C 8C JC 4C KC"));

        // Same strength different suits is an exact tie.
        let v1 = eval("AS KS 9D 5C 3H");
        let v2 = eval("AD KD 9H 5S 3C");
        assert_eq!(v1.compare(&v2), Ordering::Equal);
        assert_eq!(v1, v2);
        assert!(!v1.is_better_than(&v2));
        assert!(!v2.is_better_than(&v1));
    }

    #[test]
    fn eval_errors() {
        assert_eq!(
            HandValue::eval(&cards("AS KS QS JS")).unwrap_err(),
            EvalError::NotEnoughCards(4)
        );
        assert_eq!(
            HandValue::eval_with_board(&cards("AS KS"), &cards("QS JS")).unwrap_err(),
            EvalError::NotEnoughCards(4)
        );
        assert_eq!(
            HandValue::eval(&cards("AS KS QS JS AS")).unwrap_err(),
            EvalError::DuplicateCard("AS".parse().unwrap())
        );
    }

    #[test]
    fn best_hand_is_optimal() {
        let mut rng = StdRng::seed_from_u64(101);

        for _ in 0..500 {
            let mut deck = Deck::new_and_shuffled(&mut rng);
            let seven = (0..7).map(|_| deck.deal()).collect::<Vec<_>>();
            let best = HandValue::eval(&seven).unwrap();

            for_each_combination(&seven, 5, |hand| {
                let v = HandValue::eval(hand).unwrap();
                assert!(best >= v, "{best} < {v}");
            });

            // The best hand is made of the given cards.
            assert!(best.hand().iter().all(|c| seven.contains(c)));
            assert_eq!(HandValue::eval(best.hand()).unwrap(), best);
        }
    }

    #[test]
    fn comparator_is_a_total_preorder() {
        let mut rng = StdRng::seed_from_u64(42);
        let hands = (0..60)
            .map(|_| {
                let mut deck = Deck::new_and_shuffled(&mut rng);
                let seven = (0..7).map(|_| deck.deal()).collect::<Vec<_>>();
                HandValue::eval(&seven).unwrap()
            })
            .collect::<Vec<_>>();

        for a in &hands {
            assert_eq!(a.compare(a), Ordering::Equal);

            for b in &hands {
                assert_eq!(a.compare(b), b.compare(a).reverse());

                for c in &hands {
                    if a > b && b > c {
                        assert!(a > c);
                    }
                }
            }
        }
    }
}
