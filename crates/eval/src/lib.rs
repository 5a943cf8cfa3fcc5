// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Texas Hold'em hand evaluator.
//!
//! Poker hand evaluator for 5, 6 and 7 cards hands. The evaluator classifies
//! every five cards subset of the given cards and keeps the best one, the
//! resulting [HandValue] holds the hand category, the tiebreakers used to
//! compare hands of the same category, and the five cards that make the hand.
//!
//! ```
//! # use holdem_eval::*;
//! let cards = ["AH", "KH", "QH", "JH", "TH", "9S", "2C"]
//!     .iter()
//!     .map(|c| c.parse::<Card>().unwrap())
//!     .collect::<Vec<_>>();
//!
//! let v = HandValue::eval(&cards).unwrap();
//! assert_eq!(v.rank(), HandRank::RoyalFlush);
//! assert_eq!(v.tiebreakers(), &[14]);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
pub mod eval;
pub use eval::{EvalError, HandRank, HandValue};

// Reexport cards types.
pub use holdem_cards::{Card, Deck, Rank, Suit};
