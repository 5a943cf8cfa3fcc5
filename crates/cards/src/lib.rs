// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Texas Hold'em cards types.
//!
//! This crate define types to create cards:
//!
//! ```
//! # use holdem_cards::{Card, Rank, Suit};
//! let ah = Card::new(Rank::Ace, Suit::Hearts);
//! let kd: Card = "KD".parse().unwrap();
//! assert!(ah.rank() > kd.rank());
//! ```
//!
//! and a [Deck] type for shuffling and dealing cards.
//!
//! The [for_each_combination] function visits every k-cards subset of a slice,
//! for example all five cards hands out of seven cards:
//!
//! ```
//! # use holdem_cards::{Deck, for_each_combination};
//! let cards = Deck::default().into_iter().take(7).collect::<Vec<_>>();
//! let mut counter = 0;
//! for_each_combination(&cards, 5, |hand| {
//!     assert_eq!(hand.len(), 5);
//!     counter += 1;
//! });
//! assert_eq!(counter, 21);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
mod deck;
pub use deck::{Card, Deck, ParseCardError, Rank, Suit, for_each_combination};
