// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Texas Hold'em table engine.
//!
//! The [State] type holds a table and applies the betting rules, it deals the
//! cards, posts the blinds, validates and applies players actions, advances
//! the hand phases, and pays the pot at showdown. The [Table] type runs a
//! [State] in a tokio task so that many callers can share a table.
//!
//! ```
//! # use holdem_engine::*;
//! # use holdem_core::{game::{Phase, PlayerAction}, poker::{Chips, PlayerId, RoomId}};
//! let config = TableConfig::new(RoomId::new("room"), Chips::new(10), Chips::new(20)).unwrap();
//! let mut state = State::new(config);
//!
//! let (alice, bob) = (PlayerId::new("alice"), PlayerId::new("bob"));
//! state.seat(&alice, "Alice", Chips::new(1_000), 1).unwrap();
//! state.seat(&bob, "Bob", Chips::new(1_000), 2).unwrap();
//!
//! state.start_hand().unwrap();
//! assert_eq!(state.pot(), Chips::new(30));
//!
//! state.action(&alice, PlayerAction::Fold).unwrap();
//! assert_eq!(state.phase(), Phase::Showdown);
//! assert_eq!(state.payoffs()[0].player_id, bob);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]

pub mod config;
pub use config::TableConfig;

pub mod error;
pub use error::TableError;

pub mod table;
pub use table::{State, Table};
