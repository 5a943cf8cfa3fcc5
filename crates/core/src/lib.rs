// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Texas Hold'em core types shared by the engine and its callers.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]

pub mod game;
pub mod poker;
