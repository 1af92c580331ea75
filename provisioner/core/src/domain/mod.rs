// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Domain Layer
//!
//! Hierarchy model, wire contracts and the directory boundary. Nothing in here
//! performs I/O.

pub mod config;
pub mod directory;
pub mod error;
pub mod hierarchy;
pub mod organization;
