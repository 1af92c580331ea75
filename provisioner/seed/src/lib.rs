// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Canopy Demo-Data Seeding
//!
//! Generates random CSV demo data and bulk-loads it into the directory
//! service.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Seeding parameters and CSV file locations |
//! | [`generate`] | Random CSV generation |
//! | [`file`] | CSV read helpers and upload loading |
//! | [`templates`] | Embedded JSON schema templates |
//! | [`client`] | Remote bulk operations against the directory |

pub mod client;
pub mod config;
pub mod error;
mod fake;
pub mod file;
pub mod generate;
pub mod templates;

pub use client::SeedClient;
pub use config::SeedConfig;
pub use error::SeedError;
