// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Command implementations for Canopy CLI

pub mod config;
pub mod organization;
pub mod seed;

pub use self::config::ConfigCommand;
pub use self::organization::OrganizationCommand;
pub use self::seed::SeedCommand;
