// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Canopy Provisioner Core
//!
//! Expands a flat organization request into a tenant tree (root →
//! environments → buckets → relationships) on a remote directory service.
//!
//! # Architecture
//!
//! - **Domain:** hierarchy model, directory boundary, errors, configuration
//! - **Application:** spec builder, expansion engine, reply projector, driver
//! - **Infrastructure:** GraphQL and in-memory directory adapters
//! - **Presentation:** Axum HTTP API

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
