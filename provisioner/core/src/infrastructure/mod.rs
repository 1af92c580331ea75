// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

pub mod graphql;
pub mod directory;

pub use graphql::{GraphQLClient, GraphQLError, Upload};
