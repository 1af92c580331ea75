// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Directory Infrastructure - Anti-Corruption Layer Implementations
//
// Each adapter translates between the DirectoryClient domain interface and a
// concrete backend.

pub mod graphql;
pub mod memory;

pub use graphql::GraphQLDirectoryClient;
pub use memory::InMemoryDirectoryClient;
