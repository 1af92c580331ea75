// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

pub mod spec_builder;
pub mod expansion;
pub mod projector;
pub mod provisioning;
pub mod directory_factory;

// Re-export use cases for convenience
pub use spec_builder::HierarchySpecBuilder;
pub use expansion::TreeExpansionEngine;
pub use projector::project;
pub use provisioning::{ProvisioningService, StandardProvisioningService};
pub use directory_factory::create_directory_client;
