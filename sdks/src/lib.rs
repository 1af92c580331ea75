// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Canopy Rust SDK
//!
//! Typed client for the Canopy provisioning API.

pub mod client;

pub use client::{CanopyClient, ClientError};
pub use canopy_core::domain::organization::{
    BucketReply, EnvironmentReply, ErrorReply, OrganizationReply, OrganizationRequest, RelationshipReply,
};
