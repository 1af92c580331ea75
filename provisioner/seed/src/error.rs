// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use canopy_core::infrastructure::graphql::GraphQLError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("token is required but not provided")]
    TokenMissing,

    #[error("column not found in CSV file: {0}")]
    ColumnNotFound(String),

    #[error("invalid template name: {0}")]
    InvalidTemplateName(String),

    #[error("CSV file is empty: {0}")]
    EmptyFile(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    GraphQL(#[from] GraphQLError),

    #[error("unable to process request (status {status}): {body}")]
    Request { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(String),
}
