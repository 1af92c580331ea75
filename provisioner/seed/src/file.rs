// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use crate::error::SeedError;
use canopy_core::infrastructure::graphql::Upload;
use std::path::Path;

pub const CSV_CONTENT_TYPE: &str = "text/csv";

/// Read every row of a CSV file, header row included.
pub fn read_csv_file(path: impl AsRef<Path>) -> Result<Vec<Vec<String>>, SeedError> {
    let mut reader = csv::ReaderBuilder::new().has_headers(false).from_path(path)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        rows.push(record?.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

/// Position of `column` in a header row.
pub fn column_index(headers: &[String], column: &str) -> Option<usize> {
    headers.iter().position(|header| header == column)
}

/// Load a CSV file as a multipart upload part.
pub fn load_csv_upload(path: impl AsRef<Path>) -> Result<Upload, SeedError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;

    Ok(Upload {
        file_name: path.to_string_lossy().into_owned(),
        content_type: CSV_CONTENT_TYPE.to_string(),
        bytes,
    })
}
