// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Weight file metadata

use crate::error::{Result, WeightFileError};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Allowed number of decimal digits per weight
pub const PRECISION_RANGE: RangeInclusive<u8> = 2..=5;
/// Allowed number of entries per output line
pub const COLUMNS_RANGE: RangeInclusive<usize> = 1..=16;

const MAX_AUTHOR_LEN: usize = 64;
const MAX_NAME_LEN: usize = 64;
const MAX_LICENSE_LEN: usize = 64;
const MAX_DESCRIPTION_LEN: usize = 1024;
const MAX_VERSION_LEN: usize = 20;

/// Header fields and layout options used when writing a weight file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileMetadata {
    /// Written as `copyright`
    pub author: String,
    pub name: String,
    pub description: String,
    pub license: String,
    /// MakeHuman version token, e.g. `110`
    pub version: String,
    /// Decimal digits kept per weight
    pub precision: u8,
    /// Entries per output line
    pub columns: usize,
}

impl Default for FileMetadata {
    fn default() -> Self {
        Self {
            author: "unknown".to_string(),
            name: "unknown".to_string(),
            description: String::new(),
            license: "CC BY 4.0".to_string(),
            version: "110".to_string(),
            precision: 3,
            columns: 4,
        }
    }
}

impl FileMetadata {
    /// Defaults for an object called `name`
    pub fn for_object(name: &str) -> Self {
        Self {
            name: name.to_string(),
            description: format!("generated weights for {}", name),
            ..Self::default()
        }
    }

    pub fn with_precision(mut self, precision: u8) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_columns(mut self, columns: usize) -> Self {
        self.columns = columns;
        self
    }

    /// Check layout ranges and field length limits
    pub fn validate(&self) -> Result<()> {
        if !PRECISION_RANGE.contains(&self.precision) {
            return Err(WeightFileError::InvalidMetadata {
                field: "precision",
                reason: format!(
                    "{} is outside {}..={}",
                    self.precision,
                    PRECISION_RANGE.start(),
                    PRECISION_RANGE.end()
                ),
            });
        }
        if !COLUMNS_RANGE.contains(&self.columns) {
            return Err(WeightFileError::InvalidMetadata {
                field: "columns",
                reason: format!(
                    "{} is outside {}..={}",
                    self.columns,
                    COLUMNS_RANGE.start(),
                    COLUMNS_RANGE.end()
                ),
            });
        }

        check_length("author", &self.author, MAX_AUTHOR_LEN)?;
        check_length("name", &self.name, MAX_NAME_LEN)?;
        check_length("description", &self.description, MAX_DESCRIPTION_LEN)?;
        check_length("license", &self.license, MAX_LICENSE_LEN)?;
        check_length("version", &self.version, MAX_VERSION_LEN)?;
        if self.version.trim().is_empty() {
            return Err(WeightFileError::InvalidMetadata {
                field: "version",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Carry header fields read from an existing file
    pub fn apply_header(&mut self, header: &FileHeader) {
        let fields = [
            (&mut self.author, &header.author),
            (&mut self.name, &header.name),
            (&mut self.description, &header.description),
            (&mut self.license, &header.license),
            (&mut self.version, &header.version),
        ];
        for (target, source) in fields {
            if let Some(value) = source {
                target.clone_from(value);
            }
        }
    }
}

fn check_length(field: &'static str, value: &str, max: usize) -> Result<()> {
    let len = value.chars().count();
    if len > max {
        return Err(WeightFileError::InvalidMetadata {
            field,
            reason: format!("{} characters exceeds the limit of {}", len, max),
        });
    }
    Ok(())
}

/// Header fields recovered from a weight file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileHeader {
    pub author: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub license: Option<String>,
    pub version: Option<String>,
}
