// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Error types for weight file encoding, decoding and application

use thiserror::Error;

/// Crate result alias
pub type Result<T> = std::result::Result<T, WeightFileError>;

/// How an error should be presented to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Debug, Error)]
pub enum WeightFileError {
    #[error("object has no vertex groups")]
    NoGroups,
    #[error("no vertices assigned at or above the precision threshold")]
    EmptyResult,
    #[error("malformed weight file: {message}")]
    Malformed { message: String },
    #[error("invalid metadata field `{field}`: {reason}")]
    InvalidMetadata { field: &'static str, reason: String },
    #[error("group `{group}` has a non-finite weight at vertex {index}")]
    NonFiniteWeight { group: String, index: u32 },
    #[error("group `{group}` references vertex {index}, mesh has {vertex_count} vertices")]
    VertexOutOfRange {
        group: String,
        index: u32,
        vertex_count: usize,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl WeightFileError {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }

    /// Short category shown as the dialog/report title
    pub fn title(&self) -> &'static str {
        match self {
            Self::NoGroups => "Missing attributes",
            Self::EmptyResult => "Missing assignment",
            Self::Malformed { .. } => "Malformed file",
            Self::InvalidMetadata { .. } => "Invalid settings",
            Self::NonFiniteWeight { .. } => "Invalid weight",
            Self::VertexOutOfRange { .. } => "Mesh mismatch",
            Self::Io(_) => "File error",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Self::EmptyResult => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

impl From<serde_json::Error> for WeightFileError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            return Self::Io(err.into());
        }
        Self::malformed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_titles_match_dialog_categories() {
        assert_eq!(WeightFileError::NoGroups.title(), "Missing attributes");
        assert_eq!(WeightFileError::EmptyResult.title(), "Missing assignment");
        assert_eq!(WeightFileError::EmptyResult.severity(), Severity::Warning);
        assert_eq!(WeightFileError::NoGroups.severity(), Severity::Error);
    }

    #[test]
    fn test_json_syntax_error_is_malformed() {
        let err: WeightFileError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, WeightFileError::Malformed { .. }));
    }
}
