// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Export settings loaded from `mhw.toml` and the environment

use crate::weights::FileMetadata;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default settings file looked up in the working directory
pub const SETTINGS_FILE: &str = "mhw.toml";

/// Persistent export settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Replace existing groups on import instead of adding to them
    pub replace_groups: Option<bool>,
    /// Defaults for exported file headers and layout
    pub export: FileMetadata,
}

impl Settings {
    /// Load settings from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read settings file: {:?}", path.as_ref()))?;
        let settings: Settings = toml::from_str(&content)
            .with_context(|| format!("Failed to parse settings file: {:?}", path.as_ref()))?;
        Ok(settings)
    }

    /// Load `mhw.toml` if present, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut settings = if PathBuf::from(SETTINGS_FILE).exists() {
            Self::from_file(SETTINGS_FILE)?
        } else {
            Self::default()
        };
        settings.apply_env(|key| std::env::var(key).ok())?;
        Ok(settings)
    }

    /// Apply `MHW_*` overrides using `lookup` to read variables
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(author) = lookup("MHW_AUTHOR") {
            self.export.author = author;
        }
        if let Some(license) = lookup("MHW_LICENSE") {
            self.export.license = license;
        }
        if let Some(version) = lookup("MHW_VERSION") {
            self.export.version = version;
        }
        if let Some(precision) = lookup("MHW_PRECISION") {
            self.export.precision = precision
                .trim()
                .parse()
                .with_context(|| format!("MHW_PRECISION is not a number: {}", precision))?;
        }
        if let Some(columns) = lookup("MHW_COLUMNS") {
            self.export.columns = columns
                .trim()
                .parse()
                .with_context(|| format!("MHW_COLUMNS is not a number: {}", columns))?;
        }
        if let Some(replace) = lookup("MHW_REPLACE") {
            self.replace_groups = replace.parse().ok();
        }

        self.export.validate()?;
        Ok(())
    }

    /// Save settings to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize settings")?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write settings file: {:?}", path.as_ref()))?;
        Ok(())
    }

    /// Whether imports replace existing groups (the default)
    pub fn replace_groups(&self) -> bool {
        self.replace_groups.unwrap_or(true)
    }
}
