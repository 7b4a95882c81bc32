// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Weight file encoder

use crate::error::{Result, WeightFileError};
use crate::weights::{FileMetadata, RoundedWeight, WeightSet};

/// A group after rounding, ready to be laid out
struct EncodedGroup<'a> {
    name: &'a str,
    entries: Vec<(u32, RoundedWeight)>,
}

/// Encode a weight set into weight file text.
///
/// Fails with [`WeightFileError::NoGroups`] when there is no group at all and
/// with [`WeightFileError::EmptyResult`] when no weight survives rounding.
pub fn encode(metadata: &FileMetadata, weights: &WeightSet) -> Result<String> {
    metadata.validate()?;

    if weights.is_empty() {
        return Err(WeightFileError::NoGroups);
    }

    let groups = round_groups(weights, metadata.precision)?;
    let retained: usize = groups.iter().map(|group| group.entries.len()).sum();
    if retained == 0 {
        return Err(WeightFileError::EmptyResult);
    }

    let mut text = String::from("{\n");
    push_string_field(&mut text, "copyright", &metadata.author)?;
    push_string_field(&mut text, "description", &metadata.description)?;
    push_string_field(&mut text, "license", &metadata.license)?;
    push_string_field(&mut text, "name", &metadata.name)?;
    text.push_str(&format!("\"version\": {},\n", version_token(&metadata.version)?));

    text.push_str("\"weights\": {\n");
    for (i, group) in groups.iter().enumerate() {
        if i > 0 {
            text.push_str(",\n");
        }
        push_group(&mut text, group, metadata.columns)?;
    }
    text.push_str("\n}\n}\n");

    Ok(text)
}

fn round_groups(weights: &WeightSet, precision: u8) -> Result<Vec<EncodedGroup<'_>>> {
    let mut groups = Vec::with_capacity(weights.len());

    for (name, group) in weights {
        let mut entries = Vec::with_capacity(group.len());
        for (index, weight) in group.iter() {
            if !weight.is_finite() {
                return Err(WeightFileError::NonFiniteWeight {
                    group: name.clone(),
                    index,
                });
            }
            let rounded = RoundedWeight::new(weight, precision);
            if !rounded.is_zero() {
                entries.push((index, rounded));
            }
        }

        groups.push(EncodedGroup { name, entries });
    }

    Ok(groups)
}

fn push_string_field(text: &mut String, key: &str, value: &str) -> Result<()> {
    text.push_str(&format!("\"{}\": {},\n", key, serde_json::to_string(value)?));
    Ok(())
}

fn push_group(text: &mut String, group: &EncodedGroup<'_>, columns: usize) -> Result<()> {
    text.push('\t');
    text.push_str(&serde_json::to_string(group.name)?);
    text.push_str(": [\n");

    for (i, (index, weight)) in group.entries.iter().enumerate() {
        if i == 0 {
            text.push_str("\t\t");
        } else if i % columns == 0 {
            text.push_str(",\n\t\t");
        } else {
            text.push_str(", ");
        }
        text.push_str(&format!("[{}, {}]", index, weight.to_minimal_string()));
    }

    if !group.entries.is_empty() {
        text.push('\n');
    }
    text.push_str("\t]");
    Ok(())
}

/// Numeric versions are written bare, anything else as a JSON string
fn version_token(version: &str) -> Result<String> {
    let trimmed = version.trim();
    if serde_json::from_str::<serde_json::Number>(trimmed).is_ok() {
        Ok(trimmed.to_string())
    } else {
        Ok(serde_json::to_string(version)?)
    }
}
