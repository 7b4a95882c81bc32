// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Weight file decoder

use crate::error::{Result, WeightFileError};
use crate::weights::{FileHeader, GroupWeights, WeightSet};
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use serde_json::value::RawValue;
use std::fmt;

/// Contents of a decoded weight file
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedFile {
    pub header: FileHeader,
    pub weights: WeightSet,
}

/// On-disk schema. Only `weights` is required.
#[derive(Deserialize)]
struct RawWeightFile {
    copyright: Option<String>,
    description: Option<String>,
    license: Option<String>,
    name: Option<String>,
    version: Option<Box<RawValue>>,
    #[serde(deserialize_with = "deserialize_groups")]
    weights: RawGroups,
}

type RawGroups = Vec<(String, Vec<(u32, f64)>)>;

/// Groups in file order, repeated names included
fn deserialize_groups<'de, D>(deserializer: D) -> std::result::Result<RawGroups, D::Error>
where
    D: Deserializer<'de>,
{
    struct GroupsVisitor;

    impl<'de> Visitor<'de> for GroupsVisitor {
        type Value = RawGroups;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a map of group names to [index, weight] lists")
        }

        fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut groups = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some(entry) = map.next_entry()? {
                groups.push(entry);
            }
            Ok(groups)
        }
    }

    deserializer.deserialize_map(GroupsVisitor)
}

/// Decode weight file text.
///
/// Weights are taken exactly as written. Vertex indices are not checked
/// against any mesh.
pub fn decode(text: &str) -> Result<DecodedFile> {
    let raw: RawWeightFile = serde_json::from_str(text)?;

    let version = raw.version.as_deref().map(version_text).transpose()?;
    let header = FileHeader {
        author: raw.copyright,
        name: raw.name,
        description: raw.description,
        license: raw.license,
        version,
    };

    let mut weights = WeightSet::new();
    for (name, pairs) in raw.weights {
        if weights.contains_group(&name) {
            return Err(WeightFileError::malformed(format!(
                "group `{}` is listed twice",
                name
            )));
        }
        let mut group = GroupWeights::new();
        for (index, weight) in pairs {
            if group.insert(index, weight).is_some() {
                return Err(WeightFileError::malformed(format!(
                    "vertex {} is listed twice in group `{}`",
                    index, name
                )));
            }
        }
        weights.insert_group(name, group);
    }

    Ok(DecodedFile { header, weights })
}

/// Version token text: numbers keep their literal spelling
fn version_text(raw: &RawValue) -> Result<String> {
    match serde_json::from_str::<serde_json::Value>(raw.get())? {
        serde_json::Value::String(version) => Ok(version),
        serde_json::Value::Number(_) => Ok(raw.get().trim().to_string()),
        other => Err(WeightFileError::malformed(format!(
            "`version` must be a number or a string, found {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
"copyright": "black-punkduck",
"description": "generated weights for Body",
"license": "CC BY 4.0",
"name": "Body",
"version": 110,
"weights": {
	"leftArm": [
		[0, 0.5], [5, 0.8]
	],
	"spine": [
		[2, 1.0]
	]
}
}
"#;

    #[test]
    fn test_decode_sample() {
        let decoded = decode(SAMPLE).unwrap();
        assert_eq!(decoded.header.author.as_deref(), Some("black-punkduck"));
        assert_eq!(decoded.header.name.as_deref(), Some("Body"));
        assert_eq!(decoded.header.version.as_deref(), Some("110"));

        let arm = decoded.weights.group("leftArm").unwrap();
        assert_eq!(arm.to_pairs(), vec![(0, 0.5), (5, 0.8)]);
        assert_eq!(decoded.weights.group("spine").unwrap().get(2), Some(1.0));
    }

    #[test]
    fn test_missing_weights_is_malformed() {
        let err = decode(r#"{"name": "Body", "version": 110}"#).unwrap_err();
        assert!(matches!(err, WeightFileError::Malformed { .. }));
    }

    #[test]
    fn test_weights_not_a_mapping_is_malformed() {
        let err = decode(r#"{"weights": [[0, 0.5]]}"#).unwrap_err();
        assert!(matches!(err, WeightFileError::Malformed { .. }));
    }

    #[test]
    fn test_syntax_error_is_malformed() {
        let err = decode("{\"weights\": {\"leftArm\": [[0, 0.5],]}}").unwrap_err();
        assert!(matches!(err, WeightFileError::Malformed { .. }));
    }

    #[test]
    fn test_bad_pairs_are_malformed() {
        for text in [
            r#"{"weights": {"a": [[-1, 0.5]]}}"#,
            r#"{"weights": {"a": [[0]]}}"#,
            r#"{"weights": {"a": [[0, "heavy"]]}}"#,
            r#"{"weights": {"a": [0, 0.5]}}"#,
        ] {
            assert!(
                matches!(decode(text), Err(WeightFileError::Malformed { .. })),
                "accepted {}",
                text
            );
        }
    }

    #[test]
    fn test_duplicate_index_is_malformed() {
        let err = decode(r#"{"weights": {"a": [[3, 0.5], [3, 0.25]]}}"#).unwrap_err();
        assert!(err.to_string().contains("vertex 3 is listed twice"));
    }

    #[test]
    fn test_duplicate_group_is_malformed() {
        let err = decode(r#"{"weights": {"a": [[0, 0.5]], "a": [[1, 0.25]]}}"#).unwrap_err();
        assert!(matches!(err, WeightFileError::Malformed { .. }));
        assert!(err.to_string().contains("group `a` is listed twice"));
    }

    #[test]
    fn test_weights_are_not_rounded_again() {
        let decoded = decode(r#"{"weights": {"a": [[0, 0.123456789]]}}"#).unwrap();
        assert_eq!(decoded.weights.group("a").unwrap().get(0), Some(0.123456789));
    }

    #[test]
    fn test_minimal_file_and_empty_group() {
        let decoded = decode(r#"{"weights": {"a": []}, "extra": true}"#).unwrap();
        assert_eq!(decoded.header, FileHeader::default());
        assert!(decoded.weights.group("a").unwrap().is_empty());
    }

    #[test]
    fn test_version_spellings() {
        let decoded = decode(r#"{"version": "v1.1.0", "weights": {}}"#).unwrap();
        assert_eq!(decoded.header.version.as_deref(), Some("v1.1.0"));

        let decoded = decode(r#"{"version": 1.10, "weights": {}}"#).unwrap();
        assert_eq!(decoded.header.version.as_deref(), Some("1.10"));

        let err = decode(r#"{"version": [1, 1], "weights": {}}"#).unwrap_err();
        assert!(matches!(err, WeightFileError::Malformed { .. }));
    }

    #[test]
    fn test_out_of_range_indices_are_accepted() {
        let decoded = decode(r#"{"weights": {"a": [[4000000000, 0.5]]}}"#).unwrap();
        assert_eq!(decoded.weights.group("a").unwrap().max_index(), Some(4_000_000_000));
    }
}
