// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Vertex group weight containers

use super::rounding::RoundedWeight;
use serde::{Deserialize, Serialize};
use std::collections::btree_map::{self, BTreeMap};

/// Weights of a single vertex group, keyed by vertex index
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupWeights {
    entries: BTreeMap<u32, f64>,
}

impl GroupWeights {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the weight of a vertex, returning the previous weight
    pub fn insert(&mut self, index: u32, weight: f64) -> Option<f64> {
        self.entries.insert(index, weight)
    }

    pub fn get(&self, index: u32) -> Option<f64> {
        self.entries.get(&index).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in ascending vertex index order
    pub fn iter(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.entries.iter().map(|(&index, &weight)| (index, weight))
    }

    pub fn max_index(&self) -> Option<u32> {
        self.entries.keys().next_back().copied()
    }

    /// Entries as a list of `(index, weight)` pairs
    pub fn to_pairs(&self) -> Vec<(u32, f64)> {
        self.iter().collect()
    }

    /// Round every weight and drop the ones that vanish
    pub fn rounded(&self, precision: u8) -> GroupWeights {
        self.iter()
            .filter_map(|(index, weight)| {
                let rounded = RoundedWeight::new(weight, precision);
                (!rounded.is_zero()).then_some((index, rounded.value))
            })
            .collect()
    }
}

impl FromIterator<(u32, f64)> for GroupWeights {
    fn from_iter<I: IntoIterator<Item = (u32, f64)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<const N: usize> From<[(u32, f64); N]> for GroupWeights {
    fn from(pairs: [(u32, f64); N]) -> Self {
        pairs.into_iter().collect()
    }
}

/// Named vertex groups and their weights, ordered by group name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightSet {
    groups: BTreeMap<String, GroupWeights>,
}

impl WeightSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a whole group
    pub fn insert_group(
        &mut self,
        name: impl Into<String>,
        weights: GroupWeights,
    ) -> Option<GroupWeights> {
        self.groups.insert(name.into(), weights)
    }

    /// Mutable access to a group, creating it empty if missing
    pub fn group_entry(&mut self, name: impl Into<String>) -> &mut GroupWeights {
        self.groups.entry(name.into()).or_default()
    }

    pub fn group(&self, name: &str) -> Option<&GroupWeights> {
        self.groups.get(name)
    }

    pub fn contains_group(&self, name: &str) -> bool {
        self.groups.contains_key(name)
    }

    /// Number of groups
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Groups in lexicographic name order
    pub fn iter(&self) -> btree_map::Iter<'_, String, GroupWeights> {
        self.groups.iter()
    }

    pub fn group_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.groups.keys().map(String::as_str)
    }

    /// Total number of `(index, weight)` pairs across all groups
    pub fn entry_count(&self) -> usize {
        self.groups.values().map(GroupWeights::len).sum()
    }

    /// The set as it survives encoding at `precision`: weights rounded,
    /// vanished ones removed, every group kept even when left empty
    pub fn rounded(&self, precision: u8) -> WeightSet {
        self.groups
            .iter()
            .map(|(name, weights)| (name.clone(), weights.rounded(precision)))
            .collect()
    }
}

impl FromIterator<(String, GroupWeights)> for WeightSet {
    fn from_iter<I: IntoIterator<Item = (String, GroupWeights)>>(iter: I) -> Self {
        Self {
            groups: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a WeightSet {
    type Item = (&'a String, &'a GroupWeights);
    type IntoIter = btree_map::Iter<'a, String, GroupWeights>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}
