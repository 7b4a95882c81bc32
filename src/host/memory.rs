// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! In-memory mesh with named vertex groups

use super::VertexGroupHost;
use crate::error::Result;
use crate::io::write_atomic;
use crate::weights::GroupWeights;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Named vertex group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VertexGroup {
    pub name: String,
    pub weights: GroupWeights,
}

impl VertexGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            weights: GroupWeights::new(),
        }
    }

    /// Add `weight` to the vertex, clamped to 1.0
    pub fn add_weight(&mut self, vertex: u32, weight: f64) {
        let total = self.weights.get(vertex).unwrap_or(0.0) + weight;
        self.weights.insert(vertex, total.min(1.0));
    }
}

/// Mesh holding only what weight exchange needs: a vertex count and groups
/// in creation order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryMesh {
    pub name: String,
    vertex_count: usize,
    groups: Vec<VertexGroup>,
}

impl MemoryMesh {
    pub fn new(name: impl Into<String>, vertex_count: usize) -> Self {
        Self {
            name: name.into(),
            vertex_count,
            groups: Vec::new(),
        }
    }

    /// Load a mesh from its JSON form. Group entries must address
    /// vertices below the vertex count.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        let mesh: Self = serde_json::from_str(text)?;
        for group in &mesh.groups {
            if let Some(index) = group.weights.max_index() {
                if index as usize >= mesh.vertex_count {
                    return Err(serde::de::Error::custom(format!(
                        "vertex {} in group `{}` is out of range for {} vertices",
                        index, group.name, mesh.vertex_count
                    )));
                }
            }
        }
        Ok(mesh)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Write the JSON form to `path`, replacing any previous file whole
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        write_atomic(path, &self.to_json()?)
    }

    /// Get or create the group called `name`
    pub fn add_group(&mut self, name: &str) -> &mut VertexGroup {
        let position = match self.position(name) {
            Some(position) => position,
            None => {
                self.groups.push(VertexGroup::new(name));
                self.groups.len() - 1
            }
        };
        &mut self.groups[position]
    }

    pub fn remove_group(&mut self, name: &str) -> Option<VertexGroup> {
        self.position(name).map(|position| self.groups.remove(position))
    }

    /// Set the weight of `vertex` in `group`, creating the group if needed.
    /// Returns `false` and leaves the mesh unchanged when `vertex` is not
    /// part of the mesh.
    pub fn assign(&mut self, group: &str, vertex: u32, weight: f64) -> bool {
        if vertex as usize >= self.vertex_count {
            return false;
        }
        self.add_group(group).weights.insert(vertex, weight);
        true
    }

    pub fn group(&self, name: &str) -> Option<&VertexGroup> {
        self.groups.iter().find(|group| group.name == name)
    }

    pub fn groups(&self) -> &[VertexGroup] {
        &self.groups
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.groups.iter().position(|group| group.name == name)
    }
}

impl VertexGroupHost for MemoryMesh {
    fn vertex_groups(&self) -> Vec<String> {
        self.groups.iter().map(|group| group.name.clone()).collect()
    }

    fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    fn group_weight(&self, group: &str, vertex: u32) -> Option<f64> {
        self.group(group)?.weights.get(vertex)
    }

    fn create_or_replace_group(&mut self, name: &str, entries: &[(u32, f64)], replace: bool) {
        if replace {
            self.remove_group(name);
        }
        let group = self.add_group(name);
        for &(vertex, weight) in entries {
            group.add_weight(vertex, weight);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_recreates_group() {
        let mut mesh = MemoryMesh::new("Body", 10);
        mesh.assign("leftArm", 0, 0.3);
        mesh.assign("leftArm", 9, 1.0);
        mesh.assign("spine", 1, 1.0);

        mesh.create_or_replace_group("leftArm", &[(0, 0.5), (5, 0.8)], true);

        let group = mesh.group("leftArm").unwrap();
        assert_eq!(group.weights.to_pairs(), vec![(0, 0.5), (5, 0.8)]);
        assert_eq!(mesh.vertex_groups(), vec!["spine", "leftArm"]);
    }

    #[test]
    fn test_append_accumulates() {
        let mut mesh = MemoryMesh::new("Body", 10);
        mesh.assign("leftArm", 0, 0.25);

        mesh.create_or_replace_group("leftArm", &[(0, 0.5), (2, 0.1)], false);

        let group = mesh.group("leftArm").unwrap();
        assert_eq!(group.weights.get(0), Some(0.75));
        assert_eq!(group.weights.get(2), Some(0.1));
        assert_eq!(mesh.groups().len(), 1);
    }

    #[test]
    fn test_accumulated_weight_is_clamped() {
        let mut group = VertexGroup::new("spine");
        group.add_weight(4, 0.75);
        group.add_weight(4, 0.75);
        assert_eq!(group.weights.get(4), Some(1.0));
    }

    #[test]
    fn test_json_form() {
        let mut mesh = MemoryMesh::new("Body", 3);
        mesh.assign("leftArm", 2, 0.5);

        let json = mesh.to_json().unwrap();
        assert_eq!(MemoryMesh::from_json(&json).unwrap(), mesh);
    }

    #[test]
    fn test_assign_outside_mesh_is_ignored() {
        let mut mesh = MemoryMesh::new("Body", 3);

        assert!(!mesh.assign("leftArm", 3, 0.5));
        assert!(mesh.group("leftArm").is_none());
        assert!(mesh.assign("leftArm", 2, 0.5));
    }

    #[test]
    fn test_json_with_vertex_outside_mesh_is_rejected() {
        let json = r#"{
            "name": "Body",
            "vertex_count": 3,
            "groups": [{"name": "leftArm", "weights": {"0": 0.5, "7": 0.25}}]
        }"#;

        let err = MemoryMesh::from_json(json).unwrap_err();
        assert!(err.to_string().contains("vertex 7 in group `leftArm`"));
    }

    #[test]
    fn test_save_replaces_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("body.json");
        std::fs::write(&path, "stale").unwrap();

        let mut mesh = MemoryMesh::new("Body", 3);
        mesh.assign("leftArm", 1, 0.5);
        mesh.save(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(MemoryMesh::from_json(&text).unwrap(), mesh);
    }
}
