// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Host seam - reading vertex groups from a mesh and writing them back
//!
//! The modeling application owns the mesh. It is reached only through
//! [`VertexGroupHost`]; [`MemoryMesh`] is an in-memory implementation.

mod memory;

pub use memory::{MemoryMesh, VertexGroup};

use crate::error::{Result, WeightFileError};
use crate::io::{export_file, import_file, DecodedFile};
use crate::weights::{FileMetadata, GroupWeights, WeightSet};
use std::path::Path;

/// Access to a mesh's named vertex groups
pub trait VertexGroupHost {
    /// Names of all vertex groups on the mesh
    fn vertex_groups(&self) -> Vec<String>;

    /// Number of vertices in the mesh
    fn vertex_count(&self) -> usize;

    /// Weight of `vertex` in `group`, `None` when the vertex is not assigned
    fn group_weight(&self, group: &str, vertex: u32) -> Option<f64>;

    /// Write a decoded group onto the mesh.
    ///
    /// With `replace` an existing group of that name is removed first and
    /// recreated with exactly `entries`. Without it the weights are added to
    /// the existing (or newly created) group.
    fn create_or_replace_group(&mut self, name: &str, entries: &[(u32, f64)], replace: bool);

    fn has_vertex_groups(&self) -> bool {
        !self.vertex_groups().is_empty()
    }
}

/// Collect every vertex group of `host` into a weight set
pub fn collect_weights<H: VertexGroupHost + ?Sized>(host: &H) -> Result<WeightSet> {
    if !host.has_vertex_groups() {
        return Err(WeightFileError::NoGroups);
    }

    let vertex_count = u32::try_from(host.vertex_count()).unwrap_or(u32::MAX);
    let weights: WeightSet = host
        .vertex_groups()
        .into_iter()
        .map(|name| {
            let group: GroupWeights = (0..vertex_count)
                .filter_map(|vertex| host.group_weight(&name, vertex).map(|w| (vertex, w)))
                .collect();
            (name, group)
        })
        .collect();

    tracing::debug!(
        groups = weights.len(),
        entries = weights.entry_count(),
        "collected vertex group weights"
    );
    Ok(weights)
}

/// Apply decoded groups onto `host`.
///
/// Every index is checked against the mesh before the first group is
/// written, so a mismatching file leaves the mesh untouched.
pub fn apply_weights<H: VertexGroupHost + ?Sized>(
    host: &mut H,
    weights: &WeightSet,
    replace: bool,
) -> Result<()> {
    let vertex_count = host.vertex_count();
    for (name, group) in weights {
        if let Some(index) = group.max_index() {
            if index as usize >= vertex_count {
                return Err(WeightFileError::VertexOutOfRange {
                    group: name.clone(),
                    index,
                    vertex_count,
                });
            }
        }
    }

    for (name, group) in weights {
        host.create_or_replace_group(name, &group.to_pairs(), replace);
        tracing::debug!(group = %name, entries = group.len(), replace, "applied vertex group");
    }
    Ok(())
}

/// Collect the groups of `host` and export them to `path`
pub fn export_mesh<H: VertexGroupHost + ?Sized>(
    host: &H,
    path: impl AsRef<Path>,
    metadata: &FileMetadata,
) -> Result<()> {
    let weights = collect_weights(host)?;
    export_file(path, metadata, &weights)
}

/// Import the weight file at `path` onto `host`
pub fn import_mesh<H: VertexGroupHost + ?Sized>(
    host: &mut H,
    path: impl AsRef<Path>,
    replace: bool,
) -> Result<DecodedFile> {
    let decoded = import_file(path)?;
    apply_weights(host, &decoded.weights, replace)?;
    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body() -> MemoryMesh {
        let mut mesh = MemoryMesh::new("Body", 8);
        mesh.assign("leftArm", 0, 0.5);
        mesh.assign("leftArm", 5, 0.8);
        mesh.assign("spine", 2, 1.0);
        mesh.add_group("unused");
        mesh
    }

    #[test]
    fn test_collect_weights() {
        let weights = collect_weights(&body()).unwrap();

        assert_eq!(weights.len(), 3);
        assert_eq!(
            weights.group("leftArm").unwrap().to_pairs(),
            vec![(0, 0.5), (5, 0.8)]
        );
        assert!(weights.group("unused").unwrap().is_empty());
    }

    #[test]
    fn test_collect_without_groups() {
        let mesh = MemoryMesh::new("Cube", 8);
        assert!(matches!(collect_weights(&mesh), Err(WeightFileError::NoGroups)));
    }

    #[test]
    fn test_apply_rejects_out_of_range_before_writing() {
        let mut mesh = body();
        let before = mesh.clone();

        let mut weights = WeightSet::new();
        weights.insert_group("aaa", GroupWeights::from([(1, 0.5)]));
        weights.insert_group("zzz", GroupWeights::from([(8, 0.5)]));

        let err = apply_weights(&mut mesh, &weights, true).unwrap_err();
        assert!(matches!(
            err,
            WeightFileError::VertexOutOfRange { index: 8, vertex_count: 8, .. }
        ));
        assert_eq!(mesh, before);
    }
}
