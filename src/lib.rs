// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! MakeHuman weight files
//!
//! Encodes a mesh's vertex group weights into the `.mhw` text format and
//! decodes such files back into named groups. The mesh itself lives in the
//! host application and is reached through [`host::VertexGroupHost`].

pub mod cli;
pub mod config;
pub mod error;
pub mod host;
pub mod io;
pub mod weights;

pub use error::{Result, Severity, WeightFileError};
pub use host::{apply_weights, collect_weights, MemoryMesh, VertexGroupHost};
pub use io::{decode, encode, export_file, import_file, DecodedFile};
pub use weights::{FileHeader, FileMetadata, GroupWeights, WeightSet};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_roundtrip() {
        let mut weights = WeightSet::new();
        weights.insert_group("leftArm", GroupWeights::from([(0, 0.5), (5, 0.8)]));

        let text = encode(&FileMetadata::default(), &weights).unwrap();
        assert_eq!(decode(&text).unwrap().weights, weights);
    }
}
