// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Weights module - vertex group data model, metadata and rounding

mod metadata;
mod model;
mod rounding;

pub use metadata::{FileHeader, FileMetadata, COLUMNS_RANGE, PRECISION_RANGE};
pub use model::{GroupWeights, WeightSet};
pub use rounding::{round_weight, RoundedWeight};
