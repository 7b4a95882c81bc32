// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! I/O module - encoding, decoding, and weight file access

mod decoder;
mod encoder;
mod file;

pub use decoder::{decode, DecodedFile};
pub use encoder::encode;
pub use file::{export_file, import_file, write_atomic};
