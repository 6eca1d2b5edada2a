// SPDX-FileCopyrightText: 2026 Catsync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Record transformer for catsync.
//!
//! Maps a CatalogIQ [`SourceRecord`](catsync_core::SourceRecord) to a
//! BigCommerce [`DestinationRecord`](catsync_core::DestinationRecord).
//! Everything here is pure: no I/O, no clocks, no randomness.

pub mod number;
pub mod product;

pub use number::clean_number;
pub use product::{accepts_custom_field, attribute_text, keep_variant, transform};
