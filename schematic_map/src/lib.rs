// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Schematic Map: the document facade tying segment storage, the spatial
//! index, the viewport controller and the rasterizer into one map view.
//!
//! - [`document::Document`]: owns a loaded map and its live view state; the
//!   entry point for most callers.
//! - [`map_reader::read_map`]: decodes the map file format.
//! - [`bitmap::Bitmap`] / [`bitmap::ScopedLock`]: the host integration
//!   point `Document::generate_contents` renders into.
//! - [`diagnostics`]: optional `tracing`-backed logging, behind the
//!   `diagnostics` feature.
//! - [`config::EngineConfig`]: optional TOML-backed settings, behind the
//!   `config` feature.
//! - [`error::MapReadError`]: the one error type with variants callers may
//!   want to match on; everything else in this crate returns
//!   [`anyhow::Result`].
//!
//! Unlike the rest of the workspace, this crate is not `no_std`: it is the
//! application-facing facade, and owns the one place file I/O and logging
//! happen.

pub mod bitmap;
#[cfg(feature = "config")]
pub mod config;
pub mod diagnostics;
pub mod document;
pub mod error;
pub mod map_reader;

pub use bitmap::{Bitmap, ScopedLock};
pub use document::Document;
pub use error::MapReadError;
