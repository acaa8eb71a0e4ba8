//! Generates HLSL-style vector and matrix value types as Rust source.
//!
//! The generator is organised as a pipeline:
//!
//! 1. [`registry::TypeRegistry`] enumerates every scalar kind and shape
//!    combination once.
//! 2. The category generators in [`generators`] turn each shape into an
//!    ordered list of [`decl::Decl`] nodes, gated by the scalar kind's
//!    [`scalar::Capabilities`].
//! 3. [`render`] turns those nodes into Rust source text.
//! 4. [`driver::Driver`] assembles the output artifacts and writes them
//!    only when their content changed.
//!
//! ```rust, ignore
//! let driver = hlsl_rs_gen::Driver::new(GenerateOptions::default())?;
//! let report = driver.run(out_dir)?;
//! log::info!("{} written, {} unchanged", report.written.len(), report.unchanged.len());
//! ```
use snafu::prelude::*;

pub mod decl;
pub mod driver;
pub mod formula;
pub mod generators;
pub mod registry;
pub mod render;
pub mod scalar;
pub mod shape;
pub mod template;

pub use driver::{Driver, Report};
pub use generators::GenerateOptions;
pub use registry::TypeRegistry;
pub use scalar::ScalarKind;
pub use shape::{MatrixShape, Shape, VectorShape};

/// Everything that can abort a generator run.
///
/// All of these are fatal. Rendering finishes before the first write, so a
/// failed run never leaves a partially written artifact behind.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("Unsupported shape: {kind:?} {dims} ({reason})"))]
    UnsupportedShape {
        kind: ScalarKind,
        dims: String,
        reason: &'static str,
    },

    #[snafu(display(
        "Inner dimensions do not match: left has {left_cols} columns, right has {right_rows} rows"
    ))]
    ShapeMismatch { left_cols: usize, right_rows: usize },

    #[snafu(display("Malformed formula template '{template}': {reason}"))]
    MalformedTemplate { template: String, reason: String },

    #[snafu(display("{ty} declares '{member}' more than once"))]
    DuplicateMember { ty: String, member: String },

    #[snafu(display("{ty} has a declaration that cannot be rendered: {note}"))]
    UnsupportedDecl { ty: String, note: String },

    #[snafu(display("Rendered artifact '{artifact}' is not valid Rust: {source}"))]
    MalformedOutput {
        artifact: String,
        source: syn::Error,
    },

    #[snafu(display("Could not create output directory {}: {source}", path.display()))]
    CreateDir {
        path: std::path::PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("Could not read {}: {source}", path.display()))]
    ReadFile {
        path: std::path::PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("Could not write {}: {source}", path.display()))]
    WriteFile {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
}
