//! HLSL vector and matrix types in Rust.
//!
//! Every built-in HLSL vector (`bool2` through `double4`) and non-boolean
//! matrix (`int2x2` through `double4x4`) has a `#[repr(C)]` value type here,
//! named in upper camel case: `float3` is [`Float3`] and `uint4x2` is
//! [`UInt4x2`]. The types are generated by `hlsl-rs-gen` when this crate
//! is built.
//!
//! Matrices are stored as columns. `FloatCxR` has `C` columns of `FloatR`,
//! so `m[c].y` is the cell in column `c`, row 1. `*` between matrices and
//! vectors is the matrix product, as in [`functions::mul`].
//!
//! ```rust
//! use hlsl_rs::{functions::*, *};
//!
//! let m = Float2x2::new(1.0, 2.0, 3.0, 4.0);
//! let v = Float2::new(1.0, 1.0);
//! assert_eq!(Float2::new(4.0, 6.0), mul(m, v));
//! assert_eq!(Float2::new(0.5, 1.0), saturate(Float2::new(0.5, 2.0)));
//! ```

#[allow(unused_parens, clippy::all)]
mod generated {
    include!(concat!(env!("OUT_DIR"), "/mod.rs"));
}
pub use generated::*;

pub mod functions;

mod glam_interop;

pub mod registry {
    //! The generated types by HLSL name.
    //!
    //! ```rust
    //! assert_eq!(Some("hlsl_rs::Float3x4"), hlsl_rs::registry::lookup_type("float3x4"));
    //! assert_eq!(None, hlsl_rs::registry::lookup_type("bool2x2"));
    //! ```
    include!(concat!(env!("OUT_DIR"), "/registry.rs"));
}

#[cfg(test)]
mod test;
