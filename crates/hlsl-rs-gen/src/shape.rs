//! Vector and matrix shape descriptors.
use snafu::prelude::*;

use crate::{Error, ScalarKind, UnsupportedShapeSnafu};

/// Smallest supported vector length, column count and row count.
pub const MIN_DIM: usize = 2;
/// Largest supported vector length, column count and row count.
pub const MAX_DIM: usize = 4;

/// Positional component names, in declaration and memory order.
pub const COMPONENTS: [&str; MAX_DIM] = ["x", "y", "z", "w"];
/// Color-style aliases for [`COMPONENTS`].
pub const COLOR_COMPONENTS: [&str; MAX_DIM] = ["r", "g", "b", "a"];

/// Name of the field holding matrix column `col`.
pub fn axis(col: usize) -> String {
    format!("{}_axis", COMPONENTS[col])
}

fn check_dim(kind: ScalarKind, dims: impl Fn() -> String, dim: usize) -> Result<(), Error> {
    ensure!(
        (MIN_DIM..=MAX_DIM).contains(&dim),
        UnsupportedShapeSnafu {
            kind,
            dims: dims(),
            reason: "dimensions must be within 2..=4",
        }
    );
    Ok(())
}

/// A vector of `len` components of one scalar kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VectorShape {
    kind: ScalarKind,
    len: usize,
}

impl VectorShape {
    pub fn new(kind: ScalarKind, len: usize) -> Result<Self, Error> {
        check_dim(kind, || len.to_string(), len)?;
        Ok(Self { kind, len })
    }

    pub fn kind(&self) -> ScalarKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// The same length with a different scalar kind.
    pub fn with_kind(&self, kind: ScalarKind) -> VectorShape {
        VectorShape { kind, len: self.len }
    }

    /// The boolean vector that component-wise predicates return.
    pub fn mask(&self) -> VectorShape {
        self.with_kind(ScalarKind::Bool)
    }

    /// Rust type name, e.g. `Float3`.
    pub fn name(&self) -> String {
        format!("{}{}", self.kind.type_prefix(), self.len)
    }

    /// HLSL type name, e.g. `float3`.
    pub fn hlsl_name(&self) -> String {
        format!("{}{}", self.kind.hlsl_name(), self.len)
    }

    /// Component field names, in declaration order.
    pub fn components(&self) -> &'static [&'static str] {
        &COMPONENTS[..self.len]
    }

    pub fn color_components(&self) -> &'static [&'static str] {
        &COLOR_COMPONENTS[..self.len]
    }

    pub fn scalar(&self) -> &'static str {
        self.kind.rust_type()
    }
}

/// A column-major matrix with `cols` columns of `rows` components.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MatrixShape {
    kind: ScalarKind,
    cols: usize,
    rows: usize,
}

impl MatrixShape {
    pub fn new(kind: ScalarKind, cols: usize, rows: usize) -> Result<Self, Error> {
        let dims = || format!("{cols}x{rows}");
        check_dim(kind, dims, cols)?;
        check_dim(kind, dims, rows)?;
        ensure!(
            kind.capabilities().has_arithmetic,
            UnsupportedShapeSnafu {
                kind,
                dims: dims(),
                reason: "matrices require a scalar kind with arithmetic",
            }
        );
        Ok(Self { kind, cols, rows })
    }

    pub fn kind(&self) -> ScalarKind {
        self.kind
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn is_square(&self) -> bool {
        self.cols == self.rows
    }

    /// Rust type name, e.g. `Float2x3`.
    pub fn name(&self) -> String {
        format!("{}{}x{}", self.kind.type_prefix(), self.cols, self.rows)
    }

    /// HLSL type name, e.g. `float2x3`.
    pub fn hlsl_name(&self) -> String {
        format!("{}{}x{}", self.kind.hlsl_name(), self.cols, self.rows)
    }

    /// The shape of one column.
    pub fn column(&self) -> VectorShape {
        VectorShape {
            kind: self.kind,
            len: self.rows,
        }
    }

    /// The shape of one row.
    pub fn row(&self) -> VectorShape {
        VectorShape {
            kind: self.kind,
            len: self.cols,
        }
    }

    pub fn transposed(&self) -> MatrixShape {
        MatrixShape {
            kind: self.kind,
            cols: self.rows,
            rows: self.cols,
        }
    }

    pub fn with_kind(&self, kind: ScalarKind) -> Result<MatrixShape, Error> {
        MatrixShape::new(kind, self.cols, self.rows)
    }

    /// Linear offset of the cell at (`col`, `row`) in column-major storage.
    pub fn offset(&self, col: usize, row: usize) -> usize {
        col * self.rows + row
    }

    pub fn cell_count(&self) -> usize {
        self.cols * self.rows
    }

    /// Expression addressing the cell at (`col`, `row`) of `operand`.
    pub fn cell(&self, operand: &str, col: usize, row: usize) -> String {
        format!("{operand}.{}.{}", axis(col), COMPONENTS[row])
    }

    pub fn scalar(&self) -> &'static str {
        self.kind.rust_type()
    }
}

/// Any generated type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Shape {
    Vector(VectorShape),
    Matrix(MatrixShape),
}

impl Shape {
    pub fn kind(&self) -> ScalarKind {
        match self {
            Shape::Vector(v) => v.kind(),
            Shape::Matrix(m) => m.kind(),
        }
    }

    pub fn name(&self) -> String {
        match self {
            Shape::Vector(v) => v.name(),
            Shape::Matrix(m) => m.name(),
        }
    }

    pub fn hlsl_name(&self) -> String {
        match self {
            Shape::Vector(v) => v.hlsl_name(),
            Shape::Matrix(m) => m.hlsl_name(),
        }
    }

    /// Doc comment for the generated type.
    pub fn doc(&self) -> String {
        match self {
            Shape::Vector(v) => format!(
                "A {}-component vector of `{}`, HLSL `{}`.",
                v.len(),
                v.scalar(),
                v.hlsl_name()
            ),
            Shape::Matrix(m) => format!(
                "A column-major matrix of `{}` with {} columns and {} rows, HLSL `{}`.",
                m.scalar(),
                m.cols(),
                m.rows(),
                m.hlsl_name()
            ),
        }
    }
}

impl From<VectorShape> for Shape {
    fn from(value: VectorShape) -> Self {
        Shape::Vector(value)
    }
}

impl From<MatrixShape> for Shape {
    fn from(value: MatrixShape) -> Self {
        Shape::Matrix(value)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn sanity_vector_names() {
        let v = VectorShape::new(ScalarKind::Float, 3).unwrap();
        assert_eq!("Float3", v.name());
        assert_eq!("float3", v.hlsl_name());
        assert_eq!(&["x", "y", "z"], v.components());
        assert_eq!("Bool3", v.mask().name());
    }

    #[test]
    fn sanity_vector_out_of_range() {
        assert!(VectorShape::new(ScalarKind::Int, 1).is_err());
        assert!(VectorShape::new(ScalarKind::Int, 5).is_err());
    }

    #[test]
    fn sanity_matrix_addressing() {
        let m = MatrixShape::new(ScalarKind::Float, 3, 2).unwrap();
        assert_eq!("Float3x2", m.name());
        assert_eq!("Float2", m.column().name());
        assert_eq!("Float3", m.row().name());
        assert_eq!("Float2x3", m.transposed().name());
        assert_eq!(3, m.offset(1, 1));
        assert_eq!(5, m.offset(2, 1));
        assert_eq!("self.z_axis.y", m.cell("self", 2, 1));
    }

    #[test]
    fn sanity_bool_matrix_is_rejected() {
        let err = MatrixShape::new(ScalarKind::Bool, 2, 2).unwrap_err();
        assert!(matches!(err, Error::UnsupportedShape { .. }));
    }
}
