//! The registry of every generated type.
use std::collections::HashMap;

use crate::{
    Error, ScalarKind,
    shape::{MAX_DIM, MIN_DIM, MatrixShape, Shape, VectorShape},
};

/// Every valid (kind, shape) combination, built once per generator run.
///
/// Shapes are kept in registration order: all vectors (by kind, then length)
/// followed by all matrices (by kind, then columns, then rows).
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    shapes: Vec<Shape>,
    by_name: HashMap<String, usize>,
}

impl TypeRegistry {
    /// Builds the registry from the declared scalar kinds and dimension
    /// ranges.
    pub fn build() -> Result<Self, Error> {
        let mut shapes = vec![];
        for kind in ScalarKind::ALL {
            for len in MIN_DIM..=MAX_DIM {
                shapes.push(Shape::Vector(VectorShape::new(kind, len)?));
            }
        }
        for kind in ScalarKind::ALL {
            if !kind.capabilities().has_arithmetic {
                continue;
            }
            for cols in MIN_DIM..=MAX_DIM {
                for rows in MIN_DIM..=MAX_DIM {
                    shapes.push(Shape::Matrix(MatrixShape::new(kind, cols, rows)?));
                }
            }
        }
        Ok(Self::from_shapes(shapes))
    }

    fn from_shapes(shapes: Vec<Shape>) -> Self {
        let mut by_name = HashMap::with_capacity(shapes.len() * 2);
        for (i, shape) in shapes.iter().enumerate() {
            by_name.insert(shape.name(), i);
            by_name.insert(shape.hlsl_name(), i);
        }
        Self { shapes, by_name }
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn vectors(&self) -> impl Iterator<Item = VectorShape> + '_ {
        self.shapes.iter().filter_map(|shape| match shape {
            Shape::Vector(v) => Some(*v),
            Shape::Matrix(_) => None,
        })
    }

    pub fn matrices(&self) -> impl Iterator<Item = MatrixShape> + '_ {
        self.shapes.iter().filter_map(|shape| match shape {
            Shape::Matrix(m) => Some(*m),
            Shape::Vector(_) => None,
        })
    }

    /// Looks up a shape by its Rust name (`Float3`) or HLSL name (`float3`).
    ///
    /// A miss means the name is not a built-in numeric type.
    pub fn get(&self, name: &str) -> Option<Shape> {
        self.by_name.get(name).map(|i| self.shapes[*i])
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}
