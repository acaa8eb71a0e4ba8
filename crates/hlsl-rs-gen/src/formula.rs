//! Linear-algebra formula assembly.
//!
//! Every formula here is a pure function of the operand shapes. Cells are
//! addressed through [`Operand::cell`], so a vector taking part in a
//! product is just a matrix with a single column or a single row.
use snafu::prelude::*;

use crate::{
    Error, ScalarKind, ShapeMismatchSnafu,
    scalar::Arith,
    shape::{COMPONENTS, MatrixShape, VectorShape, axis},
};

/// Cell expressions indexed as `grid[col][row]`.
pub type Grid = Vec<Vec<String>>;

/// One side of a product.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operand {
    Matrix(MatrixShape),
    /// A vector viewed as a matrix with one column.
    Column(VectorShape),
    /// A vector viewed as a matrix with one row.
    Row(VectorShape),
}

impl Operand {
    pub fn kind(&self) -> ScalarKind {
        match self {
            Operand::Matrix(m) => m.kind(),
            Operand::Column(v) | Operand::Row(v) => v.kind(),
        }
    }

    pub fn cols(&self) -> usize {
        match self {
            Operand::Matrix(m) => m.cols(),
            Operand::Column(_) => 1,
            Operand::Row(v) => v.len(),
        }
    }

    pub fn rows(&self) -> usize {
        match self {
            Operand::Matrix(m) => m.rows(),
            Operand::Column(v) => v.len(),
            Operand::Row(_) => 1,
        }
    }

    /// Expression addressing (`col`, `row`) of the operand named `name`.
    pub fn cell(&self, name: &str, col: usize, row: usize) -> String {
        match self {
            Operand::Matrix(m) => m.cell(name, col, row),
            Operand::Column(_) => format!("{name}.{}", COMPONENTS[row]),
            Operand::Row(_) => format!("{name}.{}", COMPONENTS[col]),
        }
    }
}

/// `result[c, r] = sum over k of lhs[k, r] * rhs[c, k]`.
///
/// The inner dimensions (columns of `lhs`, rows of `rhs`) must match.
pub fn product(lhs: (&str, Operand), rhs: (&str, Operand)) -> Result<Grid, Error> {
    let (lhs_name, lhs) = lhs;
    let (rhs_name, rhs) = rhs;
    ensure!(
        lhs.cols() == rhs.rows(),
        ShapeMismatchSnafu {
            left_cols: lhs.cols(),
            right_rows: rhs.rows(),
        }
    );
    let kind = lhs.kind();
    let grid = (0..rhs.cols())
        .map(|c| {
            (0..lhs.rows())
                .map(|r| {
                    (0..lhs.cols())
                        .map(|k| {
                            kind.arith(
                                Arith::Mul,
                                &lhs.cell(lhs_name, k, r),
                                &rhs.cell(rhs_name, c, k),
                            )
                        })
                        .reduce(|acc, term| kind.arith(Arith::Add, &acc, &term))
                        .unwrap_or_else(|| kind.zero().to_string())
                })
                .collect()
        })
        .collect();
    Ok(grid)
}

/// The product rendered as a value of its result type: a vector when one
/// side was a vector, otherwise a matrix.
pub fn product_expr(lhs: (&str, Operand), rhs: (&str, Operand)) -> Result<String, Error> {
    let kind = lhs.1.kind();
    let grid = product(lhs, rhs)?;
    let cols = grid.len();
    let rows = grid.first().map(Vec::len).unwrap_or_default();
    if cols == 1 {
        let shape = VectorShape::new(kind, rows)?;
        Ok(vector_literal(shape, &grid[0]))
    } else if rows == 1 {
        let shape = VectorShape::new(kind, cols)?;
        let components = grid.into_iter().flatten().collect::<Vec<_>>();
        Ok(vector_literal(shape, &components))
    } else {
        let shape = MatrixShape::new(kind, cols, rows)?;
        Ok(matrix_literal(shape, &grid))
    }
}

/// Cells of the transpose of `shape`, read from the operand named `name`.
pub fn transpose(shape: MatrixShape, name: &str) -> Grid {
    (0..shape.rows())
        .map(|c| (0..shape.cols()).map(|r| shape.cell(name, r, c)).collect())
        .collect()
}

/// Cells of the outer product of `column` and `row`:
/// `m[c, r] = column[r] * row[c]`.
pub fn outer_product(
    column: (&str, VectorShape),
    row: (&str, VectorShape),
) -> Result<Grid, Error> {
    product(
        (column.0, Operand::Column(column.1)),
        (row.0, Operand::Row(row.1)),
    )
}

/// Cofactor expansion of a square grid along its first column.
pub fn determinant(kind: ScalarKind, grid: &[Vec<String>]) -> String {
    match grid.len() {
        0 => kind.one().to_string(),
        1 => grid[0][0].clone(),
        2 => kind.arith(
            Arith::Sub,
            &kind.arith(Arith::Mul, &grid[0][0], &grid[1][1]),
            &kind.arith(Arith::Mul, &grid[1][0], &grid[0][1]),
        ),
        n => {
            let mut acc: Option<String> = None;
            for r in 0..n {
                let minor = grid[1..]
                    .iter()
                    .map(|col| {
                        col.iter()
                            .enumerate()
                            .filter(|(i, _)| *i != r)
                            .map(|(_, cell)| cell.clone())
                            .collect::<Vec<_>>()
                    })
                    .collect::<Vec<_>>();
                let term = kind.arith(Arith::Mul, &grid[0][r], &determinant(kind, &minor));
                acc = Some(match acc {
                    None => term,
                    Some(acc) if r % 2 == 0 => kind.arith(Arith::Add, &acc, &term),
                    Some(acc) => kind.arith(Arith::Sub, &acc, &term),
                });
            }
            acc.unwrap_or_else(|| kind.zero().to_string())
        }
    }
}

/// A struct literal of `shape` from its components, in order.
pub fn vector_literal(shape: VectorShape, components: &[String]) -> String {
    let fields = shape
        .components()
        .iter()
        .zip(components)
        .map(|(name, value)| format!("{name}: {value}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{} {{ {fields} }}", shape.name())
}

/// A struct literal of `shape` from `grid[col][row]`.
pub fn matrix_literal(shape: MatrixShape, grid: &[Vec<String>]) -> String {
    let column = shape.column();
    let fields = grid
        .iter()
        .enumerate()
        .map(|(c, cells)| format!("{}: {}", axis(c), vector_literal(column, cells)))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{} {{ {fields} }}", shape.name())
}

#[cfg(test)]
mod test {
    use super::*;

    fn float_mat(cols: usize, rows: usize) -> MatrixShape {
        MatrixShape::new(ScalarKind::Float, cols, rows).unwrap()
    }

    #[test]
    fn sanity_mat2_times_vec2() {
        let m = float_mat(2, 2);
        let v = VectorShape::new(ScalarKind::Float, 2).unwrap();
        let expr = product_expr(("self", Operand::Matrix(m)), ("rhs", Operand::Column(v))).unwrap();
        assert_eq!(
            "Float2 { x: ((self.x_axis.x * rhs.x) + (self.y_axis.x * rhs.y)), \
             y: ((self.x_axis.y * rhs.x) + (self.y_axis.y * rhs.y)) }",
            expr
        );
    }

    #[test]
    fn sanity_product_shape() {
        // 3 columns x 2 rows times 4 columns x 3 rows is 4 columns x 2 rows.
        let grid = product(
            ("a", Operand::Matrix(float_mat(3, 2))),
            ("b", Operand::Matrix(float_mat(4, 3))),
        )
        .unwrap();
        assert_eq!(4, grid.len());
        assert!(grid.iter().all(|col| col.len() == 2));
        assert_eq!(
            "(((a.x_axis.y * b.w_axis.x) + (a.y_axis.y * b.w_axis.y)) + (a.z_axis.y * b.w_axis.z))",
            grid[3][1]
        );
    }

    #[test]
    fn sanity_product_mismatch() {
        let err = product(
            ("a", Operand::Matrix(float_mat(3, 2))),
            ("b", Operand::Matrix(float_mat(2, 2))),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            Error::ShapeMismatch {
                left_cols: 3,
                right_rows: 2
            }
        ));
    }

    #[test]
    fn sanity_vector_times_matrix() {
        let v = VectorShape::new(ScalarKind::Int, 2).unwrap();
        let m = MatrixShape::new(ScalarKind::Int, 3, 2).unwrap();
        let expr = product_expr(("self", Operand::Row(v)), ("rhs", Operand::Matrix(m))).unwrap();
        assert!(expr.starts_with("Int3 { x: self.x.wrapping_mul(rhs.x_axis.x)"));
    }

    #[test]
    fn sanity_transpose_addressing() {
        let grid = transpose(float_mat(3, 2), "m");
        assert_eq!(2, grid.len());
        assert_eq!(vec!["m.x_axis.y", "m.y_axis.y", "m.z_axis.y"], grid[1]);
    }

    #[test]
    fn sanity_outer_product() {
        let column = VectorShape::new(ScalarKind::Float, 2).unwrap();
        let row = VectorShape::new(ScalarKind::Float, 3).unwrap();
        let grid = outer_product(("c", column), ("r", row)).unwrap();
        assert_eq!(3, grid.len());
        assert_eq!("(c.y * r.x)", grid[0][1]);
    }

    #[test]
    fn sanity_determinant_2x2() {
        let grid = vec![
            vec!["a".to_string(), "b".to_string()],
            vec!["c".to_string(), "d".to_string()],
        ];
        assert_eq!(
            "((a * d) - (c * b))",
            determinant(ScalarKind::Float, &grid)
        );
    }

    #[test]
    fn sanity_determinant_3x3_terms() {
        let grid = transpose(float_mat(3, 3), "m");
        let det = determinant(ScalarKind::Float, &grid);
        assert!(syn::parse_str::<syn::Expr>(&det).is_ok());
        // Three 2x2 minors with one subtraction each, joined by `- +`.
        assert_eq!(4, det.matches(" - ").count());
        assert_eq!(1, det.matches(" + ").count());
    }
}
