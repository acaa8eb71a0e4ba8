//! Matrix members.
//!
//! Matrices are stored as columns, so most component-wise members are
//! written in terms of the column vectors' own operators and constructors.
use crate::{
    Error, MatrixShape,
    decl::{
        BinaryOp, Body, Constructor, ConstructorInit, Decl, Field, Meta, Mutability, Param,
        TraitImpl, UnaryOp,
    },
    formula::{self, Operand, matrix_literal},
    shape::{MAX_DIM, MIN_DIM, VectorShape, axis},
};

use super::{
    FnDecl, GenerateOptions, layout,
    operators::{ARITHMETIC, assign, binary, unary},
};

/// A struct literal of `shape` whose column `c` is `column(axis(c))`.
fn by_column(shape: MatrixShape, column: impl Fn(&str) -> String) -> String {
    let fields = (0..shape.cols())
        .map(|c| {
            let axis = axis(c);
            format!("{axis}: {}", column(&axis))
        })
        .collect::<Vec<_>>()
        .join(", ");
    format!("{} {{ {fields} }}", shape.name())
}

fn call_per_column(shape: MatrixShape, function: &str) -> String {
    let column = shape.column().name();
    let args = (0..shape.cols())
        .map(|_| format!("{column}::{function}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("Self::from_cols({args})")
}

pub(crate) fn core(shape: MatrixShape, _options: &GenerateOptions) -> Result<Vec<Decl>, Error> {
    let kind = shape.kind();
    let scalar = shape.scalar();
    let column = shape.column();
    let axes = (0..shape.cols()).map(axis).collect::<Vec<_>>();
    let mut decls = vec![];

    for (c, name) in axes.iter().enumerate() {
        decls.push(Decl::Field(Field {
            meta: Meta::new(name).doc(format!("Column {c}.")),
            ty: column.name(),
            mutability: Mutability::Mutable,
            value: None,
        }));
    }

    decls.push(Decl::Field(Field {
        meta: Meta::new("ZERO").doc("All zeroes.").static_(),
        ty: "Self".into(),
        mutability: Mutability::Const,
        value: Some(by_column(shape, |_| format!("{}::ZERO", column.name()))),
    }));
    if shape.is_square() {
        let grid = (0..shape.cols())
            .map(|c| {
                (0..shape.rows())
                    .map(|r| if c == r { kind.one() } else { kind.zero() }.to_string())
                    .collect()
            })
            .collect::<Vec<_>>();
        decls.push(Decl::Field(Field {
            meta: Meta::new("IDENTITY")
                .doc("Ones on the diagonal, zeroes elsewhere.")
                .static_(),
            ty: "Self".into(),
            mutability: Mutability::Const,
            value: Some(matrix_literal(shape, &grid)),
        }));
    }

    decls.push(Decl::Constructor(Constructor {
        meta: Meta::new("from_cols")
            .doc("Creates a matrix from its columns.")
            .static_(),
        params: axes.iter().map(|a| Param::new(a, column.name())).collect(),
        init: ConstructorInit::Body(Body::Expr(format!("Self {{ {} }}", axes.join(", ")))),
        is_const: true,
    }));
    let cell_names = (0..shape.cols())
        .map(|c| (0..shape.rows()).map(|r| format!("m{c}{r}")).collect::<Vec<_>>())
        .collect::<Vec<_>>();
    decls.push(Decl::Constructor(Constructor {
        meta: Meta::new("new")
            .doc("Creates a matrix from its cells in column-major order: `mCR` is column `C`, row `R`.")
            .static_(),
        params: cell_names.iter().flatten().map(|m| Param::new(m, scalar)).collect(),
        init: ConstructorInit::Delegate(format!(
            "Self::from_cols({})",
            cell_names
                .iter()
                .map(|col| format!("{}::new({})", column.name(), col.join(", ")))
                .collect::<Vec<_>>()
                .join(", ")
        )),
        is_const: true,
    }));
    decls.push(Decl::Constructor(Constructor {
        meta: Meta::new("splat")
            .doc("Creates a matrix with every cell set to `v`.")
            .static_(),
        params: vec![Param::new("v", scalar)],
        init: ConstructorInit::Delegate(call_per_column(shape, "splat(v)")),
        is_const: true,
    }));

    decls.push(
        FnDecl::new("col")
            .doc("Column `index`.\n\n# Panics\n\nPanics if `index` is out of bounds.")
            .param("index", "usize")
            .ret(column.name())
            .expr("self[index]")
            .build(),
    );
    let row = shape.row();
    decls.push(
        FnDecl::new("row")
            .doc("Row `index`.\n\n# Panics\n\nPanics if `index` is out of bounds.")
            .param("index", "usize")
            .ret(row.name())
            .expr(format!(
                "{}::new({})",
                row.name(),
                axes.iter()
                    .map(|a| format!("self.{a}[index]"))
                    .collect::<Vec<_>>()
                    .join(", ")
            ))
            .build(),
    );

    let arms = |mutable: bool| {
        let borrow = if mutable { "&mut " } else { "&" };
        let mut lines = vec!["match index {".to_string()];
        for (c, a) in axes.iter().enumerate() {
            lines.push(format!("    {c} => {borrow}self.{a},"));
        }
        lines.push(format!(
            "    _ => panic!(\"index out of bounds: {} has {} columns but the index is {{index}}\"),",
            shape.name(),
            shape.cols()
        ));
        lines.push("}".into());
        lines
    };
    decls.extend(layout::indexers(&shape.name(), &column.name(), arms(false), arms(true)));
    Ok(decls)
}

pub(crate) fn operators(shape: MatrixShape, _options: &GenerateOptions) -> Result<Vec<Decl>, Error> {
    let kind = shape.kind();
    let name = shape.name();
    let scalar = shape.scalar();
    let mut decls = vec![];

    for op in [BinaryOp::Add, BinaryOp::Sub] {
        let symbol = op.symbol();
        decls.push(binary(
            op,
            &name,
            &name,
            &name,
            by_column(shape, |a| format!("self.{a} {symbol} rhs.{a}")),
        ));
        decls.push(assign(op, &name, &name));
    }
    for (op, _) in ARITHMETIC {
        let symbol = op.symbol();
        decls.push(binary(
            op,
            &name,
            scalar,
            &name,
            by_column(shape, |a| format!("self.{a} {symbol} rhs")),
        ));
        decls.push(binary(
            op,
            scalar,
            &name,
            &name,
            by_column(shape, |a| format!("self {symbol} rhs.{a}")),
        ));
        decls.push(assign(op, &name, scalar));
    }
    if kind.capabilities().is_signed {
        decls.push(unary(UnaryOp::Neg, &name, by_column(shape, |a| format!("-self.{a}"))));
    }

    // Linear-algebra products.
    for cols in MIN_DIM..=MAX_DIM {
        let rhs = MatrixShape::new(kind, cols, shape.cols())?;
        decls.push(binary(
            BinaryOp::Mul,
            &name,
            &rhs.name(),
            &MatrixShape::new(kind, cols, shape.rows())?.name(),
            formula::product_expr(("self", Operand::Matrix(shape)), ("rhs", Operand::Matrix(rhs)))?,
        ));
    }
    if shape.is_square() {
        decls.push(assign(BinaryOp::Mul, &name, &name));
    }
    let column = shape.column();
    let row = shape.row();
    decls.push(binary(
        BinaryOp::Mul,
        &name,
        &row.name(),
        &column.name(),
        formula::product_expr(("self", Operand::Matrix(shape)), ("rhs", Operand::Column(row)))?,
    ));
    decls.push(binary(
        BinaryOp::Mul,
        &column.name(),
        &name,
        &row.name(),
        formula::product_expr(("self", Operand::Row(column)), ("rhs", Operand::Matrix(shape)))?,
    ));
    Ok(decls)
}

pub(crate) fn algebra(shape: MatrixShape, _options: &GenerateOptions) -> Result<Vec<Decl>, Error> {
    let transposed = shape.transposed();
    let mut decls = vec![
        FnDecl::new("transpose")
            .doc(format!("Swaps rows and columns, giving a `{}`.", transposed.hlsl_name()))
            .ret(transposed.name())
            .expr(matrix_literal(transposed, &formula::transpose(shape, "self")))
            .build(),
        FnDecl::new("mul_elem")
            .doc("Component-wise product. `*` between matrices is the matrix product.")
            .param("rhs", "Self")
            .ret("Self")
            .expr(by_column(shape, |a| format!("self.{a} * rhs.{a}")))
            .build(),
        FnDecl::new("div_elem")
            .doc("Component-wise quotient.")
            .param("rhs", "Self")
            .ret("Self")
            .expr(by_column(shape, |a| format!("self.{a} / rhs.{a}")))
            .build(),
    ];
    if let Some(scalar) = determinant_scalar(shape) {
        let grid = (0..shape.cols())
            .map(|c| (0..shape.rows()).map(|r| shape.cell("self", c, r)).collect())
            .collect::<Vec<_>>();
        decls.push(
            FnDecl::new("determinant")
                .doc("The determinant.")
                .ret(scalar)
                .expr(formula::determinant(shape.kind(), &grid))
                .build(),
        );
    }
    Ok(decls)
}

fn determinant_scalar(shape: MatrixShape) -> Option<&'static str> {
    (shape.is_square() && shape.kind().capabilities().is_floating_point).then(|| shape.scalar())
}

/// `Transpose` and `Determinant` trait implementations forwarding to the
/// inherent members.
pub(crate) fn function_traits(shape: MatrixShape, options: &GenerateOptions) -> Result<Vec<Decl>, Error> {
    let name = shape.name();
    let mut decls = vec![
        FnDecl::new("transpose")
            .ret("Self::Output")
            .expr(format!("{name}::transpose(self)"))
            .implements(
                TraitImpl::new(options.function_trait("Transpose"))
                    .with_type("Output", shape.transposed().name()),
            )
            .build(),
    ];
    if let Some(scalar) = determinant_scalar(shape) {
        decls.push(
            FnDecl::new("determinant")
                .ret("Self::Scalar")
                .expr(format!("{name}::determinant(self)"))
                .implements(
                    TraitImpl::new(options.function_trait("Determinant")).with_type("Scalar", scalar),
                )
                .build(),
        );
    }
    Ok(decls)
}

/// `OuterProduct` on column vectors, one implementation per row length.
pub(crate) fn outer_product_traits(
    shape: VectorShape,
    options: &GenerateOptions,
) -> Result<Vec<Decl>, Error> {
    if !shape.kind().capabilities().has_arithmetic {
        return Ok(vec![]);
    }
    (MIN_DIM..=MAX_DIM)
        .map(|len| {
            let row = VectorShape::new(shape.kind(), len)?;
            let matrix = MatrixShape::new(shape.kind(), len, shape.len())?;
            Ok(FnDecl::new("outer_product")
                .param("row", row.name())
                .ret("Self::Output")
                .expr(format!("{}::outer_product(self, row)", matrix.name()))
                .implements(
                    TraitImpl::new(options.function_trait(&format!("OuterProduct<{}>", row.name())))
                        .with_type("Output", matrix.name()),
                )
                .build())
        })
        .collect()
}
