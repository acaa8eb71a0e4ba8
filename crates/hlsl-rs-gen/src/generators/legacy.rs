//! Hashing, equality, collection constructors and raw-array extraction.
use crate::{
    Error, MatrixShape,
    decl::{Body, Cast, CastKind, Decl, Meta, Receiver, TraitImpl},
    formula::{matrix_literal, outer_product, vector_literal},
    shape::{VectorShape, axis},
};

use super::{FnDecl, GenerateOptions};

/// `hash_code` folding `cells` in order.
fn hash_code(kind: crate::ScalarKind, cells: &[String]) -> Decl {
    let mut lines = vec![];
    for (i, cell) in cells.iter().enumerate() {
        let hash = kind.component_hash(cell);
        if i == 0 {
            lines.push(format!("let mut hash: u64 = {hash};"));
        } else {
            lines.push(format!(
                "hash = hash.wrapping_mul({:#x}) ^ {hash};",
                kind.hash_multiplier()
            ));
        }
    }
    lines.push("hash".into());
    FnDecl::new("hash_code")
        .doc("Hash of the components, stable across runs and platforms.")
        .receiver(Receiver::Ref)
        .ret("u64")
        .block(lines)
        .build()
}

fn partial_eq(fields: &[String]) -> Decl {
    let expr = fields
        .iter()
        .map(|f| format!("self.{f} == other.{f}"))
        .collect::<Vec<_>>()
        .join(" && ");
    FnDecl::new("eq")
        .receiver(Receiver::Ref)
        .param("other", "&Self")
        .ret("bool")
        .expr(expr)
        .implements(TraitImpl::new("PartialEq"))
        .build()
}

fn hash(kind: crate::ScalarKind) -> Option<Decl> {
    if kind.capabilities().is_floating_point {
        return None;
    }
    Some(
        FnDecl::new("hash")
            .receiver(Receiver::Ref)
            .generics("H: std::hash::Hasher")
            .param("state", "&mut H")
            .block(vec!["state.write_u64(self.hash_code());".into()])
            .implements(TraitImpl::new("std::hash::Hash"))
            .build(),
    )
}

/// `from_slice` and `FromIterator` over `cells`, in order. Missing values
/// are zero and extra values are ignored.
fn collection_constructors(
    scalar: &str,
    zero: &str,
    literal: impl Fn(&[String]) -> String,
    cells: usize,
    order: &str,
) -> [Decl; 2] {
    let from_slice = (0..cells)
        .map(|i| format!("values.get({i}).copied().unwrap_or({zero})"))
        .collect::<Vec<_>>();
    let from_iter = vec![format!("iter.next().unwrap_or({zero})"); cells];
    [
        FnDecl::new("from_slice")
            .doc(format!(
                "Creates a value from a slice in {order} order. Missing values are zero and \
                 extra values are ignored."
            ))
            .static_()
            .param("values", format!("&[{scalar}]"))
            .ret("Self")
            .expr(literal(&from_slice))
            .build(),
        FnDecl::new("from_iter")
            .static_()
            .generics(format!("I: IntoIterator<Item = {scalar}>"))
            .param("iter", "I")
            .ret("Self")
            .block(vec!["let mut iter = iter.into_iter();".into(), literal(&from_iter)])
            .implements(TraitImpl::new(format!("FromIterator<{scalar}>")))
            .build(),
    ]
}

pub(crate) fn vector(shape: VectorShape, _options: &GenerateOptions) -> Result<Vec<Decl>, Error> {
    let kind = shape.kind();
    let fields = shape.components().iter().map(|c| c.to_string()).collect::<Vec<_>>();
    let cells = fields.iter().map(|f| format!("self.{f}")).collect::<Vec<_>>();
    let mut decls = vec![hash_code(kind, &cells), partial_eq(&fields)];
    decls.extend(hash(kind));
    decls.extend(collection_constructors(
        shape.scalar(),
        kind.zero(),
        |values| vector_literal(shape, values),
        shape.len(),
        "component",
    ));
    Ok(decls)
}

pub(crate) fn matrix(shape: MatrixShape, _options: &GenerateOptions) -> Result<Vec<Decl>, Error> {
    let kind = shape.kind();
    let fields = (0..shape.cols()).map(axis).collect::<Vec<_>>();
    let cells = (0..shape.cols())
        .flat_map(|c| (0..shape.rows()).map(move |r| shape.cell("self", c, r)))
        .collect::<Vec<_>>();
    let mut decls = vec![hash_code(kind, &cells), partial_eq(&fields)];
    decls.extend(hash(kind));
    decls.extend(collection_constructors(
        shape.scalar(),
        kind.zero(),
        |values| {
            let grid = values.chunks(shape.rows()).map(<[String]>::to_vec).collect::<Vec<_>>();
            matrix_literal(shape, &grid)
        },
        shape.cell_count(),
        "column-major",
    ));

    let column = shape.column();
    let row = shape.row();
    decls.push(
        FnDecl::new("outer_product")
            .doc(format!(
                "The outer product of `column` and `row`: cell (c, r) is `column[r] * row[c]`, \
                 giving {} columns of {} rows.",
                shape.cols(),
                shape.rows()
            ))
            .static_()
            .param("column", column.name())
            .param("row", row.name())
            .ret("Self")
            .expr(matrix_literal(shape, &outer_product(("column", column), ("row", row))?))
            .build(),
    );
    Ok(decls)
}

fn array_cast(source: String, body: String) -> Decl {
    Decl::Cast(Cast {
        meta: Meta::new("from_array"),
        kind: CastKind::Implicit,
        source,
        body: Body::Expr(body),
    })
}

fn into_array(name: &str, array: String, expr: &str) -> Decl {
    FnDecl::new("from")
        .static_()
        .param("value", name)
        .ret("Self")
        .expr(expr)
        .implements(TraitImpl::new(format!("From<{name}>")).for_type(array))
        .build()
}

pub(crate) fn vector_extensions(shape: VectorShape, _options: &GenerateOptions) -> Result<Vec<Decl>, Error> {
    let name = shape.name();
    let scalar = shape.scalar();
    let len = shape.len();
    let array = format!("[{scalar}; {len}]");
    let iter = format!("std::array::IntoIter<{scalar}, {len}>");
    let components = shape
        .components()
        .iter()
        .map(|c| format!("self.{c}"))
        .collect::<Vec<_>>()
        .join(", ");
    Ok(vec![
        FnDecl::new("to_array")
            .doc(format!("The components in `{}` order.", shape.components().join("")))
            .ret(&array)
            .expr(format!("[{components}]"))
            .build(),
        FnDecl::new("iter")
            .doc("Iterates over the components by value.")
            .ret(&iter)
            .expr("self.to_array().into_iter()")
            .build(),
        FnDecl::new("into_iter")
            .ret("Self::IntoIter")
            .expr("self.iter()")
            .implements(
                TraitImpl::new("IntoIterator")
                    .with_type("Item", scalar)
                    .with_type("IntoIter", iter.clone()),
            )
            .build(),
        array_cast(array.clone(), "Self::from_array(value)".into()),
        into_array(&name, array, "value.to_array()"),
    ])
}

pub(crate) fn matrix_extensions(shape: MatrixShape, _options: &GenerateOptions) -> Result<Vec<Decl>, Error> {
    let name = shape.name();
    let scalar = shape.scalar();
    let column = shape.column();
    let flat = format!("[{scalar}; {}]", shape.cell_count());
    let nested = format!("[[{scalar}; {}]; {}]", shape.rows(), shape.cols());
    let cells = (0..shape.cols())
        .flat_map(|c| (0..shape.rows()).map(move |r| shape.cell("self", c, r)))
        .collect::<Vec<_>>()
        .join(", ");
    let columns = |each: &dyn Fn(usize) -> String| {
        (0..shape.cols()).map(each).collect::<Vec<_>>().join(", ")
    };
    Ok(vec![
        FnDecl::new("to_cols_array")
            .doc("The cells in column-major order.")
            .receiver(Receiver::Ref)
            .ret(&flat)
            .expr(format!("[{cells}]"))
            .build(),
        FnDecl::new("to_cols_array_2d")
            .doc("The columns as arrays.")
            .receiver(Receiver::Ref)
            .ret(&nested)
            .expr(format!("[{}]", columns(&|c| format!("self.{}.to_array()", axis(c)))))
            .build(),
        array_cast(
            flat.clone(),
            format!(
                "Self::from_cols({})",
                columns(&|c| {
                    let values = (0..shape.rows())
                        .map(|r| format!("value[{}]", shape.offset(c, r)))
                        .collect::<Vec<_>>()
                        .join(", ");
                    format!("{}::new({values})", column.name())
                })
            ),
        ),
        array_cast(
            nested.clone(),
            format!(
                "Self::from_cols({})",
                columns(&|c| format!("{}::from_array(value[{c}])", column.name()))
            ),
        ),
        into_array(&name, flat, "value.to_cols_array()"),
        into_array(&name, nested, "value.to_cols_array_2d()"),
    ])
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{ScalarKind, decl::Function};

    fn function<'a>(decls: &'a [Decl], name: &str) -> &'a Function {
        decls
            .iter()
            .find_map(|d| match d {
                Decl::Function(f) if f.meta.name == name => Some(f),
                _ => None,
            })
            .unwrap_or_else(|| panic!("no {name}"))
    }

    #[test]
    fn sanity_hash_code_folds_components() {
        let shape = VectorShape::new(ScalarKind::Int, 2).unwrap();
        let decls = vector(shape, &GenerateOptions::default()).unwrap();
        assert_eq!(
            Body::Block(vec![
                "let mut hash: u64 = (self.x as u32 as u64);".into(),
                "hash = hash.wrapping_mul(0x18d) ^ (self.y as u32 as u64);".into(),
                "hash".into(),
            ]),
            function(&decls, "hash_code").body
        );
        assert!(decls.iter().any(|d| d.name() == "hash"));
    }

    #[test]
    fn sanity_floats_are_not_hashed() {
        let shape = VectorShape::new(ScalarKind::Float, 2).unwrap();
        let decls = vector(shape, &GenerateOptions::default()).unwrap();
        assert!(!decls.iter().any(|d| d.name() == "hash"));
        assert_eq!(
            Body::Expr("self.x == other.x && self.y == other.y".into()),
            function(&decls, "eq").body
        );
    }

    #[test]
    fn sanity_from_slice_fills_with_zero() {
        let shape = VectorShape::new(ScalarKind::UInt, 2).unwrap();
        let decls = vector(shape, &GenerateOptions::default()).unwrap();
        assert_eq!(
            Body::Expr(
                "UInt2 { x: values.get(0).copied().unwrap_or(0), y: values.get(1).copied().unwrap_or(0) }"
                    .into()
            ),
            function(&decls, "from_slice").body
        );
    }

    #[test]
    fn sanity_matrix_outer_product() {
        let shape = MatrixShape::new(ScalarKind::Float, 3, 2).unwrap();
        let decls = matrix(shape, &GenerateOptions::default()).unwrap();
        let outer = function(&decls, "outer_product");
        assert_eq!("Float2", outer.params[0].ty);
        assert_eq!("Float3", outer.params[1].ty);
        let Body::Expr(expr) = &outer.body else {
            panic!("expected an expression");
        };
        assert!(expr.starts_with(
            "Float3x2 { x_axis: Float2 { x: (column.x * row.x), y: (column.y * row.x) }"
        ));
    }

    #[test]
    fn sanity_matrix_flat_array() {
        let shape = MatrixShape::new(ScalarKind::Double, 2, 3).unwrap();
        let decls = matrix_extensions(shape, &GenerateOptions::default()).unwrap();
        assert_eq!(
            Body::Expr(
                "[self.x_axis.x, self.x_axis.y, self.x_axis.z, self.y_axis.x, self.y_axis.y, self.y_axis.z]"
                    .into()
            ),
            function(&decls, "to_cols_array").body
        );
        let Some(Decl::Cast(from_flat)) = decls.iter().find(|d| matches!(d, Decl::Cast(c) if c.source == "[f64; 6]")) else {
            panic!("no array conversion");
        };
        assert_eq!(
            Body::Expr(
                "Self::from_cols(Double3::new(value[0], value[1], value[2]), Double3::new(value[3], value[4], value[5]))"
                    .into()
            ),
            from_flat.body
        );
    }

    #[test]
    fn sanity_vector_array_conversions() {
        let shape = VectorShape::new(ScalarKind::Bool, 3).unwrap();
        let decls = vector_extensions(shape, &GenerateOptions::default()).unwrap();
        let into = function(&decls, "from");
        let trait_impl = into.trait_impl.as_ref().unwrap();
        assert_eq!("From<Bool3>", trait_impl.path);
        assert_eq!(Some("[bool; 3]".to_string()), trait_impl.for_type);
    }
}
