//! Fields, constants, constructors and indexing for vectors.
use crate::{
    Error,
    decl::{
        Body, Constructor, ConstructorInit, Decl, Field, Meta, Mutability, Operator,
        OperatorSymbol, Param,
    },
    formula::vector_literal,
    shape::VectorShape,
};

use super::GenerateOptions;

pub(crate) fn vector(shape: VectorShape, _options: &GenerateOptions) -> Result<Vec<Decl>, Error> {
    let name = shape.name();
    let scalar = shape.scalar();
    let kind = shape.kind();
    let components = shape.components();
    let mut decls = vec![];

    for c in components {
        decls.push(Decl::Field(Field {
            meta: Meta::new(*c),
            ty: scalar.into(),
            mutability: Mutability::Mutable,
            value: None,
        }));
    }

    let (zero_doc, one_doc) = if kind.capabilities().is_boolean {
        ("All `false`.", "All `true`.")
    } else {
        ("All zeroes.", "All ones.")
    };
    for (const_name, doc, value) in [("ZERO", zero_doc, kind.zero()), ("ONE", one_doc, kind.one())] {
        decls.push(Decl::Field(Field {
            meta: Meta::new(const_name).doc(doc).static_(),
            ty: "Self".into(),
            mutability: Mutability::Const,
            value: Some(vector_literal(
                shape,
                &vec![value.to_string(); shape.len()],
            )),
        }));
    }

    decls.push(Decl::Constructor(Constructor {
        meta: Meta::new("new").doc("Creates a new vector.").static_(),
        params: components.iter().map(|c| Param::new(*c, scalar)).collect(),
        init: ConstructorInit::Body(Body::Expr(format!("Self {{ {} }}", components.join(", ")))),
        is_const: true,
    }));
    decls.push(Decl::Constructor(Constructor {
        meta: Meta::new("splat")
            .doc("Creates a vector with all components set to `v`.")
            .static_(),
        params: vec![Param::new("v", scalar)],
        init: ConstructorInit::Delegate(format!("Self::new({})", vec!["v"; shape.len()].join(", "))),
        is_const: true,
    }));
    decls.push(Decl::Constructor(Constructor {
        meta: Meta::new("from_array")
            .doc(format!("Creates a new vector from an array in `{}` order.", components.join("")))
            .static_(),
        params: vec![Param::new("values", format!("[{scalar}; {}]", shape.len()))],
        init: ConstructorInit::Delegate(format!(
            "Self::new({})",
            (0..shape.len())
                .map(|i| format!("values[{i}]"))
                .collect::<Vec<_>>()
                .join(", ")
        )),
        is_const: true,
    }));

    let arms = |mutable: bool| {
        let borrow = if mutable { "&mut " } else { "&" };
        let mut lines = vec!["match index {".to_string()];
        for (i, c) in components.iter().enumerate() {
            lines.push(format!("    {i} => {borrow}self.{c},"));
        }
        lines.push(format!(
            "    _ => panic!(\"index out of bounds: {name} has {} components but the index is {{index}}\"),",
            shape.len()
        ));
        lines.push("}".into());
        lines
    };
    decls.extend(indexers(&name, scalar, arms(false), arms(true)));
    Ok(decls)
}

/// `Index` and `IndexMut` by `usize` with the given bodies.
pub(crate) fn indexers(
    name: &str,
    element: &str,
    by_ref: Vec<String>,
    by_mut: Vec<String>,
) -> Vec<Decl> {
    let indexer = |meta: &str, symbol, output: Option<&str>, body| {
        Decl::Operator(Operator {
            meta: Meta::new(meta),
            symbol,
            lhs: name.to_string(),
            rhs: Some("usize".into()),
            output: output.map(str::to_string),
            body,
        })
    };
    vec![
        indexer("index", OperatorSymbol::Index, Some(element), Body::Block(by_ref)),
        indexer("index_mut", OperatorSymbol::IndexMut, None, Body::Block(by_mut)),
    ]
}
