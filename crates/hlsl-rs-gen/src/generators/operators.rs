//! Arithmetic, bitwise and logical operators on vectors.
use crate::{
    Error, ScalarKind,
    decl::{BinaryOp, Body, Decl, Meta, Operator, OperatorSymbol, UnaryOp},
    scalar::Arith,
    shape::VectorShape,
};

use super::{Arg, GenerateOptions, componentwise};

pub(crate) const ARITHMETIC: [(BinaryOp, Arith); 5] = [
    (BinaryOp::Add, Arith::Add),
    (BinaryOp::Sub, Arith::Sub),
    (BinaryOp::Mul, Arith::Mul),
    (BinaryOp::Div, Arith::Div),
    (BinaryOp::Rem, Arith::Rem),
];

const BITWISE: [BinaryOp; 3] = [BinaryOp::BitAnd, BinaryOp::BitOr, BinaryOp::BitXor];

pub(crate) fn binary(op: BinaryOp, lhs: &str, rhs: &str, output: &str, body: String) -> Decl {
    Decl::Operator(Operator {
        meta: Meta::new(op.method()),
        symbol: OperatorSymbol::Binary(op),
        lhs: lhs.into(),
        rhs: Some(rhs.into()),
        output: Some(output.into()),
        body: Body::Expr(body),
    })
}

/// The compound assignment form of `op`, written in terms of the binary one.
pub(crate) fn assign(op: BinaryOp, lhs: &str, rhs: &str) -> Decl {
    let symbol = OperatorSymbol::Assign(op);
    Decl::Operator(Operator {
        meta: Meta::new(symbol.method()),
        symbol,
        lhs: lhs.into(),
        rhs: Some(rhs.into()),
        output: None,
        body: Body::Block(vec![format!("*self = *self {} rhs;", op.symbol())]),
    })
}

pub(crate) fn unary(op: UnaryOp, ty: &str, body: String) -> Decl {
    let symbol = OperatorSymbol::Unary(op);
    Decl::Operator(Operator {
        meta: Meta::new(symbol.method()),
        symbol,
        lhs: ty.into(),
        rhs: None,
        output: Some(ty.into()),
        body: Body::Expr(body),
    })
}

/// `op` between two vectors and between a vector and a broadcast scalar on
/// either side, plus both compound assignments.
fn broadcast(shape: VectorShape, op: BinaryOp, template: &str) -> Result<Vec<Decl>, Error> {
    let name = shape.name();
    let scalar = shape.scalar();
    Ok(vec![
        binary(
            op,
            &name,
            &name,
            &name,
            componentwise(shape, template, &[Arg::Vector("self"), Arg::Vector("rhs")])?,
        ),
        binary(
            op,
            &name,
            scalar,
            &name,
            componentwise(shape, template, &[Arg::Vector("self"), Arg::Scalar("rhs")])?,
        ),
        binary(
            op,
            scalar,
            &name,
            &name,
            componentwise(shape, template, &[Arg::Scalar("self"), Arg::Vector("rhs")])?,
        ),
        assign(op, &name, &name),
        assign(op, &name, scalar),
    ])
}

pub(crate) fn vector(shape: VectorShape, _options: &GenerateOptions) -> Result<Vec<Decl>, Error> {
    let kind = shape.kind();
    let caps = kind.capabilities();
    let name = shape.name();
    let mut decls = vec![];

    if caps.has_arithmetic {
        for (op, arith) in ARITHMETIC {
            decls.extend(broadcast(shape, op, &kind.arith(arith, "$0", "$1"))?);
        }
        if caps.is_signed {
            decls.push(unary(
                UnaryOp::Neg,
                &name,
                componentwise(shape, &kind.negate("$0"), &[Arg::Vector("self")])?,
            ));
        }
    }

    if caps.is_boolean || caps.is_integer {
        decls.push(unary(
            UnaryOp::Not,
            &name,
            componentwise(shape, "!$0", &[Arg::Vector("self")])?,
        ));
        for op in BITWISE {
            decls.extend(broadcast(shape, op, &format!("($0 {} $1)", op.symbol()))?);
        }
    }

    if caps.is_integer {
        let amount = shape.with_kind(ScalarKind::UInt).name();
        for (op, method) in [(BinaryOp::Shl, "wrapping_shl"), (BinaryOp::Shr, "wrapping_shr")] {
            let template = format!("$0.{method}($1)");
            decls.push(binary(
                op,
                &name,
                &amount,
                &name,
                componentwise(shape, &template, &[Arg::Vector("self"), Arg::Vector("rhs")])?,
            ));
            decls.push(binary(
                op,
                &name,
                "u32",
                &name,
                componentwise(shape, &template, &[Arg::Vector("self"), Arg::Scalar("rhs")])?,
            ));
            decls.push(assign(op, &name, &amount));
            decls.push(assign(op, &name, "u32"));
        }
    }

    Ok(decls)
}
