//! Conversions between generated types.
//!
//! Lossless promotions and scalar broadcasts become `From` implementations.
//! Everything else HLSL allows with an explicit cast, such as narrowing,
//! changing signedness or dropping trailing components, becomes a
//! `from_<hlsl name>` associated function when explicit casts are enabled.
use crate::{
    Error, MatrixShape, ScalarKind,
    decl::{Body, Cast, CastKind, Decl, Meta},
    shape::{MAX_DIM, VectorShape, axis},
};

use super::{Arg, GenerateOptions, componentwise};

fn cast(kind: CastKind, name: String, doc: String, source: String, body: String) -> Decl {
    Decl::Cast(Cast {
        meta: Meta::new(name).doc(doc),
        kind,
        source,
        body: Body::Expr(body),
    })
}

fn cast_name(hlsl_name: &str) -> String {
    format!("from_{hlsl_name}")
}

pub(crate) fn vector(shape: VectorShape, options: &GenerateOptions) -> Result<Vec<Decl>, Error> {
    let kind = shape.kind();
    let mut decls = vec![cast(
        CastKind::Implicit,
        cast_name(kind.hlsl_name()),
        "Broadcasts a scalar to every component.".into(),
        shape.scalar().into(),
        "Self::splat(value)".into(),
    )];

    for from in ScalarKind::ALL {
        if from == kind {
            continue;
        }
        let source = shape.with_kind(from);
        let body = componentwise(shape, &kind.convert_from(from, "$0"), &[Arg::Vector("value")])?;
        if kind.promotes_from(from) {
            decls.push(cast(
                CastKind::Implicit,
                cast_name(&source.hlsl_name()),
                format!("Lossless conversion from `{}`.", source.hlsl_name()),
                source.name(),
                body,
            ));
        } else if options.explicit_casts {
            decls.push(cast(
                CastKind::Explicit,
                cast_name(&source.hlsl_name()),
                format!("Converts each component of a `{}` with `as` semantics.", source.hlsl_name()),
                source.name(),
                body,
            ));
        }
    }

    if options.explicit_casts {
        for len in shape.len() + 1..=MAX_DIM {
            let source = VectorShape::new(kind, len)?;
            decls.push(cast(
                CastKind::Explicit,
                cast_name(&source.hlsl_name()),
                format!(
                    "Keeps the first {} components of a `{}`.",
                    shape.len(),
                    source.hlsl_name()
                ),
                source.name(),
                componentwise(shape, "$0", &[Arg::Vector("value")])?,
            ));
        }
    }
    Ok(decls)
}

pub(crate) fn matrix(shape: MatrixShape, options: &GenerateOptions) -> Result<Vec<Decl>, Error> {
    let kind = shape.kind();
    let column = shape.column();
    let columns = |convert: &dyn Fn(usize) -> String| {
        let fields = (0..shape.cols())
            .map(|c| format!("{}: {}", axis(c), convert(c)))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{} {{ {fields} }}", shape.name())
    };

    let mut decls = vec![cast(
        CastKind::Implicit,
        cast_name(kind.hlsl_name()),
        "Broadcasts a scalar to every cell.".into(),
        shape.scalar().into(),
        "Self::splat(value)".into(),
    )];

    for from in ScalarKind::ALL {
        if from == kind || !from.capabilities().has_arithmetic {
            continue;
        }
        let source = shape.with_kind(from)?;
        let source_column = column.with_kind(from);
        if kind.promotes_from(from) {
            decls.push(cast(
                CastKind::Implicit,
                cast_name(&source.hlsl_name()),
                format!("Lossless conversion from `{}`.", source.hlsl_name()),
                source.name(),
                columns(&|c| format!("{}::from(value.{})", column.name(), axis(c))),
            ));
        } else if options.explicit_casts {
            decls.push(cast(
                CastKind::Explicit,
                cast_name(&source.hlsl_name()),
                format!("Converts each cell of a `{}` with `as` semantics.", source.hlsl_name()),
                source.name(),
                columns(&|c| {
                    format!(
                        "{}::{}(value.{})",
                        column.name(),
                        cast_name(&source_column.hlsl_name()),
                        axis(c)
                    )
                }),
            ));
        }
    }

    if options.explicit_casts {
        for cols in shape.cols()..=MAX_DIM {
            for rows in shape.rows()..=MAX_DIM {
                if (cols, rows) == (shape.cols(), shape.rows()) {
                    continue;
                }
                let source = MatrixShape::new(kind, cols, rows)?;
                let source_column = cast_name(&source.column().hlsl_name());
                let truncate_column = |c: usize| {
                    if rows == shape.rows() {
                        format!("value.{}", axis(c))
                    } else {
                        format!("{}::{source_column}(value.{})", column.name(), axis(c))
                    }
                };
                decls.push(cast(
                    CastKind::Explicit,
                    cast_name(&source.hlsl_name()),
                    format!(
                        "Keeps the upper-left {}x{} block of a `{}`.",
                        shape.cols(),
                        shape.rows(),
                        source.hlsl_name()
                    ),
                    source.name(),
                    columns(&truncate_column),
                ));
            }
        }
    }
    Ok(decls)
}

#[cfg(test)]
mod test {
    use super::*;

    fn find<'a>(decls: &'a [Decl], name: &str) -> &'a Cast {
        decls
            .iter()
            .find_map(|d| match d {
                Decl::Cast(c) if c.meta.name == name => Some(c),
                _ => None,
            })
            .unwrap_or_else(|| panic!("no {name}"))
    }

    #[test]
    fn sanity_implicit_promotions() {
        let shape = VectorShape::new(ScalarKind::Double, 2).unwrap();
        let decls = vector(shape, &GenerateOptions::default()).unwrap();
        let implicit = decls
            .iter()
            .map(|d| match d {
                Decl::Cast(c) => (c.kind, c.source.as_str()),
                _ => panic!("only casts"),
            })
            .collect::<Vec<_>>();
        assert_eq!(
            vec![
                (CastKind::Implicit, "f64"),
                (CastKind::Implicit, "Int2"),
                (CastKind::Implicit, "UInt2"),
                (CastKind::Implicit, "Float2"),
            ],
            implicit
        );
        assert_eq!(
            Body::Expr("Double2 { x: (value.x as f64), y: (value.y as f64) }".into()),
            find(&decls, "from_float2").body
        );
    }

    #[test]
    fn sanity_explicit_casts() {
        let options = GenerateOptions {
            explicit_casts: true,
            ..Default::default()
        };
        let shape = VectorShape::new(ScalarKind::Bool, 2).unwrap();
        let decls = vector(shape, &options).unwrap();
        let from_float = find(&decls, "from_float2");
        assert_eq!(CastKind::Explicit, from_float.kind);
        assert_eq!(
            Body::Expr("Bool2 { x: (value.x != 0.0), y: (value.y != 0.0) }".into()),
            from_float.body
        );
        assert_eq!(
            Body::Expr("Bool2 { x: value.x, y: value.y }".into()),
            find(&decls, "from_bool4").body
        );
    }

    #[test]
    fn sanity_matrix_casts() {
        let options = GenerateOptions {
            explicit_casts: true,
            ..Default::default()
        };
        let shape = MatrixShape::new(ScalarKind::Float, 2, 2).unwrap();
        let decls = matrix(shape, &options).unwrap();
        assert_eq!(
            Body::Expr("Float2x2 { x_axis: Float2::from(value.x_axis), y_axis: Float2::from(value.y_axis) }".into()),
            find(&decls, "from_int2x2").body
        );
        assert_eq!(CastKind::Explicit, find(&decls, "from_double2x2").kind);
        assert_eq!(
            Body::Expr(
                "Float2x2 { x_axis: Float2::from_float3(value.x_axis), y_axis: Float2::from_float3(value.y_axis) }"
                    .into()
            ),
            find(&decls, "from_float4x3").body
        );
        assert!(matrix(shape, &GenerateOptions::default())
            .unwrap()
            .iter()
            .all(|d| matches!(d, Decl::Cast(Cast { kind: CastKind::Implicit, .. }))));
    }
}
