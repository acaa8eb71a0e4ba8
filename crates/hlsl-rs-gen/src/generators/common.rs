//! Rounding, clamping, interpolation and classification.
use crate::{
    Error,
    decl::{Decl, TraitImpl},
    scalar::Arith,
    shape::VectorShape,
};

use super::{Arg, FnDecl, GenerateOptions, componentwise, trait_fn};

/// Unary float functions as `(trait, method, doc, template)`.
const FLOAT_UNARY: &[(&str, &str, &str, &str)] = &[
    ("Abs", "abs", "Absolute value of each component.", "$0.abs()"),
    ("Floor", "floor", "Largest integer not greater than each component.", "$0.floor()"),
    ("Ceil", "ceil", "Smallest integer not less than each component.", "$0.ceil()"),
    (
        "Round",
        "round",
        "Nearest integer to each component, rounding half-way cases away from zero.",
        "$0.round()",
    ),
    (
        "RoundEven",
        "round_even",
        "Nearest integer to each component, rounding half-way cases to even.",
        "$0.round_ties_even()",
    ),
    ("Trunc", "trunc", "Integer part of each component.", "$0.trunc()"),
    ("Frac", "frac", "Fractional part of each component, `x - floor(x)`.", "($0 - $0.floor())"),
];

/// Classification predicates as `(trait, method, doc, template)`.
const PREDICATES: &[(&str, &str, &str, &str)] = &[
    ("IsNan", "isnan", "Which components are NaN.", "$0.is_nan()"),
    ("IsInf", "isinf", "Which components are infinite.", "$0.is_infinite()"),
    ("IsFinite", "isfinite", "Which components are neither NaN nor infinite.", "$0.is_finite()"),
];

pub(crate) fn vector(shape: VectorShape, options: &GenerateOptions) -> Result<Vec<Decl>, Error> {
    let kind = shape.kind();
    let caps = kind.capabilities();
    if !caps.has_arithmetic {
        return Ok(vec![]);
    }
    let name = shape.name();
    let scalar = shape.scalar();
    let zero = kind.literal(0);
    let one = kind.literal(1);
    let mut decls = vec![];
    let mut push = |trait_name: &str, method: &str, doc: &str, params: &[Arg<'_>], template: &str| {
        trait_fn(shape, options, trait_name, method, doc, params, template).map(|d| decls.push(d))
    };

    if caps.is_floating_point {
        for (trait_name, method, doc, template) in FLOAT_UNARY {
            push(trait_name, method, doc, &[], template)?;
        }
        push(
            "Sign",
            "sign",
            "`-1`, `0` or `1` according to the sign of each component. NaN maps to `0`.",
            &[],
            &format!(
                "if $0 > {zero} {{ {one} }} else if $0 < {zero} {{ {} }} else {{ {zero} }}",
                kind.literal(-1)
            ),
        )?;
        push(
            "Saturate",
            "saturate",
            "Clamps each component to `0..=1`.",
            &[],
            &format!("$0.max({zero}).min({one})"),
        )?;
        push(
            "Fmod",
            "fmod",
            "Floating point remainder of `self / y`, with the sign of `self`.",
            &[Arg::Vector("y")],
            &kind.arith(Arith::Rem, "$0", "$1"),
        )?;
        push(
            "Step",
            "step",
            "`1` in each component where `x >= self`, otherwise `0`.",
            &[Arg::Vector("x")],
            &format!("if $1 >= $0 {{ {one} }} else {{ {zero} }}"),
        )?;
        for (bound, param) in [(name.as_str(), Arg::Vector("weight")), (scalar, Arg::Scalar("weight"))] {
            push(
                &format!("Lerp<{bound}>"),
                "lerp",
                &format!(
                    "Linear interpolation from `self` to `other`, {}.",
                    match param {
                        Arg::Vector(_) => "weighting each component separately",
                        Arg::Scalar(_) => "with one weight for every component",
                    }
                ),
                &[Arg::Vector("other"), param],
                "($0 + ($1 - $0) * $2)",
            )?;
        }
        for (bound, low, high) in [
            (name.as_str(), Arg::Vector("low"), Arg::Vector("high")),
            (scalar, Arg::Scalar("low"), Arg::Scalar("high")),
        ] {
            push(
                &format!("Smoothstep<{bound}>"),
                "smoothstep",
                &format!(
                    "Hermite interpolation of `self` between `low` and `high`, {}.",
                    bounds_words(low)
                ),
                &[low, high],
                &format!(
                    "{{ let t = (($0 - $1) / ($2 - $1)).max({zero}).min({one}); t * t * ({} - {} * t) }}",
                    kind.literal(3),
                    kind.literal(2)
                ),
            )?;
        }
    } else if caps.is_signed {
        push("Abs", "abs", "Absolute value of each component.", &[], "$0.wrapping_abs()")?;
        push("Sign", "sign", "`-1`, `0` or `1` according to the sign of each component.", &[], "$0.signum()")?;
    }

    // Integer scalars also implement the crate's `Min`/`Max`, so method syntax is ambiguous.
    let (min, max, clamp) = if caps.is_integer {
        ("Ord::min($0, $1)", "Ord::max($0, $1)", "Ord::min(Ord::max($0, $1), $2)")
    } else {
        ("$0.min($1)", "$0.max($1)", "$0.max($1).min($2)")
    };
    push("Min", "min", "Component-wise minimum.", &[Arg::Vector("rhs")], min)?;
    push("Max", "max", "Component-wise maximum.", &[Arg::Vector("rhs")], max)?;
    for (bound, low, high) in [
        (name.as_str(), Arg::Vector("low"), Arg::Vector("high")),
        (scalar, Arg::Scalar("low"), Arg::Scalar("high")),
    ] {
        push(
            &format!("Clamp<{bound}>"),
            "clamp",
            &format!("Clamps each component to `low..=high`, {}.", bounds_words(low)),
            &[low, high],
            clamp,
        )?;
    }
    let mad = if caps.is_floating_point {
        "$0.mul_add($1, $2)".to_string()
    } else {
        kind.arith(Arith::Add, &kind.arith(Arith::Mul, "$0", "$1"), "$2")
    };
    push(
        "Mad",
        "mad",
        "`self * b + c` in each component.",
        &[Arg::Vector("b"), Arg::Vector("c")],
        &mad,
    )?;

    if caps.is_floating_point {
        let mask = shape.mask();
        for (trait_name, method, doc, template) in PREDICATES {
            decls.push(
                FnDecl::new(*method)
                    .doc(*doc)
                    .ret("Self::Mask")
                    .expr(componentwise(mask, template, &[Arg::Vector("self")])?)
                    .implements(
                        TraitImpl::new(options.function_trait(trait_name)).with_type("Mask", mask.name()),
                    )
                    .build(),
            );
        }
    }
    Ok(decls)
}

fn bounds_words(bound: Arg<'_>) -> &'static str {
    match bound {
        Arg::Vector(_) => "with separate bounds per component",
        Arg::Scalar(_) => "with the same bounds for every component",
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{ScalarKind, decl::Body};

    fn function<'a>(decls: &'a [Decl], trait_suffix: &str) -> &'a crate::decl::Function {
        decls
            .iter()
            .find_map(|d| match d {
                Decl::Function(f) if f.trait_impl.as_ref().is_some_and(|t| t.path.ends_with(trait_suffix)) => {
                    Some(f)
                }
                _ => None,
            })
            .unwrap_or_else(|| panic!("no {trait_suffix}"))
    }

    #[test]
    fn sanity_clamp_variants() {
        let shape = VectorShape::new(ScalarKind::Float, 2).unwrap();
        let decls = vector(shape, &GenerateOptions::default()).unwrap();
        let per_component = function(&decls, "Clamp<Float2>");
        assert_eq!("Self", per_component.params[0].ty);
        assert!(per_component.meta.doc.as_ref().unwrap().contains("per component"));
        let broadcast = function(&decls, "Clamp<f32>");
        assert_eq!("f32", broadcast.params[0].ty);
        assert_eq!(
            Body::Expr("Float2 { x: self.x.max(low).min(high), y: self.y.max(low).min(high) }".into()),
            broadcast.body
        );
    }

    #[test]
    fn sanity_predicates_return_masks() {
        let shape = VectorShape::new(ScalarKind::Double, 3).unwrap();
        let decls = vector(shape, &GenerateOptions::default()).unwrap();
        let isnan = function(&decls, "IsNan");
        assert_eq!(
            vec![("Mask".to_string(), "Bool3".to_string())],
            isnan.trait_impl.as_ref().unwrap().assoc_types
        );
    }

    #[test]
    fn sanity_integer_common() {
        let shape = VectorShape::new(ScalarKind::Int, 2).unwrap();
        let decls = vector(shape, &GenerateOptions::default()).unwrap();
        assert_eq!(
            Body::Expr("Int2 { x: self.x.wrapping_abs(), y: self.y.wrapping_abs() }".into()),
            function(&decls, "Abs").body
        );
        assert_eq!(
            Body::Expr(
                "Int2 { x: self.x.wrapping_mul(b.x).wrapping_add(c.x), y: self.y.wrapping_mul(b.y).wrapping_add(c.y) }"
                    .into()
            ),
            function(&decls, "Mad").body
        );
        assert!(!decls.iter().any(|d| d.name() == "floor" || d.name() == "isnan"));
    }

    #[test]
    fn sanity_integer_min_max_use_ord() {
        let shape = VectorShape::new(ScalarKind::UInt, 2).unwrap();
        let decls = vector(shape, &GenerateOptions::default()).unwrap();
        assert_eq!(
            Body::Expr("UInt2 { x: Ord::max(self.x, rhs.x), y: Ord::max(self.y, rhs.y) }".into()),
            function(&decls, "Max").body
        );
        assert_eq!(
            Body::Expr("UInt2 { x: Ord::min(self.x, rhs.x), y: Ord::min(self.y, rhs.y) }".into()),
            function(&decls, "Min").body
        );
        assert_eq!(
            Body::Expr(
                "UInt2 { x: Ord::min(Ord::max(self.x, low.x), high.x), y: Ord::min(Ord::max(self.y, low.y), high.y) }"
                    .into()
            ),
            function(&decls, "Clamp<UInt2>").body
        );
        assert_eq!(
            Body::Expr("UInt2 { x: Ord::min(Ord::max(self.x, low), high), y: Ord::min(Ord::max(self.y, low), high) }".into()),
            function(&decls, "Clamp<u32>").body
        );
    }
}
