//! Dot and cross products, lengths, and reflection.
use crate::{
    Error,
    decl::{Decl, TraitImpl},
    formula::vector_literal,
    scalar::Arith,
    shape::VectorShape,
};

use super::{Arg, FnDecl, GenerateOptions, reduce};

pub(crate) fn vector(shape: VectorShape, options: &GenerateOptions) -> Result<Vec<Decl>, Error> {
    let kind = shape.kind();
    if !kind.capabilities().is_floating_point {
        return Ok(vec![]);
    }
    let scalar = shape.scalar();
    let zero = kind.literal(0);
    let one = kind.literal(1);
    let dot = |a: &str, b: &str| {
        reduce(
            shape,
            &kind.arith(Arith::Mul, "$0", "$1"),
            &[Arg::Vector(a), Arg::Vector(b)],
            |acc, term| kind.arith(Arith::Add, acc, term),
        )
    };
    let implements = |trait_name: &str| TraitImpl::new(options.function_trait(trait_name));
    let with_scalar = |trait_name: &str| implements(trait_name).with_type("Scalar", scalar);

    let mut decls = vec![
        FnDecl::new("dot")
            .doc("Sum of the component-wise products of `self` and `rhs`.")
            .param("rhs", "Self")
            .ret("Self::Scalar")
            .expr(dot("self", "rhs")?)
            .implements(with_scalar("Dot"))
            .build(),
        FnDecl::new("length")
            .doc("Euclidean length.")
            .ret("Self::Scalar")
            .expr(format!("{}.sqrt()", dot("self", "self")?))
            .implements(with_scalar("Length"))
            .build(),
        FnDecl::new("distance")
            .doc("Euclidean distance between `self` and `other`.")
            .param("other", "Self")
            .ret("Self::Scalar")
            .block(vec![
                "let d = self - other;".into(),
                format!("{}.sqrt()", dot("d", "d")?),
            ])
            .implements(with_scalar("Distance"))
            .build(),
        FnDecl::new("normalize")
            .doc("`self` scaled to unit length. A zero vector yields NaN components.")
            .ret("Self")
            .block(vec![
                format!("let length = {}.sqrt();", dot("self", "self")?),
                "self / length".into(),
            ])
            .implements(implements("Normalize"))
            .build(),
        FnDecl::new("faceforward")
            .doc("`self` if `dot(i, ng)` is negative, otherwise `-self`.")
            .param("i", "Self")
            .param("ng", "Self")
            .ret("Self")
            .block(vec![format!(
                "if {} < {zero} {{ self }} else {{ -self }}",
                dot("i", "ng")?
            )])
            .implements(implements("Faceforward"))
            .build(),
        FnDecl::new("reflect")
            .doc("Reflection of the incident vector `self` about the surface normal `n`.")
            .param("n", "Self")
            .ret("Self")
            .block(vec![
                format!("let d = {};", dot("n", "self")?),
                format!("self - n * ({} * d)", kind.literal(2)),
            ])
            .implements(implements("Reflect"))
            .build(),
        FnDecl::new("refract")
            .doc(
                "Refraction of the incident vector `self` through a surface with normal `n` and \
                 ratio of indices of refraction `eta`.\n\nReturns zero on total internal reflection.",
            )
            .param("n", "Self")
            .param("eta", scalar)
            .ret("Self")
            .block(vec![
                format!("let d = {};", dot("n", "self")?),
                format!("let k = {one} - eta * eta * ({one} - d * d);"),
                format!("if k < {zero} {{"),
                "    Self::ZERO".into(),
                "} else {".into(),
                "    self * eta - n * (eta * d + k.sqrt())".into(),
                "}".into(),
            ])
            .implements(with_scalar("Refract"))
            .build(),
    ];

    let cross = |a: usize, b: usize| {
        let c = shape.components();
        kind.arith(
            Arith::Sub,
            &kind.arith(Arith::Mul, &format!("self.{}", c[a]), &format!("rhs.{}", c[b])),
            &kind.arith(Arith::Mul, &format!("self.{}", c[b]), &format!("rhs.{}", c[a])),
        )
    };
    match shape.len() {
        2 => decls.push(
            FnDecl::new("cross")
                .doc("The z component of the cross product of `self` and `rhs` extended with z = 0.")
                .param("rhs", "Self")
                .ret("Self::Output")
                .expr(cross(0, 1))
                .implements(implements("Cross").with_type("Output", scalar))
                .build(),
        ),
        3 => decls.push(
            FnDecl::new("cross")
                .doc("Cross product of `self` and `rhs`.")
                .param("rhs", "Self")
                .ret("Self::Output")
                .expr(vector_literal(shape, &[cross(1, 2), cross(2, 0), cross(0, 1)]))
                .implements(implements("Cross").with_type("Output", shape.name()))
                .build(),
        ),
        _ => {}
    }
    Ok(decls)
}
