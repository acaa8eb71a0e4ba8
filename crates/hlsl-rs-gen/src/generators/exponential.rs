//! Powers, exponentials, logarithms and roots.
use crate::{Error, decl::Decl, shape::VectorShape};

use super::{Arg, GenerateOptions, trait_fn};

const UNARY: &[(&str, &str, &str, &str)] = &[
    ("Exp", "exp", "`e` raised to each component.", "$0.exp()"),
    ("Exp2", "exp2", "`2` raised to each component.", "$0.exp2()"),
    ("Log", "log", "Natural logarithm of each component.", "$0.ln()"),
    ("Log2", "log2", "Base 2 logarithm of each component.", "$0.log2()"),
    ("Log10", "log10", "Base 10 logarithm of each component.", "$0.log10()"),
    ("Sqrt", "sqrt", "Square root of each component.", "$0.sqrt()"),
];

pub(crate) fn vector(shape: VectorShape, options: &GenerateOptions) -> Result<Vec<Decl>, Error> {
    let kind = shape.kind();
    if !kind.capabilities().is_floating_point {
        return Ok(vec![]);
    }
    let mut decls = UNARY
        .iter()
        .map(|(trait_name, method, doc, template)| {
            trait_fn(shape, options, trait_name, method, doc, &[], template)
        })
        .collect::<Result<Vec<_>, _>>()?;
    decls.push(trait_fn(
        shape,
        options,
        "Rsqrt",
        "rsqrt",
        "Reciprocal of the square root of each component.",
        &[],
        &format!("({} / $0.sqrt())", kind.literal(1)),
    )?);
    decls.push(trait_fn(
        shape,
        options,
        "Pow",
        "pow",
        "Each component of `self` raised to the matching component of `y`.",
        &[Arg::Vector("y")],
        "$0.powf($1)",
    )?);
    Ok(decls)
}
