//! Angle conversion, trigonometric and hyperbolic functions.
use crate::{Error, decl::Decl, shape::VectorShape};

use super::{Arg, GenerateOptions, trait_fn};

const UNARY: &[(&str, &str, &str, &str)] = &[
    ("Degrees", "degrees", "Converts each component from radians to degrees.", "$0.to_degrees()"),
    ("Radians", "radians", "Converts each component from degrees to radians.", "$0.to_radians()"),
    ("Sin", "sin", "Sine of each component, in radians.", "$0.sin()"),
    ("Cos", "cos", "Cosine of each component, in radians.", "$0.cos()"),
    ("Tan", "tan", "Tangent of each component, in radians.", "$0.tan()"),
    ("Asin", "asin", "Arcsine of each component.", "$0.asin()"),
    ("Acos", "acos", "Arccosine of each component.", "$0.acos()"),
    ("Atan", "atan", "Arctangent of each component.", "$0.atan()"),
    ("Sinh", "sinh", "Hyperbolic sine of each component.", "$0.sinh()"),
    ("Cosh", "cosh", "Hyperbolic cosine of each component.", "$0.cosh()"),
    ("Tanh", "tanh", "Hyperbolic tangent of each component.", "$0.tanh()"),
];

pub(crate) fn vector(shape: VectorShape, options: &GenerateOptions) -> Result<Vec<Decl>, Error> {
    if !shape.kind().capabilities().is_floating_point {
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
        "Atan2",
        "atan2",
        "Four quadrant arctangent of `self / x`, where `self` holds the y coordinates.",
        &[Arg::Vector("x")],
        "$0.atan2($1)",
    )?);
    Ok(decls)
}
