//! Swizzle accessors.
//!
//! Every strictly increasing selection of two or more components gets a
//! getter and a setter, once under positional names (`xz`) and once under
//! color names (`rb`).
use crate::{
    Error,
    decl::{Decl, Meta, Property},
    formula::vector_literal,
    shape::{COMPONENTS, VectorShape},
};

use super::GenerateOptions;

/// Strictly increasing index sequences of length two and up, shortest first.
pub(crate) fn selections(len: usize) -> Vec<Vec<usize>> {
    let mut all = vec![];
    for size in 2..=len {
        let mut current = vec![];
        choose(0, len, size, &mut current, &mut all);
    }
    all
}

fn choose(start: usize, len: usize, size: usize, current: &mut Vec<usize>, out: &mut Vec<Vec<usize>>) {
    if current.len() == size {
        out.push(current.clone());
        return;
    }
    for i in start..len {
        current.push(i);
        choose(i + 1, len, size, current, out);
        current.pop();
    }
}

pub(crate) fn vector(shape: VectorShape, _options: &GenerateOptions) -> Result<Vec<Decl>, Error> {
    let positional = shape.components();
    let color = shape.color_components();
    let mut decls = vec![];
    for selection in selections(shape.len()) {
        let target = VectorShape::new(shape.kind(), selection.len())?;
        let sources = selection
            .iter()
            .map(|i| format!("self.{}", positional[*i]))
            .collect::<Vec<_>>();
        let getter = vector_literal(target, &sources);
        let setter = selection
            .iter()
            .enumerate()
            .map(|(to, from)| format!("self.{} = value.{};", positional[*from], COMPONENTS[to]))
            .collect::<Vec<_>>();
        let xyzw_name = selection.iter().map(|i| positional[*i]).collect::<String>();
        let rgba_name = selection.iter().map(|i| color[*i]).collect::<String>();
        let picked = selection
            .iter()
            .map(|i| format!("`{}`", positional[*i]))
            .collect::<Vec<_>>()
            .join(", ");

        decls.push(Decl::Property(Property {
            meta: Meta::new(&xyzw_name).doc(format!("The {picked} components.")),
            ty: target.name(),
            getter: getter.clone(),
            setter: Some(setter.clone()),
        }));
        decls.push(Decl::Property(Property {
            meta: Meta::new(rgba_name).doc(format!("Color alias of [`Self::{xyzw_name}`].")),
            ty: target.name(),
            getter,
            setter: Some(setter),
        }));
    }
    Ok(decls)
}
