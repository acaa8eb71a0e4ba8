//! Component-wise comparisons and boolean reductions.
use crate::{
    Error,
    decl::{Decl, TraitImpl},
    shape::VectorShape,
};

use super::{Arg, FnDecl, GenerateOptions, componentwise, reduce};

const EQUALITY: [(&str, &str, &str); 2] = [
    ("cmp_eq", "==", "equal to"),
    ("cmp_ne", "!=", "not equal to"),
];

const ORDERING: [(&str, &str, &str); 4] = [
    ("cmp_lt", "<", "less than"),
    ("cmp_le", "<=", "less than or equal to"),
    ("cmp_gt", ">", "greater than"),
    ("cmp_ge", ">=", "greater than or equal to"),
];

pub(crate) fn comparisons(shape: VectorShape, _options: &GenerateOptions) -> Result<Vec<Decl>, Error> {
    let caps = shape.kind().capabilities();
    let mask = shape.mask();
    let ordering: &[_] = if caps.has_comparisons { &ORDERING } else { &[] };
    EQUALITY
        .iter()
        .chain(ordering)
        .map(|(name, symbol, words)| {
            Ok(FnDecl::new(*name)
                .doc(format!(
                    "Returns a mask with each component set when `self` is {words} `rhs` in that component."
                ))
                .param("rhs", "Self")
                .ret(mask.name())
                .expr(componentwise(
                    mask,
                    &format!("($0 {symbol} $1)"),
                    &[Arg::Vector("self"), Arg::Vector("rhs")],
                )?)
                .build())
        })
        .collect()
}

/// `any` and `all` on boolean vectors.
pub(crate) fn reductions(shape: VectorShape, options: &GenerateOptions) -> Result<Vec<Decl>, Error> {
    if !shape.kind().capabilities().is_boolean {
        return Ok(vec![]);
    }
    [("any", "Any", "||"), ("all", "All", "&&")]
        .into_iter()
        .map(|(name, trait_name, joiner)| {
            Ok(FnDecl::new(name)
                .ret("bool")
                .expr(reduce(shape, "$0", &[Arg::Vector("self")], |a, b| {
                    format!("{a} {joiner} {b}")
                })?)
                .implements(TraitImpl::new(options.function_trait(trait_name)))
                .build())
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{ScalarKind, decl::Body};

    #[test]
    fn sanity_comparisons_return_masks() {
        let shape = VectorShape::new(ScalarKind::Double, 2).unwrap();
        let decls = comparisons(shape, &GenerateOptions::default()).unwrap();
        assert_eq!(6, decls.len());
        let Decl::Function(lt) = &decls[2] else {
            panic!("expected a function");
        };
        assert_eq!("cmp_lt", lt.meta.name);
        assert_eq!(Some("Bool2".to_string()), lt.ret);
        assert_eq!(
            Body::Expr("Bool2 { x: (self.x < rhs.x), y: (self.y < rhs.y) }".into()),
            lt.body
        );
    }

    #[test]
    fn sanity_bool_vectors_have_no_ordering() {
        let shape = VectorShape::new(ScalarKind::Bool, 4).unwrap();
        let decls = comparisons(shape, &GenerateOptions::default()).unwrap();
        let names = decls.iter().map(Decl::name).collect::<Vec<_>>();
        assert_eq!(vec!["cmp_eq", "cmp_ne"], names);
    }

    #[test]
    fn sanity_reductions() {
        let shape = VectorShape::new(ScalarKind::Bool, 3).unwrap();
        let decls = reductions(shape, &GenerateOptions::default()).unwrap();
        let Decl::Function(any) = &decls[0] else {
            panic!("expected a function");
        };
        assert_eq!(Body::Expr("self.x || self.y || self.z".into()), any.body);
        assert_eq!(
            "crate::functions::Any",
            any.trait_impl.as_ref().unwrap().path
        );

        let float = VectorShape::new(ScalarKind::Float, 3).unwrap();
        assert!(reductions(float, &GenerateOptions::default()).unwrap().is_empty());
    }
}
