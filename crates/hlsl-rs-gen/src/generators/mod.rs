//! Category generators.
//!
//! Each generator is a pure function from a shape to an ordered list of
//! declarations. The tables at the bottom of this module fix which
//! generators run for vectors and matrices, in which order, and which
//! output artifact their declarations land in.
use std::collections::HashSet;

use snafu::prelude::*;

use crate::{
    DuplicateMemberSnafu, Error,
    decl::{Body, Decl, Function, Meta, Param, Receiver, TraitImpl},
    formula::vector_literal,
    shape::{Shape, VectorShape},
    template,
};

mod casts;
mod common;
mod exponential;
mod geometry;
mod layout;
mod legacy;
mod matrix;
mod operators;
mod relational;
mod swizzle;
mod trigonometry;

/// Knobs controlling what gets generated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Emit explicit (possibly lossy or truncating) conversions.
    pub explicit_casts: bool,
    /// Put enumeration and raw-array helpers in their own artifact instead of
    /// the primary one.
    pub separate_extensions: bool,
    /// Path of the crate the generated code is compiled into, as seen from
    /// the generated code itself.
    pub crate_path: String,
    /// Name external consumers use for that crate, used in the registry-info
    /// artifact.
    pub crate_name: String,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            explicit_casts: false,
            separate_extensions: true,
            crate_path: "crate".into(),
            crate_name: "hlsl_rs".into(),
        }
    }
}

impl GenerateOptions {
    /// Path to one of the runtime crate's function traits.
    pub fn function_trait(&self, name: &str) -> String {
        format!("{}::functions::{name}", self.crate_path)
    }
}

/// A functional family of generated members.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    Core,
    Operators,
    Relational,
    Common,
    Exponential,
    Trigonometry,
    Geometry,
    Swizzle,
    Casts,
    Legacy,
    Algebra,
    Extensions,
}

impl Category {
    pub fn title(&self) -> &'static str {
        match self {
            Category::Core => "Fields, constants, constructors and indexing",
            Category::Operators => "Operators",
            Category::Relational => "Relational functions",
            Category::Common => "Common functions",
            Category::Exponential => "Exponential functions",
            Category::Trigonometry => "Trigonometric functions",
            Category::Geometry => "Geometric functions",
            Category::Swizzle => "Swizzles",
            Category::Casts => "Conversions",
            Category::Legacy => "Hashing, equality and collection constructors",
            Category::Algebra => "Linear algebra",
            Category::Extensions => "Enumeration and array extraction",
        }
    }
}

/// The output file a section is written to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ArtifactKind {
    /// Fields, constructors, indexers, operators, casts and core members.
    Primary,
    /// Implementations of the HLSL-style global function traits.
    Functions,
    /// Enumeration and raw-array helpers.
    Extensions,
}

impl ArtifactKind {
    pub fn file_name(&self, shape: &Shape) -> String {
        let stem = shape.hlsl_name();
        match self {
            ArtifactKind::Primary => format!("{stem}.rs"),
            ArtifactKind::Functions => format!("{stem}_fns.rs"),
            ArtifactKind::Extensions => format!("{stem}_ext.rs"),
        }
    }
}

/// The declarations one generator produced for one shape.
#[derive(Clone, Debug, PartialEq)]
pub struct Section {
    pub category: Category,
    pub decls: Vec<Decl>,
}

type Run<S> = fn(S, &GenerateOptions) -> Result<Vec<Decl>, Error>;

struct Generator<S> {
    category: Category,
    artifact: ArtifactKind,
    run: Run<S>,
}

const fn entry<S>(category: Category, artifact: ArtifactKind, run: Run<S>) -> Generator<S> {
    Generator {
        category,
        artifact,
        run,
    }
}

use ArtifactKind::{Extensions as Ext, Functions as Fns, Primary};

const VECTOR_GENERATORS: &[Generator<VectorShape>] = &[
    entry(Category::Core, Primary, layout::vector),
    entry(Category::Operators, Primary, operators::vector),
    entry(Category::Relational, Primary, relational::comparisons),
    entry(Category::Swizzle, Primary, swizzle::vector),
    entry(Category::Casts, Primary, casts::vector),
    entry(Category::Legacy, Primary, legacy::vector),
    entry(Category::Relational, Fns, relational::reductions),
    entry(Category::Common, Fns, common::vector),
    entry(Category::Exponential, Fns, exponential::vector),
    entry(Category::Trigonometry, Fns, trigonometry::vector),
    entry(Category::Geometry, Fns, geometry::vector),
    entry(Category::Algebra, Fns, matrix::outer_product_traits),
    entry(Category::Extensions, Ext, legacy::vector_extensions),
];

const MATRIX_GENERATORS: &[Generator<crate::MatrixShape>] = &[
    entry(Category::Core, Primary, matrix::core),
    entry(Category::Operators, Primary, matrix::operators),
    entry(Category::Algebra, Primary, matrix::algebra),
    entry(Category::Casts, Primary, casts::matrix),
    entry(Category::Legacy, Primary, legacy::matrix),
    entry(Category::Algebra, Fns, matrix::function_traits),
    entry(Category::Extensions, Ext, legacy::matrix_extensions),
];

/// Runs every generator for `shape`, in table order.
///
/// Empty sections are dropped. When extensions are not separate they are
/// assigned to the primary artifact. Fails if two declarations share a
/// signature.
pub fn generate(
    shape: Shape,
    options: &GenerateOptions,
) -> Result<Vec<(ArtifactKind, Section)>, Error> {
    fn collect<S: Copy>(
        table: &[Generator<S>],
        shape: S,
        options: &GenerateOptions,
    ) -> Result<Vec<(ArtifactKind, Section)>, Error> {
        let mut sections = vec![];
        for generator in table {
            let decls = (generator.run)(shape, options)?;
            if decls.is_empty() {
                continue;
            }
            let artifact = match generator.artifact {
                ArtifactKind::Extensions if !options.separate_extensions => ArtifactKind::Primary,
                other => other,
            };
            sections.push((
                artifact,
                Section {
                    category: generator.category,
                    decls,
                },
            ));
        }
        Ok(sections)
    }

    let sections = match shape {
        Shape::Vector(v) => collect(VECTOR_GENERATORS, v, options)?,
        Shape::Matrix(m) => collect(MATRIX_GENERATORS, m, options)?,
    };
    check_unique(&shape.name(), sections.iter().flat_map(|(_, s)| &s.decls))?;
    log::debug!(
        "generated {} declarations for {}",
        sections.iter().map(|(_, s)| s.decls.len()).sum::<usize>(),
        shape.name()
    );
    Ok(sections)
}

/// Fails if two declarations of type `ty` share a signature.
pub fn check_unique<'a>(ty: &str, decls: impl IntoIterator<Item = &'a Decl>) -> Result<(), Error> {
    let mut seen = HashSet::new();
    for decl in decls {
        for signature in decl.signatures() {
            ensure!(
                !seen.contains(&signature),
                DuplicateMemberSnafu {
                    ty,
                    member: signature,
                }
            );
            seen.insert(signature);
        }
    }
    Ok(())
}

/// An argument of a component-wise formula.
#[derive(Clone, Copy, Debug)]
pub(crate) enum Arg<'a> {
    /// A vector expression, read component by component.
    Vector(&'a str),
    /// A scalar expression broadcast to every component.
    Scalar(&'a str),
}

impl Arg<'_> {
    fn component(&self, component: &str) -> String {
        match self {
            Arg::Vector(name) => format!("{name}.{component}"),
            Arg::Scalar(expr) => expr.to_string(),
        }
    }
}

/// Applies `template` to each component of `args`, producing a value of
/// `out`. The argument vectors must have at least `out.len()` components.
pub(crate) fn componentwise(
    out: VectorShape,
    template: &str,
    args: &[Arg<'_>],
) -> Result<String, Error> {
    let components = out
        .components()
        .iter()
        .map(|c| {
            let args = args.iter().map(|a| a.component(c)).collect::<Vec<_>>();
            let args = args.iter().map(String::as_str).collect::<Vec<_>>();
            template::apply(template, &args)
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(vector_literal(out, &components))
}

/// Folds `template` over the components of `args`, combining the results
/// with `joiner`, e.g. `a.x * b.x + a.y * b.y` for a dot product.
pub(crate) fn reduce(
    shape: VectorShape,
    template: &str,
    args: &[Arg<'_>],
    joiner: impl Fn(&str, &str) -> String,
) -> Result<String, Error> {
    let mut acc: Option<String> = None;
    for c in shape.components() {
        let args = args.iter().map(|a| a.component(c)).collect::<Vec<_>>();
        let args = args.iter().map(String::as_str).collect::<Vec<_>>();
        let term = template::apply(template, &args)?;
        acc = Some(match acc {
            None => term,
            Some(acc) => joiner(&acc, &term),
        });
    }
    Ok(acc.unwrap_or_default())
}

/// A component-wise function implementing one of the runtime function traits.
///
/// `self` is the first template argument, followed by `params`. A
/// [`Arg::Vector`] parameter has type `Self`, a [`Arg::Scalar`] one has the
/// component type and is broadcast. The result has the type of `self`.
pub(crate) fn trait_fn(
    shape: VectorShape,
    options: &GenerateOptions,
    trait_name: &str,
    name: &str,
    doc: &str,
    params: &[Arg<'_>],
    template: &str,
) -> Result<Decl, Error> {
    let mut args = vec![Arg::Vector("self")];
    args.extend_from_slice(params);
    let mut decl = FnDecl::new(name).doc(doc);
    for param in params {
        decl = match param {
            Arg::Vector(p) => decl.param(*p, "Self"),
            Arg::Scalar(p) => decl.param(*p, shape.scalar()),
        };
    }
    Ok(decl
        .ret("Self")
        .expr(componentwise(shape, template, &args)?)
        .implements(TraitImpl::new(options.function_trait(trait_name)))
        .build())
}

/// Builder for [`Function`] declarations.
pub(crate) struct FnDecl(Function);

impl FnDecl {
    pub fn new(name: impl Into<String>) -> Self {
        FnDecl(Function {
            meta: Meta::new(name),
            receiver: Receiver::Value,
            generics: None,
            params: vec![],
            ret: None,
            body: Body::Block(vec![]),
            trait_impl: None,
        })
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.0.meta.doc = Some(doc.into());
        self
    }

    pub fn static_(mut self) -> Self {
        self.0.meta.is_static = true;
        self
    }

    pub fn receiver(mut self, receiver: Receiver) -> Self {
        self.0.receiver = receiver;
        self
    }

    pub fn generics(mut self, generics: impl Into<String>) -> Self {
        self.0.generics = Some(generics.into());
        self
    }

    pub fn param(mut self, name: impl Into<String>, ty: impl Into<String>) -> Self {
        self.0.params.push(Param::new(name, ty));
        self
    }

    pub fn ret(mut self, ty: impl Into<String>) -> Self {
        self.0.ret = Some(ty.into());
        self
    }

    pub fn expr(mut self, expr: impl Into<String>) -> Self {
        self.0.body = Body::Expr(expr.into());
        self
    }

    pub fn block(mut self, lines: Vec<String>) -> Self {
        self.0.body = Body::Block(lines);
        self
    }

    pub fn implements(mut self, trait_impl: TraitImpl) -> Self {
        self.0.trait_impl = Some(trait_impl);
        self
    }

    pub fn build(self) -> Decl {
        Decl::Function(self.0)
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{MatrixShape, ScalarKind, TypeRegistry};

    fn vector(kind: ScalarKind, len: usize) -> Shape {
        Shape::Vector(VectorShape::new(kind, len).unwrap())
    }

    fn names(sections: &[(ArtifactKind, Section)], category: Category) -> Vec<String> {
        sections
            .iter()
            .filter(|(_, s)| s.category == category)
            .flat_map(|(_, s)| s.decls.iter().map(|d| d.name().to_string()))
            .collect()
    }

    #[test]
    fn sanity_componentwise() {
        let shape = VectorShape::new(ScalarKind::Float, 3).unwrap();
        let expr =
            componentwise(shape, "$0.max($1)", &[Arg::Vector("self"), Arg::Scalar("low")]).unwrap();
        assert_eq!(
            "Float3 { x: self.x.max(low), y: self.y.max(low), z: self.z.max(low) }",
            expr
        );
    }

    #[test]
    fn sanity_every_registered_shape_generates() {
        let registry = TypeRegistry::build().unwrap();
        let options = GenerateOptions {
            explicit_casts: true,
            ..Default::default()
        };
        for shape in registry.shapes() {
            let sections = generate(*shape, &options).unwrap();
            assert!(!sections.is_empty(), "{}", shape.name());
        }
    }

    #[test]
    fn sanity_generation_is_restartable() {
        let shape = vector(ScalarKind::Double, 4);
        let options = GenerateOptions::default();
        assert_eq!(
            generate(shape, &options).unwrap(),
            generate(shape, &options).unwrap()
        );
    }

    #[test]
    fn sanity_capability_gating() {
        let options = GenerateOptions::default();
        let boolean = generate(vector(ScalarKind::Bool, 2), &options).unwrap();
        assert!(names(&boolean, Category::Exponential).is_empty());
        assert!(names(&boolean, Category::Common).is_empty());
        assert!(names(&boolean, Category::Relational).contains(&"any".to_string()));

        let int = generate(vector(ScalarKind::Int, 3), &options).unwrap();
        let common = names(&int, Category::Common);
        assert!(common.contains(&"abs".to_string()));
        assert!(common.contains(&"clamp".to_string()));
        assert!(!common.contains(&"floor".to_string()));
        assert!(names(&int, Category::Trigonometry).is_empty());

        let uint = generate(vector(ScalarKind::UInt, 3), &options).unwrap();
        assert!(!names(&uint, Category::Common).contains(&"abs".to_string()));
    }

    #[test]
    fn sanity_extensions_toggle() {
        let shape = vector(ScalarKind::Float, 2);
        let separate = generate(shape, &GenerateOptions::default()).unwrap();
        assert!(separate.iter().any(|(a, _)| *a == ArtifactKind::Extensions));

        let merged = generate(
            shape,
            &GenerateOptions {
                separate_extensions: false,
                ..Default::default()
            },
        )
        .unwrap();
        assert!(merged.iter().all(|(a, _)| *a != ArtifactKind::Extensions));
        assert!(
            merged
                .iter()
                .any(|(a, s)| *a == ArtifactKind::Primary && s.category == Category::Extensions)
        );
    }

    #[test]
    fn sanity_explicit_casts_are_toggled() {
        let shape = vector(ScalarKind::Int, 2);
        let off = generate(shape, &GenerateOptions::default()).unwrap();
        assert!(!names(&off, Category::Casts).contains(&"from_float2".to_string()));

        let on = generate(
            shape,
            &GenerateOptions {
                explicit_casts: true,
                ..Default::default()
            },
        )
        .unwrap();
        let casts = names(&on, Category::Casts);
        assert!(casts.contains(&"from_float2".to_string()));
        assert!(casts.contains(&"from_int4".to_string()));
        assert!(!casts.contains(&"from_int2".to_string()));
    }

    #[test]
    fn sanity_duplicate_members_are_rejected() {
        let decl = FnDecl::new("length").ret("f32").expr("0.0").build();
        let err = check_unique("Float2", [&decl, &decl]).unwrap_err();
        assert!(matches!(err, Error::DuplicateMember { .. }), "{err}");
    }

    #[test]
    fn sanity_matrix_products_cover_every_inner_dimension() {
        let shape = Shape::Matrix(MatrixShape::new(ScalarKind::Float, 3, 2).unwrap());
        let sections = generate(shape, &GenerateOptions::default()).unwrap();
        let products = sections
            .iter()
            .flat_map(|(_, s)| &s.decls)
            .filter_map(|d| match d {
                Decl::Operator(op) if op.meta.name == "mul" && op.lhs == "Float3x2" => op.rhs.clone(),
                _ => None,
            })
            .collect::<Vec<_>>();
        for rhs in ["Float2x3", "Float3x3", "Float4x3", "Float3", "f32"] {
            assert!(products.contains(&rhs.to_string()), "missing Float3x2 * {rhs}");
        }
    }
}
