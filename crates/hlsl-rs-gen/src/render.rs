//! Renders sections of declarations into Rust source.
//!
//! Output of one artifact, in order:
//! * a banner naming the generator,
//! * the struct definition, in the primary artifact only,
//! * per section, a `// <Category>` comment, one inherent `impl` holding
//!   constants, constructors, accessors, inherent functions and explicit
//!   casts, then the trait, operator and `From` implementations of the
//!   section in declaration order.
//!
//! The finished text is parsed with `syn` before it is returned.
use snafu::prelude::*;

use crate::{
    Error, MalformedOutputSnafu, UnsupportedDeclSnafu,
    decl::{
        Cast, CastKind, Constructor, ConstructorInit, Decl, Field, Function, Meta, Mutability,
        Operator, OperatorSymbol, Param, Property, TraitImpl,
    },
    generators::{ArtifactKind, Section},
    shape::Shape,
};

/// First line of every generated file.
pub const BANNER: &str = "// Generated by hlsl-rs-gen. Do not edit.";

enum Line {
    IndentInc,
    IndentDec,
    Source(String),
}

/// Rust source under construction.
#[derive(Default)]
pub struct GeneratedCode {
    lines: Vec<Line>,
}

impl GeneratedCode {
    pub fn line(&mut self, source: impl Into<String>) {
        self.lines.push(Line::Source(source.into()));
    }

    /// Inserts an empty line unless the previous line is empty, opens a
    /// block or is a comment attached to what follows.
    pub fn blank(&mut self) {
        let previous = self.lines.iter().rev().find_map(|line| match line {
            Line::Source(s) => Some(s.as_str()),
            _ => None,
        });
        match previous {
            Some(p) if !p.is_empty() && !p.ends_with('{') && !p.starts_with("//") => self.line(""),
            _ => {}
        }
    }

    pub fn doc(&mut self, doc: Option<&str>) {
        for line in doc.into_iter().flat_map(str::lines) {
            if line.is_empty() {
                self.line("///");
            } else {
                self.line(format!("/// {line}"));
            }
        }
    }

    /// Performs the inner function with incremented indentation, then
    /// resets it.
    pub fn indented<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        self.lines.push(Line::IndentInc);
        let result = f(self);
        self.lines.push(Line::IndentDec);
        result
    }

    /// Writes `header {`, the inner function indented, then `}`.
    pub fn block<T>(
        &mut self,
        header: impl AsRef<str>,
        f: impl FnOnce(&mut Self) -> Result<T, Error>,
    ) -> Result<T, Error> {
        self.line(format!("{} {{", header.as_ref()));
        let result = self.indented(f);
        self.line("}");
        result
    }

    pub fn source(&self) -> String {
        let mut indent = 0usize;
        let mut out = String::new();
        for line in &self.lines {
            match line {
                Line::IndentInc => indent += 1,
                Line::IndentDec => indent = indent.saturating_sub(1),
                Line::Source(s) if s.is_empty() => out.push('\n'),
                Line::Source(s) => {
                    out.push_str(&"    ".repeat(indent));
                    out.push_str(s);
                    out.push('\n');
                }
            }
        }
        out
    }
}

/// Parses a finished artifact, failing with [`Error::MalformedOutput`].
pub fn validate(artifact: &str, source: &str) -> Result<(), Error> {
    syn::parse_file(source).context(MalformedOutputSnafu { artifact })?;
    Ok(())
}

/// Renders the `sections` that belong to `artifact` of `shape`.
pub fn render_artifact(
    shape: Shape,
    artifact: ArtifactKind,
    sections: &[(ArtifactKind, Section)],
) -> Result<String, Error> {
    let ty = shape.name();
    let file_name = artifact.file_name(&shape);
    let sections = sections
        .iter()
        .filter(|(a, _)| *a == artifact)
        .map(|(_, s)| s)
        .collect::<Vec<_>>();

    let mut code = GeneratedCode::default();
    code.line(BANNER);
    code.line(format!("// {}: {}", shape.hlsl_name(), describe(artifact)));

    let fields = sections
        .iter()
        .flat_map(|s| &s.decls)
        .filter_map(|d| match d {
            Decl::Field(f) if !f.meta.is_static => Some(f),
            _ => None,
        })
        .collect::<Vec<_>>();
    if artifact == ArtifactKind::Primary {
        code.line("");
        render_struct(&mut code, shape, &fields)?;
    } else if let Some(field) = fields.first() {
        return UnsupportedDeclSnafu {
            ty,
            note: format!("instance field `{}` outside the primary artifact", field.meta.name),
        }
        .fail();
    }

    for section in sections {
        render_section(&mut code, &ty, section)?;
    }

    let source = code.source();
    validate(&file_name, &source)?;
    Ok(source)
}

fn describe(artifact: ArtifactKind) -> &'static str {
    match artifact {
        ArtifactKind::Primary => "definition and core members",
        ArtifactKind::Functions => "function trait implementations",
        ArtifactKind::Extensions => "enumeration and array extensions",
    }
}

fn render_struct(code: &mut GeneratedCode, shape: Shape, fields: &[&Field]) -> Result<(), Error> {
    let mut derives = vec!["Clone", "Copy", "Debug", "Default"];
    if !shape.kind().capabilities().is_floating_point {
        derives.push("Eq");
    }
    code.doc(Some(&shape.doc()));
    code.line("#[repr(C)]");
    code.line(format!("#[derive({})]", derives.join(", ")));
    code.block(format!("pub struct {}", shape.name()), |code| {
        for field in fields {
            code.doc(field.meta.doc.as_deref());
            code.line(format!("{}{}: {},", field.meta.visibility.keyword(), field.meta.name, field.ty));
        }
        Ok(())
    })
}

/// A trait implementation collected from the functions of one section.
struct TraitGroup<'a> {
    trait_impl: &'a TraitImpl,
    functions: Vec<&'a Function>,
}

enum Item<'a> {
    Trait(TraitGroup<'a>),
    Operator(&'a Operator),
    From(&'a Cast),
}

fn render_section(code: &mut GeneratedCode, ty: &str, section: &Section) -> Result<(), Error> {
    let mut inherent = vec![];
    let mut items: Vec<Item<'_>> = vec![];
    for decl in &section.decls {
        match decl {
            Decl::Field(f) if !f.meta.is_static => {}
            Decl::Function(f) => match &f.trait_impl {
                Some(t) => {
                    let existing = items.iter_mut().find_map(|item| match item {
                        Item::Trait(group)
                            if group.trait_impl.path == t.path
                                && group.trait_impl.for_type == t.for_type =>
                        {
                            Some(group)
                        }
                        _ => None,
                    });
                    match existing {
                        Some(group) => group.functions.push(f),
                        None => items.push(Item::Trait(TraitGroup {
                            trait_impl: t,
                            functions: vec![f],
                        })),
                    }
                }
                None => inherent.push(decl),
            },
            Decl::Operator(op) => items.push(Item::Operator(op)),
            Decl::Cast(c) if c.kind == CastKind::Implicit => items.push(Item::From(c)),
            _ => inherent.push(decl),
        }
    }

    code.line("");
    code.line(format!("// {}", section.category.title()));
    if !inherent.is_empty() {
        code.block(format!("impl {ty}"), |code| {
            for decl in inherent {
                code.blank();
                render_inherent(code, ty, decl)?;
            }
            Ok(())
        })?;
    }
    for item in items {
        code.blank();
        match item {
            Item::Trait(group) => render_trait(code, ty, group)?,
            Item::Operator(op) => render_operator(code, op)?,
            Item::From(cast) => render_from(code, ty, cast)?,
        }
    }
    Ok(())
}

fn attributes(code: &mut GeneratedCode, meta: &Meta) {
    code.doc(meta.doc.as_deref());
    for attr in &meta.attributes {
        code.line(attr);
    }
}

fn params(receiver: Option<&str>, params: &[Param]) -> String {
    receiver
        .map(str::to_string)
        .into_iter()
        .chain(params.iter().map(|p| format!("{}: {}", p.name, p.ty)))
        .collect::<Vec<_>>()
        .join(", ")
}

fn body(code: &mut GeneratedCode, lines: &[&str]) {
    for line in lines {
        code.line(*line);
    }
}

fn render_inherent(code: &mut GeneratedCode, ty: &str, decl: &Decl) -> Result<(), Error> {
    match decl {
        Decl::Field(field) => render_const(code, ty, field),
        Decl::Constructor(constructor) => render_constructor(code, constructor),
        Decl::Property(property) => render_property(code, property),
        Decl::Function(function) => render_function(code, function, true),
        Decl::Cast(cast) => {
            attributes(code, &cast.meta);
            code.line("#[inline]");
            code.block(
                format!(
                    "{}fn {}(value: {}) -> Self",
                    cast.meta.visibility.keyword(),
                    cast.meta.name,
                    cast.source
                ),
                |code| {
                    body(code, &cast.body.lines());
                    Ok(())
                },
            )
        }
        Decl::Operator(_) => UnsupportedDeclSnafu {
            ty,
            note: "operators are rendered as trait implementations",
        }
        .fail(),
    }
}

fn render_const(code: &mut GeneratedCode, ty: &str, field: &Field) -> Result<(), Error> {
    ensure!(
        field.mutability == Mutability::Const,
        UnsupportedDeclSnafu {
            ty,
            note: format!("static field `{}` must be constant", field.meta.name),
        }
    );
    let value = field.value.as_deref().context(UnsupportedDeclSnafu {
        ty,
        note: format!("constant `{}` has no value", field.meta.name),
    })?;
    attributes(code, &field.meta);
    code.line(format!(
        "{}const {}: {} = {value};",
        field.meta.visibility.keyword(),
        field.meta.name,
        field.ty
    ));
    Ok(())
}

fn render_constructor(code: &mut GeneratedCode, constructor: &Constructor) -> Result<(), Error> {
    attributes(code, &constructor.meta);
    code.line("#[inline]");
    code.block(
        format!(
            "{}{}fn {}({}) -> Self",
            constructor.meta.visibility.keyword(),
            if constructor.is_const { "const " } else { "" },
            constructor.meta.name,
            params(None, &constructor.params)
        ),
        |code| {
            match &constructor.init {
                ConstructorInit::Delegate(call) => code.line(call),
                ConstructorInit::Body(b) => body(code, &b.lines()),
            }
            Ok(())
        },
    )
}

fn render_property(code: &mut GeneratedCode, property: &Property) -> Result<(), Error> {
    let vis = property.meta.visibility.keyword();
    let name = &property.meta.name;
    attributes(code, &property.meta);
    code.line("#[inline]");
    code.block(format!("{vis}fn {name}(&self) -> {}", property.ty), |code| {
        code.line(&property.getter);
        Ok(())
    })?;
    if let Some(setter) = &property.setter {
        code.blank();
        code.line(format!("/// Writes `value` to the components read by [`Self::{name}`]."));
        code.line("#[inline]");
        code.block(
            format!("{vis}fn set_{name}(&mut self, value: {})", property.ty),
            |code| {
                for statement in setter {
                    code.line(statement);
                }
                Ok(())
            },
        )?;
    }
    Ok(())
}

fn render_function(code: &mut GeneratedCode, function: &Function, inherent: bool) -> Result<(), Error> {
    let meta = &function.meta;
    attributes(code, meta);
    code.line("#[inline]");
    let vis = if inherent { meta.visibility.keyword() } else { "" };
    let generics = function
        .generics
        .as_ref()
        .map(|g| format!("<{g}>"))
        .unwrap_or_default();
    let receiver = (!meta.is_static).then(|| function.receiver.as_str());
    let ret = function
        .ret
        .as_ref()
        .map(|r| format!(" -> {r}"))
        .unwrap_or_default();
    code.block(
        format!(
            "{vis}fn {}{generics}({}){ret}",
            meta.name,
            params(receiver, &function.params)
        ),
        |code| {
            body(code, &function.body.lines());
            Ok(())
        },
    )
}

fn render_trait(code: &mut GeneratedCode, ty: &str, group: TraitGroup<'_>) -> Result<(), Error> {
    let implementor = group.trait_impl.for_type.as_deref().unwrap_or(ty);
    code.block(format!("impl {} for {implementor}", group.trait_impl.path), |code| {
        let mut assoc_types: Vec<&(String, String)> = vec![];
        for function in &group.functions {
            for assoc in function.trait_impl.iter().flat_map(|t| &t.assoc_types) {
                if !assoc_types.contains(&assoc) {
                    assoc_types.push(assoc);
                }
            }
        }
        for (name, assoc_ty) in assoc_types {
            code.line(format!("type {name} = {assoc_ty};"));
        }
        for function in group.functions {
            code.blank();
            render_function(code, function, false)?;
        }
        Ok(())
    })
}

fn render_operator(code: &mut GeneratedCode, op: &Operator) -> Result<(), Error> {
    let trait_name = op.symbol.trait_name();
    let generic = op.rhs.as_ref().map(|r| format!("<{r}>")).unwrap_or_default();
    let rhs = op.rhs.as_deref().unwrap_or_default();
    let output = op.output.as_deref().unwrap_or("Self");
    let signature = match op.symbol {
        OperatorSymbol::Binary(_) => format!("(self, rhs: {rhs}) -> {output}"),
        OperatorSymbol::Assign(_) => format!("(&mut self, rhs: {rhs})"),
        OperatorSymbol::Unary(_) => format!("(self) -> {output}"),
        OperatorSymbol::Index => format!("(&self, index: {rhs}) -> &Self::Output"),
        OperatorSymbol::IndexMut => format!("(&mut self, index: {rhs}) -> &mut Self::Output"),
    };
    code.block(
        format!("impl std::ops::{trait_name}{generic} for {}", op.lhs),
        |code| {
            match op.symbol {
                OperatorSymbol::Assign(_) | OperatorSymbol::IndexMut => {}
                _ => {
                    code.line(format!("type Output = {output};"));
                    code.blank();
                }
            }
            attributes(code, &op.meta);
            code.line("#[inline]");
            code.block(format!("fn {}{signature}", op.symbol.method()), |code| {
                body(code, &op.body.lines());
                Ok(())
            })
        },
    )
}

fn render_from(code: &mut GeneratedCode, ty: &str, cast: &Cast) -> Result<(), Error> {
    code.doc(cast.meta.doc.as_deref());
    code.block(format!("impl From<{}> for {ty}", cast.source), |code| {
        code.line("#[inline]");
        code.block(format!("fn from(value: {}) -> Self", cast.source), |code| {
            body(code, &cast.body.lines());
            Ok(())
        })
    })
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        ScalarKind, VectorShape,
        decl::{Body, Receiver, UnaryOp},
        generators::{Category, FnDecl, GenerateOptions, generate},
    };

    fn float2() -> Shape {
        Shape::Vector(VectorShape::new(ScalarKind::Float, 2).unwrap())
    }

    #[test]
    fn sanity_render_section() {
        let section = Section {
            category: Category::Geometry,
            decls: vec![
                FnDecl::new("dot")
                    .param("rhs", "Self")
                    .ret("Self::Scalar")
                    .expr("self.x * rhs.x + self.y * rhs.y")
                    .implements(TraitImpl::new("crate::functions::Dot").with_type("Scalar", "f32"))
                    .build(),
            ],
        };
        let source =
            render_artifact(float2(), ArtifactKind::Functions, &[(ArtifactKind::Functions, section)])
                .unwrap();
        assert_eq!(
            r#"// Generated by hlsl-rs-gen. Do not edit.
// float2: function trait implementations

// Geometric functions
impl crate::functions::Dot for Float2 {
    type Scalar = f32;

    #[inline]
    fn dot(self, rhs: Self) -> Self::Scalar {
        self.x * rhs.x + self.y * rhs.y
    }
}
"#,
            source
        );
    }

    #[test]
    fn sanity_render_operator_and_const() {
        let section = Section {
            category: Category::Core,
            decls: vec![
                Decl::Field(Field {
                    meta: Meta::new("x"),
                    ty: "f32".into(),
                    mutability: Mutability::Mutable,
                    value: None,
                }),
                Decl::Field(Field {
                    meta: Meta::new("y"),
                    ty: "f32".into(),
                    mutability: Mutability::Mutable,
                    value: None,
                }),
                Decl::Field(Field {
                    meta: Meta::new("ZERO").static_(),
                    ty: "Self".into(),
                    mutability: Mutability::Const,
                    value: Some("Float2 { x: 0.0, y: 0.0 }".into()),
                }),
                Decl::Operator(Operator {
                    meta: Meta::new("neg"),
                    symbol: OperatorSymbol::Unary(UnaryOp::Neg),
                    lhs: "Float2".into(),
                    rhs: None,
                    output: Some("Float2".into()),
                    body: Body::Expr("Float2 { x: -self.x, y: -self.y }".into()),
                }),
            ],
        };
        let source =
            render_artifact(float2(), ArtifactKind::Primary, &[(ArtifactKind::Primary, section)])
                .unwrap();
        assert_eq!(
            r#"// Generated by hlsl-rs-gen. Do not edit.
// float2: definition and core members

/// A 2-component vector of `f32`, HLSL `float2`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default)]
pub struct Float2 {
    pub x: f32,
    pub y: f32,
}

// Fields, constants, constructors and indexing
impl Float2 {
    pub const ZERO: Self = Float2 { x: 0.0, y: 0.0 };
}

impl std::ops::Neg for Float2 {
    type Output = Float2;

    #[inline]
    fn neg(self) -> Float2 {
        Float2 { x: -self.x, y: -self.y }
    }
}
"#,
            source
        );
    }

    #[test]
    fn sanity_static_mutable_field_is_rejected() {
        let section = Section {
            category: Category::Core,
            decls: vec![Decl::Field(Field {
                meta: Meta::new("COUNTER").static_(),
                ty: "u32".into(),
                mutability: Mutability::Mutable,
                value: Some("0".into()),
            })],
        };
        let err = render_artifact(float2(), ArtifactKind::Primary, &[(ArtifactKind::Primary, section)])
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedDecl { .. }), "{err}");
    }

    #[test]
    fn sanity_malformed_body_is_rejected() {
        let section = Section {
            category: Category::Common,
            decls: vec![
                FnDecl::new("broken")
                    .receiver(Receiver::Ref)
                    .ret("f32")
                    .block(vec!["let a = ;".into()])
                    .build(),
            ],
        };
        let err = render_artifact(float2(), ArtifactKind::Primary, &[(ArtifactKind::Primary, section)])
            .unwrap_err();
        assert!(matches!(err, Error::MalformedOutput { .. }), "{err}");
    }

    #[test]
    fn sanity_every_artifact_of_a_shape_parses() {
        let options = GenerateOptions {
            explicit_casts: true,
            ..Default::default()
        };
        for shape in [
            float2(),
            Shape::Vector(VectorShape::new(ScalarKind::Int, 4).unwrap()),
            Shape::Vector(VectorShape::new(ScalarKind::Bool, 3).unwrap()),
            Shape::Matrix(crate::MatrixShape::new(ScalarKind::Double, 4, 3).unwrap()),
            Shape::Matrix(crate::MatrixShape::new(ScalarKind::UInt, 2, 2).unwrap()),
        ] {
            let sections = generate(shape, &options).unwrap();
            for artifact in [ArtifactKind::Primary, ArtifactKind::Functions, ArtifactKind::Extensions] {
                render_artifact(shape, artifact, &sections).unwrap();
            }
        }
    }

    #[test]
    fn sanity_trait_groups_share_one_impl() {
        let shape = float2();
        let sections = generate(shape, &GenerateOptions::default()).unwrap();
        let source = render_artifact(shape, ArtifactKind::Extensions, &sections).unwrap();
        assert_eq!(1, source.matches("impl IntoIterator for Float2 {").count());
        assert!(source.contains("impl From<Float2> for [f32; 2] {"));
        assert!(source.contains("    type IntoIter = std::array::IntoIter<f32, 2>;"));
    }
}
