//! The declaration model.
//!
//! Every member of a generated type is one [`Decl`]. The set of node kinds is
//! closed, so the renderer handles each variant exhaustively.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Visibility {
    #[default]
    Public,
    Crate,
    Private,
}

impl Visibility {
    /// The keyword prefix, including a trailing space when non-empty.
    pub fn keyword(&self) -> &'static str {
        match self {
            Visibility::Public => "pub ",
            Visibility::Crate => "pub(crate) ",
            Visibility::Private => "",
        }
    }
}

/// Data shared by every declaration node.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Meta {
    pub name: String,
    pub doc: Option<String>,
    pub visibility: Visibility,
    pub is_static: bool,
    /// Attributes rendered verbatim above the declaration, e.g. `#[inline]`.
    pub attributes: Vec<String>,
}

impl Meta {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn static_(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn attr(mut self, attr: impl Into<String>) -> Self {
        self.attributes.push(attr.into());
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub ty: String,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }
}

/// How an instance function takes `self`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Receiver {
    Value,
    Ref,
    RefMut,
}

impl Receiver {
    pub fn as_str(&self) -> &'static str {
        match self {
            Receiver::Value => "self",
            Receiver::Ref => "&self",
            Receiver::RefMut => "&mut self",
        }
    }
}

/// A function body: either a single expression or a list of statements
/// whose last line is the tail expression (if any).
#[derive(Clone, Debug, PartialEq)]
pub enum Body {
    Expr(String),
    Block(Vec<String>),
}

impl Body {
    pub fn lines(&self) -> Vec<&str> {
        match self {
            Body::Expr(expr) => vec![expr.as_str()],
            Body::Block(lines) => lines.iter().map(String::as_str).collect(),
        }
    }
}

/// A trait being implemented, e.g. `crate::functions::Clamp<f32>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraitImpl {
    pub path: String,
    /// Associated types set by the implementation, as `(name, type)`.
    pub assoc_types: Vec<(String, String)>,
    /// The implementing type when it is not the generated type itself, e.g.
    /// `[f32; 2]` for `impl From<Float2> for [f32; 2]`.
    pub for_type: Option<String>,
}

impl TraitImpl {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            assoc_types: vec![],
            for_type: None,
        }
    }

    pub fn with_type(mut self, name: impl Into<String>, ty: impl Into<String>) -> Self {
        self.assoc_types.push((name.into(), ty.into()));
        self
    }

    pub fn for_type(mut self, ty: impl Into<String>) -> Self {
        self.for_type = Some(ty.into());
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mutability {
    /// A value fixed at compile time. Static constant fields render as
    /// associated constants.
    Const,
    Mutable,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    pub meta: Meta,
    pub ty: String,
    pub mutability: Mutability,
    /// Initial value, required for static fields.
    pub value: Option<String>,
}

/// A read accessor with an optional write accessor named `set_<name>`.
#[derive(Clone, Debug, PartialEq)]
pub struct Property {
    pub meta: Meta,
    pub ty: String,
    pub getter: String,
    /// Statements writing `value` into `self`.
    pub setter: Option<Vec<String>>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ConstructorInit {
    /// Forward to another constructor, e.g. `Self::new(v, v)`.
    Delegate(String),
    Body(Body),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Constructor {
    pub meta: Meta,
    pub params: Vec<Param>,
    pub init: ConstructorInit,
    pub is_const: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Function {
    pub meta: Meta,
    pub receiver: Receiver,
    /// Generic parameter list without angle brackets.
    pub generics: Option<String>,
    pub params: Vec<Param>,
    pub ret: Option<String>,
    pub body: Body,
    /// Present when this function overrides a trait member.
    pub trait_impl: Option<TraitImpl>,
}

impl Function {
    pub fn is_override(&self) -> bool {
        self.trait_impl.is_some()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
}

impl BinaryOp {
    /// The `std::ops` trait name.
    pub fn trait_name(&self) -> &'static str {
        match self {
            BinaryOp::Add => "Add",
            BinaryOp::Sub => "Sub",
            BinaryOp::Mul => "Mul",
            BinaryOp::Div => "Div",
            BinaryOp::Rem => "Rem",
            BinaryOp::BitAnd => "BitAnd",
            BinaryOp::BitOr => "BitOr",
            BinaryOp::BitXor => "BitXor",
            BinaryOp::Shl => "Shl",
            BinaryOp::Shr => "Shr",
        }
    }

    pub fn method(&self) -> &'static str {
        match self {
            BinaryOp::Add => "add",
            BinaryOp::Sub => "sub",
            BinaryOp::Mul => "mul",
            BinaryOp::Div => "div",
            BinaryOp::Rem => "rem",
            BinaryOp::BitAnd => "bitand",
            BinaryOp::BitOr => "bitor",
            BinaryOp::BitXor => "bitxor",
            BinaryOp::Shl => "shl",
            BinaryOp::Shr => "shr",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "^",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Neg,
    Not,
}

/// The operator an [`Operator`] node implements.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperatorSymbol {
    Binary(BinaryOp),
    /// The compound assignment form, e.g. `+=`.
    Assign(BinaryOp),
    Unary(UnaryOp),
    Index,
    IndexMut,
}

impl OperatorSymbol {
    pub fn trait_name(&self) -> String {
        match self {
            OperatorSymbol::Binary(op) => op.trait_name().to_string(),
            OperatorSymbol::Assign(op) => format!("{}Assign", op.trait_name()),
            OperatorSymbol::Unary(UnaryOp::Neg) => "Neg".into(),
            OperatorSymbol::Unary(UnaryOp::Not) => "Not".into(),
            OperatorSymbol::Index => "Index".into(),
            OperatorSymbol::IndexMut => "IndexMut".into(),
        }
    }

    pub fn method(&self) -> String {
        match self {
            OperatorSymbol::Binary(op) => op.method().to_string(),
            OperatorSymbol::Assign(op) => format!("{}_assign", op.method()),
            OperatorSymbol::Unary(UnaryOp::Neg) => "neg".into(),
            OperatorSymbol::Unary(UnaryOp::Not) => "not".into(),
            OperatorSymbol::Index => "index".into(),
            OperatorSymbol::IndexMut => "index_mut".into(),
        }
    }
}

/// An operator overload on the generated type.
///
/// `lhs` is the implementing type, which is the generated type itself or,
/// for a scalar broadcast on the left, the scalar primitive.
#[derive(Clone, Debug, PartialEq)]
pub struct Operator {
    pub meta: Meta,
    pub symbol: OperatorSymbol,
    pub lhs: String,
    /// The right operand (or index) type; absent for unary operators.
    pub rhs: Option<String>,
    /// `Output` for value-producing operators, the element type for
    /// indexing. Absent for compound assignment.
    pub output: Option<String>,
    pub body: Body,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CastKind {
    /// Lossless, rendered as a `From` implementation.
    Implicit,
    /// Possibly lossy, rendered as an associated `from_*` function.
    Explicit,
}

/// A conversion into the generated type from `source`. The body reads the
/// converted value from `value`.
#[derive(Clone, Debug, PartialEq)]
pub struct Cast {
    pub meta: Meta,
    pub kind: CastKind,
    pub source: String,
    pub body: Body,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Decl {
    Field(Field),
    Property(Property),
    Constructor(Constructor),
    Function(Function),
    Operator(Operator),
    Cast(Cast),
}

impl Decl {
    pub fn meta(&self) -> &Meta {
        match self {
            Decl::Field(f) => &f.meta,
            Decl::Property(p) => &p.meta,
            Decl::Constructor(c) => &c.meta,
            Decl::Function(f) => &f.meta,
            Decl::Operator(o) => &o.meta,
            Decl::Cast(c) => &c.meta,
        }
    }

    pub fn name(&self) -> &str {
        &self.meta().name
    }

    /// Keys identifying this declaration within its type. Rust has no
    /// overloading, so inherent members are keyed by name alone while trait
    /// members and operators include their parameter types. Two declarations
    /// of one type must never share a key.
    pub fn signatures(&self) -> Vec<String> {
        fn types(params: &[Param]) -> String {
            params
                .iter()
                .map(|p| p.ty.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        }
        match self {
            Decl::Field(f) if f.meta.is_static => vec![format!("self::{}", f.meta.name)],
            Decl::Field(f) => vec![format!("field::{}", f.meta.name)],
            Decl::Property(p) => {
                let mut keys = vec![format!("self::{}", p.meta.name)];
                if p.setter.is_some() {
                    keys.push(format!("self::set_{}", p.meta.name));
                }
                keys
            }
            Decl::Constructor(c) => vec![format!("self::{}", c.meta.name)],
            Decl::Function(f) => match &f.trait_impl {
                Some(t) => vec![format!(
                    "{}{}::{}({})",
                    t.for_type.as_deref().map(|ty| format!("{ty}: ")).unwrap_or_default(),
                    t.path,
                    f.meta.name,
                    types(&f.params)
                )],
                None => vec![format!("self::{}", f.meta.name)],
            },
            Decl::Operator(o) => vec![format!(
                "{}::{}({})",
                o.lhs,
                o.symbol.trait_name(),
                o.rhs.as_deref().unwrap_or_default()
            )],
            Decl::Cast(c) => match c.kind {
                CastKind::Implicit => vec![format!("From<{}>", c.source)],
                CastKind::Explicit => vec![format!("self::{}", c.meta.name)],
            },
        }
    }
}
