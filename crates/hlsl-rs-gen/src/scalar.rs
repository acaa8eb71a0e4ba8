//! Scalar kinds and their capability table.

/// The component type of a generated vector or matrix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ScalarKind {
    Bool,
    Int,
    UInt,
    Float,
    Double,
}

/// Which member families are legal to generate for a scalar kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Capabilities {
    pub has_arithmetic: bool,
    pub is_integer: bool,
    pub is_floating_point: bool,
    pub is_signed: bool,
    pub is_boolean: bool,
    /// Supports the ordering comparisons `<`, `<=`, `>` and `>=`.
    pub has_comparisons: bool,
}

/// A binary operation on two scalars of the same kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Arith {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

/// Implicit (lossless) promotions between scalar kinds, as `(from, to)`.
pub const IMPLICIT_PROMOTIONS: &[(ScalarKind, ScalarKind)] = &[
    (ScalarKind::Int, ScalarKind::Float),
    (ScalarKind::Int, ScalarKind::Double),
    (ScalarKind::UInt, ScalarKind::Float),
    (ScalarKind::UInt, ScalarKind::Double),
    (ScalarKind::Float, ScalarKind::Double),
];

impl ScalarKind {
    pub const ALL: [ScalarKind; 5] = [
        ScalarKind::Bool,
        ScalarKind::Int,
        ScalarKind::UInt,
        ScalarKind::Float,
        ScalarKind::Double,
    ];

    pub const fn capabilities(self) -> Capabilities {
        match self {
            ScalarKind::Bool => Capabilities {
                has_arithmetic: false,
                is_integer: false,
                is_floating_point: false,
                is_signed: false,
                is_boolean: true,
                has_comparisons: false,
            },
            ScalarKind::Int => Capabilities {
                has_arithmetic: true,
                is_integer: true,
                is_floating_point: false,
                is_signed: true,
                is_boolean: false,
                has_comparisons: true,
            },
            ScalarKind::UInt => Capabilities {
                has_arithmetic: true,
                is_integer: true,
                is_floating_point: false,
                is_signed: false,
                is_boolean: false,
                has_comparisons: true,
            },
            ScalarKind::Float | ScalarKind::Double => Capabilities {
                has_arithmetic: true,
                is_integer: false,
                is_floating_point: true,
                is_signed: true,
                is_boolean: false,
                has_comparisons: true,
            },
        }
    }

    /// The Rust primitive backing this kind.
    pub const fn rust_type(self) -> &'static str {
        match self {
            ScalarKind::Bool => "bool",
            ScalarKind::Int => "i32",
            ScalarKind::UInt => "u32",
            ScalarKind::Float => "f32",
            ScalarKind::Double => "f64",
        }
    }

    /// The HLSL spelling, e.g. `float` in `float3`.
    pub const fn hlsl_name(self) -> &'static str {
        match self {
            ScalarKind::Bool => "bool",
            ScalarKind::Int => "int",
            ScalarKind::UInt => "uint",
            ScalarKind::Float => "float",
            ScalarKind::Double => "double",
        }
    }

    /// Prefix of derived Rust type names, e.g. `Float` in `Float3`.
    pub const fn type_prefix(self) -> &'static str {
        match self {
            ScalarKind::Bool => "Bool",
            ScalarKind::Int => "Int",
            ScalarKind::UInt => "UInt",
            ScalarKind::Float => "Float",
            ScalarKind::Double => "Double",
        }
    }

    pub const fn zero(self) -> &'static str {
        match self {
            ScalarKind::Bool => "false",
            ScalarKind::Int | ScalarKind::UInt => "0",
            ScalarKind::Float | ScalarKind::Double => "0.0",
        }
    }

    pub const fn one(self) -> &'static str {
        match self {
            ScalarKind::Bool => "true",
            ScalarKind::Int | ScalarKind::UInt => "1",
            ScalarKind::Float | ScalarKind::Double => "1.0",
        }
    }

    /// A typed literal for a small integral constant, suffixed so that it
    /// never needs inference, e.g. `2.0_f32` or `3_i32`.
    pub fn literal(self, value: i64) -> String {
        match self {
            ScalarKind::Bool => (value != 0).to_string(),
            ScalarKind::Float | ScalarKind::Double => {
                format!("{value}.0_{}", self.rust_type())
            }
            ScalarKind::Int | ScalarKind::UInt => format!("{value}_{}", self.rust_type()),
        }
    }

    /// Multiplier used when folding component hashes together.
    pub const fn hash_multiplier(self) -> u64 {
        match self {
            ScalarKind::Bool => 31,
            ScalarKind::Int => 397,
            ScalarKind::UInt => 401,
            ScalarKind::Float => 0x0100_0193,
            ScalarKind::Double => 0x0000_0100_0000_01b3,
        }
    }

    /// Expression hashing a single component into a `u64`.
    pub fn component_hash(self, expr: &str) -> String {
        match self {
            ScalarKind::Bool => format!("({expr} as u64)"),
            ScalarKind::Int => format!("({expr} as u32 as u64)"),
            ScalarKind::UInt => format!("({expr} as u64)"),
            ScalarKind::Float => format!("({expr}.to_bits() as u64)"),
            ScalarKind::Double => format!("{expr}.to_bits()"),
        }
    }

    /// Expression applying `op` to two scalars of this kind.
    ///
    /// Integer kinds wrap on overflow, as shader integers do. Integer
    /// division and remainder by zero still panic.
    pub fn arith(self, op: Arith, a: &str, b: &str) -> String {
        if self.capabilities().is_integer {
            let method = match op {
                Arith::Add => "wrapping_add",
                Arith::Sub => "wrapping_sub",
                Arith::Mul => "wrapping_mul",
                Arith::Div => "wrapping_div",
                Arith::Rem => "wrapping_rem",
            };
            format!("{a}.{method}({b})")
        } else {
            let symbol = match op {
                Arith::Add => "+",
                Arith::Sub => "-",
                Arith::Mul => "*",
                Arith::Div => "/",
                Arith::Rem => "%",
            };
            format!("({a} {symbol} {b})")
        }
    }

    /// Expression negating a scalar of this kind.
    pub fn negate(self, a: &str) -> String {
        if self.capabilities().is_integer {
            format!("{a}.wrapping_neg()")
        } else {
            format!("-{a}")
        }
    }

    /// Expression converting `expr`, a scalar of kind `from`, into this kind.
    pub fn convert_from(self, from: ScalarKind, expr: &str) -> String {
        if self == from {
            return expr.to_string();
        }
        match (from, self) {
            (_, ScalarKind::Bool) => format!("({expr} != {})", from.zero()),
            (ScalarKind::Bool, ScalarKind::Float | ScalarKind::Double) => {
                format!("({expr} as u8 as {})", self.rust_type())
            }
            _ => format!("({expr} as {})", self.rust_type()),
        }
    }

    /// Whether values of `from` convert into this kind implicitly.
    pub fn promotes_from(self, from: ScalarKind) -> bool {
        IMPLICIT_PROMOTIONS.contains(&(from, self))
    }
}

impl std::fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.hlsl_name())
    }
}
