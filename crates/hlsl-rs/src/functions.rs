//! HLSL intrinsic functions.
//!
//! Every intrinsic is a trait plus a free function of the same name that
//! forwards to it, so `saturate(x)` reads the way it does in a shader while
//! still resolving per argument type. The traits are implemented here for
//! the scalar types and by the generated vector and matrix types.
//!
//! Intrinsics that HLSL overloads on the type of a bound or weight, like
//! `clamp(v, 0.0, 1.0)` next to `clamp(v, lo, hi)`, take that type as a
//! trait parameter defaulting to `Self`.
//!
//! | Group | Intrinsics |
//! | --- | --- |
//! | common | `abs`, `sign`, `floor`, `ceil`, `round`, `round_even`, `trunc`, `frac`, `saturate`, `fmod`, `step`, `min`, `max`, `clamp`, `lerp`, `smoothstep`, `mad`, `isnan`, `isinf`, `isfinite` |
//! | exponential | `exp`, `exp2`, `log`, `log2`, `log10`, `sqrt`, `rsqrt`, `pow` |
//! | trigonometry | `degrees`, `radians`, `sin`, `cos`, `tan`, `asin`, `acos`, `atan`, `atan2`, `sinh`, `cosh`, `tanh` |
//! | geometry | `dot`, `length`, `distance`, `normalize`, `faceforward`, `reflect`, `refract`, `cross` |
//! | relational | `any`, `all` |
//! | linear algebra | `mul`, `transpose`, `determinant`, `outer_product` |

/// Declares a trait with a single `fn name(self) -> Self` method and a free
/// function forwarding to it.
macro_rules! unary_function {
    ($(#[$meta:meta])* $name:ident) => {
        paste::paste! {
            $(#[$meta])*
            pub trait [<$name:camel>] {
                $(#[$meta])*
                fn $name(self) -> Self;
            }

            $(#[$meta])*
            pub fn $name<T: [<$name:camel>]>(x: T) -> T {
                <T as [<$name:camel>]>::$name(x)
            }
        }
    };
}

/// Declares a trait with a single `fn name(self, other: Self) -> Self`
/// method and a free function forwarding to it.
macro_rules! binary_function {
    ($(#[$meta:meta])* $name:ident($lhs:ident, $rhs:ident)) => {
        paste::paste! {
            $(#[$meta])*
            pub trait [<$name:camel>] {
                $(#[$meta])*
                fn $name(self, $rhs: Self) -> Self;
            }

            $(#[$meta])*
            pub fn $name<T: [<$name:camel>]>($lhs: T, $rhs: T) -> T {
                <T as [<$name:camel>]>::$name($lhs, $rhs)
            }
        }
    };
}

// Common functions.

unary_function!(
    /// Absolute value.
    abs
);
unary_function!(
    /// `-1`, `0` or `1` according to the sign of `x`.
    sign
);
unary_function!(
    /// Largest integer not greater than `x`.
    floor
);
unary_function!(
    /// Smallest integer not less than `x`.
    ceil
);
unary_function!(
    /// Nearest integer to `x`, rounding half-way cases away from zero.
    round
);
unary_function!(
    /// Nearest integer to `x`, rounding half-way cases to even.
    round_even
);
unary_function!(
    /// Integer part of `x`.
    trunc
);
unary_function!(
    /// Fractional part of `x`, `x - floor(x)`.
    frac
);
unary_function!(
    /// `x` clamped to `0..=1`.
    saturate
);
binary_function!(
    /// Floating point remainder of `x / y`, with the sign of `x`.
    fmod(x, y)
);
binary_function!(
    /// The smaller of `x` and `y`.
    min(x, y)
);
binary_function!(
    /// The larger of `x` and `y`.
    max(x, y)
);

/// Provides `step`.
pub trait Step {
    /// `1` where `x >= self`, otherwise `0`. `self` is the edge.
    fn step(self, x: Self) -> Self;
}

/// `1` where `x >= edge`, otherwise `0`.
pub fn step<T: Step>(edge: T, x: T) -> T {
    <T as Step>::step(edge, x)
}

/// Provides `clamp`, with bounds of type `B`.
pub trait Clamp<B = Self> {
    /// `self` restricted to `low..=high`.
    fn clamp(self, low: B, high: B) -> Self;
}

/// `x` restricted to `low..=high`. The bounds are either of the same type as
/// `x` or scalars applied to every component.
pub fn clamp<T: Clamp<B>, B>(x: T, low: B, high: B) -> T {
    <T as Clamp<B>>::clamp(x, low, high)
}

/// Provides `lerp`, with a weight of type `W`.
pub trait Lerp<W = Self> {
    /// Linear interpolation from `self` to `other`.
    fn lerp(self, other: Self, weight: W) -> Self;
}

/// `x + (y - x) * s`.
pub fn lerp<T: Lerp<W>, W>(x: T, y: T, s: W) -> T {
    <T as Lerp<W>>::lerp(x, y, s)
}

/// Provides `smoothstep`, with bounds of type `B`.
pub trait Smoothstep<B = Self> {
    /// Hermite interpolation of `self` between `low` and `high`.
    fn smoothstep(self, low: B, high: B) -> Self;
}

/// Smooth Hermite interpolation between `0` and `1` as `x` goes from `low`
/// to `high`.
///
/// For a scalar, the result is `t * t * (3 - 2 * t)` where
/// `t = saturate((x - low) / (high - low))`.
pub fn smoothstep<T: Smoothstep<B>, B>(low: B, high: B, x: T) -> T {
    <T as Smoothstep<B>>::smoothstep(x, low, high)
}

/// Provides `mad`.
pub trait Mad {
    /// `self * b + c`.
    fn mad(self, b: Self, c: Self) -> Self;
}

/// `m * a + b`.
pub fn mad<T: Mad>(m: T, a: T, b: T) -> T {
    <T as Mad>::mad(m, a, b)
}

/// Provides `isnan`.
pub trait IsNan {
    /// `bool` for a scalar, a boolean vector for a vector.
    type Mask;

    fn isnan(self) -> Self::Mask;
}

/// Which components of `x` are NaN.
pub fn isnan<T: IsNan>(x: T) -> T::Mask {
    <T as IsNan>::isnan(x)
}

/// Provides `isinf`.
pub trait IsInf {
    type Mask;

    fn isinf(self) -> Self::Mask;
}

/// Which components of `x` are infinite.
pub fn isinf<T: IsInf>(x: T) -> T::Mask {
    <T as IsInf>::isinf(x)
}

/// Provides `isfinite`.
pub trait IsFinite {
    type Mask;

    fn isfinite(self) -> Self::Mask;
}

/// Which components of `x` are neither NaN nor infinite.
pub fn isfinite<T: IsFinite>(x: T) -> T::Mask {
    <T as IsFinite>::isfinite(x)
}

// Exponential functions.

unary_function!(
    /// `e` raised to `x`.
    exp
);
unary_function!(
    /// `2` raised to `x`.
    exp2
);
unary_function!(
    /// Natural logarithm.
    log
);
unary_function!(
    /// Base 2 logarithm.
    log2
);
unary_function!(
    /// Base 10 logarithm.
    log10
);
unary_function!(
    /// Square root.
    sqrt
);
unary_function!(
    /// Reciprocal of the square root.
    rsqrt
);
binary_function!(
    /// `x` raised to the power `y`.
    pow(x, y)
);

// Trigonometry.

unary_function!(
    /// Converts radians to degrees.
    degrees
);
unary_function!(
    /// Converts degrees to radians.
    radians
);
unary_function!(
    /// Sine, in radians.
    sin
);
unary_function!(
    /// Cosine, in radians.
    cos
);
unary_function!(
    /// Tangent, in radians.
    tan
);
unary_function!(
    /// Arcsine.
    asin
);
unary_function!(
    /// Arccosine.
    acos
);
unary_function!(
    /// Arctangent.
    atan
);
unary_function!(
    /// Hyperbolic sine.
    sinh
);
unary_function!(
    /// Hyperbolic cosine.
    cosh
);
unary_function!(
    /// Hyperbolic tangent.
    tanh
);
binary_function!(
    /// Four quadrant arctangent of `y / x`.
    atan2(y, x)
);

// Geometry.

/// Provides `dot`.
pub trait Dot {
    type Scalar;

    fn dot(self, rhs: Self) -> Self::Scalar;
}

/// Sum of the component-wise products of `x` and `y`.
pub fn dot<T: Dot>(x: T, y: T) -> T::Scalar {
    <T as Dot>::dot(x, y)
}

/// Provides `length`.
pub trait Length {
    type Scalar;

    fn length(self) -> Self::Scalar;
}

/// Euclidean length of `x`.
pub fn length<T: Length>(x: T) -> T::Scalar {
    <T as Length>::length(x)
}

/// Provides `distance`.
pub trait Distance {
    type Scalar;

    fn distance(self, other: Self) -> Self::Scalar;
}

/// Euclidean distance between `x` and `y`.
pub fn distance<T: Distance>(x: T, y: T) -> T::Scalar {
    <T as Distance>::distance(x, y)
}

unary_function!(
    /// `x` scaled to unit length.
    normalize
);

/// Provides `faceforward`.
pub trait Faceforward {
    fn faceforward(self, i: Self, ng: Self) -> Self;
}

/// `n` if `dot(i, ng)` is negative, otherwise `-n`.
pub fn faceforward<T: Faceforward>(n: T, i: T, ng: T) -> T {
    <T as Faceforward>::faceforward(n, i, ng)
}

/// Provides `reflect`.
pub trait Reflect {
    fn reflect(self, n: Self) -> Self;
}

/// Reflection of the incident vector `i` about the surface normal `n`,
/// `i - 2 * dot(n, i) * n`.
pub fn reflect<T: Reflect>(i: T, n: T) -> T {
    <T as Reflect>::reflect(i, n)
}

/// Provides `refract`.
pub trait Refract {
    type Scalar;

    fn refract(self, n: Self, eta: Self::Scalar) -> Self;
}

/// Refraction of the incident vector `i` through a surface with normal `n`
/// and ratio of indices of refraction `eta`.
///
/// Returns zero on total internal reflection.
pub fn refract<T: Refract>(i: T, n: T, eta: T::Scalar) -> T {
    <T as Refract>::refract(i, n, eta)
}

/// Provides `cross`.
///
/// Three component vectors give a vector. Two component vectors give the z
/// component of the product of their extensions with z = 0.
pub trait Cross {
    type Output;

    fn cross(self, rhs: Self) -> Self::Output;
}

/// Cross product of `x` and `y`.
pub fn cross<T: Cross>(x: T, y: T) -> T::Output {
    <T as Cross>::cross(x, y)
}

// Relational.

/// Provides `any`.
pub trait Any {
    fn any(self) -> bool;
}

/// Whether any component of `x` is `true`.
pub fn any<T: Any>(x: T) -> bool {
    <T as Any>::any(x)
}

/// Provides `all`.
pub trait All {
    fn all(self) -> bool;
}

/// Whether every component of `x` is `true`.
pub fn all<T: All>(x: T) -> bool {
    <T as All>::all(x)
}

// Linear algebra.

/// The product of `x` and `y`.
///
/// Between two matrices, or a matrix and a vector, this is the matrix
/// product, with a vector on the left read as a row. Use `mul_elem` on a
/// matrix for the component-wise product.
pub fn mul<L: std::ops::Mul<R>, R>(x: L, y: R) -> L::Output {
    x * y
}

/// Provides `transpose`.
pub trait Transpose {
    type Output;

    fn transpose(self) -> Self::Output;
}

/// `m` with rows and columns swapped.
pub fn transpose<T: Transpose>(m: T) -> T::Output {
    <T as Transpose>::transpose(m)
}

/// Provides `determinant`.
pub trait Determinant {
    type Scalar;

    fn determinant(self) -> Self::Scalar;
}

/// Determinant of the square matrix `m`.
pub fn determinant<T: Determinant>(m: T) -> T::Scalar {
    <T as Determinant>::determinant(m)
}

/// Provides `outer_product` of a column vector with a row vector of type
/// `Row`.
pub trait OuterProduct<Row> {
    type Output;

    fn outer_product(self, row: Row) -> Self::Output;
}

/// The matrix whose cell (c, r) is `column[r] * row[c]`.
pub fn outer_product<C: OuterProduct<R>, R>(column: C, row: R) -> C::Output {
    <C as OuterProduct<R>>::outer_product(column, row)
}

/// Implements the single-argument float intrinsics with `$x` bound to
/// `self`.
macro_rules! impl_unary {
    ($ty:ty: $($name:ident($x:ident) => $body:expr),+ $(,)?) => {
        paste::paste! {
            $(
                impl [<$name:camel>] for $ty {
                    #[inline]
                    fn $name(self) -> Self {
                        let $x = self;
                        $body
                    }
                }
            )+
        }
    };
}

macro_rules! impl_float_functions {
    ($ty:ty) => {
        impl_unary!($ty:
            abs(x) => x.abs(),
            sign(x) => if x > 0.0 { 1.0 } else if x < 0.0 { -1.0 } else { 0.0 },
            floor(x) => x.floor(),
            ceil(x) => x.ceil(),
            round(x) => x.round(),
            round_even(x) => x.round_ties_even(),
            trunc(x) => x.trunc(),
            frac(x) => x - x.floor(),
            saturate(x) => x.max(0.0).min(1.0),
            exp(x) => x.exp(),
            exp2(x) => x.exp2(),
            log(x) => x.ln(),
            log2(x) => x.log2(),
            log10(x) => x.log10(),
            sqrt(x) => x.sqrt(),
            rsqrt(x) => 1.0 / x.sqrt(),
            degrees(x) => x.to_degrees(),
            radians(x) => x.to_radians(),
            sin(x) => x.sin(),
            cos(x) => x.cos(),
            tan(x) => x.tan(),
            asin(x) => x.asin(),
            acos(x) => x.acos(),
            atan(x) => x.atan(),
            sinh(x) => x.sinh(),
            cosh(x) => x.cosh(),
            tanh(x) => x.tanh(),
            normalize(x) => x / x.abs(),
        );

        impl Fmod for $ty {
            #[inline]
            fn fmod(self, y: Self) -> Self {
                self % y
            }
        }

        impl Pow for $ty {
            #[inline]
            fn pow(self, y: Self) -> Self {
                self.powf(y)
            }
        }

        impl Atan2 for $ty {
            #[inline]
            fn atan2(self, x: Self) -> Self {
                self.atan2(x)
            }
        }

        impl Min for $ty {
            #[inline]
            fn min(self, rhs: Self) -> Self {
                self.min(rhs)
            }
        }

        impl Max for $ty {
            #[inline]
            fn max(self, rhs: Self) -> Self {
                self.max(rhs)
            }
        }

        impl Clamp for $ty {
            #[inline]
            fn clamp(self, low: Self, high: Self) -> Self {
                self.max(low).min(high)
            }
        }

        impl Step for $ty {
            #[inline]
            fn step(self, x: Self) -> Self {
                if x >= self { 1.0 } else { 0.0 }
            }
        }

        impl Lerp for $ty {
            #[inline]
            fn lerp(self, other: Self, weight: Self) -> Self {
                self + (other - self) * weight
            }
        }

        impl Smoothstep for $ty {
            #[inline]
            fn smoothstep(self, low: Self, high: Self) -> Self {
                let t = ((self - low) / (high - low)).max(0.0).min(1.0);
                t * t * (3.0 - 2.0 * t)
            }
        }

        impl Mad for $ty {
            #[inline]
            fn mad(self, b: Self, c: Self) -> Self {
                self.mul_add(b, c)
            }
        }

        impl IsNan for $ty {
            type Mask = bool;

            #[inline]
            fn isnan(self) -> bool {
                self.is_nan()
            }
        }

        impl IsInf for $ty {
            type Mask = bool;

            #[inline]
            fn isinf(self) -> bool {
                self.is_infinite()
            }
        }

        impl IsFinite for $ty {
            type Mask = bool;

            #[inline]
            fn isfinite(self) -> bool {
                self.is_finite()
            }
        }

        impl Dot for $ty {
            type Scalar = $ty;

            #[inline]
            fn dot(self, rhs: Self) -> $ty {
                self * rhs
            }
        }

        impl Length for $ty {
            type Scalar = $ty;

            #[inline]
            fn length(self) -> $ty {
                self.abs()
            }
        }

        impl Distance for $ty {
            type Scalar = $ty;

            #[inline]
            fn distance(self, other: Self) -> $ty {
                (self - other).abs()
            }
        }
    };
}

impl_float_functions!(f32);
impl_float_functions!(f64);

// `Ord` methods are named explicitly since `Min`, `Max` and `Clamp` are in
// scope here too.
macro_rules! impl_integer_functions {
    ($ty:ty) => {
        impl Min for $ty {
            #[inline]
            fn min(self, rhs: Self) -> Self {
                Ord::min(self, rhs)
            }
        }

        impl Max for $ty {
            #[inline]
            fn max(self, rhs: Self) -> Self {
                Ord::max(self, rhs)
            }
        }

        impl Clamp for $ty {
            #[inline]
            fn clamp(self, low: Self, high: Self) -> Self {
                Ord::min(Ord::max(self, low), high)
            }
        }

        impl Mad for $ty {
            #[inline]
            fn mad(self, b: Self, c: Self) -> Self {
                self.wrapping_mul(b).wrapping_add(c)
            }
        }
    };
}

impl_integer_functions!(i32);
impl_integer_functions!(u32);

impl Abs for i32 {
    #[inline]
    fn abs(self) -> Self {
        self.wrapping_abs()
    }
}

impl Sign for i32 {
    #[inline]
    fn sign(self) -> Self {
        self.signum()
    }
}

impl Any for bool {
    #[inline]
    fn any(self) -> bool {
        self
    }
}

impl All for bool {
    #[inline]
    fn all(self) -> bool {
        self
    }
}
