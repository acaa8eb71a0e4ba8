//! Conversions to and from `glam`.
//!
//! glam has vectors of every scalar kind but only square float and double
//! matrices, so those are the matrices converted here.
use crate::*;

macro_rules! impl_from_vec {
    ($ty:ident, $glam_ty:ty, [$($c:ident),+]) => {
        impl From<$glam_ty> for $ty {
            fn from(v: $glam_ty) -> Self {
                $ty { $($c: v.$c),+ }
            }
        }

        impl From<$ty> for $glam_ty {
            fn from(v: $ty) -> Self {
                <$glam_ty>::new($(v.$c),+)
            }
        }
    };
}

impl_from_vec!(Bool2, glam::BVec2, [x, y]);
impl_from_vec!(Bool3, glam::BVec3, [x, y, z]);
impl_from_vec!(Bool4, glam::BVec4, [x, y, z, w]);

impl_from_vec!(Int2, glam::IVec2, [x, y]);
impl_from_vec!(Int3, glam::IVec3, [x, y, z]);
impl_from_vec!(Int4, glam::IVec4, [x, y, z, w]);

impl_from_vec!(UInt2, glam::UVec2, [x, y]);
impl_from_vec!(UInt3, glam::UVec3, [x, y, z]);
impl_from_vec!(UInt4, glam::UVec4, [x, y, z, w]);

impl_from_vec!(Float2, glam::Vec2, [x, y]);
impl_from_vec!(Float3, glam::Vec3, [x, y, z]);
impl_from_vec!(Float4, glam::Vec4, [x, y, z, w]);

impl_from_vec!(Double2, glam::DVec2, [x, y]);
impl_from_vec!(Double3, glam::DVec3, [x, y, z]);
impl_from_vec!(Double4, glam::DVec4, [x, y, z, w]);

/// From<glam::MatN> for FloatNxN and back, column by column.
macro_rules! impl_from_mat {
    ($ty:ident, $glam_ty:ty, [$($axis:ident),+]) => {
        impl From<$glam_ty> for $ty {
            fn from(m: $glam_ty) -> Self {
                $ty::from_cols($(m.$axis.into()),+)
            }
        }

        impl From<$ty> for $glam_ty {
            fn from(m: $ty) -> Self {
                <$glam_ty>::from_cols($(m.$axis.into()),+)
            }
        }
    };
}

impl_from_mat!(Float2x2, glam::Mat2, [x_axis, y_axis]);
impl_from_mat!(Float3x3, glam::Mat3, [x_axis, y_axis, z_axis]);
impl_from_mat!(Float4x4, glam::Mat4, [x_axis, y_axis, z_axis, w_axis]);

impl_from_mat!(Double2x2, glam::DMat2, [x_axis, y_axis]);
impl_from_mat!(Double3x3, glam::DMat3, [x_axis, y_axis, z_axis]);
impl_from_mat!(Double4x4, glam::DMat4, [x_axis, y_axis, z_axis, w_axis]);
