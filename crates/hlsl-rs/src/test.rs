//! Tests of the generated types as seen by users of the crate.
use std::collections::HashSet;

use crate::{functions::*, *};

fn close(a: Float2, b: Float2) -> bool {
    length(a - b) < 1e-5
}

#[test]
fn sanity_to_array_order() {
    assert_eq!([1, 2, 3, 4], Int4::new(1, 2, 3, 4).to_array());
    assert_eq!([0.5, 1.5, 2.5], Double3::new(0.5, 1.5, 2.5).to_array());
    assert_eq!([true, false], Bool2::new(true, false).to_array());
    assert_eq!(vec![7, 8, 9], UInt3::new(7, 8, 9).into_iter().collect::<Vec<_>>());
}

#[test]
fn sanity_transpose_twice() {
    let m = Float3x2::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);
    let t: Float2x3 = m.transpose();
    assert_eq!(m.x_axis.y, t.y_axis.x);
    assert_eq!(m.z_axis.x, t.x_axis.z);
    assert_eq!(m, t.transpose());

    let n = Int4x3::from_iter(0..12);
    assert_eq!(n, transpose(transpose(n)));
}

#[test]
fn sanity_product_is_associative() {
    let a = Int3x2::new(1, 2, 3, 4, 5, 6);
    let b = Int2x3::new(1, 0, -1, 2, 1, 0);
    let v = Int2::new(3, -2);
    let ab: Int2x2 = a * b;
    assert_eq!(ab * v, a * (b * v));

    let a = Float3x2::new(0.5, -1.0, 2.0, 0.25, 1.5, 3.0);
    let b = Float2x3::new(1.0, 0.1, -1.0, 2.0, 1.0, 0.3);
    let v = Float2::new(0.7, -2.0);
    assert!(close((a * b) * v, a * (b * v)));
}

#[test]
fn sanity_matrix_times_vector() {
    let m = Float2x2::from_cols(Float2::new(1.0, 2.0), Float2::new(3.0, 4.0));
    let v = Float2::new(5.0, 6.0);
    let r: Float2 = m * v;
    assert_eq!(m[0].x * v.x + m[1].x * v.y, r.x);
    assert_eq!(Float2::new(23.0, 34.0), r);
    assert_eq!(r, mul(m, v));
    assert_eq!(v, Float2x2::IDENTITY * v);
}

#[test]
fn sanity_vector_times_matrix() {
    let m = Int3x2::new(1, 2, 3, 4, 5, 6);
    let v = Int2::new(1, -1);
    let r: Int3 = v * m;
    assert_eq!(Int3::new(-1, -1, -1), r);
    assert_eq!(Int2::new(1, 2), m.col(0));
    assert_eq!(Int3::new(2, 4, 6), m.row(1));
}

#[test]
fn sanity_swizzle_round_trip() {
    let mut v = Float4::new(1.0, 2.0, 3.0, 4.0);
    let p = Float2::new(9.0, 8.0);
    v.set_xz(p);
    assert_eq!((p.x, p.y), (v.x, v.z));
    assert_eq!(2.0, v.y);
    assert_eq!(p, v.rb());
    assert_eq!(Float3::new(9.0, 8.0, 4.0), v.xzw());

    let mut c = UInt3::new(1, 2, 3);
    c.set_gb(UInt2::new(5, 6));
    assert_eq!(UInt3::new(1, 5, 6), c);
}

#[test]
fn sanity_outer_product() {
    let m: Float3x2 = outer_product(Float2::new(1.0, 2.0), Float3::new(3.0, 4.0, 5.0));
    assert_eq!(6.0, m[0].y);
    assert_eq!(Float2::new(5.0, 10.0), m.z_axis);
}

#[test]
fn sanity_determinant() {
    assert_eq!(-2.0, determinant(Float2x2::new(1.0, 2.0, 3.0, 4.0)));
    assert_eq!(1.0, Double4x4::IDENTITY.determinant());
    assert_eq!(24.0, determinant(Float3x3::IDENTITY * 2.0) * 3.0);
}

#[test]
fn sanity_vector_functions() {
    let v = Float2::new(-0.5, 1.5);
    assert_eq!(Float2::new(0.0, 1.0), clamp(v, 0.0_f32, 1.0_f32));
    assert_eq!(Float2::new(-0.5, 1.0), clamp(v, Float2::new(-1.0, 0.0), Float2::new(0.0, 1.0)));
    assert_eq!(Float2::new(0.5, 1.5), abs(v));
    assert_eq!(Float2::new(-1.0, 1.0), sign(v));
    assert_eq!(Float2::new(0.0, 1.0), step(Float2::ZERO, v));
    assert_eq!(Float2::new(0.0, 1.0), lerp(Float2::ZERO, Float2::ONE, Float2::new(0.0, 1.0)));
    assert_eq!(Float2::splat(0.5), lerp(Float2::ZERO, Float2::ONE, 0.5_f32));
    assert_eq!(Int2::new(2, 3), max(Int2::new(2, -4), Int2::new(1, 3)));
    assert_eq!(Int2::new(1, 1), sign(Int2::new(5, 9)));
}

#[test]
fn sanity_geometry() {
    let x = Float3::new(1.0, 0.0, 0.0);
    let y = Float3::new(0.0, 1.0, 0.0);
    assert_eq!(Float3::new(0.0, 0.0, 1.0), cross(x, y));
    assert_eq!(0.0, dot(x, y));
    assert_eq!(-1.0, cross(Float2::new(0.0, 1.0), Float2::new(1.0, 0.0)));
    assert_eq!(5.0, length(Double2::new(3.0, 4.0)));
    assert_eq!(5.0, distance(Double2::ZERO, Double2::new(-3.0, 4.0)));
    assert!((length(normalize(Float3::new(2.0, -3.0, 6.0))) - 1.0).abs() < 1e-6);
    assert_eq!(Float2::new(1.0, 1.0), reflect(Float2::new(1.0, -1.0), Float2::new(0.0, 1.0)));
    assert_eq!(-x, faceforward(x, x, x));
}

#[test]
fn sanity_relational() {
    let a = Float3::new(1.0, 2.0, f32::NAN);
    let lt = a.cmp_lt(Float3::splat(2.0));
    assert_eq!(Bool3::new(true, false, false), lt);
    assert!(any(lt));
    assert!(!all(lt));
    assert_eq!(Bool3::new(false, false, true), isnan(a));
    assert!(all(Bool2::ONE));
}

#[test]
fn sanity_conversions() {
    assert_eq!(Float3::splat(2.0), Float3::from(2.0_f32));
    assert_eq!(Double2::new(1.5, -2.0), Double2::from(Float2::new(1.5, -2.0)));
    assert_eq!(Float2::new(-1.0, 3.0), Float2::from(Int2::new(-1, 3)));
    assert_eq!(Int2::new(1, 2), Int2::from([1, 2]));
    assert_eq!([4, 5], <[u32; 2]>::from(UInt2::new(4, 5)));

    let m = Float2x3::from([1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    assert_eq!(Float3::new(4.0, 5.0, 6.0), m.y_axis);
    assert_eq!([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]], m.to_cols_array_2d());
    assert_eq!(Double2x3::from_cols(Double3::new(1.0, 2.0, 3.0), Double3::new(4.0, 5.0, 6.0)), Double2x3::from(m));
}

#[test]
fn sanity_integer_operators_wrap() {
    let v = Int2::new(i32::MAX, 7) + Int2::new(1, 1);
    assert_eq!(Int2::new(i32::MIN, 8), v);
    assert_eq!(Int2::new(8, 16), Int2::new(1, 2) << 3);
    assert_eq!(UInt2::new(1, 1), UInt2::new(3, 1) & 1);
    assert_eq!(UInt2::new(2, 0), UInt2::new(6, 1) & 2);
    assert_eq!(UInt2::new(u32::MAX, 0), UInt2::new(0, 1) - 1);
    assert_eq!(Bool2::new(false, true), !Bool2::new(true, false));
}

#[test]
fn sanity_integer_min_max_clamp() {
    let v = UInt3::new(1, 5, 9);
    assert_eq!(UInt3::new(1, 4, 4), min(v, UInt3::splat(4)));
    assert_eq!(UInt3::new(2, 5, 9), max(v, UInt3::splat(2)));
    assert_eq!(UInt3::new(2, 5, 6), clamp(v, 2_u32, 6_u32));
    assert_eq!(
        Int2::new(0, -1),
        clamp(Int2::new(-3, -1), Int2::new(0, -2), Int2::new(1, 0))
    );
}

#[test]
fn sanity_integer_division_wraps() {
    assert_eq!(
        Int2::new(i32::MIN, 0),
        Int2::new(i32::MIN, 0) / Int2::new(-1, 1)
    );
    assert_eq!(Int2::new(0, 1), Int2::new(i32::MIN, 7) % Int2::new(-1, 3));
}

#[test]
#[should_panic]
fn sanity_integer_division_by_zero() {
    assert_eq!(Int2::ZERO, Int2::new(1, 2) / Int2::new(1, 0));
}

#[test]
fn sanity_collections() {
    assert_eq!(Float3::new(1.0, 0.0, 0.0), Float3::from_slice(&[1.0]));
    assert_eq!(UInt4::new(1, 2, 3, 4), (1..=5).collect::<UInt4>());

    let set = [Int2::new(1, 2), Int2::new(1, 2), Int2::new(2, 1)]
        .into_iter()
        .collect::<HashSet<_>>();
    assert_eq!(2, set.len());
    assert_eq!(Int2::new(1, 2).hash_code(), Int2::new(1, 2).hash_code());
}

#[test]
fn sanity_indexing() {
    let mut v = Float3::new(1.0, 2.0, 3.0);
    v[1] = 5.0;
    assert_eq!(Float3::new(1.0, 5.0, 3.0), v);
    assert_eq!(3.0, v[2]);
    let mut m = Int2x2::IDENTITY;
    m[1].x = 3;
    assert_eq!(Int2x2::new(1, 0, 3, 1), m);
}

#[test]
#[should_panic]
fn sanity_index_out_of_bounds() {
    let v = Float2::new(1.0, 2.0);
    assert_eq!(0.0, v[2]);
}

#[test]
fn sanity_registry() {
    assert_eq!(51, registry::TYPES.len());
    assert_eq!(Some("hlsl_rs::UInt2"), registry::lookup_type("uint2"));
    assert_eq!(Some("hlsl_rs::Double4x3"), registry::lookup_type("double4x3"));
    assert_eq!(None, registry::lookup_type("float5"));
}

#[test]
fn sanity_glam_round_trip() {
    let m = Float3x3::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 10.0);
    let g = glam::Mat3::from(m);
    assert_eq!(glam::Vec3::new(4.0, 5.0, 6.0), g.y_axis);
    assert_eq!(m, Float3x3::from(g));

    let v = Float3::new(1.0, -1.0, 0.5);
    assert_eq!(Float3::from(g * glam::Vec3::from(v)), m * v);
    assert_eq!(glam::BVec2::new(true, false), glam::BVec2::from(Bool2::new(true, false)));
    assert_eq!(Int4::new(1, 2, 3, 4), Int4::from(glam::IVec4::new(1, 2, 3, 4)));
}
