//! 3-D point/vector algebra.
//!
//! `Point3`/`Vector3` are thin aliases over `nalgebra`'s own types, which
//! already give us addition, subtraction, scalar multiplication and dot
//! product for free. The handful of operations below exist because this
//! crate's degenerate-input contract (zero-fallback rather than NaN) does
//! not match nalgebra's defaults.

pub type Point3 = nalgebra::Point3<f64>;
pub type Vector3 = nalgebra::Vector3<f64>;

/// `v · (u·v)/(v·v)`, or the zero vector when `v·v = 0`.
pub fn project(u: &Vector3, v: &Vector3) -> Vector3 {
    let vv = v.dot(v);
    if vv == 0.0 {
        Vector3::zeros()
    } else {
        v * (u.dot(v) / vv)
    }
}

/// `v / ‖v‖`, or the zero vector when `‖v‖ = 0`.
pub fn normalize(v: &Vector3) -> Vector3 {
    let norm = v.norm();
    if norm == 0.0 {
        Vector3::zeros()
    } else {
        v / norm
    }
}

/// Elementwise product.
pub fn hadamard(u: &Vector3, v: &Vector3) -> Vector3 {
    u.component_mul(v)
}

/// `‖p - q‖²`.
pub fn squared_distance(p: &Point3, q: &Point3) -> f64 {
    (p - q).norm_squared()
}
