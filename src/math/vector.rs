/*
 * Math primitives: 3-vector and scalar helpers.
 *
 * nalgebra's `Vector3<f64>` is the concrete backing type for all state
 * vectors in this crate.
 */

pub type Vector3 = nalgebra::Vector3<f64>;
pub type Matrix3 = nalgebra::Matrix3<f64>;

/// Euclidean norm (magnitude) of a vector.
pub fn norm(v: &Vector3) -> f64 {
    v.norm()
}

/// Unit vector in the direction of `v`. Returns the zero vector if `v` is
/// (numerically) the zero vector.
pub fn normalize(v: &Vector3) -> Vector3 {
    if v.norm() < f64::EPSILON {
        Vector3::zeros()
    } else {
        v.normalize()
    }
}

pub fn dot(a: &Vector3, b: &Vector3) -> f64 {
    a.dot(b)
}

pub fn cross(a: &Vector3, b: &Vector3) -> Vector3 {
    a.cross(b)
}

/// Returns the projection of `a` onto `b`, following NAIF SPICE's `projv`.
pub fn project_vector(a: &Vector3, b: &Vector3) -> Vector3 {
    b * a.dot(b) / b.dot(b)
}

/// Rotates `a` about `axis` by `theta_rad` radians (right-hand rule),
/// following NAIF SPICE's `vrotv`.
pub fn rotate_vector(a: &Vector3, axis: &Vector3, theta_rad: f64) -> Vector3 {
    let x = normalize(axis);
    let p = project_vector(a, &x);
    let v1 = a - p;
    let v2 = a.cross(&v1);
    v1 * theta_rad.cos() + v2 * theta_rad.sin() + p
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn rotate_90_about_z() {
        let a = Vector3::new(1.0, 0.0, 0.0);
        let z = Vector3::new(0.0, 0.0, 1.0);
        let r = rotate_vector(&a, &z, core::f64::consts::FRAC_PI_2);
        assert_relative_eq!(r.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(r.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn project_onto_axis() {
        let a = Vector3::new(1.0, 1.0, 0.0);
        let b = Vector3::new(1.0, 0.0, 0.0);
        let p = project_vector(&a, &b);
        assert_relative_eq!(p, Vector3::new(1.0, 0.0, 0.0), epsilon = 1e-12);
    }
}
