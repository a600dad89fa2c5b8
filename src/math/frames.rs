/*
 * Frame & unit conventions: J2000 equatorial <-> ecliptic rotation, and the
 * fixed B1950 -> J2000 rotation applied ahead of it for legacy series such
 * as GUST86.
 *
 * Rotations are represented as plain 3x3 matrices rather than a
 * dedicated DCM type.
 */

use crate::math::vector::{Matrix3, Vector3};

/// `sin(epsilon)` for the J2000 mean obliquity used throughout this crate's
/// common output frame. Negative because the inverse rotation
/// (equatorial -> ecliptic) is what's applied.
pub const SIN_EPS_J2000: f64 = -0.397_776_995;

fn cos_eps_j2000() -> f64 {
    (1.0 - SIN_EPS_J2000 * SIN_EPS_J2000).sqrt()
}

/// Rotation about the x-axis by the J2000 mean obliquity, mapping an
/// equatorial J2000 vector into the mean ecliptic J2000 frame (NAIF SPICE
/// calls this `inverseTransformJ2000`).
pub fn inverse_transform_j2000(v: &Vector3) -> Vector3 {
    let sin_e = -SIN_EPS_J2000;
    let cos_e = cos_eps_j2000();
    Vector3::new(
        v.x,
        cos_e * v.y + sin_e * v.z,
        -sin_e * v.y + cos_e * v.z,
    )
}

/// The fixed 3x3 rotation from the B1950 mean equator/equinox frame to
/// J2000 mean equator/equinox, per IAU 1976 precession (Standish 1982).
pub fn b1950_to_j2000() -> Matrix3 {
    Matrix3::new(
        0.999_925_678_186_902,
        -0.011_181_908_938_011,
        -0.004_858_106_746_858,
        0.011_181_908_345_610,
        0.999_937_484_893_379,
        -0.000_027_169_816_135,
        0.004_858_108_125_734,
        -0.000_027_147_776_027,
        0.999_988_193_293_108,
    )
}

/// The reference frame a [`Provider`](crate::providers::Provider) natively
/// reports state in, before the dispatcher carries it to the common J2000
/// ecliptic output frame.
///
/// Raw SPK-backed sources (planetary/satellite kernels) are equatorial.
/// Analytical series that perform their own final frame rotation as part of
/// evaluating the series (GUST86, Triton, the Keplerian planetary fallback)
/// report `J2000Ecliptic` directly and need no further rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderFrame {
    /// J2000 mean equator and equinox -- the native frame of NAIF SPK
    /// kernels. Rotated to ecliptic via [`inverse_transform_j2000`].
    J2000Equatorial,
    /// B1950 mean equator and equinox, rotated to J2000 equatorial via
    /// [`b1950_to_j2000`] and then to ecliptic via [`inverse_transform_j2000`].
    B1950Equatorial,
    /// J2000 mean ecliptic and equinox -- this crate's common output frame.
    /// Passed through unchanged.
    J2000Ecliptic,
}

/// Carries a state vector pair from `frame` into the J2000 mean ecliptic
/// frame, per spec: "any subsystem that produces equatorial J2000
/// coordinates" is rotated before it escapes the dispatcher.
pub fn to_j2000_ecliptic(frame: ProviderFrame, r: Vector3, v: Vector3) -> (Vector3, Vector3) {
    match frame {
        ProviderFrame::J2000Ecliptic => (r, v),
        ProviderFrame::J2000Equatorial => (inverse_transform_j2000(&r), inverse_transform_j2000(&v)),
        ProviderFrame::B1950Equatorial => {
            let precession = b1950_to_j2000();
            (
                inverse_transform_j2000(&(precession * r)),
                inverse_transform_j2000(&(precession * v)),
            )
        }
    }
}

/// Carries a vector from the B1950 mean equator/equinox frame to the
/// J2000 mean ecliptic frame in one step: [`b1950_to_j2000`] followed by
/// [`inverse_transform_j2000`]. Used by legacy series (GUST86) whose final
/// published step is this fixed rotation.
pub fn legacy_b1950_to_j2000_ecliptic(v: &Vector3) -> Vector3 {
    inverse_transform_j2000(&(b1950_to_j2000() * v))
}

/// Rotation matrix `Rz(-raan) * Rx(-i) * Rz(-aop)` used to carry a
/// perifocal vector into the parent inertial frame.
pub fn perifocal_rotation(raan_rad: f64, i_rad: f64, aop_rad: f64) -> Matrix3 {
    let (so, co) = aop_rad.sin_cos();
    let (si, ci) = i_rad.sin_cos();
    let (sr, cr) = raan_rad.sin_cos();

    Matrix3::new(
        cr * co - sr * so * ci,
        -cr * so - sr * co * ci,
        sr * si,
        sr * co + cr * so * ci,
        -sr * so + cr * co * ci,
        -cr * si,
        so * si,
        co * si,
        ci,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn ecliptic_rotation_preserves_x_axis() {
        let v = Vector3::new(1.0, 0.0, 0.0);
        let rotated = inverse_transform_j2000(&v);
        assert_relative_eq!(rotated, v, epsilon = 1e-12);
    }

    #[test]
    fn ecliptic_rotation_is_orthonormal() {
        let v = Vector3::new(0.3, 0.7, -0.2);
        let rotated = inverse_transform_j2000(&v);
        assert_relative_eq!(rotated.norm(), v.norm(), epsilon = 1e-12);
    }

    #[test]
    fn ecliptic_native_frame_is_a_no_op() {
        let r = Vector3::new(1.0, 2.0, 3.0);
        let v = Vector3::new(-4.0, 5.0, -6.0);
        let (r2, v2) = to_j2000_ecliptic(ProviderFrame::J2000Ecliptic, r, v);
        assert_eq!(r2, r);
        assert_eq!(v2, v);
    }

    #[test]
    fn equatorial_native_frame_is_rotated() {
        let r = Vector3::new(0.0, 1.0, 0.0);
        let (r2, _v2) = to_j2000_ecliptic(ProviderFrame::J2000Equatorial, r, Vector3::new(0.0, 0.0, 0.0));
        assert_relative_eq!(r2, inverse_transform_j2000(&r), epsilon = 1e-12);
        assert!((r2.z).abs() > 1e-6, "equatorial Y should acquire an ecliptic Z component");
    }
}
