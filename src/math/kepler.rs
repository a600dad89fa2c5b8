/*
 * Kepler kernel: elliptic/hyperbolic Kepler's-equation solvers, true
 * anomaly, and orbital-element <-> state conversion.
 *
 * This module's numerics are built directly from the governing equations.
 * The public functions return a `Result` and explicitly guard against
 * parabolic/degenerate inputs rather than letting them fall through to
 * NaN or a silent garbage state.
 */

use crate::errors::KeplerError;
use crate::math::vector::{cross, dot, norm, Vector3};

/// Maximum Halley iterations before reporting non-convergence.
pub const MAX_ITERATIONS: u32 = 100;

/// Result of solving Kepler's equation: the (hyperbolic) eccentric anomaly
/// in radians, how many iterations were used, and the final residual.
/// Non-convergence is not a hard failure: callers
/// receive the last estimate and may decide whether to re-iterate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnomalySolution {
    pub anomaly_rad: f64,
    pub iterations: u32,
    pub residual: f64,
    pub converged: bool,
}

/// Solves `M = E - e*sin(E)` for the eccentric anomaly `E` (radians) via
/// Halley's method, starting from `E0 = M`.
pub fn solve_elliptic(m_rad: f64, e: f64, tol: f64) -> Result<AnomalySolution, KeplerError> {
    if e < 0.0 {
        return Err(KeplerError::InvalidEccentricity { ecc: e });
    }

    let mut ea = m_rad;
    let mut residual = ea - e * ea.sin() - m_rad;
    let mut iterations = 0;

    while residual.abs() >= tol && iterations < MAX_ITERATIONS {
        let (sin_e, cos_e) = ea.sin_cos();
        let denom = 1.0 - e * cos_e;
        let h_n = (ea - e * sin_e - m_rad) / denom;
        let i_n = (e * sin_e) / (2.0 * denom);
        ea -= h_n / (1.0 - h_n * i_n);

        residual = ea - e * ea.sin() - m_rad;
        iterations += 1;
    }

    Ok(AnomalySolution {
        anomaly_rad: ea,
        iterations,
        residual,
        converged: residual.abs() < tol,
    })
}

/// Solves `M = e*sinh(H) - H` for the hyperbolic anomaly `H` (radians) via
/// Halley's method, starting from `H0 = M`.
pub fn solve_hyperbolic(m_rad: f64, e: f64, tol: f64) -> Result<AnomalySolution, KeplerError> {
    if e <= 1.0 {
        return Err(KeplerError::InvalidEccentricity { ecc: e });
    }

    let mut h = m_rad;
    let f = |h: f64| e * h.sinh() - h - m_rad;
    let mut residual = f(h);
    let mut iterations = 0;

    while residual.abs() >= tol && iterations < MAX_ITERATIONS {
        let (sinh_h, cosh_h) = (h.sinh(), h.cosh());
        let fp = e * cosh_h - 1.0;
        let fpp = e * sinh_h;
        let h_n = (e * sinh_h - h - m_rad) / fp;
        let i_n = fpp / (2.0 * fp);
        h -= h_n / (1.0 - h_n * i_n);

        residual = f(h);
        iterations += 1;
    }

    Ok(AnomalySolution {
        anomaly_rad: h,
        iterations,
        residual,
        converged: residual.abs() < tol,
    })
}

/// True anomaly (radians) from the elliptic eccentric anomaly.
pub fn true_anomaly_elliptic(e: f64, ea_rad: f64) -> f64 {
    2.0 * ((1.0 + e).sqrt() * (ea_rad / 2.0).sin())
        .atan2((1.0 - e).sqrt() * (ea_rad / 2.0).cos())
}

/// True anomaly (radians) from the hyperbolic anomaly.
pub fn true_anomaly_hyperbolic(e: f64, h_rad: f64) -> f64 {
    2.0 * (((e + 1.0) / (e - 1.0)).sqrt() * (h_rad / 2.0).tanh()).atan()
}

/// Classical Keplerian elements, SI units / radians internally.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Elements {
    /// Semi-major axis, metres. Negative for hyperbolic orbits.
    pub a_m: f64,
    pub e: f64,
    pub i_rad: f64,
    pub m_rad: f64,
    pub aop_rad: f64,
    pub raan_rad: f64,
}

/// Wraps an angle (radians) into `(-pi, pi]`, the canonical range used for
/// `M` and `ω` throughout this module.
pub fn wrap_pm_pi(angle_rad: f64) -> f64 {
    let two_pi = core::f64::consts::TAU;
    let mut a = angle_rad % two_pi;
    if a <= -core::f64::consts::PI {
        a += two_pi;
    } else if a > core::f64::consts::PI {
        a -= two_pi;
    }
    a
}

/// Carries a perifocal vector into the parent inertial frame via
/// `Rz(-raan) * Rx(-i) * Rz(-aop)`.
fn perifocal_to_inertial(p: Vector3, raan_rad: f64, i_rad: f64, aop_rad: f64) -> Vector3 {
    crate::math::frames::perifocal_rotation(raan_rad, i_rad, aop_rad) * p
}

/// Evaluates position and velocity in the elements' own (ecliptic/equatorial
/// — caller's choice of frame for `mu`) frame, given `mu` in m^3/s^2.
pub fn state_from_elements(elements: &Elements, mu: f64) -> Result<(Vector3, Vector3), KeplerError> {
    let Elements {
        a_m,
        e,
        i_rad,
        m_rad,
        aop_rad,
        raan_rad,
    } = *elements;

    if e < 0.0 {
        return Err(KeplerError::InvalidEccentricity { ecc: e });
    }

    let (pos_pf, vel_pf) = if e < 1.0 {
        let sol = solve_elliptic(wrap_pm_pi(m_rad), e, 1e-12)?;
        let ea = sol.anomaly_rad;
        let (sin_e, cos_e) = ea.sin_cos();
        let pos = Vector3::new(a_m * (cos_e - e), a_m * (1.0 - e * e).sqrt() * sin_e, 0.0);

        let nu = true_anomaly_elliptic(e, ea);
        let v = (mu / (a_m * (1.0 - e * e))).sqrt();
        let vel = v * Vector3::new(-nu.sin(), nu.cos() + e, 0.0);
        (pos, vel)
    } else {
        let sol = solve_hyperbolic(m_rad, e, 1e-12)?;
        let h = sol.anomaly_rad;
        let (sinh_h, cosh_h) = (h.sinh(), h.cosh());
        let a_abs = a_m.abs();
        let pos = Vector3::new(
            a_abs * (e - cosh_h),
            a_abs * (e * e - 1.0).sqrt() * sinh_h,
            0.0,
        );

        // a^2 * sqrt(e^2-1) * (e*coshH - 1) * Hdot = sqrt(|a|*(e^2-1)*mu)
        let h_dot =
            (a_abs * (e * e - 1.0) * mu).sqrt() / (a_abs.powi(2) * (e * e - 1.0).sqrt() * (e * cosh_h - 1.0));
        let vel = Vector3::new(
            -a_abs * h_dot * sinh_h,
            a_abs * (e * e - 1.0).sqrt() * h_dot * cosh_h,
            0.0,
        );
        (pos, vel)
    };

    Ok((
        perifocal_to_inertial(pos_pf, raan_rad, i_rad, aop_rad),
        perifocal_to_inertial(vel_pf, raan_rad, i_rad, aop_rad),
    ))
}

/// Recovers classical elements from a Cartesian state.
///
/// For very low inclination (or eccentricity), `raan`/`aop` individually
/// become indeterminate; the composite `raan + aop + nu` still round-trips
/// even when the individual angles do not have a unique decomposition.
pub fn elements_from_state(mu: f64, r: Vector3, v: Vector3) -> Result<Elements, KeplerError> {
    let r_mag = norm(&r);
    if r_mag < f64::EPSILON {
        return Err(KeplerError::Degenerate {
            reason: "zero position vector",
        });
    }

    let h = cross(&r, &v);
    let h_mag = norm(&h);
    if h_mag < f64::EPSILON {
        return Err(KeplerError::Degenerate {
            reason: "zero angular momentum (rectilinear orbit)",
        });
    }

    let energy = dot(&v, &v) / 2.0 - mu / r_mag;
    let a = -mu / (2.0 * energy);

    let e_vec = (cross(&v, &h) / mu) - r / r_mag;
    let e = norm(&e_vec);

    let i = (h.z / h_mag).acos();

    let node = cross(&Vector3::new(0.0, 0.0, 1.0), &h);
    let node_mag = norm(&node);

    let raan = if node_mag < f64::EPSILON {
        0.0
    } else {
        let raw = (node.x / node_mag).acos();
        if node.y < 0.0 {
            core::f64::consts::TAU - raw
        } else {
            raw
        }
    };

    let aop = if node_mag < f64::EPSILON || e < f64::EPSILON {
        0.0
    } else {
        let cos_aop = (dot(&node, &e_vec) / (node_mag * e)).clamp(-1.0, 1.0);
        let raw = cos_aop.acos();
        if e_vec.z < 0.0 {
            core::f64::consts::TAU - raw
        } else {
            raw
        }
    };

    let nu = if e < f64::EPSILON {
        let cos_nu = (dot(&node, &r) / (node_mag.max(f64::EPSILON) * r_mag)).clamp(-1.0, 1.0);
        let raw = cos_nu.acos();
        if r.z < 0.0 {
            core::f64::consts::TAU - raw
        } else {
            raw
        }
    } else {
        let cos_nu = (dot(&e_vec, &r) / (e * r_mag)).clamp(-1.0, 1.0);
        let raw = cos_nu.acos();
        if dot(&r, &v) < 0.0 {
            core::f64::consts::TAU - raw
        } else {
            raw
        }
    };

    let m_rad = if e < 1.0 {
        let ea =
            2.0 * ((1.0 - e).sqrt() * (nu / 2.0).sin()).atan2((1.0 + e).sqrt() * (nu / 2.0).cos());
        wrap_pm_pi(ea - e * ea.sin())
    } else {
        let h_anom = 2.0
            * (((e - 1.0) / (e + 1.0)).sqrt() * (nu / 2.0).tan())
                .atanh();
        e * h_anom.sinh() - h_anom
    };

    Ok(Elements {
        a_m: a,
        e,
        i_rad: i,
        m_rad,
        aop_rad: wrap_pm_pi(aop),
        raan_rad: raan,
    })
}

/// Propagates a Cartesian state forward by `dt_s` seconds along its own
/// two-body Keplerian arc: recovers elements, advances the mean (or
/// hyperbolic) anomaly by the exact two-body mean motion, and converts
/// back to a state. Used by the Lambert solver's correctness checks and
/// by the `kepler` CLI subcommand.
pub fn propagate(r: Vector3, v: Vector3, mu: f64, dt_s: f64) -> Result<(Vector3, Vector3), KeplerError> {
    let elements = elements_from_state(mu, r, v)?;
    let m_rad = if elements.e < 1.0 {
        let n = (mu / elements.a_m.powi(3)).sqrt();
        wrap_pm_pi(elements.m_rad + n * dt_s)
    } else {
        let n = (mu / (-elements.a_m).powi(3)).sqrt();
        elements.m_rad + n * dt_s
    };
    state_from_elements(&Elements { m_rad, ..elements }, mu)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const MU_SUN: f64 = 1.327_124_400_18e20;

    #[test]
    fn elliptic_solver_converges_for_moderate_eccentricity() {
        let sol = solve_elliptic(1.0, 0.3, 1e-12).unwrap();
        assert!(sol.converged);
        assert_relative_eq!(
            sol.anomaly_rad - 0.3 * sol.anomaly_rad.sin(),
            1.0,
            epsilon = 1e-10
        );
    }

    #[test]
    fn hyperbolic_solver_converges() {
        let sol = solve_hyperbolic(2.0, 1.5, 1e-12).unwrap();
        assert!(sol.converged);
        assert_relative_eq!(1.5 * sol.anomaly_rad.sinh() - sol.anomaly_rad, 2.0, epsilon = 1e-9);
    }

    /// Kepler round-trip invariant.
    #[test]
    fn round_trip_elliptic() {
        let elements = Elements {
            a_m: 1.5e11,
            e: 0.2,
            i_rad: 0.3,
            m_rad: 1.1,
            aop_rad: 0.7,
            raan_rad: 2.2,
        };
        let (r, v) = state_from_elements(&elements, MU_SUN).unwrap();
        let back = elements_from_state(MU_SUN, r, v).unwrap();

        assert_relative_eq!(back.a_m, elements.a_m, max_relative = 1e-9);
        assert_relative_eq!(back.e, elements.e, max_relative = 1e-9);
        assert_relative_eq!(back.i_rad, elements.i_rad, max_relative = 1e-9);
    }

    /// Energy conservation along a Keplerian arc.
    #[test]
    fn energy_conserved_along_arc() {
        let base = Elements {
            a_m: 2.0e11,
            e: 0.1,
            i_rad: 0.2,
            m_rad: 0.0,
            aop_rad: 0.4,
            raan_rad: 1.0,
        };

        let mut energies = Vec::new();
        for k in 0..20 {
            let m = base.m_rad + k as f64 * 0.1;
            let elements = Elements { m_rad: m, ..base };
            let (r, v) = state_from_elements(&elements, MU_SUN).unwrap();
            let energy = dot(&v, &v) / 2.0 - MU_SUN / norm(&r);
            energies.push(energy);
        }

        let first = energies[0];
        for e in &energies {
            assert_relative_eq!(*e, first, max_relative = 1e-8);
        }
    }

    #[test]
    fn hyperbolic_round_trip() {
        let elements = Elements {
            a_m: -2.0e10,
            e: 1.4,
            i_rad: 0.5,
            m_rad: 0.8,
            aop_rad: 0.2,
            raan_rad: 1.3,
        };
        let (r, v) = state_from_elements(&elements, MU_SUN).unwrap();
        let back = elements_from_state(MU_SUN, r, v).unwrap();
        assert_relative_eq!(back.a_m, elements.a_m, max_relative = 1e-8);
        assert_relative_eq!(back.e, elements.e, max_relative = 1e-8);
    }

    #[test]
    fn propagate_one_full_period_returns_to_start() {
        let elements = Elements {
            a_m: 1.5e11,
            e: 0.1,
            i_rad: 0.2,
            m_rad: 0.5,
            aop_rad: 0.3,
            raan_rad: 1.0,
        };
        let (r0, v0) = state_from_elements(&elements, MU_SUN).unwrap();
        let period_s = core::f64::consts::TAU * (elements.a_m.powi(3) / MU_SUN).sqrt();
        let (r1, v1) = propagate(r0, v0, MU_SUN, period_s).unwrap();
        assert_relative_eq!(r1, r0, max_relative = 1e-7);
        assert_relative_eq!(v1, v0, max_relative = 1e-7);
    }
}
