/*
 * Lambert's problem: Izzo's revisited algorithm, returning all `2*Nmax + 1`
 * solutions of the two-position, fixed-time-of-flight boundary problem,
 * including multi-revolution solutions.
 *
 * The numerics are built directly from the published closed-form
 * time-of-flight branches (Lagrange / Battin-series / Lancaster) and the
 * Householder root finder that drives them; the `Result`-returning,
 * iteration-count-reporting shape follows `math::kepler`'s conventions.
 */

use crate::errors::LambertError;
use crate::math::vector::{cross, normalize, norm, Vector3};

use core::f64::consts::PI;

/// Cap on the Householder iterations used to converge each `x` root.
pub const MAX_HOUSEHOLDER_ITERATIONS: u32 = 15;
/// Cap on the Halley pre-scan used to locate the multi-revolution `T`-minimum.
pub const MAX_PRESCAN_ITERATIONS: u32 = 12;

const TOL_0REV: f64 = 1e-5;
const TOL_MULTI_REV: f64 = 1e-8;
const HZ_EPS: f64 = 1e-14;

/// Distance from `x = 1` (in either direction) inside which the Battin
/// hypergeometric series is used instead of the closed forms, to avoid the
/// catastrophic cancellation both closed forms suffer near the parabolic
/// case.
const BATTIN_BAND: f64 = 0.01;
/// Distance from `x = 1` outside which the Lagrange closed form is
/// abandoned in favor of the Lancaster form.
const LAGRANGE_BAND: f64 = 0.2;
const HYPERGEOMETRIC_TOL: f64 = 1e-11;
const HYPERGEOMETRIC_MAX_TERMS: u32 = 1_000;

/// One candidate transfer: the two velocity vectors, which revolution
/// branch it belongs to, and how the inner solver fared.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LambertSolution {
    /// Velocity at `r1`, m/s.
    pub v1: Vector3,
    /// Velocity at `r2`, m/s.
    pub v2: Vector3,
    /// Number of complete revolutions this branch encodes (0 for the
    /// direct transfer).
    pub revolutions: u32,
    /// Householder iterations spent converging this branch's `x`.
    pub iterations: u32,
    /// Whether the iteration met tolerance within the iteration cap.
    /// Non-convergence is not a hard failure (spec §7 `NonConvergent`):
    /// the last estimate is still returned.
    pub converged: bool,
}

/// Solves Lambert's problem for `(r1, r2)` with time of flight `tof` under
/// gravitational parameter `mu`, returning every `2*Nmax + 1` solution up
/// to `nmax_cap` revolutions. `clockwise` selects motion opposite to the
/// sense implied by `r1 x r2`.
pub fn solve(
    r1: Vector3,
    r2: Vector3,
    tof: f64,
    mu: f64,
    clockwise: bool,
    nmax_cap: u32,
) -> Result<Vec<LambertSolution>, LambertError> {
    if tof <= 0.0 {
        return Err(LambertError::NonPositiveTimeOfFlight { tof });
    }
    if mu <= 0.0 {
        return Err(LambertError::NonPositiveMu { mu });
    }

    let r1n = norm(&r1);
    let r2n = norm(&r2);
    let i_r1 = r1 / r1n;
    let i_r2 = r2 / r2n;

    let c = norm(&(r2 - r1));
    let s = (c + r1n + r2n) / 2.0;

    let i_h_raw = cross(&i_r1, &i_r2);
    let h_z = i_h_raw.z;
    if h_z.abs() < HZ_EPS {
        return Err(LambertError::Degenerate { h_z });
    }
    let i_h = normalize(&i_h_raw);

    let mut lambda = (1.0 - (c / s).min(1.0)).sqrt();
    let (mut i_t1, mut i_t2) = if i_h.z < 0.0 {
        lambda = -lambda;
        (cross(&i_r1, &i_h), cross(&i_r2, &i_h))
    } else {
        (cross(&i_h, &i_r1), cross(&i_h, &i_r2))
    };
    i_t1 = normalize(&i_t1);
    i_t2 = normalize(&i_t2);
    if clockwise {
        lambda = -lambda;
        i_t1 = -i_t1;
        i_t2 = -i_t2;
    }

    let t = (2.0 * mu / s.powi(3)).sqrt() * tof;
    let t00 = lambda.acos() + lambda * (1.0 - lambda * lambda).sqrt();
    let t1_parabolic = (2.0 / 3.0) * (1.0 - lambda.powi(3));

    let mut nmax = (t / PI).floor().max(0.0) as i64;
    if nmax > 0 {
        let t0_n = t00 + nmax as f64 * PI;
        if t < t0_n {
            let x_min = find_tof_minimum(nmax as u32, lambda);
            let t_min = tof_curve(x_min, nmax as u32, lambda);
            if t_min > t {
                nmax -= 1;
            }
        }
    }
    let nmax = nmax.clamp(0, nmax_cap as i64) as u32;

    let gamma = (mu * s / 2.0).sqrt();
    let rho = (r1n - r2n) / c;
    let sigma = (1.0 - rho * rho).sqrt();

    let reconstruct = |x: f64, revolutions: u32, iterations: u32, converged: bool| -> LambertSolution {
        let y = (1.0 - lambda * lambda * (1.0 - x * x)).sqrt();
        let vr1 = gamma * ((lambda * y - x) - rho * (lambda * y + x)) / r1n;
        let vr2 = -gamma * ((lambda * y - x) + rho * (lambda * y + x)) / r2n;
        let vt = gamma * sigma * (y + lambda * x);
        let vt1 = vt / r1n;
        let vt2 = vt / r2n;
        LambertSolution {
            v1: vr1 * i_r1 + vt1 * i_t1,
            v2: vr2 * i_r2 + vt2 * i_t2,
            revolutions,
            iterations,
            converged,
        }
    };

    let mut solutions = Vec::with_capacity(2 * nmax as usize + 1);

    let x0 = initial_guess_0rev(t, lambda, t00, t1_parabolic);
    let (x, iterations, _residual, converged) = householder_solve(x0, t, 0, lambda, TOL_0REV);
    solutions.push(reconstruct(x, 0, iterations, converged));

    for n in 1..=nmax {
        let (x0_left, x0_right) = initial_guess_multi_rev(t, n);

        let (xl, itl, _resl, convl) = householder_solve(x0_left, t, n, lambda, TOL_MULTI_REV);
        solutions.push(reconstruct(xl, n, itl, convl));

        let (xr, itr, _resr, convr) = householder_solve(x0_right, t, n, lambda, TOL_MULTI_REV);
        solutions.push(reconstruct(xr, n, itr, convr));
    }

    Ok(solutions)
}

/// Piecewise initial guess for the 0-revolution branch (spec §4.9).
fn initial_guess_0rev(t: f64, lambda: f64, t00: f64, t1_parabolic: f64) -> f64 {
    if t >= t00 {
        (t00 / t).powf(2.0 / 3.0) - 1.0
    } else if t <= t1_parabolic {
        5.0 / 2.0 * (t1_parabolic / t) * (t1_parabolic - t) / (1.0 - lambda.powi(5)) + 1.0
    } else {
        (t00 / t).powf((t1_parabolic / t00).log2()) - 1.0
    }
}

/// Left- and right-branch initial guesses for the `i`-revolution solutions
/// (spec §4.9): `tmp = ((iπ+π)/(8T))^(2/3)` and `tmp = (8T/(iπ))^(2/3)`,
/// both mapped to `x` via `(tmp-1)/(tmp+1)`.
fn initial_guess_multi_rev(t: f64, i: u32) -> (f64, f64) {
    let i = i as f64;
    let tmp_left = ((i * PI + PI) / (8.0 * t)).powf(2.0 / 3.0);
    let tmp_right = (8.0 * t / (i * PI)).powf(2.0 / 3.0);
    ((tmp_left - 1.0) / (tmp_left + 1.0), (tmp_right - 1.0) / (tmp_right + 1.0))
}

/// Householder iteration converging `x` so that `tof_curve(x, n_rev,
/// lambda) == target_t`, capped at `MAX_HOUSEHOLDER_ITERATIONS`. Returns
/// the final `x`, the iteration count, the residual, and whether the
/// tolerance was met -- non-convergence is reported, not raised, per
/// spec §7 (`NonConvergent`).
fn householder_solve(x0: f64, target_t: f64, n_rev: u32, lambda: f64, tol: f64) -> (f64, u32, f64, bool) {
    let mut x = x0;
    let mut iterations = 0;
    let mut residual = f64::INFINITY;

    while iterations < MAX_HOUSEHOLDER_ITERATIONS {
        let t_cur = tof_curve(x, n_rev, lambda);
        residual = t_cur - target_t;
        if residual.abs() < tol {
            break;
        }
        let (dt, ddt, dddt) = tof_derivatives(x, t_cur, lambda);
        let dt2 = dt * dt;
        let denom = dt * (dt2 - residual * ddt) + dddt * residual * residual / 6.0;
        if denom.abs() < 1e-300 {
            break;
        }
        let delta = residual * (dt2 - residual * ddt / 2.0) / denom;
        x -= delta;
        iterations += 1;
    }

    (x, iterations, residual, residual.abs() < tol)
}

/// Locates the `x` minimizing `tof_curve(x, n_rev, lambda)` via a Halley
/// root search on `dT/dx`, starting from `x = 0` and capped at
/// `MAX_PRESCAN_ITERATIONS` (spec §5's "Lambert pre-scan: 12").
fn find_tof_minimum(n_rev: u32, lambda: f64) -> f64 {
    let mut x = 0.0_f64;
    for _ in 0..MAX_PRESCAN_ITERATIONS {
        let t_cur = tof_curve(x, n_rev, lambda);
        let (dt, ddt, dddt) = tof_derivatives(x, t_cur, lambda);
        if dt.abs() < 1e-13 {
            break;
        }
        let denom = 2.0 * ddt * ddt - dt * dddt;
        if denom.abs() < 1e-300 {
            break;
        }
        x -= 2.0 * dt * ddt / denom;
    }
    x
}

/// Non-dimensional time of flight `T(x, N)`, switching formula on `|x-1|`
/// per spec §4.9: Battin's series very close to the parabolic case,
/// Lancaster's form further away, and the Lagrange closed form in between.
fn tof_curve(x: f64, n_rev: u32, lambda: f64) -> f64 {
    let n = n_rev as f64;
    let dist = (x - 1.0).abs();

    if dist < LAGRANGE_BAND && dist > BATTIN_BAND {
        lagrange_tof(x, n, lambda)
    } else {
        let e = x * x - 1.0;
        let rho = e.abs();
        let z = (1.0 + lambda * lambda * e).sqrt();
        if dist < BATTIN_BAND {
            battin_tof(x, n, lambda, e, rho, z)
        } else {
            lancaster_tof(x, n, lambda, e, rho, z)
        }
    }
}

fn lagrange_tof(x: f64, n: f64, lambda: f64) -> f64 {
    let a = 1.0 / (1.0 - x * x);
    if a > 0.0 {
        let alfa = 2.0 * x.acos();
        let beta_mag = 2.0 * (lambda * lambda / a).sqrt().asin();
        let beta = if lambda < 0.0 { -beta_mag } else { beta_mag };
        a * a.sqrt() * ((alfa - alfa.sin()) - (beta - beta.sin()) + 2.0 * PI * n) / 2.0
    } else {
        let alfa = 2.0 * x.acosh();
        let beta_mag = 2.0 * (-lambda * lambda / a).sqrt().asinh();
        let beta = if lambda < 0.0 { -beta_mag } else { beta_mag };
        -a * (-a).sqrt() * ((beta - beta.sinh()) - (alfa - alfa.sinh())) / 2.0
    }
}

fn battin_tof(x: f64, n: f64, lambda: f64, _e: f64, rho: f64, z: f64) -> f64 {
    let eta = z - lambda * x;
    let s1 = 0.5 * (1.0 - lambda - x * eta);
    let q = hypergeometric_f(s1);
    (eta.powi(3) * q + 4.0 * lambda * eta) / 2.0 + n * PI / rho.powf(1.5)
}

fn lancaster_tof(x: f64, n: f64, lambda: f64, e: f64, rho: f64, z: f64) -> f64 {
    let y = rho.sqrt();
    let g = x * z - lambda * e;
    let d = if e < 0.0 {
        let l = g.clamp(-1.0, 1.0).acos();
        n * PI + l
    } else {
        let f = y * (z - lambda * x);
        (f + g).ln()
    };
    (x - lambda * z - d / y) / e
}

/// Battin's hypergeometric series `2F1(3, 1; 5/2; z)`, summed to the
/// tolerance spec §4.9 specifies (`10^-11`).
fn hypergeometric_f(z: f64) -> f64 {
    let mut c_j = 1.0_f64;
    let mut s_j = 1.0_f64;
    let mut j = 0.0_f64;

    for _ in 0..HYPERGEOMETRIC_MAX_TERMS {
        let c_next = c_j * (3.0 + j) * (1.0 + j) / (2.5 + j) * z / (j + 1.0);
        let s_next = s_j + c_next;
        if c_next.abs() < HYPERGEOMETRIC_TOL {
            return s_next;
        }
        s_j = s_next;
        c_j = c_next;
        j += 1.0;
    }
    s_j
}

/// First, second, and third derivatives of `T(x)` with respect to `x`, per
/// spec §4.9/§9: note the first parameter, documented as `T`, is actually
/// the instantaneous time of flight at the *current* `x` (the open
/// question the spec flags) -- this is preserved deliberately, not a bug.
fn tof_derivatives(x: f64, t_current: f64, lambda: f64) -> (f64, f64, f64) {
    let l2 = lambda * lambda;
    let l3 = l2 * lambda;
    let umx2 = 1.0 - x * x;
    let y = (1.0 - l2 * umx2).sqrt();
    let y2 = y * y;
    let y3 = y2 * y;

    let dt = (3.0 * t_current * x - 2.0 + 2.0 * l3 * x / y) / umx2;
    let ddt = (3.0 * t_current + 5.0 * x * dt + 2.0 * (1.0 - l2) * l3 / y3) / umx2;
    let dddt = (7.0 * x * ddt + 8.0 * dt - 6.0 * (1.0 - l2) * l2 * l3 * x / (y3 * y2)) / umx2;
    (dt, ddt, dddt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::kepler::propagate;
    use approx::assert_relative_eq;

    const MU_SUN: f64 = 1.327_124_400_18e20;
    const AU_M: f64 = 1.495_978_706_91e11;

    /// Lambert correctness (spec §8 property 5, scenario S5): the 0-rev
    /// solution's `(r1, v1)` propagates by `tof` back to `r2`.
    #[test]
    fn zero_rev_solution_propagates_to_r2() {
        let r1 = Vector3::new(AU_M, 0.0, 0.0);
        let r2 = Vector3::new(0.0, AU_M, 0.0);
        let tof = 2.5e6;

        let solutions = solve(r1, r2, tof, MU_SUN, false, 0).unwrap();
        assert_eq!(solutions.len(), 1);

        let sol = solutions[0];
        let (r2_check, _v2_check) = propagate(r1, sol.v1, MU_SUN, tof).unwrap();
        assert_relative_eq!(r2_check, r2, max_relative = 1e-6);
    }

    /// Scenario S6: requesting up to 2 revolutions at a longer time of
    /// flight yields exactly `2*2+1 = 5` solutions, each of which
    /// individually propagates back to `r2`.
    #[test]
    fn multi_rev_returns_five_solutions_each_correct() {
        let r1 = Vector3::new(AU_M, 0.0, 0.0);
        let r2 = Vector3::new(0.0, AU_M, 0.0);
        let tof = 3.0e7;

        let solutions = solve(r1, r2, tof, MU_SUN, false, 2).unwrap();
        assert_eq!(solutions.len(), 5);

        for sol in &solutions {
            let (r2_check, _) = propagate(r1, sol.v1, MU_SUN, tof).unwrap();
            assert_relative_eq!(r2_check, r2, max_relative = 1e-6);
        }
    }

    #[test]
    fn non_positive_time_of_flight_is_rejected() {
        let r1 = Vector3::new(AU_M, 0.0, 0.0);
        let r2 = Vector3::new(0.0, AU_M, 0.0);
        let err = solve(r1, r2, -1.0, MU_SUN, false, 0).unwrap_err();
        assert!(matches!(err, LambertError::NonPositiveTimeOfFlight { .. }));
    }

    #[test]
    fn non_positive_mu_is_rejected() {
        let r1 = Vector3::new(AU_M, 0.0, 0.0);
        let r2 = Vector3::new(0.0, AU_M, 0.0);
        let err = solve(r1, r2, 1e6, -1.0, false, 0).unwrap_err();
        assert!(matches!(err, LambertError::NonPositiveMu { .. }));
    }

    #[test]
    fn collinear_positions_are_degenerate() {
        let r1 = Vector3::new(AU_M, 0.0, 0.0);
        let r2 = Vector3::new(2.0 * AU_M, 0.0, 0.0);
        let err = solve(r1, r2, 1e6, MU_SUN, false, 0).unwrap_err();
        assert!(matches!(err, LambertError::Degenerate { .. }));
    }
}
