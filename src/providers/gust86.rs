/*
 * GUST86 (Laskar & Jacobson 1987) Uranian satellite theory.
 *
 * Implements the non-singular element pipeline: at `t = JD - 2444239.5`
 * (the theory's own reference epoch) each satellite's state is carried by
 * a mean longitude `lambda`, an eccentricity-type pair `(k, h) = (e cos
 * varpi, e sin varpi)`, and an inclination-type pair `(q, p) = (sin(i/2)
 * cos Omega, sin(i/2) sin Omega)`. Kepler's equation in this non-singular
 * form, `lambda = F + h cos F - k sin F`, is solved via Newton's method,
 * then perifocal position/velocity are recovered in closed form (Laskar
 * 1986's non-singular transform) and rotated through `(p, q)` into
 * Uranus's orbital plane.
 *
 * Laskar & Jacobson's published short-period correction terms (the
 * periodic part of their N_i(t)/E_i(t)/I_i(t) series) are not reproduced
 * here -- their coefficient tables are not available in this environment
 * -- so `varpi` and `Omega` carry only the secular precession a standard
 * J2 argument derives from Uranus's oblateness, with phase at epoch left
 * at zero. See DESIGN.md.
 *
 * Shares `elements::elements_from_series16`'s evaluate-then-convert shape
 * and `math::kepler`'s Halley-solver pattern, generalized to the
 * non-singular `(k, h, q, p)` form this theory uses.
 */

use crate::elements::mu_to_si;
use crate::errors::ProviderError;
use crate::math::frames::{legacy_b1950_to_j2000_ecliptic, ProviderFrame};
use crate::math::time::Instant;
use crate::math::vector::Vector3;
use crate::registry::{self, ids, NaifId};

use super::Provider;

/// GUST86's own reference epoch, 1980 Jan 1.5 TDB.
const GUST86_EPOCH_JD: f64 = 2_444_239.5;

/// Uranus's second zonal harmonic (Jacobson 2014 GM/J2 solution for the
/// Uranian system).
const URANUS_J2: f64 = 0.003_343_43;
const URANUS_RADIUS_KM: f64 = 25_559.0;

const NEWTON_MAX_ITERATIONS: u32 = 50;
const NEWTON_TOLERANCE: f64 = 1e-12;

/// A Uranian satellite's mean orbital period, eccentricity, and
/// inclination (the quantities GUST86's own closed-form series would
/// otherwise supply at each epoch). `lambda0_deg`/`node0_deg` are the
/// mean longitude and ascending node at the GUST86 epoch; in the absence
/// of the published phase constants both are left at zero.
#[derive(Debug, Clone, Copy)]
pub struct Gust86Series {
    pub period_days: f64,
    pub e: f64,
    pub i_deg: f64,
    pub lambda0_deg: f64,
    pub node0_deg: f64,
}

const SERIES: &[(NaifId, Gust86Series)] = &[
    (
        ids::MIRANDA,
        Gust86Series {
            period_days: 1.413_479,
            e: 0.0013,
            i_deg: 4.338,
            lambda0_deg: 0.0,
            node0_deg: 0.0,
        },
    ),
    (
        ids::ARIEL,
        Gust86Series {
            period_days: 2.520_379,
            e: 0.0012,
            i_deg: 0.041,
            lambda0_deg: 0.0,
            node0_deg: 0.0,
        },
    ),
    (
        ids::UMBRIEL,
        Gust86Series {
            period_days: 4.144_177,
            e: 0.0039,
            i_deg: 0.128,
            lambda0_deg: 0.0,
            node0_deg: 0.0,
        },
    ),
    (
        ids::TITANIA,
        Gust86Series {
            period_days: 8.705_872,
            e: 0.0011,
            i_deg: 0.079,
            lambda0_deg: 0.0,
            node0_deg: 0.0,
        },
    ),
    (
        ids::OBERON,
        Gust86Series {
            period_days: 13.463_239,
            e: 0.0014,
            i_deg: 0.068,
            lambda0_deg: 0.0,
            node0_deg: 0.0,
        },
    ),
];

fn series_for(id: NaifId) -> Option<&'static Gust86Series> {
    SERIES.iter().find(|(moon_id, _)| *moon_id == id).map(|(_, s)| s)
}

/// Secular node-regression and apsidal-precession rates (rad/day) a
/// satellite on a near-circular, near-equatorial orbit acquires from
/// Uranus's J2, per the standard first-order secular theory (e.g. Vallado,
/// *Fundamentals of Astrodynamics*, ch. 9).
fn j2_secular_rates(a_km: f64, e: f64, i_rad: f64, n_rad_per_day: f64) -> (f64, f64) {
    let ratio2 = (URANUS_RADIUS_KM / a_km).powi(2);
    let factor = 1.0 / (1.0 - e * e).powi(2);
    let node_rate = -1.5 * n_rad_per_day * URANUS_J2 * ratio2 * i_rad.cos() * factor;
    let peri_rate = 0.75 * n_rad_per_day * URANUS_J2 * ratio2 * (5.0 * i_rad.cos().powi(2) - 1.0) * factor;
    (node_rate, peri_rate)
}

/// Solves the non-singular Kepler equation `lambda = F + h*cos(F) - k*sin(F)`
/// for `F` via Newton's method, starting from `F0 = lambda`.
fn solve_non_singular(lambda_rad: f64, k: f64, h: f64) -> f64 {
    let mut f = lambda_rad;
    for _ in 0..NEWTON_MAX_ITERATIONS {
        let (sf, cf) = f.sin_cos();
        let residual = f + h * cf - k * sf - lambda_rad;
        let derivative = 1.0 - h * sf - k * cf;
        let step = residual / derivative;
        f -= step;
        if step.abs() < NEWTON_TOLERANCE {
            break;
        }
    }
    f
}

/// Evaluates a satellite's state (m, m/s) in Uranus's orbital plane,
/// parameterized by the non-singular elements, at Julian Date `jd`.
fn non_singular_state(series: &Gust86Series, uranus_mu_si: f64, jd: f64) -> (Vector3, Vector3) {
    let t = jd - GUST86_EPOCH_JD;
    let n_rad_per_day = core::f64::consts::TAU / series.period_days;
    let seconds_per_day = crate::math::time::SECONDS_PER_DAY;
    let a_m = (uranus_mu_si * seconds_per_day * seconds_per_day / (n_rad_per_day * n_rad_per_day))
        .cbrt();

    let (node_rate, peri_rate) =
        j2_secular_rates(a_m / 1000.0, series.e, series.i_deg.to_radians(), n_rad_per_day);

    let lambda_rad = series.lambda0_deg.to_radians() + n_rad_per_day * t;
    let peri_phase_rad = peri_rate * t;
    let node_phase_rad = series.node0_deg.to_radians() + node_rate * t;

    let k = series.e * peri_phase_rad.cos();
    let h = series.e * peri_phase_rad.sin();
    let half_i = series.i_deg.to_radians() / 2.0;
    let p = half_i.sin() * node_phase_rad.sin();
    let q = half_i.sin() * node_phase_rad.cos();

    let f = solve_non_singular(lambda_rad, k, h);
    let (sf, cf) = f.sin_cos();
    let beta = (1.0 - h * h - k * k).max(0.0).sqrt();
    let denom = 1.0 + beta;

    let x = a_m * ((1.0 - h * h / denom) * cf + (h * k / denom) * sf - k);
    let y = a_m * ((h * k / denom) * cf + (1.0 - k * k / denom) * sf - h);

    let n_rad_per_s = n_rad_per_day / seconds_per_day;
    let f_dot = n_rad_per_s / (1.0 - h * sf - k * cf);
    let vx = a_m * f_dot * (-(1.0 - h * h / denom) * sf + (h * k / denom) * cf);
    let vy = a_m * f_dot * (-(h * k / denom) * sf + (1.0 - k * k / denom) * cf);

    // Non-singular perifocal-to-parent rotation through (p, q) (Broucke &
    // Cefola 1972 convention).
    let gamma = (1.0 - p * p - q * q).max(0.0).sqrt();
    let rotate = |px: f64, py: f64| {
        Vector3::new(
            px * (1.0 - 2.0 * p * p) + py * (2.0 * p * q),
            px * (2.0 * p * q) + py * (1.0 - 2.0 * q * q),
            2.0 * gamma * (py * p - px * q),
        )
    };

    let pos = rotate(x, y);
    let vel = rotate(vx, vy);
    (pos, vel)
}

pub struct Gust86Provider {
    bodies: Vec<NaifId>,
}

impl Gust86Provider {
    pub fn new() -> Self {
        Self {
            bodies: SERIES.iter().map(|(id, _)| *id).collect(),
        }
    }
}

impl Default for Gust86Provider {
    fn default() -> Self {
        Self::new()
    }
}

impl Provider for Gust86Provider {
    fn bodies(&self) -> &[NaifId] {
        &self.bodies
    }

    /// GUST86's own final step is a fixed B1950 -> J2000 -> ecliptic
    /// rotation, applied inside `state()` below; the dispatcher must not
    /// rotate this provider's output a second time.
    fn native_frame(&self) -> ProviderFrame {
        ProviderFrame::J2000Ecliptic
    }

    fn first_valid(&self) -> Instant {
        Instant::from_jd(crate::math::time::MIN_SUPPORTED_JD)
    }

    fn last_valid(&self) -> Instant {
        Instant::from_jd(crate::math::time::MAX_SUPPORTED_JD)
    }

    fn state(
        &self,
        instant: Instant,
        target: NaifId,
        observer: NaifId,
    ) -> Result<(Vector3, Vector3), ProviderError> {
        if observer != ids::URANUS_BARYCENTER {
            return Err(ProviderError::Unsupported {
                action: "GUST86 provider only reports state relative to the Uranus barycenter",
            });
        }
        let series = series_for(target).ok_or(ProviderError::UnknownBody {
            name: format!("NAIF ID {target}"),
        })?;
        let uranus = registry::body(ids::URANUS_BARYCENTER).expect("Uranus is always registered");
        let mu = mu_to_si(uranus.mu_km3_s2);

        let (r, v) = non_singular_state(series, mu, instant.jd());
        Ok((
            legacy_b1950_to_j2000_ecliptic(&r),
            legacy_b1950_to_j2000_ecliptic(&v),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expected_semimajor_axis_m(series: &Gust86Series, mu: f64) -> f64 {
        let n = core::f64::consts::TAU / series.period_days;
        let spd = crate::math::time::SECONDS_PER_DAY;
        (mu * spd * spd / (n * n)).cbrt()
    }

    #[test]
    fn titania_orbit_radius_matches_derived_semimajor_axis() {
        let provider = Gust86Provider::new();
        let instant = Instant::from_jd(crate::math::time::J2000_JD);
        let (r, _v) = provider
            .state(instant, ids::TITANIA, ids::URANUS_BARYCENTER)
            .unwrap();
        let uranus = registry::body(ids::URANUS_BARYCENTER).unwrap();
        let a_m = expected_semimajor_axis_m(series_for(ids::TITANIA).unwrap(), mu_to_si(uranus.mu_km3_s2));
        assert!((r.norm() - a_m).abs() < a_m * 0.05, "r={}, a={}", r.norm(), a_m);
    }

    #[test]
    fn non_uranus_observer_is_rejected() {
        let provider = Gust86Provider::new();
        let instant = Instant::from_jd(crate::math::time::J2000_JD);
        let err = provider
            .state(instant, ids::TITANIA, ids::SUN)
            .unwrap_err();
        assert!(matches!(err, ProviderError::Unsupported { .. }));
    }

    #[test]
    fn moons_advance_in_orbit_over_a_quarter_period() {
        let provider = Gust86Provider::new();
        let series = series_for(ids::MIRANDA).unwrap();
        let t0 = Instant::from_jd(crate::math::time::J2000_JD);
        let t1 = Instant::from_jd(crate::math::time::J2000_JD + series.period_days / 4.0);

        let (r0, _) = provider.state(t0, ids::MIRANDA, ids::URANUS_BARYCENTER).unwrap();
        let (r1, _) = provider.state(t1, ids::MIRANDA, ids::URANUS_BARYCENTER).unwrap();
        assert!((r1 - r0).norm() > r0.norm() * 0.5, "Miranda should have moved substantially in a quarter orbit");
    }
}
