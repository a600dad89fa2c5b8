/*
 * Orbital-element propagator: evaluates Standish's centennial-rate series
 * (`registry::OrbitalSeries16`) and osculating-element records
 * (`registry::OrbitalSeries7`) at a given epoch and converts the result to
 * a Cartesian state via `math::kepler`.
 *
 * The `Result`-returning shape and the reuse of
 * `math::kepler::{Elements, wrap_pm_pi, state_from_elements}` follow the
 * conventions established there.
 */

use crate::errors::KeplerError;
use crate::math::kepler::{state_from_elements, wrap_pm_pi, Elements};
use crate::math::vector::Vector3;
use crate::registry::{OrbitalSeries16, OrbitalSeries7};

/// IAU-defined astronomical unit, in kilometers.
pub const AU_KM: f64 = 149_597_870.7;

/// Evaluates a Standish centennial-rate series at `centuries_past_j2000`
/// and returns the resulting classical elements (SI units / radians).
pub fn elements_from_series16(series: &OrbitalSeries16, centuries_past_j2000: f64) -> Elements {
    let t = centuries_past_j2000;

    let a_au = series.a0_au + series.a_dot_au_per_century * t;
    let e = series.e0 + series.e_dot_per_century * t;
    let i_deg = series.i0_deg + series.i_dot_deg_per_century * t;
    let l_deg = series.l0_deg + series.l_dot_deg_per_century * t;
    let long_peri_deg = series.long_peri0_deg + series.long_peri_dot_deg_per_century * t;
    let long_node_deg = series.long_node0_deg + series.long_node_dot_deg_per_century * t;

    let aop_deg = long_peri_deg - long_node_deg;
    let correction = series.b * t * t
        + series.c * (series.f * t).to_radians().cos()
        + series.s * (series.f * t).to_radians().sin();
    let m_deg = l_deg - long_peri_deg + correction;

    Elements {
        a_m: a_au * AU_KM * 1000.0,
        e,
        i_rad: i_deg.to_radians(),
        m_rad: wrap_pm_pi(m_deg.to_radians()),
        aop_rad: wrap_pm_pi(aop_deg.to_radians()),
        raan_rad: long_node_deg.to_radians().rem_euclid(core::f64::consts::TAU),
    }
}

/// Evaluates an osculating-element record at Julian Date `jd`.
///
/// `M` is canonicalised into `(-pi, pi]` only for elliptic orbits (`e < 1`):
/// a hyperbolic mean anomaly is unbounded and grows without limit away from
/// perihelion, so wrapping it would fold distinct epochs onto the same
/// value.
pub fn elements_from_series7(series: &OrbitalSeries7, jd: f64) -> Elements {
    let m_deg = (jd - series.time_peri_jd) * series.mean_motion_deg_per_day;
    let aop_deg = series.long_peri_deg - series.long_node_deg;
    let m_rad = if series.e < 1.0 {
        wrap_pm_pi(m_deg.to_radians())
    } else {
        m_deg.to_radians()
    };

    Elements {
        a_m: series.a_au * AU_KM * 1000.0,
        e: series.e,
        i_rad: series.i_deg.to_radians(),
        m_rad,
        aop_rad: wrap_pm_pi(aop_deg.to_radians()),
        raan_rad: series
            .long_node_deg
            .to_radians()
            .rem_euclid(core::f64::consts::TAU),
    }
}

/// Converts gravitational parameter from km^3/s^2 (as stored in the
/// registry) to m^3/s^2 (as used throughout `math::kepler`).
pub fn mu_to_si(mu_km3_s2: f64) -> f64 {
    mu_km3_s2 * 1.0e9
}

/// Half-width, in hyperbolic mean anomaly (radians), of the perihelion-
/// centered window `sample_orbit` draws for `e >= 1`: a hyperbolic orbit's
/// mean anomaly is unbounded, so there is no "one full revolution" to
/// sample, only a window around closest approach wide enough to show the
/// incoming and outgoing asymptotic branches.
const HYPERBOLIC_SAMPLE_HALF_RANGE_RAD: f64 = 3.0;

/// Samples 361 evenly spaced points around `elements`, holding every element
/// but the mean anomaly fixed. Used by the `inspect`/orbit-plot CLI surface.
///
/// For `e < 1` this covers one full revolution (`M` from `0` to `2*pi`,
/// inclusive of both endpoints so they coincide). For `e >= 1` there is no
/// periodic revolution to sample, so the window is instead a symmetric
/// range of hyperbolic mean anomaly around perihelion
/// (`+-HYPERBOLIC_SAMPLE_HALF_RANGE_RAD`).
pub fn sample_orbit(elements: &Elements, mu: f64) -> Result<Vec<Vector3>, KeplerError> {
    const SAMPLES: usize = 361;
    let mut points = Vec::with_capacity(SAMPLES);

    for k in 0..SAMPLES {
        let frac = (k as f64) / (SAMPLES as f64 - 1.0);
        let m = if elements.e < 1.0 {
            wrap_pm_pi(core::f64::consts::TAU * frac)
        } else {
            -HYPERBOLIC_SAMPLE_HALF_RANGE_RAD + 2.0 * HYPERBOLIC_SAMPLE_HALF_RANGE_RAD * frac
        };
        let sample = Elements {
            m_rad: m,
            ..*elements
        };
        let (r, _v) = state_from_elements(&sample, mu)?;
        points.push(r);
    }

    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{self, ids};

    #[test]
    fn earth_series_gives_a_near_one_au_at_j2000() {
        let series = registry::planetary_series(ids::EARTH_MOON_BARYCENTER).unwrap();
        let elements = elements_from_series16(series, 0.0);
        let a_au = elements.a_m / (AU_KM * 1000.0);
        assert!((a_au - 1.0).abs() < 0.01, "a = {a_au} AU");
    }

    #[test]
    fn sample_orbit_returns_one_full_revolution() {
        let series = registry::planetary_series(ids::EARTH_MOON_BARYCENTER).unwrap();
        let elements = elements_from_series16(series, 0.0);
        let sun = registry::body(ids::SUN).unwrap();
        let points = sample_orbit(&elements, mu_to_si(sun.mu_km3_s2)).unwrap();
        assert_eq!(points.len(), 361);
        // first and last sample share M (mod 2*pi), so the positions coincide.
        let delta = (points[0] - points[360]).norm();
        assert!(delta < 1.0, "endpoints should coincide, delta = {delta} m");
    }

    #[test]
    fn elements_from_series7_wraps_m_only_for_elliptic_orbits() {
        let elliptic = OrbitalSeries7 {
            a_au: 2.5,
            e: 0.1,
            i_deg: 5.0,
            long_peri_deg: 30.0,
            long_node_deg: 10.0,
            time_peri_jd: 2_451_545.0,
            mean_motion_deg_per_day: 0.3,
        };
        // 2000 days past perihelion winds M well past +-360 degrees.
        let elements = elements_from_series7(&elliptic, 2_451_545.0 + 2_000.0);
        assert!(
            elements.m_rad > -core::f64::consts::PI && elements.m_rad <= core::f64::consts::PI,
            "elliptic M should be canonicalised, got {}",
            elements.m_rad
        );

        let hyperbolic = OrbitalSeries7 {
            a_au: 2.5,
            e: 1.3,
            i_deg: 5.0,
            long_peri_deg: 30.0,
            long_node_deg: 10.0,
            time_peri_jd: 2_451_545.0,
            mean_motion_deg_per_day: 0.3,
        };
        let elements = elements_from_series7(&hyperbolic, 2_451_545.0 + 2_000.0);
        let expected_m_deg = 2_000.0 * 0.3;
        assert!(
            (elements.m_rad.to_degrees() - expected_m_deg).abs() < 1e-9,
            "hyperbolic M should not be wrapped, got {} deg",
            elements.m_rad.to_degrees()
        );
    }

    #[test]
    fn sample_orbit_on_hyperbolic_elements_brackets_perihelion() {
        let elements = Elements {
            a_m: -1.5e11,
            e: 1.2,
            i_rad: 0.1,
            m_rad: 0.0,
            aop_rad: 0.0,
            raan_rad: 0.0,
        };
        let sun = registry::body(ids::SUN).unwrap();
        let points = sample_orbit(&elements, mu_to_si(sun.mu_km3_s2)).unwrap();
        assert_eq!(points.len(), 361);

        let perihelion_distance = points.iter().map(|p| p.norm()).fold(f64::INFINITY, f64::min);
        let expected_perihelion = elements.a_m.abs() * (elements.e - 1.0);
        assert!(
            (perihelion_distance - expected_perihelion).abs() < expected_perihelion * 1e-3,
            "perihelion distance {perihelion_distance} vs expected {expected_perihelion}"
        );
    }
}
