/*
 * Keplerian-series planetary provider: the Standish centennial-rate series
 * fallback used when no SPK kernel covers a planet (or its barycenter) at
 * the requested epoch.
 *
 * Evaluates `elements::elements_from_series16` and converts the result to
 * a Cartesian state with `math::kepler::state_from_elements`. A query for
 * a planet's own body ID (e.g. Earth, 399) resolves to its barycenter's
 * series via the registry's `parent_id` chain, since Standish's series is
 * fit to the barycenter, not the individual planet.
 */

use crate::elements::{elements_from_series16, mu_to_si};
use crate::errors::ProviderError;
use crate::math::frames::ProviderFrame;
use crate::math::time::Instant;
use crate::math::vector::Vector3;
use crate::registry::{self, NaifId};

use super::Provider;

/// Validity window Standish's published fit is accurate over.
const FIRST_VALID_JD: f64 = crate::math::time::MIN_SUPPORTED_JD;
const LAST_VALID_JD: f64 = crate::math::time::MAX_SUPPORTED_JD;

pub struct KeplerianSeriesProvider {
    bodies: Vec<NaifId>,
    center: NaifId,
}

impl KeplerianSeriesProvider {
    /// A provider for every planet barycenter the registry carries a
    /// series for, plus the individual planet IDs that resolve to one of
    /// those barycenters, reporting heliocentric state (`center` = the
    /// Sun).
    pub fn heliocentric() -> Self {
        Self {
            bodies: vec![
                registry::ids::MERCURY_BARYCENTER,
                registry::ids::VENUS_BARYCENTER,
                registry::ids::EARTH_MOON_BARYCENTER,
                registry::ids::MARS_BARYCENTER,
                registry::ids::JUPITER_BARYCENTER,
                registry::ids::SATURN_BARYCENTER,
                registry::ids::URANUS_BARYCENTER,
                registry::ids::NEPTUNE_BARYCENTER,
                registry::ids::PLUTO_BARYCENTER,
                registry::ids::MERCURY,
                registry::ids::VENUS,
                registry::ids::EARTH,
                registry::ids::MARS,
                registry::ids::JUPITER,
                registry::ids::SATURN,
                registry::ids::URANUS,
                registry::ids::NEPTUNE,
                registry::ids::PLUTO,
            ],
            center: registry::ids::SUN,
        }
    }
}

/// Resolves `target`'s series, trying `target` itself first and then its
/// registry parent -- so a literal planet ID (e.g. Earth, 399) falls back
/// to its barycenter's series (e.g. Earth-Moon Barycenter, 3).
fn series_for(target: NaifId) -> Option<&'static registry::OrbitalSeries16> {
    registry::planetary_series(target).or_else(|| {
        let parent = registry::body(target)?.parent_id;
        registry::planetary_series(parent)
    })
}

impl Provider for KeplerianSeriesProvider {
    fn bodies(&self) -> &[NaifId] {
        &self.bodies
    }

    /// Standish's series is fit directly against the J2000 mean ecliptic,
    /// so its output needs no further rotation.
    fn native_frame(&self) -> ProviderFrame {
        ProviderFrame::J2000Ecliptic
    }

    fn first_valid(&self) -> Instant {
        Instant::from_jd(FIRST_VALID_JD)
    }

    fn last_valid(&self) -> Instant {
        Instant::from_jd(LAST_VALID_JD)
    }

    fn state(
        &self,
        instant: Instant,
        target: NaifId,
        observer: NaifId,
    ) -> Result<(Vector3, Vector3), ProviderError> {
        if observer != self.center {
            return Err(ProviderError::Unsupported {
                action: "Keplerian-series provider only reports heliocentric state",
            });
        }
        let series = series_for(target).ok_or(ProviderError::UnknownBody {
            name: format!("NAIF ID {target}"),
        })?;
        let sun = registry::body(self.center).expect("Sun is always registered");

        let elements = elements_from_series16(series, instant.centuries_past_j2000());
        let mu = mu_to_si(sun.mu_km3_s2);
        crate::math::kepler::state_from_elements(&elements, mu).map_err(ProviderError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn earth_barycenter_state_is_roughly_one_au() {
        let provider = KeplerianSeriesProvider::heliocentric();
        let instant = Instant::from_jd(crate::math::time::J2000_JD);
        let (r, _v) = provider
            .state(instant, registry::ids::EARTH_MOON_BARYCENTER, registry::ids::SUN)
            .unwrap();
        let au_m = crate::elements::AU_KM * 1000.0;
        assert!((r.norm() / au_m - 1.0).abs() < 0.05);
    }

    /// A query for Earth's own NAIF ID (399), not its barycenter (3), must
    /// resolve to the same series via the registry's `parent_id` chain.
    #[test]
    fn literal_planet_id_resolves_to_barycenter_series() {
        let provider = KeplerianSeriesProvider::heliocentric();
        assert!(provider.bodies().contains(&registry::ids::EARTH));

        let instant = Instant::from_jd(crate::math::time::J2000_JD);
        let (r_earth, _) = provider
            .state(instant, registry::ids::EARTH, registry::ids::SUN)
            .unwrap();
        let (r_emb, _) = provider
            .state(instant, registry::ids::EARTH_MOON_BARYCENTER, registry::ids::SUN)
            .unwrap();
        assert_eq!(r_earth, r_emb);
    }
}
