/*
 * Minor-body Keplerian provider: evaluates `registry::OrbitalSeries7`
 * osculating-element records for dwarf planets and numbered asteroids,
 * reporting heliocentric state.
 *
 * Shares `providers::planetary`'s evaluate-then-convert shape, generalized
 * from the 16-double centennial-rate record to the 7-double
 * osculating-element record `elements::elements_from_series7` already
 * parses.
 */

use crate::elements::{elements_from_series7, mu_to_si};
use crate::errors::ProviderError;
use crate::math::frames::ProviderFrame;
use crate::math::time::Instant;
use crate::math::vector::Vector3;
use crate::registry::{self, NaifId};

use super::Provider;

pub struct MinorBodyProvider {
    bodies: Vec<NaifId>,
    center: NaifId,
}

impl MinorBodyProvider {
    /// A provider for every minor planet the registry carries an
    /// osculating-element record for, reporting heliocentric state.
    pub fn heliocentric() -> Self {
        Self {
            bodies: vec![registry::ids::CERES, registry::ids::PALLAS, registry::ids::VESTA],
            center: registry::ids::SUN,
        }
    }
}

impl Provider for MinorBodyProvider {
    fn bodies(&self) -> &[NaifId] {
        &self.bodies
    }

    /// The osculating elements are referenced to the ecliptic, like the
    /// Standish series this provider mirrors; no further rotation needed.
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
        if observer != self.center {
            return Err(ProviderError::Unsupported {
                action: "minor-body provider only reports heliocentric state",
            });
        }
        let series = registry::dwarf_planet_series(target).ok_or(ProviderError::UnknownBody {
            name: format!("NAIF ID {target}"),
        })?;
        let sun = registry::body(self.center).expect("Sun is always registered");

        let elements = elements_from_series7(series, instant.jd());
        let mu = mu_to_si(sun.mu_km3_s2);
        crate::math::kepler::state_from_elements(&elements, mu).map_err(ProviderError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ceres_state_is_roughly_two_point_eight_au() {
        let provider = MinorBodyProvider::heliocentric();
        let instant = Instant::from_jd(crate::math::time::J2000_JD);
        let (r, _v) = provider
            .state(instant, registry::ids::CERES, registry::ids::SUN)
            .unwrap();
        let au_m = crate::elements::AU_KM * 1000.0;
        let au = r.norm() / au_m;
        assert!((1.0..4.5).contains(&au), "a = {au} AU");
    }

    #[test]
    fn non_heliocentric_observer_is_rejected() {
        let provider = MinorBodyProvider::heliocentric();
        let instant = Instant::from_jd(crate::math::time::J2000_JD);
        let err = provider
            .state(instant, registry::ids::CERES, registry::ids::EARTH)
            .unwrap_err();
        assert!(matches!(err, ProviderError::Unsupported { .. }));
    }

    #[test]
    fn unknown_target_is_rejected() {
        let provider = MinorBodyProvider::heliocentric();
        let instant = Instant::from_jd(crate::math::time::J2000_JD);
        let err = provider
            .state(instant, 9_999_999, registry::ids::SUN)
            .unwrap_err();
        assert!(matches!(err, ProviderError::UnknownBody { .. }));
    }
}
