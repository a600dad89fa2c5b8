/*
 * Galileo-spacecraft cruise provider: stitches together several SPK-backed
 * providers, each authoritative over a different leg of the mission and
 * each tabulated relative to whatever observer that leg's kernel was built
 * against (the Sun during deep cruise, Earth or Venus during the
 * gravity-assist flybys, the asteroid itself during the Gaspra/Ida
 * encounters), into a single heliocentric state.
 *
 * Generalizes the segment-selection idiom in `naif::daf::find_segment`
 * (first match by coverage window) across whole providers instead of
 * summary records within one kernel, with the heliocentric stitching
 * itself relying on `providers::planetary`'s `KeplerianSeriesProvider` as
 * the auxiliary source of a leg observer's own heliocentric state.
 */

use crate::errors::ProviderError;
use crate::math::time::Instant;
use crate::math::vector::Vector3;
use crate::registry::{self, NaifId};

use super::{KeplerianSeriesProvider, Provider, SpkProvider};

/// One mission leg: an SPK-backed provider plus the observer its segments
/// are tabulated relative to. `observer` need not be the Sun -- `state`
/// resolves that observer's own heliocentric state and adds it in.
pub struct GalileoLeg {
    pub provider: SpkProvider,
    pub observer: NaifId,
}

pub struct GalileoCruiseProvider {
    legs: Vec<GalileoLeg>,
    bodies: Vec<NaifId>,
    heliocentric_source: KeplerianSeriesProvider,
}

impl GalileoCruiseProvider {
    /// Builds a cruise provider from its mission legs, ordered however the
    /// caller likes; `state` tries each leg in order and returns the first
    /// whose validity window covers the requested instant, stitched into a
    /// heliocentric state.
    pub fn new(legs: Vec<GalileoLeg>) -> Self {
        let mut bodies: Vec<NaifId> = legs
            .iter()
            .flat_map(|leg| leg.provider.bodies().to_vec())
            .collect();
        bodies.sort_unstable();
        bodies.dedup();
        Self {
            legs,
            bodies,
            heliocentric_source: KeplerianSeriesProvider::heliocentric(),
        }
    }
}

impl Provider for GalileoCruiseProvider {
    fn bodies(&self) -> &[NaifId] {
        &self.bodies
    }

    fn first_valid(&self) -> Instant {
        self.legs
            .iter()
            .map(|leg| leg.provider.first_valid())
            .min_by(|a, b| a.partial_cmp(b).unwrap())
            .unwrap_or(Instant::from_jd(crate::math::time::MIN_SUPPORTED_JD))
    }

    fn last_valid(&self) -> Instant {
        self.legs
            .iter()
            .map(|leg| leg.provider.last_valid())
            .max_by(|a, b| a.partial_cmp(b).unwrap())
            .unwrap_or(Instant::from_jd(crate::math::time::MAX_SUPPORTED_JD))
    }

    fn state(
        &self,
        instant: Instant,
        target: NaifId,
        observer: NaifId,
    ) -> Result<(Vector3, Vector3), ProviderError> {
        if observer != registry::ids::SUN {
            return Err(ProviderError::Unsupported {
                action: "Galileo cruise provider only reports heliocentric state",
            });
        }

        for leg in &self.legs {
            if !leg.provider.bodies().contains(&target) {
                continue;
            }
            if !leg.provider.covers(instant) {
                continue;
            }
            let (r_rel, v_rel) = leg.provider.state(instant, target, leg.observer)?;
            if leg.observer == registry::ids::SUN {
                return Ok((r_rel, v_rel));
            }
            let (r_obs, v_obs) = self
                .heliocentric_source
                .state(instant, leg.observer, registry::ids::SUN)
                .map_err(|_| ProviderError::Unsupported {
                    action: "no heliocentric source available for this leg's observer",
                })?;
            return Ok((r_rel + r_obs, v_rel + v_obs));
        }

        Err(ProviderError::DateOutOfRange {
            instant,
            first: self.first_valid(),
            last: self.last_valid(),
        })
    }
}
