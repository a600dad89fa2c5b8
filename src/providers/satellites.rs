/*
 * Generic SPK-backed provider: wraps a loaded `naif::Spk` kernel and
 * exposes it through the `Provider` trait, for any target whose state is
 * tabulated directly in a kernel (planets, the Moon, the Galilean/Cronian/
 * Uranian/Neptunian moons, Pluto).
 *
 * Resolves a target/observer pair against the loaded SPK segment list;
 * that resolution itself lives in `naif::daf::find_segment`, so this
 * provider is a thin adapter.
 */

use crate::errors::ProviderError;
use crate::math::time::Instant;
use crate::math::vector::Vector3;
use crate::naif::Spk;
use crate::registry::NaifId;

use super::Provider;

pub struct SpkProvider {
    spk: Spk,
    bodies: Vec<NaifId>,
    first_valid: Instant,
    last_valid: Instant,
}

impl SpkProvider {
    /// Wraps `spk`, declaring it authoritative for `bodies` over
    /// `[first_valid, last_valid]`. The caller is expected to have derived
    /// that window from the kernel's own segment coverage (e.g. via
    /// `Spk::segments()`).
    pub fn new(spk: Spk, bodies: Vec<NaifId>, first_valid: Instant, last_valid: Instant) -> Self {
        Self {
            spk,
            bodies,
            first_valid,
            last_valid,
        }
    }

    pub fn spk(&self) -> &Spk {
        &self.spk
    }
}

impl Provider for SpkProvider {
    fn bodies(&self) -> &[NaifId] {
        &self.bodies
    }

    fn first_valid(&self) -> Instant {
        self.first_valid
    }

    fn last_valid(&self) -> Instant {
        self.last_valid
    }

    fn state(
        &self,
        instant: Instant,
        target: NaifId,
        observer: NaifId,
    ) -> Result<(Vector3, Vector3), ProviderError> {
        if !self.covers(instant) {
            return Err(ProviderError::DateOutOfRange {
                instant,
                first: self.first_valid,
                last: self.last_valid,
            });
        }
        self.spk
            .state(instant.et_seconds(), target, observer)
            .map_err(ProviderError::from)
    }
}
