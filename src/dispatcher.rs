/*
 * Ephemeris dispatcher: routes a (target, observer, epoch) query across
 * registered providers in priority order, falling back to a periodic
 * approximation and then to the Keplerian-series provider before finally
 * reporting the zero state.
 *
 * The dispatcher is the single entry point translation queries go
 * through: an ordered list of heterogeneous providers plus the explicit
 * fallback chain this crate's query model requires.
 */

use crate::errors::{DispatchError, ProviderError};
use crate::math::frames::to_j2000_ecliptic;
use crate::math::time::Instant;
use crate::math::vector::Vector3;
use crate::providers::{
    Gust86Provider, KeplerianSeriesProvider, MinorBodyProvider, Provider, SpkProvider, TritonProvider,
};
use crate::registry::{self, NaifId};

/// One registered provider plus the period (in days) its state should be
/// assumed to repeat over when the requested epoch falls outside its
/// coverage window. `None` means this provider offers no periodic
/// fallback -- an out-of-range query simply moves on to the next entry.
struct Entry {
    provider: Box<dyn Provider>,
    fallback_period_days: Option<f64>,
}

/// Mean sidereal period of the Moon's orbit around Earth, used for the
/// Earth/Moon periodic fallback.
pub const MOON_SIDEREAL_PERIOD_DAYS: f64 = 27.321_661;

/// How many period shifts (forwards and backwards) the periodic fallback
/// will try before giving up.
const MAX_PERIOD_SHIFTS: i64 = 64;

pub struct Dispatcher {
    entries: Vec<Entry>,
    planetary_fallback: KeplerianSeriesProvider,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            planetary_fallback: KeplerianSeriesProvider::heliocentric(),
        }
    }

    /// Registers `provider` at the end of the priority order. `fallback_period_days`,
    /// if given, lets this provider's last known-good state stand in for an
    /// out-of-range epoch by shifting whole periods until landing back
    /// inside the provider's coverage window.
    pub fn register(&mut self, provider: Box<dyn Provider>, fallback_period_days: Option<f64>) {
        self.entries.push(Entry {
            provider,
            fallback_period_days,
        });
    }

    /// Builds a dispatcher with every analytical provider this crate ships
    /// registered -- GUST86 (Uranian moons), Triton, and the minor-body
    /// (dwarf planet/asteroid) Keplerian series -- plus an [`SpkProvider`]
    /// for every kernel path in `kernel_paths` that loads successfully,
    /// serving whichever bodies that kernel's own segment table names as
    /// `target`. The Keplerian-series planetary fallback is always present
    /// via `Dispatcher::new()`.
    ///
    /// A kernel path that fails to load is silently skipped rather than
    /// propagated: callers that pass a best-effort list of known kernel
    /// locations (as the CLI does) should not fail entirely for one
    /// missing or corrupt file when other providers can still serve the
    /// query.
    pub fn with_default_providers(kernel_paths: &[std::path::PathBuf]) -> Self {
        let mut dispatcher = Self::new();
        dispatcher.register(Box::new(Gust86Provider::new()), None);
        dispatcher.register(Box::new(TritonProvider::new()), None);
        dispatcher.register(Box::new(MinorBodyProvider::heliocentric()), None);

        for path in kernel_paths {
            if let Ok(spk) = crate::naif::Spk::load(path) {
                if let Some(provider) = spk_provider_from_segments(spk) {
                    let fallback_period_days = fallback_period_for(provider.bodies());
                    dispatcher.register(Box::new(provider), fallback_period_days);
                }
            }
        }

        dispatcher
    }

    fn knows_body(&self, target: NaifId) -> bool {
        registry::body(target).is_some()
            || self.entries.iter().any(|e| e.provider.bodies().contains(&target))
            || self.planetary_fallback.bodies().contains(&target)
    }

    /// Resolves the Cartesian state (m, m/s) of `target` relative to
    /// `observer` at `instant`.
    ///
    /// Tries every registered provider that covers `instant` directly;
    /// failing that, tries each provider's periodic fallback; failing
    /// that, tries the Keplerian-series planetary fallback; and failing
    /// that, returns the zero state rather than an error, since a
    /// well-formed (known body, in-range date) query should always
    /// resolve to *something*.
    pub fn state(
        &self,
        instant: Instant,
        target: NaifId,
        observer: NaifId,
    ) -> Result<(Vector3, Vector3), DispatchError> {
        if !instant.in_global_envelope() {
            return Err(DispatchError::DateOutOfRange { instant });
        }
        if !self.knows_body(target) {
            return Err(DispatchError::UnknownBody {
                name: format!("NAIF ID {target}"),
            });
        }

        for entry in &self.entries {
            if !entry.provider.bodies().contains(&target) {
                continue;
            }
            if entry.provider.covers(instant) {
                if let Ok((r, v)) = entry.provider.state(instant, target, observer) {
                    return Ok(to_j2000_ecliptic(entry.provider.native_frame(), r, v));
                }
            }
        }

        for entry in &self.entries {
            if !entry.provider.bodies().contains(&target) {
                continue;
            }
            let Some(period_days) = entry.fallback_period_days else {
                continue;
            };
            if let Some((r, v)) =
                periodic_fallback(entry.provider.as_ref(), instant, target, observer, period_days)
            {
                return Ok(to_j2000_ecliptic(entry.provider.native_frame(), r, v));
            }
        }

        if self.planetary_fallback.bodies().contains(&target) {
            if let Ok((r, v)) = self.planetary_fallback.state(instant, target, observer) {
                return Ok(to_j2000_ecliptic(self.planetary_fallback.native_frame(), r, v));
            }
        }

        Ok((Vector3::zeros(), Vector3::zeros()))
    }

    /// Position (m) of `target` relative to `observer` at `instant`.
    pub fn position(
        &self,
        instant: Instant,
        target: NaifId,
        observer: NaifId,
    ) -> Result<Vector3, DispatchError> {
        self.state(instant, target, observer).map(|(r, _v)| r)
    }

    /// Velocity (m/s) of `target` relative to `observer` at `instant`.
    pub fn velocity(
        &self,
        instant: Instant,
        target: NaifId,
        observer: NaifId,
    ) -> Result<Vector3, DispatchError> {
        self.state(instant, target, observer).map(|(_r, v)| v)
    }

    /// Position and velocity of `target` relative to the solar-system
    /// barycenter at `instant`. Declared but not implemented, matching
    /// every registered provider's own `barycentric_state` surface.
    pub fn barycentric_state(
        &self,
        _instant: Instant,
        _target: NaifId,
    ) -> Result<(Vector3, Vector3), DispatchError> {
        Err(ProviderError::Unsupported {
            action: "barycentric state",
        }
        .into())
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds an [`SpkProvider`] over every distinct `target_id` the kernel's own
/// segment table names, with `first_valid`/`last_valid` spanning the union
/// of those segments' coverage. Returns `None` for an empty kernel.
fn spk_provider_from_segments(spk: crate::naif::Spk) -> Option<SpkProvider> {
    let segments = spk.segments();
    if segments.is_empty() {
        return None;
    }
    let mut bodies: Vec<NaifId> = Vec::new();
    let mut min_et = f64::INFINITY;
    let mut max_et = f64::NEG_INFINITY;
    for segment in segments {
        if !bodies.contains(&segment.target_id) {
            bodies.push(segment.target_id);
        }
        min_et = min_et.min(segment.start_epoch_et_s);
        max_et = max_et.max(segment.end_epoch_et_s);
    }
    let first_valid = Instant::from_et_seconds(min_et);
    let last_valid = Instant::from_et_seconds(max_et);
    Some(SpkProvider::new(spk, bodies, first_valid, last_valid))
}

/// Picks the periodic-fallback window (in days) appropriate for an
/// SPK-backed provider, based on which bodies it serves. Satellite
/// providers repeat on roughly their own orbital period around their
/// primary; a provider serving no body this crate has a known period for
/// gets no periodic fallback (`None`), and simply drops out of range
/// instead.
fn fallback_period_for(bodies: &[NaifId]) -> Option<f64> {
    if bodies.contains(&registry::ids::MOON) {
        Some(MOON_SIDEREAL_PERIOD_DAYS)
    } else {
        None
    }
}

/// Shifts `instant` by whole multiples of `period_days` until it falls
/// inside `provider`'s coverage window, then evaluates the state there.
/// The shifted state is returned as-is: for a genuinely periodic orbit
/// this is a good approximation of the state at the original, uncovered
/// instant, and degrades gracefully (by simply failing to find a covered
/// shift) for anything else.
fn periodic_fallback(
    provider: &dyn Provider,
    instant: Instant,
    target: NaifId,
    observer: NaifId,
    period_days: f64,
) -> Option<(Vector3, Vector3)> {
    if period_days <= 0.0 {
        return None;
    }
    for k in 1..=MAX_PERIOD_SHIFTS {
        for sign in [-1.0, 1.0] {
            let shifted = instant.shift_days(sign * k as f64 * period_days);
            if provider.covers(shifted) {
                if let Ok(state) = provider.state(shifted, target, observer) {
                    return Some(state);
                }
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_body_is_rejected() {
        let dispatcher = Dispatcher::new();
        let instant = Instant::from_jd(crate::math::time::J2000_JD);
        let err = dispatcher.state(instant, 7_777_777, registry::ids::SUN).unwrap_err();
        assert!(matches!(err, DispatchError::UnknownBody { .. }));
    }

    #[test]
    fn date_outside_envelope_is_rejected() {
        let dispatcher = Dispatcher::new();
        let instant = Instant::from_jd(0.0);
        let err = dispatcher
            .state(instant, registry::ids::EARTH_MOON_BARYCENTER, registry::ids::SUN)
            .unwrap_err();
        assert!(matches!(err, DispatchError::DateOutOfRange { .. }));
    }

    #[test]
    fn planetary_fallback_resolves_known_barycenter() {
        let dispatcher = Dispatcher::new();
        let instant = Instant::from_jd(crate::math::time::J2000_JD);
        let (r, _v) = dispatcher
            .state(instant, registry::ids::EARTH_MOON_BARYCENTER, registry::ids::SUN)
            .unwrap();
        assert!(r.norm() > 0.0);
    }

    #[test]
    fn position_and_velocity_split_state() {
        let dispatcher = Dispatcher::new();
        let instant = Instant::from_jd(crate::math::time::J2000_JD);
        let (r, v) = dispatcher
            .state(instant, registry::ids::EARTH_MOON_BARYCENTER, registry::ids::SUN)
            .unwrap();
        let position = dispatcher
            .position(instant, registry::ids::EARTH_MOON_BARYCENTER, registry::ids::SUN)
            .unwrap();
        let velocity = dispatcher
            .velocity(instant, registry::ids::EARTH_MOON_BARYCENTER, registry::ids::SUN)
            .unwrap();
        assert_eq!(position, r);
        assert_eq!(velocity, v);
    }

    #[test]
    fn fallback_period_for_picks_moon_period() {
        assert_eq!(
            fallback_period_for(&[registry::ids::EARTH, registry::ids::MOON]),
            Some(MOON_SIDEREAL_PERIOD_DAYS)
        );
        assert_eq!(fallback_period_for(&[registry::ids::EARTH]), None);
    }

    #[test]
    fn barycentric_state_is_unsupported() {
        let dispatcher = Dispatcher::new();
        let instant = Instant::from_jd(crate::math::time::J2000_JD);
        let err = dispatcher
            .barycentric_state(instant, registry::ids::EARTH_MOON_BARYCENTER)
            .unwrap_err();
        assert!(matches!(
            err,
            DispatchError::Provider {
                source: ProviderError::Unsupported { .. }
            }
        ));
    }
}
