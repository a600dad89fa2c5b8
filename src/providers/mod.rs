/*
 * Ephemeris providers: the pluggable sources of body state vectors the
 * dispatcher chooses between.
 *
 * A `Provider` trait lets the dispatcher fall back across SPK-backed,
 * Keplerian-series, and analytical satellite-theory sources rather than
 * hard-coding a single source.
 */

pub mod galileo;
pub mod gust86;
pub mod minor_bodies;
pub mod moon;
pub mod planetary;
pub mod satellites;
pub mod triton;

pub use galileo::{GalileoCruiseProvider, GalileoLeg};
pub use gust86::Gust86Provider;
pub use minor_bodies::MinorBodyProvider;
pub use moon::MoonProvider;
pub use planetary::KeplerianSeriesProvider;
pub use satellites::SpkProvider;
pub use triton::TritonProvider;

use crate::errors::ProviderError;
use crate::math::frames::ProviderFrame;
use crate::math::time::Instant;
use crate::math::vector::Vector3;
use crate::registry::NaifId;

/// A source of Cartesian state vectors for one or more bodies over some
/// validity window.
pub trait Provider {
    /// NAIF IDs this provider can report a state for, as `target`.
    fn bodies(&self) -> &[NaifId];

    /// The frame `state()` natively reports in. Defaults to
    /// `J2000Equatorial`, the native frame of raw SPK kernels; providers
    /// whose series performs its own final rotation to ecliptic override
    /// this to `J2000Ecliptic` so the dispatcher does not rotate twice.
    fn native_frame(&self) -> ProviderFrame {
        ProviderFrame::J2000Equatorial
    }

    /// Earliest instant this provider is willing to evaluate.
    fn first_valid(&self) -> Instant;

    /// Latest instant this provider is willing to evaluate.
    fn last_valid(&self) -> Instant;

    /// Position (m) and velocity (m/s) of `target` relative to `observer`
    /// at `instant`.
    fn state(
        &self,
        instant: Instant,
        target: NaifId,
        observer: NaifId,
    ) -> Result<(Vector3, Vector3), ProviderError>;

    /// Whether `instant` falls within `[first_valid(), last_valid()]`.
    fn covers(&self, instant: Instant) -> bool {
        instant >= self.first_valid() && instant <= self.last_valid()
    }

    /// Position (m) of `target` relative to `observer` at `instant`.
    fn position(
        &self,
        instant: Instant,
        target: NaifId,
        observer: NaifId,
    ) -> Result<Vector3, ProviderError> {
        self.state(instant, target, observer).map(|(r, _v)| r)
    }

    /// Velocity (m/s) of `target` relative to `observer` at `instant`.
    fn velocity(
        &self,
        instant: Instant,
        target: NaifId,
        observer: NaifId,
    ) -> Result<Vector3, ProviderError> {
        self.state(instant, target, observer).map(|(_r, v)| v)
    }

    /// Position and velocity of `target` relative to the solar-system
    /// barycenter at `instant`. Declared but not implemented by any
    /// provider in this crate (`ProviderError::Unsupported`): every
    /// provider here reports state relative to a named parent body, never
    /// the barycenter itself.
    fn barycentric_state(
        &self,
        _instant: Instant,
        _target: NaifId,
    ) -> Result<(Vector3, Vector3), ProviderError> {
        Err(ProviderError::Unsupported {
            action: "barycentric state",
        })
    }
}
