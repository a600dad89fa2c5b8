/*
 * Astrodyne
 * Ephemeris dispatch, SPK reading, and Lambert's problem.
 */
#![doc = include_str!("../README.md")]

pub mod dispatcher;
pub mod elements;
pub mod errors;
pub mod lambert;
pub mod math;
pub mod naif;
pub mod providers;
pub mod registry;

/// Commonly reached-for types, grouped for a single glob import.
pub mod prelude {
    pub use crate::dispatcher::Dispatcher;
    pub use crate::elements::{elements_from_series16, elements_from_series7};
    pub use crate::errors::{
        AstrodyneError, DafError, DispatchError, KeplerError, LambertError, ProviderError,
    };
    pub use crate::lambert::{solve as solve_lambert, LambertSolution};
    pub use crate::math::kepler::{state_from_elements, Elements};
    pub use crate::math::time::Instant;
    pub use crate::math::vector::{Matrix3, Vector3};
    pub use crate::naif::spk::Spk;
    pub use crate::providers::{
        GalileoCruiseProvider, GalileoLeg, Gust86Provider, KeplerianSeriesProvider,
        MinorBodyProvider, MoonProvider, Provider, SpkProvider, TritonProvider,
    };
    pub use crate::registry::{self, NaifId};
}
