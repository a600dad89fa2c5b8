/*
 * Astrodyne
 * Ephemeris dispatch, SPK reading, and Lambert's problem.
 */

use crate::math::time::Instant;
use snafu::prelude::*;

/// Errors raised while decoding DAF/SPK binary kernel data.
#[derive(Debug, Snafu, PartialEq, Clone, Copy)]
#[snafu(visibility(pub(crate)))]
pub enum IntegrityError {
    #[snafu(display("checksum mismatch: expected {expected}, computed {computed}"))]
    ChecksumInvalid { expected: u32, computed: u32 },
    #[snafu(display(
        "data for {variable} in {dataset} decoded as a subnormal double (data malformed?)"
    ))]
    SubNormal {
        dataset: &'static str,
        variable: &'static str,
    },
    #[snafu(display("data for {variable}={value} in {dataset} is invalid: {reason}"))]
    InvalidValue {
        dataset: &'static str,
        variable: &'static str,
        value: f64,
        reason: &'static str,
    },
}

#[derive(Debug, Snafu, PartialEq, Clone, Copy)]
#[snafu(visibility(pub(crate)))]
pub enum DecodingError {
    #[snafu(display(
        "could not decode {dataset} data -- need at least {need} doubles but found {got}"
    ))]
    TooFewDoubles {
        dataset: &'static str,
        got: usize,
        need: usize,
    },
    #[snafu(display(
        "bytes between indexes {start} and {end} could not be read, array contains {size} bytes"
    ))]
    InaccessibleBytes {
        start: usize,
        end: usize,
        size: usize,
    },
    #[snafu(display("integrity error during decoding: {source}"))]
    Integrity { source: IntegrityError },
}

/// Errors raised while parsing the DAF/SPK container itself.
#[derive(Debug, Snafu, PartialEq, Clone)]
#[snafu(visibility(pub(crate)))]
pub enum DafError {
    #[snafu(display("file does not carry the `DAF/SPK` or `NAIF/DA` identifier"))]
    BadMagic,
    #[snafu(display("unsupported (nd, ni) = ({nd}, {ni}), expected (2, 6)"))]
    BadDimensions { nd: u32, ni: u32 },
    #[snafu(display("endianness of the file could not be determined from its header"))]
    UnknownEndian,
    #[snafu(display("segment table is full ({capacity} entries); file has more segments"))]
    SegmentTableFull { capacity: usize },
    #[snafu(display("no segment covers target={target} observer={observer} at et={et}"))]
    NoSegment {
        target: i32,
        observer: i32,
        et: f64,
    },
    #[snafu(display("unsupported SPK data type {kind}"))]
    UnsupportedType { kind: i32 },
    #[snafu(display("I/O error loading {path}: {reason}"))]
    Io { path: String, reason: String },
    #[snafu(display("{source}"))]
    Decoding { source: DecodingError },
}

/// Kepler/hyperbolic-Kepler solver failures.
#[derive(Debug, Snafu, PartialEq, Clone, Copy)]
#[snafu(visibility(pub(crate)))]
pub enum KeplerError {
    #[snafu(display(
        "Kepler solver did not converge within {iterations} iterations (residual {residual:e})"
    ))]
    NonConvergent { iterations: u32, residual: f64 },
    #[snafu(display("eccentricity {ecc} is invalid: must be >= 0"))]
    InvalidEccentricity { ecc: f64 },
    #[snafu(display("degenerate orbit: {reason}"))]
    Degenerate { reason: &'static str },
}

/// Lambert solver failures.
#[derive(Debug, Snafu, PartialEq, Clone, Copy)]
#[snafu(visibility(pub(crate)))]
pub enum LambertError {
    #[snafu(display("time of flight must be strictly positive, got {tof}"))]
    NonPositiveTimeOfFlight { tof: f64 },
    #[snafu(display("gravitational parameter must be strictly positive, got {mu}"))]
    NonPositiveMu { mu: f64 },
    #[snafu(display("transfer is degenerate: positions are collinear (|h_z| = {h_z:e})"))]
    Degenerate { h_z: f64 },
    #[snafu(display(
        "Householder iteration did not converge within {iterations} iterations (residual {residual:e})"
    ))]
    NonConvergent { iterations: u32, residual: f64 },
}

/// Provider-level failures.
#[derive(Debug, Snafu, PartialEq, Clone)]
#[snafu(visibility(pub(crate)))]
pub enum ProviderError {
    #[snafu(display("{instant} is outside this provider's validity window [{first}, {last}]"))]
    DateOutOfRange {
        instant: Instant,
        first: Instant,
        last: Instant,
    },
    #[snafu(display("body {name:?} is not served by this provider"))]
    UnknownBody { name: String },
    #[snafu(display("operation not implemented by this provider: {action}"))]
    Unsupported { action: &'static str },
    #[snafu(display("{source}"))]
    Daf { source: DafError },
    #[snafu(display("{source}"))]
    Kepler { source: KeplerError },
    #[snafu(display("{source}"))]
    Lambert { source: LambertError },
}

/// Top-level error type returned by the dispatcher.
#[derive(Debug, Snafu, PartialEq, Clone)]
#[snafu(visibility(pub))]
pub enum DispatchError {
    #[snafu(display("body {name:?} is not known to any registered provider"))]
    UnknownBody { name: String },
    #[snafu(display("{instant} is outside the supported envelope of 3000 BC to 3000 AD"))]
    DateOutOfRange { instant: Instant },
    #[snafu(display("{source}"))]
    Provider { source: ProviderError },
}

impl From<DafError> for ProviderError {
    fn from(source: DafError) -> Self {
        ProviderError::Daf { source }
    }
}

impl From<KeplerError> for ProviderError {
    fn from(source: KeplerError) -> Self {
        ProviderError::Kepler { source }
    }
}

impl From<LambertError> for ProviderError {
    fn from(source: LambertError) -> Self {
        ProviderError::Lambert { source }
    }
}

impl From<DecodingError> for DafError {
    fn from(source: DecodingError) -> Self {
        DafError::Decoding { source }
    }
}

impl From<ProviderError> for DispatchError {
    fn from(source: ProviderError) -> Self {
        DispatchError::Provider { source }
    }
}

/// Crate-wide top-level error, composing every subsystem error into one
/// type spanning the dispatcher, Lambert, Kepler, and DAF subsystems.
#[derive(Debug, Snafu, PartialEq, Clone)]
#[snafu(visibility(pub))]
pub enum AstrodyneError {
    #[snafu(display("{source}"))]
    Dispatch { source: DispatchError },
    #[snafu(display("{source}"))]
    Lambert { source: LambertError },
    #[snafu(display("{source}"))]
    Kepler { source: KeplerError },
    #[snafu(display("{source}"))]
    Daf { source: DafError },
}

impl From<DispatchError> for AstrodyneError {
    fn from(source: DispatchError) -> Self {
        AstrodyneError::Dispatch { source }
    }
}

impl From<LambertError> for AstrodyneError {
    fn from(source: LambertError) -> Self {
        AstrodyneError::Lambert { source }
    }
}

impl From<KeplerError> for AstrodyneError {
    fn from(source: KeplerError) -> Self {
        AstrodyneError::Kepler { source }
    }
}

impl From<DafError> for AstrodyneError {
    fn from(source: DafError) -> Self {
        AstrodyneError::Daf { source }
    }
}
