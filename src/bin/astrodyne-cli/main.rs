extern crate pretty_env_logger;

use std::env::{set_var, var};
use std::str::FromStr;

use astrodyne::dispatcher::Dispatcher;
use astrodyne::errors::{DafError, DispatchError, KeplerError, LambertError};
use astrodyne::math::kepler::{elements_from_state, state_from_elements, Elements};
use astrodyne::math::time::Instant;
use astrodyne::math::vector::Vector3;
use astrodyne::naif::spk::Spk;
use clap::Parser;
use hifitime::Epoch;
use log::info;
use snafu::prelude::*;
use tabled::{settings::Style, Table, Tabled};

mod args;
use args::{Actions, Args};

const LOG_VAR: &str = "ASTRODYNE_LOG";
const KERNEL_DIR_VAR: &str = "ASTRODYNE_KERNEL_DIR";

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum CliError {
    #[snafu(display("kernel {path:?} could not be found (checked {checked:?})"))]
    KernelNotFound { path: String, checked: Vec<String> },
    #[snafu(display("could not parse epoch {raw:?}: {source}"))]
    BadEpoch { raw: String, source: hifitime::Errors },
    #[snafu(display("could not parse vector {raw:?}: expected \"x,y,z\""))]
    BadVector { raw: String },
    #[snafu(display("{source}"))]
    Daf { source: DafError },
    #[snafu(display("{source}"))]
    Dispatch { source: DispatchError },
    #[snafu(display("{source}"))]
    Kepler { source: KeplerError },
    #[snafu(display("{source}"))]
    Lambert { source: LambertError },
    #[snafu(display("--from-state requires --position and --velocity"))]
    MissingState,
    #[snafu(display("elements require --a, --e, --i, --m, --aop, and --raan"))]
    MissingElements,
}

fn main() -> Result<(), CliError> {
    if var(LOG_VAR).is_err() {
        unsafe {
            set_var(LOG_VAR, "INFO");
        }
    }
    if pretty_env_logger::try_init_custom_env(LOG_VAR).is_err() {
        println!("could not init logger");
    }

    let cli = Args::parse();
    match cli.action {
        Actions::State {
            kernel,
            body,
            observer,
            at,
        } => cmd_state(kernel, body, observer, &at),
        Actions::Inspect { kernel } => cmd_inspect(kernel),
        Actions::Lambert {
            r1,
            r2,
            tof,
            mu,
            cw,
            nmax,
        } => cmd_lambert(&r1, &r2, tof, mu, cw, nmax),
        Actions::Kepler {
            a,
            e,
            i,
            m,
            aop,
            raan,
            mu,
            from_state,
            position,
            velocity,
        } => cmd_kepler(a, e, i, m, aop, raan, mu, from_state, position, velocity),
    }
}

/// Resolves `path` either directly or, for a bare filename, against
/// `ASTRODYNE_KERNEL_DIR`, a local-only kernel search with no network-fetch
/// machinery.
fn resolve_kernel_path(path: &std::path::Path) -> Result<std::path::PathBuf, CliError> {
    if path.exists() {
        return Ok(path.to_path_buf());
    }
    let mut checked = vec![path.display().to_string()];
    if let Ok(dir) = var(KERNEL_DIR_VAR) {
        let candidate = std::path::Path::new(&dir).join(path);
        if candidate.exists() {
            return Ok(candidate);
        }
        checked.push(candidate.display().to_string());
    }
    Err(CliError::KernelNotFound {
        path: path.display().to_string(),
        checked,
    })
}

fn cmd_state(
    kernel: std::path::PathBuf,
    body: i32,
    observer: i32,
    at: &str,
) -> Result<(), CliError> {
    let resolved = resolve_kernel_path(&kernel)?;
    info!("loading {resolved:?}");
    let dispatcher = Dispatcher::with_default_providers(&[resolved]);

    let epoch = Epoch::from_str(at).context(BadEpochSnafu { raw: at.to_string() })?;
    let instant = Instant::from_jd(epoch.to_jde_utc_days());

    let (r, v) = dispatcher
        .state(instant, body, observer)
        .context(DispatchSnafu)?;
    println!("t = {instant} (et = {:.3} s)", instant.et_seconds());
    println!("r = [{:.6}, {:.6}, {:.6}] m", r.x, r.y, r.z);
    println!("v = [{:.6}, {:.6}, {:.6}] m/s", v.x, v.y, v.z);
    Ok(())
}

#[derive(Tabled)]
struct SegmentRow {
    #[tabled(rename = "target")]
    target: i32,
    #[tabled(rename = "observer")]
    observer: i32,
    #[tabled(rename = "frame")]
    frame: i32,
    #[tabled(rename = "type")]
    data_type: i32,
    #[tabled(rename = "start (et s)")]
    start: f64,
    #[tabled(rename = "end (et s)")]
    end: f64,
}

fn cmd_inspect(kernel: std::path::PathBuf) -> Result<(), CliError> {
    let resolved = resolve_kernel_path(&kernel)?;
    let spk = Spk::load(&resolved).context(DafSnafu)?;

    println!("endianness: {:?}", spk.endian());
    println!("crc32: 0x{:08X}", spk.crc32());

    let rows: Vec<SegmentRow> = spk
        .segments()
        .iter()
        .map(|s| SegmentRow {
            target: s.target_id,
            observer: s.center_id,
            frame: s.frame_id,
            data_type: s.data_type_i,
            start: s.start_epoch_et_s,
            end: s.end_epoch_et_s,
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::sharp());
    println!("{table}");
    Ok(())
}

fn parse_vector(raw: &str) -> Result<Vector3, CliError> {
    let parts: Vec<&str> = raw.split(',').collect();
    if parts.len() != 3 {
        return Err(CliError::BadVector { raw: raw.to_string() });
    }
    let mut components = [0.0_f64; 3];
    for (slot, part) in components.iter_mut().zip(parts) {
        *slot = f64::from_str(part.trim()).map_err(|_| CliError::BadVector { raw: raw.to_string() })?;
    }
    Ok(Vector3::new(components[0], components[1], components[2]))
}

#[derive(Tabled)]
struct LambertRow {
    #[tabled(rename = "N")]
    revolutions: u32,
    #[tabled(rename = "v1 (m/s)")]
    v1: String,
    #[tabled(rename = "v2 (m/s)")]
    v2: String,
    #[tabled(rename = "iterations")]
    iterations: u32,
    #[tabled(rename = "converged")]
    converged: bool,
}

fn cmd_lambert(r1: &str, r2: &str, tof: f64, mu: f64, cw: bool, nmax: u32) -> Result<(), CliError> {
    let r1 = parse_vector(r1)?;
    let r2 = parse_vector(r2)?;

    let solutions = astrodyne::lambert::solve(r1, r2, tof, mu, cw, nmax).context(LambertSnafu)?;

    let rows: Vec<LambertRow> = solutions
        .iter()
        .map(|s| LambertRow {
            revolutions: s.revolutions,
            v1: format!("[{:.3}, {:.3}, {:.3}]", s.v1.x, s.v1.y, s.v1.z),
            v2: format!("[{:.3}, {:.3}, {:.3}]", s.v2.x, s.v2.y, s.v2.z),
            iterations: s.iterations,
            converged: s.converged,
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::modern());
    println!("{table}");
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cmd_kepler(
    a: Option<f64>,
    e: Option<f64>,
    i: Option<f64>,
    m: Option<f64>,
    aop: Option<f64>,
    raan: Option<f64>,
    mu: f64,
    from_state: bool,
    position: Option<String>,
    velocity: Option<String>,
) -> Result<(), CliError> {
    const AU_M: f64 = 149_597_870_700.0;

    if from_state {
        let (position, velocity) = match (position, velocity) {
            (Some(p), Some(v)) => (p, v),
            _ => return Err(CliError::MissingState),
        };
        let r = parse_vector(&position)?;
        let v = parse_vector(&velocity)?;
        let elements = elements_from_state(mu, r, v).context(KeplerSnafu)?;
        print_elements(&elements);
        return Ok(());
    }

    let (a, e, i, m, aop, raan) = match (a, e, i, m, aop, raan) {
        (Some(a), Some(e), Some(i), Some(m), Some(aop), Some(raan)) => (a, e, i, m, aop, raan),
        _ => return Err(CliError::MissingElements),
    };
    let elements = Elements {
        a_m: a * AU_M,
        e,
        i_rad: i.to_radians(),
        m_rad: m.to_radians(),
        aop_rad: aop.to_radians(),
        raan_rad: raan.to_radians(),
    };
    let (r, v) = state_from_elements(&elements, mu).context(KeplerSnafu)?;
    println!("r = [{:.6}, {:.6}, {:.6}] m", r.x, r.y, r.z);
    println!("v = [{:.6}, {:.6}, {:.6}] m/s", v.x, v.y, v.z);
    Ok(())
}

fn print_elements(elements: &Elements) {
    const AU_M: f64 = 149_597_870_700.0;
    println!("a   = {:.9} AU", elements.a_m / AU_M);
    println!("e   = {:.9}", elements.e);
    println!("i   = {:.6} deg", elements.i_rad.to_degrees());
    println!("M   = {:.6} deg", elements.m_rad.to_degrees());
    println!("aop = {:.6} deg", elements.aop_rad.to_degrees());
    println!("raan= {:.6} deg", elements.raan_rad.to_degrees());
}
