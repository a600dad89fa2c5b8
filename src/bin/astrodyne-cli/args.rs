use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[clap(name = "astrodyne", author, version, about, long_about = None)]
pub struct Args {
    #[clap(subcommand)]
    pub action: Actions,
}

#[derive(Debug, Subcommand)]
pub enum Actions {
    /// Prints the position and velocity of a body at a given epoch.
    State {
        /// Path to the SPK kernel, or a bare filename resolved against
        /// ASTRODYNE_KERNEL_DIR.
        #[clap(long)]
        kernel: PathBuf,
        /// NAIF integer ID of the body to report.
        #[clap(long)]
        body: i32,
        /// NAIF integer ID of the observer body (defaults to the Sun).
        #[clap(long, default_value_t = astrodyne::registry::ids::SUN)]
        observer: i32,
        /// Epoch, in ISO 8601 (e.g. 2024-06-15T03:30:12.5).
        #[clap(long)]
        at: String,
    },
    /// Prints the segment table of an SPK kernel.
    Inspect {
        /// Path to the SPK kernel.
        #[clap(long)]
        kernel: PathBuf,
    },
    /// Solves Lambert's problem between two position vectors.
    Lambert {
        /// First position vector, meters, comma-separated "x,y,z".
        #[clap(long)]
        r1: String,
        /// Second position vector, meters, comma-separated "x,y,z".
        #[clap(long)]
        r2: String,
        /// Time of flight, seconds.
        #[clap(long)]
        tof: f64,
        /// Gravitational parameter, m^3/s^2 (defaults to the Sun's).
        #[clap(long, default_value_t = 1.327_124_400_18e20)]
        mu: f64,
        /// Request the clockwise-motion solution family.
        #[clap(long)]
        cw: bool,
        /// Maximum number of revolutions to search for (0 = direct transfer only).
        #[clap(long, default_value_t = 0)]
        nmax: u32,
    },
    /// Converts Keplerian elements to a state vector, or back with `--from-state`.
    Kepler {
        /// Semi-major axis, astronomical units.
        #[clap(long, allow_hyphen_values = true)]
        a: Option<f64>,
        /// Eccentricity.
        #[clap(long)]
        e: Option<f64>,
        /// Inclination, degrees.
        #[clap(long)]
        i: Option<f64>,
        /// Mean anomaly, degrees.
        #[clap(long)]
        m: Option<f64>,
        /// Argument of periapsis, degrees.
        #[clap(long)]
        aop: Option<f64>,
        /// Right ascension of ascending node, degrees.
        #[clap(long)]
        raan: Option<f64>,
        /// Gravitational parameter, m^3/s^2 (defaults to the Sun's).
        #[clap(long, default_value_t = 1.327_124_400_18e20)]
        mu: f64,
        /// Converts a state vector (meters, m/s) back to elements instead.
        #[clap(long, requires_all = ["position", "velocity"], conflicts_with_all = ["a", "e", "i", "m", "aop", "raan"])]
        from_state: bool,
        /// Position vector, meters, comma-separated "x,y,z" (with --from-state).
        #[clap(long)]
        position: Option<String>,
        /// Velocity vector, m/s, comma-separated "x,y,z" (with --from-state).
        #[clap(long)]
        velocity: Option<String>,
    },
}
