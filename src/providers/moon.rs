/*
 * Moon provider: a thin `SpkProvider` specialization.
 *
 * A full ELP2000/82-style analytical lunar theory is out of scope here;
 * the Moon's periodic-fallback behavior the dispatcher relies on when no
 * kernel covers a requested epoch is implemented in `dispatcher`, not
 * here, by shifting a known-good state by an integer number of anomalistic
 * months rather than re-deriving the Moon's position from scratch.
 */

use crate::registry::ids;

use super::SpkProvider;

/// Type alias documenting intent: an `SpkProvider` scoped to the Moon.
pub type MoonProvider = SpkProvider;

pub const MOON_ID: i32 = ids::MOON;
