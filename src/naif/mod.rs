/*
 * NAIF DAF/SPK support.
 *
 * A read-only, SPK-only reader: there is no PCK and no kernel-mutation
 * surface here, so the whole module boils down to a single concrete `Spk`
 * type rather than a generic DAF abstraction shared across kernel kinds.
 */

pub mod daf;
pub mod spk;

pub use spk::Spk;

/// Byte order of the doubles/integers packed in a DAF file.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Endian {
    Little,
    Big,
}

impl Endian {
    /// The native endianness of this platform, probed directly from
    /// `cfg!(target_endian)` -- never inferred from a path substring.
    pub fn native() -> Self {
        if cfg!(target_endian = "big") {
            Endian::Big
        } else {
            Endian::Little
        }
    }

    pub fn swapped(self) -> Self {
        match self {
            Endian::Little => Endian::Big,
            Endian::Big => Endian::Little,
        }
    }

    pub fn read_u32(self, bytes: &[u8]) -> u32 {
        let arr: [u8; 4] = bytes.try_into().unwrap();
        match self {
            Endian::Little => u32::from_le_bytes(arr),
            Endian::Big => u32::from_be_bytes(arr),
        }
    }

    pub fn read_i32(self, bytes: &[u8]) -> i32 {
        let arr: [u8; 4] = bytes.try_into().unwrap();
        match self {
            Endian::Little => i32::from_le_bytes(arr),
            Endian::Big => i32::from_be_bytes(arr),
        }
    }

    pub fn read_f64(self, bytes: &[u8]) -> f64 {
        let arr: [u8; 8] = bytes.try_into().unwrap();
        match self {
            Endian::Little => f64::from_le_bytes(arr),
            Endian::Big => f64::from_be_bytes(arr),
        }
    }
}
