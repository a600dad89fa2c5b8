/*
 * SPK (Spacecraft and Planetary Kernel) reader.
 *
 * Implements the Type 2 (Chebyshev position) and Type 3 (Chebyshev
 * position+velocity) mini-record layout and evaluation, collapsed into a
 * single read-only `Spk` type since this crate has no kernel-mutation
 * surface and no PCK/CK/EK variants to share a generic reader with.
 */

use crate::errors::DafError;
use crate::math::chebyshev::{chebyshev_eval, chebyshev_eval_poly};
use crate::math::vector::Vector3;
use crate::naif::daf::{self, FileRecord, SegmentTable, SpkSummaryRecord};
use crate::naif::Endian;
use bytes::Bytes;
use std::fs::File;
use std::path::Path;

/// SPK data type 2: Chebyshev polynomials, position only.
const TYPE_CHEBYSHEV_POSITION: i32 = 2;
/// SPK data type 3: Chebyshev polynomials, position and velocity.
const TYPE_CHEBYSHEV_STATE: i32 = 3;

const KM_TO_M: f64 = 1000.0;

/// A memory-mapped, parsed NAIF SPK kernel.
///
/// Holds an owned, cheaply-cloneable [`Bytes`] buffer over the whole file
/// (built once at load time) plus the parsed header and segment table, so
/// repeated `state()` calls never re-touch the filesystem.
#[derive(Clone)]
pub struct Spk {
    bytes: Bytes,
    file_record: FileRecord,
    endian: Endian,
    segments: SegmentTable,
}

impl Spk {
    /// Memory-maps `path`, validates the DAF header, and walks the segment
    /// summary table.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DafError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| DafError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let bytes = file_to_bytes(&file, path)?;
        Self::parse(bytes)
    }

    /// Parses an already-owned buffer, e.g. one produced by an embedded
    /// kernel or a test fixture.
    pub fn parse(bytes: Bytes) -> Result<Self, DafError> {
        let (file_record, endian) = FileRecord::parse(&bytes)?;
        let segments = daf::load_segment_table(&bytes, &file_record, endian)?;
        Ok(Self {
            bytes,
            file_record,
            endian,
            segments,
        })
    }

    pub fn endian(&self) -> Endian {
        self.endian
    }

    pub fn segments(&self) -> &[SpkSummaryRecord] {
        &self.segments
    }

    /// Checksum of the whole mapped buffer, for diagnostics and the `inspect`
    /// CLI command.
    pub fn crc32(&self) -> u32 {
        crc32fast::hash(&self.bytes)
    }

    /// Evaluates the state of `target` relative to `observer` at ephemeris
    /// time `et` (TDB seconds past J2000), in meters and meters per second.
    pub fn state(&self, et: f64, target: i32, observer: i32) -> Result<(Vector3, Vector3), DafError> {
        let summary = daf::find_segment(&self.segments, target, observer, et)?;
        let (position_km, velocity_km_s) = match summary.data_type_i {
            TYPE_CHEBYSHEV_POSITION => self.eval_type2(summary, et)?,
            TYPE_CHEBYSHEV_STATE => self.eval_type3(summary, et)?,
            other => return Err(DafError::UnsupportedType { kind: other }),
        };
        Ok((position_km * KM_TO_M, velocity_km_s * KM_TO_M))
    }

    fn eval_type2(
        &self,
        summary: &SpkSummaryRecord,
        et: f64,
    ) -> Result<(Vector3, Vector3), DafError> {
        let (init, intlen, rsize, _n) = self.read_trailer(summary)?;
        let degree = (rsize - 2) / 3 - 1;
        let record = self.record_words(summary, et, init, intlen, rsize)?;

        let mid = record[0];
        let radius = record[1];
        if radius <= 0.0 {
            return Err(DafError::Decoding {
                source: crate::errors::DecodingError::TooFewDoubles {
                    dataset: "spk_type2",
                    got: 0,
                    need: rsize,
                },
            });
        }
        let t = (et - mid) / radius;

        let coeff_len = degree + 1;
        let x = &record[2..2 + coeff_len];
        let y = &record[2 + coeff_len..2 + 2 * coeff_len];
        let z = &record[2 + 2 * coeff_len..2 + 3 * coeff_len];

        let (px, dx) = chebyshev_eval(t, x, radius, degree)
            .map_err(|source| DafError::Decoding { source })?;
        let (py, dy) = chebyshev_eval(t, y, radius, degree)
            .map_err(|source| DafError::Decoding { source })?;
        let (pz, dz) = chebyshev_eval(t, z, radius, degree)
            .map_err(|source| DafError::Decoding { source })?;

        Ok((Vector3::new(px, py, pz), Vector3::new(dx, dy, dz)))
    }

    fn eval_type3(
        &self,
        summary: &SpkSummaryRecord,
        et: f64,
    ) -> Result<(Vector3, Vector3), DafError> {
        let (init, intlen, rsize, _n) = self.read_trailer(summary)?;
        let degree = (rsize - 2) / 6 - 1;
        let record = self.record_words(summary, et, init, intlen, rsize)?;

        let mid = record[0];
        let radius = record[1];
        let t = (et - mid) / radius;

        let coeff_len = degree + 1;
        let bases: [usize; 6] = [
            2,
            2 + coeff_len,
            2 + 2 * coeff_len,
            2 + 3 * coeff_len,
            2 + 4 * coeff_len,
            2 + 5 * coeff_len,
        ];
        let slice_at = |base: usize| -> &[f64] { &record[base..base + coeff_len] };

        let px = chebyshev_eval_poly(t, slice_at(bases[0]), degree)
            .map_err(|source| DafError::Decoding { source })?;
        let py = chebyshev_eval_poly(t, slice_at(bases[1]), degree)
            .map_err(|source| DafError::Decoding { source })?;
        let pz = chebyshev_eval_poly(t, slice_at(bases[2]), degree)
            .map_err(|source| DafError::Decoding { source })?;
        let vx = chebyshev_eval_poly(t, slice_at(bases[3]), degree)
            .map_err(|source| DafError::Decoding { source })?;
        let vy = chebyshev_eval_poly(t, slice_at(bases[4]), degree)
            .map_err(|source| DafError::Decoding { source })?;
        let vz = chebyshev_eval_poly(t, slice_at(bases[5]), degree)
            .map_err(|source| DafError::Decoding { source })?;

        Ok((Vector3::new(px, py, pz), Vector3::new(vx, vy, vz)))
    }

    /// Reads the four-double trailer (`init`, `intlen`, `rsize`, `n`) packed
    /// at the end of the segment's data words.
    fn read_trailer(&self, summary: &SpkSummaryRecord) -> Result<(f64, f64, usize, usize), DafError> {
        let end_word = summary.end_idx as usize;
        let trailer_start = word_byte_offset(end_word - 3);
        let bytes = self.bytes.get(trailer_start..trailer_start + 32).ok_or(DafError::Io {
            path: "<mapped kernel>".into(),
            reason: "segment trailer extends past end of file".into(),
        })?;
        let init = self.endian.read_f64(&bytes[0..8]);
        let intlen = self.endian.read_f64(&bytes[8..16]);
        let rsize = self.endian.read_f64(&bytes[16..24]) as usize;
        let n = self.endian.read_f64(&bytes[24..32]) as usize;
        Ok((init, intlen, rsize, n))
    }

    /// Locates and reads the mini-record covering `et`, returning its words
    /// as `f64`s.
    fn record_words(
        &self,
        summary: &SpkSummaryRecord,
        et: f64,
        init: f64,
        intlen: f64,
        rsize: usize,
    ) -> Result<Vec<f64>, DafError> {
        let record_index = ((et - init) / intlen).floor().max(0.0) as usize;
        let start_word = summary.start_idx as usize + record_index * rsize;
        let start = word_byte_offset(start_word);
        let end = start + rsize * daf::double_size();
        let raw = self.bytes.get(start..end).ok_or(DafError::Io {
            path: "<mapped kernel>".into(),
            reason: "data mini-record extends past end of file".into(),
        })?;
        Ok(raw.chunks_exact(8).map(|w| self.endian.read_f64(w)).collect())
    }
}

fn word_byte_offset(word_index_1_based: usize) -> usize {
    (word_index_1_based - 1) * daf::double_size()
}

fn file_to_bytes(file: &File, path: &Path) -> Result<Bytes, DafError> {
    let mmap = unsafe {
        memmap2::Mmap::map(file).map_err(|e| DafError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?
    };
    Ok(Bytes::copy_from_slice(&mmap[..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_offsets_are_zero_indexed_bytes() {
        assert_eq!(word_byte_offset(1), 0);
        assert_eq!(word_byte_offset(2), 8);
    }
}
