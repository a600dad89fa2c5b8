/*
 * DAF file/summary record parsing.
 *
 * The `FileRecord` byte layout and `SPKSummaryRecord` five-double packing
 * are the NAIF-published binary format itself: exactly what every DAF/SPK
 * file on disk contains.
 */

use crate::errors::DafError;
use crate::naif::Endian;

pub const RECORD_LEN: usize = 1024;
const DBL_SIZE: usize = 8;

/// The first 1024-byte record of a DAF file.
///
/// Only the fields this reader actually consults (`nd`, `ni`, `forward`,
/// `backward`) are decoded eagerly and endian-corrected; the rest of the
/// 1024-byte record (internal filename, FTP-validation string, reserved
/// padding) is NAIF bookkeeping this reader has no use for.
#[derive(Debug, Clone, PartialEq)]
pub struct FileRecord {
    pub id_str: [u8; 8],
    pub nd: u32,
    pub ni: u32,
    pub forward: u32,
    pub backward: u32,
}

impl FileRecord {
    /// Parses the file record, probing both byte orders against the known
    /// `nd == 2, ni == 6` constant for SPK files rather than trusting a
    /// path-name heuristic (spec §9 design note).
    ///
    /// Every multi-byte field this reader touches afterwards (segment
    /// pointers, epoch bounds, Chebyshev coefficients) is re-read through
    /// the detected [`Endian`] rather than assumed native, so a
    /// foreign-endian kernel (e.g. a legacy big-endian DE405 binary on a
    /// little-endian host) is read correctly rather than merely detected.
    pub fn parse(bytes: &[u8]) -> Result<(Self, Endian), DafError> {
        let raw = bytes
            .get(..RECORD_LEN)
            .ok_or(DafError::Io {
                path: "<mapped kernel>".into(),
                reason: "file is shorter than one DAF record".into(),
            })?;

        let id_str: [u8; 8] = raw[0..8].try_into().unwrap();
        let magic = core::str::from_utf8(&id_str).unwrap_or("");
        if !(magic.starts_with("DAF/SPK") || magic.starts_with("NAIF/DA")) {
            return Err(DafError::BadMagic);
        }

        for endian in [Endian::Little, Endian::Big] {
            let nd = endian.read_u32(&raw[8..12]);
            let ni = endian.read_u32(&raw[12..16]);
            if nd == 2 && ni == 6 {
                let forward = endian.read_u32(&raw[76..80]);
                let backward = endian.read_u32(&raw[80..84]);
                return Ok((
                    FileRecord {
                        id_str,
                        nd,
                        ni,
                        forward,
                        backward,
                    },
                    endian,
                ));
            }
        }

        let (nd, ni) = (
            Endian::native().read_u32(&raw[8..12]),
            Endian::native().read_u32(&raw[12..16]),
        );
        Err(DafError::BadDimensions { nd, ni })
    }

    pub fn forward_record(&self) -> usize {
        self.forward as usize
    }

    pub fn summary_size(&self) -> usize {
        // nd doubles + ceil(ni/2) doubles; fixed at 5 for SPK (nd=2, ni=6).
        2 + (6usize + 1) / 2
    }
}

/// One SPK segment descriptor.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SpkSummaryRecord {
    pub start_epoch_et_s: f64,
    pub end_epoch_et_s: f64,
    pub target_id: i32,
    pub center_id: i32,
    pub frame_id: i32,
    pub data_type_i: i32,
    pub start_idx: i32,
    pub end_idx: i32,
}

impl SpkSummaryRecord {
    pub const PACKED_LEN: usize = 40;

    pub fn covers(&self, target: i32, observer: i32, et: f64) -> bool {
        self.target_id == target
            && self.center_id == observer
            && et >= self.start_epoch_et_s
            && et <= self.end_epoch_et_s
    }

    /// Parses one packed 5-double (2 `f64` + 6 `i32`) summary entry,
    /// honoring the kernel's detected byte order.
    pub fn parse(bytes: &[u8], endian: Endian) -> Result<Self, DafError> {
        let raw = bytes.get(..Self::PACKED_LEN).ok_or(DafError::Io {
            path: "<mapped kernel>".into(),
            reason: "truncated summary record".into(),
        })?;
        Ok(SpkSummaryRecord {
            start_epoch_et_s: endian.read_f64(&raw[0..8]),
            end_epoch_et_s: endian.read_f64(&raw[8..16]),
            target_id: endian.read_i32(&raw[16..20]),
            center_id: endian.read_i32(&raw[20..24]),
            frame_id: endian.read_i32(&raw[24..28]),
            data_type_i: endian.read_i32(&raw[28..32]),
            start_idx: endian.read_i32(&raw[32..36]),
            end_idx: endian.read_i32(&raw[36..40]),
        })
    }
}

pub fn record_byte_range(record_number_1_based: usize) -> core::ops::Range<usize> {
    let start = (record_number_1_based - 1) * RECORD_LEN;
    start..start + RECORD_LEN
}

pub const fn double_size() -> usize {
    DBL_SIZE
}

/// Maximum number of SPK segments a single kernel may describe. A handful
/// of planetary ephemerides rarely carry more than a few dozen; 128 leaves
/// comfortable headroom without an unbounded allocation.
pub const MAX_SEGMENTS: usize = 128;

pub type SegmentTable = heapless::Vec<SpkSummaryRecord, MAX_SEGMENTS>;

/// Walks the linked list of summary records starting at the file record's
/// `forward` pointer, collecting every segment descriptor into a
/// fixed-capacity table.
pub fn load_segment_table(
    bytes: &[u8],
    file_record: &FileRecord,
    endian: Endian,
) -> Result<SegmentTable, DafError> {
    let mut table = SegmentTable::new();
    let mut record_no = file_record.forward_record();

    loop {
        if record_no == 0 {
            break;
        }
        let range = record_byte_range(record_no);
        let block = bytes.get(range.clone()).ok_or(DafError::Io {
            path: "<mapped kernel>".into(),
            reason: "summary record extends past end of file".into(),
        })?;

        let next = endian.read_f64(&block[0..8]);
        let nsum = endian.read_f64(&block[16..24]) as usize;

        for i in 0..nsum {
            let offset = 24 + i * SpkSummaryRecord::PACKED_LEN;
            let end = offset + SpkSummaryRecord::PACKED_LEN;
            let entry = block.get(offset..end).ok_or(DafError::Io {
                path: "<mapped kernel>".into(),
                reason: "summary entry extends past end of record".into(),
            })?;
            let summary = SpkSummaryRecord::parse(entry, endian)?;
            table
                .push(summary)
                .map_err(|_| DafError::SegmentTableFull {
                    capacity: MAX_SEGMENTS,
                })?;
        }

        record_no = next as usize;
    }

    Ok(table)
}

/// Finds the first segment covering `(target, observer)` at epoch `et`.
pub fn find_segment(
    table: &SegmentTable,
    target: i32,
    observer: i32,
    et: f64,
) -> Result<&SpkSummaryRecord, DafError> {
    table
        .iter()
        .find(|summary| summary.covers(target, observer, et))
        .ok_or(DafError::NoSegment {
            target,
            observer,
            et,
        })
}
