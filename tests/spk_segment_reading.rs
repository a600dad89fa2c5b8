//! Integration tests against a hand-built, in-memory DAF/SPK buffer.
//!
//! No real kernel data is bundled with this crate, so these tests construct
//! the minimal valid byte layout themselves (file record, one summary
//! record, and Type 2 Chebyshev data), exercising the same decode path a
//! real `de440.bsp` would.

use astrodyne::naif::spk::Spk;
use bytes::Bytes;

const RECORD_LEN: usize = 1024;

/// One constant-position Type 2 mini-record: valid for `et` in
/// `[mid - radius, mid + radius]`, reporting position `(x, y, z)` km.
struct MiniRecord {
    mid: f64,
    radius: f64,
    position_km: (f64, f64, f64),
}

/// Builds a single-segment SPK buffer containing the given mini-records
/// back-to-back, all degree 0 (constant) Type 2 Chebyshev polynomials.
fn build_spk(target: i32, observer: i32, records: &[MiniRecord]) -> Bytes {
    let mut buf = vec![0u8; RECORD_LEN]; // file record, patched below

    buf[0..7].copy_from_slice(b"DAF/SPK");
    buf[8..12].copy_from_slice(&2u32.to_ne_bytes());
    buf[12..16].copy_from_slice(&6u32.to_ne_bytes());
    buf[76..80].copy_from_slice(&2u32.to_ne_bytes()); // forward -> record 2
    buf[80..84].copy_from_slice(&2u32.to_ne_bytes()); // backward -> record 2
    buf[84..88].copy_from_slice(&0u32.to_ne_bytes()); // free_addr, unused here

    let rsize = 5usize; // mid, radius, cx0, cy0, cz0 (degree 0)
    let n = records.len();
    let data_words = n * rsize + 4; // + trailer (init, intlen, rsize, n)

    let start_idx = (RECORD_LEN * 2 / 8) + 1; // first word after the summary record, 1-based
    let end_idx = start_idx + data_words - 1;

    let start_epoch = records[0].mid - records[0].radius;
    let end_epoch = records[n - 1].mid + records[n - 1].radius;

    let mut summary = Vec::with_capacity(40);
    summary.extend_from_slice(&start_epoch.to_ne_bytes());
    summary.extend_from_slice(&end_epoch.to_ne_bytes());
    summary.extend_from_slice(&target.to_ne_bytes());
    summary.extend_from_slice(&observer.to_ne_bytes());
    summary.extend_from_slice(&1i32.to_ne_bytes()); // frame_id, arbitrary
    summary.extend_from_slice(&2i32.to_ne_bytes()); // data_type_i = Type 2
    summary.extend_from_slice(&(start_idx as i32).to_ne_bytes());
    summary.extend_from_slice(&(end_idx as i32).to_ne_bytes());
    assert_eq!(summary.len(), 40);

    let mut summary_record = vec![0u8; RECORD_LEN];
    summary_record[0..8].copy_from_slice(&0.0_f64.to_ne_bytes()); // next
    summary_record[8..16].copy_from_slice(&0.0_f64.to_ne_bytes()); // previous
    summary_record[16..24].copy_from_slice(&1.0_f64.to_ne_bytes()); // nsum
    summary_record[24..64].copy_from_slice(&summary);

    let mut data = Vec::new();
    for record in records {
        data.extend_from_slice(&record.mid.to_ne_bytes());
        data.extend_from_slice(&record.radius.to_ne_bytes());
        data.extend_from_slice(&record.position_km.0.to_ne_bytes());
        data.extend_from_slice(&record.position_km.1.to_ne_bytes());
        data.extend_from_slice(&record.position_km.2.to_ne_bytes());
    }
    let intlen = records[0].radius * 2.0;
    data.extend_from_slice(&start_epoch.to_ne_bytes()); // init
    data.extend_from_slice(&intlen.to_ne_bytes());
    data.extend_from_slice(&(rsize as f64).to_ne_bytes());
    data.extend_from_slice(&(n as f64).to_ne_bytes());

    buf.extend_from_slice(&summary_record);
    buf.extend_from_slice(&data);

    Bytes::from(buf)
}

#[test]
fn decodes_constant_position_segment() {
    let bytes = build_spk(
        901,
        900,
        &[MiniRecord {
            mid: 0.0,
            radius: 100_000.0,
            position_km: (1_000.0, 2_000.0, 3_000.0),
        }],
    );
    let spk = Spk::parse(bytes).unwrap();
    assert_eq!(spk.segments().len(), 1);

    let (r, _v) = spk.state(0.0, 901, 900).unwrap();
    assert!((r.x - 1_000_000.0).abs() < 1e-6);
    assert!((r.y - 2_000_000.0).abs() < 1e-6);
    assert!((r.z - 3_000_000.0).abs() < 1e-6);
}

/// Property 4 (segment indexing): the mini-record selected for a given `et`
/// is `floor((et - init) / intlen)`, for every mini-record in a
/// multi-record segment.
#[test]
fn mini_record_selection_matches_floor_formula() {
    let records = vec![
        MiniRecord {
            mid: -200_000.0,
            radius: 100_000.0,
            position_km: (1.0, 0.0, 0.0),
        },
        MiniRecord {
            mid: 0.0,
            radius: 100_000.0,
            position_km: (2.0, 0.0, 0.0),
        },
        MiniRecord {
            mid: 200_000.0,
            radius: 100_000.0,
            position_km: (3.0, 0.0, 0.0),
        },
    ];
    let bytes = build_spk(501, 500, &records);
    let spk = Spk::parse(bytes).unwrap();

    for (expected_x_km, et) in [(1.0, -250_000.0), (2.0, -50_000.0), (3.0, 250_000.0)] {
        let (r, _v) = spk.state(et, 501, 500).unwrap();
        assert!(
            (r.x - expected_x_km * 1000.0).abs() < 1e-6,
            "et={et}: expected x={}, got {}",
            expected_x_km * 1000.0,
            r.x
        );
    }
}

/// Builds the same single-record segment as `decodes_constant_position_segment`
/// but packed as big-endian throughout (as a legacy DE405-style kernel would
/// be), regardless of the host's own byte order -- exercises the
/// endian-aware read path rather than the native-endian fast path.
fn build_spk_big_endian(target: i32, observer: i32, record: &MiniRecord) -> Bytes {
    let mut buf = vec![0u8; RECORD_LEN];

    buf[0..7].copy_from_slice(b"DAF/SPK");
    buf[8..12].copy_from_slice(&2u32.to_be_bytes());
    buf[12..16].copy_from_slice(&6u32.to_be_bytes());
    buf[76..80].copy_from_slice(&2u32.to_be_bytes());
    buf[80..84].copy_from_slice(&2u32.to_be_bytes());

    let rsize = 5usize;
    let data_words = rsize + 4;
    let start_idx = (RECORD_LEN * 2 / 8) + 1;
    let end_idx = start_idx + data_words - 1;

    let start_epoch = record.mid - record.radius;
    let end_epoch = record.mid + record.radius;

    let mut summary = Vec::with_capacity(40);
    summary.extend_from_slice(&start_epoch.to_be_bytes());
    summary.extend_from_slice(&end_epoch.to_be_bytes());
    summary.extend_from_slice(&target.to_be_bytes());
    summary.extend_from_slice(&observer.to_be_bytes());
    summary.extend_from_slice(&1i32.to_be_bytes());
    summary.extend_from_slice(&2i32.to_be_bytes());
    summary.extend_from_slice(&(start_idx as i32).to_be_bytes());
    summary.extend_from_slice(&(end_idx as i32).to_be_bytes());

    let mut summary_record = vec![0u8; RECORD_LEN];
    summary_record[0..8].copy_from_slice(&0.0_f64.to_be_bytes());
    summary_record[8..16].copy_from_slice(&0.0_f64.to_be_bytes());
    summary_record[16..24].copy_from_slice(&1.0_f64.to_be_bytes());
    summary_record[24..64].copy_from_slice(&summary);

    let mut data = Vec::new();
    data.extend_from_slice(&record.mid.to_be_bytes());
    data.extend_from_slice(&record.radius.to_be_bytes());
    data.extend_from_slice(&record.position_km.0.to_be_bytes());
    data.extend_from_slice(&record.position_km.1.to_be_bytes());
    data.extend_from_slice(&record.position_km.2.to_be_bytes());
    let intlen = record.radius * 2.0;
    data.extend_from_slice(&start_epoch.to_be_bytes());
    data.extend_from_slice(&intlen.to_be_bytes());
    data.extend_from_slice(&(rsize as f64).to_be_bytes());
    data.extend_from_slice(&(1.0_f64).to_be_bytes());

    buf.extend_from_slice(&summary_record);
    buf.extend_from_slice(&data);

    Bytes::from(buf)
}

#[test]
fn decodes_foreign_endian_kernel() {
    let bytes = build_spk_big_endian(
        399,
        10,
        &MiniRecord {
            mid: 0.0,
            radius: 50_000.0,
            position_km: (1.496e8, 0.0, 0.0),
        },
    );
    let spk = Spk::parse(bytes).unwrap();
    assert_eq!(spk.segments().len(), 1);

    let (r, _v) = spk.state(0.0, 399, 10).unwrap();
    assert!((r.x - 1.496e11).abs() < 1.0, "got {}", r.x);
}

#[test]
fn query_outside_segment_coverage_fails() {
    let bytes = build_spk(
        701,
        700,
        &[MiniRecord {
            mid: 0.0,
            radius: 1_000.0,
            position_km: (1.0, 1.0, 1.0),
        }],
    );
    let spk = Spk::parse(bytes).unwrap();
    assert!(spk.state(1_000_000.0, 701, 700).is_err());
}
