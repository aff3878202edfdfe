//! miniSEED (SEED 2.4 data record) reader and writer.
//!
//! The writer emits fixed 512-byte little-endian records with INT32 encoding
//! and a Blockette 1000, splitting long traces across continuation records.
//! The reader auto-detects header byte order from the start-time year, accepts
//! INT16 and INT32 payloads in either byte order, and merges contiguous
//! records of the same channel back into traces.

use crate::error::SeismicError;
use crate::waveform::{Trace, Waveform};
use chrono::{DateTime, Datelike, Duration, NaiveDate, Timelike, Utc};
use std::fs::File;
use std::io::{ErrorKind, Read, Write};
use std::path::Path;

/// Record length emitted by the writer (2^9 bytes).
const RECORD_LEN: usize = 512;
const RECORD_LEN_POWER: u8 = 9;
/// Fixed data header length.
const HEADER_LEN: usize = 48;
/// Offset of the first sample in written records (header + Blockette 1000,
/// padded to a 64-byte boundary as libmseed does).
const DATA_OFFSET: usize = 64;
/// INT32 samples fitting in one written record.
const SAMPLES_PER_RECORD: usize = (RECORD_LEN - DATA_OFFSET) / 4;

const ENCODING_INT16: u8 = 1;
const ENCODING_INT32: u8 = 3;

/// Read a waveform file, auto-detecting record byte order.
///
/// A missing path is `FileNotFound`; anything unreadable or malformed is
/// `Parse`. A zero-byte file parses to an empty waveform so the caller can
/// report emptiness explicitly.
pub fn read_file(path: &Path) -> Result<Waveform, SeismicError> {
    let mut file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => SeismicError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => SeismicError::parse(format!("cannot open {}: {e}", path.display())),
    })?;
    read(&mut file)
}

/// Read miniSEED records from any byte source.
pub fn read<R: Read>(mut input: R) -> Result<Waveform, SeismicError> {
    let mut bytes = Vec::new();
    input
        .read_to_end(&mut bytes)
        .map_err(|e| SeismicError::parse(format!("read failed: {e}")))?;
    parse_records(&bytes)
}

/// Serialize a waveform to a file as little-endian miniSEED.
pub fn write_file(waveform: &Waveform, path: &Path) -> Result<(), SeismicError> {
    let mut buf = Vec::new();
    write(waveform, &mut buf)?;
    std::fs::write(path, &buf).map_err(|e| {
        SeismicError::serialization(format!("failed to write {}: {e}", path.display()))
    })
}

/// Serialize a waveform to any byte sink as little-endian miniSEED.
pub fn write<W: Write>(waveform: &Waveform, mut out: W) -> Result<(), SeismicError> {
    let mut seq = 1u32;
    for trace in &waveform.traces {
        write_trace(trace, &mut seq, &mut out)?;
    }
    Ok(())
}

fn write_trace<W: Write>(trace: &Trace, seq: &mut u32, out: &mut W) -> Result<(), SeismicError> {
    let (factor, multiplier) = encode_sampling_rate(trace.sampling_rate)?;

    // A sample-less trace still gets one (empty) record so its header survives.
    let chunks: Vec<&[i32]> = if trace.samples.is_empty() {
        vec![&[][..]]
    } else {
        trace.samples.chunks(SAMPLES_PER_RECORD).collect()
    };

    let mut sample_offset = 0usize;
    for chunk in chunks {
        let span_us = sample_offset as f64 / trace.sampling_rate * 1_000_000.0;
        let start = trace.starttime + Duration::microseconds(span_us.round() as i64);
        let record = build_record(trace, start, chunk, factor, multiplier, *seq)?;
        out.write_all(&record)
            .map_err(|e| SeismicError::serialization(format!("write failed: {e}")))?;
        *seq = *seq % 999_999 + 1;
        sample_offset += chunk.len();
    }
    Ok(())
}

fn build_record(
    trace: &Trace,
    start: DateTime<Utc>,
    samples: &[i32],
    factor: i16,
    multiplier: i16,
    seq: u32,
) -> Result<[u8; RECORD_LEN], SeismicError> {
    let mut rec = [0u8; RECORD_LEN];

    rec[0..6].copy_from_slice(format!("{seq:06}").as_bytes());
    rec[6] = b'D';
    rec[7] = b' ';
    write_code(&mut rec[8..13], &trace.station, "station")?;
    write_code(&mut rec[13..15], &trace.location, "location")?;
    write_code(&mut rec[15..18], &trace.channel, "channel")?;
    write_code(&mut rec[18..20], &trace.network, "network")?;
    encode_btime(&start, &mut rec[20..30])?;
    rec[30..32].copy_from_slice(&(samples.len() as u16).to_le_bytes());
    rec[32..34].copy_from_slice(&factor.to_le_bytes());
    rec[34..36].copy_from_slice(&multiplier.to_le_bytes());
    // Activity/io/quality flags and time correction stay zero.
    rec[39] = 1;
    rec[44..46].copy_from_slice(&(DATA_OFFSET as u16).to_le_bytes());
    rec[46..48].copy_from_slice(&(HEADER_LEN as u16).to_le_bytes());

    // Blockette 1000: encoding, word order, record length.
    rec[48..50].copy_from_slice(&1000u16.to_le_bytes());
    rec[50..52].copy_from_slice(&0u16.to_le_bytes());
    rec[52] = ENCODING_INT32;
    rec[53] = 0; // little-endian word order
    rec[54] = RECORD_LEN_POWER;

    let mut off = DATA_OFFSET;
    for sample in samples {
        rec[off..off + 4].copy_from_slice(&sample.to_le_bytes());
        off += 4;
    }

    Ok(rec)
}

fn write_code(slot: &mut [u8], code: &str, field: &str) -> Result<(), SeismicError> {
    if !code.is_ascii() || code.len() > slot.len() {
        return Err(SeismicError::serialization(format!(
            "{field} code '{code}' does not fit a {}-byte field",
            slot.len()
        )));
    }
    slot.fill(b' ');
    slot[..code.len()].copy_from_slice(code.as_bytes());
    Ok(())
}

fn encode_btime(t: &DateTime<Utc>, slot: &mut [u8]) -> Result<(), SeismicError> {
    // Round to the nearest 0.1 ms tick; the carry propagates through chrono
    // so a rounded-up fraction can roll into the next second.
    let residue = (t.nanosecond() % 100_000) as i64;
    let t = if residue >= 50_000 {
        *t + Duration::nanoseconds(100_000 - residue)
    } else {
        *t - Duration::nanoseconds(residue)
    };

    let year = t.year();
    if !(1900..=2100).contains(&year) {
        return Err(SeismicError::serialization(format!(
            "start time year {year} outside representable range"
        )));
    }
    slot[0..2].copy_from_slice(&(year as u16).to_le_bytes());
    slot[2..4].copy_from_slice(&(t.ordinal() as u16).to_le_bytes());
    slot[4] = t.hour() as u8;
    slot[5] = t.minute() as u8;
    slot[6] = t.second() as u8;
    slot[7] = 0;
    let fract = ((t.nanosecond() / 100_000) as u16).min(9999);
    slot[8..10].copy_from_slice(&fract.to_le_bytes());
    Ok(())
}

/// Encode a sampling rate as the SEED factor/multiplier pair.
///
/// Integral rates become `(rate, 1)`, integral periods `(-period, 1)`, and
/// rates expressible in hundredths of a hertz `(rate * 100, -100)`.
fn encode_sampling_rate(rate: f64) -> Result<(i16, i16), SeismicError> {
    if rate >= 1.0 {
        let rounded = rate.round();
        if (rate - rounded).abs() < 1e-9 && rounded <= i16::MAX as f64 {
            return Ok((rounded as i16, 1));
        }
        let scaled = (rate * 100.0).round();
        if (rate * 100.0 - scaled).abs() < 1e-6 && scaled <= i16::MAX as f64 {
            return Ok((scaled as i16, -100));
        }
    } else if rate > 0.0 {
        let period = (1.0 / rate).round();
        if (1.0 / rate - period).abs() < 1e-9 && period <= i16::MAX as f64 {
            return Ok((-(period as i16), 1));
        }
    }
    Err(SeismicError::serialization(format!(
        "sampling rate {rate} has no factor/multiplier encoding"
    )))
}

/// Decode the SEED four-quadrant factor/multiplier sampling rate.
fn decode_sampling_rate(factor: i16, multiplier: i16) -> Result<f64, SeismicError> {
    if factor == 0 || multiplier == 0 {
        return Err(SeismicError::parse("zero sampling rate factor/multiplier"));
    }
    let f = factor as f64;
    let m = multiplier as f64;
    let rate = if factor > 0 && multiplier > 0 {
        f * m
    } else if factor > 0 {
        -f / m
    } else if multiplier > 0 {
        -m / f
    } else {
        1.0 / (f * m)
    };
    if rate > 0.0 {
        Ok(rate)
    } else {
        Err(SeismicError::parse(format!(
            "non-positive sampling rate from factor {factor} multiplier {multiplier}"
        )))
    }
}

struct RecordData {
    network: String,
    station: String,
    location: String,
    channel: String,
    starttime: DateTime<Utc>,
    sampling_rate: f64,
    samples: Vec<i32>,
}

fn parse_records(bytes: &[u8]) -> Result<Waveform, SeismicError> {
    let mut traces: Vec<Trace> = Vec::new();
    let mut offset = 0usize;
    while offset < bytes.len() {
        let (record, reclen) = parse_record(&bytes[offset..])?;
        append_record(&mut traces, record);
        offset += reclen;
    }
    Ok(Waveform::new(traces))
}

fn parse_record(buf: &[u8]) -> Result<(RecordData, usize), SeismicError> {
    if buf.len() < HEADER_LEN + 8 {
        return Err(SeismicError::parse("truncated record header"));
    }
    if !buf[0..6].iter().all(|b| b.is_ascii_digit() || *b == b' ') {
        return Err(SeismicError::parse("invalid record sequence number"));
    }
    if !matches!(buf[6], b'D' | b'R' | b'Q' | b'M') {
        return Err(SeismicError::parse(format!(
            "unrecognized data quality indicator '{}'",
            buf[6] as char
        )));
    }

    let le = detect_byte_order(buf)?;

    let station = code_at(buf, 8, 5);
    let location = code_at(buf, 13, 2);
    let channel = code_at(buf, 15, 3);
    let network = code_at(buf, 18, 2);
    let starttime = decode_btime(&buf[20..30], le)?;
    let nsamples = u16_at(buf, 30, le) as usize;
    let factor = i16_at(buf, 32, le);
    let multiplier = i16_at(buf, 34, le);
    let nblockettes = buf[39];
    let data_offset = u16_at(buf, 44, le) as usize;
    let first_blockette = u16_at(buf, 46, le) as usize;

    let sampling_rate = decode_sampling_rate(factor, multiplier)?;
    let (encoding, data_le, reclen) = find_blockette_1000(buf, first_blockette, nblockettes, le)?;

    if buf.len() < reclen {
        return Err(SeismicError::parse(
            "record shorter than its declared length",
        ));
    }

    let sample_size = match encoding {
        ENCODING_INT16 => 2,
        ENCODING_INT32 => 4,
        other => {
            return Err(SeismicError::parse(format!(
                "unsupported data encoding {other}"
            )))
        }
    };

    let mut samples = Vec::with_capacity(nsamples);
    if nsamples > 0 {
        let end = data_offset + nsamples * sample_size;
        if data_offset < HEADER_LEN || end > reclen {
            return Err(SeismicError::parse("sample data outside record bounds"));
        }
        for i in 0..nsamples {
            let off = data_offset + i * sample_size;
            let value = match encoding {
                ENCODING_INT16 => i16_at(buf, off, data_le) as i32,
                _ => i32_at(buf, off, data_le),
            };
            samples.push(value);
        }
    }

    Ok((
        RecordData {
            network,
            station,
            location,
            channel,
            starttime,
            sampling_rate,
            samples,
        },
        reclen,
    ))
}

/// Detect header byte order from start-time plausibility, the libmseed
/// heuristic. Little-endian wins ties since that is what this writer emits.
fn detect_byte_order(buf: &[u8]) -> Result<bool, SeismicError> {
    let plausible = |le: bool| {
        let year = u16_at(buf, 20, le);
        let doy = u16_at(buf, 22, le);
        (1900..=2100).contains(&year) && (1..=366).contains(&doy)
    };
    if plausible(true) {
        Ok(true)
    } else if plausible(false) {
        Ok(false)
    } else {
        Err(SeismicError::parse(
            "start time not plausible in either byte order",
        ))
    }
}

fn find_blockette_1000(
    buf: &[u8],
    first: usize,
    count: u8,
    le: bool,
) -> Result<(u8, bool, usize), SeismicError> {
    let mut offset = first;
    for _ in 0..count {
        if offset < HEADER_LEN || offset + 8 > buf.len() {
            break;
        }
        let btype = u16_at(buf, offset, le);
        let next = u16_at(buf, offset + 2, le) as usize;
        if btype == 1000 {
            let encoding = buf[offset + 4];
            let word_le = buf[offset + 5] == 0;
            let power = buf[offset + 6];
            if !(7..=16).contains(&power) {
                return Err(SeismicError::parse(format!(
                    "implausible record length power {power}"
                )));
            }
            return Ok((encoding, word_le, 1usize << power));
        }
        offset = next;
    }
    Err(SeismicError::parse("record has no Blockette 1000"))
}

fn decode_btime(slot: &[u8], le: bool) -> Result<DateTime<Utc>, SeismicError> {
    let year = u16_at(slot, 0, le) as i32;
    let doy = u16_at(slot, 2, le) as u32;
    let (hour, minute, second) = (slot[4] as u32, slot[5] as u32, slot[6] as u32);
    let fract = u16_at(slot, 8, le) as u32;

    NaiveDate::from_yo_opt(year, doy)
        .and_then(|d| d.and_hms_micro_opt(hour, minute, second, fract * 100))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| {
            SeismicError::parse(format!(
                "invalid record start time {year} day {doy} {hour:02}:{minute:02}:{second:02}"
            ))
        })
}

/// Append a parsed record, extending the previous trace when it continues the
/// same channel with a gap of at most half a sample period plus one BTIME
/// tick. The tick of slack covers continuation start times the format could
/// only represent after rounding.
fn append_record(traces: &mut Vec<Trace>, record: RecordData) {
    if let Some(last) = traces.last_mut() {
        if last.network == record.network
            && last.station == record.station
            && last.location == record.location
            && last.channel == record.channel
            && last.sampling_rate == record.sampling_rate
            && !last.samples.is_empty()
        {
            let period_us = 1_000_000.0 / last.sampling_rate;
            let expected = last.endtime() + Duration::microseconds(period_us.round() as i64);
            let gap_us = (record.starttime - expected)
                .num_microseconds()
                .unwrap_or(i64::MAX);
            if (gap_us.unsigned_abs() as f64) <= period_us / 2.0 + 100.0 {
                last.samples.extend_from_slice(&record.samples);
                return;
            }
        }
    }
    traces.push(Trace {
        network: record.network,
        station: record.station,
        location: record.location,
        channel: record.channel,
        starttime: record.starttime,
        sampling_rate: record.sampling_rate,
        samples: record.samples,
    });
}

fn code_at(buf: &[u8], off: usize, len: usize) -> String {
    String::from_utf8_lossy(&buf[off..off + len]).trim().to_string()
}

fn u16_at(buf: &[u8], off: usize, le: bool) -> u16 {
    let raw = [buf[off], buf[off + 1]];
    if le {
        u16::from_le_bytes(raw)
    } else {
        u16::from_be_bytes(raw)
    }
}

fn i16_at(buf: &[u8], off: usize, le: bool) -> i16 {
    let raw = [buf[off], buf[off + 1]];
    if le {
        i16::from_le_bytes(raw)
    } else {
        i16::from_be_bytes(raw)
    }
}

fn i32_at(buf: &[u8], off: usize, le: bool) -> i32 {
    let raw = [buf[off], buf[off + 1], buf[off + 2], buf[off + 3]];
    if le {
        i32::from_le_bytes(raw)
    } else {
        i32::from_be_bytes(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn test_trace(channel: &str, samples: Vec<i32>, rate: f64) -> Trace {
        Trace {
            network: "XX".to_string(),
            station: "TEST1".to_string(),
            location: String::new(),
            channel: channel.to_string(),
            starttime: Utc.with_ymd_and_hms(2024, 2, 23, 12, 0, 0).unwrap(),
            sampling_rate: rate,
            samples,
        }
    }

    #[test]
    fn test_round_trip_single_trace() {
        let samples: Vec<i32> = (0..1001).collect();
        let original = Waveform::new(vec![test_trace("BHZ", samples, 100.0)]);

        let mut buf = Vec::new();
        write(&original, &mut buf).unwrap();
        assert_eq!(buf.len() % RECORD_LEN, 0);

        let parsed = read(&buf[..]).unwrap();
        assert_eq!(parsed.len(), 1);
        let trace = &parsed.traces[0];
        assert_eq!(trace.id(), "XX.TEST1..BHZ");
        assert_eq!(trace.starttime, original.traces[0].starttime);
        assert_eq!(trace.endtime(), original.traces[0].endtime());
        assert_eq!(trace.sampling_rate, 100.0);
        assert_eq!(trace.samples, original.traces[0].samples);
    }

    #[test]
    fn test_long_trace_spans_multiple_records_and_merges_back() {
        let samples: Vec<i32> = (0..300).collect();
        let original = Waveform::new(vec![test_trace("BHZ", samples.clone(), 40.0)]);

        let mut buf = Vec::new();
        write(&original, &mut buf).unwrap();
        // 300 samples at 112 per record is three records
        assert_eq!(buf.len(), 3 * RECORD_LEN);

        let parsed = read(&buf[..]).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed.traces[0].samples, samples);
    }

    #[test]
    fn test_round_trip_preserves_trace_order_and_count() {
        let original = Waveform::new(vec![
            test_trace("BHZ", vec![1, 2, 3], 100.0),
            test_trace("BHN", vec![4, 5], 100.0),
            test_trace("BHE", vec![6], 100.0),
        ]);

        let mut buf = Vec::new();
        write(&original, &mut buf).unwrap();
        let parsed = read(&buf[..]).unwrap();

        assert_eq!(parsed.len(), 3);
        let channels: Vec<_> = parsed.traces.iter().map(|t| t.channel.clone()).collect();
        assert_eq!(channels, vec!["BHZ", "BHN", "BHE"]);
    }

    #[test]
    fn test_empty_input_parses_to_empty_waveform() {
        let parsed = read(&[][..]).unwrap();
        assert!(parsed.is_empty());
    }

    #[test]
    fn test_garbage_input_is_a_parse_error() {
        let garbage = vec![0xABu8; 600];
        let err = read(&garbage[..]).unwrap_err();
        assert!(matches!(err, SeismicError::Parse { .. }));
    }

    #[test]
    fn test_truncated_record_is_a_parse_error() {
        let original = Waveform::new(vec![test_trace("BHZ", vec![1, 2, 3], 100.0)]);
        let mut buf = Vec::new();
        write(&original, &mut buf).unwrap();
        buf.truncate(100);
        let err = read(&buf[..]).unwrap_err();
        assert!(matches!(err, SeismicError::Parse { .. }));
    }

    #[test]
    fn test_sampling_rate_encoding_quadrants() {
        assert_eq!(encode_sampling_rate(100.0).unwrap(), (100, 1));
        assert_eq!(encode_sampling_rate(0.1).unwrap(), (-10, 1));
        assert_eq!(encode_sampling_rate(12.5).unwrap(), (1250, -100));

        assert_eq!(decode_sampling_rate(100, 1).unwrap(), 100.0);
        assert_eq!(decode_sampling_rate(-10, 1).unwrap(), 0.1);
        assert_eq!(decode_sampling_rate(1250, -100).unwrap(), 12.5);
        assert_eq!(decode_sampling_rate(-20, -2).unwrap(), 1.0 / 40.0);
        assert!(decode_sampling_rate(0, 1).is_err());
    }

    #[test]
    fn test_unencodable_sampling_rate_is_a_serialization_error() {
        let trace = test_trace("BHZ", vec![1], std::f64::consts::PI);
        let err = write(&Waveform::new(vec![trace]), &mut Vec::new()).unwrap_err();
        assert!(matches!(err, SeismicError::Serialization { .. }));
    }

    #[test]
    fn test_oversized_station_code_is_a_serialization_error() {
        let mut trace = test_trace("BHZ", vec![1], 100.0);
        trace.station = "TOOLONGSTATION".to_string();
        let err = write(&Waveform::new(vec![trace]), &mut Vec::new()).unwrap_err();
        assert!(matches!(err, SeismicError::Serialization { .. }));
    }

    /// Hand-built 256-byte big-endian INT16 record, the other half of the
    /// reader's byte-order and encoding support.
    fn big_endian_int16_record(samples: &[i16]) -> Vec<u8> {
        let mut rec = vec![0u8; 256];
        rec[0..6].copy_from_slice(b"000001");
        rec[6] = b'D';
        rec[7] = b' ';
        rec[8..13].copy_from_slice(b"STA  ");
        rec[13..15].copy_from_slice(b"  ");
        rec[15..18].copy_from_slice(b"BHZ");
        rec[18..20].copy_from_slice(b"XX");
        rec[20..22].copy_from_slice(&2024u16.to_be_bytes());
        rec[22..24].copy_from_slice(&54u16.to_be_bytes()); // Feb 23
        rec[24] = 12;
        rec[30..32].copy_from_slice(&(samples.len() as u16).to_be_bytes());
        rec[32..34].copy_from_slice(&20i16.to_be_bytes());
        rec[34..36].copy_from_slice(&1i16.to_be_bytes());
        rec[39] = 1;
        rec[44..46].copy_from_slice(&64u16.to_be_bytes());
        rec[46..48].copy_from_slice(&48u16.to_be_bytes());
        rec[48..50].copy_from_slice(&1000u16.to_be_bytes());
        rec[52] = ENCODING_INT16;
        rec[53] = 1; // big-endian word order
        rec[54] = 8; // 256-byte record
        let mut off = 64;
        for s in samples {
            rec[off..off + 2].copy_from_slice(&s.to_be_bytes());
            off += 2;
        }
        rec
    }

    #[test]
    fn test_reads_big_endian_int16_records() {
        let rec = big_endian_int16_record(&[-1, 0, 1, 32000]);
        let parsed = read(&rec[..]).unwrap();

        assert_eq!(parsed.len(), 1);
        let trace = &parsed.traces[0];
        assert_eq!(trace.id(), "XX.STA..BHZ");
        assert_eq!(trace.sampling_rate, 20.0);
        assert_eq!(
            trace.starttime,
            Utc.with_ymd_and_hms(2024, 2, 23, 12, 0, 0).unwrap()
        );
        assert_eq!(trace.samples, vec![-1, 0, 1, 32000]);
    }

    #[test]
    fn test_non_contiguous_records_stay_separate_traces() {
        let first = test_trace("BHZ", vec![1, 2, 3], 100.0);
        let mut second = first.clone();
        // One-second gap, far beyond the half-period merge tolerance
        second.starttime = first.endtime() + Duration::seconds(1);
        second.samples = vec![4, 5, 6];

        let mut buf = Vec::new();
        write(&Waveform::new(vec![first, second]), &mut buf).unwrap();
        let parsed = read(&buf[..]).unwrap();

        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed.traces[0].samples, vec![1, 2, 3]);
        assert_eq!(parsed.traces[1].samples, vec![4, 5, 6]);
    }

    #[test]
    fn test_high_rate_trace_round_trips_as_one_trace() {
        // 30 kHz continuation starts fall between 0.1 ms ticks; nearest-tick
        // rounding plus the merge slack must still reassemble one trace.
        let samples: Vec<i32> = (0..300).collect();
        let original = Waveform::new(vec![test_trace("EHZ", samples.clone(), 30_000.0)]);

        let mut buf = Vec::new();
        write(&original, &mut buf).unwrap();
        assert_eq!(buf.len(), 3 * RECORD_LEN);

        let parsed = read(&buf[..]).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed.traces[0].samples, samples);
        assert_eq!(parsed.traces[0].starttime, original.traces[0].starttime);
    }

    #[test]
    fn test_start_times_round_to_nearest_tick() {
        let base = Utc.with_ymd_and_hms(2024, 2, 23, 12, 0, 0).unwrap();

        let mut down = test_trace("BHZ", vec![1], 100.0);
        down.starttime = base + Duration::microseconds(40);
        let mut up = test_trace("BHN", vec![1], 100.0);
        up.starttime = base + Duration::microseconds(60);

        let mut buf = Vec::new();
        write(&Waveform::new(vec![down, up]), &mut buf).unwrap();
        let parsed = read(&buf[..]).unwrap();

        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed.traces[0].starttime, base);
        assert_eq!(
            parsed.traces[1].starttime,
            base + Duration::microseconds(100)
        );
    }

    #[test]
    fn test_subsecond_start_times_survive_at_tick_precision() {
        let mut trace = test_trace("BHZ", vec![7; 10], 100.0);
        trace.starttime += Duration::microseconds(123_400); // 1234 ticks of 0.1 ms
        let expected = trace.starttime;

        let mut buf = Vec::new();
        write(&Waveform::new(vec![trace]), &mut buf).unwrap();
        let parsed = read(&buf[..]).unwrap();

        assert_eq!(parsed.traces[0].starttime, expected);
    }
}
