//! QuickCheck properties over the codec surface.

use alloc::{string::String, vec::Vec};

use quickcheck::QuickCheck;
use quickcheck_macros::quickcheck;

use crate::{Reader, ReaderOptions, Writer, WriterOptions, decode_units, encode_units};

#[quickcheck]
fn varint_roundtrips(values: Vec<u32>) -> bool {
    let mut writer = Writer::default();
    for &v in &values {
        writer.write_var_u32(v);
    }
    let bytes = writer.dump();
    let mut reader = Reader::new(&bytes, ReaderOptions::default());
    values.iter().all(|&v| reader.read_var_u32() == Ok(v)) && reader.remaining() == 0
}

#[quickcheck]
fn untagged_strings_roundtrip(strings: Vec<String>) -> bool {
    let mut writer = Writer::default();
    for s in &strings {
        writer.write_string(s);
    }
    let bytes = writer.dump();
    let mut reader = Reader::new(&bytes, ReaderOptions::default());
    strings.iter().all(|s| reader.read_string().as_ref() == Ok(s))
}

#[quickcheck]
fn tagged_strings_roundtrip(strings: Vec<String>) -> bool {
    let mut writer = Writer::new(WriterOptions {
        encoding_tag: true,
        ..Default::default()
    });
    for s in &strings {
        writer.write_string(s);
    }
    let bytes = writer.dump();
    let mut reader = Reader::new(&bytes, ReaderOptions { encoding_tag: true });
    strings.iter().all(|s| reader.read_string().as_ref() == Ok(s))
}

#[quickcheck]
fn byte_runs_roundtrip(runs: Vec<Vec<u8>>) -> bool {
    let mut writer = Writer::default();
    for run in &runs {
        writer.write_var_u32(u32::try_from(run.len()).unwrap());
        writer.write_bytes(run);
    }
    let bytes = writer.dump();
    let mut reader = Reader::new(&bytes, ReaderOptions::default());
    runs.iter().all(|run| {
        let len = reader.read_var_u32().unwrap() as usize;
        reader.read_bytes(len) == Ok(run.as_slice())
    })
}

/// Property: the unit-level transcoder is lossless for *every* `u16`
/// sequence, including unpaired surrogates — the format's leniency contract.
#[test]
fn unit_transcoder_is_lossless_for_arbitrary_unit_sequences() {
    fn prop(units: Vec<u16>) -> bool {
        let mut bytes = Vec::new();
        encode_units(&units, &mut bytes);
        if bytes.len() != crate::encoded_units_len(&units) {
            return false;
        }
        let mut back = Vec::new();
        decode_units(&bytes, &mut back).is_ok() && back == units
    }
    QuickCheck::new()
        .tests(2_000)
        .quickcheck(prop as fn(Vec<u16>) -> bool);
}

#[quickcheck]
fn fixed_width_scalars_roundtrip(values: Vec<(i16, u32, i64, f64)>) -> bool {
    let mut writer = Writer::default();
    for &(a, b, c, d) in &values {
        writer.write_i16(a);
        writer.write_u32(b);
        writer.write_i64(c);
        writer.write_f64(d);
    }
    let bytes = writer.dump();
    let mut reader = Reader::new(&bytes, ReaderOptions::default());
    values.iter().all(|&(a, b, c, d)| {
        reader.read_i16() == Ok(a)
            && reader.read_u32() == Ok(b)
            && reader.read_i64() == Ok(c)
            && reader.read_f64().map(f64::to_bits) == Ok(d.to_bits())
    })
}

/// Property: a writer reused across sessions produces the same bytes as a
/// fresh one, regardless of how much the previous session wrote.
#[quickcheck]
fn pooled_reuse_is_invisible_in_the_output(prefix: Vec<u8>, s: String) -> bool {
    let mut reused = Writer::default();
    reused.write_bytes(&prefix);
    let _ = reused.dump();
    reused.reset();
    reused.write_string(&s);

    let mut fresh = Writer::default();
    fresh.write_string(&s);

    reused.dump() == fresh.dump()
}
