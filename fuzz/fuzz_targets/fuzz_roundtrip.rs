#![no_main]

use arbitrary::Arbitrary;
use binmodem::{Reader, ReaderOptions, Writer, WriterOptions};
use libfuzzer_sys::fuzz_target;

/// One primitive write, as chosen by the fuzzer.
#[derive(Debug, Arbitrary)]
enum Op {
    U8(u8),
    I8(i8),
    U16(u16),
    I16(i16),
    I24(i32),
    U32(u32),
    I32(i32),
    U64(u64),
    I64(i64),
    F32(f32),
    F64(f64),
    VarU32(u32),
    Str(String),
    Bytes(Vec<u8>),
}

/// Sign-extended 24-bit view of the value the writer truncated.
fn as_i24(v: i32) -> i32 {
    (v << 8) >> 8
}

fuzz_target!(|input: (bool, Vec<Op>)| {
    let (encoding_tag, ops) = input;

    let mut writer = Writer::new(WriterOptions {
        encoding_tag,
        ..Default::default()
    });
    for op in &ops {
        match op {
            Op::U8(v) => writer.write_u8(*v),
            Op::I8(v) => writer.write_i8(*v),
            Op::U16(v) => writer.write_u16(*v),
            Op::I16(v) => writer.write_i16(*v),
            Op::I24(v) => writer.write_i24(*v),
            Op::U32(v) => writer.write_u32(*v),
            Op::I32(v) => writer.write_i32(*v),
            Op::U64(v) => writer.write_u64(*v),
            Op::I64(v) => writer.write_i64(*v),
            Op::F32(v) => writer.write_f32(*v),
            Op::F64(v) => writer.write_f64(*v),
            Op::VarU32(v) => writer.write_var_u32(*v),
            Op::Str(s) => writer.write_string(s),
            Op::Bytes(b) => {
                writer.write_var_u32(u32::try_from(b.len()).unwrap());
                writer.write_bytes(b);
            }
        }
    }
    let bytes = writer.dump();

    let mut reader = Reader::new(&bytes, ReaderOptions { encoding_tag });
    for op in &ops {
        match op {
            Op::U8(v) => assert_eq!(reader.read_u8().unwrap(), *v),
            Op::I8(v) => assert_eq!(reader.read_i8().unwrap(), *v),
            Op::U16(v) => assert_eq!(reader.read_u16().unwrap(), *v),
            Op::I16(v) => assert_eq!(reader.read_i16().unwrap(), *v),
            Op::I24(v) => assert_eq!(reader.read_i24().unwrap(), as_i24(*v)),
            Op::U32(v) => assert_eq!(reader.read_u32().unwrap(), *v),
            Op::I32(v) => assert_eq!(reader.read_i32().unwrap(), *v),
            Op::U64(v) => assert_eq!(reader.read_u64().unwrap(), *v),
            Op::I64(v) => assert_eq!(reader.read_i64().unwrap(), *v),
            Op::F32(v) => {
                assert_eq!(reader.read_f32().unwrap().to_bits(), v.to_bits());
            }
            Op::F64(v) => {
                assert_eq!(reader.read_f64().unwrap().to_bits(), v.to_bits());
            }
            Op::VarU32(v) => assert_eq!(reader.read_var_u32().unwrap(), *v),
            Op::Str(s) => assert_eq!(&reader.read_string().unwrap(), s),
            Op::Bytes(b) => {
                let len = reader.read_var_u32().unwrap() as usize;
                assert_eq!(reader.read_bytes(len).unwrap(), b.as_slice());
            }
        }
    }
    assert_eq!(reader.remaining(), 0);
});
