#![no_main]

use arbitrary::Arbitrary;
use bitlayout_codec::{
    composite, deserialize_with, serialize, Bits, ByteOrder, Config, Decode, Encode, Read,
    Spare, Write,
};
use bytes::Bytes;
use libfuzzer_sys::fuzz_target;
use std::fmt::Debug;

const MAX_LEN: usize = 1024;

#[derive(Debug, Default, PartialEq)]
struct Packed {
    flag: Bits<u8, 1>,
    kind: Bits<u8, 3>,
    pad: Spare<4>,
    value: Bits<i32, 19>,
    tail: u16,
}

composite!(Packed { flag, kind, pad, value, tail });

#[derive(Arbitrary, Debug)]
enum FuzzInput<'a> {
    // Untrusted input
    Raw(&'a [u8]),

    // Primitives
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    Bool(bool),

    // Collections
    Vec(Vec<u32>),
    String(String),
    Bytes(&'a [u8]),
    Array([i16; 5]),
    Tuple(u8, i64, bool),

    // Bit fields
    Packed {
        flag: u8,
        kind: u8,
        value: i32,
        tail: u16,
    },
}

fn orders() -> [ByteOrder; 2] {
    [ByteOrder::MsbFirst, ByteOrder::LsbFirst]
}

fn roundtrip<T: Write + Read + Default + PartialEq + Debug>(value: &T) {
    for order in orders() {
        let encoded = value.encode(order).expect("Failed to encode value!");
        let decoded = T::decode(&encoded, order).expect("Failed to decode an encoded value!");
        assert_eq!(value, &decoded);
    }
}

fn roundtrip_float<T: Write + Read + Default + Debug, B: PartialEq + Debug>(
    value: T,
    bits: impl Fn(&T) -> B,
) {
    for order in orders() {
        let encoded = value.encode(order).expect("Failed to encode float!");
        let decoded = T::decode(&encoded, order).expect("Failed to decode float!");
        assert_eq!(bits(&value), bits(&decoded));
    }
}

fn decode_untrusted(data: &[u8]) {
    for order in orders() {
        let config = Config::new(order).with_len(..=MAX_LEN);
        let _ = deserialize_with::<Packed>(data, config);
        let _ = deserialize_with::<Vec<u16>>(data, config);
        let _ = deserialize_with::<String>(data, config);
        let _ = deserialize_with::<(bool, i8, f64)>(data, config);

        // The default range is unbounded; oversized counts must still fail cleanly
        let unbounded = Config::new(order);
        let _ = deserialize_with::<Vec<u64>>(data, unbounded);
        let _ = deserialize_with::<String>(data, unbounded);
    }
}

fn roundtrip_packed(flag: u8, kind: u8, value: i32, tail: u16) {
    // Bit fields keep only their low bits, sign-extended for signed types
    let value = (value << 13) >> 13;
    let packed = Packed {
        flag: Bits::new(flag & 0x1),
        kind: Bits::new(kind & 0x7),
        pad: Spare::new(),
        value: Bits::new(value),
        tail,
    };
    for order in orders() {
        let encoded = serialize(&packed, order).expect("Failed to encode packed!");
        assert_eq!(encoded.len(), 6);
    }
    roundtrip(&packed);
}

fn fuzz(input: FuzzInput) {
    match input {
        FuzzInput::Raw(data) => decode_untrusted(data),
        // Primitives
        FuzzInput::U8(v) => roundtrip(&v),
        FuzzInput::U16(v) => roundtrip(&v),
        FuzzInput::U32(v) => roundtrip(&v),
        FuzzInput::U64(v) => roundtrip(&v),
        FuzzInput::I8(v) => roundtrip(&v),
        FuzzInput::I16(v) => roundtrip(&v),
        FuzzInput::I32(v) => roundtrip(&v),
        FuzzInput::I64(v) => roundtrip(&v),
        FuzzInput::F32(v) => roundtrip_float(v, |f| f.to_bits()),
        FuzzInput::F64(v) => roundtrip_float(v, |f| f.to_bits()),
        FuzzInput::Bool(v) => roundtrip(&v),
        // Collections
        FuzzInput::Vec(v) => roundtrip(&v),
        FuzzInput::String(v) => roundtrip(&v),
        FuzzInput::Bytes(v) => roundtrip(&Bytes::copy_from_slice(v)),
        FuzzInput::Array(v) => roundtrip(&v),
        FuzzInput::Tuple(a, b, c) => roundtrip(&(a, b, c)),
        // Bit fields
        FuzzInput::Packed {
            flag,
            kind,
            value,
            tail,
        } => roundtrip_packed(flag, kind, value, tail),
    }
}

fuzz_target!(|input: FuzzInput| {
    fuzz(input);
});
