//! Core codec traits and entry points
//!
//! # Policy resolution
//!
//! Every encodable type resolves to exactly one [Strategy], chosen by the first rule that
//! matches:
//!
//! 1. [Strategy::Custom]: the type implements [Write] and [Read] by hand.
//! 2. A type implementing only one of [Write] or [Read] cannot be used in the other
//!    direction; [serialize] and [deserialize] reject it at compile time.
//! 3. [Strategy::Integer]: fixed-width integers and `bool`.
//! 4. [Strategy::Enumeration]: types declared with [crate::enumeration!].
//! 5. [Strategy::Float]: `f32` and `f64`, transcoded as their bit pattern.
//! 6. [Strategy::Resizable]: `Vec`, `VecDeque`, `String` and [bytes::Bytes], prefixed with
//!    their element count as a `usize`.
//! 7. [Strategy::FixedArity]: arrays, with no prefix.
//! 8. [Strategy::Composite]: types declared with [crate::composite!] and tuples, encoded
//!    field-by-field.
//! 9. Anything else has no [Write] or [Read] implementation and fails to compile.
//!
//! [crate::Bits] and [crate::Spare] bypass rules 3 to 8 and map their declared width
//! directly onto the transcoder.

use crate::{
    buffer::{Sink, Source},
    ByteOrder, Config, Decoder, Encoder, Error,
};
use bytes::BytesMut;
use tracing::trace;

/// Encoding policy selected for a type.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Strategy {
    /// Hand-written [Write] and [Read].
    Custom,
    /// Native-width integer.
    Integer,
    /// Underlying integer representation of an enumeration.
    Enumeration,
    /// Bit pattern of a floating-point value.
    Float,
    /// Element count followed by each element.
    Resizable,
    /// Each element, with the count implied by the type.
    FixedArity,
    /// Each field in declaration order.
    Composite,
    /// Integer with an explicit wire width.
    BitField,
    /// Zero bits with no backing value.
    Spare,
}

/// Trait for types that can be written (encoded) to a bit stream.
pub trait Write {
    /// Policy this implementation follows.
    const STRATEGY: Strategy = Strategy::Custom;

    /// Encodes this value into `enc`.
    fn write(&self, enc: &mut Encoder<'_>) -> Result<(), Error>;
}

/// Trait for types that can be read (decoded) from a bit stream.
///
/// Decoding happens in place: containers are regrown and fields overwritten one by one. If
/// decoding fails midway, `self` is left partially updated.
pub trait Read {
    /// Decodes from `dec` into this value.
    fn read(&mut self, dec: &mut Decoder<'_>) -> Result<(), Error>;
}

/// Extension trait constructing a fresh value before reading into it.
pub trait ReadExt: Read + Default {
    /// Reads a default-initialized value from `dec`.
    fn read_new(dec: &mut Decoder<'_>) -> Result<Self, Error> {
        let mut value = Self::default();
        value.read(dec)?;
        Ok(value)
    }
}

impl<T: Read + Default> ReadExt for T {}

/// Trait for types that can be encoded and decoded.
pub trait Codec: Write + Read {}

impl<T: Write + Read> Codec for T {}

/// Returns the policy resolved for `T`.
pub fn strategy_of<T: Write + ?Sized>() -> Strategy {
    T::STRATEGY
}

/// Encodes `value` into a new buffer, flushing any trailing partial byte.
///
/// The same value and order always produce the same bytes.
pub fn serialize<T: Write + ?Sized>(value: &T, order: ByteOrder) -> Result<BytesMut, Error> {
    serialize_with(value, Config::new(order))
}

/// Encodes `value` into a new buffer using `config`.
pub fn serialize_with<T: Write + ?Sized>(value: &T, config: Config) -> Result<BytesMut, Error> {
    let mut buf = BytesMut::new();
    write_to(value, &mut buf, config)?;
    trace!(order = ?config.order, len = buf.len(), "serialized value");
    Ok(buf)
}

/// Encodes `value` into `sink`, flushing any trailing partial byte.
pub fn write_to<T: Write + ?Sized>(
    value: &T,
    sink: &mut dyn Sink,
    config: Config,
) -> Result<(), Error> {
    let mut enc = Encoder::with_config(sink, config);
    enc.put(value)?;
    enc.flush();
    Ok(())
}

/// Decodes a default-initialized `T` from `bytes`.
///
/// Trailing bytes are ignored; see [Decode::decode] for a strict variant.
pub fn deserialize<T: Read + Default>(bytes: &[u8], order: ByteOrder) -> Result<T, Error> {
    deserialize_with(bytes, Config::new(order))
}

/// Decodes a default-initialized `T` from `bytes` using `config`.
pub fn deserialize_with<T: Read + Default>(bytes: &[u8], config: Config) -> Result<T, Error> {
    let mut value = T::default();
    deserialize_into_with(&mut value, bytes, config)?;
    Ok(value)
}

/// Decodes from `bytes` into an existing `value`.
pub fn deserialize_into<T: Read + ?Sized>(
    value: &mut T,
    bytes: &[u8],
    order: ByteOrder,
) -> Result<(), Error> {
    deserialize_into_with(value, bytes, Config::new(order))
}

/// Decodes from `bytes` into an existing `value` using `config`.
pub fn deserialize_into_with<T: Read + ?Sized>(
    value: &mut T,
    bytes: &[u8],
    config: Config,
) -> Result<(), Error> {
    let mut source = bytes;
    let consumed = read_from(value, &mut source, config)?;
    trace!(order = ?config.order, bits = consumed, "deserialized value");
    Ok(())
}

/// Decodes from `source` into `value`, returning the number of bits consumed.
pub fn read_from<T: Read + ?Sized>(
    value: &mut T,
    source: &mut dyn Source,
    config: Config,
) -> Result<u64, Error> {
    let mut dec = Decoder::with_config(source, config);
    dec.get(value)?;
    Ok(dec.bits_read())
}

/// Extension trait providing an ergonomic encode method.
pub trait Encode: Write {
    /// Encodes this value in the given order.
    fn encode(&self, order: ByteOrder) -> Result<BytesMut, Error> {
        serialize(self, order)
    }
}

impl<T: Write + ?Sized> Encode for T {}

/// Extension trait providing a decode method that requires the whole input be consumed.
pub trait Decode: Read + Default {
    /// Decodes a value from `bytes`, failing with [Error::ExtraData] if any whole byte
    /// remains after the value. Padding bits in the final partial byte are permitted.
    fn decode(bytes: &[u8], order: ByteOrder) -> Result<Self, Error> {
        Self::decode_with(bytes, Config::new(order))
    }

    /// Decodes a value from `bytes` using `config`, requiring all bytes be consumed.
    fn decode_with(bytes: &[u8], config: Config) -> Result<Self, Error> {
        let mut value = Self::default();
        let mut source = bytes;
        let mut dec = Decoder::with_config(&mut source, config);
        dec.get(&mut value)?;
        let remaining = dec.remaining_bytes();
        if remaining > 0 {
            return Err(Error::ExtraData(remaining));
        }
        Ok(value)
    }
}

impl<T: Read + Default> Decode for T {}

/// Pads `data` in place with zero bytes until its length is a multiple of `alignment`.
///
/// An alignment of 0 or 1 leaves `data` unchanged.
pub fn align(data: &mut BytesMut, alignment: usize) {
    if alignment <= 1 {
        return;
    }
    let rem = data.len() % alignment;
    if rem != 0 {
        data.resize(data.len() + alignment - rem, 0);
    }
}

/// Returns `data` padded with zero bytes until its length is a multiple of `alignment`.
pub fn aligned(mut data: BytesMut, alignment: usize) -> BytesMut {
    align(&mut data, alignment);
    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Bits, Spare};

    struct WriteOnly(u8);

    impl Write for WriteOnly {
        fn write(&self, enc: &mut Encoder<'_>) -> Result<(), Error> {
            enc.put_bits(self.0, 3)
        }
    }

    #[derive(Debug, Default, PartialEq)]
    struct Checksummed {
        payload: u16,
    }

    impl Write for Checksummed {
        fn write(&self, enc: &mut Encoder<'_>) -> Result<(), Error> {
            enc.put(&self.payload)?;
            let [hi, lo] = self.payload.to_be_bytes();
            enc.put(&(hi ^ lo))
        }
    }

    impl Read for Checksummed {
        fn read(&mut self, dec: &mut Decoder<'_>) -> Result<(), Error> {
            dec.get(&mut self.payload)?;
            let check: u8 = dec.get_bits(8)?;
            let [hi, lo] = self.payload.to_be_bytes();
            if check != hi ^ lo {
                return Err(Error::InvalidData("Checksummed", "checksum mismatch".into()));
            }
            Ok(())
        }
    }

    #[test]
    fn test_custom_pass_through() {
        assert_eq!(strategy_of::<Checksummed>(), Strategy::Custom);
        let value = Checksummed { payload: 0x1234 };
        let bytes = serialize(&value, ByteOrder::MsbFirst).unwrap();
        assert_eq!(&bytes[..], &[0x12, 0x34, 0x26]);
        assert_eq!(deserialize::<Checksummed>(&bytes, ByteOrder::MsbFirst), Ok(value));
        assert!(matches!(
            deserialize::<Checksummed>(&[0x12, 0x34, 0x00], ByteOrder::MsbFirst),
            Err(Error::InvalidData("Checksummed", _))
        ));
    }

    #[test]
    fn test_write_only_type_serializes() {
        let bytes = serialize(&WriteOnly(0b101), ByteOrder::MsbFirst).unwrap();
        assert_eq!(&bytes[..], &[0b1010_0000]);
    }

    #[test]
    fn test_strategies() {
        assert_eq!(strategy_of::<u32>(), Strategy::Integer);
        assert_eq!(strategy_of::<bool>(), Strategy::Integer);
        assert_eq!(strategy_of::<f64>(), Strategy::Float);
        assert_eq!(strategy_of::<Vec<u8>>(), Strategy::Resizable);
        assert_eq!(strategy_of::<String>(), Strategy::Resizable);
        assert_eq!(strategy_of::<[u16; 4]>(), Strategy::FixedArity);
        assert_eq!(strategy_of::<(u8, i64)>(), Strategy::Composite);
        assert_eq!(strategy_of::<Bits<u8, 3>>(), Strategy::BitField);
        assert_eq!(strategy_of::<Spare<5>>(), Strategy::Spare);
    }

    #[test]
    fn test_deserialize_into_existing() {
        let mut value = 0u32;
        deserialize_into(&mut value, &[0x12, 0x34, 0x56, 0x78], ByteOrder::LsbFirst).unwrap();
        assert_eq!(value, 0x78563412);
    }

    #[test]
    fn test_strict_decode() {
        assert_eq!(u16::decode(&[0x01, 0x02], ByteOrder::MsbFirst), Ok(0x0102));
        assert_eq!(
            u16::decode(&[0x01, 0x02, 0x03], ByteOrder::MsbFirst),
            Err(Error::ExtraData(1))
        );
        assert_eq!(deserialize::<u16>(&[0x01, 0x02, 0x03], ByteOrder::MsbFirst), Ok(0x0102));

        // Padding bits in the final byte are not extra data
        let bits = Bits::<u8, 3>::new(5);
        let encoded = bits.encode(ByteOrder::LsbFirst).unwrap();
        assert_eq!(Bits::<u8, 3>::decode(&encoded, ByteOrder::LsbFirst), Ok(bits));
    }

    #[test]
    fn test_write_to_sink() {
        let mut out: Vec<u8> = Vec::new();
        write_to(&0xABCDu16, &mut out, Config::new(ByteOrder::LsbFirst)).unwrap();
        assert_eq!(out, vec![0xCD, 0xAB]);

        let mut value = 0u16;
        let mut source = &out[..];
        let bits = read_from(&mut value, &mut source, ByteOrder::LsbFirst.into()).unwrap();
        assert_eq!((value, bits), (0xABCD, 16));
    }

    #[test]
    fn test_align() {
        let mut data = BytesMut::from(&[1u8, 2, 3][..]);
        align(&mut data, 4);
        assert_eq!(&data[..], &[1, 2, 3, 0]);
        align(&mut data, 4);
        assert_eq!(data.len(), 4);

        let data = aligned(BytesMut::from(&[1u8][..]), 3);
        assert_eq!(&data[..], &[1, 0, 0]);

        let data = aligned(BytesMut::from(&[1u8, 2][..]), 0);
        assert_eq!(&data[..], &[1, 2]);
        let data = aligned(BytesMut::new(), 8);
        assert!(data.is_empty());
    }
}
