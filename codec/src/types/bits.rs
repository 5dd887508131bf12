//! Explicitly sized fields and padding.
//!
//! [Bits] stores a value in its native integer type but puts only `W` bits on the wire.
//! [Spare] occupies `W` bits with no backing value. Both check their width when the type is
//! used: a declaration such as `Bits<u8, 9>` or `Spare<0>` fails to compile as soon as it is
//! encoded, decoded or constructed.

use crate::{Decoder, Encoder, Error, Read, Strategy, Word, Write};
use std::{
    fmt,
    ops::{Deref, DerefMut},
};

/// An integer of type `T` transcoded with exactly `W` bits.
///
/// Encoding keeps the low `W` bits of the value. Decoding sign-extends from bit `W - 1` when
/// `T` is signed.
///
/// ```
/// use bitlayout_codec::{deserialize, serialize, Bits, ByteOrder};
///
/// let value = Bits::<i8, 5>::new(-16);
/// let bytes = serialize(&value, ByteOrder::MsbFirst).unwrap();
/// assert_eq!(&bytes[..], &[0b1000_0000]);
/// assert_eq!(*deserialize::<Bits<i8, 5>>(&bytes, ByteOrder::MsbFirst).unwrap(), -16);
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Bits<T, const W: u32>(T);

impl<T: Word, const W: u32> Bits<T, W> {
    /// Declared wire width; evaluating it rejects widths outside `1..=T::BITS`.
    pub const WIDTH: u32 = {
        assert!(W >= 1, "bit-field width must be non-zero");
        assert!(W <= T::BITS, "bit-field width exceeds its backing type");
        W
    };

    /// Wraps `value`.
    pub fn new(value: T) -> Self {
        let _ = Self::WIDTH;
        Self(value)
    }

    /// Returns the stored value.
    pub fn get(&self) -> T {
        self.0
    }

    /// Replaces the stored value.
    pub fn set(&mut self, value: T) {
        self.0 = value;
    }

    /// Returns the stored value, consuming the wrapper.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T: Word, const W: u32> From<T> for Bits<T, W> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T, const W: u32> Deref for Bits<T, W> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T, const W: u32> DerefMut for Bits<T, W> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.0
    }
}

impl<T: fmt::Debug, const W: u32> fmt::Debug for Bits<T, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bits<{}>({:?})", W, self.0)
    }
}

impl<T: Word, const W: u32> Write for Bits<T, W> {
    const STRATEGY: Strategy = Strategy::BitField;

    #[inline]
    fn write(&self, enc: &mut Encoder<'_>) -> Result<(), Error> {
        enc.put_bits(self.0, Self::WIDTH)
    }
}

impl<T: Word, const W: u32> Read for Bits<T, W> {
    #[inline]
    fn read(&mut self, dec: &mut Decoder<'_>) -> Result<(), Error> {
        self.0 = dec.get_bits(Self::WIDTH)?;
        Ok(())
    }
}

/// `W` unused bits, always encoded as zero and ignored on decode.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Spare<const W: u32>;

impl<const W: u32> Spare<W> {
    /// Declared wire width; evaluating it rejects widths outside `1..=usize::BITS`.
    pub const WIDTH: u32 = {
        assert!(W >= 1, "spare width must be non-zero");
        assert!(W <= usize::BITS, "spare width exceeds the platform word");
        W
    };

    /// Creates the marker.
    pub fn new() -> Self {
        let _ = Self::WIDTH;
        Self
    }
}

impl<const W: u32> fmt::Debug for Spare<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Spare<{}>", W)
    }
}

impl<const W: u32> Write for Spare<W> {
    const STRATEGY: Strategy = Strategy::Spare;

    #[inline]
    fn write(&self, enc: &mut Encoder<'_>) -> Result<(), Error> {
        enc.put_word(0, Self::WIDTH);
        Ok(())
    }
}

impl<const W: u32> Read for Spare<W> {
    #[inline]
    fn read(&mut self, dec: &mut Decoder<'_>) -> Result<(), Error> {
        dec.get_word(Self::WIDTH, false)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{deserialize, serialize, ByteOrder, Decode, Encode};
    use test_case::test_case;

    #[test]
    fn test_low_bits_only() {
        let value = Bits::<u8, 3>::new(0xFF);
        let bytes = value.encode(ByteOrder::MsbFirst).unwrap();
        assert_eq!(&bytes[..], &[0b1110_0000]);
        assert_eq!(*Bits::<u8, 3>::decode(&bytes, ByteOrder::MsbFirst).unwrap(), 0b111);
    }

    #[test_case(ByteOrder::MsbFirst; "msb")]
    #[test_case(ByteOrder::LsbFirst; "lsb")]
    fn test_signed_round_trip(order: ByteOrder) {
        for v in -16i8..16 {
            let bytes = serialize(&Bits::<i8, 5>::new(v), order).unwrap();
            assert_eq!(bytes.len(), 1);
            assert_eq!(deserialize::<Bits<i8, 5>>(&bytes, order).unwrap().get(), v);
        }
    }

    #[test]
    fn test_wide_field() {
        let value = Bits::<u64, 40>::new(0xAB_CDEF_0123);
        let bytes = value.encode(ByteOrder::LsbFirst).unwrap();
        assert_eq!(&bytes[..], &[0x23, 0x01, 0xEF, 0xCD, 0xAB]);
        assert_eq!(Bits::<u64, 40>::decode(&bytes, ByteOrder::LsbFirst), Ok(value));
    }

    #[test]
    fn test_accessors() {
        let mut value: Bits<u16, 12> = 0x0ABC.into();
        assert_eq!(value.get(), 0x0ABC);
        value.set(1);
        *value += 1;
        assert_eq!(value.into_inner(), 2);
        assert_eq!(Bits::<u16, 12>::WIDTH, 12);
        assert_eq!(format!("{:?}", Bits::<u8, 2>::new(3)), "Bits<2>(3)");
    }

    #[test]
    fn test_spare_writes_zeros() {
        let bytes = serialize(
            &(Spare::<3>::new(), Bits::<u8, 5>::new(0b11111)),
            ByteOrder::MsbFirst,
        )
        .unwrap();
        assert_eq!(&bytes[..], &[0b0001_1111]);
    }

    #[test]
    fn test_spare_discards_bits() {
        let (spare, value): (Spare<4>, Bits<u8, 4>) =
            deserialize(&[0b1010_0101], ByteOrder::MsbFirst).unwrap();
        assert_eq!(spare, Spare::new());
        assert_eq!(value.get(), 0b0101);
        assert_eq!(format!("{:?}", spare), "Spare<4>");
    }

    #[test]
    fn test_word_sized_spare() {
        let bytes = serialize(&Spare::<{ usize::BITS }>::new(), ByteOrder::LsbFirst).unwrap();
        assert_eq!(bytes.len(), std::mem::size_of::<usize>());
        assert!(bytes.iter().all(|b| *b == 0));
    }
}
