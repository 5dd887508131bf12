//! Codec implementations for Rust integer types and `bool`.
//!
//! Integers are transcoded at their full native width. `usize` and `isize` follow the
//! platform word, so their encoded width differs between 32-bit and 64-bit targets.
//! `u128` and `i128` are wider than any supported platform word and have no policy.
//!
//! `bool` travels as an 8-bit integer; decoding rejects values other than 0 and 1.

use crate::{Decoder, Encoder, Error, Read, Strategy, Word, Write};

macro_rules! impl_integer {
    ($($type:ty),*) => {
        $(
            impl Write for $type {
                const STRATEGY: Strategy = Strategy::Integer;

                #[inline]
                fn write(&self, enc: &mut Encoder<'_>) -> Result<(), Error> {
                    enc.put_bits(*self, <$type as Word>::BITS)
                }
            }

            impl Read for $type {
                #[inline]
                fn read(&mut self, dec: &mut Decoder<'_>) -> Result<(), Error> {
                    *self = dec.get_bits(<$type as Word>::BITS)?;
                    Ok(())
                }
            }
        )*
    };
}

impl_integer!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

impl Write for bool {
    const STRATEGY: Strategy = Strategy::Integer;

    #[inline]
    fn write(&self, enc: &mut Encoder<'_>) -> Result<(), Error> {
        enc.put(&u8::from(*self))
    }
}

impl Read for bool {
    #[inline]
    fn read(&mut self, dec: &mut Decoder<'_>) -> Result<(), Error> {
        *self = match dec.get_bits::<u8>(u8::BITS)? {
            0 => false,
            1 => true,
            other => return Err(Error::InvalidBool(other)),
        };
        Ok(())
    }
}
