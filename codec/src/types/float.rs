//! Floating-point values, transcoded as the unsigned integer sharing their bit pattern.
//!
//! No conversion takes place, so every value (including NaN payloads and signed zeros)
//! round-trips exactly.

use crate::{Decoder, Encoder, Error, Read, Strategy, Write};

macro_rules! impl_float {
    ($type:ty, $bits:ty) => {
        impl Write for $type {
            const STRATEGY: Strategy = Strategy::Float;

            #[inline]
            fn write(&self, enc: &mut Encoder<'_>) -> Result<(), Error> {
                enc.put(&self.to_bits())
            }
        }

        impl Read for $type {
            #[inline]
            fn read(&mut self, dec: &mut Decoder<'_>) -> Result<(), Error> {
                let mut bits: $bits = 0;
                dec.get(&mut bits)?;
                *self = <$type>::from_bits(bits);
                Ok(())
            }
        }
    };
}

impl_float!(f32, u32);
impl_float!(f64, u64);
