//! Fixed-arity arrays: each element in order, with no length prefix.

use crate::{Decoder, Encoder, Error, Read, Strategy, Write};

impl<T: Write, const N: usize> Write for [T; N] {
    const STRATEGY: Strategy = Strategy::FixedArity;

    #[inline]
    fn write(&self, enc: &mut Encoder<'_>) -> Result<(), Error> {
        for item in self {
            enc.put(item)?;
        }
        Ok(())
    }
}

impl<T: Read, const N: usize> Read for [T; N] {
    #[inline]
    fn read(&mut self, dec: &mut Decoder<'_>) -> Result<(), Error> {
        for item in self.iter_mut() {
            dec.get(item)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{deserialize, deserialize_into, serialize, Bits, ByteOrder, Decode, Encode, Error};

    #[test]
    fn test_no_prefix() {
        assert_eq!([1u8, 2, 3].encode(ByteOrder::MsbFirst).unwrap(), &[1, 2, 3][..]);
        assert_eq!(
            [0x0102u16, 0x0304].encode(ByteOrder::LsbFirst).unwrap(),
            &[0x02, 0x01, 0x04, 0x03][..]
        );
        assert!(<[u8; 0]>::default().encode(ByteOrder::MsbFirst).unwrap().is_empty());
    }

    #[test]
    fn test_round_trip() {
        for order in [ByteOrder::MsbFirst, ByteOrder::LsbFirst] {
            let value = [i64::MIN, -1, 0, i64::MAX];
            let encoded = serialize(&value, order).unwrap();
            assert_eq!(<[i64; 4]>::decode(&encoded, order), Ok(value));
        }
    }

    #[test]
    fn test_packed_elements() {
        let value = [Bits::<u8, 2>::new(1), Bits::new(2), Bits::new(3), Bits::new(0)];
        let encoded = value.encode(ByteOrder::MsbFirst).unwrap();
        assert_eq!(&encoded[..], &[0b0110_1100]);
        assert_eq!(deserialize::<[Bits<u8, 2>; 4]>(&encoded, ByteOrder::MsbFirst), Ok(value));
    }

    #[test]
    fn test_in_place() {
        let mut value = [[0u8; 2]; 2];
        deserialize_into(&mut value, &[1, 2, 3, 4], ByteOrder::MsbFirst).unwrap();
        assert_eq!(value, [[1, 2], [3, 4]]);
        assert_eq!(
            deserialize_into(&mut value, &[1, 2, 3], ByteOrder::MsbFirst),
            Err(Error::EndOfBuffer)
        );
    }
}
