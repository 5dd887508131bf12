//! Codec implementation for [Bytes], a resizable collection of `u8`.

use crate::{
    types::vec::{read_len, write_len},
    Decoder, Encoder, Error, Read, Strategy, Write,
};
use bytes::{BufMut, Bytes, BytesMut};

impl Write for Bytes {
    const STRATEGY: Strategy = Strategy::Resizable;

    #[inline]
    fn write(&self, enc: &mut Encoder<'_>) -> Result<(), Error> {
        write_len(enc, self.len())?;
        for byte in self.iter() {
            enc.put(byte)?;
        }
        Ok(())
    }
}

impl Read for Bytes {
    #[inline]
    fn read(&mut self, dec: &mut Decoder<'_>) -> Result<(), Error> {
        let len = read_len(dec)?;
        let mut buf = BytesMut::with_capacity(len.min(dec.remaining_bytes() + 1));
        for _ in 0..len {
            let mut byte = 0u8;
            dec.get(&mut byte)?;
            buf.put_u8(byte);
        }
        *self = buf.freeze();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{deserialize, deserialize_into, ByteOrder, Encode};

    #[test]
    fn test_bytes() {
        let values = [
            Bytes::new(),
            Bytes::from_static(&[1, 2, 3]),
            Bytes::from(vec![0; 300]),
        ];
        for order in [ByteOrder::MsbFirst, ByteOrder::LsbFirst] {
            for value in values.iter() {
                let encoded = value.encode(order).unwrap();
                assert_eq!(encoded.len(), std::mem::size_of::<usize>() + value.len());
                assert_eq!(deserialize::<Bytes>(&encoded, order).as_ref(), Ok(value));
            }
        }
    }

    #[test]
    fn test_matches_vec_encoding() {
        let bytes = Bytes::from_static(b"abc");
        let vec = b"abc".to_vec();
        assert_eq!(
            bytes.encode(ByteOrder::LsbFirst).unwrap(),
            vec.encode(ByteOrder::LsbFirst).unwrap()
        );
    }

    #[test]
    fn test_replaces_existing() {
        let encoded = Bytes::from_static(&[7, 8]).encode(ByteOrder::MsbFirst).unwrap();
        let mut value = Bytes::from_static(&[1, 2, 3, 4]);
        deserialize_into(&mut value, &encoded, ByteOrder::MsbFirst).unwrap();
        assert_eq!(&value[..], &[7, 8]);
    }

    #[test]
    fn test_truncated() {
        let encoded = Bytes::from_static(&[7, 8]).encode(ByteOrder::MsbFirst).unwrap();
        assert_eq!(
            deserialize::<Bytes>(&encoded[..encoded.len() - 1], ByteOrder::MsbFirst),
            Err(Error::EndOfBuffer)
        );
    }
}
