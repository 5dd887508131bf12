//! Resizable collections: an element count (as a `usize`) followed by each element.
//!
//! Decoding reads the count and checks it against the [crate::RangeCfg] of the decoder's
//! configuration. Existing elements up to that count are decoded in place; the collection
//! then grows one default element at a time, each pushed only once it decodes, so a count
//! larger than the input fails with [Error::EndOfBuffer] instead of allocating up front.

use crate::{Decoder, Encoder, Error, Read, Strategy, Write};
use std::collections::VecDeque;

/// Writes the element count of a resizable collection.
#[inline]
pub(crate) fn write_len(enc: &mut Encoder<'_>, len: usize) -> Result<(), Error> {
    enc.put(&len)
}

/// Reads an element count and checks it against the configured range.
#[inline]
pub(crate) fn read_len(dec: &mut Decoder<'_>) -> Result<usize, Error> {
    let mut len = 0usize;
    dec.get(&mut len)?;
    if !dec.config().len.contains(len) {
        return Err(Error::InvalidLength(len));
    }
    Ok(len)
}

impl<T: Write> Write for Vec<T> {
    const STRATEGY: Strategy = Strategy::Resizable;

    #[inline]
    fn write(&self, enc: &mut Encoder<'_>) -> Result<(), Error> {
        write_len(enc, self.len())?;
        for item in self {
            enc.put(item)?;
        }
        Ok(())
    }
}

impl<T: Read + Default> Read for Vec<T> {
    #[inline]
    fn read(&mut self, dec: &mut Decoder<'_>) -> Result<(), Error> {
        let len = read_len(dec)?;
        self.truncate(len);
        for item in self.iter_mut() {
            dec.get(item)?;
        }
        while self.len() < len {
            let mut item = T::default();
            dec.get(&mut item)?;
            self.push(item);
        }
        Ok(())
    }
}

impl<T: Write> Write for VecDeque<T> {
    const STRATEGY: Strategy = Strategy::Resizable;

    #[inline]
    fn write(&self, enc: &mut Encoder<'_>) -> Result<(), Error> {
        write_len(enc, self.len())?;
        for item in self {
            enc.put(item)?;
        }
        Ok(())
    }
}

impl<T: Read + Default> Read for VecDeque<T> {
    #[inline]
    fn read(&mut self, dec: &mut Decoder<'_>) -> Result<(), Error> {
        let len = read_len(dec)?;
        self.truncate(len);
        for item in self.iter_mut() {
            dec.get(item)?;
        }
        while self.len() < len {
            let mut item = T::default();
            dec.get(&mut item)?;
            self.push_back(item);
        }
        Ok(())
    }
}

impl Write for String {
    const STRATEGY: Strategy = Strategy::Resizable;

    #[inline]
    fn write(&self, enc: &mut Encoder<'_>) -> Result<(), Error> {
        write_len(enc, self.len())?;
        for byte in self.as_bytes() {
            enc.put(byte)?;
        }
        Ok(())
    }
}

impl Read for String {
    #[inline]
    fn read(&mut self, dec: &mut Decoder<'_>) -> Result<(), Error> {
        let mut bytes = std::mem::take(self).into_bytes();
        bytes.read(dec)?;
        *self = String::from_utf8(bytes)
            .map_err(|err| Error::InvalidData("String", err.utf8_error().to_string()))?;
        Ok(())
    }
}
