//! Byte-level endpoints beneath the bit transcoder.
//!
//! A [Sink] receives one byte at a time while encoding and a [Source] yields one byte at a
//! time while decoding. Both are implemented for every [BufMut] and [Buf], so a
//! [bytes::BytesMut] or `Vec<u8>` can collect output and a `&[u8]` or [bytes::Bytes] can be
//! read without copying.

use crate::Error;
use bytes::{Buf, BufMut};

/// Append-only destination for encoded bytes.
pub trait Sink {
    /// Appends a single byte.
    fn put_byte(&mut self, byte: u8);
}

impl<B: BufMut> Sink for B {
    #[inline]
    fn put_byte(&mut self, byte: u8) {
        self.put_u8(byte);
    }
}

/// Bounded, forward-only origin of encoded bytes.
pub trait Source {
    /// Consumes and returns the next byte.
    ///
    /// Returns [Error::EndOfBuffer] once the input is exhausted.
    fn pull_byte(&mut self) -> Result<u8, Error>;

    /// Returns the number of bytes that can still be pulled.
    fn remaining(&self) -> usize;
}

impl<B: Buf> Source for B {
    #[inline]
    fn pull_byte(&mut self) -> Result<u8, Error> {
        at_least(self, 1)?;
        Ok(self.get_u8())
    }

    #[inline]
    fn remaining(&self) -> usize {
        Buf::remaining(self)
    }
}

/// Checks that at least `len` bytes remain in `buf`.
#[inline]
pub fn at_least<B: Buf + ?Sized>(buf: &B, len: usize) -> Result<(), Error> {
    let rem = buf.remaining();
    if rem < len {
        return Err(Error::EndOfBuffer);
    }
    Ok(())
}
