//! Bit-level transcoding between integers and bytes.
//!
//! An [Encoder] packs values of any width from 1 to `usize::BITS` into a [Sink], carrying a
//! partially filled byte across calls. A [Decoder] performs the inverse over a [Source],
//! pulling a new byte only when the current one has been fully consumed.
//!
//! # Bit placement
//!
//! With [ByteOrder::MsbFirst], the bits of a value leave from most to least significant and
//! fill each byte from bit 7 downwards. With [ByteOrder::LsbFirst], they leave from least to
//! most significant and fill each byte from bit 0 upwards. Fields therefore pack back-to-back
//! with no gaps in either order:
//!
//! ```
//! use bitlayout_codec::{ByteOrder, Encoder};
//!
//! let mut out: Vec<u8> = Vec::new();
//! let mut enc = Encoder::new(&mut out, ByteOrder::LsbFirst);
//! enc.put_bits(0u8, 4).unwrap();
//! enc.put_bits(1u8, 2).unwrap();
//! enc.put_bits(2u8, 2).unwrap();
//! enc.flush();
//! drop(enc);
//! assert_eq!(out, vec![0b1001_0000]);
//! ```

use crate::{
    buffer::{Sink, Source},
    ByteOrder, Config, Error, Read, Write,
};
use tracing::trace;

const BYTE_BITS: u32 = u8::BITS;

/// An integer type that can be moved through the transcoder.
///
/// Values travel as a platform word (`usize`): [Word::into_word] exposes the two's-complement
/// bit pattern and [Word::from_word] truncates a word back to the type.
pub trait Word: Copy + Default {
    /// Native width of the type in bits.
    const BITS: u32;

    /// Whether decoded values are sign-extended from their top transferred bit.
    const SIGNED: bool;

    /// Returns the bit pattern of `self` (upper bits are ignored by the transcoder).
    fn into_word(self) -> usize;

    /// Truncates `word` to this type.
    fn from_word(word: usize) -> Self;
}

macro_rules! impl_word {
    ($signed:literal, $($type:ty),*) => {
        $(
            impl Word for $type {
                const BITS: u32 = <$type>::BITS;
                const SIGNED: bool = $signed;

                #[inline]
                fn into_word(self) -> usize {
                    self as usize
                }

                #[inline]
                fn from_word(word: usize) -> Self {
                    word as $type
                }
            }
        )*
    };
}

impl_word!(false, u8, u16, u32, u64, u128, usize);
impl_word!(true, i8, i16, i32, i64, i128, isize);

/// Validates a transfer of `width` bits into or out of a type of `bits` bits.
#[inline]
fn check_width(width: u32, bits: u32) -> Result<(), Error> {
    if width > bits {
        return Err(Error::WidthExceedsType { width, bits });
    }
    if bits > usize::BITS {
        return Err(Error::WidthExceedsPlatform { bits });
    }
    if width == 0 {
        return Err(Error::ZeroWidth);
    }
    Ok(())
}

/// Packs values into a [Sink].
///
/// Bits that do not yet fill a byte stay in an accumulator until more bits arrive or
/// [Encoder::flush] is called. Dropping an encoder without flushing discards them.
pub struct Encoder<'a> {
    sink: &'a mut dyn Sink,
    config: Config,
    byte: u8,
    filled: u32,
    written: u64,
}

impl<'a> Encoder<'a> {
    /// Creates an encoder writing to `sink` in the given order.
    pub fn new(sink: &'a mut dyn Sink, order: ByteOrder) -> Self {
        Self::with_config(sink, Config::new(order))
    }

    /// Creates an encoder writing to `sink` with the given configuration.
    pub fn with_config(sink: &'a mut dyn Sink, config: Config) -> Self {
        Self {
            sink,
            config,
            byte: 0,
            filled: 0,
            written: 0,
        }
    }

    /// Returns the byte order applied to every value.
    pub fn order(&self) -> ByteOrder {
        self.config.order
    }

    /// Returns the configuration of this encoder.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the number of bits accepted so far, including those not yet flushed.
    pub fn bits_written(&self) -> u64 {
        self.written
    }

    /// Encodes `value` with the policy resolved for its type.
    #[inline]
    pub fn put<T: Write + ?Sized>(&mut self, value: &T) -> Result<(), Error> {
        value.write(self)
    }

    /// Appends the low `width` bits of `value`.
    ///
    /// Fails if `width` is zero, exceeds the width of `T`, or `T` is wider than a `usize`.
    #[inline]
    pub fn put_bits<T: Word>(&mut self, value: T, width: u32) -> Result<(), Error> {
        check_width(width, T::BITS)?;
        self.put_word(value.into_word(), width);
        Ok(())
    }

    /// Appends the low `width` bits of `word`. `width` must be in `1..=usize::BITS`.
    pub(crate) fn put_word(&mut self, word: usize, width: u32) {
        debug_assert!(width >= 1 && width <= usize::BITS);
        self.written += u64::from(width);

        // Move whole bytes when the cursor sits on a byte boundary
        if self.filled == 0 && width % BYTE_BITS == 0 {
            let count = width / BYTE_BITS;
            match self.config.order {
                ByteOrder::MsbFirst => {
                    for i in (0..count).rev() {
                        self.sink.put_byte((word >> (i * BYTE_BITS)) as u8);
                    }
                }
                ByteOrder::LsbFirst => {
                    for i in 0..count {
                        self.sink.put_byte((word >> (i * BYTE_BITS)) as u8);
                    }
                }
            }
            return;
        }

        match self.config.order {
            ByteOrder::MsbFirst => {
                for i in (0..width).rev() {
                    self.put_bit((word >> i) as u8 & 1);
                }
            }
            ByteOrder::LsbFirst => {
                for i in 0..width {
                    self.put_bit((word >> i) as u8 & 1);
                }
            }
        }
    }

    #[inline]
    fn put_bit(&mut self, bit: u8) {
        let position = match self.config.order {
            ByteOrder::MsbFirst => BYTE_BITS - 1 - self.filled,
            ByteOrder::LsbFirst => self.filled,
        };
        self.byte |= bit << position;
        self.filled += 1;
        if self.filled == BYTE_BITS {
            self.sink.put_byte(self.byte);
            self.byte = 0;
            self.filled = 0;
        }
    }

    /// Emits a partially filled byte, leaving unwritten positions zero.
    ///
    /// Does nothing when no bits are pending, so repeated calls are harmless.
    pub fn flush(&mut self) {
        if self.filled == 0 {
            return;
        }
        trace!(pending = self.filled, "flushed partial byte");
        self.sink.put_byte(self.byte);
        self.byte = 0;
        self.filled = 0;
    }
}

/// Unpacks values from a [Source].
pub struct Decoder<'a> {
    source: &'a mut dyn Source,
    config: Config,
    byte: u8,
    unread: u32,
    read: u64,
}

impl<'a> Decoder<'a> {
    /// Creates a decoder reading from `source` in the given order.
    pub fn new(source: &'a mut dyn Source, order: ByteOrder) -> Self {
        Self::with_config(source, Config::new(order))
    }

    /// Creates a decoder reading from `source` with the given configuration.
    pub fn with_config(source: &'a mut dyn Source, config: Config) -> Self {
        Self {
            source,
            config,
            byte: 0,
            unread: 0,
            read: 0,
        }
    }

    /// Returns the byte order applied to every value.
    pub fn order(&self) -> ByteOrder {
        self.config.order
    }

    /// Returns the configuration of this decoder.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the number of bits consumed so far.
    pub fn bits_read(&self) -> u64 {
        self.read
    }

    /// Returns the number of bits left, counting the unread part of the current byte.
    pub fn remaining_bits(&self) -> usize {
        self.source.remaining() * BYTE_BITS as usize + self.unread as usize
    }

    /// Returns the number of whole bytes not yet pulled from the source.
    pub fn remaining_bytes(&self) -> usize {
        self.source.remaining()
    }

    /// Decodes into `value` with the policy resolved for its type.
    #[inline]
    pub fn get<T: Read + ?Sized>(&mut self, value: &mut T) -> Result<(), Error> {
        value.read(self)
    }

    /// Removes `width` bits and returns them as a `T`.
    ///
    /// Signed types are sign-extended from the top transferred bit, so a 5-bit `10000`
    /// read as `i8` yields `-16`.
    #[inline]
    pub fn get_bits<T: Word>(&mut self, width: u32) -> Result<T, Error> {
        check_width(width, T::BITS)?;
        let word = self.get_word(width, T::SIGNED)?;
        Ok(T::from_word(word))
    }

    /// Removes `width` bits, right-aligned in the returned word.
    ///
    /// When `sign_extend` is set and the top transferred bit is 1, every bit above `width`
    /// is set in the result. Widths beyond a `usize` fail with [Error::WidthExceedsPlatform].
    pub fn get_word(&mut self, width: u32, sign_extend: bool) -> Result<usize, Error> {
        if width > usize::BITS {
            return Err(Error::WidthExceedsPlatform { bits: width });
        }
        check_width(width, usize::BITS)?;

        // Marks the bits above those transferred; shifts in lockstep with the data
        let mut mask = usize::MAX;
        let mut data = 0usize;

        if self.unread == 0 && width % BYTE_BITS == 0 {
            for i in 0..width / BYTE_BITS {
                let byte = self.source.pull_byte()? as usize;
                match self.config.order {
                    ByteOrder::MsbFirst => data = (data << BYTE_BITS) | byte,
                    ByteOrder::LsbFirst => data |= byte << (i * BYTE_BITS),
                }
                mask <<= BYTE_BITS;
                self.read += u64::from(BYTE_BITS);
            }
        } else {
            for i in 0..width {
                let bit = self.get_bit()? as usize;
                match self.config.order {
                    ByteOrder::MsbFirst => data = (data << 1) | bit,
                    ByteOrder::LsbFirst => data |= bit << i,
                }
                mask <<= 1;
            }
        }

        if sign_extend && (data >> (width - 1)) & 1 == 1 {
            data |= mask;
        }
        Ok(data)
    }

    #[inline]
    fn get_bit(&mut self) -> Result<u8, Error> {
        if self.unread == 0 {
            self.byte = self.source.pull_byte()?;
            self.unread = BYTE_BITS;
        }
        let position = match self.config.order {
            ByteOrder::MsbFirst => self.unread - 1,
            ByteOrder::LsbFirst => BYTE_BITS - self.unread,
        };
        self.unread -= 1;
        self.read += 1;
        Ok((self.byte >> position) & 1)
    }
}
