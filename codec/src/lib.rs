//! Serialize structured data at bit granularity.
//!
//! # Overview
//!
//! A binary serialization library that maps in-memory values to a compact bit stream and back:
//! - Fields pack back-to-back with no gaps, in either [ByteOrder]
//! - Explicitly sized fields ([Bits]) and padding ([Spare]) occupy exactly their declared width
//! - Decoding writes into an existing value, in declaration order
//!
//! # Supported Types
//!
//! Natively supports:
//! - Primitives: `u8`, `u16`, `u32`, `u64`, `usize`, `i8`, `i16`, `i32`, `i64`, `isize`, `f32`,
//!   `f64`, `bool`
//! - Resizable collections: `Vec<T>`, `VecDeque<T>`, `String` and [bytes::Bytes], prefixed with
//!   their element count as a `usize`
//! - Fixed-arity collections: `[T; N]`, with no prefix
//! - Tuples and structs declared with [composite!], field by field
//! - Fieldless enums declared with [enumeration!], through their integer representation
//!
//! Any other type can take part by implementing [Write] and [Read] directly.
//!
//! # Example
//!
//! ```
//! use bitlayout_codec::{composite, enumeration, Bits, ByteOrder, Decode, Encode, Spare};
//!
//! enumeration! {
//!     #[derive(Debug, Default, PartialEq)]
//!     pub enum Mode: u8 {
//!         #[default]
//!         Idle = 0,
//!         Active = 3,
//!     }
//! }
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Header {
//!     version: Bits<u8, 3>,
//!     reserved: Spare<5>,
//!     mode: Mode,
//!     payload: Vec<u16>,
//! }
//!
//! composite!(Header { version, reserved, mode, payload });
//!
//! let header = Header {
//!     version: Bits::new(5),
//!     reserved: Spare::new(),
//!     mode: Mode::Active,
//!     payload: vec![0x0102],
//! };
//!
//! let encoded = header.encode(ByteOrder::MsbFirst).unwrap();
//! assert_eq!(encoded.len(), 1 + 1 + std::mem::size_of::<usize>() + 2);
//! assert_eq!(encoded[0], 0b1010_0000);
//!
//! let decoded = Header::decode(&encoded, ByteOrder::MsbFirst).unwrap();
//! assert_eq!(header, decoded);
//! ```

pub mod buffer;
pub mod codec;
pub mod config;
pub mod error;
pub mod layout;
pub mod stream;
pub mod types;

// Re-export main types and traits
pub use buffer::{Sink, Source};
pub use codec::{
    align, aligned, deserialize, deserialize_into, deserialize_into_with, deserialize_with,
    read_from, serialize, serialize_with, strategy_of, write_to, Codec, Decode, Encode, Read,
    ReadExt, Strategy, Write,
};
pub use config::{ByteOrder, Config, RangeCfg};
pub use error::Error;
pub use layout::{Builder, Composite, Layout};
pub use stream::{Decoder, Encoder, Word};
pub use types::{bits::Bits, bits::Spare, enumeration::Enumeration};
