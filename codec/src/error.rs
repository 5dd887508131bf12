//! Error types for codec operations

use thiserror::Error;

/// Error type for codec operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("bit width must be non-zero")]
    ZeroWidth,
    #[error("bit width {width} exceeds the {bits}-bit type")]
    WidthExceedsType { width: u32, bits: u32 },
    #[error("{bits}-bit type exceeds the {}-bit platform word", usize::BITS)]
    WidthExceedsPlatform { bits: u32 },
    #[error("unexpected end of buffer")]
    EndOfBuffer,
    #[error("extra data found: {0} bytes")]
    ExtraData(usize),
    #[error("invalid length: {0}")]
    InvalidLength(usize),
    #[error("invalid bool: {0}")]
    InvalidBool(u8),
    #[error("invalid discriminant for {0}: {1}")]
    InvalidEnum(&'static str, u64),
    #[error("invalid data in {0}: {1}")]
    InvalidData(&'static str, String), // context, message
    #[error("no encoding policy for {0}")]
    Unresolved(&'static str),
}
