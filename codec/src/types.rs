//! Encoding policies for common types.
//!
//! Each module implements [crate::Write] and [crate::Read] for one family of types:
//!
//! - [primitives]: integers and `bool` at their native width
//! - [enumeration]: fieldless enums through their integer representation
//! - [float]: `f32` and `f64` through their bit pattern
//! - [vec] and [bytes]: resizable collections with an element count prefix
//! - [array]: fixed-arity arrays
//! - [tuple]: tuples, field by field
//! - [bits]: explicitly sized fields and padding

pub mod array;
pub mod bits;
pub mod bytes;
pub mod enumeration;
pub mod float;
pub mod primitives;
pub mod tuple;
pub mod vec;
