//! Fieldless enumerations, transcoded as their underlying integer representation.

use crate::{Decoder, Encoder, Error, Word};
use std::any::type_name;

/// A fieldless enumeration with an explicit integer representation.
///
/// Usually implemented through [crate::enumeration!], which also supplies the
/// [crate::Write] and [crate::Read] impls.
pub trait Enumeration: Sized {
    /// Integer type backing the discriminants.
    type Repr: Word;

    /// Returns the discriminant of `self`.
    fn to_repr(&self) -> Self::Repr;

    /// Returns the variant with discriminant `repr`, if one is declared.
    fn from_repr(repr: Self::Repr) -> Option<Self>;
}

/// Writes the discriminant of `value` at the native width of its representation.
#[inline]
pub fn write<E: Enumeration>(value: &E, enc: &mut Encoder<'_>) -> Result<(), Error> {
    enc.put_bits(value.to_repr(), <E::Repr as Word>::BITS)
}

/// Reads a discriminant into `value`, rejecting undeclared values.
#[inline]
pub fn read<E: Enumeration>(value: &mut E, dec: &mut Decoder<'_>) -> Result<(), Error> {
    let repr: E::Repr = dec.get_bits(<E::Repr as Word>::BITS)?;
    *value = E::from_repr(repr)
        .ok_or_else(|| Error::InvalidEnum(type_name::<E>(), repr.into_word() as u64))?;
    Ok(())
}

/// Declares a fieldless enumeration and its codec.
///
/// The representation must be a primitive integer type name; it becomes the `#[repr]` of
/// the enum and the width of its encoding.
///
/// # Example
///
/// ```
/// use bitlayout_codec::{deserialize, enumeration, serialize, ByteOrder};
///
/// enumeration! {
///     #[derive(Clone, Copy, Debug, Default, PartialEq)]
///     pub enum Mode: u8 {
///         #[default]
///         Idle = 0,
///         Active = 1,
///         Fault = 0x7F,
///     }
/// }
///
/// let bytes = serialize(&Mode::Fault, ByteOrder::MsbFirst).unwrap();
/// assert_eq!(&bytes[..], &[0x7F]);
/// assert_eq!(deserialize::<Mode>(&bytes, ByteOrder::MsbFirst).unwrap(), Mode::Fault);
/// ```
#[macro_export]
macro_rules! enumeration {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident: $repr:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $value:expr ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[repr($repr)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant = $value ),+
        }

        impl $crate::types::enumeration::Enumeration for $name {
            type Repr = $repr;

            #[inline]
            fn to_repr(&self) -> $repr {
                match self {
                    $( Self::$variant => Self::$variant as $repr, )+
                }
            }

            #[inline]
            fn from_repr(repr: $repr) -> ::core::option::Option<Self> {
                $(
                    if repr == Self::$variant as $repr {
                        return ::core::option::Option::Some(Self::$variant);
                    }
                )+
                ::core::option::Option::None
            }
        }

        impl $crate::Write for $name {
            const STRATEGY: $crate::Strategy = $crate::Strategy::Enumeration;

            #[inline]
            fn write(
                &self,
                enc: &mut $crate::Encoder<'_>,
            ) -> ::core::result::Result<(), $crate::Error> {
                $crate::types::enumeration::write(self, enc)
            }
        }

        impl $crate::Read for $name {
            #[inline]
            fn read(
                &mut self,
                dec: &mut $crate::Decoder<'_>,
            ) -> ::core::result::Result<(), $crate::Error> {
                $crate::types::enumeration::read(self, dec)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{deserialize, serialize, strategy_of, ByteOrder, Decode, Strategy};

    crate::enumeration! {
        #[derive(Clone, Copy, Debug, Default, PartialEq)]
        enum Level: i16 {
            Below = -2,
            #[default]
            Nominal = 0,
            Above = 300,
        }
    }

    crate::enumeration! {
        #[derive(Clone, Copy, Debug, Default, PartialEq)]
        enum Light: u8 {
            #[default]
            Off = 0,
            On = 1,
        }
    }

    #[test]
    fn test_repr_conversion() {
        assert_eq!(Level::Below.to_repr(), -2);
        assert_eq!(Level::from_repr(300), Some(Level::Above));
        assert_eq!(Level::from_repr(1), None);
    }

    #[test]
    fn test_round_trip() {
        assert_eq!(strategy_of::<Level>(), Strategy::Enumeration);
        for order in [ByteOrder::MsbFirst, ByteOrder::LsbFirst] {
            for value in [Level::Below, Level::Nominal, Level::Above] {
                let encoded = serialize(&value, order).unwrap();
                assert_eq!(encoded.len(), 2);
                assert_eq!(Level::decode(&encoded, order), Ok(value));
            }
        }
    }

    #[test]
    fn test_negative_discriminant_bytes() {
        let encoded = serialize(&Level::Below, ByteOrder::MsbFirst).unwrap();
        assert_eq!(&encoded[..], &[0xFF, 0xFE]);
    }

    #[test]
    fn test_unknown_discriminant() {
        assert_eq!(deserialize::<Light>(&[1], ByteOrder::MsbFirst), Ok(Light::On));
        let err = deserialize::<Light>(&[7], ByteOrder::MsbFirst).unwrap_err();
        assert!(matches!(err, Error::InvalidEnum(name, 7) if name.ends_with("Light")));
    }
}
