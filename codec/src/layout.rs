//! Field layouts for composite types.
//!
//! A composite type lists its fields once, in declaration order, by implementing
//! [Composite] (usually through [crate::composite!]). The resulting [Layout] records each
//! field's name, natural byte offset, size and alignment along with the codec used for it.
//! Layouts are built on first use, cached for the life of the process and shared by every
//! encode and decode of that type.
//!
//! Offsets follow the C layout rule: each field starts at the running byte cursor rounded up
//! to its alignment. For `#[repr(C)]` types they match [core::mem::offset_of!].
//!
//! # Example
//!
//! ```
//! use bitlayout_codec::{composite, layout::layout_of, serialize, ByteOrder};
//!
//! #[derive(Default)]
//! #[repr(C)]
//! struct Trio {
//!     a: u32,
//!     b: bool,
//!     c: u8,
//! }
//!
//! composite!(Trio { a, b, c });
//!
//! let layout = layout_of::<Trio>().unwrap();
//! assert_eq!(layout.len(), 3);
//! assert_eq!(layout.offsets(), vec![0, 4, 5]);
//!
//! let bytes = serialize(&Trio { a: 0x12345678, b: true, c: 0 }, ByteOrder::LsbFirst).unwrap();
//! assert_eq!(&bytes[..], &[0x78, 0x56, 0x34, 0x12, 0x01, 0x00]);
//! ```

use crate::{Decoder, Encoder, Error, Read, Write};
use std::{
    any::{type_name, Any, TypeId},
    collections::HashMap,
    fmt,
    mem::{align_of, size_of},
    sync::{OnceLock, PoisonError, RwLock},
};
use tracing::debug;

/// A type encoded field by field in declaration order.
pub trait Composite: Sized + 'static {
    /// Registers every field, in declaration order, on `layout`.
    fn describe(layout: Builder<Self>) -> Builder<Self>;

    /// Returns the cached layout of this type.
    ///
    /// [crate::composite!] overrides this with a per-type static so repeated encodes skip the
    /// shared registry.
    fn layout() -> Result<&'static Layout<Self>, Error> {
        layout_of::<Self>()
    }
}

/// Encodes and decodes one field of `T`.
trait FieldCodec<T>: Send + Sync {
    fn write(&self, value: &T, enc: &mut Encoder<'_>) -> Result<(), Error>;
    fn read(&self, value: &mut T, dec: &mut Decoder<'_>) -> Result<(), Error>;
}

struct Accessor<T, F> {
    get: fn(&T) -> &F,
    get_mut: fn(&mut T) -> &mut F,
}

impl<T, F: Write + Read> FieldCodec<T> for Accessor<T, F> {
    #[inline]
    fn write(&self, value: &T, enc: &mut Encoder<'_>) -> Result<(), Error> {
        enc.put((self.get)(value))
    }

    #[inline]
    fn read(&self, value: &mut T, dec: &mut Decoder<'_>) -> Result<(), Error> {
        dec.get((self.get_mut)(value))
    }
}

/// One registered field of a composite.
pub struct Field<T> {
    name: &'static str,
    offset: usize,
    size: usize,
    align: usize,
    codec: Box<dyn FieldCodec<T>>,
}

impl<T> Field<T> {
    /// Returns the field name given at registration.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the natural byte offset of the field.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the in-memory size of the field type.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the alignment of the field type.
    pub fn align(&self) -> usize {
        self.align
    }
}

impl<T> fmt::Debug for Field<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("offset", &self.offset)
            .field("size", &self.size)
            .field("align", &self.align)
            .finish()
    }
}

/// Collects the fields of a composite, assigning natural offsets.
pub struct Builder<T> {
    fields: Vec<Field<T>>,
    cursor: usize,
    align: usize,
}

impl<T: 'static> Builder<T> {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self {
            fields: Vec::new(),
            cursor: 0,
            align: 1,
        }
    }

    /// Registers the next field, reached through `get` and `get_mut`.
    pub fn field<F: Write + Read + 'static>(
        mut self,
        name: &'static str,
        get: fn(&T) -> &F,
        get_mut: fn(&mut T) -> &mut F,
    ) -> Self {
        let size = size_of::<F>();
        let align = align_of::<F>();
        let offset = self.cursor.next_multiple_of(align);
        self.cursor = offset + size;
        self.align = self.align.max(align);
        self.fields.push(Field {
            name,
            offset,
            size,
            align,
            codec: Box::new(Accessor { get, get_mut }),
        });
        self
    }

    /// Finalizes the layout.
    pub fn build(self) -> Layout<T> {
        Layout {
            size: self.cursor.next_multiple_of(self.align),
            align: self.align,
            fields: self.fields,
        }
    }
}

impl<T: 'static> Default for Builder<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// The ordered fields of a composite type.
pub struct Layout<T> {
    fields: Vec<Field<T>>,
    size: usize,
    align: usize,
}

impl<T> Layout<T> {
    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if no field was registered.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the fields in declaration order.
    pub fn fields(&self) -> &[Field<T>] {
        &self.fields
    }

    /// Returns the natural byte offset of every field.
    pub fn offsets(&self) -> Vec<usize> {
        self.fields.iter().map(Field::offset).collect()
    }

    /// Returns the natural size of the composite, including trailing padding.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the largest field alignment.
    pub fn align(&self) -> usize {
        self.align
    }

    /// Encodes every field of `value` in order.
    pub fn write(&self, value: &T, enc: &mut Encoder<'_>) -> Result<(), Error> {
        for field in &self.fields {
            field.codec.write(value, enc)?;
        }
        Ok(())
    }

    /// Decodes every field of `value` in order.
    pub fn read(&self, value: &mut T, dec: &mut Decoder<'_>) -> Result<(), Error> {
        for field in &self.fields {
            field.codec.read(value, dec)?;
        }
        Ok(())
    }
}

impl<T> fmt::Debug for Layout<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Layout")
            .field("fields", &self.fields)
            .field("size", &self.size)
            .field("align", &self.align)
            .finish()
    }
}

type Registry = RwLock<HashMap<TypeId, &'static (dyn Any + Send + Sync)>>;

static REGISTRY: OnceLock<Registry> = OnceLock::new();

/// Returns the cached layout of `T`, building it on first use.
///
/// Concurrent first uses may each describe the type, but only one layout is published and
/// every caller observes that same instance. Fails with [Error::Unresolved] if `T` registers
/// no fields.
pub fn layout_of<T: Composite>() -> Result<&'static Layout<T>, Error> {
    let registry = REGISTRY.get_or_init(Default::default);
    let id = TypeId::of::<T>();

    let cached = registry
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&id)
        .copied();
    let entry = match cached {
        Some(entry) => entry,
        None => {
            let layout = T::describe(Builder::new()).build();
            let mut map = registry.write().unwrap_or_else(PoisonError::into_inner);
            *map.entry(id).or_insert_with(|| {
                debug!(
                    composite = type_name::<T>(),
                    fields = layout.len(),
                    size = layout.size(),
                    "registered layout"
                );
                let leaked: &'static (dyn Any + Send + Sync) = Box::leak(Box::new(layout));
                leaked
            })
        }
    };

    let layout = entry
        .downcast_ref::<Layout<T>>()
        .ok_or(Error::Unresolved(type_name::<T>()))?;
    if layout.is_empty() {
        return Err(Error::Unresolved(type_name::<T>()));
    }
    Ok(layout)
}

/// Encodes `value` field by field using its cached layout.
#[inline]
pub fn write<T: Composite>(value: &T, enc: &mut Encoder<'_>) -> Result<(), Error> {
    T::layout()?.write(value, enc)
}

/// Decodes into `value` field by field using its cached layout.
#[inline]
pub fn read<T: Composite>(value: &mut T, dec: &mut Decoder<'_>) -> Result<(), Error> {
    T::layout()?.read(value, dec)
}

/// Declares the fields of a struct, in declaration order, and derives its codec.
///
/// Named fields are listed by name and tuple-struct fields by index. At least one field is
/// required.
///
/// ```
/// use bitlayout_codec::{composite, deserialize, serialize, Bits, ByteOrder, Spare};
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Flags {
///     spare: Spare<4>,
///     a: Bits<u8, 2>,
///     b: Bits<u8, 2>,
/// }
///
/// composite!(Flags { spare, a, b });
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Pair(u8, Flags);
///
/// composite!(Pair { 0, 1 });
///
/// let value = Pair(7, Flags { spare: Spare::new(), a: Bits::new(1), b: Bits::new(2) });
/// let bytes = serialize(&value, ByteOrder::LsbFirst).unwrap();
/// assert_eq!(&bytes[..], &[7, 0b1001_0000]);
/// assert_eq!(deserialize::<Pair>(&bytes, ByteOrder::LsbFirst).unwrap(), value);
/// ```
#[macro_export]
macro_rules! composite {
    ($type:ty { $($field:tt),+ $(,)? }) => {
        impl $crate::layout::Composite for $type {
            fn describe(
                layout: $crate::layout::Builder<Self>,
            ) -> $crate::layout::Builder<Self> {
                layout
                    $( .field(
                        ::core::stringify!($field),
                        |value| &value.$field,
                        |value| &mut value.$field,
                    ) )+
            }

            fn layout() -> ::core::result::Result<
                &'static $crate::layout::Layout<Self>,
                $crate::Error,
            > {
                static LAYOUT: ::std::sync::OnceLock<&'static $crate::layout::Layout<$type>> =
                    ::std::sync::OnceLock::new();
                if let ::core::option::Option::Some(layout) = LAYOUT.get() {
                    return ::core::result::Result::Ok(*layout);
                }
                let layout = $crate::layout::layout_of::<Self>()?;
                ::core::result::Result::Ok(*LAYOUT.get_or_init(|| layout))
            }
        }

        impl $crate::Write for $type {
            const STRATEGY: $crate::Strategy = $crate::Strategy::Composite;

            #[inline]
            fn write(
                &self,
                enc: &mut $crate::Encoder<'_>,
            ) -> ::core::result::Result<(), $crate::Error> {
                $crate::layout::write(self, enc)
            }
        }

        impl $crate::Read for $type {
            #[inline]
            fn read(
                &mut self,
                dec: &mut $crate::Decoder<'_>,
            ) -> ::core::result::Result<(), $crate::Error> {
                $crate::layout::read(self, dec)
            }
        }
    };
}
