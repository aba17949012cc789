// src/header/field.rs
use crate::error::{Result, SegyError};
use byteorder::{BigEndian, ByteOrder};
use std::ops::RangeInclusive;

/// Location and meaning of one named integer field inside a fixed header block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Field name as used by [`get`](crate::TraceHeader::get) / `set`
    pub name: &'static str,
    /// Byte offset from the start of the header block
    pub offset: usize,
    /// Width in bytes (2 or 4)
    pub width: usize,
    pub description: &'static str,
}

impl FieldSpec {
    /// 1-based inclusive byte positions, the way SEG-Y documents them
    pub fn byte_range(&self) -> RangeInclusive<usize> {
        self.offset + 1..=self.offset + self.width
    }
}

/// Big-endian signed integer stored in a header field
pub trait HeaderInt: Copy + Into<i64> {
    const WIDTH: usize;

    fn read(bytes: &[u8]) -> Self;

    fn write(self, bytes: &mut [u8]);

    /// Narrow an edited value to the field width, rejecting overflow
    fn narrow(field: &str, value: i64) -> Result<Self>;
}

impl HeaderInt for i16 {
    const WIDTH: usize = 2;

    #[inline]
    fn read(bytes: &[u8]) -> Self {
        BigEndian::read_i16(bytes)
    }

    #[inline]
    fn write(self, bytes: &mut [u8]) {
        BigEndian::write_i16(bytes, self)
    }

    fn narrow(field: &str, value: i64) -> Result<Self> {
        i16::try_from(value).map_err(|_| SegyError::FieldOutOfRange {
            field: field.to_string(),
            value,
        })
    }
}

impl HeaderInt for i32 {
    const WIDTH: usize = 4;

    #[inline]
    fn read(bytes: &[u8]) -> Self {
        BigEndian::read_i32(bytes)
    }

    #[inline]
    fn write(self, bytes: &mut [u8]) {
        BigEndian::write_i32(bytes, self)
    }

    fn narrow(field: &str, value: i64) -> Result<Self> {
        i32::try_from(value).map_err(|_| SegyError::FieldOutOfRange {
            field: field.to_string(),
            value,
        })
    }
}

/// Declares a fixed-size header record: the struct, its field table and a
/// codec that keeps bytes outside the named fields intact.
macro_rules! header_record {
    (
        $(#[$meta:meta])*
        pub struct $name:ident [$size:expr] {
            $( $field:ident : $ty:ident @ $offset:literal => $key:literal, $desc:literal; )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone)]
        pub struct $name {
            $( pub $field: $ty, )*
            raw: [u8; $size],
        }

        impl $name {
            /// Encoded size in bytes
            pub const SIZE: usize = $size;

            /// Named fields in byte order
            pub const FIELDS: &'static [$crate::header::FieldSpec] = &[
                $(
                    $crate::header::FieldSpec {
                        name: $key,
                        offset: $offset,
                        width: <$ty as $crate::header::HeaderInt>::WIDTH,
                        description: $desc,
                    },
                )*
            ];

            /// Decode from the first `SIZE` bytes of `bytes`
            pub fn decode(bytes: &[u8]) -> $crate::error::Result<Self> {
                let block = bytes.get(..$size).ok_or_else(|| {
                    $crate::error::SegyError::MalformedHeader(format!(
                        "{} needs {} bytes, found {}",
                        stringify!($name),
                        $size,
                        bytes.len()
                    ))
                })?;

                let mut raw = [0u8; $size];
                raw.copy_from_slice(block);

                Ok($name {
                    $(
                        $field: <$ty as $crate::header::HeaderInt>::read(
                            &raw[$offset..$offset + <$ty as $crate::header::HeaderInt>::WIDTH],
                        ),
                    )*
                    raw,
                })
            }

            /// Encode to a `SIZE`-byte block; unnamed bytes come from the decoded source
            pub fn encode(&self) -> [u8; $size] {
                let mut out = self.raw;
                $(
                    <$ty as $crate::header::HeaderInt>::write(
                        self.$field,
                        &mut out[$offset..$offset + <$ty as $crate::header::HeaderInt>::WIDTH],
                    );
                )*
                out
            }

            /// Read a field by name
            pub fn get(&self, name: &str) -> Option<i64> {
                match name {
                    $( $key => Some(self.$field.into()), )*
                    _ => None,
                }
            }

            /// Set a field by name; the value must fit the field width
            pub fn set(&mut self, name: &str, value: i64) -> $crate::error::Result<()> {
                match name {
                    $(
                        $key => {
                            self.$field = <$ty as $crate::header::HeaderInt>::narrow(name, value)?;
                            Ok(())
                        }
                    )*
                    _ => Err($crate::error::SegyError::FieldNotFound(name.to_string())),
                }
            }

            /// Field specs paired with their current values
            pub fn iter(&self) -> impl Iterator<Item = (&'static $crate::header::FieldSpec, i64)> + '_ {
                Self::FIELDS
                    .iter()
                    .map(move |spec| (spec, self.get(spec.name).unwrap_or_default()))
            }

            pub fn field_spec(name: &str) -> Option<&'static $crate::header::FieldSpec> {
                Self::FIELDS.iter().find(|spec| spec.name == name)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name {
                    $( $field: 0, )*
                    raw: [0u8; $size],
                }
            }
        }

        // equality is on the encoded bytes, so stale raw bytes under a field never matter
        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.encode()[..] == other.encode()[..]
            }
        }

        impl Eq for $name {}

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_struct(stringify!($name))
                    $( .field(stringify!($field), &self.$field) )*
                    .finish_non_exhaustive()
            }
        }
    };
}

pub(crate) use header_record;
