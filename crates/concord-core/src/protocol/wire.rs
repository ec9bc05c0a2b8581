//! Primitive codec (panic-free).
//!
//! Every encoder appends an exact-length encoding to a `BytesMut`. Every
//! decoder takes `(buf, offset)` and returns `(value, next_offset)`, touching
//! only the bytes it owns.
//!
//! Parsing rules:
//! - Never index (`buf[i]`); borrow through [`take`], which bounds-checks.
//! - Never `unwrap()` / `expect()` / `panic!()` in production paths.
//! - Never truncate on encode; a value that does not fit is `Malformed`.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::{ConcordError, Result};

/// Width of every length prefix and collection count.
pub const LEN_PREFIX: usize = 8;

/// Types with a Concord wire encoding.
pub trait Encode {
    /// Append the encoding of `self` to `out`.
    fn encode(&self, out: &mut BytesMut) -> Result<()>;
}

/// Types that can be read back from a Concord wire encoding.
pub trait Decode: Sized {
    /// Decode a value starting at `offset`; returns the value and the offset
    /// of the first byte after it.
    fn decode(buf: &[u8], offset: usize) -> Result<(Self, usize)>;
}

/// Encode a single value into a fresh buffer.
pub fn to_bytes<T: Encode + ?Sized>(value: &T) -> Result<Bytes> {
    let mut out = BytesMut::new();
    value.encode(&mut out)?;
    Ok(out.freeze())
}

/// Decode a single value from the start of `buf`.
pub fn from_bytes<T: Decode>(buf: &[u8]) -> Result<(T, usize)> {
    T::decode(buf, 0)
}

/// Borrow exactly `len` bytes at `offset`.
pub fn take(buf: &[u8], offset: usize, len: usize) -> Result<(&[u8], usize)> {
    let end = offset
        .checked_add(len)
        .ok_or_else(|| ConcordError::Malformed(format!("length {len} at offset {offset} overflows")))?;

    match buf.get(offset..end) {
        Some(bytes) => Ok((bytes, end)),
        None => Err(ConcordError::OutOfBounds {
            offset,
            needed: len,
            available: buf.len().saturating_sub(offset),
        }),
    }
}

fn check_width(width: usize) -> Result<()> {
    if width == 0 || width > 16 {
        return Err(ConcordError::Malformed(format!(
            "unsupported integer width {width}"
        )));
    }
    Ok(())
}

/// Write `value` as a big-endian unsigned integer of exactly `width` bytes.
///
/// Unused leading bytes are zero. A value wider than `width` is rejected.
pub fn put_uint(out: &mut BytesMut, value: u128, width: usize) -> Result<()> {
    check_width(width)?;
    if width < 16 && value >> (8 * width) != 0 {
        return Err(ConcordError::Malformed(format!(
            "value {value} does not fit in {width} bytes"
        )));
    }

    let be = value.to_be_bytes();
    let tail = be
        .get(16 - width..)
        .ok_or_else(|| ConcordError::Internal("integer width out of range".into()))?;
    out.put_slice(tail);
    Ok(())
}

/// Read a big-endian unsigned integer of exactly `width` bytes.
pub fn get_uint(buf: &[u8], offset: usize, width: usize) -> Result<(u128, usize)> {
    check_width(width)?;
    let (bytes, next) = take(buf, offset, width)?;
    let value = bytes
        .iter()
        .fold(0u128, |acc, b| (acc << 8) | u128::from(*b));
    Ok((value, next))
}

/// Write a length prefix or collection count.
pub fn put_len(out: &mut BytesMut, len: usize) -> Result<()> {
    let len = u64::try_from(len)
        .map_err(|_| ConcordError::Malformed(format!("length {len} exceeds u64")))?;
    out.put_u64(len);
    Ok(())
}

/// Read a length prefix or collection count.
pub fn get_len(buf: &[u8], offset: usize) -> Result<(usize, usize)> {
    let (len, next) = u64::decode(buf, offset)?;
    let len = usize::try_from(len)
        .map_err(|_| ConcordError::Malformed(format!("length {len} exceeds address space")))?;
    Ok((len, next))
}

/// Write an 8-byte length followed by the raw bytes.
pub fn put_prefixed(out: &mut BytesMut, bytes: &[u8]) -> Result<()> {
    put_len(out, bytes.len())?;
    out.put_slice(bytes);
    Ok(())
}

/// Borrow a length-prefixed byte run.
pub fn get_prefixed(buf: &[u8], offset: usize) -> Result<(&[u8], usize)> {
    let (len, start) = get_len(buf, offset)?;
    take(buf, start, len)
}

/// Read a single tag byte and report whether it marks presence.
pub fn get_flag(buf: &[u8], offset: usize) -> Result<(bool, usize)> {
    let (tag, next) = u8::decode(buf, offset)?;
    Ok((tag != 0, next))
}

macro_rules! impl_fixed_uint {
    ($ty:ty, $width:expr, $put:ident, $get:ident) => {
        impl Encode for $ty {
            fn encode(&self, out: &mut BytesMut) -> Result<()> {
                out.$put(*self);
                Ok(())
            }
        }

        impl Decode for $ty {
            fn decode(buf: &[u8], offset: usize) -> Result<(Self, usize)> {
                let (mut bytes, next) = take(buf, offset, $width)?;
                Ok((bytes.$get(), next))
            }
        }
    };
}

impl_fixed_uint!(u8, 1, put_u8, get_u8);
impl_fixed_uint!(u16, 2, put_u16, get_u16);
impl_fixed_uint!(u32, 4, put_u32, get_u32);
impl_fixed_uint!(u64, 8, put_u64, get_u64);
impl_fixed_uint!(u128, 16, put_u128, get_u128);

impl Encode for bool {
    fn encode(&self, out: &mut BytesMut) -> Result<()> {
        out.put_u8(u8::from(*self));
        Ok(())
    }
}

impl Decode for bool {
    fn decode(buf: &[u8], offset: usize) -> Result<(Self, usize)> {
        get_flag(buf, offset)
    }
}

/// UTF-8 text: 8-byte length then the bytes.
impl Encode for String {
    fn encode(&self, out: &mut BytesMut) -> Result<()> {
        put_prefixed(out, self.as_bytes())
    }
}

impl Decode for String {
    fn decode(buf: &[u8], offset: usize) -> Result<(Self, usize)> {
        let (bytes, next) = get_prefixed(buf, offset)?;
        let s = std::str::from_utf8(bytes)
            .map_err(|e| ConcordError::Malformed(format!("invalid utf-8 at offset {offset}: {e}")))?;
        Ok((s.to_owned(), next))
    }
}

/// Fixed-size opaque bytes, no prefix.
impl<const N: usize> Encode for [u8; N] {
    fn encode(&self, out: &mut BytesMut) -> Result<()> {
        out.put_slice(self);
        Ok(())
    }
}

impl<const N: usize> Decode for [u8; N] {
    fn decode(buf: &[u8], offset: usize) -> Result<(Self, usize)> {
        let (bytes, next) = take(buf, offset, N)?;
        let mut data = [0u8; N];
        data.copy_from_slice(bytes);
        Ok((data, next))
    }
}

/// One tag byte, then the value only if present.
impl<T: Encode> Encode for Option<T> {
    fn encode(&self, out: &mut BytesMut) -> Result<()> {
        match self {
            Some(value) => {
                out.put_u8(1);
                value.encode(out)
            }
            None => {
                out.put_u8(0);
                Ok(())
            }
        }
    }
}

impl<T: Decode> Decode for Option<T> {
    fn decode(buf: &[u8], offset: usize) -> Result<(Self, usize)> {
        match get_flag(buf, offset)? {
            (false, next) => Ok((None, next)),
            (true, next) => {
                let (value, next) = T::decode(buf, next)?;
                Ok((Some(value), next))
            }
        }
    }
}

/// Counted collection: 8-byte count then each element.
impl<T: Encode> Encode for Vec<T> {
    fn encode(&self, out: &mut BytesMut) -> Result<()> {
        put_len(out, self.len())?;
        for item in self {
            item.encode(out)?;
        }
        Ok(())
    }
}

impl<T: Decode> Decode for Vec<T> {
    fn decode(buf: &[u8], offset: usize) -> Result<(Self, usize)> {
        let (count, mut next) = get_len(buf, offset)?;
        let remaining = buf.len().saturating_sub(next);
        let mut items = Vec::with_capacity(prealloc_capacity::<T>(count, remaining));
        for _ in 0..count {
            let (item, after) = T::decode(buf, next)?;
            items.push(item);
            next = after;
        }
        Ok((items, next))
    }
}

/// Capacity to reserve for a decoded collection.
///
/// Never trusts `count`: the reservation is bounded so that its memory does
/// not exceed the bytes left in the frame.
pub(crate) fn prealloc_capacity<T>(count: usize, remaining: usize) -> usize {
    count.min(remaining / std::mem::size_of::<T>().max(1))
}

impl<A: Encode, B: Encode> Encode for (A, B) {
    fn encode(&self, out: &mut BytesMut) -> Result<()> {
        self.0.encode(out)?;
        self.1.encode(out)
    }
}

impl<A: Decode, B: Decode> Decode for (A, B) {
    fn decode(buf: &[u8], offset: usize) -> Result<(Self, usize)> {
        let (a, next) = A::decode(buf, offset)?;
        let (b, next) = B::decode(buf, next)?;
        Ok(((a, b), next))
    }
}

/// Implement `Encode` + `Decode` for a struct as the concatenation of its
/// fields, in the listed order.
macro_rules! wire_struct {
    ($ty:ident { $($field:ident),* $(,)? }) => {
        impl $crate::protocol::wire::Encode for $ty {
            #[allow(unused_variables)]
            fn encode(&self, out: &mut ::bytes::BytesMut) -> $crate::error::Result<()> {
                $( $crate::protocol::wire::Encode::encode(&self.$field, out)?; )*
                Ok(())
            }
        }

        impl $crate::protocol::wire::Decode for $ty {
            #[allow(unused_variables)]
            fn decode(buf: &[u8], offset: usize) -> $crate::error::Result<(Self, usize)> {
                $( let ($field, offset) = $crate::protocol::wire::Decode::decode(buf, offset)?; )*
                Ok((Self { $($field),* }, offset))
            }
        }
    };
}

pub(crate) use wire_struct;
