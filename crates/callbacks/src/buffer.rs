//! Little-endian reads at fixed offsets.
//!
//! Callers check the buffer length against the shape size before reading;
//! a read past the end yields zero bytes instead of panicking.

use crate::shape::Primitive;
use crate::value::FieldValue;

/// A borrowed result buffer.
#[derive(Debug, Clone, Copy)]
pub struct Reader<'a> {
    buf: &'a [u8],
}

impl<'a> Reader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    fn array<const N: usize>(&self, offset: usize) -> [u8; N] {
        offset
            .checked_add(N)
            .and_then(|end| self.buf.get(offset..end))
            .and_then(|bytes| bytes.try_into().ok())
            .unwrap_or([0; N])
    }

    fn slice(&self, offset: usize, len: usize) -> &'a [u8] {
        let end = offset.saturating_add(len).min(self.buf.len());
        self.buf.get(offset..end).unwrap_or(&[])
    }

    pub fn u8(&self, offset: usize) -> u8 {
        self.array::<1>(offset)[0]
    }

    /// C++ `bool`: any non-zero byte is true.
    pub fn bool(&self, offset: usize) -> bool {
        self.u8(offset) != 0
    }

    pub fn i32(&self, offset: usize) -> i32 {
        i32::from_le_bytes(self.array(offset))
    }

    pub fn u32(&self, offset: usize) -> u32 {
        u32::from_le_bytes(self.array(offset))
    }

    pub fn i64(&self, offset: usize) -> i64 {
        i64::from_le_bytes(self.array(offset))
    }

    pub fn u64(&self, offset: usize) -> u64 {
        u64::from_le_bytes(self.array(offset))
    }

    pub fn f32(&self, offset: usize) -> f32 {
        f32::from_le_bytes(self.array(offset))
    }

    /// Reads a NUL-terminated string from a `len`-byte char array.
    pub fn c_str(&self, offset: usize, len: usize) -> String {
        let bytes = self.slice(offset, len);
        let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
        String::from_utf8_lossy(&bytes[..end]).into_owned()
    }

    pub fn bytes(&self, offset: usize, len: usize) -> Vec<u8> {
        self.slice(offset, len).to_vec()
    }

    /// Reads one field of the given kind.
    pub fn read(&self, offset: usize, kind: Primitive) -> FieldValue {
        match kind {
            Primitive::Bool => FieldValue::Bool(self.bool(offset)),
            Primitive::U8 => FieldValue::U8(self.u8(offset)),
            Primitive::I32 => FieldValue::I32(self.i32(offset)),
            Primitive::U32 => FieldValue::U32(self.u32(offset)),
            Primitive::I64 => FieldValue::I64(self.i64(offset)),
            Primitive::U64 => FieldValue::U64(self.u64(offset)),
            Primitive::F32 => FieldValue::F32(self.f32(offset)),
            Primitive::CStr(len) => FieldValue::Str(self.c_str(offset, len)),
            Primitive::Bytes(len) => FieldValue::Bytes(self.bytes(offset, len)),
        }
    }
}
