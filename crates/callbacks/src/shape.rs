//! Result shape descriptors.
//!
//! A [`ResultShape`] describes the bytes `GetAPICallResult` writes for one
//! callback. Packed shapes carry explicit offsets copied from the SDK
//! headers; aligned shapes list their fields in declaration order and
//! derive offsets from natural alignment.

use std::fmt;

/// Wire type of a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Bool,
    U8,
    I32,
    U32,
    I64,
    U64,
    F32,
    /// NUL-terminated string in a fixed-size char array.
    CStr(usize),
    Bytes(usize),
}

impl Primitive {
    pub const fn size(self) -> usize {
        match self {
            Self::Bool | Self::U8 => 1,
            Self::I32 | Self::U32 | Self::F32 => 4,
            Self::I64 | Self::U64 => 8,
            Self::CStr(n) | Self::Bytes(n) => n,
        }
    }

    pub const fn align(self) -> usize {
        match self {
            Self::Bool | Self::U8 | Self::CStr(_) | Self::Bytes(_) => 1,
            Self::I32 | Self::U32 | Self::F32 => 4,
            Self::I64 | Self::U64 => 8,
        }
    }
}

/// A field at a fixed byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackedField {
    pub name: &'static str,
    pub offset: usize,
    pub kind: Primitive,
}

impl PackedField {
    pub const fn new(name: &'static str, offset: usize, kind: Primitive) -> Self {
        Self { name, offset, kind }
    }

    /// One past the last byte of the field.
    pub const fn end(&self) -> usize {
        self.offset + self.kind.size()
    }
}

/// A field placed by natural alignment after the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignedField {
    pub name: &'static str,
    pub kind: Primitive,
}

impl AlignedField {
    pub const fn new(name: &'static str, kind: Primitive) -> Self {
        Self { name, kind }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Packed(&'static [PackedField]),
    Aligned(&'static [AlignedField]),
}

/// Byte layout of one call result structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultShape {
    /// Native structure name, e.g. `CreateItemResult_t`.
    pub name: &'static str,
    /// `sizeof` the native structure; the exact size requested from
    /// `GetAPICallResult`.
    pub size: usize,
    pub layout: Layout,
}

impl ResultShape {
    pub const fn packed(name: &'static str, size: usize, fields: &'static [PackedField]) -> Self {
        Self {
            name,
            size,
            layout: Layout::Packed(fields),
        }
    }

    pub const fn aligned(name: &'static str, size: usize, fields: &'static [AlignedField]) -> Self {
        Self {
            name,
            size,
            layout: Layout::Aligned(fields),
        }
    }

    pub fn is_packed(&self) -> bool {
        matches!(self.layout, Layout::Packed(_))
    }

    /// Every field with its resolved offset, in declaration order.
    pub fn fields(&self) -> Vec<PackedField> {
        match self.layout {
            Layout::Packed(fields) => fields.to_vec(),
            Layout::Aligned(fields) => natural_offsets(fields)
                .into_iter()
                .zip(fields)
                .map(|(offset, f)| PackedField::new(f.name, offset, f.kind))
                .collect(),
        }
    }
}

impl fmt::Display for ResultShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} bytes)", self.name, self.size)
    }
}

const fn align_up(value: usize, align: usize) -> usize {
    value.div_ceil(align) * align
}

/// Offsets of `fields` under default C alignment.
pub fn natural_offsets(fields: &[AlignedField]) -> Vec<usize> {
    let mut offsets = Vec::with_capacity(fields.len());
    let mut cursor = 0;
    for field in fields {
        cursor = align_up(cursor, field.kind.align());
        offsets.push(cursor);
        cursor += field.kind.size();
    }
    offsets
}

/// `sizeof` a naturally aligned struct: the end of the last field rounded
/// up to the largest field alignment.
pub fn natural_size(fields: &[AlignedField]) -> usize {
    let max_align = fields.iter().map(|f| f.kind.align()).max().unwrap_or(1);
    let end = natural_offsets(fields)
        .last()
        .zip(fields.last())
        .map_or(0, |(offset, f)| offset + f.kind.size());
    align_up(end, max_align)
}
