//!
//! Update inputs.
//!
//! [`Input`] is the single argument of [`NativeDigest::update`]: a byte, a
//! range of a byte array, or a [`ByteWindow`]. Each variant lowers to one
//! engine absorb call with an explicit offset and length.
//!
//! [`NativeDigest::update`]: crate::NativeDigest::update
//!

use crate::error::{check_range, NativeDigestError};

/// Read-only view over a byte slice with a cursor.
///
/// `position <= limit <= capacity` always holds. Updating a digest with a
/// window consumes `[position, limit)` and moves `position` to `limit`;
/// `limit` and `capacity` are left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteWindow<'a> {
    data: &'a [u8],
    position: usize,
    limit: usize,
}

impl<'a> ByteWindow<'a> {
    /// Window over all of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            position: 0,
            limit: data.len(),
        }
    }

    pub fn with_bounds(
        data: &'a [u8],
        position: usize,
        limit: usize,
    ) -> Result<Self, NativeDigestError> {
        check_range(data.len(), 0, limit)?;
        if position > limit {
            return Err(NativeDigestError::InvalidArgument {
                offset: position,
                length: 0,
                available: limit,
            });
        }
        Ok(Self {
            data,
            position,
            limit,
        })
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    pub fn remaining(&self) -> usize {
        self.limit - self.position
    }

    pub fn has_remaining(&self) -> bool {
        self.position < self.limit
    }

    pub fn set_position(&mut self, position: usize) -> Result<(), NativeDigestError> {
        if position > self.limit {
            return Err(NativeDigestError::InvalidArgument {
                offset: position,
                length: 0,
                available: self.limit,
            });
        }
        self.position = position;
        Ok(())
    }

    /// Moves the limit, pulling the position back if it lies beyond it.
    pub fn set_limit(&mut self, limit: usize) -> Result<(), NativeDigestError> {
        check_range(self.capacity(), 0, limit)?;
        self.limit = limit;
        self.position = self.position.min(limit);
        Ok(())
    }

    /// Limit becomes the current position, position returns to zero.
    pub fn flip(&mut self) {
        self.limit = self.position;
        self.position = 0;
    }

    pub fn rewind(&mut self) {
        self.position = 0;
    }

    pub fn clear(&mut self) {
        self.position = 0;
        self.limit = self.capacity();
    }

    /// The bytes between position and limit.
    pub fn as_slice(&self) -> &'a [u8] {
        &self.data[self.position..self.limit]
    }

    pub(crate) fn data(&self) -> &'a [u8] {
        self.data
    }

    pub(crate) fn consume(&mut self) {
        self.position = self.limit;
    }
}

/// One absorb request.
#[derive(Debug)]
pub enum Input<'a, 'w> {
    Byte(u8),
    Bytes {
        data: &'a [u8],
        offset: usize,
        length: usize,
    },
    Buffer(&'w mut ByteWindow<'a>),
}

impl<'a> Input<'a, '_> {
    /// The whole of `data`.
    pub fn bytes(data: &'a [u8]) -> Self {
        Input::Bytes {
            data,
            offset: 0,
            length: data.len(),
        }
    }

    pub fn range(data: &'a [u8], offset: usize, length: usize) -> Self {
        Input::Bytes {
            data,
            offset,
            length,
        }
    }
}

impl From<u8> for Input<'_, '_> {
    fn from(byte: u8) -> Self {
        Input::Byte(byte)
    }
}

impl<'a> From<&'a [u8]> for Input<'a, '_> {
    fn from(data: &'a [u8]) -> Self {
        Input::bytes(data)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for Input<'a, '_> {
    fn from(data: &'a [u8; N]) -> Self {
        Input::bytes(data)
    }
}

impl<'a, 'w> From<&'w mut ByteWindow<'a>> for Input<'a, 'w> {
    fn from(window: &'w mut ByteWindow<'a>) -> Self {
        Input::Buffer(window)
    }
}
