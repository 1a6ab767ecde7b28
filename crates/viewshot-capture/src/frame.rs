//! Captured frame types.

use bytes::{Bytes, BytesMut};

use crate::geometry::Bounds;

/// A mutable RGBA staging buffer, sized exactly to the bounds of the capture
/// that allocated it.
///
/// A `FrameBuf` is filled by the host's render primitive and then frozen into
/// an immutable [`PixelFrame`]. The buffer moves by value into the render
/// backend and back out through its completion, so there is no way to touch
/// it after it has been handed off or released.
#[derive(Debug)]
pub struct FrameBuf {
    data: BytesMut,
    width: u32,
    height: u32,
}

impl FrameBuf {
    /// Allocate a zeroed RGBA buffer covering `bounds`.
    pub fn rgba(bounds: Bounds) -> Self {
        let len = PixelFrame::rgba_buffer_size(bounds.width, bounds.height);
        let mut data = BytesMut::with_capacity(len);
        data.resize(len, 0);

        Self {
            data,
            width: bounds.width,
            height: bounds.height,
        }
    }

    /// Buffer width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Buffer height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The raw RGBA bytes, row-major, tightly packed.
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Freeze the staging buffer into an immutable frame.
    pub fn freeze(self) -> PixelFrame {
        PixelFrame {
            data: self.data.freeze(),
            width: self.width,
            height: self.height,
        }
    }
}

/// An immutable captured RGBA raster.
///
/// Clones share the backing allocation, which is released when the last clone
/// drops. The capture controller owns at most one current frame at a time;
/// storing a new one releases the previous.
#[derive(Debug, Clone)]
pub struct PixelFrame {
    data: Bytes,
    width: u32,
    height: u32,
}

impl PixelFrame {
    /// Frame width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Frame height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The raw RGBA bytes, row-major, tightly packed.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume the frame, returning the raw RGBA bytes.
    pub fn into_data(self) -> Bytes {
        self.data
    }

    /// Expected RGBA buffer size for the given dimensions.
    pub fn rgba_buffer_size(width: u32, height: u32) -> usize {
        width as usize * height as usize * 4
    }

    /// Validate that the frame data matches its dimensions.
    pub fn is_valid(&self) -> bool {
        self.data.len() == Self::rgba_buffer_size(self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_buffer_size() {
        assert_eq!(PixelFrame::rgba_buffer_size(100, 50), 100 * 50 * 4);
        assert_eq!(PixelFrame::rgba_buffer_size(0, 50), 0);
    }

    #[test]
    fn test_allocate_and_freeze() {
        let buf = FrameBuf::rgba(Bounds::new(3, 7, 100, 50));
        assert_eq!(buf.width(), 100);
        assert_eq!(buf.height(), 50);

        let frame = buf.freeze();
        assert_eq!(frame.width(), 100);
        assert_eq!(frame.height(), 50);
        assert_eq!(frame.data().len(), 100 * 50 * 4);
        assert!(frame.is_valid());
    }

    #[test]
    fn test_fill_survives_freeze() {
        let mut buf = FrameBuf::rgba(Bounds::new(0, 0, 2, 1));
        buf.as_mut_slice().copy_from_slice(&[1, 2, 3, 4, 5, 6, 7, 8]);

        let frame = buf.freeze();
        assert_eq!(frame.data(), &[1, 2, 3, 4, 5, 6, 7, 8]);
    }
}
