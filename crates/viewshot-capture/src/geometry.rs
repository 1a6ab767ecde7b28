//! Region geometry in root-window coordinates.

/// The on-screen rectangle of a capture region at a point in time.
///
/// Coordinates are in the root window's pixel space. A region may report a
/// zero-sized rectangle before its first real layout pass; captures against
/// such bounds are skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    /// Left edge in window pixels.
    pub left: i32,

    /// Top edge in window pixels.
    pub top: i32,

    /// Width in pixels.
    pub width: u32,

    /// Height in pixels.
    pub height: u32,
}

impl Bounds {
    /// Create bounds from edge position and size.
    pub fn new(left: i32, top: i32, width: u32, height: u32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Whether these bounds cover no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Exclusive right edge.
    pub fn right(&self) -> i32 {
        self.left + self.width as i32
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> i32 {
        self.top + self.height as i32
    }
}

/// One layout pass worth of positioning data, as reported by the host UI
/// binding layer.
///
/// Platforms that can resolve window-space coordinates report them in
/// `in_window`; older platforms only provide the root-space rectangle. The
/// capture path prefers window space when present, and callers observe no
/// behavioral difference between the two.
#[derive(Debug, Clone, Copy)]
pub struct LayoutInfo {
    /// Bounds in window coordinates, when the platform supports resolving
    /// them.
    pub in_window: Option<Bounds>,

    /// Bounds relative to the root of the view tree.
    pub in_root: Bounds,
}

impl LayoutInfo {
    /// Layout report from a platform with window-space positioning.
    pub fn windowed(in_window: Bounds, in_root: Bounds) -> Self {
        Self {
            in_window: Some(in_window),
            in_root,
        }
    }

    /// Layout report from a platform that only knows root-space positioning.
    pub fn root_only(in_root: Bounds) -> Self {
        Self {
            in_window: None,
            in_root,
        }
    }

    /// The bounds a capture should use for this layout.
    pub fn effective(&self) -> Bounds {
        self.in_window.unwrap_or(self.in_root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_area_is_empty() {
        assert!(Bounds::new(10, 10, 0, 50).is_empty());
        assert!(Bounds::new(10, 10, 50, 0).is_empty());
        assert!(!Bounds::new(10, 10, 1, 1).is_empty());
    }

    #[test]
    fn test_edges() {
        let b = Bounds::new(-5, 20, 100, 50);
        assert_eq!(b.right(), 95);
        assert_eq!(b.bottom(), 70);
    }

    #[test]
    fn test_effective_prefers_window_space() {
        let window = Bounds::new(4, 8, 100, 50);
        let root = Bounds::new(0, 0, 100, 50);

        assert_eq!(LayoutInfo::windowed(window, root).effective(), window);
        assert_eq!(LayoutInfo::root_only(root).effective(), root);
    }
}
