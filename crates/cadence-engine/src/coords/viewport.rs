/// Usable area of the host window in device-independent pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct HostSize {
    pub height: f64,
    pub width: f64,
}

impl HostSize {
    #[inline]
    pub const fn new(height: f64, width: f64) -> Self {
        Self { height, width }
    }
}

/// Surface dimensions in whole pixels, height first to match the engine contract.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct ViewportDimensions {
    pub height: u32,
    pub width: u32,
}

impl ViewportDimensions {
    #[inline]
    pub const fn new(height: u32, width: u32) -> Self {
        Self { height, width }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.height == 0 || self.width == 0
    }

    /// Full-surface viewport rectangle anchored at the origin.
    #[inline]
    pub fn rect(self) -> ViewportRect {
        ViewportRect::new(0, 0, self.width, self.height)
    }
}

/// Active viewport rectangle of a drawing context, in surface pixels.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct ViewportRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl ViewportRect {
    #[inline]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_spans_whole_surface() {
        let dims = ViewportDimensions::new(720, 900);
        assert_eq!(dims.rect(), ViewportRect::new(0, 0, 900, 720));
    }

    #[test]
    fn zero_axis_is_empty() {
        assert!(ViewportDimensions::new(0, 10).is_empty());
        assert!(ViewportDimensions::new(10, 0).is_empty());
        assert!(!ViewportDimensions::new(1, 1).is_empty());
    }
}
