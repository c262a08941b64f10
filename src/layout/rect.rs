//! Rect: Cell-grid rectangle used to size regions.

/// A rectangle defined by position and size, in terminal cells.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// X coordinate (column) of the top-left corner.
    pub x: u16,
    /// Y coordinate (row) of the top-left corner.
    pub y: u16,
    /// Width in columns.
    pub width: u16,
    /// Height in rows.
    pub height: u16,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self { x, y, width, height }
    }

    /// Create a rectangle at the origin.
    #[inline]
    pub const fn from_size(width: u16, height: u16) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Carve the rectangle into `count` side-by-side columns.
    ///
    /// Columns are separated by `gutter` cells. Leftover width goes to the
    /// leftmost columns, one cell each, so the widths differ by at most one.
    pub fn columns(&self, count: u16, gutter: u16) -> Vec<Self> {
        if count == 0 {
            return Vec::new();
        }

        let gutters = gutter.saturating_mul(count - 1);
        let usable = self.width.saturating_sub(gutters);
        let base = usable / count;
        let extra = usable % count;

        let mut x = self.x;
        (0..count)
            .map(|i| {
                let width = base + u16::from(i < extra);
                let column = Self::new(x, self.y, width, self.height);
                x = x.saturating_add(width).saturating_add(gutter);
                column
            })
            .collect()
    }
}

impl std::fmt::Debug for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Rect({}, {} {}x{})", self.x, self.y, self.width, self.height)
    }
}
