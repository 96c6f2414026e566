use anyhow::{ensure, Result};

/// A point in window pixel coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Position::new(self.x + dx, self.y + dy)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Rect { x, y, width, height }
    }

    /// Half-open containment: `x <= pos.x < x + width`, same for y.
    pub fn contains(&self, pos: Position) -> bool {
        self.x <= pos.x && pos.x < self.x + self.width
            && self.y <= pos.y && pos.y < self.y + self.height
    }
}

/// The rectangle the snake may move in, plus the size of one grid cell.
/// Built once at startup and never changed afterwards.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PlayArea {
    bounds: Rect,
    cell: i32,
}

impl PlayArea {
    pub fn new(bounds: Rect, cell: i32) -> Result<Self> {
        ensure!(cell > 0, "cell size must be positive, got {}", cell);
        // Food needs at least one cell that isn't on the edge
        ensure!(
            bounds.width > 2 * cell && bounds.height > 2 * cell,
            "play area of {}x{} px is too small for {} px cells",
            bounds.width,
            bounds.height,
            cell
        );

        Ok(PlayArea { bounds, cell })
    }

    /// Insets a window of the given pixel size by `inset` on every side.
    pub fn from_window(width: i32, height: i32, inset: i32, cell: i32) -> Result<Self> {
        Self::new(Rect::new(inset, inset, width - 2 * inset, height - 2 * inset), cell)
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn cell(&self) -> i32 {
        self.cell
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.bounds.contains(pos)
    }

    pub fn is_aligned(&self, pos: Position) -> bool {
        (pos.x - self.bounds.x) % self.cell == 0 && (pos.y - self.bounds.y) % self.cell == 0
    }

    /// Grid-aligned cell closest to the middle of the area.
    pub fn center(&self) -> Position {
        let cols = self.bounds.width / self.cell;
        let rows = self.bounds.height / self.cell;
        Position::new(
            self.bounds.x + cols / 2 * self.cell,
            self.bounds.y + rows / 2 * self.cell,
        )
    }
}
