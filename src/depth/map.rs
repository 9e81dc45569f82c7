//! Owned dense depth map in row-major layout.
//!
//! Each cell is an explicit [`DepthCell`] variant rather than a NaN-coded
//! triple, so validity checks are a pattern match instead of floating-point
//! sentinel comparisons. The file loader performs the NaN → `Invalid`
//! conversion at the boundary.

/// One cell of a depth map: a real-world XYZ coordinate, or nothing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DepthCell {
    /// Measured 3D coordinate in real-world units (millimetres).
    Valid([f64; 3]),
    /// No measurement at this pixel.
    Invalid,
}

impl DepthCell {
    /// True if this cell carries a measurement.
    #[inline]
    pub fn is_valid(&self) -> bool {
        matches!(self, DepthCell::Valid(_))
    }

    /// The XYZ coordinate, if present.
    #[inline]
    pub fn xyz(&self) -> Option<[f64; 3]> {
        match self {
            DepthCell::Valid(p) => Some(*p),
            DepthCell::Invalid => None,
        }
    }
}

/// Dense H×W grid of depth cells, row-major.
#[derive(Clone, Debug)]
pub struct DepthMap {
    /// Grid width in pixels (columns).
    pub w: usize,
    /// Grid height in pixels (rows).
    pub h: usize,
    cells: Vec<DepthCell>,
}

impl DepthMap {
    /// Construct an all-`Invalid` map of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            cells: vec![DepthCell::Invalid; w * h],
        }
    }

    /// Construct from a pre-built cell buffer in row-major order.
    pub fn from_cells(w: usize, h: usize, cells: Vec<DepthCell>) -> Result<Self, String> {
        if cells.len() != w * h {
            return Err(format!(
                "Depth buffer size mismatch: {} cells for {w} x {h} grid",
                cells.len()
            ));
        }
        Ok(Self { w, h, cells })
    }

    #[inline]
    /// Convert (row, col) to a linear index into the cell buffer.
    pub fn idx(&self, row: usize, col: usize) -> usize {
        row * self.w + col
    }

    #[inline]
    /// Get the cell at (row, col).
    pub fn get(&self, row: usize, col: usize) -> DepthCell {
        self.cells[self.idx(row, col)]
    }

    #[inline]
    /// Set the cell at (row, col).
    pub fn set(&mut self, row: usize, col: usize, cell: DepthCell) {
        let i = self.idx(row, col);
        self.cells[i] = cell;
    }

    /// True if the signed (row, col) pair lies inside the grid.
    #[inline]
    pub fn contains(&self, row: i64, col: i64) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.h && (col as usize) < self.w
    }

    /// XYZ at a signed (row, col), or `None` when out of bounds or invalid.
    #[inline]
    pub fn get_checked(&self, row: i64, col: i64) -> Option<[f64; 3]> {
        if !self.contains(row, col) {
            return None;
        }
        self.get(row as usize, col as usize).xyz()
    }

    /// Row-major cell slice.
    pub fn cells(&self) -> &[DepthCell] {
        &self.cells
    }
}
