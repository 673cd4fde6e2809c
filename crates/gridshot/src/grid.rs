use glam::Vec3;
use itertools::iproduct;

/// Placement grid for the sphere, centered on the origin in the XY plane.
#[derive(Debug, Clone, Copy)]
pub struct Grid {
    pub cols: u32,
    pub rows: u32,
    /// World distance between neighbouring cells.
    pub resolution: f32,
}

impl Grid {
    /// World position of a cell. The center cell of an odd-sized grid sits on
    /// the origin; even sizes lean toward positive coordinates.
    pub fn cell_position(&self, col: u32, row: u32) -> Vec3 {
        let x = (col as i64 - (self.cols / 2) as i64) as f32;
        let y = (row as i64 - (self.rows / 2) as i64) as f32;
        Vec3::new(x * self.resolution, y * self.resolution, 0.0)
    }

    /// Cells in render order: column outer, row inner.
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32)> {
        iproduct!(0..self.cols, 0..self.rows)
    }

    pub fn cell_count(&self) -> usize {
        self.cols as usize * self.rows as usize
    }

    /// Shared basename of a cell's image triplet and its metadata record.
    pub fn cell_stem(&self, col: u32, row: u32) -> String {
        format!("{}x{}_{}_{}", self.cols, self.rows, col, row)
    }
}

#[cfg(test)]
mod tests {
    use super::Grid;
    use glam::Vec3;

    const GRID: Grid = Grid {
        cols: 3,
        rows: 3,
        resolution: 1.0,
    };

    #[test]
    fn corner_positions() {
        assert_eq!(GRID.cell_position(0, 0), Vec3::new(-1.0, -1.0, 0.0));
        assert_eq!(GRID.cell_position(2, 2), Vec3::new(1.0, 1.0, 0.0));
        assert_eq!(GRID.cell_position(1, 1), Vec3::ZERO);
    }

    #[test]
    fn resolution_scales_positions() {
        let grid = Grid {
            resolution: 2.5,
            ..GRID
        };
        assert_eq!(grid.cell_position(0, 1), Vec3::new(-2.5, 0.0, 0.0));
    }

    #[test]
    fn traversal_is_column_major() {
        let cells: Vec<_> = GRID.cells().collect();
        assert_eq!(cells.len(), GRID.cell_count());
        assert_eq!(&cells[..4], &[(0, 0), (0, 1), (0, 2), (1, 0)]);
    }

    #[test]
    fn stem_format() {
        assert_eq!(GRID.cell_stem(0, 2), "3x3_0_2");
        let wide = Grid {
            cols: 4,
            rows: 2,
            resolution: 1.0,
        };
        assert_eq!(wide.cell_stem(3, 1), "4x2_3_1");
    }
}
