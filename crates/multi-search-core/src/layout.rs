//! Layout Sizer
//!
//! When every tile sits in one row, stretch tiles down to the bottom of the
//! viewport; otherwise keep the configured minimum height. Measuring the
//! rendered tiles is the caller's job.

/// Space kept below the grid, in pixels
pub const GRID_MARGIN: f64 = 12.0;
/// Padding inside a tile besides its header, in pixels
pub const TILE_PADDING: f64 = 8.0;

/// Top offsets closer than this count as the same row
const ROW_TOLERANCE: f64 = 0.5;

/// Measurements of the rendered tile grid
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TileLayout {
    /// Top offset of every rendered tile
    pub tile_tops: Vec<f64>,
    /// Top offset of the grid container
    pub grid_top: f64,
    pub viewport_height: f64,
    /// Height of a tile's header bar
    pub header_height: f64,
}

impl TileLayout {
    pub fn is_single_row(&self) -> bool {
        match self.tile_tops.split_first() {
            Some((first, rest)) => rest.iter().all(|top| (top - first).abs() <= ROW_TOLERANCE),
            None => false,
        }
    }
}

/// Frame height shared by every tile
pub fn compute_tile_height(layout: &TileLayout, min_height: f64) -> f64 {
    if !layout.is_single_row() {
        return min_height;
    }

    let available = layout.viewport_height - layout.grid_top - GRID_MARGIN;
    let fill = available - layout.header_height - TILE_PADDING;
    min_height.max(fill)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(tile_tops: Vec<f64>) -> TileLayout {
        TileLayout {
            tile_tops,
            grid_top: 60.0,
            viewport_height: 900.0,
            header_height: 30.0,
        }
    }

    #[test]
    fn test_single_row_fills_viewport() {
        // 900 - 60 - 12 - 30 - 8
        assert_eq!(compute_tile_height(&layout(vec![72.0, 72.0, 72.0]), 500.0), 790.0);
    }

    #[test]
    fn test_wrapped_rows_keep_minimum() {
        assert_eq!(compute_tile_height(&layout(vec![72.0, 72.0, 600.0]), 500.0), 500.0);
    }

    #[test]
    fn test_small_viewport_keeps_minimum() {
        let mut l = layout(vec![72.0]);
        l.viewport_height = 400.0;
        assert_eq!(compute_tile_height(&l, 500.0), 500.0);
    }

    #[test]
    fn test_no_tiles_keeps_minimum() {
        assert_eq!(compute_tile_height(&layout(vec![]), 300.0), 300.0);
    }

    #[test]
    fn test_subpixel_offsets_count_as_one_row() {
        assert!(layout(vec![72.0, 72.25, 71.8]).is_single_row());
        assert!(!layout(vec![72.0, 74.0]).is_single_row());
    }
}
