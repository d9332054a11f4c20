//! Launcher grid placement.
//!
//! Buttons fill rows left to right, `columns` per row. A column is as wide
//! as its widest button and a row as tall as its tallest, so buttons of
//! different sizes still line up.

use crate::config::Size;

/// Gap between neighbouring buttons, in logical pixels.
pub const SPACING: f32 = 12.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GridLayout {
    pub cells: Vec<Placement>,
    pub width: f32,
    pub height: f32,
}

/// Row and column of the button at `index`.
pub fn position(index: usize, columns: usize) -> (usize, usize) {
    let columns = columns.max(1);
    (index / columns, index % columns)
}

pub fn layout(sizes: &[Size], columns: usize) -> GridLayout {
    if sizes.is_empty() {
        return GridLayout::default();
    }

    let columns = columns.max(1).min(sizes.len());
    let rows = sizes.len().div_ceil(columns);
    let mut widths = vec![0.0_f32; columns];
    let mut heights = vec![0.0_f32; rows];

    for (index, size) in sizes.iter().enumerate() {
        let (row, column) = position(index, columns);
        widths[column] = widths[column].max(size.width as f32);
        heights[row] = heights[row].max(size.height as f32);
    }

    let offsets = |extents: &[f32]| -> Vec<f32> {
        extents
            .iter()
            .scan(0.0, |next, extent| {
                let start = *next;
                *next += extent + SPACING;
                Some(start)
            })
            .collect()
    };
    let xs = offsets(&widths);
    let ys = offsets(&heights);

    let cells = (0..sizes.len())
        .map(|index| {
            let (row, column) = position(index, columns);
            Placement {
                x: xs[column],
                y: ys[row],
            }
        })
        .collect();

    let span = |extents: &[f32]| extents.iter().sum::<f32>() + SPACING * (extents.len() - 1) as f32;

    GridLayout {
        cells,
        width: span(&widths),
        height: span(&heights),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_wraps_rows() {
        assert_eq!(position(0, 3), (0, 0));
        assert_eq!(position(2, 3), (0, 2));
        assert_eq!(position(3, 3), (1, 0));
        assert_eq!(position(7, 3), (2, 1));
        // Zero columns behaves as one.
        assert_eq!(position(4, 0), (4, 0));
    }

    #[test]
    fn test_uniform_grid() {
        let sizes = vec![Size::new(240, 80); 5];
        let grid = layout(&sizes, 3);

        assert_eq!(grid.cells[0], Placement { x: 0.0, y: 0.0 });
        assert_eq!(grid.cells[2], Placement { x: 504.0, y: 0.0 });
        assert_eq!(grid.cells[4], Placement { x: 252.0, y: 92.0 });
        assert_eq!(grid.width, 240.0 * 3.0 + SPACING * 2.0);
        assert_eq!(grid.height, 80.0 * 2.0 + SPACING);
    }

    #[test]
    fn test_mixed_sizes_align_to_largest() {
        let sizes = [Size::new(100, 50), Size::new(120, 40), Size::new(80, 60)];
        let grid = layout(&sizes, 2);

        assert_eq!(
            grid.cells,
            vec![
                Placement { x: 0.0, y: 0.0 },
                Placement { x: 112.0, y: 0.0 },
                Placement { x: 0.0, y: 62.0 },
            ]
        );
        assert_eq!(grid.width, 232.0);
        assert_eq!(grid.height, 122.0);
    }

    #[test]
    fn test_fewer_buttons_than_columns() {
        let grid = layout(&[Size::new(200, 70)], 4);
        assert_eq!(grid.width, 200.0);
        assert_eq!(grid.height, 70.0);
    }

    #[test]
    fn test_empty() {
        assert_eq!(layout(&[], 3), GridLayout::default());
    }
}
