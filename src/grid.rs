use image::RgbImage;

use crate::error::{MuralError, MuralResult};

/// Tile pre-sized thumbnails into a `cols` x `rows` grid, row-major. Cell
/// `(x, y)` shows thumbnail `(y*cols + x) % N`: a short sequence wraps
/// around deterministically, a long one is only read up to `cols*rows`.
///
/// The canvas is exactly `(cols*cell_w, rows*cell_h)`; requested dimensions
/// that do not divide evenly were already trimmed by the cell computation.
pub fn assemble(
    thumbnails: &[RgbImage],
    cols: u32,
    rows: u32,
    cell_w: u32,
    cell_h: u32,
) -> MuralResult<RgbImage> {
    if thumbnails.is_empty() {
        return Err(MuralError::empty_input("no thumbnails to tile"));
    }
    if cols == 0 || rows == 0 || cell_w == 0 || cell_h == 0 {
        return Err(MuralError::validation("grid and cell dimensions must be > 0"));
    }
    for (i, thumb) in thumbnails.iter().enumerate() {
        if thumb.dimensions() != (cell_w, cell_h) {
            return Err(MuralError::validation(format!(
                "thumbnail {i} is {}x{}, expected {cell_w}x{cell_h}",
                thumb.width(),
                thumb.height()
            )));
        }
    }

    let mut canvas = RgbImage::new(cols * cell_w, rows * cell_h);
    for y in 0..rows {
        for x in 0..cols {
            let idx = ((y * cols + x) as usize) % thumbnails.len();
            image::imageops::replace(
                &mut canvas,
                &thumbnails[idx],
                i64::from(x * cell_w),
                i64::from(y * cell_h),
            );
        }
    }

    tracing::debug!(
        cols,
        rows,
        thumbs = thumbnails.len(),
        "assembled tile canvas"
    );
    Ok(canvas)
}
