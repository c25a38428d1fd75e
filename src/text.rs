use crate::{
    config::MosaicConfig,
    font::{FontHandle, FontResolver},
    layout::{LineLayout, layout_string},
    mask::Mask,
};

/// Coverage at or above this value counts as a covered glyph pixel.
const COVERAGE_THRESHOLD: u8 = 128;

/// Rasterize the configured text lines into a single-channel mask over a
/// `canvas_w` x `canvas_h` canvas. Lines stack vertically in config order
/// and the whole block is centered both ways.
///
/// The result depends only on canvas size, font metrics and the input
/// strings; it is fully deterministic and independent of any source image.
pub fn build_text_mask(
    cfg: &MosaicConfig,
    canvas_w: u32,
    canvas_h: u32,
    resolver: &dyn FontResolver,
) -> Mask {
    let mut laid: Vec<(FontHandle, f32, LineLayout)> = Vec::with_capacity(cfg.lines.len());
    for line in &cfg.lines {
        let size_px = (canvas_h as f32 * line.size_fraction).round().max(1.0);
        let font = resolver.resolve(size_px);
        let spacing = spacing_px(canvas_w, cfg.spacing_fraction_for(line.class));
        let layout = layout_string(&line.text, &font, size_px, spacing);
        laid.push((font, size_px, layout));
    }

    let line_gap = (canvas_h as f32 * cfg.line_gap_fraction).round() as i32;
    let block_h: i32 = laid.iter().map(|(_, _, l)| l.height as i32).sum::<i32>()
        + line_gap * (laid.len() as i32 - 1).max(0);

    let mut mask = Mask::new(canvas_w, canvas_h);
    let mut line_top = (canvas_h as i32 - block_h) / 2;

    for (font, size_px, layout) in &laid {
        let x0 = (canvas_w as i32 - layout.width as i32) / 2;
        let baseline = line_top + layout.ascent;

        for g in &layout.glyphs {
            let (m, bitmap) = font.rasterize(g.ch, *size_px);
            if m.width == 0 || m.height == 0 {
                continue;
            }
            let left = x0 + g.x + m.xmin;
            let top = baseline - m.ymin - m.height as i32;
            blit_covered(&mut mask, &bitmap, m.width, left, top);
        }

        line_top += layout.height as i32 + line_gap;
    }

    tracing::debug!(
        lines = cfg.lines.len(),
        canvas_w,
        canvas_h,
        "rasterized text mask"
    );
    mask
}

fn spacing_px(canvas_w: u32, fraction: f32) -> u32 {
    (canvas_w as f32 * fraction).round().max(0.0) as u32
}

/// Write 255 wherever the glyph bitmap covers a pixel, with bounds clipping.
/// Thresholding keeps the text mask saturated, which in turn keeps the
/// derived border ring pixel-disjoint from it.
fn blit_covered(mask: &mut Mask, bitmap: &[u8], bitmap_w: usize, left: i32, top: i32) {
    let w = mask.width() as i32;
    let h = mask.height() as i32;

    for (row, chunk) in bitmap.chunks_exact(bitmap_w).enumerate() {
        let y = top + row as i32;
        if y < 0 || y >= h {
            continue;
        }
        for (col, &coverage) in chunk.iter().enumerate() {
            if coverage < COVERAGE_THRESHOLD {
                continue;
            }
            let x = left + col as i32;
            if x < 0 || x >= w {
                continue;
            }
            mask.set(x as u32, y as u32, 255);
        }
    }
}
