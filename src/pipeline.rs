use image::RgbImage;

use crate::{
    compose,
    config::MosaicConfig,
    error::MuralResult,
    font::FontResolver,
    fx, grid, mask,
    mask::Mask,
    text,
};

/// Run the whole compositing pipeline over pre-loaded thumbnails: tile the
/// grid, rasterize the text mask, derive the border masks, blur the
/// background copy and blend everything into the final buffer.
///
/// Pure transform: no IO, single-threaded, each intermediate buffer has one
/// writer and is read-only afterwards.
#[tracing::instrument(skip(thumbnails, cfg, resolver))]
pub fn render_mosaic(
    thumbnails: &[RgbImage],
    cfg: &MosaicConfig,
    resolver: &dyn FontResolver,
) -> MuralResult<RgbImage> {
    cfg.validate()?;

    let (cell_w, cell_h) = cfg.cell_size();
    let canvas = grid::assemble(thumbnails, cfg.grid_cols, cfg.grid_rows, cell_w, cell_h)?;
    let (w, h) = canvas.dimensions();

    let text_mask = text::build_text_mask(cfg, w, h, resolver);
    let dilated = mask::dilate(&text_mask, cfg.border_filter_size)?;
    let border = mask::border_only(&dilated, &text_mask)?;
    let final_mask = mask::final_mask(&text_mask, &dilated)?;

    let blurred = fx::box_blur_passes(&canvas, cfg.blur_strength, cfg.blur_radius)?;

    let out = compose::composite(
        &canvas,
        &blurred,
        &final_mask,
        &border,
        cfg.text_opacity,
        cfg.background_opacity,
    )?;

    tracing::info!(width = w, height = h, "rendered mosaic");
    Ok(out)
}

/// Rasterize only the text mask at the pipeline's working canvas size.
/// Exposed for mask inspection without running a full render.
pub fn render_text_mask(cfg: &MosaicConfig, resolver: &dyn FontResolver) -> MuralResult<Mask> {
    cfg.validate()?;
    let (cell_w, cell_h) = cfg.cell_size();
    Ok(text::build_text_mask(
        cfg,
        cfg.grid_cols * cell_w,
        cfg.grid_rows * cell_h,
        resolver,
    ))
}
