use image::RgbImage;

use crate::{
    error::{MuralError, MuralResult},
    fx,
    mask::Mask,
};

/// Blend the tiled canvas, its blurred copy and the two masks into the
/// final buffer, then apply the single edge-enhancement pass.
///
/// Per pixel and channel, with masks normalized to `[0, 1]`:
///
/// ```text
/// fg  = final_mask
/// bd  = border_only
/// bg  = max(0, 1 - fg - bd)
/// out = fg * canvas * text_opacity
///     + bg * blurred * background_opacity
///     + bg * (1 - background_opacity) * 255
/// ```
///
/// The border term contributes black, so it only appears as the missing
/// weight. `fg + bd` can exceed 1 where the weighted foreground mask and
/// the ring overlap; the background weight is clamped at zero individually
/// rather than assuming the three weights partition the pixel.
pub fn composite(
    canvas: &RgbImage,
    blurred: &RgbImage,
    final_mask: &Mask,
    border_only: &Mask,
    text_opacity: f32,
    background_opacity: f32,
) -> MuralResult<RgbImage> {
    let (w, h) = canvas.dimensions();
    if blurred.dimensions() != (w, h)
        || (final_mask.width(), final_mask.height()) != (w, h)
        || (border_only.width(), border_only.height()) != (w, h)
    {
        return Err(MuralError::validation(
            "composite expects canvas, blurred copy and masks of equal size",
        ));
    }

    let canvas_raw = canvas.as_raw();
    let blurred_raw = blurred.as_raw();
    let mut out = vec![0u8; canvas_raw.len()];

    let white = (1.0 - background_opacity) * 255.0;
    for (i, (&f, &b)) in final_mask
        .data()
        .iter()
        .zip(border_only.data().iter())
        .enumerate()
    {
        let fg = f32::from(f) / 255.0;
        let bd = f32::from(b) / 255.0;
        let bg = (1.0 - fg - bd).max(0.0);

        let base = i * 3;
        for c in 0..3 {
            let v = fg * f32::from(canvas_raw[base + c]) * text_opacity
                + bg * f32::from(blurred_raw[base + c]) * background_opacity
                + bg * white;
            out[base + c] = v.round().clamp(0.0, 255.0) as u8;
        }
    }

    let blended = RgbImage::from_raw(w, h, out)
        .ok_or_else(|| MuralError::validation("composite buffer does not match dimensions"))?;
    fx::edge_enhance(&blended)
}
