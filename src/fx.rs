use image::RgbImage;

use crate::error::{MuralError, MuralResult};

/// Soften a copy of `src` with `strength` sequential box-blur passes of a
/// fixed `radius`. `strength = 0` returns an unmodified copy; the input is
/// never mutated.
pub fn box_blur_passes(src: &RgbImage, strength: u32, radius: u32) -> MuralResult<RgbImage> {
    if radius == 0 {
        return Err(MuralError::validation("box blur radius must be > 0"));
    }

    let (w, h) = src.dimensions();
    let mut cur = src.as_raw().clone();
    let mut tmp = vec![0u8; cur.len()];

    for _ in 0..strength {
        horizontal_pass(&cur, &mut tmp, w, h, radius);
        vertical_pass(&tmp, &mut cur, w, h, radius);
    }

    RgbImage::from_raw(w, h, cur)
        .ok_or_else(|| MuralError::validation("blur buffer does not match dimensions"))
}

fn horizontal_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, radius: u32) {
    let r = radius as i32;
    let w = width as i32;
    let window = 2 * radius + 1;

    for y in 0..height as i32 {
        for x in 0..w {
            let mut acc = [0u32; 3];
            for dx in -r..=r {
                let sx = (x + dx).clamp(0, w - 1);
                let idx = ((y * w + sx) as usize) * 3;
                for c in 0..3 {
                    acc[c] += u32::from(src[idx + c]);
                }
            }
            let out_idx = ((y * w + x) as usize) * 3;
            for c in 0..3 {
                dst[out_idx + c] = ((acc[c] + window / 2) / window) as u8;
            }
        }
    }
}

fn vertical_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, radius: u32) {
    let r = radius as i32;
    let w = width as i32;
    let h = height as i32;
    let window = 2 * radius + 1;

    for y in 0..h {
        for x in 0..w {
            let mut acc = [0u32; 3];
            for dy in -r..=r {
                let sy = (y + dy).clamp(0, h - 1);
                let idx = ((sy * w + x) as usize) * 3;
                for c in 0..3 {
                    acc[c] += u32::from(src[idx + c]);
                }
            }
            let out_idx = ((y * w + x) as usize) * 3;
            for c in 0..3 {
                dst[out_idx + c] = ((acc[c] + window / 2) / window) as u8;
            }
        }
    }
}

/// Single edge-enhancement pass: 3x3 kernel with center 10, neighbors -1,
/// divisor 2, edge-clamped sampling. A uniform region passes through
/// unchanged.
pub fn edge_enhance(src: &RgbImage) -> MuralResult<RgbImage> {
    let (width, height) = src.dimensions();
    let raw = src.as_raw();
    let w = width as i32;
    let h = height as i32;
    let mut dst = vec![0u8; raw.len()];

    for y in 0..h {
        for x in 0..w {
            let out_idx = ((y * w + x) as usize) * 3;
            for c in 0..3usize {
                let center = i32::from(raw[((y * w + x) as usize) * 3 + c]);
                let mut neighbors = 0i32;
                for dy in -1..=1 {
                    for dx in -1..=1 {
                        if dx == 0 && dy == 0 {
                            continue;
                        }
                        let sx = (x + dx).clamp(0, w - 1);
                        let sy = (y + dy).clamp(0, h - 1);
                        neighbors += i32::from(raw[((sy * w + sx) as usize) * 3 + c]);
                    }
                }
                let acc = 10 * center - neighbors;
                dst[out_idx + c] = ((acc + 1) / 2).clamp(0, 255) as u8;
            }
        }
    }

    RgbImage::from_raw(width, height, dst)
        .ok_or_else(|| MuralError::validation("sharpen buffer does not match dimensions"))
}
