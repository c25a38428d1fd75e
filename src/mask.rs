use crate::error::{MuralError, MuralResult};

/// Single-channel coverage buffer, row-major, values 0..=255.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Mask {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0u8; (width as usize) * (height as usize)],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn get(&self, x: u32, y: u32) -> u8 {
        self.data[(y as usize) * (self.width as usize) + (x as usize)]
    }

    pub fn set(&mut self, x: u32, y: u32, v: u8) {
        self.data[(y as usize) * (self.width as usize) + (x as usize)] = v;
    }

    fn same_size(&self, other: &Mask) -> bool {
        self.width == other.width && self.height == other.height
    }
}

/// Grayscale dilation: per-pixel maximum over an odd square window with
/// edge-clamped sampling.
pub fn dilate(mask: &Mask, filter_size: u32) -> MuralResult<Mask> {
    if filter_size == 0 || filter_size % 2 == 0 {
        return Err(MuralError::validation("dilation filter size must be odd"));
    }

    let radius = (filter_size / 2) as i32;
    let w = mask.width as i32;
    let h = mask.height as i32;
    let mut out = Mask::new(mask.width, mask.height);

    for y in 0..h {
        for x in 0..w {
            let mut best = 0u8;
            for dy in -radius..=radius {
                let sy = (y + dy).clamp(0, h - 1);
                for dx in -radius..=radius {
                    let sx = (x + dx).clamp(0, w - 1);
                    best = best.max(mask.get(sx as u32, sy as u32));
                }
            }
            out.set(x as u32, y as u32, best);
        }
    }

    Ok(out)
}

/// Ring-shaped border region: the dilated mask minus the original, clamped
/// at zero. With a saturated text mask the result never overlaps the text.
pub fn border_only(dilated: &Mask, text: &Mask) -> MuralResult<Mask> {
    if !dilated.same_size(text) {
        return Err(MuralError::validation(
            "border_only expects masks of equal size",
        ));
    }

    let mut out = Mask::new(text.width, text.height);
    for (o, (&d, &t)) in out
        .data
        .iter_mut()
        .zip(dilated.data.iter().zip(text.data.iter()))
    {
        *o = d.saturating_sub(t);
    }
    Ok(out)
}

/// Foreground opacity mask: `clamp(0.9*text + 0.7*dilated, 0, 255)`. Used
/// for blend weighting, not for the border color.
pub fn final_mask(text: &Mask, dilated: &Mask) -> MuralResult<Mask> {
    if !text.same_size(dilated) {
        return Err(MuralError::validation(
            "final_mask expects masks of equal size",
        ));
    }

    let mut out = Mask::new(text.width, text.height);
    for (o, (&t, &d)) in out
        .data
        .iter_mut()
        .zip(text.data.iter().zip(dilated.data.iter()))
    {
        let v = 0.9 * f32::from(t) + 0.7 * f32::from(d);
        *o = v.round().clamp(0.0, 255.0) as u8;
    }
    Ok(out)
}
