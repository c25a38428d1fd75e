use crate::error::{MuralError, MuralResult};

/// Letter-spacing class of a text line. Spacing constants are derived from
/// the canvas width, with a wider constant for headline-sized lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SizeClass {
    Large,
    Small,
}

/// One line of mask text: content plus its font size as a fraction of the
/// canvas height.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextLine {
    pub text: String,
    pub size_fraction: f32,
    pub class: SizeClass,
}

impl TextLine {
    pub fn new(text: impl Into<String>, size_fraction: f32, class: SizeClass) -> Self {
        Self {
            text: text.into(),
            size_fraction,
            class,
        }
    }
}

/// Immutable mosaic parameters: canvas/grid geometry, mask text, blend
/// weights and filter sizes. Constructed once and passed through the whole
/// pipeline; never mutated during a render.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MosaicConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub grid_cols: u32,
    pub grid_rows: u32,

    /// Number of sequential box-blur passes over the background copy.
    pub blur_strength: u32,
    /// Radius of each box-blur pass, in pixels.
    pub blur_radius: u32,

    pub lines: Vec<TextLine>,
    pub spacing_fraction_large: f32,
    pub spacing_fraction_small: f32,
    pub line_gap_fraction: f32,

    /// Side length of the square max-filter used to grow the border ring.
    /// Must be odd.
    pub border_filter_size: u32,

    pub text_opacity: f32,
    pub background_opacity: f32,

    pub jpeg_quality: u8,
}

impl Default for MosaicConfig {
    fn default() -> Self {
        Self {
            canvas_width: 1000,
            canvas_height: 500,
            grid_cols: 20,
            grid_rows: 10,
            blur_strength: 3,
            blur_radius: 3,
            lines: vec![TextLine::new("100", 0.8, SizeClass::Large)],
            spacing_fraction_large: 0.010,
            spacing_fraction_small: 0.005,
            line_gap_fraction: 0.04,
            border_filter_size: 15,
            text_opacity: 1.0,
            background_opacity: 0.7,
            jpeg_quality: 90,
        }
    }
}

impl MosaicConfig {
    pub fn validate(&self) -> MuralResult<()> {
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(MuralError::validation("canvas dimensions must be > 0"));
        }
        if self.grid_cols == 0 || self.grid_rows == 0 {
            return Err(MuralError::validation("grid dimensions must be > 0"));
        }
        if self.grid_cols > self.canvas_width || self.grid_rows > self.canvas_height {
            return Err(MuralError::validation(
                "grid is denser than the canvas (zero-size cells)",
            ));
        }
        if self.lines.is_empty() {
            return Err(MuralError::validation("at least one text line is required"));
        }
        for (i, line) in self.lines.iter().enumerate() {
            if line.text.is_empty() {
                return Err(MuralError::validation(format!(
                    "text line {i} must be non-empty"
                )));
            }
            if !line.size_fraction.is_finite()
                || line.size_fraction <= 0.0
                || line.size_fraction > 1.0
            {
                return Err(MuralError::validation(format!(
                    "text line {i} size_fraction must be in (0, 1]"
                )));
            }
        }
        for (name, v) in [
            ("spacing_fraction_large", self.spacing_fraction_large),
            ("spacing_fraction_small", self.spacing_fraction_small),
            ("line_gap_fraction", self.line_gap_fraction),
        ] {
            if !v.is_finite() || v < 0.0 || v >= 1.0 {
                return Err(MuralError::validation(format!(
                    "{name} must be in [0, 1)"
                )));
            }
        }
        for (name, v) in [
            ("text_opacity", self.text_opacity),
            ("background_opacity", self.background_opacity),
        ] {
            if !v.is_finite() || !(0.0..=1.0).contains(&v) {
                return Err(MuralError::validation(format!(
                    "{name} must be in [0, 1]"
                )));
            }
        }
        if self.border_filter_size == 0 || self.border_filter_size % 2 == 0 {
            return Err(MuralError::validation("border_filter_size must be odd"));
        }
        if self.blur_radius == 0 {
            return Err(MuralError::validation("blur_radius must be > 0"));
        }
        if self.jpeg_quality == 0 || self.jpeg_quality > 100 {
            return Err(MuralError::validation("jpeg_quality must be in 1..=100"));
        }
        Ok(())
    }

    /// Cell dimensions from integer division; a non-dividing canvas size is
    /// trimmed to exact multiples by the tiler.
    pub fn cell_size(&self) -> (u32, u32) {
        (
            self.canvas_width / self.grid_cols,
            self.canvas_height / self.grid_rows,
        )
    }

    pub fn tile_count(&self) -> usize {
        (self.grid_cols as usize) * (self.grid_rows as usize)
    }

    pub fn spacing_fraction_for(&self, class: SizeClass) -> f32 {
        match class {
            SizeClass::Large => self.spacing_fraction_large,
            SizeClass::Small => self.spacing_fraction_small,
        }
    }
}
