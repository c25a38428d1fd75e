/// Measured geometry of a single glyph at a given pixel size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphMetrics {
    /// Horizontal advance in pixels (fractional; rounded by the layouter).
    pub advance: f32,
    /// Tight bitmap width in pixels.
    pub width: usize,
    /// Tight bitmap height in pixels.
    pub height: usize,
    /// Left side bearing relative to the pen position.
    pub xmin: i32,
    /// Offset from the baseline to the bitmap bottom (negative below).
    pub ymin: i32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineMetrics {
    pub ascent: f32,
    /// Negative for glyphs extending below the baseline.
    pub descent: f32,
}

/// A font usable for measuring and rasterizing mask glyphs: either a parsed
/// outline font, or the degenerate built-in block font used when no real
/// font can be resolved.
pub enum FontHandle {
    Outline(fontdue::Font),
    Builtin(BuiltinFont),
}

impl FontHandle {
    pub fn metrics(&self, ch: char, size_px: f32) -> GlyphMetrics {
        match self {
            Self::Outline(font) => {
                let m = font.metrics(ch, size_px);
                GlyphMetrics {
                    advance: m.advance_width,
                    width: m.width,
                    height: m.height,
                    xmin: m.xmin,
                    ymin: m.ymin,
                }
            }
            Self::Builtin(font) => font.metrics(ch, size_px),
        }
    }

    /// Glyph coverage bitmap (row-major, `width*height` bytes, 0..=255).
    pub fn rasterize(&self, ch: char, size_px: f32) -> (GlyphMetrics, Vec<u8>) {
        match self {
            Self::Outline(font) => {
                let (m, bitmap) = font.rasterize(ch, size_px);
                (
                    GlyphMetrics {
                        advance: m.advance_width,
                        width: m.width,
                        height: m.height,
                        xmin: m.xmin,
                        ymin: m.ymin,
                    },
                    bitmap,
                )
            }
            Self::Builtin(font) => font.rasterize(ch, size_px),
        }
    }

    pub fn line_metrics(&self, size_px: f32) -> LineMetrics {
        match self {
            Self::Outline(font) => match font.horizontal_line_metrics(size_px) {
                Some(m) => LineMetrics {
                    ascent: m.ascent,
                    descent: m.descent,
                },
                // Fonts without horizontal metrics get the same crude split
                // the builtin font uses.
                None => BuiltinFont.line_metrics(size_px),
            },
            Self::Builtin(font) => font.line_metrics(size_px),
        }
    }
}

/// Degenerate fallback font: every visible character is a filled block on a
/// monospaced advance. Crude metrics, but layout and rasterization always
/// proceed.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuiltinFont;

impl BuiltinFont {
    fn metrics(&self, ch: char, size_px: f32) -> GlyphMetrics {
        let advance = (size_px * 0.6).max(1.0);
        if ch.is_whitespace() {
            return GlyphMetrics {
                advance,
                width: 0,
                height: 0,
                xmin: 0,
                ymin: 0,
            };
        }
        GlyphMetrics {
            advance,
            width: (size_px * 0.5).round().max(1.0) as usize,
            height: (size_px * 0.7).round().max(1.0) as usize,
            xmin: (size_px * 0.05).round() as i32,
            ymin: 0,
        }
    }

    fn rasterize(&self, ch: char, size_px: f32) -> (GlyphMetrics, Vec<u8>) {
        let m = self.metrics(ch, size_px);
        (m, vec![255u8; m.width * m.height])
    }

    fn line_metrics(&self, size_px: f32) -> LineMetrics {
        LineMetrics {
            ascent: size_px * 0.8,
            descent: -(size_px * 0.2),
        }
    }
}

/// Source of fonts for the mask builder. Resolution is infallible by
/// contract: implementations degrade to [`BuiltinFont`] instead of failing.
pub trait FontResolver {
    fn resolve(&self, size_px: f32) -> FontHandle;
}

/// System font lookup backed by a `fontdb` scan, preferring a sans-serif
/// face with serif/monospace as generic fallbacks.
pub struct SystemFonts {
    db: fontdb::Database,
}

impl SystemFonts {
    pub fn new() -> Self {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        tracing::debug!(faces = db.faces().count(), "scanned system fonts");
        Self { db }
    }
}

impl Default for SystemFonts {
    fn default() -> Self {
        Self::new()
    }
}

impl FontResolver for SystemFonts {
    fn resolve(&self, _size_px: f32) -> FontHandle {
        let query = fontdb::Query {
            families: &[
                fontdb::Family::SansSerif,
                fontdb::Family::Serif,
                fontdb::Family::Monospace,
            ],
            weight: fontdb::Weight::NORMAL,
            stretch: fontdb::Stretch::Normal,
            style: fontdb::Style::Normal,
        };

        let id = self
            .db
            .query(&query)
            .or_else(|| self.db.faces().next().map(|f| f.id));

        if let Some(id) = id
            && let Some(font) = self
                .db
                .with_face_data(id, |data, index| {
                    fontdue::Font::from_bytes(
                        data,
                        fontdue::FontSettings {
                            collection_index: index,
                            ..fontdue::FontSettings::default()
                        },
                    )
                    .ok()
                })
                .flatten()
        {
            return FontHandle::Outline(font);
        }

        tracing::warn!("no usable system font found, falling back to builtin block font");
        FontHandle::Builtin(BuiltinFont)
    }
}

/// Always resolves the builtin block font. Used by tests for deterministic
/// glyph geometry independent of the host font set.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuiltinOnly;

impl FontResolver for BuiltinOnly {
    fn resolve(&self, _size_px: f32) -> FontHandle {
        FontHandle::Builtin(BuiltinFont)
    }
}
