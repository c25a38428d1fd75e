use image::{Rgb, RgbImage};
use mural::{BuiltinOnly, MosaicConfig, SizeClass, TextLine, render_mosaic};

fn solid(w: u32, h: u32, rgb: [u8; 3]) -> RgbImage {
    RgbImage::from_pixel(w, h, Rgb(rgb))
}

fn eight_colors() -> Vec<[u8; 3]> {
    (0..8u32).map(|i| [(i * 30) as u8, 0, (255 - i * 30) as u8]).collect()
}

/// Canvas 200x100, grid 4x2, blur 0, one "hi" line at 0.3 of the canvas
/// height. With the builtin block font every glyph is a solid rectangle,
/// so the mask geometry is exactly predictable.
fn scenario_cfg() -> MosaicConfig {
    MosaicConfig {
        canvas_width: 200,
        canvas_height: 100,
        grid_cols: 4,
        grid_rows: 2,
        blur_strength: 0,
        lines: vec![TextLine::new("hi", 0.3, SizeClass::Large)],
        ..MosaicConfig::default()
    }
}

fn dimmed(c: u8, background_opacity: f32) -> i32 {
    (background_opacity * f32::from(c) + (1.0 - background_opacity) * 255.0).round() as i32
}

#[test]
fn end_to_end_dimensions_are_exact() {
    let thumbs: Vec<RgbImage> = eight_colors().iter().map(|&c| solid(50, 50, c)).collect();
    let out = render_mosaic(&thumbs, &scenario_cfg(), &BuiltinOnly).unwrap();
    assert_eq!(out.dimensions(), (200, 100));
}

#[test]
fn end_to_end_text_region_keeps_sharp_tile_color() {
    let colors = eight_colors();
    let thumbs: Vec<RgbImage> = colors.iter().map(|&c| solid(50, 50, c)).collect();
    let out = render_mosaic(&thumbs, &scenario_cfg(), &BuiltinOnly).unwrap();

    // Block-font geometry: size 30, advance 18, spacing 2 -> the 'h' glyph
    // covers x 83..98, y 38..59. (90,45) sits inside it, in cell (1,0).
    let px = out.get_pixel(90, 45).0;
    assert_eq!(px, colors[1], "text region must show the undimmed tile");
}

#[test]
fn end_to_end_background_is_dimmed_unblurred_tile() {
    let cfg = scenario_cfg();
    let colors = eight_colors();
    let thumbs: Vec<RgbImage> = colors.iter().map(|&c| solid(50, 50, c)).collect();
    let out = render_mosaic(&thumbs, &cfg, &BuiltinOnly).unwrap();

    // (10,85) is far from any mask pixel, in cell (0,1) -> thumbnail 4.
    // blur 0 means the background term is the original color, attenuated
    // and lifted toward white.
    let px = out.get_pixel(10, 85).0;
    for c in 0..3 {
        let expected = dimmed(colors[4][c], cfg.background_opacity);
        let got = i32::from(px[c]);
        assert!(
            (got - expected).abs() <= 1,
            "channel {c}: got {got}, expected ~{expected}"
        );
    }
}

#[test]
fn end_to_end_border_ring_shows_attenuated_tile() {
    let cfg = scenario_cfg();
    let colors = eight_colors();
    let thumbs: Vec<RgbImage> = colors.iter().map(|&c| solid(50, 50, c)).collect();
    let out = render_mosaic(&thumbs, &cfg, &BuiltinOnly).unwrap();

    // (80,45) lies in the dilated ring west of the 'h' glyph: the border
    // weight consumes the whole background share (0.7 + 1.0 > 1), leaving
    // 0.7 * tile with no white lift. Cell (1,0) -> thumbnail 1.
    let px = out.get_pixel(80, 45).0;
    for c in 0..3 {
        let expected = (0.7_f32 * f32::from(colors[1][c])).round() as i32;
        let got = i32::from(px[c]);
        assert!(
            (got - expected).abs() <= 2,
            "channel {c}: got {got}, expected ~{expected}"
        );
    }
}

#[test]
fn end_to_end_wrap_around_reuses_three_thumbnails() {
    let cfg = MosaicConfig {
        canvas_width: 60,
        canvas_height: 60,
        grid_cols: 6,
        grid_rows: 6,
        blur_strength: 0,
        lines: vec![TextLine::new("hi", 0.3, SizeClass::Large)],
        ..MosaicConfig::default()
    };
    let colors: Vec<[u8; 3]> = vec![[90, 0, 0], [0, 90, 0], [0, 0, 90]];
    let thumbs: Vec<RgbImage> = colors.iter().map(|&c| solid(10, 10, c)).collect();
    let out = render_mosaic(&thumbs, &cfg, &BuiltinOnly).unwrap();

    assert_eq!(out.dimensions(), (60, 60));

    // Top corners sit outside the centered mask; their dimmed colors must
    // follow the (y*cols + x) % 3 wrap.
    let top_left = out.get_pixel(2, 2).0; // cell (0,0) -> thumb 0
    let top_right = out.get_pixel(57, 2).0; // cell (5,0) -> thumb 2
    assert!(
        (i32::from(top_left[0]) - dimmed(90, cfg.background_opacity)).abs() <= 1,
        "top-left cell should be dimmed thumb 0, got {top_left:?}"
    );
    assert!(
        (i32::from(top_right[2]) - dimmed(90, cfg.background_opacity)).abs() <= 1,
        "top-right cell should be dimmed thumb 2, got {top_right:?}"
    );
    assert!(
        (i32::from(top_right[0]) - dimmed(0, cfg.background_opacity)).abs() <= 1,
        "top-right red channel should be dimmed zero, got {top_right:?}"
    );
}

#[test]
fn end_to_end_render_is_deterministic() {
    let thumbs: Vec<RgbImage> = eight_colors().iter().map(|&c| solid(50, 50, c)).collect();
    let cfg = scenario_cfg();

    let a = render_mosaic(&thumbs, &cfg, &BuiltinOnly).unwrap();
    let b = render_mosaic(&thumbs, &cfg, &BuiltinOnly).unwrap();
    assert_eq!(a.as_raw(), b.as_raw());
}

#[test]
fn end_to_end_output_channels_never_overflow() {
    // Saturated thumbnails push every blend term to its extreme.
    let thumbs = vec![solid(50, 50, [255, 255, 255]), solid(50, 50, [0, 0, 0])];
    let mut cfg = scenario_cfg();
    cfg.blur_strength = 2;

    let out = render_mosaic(&thumbs, &cfg, &BuiltinOnly).unwrap();
    assert_eq!(out.dimensions(), (200, 100));
    // u8 storage bounds the channels; a panic or wrap in the blend would
    // have surfaced before this point.
    assert!(out.as_raw().iter().any(|&v| v > 0));
}

#[test]
fn text_and_border_masks_are_pixel_disjoint() {
    let cfg = scenario_cfg();
    let mask = mural::render_text_mask(&cfg, &BuiltinOnly).unwrap();
    let dilated = mural::mask::dilate(&mask, cfg.border_filter_size).unwrap();
    let border = mural::mask::border_only(&dilated, &mask).unwrap();

    for y in 0..mask.height() {
        for x in 0..mask.width() {
            assert_eq!(
                mask.get(x, y).min(border.get(x, y)),
                0,
                "overlap at ({x},{y})"
            );
        }
    }
}
