use std::path::{Path, PathBuf};

use anyhow::Context;
use image::RgbImage;

use crate::error::{MuralError, MuralResult};

const IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Enumerate, decode and resize source images from `dir` into thumbnails of
/// exactly `cell_w` x `cell_h`.
///
/// Files are taken in name order (deterministic across runs) and only the
/// first `max_count` candidates are considered; later files are silently
/// ignored. A file that fails to decode is logged and skipped. IO and
/// decoding are front-loaded here so the render stages stay pure.
pub fn load_thumbnails(
    dir: &Path,
    cell_w: u32,
    cell_h: u32,
    max_count: usize,
) -> MuralResult<Vec<RgbImage>> {
    if cell_w == 0 || cell_h == 0 {
        return Err(MuralError::validation("cell dimensions must be > 0"));
    }

    let mut paths = list_image_files(dir)?;
    paths.sort();
    paths.truncate(max_count);

    let mut thumbs = Vec::with_capacity(paths.len());
    for path in &paths {
        match load_one(path, cell_w, cell_h) {
            Ok(img) => thumbs.push(img),
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "skipping unreadable image");
            }
        }
    }

    if thumbs.is_empty() {
        return Err(MuralError::empty_input(format!(
            "no usable images in '{}'",
            dir.display()
        )));
    }

    tracing::info!(
        count = thumbs.len(),
        dir = %dir.display(),
        "loaded thumbnails"
    );
    Ok(thumbs)
}

fn list_image_files(dir: &Path) -> MuralResult<Vec<PathBuf>> {
    let rd = std::fs::read_dir(dir)
        .with_context(|| format!("read image directory '{}'", dir.display()))?;

    let mut paths = Vec::new();
    for entry in rd.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        if IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()) {
            paths.push(path);
        }
    }
    Ok(paths)
}

fn load_one(path: &Path, cell_w: u32, cell_h: u32) -> MuralResult<RgbImage> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    let img = image::load_from_memory(&bytes)
        .with_context(|| format!("decode image '{}'", path.display()))?;
    Ok(image::imageops::resize(
        &img.to_rgb8(),
        cell_w,
        cell_h,
        image::imageops::FilterType::Triangle,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn write_png(dir: &Path, name: &str, rgb: [u8; 3]) {
        let img = RgbImage::from_pixel(12, 8, Rgb(rgb));
        img.save(dir.join(name)).unwrap();
    }

    fn temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("mural-assets-{tag}-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn loads_and_resizes_in_name_order() {
        let dir = temp_dir("order");
        write_png(&dir, "b.png", [0, 255, 0]);
        write_png(&dir, "a.png", [255, 0, 0]);

        let thumbs = load_thumbnails(&dir, 5, 5, 10).unwrap();
        assert_eq!(thumbs.len(), 2);
        assert_eq!(thumbs[0].dimensions(), (5, 5));
        assert_eq!(thumbs[0].get_pixel(2, 2).0, [255, 0, 0]);
        assert_eq!(thumbs[1].get_pixel(2, 2).0, [0, 255, 0]);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn skips_undecodable_files_and_non_images() {
        let dir = temp_dir("skip");
        write_png(&dir, "ok.png", [1, 2, 3]);
        std::fs::write(dir.join("broken.jpg"), b"not an image").unwrap();
        std::fs::write(dir.join("notes.txt"), b"ignored").unwrap();

        let thumbs = load_thumbnails(&dir, 4, 4, 10).unwrap();
        assert_eq!(thumbs.len(), 1);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn truncates_at_max_count() {
        let dir = temp_dir("trunc");
        for i in 0..5 {
            write_png(&dir, &format!("{i}.png"), [i, i, i]);
        }

        let thumbs = load_thumbnails(&dir, 4, 4, 3).unwrap();
        assert_eq!(thumbs.len(), 3);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn empty_directory_is_empty_input() {
        let dir = temp_dir("empty");
        let err = load_thumbnails(&dir, 4, 4, 10).unwrap_err();
        assert!(matches!(err, MuralError::EmptyInput(_)));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = std::env::temp_dir().join("mural-assets-does-not-exist");
        assert!(load_thumbnails(&dir, 4, 4, 10).is_err());
    }
}
