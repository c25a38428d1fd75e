use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "mural", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a mosaic from a directory of images.
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Directory containing source images (jpg/jpeg/png).
    #[arg(long)]
    images: PathBuf,

    /// Output image path; .jpg/.jpeg encodes JPEG at the configured
    /// quality, anything else is saved by extension.
    #[arg(long)]
    out: PathBuf,

    /// Mosaic configuration JSON; defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the rasterized text mask as a grayscale PNG (diagnostic).
    #[arg(long)]
    dump_mask: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
    }
}

fn read_config_json(path: &Path) -> anyhow::Result<mural::MosaicConfig> {
    let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
    let r = BufReader::new(f);
    let cfg: mural::MosaicConfig =
        serde_json::from_reader(r).with_context(|| "parse config JSON")?;
    Ok(cfg)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let cfg = match &args.config {
        Some(path) => read_config_json(path)?,
        None => mural::MosaicConfig::default(),
    };
    cfg.validate()?;

    let (cell_w, cell_h) = cfg.cell_size();
    let thumbs = mural::assets::load_thumbnails(&args.images, cell_w, cell_h, cfg.tile_count())?;

    let resolver = mural::SystemFonts::new();

    if let Some(mask_path) = &args.dump_mask {
        let mask = mural::render_text_mask(&cfg, &resolver)?;
        write_mask_png(mask_path, &mask)?;
        eprintln!("wrote {}", mask_path.display());
    }

    let out_img = mural::render_mosaic(&thumbs, &cfg, &resolver)?;

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    write_output(&args.out, &out_img, cfg.jpeg_quality)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn write_output(path: &Path, img: &image::RgbImage, jpeg_quality: u8) -> anyhow::Result<()> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => {
            let f = File::create(path)
                .with_context(|| format!("create output '{}'", path.display()))?;
            let w = BufWriter::new(f);
            let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(w, jpeg_quality);
            img.write_with_encoder(encoder)
                .with_context(|| format!("encode jpeg '{}'", path.display()))?;
        }
        _ => {
            img.save(path)
                .with_context(|| format!("write image '{}'", path.display()))?;
        }
    }
    Ok(())
}

fn write_mask_png(path: &Path, mask: &mural::Mask) -> anyhow::Result<()> {
    image::save_buffer_with_format(
        path,
        mask.data(),
        mask.width(),
        mask.height(),
        image::ColorType::L8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write mask png '{}'", path.display()))
}
