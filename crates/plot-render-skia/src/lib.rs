// File: crates/plot-render-skia/src/lib.rs
// Summary: Headless raster rendering of plot models via Skia CPU surfaces.

use anyhow::Result;
use plot_core::PlotModel;
use skia_safe as skia;

mod context;
mod text;

pub use context::SkiaRenderContext;
pub use text::TextShaper;

fn render_to_surface(model: &mut PlotModel, width: i32, height: i32) -> Result<skia::Surface> {
    let mut surface = skia::surfaces::raster_n32_premul((width, height))
        .ok_or_else(|| anyhow::anyhow!("failed to create raster surface"))?;
    let canvas = surface.canvas();

    // The model only paints its background when one is set; raster output
    // still needs an opaque page.
    canvas.clear(skia::Color::WHITE);

    let shaper = TextShaper::new();
    let mut rc = SkiaRenderContext::new(canvas, &shaper);
    model.render(&mut rc, f64::from(width), f64::from(height))?;
    Ok(surface)
}

/// Renders the model and encodes the result as PNG bytes.
pub fn render_to_png_bytes(model: &mut PlotModel, width: i32, height: i32) -> Result<Vec<u8>> {
    let mut surface = render_to_surface(model, width, height)?;
    let image = surface.image_snapshot();
    #[allow(deprecated)]
    let data = image
        .encode_to_data(skia::EncodedImageFormat::PNG)
        .ok_or_else(|| anyhow::anyhow!("encode PNG failed"))?;
    Ok(data.as_bytes().to_vec())
}

/// Renders the model to a PNG file, creating parent directories as needed.
pub fn render_to_png(
    model: &mut PlotModel,
    width: i32,
    height: i32,
    output_png_path: impl AsRef<std::path::Path>,
) -> Result<()> {
    let data = render_to_png_bytes(model, width, height)?;
    if let Some(parent) = output_png_path.as_ref().parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(output_png_path, data)?;
    Ok(())
}

/// Renders the model into a tightly packed RGBA8 buffer.
/// Returns `(pixels, width, height, stride)` with `stride == width * 4`.
pub fn render_to_rgba8(
    model: &mut PlotModel,
    width: i32,
    height: i32,
) -> Result<(Vec<u8>, i32, i32, usize)> {
    let mut surface = render_to_surface(model, width, height)?;
    let info = skia::ImageInfo::new(
        (width, height),
        skia::ColorType::RGBA8888,
        skia::AlphaType::Unpremul,
        None,
    );
    let stride = width as usize * 4;
    let mut pixels = vec![0u8; stride * height as usize];
    if !surface.read_pixels(&info, &mut pixels, stride, (0, 0)) {
        anyhow::bail!("read_pixels failed");
    }
    Ok((pixels, width, height, stride))
}
