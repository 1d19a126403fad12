// File: crates/plot-render-skia/tests/render.rs
// Purpose: Validate RGBA buffer shape and PNG encoding of the raster pipeline.

use image::GenericImageView;
use plot_core::{DataPoint, LineSeries, PlotModel};
use plot_render_skia::{render_to_png_bytes, render_to_rgba8};

fn sine_model() -> PlotModel {
    let mut m = PlotModel::new().with_title("sine");
    m.add_series(LineSeries::with_points(
        (0..64)
            .map(|i| {
                let x = i as f64 * 0.1;
                DataPoint::new(x, x.sin())
            })
            .collect(),
    ));
    m
}

#[test]
fn rgba_buffer_has_the_expected_shape() {
    let (px, w, h, stride) = render_to_rgba8(&mut sine_model(), 320, 240).expect("rgba render");
    assert_eq!(w as usize * h as usize * 4, px.len());
    assert_eq!(stride, w as usize * 4);

    // Check page alpha in the top-left pixel (RGBA)
    assert_eq!(px[3], 255);
}

#[test]
fn png_bytes_decode_to_the_requested_size() {
    let bytes = render_to_png_bytes(&mut sine_model(), 320, 240).expect("png render");
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    let img = image::load_from_memory(&bytes).expect("png decode");
    assert_eq!(img.dimensions(), (320, 240));
}
