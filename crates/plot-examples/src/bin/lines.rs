// File: crates/plot-examples/src/bin/lines.rs
// Summary: Line and scatter series rendered to both SVG and PNG.

use anyhow::Result;
use plot_core::{
    Annotation, DataPoint, LineAnnotation, LineSeries, PlotModel, ScatterSeries, SvgExporter,
};

fn main() -> Result<()> {
    let mut model = PlotModel::new().with_title("Damped oscillation");
    model.subtitle = Some("exp(-x/4) * cos(2x)".to_string());

    model.add_series(
        LineSeries::from_function(|x| (-x / 4.0).exp() * (2.0 * x).cos(), 0.0, 10.0, 400)
            .with_title("signal"),
    );
    model.add_series(
        LineSeries::from_function(|x| (-x / 4.0).exp(), 0.0, 10.0, 100).with_title("envelope"),
    );

    // A few sampled observations on top
    let samples: Vec<DataPoint> = (0..20)
        .map(|i| {
            let x = i as f64 * 0.5;
            DataPoint::new(x, (-x / 4.0).exp() * (2.0 * x).cos())
        })
        .collect();
    model.add_series(ScatterSeries::with_points(samples).with_title("samples"));

    model.add_annotation(Annotation::Line(
        LineAnnotation::horizontal(0.0).with_text("zero"),
    ));

    let out = std::path::PathBuf::from("target/out");
    std::fs::create_dir_all(&out)?;

    let svg_path = out.join("lines.svg");
    let mut file = std::fs::File::create(&svg_path)?;
    SvgExporter::export(&mut model, 800.0, 600.0, &mut file)?;
    println!("Wrote {}", svg_path.display());

    let png_path = out.join("lines.png");
    plot_render_skia::render_to_png(&mut model, 800, 600, &png_path)?;
    println!("Wrote {}", png_path.display());

    Ok(())
}
