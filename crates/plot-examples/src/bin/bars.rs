// File: crates/plot-examples/src/bin/bars.rs
// Summary: Clustered and stacked bar charts over a category axis.

use anyhow::Result;
use plot_core::{Axis, AxisPosition, BarSeries, PlotModel, SvgExporter};

fn quarters() -> Axis {
    Axis::category(AxisPosition::Bottom, vec!["Q1", "Q2", "Q3", "Q4"])
}

fn main() -> Result<()> {
    let out = std::path::PathBuf::from("target/out");
    std::fs::create_dir_all(&out)?;

    // Clustered: one bar per series per quarter
    let mut clustered = PlotModel::new().with_title("Revenue by region");
    clustered.add_axis(quarters());
    clustered.add_axis(Axis::linear(AxisPosition::Left));
    clustered.add_series(BarSeries::with_values(vec![12.0, 14.0, 11.0, 18.0]).with_title("EMEA"));
    clustered.add_series(BarSeries::with_values(vec![9.0, 13.0, 15.0, 16.0]).with_title("APAC"));
    clustered.add_series(BarSeries::with_values(vec![7.0, 6.0, 9.0, 12.0]).with_title("AMER"));

    let path = out.join("bars_clustered.svg");
    let mut file = std::fs::File::create(&path)?;
    SvgExporter::export(&mut clustered, 800.0, 500.0, &mut file)?;
    println!("Wrote {}", path.display());

    // Stacked: the same data accumulated per quarter
    let mut stacked = PlotModel::new().with_title("Total revenue");
    stacked.add_axis(quarters());
    stacked.add_axis(Axis::linear(AxisPosition::Left));
    stacked.add_series(
        BarSeries::with_values(vec![12.0, 14.0, 11.0, 18.0])
            .with_title("EMEA")
            .stacked(),
    );
    stacked.add_series(
        BarSeries::with_values(vec![9.0, 13.0, 15.0, 16.0])
            .with_title("APAC")
            .stacked(),
    );
    stacked.add_series(
        BarSeries::with_values(vec![7.0, 6.0, 9.0, 12.0])
            .with_title("AMER")
            .stacked(),
    );

    let path = out.join("bars_stacked.svg");
    let mut file = std::fs::File::create(&path)?;
    SvgExporter::export(&mut stacked, 800.0, 500.0, &mut file)?;
    println!("Wrote {}", path.display());

    plot_render_skia::render_to_png(&mut stacked, 800, 500, out.join("bars_stacked.png"))?;
    println!("Wrote {}", out.join("bars_stacked.png").display());

    Ok(())
}
