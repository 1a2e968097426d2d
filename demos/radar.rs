//! Radial Plot Example
//!
//! Compares two service releases across five quality attributes, with a
//! target band, a reference ring and a highlighted category.
//!
//! Run with: `RUST_LOG=debug cargo run --example radar --features tracing`

use std::rc::Rc;

use tracing_subscriber::EnvFilter;
use trueno_radar::prelude::*;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("Radial Plot Example");
    println!("===================\n");

    // Step 1: Build the dataset
    let data = SimpleCategoryDataset::from_rows(
        &["v1.4", "v2.0"],
        &["Latency", "Throughput", "Cost", "Uptime", "Security"],
        &[
            &[Some(3.0), Some(2.5), Some(4.0), Some(4.5), Some(2.0)],
            &[Some(4.5), Some(4.0), Some(3.0), None, Some(4.0)],
        ],
    );
    println!("Step 1: {} series x {} categories", data.row_count(), data.column_count());

    // Step 2: Configure the plot
    let mut plot = RadialPlot::with_dataset(Rc::new(data));
    plot.set_interior_gap(0.2)?;
    plot.set_max_value(5.0)?;
    plot.set_series_paint(0, Some(Rgba::rgb(31, 119, 180)));
    plot.set_series_paint(1, Some(Rgba::rgb(255, 127, 14)));
    plot.set_series_outline_stroke_override(Some(Stroke::solid(1.5)));
    plot.set_head_percent(0.02)?;
    for axis in 0..5 {
        plot.set_axis_line_visible(axis, true);
    }
    plot.set_base_axis_line_paint(Rgba::LIGHT_GRAY);

    plot.add_interval_marker(IntervalMarker::with_style(
        4.0,
        5.0,
        MarkerStyle::with_paint(Rgba::rgb(200, 230, 200)).alpha(0.6),
    )?);
    plot.add_value_marker(ValueMarker::with_style(
        2.5,
        MarkerStyle::with_paint(Rgba::GRAY)
            .stroke(Stroke::dashed(1.0, &[4.0, 3.0]))
            .label("baseline"),
    ));
    let mut marker = CategoryMarker::with_style(
        "Security",
        MarkerStyle::with_paint(Rgba::rgb(255, 220, 220)).label("focus area"),
    )
    .render_as(MarkerRenderType::BetweenEdges);
    marker.set_label_on_arc(true);
    plot.add_category_marker(marker);

    for item in plot.legend_items() {
        println!("  legend: {} {}", item.label, item.fill_paint.to_css());
    }

    // Step 3: Render
    println!("\nStep 2: Rendering...");
    plot.write_svg("radar.svg", 480, 480)?;
    plot.write_png("radar.png", 480, 480)?;
    println!("  Saved radar.svg and radar.png");
    let (min, max, mean) = plot.to_framebuffer(480, 480)?.luminance_stats();
    println!("  Luminance min={min:.0} max={max:.0} mean={mean:.1}");

    // Step 4: Persist the configuration
    plot.save("radar.yaml")?;
    let restored = RadialPlot::load("radar.yaml")?;
    println!("  Restored definition equal: {}", restored == plot);

    Ok(())
}
