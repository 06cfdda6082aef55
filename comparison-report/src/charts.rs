use anyhow::Result;
use plotters::prelude::*;
use std::path::Path;

const CHART_SIZE: (u32, u32) = (1024, 768);

/// One named line on a comparison chart.
pub struct Series<'a> {
    pub label: &'a str,
    pub points: Vec<(f64, f64)>,
}

/// Axis ranges covering every point of every series, with a small margin
/// on y so the extreme values do not sit on the frame.
fn data_ranges(series: &[Series]) -> ((f64, f64), (f64, f64)) {
    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for s in series {
        for &(x, y) in &s.points {
            x_min = x_min.min(x);
            x_max = x_max.max(x);
            y_min = y_min.min(y);
            y_max = y_max.max(y);
        }
    }
    if !x_min.is_finite() {
        // No data at all; give the chart a unit window rather than NaN axes.
        return ((0.0, 1.0), (0.0, 1.0));
    }
    if x_min == x_max {
        x_min -= 0.5;
        x_max += 0.5;
    }
    let y_pad = if y_min == y_max {
        0.5
    } else {
        (y_max - y_min) * 0.05
    };
    ((x_min, x_max), (y_min - y_pad, y_max + y_pad))
}

/// Renders one or more labelled line series into a PNG chart with a
/// legend. Series colors follow the standard palette in order.
pub fn line_chart<P: AsRef<Path>>(
    path: P,
    caption: &str,
    x_desc: &str,
    y_desc: &str,
    series: &[Series],
) -> Result<()> {
    let ((x_min, x_max), (y_min, y_max)) = data_ranges(series);

    let root = BitMapBackend::new(path.as_ref(), CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

    chart
        .configure_mesh()
        .x_desc(x_desc)
        .y_desc(y_desc)
        .draw()?;

    for (idx, s) in series.iter().enumerate() {
        let color = Palette99::pick(idx);
        chart
            .draw_series(LineSeries::new(s.points.iter().copied(), &color))?
            .label(s.label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}
