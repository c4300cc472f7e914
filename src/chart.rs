//! Renders a history series as an inline SVG line chart.

use anyhow::{Result, anyhow, bail};
use chrono::NaiveDate;
use plotters::prelude::*;
use std::ops::Range;

use crate::core::history::HistorySeries;

const WIDTH: u32 = 900;
const HEIGHT: u32 = 450;

/// Draws the commercial/tourism/average lines for a series.
///
/// The series must hold at least two points spanning more than one date;
/// anything thinner has no line to draw and the page shows a notice instead.
pub fn render_history_svg(series: &HistorySeries, title: &str) -> Result<String> {
    if series.len() < 2 {
        bail!("not enough points to chart: {}", series.len());
    }

    let x_range = series[0].date..series[series.len() - 1].date;
    if x_range.start == x_range.end {
        bail!("history spans a single date: {}", x_range.start);
    }

    let mut y_min = f64::MAX;
    let mut y_max = f64::MIN;
    for point in series {
        y_min = y_min.min(point.commercial);
        y_max = y_max.max(point.tourism);
    }

    // Flat series still get a visible band around the line.
    let span = (y_max - y_min).max(y_max.abs() * 0.01).max(0.0001);
    let y_range = (y_min - span * 0.05)..(y_max + span * 0.05);

    let mut svg = String::new();
    draw(&mut svg, series, title, x_range, y_range)
        .map_err(|e| anyhow!("chart rendering failed: {e}"))?;
    Ok(svg)
}

fn draw(
    out: &mut String,
    series: &HistorySeries,
    title: &str,
    x_range: Range<NaiveDate>,
    y_range: Range<f64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let root = SVGBackend::with_string(out, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 22))
        .margin(12)
        .x_label_area_size(48)
        .y_label_area_size(64)
        .build_cartesian_2d(x_range, y_range)?;

    chart
        .configure_mesh()
        .x_labels(8)
        .x_label_formatter(&|date: &NaiveDate| date.format("%d/%m/%Y").to_string())
        .y_label_formatter(&|value: &f64| format!("{value:.2}"))
        .draw()?;

    chart
        .draw_series(LineSeries::new(
            series.iter().map(|p| (p.date, p.average)),
            GREEN.stroke_width(2),
        ))?
        .label("Average")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 16, y)], GREEN.stroke_width(2)));

    chart
        .draw_series(LineSeries::new(
            series.iter().map(|p| (p.date, p.commercial)),
            &BLUE,
        ))?
        .label("Commercial")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 16, y)], BLUE));

    chart
        .draw_series(LineSeries::new(
            series.iter().map(|p| (p.date, p.tourism)),
            &RED,
        ))?
        .label("Tourism")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 16, y)], RED));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::history::derive_history;
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn sample_series() -> HistorySeries {
        derive_history([
            (date("2025-03-08"), 5.0),
            (date("2025-03-09"), 5.1),
            (date("2025-03-10"), 5.05),
        ])
    }

    #[test]
    fn test_render_contains_series_labels() {
        let svg = render_history_svg(&sample_series(), "US Dollar - 1 Month").unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("US Dollar - 1 Month"));
        assert!(svg.contains("Average"));
        assert!(svg.contains("Commercial"));
        assert!(svg.contains("Tourism"));
    }

    #[test]
    fn test_render_flat_series() {
        let series = derive_history([(date("2025-03-08"), 5.0), (date("2025-03-09"), 5.0)]);
        assert!(render_history_svg(&series, "flat").is_ok());
    }

    #[test]
    fn test_render_rejects_thin_series() {
        assert!(render_history_svg(&Vec::new(), "empty").is_err());

        let single = derive_history([(date("2025-03-08"), 5.0)]);
        assert!(render_history_svg(&single, "single").is_err());

        let same_day = derive_history([(date("2025-03-08"), 5.0), (date("2025-03-08"), 5.2)]);
        assert!(render_history_svg(&same_day, "same day").is_err());
    }
}
