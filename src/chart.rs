//! PNG rendering of a [`HistogramResult`].
//!
//! Drawing goes through the [`plotters`] bitmap backend into an in-memory RGB
//! buffer, which is then encoded with [`image`].  Text is rasterised with the
//! Ubuntu typeface egui already bundles, so no system fonts are needed.

use std::io::Cursor;
use std::sync::OnceLock;

use image::{ImageFormat, RgbImage};
use plotters::prelude::*;
use plotters::style::register_font;
use thiserror::Error;

use crate::data::HistogramResult;

/// Output size in pixels.
pub const CHART_WIDTH: u32 = 800;
pub const CHART_HEIGHT: u32 = 600;

pub const CHART_TITLE: &str = "Distribution of Sodium to Potassium Ratios";
pub const X_LABEL: &str = "Ratio";
pub const Y_LABEL: &str = "Frequency";

const FONT_FAMILY: &str = "sans-serif";
const BAR_FILL: RGBColor = RGBColor(135, 206, 235);

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("failed to load chart font: {0}")]
    Font(String),

    #[error("failed to draw chart: {0}")]
    Drawing(String),

    #[error("failed to encode chart as PNG: {0}")]
    Encoding(#[from] image::ImageError),

    #[error("pixel buffer does not match the chart dimensions")]
    Buffer,
}

type Result<T> = core::result::Result<T, ChartError>;

fn drawing<E: std::fmt::Display>(err: E) -> ChartError {
    ChartError::Drawing(err.to_string())
}

fn ensure_font() -> Result<()> {
    static REGISTERED: OnceLock<core::result::Result<(), String>> = OnceLock::new();
    REGISTERED
        .get_or_init(|| {
            register_font(FONT_FAMILY, FontStyle::Normal, epaint_default_fonts::UBUNTU_LIGHT)
                .map_err(|_| "embedded Ubuntu typeface could not be parsed".to_string())
        })
        .clone()
        .map_err(ChartError::Font)
}

/// Render the histogram as an encoded PNG of [`CHART_WIDTH`]x[`CHART_HEIGHT`].
///
/// One filled bar per bucket with a black outline, titled, with labelled
/// axes and a grid.  A degenerate histogram (all values equal) is drawn as a
/// single unit-wide bar centred on the value.
pub fn render_histogram(histogram: &HistogramResult) -> Result<Vec<u8>> {
    ensure_font()?;

    let bars = bar_rects(histogram);
    let (x_min, x_max) = bars
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &(l, h, _)| {
            (lo.min(l), hi.max(h))
        });
    let (x_min, x_max) = if x_min < x_max { (x_min, x_max) } else { (0.0, 1.0) };
    let y_max = (histogram.max_count().max(1) as f64 * 1.05).ceil();

    let mut buffer = vec![0u8; (CHART_WIDTH * CHART_HEIGHT * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (CHART_WIDTH, CHART_HEIGHT))
            .into_drawing_area();
        root.fill(&WHITE).map_err(drawing)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(CHART_TITLE, (FONT_FAMILY, 24))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(60)
            .build_cartesian_2d(x_min..x_max, 0f64..y_max)
            .map_err(drawing)?;

        chart
            .configure_mesh()
            .x_desc(X_LABEL)
            .y_desc(Y_LABEL)
            .x_label_formatter(&|v| format!("{v:.1}"))
            .y_label_formatter(&|v| format!("{v:.0}"))
            .axis_desc_style((FONT_FAMILY, 16))
            .draw()
            .map_err(drawing)?;

        chart
            .draw_series(
                bars.iter()
                    .map(|&(lo, hi, count)| Rectangle::new([(lo, 0.0), (hi, count)], BAR_FILL.filled())),
            )
            .map_err(drawing)?;
        chart
            .draw_series(
                bars.iter()
                    .map(|&(lo, hi, count)| Rectangle::new([(lo, 0.0), (hi, count)], BLACK.stroke_width(1))),
            )
            .map_err(drawing)?;

        root.present().map_err(drawing)?;
    }

    let rgb = RgbImage::from_raw(CHART_WIDTH, CHART_HEIGHT, buffer).ok_or(ChartError::Buffer)?;
    let mut png = Cursor::new(Vec::new());
    rgb.write_to(&mut png, ImageFormat::Png)?;
    let png = png.into_inner();

    log::debug!(
        "Rendered {}-bucket histogram to {} PNG bytes",
        histogram.bucket_count(),
        png.len()
    );
    Ok(png)
}

/// Bar extents in data coordinates.  Zero-width buckets are widened around
/// the value so they stay visible: by 0.5 either side for ordinary values,
/// by a fraction of the magnitude once 0.5 would vanish in rounding.
fn bar_rects(histogram: &HistogramResult) -> Vec<(f64, f64, f64)> {
    if histogram.is_degenerate() {
        let (value, _) = histogram.range();
        let count = histogram.counts.first().copied().unwrap_or(0);
        let pad = (value.abs() * 1e-3).max(0.5);
        let lo = (value - pad).max(f64::MIN);
        let hi = (value + pad).min(f64::MAX);
        return vec![(lo, hi, count as f64)];
    }
    histogram
        .buckets()
        .map(|(lo, hi, count)| (lo, hi, count as f64))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(png: &[u8]) -> image::DynamicImage {
        image::load_from_memory_with_format(png, ImageFormat::Png).unwrap()
    }

    #[test]
    fn renders_png_of_fixed_size() {
        let h = HistogramResult {
            edges: vec![5.0, 10.0, 15.0],
            counts: vec![1, 2],
        };
        let png = render_histogram(&h).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
        let img = decode(&png);
        assert_eq!((img.width(), img.height()), (CHART_WIDTH, CHART_HEIGHT));
    }

    #[test]
    fn degenerate_histogram_still_renders() {
        let h = HistogramResult {
            edges: vec![3.0; 11],
            counts: [vec![4], vec![0; 9]].concat(),
        };
        assert_eq!(bar_rects(&h), vec![(2.5, 3.5, 4.0)]);
        let img = decode(&render_histogram(&h).unwrap());
        assert_eq!(img.width(), CHART_WIDTH);
    }

    #[test]
    fn degenerate_bar_keeps_width_at_large_magnitudes() {
        for value in [1e17, -3e20, 1.5e308, -f64::MAX] {
            let h = HistogramResult {
                edges: vec![value; 11],
                counts: [vec![2], vec![0; 9]].concat(),
            };
            let bars = bar_rects(&h);
            assert_eq!(bars.len(), 1);
            let (lo, hi, count) = bars[0];
            assert!(lo <= value && value <= hi && lo < hi, "{lo} {value} {hi}");
            assert!(lo.is_finite() && hi.is_finite());
            assert_eq!(count, 2.0);
        }

        let h = HistogramResult {
            edges: vec![1e17; 11],
            counts: [vec![5], vec![0; 9]].concat(),
        };
        let img = decode(&render_histogram(&h).unwrap()).to_rgb8();
        let fill = image::Rgb([BAR_FILL.0, BAR_FILL.1, BAR_FILL.2]);
        assert!(img.pixels().any(|p| *p == fill));
    }

    #[test]
    fn bars_use_the_fill_colour() {
        let h = HistogramResult {
            edges: vec![0.0, 1.0],
            counts: vec![10],
        };
        let img = decode(&render_histogram(&h).unwrap()).to_rgb8();
        let fill = image::Rgb([BAR_FILL.0, BAR_FILL.1, BAR_FILL.2]);
        assert!(img.pixels().any(|p| *p == fill));
    }

    #[test]
    fn rendering_is_deterministic() {
        let h = HistogramResult {
            edges: vec![0.0, 2.0, 4.0, 6.0],
            counts: vec![3, 0, 5],
        };
        assert_eq!(render_histogram(&h).unwrap(), render_histogram(&h).unwrap());
    }
}
