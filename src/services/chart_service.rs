use plotters::prelude::*;
use thiserror::Error;
use crate::models::{ChartOutcome, ChartPoint, Trend};
use crate::services::price_service;
use crate::services::tracker::PriceHistoryTracker;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChartError {
    #[error("Chart surface {0}x{1} is too small")]
    SurfaceTooSmall(u32, u32),
    #[error("Failed to render chart: {0}")]
    Render(String),
}

/// Output file and pixel size of the chart
#[derive(Debug, Clone)]
pub struct ChartSettings {
    pub path: String,
    pub width: u32,
    pub height: u32,
    pub margin: u32,
}

impl ChartSettings {
    pub fn new(path: String, width: u32, height: u32) -> Self {
        Self { path, width, height, margin: 10 }
    }
}

/// Map normalized chart points onto a `width x height` pixel surface
pub fn to_pixels<I>(points: I, width: u32, height: u32, margin: u32) -> Vec<(i32, i32)>
where
    I: IntoIterator<Item = ChartPoint>,
{
    let plot_w = width.saturating_sub(2 * margin) as f64;
    let plot_h = height.saturating_sub(2 * margin) as f64;

    points
        .into_iter()
        .map(|p| {
            (
                (margin as f64 + p.x * plot_w).round() as i32,
                (margin as f64 + p.y * plot_h).round() as i32,
            )
        })
        .collect()
}

/// Draw the tracker's history as a line chart PNG
pub fn render_chart(tracker: &PriceHistoryTracker, settings: &ChartSettings) -> Result<ChartOutcome, ChartError> {
    if settings.width <= 2 * settings.margin || settings.height <= 2 * settings.margin {
        return Err(ChartError::SurfaceTooSmall(settings.width, settings.height));
    }

    let pixels = to_pixels(tracker.project(), settings.width, settings.height, settings.margin);
    if pixels.is_empty() {
        return Ok(ChartOutcome::NothingToDraw);
    }

    let color = match price_service::trend(tracker) {
        Trend::Up => GREEN,
        Trend::Down => RED,
        _ => BLUE,
    };

    {
        let backend = BitMapBackend::new(&settings.path, (settings.width, settings.height));
        let root = backend.into_drawing_area();
        root.fill(&WHITE)
            .map_err(|e| ChartError::Render(format!("Failed to fill canvas: {}", e)))?;

        root.draw(&PathElement::new(pixels.clone(), color.stroke_width(2)))
            .map_err(|e| ChartError::Render(format!("Failed to draw line: {}", e)))?;

        for &point in &pixels {
            root.draw(&Circle::new(point, 3, color.filled()))
                .map_err(|e| ChartError::Render(format!("Failed to draw point: {}", e)))?;
        }

        root.present()
            .map_err(|e| ChartError::Render(e.to_string()))?;
    }

    Ok(ChartOutcome::Rendered { path: settings.path.clone(), points: pixels.len() })
}
