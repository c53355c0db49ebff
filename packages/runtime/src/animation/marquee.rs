use super::SlideBuffer;
use tracing::{debug, warn};

/// Measured geometry of a filled marquee track
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarqueeMetrics {
    /// Width of one copy of the slide set
    pub slide_width: f64,
    /// Width of the whole track after duplication
    pub track_width: f64,
    pub viewport_width: f64,
    /// Copies of the slide set on the track, the original included
    pub copies: usize,
}

impl MarqueeMetrics {
    /// Distance of one loop as a percentage of the track
    pub fn translate_percent(&self) -> f64 {
        100.0 * self.slide_width / self.track_width
    }

    pub fn is_covered(&self) -> bool {
        self.track_width >= self.viewport_width + self.slide_width
    }
}

/// Duplicate the slide set until the track covers the viewport plus one copy.
///
/// `None` when nothing has width: there is nothing to scroll.
pub fn fill_track(buffer: &mut impl SlideBuffer, viewport_width: f64) -> Option<MarqueeMetrics> {
    let slide_width = buffer.width();
    if slide_width <= 0.0 {
        warn!(slide_width, "Marquee slides have no width, skipping duplication");
        return None;
    }

    let mut copies = 1;
    let mut available = slide_width;
    while available < viewport_width + slide_width {
        buffer.duplicate_set();
        copies += 1;
        let measured = buffer.width();
        if measured <= available {
            warn!(measured, available, "Marquee track stopped growing");
            break;
        }
        available = measured;
    }

    let metrics = MarqueeMetrics {
        slide_width,
        track_width: available,
        viewport_width,
        copies,
    };
    debug!(?metrics, "Filled marquee track");
    Some(metrics)
}

/// Scroll speed in px/s: the configured speed, else one slide set per
/// `textAnimationTime`
pub fn speed_px_per_sec(configured: Option<f64>, slide_width: f64, text_animation_ms: f64) -> f64 {
    match configured {
        Some(speed) if speed > 0.0 => speed,
        _ => {
            let secs = if text_animation_ms > 0.0 {
                text_animation_ms / 1000.0
            } else {
                1.0
            };
            slide_width / secs
        }
    }
}

/// Running marquee state
#[derive(Debug, Clone, PartialEq)]
pub struct Marquee {
    pub metrics: MarqueeMetrics,
    pub duration_secs: f64,
}

impl Marquee {
    pub fn new(metrics: MarqueeMetrics, speed_px_per_sec: f64) -> Self {
        let duration_secs = if speed_px_per_sec > 0.0 {
            metrics.slide_width / speed_px_per_sec
        } else {
            0.0
        };
        Self {
            metrics,
            duration_secs,
        }
    }
}
