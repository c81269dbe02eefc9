use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::types::search_result::{BoundingBox, LngLat, SearchResult};

pub const DEFAULT_ZOOM: f64 = 4.0;
pub const FIT_PADDING_PX: u32 = 40;
pub const CAMERA_DURATION: Duration = Duration::from_millis(1500);

/// Camera surface of the map renderer. Search only ever commands it.
pub trait MapView: Send + Sync {
    fn fly_to(&self, center: LngLat, zoom: f64, duration: Duration);
    fn fit_bounds(&self, bbox: BoundingBox, padding_px: u32, duration: Duration);
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CameraCommand {
    FlyTo {
        center: LngLat,
        zoom: f64,
        duration_ms: u64,
    },
    FitBounds {
        bbox: BoundingBox,
        padding_px: u32,
        duration_ms: u64,
    },
}

#[derive(Debug, Clone, Copy)]
pub struct CameraSettings {
    pub default_zoom: f64,
    pub fit_padding_px: u32,
    pub duration: Duration,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            default_zoom: DEFAULT_ZOOM,
            fit_padding_px: FIT_PADDING_PX,
            duration: CAMERA_DURATION,
        }
    }
}

impl CameraCommand {
    /// Bounding box wins over the center point when the result has one.
    pub fn for_result(result: &SearchResult, settings: &CameraSettings) -> Self {
        let duration_ms = settings.duration.as_millis() as u64;

        match result.bounding_box {
            Some(bbox) => CameraCommand::FitBounds {
                bbox,
                padding_px: settings.fit_padding_px,
                duration_ms,
            },
            None => CameraCommand::FlyTo {
                center: result.center,
                zoom: settings.default_zoom,
                duration_ms,
            },
        }
    }

    pub fn issue(&self, map: &dyn MapView) {
        match *self {
            CameraCommand::FlyTo {
                center,
                zoom,
                duration_ms,
            } => map.fly_to(center, zoom, Duration::from_millis(duration_ms)),
            CameraCommand::FitBounds {
                bbox,
                padding_px,
                duration_ms,
            } => map.fit_bounds(bbox, padding_px, Duration::from_millis(duration_ms)),
        }
    }
}
