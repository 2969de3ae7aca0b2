use serde::{Deserialize, Serialize};

use super::model::BoundingBox;

/// One candidate region from the external detector.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub bounds: BoundingBox,
    pub confidence: f32,
}

/// Feed of head positions, one per sampled frame.
///
/// Implementations wrap whatever camera/detector stack the application
/// uses and may keep per-frame tracking state, hence `&mut self`.
/// `None` means no frame was available this tick; a frame in which the
/// detector found nothing is reported as the zero-area box.
pub trait PositionSource {
    fn next_position(&mut self) -> Option<BoundingBox>;
}

/// Reduce the detector's candidate list to the single box the monitor
/// tracks: the largest area wins. An empty list yields the zero-area
/// sentinel.
pub fn select_primary(detections: &[Detection]) -> BoundingBox {
    let mut best = BoundingBox::default();
    let mut max_area = 0;

    for detection in detections {
        let area = detection.bounds.area();
        if area > max_area {
            max_area = area;
            best = detection.bounds;
        }
    }

    best
}
