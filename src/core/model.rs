use serde::{Deserialize, Serialize};

/// Axis-aligned pixel rectangle, origin top-left. Extents are never
/// negative; a zero-area box is the detector's "nothing found" sentinel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl BoundingBox {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// True when this box carries no detection.
    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    pub fn area(&self) -> i64 {
        i64::from(self.w) * i64::from(self.h)
    }
}

/// Horizontal/vertical slack added around the reference box before the
/// containment test.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tolerance {
    pub pad_x: i32,
    pub pad_y: i32,
}

impl Tolerance {
    pub fn new(pad_x: i32, pad_y: i32) -> Self {
        Self { pad_x, pad_y }
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            pad_x: 30,
            pad_y: 30,
        }
    }
}

/// Per-tick snapshot for the embedding application: what is guarded, what
/// was seen, and whether the alarm is sounding.
#[derive(Clone, Debug, Serialize)]
pub struct MonitorStatus {
    pub armed: bool,
    pub reference: BoundingBox,
    pub current: BoundingBox,
    pub alarm_active: bool,
}
