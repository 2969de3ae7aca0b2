// Containment test for the guarded head region.

use super::model::{BoundingBox, Tolerance};

/// Returns true when `current` lies entirely inside `reference` grown by
/// `pad_x`/`pad_y` on each side.
///
/// A zero-area `current` box means the detector saw nothing this frame;
/// that counts as in-bounds so a transient dropout never sounds the alarm.
pub fn head_within_boundary(
    reference: BoundingBox,
    current: BoundingBox,
    tolerance: Tolerance,
) -> bool {
    if current.is_empty() {
        return true;
    }

    let Tolerance { pad_x, pad_y } = tolerance;

    reference.x - pad_x <= current.x
        && current.x + current.w <= reference.x + reference.w + pad_x
        && reference.y - pad_y <= current.y
        && current.y + current.h <= reference.y + reference.h + pad_y
}
