// Posture monitor state machine - calibrates while unarmed, guards the
// frozen reference while armed.

use super::alarm::{AlarmController, AlarmError, AudioResource};
use super::boundary;
use super::model::{BoundingBox, MonitorStatus, Tolerance};

pub struct PostureMonitor<A: AudioResource> {
    armed: bool,
    reference: BoundingBox,
    current: BoundingBox,
    tolerance: Tolerance,
    alarm: AlarmController<A>,
}

impl<A: AudioResource> PostureMonitor<A> {
    pub fn new(audio: A, tolerance: Tolerance) -> Self {
        Self {
            armed: false,
            reference: BoundingBox::default(),
            current: BoundingBox::default(),
            tolerance,
            alarm: AlarmController::new(audio),
        }
    }

    /// Freeze the current reference and start guarding against it. The
    /// reference is whatever the last unarmed tick observed; arming never
    /// re-captures it.
    pub fn start(&mut self) {
        self.armed = true;
    }

    /// Return to calibration. The alarm is silenced unconditionally so it
    /// can never keep sounding once monitoring is off.
    pub fn stop(&mut self) {
        self.armed = false;
        self.alarm.stop();
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// The guarded region, for the application to draw.
    pub fn reference(&self) -> BoundingBox {
        self.reference
    }

    pub fn tolerance(&self) -> Tolerance {
        self.tolerance
    }

    /// Live tolerance update; takes effect on the next tick.
    pub fn set_tolerance(&mut self, tolerance: Tolerance) {
        self.tolerance = tolerance;
    }

    pub fn is_alarming(&self) -> bool {
        self.alarm.is_playing()
    }

    /// Advance one tick with the position observed in the latest frame.
    ///
    /// Unarmed, the observation becomes the new reference. Armed, it is
    /// tested against the frozen reference: a breach starts the alarm,
    /// compliance silences it, and an unchanged verdict touches nothing.
    /// An audio failure is returned to the caller; the monitor itself
    /// stays consistent and keeps accepting frames.
    pub fn on_frame(&mut self, current: BoundingBox) -> Result<(), AlarmError> {
        self.current = current;

        if !self.armed {
            self.reference = current;
            return Ok(());
        }

        if boundary::head_within_boundary(self.reference, current, self.tolerance) {
            if self.alarm.is_playing() {
                self.alarm.stop();
            }
            Ok(())
        } else {
            self.alarm.play()
        }
    }

    pub fn status(&self) -> MonitorStatus {
        MonitorStatus {
            armed: self.armed,
            reference: self.reference,
            current: self.current,
            alarm_active: self.alarm.is_playing(),
        }
    }
}
