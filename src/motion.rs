//! Motion frame decoding and validation.

use crate::registers::{MotionStatus, MOTION_BURST_LEN, MOTION_REGISTERS_LEN};

// Frames below this surface quality are suspect when the shutter is also saturated.
const MIN_SQUAL: u8 = 0x19;
const SHUTTER_UPPER_SATURATED: u8 = 0x1F;

/// Relative displacement reported by the sensor since the previous read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionSample {
    /// Displacement along the X axis.
    pub x: i16,
    /// Displacement along the Y axis.
    pub y: i16,
}

impl From<MotionSample> for (i16, i16) {
    fn from(sample: MotionSample) -> Self {
        (sample.x, sample.y)
    }
}

/// Decoded motion burst payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionFrame {
    /// `MOTION` register contents.
    pub dr: u8,
    /// `OBSERVATION` register contents.
    pub observation: u8,
    /// Signed X displacement.
    pub delta_x: i16,
    /// Signed Y displacement.
    pub delta_y: i16,
    /// Surface quality.
    pub squal: u8,
    /// Sum of raw pixel data.
    pub raw_sum: u8,
    /// Maximum raw pixel value.
    pub raw_max: u8,
    /// Minimum raw pixel value.
    pub raw_min: u8,
    /// Upper byte of the shutter value.
    pub shutter_upper: u8,
    /// Lower byte of the shutter value.
    pub shutter_lower: u8,
}

impl MotionFrame {
    /// Decodes a burst payload (command echo already removed).
    pub fn from_bytes(raw: &[u8; MOTION_BURST_LEN]) -> Self {
        Self {
            dr: raw[0],
            observation: raw[1],
            delta_x: i16::from_le_bytes([raw[2], raw[3]]),
            delta_y: i16::from_le_bytes([raw[4], raw[5]]),
            squal: raw[6],
            raw_sum: raw[7],
            raw_max: raw[8],
            raw_min: raw[9],
            shutter_upper: raw[10],
            shutter_lower: raw[11],
        }
    }

    /// Whether the motion flag is set.
    pub fn has_motion(&self) -> bool {
        MotionStatus::from(self.dr).motion()
    }

    /// Low surface quality combined with a saturated shutter means poor lighting.
    pub fn is_low_confidence(&self) -> bool {
        self.squal < MIN_SQUAL && self.shutter_upper == SHUTTER_UPPER_SATURATED
    }

    /// Returns the displacement if the frame carries trustworthy motion.
    pub fn sample(&self) -> Option<MotionSample> {
        if self.has_motion() && !self.is_low_confidence() {
            Some(MotionSample {
                x: self.delta_x,
                y: self.delta_y,
            })
        } else {
            None
        }
    }
}

/// Decodes `MOTION` through `DELTA_Y_H`, returning the displacement when the motion flag is set.
pub fn sample_from_registers(raw: &[u8; MOTION_REGISTERS_LEN]) -> Option<MotionSample> {
    if !MotionStatus::from(raw[0]).motion() {
        return None;
    }

    Some(MotionSample {
        x: i16::from_le_bytes([raw[1], raw[2]]),
        y: i16::from_le_bytes([raw[3], raw[4]]),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(dr: u8, squal: u8, shutter_upper: u8) -> [u8; MOTION_BURST_LEN] {
        [dr, 0x50, 0x0A, 0x00, 0xF6, 0xFF, squal, 0, 0, 0, shutter_upper, 0]
    }

    #[test]
    fn decodes_little_endian_deltas() {
        let decoded = MotionFrame::from_bytes(&[
            0x80, 0x50, 0x0A, 0x00, 0xF6, 0xFF, 0x50, 0x11, 0x22, 0x33, 0x44, 0x55,
        ]);

        assert_eq!(decoded.dr, 0x80);
        assert_eq!(decoded.observation, 0x50);
        assert_eq!(decoded.delta_x, 10);
        assert_eq!(decoded.delta_y, -10);
        assert_eq!(decoded.squal, 0x50);
        assert_eq!(decoded.raw_sum, 0x11);
        assert_eq!(decoded.raw_max, 0x22);
        assert_eq!(decoded.raw_min, 0x33);
        assert_eq!(decoded.shutter_upper, 0x44);
        assert_eq!(decoded.shutter_lower, 0x55);
        assert_eq!(decoded.sample(), Some(MotionSample { x: 10, y: -10 }));
    }

    #[test]
    fn frame_without_motion_flag_is_rejected() {
        assert_eq!(MotionFrame::from_bytes(&frame(0x7F, 0x50, 0x00)).sample(), None);
    }

    #[test]
    fn low_quality_at_max_shutter_is_rejected() {
        assert_eq!(MotionFrame::from_bytes(&frame(0x80, 0x10, 0x1F)).sample(), None);
    }

    #[test]
    fn either_low_confidence_condition_alone_is_accepted() {
        assert!(MotionFrame::from_bytes(&frame(0x80, 0x10, 0x1E)).sample().is_some());
        assert!(MotionFrame::from_bytes(&frame(0x80, 0x19, 0x1F)).sample().is_some());
    }

    #[test]
    fn register_sample_uses_motion_flag_only() {
        assert_eq!(
            sample_from_registers(&[0x80, 0x34, 0x12, 0x00, 0x80]),
            Some(MotionSample { x: 0x1234, y: i16::MIN })
        );
        assert_eq!(sample_from_registers(&[0x00, 0x34, 0x12, 0x00, 0x80]), None);
    }
}
