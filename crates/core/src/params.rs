use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Tunables for [`crate::integrate`]. Velocities are px/s, times are
/// seconds, distances are pixels. `jump_vel` is negative (up).
///
/// Loaded from JSON with every field optional; missing fields keep their
/// default. Hosts may swap the whole block between frames.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionParams {
    // Vertical
    pub gravity: f32,
    pub max_fall: f32,

    // Horizontal
    pub move_speed: f32,
    pub accel: f32,
    pub air_control: f32,
    pub friction_ground: f32,
    pub friction_air: f32,

    // Jump
    pub jump_vel: f32,
    pub jump_cut_factor: f32,
    pub coyote_time: f32,
    pub jump_buffer_time: f32,

    // Collision stepping / grounding
    pub step_max_pixels: u32,
    pub ground_snap_dist: f32,

    // One-way platforms
    pub drop_through_time: f32,
    /// Extra tolerance on the "was above last frame" landing test. 0 keeps
    /// the strict `prev_bottom <= tile_top` rule.
    pub oneway_slack: f32,
}

impl Default for MotionParams {
    fn default() -> Self {
        Self {
            gravity: 1800.0,
            max_fall: 900.0,

            move_speed: 260.0,
            accel: 12.0,
            air_control: 0.6,
            friction_ground: 20.0,
            friction_air: 1.0,

            jump_vel: -900.0,
            jump_cut_factor: 0.5,
            coyote_time: 0.10,
            jump_buffer_time: 0.12,

            step_max_pixels: 8,
            ground_snap_dist: 3.0,

            drop_through_time: 0.18,
            oneway_slack: 0.0,
        }
    }
}

impl MotionParams {
    /// Parse a (possibly partial) JSON object and validate the result.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let params: Self = serde_json::from_str(json)?;
        params.validate()?;
        log::debug!("motion params loaded: {:?}", params);
        Ok(params)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let non_negative = [
            ("gravity", self.gravity),
            ("max_fall", self.max_fall),
            ("move_speed", self.move_speed),
            ("accel", self.accel),
            ("air_control", self.air_control),
            ("friction_ground", self.friction_ground),
            ("friction_air", self.friction_air),
            ("coyote_time", self.coyote_time),
            ("jump_buffer_time", self.jump_buffer_time),
            ("ground_snap_dist", self.ground_snap_dist),
            ("drop_through_time", self.drop_through_time),
            ("oneway_slack", self.oneway_slack),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Negative { name, value });
            }
        }
        if !(self.jump_vel.is_finite() && self.jump_vel <= 0.0) {
            return Err(ConfigError::JumpVel(self.jump_vel));
        }
        if !(0.0..=1.0).contains(&self.jump_cut_factor) {
            return Err(ConfigError::JumpCut(self.jump_cut_factor));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        MotionParams::default().validate().unwrap();
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let params = MotionParams::from_json(r#"{ "move_speed": 300, "step_max_pixels": 4 }"#).unwrap();
        assert_eq!(params.move_speed, 300.0);
        assert_eq!(params.step_max_pixels, 4);
        assert_eq!(params.gravity, MotionParams::default().gravity);
        assert_eq!(params.jump_vel, -900.0);
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert!(matches!(
            MotionParams::from_json(r#"{ "gravity": -1 }"#),
            Err(ConfigError::Negative { name: "gravity", .. })
        ));
        assert!(matches!(
            MotionParams::from_json(r#"{ "jump_vel": 900 }"#),
            Err(ConfigError::JumpVel(_))
        ));
        assert!(matches!(
            MotionParams::from_json(r#"{ "jump_cut_factor": 1.5 }"#),
            Err(ConfigError::JumpCut(_))
        ));
        assert!(matches!(
            MotionParams::from_json("{ not json"),
            Err(ConfigError::Json(_))
        ));
    }
}
