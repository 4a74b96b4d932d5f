#![allow(clippy::many_single_char_names)]

//! Tile-grid platformer movement: one actor against a static collision grid,
//! with one-way platforms, step-up ledges, ground snapping, coyote time,
//! jump buffering and variable jump height.

use serde::{Deserialize, Serialize};

pub mod actor;
pub mod anim;
pub mod error;
pub mod grid;
pub mod input;
pub mod integrate;
pub mod params;
pub mod trigger;

pub use actor::Actor;
pub use anim::{AnimController, AnimState, Clip};
pub use error::{ConfigError, GridError};
pub use grid::{CollisionLayer, TileGrid, TileKind};
pub use input::{Buttons, InputLatch, Intent};
pub use integrate::{integrate, Events};
pub use params::MotionParams;
pub use trigger::{Trigger, TriggerKind, TriggerSet};

pub const HZ: f32 = 60.0;
pub const DT: f32 = 1.0 / HZ;
/// Longest frame the integrator is fed; longer hitches are truncated.
pub const MAX_DT: f32 = 0.1;

/// Clamp a measured frame time into `[0, MAX_DT]`. NaN becomes 0.
#[inline]
pub fn clamp_dt(dt: f32) -> f32 {
    if dt > 0.0 {
        dt.min(MAX_DT)
    } else {
        0.0
    }
}

/// Top-left anchored rectangle.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn center(&self) -> (f32, f32) {
        (self.x + 0.5 * self.w, self.y + 0.5 * self.h)
    }
}

#[inline]
pub fn rects_intersect(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.w && a.x + a.w > b.x && a.y < b.y + b.h && a.y + a.h > b.y
}
