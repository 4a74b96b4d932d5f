use crate::error::ConfigError;
use crate::Rect;

/// The controlled body. Position is the center of an axis-aligned box of
/// `2*half_w` by `2*half_h`; y grows downward.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Actor {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub half_w: f32,
    pub half_h: f32,

    /// Position at the start of the last step.
    pub prev_x: f32,
    pub prev_y: f32,

    pub on_ground: bool,
    pub coyote_timer: f32,
    pub jump_buffer_timer: f32,
    /// One-way platforms are ignored while this is positive.
    pub drop_timer: f32,
}

impl Actor {
    pub fn new(x: f32, y: f32, half_w: f32, half_h: f32) -> Result<Self, ConfigError> {
        if !(half_w.is_finite() && half_h.is_finite() && half_w > 0.0 && half_h > 0.0) {
            return Err(ConfigError::HalfExtents { half_w, half_h });
        }
        if !(x.is_finite() && y.is_finite()) {
            return Err(ConfigError::Position { x, y });
        }
        Ok(Self {
            x,
            y,
            half_w,
            half_h,
            prev_x: x,
            prev_y: y,
            ..Self::default()
        })
    }

    /// Put the actor back at a spawn point with no momentum and cleared
    /// timers. Extents are kept.
    pub fn respawn(&mut self, x: f32, y: f32) {
        *self = Self {
            x,
            y,
            half_w: self.half_w,
            half_h: self.half_h,
            prev_x: x,
            prev_y: y,
            ..Self::default()
        };
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x - self.half_w
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.half_w
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y - self.half_h
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.half_h
    }

    pub fn aabb(&self) -> Rect {
        Rect {
            x: self.left(),
            y: self.top(),
            w: self.half_w * 2.0,
            h: self.half_h * 2.0,
        }
    }
}
