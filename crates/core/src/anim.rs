//! Animation state selection from physics outputs.
//!
//! Small table-driven state machine: it reads `on_ground`, `vx`, `vy` and the
//! jump event after each step and yields an absolute sprite frame index.

use crate::Actor;

/// Horizontal speed above which the grounded actor counts as running.
const RUN_THRESHOLD: f32 = 30.0;
/// Minimum time the landing pose is held.
const LAND_MIN_SEC: f32 = 0.06;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum AnimState {
    #[default]
    Idle,
    Run,
    Jump,
    Fall,
    Land,
}

impl AnimState {
    pub fn name(self) -> &'static str {
        match self {
            AnimState::Idle => "idle",
            AnimState::Run => "run",
            AnimState::Jump => "jump",
            AnimState::Fall => "fall",
            AnimState::Land => "land",
        }
    }

    fn base_fps(self) -> f32 {
        match self {
            AnimState::Idle => 6.0,
            AnimState::Run => 6.0,
            AnimState::Jump => 12.0,
            AnimState::Fall => 10.0,
            AnimState::Land => 12.0,
        }
    }
}

/// A run of frames in the sprite atlas.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Clip {
    pub start: u32,
    pub count: u32,
    pub looping: bool,
}

/// Run playback rate: 6 fps at rest, 10 fps at 200 px/s, capped at 14.
fn run_fps(speed: f32) -> f32 {
    let fps = if speed >= 200.0 {
        10.0 + (speed - 200.0) * 0.02
    } else {
        6.0 + (speed / 100.0) * 2.0
    };
    fps.clamp(6.0, 14.0)
}

#[derive(Clone, Debug)]
pub struct AnimController {
    /// Indexed by `AnimState as usize`.
    clips: [Clip; 5],
    state: AnimState,
    time_in_state: f32,
    fps: f32,
    frame: u32,
    frame_clock: f32,
}

impl Default for AnimController {
    fn default() -> Self {
        Self::new([
            Clip { start: 0, count: 4, looping: true },
            Clip { start: 4, count: 6, looping: true },
            Clip { start: 10, count: 2, looping: false },
            Clip { start: 12, count: 2, looping: true },
            Clip { start: 14, count: 2, looping: false },
        ])
    }
}

impl AnimController {
    /// `clips` in `Idle, Run, Jump, Fall, Land` order.
    pub fn new(clips: [Clip; 5]) -> Self {
        Self {
            clips,
            state: AnimState::Idle,
            time_in_state: 0.0,
            fps: AnimState::Idle.base_fps(),
            frame: 0,
            frame_clock: 0.0,
        }
    }

    pub fn state(&self) -> AnimState {
        self.state
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }

    pub fn frame_index(&self) -> u32 {
        let clip = self.clips[self.state as usize];
        clip.start + self.frame.min(clip.count.saturating_sub(1))
    }

    /// Feed one physics step. Returns true when the state changed.
    pub fn update(&mut self, actor: &Actor, jumped: bool, dt: f32) -> bool {
        self.time_in_state += dt;
        let speed = actor.vx.abs();

        let changed = if jumped {
            self.change(AnimState::Jump, true)
        } else {
            match self.state {
                AnimState::Idle | AnimState::Run => {
                    if !actor.on_ground {
                        let next = if actor.vy < 0.0 { AnimState::Jump } else { AnimState::Fall };
                        self.change(next, true)
                    } else {
                        self.ground_pose(speed)
                    }
                }
                AnimState::Jump => actor.vy >= 0.0 && self.change(AnimState::Fall, true),
                AnimState::Fall => actor.on_ground && self.change(AnimState::Land, true),
                AnimState::Land => self.time_in_state >= LAND_MIN_SEC && self.ground_pose(speed),
            }
        };

        if self.state == AnimState::Run {
            self.fps = run_fps(speed);
        }
        if !changed {
            self.advance(dt);
        }
        changed
    }

    fn ground_pose(&mut self, speed: f32) -> bool {
        if speed > RUN_THRESHOLD {
            self.change(AnimState::Run, false)
        } else {
            self.change(AnimState::Idle, false)
        }
    }

    fn change(&mut self, next: AnimState, restart: bool) -> bool {
        if self.state == next && !restart {
            return false;
        }
        log::trace!("anim {} -> {}", self.state.name(), next.name());
        self.state = next;
        self.time_in_state = 0.0;
        self.fps = next.base_fps();
        self.frame = 0;
        self.frame_clock = 0.0;
        true
    }

    fn advance(&mut self, dt: f32) {
        let clip = self.clips[self.state as usize];
        if self.fps <= 0.0 || clip.count == 0 {
            return;
        }
        let period = 1.0 / self.fps;
        self.frame_clock += dt;
        while self.frame_clock >= period {
            self.frame_clock -= period;
            if self.frame + 1 < clip.count {
                self.frame += 1;
            } else if clip.looping {
                self.frame = 0;
            } else {
                self.frame_clock = 0.0;
                break;
            }
        }
    }
}
