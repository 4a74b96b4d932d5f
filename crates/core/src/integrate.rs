//! Per-frame movement and tile collision for one actor.
//!
//! A call advances the actor exactly one frame: timers, horizontal blend and
//! friction, jump, gravity and jump cut, then X and Y are resolved one axis
//! at a time against the grid. There is no sub-stepping, so a body moving
//! more than a tile per frame can tunnel through thin geometry; hosts clamp
//! `dt` (see [`crate::clamp_dt`]) to keep that out of reach at normal speeds.

use crate::{Actor, Intent, MotionParams, TileGrid, TileKind};

/// Gap left between the actor and a tile it was pushed out of.
const EPS: f32 = 0.001;
/// Shrink of the AABB on the axis not being resolved, so grazing a corner
/// does not register as a hit.
const INSET: f32 = 1.0;
/// How far below the feet the drop-through scan looks.
const FEET_PROBE: f32 = 0.1;
/// Minimum downward speed given on a drop so the actor leaves the platform top.
const DROP_NUDGE: f32 = 30.0;
/// Feet resting this close above a tile top count as standing on it when
/// the step-up probe measures a ledge. Landing leaves the feet `EPS` high.
const CONTACT_SLACK: f32 = 2.0 * EPS;
/// Horizontal speed below which friction stops the actor outright.
const VX_REST: f32 = 0.01;

/// What happened during one [`integrate`] call.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Events {
    pub jumped: bool,
    /// Airborne at the start of the frame, grounded at the end.
    pub landed: bool,
    /// Head hit a solid tile while rising.
    pub bonked: bool,
    pub dropped: bool,
    /// A step-up raised the actor onto a ledge.
    pub stepped: bool,
}

/// Advance `a` one frame. Total over its inputs: no errors, no allocation.
pub fn integrate(a: &mut Actor, grid: &TileGrid, params: &MotionParams, dt: f32, intent: Intent) -> Events {
    let mut ev = Events::default();
    let was_grounded = a.on_ground;

    let jump_pressed = intent.contains(Intent::JUMP_PRESSED);
    let jump_held = intent.contains(Intent::JUMP_HELD);

    a.prev_x = a.x;
    a.prev_y = a.y;

    // Drop-through
    a.drop_timer = (a.drop_timer - dt).max(0.0);
    let dropped = intent.contains(Intent::DROP) && a.on_ground && oneway_under(a, grid);
    if dropped {
        a.drop_timer = params.drop_through_time;
        a.on_ground = false;
        a.jump_buffer_timer = 0.0;
        a.coyote_timer = 0.0;
        if a.vy < DROP_NUDGE {
            a.vy = DROP_NUDGE;
        }
        ev.dropped = true;
    } else if jump_pressed {
        a.jump_buffer_timer = params.jump_buffer_time;
    } else {
        a.jump_buffer_timer = (a.jump_buffer_timer - dt).max(0.0);
    }

    // Coyote timer, from last frame's grounding
    if a.on_ground {
        a.coyote_timer = params.coyote_time;
    } else {
        a.coyote_timer = (a.coyote_timer - dt).max(0.0);
    }

    // Horizontal
    let mut target_vx = 0.0;
    if intent.contains(Intent::MOVE_LEFT) {
        target_vx -= params.move_speed;
    }
    if intent.contains(Intent::MOVE_RIGHT) {
        target_vx += params.move_speed;
    }

    let blend = if a.on_ground { params.accel } else { params.accel * params.air_control };
    a.vx += (target_vx - a.vx) * (blend * dt).clamp(0.0, 1.0);

    if target_vx == 0.0 {
        let mu = if a.on_ground { params.friction_ground } else { params.friction_air };
        a.vx *= (1.0 - mu * dt).max(0.0);
        if a.vx.abs() < VX_REST {
            a.vx = 0.0;
        }
    }

    // Jump execution; one jump spends both grace windows
    if !dropped && a.jump_buffer_timer > 0.0 && (a.on_ground || a.coyote_timer > 0.0) {
        a.vy = params.jump_vel;
        a.on_ground = false;
        a.jump_buffer_timer = 0.0;
        a.coyote_timer = 0.0;
        ev.jumped = true;
    }

    // Gravity + jump cut
    a.vy = (a.vy + params.gravity * dt).min(params.max_fall);
    if a.vy < 0.0 && !jump_held {
        a.vy *= params.jump_cut_factor;
    }

    ev.stepped = resolve_x(a, grid, params, dt) > 0;
    ev.bonked = resolve_y(a, grid, params, dt);
    ev.landed = a.on_ground && !was_grounded;

    ev
}

/// Any one-way tile directly under the feet.
fn oneway_under(a: &Actor, grid: &TileGrid) -> bool {
    let row = grid.tile_floor(a.bottom() + FEET_PROBE);
    let tx0 = grid.tile_floor(a.left() + INSET);
    let tx1 = grid.tile_floor(a.right() - INSET);
    (tx0..=tx1).any(|tx| grid.oneway_at(tx, row))
}

fn column_blocked(grid: &TileGrid, col: i32, top: f32, bottom: f32) -> bool {
    (grid.tile_floor(top)..=grid.tile_floor(bottom)).any(|ty| grid.solid_at(col, ty))
}

/// Move along X and push out of the leading column, climbing up to
/// `step_max_pixels` first. Returns the height climbed.
fn resolve_x(a: &mut Actor, grid: &TileGrid, params: &MotionParams, dt: f32) -> u32 {
    a.x += a.vx * dt;
    if a.vx == 0.0 {
        return 0;
    }

    let col = if a.vx > 0.0 {
        grid.tile_floor(a.right())
    } else {
        grid.tile_floor(a.left())
    };
    let top = a.top() + INSET;
    let bottom = a.bottom() - INSET + CONTACT_SLACK;

    for step in 0..=params.step_max_pixels {
        let lift = step as f32;
        if !column_blocked(grid, col, top - lift, bottom - lift) {
            a.y -= lift;
            return step;
        }
    }

    let tile = grid.tile_size();
    a.x = if a.vx > 0.0 {
        col as f32 * tile - a.half_w - EPS
    } else {
        (col + 1) as f32 * tile + a.half_w + EPS
    };
    a.vx = 0.0;
    0
}

/// Solid tiles always hold the actor up. A one-way tile does only when the
/// actor is not dropping and its bottom was above the tile top last frame.
fn lands_on(grid: &TileGrid, params: &MotionParams, a: &Actor, tx: i32, row: i32) -> bool {
    match grid.classify(tx, row) {
        TileKind::Solid => true,
        TileKind::OneWay => {
            let prev_bottom = a.prev_y + a.half_h;
            let tile_top = row as f32 * grid.tile_size();
            a.drop_timer <= 0.0 && prev_bottom <= tile_top + params.oneway_slack
        }
        TileKind::Empty => false,
    }
}

/// Move along Y, land, ground-snap or bonk. Returns true on a bonk.
fn resolve_y(a: &mut Actor, grid: &TileGrid, params: &MotionParams, dt: f32) -> bool {
    a.y += a.vy * dt;
    a.on_ground = false;

    let tile = grid.tile_size();
    let tx0 = grid.tile_floor(a.left() + INSET);
    let tx1 = grid.tile_floor(a.right() - INSET);

    if a.vy > 0.0 {
        let bottom = a.bottom();
        let row = grid.tile_floor(bottom);
        if (tx0..=tx1).any(|tx| lands_on(grid, params, a, tx, row)) {
            a.y = row as f32 * tile - a.half_h - EPS;
            a.vy = 0.0;
            a.on_ground = true;
            return false;
        }

        // Nearest landable row within snap reach, so small tiles never pull
        // the feet past the surface.
        let snap = params.ground_snap_dist;
        for snap_row in (row + 1)..=grid.tile_floor(bottom + snap) {
            if (tx0..=tx1).any(|tx| lands_on(grid, params, a, tx, snap_row)) {
                let gap = snap_row as f32 * tile - bottom;
                if (0.0..=snap).contains(&gap) {
                    a.y += gap;
                    a.vy = 0.0;
                    a.on_ground = true;
                }
                break;
            }
        }
        false
    } else if a.vy < 0.0 {
        let row = grid.tile_floor(a.top());
        if (tx0..=tx1).any(|tx| grid.solid_at(tx, row)) {
            a.y = (row + 1) as f32 * tile + a.half_h + EPS;
            a.vy = 0.0;
            return true;
        }
        false
    } else {
        false
    }
}
