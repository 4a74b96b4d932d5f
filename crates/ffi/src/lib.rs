use ledgehop_core::{Actor, Events, Intent, MotionParams, TileGrid};

#[no_mangle]
pub extern "C" fn ledgehop_default_params(out: *mut MotionParams) {
    unsafe { *out = MotionParams::default(); }
}

#[no_mangle]
pub extern "C" fn ledgehop_clamp_dt(dt: f32) -> f32 {
    ledgehop_core::clamp_dt(dt)
}

/// Builds a grid from legacy tile codes (`cols * rows` of them). Returns null
/// when the input is rejected; release with `ledgehop_grid_free`.
#[no_mangle]
pub extern "C" fn ledgehop_grid_new(
    cols: i32,
    rows: i32,
    tile_size: f32,
    codes: *const i32,
    codes_len: usize,
) -> *mut TileGrid {
    if codes.is_null() {
        return std::ptr::null_mut();
    }
    let codes = unsafe { std::slice::from_raw_parts(codes, codes_len) };
    match TileGrid::from_codes(cols, rows, tile_size, codes) {
        Ok(grid) => Box::into_raw(Box::new(grid)),
        Err(err) => {
            log::warn!("ledgehop_grid_new rejected grid: {err}");
            std::ptr::null_mut()
        }
    }
}

#[no_mangle]
pub extern "C" fn ledgehop_grid_free(grid: *mut TileGrid) {
    if !grid.is_null() {
        drop(unsafe { Box::from_raw(grid) });
    }
}

/// Returns false and leaves `out` untouched on invalid extents or position.
#[no_mangle]
pub extern "C" fn ledgehop_actor_init(out: *mut Actor, x: f32, y: f32, half_w: f32, half_h: f32) -> bool {
    match Actor::new(x, y, half_w, half_h) {
        Ok(actor) => {
            unsafe { *out = actor; }
            true
        }
        Err(err) => {
            log::warn!("ledgehop_actor_init: {err}");
            false
        }
    }
}

#[no_mangle]
pub extern "C" fn ledgehop_actor_respawn(actor: *mut Actor, x: f32, y: f32) {
    let a = unsafe { &mut *actor };
    a.respawn(x, y);
}

#[no_mangle]
pub extern "C" fn ledgehop_integrate(
    params: *const MotionParams,
    grid: *const TileGrid,
    actor: *mut Actor,
    dt: f32,
    intent_bits: u8,
) -> Events {
    let p = unsafe { &*params };
    let g = unsafe { &*grid };
    let a = unsafe { &mut *actor };
    let intent = Intent::from_bits_truncate(intent_bits);

    ledgehop_core::integrate(a, g, p, dt, intent)
}
