use wasm_bindgen::prelude::*;
use ledgehop_core::{AnimController, Actor, Buttons, InputLatch, MotionParams, TileGrid};

const DEMO_LEVEL: [&str; 12] = [
    "##############################",
    "#............................#",
    "#............................#",
    "#............................#",
    "#............................#",
    "#.......#####................#",
    "#............................#",
    "#...............======.......#",
    "#............................#",
    "#.........................#..#",
    "#........................##..#",
    "##############################",
];

fn js_err(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen]
pub struct Core {
    params: MotionParams,
    actor: Actor,
    grid: TileGrid,
    latch: InputLatch,
    anim: AnimController,
}

#[wasm_bindgen]
impl Core {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<Core, JsValue> {
        let _ = console_log::init_with_level(log::Level::Info);

        let grid = TileGrid::from_ascii(32.0, &DEMO_LEVEL).map_err(js_err)?;
        let actor = Actor::new(80.0, 352.0 - 16.0, 12.0, 16.0).map_err(js_err)?;
        log::info!("ledgehop: core initialized ({}x{} tiles)", grid.cols(), grid.rows());

        Ok(Core {
            params: MotionParams::default(),
            actor,
            grid,
            latch: InputLatch::default(),
            anim: AnimController::default(),
        })
    }

    pub fn reset(&mut self, x: f32, y: f32, half_w: f32, half_h: f32) -> Result<(), JsValue> {
        self.actor = Actor::new(x, y, half_w, half_h).map_err(js_err)?;
        self.latch.reset();
        self.anim = AnimController::default();
        Ok(())
    }

    pub fn respawn(&mut self, x: f32, y: f32) {
        self.actor.respawn(x, y);
        self.latch.reset();
    }

    /// Legacy tile codes, row-major: -1 empty, 1 one-way, anything else solid.
    pub fn set_grid(&mut self, cols: i32, rows: i32, tile_size: f32, codes: Box<[i32]>) -> Result<(), JsValue> {
        self.grid = TileGrid::from_codes(cols, rows, tile_size, &codes).map_err(js_err)?;
        Ok(())
    }

    /// Partial JSON; missing fields keep their defaults.
    pub fn set_params_json(&mut self, json: &str) -> Result<(), JsValue> {
        self.params = MotionParams::from_json(json).map_err(js_err)?;
        Ok(())
    }

    /// Step once with the measured frame time and held button bits, and
    /// return actor state, events and animation frame as a JS object.
    pub fn step(&mut self, dt: f32, input_bits: u8) -> Result<JsValue, JsValue> {
        let dt = ledgehop_core::clamp_dt(dt);
        let intent = self.latch.intent(Buttons::from_bits_truncate(input_bits));
        let ev = ledgehop_core::integrate(&mut self.actor, &self.grid, &self.params, dt, intent);
        self.anim.update(&self.actor, ev.jumped, dt);

        let a = &self.actor;
        let fields = [
            ("x", JsValue::from_f64(a.x as f64)),
            ("y", JsValue::from_f64(a.y as f64)),
            ("vx", JsValue::from_f64(a.vx as f64)),
            ("vy", JsValue::from_f64(a.vy as f64)),
            ("on_ground", JsValue::from_bool(a.on_ground)),
            ("coyote", JsValue::from_f64(a.coyote_timer as f64)),
            ("jump_buffer", JsValue::from_f64(a.jump_buffer_timer as f64)),
            ("drop", JsValue::from_f64(a.drop_timer as f64)),
            ("jumped", JsValue::from_bool(ev.jumped)),
            ("landed", JsValue::from_bool(ev.landed)),
            ("bonked", JsValue::from_bool(ev.bonked)),
            ("dropped", JsValue::from_bool(ev.dropped)),
            ("stepped", JsValue::from_bool(ev.stepped)),
            ("anim", JsValue::from_str(self.anim.state().name())),
            ("frame", JsValue::from_f64(self.anim.frame_index() as f64)),
        ];

        let obj = js_sys::Object::new();
        for (key, value) in fields {
            js_sys::Reflect::set(&obj, &JsValue::from_str(key), &value)?;
        }
        Ok(obj.into())
    }
}
