use std::fs;
use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

use ledgehop_core::{clamp_dt, integrate, Actor, Buttons, ConfigError, GridError, InputLatch, MotionParams, TileGrid, DT};

#[derive(Debug, Error)]
enum ReplayError {
    #[error("usage: cargo run -p ledgehop_core --bin replay -- <replay.json>")]
    Usage,
    #[error("failed to read replay: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid replay json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid grid: {0}")]
    Grid(#[from] GridError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, Deserialize)]
struct ActorStart {
    x: f32,
    y: f32,
    half_w: f32,
    half_h: f32,
}

#[derive(Debug, Deserialize)]
struct Replay {
    #[serde(default)]
    params: MotionParams,
    tile_size: f32,
    grid: Vec<String>,
    actor: ActorStart,
    #[serde(default = "default_dt")]
    dt: f32,
    /// Held-button bits per frame.
    inputs: Vec<u8>,
}

fn default_dt() -> f32 {
    DT
}

fn run() -> Result<(), ReplayError> {
    let path = std::env::args().nth(1).map(PathBuf::from).ok_or(ReplayError::Usage)?;
    let raw = fs::read_to_string(path)?;
    let replay: Replay = serde_json::from_str(&raw)?;

    replay.params.validate()?;
    let grid = TileGrid::from_ascii(replay.tile_size, &replay.grid)?;
    let start = &replay.actor;
    let mut actor = Actor::new(start.x, start.y, start.half_w, start.half_h)?;
    let dt = clamp_dt(replay.dt);
    let mut latch = InputLatch::default();

    println!("frame,x,y,vx,vy,on_ground");
    for (frame, bits) in replay.inputs.iter().enumerate() {
        let intent = latch.intent(Buttons::from_bits_truncate(*bits));
        integrate(&mut actor, &grid, &replay.params, dt, intent);
        println!(
            "{},{},{},{},{},{}",
            frame, actor.x, actor.y, actor.vx, actor.vy, actor.on_ground as u8
        );
    }
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("replay: {err}");
        std::process::exit(1);
    }
}
