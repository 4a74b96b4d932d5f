use ledgehop_core::{integrate, Actor, AnimController, Buttons, InputLatch, MotionParams, TileGrid, DT};

const LEVEL: [&str; 12] = [
    "..............................",
    "..............................",
    "..............................",
    "..............................",
    "..............................",
    "..............................",
    "...........=====..............",
    "..............................",
    "..............................",
    "....................##........",
    "...................###........",
    "##############################",
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let params = MotionParams::default();
    let grid = TileGrid::from_ascii(32.0, &LEVEL)?;
    let mut actor = Actor::new(80.0, 352.0 - 16.0, 12.0, 16.0)?;
    let mut latch = InputLatch::default();
    let mut anim = AnimController::default();

    let (mut jumped, mut landed, mut bonked, mut dropped, mut stepped) = (0u32, 0u32, 0u32, 0u32, 0u32);

    for frame in 0..240 {
        let mut buttons = Buttons::empty();
        if frame < 150 {
            buttons |= Buttons::RIGHT;
        }
        if (10..22).contains(&frame) {
            buttons |= Buttons::JUMP;
        }
        if frame == 90 {
            buttons |= Buttons::DOWN | Buttons::JUMP;
        }

        let ev = integrate(&mut actor, &grid, &params, DT, latch.intent(buttons));
        anim.update(&actor, ev.jumped, DT);

        jumped += ev.jumped as u32;
        landed += ev.landed as u32;
        bonked += ev.bonked as u32;
        dropped += ev.dropped as u32;
        stepped += ev.stepped as u32;
    }

    let summary = serde_json::json!({
        "x": actor.x,
        "y": actor.y,
        "vx": actor.vx,
        "vy": actor.vy,
        "on_ground": actor.on_ground,
        "anim": anim.state().name(),
        "frame": anim.frame_index(),
        "jumped": jumped,
        "landed": landed,
        "bonked": bonked,
        "dropped": dropped,
        "stepped": stepped,
    });
    println!("{summary}");
    Ok(())
}
