//! Level trigger regions: checkpoints, doors and plain named regions.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::{rects_intersect, Rect};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerKind {
    Checkpoint,
    Door,
    Region,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Trigger {
    pub id: u32,
    #[serde(rename = "type")]
    pub kind: TriggerKind,
    #[serde(default)]
    pub name: String,
    /// Name of another trigger (a door's destination).
    #[serde(default)]
    pub target: String,
    #[serde(default)]
    pub message: String,
    /// Fire at most once per [`TriggerSet::reset`].
    #[serde(default)]
    pub once: bool,
    /// World-space area, top-left anchored.
    #[serde(flatten)]
    pub rect: Rect,
}

/// Fires each trigger on the frame the actor's box starts overlapping it.
#[derive(Clone, Debug, Default)]
pub struct TriggerSet {
    triggers: Vec<Trigger>,
    inside: Vec<bool>,
    spent: Vec<bool>,
}

impl TriggerSet {
    pub fn new(triggers: Vec<Trigger>) -> Self {
        let n = triggers.len();
        Self {
            triggers,
            inside: vec![false; n],
            spent: vec![false; n],
        }
    }

    /// A JSON array of triggers.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let triggers: Vec<Trigger> = serde_json::from_str(json)?;
        log::debug!("loaded {} triggers", triggers.len());
        Ok(Self::new(triggers))
    }

    pub fn triggers(&self) -> &[Trigger] {
        &self.triggers
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Trigger> {
        if name.is_empty() {
            return None;
        }
        self.triggers.iter().find(|t| t.name == name)
    }

    /// Center of the trigger named by `from.target`.
    pub fn destination(&self, from: &Trigger) -> Option<(f32, f32)> {
        self.find_by_name(&from.target).map(|t| t.rect.center())
    }

    pub fn update(&mut self, body: &Rect, mut on_enter: impl FnMut(&Trigger)) {
        for (i, t) in self.triggers.iter().enumerate() {
            let now = rects_intersect(body, &t.rect);
            if now && !self.inside[i] && !(t.once && self.spent[i]) {
                self.spent[i] = true;
                log::debug!("trigger {} ({:?} {:?}) entered", t.id, t.kind, t.name);
                on_enter(t);
            }
            self.inside[i] = now;
        }
    }

    /// Forget overlap state and re-arm `once` triggers, e.g. on level restart.
    pub fn reset(&mut self) {
        self.inside.fill(false);
        self.spent.fill(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{integrate, Actor, Intent, MotionParams, TileGrid, DT};

    const LEVEL: &str = r#"[
        { "id": 1, "type": "checkpoint", "name": "cp1", "x": 96, "y": 0, "w": 32, "h": 128 },
        { "id": 2, "type": "door", "name": "door_a", "target": "door_b", "x": 192, "y": 64, "w": 32, "h": 64 },
        { "id": 3, "type": "region", "name": "door_b", "x": 400, "y": 32, "w": 64, "h": 32 },
        { "id": 4, "type": "region", "name": "music", "message": "cave", "once": true, "x": 0, "y": 0, "w": 64, "h": 128 }
    ]"#;

    fn at(x: f32) -> Rect {
        Rect { x, y: 64.0, w: 24.0, h: 32.0 }
    }

    #[test]
    fn parses_trigger_list() {
        let set = TriggerSet::from_json(LEVEL).unwrap();
        assert_eq!(set.triggers().len(), 4);
        let door = set.find_by_name("door_a").unwrap();
        assert_eq!(door.kind, TriggerKind::Door);
        assert_eq!(door.rect, Rect { x: 192.0, y: 64.0, w: 32.0, h: 64.0 });
        assert_eq!(set.destination(door), Some((432.0, 48.0)));
        assert!(set.find_by_name("").is_none());
        assert!(TriggerSet::from_json(r#"[{ "id": 1, "type": "teleporter", "x": 0, "y": 0, "w": 1, "h": 1 }]"#).is_err());
    }

    #[test]
    fn fires_on_entry_only() {
        let mut set = TriggerSet::from_json(LEVEL).unwrap();
        let mut hits = Vec::new();

        for x in [100.0, 101.0, 102.0, 300.0, 100.0] {
            set.update(&at(x), |t| hits.push(t.id));
        }
        assert_eq!(hits, vec![1, 1]);
    }

    #[test]
    fn once_triggers_rearm_on_reset() {
        let mut set = TriggerSet::from_json(LEVEL).unwrap();
        let mut hits = Vec::new();

        for x in [10.0, 300.0, 10.0] {
            set.update(&at(x), |t| hits.push(t.id));
        }
        assert_eq!(hits, vec![4]);

        set.reset();
        set.update(&at(10.0), |t| hits.push(t.id));
        assert_eq!(hits, vec![4, 4]);
    }

    #[test]
    fn checkpoint_respawn() {
        let grid = TileGrid::from_ascii(32.0, &["..........", "..........", "..........", "##########"]).unwrap();
        let params = MotionParams::default();
        let mut set = TriggerSet::from_json(LEVEL).unwrap();
        let mut actor = Actor::new(40.0, 80.0, 12.0, 16.0).unwrap();
        let mut spawn = (actor.x, actor.y);

        for _ in 0..60 {
            integrate(&mut actor, &grid, &params, DT, Intent::MOVE_RIGHT);
            set.update(&actor.aabb(), |t| {
                if t.kind == TriggerKind::Checkpoint {
                    spawn = t.rect.center();
                }
            });
        }
        assert_eq!(spawn, (112.0, 64.0));

        actor.respawn(spawn.0, spawn.1);
        assert_eq!((actor.x, actor.y), (112.0, 64.0));
        assert!(!actor.on_ground);
    }
}
