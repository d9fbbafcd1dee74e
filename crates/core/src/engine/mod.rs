use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{
    config::EngineConfig, layout::PianoKeyVisual, render::Rgba8, KeyboardMap, NoteAsset,
    PhysicalKey,
};

/// A growing or locked rectangle representing a held note's duration.
///
/// Bars carry no reference back to their key; the stored `anchor_x` is
/// the correlation key for the elongation and lock rules. Two keys that
/// share an x position therefore cross-affect each other's bars; that
/// behavior is deliberate and pinned by a dedicated test.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteBar {
    pub anchor_x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: Rgba8,
    /// Once locked the height never changes again, even if the anchor
    /// position is pressed anew.
    pub locked: bool,
}

/// The set of physical keys the host reports as currently held down.
#[derive(Debug, Clone, Default)]
pub struct InputSnapshot {
    down: HashSet<PhysicalKey>,
}

impl InputSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: PhysicalKey) {
        self.down.insert(key);
    }

    pub fn release(&mut self, key: PhysicalKey) {
        self.down.remove(&key);
    }

    pub fn is_down(&self, key: PhysicalKey) -> bool {
        self.down.contains(&key)
    }

    pub fn clear(&mut self) {
        self.down.clear();
    }
}

impl FromIterator<PhysicalKey> for InputSnapshot {
    fn from_iter<I: IntoIterator<Item = PhysicalKey>>(iter: I) -> Self {
        Self {
            down: iter.into_iter().collect(),
        }
    }
}

/// What one tick asks of the host: sounds to hand to the audio
/// collaborator, and press edges that were swallowed because no note is
/// bound to the key. The renderable collections are read off the engine
/// afterwards via [`NoteLifecycleEngine::keys`] and
/// [`NoteLifecycleEngine::bars`].
#[derive(Debug, Clone, Default)]
pub struct TickOutput {
    pub sounds: Vec<NoteAsset>,
    pub suppressed: Vec<PhysicalKey>,
}

/// Owns the piano key visuals and the active note bars and advances both
/// once per rendered frame.
///
/// Per-key state machine: a press edge spawns exactly one bar and one
/// play event; while held, every unlocked bar at the key's x grows; on
/// release every bar at that x is locked. Independently of key state,
/// all bars scroll upwards each tick and are dropped once fully above
/// the display area.
#[derive(Debug)]
pub struct NoteLifecycleEngine {
    config: EngineConfig,
    keys: Vec<PianoKeyVisual>,
    bars: Vec<NoteBar>,
}

impl NoteLifecycleEngine {
    pub fn new(config: EngineConfig, keys: Vec<PianoKeyVisual>) -> Self {
        Self {
            config,
            keys,
            bars: Vec::new(),
        }
    }

    /// Advances the engine by one frame.
    ///
    /// `dt` is the elapsed time in seconds since the previous tick; a
    /// zero delta leaves all geometry untouched and negative deltas are
    /// clamped to zero. A failed note resolution on a press edge
    /// suppresses both the sound and the bar spawn for that key but
    /// still flips its pressed state; all other keys and bars proceed
    /// normally.
    pub fn tick(&mut self, input: &InputSnapshot, dt: f32, map: &KeyboardMap) -> TickOutput {
        let dt = dt.max(0.0);
        let mut output = TickOutput::default();

        for index in 0..self.keys.len() {
            let Some(code) = self.keys[index].code else {
                continue;
            };
            let down = input.is_down(code);
            let pressed = self.keys[index].pressed;
            let anchor_x = self.keys[index].pos.x;

            if down && !pressed {
                match map.resolve(code) {
                    Ok(note) => {
                        let spawn = self.spawn_bar(&self.keys[index]);
                        self.bars.push(spawn);
                        output.sounds.push(note.clone());
                    }
                    Err(_) => output.suppressed.push(code),
                }
                self.keys[index].pressed = true;
            } else if down && pressed {
                let growth = self.config.growth_rate * dt;
                for bar in &mut self.bars {
                    if !bar.locked && bar.anchor_x == anchor_x {
                        bar.height += growth;
                    }
                }
            } else if !down && pressed {
                for bar in &mut self.bars {
                    if bar.anchor_x == anchor_x {
                        bar.locked = true;
                    }
                }
                self.keys[index].pressed = false;
            }
        }

        let scroll = self.config.scroll_speed * dt;
        for bar in &mut self.bars {
            bar.y -= scroll;
        }
        self.bars.retain(|bar| bar.y + bar.height >= 0.0);

        output
    }

    fn spawn_bar(&self, key: &PianoKeyVisual) -> NoteBar {
        NoteBar {
            anchor_x: key.pos.x,
            y: key.pos.y - self.config.spawn_offset,
            width: key.size.x,
            height: self.config.initial_bar_height,
            color: Rgba8::BAR_RED,
            locked: false,
        }
    }

    /// The fixed key visuals, pressed flags reflecting the last tick.
    pub fn keys(&self) -> &[PianoKeyVisual] {
        &self.keys
    }

    /// The bars currently inside the display area.
    pub fn bars(&self) -> &[NoteBar] {
        &self.bars
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Points the key visual formerly triggered by `old` at `new`
    /// instead. Called by the session after a successful rebind so the
    /// on-screen keyboard keeps matching the binding table.
    pub(crate) fn recode_key(&mut self, old: PhysicalKey, new: PhysicalKey) {
        if let Some(key) = self.keys.iter_mut().find(|key| key.code == Some(old)) {
            key.code = Some(new);
        }
    }
}
