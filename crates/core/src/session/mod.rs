use crate::{
    config::PianoConfig,
    engine::{InputSnapshot, NoteLifecycleEngine, TickOutput},
    layout::{build_keys, PianoKeyVisual},
    KeyBinding, KeyboardMap, NoteBar, PhysicalKey, Result,
};

/// Host-facing facade tying the binding table and the lifecycle engine
/// together under the frame loop's mutual-exclusion rule: while the
/// remap surface is open, live play is suspended entirely.
///
/// Everything here runs on the host's single frame-processing context;
/// no call suspends, blocks or spans frames.
#[derive(Debug)]
pub struct PianoSession {
    map: KeyboardMap,
    engine: NoteLifecycleEngine,
    remap_active: bool,
}

impl PianoSession {
    /// Builds a session with the default two-octave binding table and
    /// the fixed keyboard geometry from `config`.
    pub fn new(config: &PianoConfig) -> Self {
        let map = KeyboardMap::default_layout();
        let keys = build_keys(&config.layout, &map);
        Self {
            engine: NoteLifecycleEngine::new(config.engine.clone(), keys),
            map,
            remap_active: false,
        }
    }

    /// Runs one frame of live play. Returns `None` without touching any
    /// state while the remap surface is active.
    pub fn frame(&mut self, input: &InputSnapshot, dt: f32) -> Option<TickOutput> {
        if self.remap_active {
            return None;
        }
        Some(self.engine.tick(input, dt, &self.map))
    }

    pub fn open_remap(&mut self) {
        self.remap_active = true;
    }

    pub fn close_remap(&mut self) {
        self.remap_active = false;
    }

    pub fn remap_active(&self) -> bool {
        self.remap_active
    }

    /// The ordered binding table, as presented by the remap UI.
    pub fn bindings(&self) -> &[KeyBinding] {
        self.map.bindings()
    }

    /// Applies one user-committed rebind and points the affected key
    /// visual at the new code so the on-screen keyboard stays in step
    /// with the table.
    pub fn rebind(&mut self, key: PhysicalKey, new_key: PhysicalKey) -> Result<()> {
        self.map.rebind(key, new_key)?;
        if key != new_key {
            self.engine.recode_key(key, new_key);
        }
        Ok(())
    }

    pub fn keymap(&self) -> &KeyboardMap {
        &self.map
    }

    pub fn keys(&self) -> &[PianoKeyVisual] {
        self.engine.keys()
    }

    pub fn bars(&self) -> &[NoteBar] {
        self.engine.bars()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PianoError;

    fn key(code: char) -> PhysicalKey {
        PhysicalKey::new(code).unwrap()
    }

    fn holding(codes: &[char]) -> InputSnapshot {
        codes.iter().map(|&c| key(c)).collect()
    }

    #[test]
    fn open_remap_suppresses_live_play() {
        let mut session = PianoSession::new(&PianoConfig::default());
        let input = holding(&['1']);

        session.open_remap();
        assert!(session.frame(&input, 0.016).is_none());
        assert!(session.bars().is_empty());

        session.close_remap();
        let output = session.frame(&input, 0.016).unwrap();
        assert_eq!(output.sounds.len(), 1);
        assert_eq!(session.bars().len(), 1);
    }

    #[test]
    fn rebind_redirects_both_sound_and_visual() {
        let mut session = PianoSession::new(&PianoConfig::default());
        let c3_x = session
            .keys()
            .iter()
            .find(|k| k.code == Some(key('1')))
            .unwrap()
            .pos
            .x;

        session.open_remap();
        session.rebind(key('1'), key('Z')).unwrap();
        session.close_remap();

        // The old code is dead: no sound, no bar.
        let old = session.frame(&holding(&['1']), 0.016).unwrap();
        assert!(old.sounds.is_empty());
        assert!(session.bars().is_empty());

        // The new code triggers the old note at the old key's position.
        let new = session.frame(&holding(&['Z']), 0.016).unwrap();
        assert_eq!(new.sounds[0].id(), "C3");
        assert_eq!(session.bars()[0].anchor_x, c3_x);
    }

    #[test]
    fn failed_rebind_changes_nothing() {
        let mut session = PianoSession::new(&PianoConfig::default());
        let err = session.rebind(key('1'), key('Q')).unwrap_err();
        assert!(matches!(err, PianoError::InvalidKey('Q')));

        let output = session.frame(&holding(&['1']), 0.016).unwrap();
        assert_eq!(output.sounds[0].id(), "C3");
    }
}
