use serde::{Deserialize, Serialize};

use crate::{config::LayoutConfig, KeyboardMap, PhysicalKey};

/// Keyboard-row codes for the white keys, leftmost first. Whites past
/// the tenth are visual-only.
const WHITE_KEY_ROW: &str = "1234567890";

/// Keyboard-row codes for the black keys.
const BLACK_KEY_ROW: &str = "QWERTYUIOP";

/// White-key indices with no black key to their right (the gaps between
/// the E/F and B/C pairs of the repeating octave pattern).
const BLACK_KEY_GAPS: [usize; 10] = [2, 6, 9, 13, 16, 20, 23, 27, 30, 34];

/// Minimal 2D vector used for screen positions and sizes.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// One on-screen piano key. The collection is built once at startup;
/// only `pressed` (every frame) and `code` (on rebind) mutate afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PianoKeyVisual {
    /// Physical key that triggers this piano key, if it has one. Keys
    /// beyond the mapped two octaves are drawn but never sound.
    pub code: Option<PhysicalKey>,
    /// Note name rendered next to the key.
    pub label: Option<String>,
    pub pos: Vec2,
    pub size: Vec2,
    pub is_white: bool,
    pub pressed: bool,
}

/// Builds the fixed keyboard: `white_key_count` white keys in a row,
/// with black keys between them except at the octave-pattern gaps.
/// Codes come from the standard rows and labels from the binding table.
pub fn build_keys(layout: &LayoutConfig, map: &KeyboardMap) -> Vec<PianoKeyVisual> {
    let mut keys = Vec::new();
    let origin_x = layout.origin_x();
    let step = layout.white_key_width + layout.spacing;
    let mut white_codes = WHITE_KEY_ROW.chars();
    let mut black_codes = BLACK_KEY_ROW.chars();

    for i in 0..layout.white_key_count {
        let code = white_codes.next().and_then(|c| PhysicalKey::new(c).ok());
        keys.push(PianoKeyVisual {
            code,
            label: code.and_then(|c| map.label_for(c).map(str::to_string)),
            pos: Vec2::new(origin_x + i as f32 * step, layout.top_y),
            size: Vec2::new(layout.white_key_width, layout.white_key_height),
            is_white: true,
            pressed: false,
        });
    }

    for i in 0..layout.white_key_count.saturating_sub(1) {
        if BLACK_KEY_GAPS.contains(&i) {
            continue;
        }
        let code = black_codes.next().and_then(|c| PhysicalKey::new(c).ok());
        // Centred on the boundary between white key i and i + 1.
        let x = origin_x + (i + 1) as f32 * step - layout.black_key_width * 0.5;
        keys.push(PianoKeyVisual {
            code,
            label: code.and_then(|c| map.label_for(c).map(str::to_string)),
            pos: Vec2::new(x, layout.top_y),
            size: Vec2::new(layout.black_key_width, layout.black_key_height),
            is_white: false,
            pressed: false,
        });
    }

    keys
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_default() -> Vec<PianoKeyVisual> {
        build_keys(&LayoutConfig::default(), &KeyboardMap::default_layout())
    }

    #[test]
    fn builds_the_full_two_tone_keyboard() {
        let keys = build_default();
        let whites = keys.iter().filter(|k| k.is_white).count();
        let blacks = keys.iter().filter(|k| !k.is_white).count();
        assert_eq!(whites, 36);
        assert_eq!(blacks, 25);
    }

    #[test]
    fn first_ten_of_each_row_are_coded_and_labelled() {
        let keys = build_default();
        let coded: Vec<char> = keys
            .iter()
            .filter_map(|k| k.code.map(|c| c.code()))
            .collect();
        assert_eq!(coded.len(), 20);
        assert!(coded.starts_with(&['1', '2', '3']));
        assert!(coded.contains(&'Q'));

        let c3 = keys
            .iter()
            .find(|k| k.code.map(|c| c.code()) == Some('1'))
            .unwrap();
        assert_eq!(c3.label.as_deref(), Some("C3"));
        assert!(keys
            .iter()
            .filter(|k| k.code.is_none())
            .all(|k| k.label.is_none()));
    }

    #[test]
    fn black_keys_sit_between_whites() {
        let layout = LayoutConfig::default();
        let keys = build_default();
        let first_black = keys.iter().find(|k| !k.is_white).unwrap();
        let step = layout.white_key_width + layout.spacing;
        assert_eq!(
            first_black.pos.x,
            layout.origin_x() + step - layout.black_key_width * 0.5
        );
        assert_eq!(first_black.size.y, layout.black_key_height);
    }

    #[test]
    fn white_keys_advance_by_width_plus_spacing() {
        let layout = LayoutConfig::default();
        let keys = build_default();
        let whites: Vec<&PianoKeyVisual> = keys.iter().filter(|k| k.is_white).collect();
        let step = layout.white_key_width + layout.spacing;
        assert_eq!(whites[1].pos.x - whites[0].pos.x, step);
        assert_eq!(whites[0].pos.x, layout.origin_x());
    }
}
