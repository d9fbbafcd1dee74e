use serde::{Deserialize, Serialize};

use crate::{
    engine::NoteBar,
    layout::{PianoKeyVisual, Vec2},
};

/// Straight RGBA color, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const WHITE: Self = Self::opaque(255, 255, 255);
    pub const BLACK: Self = Self::opaque(0, 0, 0);
    pub const PRESSED_GREEN: Self = Self::opaque(0, 255, 0);
    pub const BAR_RED: Self = Self::opaque(255, 0, 0);

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// Colors used when turning the key and bar collections into draw data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Palette {
    pub white_key: Rgba8,
    pub black_key: Rgba8,
    pub pressed_key: Rgba8,
    pub key_outline: Rgba8,
    pub label_text: Rgba8,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            white_key: Rgba8::WHITE,
            black_key: Rgba8::BLACK,
            pressed_key: Rgba8::PRESSED_GREEN,
            key_outline: Rgba8::BLACK,
            label_text: Rgba8::WHITE,
        }
    }
}

/// Note-name caption attached to a key rectangle. `anchor` is the
/// horizontal centre of the text; the host centres the rendered string
/// on it since only the host can measure text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Label {
    pub text: String,
    pub anchor: Vec2,
    pub color: Rgba8,
}

/// One filled rectangle for the host's renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RectPrimitive {
    pub pos: Vec2,
    pub size: Vec2,
    pub fill: Rgba8,
    pub outline: Option<Rgba8>,
    pub label: Option<Label>,
}

/// Vertical gap between a white key's bottom edge and its caption.
const WHITE_LABEL_OFFSET: f32 = 10.0;

/// Upward inset of a black key's caption from its bottom edge.
const BLACK_LABEL_OFFSET: f32 = -20.0;

/// Flattens the renderable collections into back-to-front draw order:
/// white keys first, then black keys on top of them, then the bars.
pub fn build_draw_list(
    keys: &[PianoKeyVisual],
    bars: &[NoteBar],
    palette: &Palette,
) -> Vec<RectPrimitive> {
    let mut list = Vec::with_capacity(keys.len() + bars.len());

    for key in keys.iter().filter(|key| key.is_white) {
        list.push(key_rect(key, palette, palette.white_key, WHITE_LABEL_OFFSET));
    }
    for key in keys.iter().filter(|key| !key.is_white) {
        list.push(key_rect(key, palette, palette.black_key, BLACK_LABEL_OFFSET));
    }
    for bar in bars {
        list.push(RectPrimitive {
            pos: Vec2::new(bar.anchor_x, bar.y),
            size: Vec2::new(bar.width, bar.height),
            fill: bar.color,
            outline: None,
            label: None,
        });
    }

    list
}

fn key_rect(
    key: &PianoKeyVisual,
    palette: &Palette,
    resting: Rgba8,
    label_offset: f32,
) -> RectPrimitive {
    let fill = if key.pressed {
        palette.pressed_key
    } else {
        resting
    };
    let label = key.label.as_ref().map(|text| Label {
        text: text.clone(),
        anchor: Vec2::new(
            key.pos.x + key.size.x * 0.5,
            key.pos.y + key.size.y + label_offset,
        ),
        color: palette.label_text,
    });
    RectPrimitive {
        pos: key.pos,
        size: key.size,
        fill,
        outline: Some(palette.key_outline),
        label,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::LayoutConfig, layout::build_keys, KeyboardMap};

    fn default_keys() -> Vec<PianoKeyVisual> {
        build_keys(&LayoutConfig::default(), &KeyboardMap::default_layout())
    }

    #[test]
    fn whites_precede_blacks_precede_bars() {
        let keys = default_keys();
        let bars = vec![NoteBar {
            anchor_x: 300.0,
            y: 200.0,
            width: 25.0,
            height: 40.0,
            color: Rgba8::BAR_RED,
            locked: false,
        }];

        let list = build_draw_list(&keys, &bars, &Palette::default());
        assert_eq!(list.len(), keys.len() + 1);
        assert_eq!(list[0].fill, Rgba8::WHITE);
        assert_eq!(list[36].fill, Rgba8::BLACK);
        let bar_rect = list.last().unwrap();
        assert_eq!(bar_rect.fill, Rgba8::BAR_RED);
        assert!(bar_rect.outline.is_none());
    }

    #[test]
    fn pressed_keys_render_green() {
        let mut keys = default_keys();
        keys[0].pressed = true;

        let list = build_draw_list(&keys, &[], &Palette::default());
        assert_eq!(list[0].fill, Rgba8::PRESSED_GREEN);
        assert_eq!(list[1].fill, Rgba8::WHITE);
    }

    #[test]
    fn labels_anchor_to_the_key_centre() {
        let keys = default_keys();
        let list = build_draw_list(&keys, &[], &Palette::default());

        let labelled = list.iter().find(|rect| rect.label.is_some()).unwrap();
        let label = labelled.label.as_ref().unwrap();
        assert_eq!(
            label.anchor.x,
            labelled.pos.x + labelled.size.x * 0.5
        );
        assert_eq!(
            label.anchor.y,
            labelled.pos.y + labelled.size.y + WHITE_LABEL_OFFSET
        );
    }
}
