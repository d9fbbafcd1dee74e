use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::Result;

/// Top-level configuration structure for the application.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PianoConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub samples: SampleConfig,
}

impl PianoConfig {
    /// Loads a configuration file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Parses a configuration from a JSON string.
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Tunables for the note lifecycle engine. By default bars scroll up at
/// 100 px/s and grow at 100 px/s while their key is held.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Upward velocity of every note bar, in pixels per second.
    pub scroll_speed: f32,
    /// Height gained per second by a bar whose key is held.
    pub growth_rate: f32,
    /// Height a bar spawns with on the press edge.
    pub initial_bar_height: f32,
    /// Vertical gap between the top of a key and a freshly spawned bar.
    pub spawn_offset: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            scroll_speed: 100.0,
            growth_rate: 100.0,
            initial_bar_height: 1.0,
            spawn_offset: 10.0,
        }
    }
}

/// Geometry of the on-screen keyboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub white_key_count: usize,
    pub white_key_width: f32,
    pub white_key_height: f32,
    pub black_key_width: f32,
    pub black_key_height: f32,
    pub spacing: f32,
    /// Horizontal centre of the keyboard.
    pub center_x: f32,
    /// Vertical position of the top edge of every key.
    pub top_y: f32,
}

impl LayoutConfig {
    /// Leftmost edge of the first white key, derived so the keyboard is
    /// centred on `center_x`.
    pub fn origin_x(&self) -> f32 {
        self.center_x - (self.white_key_width + self.spacing) * self.white_key_count as f32 * 0.5
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            white_key_count: 36,
            white_key_width: 25.0,
            white_key_height: 125.0,
            black_key_width: 15.0,
            black_key_height: 75.0,
            spacing: 2.5,
            center_x: 750.0,
            top_y: 500.0,
        }
    }
}

/// Path scheme for the external audio collaborator's sample files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleConfig {
    pub directory: String,
    pub extension: String,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            directory: "notes".to_string(),
            extension: "ogg".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tunables() {
        let config = PianoConfig::default();
        assert_eq!(config.engine.scroll_speed, 100.0);
        assert_eq!(config.engine.growth_rate, 100.0);
        assert_eq!(config.engine.initial_bar_height, 1.0);
        assert_eq!(config.layout.white_key_count, 36);
        assert_eq!(config.samples.directory, "notes");
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config =
            PianoConfig::from_json_str(r#"{"engine": {"scroll_speed": 50.0, "growth_rate": 100.0, "initial_bar_height": 1.0, "spawn_offset": 10.0}}"#)
                .unwrap();
        assert_eq!(config.engine.scroll_speed, 50.0);
        assert_eq!(config.layout.white_key_width, 25.0);
    }

    #[test]
    fn origin_centres_the_keyboard() {
        let layout = LayoutConfig::default();
        let total_width = (layout.white_key_width + layout.spacing) * layout.white_key_count as f32;
        assert_eq!(layout.origin_x() + total_width * 0.5, layout.center_x);
    }
}
