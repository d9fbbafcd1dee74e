//! Core library for the Virtual Piano application.
//!
//! The crate holds everything that is not a black-box collaborator:
//! the key-to-note binding table, the note lifecycle engine that spawns,
//! grows and locks the falling note bars, the fixed keyboard geometry,
//! and the draw-list and sample-path data handed to the host's renderer
//! and audio engine. The host drives it once per rendered frame through
//! [`PianoSession`]; nothing in here blocks, spawns threads or touches
//! the screen.

pub mod assets;
pub mod config;
pub mod engine;
pub mod error;
pub mod keymap;
pub mod layout;
pub mod render;
pub mod session;

pub use assets::SampleLibrary;
pub use config::{EngineConfig, LayoutConfig, PianoConfig, SampleConfig};
pub use engine::{InputSnapshot, NoteBar, NoteLifecycleEngine, TickOutput};
pub use error::{PianoError, Result};
pub use keymap::{KeyBinding, KeyboardMap, NoteAsset, PhysicalKey};
pub use layout::{build_keys, PianoKeyVisual, Vec2};
pub use render::{build_draw_list, Palette, RectPrimitive, Rgba8};
pub use session::PianoSession;
