use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{PianoError, Result};

/// The default two-octave table: physical key, note id, display label.
/// Number-row keys carry the "white" notes and the QWERTY row the
/// "black" ones, interleaved the way they appear on the keyboard.
const DEFAULT_BINDINGS: [(char, &str); 20] = [
    ('1', "C3"),
    ('Q', "D3"),
    ('2', "E3"),
    ('W', "F3"),
    ('3', "G3"),
    ('E', "A3"),
    ('4', "C4"),
    ('R', "D4"),
    ('5', "E4"),
    ('T', "F4"),
    ('6', "G4"),
    ('Y', "A4"),
    ('7', "C5"),
    ('U', "D5"),
    ('8', "E5"),
    ('I', "F5"),
    ('9', "G5"),
    ('O', "A5"),
    ('0', "C6"),
    ('P', "D6"),
];

/// An input-device key code in the supported alphabet (uppercase ASCII
/// letters and digits).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "char", into = "char")]
pub struct PhysicalKey(char);

impl PhysicalKey {
    /// Validates and wraps a key code. Fails with [`PianoError::InvalidKey`]
    /// for anything outside the legal alphabet, including blanks and
    /// lowercase letters.
    pub fn new(code: char) -> Result<Self> {
        if code.is_ascii_uppercase() || code.is_ascii_digit() {
            Ok(Self(code))
        } else {
            Err(PianoError::InvalidKey(code))
        }
    }

    pub fn code(&self) -> char {
        self.0
    }
}

impl TryFrom<char> for PhysicalKey {
    type Error = PianoError;

    fn try_from(code: char) -> Result<Self> {
        Self::new(code)
    }
}

impl From<PhysicalKey> for char {
    fn from(key: PhysicalKey) -> char {
        key.0
    }
}

impl fmt::Display for PhysicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier for a playable audio sample, e.g. `C3`. Resolution to an
/// actual file path is the sample library's concern.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NoteAsset(String);

impl NoteAsset {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn id(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NoteAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One row of the binding table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyBinding {
    pub key: PhysicalKey,
    pub note: NoteAsset,
    /// Text shown next to the key in the remap UI and under the key
    /// visual. Defaults to the note id.
    pub label: String,
}

/// Bidirectional association between physical keys and note assets.
///
/// The table is a total function over the fixed layout: every key in the
/// default table has exactly one binding at all times, and `rebind` moves
/// a note to a new key without ever leaving it unassigned. Iteration
/// order is the table order and only changes when a binding is replaced.
#[derive(Debug, Clone, Default)]
pub struct KeyboardMap {
    bindings: Vec<KeyBinding>,
}

impl KeyboardMap {
    /// Builds the hardcoded default table.
    pub fn default_layout() -> Self {
        let bindings = DEFAULT_BINDINGS
            .iter()
            .map(|(code, note)| KeyBinding {
                key: PhysicalKey(*code),
                note: NoteAsset::new(*note),
                label: (*note).to_string(),
            })
            .collect();
        Self { bindings }
    }

    /// Builds a table from explicit entries. Intended for tests and for
    /// data-driven layouts loaded by the host.
    pub fn from_bindings(bindings: Vec<KeyBinding>) -> Self {
        Self { bindings }
    }

    /// Returns the note bound to `key`, or [`PianoError::UnboundKey`].
    pub fn resolve(&self, key: PhysicalKey) -> Result<&NoteAsset> {
        self.bindings
            .iter()
            .find(|binding| binding.key == key)
            .map(|binding| &binding.note)
            .ok_or(PianoError::UnboundKey(key.code()))
    }

    /// Moves the note currently triggered by `key` onto `new_key`.
    ///
    /// This is a key-identity swap, not a note swap: afterwards the note
    /// is reachable only via `new_key` and `key` has no binding. Fails
    /// with [`PianoError::InvalidKey`] if `new_key` is outside the legal
    /// alphabet or already bound to a different note, and with
    /// [`PianoError::UnboundKey`] if `key` has no entry to move. A failed
    /// rebind leaves the table untouched; rebinding a key to itself is a
    /// no-op success.
    pub fn rebind(&mut self, key: PhysicalKey, new_key: PhysicalKey) -> Result<()> {
        if key == new_key {
            self.resolve(key)?;
            return Ok(());
        }
        if self.bindings.iter().any(|binding| binding.key == new_key) {
            return Err(PianoError::InvalidKey(new_key.code()));
        }
        let binding = self
            .bindings
            .iter_mut()
            .find(|binding| binding.key == key)
            .ok_or(PianoError::UnboundKey(key.code()))?;
        binding.key = new_key;
        Ok(())
    }

    /// The full table in its stable iteration order, for the remap UI.
    pub fn bindings(&self) -> &[KeyBinding] {
        &self.bindings
    }

    /// Display label for the note bound to `key`, if any.
    pub fn label_for(&self, key: PhysicalKey) -> Option<&str> {
        self.bindings
            .iter()
            .find(|binding| binding.key == key)
            .map(|binding| binding.label.as_str())
    }
}
