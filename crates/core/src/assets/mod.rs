use std::collections::HashSet;

use crate::{config::SampleConfig, KeyBinding, NoteAsset, PianoError, Result};

/// Registry of the note samples the external audio engine can play.
///
/// The core never opens the files; it only turns note ids into paths
/// under the configured scheme (`notes/C3.ogg` with the defaults) and
/// refuses ids it has never been told about.
#[derive(Debug, Default)]
pub struct SampleLibrary {
    config: SampleConfig,
    known: HashSet<NoteAsset>,
}

impl SampleLibrary {
    pub fn new(config: SampleConfig) -> Self {
        Self {
            config,
            known: HashSet::new(),
        }
    }

    /// Registers every note referenced by a binding table.
    pub fn from_bindings(config: SampleConfig, bindings: &[KeyBinding]) -> Self {
        let mut library = Self::new(config);
        for binding in bindings {
            library.register(binding.note.clone());
        }
        library
    }

    pub fn register(&mut self, note: NoteAsset) {
        self.known.insert(note);
    }

    pub fn contains(&self, note: &NoteAsset) -> bool {
        self.known.contains(note)
    }

    /// Resolves a note id to the sample path the audio collaborator
    /// should load, or [`PianoError::UnknownAsset`] for foreign ids.
    pub fn sample_path(&self, note: &NoteAsset) -> Result<String> {
        if !self.known.contains(note) {
            return Err(PianoError::UnknownAsset(note.id().to_string()));
        }
        Ok(format!(
            "{}/{}.{}",
            self.config.directory,
            note.id(),
            self.config.extension
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::KeyboardMap;

    #[test]
    fn resolves_registered_notes_to_paths() {
        let map = KeyboardMap::default_layout();
        let library = SampleLibrary::from_bindings(SampleConfig::default(), map.bindings());

        let path = library.sample_path(&NoteAsset::new("C3")).unwrap();
        assert_eq!(path, "notes/C3.ogg");
    }

    #[test]
    fn errors_on_unknown_notes() {
        let library = SampleLibrary::new(SampleConfig::default());
        let err = library.sample_path(&NoteAsset::new("H9")).unwrap_err();
        assert!(format!("{err}").contains("H9"));
    }

    #[test]
    fn honours_a_custom_path_scheme() {
        let mut library = SampleLibrary::new(SampleConfig {
            directory: "assets/samples".to_string(),
            extension: "wav".to_string(),
        });
        library.register(NoteAsset::new("A4"));
        assert_eq!(
            library.sample_path(&NoteAsset::new("A4")).unwrap(),
            "assets/samples/A4.wav"
        );
    }
}
