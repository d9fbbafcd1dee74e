/// Result alias that carries the custom [`PianoError`] type.
pub type Result<T> = std::result::Result<T, PianoError>;

/// Common error type for the core crate.
///
/// Every variant is a local, recoverable condition: the worst outcome
/// anywhere in the core is a missed sound trigger or a rejected rebind.
#[derive(Debug, thiserror::Error)]
pub enum PianoError {
    /// A rebind target is not a legal key code (must be an uppercase
    /// letter or digit) or is already bound to another note.
    #[error("invalid key code `{0}`: must be an unused uppercase letter or digit")]
    InvalidKey(char),
    /// A key was resolved that has no binding. Unreachable while the
    /// binding table stays total over the fixed layout, but guarded
    /// rather than left as undefined behavior.
    #[error("no note is bound to key `{0}`")]
    UnboundKey(char),
    /// A sample lookup referenced a note id the library does not know.
    #[error("unknown note asset `{0}`")]
    UnknownAsset(String),
    /// Wrapper around standard IO errors raised while loading configuration.
    #[error("{0}")]
    Io(#[from] std::io::Error),
    /// Wrapper around JSON errors raised while parsing configuration.
    #[error("{0}")]
    Json(#[from] serde_json::Error),
}
