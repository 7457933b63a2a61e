use thiserror::Error;

/// Content formation failures. Rendering and composition are total over a
/// default-initialized record; the presentation layer decides how to surface
/// an `Err` (inline preview text, dialog) instead of unwinding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LetterError {
    #[error("image reference has an empty path")]
    EmptyImagePath,
}
