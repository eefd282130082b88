/// Why a calculation request was rejected. Every variant is a deterministic
/// consequence of the input and is surfaced to the traveller as-is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmissionsError {
    #[error("invalid distance: enter a finite distance greater than zero")]
    InvalidDistance,
    #[error("invalid travel mode selected: {0:?}")]
    InvalidMode(String),
    #[error("invalid option {option:?} selected for travel mode {mode:?}")]
    InvalidOption { mode: String, option: String },
    #[error("invalid haul category selected: {0:?}")]
    InvalidHaul(String),
}
