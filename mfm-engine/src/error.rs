use mfm_types::{EmojiSet, InstanceHost};
use thiserror::Error;

pub type EngineResult<T> = Result<T, EngineError>;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Failed to fetch {set} emoji for {instance}: {reason}")]
    Fetch {
        instance: String,
        set: &'static str,
        reason: String,
    },

    #[error("Invalid instance host: {0}")]
    InvalidInstance(String),
}

impl EngineError {
    pub fn fetch(instance: &InstanceHost, set: EmojiSet, reason: impl ToString) -> Self {
        EngineError::Fetch {
            instance: instance.to_string(),
            set: set.as_str(),
            reason: reason.to_string(),
        }
    }
}

/// Parse a host or base URL into an [`InstanceHost`], rejecting blanks
pub fn parse_instance(raw: &str) -> EngineResult<InstanceHost> {
    InstanceHost::parse(raw).ok_or_else(|| EngineError::InvalidInstance(raw.to_string()))
}
