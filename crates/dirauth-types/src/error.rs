use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SidError {
    #[error("SID payload truncated: {0} bytes, fixed header needs 8")]
    TruncatedHeader(usize),

    #[error("SID payload declares {expected} sub-authorities but carries only {actual}")]
    TruncatedSubAuthorities { expected: u8, actual: usize },

    #[error("Invalid SID string: {0}")]
    InvalidString(String),
}

pub type Result<T> = std::result::Result<T, SidError>;
