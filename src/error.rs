use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    #[error("sequence {index} contains invalid DNA character: '{character}'")]
    InvalidCharacter { index: usize, character: char },

    #[error(
        "names were supplied for {names} sequences, but {sequences} sequences were given
suggestion: pass exactly one name per sequence, or no names at all"
    )]
    LengthMismatch { sequences: usize, names: usize },

    #[error("input string contains invalid DNA character: '{character}'")]
    InvalidString { character: char },
}

pub type Result<T> = std::result::Result<T, PoolError>;
