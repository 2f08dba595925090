//! # Erros do Denoiser
//!
//! O pipeline é computação pura sobre strings em memória: qualquer falha aqui é
//! erro de configuração, nunca uma condição transitória. Não há retry.

use std::io;

use thiserror::Error;

/// Erros de configuração e carregamento do denoiser.
#[derive(Debug, Error)]
pub enum DenoiseError {
    /// `min_window` precisa ser pelo menos 1.
    #[error("invalid window bounds: min_window must be >= 1 (got min_window={min_window}, max_window={max_window})")]
    InvalidWindow { min_window: usize, max_window: usize },
    #[error("configuration error: {0}")]
    Config(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl From<toml::de::Error> for DenoiseError {
    fn from(err: toml::de::Error) -> Self {
        DenoiseError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DenoiseError>;
