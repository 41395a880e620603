//! Error types for configuration and asset loading.
//!
//! The maze core never fails; only the startup layer does.
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read level table {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed level table: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid level table: {0}")]
    Invalid(String),
}

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("sprite {path:?} could not be loaded: {reason}")]
    Sprite { path: PathBuf, reason: String },
    #[error("music {path:?} could not be read: {source}")]
    MusicIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("music {path:?} could not be decoded: {source}")]
    MusicDecode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },
    #[error("no audio output: {0}")]
    Output(String),
}
