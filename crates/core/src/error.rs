use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CategoryError {
    #[error("category id must not be empty")]
    EmptyId,

    #[error("category id `{0}` is reserved")]
    ReservedId(String),

    #[error("duplicate category id `{0}`")]
    DuplicateId(String),

    #[error("category `{0}` has no keywords")]
    NoKeywords(String),

    #[error("failed to read category file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid category file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
