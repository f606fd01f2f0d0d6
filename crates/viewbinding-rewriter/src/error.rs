use std::path::PathBuf;

use thiserror::Error;

use crate::vfs::FileId;

pub type RewriteResult<T> = Result<T, RewriteError>;

#[derive(Error, Debug)]
pub enum RewriteError {
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration in {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("unknown variant `{0}`")]
    UnknownVariant(String),
    #[error("could not locate {edit} in class {class}")]
    EditNotLocated {
        edit: String,
        class: String,
    },
    #[error("unknown file {0}")]
    UnknownFile(FileId),
    #[error("reference index worker is not running")]
    IndexUnavailable,
    #[error("class {class} already declares `binding` as {found}, expected {expected}")]
    BindingFieldConflict {
        class: String,
        found: String,
        expected: String,
    },
    #[error("`{name}` is still referenced in class {class} after the rewrite")]
    UnresolvedReference {
        name: String,
        class: String,
    },
}

impl RewriteError {
    pub(crate) fn io(
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn not_located(
        edit: impl Into<String>,
        class: impl Into<String>,
    ) -> Self {
        Self::EditNotLocated {
            edit: edit.into(),
            class: class.into(),
        }
    }
}
