use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
	#[error("no playlist folder configured")]
	MissingFolder,

	#[error("cannot create playlist folder at {}: {source}", path.display())]
	WrongFolderPath {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	#[error("I/O error on {}: {source}", path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	#[error("YAML error: {0}")]
	Yaml(#[from] serde_yaml::Error),

	#[error("watcher error: {0}")]
	Watch(#[from] notify::Error),

	#[error("http error: {0}")]
	Http(#[from] hyper::Error),
}

impl Error {
	pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
		let path = path.into();
		move |source| Self::Io { path, source }
	}
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
