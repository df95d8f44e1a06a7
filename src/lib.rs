//! Load playlists stored as YAML files and keep them in sync with the folder
//! they live in.

pub mod config;
pub mod error;
pub mod output;
pub mod player;
pub mod playlist;
pub mod runner;
pub mod watch;

pub use error::{Error, Result};
pub use player::{Player, Shared};
pub use playlist::{Element, ElementKind, Playlist, Source};
