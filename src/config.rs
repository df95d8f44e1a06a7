use std::{net::SocketAddr, path::PathBuf, time::Duration};

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "playlists", version, about = "Load playlists stored as YAML files")]
pub struct Cli {
	/// Folder holding playlist.yaml and the media it lists
	#[arg(long, env = "PLAYLIST_DIR", default_value = "./playlist", global = true)]
	pub dir: PathBuf,

	#[command(subcommand)]
	pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
	/// Print every element of the playlist
	List,
	/// Print the playlist as an extended M3U
	M3u,
	/// Cycle through the playlist, reloading it when the folder changes
	Play(PlayArgs),
}

#[derive(Debug, Args)]
pub struct PlayArgs {
	/// How long the folder must stay quiet before reloading
	#[arg(long, env = "PLAYLIST_DEBOUNCE_MS", default_value_t = 500)]
	pub debounce_ms: u64,

	/// Do not watch the folder for changes
	#[arg(long)]
	pub no_watch: bool,

	/// Serve the playlist over HTTP on this address
	#[arg(long, env = "PLAYLIST_HTTP")]
	pub http: Option<SocketAddr>,
}

impl PlayArgs {
	pub fn debounce(&self) -> Duration {
		Duration::from_millis(self.debounce_ms)
	}
}
