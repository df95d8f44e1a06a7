use std::{
	path::PathBuf,
	sync::{Arc, Mutex},
};

use crate::{
	error::Result,
	playlist::{Element, Playlist},
};

pub type Shared = Arc<Mutex<Player>>;

/// A playlist that remembers which element is on screen.
#[derive(Debug, Default)]
pub struct Player {
	playlist: Playlist,
	cursor: Option<usize>,
}

impl Player {
	pub fn new(playlist: Playlist) -> Self {
		Self {
			playlist,
			cursor: None,
		}
	}

	pub fn into_shared(self) -> Shared {
		Arc::new(Mutex::new(self))
	}

	pub fn playlist(&self) -> &Playlist {
		&self.playlist
	}

	/// Advances to the following element, starting over after the last one.
	pub fn next(&mut self) -> Option<&Element> {
		let len = self.playlist.len();
		if len == 0 {
			self.cursor = None;
			return None;
		}

		let idx = match self.cursor {
			Some(idx) if idx + 1 < len => idx + 1,
			_ => 0,
		};
		self.cursor = Some(idx);

		self.playlist.elements().get(idx)
	}

	pub fn current(&self) -> Option<&Element> {
		self.cursor.and_then(|idx| self.playlist.elements().get(idx))
	}

	/// The next `n` elements in play order, wrapping around.
	pub fn upcoming(&self, n: usize) -> impl Iterator<Item = &Element> {
		let elements = self.playlist.elements();
		let start = self.cursor.map_or(0, |idx| idx + 1);

		elements
			.iter()
			.cycle()
			.skip(start)
			.take(n.min(elements.len()))
	}

	/// Goes back to before the first element.
	pub fn restart(&mut self) {
		self.cursor = None;
	}

	pub fn reload(&mut self, dir: Option<PathBuf>) -> Result<()> {
		self.cursor = None;
		self.playlist.reload(dir)
	}

	pub fn on_change(&mut self) -> Result<()> {
		self.cursor = None;
		self.playlist.on_change()
	}
}
