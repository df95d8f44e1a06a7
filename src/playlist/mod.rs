pub mod element;
pub mod fs;
pub mod yaml;

use std::path::{Path, PathBuf};

pub use element::{Element, ElementKind, Source};

use crate::error::{Error, Result};

/// An ordered list of media elements backed by a folder on disk.
///
/// The folder holds a `playlist.yaml` describing the order. When the file is
/// missing, one is generated from the media files found in the folder.
#[derive(Debug, Clone, Default)]
pub struct Playlist {
	dir: Option<PathBuf>,
	elements: Vec<Element>,
}

impl Playlist {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
		let mut playlist = Self {
			dir: Some(dir.into()),
			elements: Vec::new(),
		};
		playlist.load()?;

		Ok(playlist)
	}

	pub fn dir(&self) -> Option<&Path> {
		self.dir.as_deref()
	}

	pub fn elements(&self) -> &[Element] {
		&self.elements
	}

	pub fn iter(&self) -> std::slice::Iter<'_, Element> {
		self.elements.iter()
	}

	pub fn len(&self) -> usize {
		self.elements.len()
	}

	pub fn is_empty(&self) -> bool {
		self.elements.is_empty()
	}

	/// Makes sure the folder exists, then reads the playlist from it.
	///
	/// A missing folder is created and seeded with a placeholder playlist.
	pub fn load(&mut self) -> Result<()> {
		log::debug!("playlist load: {:?}", self.dir);

		let Some(dir) = self.dir.as_deref() else {
			log::error!("no playlist folder configured");
			return Err(Error::MissingFolder);
		};

		if !dir.is_dir() {
			let wanted = element::resolve(dir);

			if let Err(source) = fs::create_default(dir) {
				log::error!(
					"cannot create the playlist folder at {}: {}",
					wanted.display(),
					source
				);
				return Err(Error::WrongFolderPath {
					path: wanted,
					source,
				});
			}

			log::warn!(
				"playlist folder did not exist, created it at {}",
				wanted.display()
			);
		}

		self.populate()
	}

	/// Reads `playlist.yaml`, or builds and saves one from the folder content.
	pub fn populate(&mut self) -> Result<()> {
		let dir = self.dir.clone().ok_or(Error::MissingFolder)?;

		let file = dir.join(fs::PLAYLIST_FILE);
		if file.is_file() {
			return self.load_file(&file);
		}

		self.elements = fs::media_files(&dir)
			.map_err(Error::io(&dir))?
			.iter()
			.filter_map(|path| path.file_name())
			.map(|name| Element::new(&name.to_string_lossy(), Some(&dir), None))
			.collect();

		log::info!(
			"no {} in {}, generated one with {} elements",
			fs::PLAYLIST_FILE,
			dir.display(),
			self.elements.len()
		);

		if let Err(e) = self.save() {
			log::error!("cannot save the generated playlist: {}", e);
		}

		Ok(())
	}

	/// Replaces the elements with the valid entries of a playlist file.
	///
	/// A file that is not valid YAML leaves the playlist empty.
	pub fn load_file(&mut self, file: &Path) -> Result<()> {
		let text = std::fs::read_to_string(file).map_err(Error::io(file))?;

		let entries = match yaml::parse(&text) {
			Ok(entries) => entries,
			Err(e) => {
				log::error!("invalid playlist {}: {}", file.display(), e);
				self.elements.clear();
				return Ok(());
			}
		};

		let dir = self.dir.as_deref().or_else(|| file.parent());
		let mut elements = Vec::with_capacity(entries.len());

		for entry in entries {
			let duration = match entry.duration() {
				Ok(duration) => duration,
				Err(e) => {
					log::warn!("invalid duration for {}: {}", entry.name(), e);
					continue;
				}
			};

			let element = Element::new(entry.name(), dir, duration);
			if element.is_valid() {
				log::debug!("loading element {}", element);
				elements.push(element);
			} else {
				log::warn!("cannot add element {}, it is not valid", element);
			}
		}

		self.elements = elements;

		Ok(())
	}

	/// Writes the current elements to `playlist.yaml` in the folder.
	pub fn save(&self) -> Result<()> {
		let dir = self.dir.as_deref().ok_or(Error::MissingFolder)?;
		let base = element::resolve(dir);

		let entries: Vec<_> = self.elements.iter().map(|e| e.to_entry(&base)).collect();
		let file = dir.join(fs::PLAYLIST_FILE);

		std::fs::write(&file, yaml::render(&entries)?).map_err(Error::io(&file))
	}

	/// Loads again, optionally from a different folder.
	pub fn reload(&mut self, dir: Option<PathBuf>) -> Result<()> {
		if let Some(dir) = dir {
			self.dir = Some(dir);
		}

		self.load()
	}

	/// Called when the content of the folder changed.
	pub fn on_change(&mut self) -> Result<()> {
		self.load()
	}
}

impl<'a> IntoIterator for &'a Playlist {
	type Item = &'a Element;
	type IntoIter = std::slice::Iter<'a, Element>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}
