use std::{
	fs, io,
	path::{Path, PathBuf},
};

pub const PLAYLIST_FILE: &str = "playlist.yaml";
pub const DEFAULT_IMAGE_FILE: &str = "empty_playlist.png";

const DEFAULT_PLAYLIST: &[u8] = include_bytes!("../../assets/default_playlist/playlist.yaml");
const DEFAULT_IMAGE: &[u8] = include_bytes!("../../assets/default_playlist/empty_playlist.png");

const MEDIA_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "mp4"];

pub fn is_media(path: &Path) -> bool {
	path.extension()
		.and_then(|ext| ext.to_str())
		.is_some_and(|ext| MEDIA_EXTENSIONS.iter().any(|m| ext.eq_ignore_ascii_case(m)))
}

/// Media files directly inside `dir`, sorted by name.
pub fn media_files(dir: impl AsRef<Path>) -> io::Result<Vec<PathBuf>> {
	let dir = dir.as_ref();
	if !dir.is_dir() {
		return Err(io::Error::new(
			io::ErrorKind::InvalidInput,
			"Not valid directory",
		));
	}

	let mut files = Vec::new();

	for entry in dir.read_dir()? {
		let path = entry?.path();

		if path.is_file() && is_media(&path) {
			files.push(path);
		}
	}

	files.sort();

	Ok(files)
}

/// Creates `dir` with the bundled placeholder playlist in it.
pub fn create_default(dir: impl AsRef<Path>) -> io::Result<()> {
	let dir = dir.as_ref();

	fs::create_dir_all(dir)?;
	fs::write(dir.join(PLAYLIST_FILE), DEFAULT_PLAYLIST)?;
	fs::write(dir.join(DEFAULT_IMAGE_FILE), DEFAULT_IMAGE)?;

	Ok(())
}
