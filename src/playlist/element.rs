use std::{
	borrow::Cow,
	fmt,
	path::{Path, PathBuf},
	time::Duration,
};

use super::yaml::{Entry, Seconds};

/// What a playlist entry points at, guessed from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
	Image,
	Video,
	Stream,
}

impl ElementKind {
	/// `http*` is a stream, `png`/`jpg`/`jpeg` an image, `mp4` a video.
	/// Anything else is not playable.
	pub fn classify(path: &str) -> Option<Self> {
		let path = path.to_ascii_lowercase();

		if path.starts_with("http") {
			Some(Self::Stream)
		} else if ["png", "jpg", "jpeg"].iter().any(|ext| path.ends_with(ext)) {
			Some(Self::Image)
		} else if path.ends_with("mp4") {
			Some(Self::Video)
		} else {
			None
		}
	}
}

impl fmt::Display for ElementKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::Image => "image",
			Self::Video => "video",
			Self::Stream => "stream",
		})
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Source {
	File(PathBuf),
	Url(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
	pub source: Source,
	pub kind: Option<ElementKind>,
	/// `None` means the element stays on screen forever.
	pub duration: Option<Duration>,
}

impl Element {
	pub fn new(path: &str, relative_to: Option<&Path>, duration: Option<Duration>) -> Self {
		let kind = ElementKind::classify(path);

		let source = if kind == Some(ElementKind::Stream) {
			Source::Url(path.to_owned())
		} else {
			let path = match relative_to {
				Some(dir) => dir.join(path),
				None => PathBuf::from(path),
			};
			Source::File(resolve(&path))
		};

		Self {
			source,
			kind,
			duration,
		}
	}

	/// Streams are always considered valid, files must exist.
	pub fn is_valid(&self) -> bool {
		match (&self.source, self.kind) {
			(_, None) => false,
			(Source::Url(_), _) => true,
			(Source::File(path), _) => path.is_file(),
		}
	}

	pub fn source_str(&self) -> Cow<'_, str> {
		match &self.source {
			Source::File(path) => path.to_string_lossy(),
			Source::Url(url) => Cow::Borrowed(url.as_str()),
		}
	}

	/// Short human readable name: the file name, or the whole URL.
	pub fn title(&self) -> Cow<'_, str> {
		match &self.source {
			Source::File(path) => path
				.file_name()
				.map_or_else(|| path.to_string_lossy(), |name| name.to_string_lossy()),
			Source::Url(url) => Cow::Borrowed(url.as_str()),
		}
	}

	/// `2.5s`, or `forever` when there is no duration.
	pub fn duration_label(&self) -> String {
		self.duration
			.map_or_else(|| "forever".to_owned(), |d| format!("{:.1}s", d.as_secs_f64()))
	}

	/// Entry as written back to `playlist.yaml`. Files inside `dir` are
	/// stored relative to it.
	pub fn to_entry(&self, dir: &Path) -> Entry {
		let name = match &self.source {
			Source::Url(url) => url.clone(),
			Source::File(path) => path
				.strip_prefix(dir)
				.unwrap_or(path)
				.to_string_lossy()
				.into_owned(),
		};

		match self.duration {
			None => Entry::Name(name),
			Some(duration) => Entry::Timed {
				name,
				durata: Some(Seconds(duration.as_secs_f64())),
			},
		}
	}
}

impl fmt::Display for Element {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.source_str())
	}
}

/// Absolute form of `path`, with symlinks followed when it exists.
pub(crate) fn resolve(path: &Path) -> PathBuf {
	path.canonicalize()
		.or_else(|_| std::path::absolute(path))
		.unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
	use std::fs;

	use super::*;

	#[test]
	fn classify_by_name() {
		assert_eq!(
			ElementKind::classify("https://example.com/live"),
			Some(ElementKind::Stream)
		);
		assert_eq!(ElementKind::classify("a.png"), Some(ElementKind::Image));
		assert_eq!(ElementKind::classify("a.JPEG"), Some(ElementKind::Image));
		assert_eq!(ElementKind::classify("clip.mp4"), Some(ElementKind::Video));
		assert_eq!(ElementKind::classify("notes.txt"), None);
	}

	#[test]
	fn streams_are_kept_verbatim() {
		let element = Element::new("http://cam.local/stream", Some(Path::new("/tmp")), None);

		assert_eq!(element.source, Source::Url("http://cam.local/stream".into()));
		assert!(element.is_valid());
	}

	#[test]
	fn files_resolve_against_the_folder() {
		let dir = tempfile::tempdir().unwrap();
		fs::write(dir.path().join("a.png"), b"png").unwrap();

		let element = Element::new("a.png", Some(dir.path()), None);
		let expected = dir.path().canonicalize().unwrap().join("a.png");

		assert_eq!(element.source, Source::File(expected));
		assert_eq!(element.title(), "a.png");
		assert!(element.is_valid());
	}

	#[test]
	fn missing_or_unknown_files_are_invalid() {
		let dir = tempfile::tempdir().unwrap();
		fs::write(dir.path().join("readme.txt"), b"hi").unwrap();

		assert!(!Element::new("gone.png", Some(dir.path()), None).is_valid());
		assert!(!Element::new("readme.txt", Some(dir.path()), None).is_valid());
	}

	#[test]
	fn duration_labels() {
		let forever = Element::new("http://cam.local/stream", None, None);
		let timed = Element::new(
			"http://cam.local/stream",
			None,
			Some(Duration::from_millis(2500)),
		);

		assert_eq!(forever.duration_label(), "forever");
		assert_eq!(timed.duration_label(), "2.5s");
	}

	#[test]
	fn entries_are_relative_to_the_folder() {
		let dir = tempfile::tempdir().unwrap();
		let base = dir.path().canonicalize().unwrap();
		fs::write(base.join("a.png"), b"png").unwrap();

		let plain = Element::new("a.png", Some(&base), None);
		assert_eq!(plain.to_entry(&base), Entry::Name("a.png".into()));

		let timed = Element::new("a.png", Some(&base), Some(Duration::from_secs(5)));
		assert_eq!(
			timed.to_entry(&base),
			Entry::Timed {
				name: "a.png".into(),
				durata: Some(Seconds(5.0)),
			}
		);
	}
}
