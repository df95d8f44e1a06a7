use std::fmt::Write;

use crate::playlist::Playlist;

/// Extended M3U listing of the playlist. Elements without a duration get
/// `-1`, the M3U convention for "unknown".
pub fn generate(playlist: &Playlist) -> String {
	let mut m3u = String::from("#EXTM3U\r\n");

	for element in playlist {
		let secs = element
			.duration
			.map_or(-1, |duration| duration.as_secs_f64().ceil() as i64);

		write!(
			&mut m3u,
			"#EXTINF:{},{}\r\n{}\r\n",
			secs,
			element.title(),
			element.source_str(),
		)
		.expect("Error writing to string!");
	}

	m3u
}

#[cfg(test)]
mod tests {
	use std::fs;

	use super::*;

	#[test]
	fn lists_every_element() {
		let dir = tempfile::tempdir().unwrap();
		fs::write(dir.path().join("a.png"), b"").unwrap();
		fs::write(
			dir.path().join("playlist.yaml"),
			"- name: a.png\n  durata: 2.2\n- http://example.com/live\n",
		)
		.unwrap();
		let playlist = Playlist::open(dir.path()).unwrap();
		let image = dir.path().canonicalize().unwrap().join("a.png");

		assert_eq!(
			generate(&playlist),
			format!(
				"#EXTM3U\r\n#EXTINF:3,a.png\r\n{}\r\n#EXTINF:-1,http://example.com/live\r\nhttp://example.com/live\r\n",
				image.display()
			)
		);
	}

	#[test]
	fn empty_playlist() {
		assert_eq!(generate(&Playlist::new()), "#EXTM3U\r\n");
	}
}
