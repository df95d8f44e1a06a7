//! The `playlist.yaml` document.
//!
//! A playlist file is a YAML list. Each item is either a bare name or a
//! mapping with a `name` and an optional `durata` in seconds:
//!
//! ```yaml
//! - intro.mp4
//! - name: poster.png
//!   durata: 10
//! - https://example.com/live.m3u8
//! ```
//!
//! Broken items are logged and skipped so one bad line does not take the
//! whole playlist down.

use std::time::{Duration, TryFromFloatSecsError};

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_yaml::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InvalidDuration {
	#[error("duration must be positive, got {0}")]
	NotPositive(f64),
	#[error(transparent)]
	OutOfRange(#[from] TryFromFloatSecsError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Entry {
	Name(String),
	Timed {
		name: String,
		#[serde(default, alias = "duration", skip_serializing_if = "Option::is_none")]
		durata: Option<Seconds>,
	},
}

impl Entry {
	pub fn name(&self) -> &str {
		match self {
			Self::Name(name) | Self::Timed { name, .. } => name,
		}
	}

	/// Only positive durations are accepted.
	pub fn duration(&self) -> Result<Option<Duration>, InvalidDuration> {
		match self {
			Self::Timed {
				durata: Some(Seconds(secs)),
				..
			} => {
				let duration = Duration::try_from_secs_f64(*secs)?;
				if duration.is_zero() {
					return Err(InvalidDuration::NotPositive(*secs));
				}
				Ok(Some(duration))
			}
			_ => Ok(None),
		}
	}
}

/// Seconds as written in a playlist. Older files store them as strings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Seconds(pub f64);

impl Serialize for Seconds {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_f64(self.0)
	}
}

impl<'de> Deserialize<'de> for Seconds {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		#[derive(Deserialize)]
		#[serde(untagged)]
		enum Raw {
			Number(f64),
			Text(String),
		}

		match Raw::deserialize(deserializer)? {
			Raw::Number(secs) => Ok(Self(secs)),
			Raw::Text(text) => text
				.trim()
				.parse()
				.map(Self)
				.map_err(|e| de::Error::custom(format!("invalid duration {text:?}: {e}"))),
		}
	}
}

pub fn parse(text: &str) -> Result<Vec<Entry>, serde_yaml::Error> {
	if text.trim().is_empty() {
		return Ok(Vec::new());
	}

	let root: Value = serde_yaml::from_str(text)?;

	let items = match root {
		Value::Null => return Ok(Vec::new()),
		Value::Sequence(items) => items,
		other => {
			log::error!("playlist is not a list, ignoring it: {:?}", other);
			return Ok(Vec::new());
		}
	};

	Ok(items
		.into_iter()
		.filter_map(|item| match item {
			Value::Tagged(tagged) => {
				log::warn!("unknown tag while parsing: {}", tagged.tag);
				None
			}
			item => match serde_yaml::from_value::<Entry>(item.clone()) {
				Ok(entry) => Some(entry),
				Err(e) => {
					log::warn!("skipping playlist entry {:?}: {}", item, e);
					None
				}
			},
		})
		.collect())
}

pub fn render(entries: &[Entry]) -> Result<String, serde_yaml::Error> {
	serde_yaml::to_string(entries)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn names_and_mappings() {
		let entries = parse("- a.png\n- name: b.mp4\n  durata: 2.5\n- name: c.jpg\n").unwrap();

		assert_eq!(
			entries,
			vec![
				Entry::Name("a.png".into()),
				Entry::Timed {
					name: "b.mp4".into(),
					durata: Some(Seconds(2.5)),
				},
				Entry::Timed {
					name: "c.jpg".into(),
					durata: None,
				},
			]
		);
		assert_eq!(entries[1].duration().unwrap(), Some(Duration::from_millis(2500)));
		assert_eq!(entries[2].duration().unwrap(), None);
	}

	#[test]
	fn durations_written_as_strings() {
		let entries = parse("- name: a.png\n  durata: '10.0'\n- name: b.png\n  duration: 3\n").unwrap();

		assert_eq!(entries[0].duration().unwrap(), Some(Duration::from_secs(10)));
		assert_eq!(entries[1].duration().unwrap(), Some(Duration::from_secs(3)));
	}

	#[test]
	fn negative_durations_do_not_convert() {
		let entries = parse("- name: a.png\n  durata: -1\n").unwrap();

		assert!(entries[0].duration().is_err());
	}

	#[test]
	fn zero_durations_are_rejected() {
		let entries = parse("- name: a.png\n  durata: 0\n- name: b.png\n  durata: '0.0'\n").unwrap();

		assert!(matches!(
			entries[0].duration(),
			Err(InvalidDuration::NotPositive(_))
		));
		assert!(entries[1].duration().is_err());
	}

	#[test]
	fn unknown_tags_and_junk_are_skipped() {
		let entries = parse("- !secret a.png\n- b.png\n- 42\n- {durata: 3}\n- [x]\n").unwrap();

		assert_eq!(entries, vec![Entry::Name("b.png".into())]);
	}

	#[test]
	fn empty_and_non_list_documents() {
		assert!(parse("").unwrap().is_empty());
		assert!(parse("~\n").unwrap().is_empty());
		assert!(parse("name: a.png\n").unwrap().is_empty());
	}

	#[test]
	fn syntax_errors_are_reported() {
		assert!(parse("- [a.png\n").is_err());
	}

	#[test]
	fn render_block_style() {
		let text = render(&[
			Entry::Name("a.png".into()),
			Entry::Timed {
				name: "b.png".into(),
				durata: Some(Seconds(5.0)),
			},
		])
		.unwrap();

		assert_eq!(text, "- a.png\n- name: b.png\n  durata: 5.0\n");
	}
}
