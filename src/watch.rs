//! Reloads the playlist when its folder changes.
//!
//! Saving a file usually produces a burst of events (create, several
//! writes, rename), so changes are only acted upon once the folder has been
//! quiet for the debounce window.

use std::{path::Path, time::Duration};

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher as _};
use tokio::sync::mpsc;

use crate::{
	error::Result,
	player::Shared,
	runner::{Control, ControlSender},
};

type Events = mpsc::UnboundedReceiver<notify::Result<Event>>;

pub struct Watcher {
	// dropping it stops the events
	_watcher: Option<RecommendedWatcher>,
	rx: Events,
	debounce: Duration,
}

impl Watcher {
	pub fn new(dir: &Path, debounce: Duration) -> Result<Self> {
		let (sx, rx) = mpsc::unbounded_channel();

		let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
			// the receiver only goes away on shutdown
			let _ = sx.send(res);
		})?;
		watcher.watch(dir, RecursiveMode::NonRecursive)?;

		log::info!("watching {} for changes", dir.display());

		Ok(Self {
			_watcher: Some(watcher),
			rx,
			debounce,
		})
	}

	pub async fn run_loop(mut self, player: Shared, control: ControlSender) {
		while self.settle().await {
			let res = player
				.lock()
				.expect("Error locking player mutex to reload")
				.on_change();

			match res {
				Ok(()) => {
					log::info!("playlist reloaded");
					if control.send(Control::Reloaded).is_err() {
						log::debug!("runner stopped, no longer watching");
						break;
					}
				}
				Err(e) => log::error!("cannot reload playlist: {}", e),
			}
		}
	}

	/// Waits for a change and for the burst that follows it to end. Returns
	/// false once no more events can arrive.
	async fn settle(&mut self) -> bool {
		loop {
			match self.rx.recv().await {
				None => return false,
				Some(event) if is_relevant(&event) => break,
				Some(_) => {}
			}
		}

		loop {
			match tokio::time::timeout(self.debounce, self.rx.recv()).await {
				Err(_) | Ok(None) => return true,
				Ok(Some(_)) => {}
			}
		}
	}
}

fn is_relevant(event: &notify::Result<Event>) -> bool {
	match event {
		Ok(event) => matches!(
			event.kind,
			EventKind::Any | EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
		),
		Err(e) => {
			log::warn!("watch error: {}", e);
			false
		}
	}
}
