use std::sync::Arc;

use futures::future;
use tokio::sync::mpsc;

use crate::{
	output::{Message, Sender},
	player::Shared,
};

/// Requests that cut the current element short.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
	/// The playlist was reloaded, start again from the top.
	Reloaded,
	Skip,
}

pub type ControlSender = mpsc::UnboundedSender<Control>;
pub type ControlReceiver = mpsc::UnboundedReceiver<Control>;

pub fn control() -> (ControlSender, ControlReceiver) {
	mpsc::unbounded_channel()
}

/// Walks the playlist forever, announcing every element to the outputs and
/// keeping it up for its duration.
#[derive(Debug)]
pub struct Runner {
	pub services: Vec<Sender>,
	pub player: Shared,
	pub control: ControlReceiver,
}

impl Runner {
	async fn send(&mut self, msg: Message) {
		let msg = Arc::new(msg);
		let results =
			future::join_all(self.services.iter().map(|x| x.send(Arc::clone(&msg)))).await;

		let mut results = results.into_iter();
		self.services.retain(|_| match results.next() {
			Some(Ok(())) => true,
			_ => {
				log::warn!("output channel closed, dropping it");
				false
			}
		});
	}

	async fn handle(&mut self, control: Control) {
		match control {
			Control::Skip => log::debug!("skipping current element"),
			Control::Reloaded => {
				let len = {
					let mut guard = self.player.lock().expect("Error locking player mutex");
					guard.restart();
					guard.playlist().len()
				};
				self.send(Message::Reloaded(len)).await;
			}
		}
	}

	/// Returns once every control sender is gone.
	pub async fn run_loop(mut self) {
		loop {
			// requests that arrived while the last element timed out
			while let Ok(control) = self.control.try_recv() {
				self.handle(control).await;
			}

			let next = self
				.player
				.lock()
				.expect("Error locking player mutex")
				.next()
				.cloned();

			let wait = match next {
				Some(element) => {
					log::info!("now showing {} ({})", element, element.duration_label());
					let duration = element.duration;
					self.send(Message::Next(element)).await;
					duration
				}
				None => {
					log::info!("playlist is empty, waiting for changes");
					None
				}
			};

			let control = match wait {
				Some(duration) => tokio::select! {
					_ = tokio::time::sleep(duration) => continue,
					control = self.control.recv() => control,
				},
				None => self.control.recv().await,
			};

			match control {
				Some(control) => self.handle(control).await,
				None => {
					log::debug!("control channel closed, stopping");
					return;
				}
			}
		}
	}
}
