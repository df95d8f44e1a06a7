use std::sync::Arc;

use tokio::sync::mpsc;

use crate::playlist::Element;

pub mod http;
pub mod m3u;

#[derive(Debug)]
pub enum Message {
	Next(Element),
	/// The playlist was loaded again and now holds this many elements.
	Reloaded(usize),
}

pub type Sender = mpsc::Sender<Arc<Message>>;
pub type Receiver = mpsc::Receiver<Arc<Message>>;
