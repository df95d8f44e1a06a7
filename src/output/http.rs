use std::{convert::Infallible, fmt::Write, net::SocketAddr, sync::Arc};

use hyper::{
	header,
	server::conn::AddrStream,
	service::{make_service_fn, service_fn},
	Body, Request, Response, StatusCode,
};
use tokio::sync::RwLock;

use crate::{
	error::Result,
	player::Shared,
	playlist::Element,
	runner::{Control, ControlSender},
};

use super::{m3u, Message, Receiver};

const QUEUE_LEN: usize = 5;

#[derive(Debug, Clone)]
struct State {
	player: Shared,
	control: ControlSender,
	curr: Arc<RwLock<Option<Element>>>,
}

impl State {
	async fn route(self, req: Request<Body>) -> hyper::http::Result<Response<Body>> {
		match req.uri().path() {
			"/now" => self.now().await,
			"/queue" => self.queue(),
			"/playlist.m3u8" => self.m3u(),
			"/skip" => self.skip(),
			path => Self::not_found(path),
		}
	}

	async fn now(self) -> hyper::http::Result<Response<Body>> {
		let text = match &*self.curr.read().await {
			Some(element) => element.source_str().into_owned(),
			None => "Empty".to_owned(),
		};

		Response::builder()
			.header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
			.body(Body::from(text))
	}

	fn queue(self) -> hyper::http::Result<Response<Body>> {
		let mut writer = String::new();
		let guard = self.player.lock().expect("Error locking player to read");

		for element in guard.upcoming(QUEUE_LEN) {
			writeln!(&mut writer, "{}", element).expect("Error writing to buffer");
		}
		drop(guard);

		Response::builder()
			.header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
			.body(Body::from(writer))
	}

	fn m3u(self) -> hyper::http::Result<Response<Body>> {
		let body = m3u::generate(
			self.player
				.lock()
				.expect("Error locking player to read")
				.playlist(),
		);

		Response::builder()
			.header(header::CONTENT_TYPE, "audio/x-mpegurl")
			.body(Body::from(body))
	}

	fn skip(self) -> hyper::http::Result<Response<Body>> {
		let text = match self.control.send(Control::Skip) {
			Ok(()) => "OK",
			Err(_) => "Stopped",
		};

		Response::builder()
			.header(header::CONTENT_TYPE, "text/plain")
			.body(Body::from(text))
	}

	fn not_found(path: &str) -> hyper::http::Result<Response<Body>> {
		log::debug!("no route for {}", path);

		Response::builder()
			.status(StatusCode::NOT_FOUND)
			.header(header::CONTENT_TYPE, "text/plain")
			.body(Body::from("Invalid path"))
	}
}

/// Read-only view of the player over HTTP, plus a skip button.
#[derive(Debug)]
pub struct Server {
	addr: SocketAddr,
	rx: Receiver,
	state: State,
}

impl Server {
	pub fn new(addr: SocketAddr, player: Shared, control: ControlSender, rx: Receiver) -> Self {
		Self {
			addr,
			rx,
			state: State {
				player,
				control,
				curr: Default::default(),
			},
		}
	}

	async fn worker(mut rx: Receiver, curr: Arc<RwLock<Option<Element>>>) {
		while let Some(msg) = rx.recv().await {
			match msg.as_ref() {
				Message::Next(element) => *curr.write().await = Some(element.clone()),
				Message::Reloaded(len) => {
					log::debug!("playlist reloaded with {} elements", len);
					*curr.write().await = None;
				}
			}
		}
	}

	pub async fn run_loop(self) -> Result<()> {
		let Self { addr, rx, state } = self;
		let curr = Arc::clone(&state.curr);

		let make_service = make_service_fn(move |_: &AddrStream| {
			let state = state.clone();

			let service = service_fn(move |req| state.clone().route(req));

			async move { Ok::<_, Infallible>(service) }
		});

		let server = hyper::Server::try_bind(&addr)?.serve(make_service);
		log::info!("serving the playlist on http://{}", server.local_addr());

		let (_, res) = tokio::join!(Self::worker(rx, curr), server);

		Ok(res?)
	}
}

#[cfg(test)]
mod tests {
	use std::fs;

	use tokio::sync::mpsc;

	use super::*;
	use crate::{
		player::Player,
		playlist::Playlist,
		runner::{self, ControlReceiver},
	};

	fn state() -> (tempfile::TempDir, State, ControlReceiver) {
		let dir = tempfile::tempdir().unwrap();
		for name in ["a.png", "b.png", "c.png"] {
			fs::write(dir.path().join(name), b"").unwrap();
		}
		let player = Player::new(Playlist::open(dir.path()).unwrap()).into_shared();
		let (control, control_rx) = runner::control();

		let state = State {
			player,
			control,
			curr: Default::default(),
		};

		(dir, state, control_rx)
	}

	async fn get(state: &State, path: &str) -> (StatusCode, String) {
		let req = Request::get(path).body(Body::empty()).unwrap();
		let res = state.clone().route(req).await.unwrap();
		let status = res.status();
		let body = hyper::body::to_bytes(res.into_body()).await.unwrap();

		(status, String::from_utf8(body.to_vec()).unwrap())
	}

	#[tokio::test]
	async fn now_follows_runner_messages() {
		let (_dir, state, _control_rx) = state();
		assert_eq!(get(&state, "/now").await.1, "Empty");

		let element = state.player.lock().unwrap().next().cloned().unwrap();
		let (sx, rx) = mpsc::channel(8);
		let worker = tokio::spawn(Server::worker(rx, Arc::clone(&state.curr)));
		sx.send(Arc::new(Message::Next(element.clone()))).await.unwrap();
		drop(sx);
		worker.await.unwrap();

		assert_eq!(get(&state, "/now").await.1, element.source_str());
	}

	#[tokio::test]
	async fn queue_lists_upcoming_elements() {
		let (_dir, state, _control_rx) = state();
		state.player.lock().unwrap().next();

		let (status, body) = get(&state, "/queue").await;
		let titles: Vec<_> = body
			.lines()
			.map(|line| line.rsplit('/').next().unwrap())
			.collect();

		assert_eq!(status, StatusCode::OK);
		assert_eq!(titles, ["b.png", "c.png", "a.png"]);
	}

	#[tokio::test]
	async fn playlist_as_m3u() {
		let (_dir, state, _control_rx) = state();

		let (status, body) = get(&state, "/playlist.m3u8").await;

		assert_eq!(status, StatusCode::OK);
		assert!(body.starts_with("#EXTM3U\r\n#EXTINF:-1,a.png\r\n"));
		assert_eq!(body.matches("#EXTINF").count(), 3);
	}

	#[tokio::test]
	async fn skip_reaches_the_runner() {
		let (_dir, state, mut control_rx) = state();

		assert_eq!(get(&state, "/skip").await.1, "OK");
		assert_eq!(control_rx.recv().await, Some(Control::Skip));

		drop(control_rx);
		assert_eq!(get(&state, "/skip").await.1, "Stopped");
	}

	#[tokio::test]
	async fn unknown_paths() {
		let (_dir, state, _control_rx) = state();

		let (status, body) = get(&state, "/nope").await;

		assert_eq!(status, StatusCode::NOT_FOUND);
		assert_eq!(body, "Invalid path");
	}
}
