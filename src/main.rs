use std::sync::Arc;

use clap::Parser;
use playlists::{
	config::{Cli, Command, PlayArgs},
	output::{http, m3u},
	runner::{self, Runner},
	watch::Watcher,
	Player, Playlist,
};
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

	let cli = Cli::parse();
	let playlist = Playlist::open(&cli.dir)?;

	match cli.command {
		Command::List => {
			for element in &playlist {
				let kind = element.kind.map_or_else(|| "?".to_owned(), |k| k.to_string());

				println!("{kind}\t{}\t{element}", element.duration_label());
			}
		}
		Command::M3u => print!("{}", m3u::generate(&playlist)),
		Command::Play(args) => play(playlist, args).await?,
	}

	Ok(())
}

async fn play(playlist: Playlist, args: PlayArgs) -> playlists::Result<()> {
	let dir = playlist.dir().map(|dir| dir.to_path_buf());
	let player = Player::new(playlist).into_shared();
	let (control_sx, control_rx) = runner::control();

	let mut services = Vec::new();

	if let Some(addr) = args.http {
		let (sx, rx) = mpsc::channel(8);
		let server = http::Server::new(addr, Arc::clone(&player), control_sx.clone(), rx);
		tokio::spawn(async move {
			if let Err(e) = server.run_loop().await {
				log::error!("Error running http: {}", e);
			}
		});
		services.push(sx);
	}

	match dir {
		Some(dir) if !args.no_watch => {
			let watcher = Watcher::new(&dir, args.debounce())?;
			tokio::spawn(watcher.run_loop(Arc::clone(&player), control_sx.clone()));
		}
		_ => log::info!("not watching the playlist folder"),
	}

	Runner {
		services,
		player,
		control: control_rx,
	}
	.run_loop()
	.await;

	Ok(())
}
