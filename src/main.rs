use clap::{Arg, ArgAction, Command};
use std::error::Error;
use std::path::Path;

use sftpsync::{ExcludeSet, LocalTransport, LogCallbacks, SyncStats, Synchronizer};

fn sync_command(name: &'static str, about: &'static str) -> Command {
	Command::new(name)
		.about(about)
		.arg(Arg::new("remote").required(true).help("Remote root (a mounted path)"))
		.arg(Arg::new("local").required(true).help("Local root directory"))
		.arg(
			Arg::new("delete")
				.long("delete")
				.action(ArgAction::SetTrue)
				.help("Remove destination entries that are absent on the source"),
		)
		.arg(
			Arg::new("exclude")
				.long("exclude")
				.value_name("GLOB")
				.action(ArgAction::Append)
				.help("Exclude entries matching this glob (repeatable)"),
		)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
	sftpsync::logging::init_tracing();

	let matches = Command::new("sftpsync")
		.version(env!("CARGO_PKG_VERSION"))
		.about("One-way directory sync utility")
		.subcommand_required(true)
		.subcommand(sync_command("push", "Sync the local tree to the remote side"))
		.subcommand(sync_command("pull", "Sync the remote tree to the local side"))
		.get_matches();

	let (name, matches) = match matches.subcommand() {
		Some((name, matches)) => (name, matches),
		None => return Err("subcommand required".into()),
	};

	let remote_root =
		matches.get_one::<String>("remote").ok_or("remote argument required")?;
	let local_root = matches.get_one::<String>("local").ok_or("local argument required")?;
	let delete = matches.get_flag("delete");
	let excludes: Vec<String> = matches
		.get_many::<String>("exclude")
		.map(|patterns| patterns.cloned().collect())
		.unwrap_or_default();

	let transport = LocalTransport::new(remote_root.as_str());
	let mut sync = Synchronizer::new(transport)?
		.exclude(ExcludeSet::new(&excludes)?)
		.callbacks(Box::new(LogCallbacks));

	let result: Result<SyncStats, _> = match name {
		"push" => sync.push("/", Path::new(local_root), delete).await,
		"pull" => sync.pull("/", Path::new(local_root), delete).await,
		other => return Err(format!("unknown subcommand: {}", other).into()),
	};

	// Release the connection whether the pass succeeded or not
	let closed = sync.close().await;
	result?;
	closed?;

	Ok(())
}

// vim: ts=4
