//! Headless members host.
//!
//! Loads a roster snapshot, replays an event script through the membership
//! core and prints every dispatched command as one JSON object per line.

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use hitch_members::{MembersConfig, MembersPanel};
use tracing::info;

mod host;
mod script;

use host::{Host, ScriptConfirm, load_roster};

/// Command line arguments.
#[derive(Parser, Debug)]
#[command(name = "hitch-members")]
#[command(about = "Replay member roster events and print the resulting requests")]
struct Args {
	/// Roster snapshot (JSON array of members)
	#[arg(short, long, value_name = "PATH")]
	roster: PathBuf,

	/// Project the roster belongs to
	#[arg(short, long)]
	project: String,

	/// Act as the project owner
	#[arg(long)]
	owner: bool,

	/// Confirm every removal
	#[arg(short, long)]
	yes: bool,

	/// TOML policy file
	#[arg(short, long, value_name = "PATH")]
	config: Option<PathBuf>,

	/// Event script; stdin when omitted
	#[arg(short, long, value_name = "PATH")]
	script: Option<PathBuf>,

	/// Verbose logging
	#[arg(short, long)]
	verbose: bool,
}

fn main() -> Result<()> {
	let args = Args::parse();

	let subscriber = tracing_subscriber::fmt()
		.with_max_level(if args.verbose {
			tracing::Level::DEBUG
		} else {
			tracing::Level::INFO
		})
		.with_writer(io::stderr)
		.finish();
	tracing::subscriber::set_global_default(subscriber)?;

	let config = match &args.config {
		Some(path) => MembersConfig::load(path)?,
		None => MembersConfig::default(),
	};
	let members = load_roster(&args.roster)?;
	info!(project = %args.project, members = members.len(), owner = args.owner, "Loaded roster");

	let panel = MembersPanel::new(args.project.as_str(), args.owner, config).with_roster(members);
	let confirm = ScriptConfirm { assume_yes: args.yes };
	let mut host = Host::new(panel, confirm, io::stdout().lock());

	let summary = match &args.script {
		Some(path) => {
			let file = File::open(path).with_context(|| format!("opening script {}", path.display()))?;
			host.run(BufReader::new(file))?
		}
		None => host.run(io::stdin().lock())?,
	};

	info!(
		events = summary.events,
		skipped = summary.skipped,
		dispatched = summary.dispatched,
		members = host.panel().roster().len(),
		"Script finished"
	);
	host.into_output().flush().context("flushing output")?;
	Ok(())
}
