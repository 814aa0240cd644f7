//! Drives a [`MembersPanel`] from a script and writes what it dispatches.

use std::fs;
use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};
use hitch_members::{
	Confirm, ConfirmAction, Level, Member, MemberCommand, MembersPanel, RemoveOutcome, SubmitOutcome,
};
use tracing::{debug, error, info, warn};

use crate::script::{Event, parse_line};

/// Reads a roster snapshot (a JSON array of members).
pub fn load_roster(path: &Path) -> Result<Vec<Member>> {
	let raw = fs::read_to_string(path).with_context(|| format!("reading roster {}", path.display()))?;
	serde_json::from_str(&raw).with_context(|| format!("parsing roster {}", path.display()))
}

/// Answers confirmation prompts without a terminal.
#[derive(Debug, Clone, Copy)]
pub struct ScriptConfirm {
	pub assume_yes: bool,
}

impl Confirm for ScriptConfirm {
	fn confirm(&mut self, action: ConfirmAction, subject: &str) -> bool {
		if self.assume_yes {
			info!(%action, subject, "Confirmed");
		} else {
			warn!(%action, subject, "Declined; pass --yes to confirm");
		}
		self.assume_yes
	}
}

/// Totals for one script run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
	pub events: usize,
	pub skipped: usize,
	pub dispatched: usize,
}

pub struct Host<W> {
	panel: MembersPanel,
	confirm: ScriptConfirm,
	out: W,
}

impl<W: Write> Host<W> {
	pub fn new(panel: MembersPanel, confirm: ScriptConfirm, out: W) -> Self {
		Self { panel, confirm, out }
	}

	pub fn panel(&self) -> &MembersPanel {
		&self.panel
	}

	pub fn into_output(self) -> W {
		self.out
	}

	/// Replays every line of `script`. Bad lines are reported and skipped.
	pub fn run(&mut self, script: impl BufRead) -> Result<Summary> {
		let mut summary = Summary::default();
		for (index, line) in script.lines().enumerate() {
			let line_no = index + 1;
			let line = line.with_context(|| format!("reading script line {line_no}"))?;
			let event = match parse_line(&line) {
				Ok(Some(event)) => event,
				Ok(None) => continue,
				Err(err) => {
					error!(line = line_no, %err, "Skipping script line");
					summary.skipped += 1;
					continue;
				}
			};
			summary.events += 1;
			if let Err(err) = self.apply(event) {
				let err = format!("{err:#}");
				error!(line = line_no, error = %err, "Event failed");
				summary.skipped += 1;
			}
			summary.dispatched += self.flush()?;
		}
		Ok(summary)
	}

	/// Applies one event to the panel.
	pub fn apply(&mut self, event: Event) -> Result<()> {
		debug!(?event, "Apply");
		match event {
			Event::OpenInvite => {
				self.panel.open_invite();
			}
			Event::Pending(entries) => {
				if !self.panel.update_invite_pending(entries) {
					warn!("Invite dialog is not open");
				}
			}
			Event::Submit(trailing) => match self.panel.submit_invite(trailing.as_deref()) {
				SubmitOutcome::Invite(cmd) => info!(count = cmd.emails.len(), "Invite submitted"),
				SubmitOutcome::Rejected(_) => {}
				SubmitOutcome::NotOpen => warn!("Invite dialog is not open"),
			},
			Event::CancelInvite => self.panel.cancel_invite(),
			Event::Edit(id) => {
				if !self.panel.begin_mapping_edit(&id) {
					warn!(member = %id, "No such member");
				}
			}
			Event::Type(id, value) => {
				if !self.panel.update_mapping(&id, value) {
					warn!(member = %id, "Member is not being edited");
				}
			}
			Event::Commit(id) => match self.panel.commit_mapping(&id) {
				Some(resolution) if resolution.is_noop() => info!(member = %id, ?resolution, "Nothing to change"),
				Some(_) => {}
				None => warn!(member = %id, "Member is not being edited"),
			},
			Event::Discard(id) => {
				self.panel.cancel_mapping_edit(&id);
			}
			Event::Remove(id) => match self.panel.remove_member(&id, &mut self.confirm) {
				RemoveOutcome::Requested(_) | RemoveOutcome::Declined => {}
				RemoveOutcome::NotRemovable => warn!(member = %id, "Member cannot be removed"),
				RemoveOutcome::NotFound => warn!(member = %id, "No such member"),
			},
			Event::Roster(path) => {
				let members = load_roster(&path)?;
				self.panel.set_roster(members);
			}
		}
		Ok(())
	}

	/// Writes queued commands as JSON lines and logs notifications.
	fn flush(&mut self) -> Result<usize> {
		for note in self.panel.take_notifications() {
			match note.level {
				Level::Error => error!(message = %note.message, "Notification"),
				Level::Warn => warn!(message = %note.message, "Notification"),
				Level::Info => info!(message = %note.message, "Notification"),
			}
		}

		let mut commands = Vec::new();
		let flushed = self.panel.flush(&mut |cmd: MemberCommand| commands.push(cmd));
		if flushed.focus_invite_input {
			debug!("Focus invite input");
		}
		for cmd in &commands {
			serde_json::to_writer(&mut self.out, cmd).context("encoding command")?;
			writeln!(self.out).context("writing command")?;
		}
		Ok(flushed.dispatched)
	}
}
