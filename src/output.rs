//! Folds slot assignments into the emitted timeline.

use crate::params::Task;
use crate::scheduler::Assignment;
use chrono::{DateTime, TimeDelta, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// A maximal contiguous run of one task's hours, as emitted to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
	pub title: String,
	pub start: DateTime<Utc>,
	pub end: DateTime<Utc>,
	/// True when this run carries the task's final estimated hour.
	pub finish: bool,
}

/// Fold the per-slot assignments into chronological entries.
///
/// A run breaks where the owner changes or the hours stop being wall-clock
/// contiguous, i.e. an appointment or a block boundary intervenes.
#[must_use]
pub fn assemble(
	tasks: &[Task],
	hours: &[DateTime<Tz>],
	cells: &[Option<Assignment>],
) -> Vec<ScheduleEntry> {
	let hour = TimeDelta::hours(1);
	let mut runs: Vec<(usize, usize, usize)> = Vec::new(); // (task, first slot, last slot)
	for (slot, cell) in cells.iter().enumerate() {
		let Some(assignment) = cell else { continue };
		let continues = runs.last().is_some_and(|&(task, _, last)| {
			task == assignment.task && last + 1 == slot && hours[last] + hour == hours[slot]
		});
		if continues {
			if let Some(run) = runs.last_mut() {
				run.2 = slot;
			}
		} else {
			runs.push((assignment.task, slot, slot));
		}
	}

	runs.into_iter()
		.map(|(task, first, last)| {
			let owner = &tasks[task];
			let finish =
				cells[last].map_or(false, |a| a.hour_offset + 1 == owner.estimated_hours);
			ScheduleEntry {
				title: owner.title.clone(),
				start: hours[first].with_timezone(&Utc),
				end: (hours[last] + hour).with_timezone(&Utc),
				finish,
			}
		})
		.collect()
}
