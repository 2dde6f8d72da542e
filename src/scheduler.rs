//! Assignment of tasks onto the free hour sequence.

use crate::params::Task;
use crate::slots::TaskHourWindow;
use itertools::Itertools;

/// A claimed hour: the owning task and how far into that task the hour falls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignment {
	/// Index of the owning task in input order.
	pub task: usize,
	/// 0-based position of this hour within the task's estimate.
	pub hour_offset: u32,
}

/// Place every task that fits, shortest estimate first.
///
/// Tasks are processed by estimated length ascending — short tasks are the
/// easiest to tuck in — with ties broken by reward density descending and
/// then input order. A task with a deadline claims the latest free slots its
/// window allows, keeping earlier hours open for everything else; a task
/// without one claims the earliest. A task that cannot collect its full
/// estimate at its turn is skipped and leaves the rest of the schedule
/// untouched.
#[must_use]
pub fn assign(tasks: &[Task], windows: &[TaskHourWindow], slot_count: usize) -> Vec<Option<Assignment>> {
	let mut cells: Vec<Option<Assignment>> = vec![None; slot_count];
	// The sort is stable, so full ties keep their input order.
	let order = (0..tasks.len()).sorted_by(|&a, &b| {
		tasks[a]
			.estimated_hours
			.cmp(&tasks[b].estimated_hours)
			.then_with(|| tasks[b].reward_density().total_cmp(&tasks[a].reward_density()))
	});
	for task in order {
		let wanted = tasks[task].estimated_hours as usize;
		let window = windows[task].usable(slot_count);
		let mut claimed: Vec<usize> = if tasks[task].deadline.is_some() {
			window
				.rev()
				.filter(|&slot| cells[slot].is_none())
				.take(wanted)
				.collect()
		} else {
			window
				.filter(|&slot| cells[slot].is_none())
				.take(wanted)
				.collect()
		};
		if claimed.len() < wanted {
			continue;
		}
		// Hour offsets run chronologically regardless of claim direction.
		claimed.sort_unstable();
		for (hour_offset, slot) in claimed.into_iter().enumerate() {
			cells[slot] = Some(Assignment {
				task,
				hour_offset: hour_offset as u32,
			});
		}
	}
	cells
}
