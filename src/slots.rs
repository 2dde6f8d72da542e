//! Materializes the weekly pattern into concrete free work hours and binds
//! each task's deadline and earliest start to indices in that sequence.

use crate::params::{Appointment, Params, ScheduleError, Task};
use chrono::{DateTime, Datelike, TimeDelta};
use chrono_tz::Tz;
use itertools::Itertools;
use std::ops::Range;

/// Enumerate the start times of every free work hour inside the horizon.
///
/// Hours are emitted chronologically. Within each availability block the hour
/// grid is anchored to the block's (horizon-clipped) start, so a block opening
/// at 11:30 yields 11:30, 12:30, 13:30 hours. An hour is kept only when it
/// fits entirely inside the block with every overlapping appointment removed.
pub fn materialize_hours(params: &Params) -> Result<Vec<DateTime<Tz>>, ScheduleError> {
	let hour = TimeDelta::hours(1);
	let mut appointments: Vec<&Appointment> = params.appointments.iter().collect();
	appointments.sort_by_key(|a| a.start);

	let mut hours = Vec::new();
	let first_day = params.horizon.start.date_naive();
	// The horizon is half-open, so its last day is the one holding end - 1ns.
	let last_day = (params.horizon.end - TimeDelta::nanoseconds(1)).date_naive();
	for date in first_day.iter_days().take_while(|d| *d <= last_day) {
		let weekday = date.weekday().num_days_from_sunday() as usize;
		for block in &params.weekly_blocks[weekday] {
			let (Some(start), Some(end)) = (
				block.start.on_date(date, params.zone),
				block.end.on_date(date, params.zone),
			) else {
				// A DST gap swallowed an endpoint; the block has no hours today.
				continue;
			};
			let start = start.max(params.horizon.start);
			let end = end.min(params.horizon.end);
			if start >= end {
				continue;
			}
			let free = subtract_appointments(start..end, &appointments);
			for k in 0.. {
				let hour_start = start + hour * k;
				let hour_end = hour_start + hour;
				if hour_end > end {
					break;
				}
				if free
					.iter()
					.any(|window| window.start <= hour_start && hour_end <= window.end)
				{
					hours.push(hour_start);
				}
			}
		}
	}

	if !hours.iter().tuple_windows().all(|(a, b)| a < b) {
		return Err(ScheduleError::InternalInvariant(
			"free hours are not strictly ascending",
		));
	}
	Ok(hours)
}

/// Remove every appointment from an availability window, leaving the free
/// sub-intervals in order. `appointments` must be sorted by start.
fn subtract_appointments(
	window: Range<DateTime<Tz>>,
	appointments: &[&Appointment],
) -> Vec<Range<DateTime<Tz>>> {
	let mut free = Vec::new();
	let mut cursor = window.start;
	for appointment in appointments {
		if appointment.end <= cursor {
			continue;
		}
		if appointment.start >= window.end {
			break;
		}
		if appointment.start > cursor {
			free.push(cursor..appointment.start);
		}
		cursor = cursor.max(appointment.end);
		if cursor >= window.end {
			return free;
		}
	}
	free.push(cursor..window.end);
	free
}

/// Slot indices bounding where a task may be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskHourWindow {
	/// First usable slot index; the slot count when the earliest start is past every slot.
	pub start_on_or_after_hour_index: usize,
	/// Index of the last slot ending by the deadline; -1 when the task is
	/// already past due, the slot count when no deadline bounds it.
	pub deadline_hour_index: isize,
}

impl TaskHourWindow {
	/// The usable slot index range, empty when the task cannot be placed at all.
	#[must_use]
	pub fn usable(&self, slot_count: usize) -> Range<usize> {
		let first = self.start_on_or_after_hour_index;
		let last = self.deadline_hour_index.min(slot_count as isize - 1);
		if last < 0 || first as isize > last {
			return first..first;
		}
		first..(last as usize + 1)
	}
}

/// Bind a task's deadline and earliest start to slot indices by binary search.
#[must_use]
pub fn hour_window(task: &Task, hours: &[DateTime<Tz>]) -> TaskHourWindow {
	let hour = TimeDelta::hours(1);
	let start_on_or_after_hour_index = match task.start_on_or_after {
		Some(earliest) => hours.partition_point(|h| *h < earliest),
		None => 0,
	};
	let deadline_hour_index = match task.deadline {
		Some(deadline) => hours.partition_point(|h| *h + hour <= deadline) as isize - 1,
		None => hours.len() as isize,
	};
	TaskHourWindow {
		start_on_or_after_hour_index,
		deadline_hour_index,
	}
}
