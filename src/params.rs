//! Validates and binds the schedule document into the internal model.

use crate::clock::ClockBlock;
use chrono::{DateTime, FixedOffset};
use chrono_tz::Tz;
use serde::Deserialize;
use std::ops::Range;
use thiserror::Error;

/// Everything that can go wrong between raw bytes and a finished schedule.
#[derive(Error, Debug)]
pub enum ScheduleError {
	/// The document is unreadable or the wrong shape.
	#[error("malformed schedule document: {0}")]
	Schema(String),
	/// The time zone name does not resolve to an IANA zone.
	#[error("unknown time zone: {0}")]
	InvalidZone(#[from] chrono_tz::ParseError),
	/// An "HH:MM" time could not be parsed or is out of range.
	#[error("bad clock time {0:?}")]
	InvalidClockTime(String),
	/// A clock block, appointment or the horizon ends at or before its start.
	#[error("{0} must end after it starts")]
	InvalidInterval(&'static str),
	/// A post-binding invariant failed to hold.
	#[error("internal invariant violated: {0}")]
	InternalInvariant(&'static str),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDocument {
	time_zone: String,
	weekly_task_blocks: Vec<Vec<RawBlock>>,
	#[serde(default)]
	appointments: Vec<RawAppointment>,
	#[serde(default)]
	tasks: Vec<RawTask>,
	start_task_schedule: DateTime<FixedOffset>,
	end_task_schedule: DateTime<FixedOffset>,
}

#[derive(Deserialize)]
struct RawBlock {
	start: String,
	end: String,
}

#[derive(Deserialize)]
struct RawAppointment {
	title: String,
	start: DateTime<FixedOffset>,
	end: DateTime<FixedOffset>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTask {
	title: String,
	estimated_hours: u32,
	reward: f64,
	deadline: Option<DateTime<FixedOffset>>,
	start_on_or_after: Option<DateTime<FixedOffset>>,
}

/// A titled interval that consumes availability.
#[derive(Debug, Clone, PartialEq)]
pub struct Appointment {
	pub title: String,
	pub start: DateTime<Tz>,
	pub end: DateTime<Tz>,
}

/// A unit of schedulable work.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
	pub title: String,
	/// Whole hours of work this task needs, at least one.
	pub estimated_hours: u32,
	pub reward: f64,
	/// Work on the task must end by this instant.
	pub deadline: Option<DateTime<Tz>>,
	/// Work on the task may not begin before this instant.
	pub start_on_or_after: Option<DateTime<Tz>>,
}

impl Task {
	/// Reward earned per estimated hour; ranks tasks of equal length.
	#[must_use]
	pub fn reward_density(&self) -> f64 {
		self.reward / f64::from(self.estimated_hours)
	}
}

/// The bound, zone-normalized inputs. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Params {
	pub zone: Tz,
	/// Weekly availability, indexed by day of week with 0 = Sunday.
	pub weekly_blocks: [Vec<ClockBlock>; 7],
	pub appointments: Vec<Appointment>,
	/// Tasks in document order; later tie-breaks rely on this order.
	pub tasks: Vec<Task>,
	pub horizon: Range<DateTime<Tz>>,
}

/// Validate a schedule document and bind it into [`Params`].
pub fn bind(input: &[u8]) -> Result<Params, ScheduleError> {
	let raw: RawDocument =
		serde_json::from_slice(input).map_err(|e| ScheduleError::Schema(e.to_string()))?;
	let zone: Tz = raw.time_zone.parse()?;

	if raw.weekly_task_blocks.len() != 7 {
		return Err(ScheduleError::Schema(format!(
			"weeklyTaskBlocks has {} entries, expected 7",
			raw.weekly_task_blocks.len()
		)));
	}
	let mut weekly_blocks: [Vec<ClockBlock>; 7] = Default::default();
	for (day, raw_blocks) in raw.weekly_task_blocks.into_iter().enumerate() {
		let blocks = &mut weekly_blocks[day];
		for raw_block in raw_blocks {
			let block = ClockBlock {
				start: raw_block.start.parse()?,
				end: raw_block.end.parse()?,
			};
			if block.end <= block.start {
				return Err(ScheduleError::InvalidInterval("clock block"));
			}
			if let Some(previous) = blocks.last() {
				if block.start < previous.end {
					return Err(ScheduleError::Schema(format!(
						"weekly blocks for day {day} overlap or are out of order"
					)));
				}
			}
			blocks.push(block);
		}
	}

	let appointments = raw
		.appointments
		.into_iter()
		.map(|a| {
			let appointment = Appointment {
				title: a.title,
				start: a.start.with_timezone(&zone),
				end: a.end.with_timezone(&zone),
			};
			if appointment.end <= appointment.start {
				return Err(ScheduleError::InvalidInterval("appointment"));
			}
			Ok(appointment)
		})
		.collect::<Result<Vec<_>, _>>()?;

	let tasks = raw
		.tasks
		.into_iter()
		.map(|t| {
			if t.estimated_hours == 0 {
				return Err(ScheduleError::Schema(format!(
					"task {:?} must estimate at least one hour",
					t.title
				)));
			}
			if t.reward < 0.0 {
				return Err(ScheduleError::Schema(format!(
					"task {:?} has a negative reward",
					t.title
				)));
			}
			Ok(Task {
				title: t.title,
				estimated_hours: t.estimated_hours,
				reward: t.reward,
				deadline: t.deadline.map(|d| d.with_timezone(&zone)),
				start_on_or_after: t.start_on_or_after.map(|d| d.with_timezone(&zone)),
			})
		})
		.collect::<Result<Vec<_>, _>>()?;

	let horizon = raw.start_task_schedule.with_timezone(&zone)
		..raw.end_task_schedule.with_timezone(&zone);
	if horizon.end <= horizon.start {
		return Err(ScheduleError::InvalidInterval("task schedule horizon"));
	}

	Ok(Params {
		zone,
		weekly_blocks,
		appointments,
		tasks,
		horizon,
	})
}
