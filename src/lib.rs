//! Computes a reward-maximizing work schedule from a weekly availability
//! pattern, fixed appointments, and a set of estimated, rewarded tasks.

#![warn(clippy::pedantic)]
#![warn(clippy::dbg_macro)]
#![deny(clippy::deref_by_slicing)]
#![warn(clippy::get_unwrap)]
#![warn(clippy::todo)]
#![warn(clippy::unimplemented)]
#![warn(missing_docs)]
#![warn(clippy::unwrap_used)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(missing_docs)]

pub mod clock;
pub mod output;
pub mod params;
pub mod scheduler;
pub mod slots;

pub use output::ScheduleEntry;
pub use params::ScheduleError;

/// Turn a schedule document into its timeline, both as JSON bytes.
///
/// The one-stop pipeline: bind the document, materialize the free hours,
/// bind each task's window, assign tasks greedily, and fold the result into
/// entries with UTC timestamps.
pub fn compute(input: &[u8]) -> Result<Vec<u8>, ScheduleError> {
	let params = params::bind(input)?;
	let hours = slots::materialize_hours(&params)?;
	let windows: Vec<slots::TaskHourWindow> = params
		.tasks
		.iter()
		.map(|task| slots::hour_window(task, &hours))
		.collect();
	let cells = scheduler::assign(&params.tasks, &windows, hours.len());
	let entries = output::assemble(&params.tasks, &hours, &cells);
	serde_json::to_vec(&entries)
		.map_err(|_| ScheduleError::InternalInvariant("schedule serialization failed"))
}
