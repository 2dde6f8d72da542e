//! Clock times of day and the weekly availability blocks they describe.

use crate::params::ScheduleError;
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone};
use chrono_tz::Tz;
use std::str::FromStr;

/// A time of day with minute precision, as written in the weekly pattern ("9:00", "11:30").
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ClockTime {
	pub hour: u32,
	pub minute: u32,
}

impl FromStr for ClockTime {
	type Err = ScheduleError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let bad = || ScheduleError::InvalidClockTime(s.to_string());
		let Some((hour, minute)) = s.split_once(':') else {
			return Err(bad());
		};
		let hour: u32 = hour.parse().map_err(|_| bad())?;
		let minute: u32 = minute.parse().map_err(|_| bad())?;
		if hour >= 24 || minute >= 60 {
			return Err(bad());
		}
		Ok(Self { hour, minute })
	}
}

impl ClockTime {
	/// Resolve this time of day on a calendar date to a wall-clock instant in `zone`.
	///
	/// Local times removed by a DST gap resolve to `None`; ambiguous times on a
	/// fall-back day resolve to the earlier instant.
	#[must_use]
	pub fn on_date(self, date: NaiveDate, zone: Tz) -> Option<DateTime<Tz>> {
		let time = NaiveTime::from_hms_opt(self.hour, self.minute, 0)?;
		zone.from_local_datetime(&date.and_time(time)).earliest()
	}
}

/// One availability window within a weekly pattern day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockBlock {
	pub start: ClockTime,
	pub end: ClockTime,
}
