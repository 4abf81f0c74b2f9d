/* Copyright © 2024-2025 Adam Train <adam@adamtrain.net>
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program. If not, see <https://www.gnu.org/licenses/>.
 */

use anyhow::{anyhow, Error};
use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

const FORMAT: &str = "%Y-%m-%d";

/// A calendar date with no time of day attached. Every date the pricing API
/// exchanges (created, listed, sold) is one of these, always written as
/// `YYYY-MM-DD` on the wire.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Date(NaiveDate);

impl Date {
	/// Constructor to parse a string in the "YYYY-mm-dd" format
	pub fn from_str(date_str: &str) -> Result<Date, Error> {
		NaiveDate::parse_from_str(date_str.trim(), FORMAT)
			.map(Date)
			.map_err(|e| {
				anyhow!("invalid date '{}' ({}); expected YYYY-MM-DD", date_str, e)
			})
	}

	/// Whole days from this date until `other`. Both dates are taken at
	/// midnight, so this is an exact count; negative when `other` is earlier.
	pub fn days_until(&self, other: &Date) -> i64 {
		other.0.signed_duration_since(self.0).num_days()
	}
}

impl fmt::Display for Date {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0.format(FORMAT))
	}
}

impl Serialize for Date {
	fn serialize<S: Serializer>(
		&self,
		serializer: S,
	) -> Result<S::Ok, S::Error> {
		serializer.collect_str(self)
	}
}

impl<'de> Deserialize<'de> for Date {
	fn deserialize<D: Deserializer<'de>>(
		deserializer: D,
	) -> Result<Self, D::Error> {
		let s = String::deserialize(deserializer)?;
		Date::from_str(&s).map_err(D::Error::custom)
	}
}

/// Parses a record timestamp such as `2024-03-01T17:22:05.123456+00:00`.
pub fn parse_timestamp(s: &str) -> Option<DateTime<FixedOffset>> {
	DateTime::parse_from_rfc3339(s.trim()).ok()
}
