/* Copyright © 2024-2025 Adam Train <adam@trainrelay.net>
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
use anyhow::{bail, Error};

pub const NAME_MAX_CHARS: usize = 255;
pub const RATING_MIN: u8 = 1;
pub const RATING_MAX: u8 = 10;
pub const PASSWORD_MIN_CHARS: usize = 6;

// These mirror the constraints the pricing API enforces on its request
// bodies, so a bad form is rejected before anything is sent.

pub fn check_name(name: &str) -> Result<(), Error> {
	let len = name.chars().count();
	if len == 0 {
		bail!("name must not be empty");
	} else if len > NAME_MAX_CHARS {
		bail!("name must be at most {} characters", NAME_MAX_CHARS);
	}
	Ok(())
}

pub fn check_non_negative(field: &str, value: f64) -> Result<(), Error> {
	// also rejects NaN
	if !(value >= 0.0) {
		bail!("{} must be zero or more (got {})", field, value);
	}
	Ok(())
}

pub fn check_between(
	field: &str,
	value: f64,
	min: f64,
	max: f64,
) -> Result<(), Error> {
	if !(min..=max).contains(&value) {
		bail!("{} must be between {} and {} (got {})", field, min, max, value);
	}
	Ok(())
}

pub fn check_rating(field: &str, value: u8) -> Result<(), Error> {
	if !(RATING_MIN..=RATING_MAX).contains(&value) {
		bail!(
			"{} must be rated {}-{} (got {})",
			field,
			RATING_MIN,
			RATING_MAX,
			value
		);
	}
	Ok(())
}

/// The identity provider refuses passwords shorter than this, so there is
/// no point sending one.
pub fn check_password(password: &str) -> Result<(), Error> {
	if password.is_empty() {
		bail!("No password given");
	} else if password.chars().count() < PASSWORD_MIN_CHARS {
		bail!("password must be at least {} characters", PASSWORD_MIN_CHARS);
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_name() {
		assert!(check_name("Blue Glazed Vase").is_ok());
		assert!(check_name(" ").is_ok());
		assert!(check_name("").is_err());
		assert!(check_name(&"x".repeat(255)).is_ok());
		assert!(check_name(&"x".repeat(256)).is_err());
	}

	#[test]
	fn test_name_counts_characters_not_bytes() {
		assert!(check_name(&"é".repeat(255)).is_ok());
	}

	#[test]
	fn test_non_negative() {
		assert!(check_non_negative("labor_cost", 0.0).is_ok());
		assert!(check_non_negative("labor_cost", 12.5).is_ok());
		assert!(check_non_negative("labor_cost", f64::NAN).is_err());

		let err = check_non_negative("labor_cost", -0.01).unwrap_err();
		assert!(err.to_string().contains("labor_cost"));
	}

	#[test]
	fn test_between() {
		assert!(check_between("markup", 0.0, 0.0, 2.0).is_ok());
		assert!(check_between("markup", 2.0, 0.0, 2.0).is_ok());
		assert!(check_between("markup", 2.05, 0.0, 2.0).is_err());
		assert!(check_between("alpha", f64::NAN, 0.0, 1.0).is_err());
	}

	#[test]
	fn test_rating() {
		assert!(check_rating("beauty", 1).is_ok());
		assert!(check_rating("beauty", 10).is_ok());
		assert!(check_rating("beauty", 0).is_err());
		assert!(check_rating("beauty", 11).is_err());
	}

	#[test]
	fn test_password() {
		assert!(check_password("hunter2").is_ok());
		assert!(check_password("sixsix").is_ok());
		assert!(check_password("five5").is_err());

		let err = check_password("").unwrap_err();
		assert_eq!(err.to_string(), "No password given");
	}
}
