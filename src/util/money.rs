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

//! Display helpers for the two kinds of figures every report prints:
//! currency amounts (always two decimals) and percentages (one decimal).

/// Renders an amount as dollars, e.g. `$17.00` or `-$4.50`. Values that
/// round to zero never carry a sign.
pub fn dollars(value: f64) -> String {
	let magnitude = format!("{:.2}", value.abs());
	if value < 0.0 && magnitude != "0.00" {
		format!("-${}", magnitude)
	} else {
		format!("${}", magnitude)
	}
}

/// Renders a percentage with one decimal place, e.g. `194.1%`.
pub fn percent(value: f64) -> String {
	let magnitude = format!("{:.1}", value.abs());
	if value < 0.0 && magnitude != "0.0" {
		format!("-{}%", magnitude)
	} else {
		format!("{}%", magnitude)
	}
}

/// Whether two figures agree once both are rounded to `places` decimals.
/// The API rounds what it echoes back, so an exact comparison against a
/// locally computed value would be meaningless.
pub fn agrees(local: f64, remote: f64, places: i32) -> bool {
	(local - remote).abs() <= 0.5 * 10f64.powi(-places) + 1e-9
}
