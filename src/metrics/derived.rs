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
use crate::util::date::Date;

/// The raw fields of a sale that derived figures are computed from. Both the
/// form preview and the history display build one of these, so both agree
/// on what a record's cost, profit and time on the market are.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SaleRecord {
	pub material_cost: f64,
	pub labor_cost: f64,
	pub overhead_cost: f64,

	/// Absent only while a draft is still being filled in
	pub date_listed: Option<Date>,
	/// Absent while the item is unsold
	pub date_sold: Option<Date>,

	/// Absent (or zero) while the item is unsold
	pub actual_price: Option<f64>,
}

/// Figures computed from a [`SaleRecord`]. Never stored on their own; they
/// are recomputed from the current snapshot every time they are shown.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DerivedMetrics {
	pub total_cost: f64,

	/// Only present when the record carries a non-zero sale price
	pub profit: Option<f64>,
	/// As a percentage of total cost; present exactly when profit is
	pub profit_margin: Option<f64>,

	/// May be negative if the sale predates the listing
	pub days_to_sell: Option<i64>,
}

impl SaleRecord {
	pub fn metrics(&self) -> DerivedMetrics {
		compute_metrics(self)
	}

	/// The sale price, if the record has one worth reporting against.
	fn sale_price(&self) -> Option<f64> {
		self.actual_price.filter(|p| *p != 0.0)
	}
}

/// Sum of the three cost components. Inputs are not validated; a negative
/// cost passes straight through.
pub fn total_cost(record: &SaleRecord) -> f64 {
	record.material_cost + record.labor_cost + record.overhead_cost
}

/// Whole days between listing and sale, or `None` unless both are known.
pub fn days_to_sell(
	date_listed: Option<&Date>,
	date_sold: Option<&Date>,
) -> Option<i64> {
	match (date_listed, date_sold) {
		(Some(listed), Some(sold)) => Some(listed.days_until(sold)),
		_ => None,
	}
}

/// Sale price less total cost. An absent price counts as zero, so check
/// [`SaleRecord::actual_price`] before showing this to anyone.
pub fn profit(record: &SaleRecord) -> f64 {
	record.actual_price.unwrap_or(0.0) - total_cost(record)
}

/// Profit as a percentage of total cost. Zero total cost yields a margin of
/// zero rather than an infinity.
pub fn profit_margin(record: &SaleRecord) -> f64 {
	let total = total_cost(record);
	if total == 0.0 {
		0.0
	} else {
		profit(record) / total * 100.0
	}
}

pub fn compute_metrics(record: &SaleRecord) -> DerivedMetrics {
	let has_sale = record.sale_price().is_some();

	DerivedMetrics {
		total_cost: total_cost(record),
		profit: has_sale.then(|| profit(record)),
		profit_margin: has_sale.then(|| profit_margin(record)),
		days_to_sell: days_to_sell(
			record.date_listed.as_ref(),
			record.date_sold.as_ref(),
		),
	}
}
