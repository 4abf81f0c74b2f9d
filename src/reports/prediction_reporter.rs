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
use crate::model::prediction::PredictionResponse;
use crate::reports::table::Table;
use crate::util::money::dollars;

pub struct PredictionReporter {
	prediction: PredictionResponse,
}

impl PredictionReporter {
	pub fn new(prediction: PredictionResponse) -> Self {
		Self { prediction }
	}

	fn table(&self) -> Table {
		let p = &self.prediction;
		let mut table = Table::new(2);
		table.right_align(vec![1]);

		table.add_row(vec!["Predicted Price", &dollars(p.predicted_price)]);
		if let Some((low, high)) = p.confidence_range() {
			table.add_row(vec![
				"Confidence Range",
				&format!("{} - {}", dollars(low), dollars(high)),
			]);
		}
		table.add_separator();
		table.add_row(vec!["Total Cost", &dollars(p.breakdown.total_cost)]);
		table.add_row(vec!["Base Price", &dollars(p.breakdown.base_price)]);
		table.add_row(vec![
			"Quality Adjustment",
			&dollars(p.breakdown.quality_adjustment),
		]);
		table.add_row(vec!["Model Version", &p.model_version]);

		table
	}

	pub fn print(&self) {
		self.table().print();
	}
}
