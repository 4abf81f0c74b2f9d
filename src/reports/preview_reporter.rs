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
use crate::metrics::derived::DerivedMetrics;
use crate::model::sale::SaleDraft;
use crate::reports::table::Table;
use crate::util::money::{dollars, percent};

/// Shows what a sale will come to before it is recorded: the figures that
/// can already be derived from whatever the draft holds.
pub struct PreviewReporter {
	name: String,
	metrics: DerivedMetrics,
}

impl PreviewReporter {
	pub fn new(draft: &SaleDraft) -> Self {
		Self {
			name: draft.name.clone(),
			metrics: draft.metrics(),
		}
	}

	fn table(&self) -> Table {
		let mut table = Table::new(2);

		let name = if self.name.is_empty() {
			"(unnamed)"
		} else {
			self.name.as_str()
		};
		table.add_row(vec!["Item", name]);
		table.add_row(vec!["Total Cost", &dollars(self.metrics.total_cost)]);

		if let Some(profit) = self.metrics.profit {
			table.add_row(vec!["Profit", &dollars(profit)]);
		}
		if let Some(margin) = self.metrics.profit_margin {
			table.add_row(vec!["Profit Margin", &percent(margin)]);
		}
		// hidden while the sold date precedes the listing
		if let Some(days) = self.metrics.days_to_sell.filter(|d| *d >= 0) {
			table.add_row(vec!["Days to Sell", &days.to_string()]);
		}

		table
	}

	pub fn print(&self) {
		self.table().print();
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_complete_sale() {
		let draft: SaleDraft = toml::from_str(
			r#"
name = "Blue Glazed Vase"
date_listed = "2024-01-01"
date_sold = "2024-01-15"
material_cost = 10.0
labor_cost = 5.0
overhead_cost = 2.0
actual_price = 50.0
"#,
		)
		.unwrap();

		let expected = [
			"Item            Blue Glazed Vase",
			"Total Cost      $17.00",
			"Profit          $33.00",
			"Profit Margin   194.1%",
			"Days to Sell    14",
		]
		.join("\n")
			+ "\n";
		assert_eq!(PreviewReporter::new(&draft).table().render(), expected);
	}

	#[test]
	fn test_unsold_draft() {
		let draft: SaleDraft = toml::from_str("material_cost = 3.25").unwrap();

		let expected = "Item         (unnamed)\nTotal Cost   $3.25\n";
		assert_eq!(PreviewReporter::new(&draft).table().render(), expected);
	}

	#[test]
	fn test_sold_before_listed() {
		let draft: SaleDraft = toml::from_str(
			r#"
name = "Reversed Dates"
date_listed = "2024-01-15"
date_sold = "2024-01-01"
material_cost = 1.0
labor_cost = 2.0
actual_price = 2.0
"#,
		)
		.unwrap();
		assert_eq!(draft.metrics().days_to_sell, Some(-14));

		let expected = [
			"Item            Reversed Dates",
			"Total Cost      $3.00",
			"Profit          -$1.00",
			"Profit Margin   -33.3%",
		]
		.join("\n")
			+ "\n";
		assert_eq!(PreviewReporter::new(&draft).table().render(), expected);
	}

	#[test]
	fn test_sold_same_day() {
		let draft: SaleDraft = toml::from_str(
			"date_listed = \"2024-03-02\"\ndate_sold = \"2024-03-02\"",
		)
		.unwrap();
		let rendered = PreviewReporter::new(&draft).table().render();
		assert!(rendered.ends_with("Days to Sell   0\n"));
	}
}
