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
use crate::model::stats::{Stats, TRAINING_THRESHOLD};
use crate::reports::table::Table;
use crate::util::money::dollars;

pub struct StatsReporter {
	stats: Stats,
}

impl StatsReporter {
	pub fn new(stats: Stats) -> Self {
		Self { stats }
	}

	fn table(&self) -> Table {
		let s = &self.stats;
		let mut table = Table::new(2);
		table.right_align(vec![1]);

		table.add_row(vec!["Total Items", &s.total_items.to_string()]);
		table.add_row(vec!["Sold Items", &s.sold_items.to_string()]);
		table.add_row(vec!["Listed Items", &s.listed_items.to_string()]);

		if let Some(prices) = s.price_stats.as_ref().filter(|_| s.sold_items > 0) {
			table.add_separator();
			table.add_row(vec!["Total Revenue", &dollars(prices.total_revenue)]);
			table.add_row(vec!["Average Price", &dollars(prices.average)]);
			table.add_row(vec!["Lowest Price", &dollars(prices.min)]);
			table.add_row(vec!["Highest Price", &dollars(prices.max)]);
		}

		table
	}

	fn readiness(&self) -> [String; 2] {
		if self.stats.ready_for_training {
			[
				"Ready for model training!".to_string(),
				"There is enough sales history to train an accurate pricing model."
					.to_string(),
			]
		} else {
			[
				format!(
					"Need more data ({}/{} historical sales)",
					self.stats.sold_items, TRAINING_THRESHOLD
				),
				format!(
					"Record {} more past sales to unlock model-based predictions.",
					self.stats.sales_needed()
				),
			]
		}
	}

	pub fn print(&self) {
		self.table().print();

		if let Some(message) = &self.stats.message {
			println!();
			println!("{}", message);
		}

		println!();
		for line in self.readiness() {
			println!("{}", line);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::stats::PriceStats;

	fn stats(sold: usize, ready: bool) -> Stats {
		Stats {
			total_items: sold + 2,
			sold_items: sold,
			listed_items: 2,
			price_stats: Some(PriceStats {
				min: 40.0,
				max: 100.0,
				average: 66.666,
				total_revenue: 200.0,
			}),
			ready_for_training: ready,
			message: None,
		}
	}

	#[test]
	fn test_render() {
		let expected = [
			"Total Items           5",
			"Sold Items            3",
			"Listed Items          2",
			"-----------------------",
			"Total Revenue   $200.00",
			"Average Price    $66.67",
			"Lowest Price     $40.00",
			"Highest Price   $100.00",
		]
		.join("\n")
			+ "\n";
		assert_eq!(StatsReporter::new(stats(3, false)).table().render(), expected);
	}

	#[test]
	fn test_price_block_hidden_without_sales() {
		let mut s = stats(0, false);
		s.price_stats = None;
		let rendered = StatsReporter::new(s).table().render();
		assert_eq!(rendered.lines().count(), 3);
	}

	#[test]
	fn test_not_ready() {
		let [headline, detail] = StatsReporter::new(stats(3, false)).readiness();
		assert_eq!(headline, "Need more data (3/20 historical sales)");
		assert!(detail.contains("17 more"));
	}

	#[test]
	fn test_ready() {
		let [headline, _] = StatsReporter::new(stats(25, true)).readiness();
		assert_eq!(headline, "Ready for model training!");
	}
}
