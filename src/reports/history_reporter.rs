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
use crate::history::listing::{Filter, Listing, SortKey};
use crate::model::item::CeramicItem;
use crate::reports::table::Table;
use crate::util::money::{dollars, percent};

/// Struct for displaying a user's pieces, narrowed and ordered as asked.
///
/// Profit, margin and days to sell are shown exactly as the API stored them;
/// only total cost is worked out here.
pub struct HistoryReporter {
	items: Vec<CeramicItem>,
	filter: Filter,

	all: usize,
	sold: usize,
	listed: usize,
}

impl HistoryReporter {
	pub fn new(listing: Listing, filter: Filter, sort: SortKey) -> Self {
		let (all, sold, listed) = (
			listing.count(Filter::All),
			listing.count(Filter::Sold),
			listing.count(Filter::Listed),
		);

		Self {
			items: listing.take(filter, sort),
			filter,
			all,
			sold,
			listed,
		}
	}

	fn counts_line(&self) -> String {
		format!(
			"All ({})   Sold ({})   Listed ({})",
			self.all, self.sold, self.listed
		)
	}

	fn empty_hint(&self) -> &'static str {
		match self.filter {
			Filter::All => {
				"Start by recording a past sale or pricing a new piece."
			},
			Filter::Sold => "No sold items yet.",
			Filter::Listed => "No listed items yet.",
		}
	}

	fn table(&self) -> Table {
		let mut table = Table::new(11);
		table.right_align(vec![5, 7, 8, 9, 10]);

		table.add_header(vec![
			"Name", "Status", "Created", "Listed", "Sold", "Days", "Q/O/B/D",
			"Price", "Profit", "Margin", "Cost",
		]);
		table.add_separator();

		for item in &self.items {
			let (price, profit, margin) = match item.sale_price() {
				Some(price) => (
					dollars(price),
					item.profit.map(dollars).unwrap_or_default(),
					item.profit_margin.map(percent).unwrap_or_default(),
				),
				None => (
					item.prediction()
						.map(|p| format!("{}*", dollars(p)))
						.unwrap_or_default(),
					String::new(),
					String::new(),
				),
			};

			table.add_row(vec![
				&item.name,
				&item.status.to_string().to_uppercase(),
				&item.date_created.to_string(),
				&item.date_listed.to_string(),
				&item.date_sold.map(|d| d.to_string()).unwrap_or_default(),
				&item
					.days_to_sell
					.map(|d| d.to_string())
					.unwrap_or_default(),
				&format!(
					"{}/{}/{}/{}",
					item.glazing_quality,
					item.originality,
					item.beauty,
					item.demand
				),
				&price,
				&profit,
				&margin,
				&dollars(item.total_cost()),
			]);
		}

		table
	}

	fn has_predictions(&self) -> bool {
		self.items
			.iter()
			.any(|i| i.sale_price().is_none() && i.prediction().is_some())
	}

	pub fn print(&self) {
		println!("{}", self.counts_line());

		if self.items.is_empty() {
			println!();
			println!("No items found");
			println!("{}", self.empty_hint());
			return;
		}

		self.table().print();

		if self.has_predictions() {
			println!();
			println!("* predicted price; awaiting sale");
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::item::fixtures::{listed, sold};

	fn reporter(filter: Filter) -> HistoryReporter {
		let listing = Listing::new(vec![
			listed("Bowl", 40.0, "2024-01-03T09:00:00+00:00"),
			sold("Vase", 70.0, "2024-01-01T09:00:00+00:00"),
		]);
		HistoryReporter::new(listing, filter, SortKey::Price)
	}

	#[test]
	fn test_counts_ignore_filter() {
		let r = reporter(Filter::Sold);
		assert_eq!(r.counts_line(), "All (2)   Sold (1)   Listed (1)");
		assert_eq!(r.items.len(), 1);
	}

	#[test]
	fn test_rows() {
		let rendered = reporter(Filter::All).table().render();
		let lines: Vec<&str> = rendered.lines().collect();
		assert_eq!(lines.len(), 4);

		// highest price first
		assert!(lines[2].starts_with("Vase"));
		assert!(lines[2].contains("SOLD"));
		assert!(lines[2].contains("$70.00"));
		assert!(lines[2].contains("$35.00"));
		assert!(lines[2].contains("100.0%"));
		assert!(lines[2].contains("14"));

		assert!(lines[3].starts_with("Bowl"));
		assert!(lines[3].contains("LISTED"));
		assert!(lines[3].contains("$40.00*"));
		assert!(lines[3].ends_with("$35.00"));
	}

	#[test]
	fn test_predictions_flagged() {
		assert!(reporter(Filter::All).has_predictions());
		assert!(!reporter(Filter::Sold).has_predictions());
	}

	#[test]
	fn test_empty_hints() {
		let r = HistoryReporter::new(
			Listing::new(vec![]),
			Filter::Listed,
			SortKey::Date,
		);
		assert!(r.items.is_empty());
		assert_eq!(r.empty_hint(), "No listed items yet.");
	}
}
