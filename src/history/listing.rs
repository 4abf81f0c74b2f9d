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
use crate::model::item::{CeramicItem, ItemStatus};
use crate::util::date::parse_timestamp;
use clap::ValueEnum;
use std::cmp::Ordering;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Filter {
	All,
	Sold,
	Listed,
}

impl Filter {
	pub fn matches(&self, item: &CeramicItem) -> bool {
		match self {
			Filter::All => true,
			Filter::Sold => item.status == ItemStatus::Sold,
			Filter::Listed => item.status == ItemStatus::Listed,
		}
	}
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortKey {
	/// Newest first
	Date,
	/// Highest first, by sale price, else predicted price
	Price,
	/// Alphabetical, ignoring case
	Name,
}

impl SortKey {
	pub fn compare(&self, a: &CeramicItem, b: &CeramicItem) -> Ordering {
		match self {
			SortKey::Date => created_millis(b).cmp(&created_millis(a)),
			SortKey::Price => b.best_price().total_cmp(&a.best_price()),
			SortKey::Name => a
				.name
				.to_lowercase()
				.cmp(&b.name.to_lowercase())
				// lowercase before uppercase among otherwise equal names
				.then_with(|| b.name.cmp(&a.name)),
		}
	}
}

/// Records without a readable creation time sort as the oldest.
fn created_millis(item: &CeramicItem) -> i64 {
	parse_timestamp(&item.created_at)
		.map(|t| t.timestamp_millis())
		.unwrap_or(i64::MIN)
}

/// A user's pieces as fetched, ready to be narrowed and ordered for display.
pub struct Listing {
	items: Vec<CeramicItem>,
}

impl Listing {
	pub fn new(items: Vec<CeramicItem>) -> Self {
		Self { items }
	}

	pub fn count(&self, filter: Filter) -> usize {
		self.items.iter().filter(|i| filter.matches(i)).count()
	}

	/// Hands over the items matching the filter, in the requested order.
	/// Items that compare equal keep the order the API returned them in.
	pub fn take(self, filter: Filter, sort: SortKey) -> Vec<CeramicItem> {
		let mut items: Vec<CeramicItem> = self
			.items
			.into_iter()
			.filter(|i| filter.matches(i))
			.collect();

		items.sort_by(|a, b| sort.compare(a, b));
		items
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::item::fixtures::{listed, sold};

	fn names(items: &[CeramicItem]) -> Vec<&str> {
		items.iter().map(|i| i.name.as_str()).collect()
	}

	fn sample() -> Listing {
		Listing::new(vec![
			listed("bowl", 40.0, "2024-01-03T09:00:00+00:00"),
			sold("Vase", 120.0, "2024-01-01T09:00:00+00:00"),
			listed("Mug", 18.0, "2024-01-02T09:00:00+00:00"),
			sold("plate", 25.0, "2024-01-04T09:00:00+00:00"),
		])
	}

	mod filter {
		use super::*;

		#[test]
		fn test_counts() {
			let listing = sample();
			assert_eq!(listing.count(Filter::All), 4);
			assert_eq!(listing.count(Filter::Sold), 2);
			assert_eq!(listing.count(Filter::Listed), 2);
		}

		#[test]
		fn test_sold_only() {
			let items = sample().take(Filter::Sold, SortKey::Name);
			assert_eq!(names(&items), vec!["plate", "Vase"]);
		}

		#[test]
		fn test_listed_only() {
			let items = sample().take(Filter::Listed, SortKey::Date);
			assert_eq!(names(&items), vec!["bowl", "Mug"]);
		}

		#[test]
		fn test_empty() {
			let items = Listing::new(vec![]).take(Filter::All, SortKey::Date);
			assert!(items.is_empty());
		}
	}

	mod sort {
		use super::*;

		#[test]
		fn test_by_date_newest_first() {
			let items = sample().take(Filter::All, SortKey::Date);
			assert_eq!(names(&items), vec!["plate", "bowl", "Mug", "Vase"]);
		}

		#[test]
		fn test_by_date_unparseable_last() {
			let listing = Listing::new(vec![
				listed("undated", 1.0, "sometime"),
				listed("dated", 1.0, "2020-01-01T00:00:00+00:00"),
			]);
			let items = listing.take(Filter::All, SortKey::Date);
			assert_eq!(names(&items), vec!["dated", "undated"]);
		}

		#[test]
		fn test_by_price_highest_first() {
			let items = sample().take(Filter::All, SortKey::Price);
			assert_eq!(names(&items), vec!["Vase", "bowl", "plate", "Mug"]);
		}

		#[test]
		fn test_by_price_falls_back_to_prediction() {
			let mut unsold = sold("returned", 0.0, "");
			unsold.predicted_price = Some(90.0);
			let listing = Listing::new(vec![
				listed("cheap", 10.0, ""),
				unsold,
				sold("dear", 95.0, ""),
			]);
			let items = listing.take(Filter::All, SortKey::Price);
			assert_eq!(names(&items), vec!["dear", "returned", "cheap"]);
		}

		#[test]
		fn test_by_name_ignores_case() {
			let items = sample().take(Filter::All, SortKey::Name);
			assert_eq!(names(&items), vec!["bowl", "Mug", "plate", "Vase"]);
		}

		#[test]
		fn test_by_name_lowercase_first_on_case_ties() {
			let listing = Listing::new(vec![
				listed("Mug", 1.0, ""),
				listed("bowl", 1.0, ""),
				listed("mug", 1.0, ""),
			]);
			let items = listing.take(Filter::All, SortKey::Name);
			assert_eq!(names(&items), vec!["bowl", "mug", "Mug"]);
		}

		#[test]
		fn test_stable_for_ties() {
			let listing = Listing::new(vec![
				listed("first", 10.0, ""),
				listed("second", 10.0, ""),
				listed("third", 10.0, ""),
			]);
			let items = listing.take(Filter::All, SortKey::Price);
			assert_eq!(names(&items), vec!["first", "second", "third"]);
		}
	}
}
