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
use serde::{Deserialize, Serialize};

/// Number of recorded sales after which there is enough history to train a
/// pricing model on.
pub const TRAINING_THRESHOLD: usize = 20;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PriceStats {
	pub min: f64,
	pub max: f64,
	pub average: f64,
	pub total_revenue: f64,
}

/// Aggregate view over a user's pieces. The API only sends price statistics
/// (and readiness) once at least one piece has sold.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stats {
	pub total_items: usize,
	pub sold_items: usize,
	pub listed_items: usize,

	#[serde(default)]
	pub price_stats: Option<PriceStats>,

	#[serde(default)]
	pub ready_for_training: bool,

	#[serde(default)]
	pub message: Option<String>,
}

impl Stats {
	/// Aggregates a set of items the same way the API does for its stats
	/// endpoint.
	pub fn tabulate(items: &[CeramicItem]) -> Stats {
		let sold: Vec<&CeramicItem> = items
			.iter()
			.filter(|i| i.status == ItemStatus::Sold)
			.collect();

		if sold.is_empty() {
			return Stats {
				total_items: items.len(),
				sold_items: 0,
				listed_items: items.len(),
				price_stats: None,
				ready_for_training: false,
				message: Some("No historical sales data yet".to_string()),
			};
		}

		let prices: Vec<f64> =
			sold.iter().filter_map(|i| i.sale_price()).collect();

		let price_stats = if prices.is_empty() {
			PriceStats {
				min: 0.0,
				max: 0.0,
				average: 0.0,
				total_revenue: 0.0,
			}
		} else {
			let total: f64 = prices.iter().sum();
			PriceStats {
				min: prices.iter().copied().fold(f64::INFINITY, f64::min),
				max: prices.iter().copied().fold(f64::NEG_INFINITY, f64::max),
				average: total / prices.len() as f64,
				total_revenue: total,
			}
		};

		Stats {
			total_items: items.len(),
			sold_items: sold.len(),
			listed_items: items.len() - sold.len(),
			price_stats: Some(price_stats),
			ready_for_training: sold.len() >= TRAINING_THRESHOLD,
			message: None,
		}
	}

	/// How many more recorded sales are needed before training is possible.
	pub fn sales_needed(&self) -> usize {
		TRAINING_THRESHOLD.saturating_sub(self.sold_items)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::item::fixtures::{listed, sold};

	#[test]
	fn test_no_items() {
		let stats = Stats::tabulate(&[]);
		assert_eq!(stats.total_items, 0);
		assert_eq!(stats.listed_items, 0);
		assert_eq!(stats.price_stats, None);
		assert!(!stats.ready_for_training);
		assert_eq!(stats.sales_needed(), 20);
	}

	#[test]
	fn test_nothing_sold() {
		let items = vec![listed("A", 10.0, ""), listed("B", 12.0, "")];
		let stats = Stats::tabulate(&items);
		assert_eq!(stats.total_items, 2);
		assert_eq!(stats.sold_items, 0);
		assert_eq!(stats.listed_items, 2);
		assert_eq!(stats.price_stats, None);
		assert!(stats.message.is_some());
	}

	#[test]
	fn test_price_stats_over_sold_items() {
		let items = vec![
			sold("A", 100.0, ""),
			listed("B", 500.0, ""),
			sold("C", 40.0, ""),
			sold("D", 60.0, ""),
		];
		let stats = Stats::tabulate(&items);
		assert_eq!(stats.total_items, 4);
		assert_eq!(stats.sold_items, 3);
		assert_eq!(stats.listed_items, 1);
		assert_eq!(stats.message, None);

		let prices = stats.price_stats.unwrap();
		assert_eq!(prices.min, 40.0);
		assert_eq!(prices.max, 100.0);
		assert_eq!(prices.total_revenue, 200.0);
		assert!((prices.average - 200.0 / 3.0).abs() < 1e-12);
	}

	#[test]
	fn test_zero_prices_skipped() {
		let mut free = sold("Gift", 0.0, "");
		free.actual_price = Some(0.0);
		let items = vec![free, sold("A", 30.0, "")];

		let stats = Stats::tabulate(&items);
		assert_eq!(stats.sold_items, 2);

		let prices = stats.price_stats.unwrap();
		assert_eq!(prices.min, 30.0);
		assert_eq!(prices.average, 30.0);
	}

	#[test]
	fn test_sold_without_any_price() {
		let mut free = sold("Gift", 0.0, "");
		free.actual_price = None;

		let prices = Stats::tabulate(&[free]).price_stats.unwrap();
		assert_eq!(prices.total_revenue, 0.0);
		assert_eq!(prices.min, 0.0);
	}

	#[test]
	fn test_training_readiness() {
		let items: Vec<CeramicItem> =
			(0..19).map(|i| sold(&i.to_string(), 10.0, "")).collect();
		let stats = Stats::tabulate(&items);
		assert!(!stats.ready_for_training);
		assert_eq!(stats.sales_needed(), 1);

		let mut items = items;
		items.push(sold("last", 10.0, ""));
		let stats = Stats::tabulate(&items);
		assert!(stats.ready_for_training);
		assert_eq!(stats.sales_needed(), 0);
	}

	#[test]
	fn test_deserialize_empty_response() {
		let json = r#"{
			"total_items": 3,
			"sold_items": 0,
			"listed_items": 3,
			"message": "No historical sales data yet"
		}"#;
		let stats: Stats = serde_json::from_str(json).unwrap();
		assert!(!stats.ready_for_training);
		assert_eq!(stats.price_stats, None);
	}
}
