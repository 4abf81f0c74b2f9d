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
use crate::metrics::derived::{total_cost, SaleRecord};
use crate::util::date::Date;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
	Listed,
	Sold,
}

impl fmt::Display for ItemStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ItemStatus::Listed => write!(f, "listed"),
			ItemStatus::Sold => write!(f, "sold"),
		}
	}
}

/// Record identifiers come back as either text or integers depending on the
/// table backing the API; either is fine for display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
	Text(String),
	Number(i64),
}

impl fmt::Display for ItemId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ItemId::Text(s) => write!(f, "{}", s),
			ItemId::Number(n) => write!(f, "{}", n),
		}
	}
}

/// One stored ceramic piece, as returned by the history endpoint. Pieces that
/// were only priced carry a predicted price; pieces logged as historical
/// sales carry the actual price and the figures the API derived from it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CeramicItem {
	pub id: ItemId,
	pub name: String,
	pub date_created: Date,
	pub date_listed: Date,
	#[serde(default)]
	pub date_sold: Option<Date>,

	pub material_cost: f64,
	pub labor_cost: f64,
	pub overhead_cost: f64,

	pub glazing_quality: u8,
	pub originality: u8,
	pub beauty: u8,
	pub demand: u8,

	#[serde(default)]
	pub hours_worked: f64,

	#[serde(default)]
	pub predicted_price: Option<f64>,
	#[serde(default)]
	pub actual_price: Option<f64>,

	pub status: ItemStatus,

	// derived by the API when the sale was recorded; shown as-is
	#[serde(default)]
	pub profit: Option<f64>,
	#[serde(default)]
	pub profit_margin: Option<f64>,
	#[serde(default)]
	pub days_to_sell: Option<i64>,

	#[serde(default)]
	pub notes: Option<String>,
	#[serde(default)]
	pub model_version: Option<String>,

	#[serde(default)]
	pub created_at: String,
}

impl CeramicItem {
	pub fn record(&self) -> SaleRecord {
		SaleRecord {
			material_cost: self.material_cost,
			labor_cost: self.labor_cost,
			overhead_cost: self.overhead_cost,
			date_listed: Some(self.date_listed),
			date_sold: self.date_sold,
			actual_price: self.actual_price,
		}
	}

	pub fn total_cost(&self) -> f64 {
		total_cost(&self.record())
	}

	/// The price an item actually sold for, if it sold for anything.
	pub fn sale_price(&self) -> Option<f64> {
		self.actual_price.filter(|p| *p != 0.0)
	}

	pub fn prediction(&self) -> Option<f64> {
		self.predicted_price.filter(|p| *p != 0.0)
	}

	/// The best price known for the item: what it sold for, else what it
	/// was predicted to sell for, else zero.
	pub fn best_price(&self) -> f64 {
		self.sale_price().or(self.prediction()).unwrap_or(0.0)
	}
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryResponse {
	pub count: usize,
	pub items: Vec<CeramicItem>,
}
