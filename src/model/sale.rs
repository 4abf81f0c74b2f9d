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
use crate::metrics::derived::{DerivedMetrics, SaleRecord};
use crate::model::item::ItemId;
use crate::model::prediction::default_rating;
use crate::model::validation::{check_name, check_non_negative, check_rating};
use crate::util::date::Date;
use crate::util::money::{agrees, dollars, percent};
use anyhow::{anyhow, Error};
use serde::{Deserialize, Serialize};

/// A past sale as the user is writing it up. Anything may still be missing
/// here; the derived figures are shown for whatever is present, and only
/// [`SaleDraft::into_input`] insists on a complete sale.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SaleDraft {
	#[serde(default)]
	pub name: String,
	pub date_created: Option<Date>,
	pub date_listed: Option<Date>,
	pub date_sold: Option<Date>,

	#[serde(default)]
	pub material_cost: f64,
	#[serde(default)]
	pub labor_cost: f64,
	#[serde(default)]
	pub overhead_cost: f64,

	#[serde(default = "default_rating")]
	pub glazing_quality: u8,
	#[serde(default = "default_rating")]
	pub originality: u8,
	#[serde(default = "default_rating")]
	pub beauty: u8,
	#[serde(default = "default_rating")]
	pub demand: u8,

	#[serde(default)]
	pub hours_worked: f64,

	/// What the piece actually sold for
	pub actual_price: Option<f64>,

	#[serde(default)]
	pub notes: String,
}

impl SaleDraft {
	pub fn record(&self) -> SaleRecord {
		SaleRecord {
			material_cost: self.material_cost,
			labor_cost: self.labor_cost,
			overhead_cost: self.overhead_cost,
			date_listed: self.date_listed,
			date_sold: self.date_sold,
			actual_price: self.actual_price,
		}
	}

	pub fn metrics(&self) -> DerivedMetrics {
		self.record().metrics()
	}

	/// Completes the draft into a submittable sale, rejecting anything the
	/// API would refuse.
	pub fn into_input(self) -> Result<HistoricalSaleInput, Error> {
		let input = HistoricalSaleInput {
			date_created: required("date_created", self.date_created)?,
			date_listed: required("date_listed", self.date_listed)?,
			date_sold: required("date_sold", self.date_sold)?,
			actual_price: required("actual_price", self.actual_price)?,
			name: self.name,
			material_cost: self.material_cost,
			labor_cost: self.labor_cost,
			overhead_cost: self.overhead_cost,
			glazing_quality: self.glazing_quality,
			originality: self.originality,
			beauty: self.beauty,
			demand: self.demand,
			hours_worked: self.hours_worked,
			notes: self.notes,
		};

		input.validate()?;
		Ok(input)
	}
}

fn required<T>(field: &str, value: Option<T>) -> Result<T, Error> {
	value.ok_or_else(|| anyhow!("{} is required to record a sale", field))
}

/// Body of the historical-sale endpoint.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HistoricalSaleInput {
	pub name: String,
	pub date_created: Date,
	pub date_listed: Date,
	pub date_sold: Date,

	pub material_cost: f64,
	pub labor_cost: f64,
	pub overhead_cost: f64,

	pub glazing_quality: u8,
	pub originality: u8,
	pub beauty: u8,
	pub demand: u8,

	pub hours_worked: f64,
	pub actual_price: f64,
	pub notes: String,
}

impl HistoricalSaleInput {
	pub fn validate(&self) -> Result<(), Error> {
		check_name(&self.name)?;
		check_non_negative("material_cost", self.material_cost)?;
		check_non_negative("labor_cost", self.labor_cost)?;
		check_non_negative("overhead_cost", self.overhead_cost)?;
		check_rating("glazing_quality", self.glazing_quality)?;
		check_rating("originality", self.originality)?;
		check_rating("beauty", self.beauty)?;
		check_rating("demand", self.demand)?;
		check_non_negative("hours_worked", self.hours_worked)?;
		check_non_negative("actual_price", self.actual_price)
	}
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct HistoricalSaleResponse {
	pub message: String,
	pub data: RecordedSale,
}

/// The API's echo of a recorded sale. Profit is rounded to cents and the
/// margin to one decimal place.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct RecordedSale {
	#[serde(default)]
	pub id: Option<ItemId>,
	pub name: String,
	pub actual_price: f64,
	pub profit: f64,
	pub profit_margin: f64,
	pub days_to_sell: i64,
}

impl RecordedSale {
	/// Lists each figure the API derived for this sale that does not match
	/// what was computed locally for the same sale.
	pub fn disagreements(&self, local: &DerivedMetrics) -> Vec<String> {
		let mut found = Vec::new();

		if let Some(profit) = local.profit {
			if !agrees(profit, self.profit, 2) {
				found.push(format!(
					"profit: computed {}, API reported {}",
					dollars(profit),
					dollars(self.profit)
				));
			}
		}
		if let Some(margin) = local.profit_margin {
			if !agrees(margin, self.profit_margin, 1) {
				found.push(format!(
					"profit margin: computed {}, API reported {}",
					percent(margin),
					percent(self.profit_margin)
				));
			}
		}
		if let Some(days) = local.days_to_sell {
			if days != self.days_to_sell {
				found.push(format!(
					"days to sell: computed {}, API reported {}",
					days, self.days_to_sell
				));
			}
		}

		found
	}
}
