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
use crate::model::validation::{
	check_between, check_name, check_non_negative, check_rating,
};
use crate::util::date::Date;
use anyhow::Error;
use serde::{Deserialize, Serialize};

pub(crate) fn default_rating() -> u8 {
	5
}

fn default_weight() -> f64 {
	0.5
}

fn default_markup() -> f64 {
	0.3
}

/// A piece to be priced. Read from the user's TOML form, where everything
/// but the name and dates may be left out and takes the form's default, and
/// sent as-is to the prediction endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CeramicInput {
	pub name: String,
	pub date_created: Date,
	pub date_listed: Date,

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

	/// Cost weight
	#[serde(default = "default_weight")]
	pub alpha: f64,
	/// Quality weight
	#[serde(default = "default_weight")]
	pub beta: f64,

	#[serde(default)]
	pub hours_worked: f64,
	#[serde(default = "default_markup")]
	pub markup: f64,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub image_base64: Option<String>,
}

impl CeramicInput {
	pub fn validate(&self) -> Result<(), Error> {
		check_name(&self.name)?;
		check_non_negative("material_cost", self.material_cost)?;
		check_non_negative("labor_cost", self.labor_cost)?;
		check_non_negative("overhead_cost", self.overhead_cost)?;
		check_rating("glazing_quality", self.glazing_quality)?;
		check_rating("originality", self.originality)?;
		check_rating("beauty", self.beauty)?;
		check_rating("demand", self.demand)?;
		check_between("alpha", self.alpha, 0.0, 1.0)?;
		check_between("beta", self.beta, 0.0, 1.0)?;
		check_non_negative("hours_worked", self.hours_worked)?;
		check_between("markup", self.markup, 0.0, 2.0)
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Breakdown {
	pub total_cost: f64,
	pub base_price: f64,
	pub quality_adjustment: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
	pub predicted_price: f64,
	pub breakdown: Breakdown,
	pub confidence_interval: Vec<f64>,
	pub model_version: String,
}

impl PredictionResponse {
	/// The (low, high) confidence range, if the API sent a well-formed one.
	pub fn confidence_range(&self) -> Option<(f64, f64)> {
		match self.confidence_interval.as_slice() {
			[low, high] => Some((*low, *high)),
			_ => None,
		}
	}
}
