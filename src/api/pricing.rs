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
use crate::api::http::{ApiError, Client};
use crate::auth::session::Session;
use crate::model::item::HistoryResponse;
use crate::model::prediction::{CeramicInput, PredictionResponse};
use crate::model::sale::{HistoricalSaleInput, HistoricalSaleResponse};
use crate::model::stats::Stats;
use serde::Deserialize;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";

#[derive(Debug, Deserialize)]
pub struct Health {
	pub status: String,
	#[serde(default)]
	pub version: Option<String>,
}

/// The remote pricing service: it prices pieces, stores them, and keeps
/// each user's sales history. Every call is made as the user the session
/// belongs to.
pub struct PricingApi {
	http: Client,
}

impl PricingApi {
	pub fn new(base_url: &str, session: &Session) -> Self {
		Self {
			http: Client::new(base_url).with_bearer(&session.access_token),
		}
	}

	pub fn health(&self) -> Result<Health, ApiError> {
		self.http.get("")
	}

	/// Prices a piece. The API also stores it as a listed item.
	pub fn predict(
		&self,
		input: &CeramicInput,
	) -> Result<PredictionResponse, ApiError> {
		self.http.post("predict", input)
	}

	pub fn history(&self) -> Result<HistoryResponse, ApiError> {
		self.http.get("history")
	}

	pub fn record_sale(
		&self,
		input: &HistoricalSaleInput,
	) -> Result<HistoricalSaleResponse, ApiError> {
		self.http.post("historical", input)
	}

	pub fn stats(&self) -> Result<Stats, ApiError> {
		self.http.get("stats")
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::api::http::test_server::serve_once;

	fn session() -> Session {
		Session {
			access_token: "jwt".to_string(),
			refresh_token: String::new(),
			expires_at: None,
			user_id: "u".to_string(),
			email: None,
		}
	}

	#[test]
	fn test_history() {
		let (url, requests) = serve_once(
			"200 OK",
			r#"{"count": 1, "items": [{
				"id": "a1", "name": "Mug", "date_created": "2024-01-01",
				"date_listed": "2024-01-02", "material_cost": 1,
				"labor_cost": 2, "overhead_cost": 3, "glazing_quality": 4,
				"originality": 5, "beauty": 6, "demand": 7,
				"predicted_price": 20.5, "status": "listed",
				"created_at": "2024-01-02T08:00:00+00:00"
			}]}"#,
		);
		let api = PricingApi::new(&url, &session());

		let history = api.history().unwrap();
		assert_eq!(history.count, 1);
		assert_eq!(history.items[0].name, "Mug");

		let request = requests.recv().unwrap().to_ascii_lowercase();
		assert!(request.starts_with("get /history http/1.1"));
		assert!(request.contains("authorization: bearer jwt"));
	}

	#[test]
	fn test_predict_posts_piece() {
		let (url, requests) = serve_once(
			"200 OK",
			r#"{"predicted_price": 85.5,
				"breakdown": {"total_cost": 50, "base_price": 65,
					"quality_adjustment": 20.5},
				"confidence_interval": [76.95, 94.05],
				"model_version": "v0.1.0-simple"}"#,
		);
		let api = PricingApi::new(&url, &session());
		let input: CeramicInput = toml::from_str(
			"name = \"Vase\"\ndate_created = \"2024-01-01\"\ndate_listed = \"2024-01-02\"",
		)
		.unwrap();

		let prediction = api.predict(&input).unwrap();
		assert_eq!(prediction.predicted_price, 85.5);

		let request = requests.recv().unwrap();
		assert!(request.starts_with("POST /predict HTTP/1.1"));
		assert!(request.contains(r#""date_listed":"2024-01-02""#));
	}

	#[test]
	fn test_rejected_session() {
		let (url, _requests) =
			serve_once("401 Unauthorized", r#"{"detail": "Invalid token"}"#);
		let api = PricingApi::new(&url, &session());

		assert!(matches!(api.stats(), Err(ApiError::Unauthorized)));
	}
}
