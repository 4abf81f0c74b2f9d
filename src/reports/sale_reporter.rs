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
use crate::model::sale::HistoricalSaleResponse;
use crate::reports::table::Table;
use crate::util::money::{dollars, percent};

/// Confirms a recorded sale with the figures the API stored for it.
pub struct SaleReporter {
	response: HistoricalSaleResponse,
}

impl SaleReporter {
	pub fn new(response: HistoricalSaleResponse) -> Self {
		Self { response }
	}

	fn table(&self) -> Table {
		let sale = &self.response.data;
		let mut table = Table::new(2);

		if let Some(id) = &sale.id {
			table.add_row(vec!["ID", &id.to_string()]);
		}
		table.add_row(vec!["Item", &sale.name]);
		table.add_row(vec!["Sale Price", &dollars(sale.actual_price)]);
		table.add_row(vec!["Profit", &dollars(sale.profit)]);
		table.add_row(vec!["Profit Margin", &percent(sale.profit_margin)]);
		table.add_row(vec!["Days to Sell", &sale.days_to_sell.to_string()]);

		table
	}

	pub fn print(&self) {
		println!();
		println!("{}", self.response.message);
		self.table().print();
	}
}
