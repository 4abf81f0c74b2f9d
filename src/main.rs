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
use crate::api::pricing::{PricingApi, DEFAULT_API_URL};
use crate::auth::provider::AuthClient;
use crate::auth::session::Session;
use crate::config::config_file::Config;
use crate::history::listing::{Filter, Listing, SortKey};
use crate::model::item::HistoryResponse;
use crate::model::prediction::CeramicInput;
use crate::model::sale::SaleDraft;
use crate::model::stats::Stats;
use crate::model::validation::check_password;
use crate::parsing::filesystem::Filesystem;
use crate::reports::history_reporter::HistoryReporter;
use crate::reports::prediction_reporter::PredictionReporter;
use crate::reports::preview_reporter::PreviewReporter;
use crate::reports::sale_reporter::SaleReporter;
use crate::reports::stats_reporter::StatsReporter;
use anyhow::{anyhow, bail, Error};
use clap::{Parser, ValueEnum};
use env_logger::Env;
use log::{info, warn};

mod api;
mod auth;
mod config;
mod history;
mod metrics;
mod model;
mod parsing;
mod reports;
mod util;

#[derive(Parser)]
#[command(
	name = "ceramr",
	version,
	about = "Ceramic sales ledger and pricing client"
)]
struct Cli {
	// ----------------
	// -- POSITIONAL --
	// ----------------
	/// The command to execute
	command: Directive,

	/// The email address for the Signup and Login commands
	#[arg(required = false)]
	term: Option<String>,

	// -----------
	// -- FLAGS --
	// -----------
	/// The form to read (TOML), or for History and Stats an exported
	/// history (JSON) to use instead of fetching one
	#[arg(short)]
	file: Option<String>,

	/// Custom config file location (default: ~/.config/ceramr/config.toml)
	#[arg(long)]
	config: Option<String>,

	/// Which items the History command shows
	#[arg(long, value_enum, default_value_t = Filter::All)]
	filter: Filter,

	/// How the History command orders items
	#[arg(short, long, value_enum, default_value_t = SortKey::Date)]
	sort: SortKey,
}

impl Cli {
	/// Extra validations on top of what clap does
	fn validate(&self) -> Result<(), Error> {
		match self.command {
			Directive::Signup | Directive::Login if self.term.is_none() => {
				bail!("No email specified")
			},
			Directive::Predict | Directive::Preview | Directive::Record
				if self.file.is_none() =>
			{
				bail!("No form specified; pass one with -f")
			},
			_ => {},
		}

		Ok(())
	}

	fn form(&self) -> Result<&str, Error> {
		self.file.as_deref().ok_or_else(|| anyhow!("No form specified"))
	}
}

#[derive(ValueEnum, Clone, PartialEq)]
enum Directive {
	Signup, // create an account, then log in
	Login,
	Logout,
	Whoami,

	Health, // check the pricing API is reachable

	Predict, // price a new piece
	Preview, // show derived figures for a sale draft, offline
	Record,  // record a past sale

	History, // list pieces
	Stats,   // aggregate statistics
}

fn main() -> Result<(), Error> {
	env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
		.init();

	let args = Cli::parse();
	args.validate()?;

	let fs = Filesystem::new(args.config.as_ref());

	match args.command {
		Directive::Signup => {
			let email = args.term.as_deref().unwrap_or_default();
			let auth = auth_client(&fs.get_config(true)?)?;
			let password = read_password()?;

			auth.sign_up(email, &password)?;
			let session = auth.sign_in(email, &password)?;
			fs.session_store()?.save(&session)?;
			println!("Signed up and logged in as {}", email);
		},
		Directive::Login => {
			let email = args.term.as_deref().unwrap_or_default();
			let auth = auth_client(&fs.get_config(true)?)?;
			let password = read_password()?;

			let session = auth.sign_in(email, &password)?;
			fs.session_store()?.save(&session)?;
			println!("Logged in as {}", email);
		},
		Directive::Logout => {
			let store = fs.session_store()?;
			// an expired session is still revoked, since its refresh
			// token may be live
			match store.stored()? {
				Some(session) => {
					// the provider revoking the token is best effort; the
					// local session goes regardless
					match fs.get_config(true).and_then(|c| auth_client(&c)) {
						Ok(auth) => {
							if let Err(e) = auth.sign_out(&session) {
								warn!("provider sign-out failed: {}", e);
							}
						},
						Err(e) => warn!("skipping provider sign-out: {}", e),
					}
					store.clear()?;
					println!("Logged out");
				},
				None => {
					store.clear()?;
					println!("Not logged in");
				},
			}
		},
		Directive::Whoami => {
			let session = live_session(&fs)?;
			println!(
				"{} ({})",
				session.email.as_deref().unwrap_or("unknown email"),
				session.user_id
			);
		},
		Directive::Health => {
			let api = pricing_api(&fs)?;
			let health = api.health()?;
			match health.version {
				Some(version) => println!("{} ({})", health.status, version),
				None => println!("{}", health.status),
			}
		},
		Directive::Predict => {
			let input: CeramicInput = fs.read_toml(args.form()?)?;
			input.validate()?;

			let api = pricing_api(&fs)?;
			let prediction = api.predict(&input)?;
			PredictionReporter::new(prediction).print();
		},
		Directive::Preview => {
			let draft: SaleDraft = fs.read_toml(args.form()?)?;
			PreviewReporter::new(&draft).print();
		},
		Directive::Record => {
			let draft: SaleDraft = fs.read_toml(args.form()?)?;
			PreviewReporter::new(&draft).print();

			let local = draft.metrics();
			let input = draft.into_input()?;

			let api = pricing_api(&fs)?;
			let response = api.record_sale(&input)?;
			for d in response.data.disagreements(&local) {
				warn!("API disagrees with local figures; {}", d);
			}
			SaleReporter::new(response).print();
		},
		Directive::History => {
			let history = match &args.file {
				Some(path) => fs.read_json::<HistoryResponse>(path)?,
				None => pricing_api(&fs)?.history()?,
			};
			let reporter = HistoryReporter::new(
				Listing::new(history.items),
				args.filter,
				args.sort,
			);
			reporter.print();
		},
		Directive::Stats => {
			let stats = match &args.file {
				Some(path) => {
					Stats::tabulate(&fs.read_json::<HistoryResponse>(path)?.items)
				},
				None => pricing_api(&fs)?.stats()?,
			};
			StatsReporter::new(stats).print();
		},
	}

	Ok(())
}

fn auth_client(config: &Config) -> Result<AuthClient, Error> {
	let auth = config
		.auth
		.as_ref()
		.ok_or_else(|| anyhow!("no [auth] section in config"))?;

	let (Some(url), Some(anon_key)) = (&auth.url, &auth.anon_key) else {
		bail!("auth.url and one of auth.anon_key or auth.anon_key_cmd must be configured");
	};

	Ok(AuthClient::new(url, anon_key.clone()))
}

/// The logged-in user's session, refreshed at the provider if it has
/// expired. Fails if nobody is logged in.
fn live_session(fs: &Filesystem) -> Result<Session, Error> {
	fs.session_store()?.require(|stale| {
		let auth = auth_client(&fs.get_config(true)?)?;
		auth.refresh(stale)
	})
}

/// Connects to the pricing API as the logged-in user. Fails if nobody is.
fn pricing_api(fs: &Filesystem) -> Result<PricingApi, Error> {
	let session = live_session(fs)?;

	let config = fs.get_config(false)?;
	let url = config
		.api
		.and_then(|api| api.url)
		.unwrap_or(DEFAULT_API_URL.to_owned());

	info!("using pricing API at {}", url);
	Ok(PricingApi::new(&url, &session))
}

fn read_password() -> Result<String, Error> {
	let password = rpassword::prompt_password("Password: ")?;
	check_password(&password)?;
	Ok(password)
}
