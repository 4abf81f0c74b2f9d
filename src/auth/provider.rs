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
use crate::api::http::Client;
use crate::auth::session::Session;
use anyhow::{bail, Error};
use chrono::Utc;
use log::info;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct Credentials<'a> {
	email: &'a str,
	password: &'a str,
}

#[derive(Serialize)]
struct RefreshGrant<'a> {
	refresh_token: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
	access_token: String,
	#[serde(default)]
	refresh_token: String,
	expires_in: Option<i64>,
	expires_at: Option<i64>,
	user: ProviderUser,
}

#[derive(Deserialize)]
struct ProviderUser {
	id: String,
	email: Option<String>,
}

impl TokenResponse {
	fn into_session(self, now: i64) -> Session {
		Session {
			access_token: self.access_token,
			refresh_token: self.refresh_token,
			expires_at: self.expires_at.or(self.expires_in.map(|s| now + s)),
			user_id: self.user.id,
			email: self.user.email,
		}
	}
}

/// Client for the hosted identity provider that owns user accounts. All
/// this tool does is trade an email and password for a [`Session`], and
/// give the session back when the user logs out.
pub struct AuthClient {
	base_url: String,
	anon_key: String,
}

impl AuthClient {
	pub fn new(base_url: &str, anon_key: String) -> Self {
		Self {
			base_url: base_url.to_string(),
			anon_key,
		}
	}

	fn http(&self) -> Client {
		Client::new(&self.base_url).with_api_key(&self.anon_key)
	}

	pub fn sign_up(&self, email: &str, password: &str) -> Result<(), Error> {
		self.http().post_discard(
			"auth/v1/signup",
			Some(&Credentials { email, password }),
		)?;
		info!("created account for {}", email);
		Ok(())
	}

	pub fn sign_in(&self, email: &str, password: &str) -> Result<Session, Error> {
		let resp: TokenResponse = self.http().post(
			"auth/v1/token?grant_type=password",
			&Credentials { email, password },
		)?;
		Ok(resp.into_session(Utc::now().timestamp()))
	}

	/// Trades the session's refresh token for a fresh session. The provider
	/// rotates refresh tokens, so the old session must not be used again.
	pub fn refresh(&self, session: &Session) -> Result<Session, Error> {
		if session.refresh_token.is_empty() {
			bail!("session has no refresh token");
		}

		let resp: TokenResponse = self.http().post(
			"auth/v1/token?grant_type=refresh_token",
			&RefreshGrant {
				refresh_token: &session.refresh_token,
			},
		)?;
		info!("refreshed session for {}", resp.user.id);
		Ok(resp.into_session(Utc::now().timestamp()))
	}

	/// Revokes the session at the provider. The caller is still responsible
	/// for forgetting it locally.
	pub fn sign_out(&self, session: &Session) -> Result<(), Error> {
		self.http()
			.with_bearer(&session.access_token)
			.post_discard::<()>("auth/v1/logout", None)?;
		Ok(())
	}
}
