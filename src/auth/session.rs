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
use anyhow::{anyhow, bail, Error};
use chrono::Utc;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Proof of a signed-in user. Created by logging in, destroyed by logging
/// out, and handed explicitly to anything that calls the API on the user's
/// behalf.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
	pub access_token: String,
	#[serde(default)]
	pub refresh_token: String,

	/// Unix seconds after which the access token is no longer accepted
	pub expires_at: Option<i64>,

	pub user_id: String,
	pub email: Option<String>,
}

impl Session {
	pub fn is_expired(&self, now: i64) -> bool {
		self.expires_at.is_some_and(|at| now >= at)
	}
}

/// Keeps the current session between invocations, in a file only the user
/// can read.
pub struct SessionStore {
	path: PathBuf,
}

impl SessionStore {
	pub fn new(path: PathBuf) -> Self {
		Self { path }
	}

	/// The stored session as written, expired or not.
	pub fn stored(&self) -> Result<Option<Session>, Error> {
		let content = match fs::read_to_string(&self.path) {
			Ok(content) => content,
			Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
			Err(e) => bail!("failed to read {}: {}", self.path.display(), e),
		};

		let session: Session = toml::from_str(&content)
			.map_err(|e| anyhow!("failed to parse session: {}", e))?;
		Ok(Some(session))
	}

	/// The stored session, if there is one that has not yet expired.
	pub fn load(&self) -> Result<Option<Session>, Error> {
		let now = Utc::now().timestamp();
		Ok(self.stored()?.filter(|s| !s.is_expired(now)))
	}

	/// A live session, or an error if nobody is logged in. An expired
	/// session is handed to `refresh` and its replacement saved; if that
	/// fails the user counts as logged out. Every command that talks to the
	/// API goes through here first.
	pub fn require<F>(&self, refresh: F) -> Result<Session, Error>
	where
		F: FnOnce(&Session) -> Result<Session, Error>,
	{
		let not_logged_in =
			|| anyhow!("Not logged in; run 'ceramr login <email>'");

		let session = self.stored()?.ok_or_else(not_logged_in)?;
		if !session.is_expired(Utc::now().timestamp()) {
			return Ok(session);
		}

		debug!("stored session has expired; refreshing");
		match refresh(&session) {
			Ok(fresh) => {
				self.save(&fresh)?;
				Ok(fresh)
			},
			Err(e) => {
				warn!(
					"stored session has expired and could not be refreshed: {}",
					e
				);
				Err(not_logged_in())
			},
		}
	}

	pub fn save(&self, session: &Session) -> Result<(), Error> {
		if let Some(parent) = self.path.parent() {
			fs::create_dir_all(parent)?;
		}

		let content = toml::to_string(session)
			.map_err(|e| anyhow!("failed to serialize session: {}", e))?;
		fs::write(&self.path, content)?;
		restrict_permissions(&self.path)?;

		debug!("saved session to {}", self.path.display());
		Ok(())
	}

	/// Forgets the stored session. Returns whether there was one.
	pub fn clear(&self) -> Result<bool, Error> {
		match fs::remove_file(&self.path) {
			Ok(()) => Ok(true),
			Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
			Err(e) => Err(e.into()),
		}
	}
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<(), Error> {
	use std::os::unix::fs::PermissionsExt;
	fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
	Ok(())
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<(), Error> {
	Ok(())
}
