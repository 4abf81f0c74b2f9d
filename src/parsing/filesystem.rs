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
use crate::auth::session::SessionStore;
use crate::config::config_file::Config;
use anyhow::{anyhow, bail, Error};
use dirs::home_dir;
use serde::de::DeserializeOwned;
use std::fs;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::Command;

const CONFIG_DIR: &str = ".config/ceramr";
const CONFIG_FILE: &str = "config.toml";
const SESSION_FILE: &str = "session.toml";

/// Everything this tool reads from or keeps on disk: its config, the
/// session, and the forms and exports the user points it at.
pub struct Filesystem {
	/// Set by `--config`; the session is kept beside it
	custom_config_path: Option<PathBuf>,
}

impl Filesystem {
	pub fn new(custom_config_path: Option<&String>) -> Self {
		Self {
			custom_config_path: custom_config_path.map(PathBuf::from),
		}
	}

	fn config_dir(&self) -> Result<PathBuf, Error> {
		match &self.custom_config_path {
			Some(p) => Ok(p
				.parent()
				.map(Path::to_path_buf)
				.unwrap_or_default()),
			None => home_dir()
				.map(|home| home.join(CONFIG_DIR))
				.ok_or_else(|| anyhow!("Unable to determine home directory")),
		}
	}

	pub fn session_store(&self) -> Result<SessionStore, Error> {
		Ok(SessionStore::new(self.config_dir()?.join(SESSION_FILE)))
	}

	/// Reads a TOML form, such as a piece to price or a sale to record.
	pub fn read_toml<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
		let content = fs::read_to_string(path)
			.map_err(|e| anyhow!("failed to read {}: {}", path, e))?;
		toml::from_str(&content)
			.map_err(|e| anyhow!("failed to parse {}: {}", path, e))
	}

	/// Reads a JSON document, such as an exported history.
	pub fn read_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
		let content = fs::read_to_string(path)
			.map_err(|e| anyhow!("failed to read {}: {}", path, e))?;
		serde_json::from_str(&content)
			.map_err(|e| anyhow!("failed to parse {}: {}", path, e))
	}

	/// Fetches the config from the custom path, or default path if none.
	/// The boolean argument indicates whether it is necessary to inspect
	/// the config for authentication, i.e. for signing in or out.
	pub fn get_config(&self, expand_auth: bool) -> Result<Config, Error> {
		let config_path = match &self.custom_config_path {
			Some(p) => p.clone(),
			None => self.config_dir()?.join(CONFIG_FILE),
		};

		// create empty config file if it doesn't exist
		if !config_path.exists() && self.custom_config_path.is_none() {
			if let Some(parent) = config_path.parent() {
				fs::create_dir_all(parent)?;
			}
			File::create(&config_path)?;
		}

		let content = fs::read_to_string(&config_path)?;
		let mut config: Config = toml::from_str(&content)
			.map_err(|e| anyhow!("failed to parse config: {}", e))?;

		// Execute anon_key_cmd if applicable, and put result in anon_key
		if !expand_auth {
			return Ok(config);
		}

		if let Some(auth) = &mut config.auth {
			if auth.anon_key_cmd.is_some() && auth.anon_key.is_some() {
				bail!("Only one of auth.anon_key and auth.anon_key_cmd may be specified")
			}

			if let Some(cmd) = &auth.anon_key_cmd {
				auth.anon_key = Some(run_secret_cmd(cmd)?);
			}
		}

		Ok(config)
	}
}

/// Runs a shell command that prints a secret, e.g. from a password manager.
fn run_secret_cmd(cmd: &str) -> Result<String, Error> {
	let output = Command::new("sh")
		.arg("-c")
		.arg(cmd)
		.output()
		.map_err(|e| anyhow!("failed to execute anon_key_cmd: {}", e))?;

	if !output.status.success() {
		bail!(
			"anon_key_cmd failed with status {}: {}",
			output.status,
			String::from_utf8_lossy(&output.stderr)
		);
	}

	Ok(String::from_utf8(output.stdout)
		.map_err(|e| anyhow!("failed to parse command output: {}", e))?
		.trim()
		.to_string())
}

#[cfg(test)]
mod tests {
	use super::*;
	use tempfile::TempDir;

	fn write(dir: &TempDir, name: &str, content: &str) -> String {
		let path = dir.path().join(name);
		fs::write(&path, content).unwrap();
		path.to_string_lossy().to_string()
	}

	#[test]
	fn test_custom_config() {
		let dir = TempDir::new().unwrap();
		let path = write(
			&dir,
			"config.toml",
			"[api]\nurl = \"https://pricing.example.com\"\n\n[auth]\nurl = \"https://id.example.com\"\nanon_key = \"anon\"\n",
		);

		let fs = Filesystem::new(Some(&path));
		let config = fs.get_config(true).unwrap();
		assert_eq!(
			config.api.unwrap().url.as_deref(),
			Some("https://pricing.example.com")
		);
		assert_eq!(config.auth.unwrap().anon_key.as_deref(), Some("anon"));
	}

	#[test]
	fn test_missing_custom_config_is_an_error() {
		let dir = TempDir::new().unwrap();
		let path = dir.path().join("absent.toml").to_string_lossy().to_string();
		assert!(Filesystem::new(Some(&path)).get_config(false).is_err());
	}

	#[cfg(unix)]
	#[test]
	fn test_anon_key_cmd() {
		let dir = TempDir::new().unwrap();
		let path =
			write(&dir, "config.toml", "[auth]\nanon_key_cmd = \"echo ' s3cret '\"\n");

		let fs = Filesystem::new(Some(&path));
		assert_eq!(
			fs.get_config(false).unwrap().auth.unwrap().anon_key,
			None
		);
		assert_eq!(
			fs.get_config(true).unwrap().auth.unwrap().anon_key.as_deref(),
			Some("s3cret")
		);
	}

	#[cfg(unix)]
	#[test]
	fn test_failing_anon_key_cmd() {
		let dir = TempDir::new().unwrap();
		let path = write(&dir, "config.toml", "[auth]\nanon_key_cmd = \"exit 3\"\n");
		assert!(Filesystem::new(Some(&path)).get_config(true).is_err());
	}

	#[test]
	fn test_both_anon_key_forms_rejected() {
		let dir = TempDir::new().unwrap();
		let path = write(
			&dir,
			"config.toml",
			"[auth]\nanon_key = \"a\"\nanon_key_cmd = \"echo b\"\n",
		);
		assert!(Filesystem::new(Some(&path)).get_config(true).is_err());
	}

	#[test]
	fn test_session_beside_custom_config() {
		let dir = TempDir::new().unwrap();
		let path = write(&dir, "config.toml", "");
		let fs = Filesystem::new(Some(&path));

		let store = fs.session_store().unwrap();
		assert_eq!(store.load().unwrap(), None);
	}

	#[test]
	fn test_read_forms() {
		let dir = TempDir::new().unwrap();
		let fs = Filesystem::new(None);

		let path = write(&dir, "form.toml", "value = 3\n");
		let form: toml::Value = fs.read_toml(&path).unwrap();
		assert_eq!(form["value"].as_integer(), Some(3));

		let path = write(&dir, "broken.toml", "value = \n");
		let err = fs.read_toml::<toml::Value>(&path).unwrap_err();
		assert!(err.to_string().contains("failed to parse"));

		let path = write(&dir, "export.json", r#"{"count": 0}"#);
		let doc: serde_json::Value = fs.read_json(&path).unwrap();
		assert_eq!(doc["count"], 0);

		assert!(fs.read_json::<serde_json::Value>("/nonexistent/x.json").is_err());
	}
}
