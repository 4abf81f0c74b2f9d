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
use log::{debug, info};
use reqwest::blocking::{RequestBuilder, Response};
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
	#[error("not authenticated; run 'ceramr login <email>' to sign in again")]
	Unauthorized,

	#[error("request failed with status {status}: {detail}")]
	Status { status: u16, detail: String },

	#[error("request failed: {0}")]
	Transport(#[from] reqwest::Error),
}

/// Thin JSON-over-HTTP client bound to one base URL. Credentials are
/// attached per client: a bearer token for calls made on behalf of a user,
/// and/or a public API key for services that want one on every request.
pub struct Client {
	client: reqwest::blocking::Client,
	base_url: String,
	bearer: Option<String>,
	api_key: Option<String>,
}

impl Client {
	pub fn new(base_url: &str) -> Self {
		Client {
			client: reqwest::blocking::Client::new(),
			base_url: base_url.trim_end_matches('/').to_string(),
			bearer: None,
			api_key: None,
		}
	}

	pub fn with_bearer(mut self, token: &str) -> Self {
		self.bearer = Some(token.to_string());
		self
	}

	pub fn with_api_key(mut self, key: &str) -> Self {
		self.api_key = Some(key.to_string());
		self
	}

	pub fn url(&self, endpoint: &str) -> String {
		format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
	}

	/// Sends a GET and decodes the JSON response. Errors on non-2xx
	/// response codes.
	pub fn get<R>(&self, endpoint: &str) -> Result<R, ApiError>
	where
		R: for<'de> Deserialize<'de>,
	{
		let request = self.request(Method::GET, endpoint);
		Ok(self.send(request)?.json()?)
	}

	/// Sends a POST with a JSON body and decodes the JSON response.
	pub fn post<B, R>(&self, endpoint: &str, body: &B) -> Result<R, ApiError>
	where
		B: Serialize,
		R: for<'de> Deserialize<'de>,
	{
		let request = self.request(Method::POST, endpoint).json(body);
		Ok(self.send(request)?.json()?)
	}

	/// Sends a POST whose response body, if any, is of no interest.
	pub fn post_discard<B: Serialize>(
		&self,
		endpoint: &str,
		body: Option<&B>,
	) -> Result<(), ApiError> {
		let mut request = self.request(Method::POST, endpoint);
		if let Some(body) = body {
			request = request.json(body);
		}

		self.send(request)?;
		Ok(())
	}

	fn request(&self, method: Method, endpoint: &str) -> RequestBuilder {
		let url = self.url(endpoint);
		info!("Sending {} to {}", method, url);

		let mut request = self.client.request(method, &url);
		if let Some(token) = &self.bearer {
			request =
				request.header("Authorization", format!("Bearer {}", token));
		}
		if let Some(key) = &self.api_key {
			request = request.header("apikey", key);
		}
		request
	}

	fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
		let response = request.send()?;
		let status = response.status();
		debug!("Received {}", status);

		if status.is_success() {
			return Ok(response);
		}

		if status == StatusCode::UNAUTHORIZED {
			return Err(ApiError::Unauthorized);
		}

		let body = response.text().unwrap_or_default();
		Err(ApiError::Status {
			status: status.as_u16(),
			detail: error_detail(&body)
				.unwrap_or_else(|| fallback_detail(status, &body)),
		})
	}
}

/// Pulls a human-readable message out of an error body. The pricing API
/// reports `detail`; the identity provider uses one of the others.
fn error_detail(body: &str) -> Option<String> {
	let value: serde_json::Value = serde_json::from_str(body).ok()?;

	["detail", "error_description", "msg", "message", "error"]
		.iter()
		.find_map(|key| match value.get(key)? {
			serde_json::Value::String(s) => Some(s.clone()),
			serde_json::Value::Null => None,
			other => Some(other.to_string()),
		})
}

fn fallback_detail(status: StatusCode, body: &str) -> String {
	let body = body.trim();
	if body.is_empty() {
		status.canonical_reason().unwrap_or("unknown error").to_string()
	} else {
		body.to_string()
	}
}

#[cfg(test)]
pub(crate) mod test_server {
	use std::io::{BufRead, BufReader, Read, Write};
	use std::net::TcpListener;
	use std::sync::mpsc::{channel, Receiver};
	use std::thread;

	/// Serves exactly one canned HTTP response on a local port. Returns the
	/// base URL and a receiver yielding the raw request that was received.
	pub fn serve_once(
		status_line: &str,
		body: &str,
	) -> (String, Receiver<String>) {
		let listener = TcpListener::bind("127.0.0.1:0").unwrap();
		let addr = listener.local_addr().unwrap();
		let response = format!(
			"HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
			status_line,
			body.len(),
			body
		);
		let (tx, rx) = channel();

		thread::spawn(move || {
			let (stream, _) = listener.accept().unwrap();
			let mut reader = BufReader::new(stream);

			let mut request = String::new();
			let mut content_length = 0;
			loop {
				let mut line = String::new();
				if reader.read_line(&mut line).unwrap() == 0 {
					break;
				}
				let lower = line.to_ascii_lowercase();
				if let Some(v) = lower.strip_prefix("content-length:") {
					content_length = v.trim().parse().unwrap();
				}
				request.push_str(&line);
				if line == "\r\n" {
					break;
				}
			}

			let mut body = vec![0; content_length];
			reader.read_exact(&mut body).unwrap();
			request.push_str(&String::from_utf8_lossy(&body));

			let mut stream = reader.into_inner();
			stream.write_all(response.as_bytes()).unwrap();
			stream.flush().unwrap();
			let _ = tx.send(request);
		});

		(format!("http://{}", addr), rx)
	}
}
