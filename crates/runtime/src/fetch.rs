//! Resource fetch seam behind the frontend's `loadNetworkResource`.
//!
//! The loader never talks to the network directly; it goes through
//! [`ResourceFetcher`] so embedders can reroute, stub, or fence requests.
//! Two stock implementations ship here: [`HttpFetcher`] over reqwest and
//! [`FileFetcher`] for `file:` URLs. Both stream their bodies so a large
//! source map never has to sit in memory whole.

use std::future::Future;
use std::pin::Pin;

use futures_util::stream::{self, Stream, StreamExt};
use tokio::fs::File;
use tokio::io::AsyncReadExt;
use url::Url;

use crate::error::{Error, Result};

const FILE_READ_CHUNK: usize = 64 * 1024;

/// A single resource request on behalf of the frontend.
#[derive(Debug, Clone)]
pub struct FetchRequest {
	pub url: Url,
	/// Request headers as given by the frontend, order preserved.
	pub headers: Vec<(String, String)>,
}

/// Body bytes as they arrive from the underlying source.
pub type BodyStream = Pin<Box<dyn Stream<Item = Result<Vec<u8>>> + Send>>;

/// Response head plus a streaming body.
pub struct FetchResponse {
	/// Protocol status code when the source has one; `None` for sources
	/// like local files that succeed or fail without a code.
	pub status: Option<u16>,
	/// Response headers, duplicates preserved in arrival order.
	pub headers: Vec<(String, String)>,
	pub body: BodyStream,
}

impl std::fmt::Debug for FetchResponse {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("FetchResponse")
			.field("status", &self.status)
			.field("headers", &self.headers)
			.finish_non_exhaustive()
	}
}

/// Fetches frontend-requested resources.
pub trait ResourceFetcher: Send + Sync {
	fn fetch(
		&self,
		request: FetchRequest,
	) -> Pin<Box<dyn Future<Output = Result<FetchResponse>> + Send + '_>>;
}

/// Fetches over HTTP(S) with a shared reqwest client.
pub struct HttpFetcher {
	client: reqwest::Client,
}

impl HttpFetcher {
	pub fn new(client: reqwest::Client) -> Self {
		Self { client }
	}
}

impl Default for HttpFetcher {
	fn default() -> Self {
		Self::new(reqwest::Client::new())
	}
}

impl ResourceFetcher for HttpFetcher {
	fn fetch(
		&self,
		request: FetchRequest,
	) -> Pin<Box<dyn Future<Output = Result<FetchResponse>> + Send + '_>> {
		Box::pin(async move {
			let mut builder = self.client.get(request.url.clone());
			for (name, value) in &request.headers {
				builder = builder.header(name.as_str(), value.as_str());
			}
			let response = builder.send().await?;
			let status = Some(response.status().as_u16());
			let headers = response
				.headers()
				.iter()
				.map(|(name, value)| {
					(
						name.as_str().to_owned(),
						String::from_utf8_lossy(value.as_bytes()).into_owned(),
					)
				})
				.collect();
			let body: BodyStream = Box::pin(
				response
					.bytes_stream()
					.map(|chunk| chunk.map(|bytes| bytes.to_vec()).map_err(Error::Http)),
			);
			Ok(FetchResponse {
				status,
				headers,
				body,
			})
		})
	}
}

/// Reads `file:` URLs off the local filesystem.
#[derive(Default)]
pub struct FileFetcher;

impl ResourceFetcher for FileFetcher {
	fn fetch(
		&self,
		request: FetchRequest,
	) -> Pin<Box<dyn Future<Output = Result<FetchResponse>> + Send + '_>> {
		Box::pin(async move {
			let path = request
				.url
				.to_file_path()
				.map_err(|()| Error::InvalidUrl(request.url.to_string()))?;
			let file = File::open(&path).await?;
			let body: BodyStream = Box::pin(stream::unfold(Some(file), |state| async move {
				let mut file = state?;
				let mut buf = vec![0u8; FILE_READ_CHUNK];
				match file.read(&mut buf).await {
					Ok(0) => None,
					Ok(n) => {
						buf.truncate(n);
						Some((Ok(buf), Some(file)))
					}
					Err(err) => Some((Err(Error::Io(err)), None)),
				}
			}));
			Ok(FetchResponse {
				status: None,
				headers: Vec::new(),
				body,
			})
		})
	}
}

/// Parses the newline-separated `Name: value` header block the frontend
/// sends alongside `loadNetworkResource`. Lines without a colon or without
/// a name are skipped.
pub fn parse_header_block(raw: &str) -> Vec<(String, String)> {
	raw.lines()
		.filter_map(|line| {
			let (name, value) = line.split_once(':')?;
			let name = name.trim();
			if name.is_empty() {
				return None;
			}
			Some((name.to_owned(), value.trim().to_owned()))
		})
		.collect()
}
