//! Streaming resource loader with bounded retry.
//!
//! Each `loadNetworkResource` request becomes one load task that streams
//! body chunks into the frontend stream as they arrive and reports a single
//! terminal response when the fetch is over. Only resource exhaustion is
//! retried, with a growing delay; every other failure completes the load on
//! first occurrence. The [`LoaderRegistry`] tracks every in-flight load so
//! embedders can observe what the frontend still has outstanding.
//!
//! Retry timing: the first retry waits [`INITIAL_BACKOFF_DELAY`], each
//! further retry multiplies the previous delay by 1.3, and the load turns
//! terminal once the next delay would exceed [`MAX_BACKOFF_DELAY`].

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use dashmap::DashMap;
use dte_protocol::{DEFAULT_SUCCESS_STATUS, HeaderEntry, LoadResponse, StreamChunk};
use futures_util::StreamExt;
use tokio::time::sleep;
use tracing::{debug, warn};
use url::Url;

use crate::channel::MessageChannel;
use crate::error::Result;
use crate::fetch::{FetchRequest, FetchResponse, ResourceFetcher};

/// Delay before the first retry.
pub const INITIAL_BACKOFF_DELAY: Duration = Duration::from_millis(250);

/// No retry is scheduled once the computed delay would exceed this.
pub const MAX_BACKOFF_DELAY: Duration = Duration::from_secs(10);

const BACKOFF_MULTIPLIER: f64 = 1.3;

/// The delay to wait before the retry following one that waited `previous`.
pub fn next_backoff_delay(previous: Duration) -> Duration {
	if previous.is_zero() {
		INITIAL_BACKOFF_DELAY
	} else {
		previous.mul_f64(BACKOFF_MULTIPLIER)
	}
}

/// One in-flight resource load as the registry sees it.
#[derive(Debug, Clone)]
pub struct PendingLoad {
	pub stream_id: u64,
	pub url: String,
	pub headers: Vec<(String, String)>,
	/// The delay the most recent retry waited; zero before any retry.
	pub retry_delay: Duration,
}

/// All in-flight loads, keyed per load rather than per stream so a retry
/// never clobbers an unrelated load that reused the stream id.
#[derive(Debug, Default)]
pub struct LoaderRegistry {
	next_token: AtomicU64,
	loads: DashMap<u64, PendingLoad>,
}

impl LoaderRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn len(&self) -> usize {
		self.loads.len()
	}

	pub fn is_empty(&self) -> bool {
		self.loads.is_empty()
	}

	/// Snapshot of the in-flight loads, in no particular order.
	pub fn pending(&self) -> Vec<PendingLoad> {
		self.loads.iter().map(|entry| entry.value().clone()).collect()
	}

	fn register(&self, load: PendingLoad) -> u64 {
		let token = self.next_token.fetch_add(1, Ordering::Relaxed);
		self.loads.insert(token, load);
		token
	}

	fn record_retry(&self, token: u64, retry_delay: Duration) {
		if let Some(mut entry) = self.loads.get_mut(&token) {
			entry.retry_delay = retry_delay;
		}
	}

	/// Removes the load at terminal completion. Called exactly once per
	/// registered load.
	fn complete(&self, token: u64) {
		self.loads.remove(&token);
	}
}

/// Invoked once with the terminal response of a load.
pub type LoadCallback = Box<dyn FnOnce(LoadResponse) + Send>;

/// Entry point for frontend resource loads.
pub struct ResourceLoader;

impl ResourceLoader {
	/// Starts loading `url` into frontend stream `stream_id`.
	///
	/// An unparseable URL completes synchronously with a 404 and is never
	/// registered. Everything else registers with `registry` and runs as a
	/// spawned task that streams body chunks through `channel` and finally
	/// invokes `on_complete`.
	pub fn start(
		stream_id: u64,
		url: &str,
		headers: Vec<(String, String)>,
		fetcher: Arc<dyn ResourceFetcher>,
		channel: Arc<MessageChannel>,
		registry: Arc<LoaderRegistry>,
		on_complete: LoadCallback,
	) {
		let Ok(parsed) = Url::parse(url) else {
			debug!(target = "dte.loader", url, "rejecting unparseable resource url");
			on_complete(LoadResponse::not_found());
			return;
		};
		let token = registry.register(PendingLoad {
			stream_id,
			url: url.to_owned(),
			headers: headers.clone(),
			retry_delay: Duration::ZERO,
		});
		debug!(target = "dte.loader", stream_id, url, "starting resource load");
		let task = LoadTask {
			token,
			stream_id,
			url: parsed,
			headers,
			fetcher,
			channel,
			registry,
		};
		tokio::spawn(task.run(on_complete));
	}
}

struct LoadTask {
	token: u64,
	stream_id: u64,
	url: Url,
	headers: Vec<(String, String)>,
	fetcher: Arc<dyn ResourceFetcher>,
	channel: Arc<MessageChannel>,
	registry: Arc<LoaderRegistry>,
}

/// Outcome of a single fetch attempt. `status` and `headers` hold whatever
/// arrived before a mid-stream failure, so a terminal error still reports
/// the head the server sent.
struct Attempt {
	status: Option<u16>,
	headers: Vec<(String, String)>,
	result: Result<()>,
}

impl LoadTask {
	async fn run(self, on_complete: LoadCallback) {
		let mut delay = Duration::ZERO;
		loop {
			if !delay.is_zero() {
				sleep(delay).await;
			}
			let attempt = self.attempt().await;
			if let Err(err) = &attempt.result {
				if err.is_resource_exhaustion() {
					let next = next_backoff_delay(delay);
					if next <= MAX_BACKOFF_DELAY {
						delay = next;
						warn!(
							target = "dte.loader",
							stream_id = self.stream_id,
							url = %self.url,
							delay_ms = delay.as_millis() as u64,
							"fetch hit resource exhaustion, retrying"
						);
						self.registry.record_retry(self.token, delay);
						continue;
					}
					warn!(
						target = "dte.loader",
						stream_id = self.stream_id,
						url = %self.url,
						"retry delay limit reached, completing load"
					);
				} else {
					debug!(
						target = "dte.loader",
						stream_id = self.stream_id,
						url = %self.url,
						error = %err,
						"fetch failed, completing load"
					);
				}
			}
			let response = LoadResponse::new(
				attempt.status.unwrap_or(DEFAULT_SUCCESS_STATUS),
				attempt
					.headers
					.iter()
					.map(|(name, value)| HeaderEntry::new(name.as_str(), value.as_str()))
					.collect(),
			);
			self.registry.complete(self.token);
			on_complete(response);
			return;
		}
	}

	async fn attempt(&self) -> Attempt {
		let request = FetchRequest {
			url: self.url.clone(),
			headers: self.headers.clone(),
		};
		let response = match self.fetcher.fetch(request).await {
			Ok(response) => response,
			Err(err) => {
				return Attempt {
					status: None,
					headers: Vec::new(),
					result: Err(err),
				};
			}
		};
		let FetchResponse {
			status,
			headers,
			mut body,
		} = response;
		while let Some(chunk) = body.next().await {
			match chunk {
				Ok(bytes) => self.stream(&bytes),
				Err(err) => {
					return Attempt {
						status,
						headers,
						result: Err(err),
					};
				}
			}
		}
		Attempt {
			status,
			headers,
			result: Ok(()),
		}
	}

	/// Streams one arrival into the frontend, re-splitting anything wider
	/// than the channel's chunk budget. Each piece classifies itself as
	/// text or base64 independently.
	fn stream(&self, bytes: &[u8]) {
		for piece in bytes.chunks(self.channel.max_chunk_size()) {
			self.channel
				.stream_write(self.stream_id, &StreamChunk::from_bytes(piece));
		}
	}
}
