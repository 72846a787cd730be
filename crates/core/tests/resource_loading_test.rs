//! End-to-end `loadNetworkResource` coverage: file and HTTP fetches
//! streaming through the channel, terminal acks, and teardown behavior.

mod support;

use std::sync::Arc;

use dte::{Session, SessionBuilder};
use serde_json::json;
use support::{FakeAgentHost, FakeFactory, FakeFrontend, wait_until};
use url::Url;

fn shown_session(
	configure: impl FnOnce(SessionBuilder) -> SessionBuilder,
) -> (Arc<Session>, Arc<FakeFrontend>) {
	let doc = FakeFrontend::new();
	let host = FakeAgentHost::new();
	let builder = SessionBuilder::new(host).frontend_factory(FakeFactory::new(doc.clone()));
	let session = configure(builder).build();
	doc.attach_session(&session);
	session.show(true);
	(session, doc)
}

fn load_envelope(id: i64, url: &str, headers: &str, stream_id: u64) -> String {
	json!({
		"id": id,
		"method": "loadNetworkResource",
		"params": [url, headers, stream_id],
	})
	.to_string()
}

#[test]
fn unparsable_urls_fail_synchronously() {
	let (session, doc) = shown_session(|b| b);
	session.handle_frontend_message(&load_envelope(7, "not a url", "", 42));

	assert_eq!(doc.acks(), vec![(7, json!({"statusCode": 404}))]);
	assert!(doc.stream_writes().is_empty());
	assert!(session.loaders().is_empty());
}

#[tokio::test]
async fn file_resources_stream_and_ack() {
	let dir = tempfile::tempdir().expect("temp dir");
	let path = dir.path().join("bundle.js.map");
	std::fs::write(&path, "{\"version\":3,\"sources\":[]}").expect("write fixture");
	let url = Url::from_file_path(&path).expect("file url");

	let (session, doc) = shown_session(|b| b);
	session.handle_frontend_message(&load_envelope(11, url.as_str(), "", 3));
	wait_until("load ack", || !doc.acks().is_empty()).await;

	assert_eq!(doc.acks(), vec![(
		11,
		json!({"statusCode": 200, "headers": []})
	)]);
	assert_eq!(doc.stream_writes(), vec![(
		3,
		"{\"version\":3,\"sources\":[]}".to_owned(),
		false
	)]);
	assert!(session.loaders().is_empty());
}

#[tokio::test]
async fn http_resources_carry_status_headers_and_body() {
	let app = axum::Router::new().route(
		"/theme.css",
		axum::routing::get(|headers: axum::http::HeaderMap| async move {
			let echoed = headers
				.get("x-devtools-probe")
				.and_then(|value| value.to_str().ok())
				.unwrap_or_default()
				.to_owned();
			axum::http::Response::builder()
				.status(200)
				.header("set-cookie", "a=1")
				.header("set-cookie", "b=2")
				.header("x-echo", echoed)
				.body(axum::body::Body::from("body { margin: 0 }"))
				.expect("response")
		}),
	);
	let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
		.await
		.expect("bind");
	let addr = listener.local_addr().expect("local addr");
	tokio::spawn(async move {
		axum::serve(listener, app.into_make_service()).await.ok();
	});

	let (session, doc) = shown_session(|b| b);
	session.handle_frontend_message(&load_envelope(
		15,
		&format!("http://{addr}/theme.css"),
		"X-DevTools-Probe: yes\n",
		4,
	));
	wait_until("load ack", || !doc.acks().is_empty()).await;

	let acks = doc.acks();
	let (id, result) = &acks[0];
	assert_eq!(*id, 15);
	assert_eq!(result["statusCode"], 200);
	let headers = result["headers"].as_array().expect("header array");
	assert!(headers.contains(&json!({"name": "set-cookie", "value": "a=1"})));
	assert!(headers.contains(&json!({"name": "set-cookie", "value": "b=2"})));
	assert!(headers.contains(&json!({"name": "x-echo", "value": "yes"})));
	// The body may arrive in one network chunk or several; only the
	// reassembly is guaranteed.
	let mut body = String::new();
	for (stream_id, data, encoded) in doc.stream_writes() {
		assert_eq!(stream_id, 4);
		assert!(!encoded);
		body.push_str(&data);
	}
	assert_eq!(body, "body { margin: 0 }");
	assert!(session.loaders().is_empty());
}

#[tokio::test]
async fn missing_files_resolve_without_streaming() {
	let (session, doc) = shown_session(|b| b);
	session.handle_frontend_message(&load_envelope(
		13,
		"file:///definitely/not/here.map",
		"",
		9,
	));
	wait_until("load ack", || !doc.acks().is_empty()).await;

	assert_eq!(doc.acks(), vec![(
		13,
		json!({"statusCode": 200, "headers": []})
	)]);
	assert!(doc.stream_writes().is_empty());
	assert!(session.loaders().is_empty());
}

#[tokio::test]
async fn concurrent_loads_keep_their_streams_apart() {
	let dir = tempfile::tempdir().expect("temp dir");
	let path_a = dir.path().join("a.txt");
	let path_b = dir.path().join("b.txt");
	std::fs::write(&path_a, "alpha contents").expect("write a");
	std::fs::write(&path_b, "beta contents").expect("write b");
	let url_a = Url::from_file_path(&path_a).expect("url a");
	let url_b = Url::from_file_path(&path_b).expect("url b");

	let (session, doc) = shown_session(|b| b);
	session.handle_frontend_message(&load_envelope(21, url_a.as_str(), "", 5));
	session.handle_frontend_message(&load_envelope(22, url_b.as_str(), "", 6));
	wait_until("both acks", || doc.acks().len() == 2).await;

	let acks = doc.acks();
	for wanted in [21, 22] {
		let (_, result) = acks
			.iter()
			.find(|(id, _)| *id == wanted)
			.expect("ack for load");
		assert_eq!(result["statusCode"], 200);
	}
	let writes = doc.stream_writes();
	assert!(writes.contains(&(5, "alpha contents".to_owned(), false)));
	assert!(writes.contains(&(6, "beta contents".to_owned(), false)));
	assert!(session.loaders().is_empty());
}

#[tokio::test]
async fn loads_pending_at_close_are_discarded() {
	let dir = tempfile::tempdir().expect("temp dir");
	let path = dir.path().join("late.txt");
	std::fs::write(&path, "never delivered").expect("write fixture");
	let url = Url::from_file_path(&path).expect("file url");

	let (session, doc) = shown_session(|b| b);
	session.handle_frontend_message(&load_envelope(31, url.as_str(), "", 7));
	session.close();
	wait_until("pending load to drain", || session.loaders().is_empty()).await;

	assert!(doc.acks().is_empty());
	assert!(doc.stream_writes().is_empty());
}

#[tokio::test]
async fn chunk_size_override_splits_streamed_data() {
	let dir = tempfile::tempdir().expect("temp dir");
	let path = dir.path().join("digits.txt");
	std::fs::write(&path, "0123456789").expect("write fixture");
	let url = Url::from_file_path(&path).expect("file url");

	let (session, doc) = shown_session(|b| b.max_chunk_size(4));
	session.handle_frontend_message(&load_envelope(41, url.as_str(), "", 8));
	wait_until("load ack", || !doc.acks().is_empty()).await;

	assert_eq!(doc.stream_writes(), vec![
		(8, "0123".to_owned(), false),
		(8, "4567".to_owned(), false),
		(8, "89".to_owned(), false),
	]);
}
