// std
use std::sync::Mutex;
// self
use oauth2_orcid::{
	_preludet::*,
	error::TransportError,
	http::UserInfoHttpClient,
	oauth2::{
		AsyncHttpClient, HttpClientError, HttpRequest, HttpResponse,
		http::{StatusCode, header::AUTHORIZATION},
	},
};

#[derive(Debug)]
struct FakeTransportError;
impl Display for FakeTransportError {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "Fake transport failure.")
	}
}
impl StdError for FakeTransportError {}

#[derive(Clone, Copy)]
enum Reply {
	Json(&'static str),
	Fail,
}

/// Records every request and answers with a canned reply.
#[derive(Clone)]
struct FakeHttpClient {
	reply: Reply,
	requests: Arc<Mutex<Vec<HttpRequest>>>,
}
impl FakeHttpClient {
	fn new(reply: Reply) -> Self {
		Self { reply, requests: Default::default() }
	}

	fn recorded(&self) -> Vec<(String, String, Option<String>)> {
		self.requests
			.lock()
			.expect("Request log should not be poisoned.")
			.iter()
			.map(|request| {
				(
					request.method().to_string(),
					request.uri().to_string(),
					request
						.headers()
						.get(AUTHORIZATION)
						.and_then(|value| value.to_str().ok())
						.map(str::to_owned),
				)
			})
			.collect()
	}
}
impl UserInfoHttpClient for FakeHttpClient {
	type Handle = FakeHttpHandle;
	type TransportError = FakeTransportError;

	fn handle(&self) -> Self::Handle {
		FakeHttpHandle(self.clone())
	}
}

struct FakeHttpHandle(FakeHttpClient);
impl<'a> AsyncHttpClient<'a> for FakeHttpHandle {
	type Error = HttpClientError<FakeTransportError>;
	type Future =
		Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'a + Send + Sync>>;

	fn call(&'a self, request: HttpRequest) -> Self::Future {
		let client = self.0.clone();

		Box::pin(async move {
			client.requests.lock().expect("Request log should not be poisoned.").push(request);

			match client.reply {
				Reply::Json(body) => {
					let mut response = HttpResponse::new(body.as_bytes().to_vec());

					*response.status_mut() = StatusCode::OK;

					Ok(response)
				},
				Reply::Fail => Err(HttpClientError::Reqwest(Box::new(FakeTransportError))),
			}
		})
	}
}

#[tokio::test]
async fn fetch_issues_exactly_one_bearer_get() {
	let http = FakeHttpClient::new(Reply::Json("{\"sub\":\"0000-0001\",\"name\":\"Ada Lovelace\"}"));
	let provider = build_test_provider("https://orcid.example/oauth/userinfo");
	let body = provider
		.fetch_user_info(&http, &test_tokens("token-abc"))
		.await
		.expect("Fake transport should succeed.");

	assert_eq!(body, serde_json::json!({ "sub": "0000-0001", "name": "Ada Lovelace" }));
	assert_eq!(
		http.recorded(),
		vec![(
			"GET".to_owned(),
			"https://orcid.example/oauth/userinfo".to_owned(),
			Some("Bearer token-abc".to_owned()),
		)]
	);
}

#[tokio::test]
async fn identity_flows_through_custom_transport() {
	let http = FakeHttpClient::new(Reply::Json("{\"sub\":\"0000-0001\",\"name\":\"Ada Lovelace\"}"));
	let provider = build_test_provider("https://orcid.example/oauth/userinfo");
	let identity = provider
		.user_identity(&http, &test_tokens("token-abc"))
		.await
		.expect("Identity should be produced.");

	assert_eq!(identity.id, "0000-0001");
	assert_eq!(identity.name, "Ada Lovelace");
	assert_eq!(identity.url, "https://orcid.org/0000-0001");
	assert_eq!(http.recorded().len(), 1);
}

#[tokio::test]
async fn transport_failure_is_not_retried() {
	let http = FakeHttpClient::new(Reply::Fail);
	let provider = build_test_provider("https://orcid.example/oauth/userinfo");
	let err = provider
		.fetch_user_info(&http, &test_tokens("token-abc"))
		.await
		.expect_err("Transport failures must propagate.");

	assert!(matches!(err, Error::Transport(TransportError::Network { .. })));
	assert_eq!(http.recorded().len(), 1, "Failed requests must not be retried.");
}

#[tokio::test]
async fn provider_is_shareable_across_tasks() {
	let http = Arc::new(FakeHttpClient::new(Reply::Json("{\"sub\":\"0000-0001\"}")));
	let provider = Arc::new(build_test_provider("https://orcid.example/oauth/userinfo"));
	let tasks = (0..4)
		.map(|idx| {
			let http = Arc::clone(&http);
			let provider = Arc::clone(&provider);

			tokio::spawn(async move {
				provider
					.fetch_user_info(http.as_ref(), &test_tokens(&format!("token-{idx}")))
					.await
					.map(|_| ())
					.map_err(|err| err.to_string())
			})
		})
		.collect::<Vec<_>>();

	for task in tasks {
		task.await.expect("Task should not panic.").expect("Fetch should succeed.");
	}

	let mut headers =
		http.recorded().into_iter().filter_map(|(_, _, auth)| auth).collect::<Vec<_>>();

	headers.sort();

	assert_eq!(headers, vec!["Bearer token-0", "Bearer token-1", "Bearer token-2", "Bearer token-3"]);
}
