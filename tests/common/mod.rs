#![allow(dead_code)]
use async_trait::async_trait;
use http_client::{Error, HttpClient, Request, Response};
use http_types::{StatusCode, Url};
use lastfm_ws::{Credentials, LastFmClient};
use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, Mutex};

pub const API_KEY: &str = "b25b959554ed76058ac220b7b2e0a026";
pub const API_SECRET: &str = "425b55975eed76058ac220b7b2e0a026";
pub const SESSION_KEY: &str = "d580d57f32848f5dcf574d1ce18d78b2";

/// A request as seen by the fake transport.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub url: Url,
    pub content_type: Option<String>,
    pub body: String,
}

impl RecordedRequest {
    /// Decoded wire parameters, from the query string for GET and the form body for POST.
    pub fn params(&self) -> BTreeMap<String, String> {
        if self.method == "GET" {
            self.url.query_pairs().into_owned().collect()
        } else {
            let mut form = Url::parse("http://form.invalid/").expect("static url");
            form.set_query(Some(&self.body));
            form.query_pairs().into_owned().collect()
        }
    }
}

#[derive(Debug)]
enum Canned {
    Body(StatusCode, String),
    Failure(String),
}

#[derive(Debug, Default)]
struct FakeState {
    responses: VecDeque<Canned>,
    requests: Vec<RecordedRequest>,
}

/// In-memory transport that replays canned bodies in order and records every request.
///
/// Clones share state, so keep one handle for assertions and box another into the client.
#[derive(Debug, Clone, Default)]
pub struct FakeHttpClient {
    state: Arc<Mutex<FakeState>>,
}

impl FakeHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a 200 response with `body`.
    pub fn respond(&self, body: &str) -> &Self {
        self.respond_with_status(StatusCode::Ok, body)
    }

    pub fn respond_with_status(&self, status: StatusCode, body: &str) -> &Self {
        self.state
            .lock()
            .unwrap()
            .responses
            .push_back(Canned::Body(status, body.to_string()));
        self
    }

    /// Queue a transport-level failure.
    pub fn fail(&self, message: &str) -> &Self {
        self.state
            .lock()
            .unwrap()
            .responses
            .push_back(Canned::Failure(message.to_string()));
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.requests().pop().expect("no request was sent")
    }
}

#[async_trait]
impl HttpClient for FakeHttpClient {
    async fn send(&self, mut req: Request) -> Result<Response, Error> {
        let body = req.body_string().await?;
        let recorded = RecordedRequest {
            method: req.method().to_string(),
            url: req.url().clone(),
            content_type: req
                .header("Content-Type")
                .map(|values| values.last().as_str().to_string()),
            body,
        };

        let next = {
            let mut state = self.state.lock().unwrap();
            state.requests.push(recorded);
            state.responses.pop_front()
        };

        match next {
            Some(Canned::Body(status, body)) => {
                let mut response = Response::new(status);
                response.set_body(body);
                Ok(response)
            }
            Some(Canned::Failure(message)) => Err(Error::from_str(StatusCode::BadGateway, message)),
            None => Err(Error::from_str(
                StatusCode::InternalServerError,
                "no canned response left",
            )),
        }
    }
}

pub fn credentials() -> Credentials {
    Credentials::new(API_KEY)
        .with_secret(API_SECRET)
        .with_username("rj")
        .with_auth_token("1bc2a5f6c1bbd0d5b6f4ec2cb9e0e6a4")
}

/// Client with full credentials but no session.
pub fn client(fake: &FakeHttpClient) -> LastFmClient {
    LastFmClient::new(Box::new(fake.clone()), credentials())
}

/// Client holding a session key.
pub fn authenticated_client(fake: &FakeHttpClient) -> LastFmClient {
    LastFmClient::new(
        Box::new(fake.clone()),
        credentials().with_session_key(SESSION_KEY),
    )
}

/// Wrap a payload in a successful envelope.
pub fn ok(payload: &str) -> String {
    format!("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<lfm status=\"ok\">\n{payload}\n</lfm>")
}

pub fn failed(code: u32, message: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<lfm status=\"failed\">\n<error code=\"{code}\">{message}</error>\n</lfm>"
    )
}
