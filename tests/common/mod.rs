//! In-process fake of the back-office API.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use actix_web::dev::ServerHandle;
use actix_web::http::StatusCode;
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};

#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: String,
    pub authorization: Option<String>,
    pub body: String,
}

#[derive(Default)]
struct BackendState {
    replies: Mutex<HashMap<String, VecDeque<(u16, String)>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

pub struct FakeBackend {
    pub base_url: String,
    state: web::Data<BackendState>,
    handle: ServerHandle,
}

async fn respond(
    req: HttpRequest,
    body: web::Bytes,
    state: web::Data<BackendState>,
) -> HttpResponse {
    let path = req.path().to_string();
    state.requests.lock().unwrap().push(RecordedRequest {
        method: req.method().to_string(),
        path: path.clone(),
        query: req.query_string().to_string(),
        authorization: req
            .headers()
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: String::from_utf8_lossy(&body).into_owned(),
    });

    let reply = state
        .replies
        .lock()
        .unwrap()
        .get_mut(&path)
        .and_then(VecDeque::pop_front);

    let (status, body) = reply.unwrap_or((404, r#"{"detail":"Not Found"}"#.to_string()));
    let status = StatusCode::from_u16(status).expect("Invalid scripted status");

    HttpResponse::build(status)
        .content_type("application/json")
        .body(body)
}

impl FakeBackend {
    pub async fn start() -> Self {
        let state = web::Data::new(BackendState::default());
        let data = state.clone();

        let server = HttpServer::new(move || {
            App::new()
                .app_data(data.clone())
                .default_service(web::to(respond))
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .expect("Failed to bind fake backend");

        let addr = server.addrs()[0];
        let server = server.run();
        let handle = server.handle();
        actix_web::rt::spawn(server);

        Self {
            base_url: format!("http://{addr}"),
            state,
            handle,
        }
    }

    /// Queues a reply for the next request to `path`.
    pub fn reply(&self, path: &str, status: u16, body: impl Into<String>) -> &Self {
        self.state
            .replies
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_default()
            .push_back((status, body.into()));
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.requests().pop().expect("no request recorded")
    }

    pub async fn stop(self) {
        self.handle.stop(false).await;
    }
}
