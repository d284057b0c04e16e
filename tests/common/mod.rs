use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{SecondsFormat, Utc};
use shetkari_tracker::models::{Contributor, GroupStats, SubmitWaterLog, WaterLog};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};

#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub method: &'static str,
    pub path: &'static str,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
}

#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Status(StatusCode),
    Garbage,
}

/// In-process stand-in for the water-log REST backend.
#[derive(Clone)]
pub struct StubBackend {
    pub base_url: String,
    logs: Arc<Mutex<Vec<WaterLog>>>,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
    mode: Arc<Mutex<Mode>>,
}

#[allow(dead_code)]
impl StubBackend {
    pub async fn spawn() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub backend");
        let addr = listener.local_addr().unwrap();

        let backend = Self {
            base_url: format!("http://{addr}"),
            logs: Arc::default(),
            seen: Arc::default(),
            mode: Arc::new(Mutex::new(Mode::Normal)),
        };

        let app = Router::new()
            .route("/api/water-logs/", get(list_logs).post(create_log))
            .route("/api/group-stats/", get(group_stats))
            .with_state(backend.clone());
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        backend
    }

    pub fn set_mode(&self, mode: Mode) {
        *self.mode.lock().unwrap() = mode;
    }

    pub fn seed(&self, logs: Vec<WaterLog>) {
        self.logs.lock().unwrap().extend(logs);
    }

    pub fn seen(&self) -> Vec<SeenRequest> {
        self.seen.lock().unwrap().clone()
    }

    fn record(&self, method: &'static str, path: &'static str, headers: &HeaderMap) -> Mode {
        let value = |name: header::HeaderName| {
            headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string)
        };
        self.seen.lock().unwrap().push(SeenRequest {
            method,
            path,
            authorization: value(header::AUTHORIZATION),
            content_type: value(header::CONTENT_TYPE),
        });
        *self.mode.lock().unwrap()
    }
}

#[allow(dead_code)]
pub fn sample_stats() -> GroupStats {
    GroupStats {
        group_name: "Ward 4 Gardeners".to_string(),
        total_members: 3,
        total_mugs: 42,
        average_mugs_per_member: 14.0,
        top_contributors: vec![
            Contributor {
                name: "Asha".to_string(),
                mugs: 20,
            },
            Contributor {
                name: "Ravi".to_string(),
                mugs: 12,
            },
            Contributor {
                name: "Meera".to_string(),
                mugs: 10,
            },
        ],
    }
}

#[allow(dead_code)]
pub fn water_log(id: &str, date: &str, mugs: u32) -> WaterLog {
    WaterLog {
        id: id.to_string(),
        date: date.to_string(),
        mugs,
        user_id: "u1".to_string(),
    }
}

#[allow(dead_code)]
pub fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn override_response(mode: Mode) -> Option<Response> {
    match mode {
        Mode::Normal => None,
        Mode::Status(status) => Some((status, "nope").into_response()),
        Mode::Garbage => Some((StatusCode::OK, "definitely not json").into_response()),
    }
}

async fn list_logs(State(backend): State<StubBackend>, headers: HeaderMap) -> Response {
    let mode = backend.record("GET", "/api/water-logs/", &headers);
    if let Some(response) = override_response(mode) {
        return response;
    }
    let logs = backend.logs.lock().unwrap().clone();
    Json(logs).into_response()
}

async fn create_log(
    State(backend): State<StubBackend>,
    headers: HeaderMap,
    Json(body): Json<SubmitWaterLog>,
) -> Response {
    let mode = backend.record("POST", "/api/water-logs/", &headers);
    if let Some(response) = override_response(mode) {
        return response;
    }
    let mut logs = backend.logs.lock().unwrap();
    let log = WaterLog {
        id: format!("log-{}", logs.len() + 1),
        date: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        mugs: body.mugs,
        user_id: "u1".to_string(),
    };
    logs.push(log.clone());
    (StatusCode::CREATED, Json(log)).into_response()
}

async fn group_stats(State(backend): State<StubBackend>, headers: HeaderMap) -> Response {
    let mode = backend.record("GET", "/api/group-stats/", &headers);
    if let Some(response) = override_response(mode) {
        return response;
    }
    Json(sample_stats()).into_response()
}
