//! An in-memory stand-in for the records backend, plus helpers to run the
//! console against it on an ephemeral port.

#![allow(dead_code)]

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use jiff::tz::TimeZone;
use registrar::{
    client::RecordsApi,
    config::{ApiConfig, RuntimeConfiguration},
    state::RegistrarState,
};
use serde_json::{Value, json};
use std::{
    collections::{BTreeMap, HashMap},
    net::SocketAddr,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
    time::Duration,
};
use tokio::net::TcpListener;
use uuid::Uuid;

pub const KINDS: [&str; 4] = ["students", "teachers", "courses", "enrollments"];

#[derive(Default)]
struct Store {
    records: HashMap<String, BTreeMap<i64, Value>>,
    next_id: i64,
    last_post: Option<Value>,
}

#[derive(Clone, Default)]
pub struct FakeBackend {
    store: Arc<Mutex<Store>>,
    requests: Arc<AtomicUsize>,
    failing: Arc<AtomicBool>,
    bodyless_updates: Arc<AtomicBool>,
}

impl FakeBackend {
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    pub fn last_post(&self) -> Option<Value> {
        self.store.lock().unwrap().last_post.clone()
    }

    /// Every request answers 500 until switched back.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Successful PUTs answer 204 with no body.
    pub fn set_bodyless_updates(&self, bodyless: bool) {
        self.bodyless_updates.store(bodyless, Ordering::SeqCst);
    }

    /// Stores a record directly, bypassing the request counter. Returns its id.
    pub fn seed(&self, kind: &str, mut record: Value) -> i64 {
        let mut store = self.store.lock().unwrap();
        store.next_id += 1;
        let id = store.next_id;
        record["id"] = json!(id);
        store
            .records
            .entry(kind.to_string())
            .or_default()
            .insert(id, record);
        id
    }

    pub fn stored(&self, kind: &str, id: i64) -> Option<Value> {
        self.store
            .lock()
            .unwrap()
            .records
            .get(kind)
            .and_then(|records| records.get(&id))
            .cloned()
    }

    pub fn len(&self, kind: &str) -> usize {
        self.store
            .lock()
            .unwrap()
            .records
            .get(kind)
            .map_or(0, BTreeMap::len)
    }

    fn records(&self, kind: &str) -> Vec<Value> {
        self.store
            .lock()
            .unwrap()
            .records
            .get(kind)
            .map(|records| records.values().cloned().collect())
            .unwrap_or_default()
    }
}

fn not_found(kind: &str, id: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": format!("No {kind} with id {id}") })),
    )
        .into_response()
}

fn unavailable(backend: &FakeBackend) -> Option<Response> {
    backend.requests.fetch_add(1, Ordering::SeqCst);
    backend.failing.load(Ordering::SeqCst).then(|| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": "database unavailable" })),
        )
            .into_response()
    })
}

fn full_name(person: &Value) -> String {
    format!(
        "{} {}",
        person["firstName"].as_str().unwrap_or_default(),
        person["lastName"].as_str().unwrap_or_default()
    )
}

fn projection(backend: &FakeBackend, kind: &str) -> Option<Vec<Value>> {
    let lookup = |kind: &str, reference: &Value| {
        reference["id"]
            .as_i64()
            .and_then(|id| backend.stored(kind, id))
    };

    match kind {
        "courses" => Some(
            backend
                .records("courses")
                .iter()
                .map(|course| {
                    let teacher = lookup("teachers", &course["teacher"]);
                    json!({
                        "id": course["id"],
                        "title": course["title"],
                        "description": course["description"],
                        "teacherId": teacher.as_ref().map(|teacher| teacher["id"].clone()),
                        "teacherFullName": teacher.as_ref().map(full_name),
                    })
                })
                .collect(),
        ),
        "enrollments" => Some(
            backend
                .records("enrollments")
                .iter()
                .map(|enrollment| {
                    let student = lookup("students", &enrollment["student"]);
                    let course = lookup("courses", &enrollment["course"]);
                    json!({
                        "id": enrollment["id"],
                        "studentId": enrollment["student"]["id"],
                        "courseId": enrollment["course"]["id"],
                        "studentName": student.as_ref().map(full_name),
                        "courseTitle": course.as_ref().map(|course| course["title"].clone()),
                        "enrollmentDate": enrollment["enrollmentDate"],
                    })
                })
                .collect(),
        ),
        _ => None,
    }
}

async fn list(State(backend): State<FakeBackend>, Path(kind): Path<String>) -> Response {
    if let Some(failure) = unavailable(&backend) {
        return failure;
    }
    Json(backend.records(&kind)).into_response()
}

async fn create(
    State(backend): State<FakeBackend>,
    Path(kind): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    if let Some(failure) = unavailable(&backend) {
        return failure;
    }
    backend.store.lock().unwrap().last_post = Some(body.clone());
    let id = backend.seed(&kind, body);
    (StatusCode::CREATED, Json(backend.stored(&kind, id))).into_response()
}

async fn replace(
    State(backend): State<FakeBackend>,
    Path(kind): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    if let Some(failure) = unavailable(&backend) {
        return failure;
    }
    let Some(id) = body["id"].as_i64() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": "id is required" })),
        )
            .into_response();
    };

    let mut store = backend.store.lock().unwrap();
    match store
        .records
        .get_mut(&kind)
        .and_then(|records| records.get_mut(&id))
    {
        Some(existing) => {
            *existing = body.clone();
            if backend.bodyless_updates.load(Ordering::SeqCst) {
                StatusCode::NO_CONTENT.into_response()
            } else {
                Json(body).into_response()
            }
        }
        None => not_found(&kind, &id.to_string()),
    }
}

async fn get_one(
    State(backend): State<FakeBackend>,
    Path((kind, id)): Path<(String, String)>,
) -> Response {
    if let Some(failure) = unavailable(&backend) {
        return failure;
    }
    if id == "dto" {
        return match projection(&backend, &kind) {
            Some(rows) => Json(rows).into_response(),
            None => not_found(&kind, &id),
        };
    }

    match id.parse().ok().and_then(|id| backend.stored(&kind, id)) {
        Some(record) => Json(record).into_response(),
        None => not_found(&kind, &id),
    }
}

async fn remove(
    State(backend): State<FakeBackend>,
    Path((kind, id)): Path<(String, String)>,
) -> Response {
    if let Some(failure) = unavailable(&backend) {
        return failure;
    }
    let Ok(id) = id.parse::<i64>() else {
        return not_found(&kind, &id);
    };

    let referenced = kind == "courses"
        && backend
            .records("enrollments")
            .iter()
            .any(|enrollment| enrollment["course"]["id"].as_i64() == Some(id));
    if referenced {
        return (
            StatusCode::CONFLICT,
            Json(json!({ "message": "Course still has enrollments" })),
        )
            .into_response();
    }

    let removed = backend
        .store
        .lock()
        .unwrap()
        .records
        .get_mut(&kind)
        .and_then(|records| records.remove(&id));
    match removed {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => not_found(&kind, &id.to_string()),
    }
}

async fn serve(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
    addr
}

pub async fn spawn_backend() -> (FakeBackend, String) {
    let backend = FakeBackend::default();
    let app = Router::new()
        .route("/api/{kind}", get(list).post(create).put(replace))
        .route("/api/{kind}/{id}", get(get_one).delete(remove))
        .with_state(backend.clone());

    let addr = serve(app).await;
    (backend, format!("http://{addr}/api"))
}

pub fn config_for(base_url: &str) -> RuntimeConfiguration {
    RuntimeConfiguration::from_parts(
        ApiConfig::new(base_url, Duration::from_secs(5)),
        "127.0.0.1:0",
        TimeZone::UTC,
    )
}

pub async fn spawn_api() -> (FakeBackend, RecordsApi) {
    let (backend, base_url) = spawn_backend().await;
    let api = RecordsApi::new(config_for(&base_url).api_config()).unwrap();
    (backend, api)
}

/// A running console wired to a fresh fake backend.
pub struct Console {
    pub backend: FakeBackend,
    pub state: RegistrarState,
    pub base: String,
    pub http: reqwest::Client,
}

impl Console {
    pub async fn spawn() -> Self {
        let (backend, base_url) = spawn_backend().await;
        let state = RegistrarState::new(config_for(&base_url)).unwrap();
        let addr = serve(registrar::router(state.clone())).await;

        Self {
            backend,
            state,
            base: format!("http://{addr}"),
            http: reqwest::Client::new(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    pub async fn get(&self, path: &str) -> (StatusCode, String) {
        let response = self.http.get(self.url(path)).send().await.unwrap();
        let status = StatusCode::from_u16(response.status().as_u16()).unwrap();
        (status, response.text().await.unwrap())
    }

    /// Submits like a rendered form would, adding a fresh submission token
    /// unless `form` already carries one.
    pub async fn put_form(&self, path: &str, form: &[(&str, &str)]) -> reqwest::Response {
        let token = Uuid::new_v4().to_string();
        let mut fields = form.to_vec();
        if !fields.iter().any(|(name, _)| *name == "submission") {
            fields.push(("submission", token.as_str()));
        }
        self.put_form_exact(path, &fields).await
    }

    pub async fn put_form_exact(&self, path: &str, form: &[(&str, &str)]) -> reqwest::Response {
        self.http
            .put(self.url(path))
            .form(form)
            .send()
            .await
            .unwrap()
    }

    pub async fn delete(&self, path: &str, query: &[(&str, &str)]) -> reqwest::Response {
        self.http
            .delete(self.url(path))
            .query(query)
            .send()
            .await
            .unwrap()
    }
}

pub fn student(first: &str, last: &str, email: &str) -> Value {
    json!({ "firstName": first, "lastName": last, "email": email })
}

pub fn teacher(first: &str, last: &str, email: &str, specialization: Option<&str>) -> Value {
    json!({
        "firstName": first,
        "lastName": last,
        "email": email,
        "specialization": specialization,
    })
}

pub fn course(title: &str, teacher: Option<i64>) -> Value {
    json!({
        "title": title,
        "description": null,
        "teacher": teacher.map(|id| json!({ "id": id })),
    })
}

pub fn enrollment(student: i64, course: i64, date: &str) -> Value {
    json!({
        "student": { "id": student },
        "course": { "id": course },
        "enrollmentDate": date,
    })
}
