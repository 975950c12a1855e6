use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Multipart, Path, Query, Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use forms::AppContext;
use serde_json::{json, Value};
use shared_types::{ApiConfig, AuthSession, LoggingConfig, Role, SessionUser};

/// In-memory backend state. Every resource is a list of JSON rows.
#[derive(Default)]
pub struct MockState {
    pub calls: Vec<String>,
    pub bodies: Vec<(String, Value)>,
    pub failures: HashMap<String, (u16, Value)>,
    pub tokens: Vec<Option<String>>,
    pub rows: HashMap<String, Vec<Value>>,
    next_id: i64,
}

impl MockState {
    fn rows_mut(&mut self, resource: &str) -> &mut Vec<Value> {
        self.rows.entry(resource.to_string()).or_default()
    }

    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

type Shared = Arc<Mutex<MockState>>;

/// A running mock of the REST backend on a loopback port.
pub struct MockBackend {
    pub base_url: String,
    state: Shared,
}

impl MockBackend {
    /// Start a backend seeded with lookups, application 3, job order 7
    /// (one stored item) and service order 11.
    pub async fn start() -> Self {
        api_client::telemetry::init_tracing(&LoggingConfig {
            level: "warn".to_string(),
            json: false,
        });
        let state: Shared = Arc::new(Mutex::new(MockState {
            next_id: 100,
            ..Default::default()
        }));
        seed(&mut state.lock().unwrap());

        let app = Router::new()
            .nest("/api", api_routes())
            .layer(middleware::from_fn_with_state(state.clone(), record_call))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock backend");
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}/api"),
            state,
        }
    }

    pub fn context(&self, role: Role) -> AppContext {
        let session = AuthSession {
            user: SessionUser {
                id: 1,
                email: match role {
                    Role::Technician => "jun@isp.example".to_string(),
                    Role::Office => "office@isp.example".to_string(),
                },
                first_name: "Test".to_string(),
                last_name: "User".to_string(),
                role,
            },
            access_token: "test-token".to_string(),
        };
        let config = ApiConfig {
            base_url: self.base_url.clone(),
            timeout_secs: 5,
        };
        AppContext::new(&config, session).expect("Failed to build context")
    }

    /// Every request seen so far, as `"METHOD /path"` without the `/api`
    /// prefix or query string.
    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Requests other than GET, in order.
    pub fn writes(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| !c.starts_with("GET "))
            .collect()
    }

    pub fn clear_calls(&self) {
        self.state.lock().unwrap().calls.clear();
    }

    /// Answer `"METHOD /path"` with `status` and `body` from now on.
    pub fn fail(&self, call: &str, status: u16, body: Value) {
        self.state
            .lock()
            .unwrap()
            .failures
            .insert(call.to_string(), (status, body));
    }

    /// Last JSON body sent with `"METHOD /path"`.
    pub fn body_of(&self, call: &str) -> Option<Value> {
        self.state
            .lock()
            .unwrap()
            .bodies
            .iter()
            .rev()
            .find(|(c, _)| c == call)
            .map(|(_, b)| b.clone())
    }

    pub fn tokens(&self) -> Vec<Option<String>> {
        self.state.lock().unwrap().tokens.clone()
    }

    pub fn rows(&self, resource: &str) -> Vec<Value> {
        self.state
            .lock()
            .unwrap()
            .rows
            .get(resource)
            .cloned()
            .unwrap_or_default()
    }

    pub fn row(&self, resource: &str, id: i64) -> Option<Value> {
        self.rows(resource).into_iter().find(|r| r["id"] == id)
    }

    pub fn insert(&self, resource: &str, row: Value) {
        self.state.lock().unwrap().rows_mut(resource).push(row);
    }

    /// Merge `patch` into an existing row.
    pub fn patch(&self, resource: &str, id: i64, patch: Value) {
        let mut state = self.state.lock().unwrap();
        if let Some(row) = state
            .rows_mut(resource)
            .iter_mut()
            .find(|r| r["id"] == id)
        {
            merge(row, &patch);
        }
    }
}

fn api_routes() -> Router<Shared> {
    Router::new()
        .route("/locations/{level}", get(list_location_level))
        .route("/locations/{level}/{id}/{child}", get(list_location_children))
        // Static prefixes win over `/{resource}/{id}`, so the job order
        // record itself needs its own route next to its actions.
        .route("/job-orders/{id}", get(get_job_order).put(update_job_order))
        .route("/job-orders/{id}/upload-images", post(upload_job_order_images))
        .route(
            "/job-orders/{id}/create-radius-account",
            post(create_radius_account),
        )
        .route("/google-drive/upload", post(upload_to_drive))
        .route("/{resource}", get(list_rows).post(create_row))
        .route(
            "/{resource}/{id}",
            get(get_row).put(update_row).delete(delete_row),
        )
}

async fn record_call(State(state): State<Shared>, req: Request, next: Next) -> Response {
    let call = format!(
        "{} {}",
        req.method(),
        req.uri().path().trim_start_matches("/api")
    );
    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let failure = {
        let mut state = state.lock().unwrap();
        state.calls.push(call.clone());
        state.tokens.push(token);
        state.failures.get(&call).cloned()
    };
    if let Some((status, body)) = failure {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        return (status, Json(body)).into_response();
    }
    next.run(req).await
}

// ── Handlers ────────────────────────────────────────────────────────

fn ok(data: Value) -> Response {
    Json(json!({ "success": true, "data": data, "message": null })).into_response()
}

fn not_found(resource: &str, id: i64) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "success": false,
            "data": null,
            "message": format!("{resource} {id} not found"),
        })),
    )
        .into_response()
}

fn as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn merge(row: &mut Value, patch: &Value) {
    if let (Some(row), Some(patch)) = (row.as_object_mut(), patch.as_object()) {
        for (key, value) in patch {
            row.insert(key.clone(), value.clone());
        }
    }
}

/// `/locations/regions` and friends are stored under the level name.
async fn list_location_level(
    State(state): State<Shared>,
    Path(level): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    filtered(&state, &level, &query)
}

/// `/locations/regions/{id}/cities` and `/locations/cities/{id}/barangays`.
async fn list_location_children(
    State(state): State<Shared>,
    Path((parent, id, child)): Path<(String, i64, String)>,
) -> Response {
    let key = match parent.as_str() {
        "regions" => "region_id",
        "cities" => "city_id",
        _ => return not_found(&parent, id),
    };
    let query = HashMap::from([(key.to_string(), id.to_string())]);
    filtered(&state, &child, &query)
}

async fn list_rows(
    State(state): State<Shared>,
    Path(resource): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    filtered(&state, &resource, &query)
}

fn filtered(state: &Shared, resource: &str, query: &HashMap<String, String>) -> Response {
    let mut state = state.lock().unwrap();
    let rows: Vec<Value> = state
        .rows_mut(resource)
        .iter()
        .filter(|row| query.iter().all(|(k, v)| row.get(k).map(as_text).as_ref() == Some(v)))
        .cloned()
        .collect();
    ok(Value::Array(rows))
}

async fn get_row(
    State(state): State<Shared>,
    Path((resource, id)): Path<(String, i64)>,
) -> Response {
    fetch_row(&state, &resource, id)
}

async fn get_job_order(State(state): State<Shared>, Path(id): Path<i64>) -> Response {
    fetch_row(&state, "job-orders", id)
}

async fn update_job_order(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    put_row(&state, "job-orders", id, body)
}

fn fetch_row(state: &Shared, resource: &str, id: i64) -> Response {
    let mut state = state.lock().unwrap();
    match state.rows_mut(&resource).iter().find(|r| r["id"] == id) {
        Some(row) => ok(row.clone()),
        None => not_found(&resource, id),
    }
}

async fn create_row(
    State(state): State<Shared>,
    Path(resource): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.lock().unwrap();
    state.bodies.push((format!("POST /{resource}"), body.clone()));
    let mut row = body;
    let id = state.next_id();
    merge(&mut row, &json!({ "id": id }));
    state.rows_mut(&resource).push(row.clone());
    (
        StatusCode::CREATED,
        Json(json!({ "success": true, "data": row, "message": "Created" })),
    )
        .into_response()
}

async fn update_row(
    State(state): State<Shared>,
    Path((resource, id)): Path<(String, i64)>,
    Json(body): Json<Value>,
) -> Response {
    put_row(&state, &resource, id, body)
}

fn put_row(state: &Shared, resource: &str, id: i64, body: Value) -> Response {
    let mut state = state.lock().unwrap();
    state
        .bodies
        .push((format!("PUT /{resource}/{id}"), body.clone()));
    match state.rows_mut(&resource).iter_mut().find(|r| r["id"] == id) {
        Some(row) => {
            merge(row, &body);
            ok(row.clone())
        }
        None => not_found(&resource, id),
    }
}

async fn delete_row(
    State(state): State<Shared>,
    Path((resource, id)): Path<(String, i64)>,
) -> Response {
    let mut state = state.lock().unwrap();
    let rows = state.rows_mut(&resource);
    let before = rows.len();
    rows.retain(|r| r["id"] != id);
    if rows.len() == before {
        return not_found(&resource, id);
    }
    Json(json!({ "success": true, "data": null, "message": "Deleted" })).into_response()
}

async fn multipart_fields(mut multipart: Multipart) -> Vec<String> {
    let mut names = Vec::new();
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        let _ = field.bytes().await;
        names.push(name);
    }
    names
}

async fn upload_job_order_images(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> Response {
    let fields = multipart_fields(multipart).await;
    let mut urls = serde_json::Map::new();
    for field in &fields {
        urls.insert(
            field.clone(),
            json!(format!("https://cdn.test/job-orders/{id}/{field}.jpg")),
        );
    }

    let mut state = state.lock().unwrap();
    if let Some(row) = state.rows_mut("job-orders").iter_mut().find(|r| r["id"] == id) {
        for (field, url) in &urls {
            merge(row, &json!({ format!("{field}_url"): url }));
        }
    }
    ok(Value::Object(urls))
}

async fn create_radius_account(State(state): State<Shared>, Path(id): Path<i64>) -> Response {
    let mut state = state.lock().unwrap();
    let Some(row) = state.rows_mut("job-orders").iter_mut().find(|r| r["id"] == id) else {
        return not_found("job-orders", id);
    };
    if row["pppoe_username"].is_string() {
        return (
            StatusCode::CONFLICT,
            Json(json!({ "success": false, "message": "Account already provisioned" })),
        )
            .into_response();
    }
    let account = json!({
        "username": format!("jo{id}@fiber"),
        "password": "s3cret",
    });
    merge(
        row,
        &json!({
            "pppoe_username": account["username"],
            "pppoe_password": account["password"],
        }),
    );
    ok(account)
}

async fn upload_to_drive(multipart: Multipart) -> Response {
    let fields = multipart_fields(multipart).await;
    let mut urls = serde_json::Map::new();
    for field in fields {
        let url = format!("https://drive.test/{field}");
        urls.insert(field, json!(url));
    }
    ok(Value::Object(urls))
}

// ── Seed data ───────────────────────────────────────────────────────

pub fn application_json(id: i64, status: &str) -> Value {
    json!({
        "id": id,
        "first_name": "Maria",
        "last_name": "Santos",
        "mobile_number": "09123456789",
        "email": "maria@example.ph",
        "region": "Region IV-A",
        "city": "Binangonan",
        "barangay": "Tayuman",
        "location": "Sitio Uno",
        "street_address": "12 Mabini St",
        "desired_plan": "Fiber 50",
        "status": status,
        "terms_and_conditions": true,
    })
}

fn seed(state: &mut MockState) {
    let mut put = |resource: &str, rows: Value| {
        if let Value::Array(rows) = rows {
            state.rows_mut(resource).extend(rows);
        }
    };

    put(
        "regions",
        json!([
            { "id": 1, "name": "Region IV-A" },
            { "id": 2, "name": "NCR" },
        ]),
    );
    put(
        "cities",
        json!([
            { "id": 10, "name": "Binangonan", "region_id": 1 },
            { "id": 11, "name": "Makati", "region_id": 2 },
            { "id": 12, "name": "Angono", "region_id": 1 },
        ]),
    );
    put(
        "barangays",
        json!([
            { "id": 100, "name": "Tayuman", "city_id": 10 },
            { "id": 101, "name": "Poblacion", "city_id": 11 },
        ]),
    );
    put(
        "details",
        json!([{ "id": 1000, "name": "Sitio Uno", "barangay_id": 100 }]),
    );
    put(
        "plans",
        json!([
            { "id": 1, "name": "Fiber 50", "price": 1299.0 },
            { "id": 2, "name": "Fiber 100", "price": 1699.0 },
        ]),
    );
    put(
        "usage-types",
        json!([
            { "id": 1, "name": "Residential" },
            { "id": 2, "name": "Business" },
        ]),
    );
    put("groups", json!([{ "id": 1, "name": "Rizal East" }]));
    put(
        "inventory-items",
        json!([
            { "id": 1, "name": "Drop cable", "category": "Cable" },
            { "id": 2, "name": "Connector", "category": "Fittings" },
        ]),
    );
    put(
        "users",
        json!([
            { "id": 5, "email": "jun@isp.example", "first_name": "Jun", "last_name": "Reyes", "role": "technician" },
            { "id": 6, "email": "leo@isp.example", "first_name": "Leo", "last_name": "Cruz", "role": "technician" },
            { "id": 7, "email": "office@isp.example", "first_name": "Ana", "last_name": "Lim", "role": "office" },
        ]),
    );
    put("lcp", json!([{ "id": 1, "name": "LCP1" }]));
    put(
        "nap",
        json!([
            { "id": 5, "name": "LCP1-NAP1", "lcp_id": 1 },
            { "id": 6, "name": "LCP1-NAP2", "lcp_id": 1 },
        ]),
    );
    put(
        "port",
        json!([
            { "id": 1, "label": "PORT 001", "nap_id": 5 },
            { "id": 2, "label": "PORT 032", "nap_id": 5 },
            { "id": 3, "label": "PORT 001", "nap_id": 6 },
        ]),
    );
    put(
        "vlan",
        json!([
            { "id": 1, "value": "100" },
            { "id": 2, "value": "200" },
        ]),
    );

    put("applications", json!([application_json(3, "pending")]));
    put(
        "job-orders",
        json!([{
            "id": 7,
            "application_id": 3,
            "first_name": "Maria",
            "last_name": "Santos",
            "mobile_number": "09123456789",
            "email": "maria@example.ph",
            "region": "Region IV-A",
            "city": "Binangonan",
            "barangay": "Tayuman",
            "street_address": "12 Mabini St",
            "desired_plan": "Fiber 50",
            "status": "Confirmed",
        }]),
    );
    put(
        "job-order-items",
        json!([{ "id": 1, "job_order_id": 7, "item_name": "Drop cable", "quantity": 100 }]),
    );
    put(
        "service-orders",
        json!([{
            "id": 11,
            "account_no": "ACC-0042",
            "full_name": "Maria Santos",
            "concern": "No internet",
            "support_status": "In Progress",
        }]),
    );
    put(
        "service-order-items",
        json!([{ "id": 2, "service_order_id": 11, "item_name": "Connector", "quantity": 2 }]),
    );
}
