// hr-client/tests/http_client.rs
// Runs the client against an in-process axum backend.

use axum::{
    Json, Router,
    extract::{Path, Query},
    http::{HeaderMap, StatusCode, header},
    routing::{get, post},
};
use hr_client::{ClientConfig, ClientError, HttpClient, RemoteEmployeeCreate};
use serde::Deserialize;
use serde_json::{Value, json};

#[derive(Deserialize)]
struct Page {
    skip: usize,
    limit: usize,
}

fn employee_json(n: usize) -> Value {
    json!({
        "id": n,
        "employee_id": format!("EMP{:03}", n),
        "first_name": "Test",
        "last_name": format!("User{}", n),
        "email": format!("test.user{}@blackflag.hr", n),
        "hire_date": "2023-06-01",
        "is_active": true
    })
}

async fn list_employees(Query(page): Query<Page>) -> Json<Value> {
    let rows: Vec<Value> = (1..=5)
        .skip(page.skip)
        .take(page.limit)
        .map(employee_json)
        .collect();
    Json(Value::Array(rows))
}

async fn one_employee(Path(id): Path<usize>) -> Result<Json<Value>, (StatusCode, String)> {
    if id <= 5 {
        Ok(Json(employee_json(id)))
    } else {
        Err((StatusCode::NOT_FOUND, "Employee not found".to_string()))
    }
}

async fn create_employee(Json(body): Json<Value>) -> Json<Value> {
    let mut created = body;
    created["id"] = json!(99);
    created["is_active"] = json!(true);
    Json(created)
}

async fn login(Json(body): Json<Value>) -> Result<Json<Value>, (StatusCode, String)> {
    if body["email"] == "sarah.chen@blackflag.hr" && body["password"] == "Admin123!" {
        Ok(Json(json!({
            "success": true,
            "message": "Welcome Sarah Chen!",
            "user": { "email": "sarah.chen@blackflag.hr", "name": "Sarah Chen", "role": "hr_admin" }
        })))
    } else {
        Err((StatusCode::UNAUTHORIZED, "Invalid email or password".to_string()))
    }
}

async fn echo_auth(headers: HeaderMap) -> Json<Value> {
    let auth = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());
    Json(json!({ "authorization": auth }))
}

async fn spawn_backend() -> String {
    let app = Router::new()
        .route("/health", get(|| async { Json(json!({ "status": "healthy" })) }))
        .route(
            "/health/ready",
            get(|| async { Json(json!({ "status": "ready", "database": "connected" })) }),
        )
        .route("/echo/auth", get(echo_auth).post(echo_auth))
        .route("/api/v1/employees", get(list_employees).post(create_employee))
        .route("/api/v1/employees/{id}", get(one_employee))
        .route("/api/v1/auth/login", post(login))
        .route(
            "/api/v1/auth/logout",
            post(|| async { Json(json!({ "success": true, "message": "Logged out successfully" })) }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn client(base_url: &str) -> HttpClient {
    ClientConfig::new(base_url)
        .with_timeout(5)
        .build_http_client()
        .unwrap()
}

#[tokio::test]
async fn test_get_employees_pages() {
    let base = spawn_backend().await;
    let client = client(&base);

    let page = client.get_employees(1, 3).await.unwrap();
    assert_eq!(page.len(), 3);
    assert_eq!(page[0].employee_id, "EMP002");
    assert!(page[0].phone.is_none());
}

#[tokio::test]
async fn test_get_employee_not_found() {
    let base = spawn_backend().await;
    let client = client(&base);

    let found = client.get_employee(3).await.unwrap();
    assert_eq!(found.id.to_string(), "3");

    let missing = client.get_employee(42).await;
    assert!(matches!(missing, Err(ClientError::NotFound(_))));
}

#[tokio::test]
async fn test_create_employee() {
    let base = spawn_backend().await;
    let client = client(&base);

    let body = RemoteEmployeeCreate {
        employee_id: "EMP100".to_string(),
        first_name: "New".to_string(),
        last_name: "Hire".to_string(),
        email: "new.hire@blackflag.hr".to_string(),
        phone: None,
        department: Some("Engineering".to_string()),
        position: None,
        hire_date: chrono::NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(),
        salary: Some(120000.0),
    };
    let created = client.create_employee(&body).await.unwrap();
    assert_eq!(created.id.to_string(), "99");
    assert_eq!(created.department.as_deref(), Some("Engineering"));
}

#[tokio::test]
async fn test_login_and_logout() {
    let base = spawn_backend().await;
    let mut client = client(&base).with_token("t0ken");

    let ok = client.login("sarah.chen@blackflag.hr", "Admin123!").await.unwrap();
    assert!(ok.success);
    assert_eq!(ok.user.unwrap().role, "hr_admin");

    let denied = client.login("sarah.chen@blackflag.hr", "nope").await;
    assert!(matches!(denied, Err(ClientError::Unauthorized)));

    let ack = client.logout().await.unwrap();
    assert!(ack.success);
    assert!(client.token().is_none());
}

#[tokio::test]
async fn test_health_and_unreachable_backend() {
    let base = spawn_backend().await;
    let health = client(&base).check_health().await.unwrap();
    assert_eq!(health["status"], "healthy");
    let ready = client(&base).check_ready().await.unwrap();
    assert_eq!(ready["database"], "connected");

    // Nothing listens on port 9 locally; the request must fail, not hang.
    let offline = client("http://127.0.0.1:9").get_employees(0, 10).await;
    assert!(matches!(offline, Err(ClientError::Http(_))));
}

#[tokio::test]
async fn test_every_verb_sends_bearer_token() {
    let base = spawn_backend().await;

    let anonymous: Value = client(&base).get("/echo/auth").await.unwrap();
    assert!(anonymous["authorization"].is_null());

    let signed = client(&base).with_token("abc123");
    let via_get: Value = signed.get("/echo/auth").await.unwrap();
    let via_post: Value = signed.post("/echo/auth", &json!({})).await.unwrap();
    let via_empty_post: Value = signed.post_empty("/echo/auth").await.unwrap();
    for echoed in [via_get, via_post, via_empty_post] {
        assert_eq!(echoed["authorization"], "Bearer abc123");
    }
}
