//! Shared harness: the real router over a migrated in-memory SQLite database.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, HeaderMap, Request, StatusCode},
    Router,
};
use dicom_core::{DataElement, PrimitiveValue, Tag, VR};
use dicom_dictionary_std::{tags, uids};
use dicom_object::{FileMetaTableBuilder, InMemDicomObject};
use http_body_util::BodyExt;
use sea_orm::ConnectOptions;
use serde_json::Value;
use tower::ServiceExt;

use user_management::api::{create_router, AppState};
use user_management::config::{AdminCredentials, Config};
use user_management::domain::{CreateUser, RoleName, User, UserStatus};
use user_management::infra::Database;

pub const SECRET: &str = "integration-test-secret-key-0123456789";
pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "admin-password";

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub database: Arc<Database>,
}

pub async fn connect() -> Arc<Database> {
    let mut options = ConnectOptions::new("sqlite::memory:".to_string());
    options.max_connections(1).sqlx_logging(false);

    let connection = sea_orm::Database::connect(options).await.unwrap();
    let database = Database::from_connection(connection);
    database.run_migrations().await.unwrap();
    Arc::new(database)
}

pub async fn spawn_app() -> TestApp {
    let database = connect().await;
    let config = Config::with_secret(SECRET, "sqlite::memory:");
    let state = AppState::from_config(database.clone(), config);

    let admin = AdminCredentials::new("Administrator", ADMIN_EMAIL, ADMIN_PASSWORD);
    state.user_service.bootstrap(Some(&admin)).await.unwrap();

    TestApp {
        router: create_router(state.clone()),
        state,
        database,
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }

    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).unwrap()
    }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.into_body().collect().await.unwrap().to_bytes().to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn json(&self, method: &str, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }

    pub async fn login(&self, username: &str, password: &str) -> TestResponse {
        let form = format!("username={}&password={}", username, password);
        let request = Request::builder()
            .method("POST")
            .uri("/auth/token")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form))
            .unwrap();
        self.send(request).await
    }

    pub async fn token(&self, username: &str, password: &str) -> String {
        let response = self.login(username, password).await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.text());
        response.json()["access_token"].as_str().unwrap().to_string()
    }

    pub async fn admin_token(&self) -> String {
        self.token(ADMIN_EMAIL, ADMIN_PASSWORD).await
    }

    pub async fn create_user(&self, username: &str, password: &str, status: UserStatus) -> User {
        self.state
            .user_service
            .create_user(CreateUser {
                fullname: "Jane Doe".to_string(),
                username: username.to_string(),
                password: password.to_string(),
                phone_number: None,
                status,
                roles: vec![RoleName::User],
            })
            .await
            .unwrap()
    }

    pub async fn upload(&self, field: &str, bytes: &[u8]) -> TestResponse {
        let boundary = "----user-management-test-boundary";
        let mut body = Vec::new();
        body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"image.dcm\"\r\n",
                field
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: application/dicom\r\n\r\n");
        body.extend_from_slice(bytes);
        body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());

        let request = Request::builder()
            .method("POST")
            .uri("/dicom/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", boundary),
            )
            .body(Body::from(body))
            .unwrap();
        self.send(request).await
    }
}

pub fn series_elements() -> Vec<(Tag, VR, &'static str)> {
    vec![
        (tags::PATIENT_ID, VR::LO, "PAT001"),
        (tags::STUDY_INSTANCE_UID, VR::UI, "1.2.3.4"),
        (tags::SERIES_INSTANCE_UID, VR::UI, "1.2.3.4.5"),
        (tags::MODALITY, VR::CS, "MR"),
        (tags::BODY_PART_EXAMINED, VR::CS, "HEAD"),
    ]
}

pub fn dicom_file(elements: &[(Tag, VR, &str)]) -> Vec<u8> {
    let obj = InMemDicomObject::from_element_iter(
        elements
            .iter()
            .map(|(tag, vr, value)| DataElement::new(*tag, *vr, PrimitiveValue::from(*value))),
    );
    let file = obj
        .with_meta(
            FileMetaTableBuilder::new()
                .transfer_syntax(uids::EXPLICIT_VR_LITTLE_ENDIAN)
                .media_storage_sop_class_uid(uids::MR_IMAGE_STORAGE)
                .media_storage_sop_instance_uid("1.2.826.0.1.3680043.2.1125.2"),
        )
        .unwrap();

    let mut out = Vec::new();
    file.write_all(&mut out).unwrap();
    out
}
