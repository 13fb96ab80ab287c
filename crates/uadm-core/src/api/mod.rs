//! HTTP client for the user-management backend.
//!
//! `ApiClient::request` is the single place where headers are built and HTTP
//! statuses are interpreted:
//!
//! - 401 on an authenticated call -> [`ApiError::Unauthorized`]
//! - 204 -> success, no body
//! - other 2xx -> success, decoded JSON body
//! - anything else -> [`ApiError::Remote`] carrying the backend's `detail`
//! - connection failure or unreadable JSON -> [`ApiError::Transport`]
//!
//! The typed endpoint methods sit on top of it.

mod error;
mod types;

use std::time::Instant;

use reqwest::{Client, Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub use self::error::{
    ApiError, SESSION_EXPIRED_MESSAGE, TRANSPORT_MESSAGE, extract_detail,
};
use self::error::classify_reqwest_error;
pub use self::types::{
    AdminLoginResponse, CreateUserRequest, Credentials, HealthStatus, UpdateUserRequest,
    UserId, UserInfo, UserLoginResponse, UserRecord,
};
use crate::session::{SessionStore, SessionToken};

const USER_AGENT: &str = concat!("uadm/", env!("CARGO_PKG_VERSION"));

pub const DEFAULT_ADMIN_LOGIN_PATH: &str = "/admin/login";
const USER_LOGIN_PATH: &str = "/login";
const ADMIN_LOGOUT_PATH: &str = "/admin/logout";
const USERS_PATH: &str = "/admin/users";
const HEALTH_PATH: &str = "/health";

/// Status and decoded body of a successful call.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    /// `None` for 204 and for empty bodies.
    pub json: Option<Value>,
}

impl ApiResponse {
    /// Decodes the body into `T`. A missing or mismatched body is reported as
    /// a transport failure: the server answered with something unusable.
    pub fn decode<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        let json = self.json.ok_or_else(|| {
            ApiError::Transport(format!("Empty response body (HTTP {})", self.status))
        })?;
        serde_json::from_value(json)
            .map_err(|e| ApiError::Transport(format!("Unexpected response shape: {e}")))
    }
}

/// Whether a call carries the session token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Auth {
    /// Attach `Authorization: Bearer` when a token is held; 401 means the
    /// session is gone.
    Session,
    /// Credential exchange: no token, and 401 is an ordinary rejection.
    Anonymous,
}

/// Backend client bound to one session.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    admin_login_path: String,
    session: SessionStore,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, session: SessionStore) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            admin_login_path: DEFAULT_ADMIN_LOGIN_PATH.to_string(),
            session,
        }
    }

    #[must_use]
    pub fn with_admin_login_path(mut self, path: impl Into<String>) -> Self {
        self.admin_login_path = path.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Issues a call with the session token attached when one is held.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<ApiResponse, ApiError> {
        self.send(method, path, body, Auth::Session).await
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        auth: Auth,
    ) -> Result<ApiResponse, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let mut builder = self
            .http
            .request(method.clone(), &url)
            .header("accept", "application/json")
            .header("user-agent", USER_AGENT);

        if auth == Auth::Session
            && let Some(token) = self.session.get()
        {
            builder = builder.bearer_auth(token.as_str());
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let started = Instant::now();
        let response = builder.send().await.map_err(|e| {
            let err = classify_reqwest_error(&e);
            tracing::warn!(%method, path, error = %err, "request failed");
            err
        })?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(|e| classify_reqwest_error(&e))?;
        tracing::info!(
            %method,
            path,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "request completed"
        );

        interpret(status, &bytes, auth)
    }

    /// `POST <admin login path>`: exchanges credentials for a session token.
    ///
    /// The token is returned, not stored; the caller decides when the session
    /// starts.
    pub async fn admin_login(&self, credentials: &Credentials) -> Result<SessionToken, ApiError> {
        let response = self
            .send(
                Method::POST,
                &self.admin_login_path,
                Some(credentials),
                Auth::Anonymous,
            )
            .await?;
        let login: AdminLoginResponse = response.decode()?;
        if login.token.is_empty() {
            return Err(ApiError::Transport(
                "Login response did not contain a token".to_string(),
            ));
        }
        Ok(SessionToken::new(login.token))
    }

    /// `POST /login`: end-user login. Does not touch the admin session.
    pub async fn user_login(&self, credentials: &Credentials) -> Result<UserLoginResponse, ApiError> {
        self.send(
            Method::POST,
            USER_LOGIN_PATH,
            Some(credentials),
            Auth::Anonymous,
        )
        .await?
        .decode()
    }

    /// `POST /admin/logout` with an explicit token (the local session is
    /// usually already cleared by the time this runs).
    pub async fn admin_logout(&self, token: &SessionToken) -> Result<(), ApiError> {
        let url = format!("{}{}", self.base_url, ADMIN_LOGOUT_PATH);
        let response = self
            .http
            .post(url)
            .header("user-agent", USER_AGENT)
            .bearer_auth(token.as_str())
            .send()
            .await
            .map_err(|e| classify_reqwest_error(&e))?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.bytes().await.unwrap_or_default();
            Err(ApiError::remote(status.as_u16(), &body))
        }
    }

    /// `GET /admin/users`, in backend order.
    pub async fn list_users(&self) -> Result<Vec<UserRecord>, ApiError> {
        self.request(Method::GET, USERS_PATH, None).await?.decode()
    }

    /// `POST /admin/users`.
    pub async fn create_user(&self, request: &CreateUserRequest) -> Result<UserRecord, ApiError> {
        self.send(Method::POST, USERS_PATH, Some(request), Auth::Session)
            .await?
            .decode()
    }

    /// `PUT /admin/users/{id}`.
    pub async fn update_user(
        &self,
        id: &UserId,
        request: &UpdateUserRequest,
    ) -> Result<UserRecord, ApiError> {
        let path = format!("{USERS_PATH}/{id}");
        self.send(Method::PUT, &path, Some(request), Auth::Session)
            .await?
            .decode()
    }

    /// `DELETE /admin/users/{id}`. Only 204 counts as success.
    pub async fn delete_user(&self, id: &UserId) -> Result<(), ApiError> {
        let path = format!("{USERS_PATH}/{id}");
        let response = self.request(Method::DELETE, &path, None).await?;
        if response.status == StatusCode::NO_CONTENT.as_u16() {
            Ok(())
        } else {
            Err(ApiError::Remote {
                status: response.status,
                detail: None,
            })
        }
    }

    /// `GET /health`.
    pub async fn health(&self) -> Result<HealthStatus, ApiError> {
        self.send::<Value>(Method::GET, HEALTH_PATH, None, Auth::Anonymous)
            .await?
            .decode()
    }
}

fn interpret(status: StatusCode, body: &[u8], auth: Auth) -> Result<ApiResponse, ApiError> {
    if status == StatusCode::UNAUTHORIZED && auth == Auth::Session {
        return Err(ApiError::Unauthorized);
    }

    if !status.is_success() {
        return Err(ApiError::remote(status.as_u16(), body));
    }

    let json = if status == StatusCode::NO_CONTENT || body.iter().all(u8::is_ascii_whitespace) {
        None
    } else {
        Some(
            serde_json::from_slice(body)
                .map_err(|e| ApiError::Transport(format!("Malformed JSON response: {e}")))?,
        )
    };

    Ok(ApiResponse {
        status: status.as_u16(),
        json,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, header, header_exists, method, path};
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    use super::*;

    fn client(server: &MockServer) -> ApiClient {
        ApiClient::new(server.uri(), SessionStore::new())
    }

    fn logged_in_client(server: &MockServer) -> ApiClient {
        let session = SessionStore::new();
        session.set(SessionToken::new("tok-123"));
        ApiClient::new(server.uri(), session)
    }

    #[test]
    fn test_interpret_status_rules() {
        assert!(matches!(
            interpret(StatusCode::UNAUTHORIZED, b"{}", Auth::Session),
            Err(ApiError::Unauthorized)
        ));
        assert!(matches!(
            interpret(StatusCode::UNAUTHORIZED, br#"{"detail":"bad"}"#, Auth::Anonymous),
            Err(ApiError::Remote { status: 401, .. })
        ));

        let no_content = interpret(StatusCode::NO_CONTENT, b"", Auth::Session).unwrap();
        assert_eq!(no_content.status, 204);
        assert_eq!(no_content.json, None);

        let ok = interpret(StatusCode::OK, br#"[{"a":1}]"#, Auth::Session).unwrap();
        assert_eq!(ok.json, Some(json!([{"a": 1}])));

        assert!(matches!(
            interpret(StatusCode::OK, b"not json", Auth::Session),
            Err(ApiError::Transport(_))
        ));
        assert_eq!(
            interpret(StatusCode::NOT_FOUND, br#"{"detail":"not found"}"#, Auth::Session),
            Err(ApiError::Remote {
                status: 404,
                detail: Some("not found".to_string())
            })
        );
    }

    #[tokio::test]
    async fn test_request_attaches_bearer_when_token_held() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/admin/users"))
            .and(header("authorization", "Bearer tok-123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let users = logged_in_client(&server).list_users().await.unwrap();
        assert!(users.is_empty());
    }

    #[tokio::test]
    async fn test_request_without_token_sends_no_authorization() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/admin/users"))
            .respond_with(|req: &Request| {
                if req.headers.contains_key("authorization") {
                    ResponseTemplate::new(400)
                } else {
                    ResponseTemplate::new(401).set_body_json(json!({"detail": "Not authenticated"}))
                }
            })
            .mount(&server)
            .await;

        let err = client(&server).list_users().await.unwrap_err();
        assert_eq!(err, ApiError::Unauthorized);
    }

    #[tokio::test]
    async fn test_admin_login_returns_token_without_bearer() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/admin/login"))
            .and(body_json(json!({"username": "admin", "password": "pw"})))
            .respond_with(|req: &Request| {
                if req.headers.contains_key("authorization") {
                    ResponseTemplate::new(400)
                } else {
                    ResponseTemplate::new(200).set_body_json(json!({
                        "message": "Admin login successful",
                        "token": "fresh",
                        "token_type": "bearer"
                    }))
                }
            })
            .expect(1)
            .mount(&server)
            .await;

        let api = logged_in_client(&server);
        let creds = Credentials::from_input("admin", "pw").unwrap();
        let token = api.admin_login(&creds).await.unwrap();
        assert_eq!(token.as_str(), "fresh");
        // Storing the token is the caller's job.
        assert_eq!(api.session().get().unwrap().as_str(), "tok-123");
    }

    #[tokio::test]
    async fn test_admin_login_rejection_is_remote_not_unauthorized() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/admin/login"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(json!({"detail": "Invalid admin credentials"})),
            )
            .mount(&server)
            .await;

        let creds = Credentials::from_input("admin", "wrong").unwrap();
        let err = client(&server).admin_login(&creds).await.unwrap_err();
        assert_eq!(
            err,
            ApiError::Remote {
                status: 401,
                detail: Some("Invalid admin credentials".to_string())
            }
        );
    }

    #[tokio::test]
    async fn test_custom_admin_login_path() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "t"})))
            .expect(1)
            .mount(&server)
            .await;

        let api = client(&server).with_admin_login_path("/login");
        let creds = Credentials::from_input("admin", "pw").unwrap();
        assert_eq!(api.admin_login(&creds).await.unwrap().as_str(), "t");
    }

    #[tokio::test]
    async fn test_update_omits_password_on_the_wire() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/admin/users/7"))
            .and(header_exists("authorization"))
            .and(body_json(json!({
                "username": "ann",
                "email": "ann@x.com",
                "is_active": false
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 7, "username": "ann", "email": "ann@x.com", "is_active": false
            })))
            .expect(1)
            .mount(&server)
            .await;

        let request = UpdateUserRequest {
            username: "ann".to_string(),
            email: "ann@x.com".to_string(),
            password: None,
            is_active: false,
            type_of_user: None,
        };
        let record = logged_in_client(&server)
            .update_user(&UserId::new("7"), &request)
            .await
            .unwrap();
        assert!(!record.is_active);
    }

    #[tokio::test]
    async fn test_delete_204_is_success_and_404_carries_detail() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/admin/users/1"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/admin/users/2"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "not found"})))
            .mount(&server)
            .await;

        let api = logged_in_client(&server);
        api.delete_user(&UserId::new("1")).await.unwrap();
        let err = api.delete_user(&UserId::new("2")).await.unwrap_err();
        assert_eq!(err.message_or("Delete failed"), "not found");
    }

    #[tokio::test]
    async fn test_malformed_success_body_is_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/admin/users"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy</html>"))
            .mount(&server)
            .await;

        let err = logged_in_client(&server).list_users().await.unwrap_err();
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        // Bind and drop to get a port nobody is listening on.
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let api = ApiClient::new(format!("http://127.0.0.1:{port}"), SessionStore::new());
        let err = api.health().await.unwrap_err();
        assert!(err.is_transport());
        assert_eq!(err.message_or("x"), TRANSPORT_MESSAGE);
    }

    #[tokio::test]
    async fn test_user_login_legacy_shape() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"username": "bob", "email": "b@x"})),
            )
            .mount(&server)
            .await;

        let creds = Credentials::from_input("bob", "pw").unwrap();
        let response = client(&server).user_login(&creds).await.unwrap();
        assert_eq!(response.username(), "bob");
    }

    #[tokio::test]
    async fn test_admin_logout_sends_explicit_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/admin/logout"))
            .and(header("authorization", "Bearer old"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"message": "Admin logout successful"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        client(&server)
            .admin_logout(&SessionToken::new("old"))
            .await
            .unwrap();
    }
}
