use axum::{
    body::to_bytes,
    extract::{Request, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use chrono::{DateTime, Utc};
use resep::{
    common::{
        comment::Comment,
        newtypes::{CommentId, PostId, UserId},
        user::SessionUser,
    },
    frontend::api::{GatewayClient, GatewayConfig},
};
use std::sync::{Arc, Mutex, Once};
use tokio::{net::TcpListener, task::JoinHandle};
use uuid::Uuid;

/// What the fake gateway saw of a single request.
#[derive(Clone, Debug)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub query: String,
    pub apikey: Option<String>,
    pub authorization: Option<String>,
    pub prefer: Option<String>,
    pub body: Vec<u8>,
}

impl Recorded {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap_or(serde_json::Value::Null)
    }
}

#[derive(Clone, Default)]
struct MockState {
    requests: Arc<Mutex<Vec<Recorded>>>,
    responses: Arc<Mutex<Vec<(Method, String, StatusCode, String)>>>,
}

/// Stand-in for the backend-as-a-service. Every request is recorded, and answered with
/// the latest canned response whose method matches and whose path is a prefix of the
/// request path, or an empty 200.
pub struct MockGateway {
    state: MockState,
    pub client: GatewayClient,
    handle: JoinHandle<()>,
}

impl MockGateway {
    pub async fn start() -> Self {
        static INIT: Once = Once::new();
        INIT.call_once(|| {
            let _ = env_logger::builder()
                .filter_level(log::LevelFilter::Warn)
                .filter_module("resep", log::LevelFilter::Info)
                .is_test(true)
                .try_init();
        });

        let state = MockState::default();
        let app = Router::new().fallback(record).with_state(state.clone());
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock gateway");
        let addr = listener.local_addr().expect("mock gateway address");
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve mock gateway");
        });
        let client = GatewayClient::new(GatewayConfig {
            url: format!("http://{addr}"),
            anon_key: "anon".to_string(),
            image_bucket: "post-images".to_string(),
        });
        Self {
            state,
            client,
            handle,
        }
    }

    pub fn respond(&self, method: Method, path: &str, status: StatusCode, body: impl Into<String>) {
        self.state.responses.lock().expect("responses lock").push((
            method,
            path.to_string(),
            status,
            body.into(),
        ));
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.requests.lock().expect("requests lock").clone()
    }

    pub fn base_url(&self) -> &str {
        &self.client.config().url
    }
}

impl Drop for MockGateway {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn record(State(state): State<MockState>, request: Request) -> Response {
    let (parts, body) = request.into_parts();
    let body = to_bytes(body, usize::MAX).await.unwrap_or_default();
    let header = |name: &str| {
        parts
            .headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let path = parts.uri.path().to_string();
    state.requests.lock().expect("requests lock").push(Recorded {
        method: parts.method.clone(),
        path: path.clone(),
        query: parts.uri.query().unwrap_or_default().to_string(),
        apikey: header("apikey"),
        authorization: header("authorization"),
        prefer: header("prefer"),
        body: body.to_vec(),
    });
    let canned = state
        .responses
        .lock()
        .expect("responses lock")
        .iter()
        .rev()
        .find(|(method, prefix, _, _)| *method == parts.method && path.starts_with(prefix.as_str()))
        .map(|(_, _, status, body)| (*status, body.clone()));
    match canned {
        Some((status, body)) => (status, body).into_response(),
        None => StatusCode::OK.into_response(),
    }
}

pub fn test_user() -> SessionUser {
    SessionUser {
        id: UserId(Uuid::from_u128(0x5e5e)),
        email: "sari@example.com".to_string(),
        avatar_url: Some("https://example.com/sari.png".to_string()),
        access_token: "sari-token".to_string(),
    }
}

pub fn comment(id: i64, parent: Option<i64>, minute: u32) -> Comment {
    let created_at: DateTime<Utc> = format!("2024-05-01T10:{minute:02}:00Z")
        .parse()
        .expect("valid timestamp");
    Comment {
        id: CommentId(id),
        post_id: PostId(7),
        parent_comment_id: parent.map(CommentId),
        content: format!("comment {id}"),
        user_id: test_user().id,
        author: test_user().email,
        created_at,
    }
}

/// Ids in pre-order, each with its nesting depth.
pub fn outline(roots: &[resep::common::comment::CommentNode]) -> Vec<(i64, usize)> {
    fn walk(
        nodes: &[resep::common::comment::CommentNode],
        depth: usize,
        out: &mut Vec<(i64, usize)>,
    ) {
        for node in nodes {
            out.push((node.comment.id.0, depth));
            walk(&node.children, depth + 1, out);
        }
    }
    let mut out = vec![];
    walk(roots, 0, &mut out);
    out
}
