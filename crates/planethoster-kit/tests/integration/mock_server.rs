//! In-process stand-in for the reseller API.
//!
//! Serves canned JSON per path and records every request it receives so tests
//! can inspect the exact form body the client sent.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use http_body_util::{BodyExt, Full};
use hyper::body::{Bytes, Incoming};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use planethoster_kit::Reseller;
use tokio::net::TcpListener;

pub const API_KEY: &str = "test-key";
pub const API_USER: &str = "test-user";

/// A canned response.
#[derive(Clone)]
pub struct Route {
    status: u16,
    body: String,
    delay: Option<Duration>,
}

impl Route {
    pub fn json(body: &str) -> Self {
        Self {
            status: 200,
            body: body.to_string(),
            delay: None,
        }
    }

    pub fn status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

/// A request as seen by the server.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub content_type: Option<String>,
    pub user_agent: Option<String>,
    pub params: Vec<(String, String)>,
}

impl Recorded {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn count(&self, name: &str) -> usize {
        self.params.iter().filter(|(k, _)| k == name).count()
    }

    pub fn names(&self) -> Vec<&str> {
        self.params.iter().map(|(k, _)| k.as_str()).collect()
    }
}

type Routes = Arc<HashMap<String, Route>>;
type Log = Arc<Mutex<Vec<Recorded>>>;

pub struct MockReseller {
    addr: SocketAddr,
    log: Log,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl MockReseller {
    /// Start a server on a random port answering `routes` (path → response).
    pub async fn start(routes: Vec<(&str, Route)>) -> Self {
        init_tracing();

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let routes: Routes = Arc::new(
            routes
                .into_iter()
                .map(|(path, route)| (path.to_string(), route))
                .collect(),
        );
        let log: Log = Arc::new(Mutex::new(Vec::new()));
        let (shutdown_tx, mut shutdown_rx) = tokio::sync::oneshot::channel();

        let server_log = log.clone();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    result = listener.accept() => {
                        let Ok((stream, _)) = result else { continue };
                        let io = TokioIo::new(stream);
                        let routes = routes.clone();
                        let log = server_log.clone();

                        tokio::spawn(async move {
                            let service = service_fn(move |req| {
                                handle(req, routes.clone(), log.clone())
                            });
                            let _ = http1::Builder::new().serve_connection(io, service).await;
                        });
                    }
                    _ = &mut shutdown_rx => break,
                }
            }
        });

        Self {
            addr,
            log,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// A client pointed at this server.
    pub fn client(&self) -> Reseller {
        Reseller::builder(API_KEY, API_USER)
            .base_url(self.base_url())
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap()
    }

    /// Every request received so far, in arrival order.
    pub fn requests(&self) -> Vec<Recorded> {
        self.log.lock().unwrap().clone()
    }

    /// The only request received; panics if there is not exactly one.
    pub fn single_request(&self) -> Recorded {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected one request, got {:?}", requests);
        requests.into_iter().next().unwrap()
    }
}

impl Drop for MockReseller {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// Route client logs to the test output, filtered by `RUST_LOG`.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn header(req: &Request<Incoming>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(String::from)
}

async fn handle(
    req: Request<Incoming>,
    routes: Routes,
    log: Log,
) -> Result<Response<Full<Bytes>>, hyper::Error> {
    let method = req.method().to_string();
    let path = req.uri().path().to_string();
    let content_type = header(&req, "content-type");
    let user_agent = header(&req, "user-agent");

    let body = req.into_body().collect().await?.to_bytes();
    let params: Vec<(String, String)> = serde_urlencoded::from_bytes(&body).unwrap_or_default();

    log.lock().unwrap().push(Recorded {
        method,
        path: path.clone(),
        content_type,
        user_agent,
        params,
    });

    let route = routes.get(&path).cloned().unwrap_or_else(|| {
        Route::json(r#"{"error_code":404,"error":"Unknown endpoint"}"#).status(404)
    });

    if let Some(delay) = route.delay {
        tokio::time::sleep(delay).await;
    }

    Ok(Response::builder()
        .status(StatusCode::from_u16(route.status).unwrap())
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(route.body)))
        .unwrap())
}
