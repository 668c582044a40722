//! A small CRUD service over an in-memory entry store.
//!
//! ```text
//! cargo run --example entries -- --addr 127.0.0.1:8000
//! curl -X POST -d '{"content": "hello"}' http://127.0.0.1:8000/
//! curl http://127.0.0.1:8000/
//! ```

use regex_router::hyper_service::modified;
use regex_router::json::{json_error, json_response, std_json_response};
use regex_router::{Args, BoxHandler, Response, Router, RouterService};

use std::collections::HashMap;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use clap::Parser;
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper_util::rt::TokioIo;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Parser)]
#[command(about = "In-memory entry store")]
struct Cli {
    /// Address to listen on.
    #[arg(long, env = "ENTRIES_ADDR", default_value = "127.0.0.1:8000")]
    addr: SocketAddr,
}

#[derive(Debug, Clone, Serialize)]
struct Entry {
    id: String,
    content: String,
    created: u64,
    updated: u64,
}

#[derive(Debug, Default)]
struct Database {
    idx: Mutex<HashMap<String, Entry>>,
}

impl Database {
    fn list(&self) -> Vec<Entry> {
        let mut entries: Vec<Entry> = self.idx.lock().values().cloned().collect();
        entries.sort_by(|a, b| a.id.cmp(&b.id));
        entries
    }

    fn get(&self, id: &str) -> Option<Entry> {
        self.idx.lock().get(id).cloned()
    }

    fn create(&self, content: String) -> Entry {
        let now = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default();
        let entry = Entry {
            id: format!("entry-{}", now.as_nanos()),
            content,
            created: now.as_secs(),
            updated: now.as_secs(),
        };
        self.idx.lock().insert(entry.id.clone(), entry.clone());
        entry
    }

    fn set(&self, id: &str, content: String) -> Option<Entry> {
        let mut idx = self.idx.lock();
        let entry = idx.get_mut(id)?;
        entry.content = content;
        entry.updated = unix_now();
        Some(entry.clone())
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

#[derive(Debug, Deserialize)]
struct Input {
    #[serde(default)]
    content: String,
}

#[derive(Debug, Serialize)]
struct EntryList {
    entries: Vec<Entry>,
}

async fn read_input(req: Request<Incoming>) -> Result<String, Response> {
    let body = match req.into_body().collect().await {
        Ok(body) => body.to_bytes(),
        Err(e) => {
            let msg = format!("cannot read body: {}", e);
            return Err(json_error(&msg, StatusCode::BAD_REQUEST));
        }
    };
    let input: Input = match serde_json::from_slice(&body) {
        Ok(input) => input,
        Err(e) => {
            let msg = format!("cannot decode: {}", e);
            return Err(json_error(&msg, StatusCode::BAD_REQUEST));
        }
    };
    if input.content.is_empty() {
        return Err(json_error("\"content\" is required", StatusCode::BAD_REQUEST));
    }
    Ok(input.content)
}

async fn handle_list(db: Arc<Database>) -> Result<Response, Infallible> {
    let resp = EntryList {
        entries: db.list(),
    };
    Ok(json_response(&resp, StatusCode::OK))
}

async fn handle_create(db: Arc<Database>, req: Request<Incoming>) -> Result<Response, Infallible> {
    let content = match read_input(req).await {
        Ok(content) => content,
        Err(res) => return Ok(res),
    };
    let entry = db.create(content);
    info!(id = %entry.id, "entry created");
    Ok(json_response(&entry, StatusCode::CREATED))
}

async fn handle_get(
    db: Arc<Database>,
    req: Request<Incoming>,
    args: Args,
) -> Result<Response, Infallible> {
    let entry = match db.get(args.index(0).unwrap_or_default()) {
        Some(entry) => entry,
        None => return Ok(std_json_response(StatusCode::NOT_FOUND)),
    };
    let mut res = json_response(&entry, StatusCode::OK);
    modified(&req, &mut res, UNIX_EPOCH + Duration::from_secs(entry.updated));
    Ok(res)
}

async fn handle_set(
    db: Arc<Database>,
    req: Request<Incoming>,
    args: Args,
) -> Result<Response, Infallible> {
    let content = match read_input(req).await {
        Ok(content) => content,
        Err(res) => return Ok(res),
    };
    match db.set(args.index(0).unwrap_or_default(), content) {
        Some(entry) => Ok(json_response(&entry, StatusCode::OK)),
        None => Ok(std_json_response(StatusCode::NOT_FOUND)),
    }
}

fn app(db: Arc<Database>) -> RouterService<Incoming> {
    let mut router: Router<BoxHandler<Incoming>> = Router::new();

    let list = Arc::clone(&db);
    let create = Arc::clone(&db);
    let get = Arc::clone(&db);
    let set = db;

    router
        .get("/", move |_: Request<Incoming>, _: Args| handle_list(Arc::clone(&list)))
        .post("/", move |req: Request<Incoming>, _: Args| {
            handle_create(Arc::clone(&create), req)
        })
        .get("/{entry-id}", move |req: Request<Incoming>, args: Args| {
            handle_get(Arc::clone(&get), req, args)
        })
        .put("/{entry-id}", move |req: Request<Incoming>, args: Args| {
            handle_set(Arc::clone(&set), req, args)
        });

    for (pattern, methods, _) in router.iter() {
        info!(pattern, %methods, "route");
    }

    router.into_service().with_recovery()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "regex_router=debug,entries=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let svc = app(Arc::new(Database::default()));

    let listener = TcpListener::bind(cli.addr).await?;
    info!(addr = %cli.addr, "listening");

    loop {
        let (stream, remote) = listener.accept().await?;
        let svc = svc.clone();
        tokio::spawn(async move {
            let conn = http1::Builder::new().serve_connection(TokioIo::new(stream), svc);
            if let Err(e) = conn.await {
                warn!(%remote, error = %e, "connection error");
            }
        });
    }
}
