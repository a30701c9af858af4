//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::future::Future;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use format_relay::config::NodeConfig;
use format_relay::http::HttpServer;
use format_relay::lifecycle::Shutdown;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

pub const BOOKS_TXT: &str = "title: Dune\nauthor: Frank Herbert\nyear: 1965\n";
pub const BOOKS_XML: &str = "<?xml version=\"1.0\"?>\n<book>\n  <title>Dune</title>\n  <author>Frank Herbert</author>\n  <year>1965</year>\n</book>\n";
pub const BOOKS_YAML: &str = "title: Dune\nauthor: Frank Herbert\nyear: 1965\ngenres:\n  - Science Fiction\n  - Adventure\n";
pub const BOOKS_JSON: &str = "{\"title\": \"Dune\", \"author\": \"Frank Herbert\", \"year\": 1965}";
pub const BOOKS_CSV: &str = "title,author,year\nDune,Frank Herbert,1965\n";

pub const MOVIES_TXT: &str = "title: Inception\ndirector: Christopher Nolan\nyear: 2010\n";
pub const MOVIES_XML: &str = "<movie><title>Inception</title><director>Christopher Nolan</director><year>2010</year></movie>";
pub const MOVIES_YAML: &str = "title: Inception\ndirector:\n  name: Christopher Nolan\nyear: 2010\n";
pub const MOVIES_JSON: &str = "{\"title\": \"Inception\", \"cast\": [\"Leonardo DiCaprio\", \"Elliot Page\"]}";
pub const MOVIES_CSV: &str = "title,director,year\nInception,Christopher Nolan,2010\nHeat,Michael Mann,1995\n";

/// Write a well-formed file for every (set, format) pair.
pub fn write_fixtures(root: &Path) {
    let files = [
        ("books", "txt", BOOKS_TXT),
        ("books", "xml", BOOKS_XML),
        ("books", "yaml", BOOKS_YAML),
        ("books", "json", BOOKS_JSON),
        ("books", "csv", BOOKS_CSV),
        ("movies", "txt", MOVIES_TXT),
        ("movies", "xml", MOVIES_XML),
        ("movies", "yaml", MOVIES_YAML),
        ("movies", "json", MOVIES_JSON),
        ("movies", "csv", MOVIES_CSV),
    ];
    for (set, format, content) in files {
        write_set_file(root, set, format, content);
    }
}

pub fn write_set_file(root: &Path, set: &str, format: &str, content: &str) {
    let dir = root.join(set);
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join(format!("{}.{}", set, format)), content).unwrap();
}

pub fn remove_set_file(root: &Path, set: &str, format: &str) {
    std::fs::remove_file(root.join(set).join(format!("{}.{}", set, format))).unwrap();
}

/// A data root populated with every fixture.
pub fn fixture_root() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_fixtures(dir.path());
    dir
}

/// Config for a node serving `data_root` and relaying to `peer`.
pub fn node_config(name: &str, data_root: &Path, peer: SocketAddr) -> NodeConfig {
    let mut config = NodeConfig::default();
    config.node.name = name.to_string();
    config.node.bind_address = "127.0.0.1:0".to_string();
    config.catalog.data_root = data_root.to_path_buf();
    config.peer.base_url = format!("http://{}", peer);
    config.peer.timeout_secs = 5;
    config
}

/// Bind an ephemeral local port.
pub async fn bind() -> (TcpListener, SocketAddr) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    (listener, addr)
}

/// An address nothing listens on.
pub async fn closed_addr() -> SocketAddr {
    let (listener, addr) = bind().await;
    drop(listener);
    addr
}

/// Run a node on `listener` until the returned handle is triggered or dropped.
pub fn spawn_node(listener: TcpListener, config: NodeConfig) -> Shutdown {
    let shutdown = Shutdown::new();
    let server = HttpServer::new(config).unwrap();
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });
    shutdown
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

/// Start a raw HTTP/1.1 peer that answers every request with `f()`'s status and body.
pub async fn start_programmable_peer<F, Fut>(f: F) -> SocketAddr
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let (listener, addr) = bind().await;
    let f = Arc::new(f);

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let f = f.clone();
            tokio::spawn(async move {
                read_request_head(&mut socket).await;

                let (status, body) = f().await;
                let status_text = match status {
                    200 => "200 OK",
                    404 => "404 Not Found",
                    500 => "500 Internal Server Error",
                    502 => "502 Bad Gateway",
                    503 => "503 Service Unavailable",
                    _ => "200 OK",
                };

                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status_text,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    addr
}

async fn read_request_head(socket: &mut tokio::net::TcpStream) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }
}
