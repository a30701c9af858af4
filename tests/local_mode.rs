//! Local (direct=true) parsing through the HTTP surface.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use serde_json::{json, Value};

mod common;

struct Node {
    addr: SocketAddr,
    data: tempfile::TempDir,
    peer_calls: Arc<AtomicU32>,
    _shutdown: format_relay::Shutdown,
}

impl Node {
    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

async fn start() -> Node {
    let peer_calls = Arc::new(AtomicU32::new(0));
    let pc = peer_calls.clone();
    let peer = common::start_programmable_peer(move || {
        let pc = pc.clone();
        async move {
            pc.fetch_add(1, Ordering::SeqCst);
            (200, "{}".to_string())
        }
    })
    .await;

    let data = common::fixture_root();
    let (listener, addr) = common::bind().await;
    let shutdown = common::spawn_node(listener, common::node_config("node-a", data.path(), peer));

    Node {
        addr,
        data,
        peer_calls,
        _shutdown: shutdown,
    }
}

async fn get_json(url: &str) -> (u16, Value) {
    let res = common::client().get(url).send().await.expect("node unreachable");
    let status = res.status().as_u16();
    (status, res.json().await.unwrap())
}

#[tokio::test]
async fn test_welcome_lists_sets_and_formats() {
    let node = start().await;
    let (status, body) = get_json(&node.url("/")).await;

    assert_eq!(status, 200);
    assert_eq!(body["available_sets"], json!(["books", "movies"]));
    assert_eq!(body["available_formats"], json!(["txt", "xml", "yaml", "json", "csv"]));
    assert!(body["message"].as_str().unwrap().contains("node-a"));
}

#[tokio::test]
async fn test_every_fixture_parses() {
    let node = start().await;

    for set in ["books", "movies"] {
        for format in ["txt", "xml", "yaml", "json", "csv"] {
            let (status, body) = get_json(&node.url(&format!("/parse/{set}/{format}?direct=true"))).await;
            assert_eq!(status, 200, "{set}.{format}: {body}");
            assert_eq!(body["set"], set);
            assert_eq!(body["format"], format);
            assert!(!body["data"].as_object().unwrap().is_empty(), "{set}.{format} was empty");
        }
    }
    assert_eq!(node.peer_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_flat_and_nested_records() {
    let node = start().await;

    let (_, body) = get_json(&node.url("/parse/books/txt?direct=true")).await;
    assert_eq!(body["data"], json!({"title": "Dune", "author": "Frank Herbert", "year": "1965"}));

    let (_, body) = get_json(&node.url("/parse/movies/yaml?direct=true")).await;
    assert_eq!(body["data"]["director"]["name"], "Christopher Nolan");
    assert_eq!(body["data"]["year"], 2010);

    let (_, body) = get_json(&node.url("/parse/movies/csv?direct=true")).await;
    assert_eq!(body["data"]["title"], "Inception");
}

#[tokio::test]
async fn test_unknown_set_is_rejected_before_any_work() {
    let node = start().await;

    for path in [
        "/parse/cars/json?direct=true",
        "/parse/cars/json?direct=false",
        "/parse/cars/json",
        "/parse/cars/bogus",
        "/parse/cars",
        "/parse/cars?direct=false",
    ] {
        let (status, body) = get_json(&node.url(path)).await;
        assert_eq!(status, 400, "{path}");
        assert_eq!(body["detail"], "Invalid set name. Available sets: [books, movies]");
    }
    assert_eq!(node.peer_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_unknown_format_is_rejected() {
    let node = start().await;

    for path in ["/parse/books/ini?direct=true", "/parse/books/JSON"] {
        let (status, body) = get_json(&node.url(path)).await;
        assert_eq!(status, 400, "{path}");
        assert!(body["detail"].as_str().unwrap().starts_with("Invalid file type"));
    }
    assert_eq!(node.peer_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_invalid_direct_flag_is_rejected() {
    let node = start().await;
    let (status, body) = get_json(&node.url("/parse/books/json?direct=maybe")).await;
    assert_eq!(status, 400);
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn test_missing_file_is_404() {
    let node = start().await;
    common::remove_set_file(node.data.path(), "books", "xml");

    let (status, body) = get_json(&node.url("/parse/books/xml?direct=true")).await;
    assert_eq!(status, 404);
    let detail = body["detail"].as_str().unwrap();
    assert!(detail.starts_with("File not found"), "{detail}");
    assert!(detail.ends_with("books.xml"), "{detail}");
}

#[tokio::test]
async fn test_decode_failure_is_500() {
    let node = start().await;
    common::write_set_file(node.data.path(), "books", "txt", "title: Dune\nthis line has no separator\n");

    let (status, body) = get_json(&node.url("/parse/books/txt?direct=true")).await;
    assert_eq!(status, 500);
    assert!(body["detail"].as_str().unwrap().starts_with("Error parsing txt file"));
}

#[tokio::test]
async fn test_header_only_csv_is_empty_record() {
    let node = start().await;
    common::write_set_file(node.data.path(), "books", "csv", "title,author,year\n");

    let (status, body) = get_json(&node.url("/parse/books/csv?direct=true")).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"], json!({}));
}

#[tokio::test]
async fn test_aggregate_survives_one_broken_format() {
    let node = start().await;
    common::write_set_file(node.data.path(), "books", "json", "{\"title\": \"Dune\",");

    let (status, body) = get_json(&node.url("/parse/books?direct=true")).await;
    assert_eq!(status, 200);
    assert_eq!(body["set"], "books");

    let data = body["data"].as_object().unwrap();
    let formats: Vec<_> = data.keys().cloned().collect();
    assert_eq!(formats, vec!["txt", "xml", "yaml", "json", "csv"]);

    for format in ["txt", "xml", "yaml", "csv"] {
        assert_eq!(data[format]["title"], "Dune", "{format}");
    }
    let error = data["json"]["error"].as_str().unwrap();
    assert!(error.starts_with("Error parsing json file"), "{error}");
}

#[tokio::test]
async fn test_aggregate_reports_missing_files_inline() {
    let node = start().await;
    common::remove_set_file(node.data.path(), "movies", "yaml");

    let (status, body) = get_json(&node.url("/parse/movies?direct=true")).await;
    assert_eq!(status, 200);
    assert!(body["data"]["yaml"]["error"].as_str().unwrap().starts_with("File not found"));
    assert_eq!(body["data"]["xml"]["director"], "Christopher Nolan");
}

#[tokio::test]
async fn test_request_id_is_set_and_kept() {
    let node = start().await;
    let client = common::client();

    let res = client.get(node.url("/")).send().await.unwrap();
    let generated = res.headers()["x-request-id"].to_str().unwrap().to_string();
    assert!(uuid::Uuid::parse_str(&generated).is_ok());

    let res = client
        .get(node.url("/"))
        .header("x-request-id", "caller-supplied")
        .send()
        .await
        .unwrap();
    assert_eq!(res.headers()["x-request-id"], "caller-supplied");
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let node = start().await;
    let (status, body) = get_json(&node.url("/parse/books/json/extra")).await;
    assert_eq!(status, 404);
    assert_eq!(body, json!({"detail": "Not Found"}));
}
