//! `HttpSource` against a canned local HTTP server.

use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

use scanshelf::logic::normalize;
use scanshelf::sources::{HttpSource, MAX_PAGES, RecordSource};

/// Request line and `Authorization` header seen by the server.
type Seen = Arc<Mutex<Vec<(String, Option<String>)>>>;

/// What: Serve canned responses, one per connection.
///
/// Inputs:
/// - `responses`: `(status line, body)` pairs served in order
///
/// Output:
/// - Base URL and the log of received requests
fn serve(responses: Vec<(&'static str, String)>) -> (String, Seen) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    let seen: Seen = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&seen);
    thread::spawn(move || {
        for (status, body) in responses {
            let Ok((mut stream, _)) = listener.accept() else {
                return;
            };
            let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));
            let mut request_line = String::new();
            let _ = reader.read_line(&mut request_line);
            let mut auth = None;
            loop {
                let mut line = String::new();
                if reader.read_line(&mut line).unwrap_or(0) == 0 || line == "\r\n" {
                    break;
                }
                if let Some((k, v)) = line.split_once(':')
                    && k.eq_ignore_ascii_case("authorization")
                {
                    auth = Some(v.trim().to_string());
                }
            }
            log.lock()
                .expect("log lock")
                .push((request_line.trim().to_string(), auth));
            let reply = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = stream.write_all(reply.as_bytes());
        }
    });
    (format!("http://{addr}/v0/base/Inventory"), seen)
}

fn row(code: &str, name: &str) -> String {
    format!(
        r#"{{"id":"rec-{code}","fields":{{"Product Code":"{code}","Posted":"2024-05-01T09:00:00Z","Product Name":"{name}"}}}}"#
    )
}

#[tokio::test(flavor = "multi_thread")]
/// What: Continuation pages are followed and concatenated in order.
///
/// Inputs:
/// - Page 1 with two rows and `offset` `"itr/2"`; page 2 with one row.
///
/// Output:
/// - Three rows in server order; second request carries the encoded offset
///   and the bearer token.
async fn follows_offset_pages() {
    let page1 = format!(
        r#"{{"records":[{},{}],"offset":"itr/2"}}"#,
        row("111", "Pen"),
        row("222", "Stapler")
    );
    let page2 = format!(r#"{{"records":[{}]}}"#, row("333", "Tape"));
    let (url, seen) = serve(vec![("200 OK", page1), ("200 OK", page2)]);

    let source = HttpSource::new(url, Some("secret".into())).expect("client");
    let rows = source.list_inventory_records().await.expect("rows");
    let records = normalize(rows);
    let codes: Vec<&str> = records.iter().map(|r| r.code.as_str()).collect();
    assert_eq!(codes, ["111", "222", "333"]);

    let seen = seen.lock().expect("log lock");
    assert_eq!(seen.len(), 2);
    assert!(seen[1].0.contains("offset=itr%2F2"), "request: {}", seen[1].0);
    assert_eq!(seen[0].1.as_deref(), Some("Bearer secret"));
}

#[tokio::test(flavor = "multi_thread")]
/// What: An empty collection is a success, not an error.
///
/// Inputs:
/// - Bare empty array body.
///
/// Output:
/// - `Ok(vec![])`.
async fn empty_collection_is_ok() {
    let (url, _seen) = serve(vec![("200 OK", "[]".to_string())]);
    let source = HttpSource::new(url, None).expect("client");
    let rows = source.list_inventory_records().await.expect("rows");
    assert!(rows.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
/// What: Non-success statuses become errors naming the status.
///
/// Inputs:
/// - `401 Unauthorized`.
///
/// Output:
/// - `Err` mentioning 401.
async fn error_status_fails() {
    let (url, _seen) = serve(vec![(
        "401 Unauthorized",
        r#"{"error":"AUTHENTICATION_REQUIRED"}"#.to_string(),
    )]);
    let source = HttpSource::new(url, None).expect("client");
    let err = source
        .list_inventory_records()
        .await
        .expect_err("unauthorized");
    assert!(err.to_string().contains("401"), "unexpected: {err}");
}

#[tokio::test(flavor = "multi_thread")]
/// What: A backend that never stops paging fails the fetch instead of
/// returning a truncated collection.
///
/// Inputs:
/// - `MAX_PAGES` pages, each carrying a row and a fresh `offset`.
///
/// Output:
/// - `Err` mentioning the page limit after exactly `MAX_PAGES` requests.
async fn endless_paging_fails() {
    let pages = (0..MAX_PAGES)
        .map(|i| {
            let body = format!(
                r#"{{"records":[{}],"offset":"itr{i}"}}"#,
                row(&i.to_string(), "Item")
            );
            ("200 OK", body)
        })
        .collect();
    let (url, seen) = serve(pages);
    let source = HttpSource::new(url, None).expect("client");
    let err = source
        .list_inventory_records()
        .await
        .expect_err("page limit");
    assert!(err.to_string().contains("page limit"), "unexpected: {err}");
    assert_eq!(seen.lock().expect("log lock").len(), MAX_PAGES);
}
