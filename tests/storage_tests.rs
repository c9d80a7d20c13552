// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::thread;

use chrono::{Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use cardclip::client::{Client, storage};
use cardclip::config::Config;
use cardclip::error::Error;
use cardclip::schema::StatementRecord;
use cardclip::session::Session;

fn session() -> Session {
    Session {
        user_id: Uuid::new_v4(),
        email: "user@example.com".into(),
        access_token: "token-abc".into(),
        refresh_token: "refresh-xyz".into(),
        expires_at: Utc::now() + Duration::seconds(3600),
    }
}

fn record() -> StatementRecord {
    StatementRecord {
        card_id: Uuid::new_v4(),
        bill_date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
        due_date: NaiveDate::from_ymd_opt(2024, 1, 25).unwrap(),
        amount: Decimal::new(1200050, 2),
    }
}

/// One-thread HTTP stub standing in for the hosted backend. Serves the given
/// number of requests, answering the metadata insert with the configured
/// status/body and everything else with 200, and returns the request lines it
/// saw in order.
fn spawn_backend(
    requests: usize,
    insert_status: &'static str,
    insert_body: String,
) -> (String, thread::JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    let handle = thread::spawn(move || {
        let mut seen = Vec::new();
        for _ in 0..requests {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream);

            let mut request_line = String::new();
            reader.read_line(&mut request_line).unwrap();
            let mut content_length = 0usize;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                if line.trim_end().is_empty() {
                    break;
                }
                if let Some(v) = line.to_ascii_lowercase().strip_prefix("content-length:") {
                    content_length = v.trim().parse().unwrap();
                }
            }
            let mut body = vec![0u8; content_length];
            reader.read_exact(&mut body).unwrap();

            let target = request_line.trim_end().to_string();
            let (status, resp) = if target.starts_with("POST /rest/v1/bill_statements") {
                (insert_status, insert_body.as_str())
            } else {
                ("200 OK", r#"{"message":"ok"}"#)
            };
            let mut stream = reader.into_inner();
            write!(
                stream,
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                resp.len(),
                resp
            )
            .unwrap();
            stream.flush().unwrap();
            seen.push(target);
        }
        seen
    });
    (base_url, handle)
}

fn client_for(base_url: &str) -> Client {
    let config = Config::new(base_url, "anon-key").unwrap();
    Client::new(config, Some(session())).unwrap()
}

fn statement_file(dir: &tempfile::TempDir) -> std::path::PathBuf {
    let path = dir.path().join("jan.pdf");
    std::fs::write(&path, b"%PDF-1.4 stub").unwrap();
    path
}

fn path_of(request_line: &str) -> &str {
    request_line.split_whitespace().nth(1).unwrap()
}

#[test]
fn failed_insert_removes_uploaded_binary() {
    let (base_url, backend) = spawn_backend(
        3,
        "500 Internal Server Error",
        r#"{"message":"insert failed"}"#.to_string(),
    );
    let client = client_for(&base_url);
    let dir = tempfile::tempdir().unwrap();

    let err = storage::upload_statement(&client, &record(), &statement_file(&dir)).unwrap_err();
    match err {
        Error::Remote { status, message } => {
            assert_eq!(status, 500);
            assert!(message.contains("insert failed"));
        }
        other => panic!("expected Remote error, got {:?}", other),
    }

    let seen = backend.join().unwrap();
    assert_eq!(seen.len(), 3);
    assert!(seen[0].starts_with("POST /storage/v1/object/statements/"));
    assert!(seen[1].starts_with("POST /rest/v1/bill_statements"));
    assert!(seen[2].starts_with("DELETE /storage/v1/object/statements/"));
    // The object removed is exactly the one that was stored.
    assert_eq!(path_of(&seen[0]), path_of(&seen[2]));
}

#[test]
fn upload_stores_binary_then_creates_row() {
    let row_id = Uuid::new_v4();
    let rec = record();
    let user = session();
    let insert_body = format!(
        r#"[{{"id":"{}","card_id":"{}","user_id":"{}","file_name":"jan.pdf","file_path":"u/c/jan.pdf","file_size":13,"mime_type":"application/pdf","bill_date":"2024-01-05","due_date":"2024-01-25","amount":"12000.50"}}]"#,
        row_id, rec.card_id, user.user_id
    );
    let (base_url, backend) = spawn_backend(2, "201 Created", insert_body);

    let config = Config::new(&base_url, "anon-key").unwrap();
    let client = Client::new(config, Some(user)).unwrap();
    let dir = tempfile::tempdir().unwrap();

    let row = storage::upload_statement(&client, &rec, &statement_file(&dir)).unwrap();
    assert_eq!(row.id, row_id);
    assert_eq!(row.file_name, "jan.pdf");
    assert_eq!(row.mime_type, "application/pdf");
    assert_eq!(row.amount, Decimal::new(1200050, 2));

    // Binary first, then the metadata row; no compensating delete.
    let seen = backend.join().unwrap();
    assert_eq!(seen.len(), 2);
    assert!(seen[0].starts_with("POST /storage/v1/object/statements/"));
    assert!(seen[1].starts_with("POST /rest/v1/bill_statements"));
}
