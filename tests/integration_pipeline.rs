//! End-to-end ingestion tests against a stub Warp10 backend
//!
//! These tests run the full per-file pipeline — filename labels, CSV
//! decoding, series building, wire encoding — and push to a minimal
//! in-process HTTP responder, verifying both the request the backend
//! sees and the outcome handling on success and rejection.

use std::fs;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use lightcurve_ingestor::Error;
use lightcurve_ingestor::app::services::pipeline;
use lightcurve_ingestor::app::services::warp10_client::Warp10Client;

/// Spawn a one-shot HTTP responder answering with the given status line
///
/// Returns the base endpoint URL and a handle resolving to the full
/// request text (headers and body) the responder captured.
async fn spawn_stub_backend(status_line: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();

        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        let request = loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break String::from_utf8_lossy(&buf).to_string();
            }
            buf.extend_from_slice(&chunk[..n]);

            if let Some(header_end) = find_subslice(&buf, b"\r\n\r\n") {
                let headers = String::from_utf8_lossy(&buf[..header_end]).to_string();
                let content_length = headers
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        if name.eq_ignore_ascii_case("content-length") {
                            value.trim().parse::<usize>().ok()
                        } else {
                            None
                        }
                    })
                    .unwrap_or(0);

                let mut body = buf[header_end + 4..].to_vec();
                while body.len() < content_length {
                    let n = socket.read(&mut chunk).await.unwrap();
                    if n == 0 {
                        break;
                    }
                    body.extend_from_slice(&chunk[..n]);
                }

                break format!("{}\r\n\r\n{}", headers, String::from_utf8_lossy(&body));
            }
        };

        let response = format!(
            "HTTP/1.1 {}\r\ncontent-length: 4\r\nconnection: close\r\n\r\noops",
            status_line
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();

        request
    });

    (format!("http://{}", addr), handle)
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

fn write_lightcurve(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[tokio::test]
async fn test_ingest_file_pushes_encoded_batch() {
    let (endpoint, backend) = spawn_stub_backend("200 OK").await;
    let client = Warp10Client::new(&endpoint, "write-token");

    let dir = TempDir::new().unwrap();
    let path = write_lightcurve(
        &dir,
        "kplr000000001-x_llc.csv",
        "TIME,FLUX\n100,1.0e1\n200,nan\n",
    );

    let report = pipeline::ingest_file(&path, &client).await.unwrap();
    assert_eq!(report.series_built, 1);
    assert_eq!(report.datapoints_built, 1);
    assert_eq!(report.rows_skipped, 1);

    let request = backend.await.unwrap();

    // Push goes to the update endpoint with the write token attached
    assert!(request.starts_with("POST /api/v0/update HTTP/1.1\r\n"));
    assert!(
        request
            .lines()
            .any(|line| line.eq_ignore_ascii_case("x-warp10-token: write-token"))
    );

    // One line per datapoint in the input format; the nan row is absent
    assert!(request.contains(
        "100000000// kepler.flux{campaign=kplr,id=000000001,catalog=KIC} 10.0"
    ));
    assert!(!request.contains("200000000//"));
}

#[tokio::test]
async fn test_ingest_file_multi_column() {
    let (endpoint, backend) = spawn_stub_backend("200 OK").await;
    let client = Warp10Client::new(&endpoint, "write-token");

    let dir = TempDir::new().unwrap();
    let path = write_lightcurve(
        &dir,
        "ktwo246516122-c12_llc.csv",
        "TIME,SAP_FLUX,SAP_FLUX_ERR\n100,1.5e2,1.5e-2\n",
    );

    let report = pipeline::ingest_file(&path, &client).await.unwrap();
    assert_eq!(report.series_built, 2);
    assert_eq!(report.datapoints_built, 2);

    let request = backend.await.unwrap();
    assert!(request.contains(
        "100000000// kepler.sap.flux{campaign=ktwo,id=246516122,catalog=EPIC} 150.0"
    ));
    assert!(request.contains(
        "100000000// kepler.sap.flux.err{campaign=ktwo,id=246516122,catalog=EPIC} 0.015"
    ));
}

#[tokio::test]
async fn test_backend_rejection_is_fatal() {
    let (endpoint, _backend) = spawn_stub_backend("500 Internal Server Error").await;
    let client = Warp10Client::new(&endpoint, "write-token");

    let dir = TempDir::new().unwrap();
    let path = write_lightcurve(&dir, "kplr000000001-x.csv", "TIME,FLUX\n100,1.0\n");

    match pipeline::ingest_file(&path, &client).await.unwrap_err() {
        Error::BackendRejected { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "oops");
        }
        other => panic!("expected BackendRejected, got {:?}", other),
    }

    // The source file is untouched on failure
    assert!(path.exists());
}

#[tokio::test]
async fn test_unreachable_backend_is_a_delivery_error() {
    // Bind-then-drop to get a port nothing is listening on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let endpoint = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let client = Warp10Client::new(&endpoint, "write-token");

    let dir = TempDir::new().unwrap();
    let path = write_lightcurve(&dir, "kplr000000001-x.csv", "TIME,FLUX\n100,1.0\n");

    assert!(matches!(
        pipeline::ingest_file(&path, &client).await.unwrap_err(),
        Error::Delivery { .. }
    ));
}

#[tokio::test]
async fn test_build_failure_never_reaches_the_backend() {
    // The stub would panic on a connection; a parse failure must abort
    // before any request is made.
    let client = Warp10Client::new("http://127.0.0.1:9", "write-token");

    let dir = TempDir::new().unwrap();
    let path = write_lightcurve(&dir, "kplr000000001-x.csv", "TIME,FLUX\n100,bogus\n");

    assert!(matches!(
        pipeline::ingest_file(&path, &client).await.unwrap_err(),
        Error::Parse { .. }
    ));
}
