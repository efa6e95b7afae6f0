//! Runs the probe against a throwaway HTTP stub on localhost.

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use ems_diagnostics::{BackendProbe, EndpointStatus, ProbeConfig};

/// Serve canned responses keyed on the request line, then close each connection.
async fn spawn_stub() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                return;
            };
            tokio::spawn(async move {
                let mut buf = Vec::new();
                let mut chunk = [0u8; 1024];
                while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut chunk).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => buf.extend_from_slice(&chunk[..n]),
                    }
                }

                let request = String::from_utf8_lossy(&buf);
                let request_line = request.lines().next().unwrap_or_default().to_string();
                let response = respond(&request_line);
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    format!("http://{addr}/api")
}

fn respond(request_line: &str) -> String {
    let (status, headers, body) = if request_line.starts_with("OPTIONS /api/demo/roles") {
        (
            "204 No Content",
            "Access-Control-Allow-Origin: http://localhost:3000\r\n\
             Access-Control-Allow-Methods: GET,POST\r\n\
             Access-Control-Allow-Credentials: true\r\n",
            "",
        )
    } else if request_line.starts_with("GET /api/demo/roles ") {
        ("200 OK", "Content-Type: application/json\r\n", r#"["admin","hr","employee"]"#)
    } else if request_line.starts_with("GET /api/demo/broken ") {
        ("200 OK", "Content-Type: text/plain\r\n", "not json")
    } else {
        ("404 Not Found", "", "")
    };

    format!(
        "HTTP/1.1 {status}\r\n{headers}Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    )
}

fn config_for(api_base: String, endpoints: &[&str]) -> ProbeConfig {
    ProbeConfig {
        api_base,
        endpoints: endpoints.iter().map(|e| e.to_string()).collect(),
        timeout: Duration::from_secs(5),
        ..ProbeConfig::default()
    }
}

#[tokio::test]
async fn classifies_each_endpoint() {
    let base = spawn_stub().await;
    let probe = BackendProbe::new(config_for(
        base,
        &["/demo/roles", "/admin/employees/stats", "/demo/broken"],
    ))
    .unwrap();

    let reports = probe.probe_endpoints().await;
    assert_eq!(reports.len(), 3);

    assert_eq!(
        reports[0].status,
        EndpointStatus::Success {
            status: 200,
            preview: r#"["admin","hr","employee"]"#.to_string(),
        }
    );
    assert_eq!(
        reports[1].status,
        EndpointStatus::Failed {
            status: 404,
            reason: "Not Found".to_string(),
        }
    );
    assert!(matches!(reports[2].status, EndpointStatus::Error { .. }));
}

#[tokio::test]
async fn reports_preflight_headers() {
    let base = spawn_stub().await;
    let probe = BackendProbe::new(config_for(base, &["/demo/roles"])).unwrap();

    let cors = probe.probe_cors().await;
    assert_eq!(cors.status, Some(204));
    assert_eq!(cors.allow_methods.as_deref(), Some("GET,POST"));
    assert_eq!(cors.allow_credentials.as_deref(), Some("true"));
    assert!(cors.allows_origin("http://localhost:3000"));
    assert!(cors.error.is_none());
}

#[tokio::test]
async fn unreachable_backend_is_an_error_not_a_panic() {
    // Bind then drop to get a port nothing listens on.
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    };
    let probe = BackendProbe::new(config_for(format!("http://{addr}/api"), &["/demo/roles"])).unwrap();

    let summary = probe.run().await;
    assert_eq!(summary.passed(), 0);
    assert!(matches!(summary.endpoints[0].status, EndpointStatus::Error { .. }));
    assert!(summary.cors.error.is_some());
}
