//! Minimal loopback HTTP stub that plays back scripted ECS responses.
//!
//! Integration tests are compiled as separate crates (one per top-level file
//! in `tests/`), so this helper lives under `tests/common/` and is reused
//! via:
//!
//! ```rust
//! #[path = "common/stub_ecs.rs"]
//! mod stub_ecs;
//! ```
//!
//! The stub answers one request per scripted response, in order, and records
//! the query string of every request it serves.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;

/// One scripted HTTP response.
#[derive(Clone, Debug)]
pub struct StubResponse {
    status: u16,
    reason: &'static str,
    body: String,
}

impl StubResponse {
    /// A `200 OK` response with a JSON body.
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            reason: "OK",
            body: body.into(),
        }
    }

    /// A non-success response with the given status line and body.
    pub fn error(status: u16, reason: &'static str, body: impl Into<String>) -> Self {
        Self {
            status,
            reason,
            body: body.into(),
        }
    }
}

/// Loopback listener that serves scripted responses sequentially.
pub struct StubEcs {
    endpoint: String,
    queries: Arc<Mutex<Vec<String>>>,
}

impl StubEcs {
    /// Binds an ephemeral port and serves exactly `responses.len()` requests
    /// on a background thread.
    pub fn spawn(responses: Vec<StubResponse>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .unwrap_or_else(|err| panic!("binding the stub listener failed: {err}"));
        let address = listener
            .local_addr()
            .unwrap_or_else(|err| panic!("reading the stub address failed: {err}"));
        let queries = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&queries);

        thread::spawn(move || {
            for response in responses {
                let Ok((stream, _)) = listener.accept() else {
                    return;
                };
                serve_one(stream, &response, &recorded);
            }
        });

        Self {
            endpoint: format!("http://{address}"),
            queries,
        }
    }

    /// Endpoint URL the client under test should be pointed at.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Query strings of the requests served so far, in arrival order.
    pub fn queries(&self) -> Vec<String> {
        self.queries
            .lock()
            .unwrap_or_else(|err| panic!("stub query log lock poisoned: {err}"))
            .clone()
    }
}

fn serve_one(mut stream: TcpStream, response: &StubResponse, recorded: &Arc<Mutex<Vec<String>>>) {
    let mut request = Vec::new();
    let mut chunk = [0_u8; 1024];
    loop {
        match stream.read(&mut chunk) {
            Ok(0) => break,
            Ok(read) => {
                request.extend_from_slice(chunk.get(..read).unwrap_or_default());
                if request.windows(4).any(|window| window == b"\r\n\r\n") {
                    break;
                }
            }
            Err(_) => return,
        }
    }

    let head = String::from_utf8_lossy(&request);
    if let Some(query) = head.lines().next().and_then(query_of) {
        recorded
            .lock()
            .unwrap_or_else(|err| panic!("stub query log lock poisoned: {err}"))
            .push(query);
    }

    let payload = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        response.status,
        response.reason,
        response.body.len(),
        response.body
    );
    stream.write_all(payload.as_bytes()).ok();
    stream.flush().ok();
}

fn query_of(request_line: &str) -> Option<String> {
    let target = request_line.split(' ').nth(1)?;
    let (_, query) = target.split_once('?')?;
    Some(query.to_owned())
}
