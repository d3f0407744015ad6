use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

#[derive(Debug, Clone)]
pub struct CannedResponse {
    status_line: String,
    content_type: &'static str,
    body: String,
}

impl CannedResponse {
    pub fn json(status_line: &str, body: &str) -> Self {
        Self {
            status_line: status_line.to_string(),
            content_type: "application/json",
            body: body.to_string(),
        }
    }

    pub fn text(status_line: &str, body: &str) -> Self {
        Self {
            status_line: status_line.to_string(),
            content_type: "text/plain",
            body: body.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<String> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.clone())
    }
}

pub struct TestServer {
    pub base_url: String,
    handle: JoinHandle<Vec<RecordedRequest>>,
}

impl TestServer {
    pub fn finish(self) -> Vec<RecordedRequest> {
        self.handle.join().expect("test server thread")
    }
}

/// Serves one connection per canned response, in order, then stops.
pub fn spawn_server(responses: Vec<CannedResponse>) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind test server");
    let addr = listener.local_addr().expect("local addr");

    let handle = thread::spawn(move || {
        let mut recorded = Vec::new();
        for response in responses {
            let (mut stream, _) = listener.accept().expect("accept");
            let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));

            let mut request_line = String::new();
            reader
                .read_line(&mut request_line)
                .expect("read request line");
            let mut parts = request_line.split_whitespace();
            let method = parts.next().unwrap_or_default().to_string();
            let path = parts.next().unwrap_or_default().to_string();

            let mut headers = Vec::new();
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).expect("read header line");
                if line == "\r\n" || line.is_empty() {
                    break;
                }
                if let Some((key, value)) = line.trim_end().split_once(':') {
                    headers.push((key.trim().to_string(), value.trim().to_string()));
                }
            }

            let content_length = headers
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case("content-length"))
                .and_then(|(_, value)| value.parse::<usize>().ok())
                .unwrap_or(0);
            let mut body = vec![0u8; content_length];
            reader.read_exact(&mut body).expect("read body");

            recorded.push(RecordedRequest {
                method,
                path,
                headers,
                body: String::from_utf8_lossy(&body).to_string(),
            });

            let payload = format!(
                "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                response.status_line,
                response.content_type,
                response.body.len(),
                response.body
            );
            stream
                .write_all(payload.as_bytes())
                .expect("write response");
        }
        recorded
    });

    TestServer {
        base_url: format!("http://{addr}"),
        handle,
    }
}
