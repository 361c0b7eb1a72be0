//! Minimal HTTP stub standing in for the Slack Web API.
//!
//! Serves canned JSON replies in order, one per connection, and records each
//! request as `(path, body)`.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread::JoinHandle;

/// A request the stub received
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub authorization: Option<String>,
    pub body: String,
}

impl RecordedRequest {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("request body is JSON")
    }
}

pub struct FakeSlack {
    pub api_url: String,
    handle: JoinHandle<Vec<RecordedRequest>>,
}

impl FakeSlack {
    /// Start a stub that answers each of `replies` once, in order.
    pub fn serve(replies: Vec<serde_json::Value>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub");
        let api_url = format!("http://{}/api/", listener.local_addr().unwrap());

        let handle = std::thread::spawn(move || {
            let mut requests = Vec::new();
            for reply in replies {
                let (mut stream, _) = listener.accept().expect("accept");
                requests.push(read_request(&mut stream));

                let body = reply.to_string();
                let response = format!(
                    "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                    body.len(),
                    body
                );
                stream.write_all(response.as_bytes()).expect("write reply");
                stream.flush().ok();
            }
            requests
        });

        Self { api_url, handle }
    }

    /// Wait for every canned reply to be served and return the requests.
    pub fn finish(self) -> Vec<RecordedRequest> {
        self.handle.join().expect("stub thread panicked")
    }
}

fn read_request(stream: &mut impl Read) -> RecordedRequest {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = stream.read(&mut chunk).expect("read request");
        assert!(n > 0, "connection closed before headers");
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = find(&buf, b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.lines();
    let path = lines
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or_default()
        .to_string();

    let mut content_length = 0usize;
    let mut chunked = false;
    let mut authorization = None;
    for line in lines {
        let Some((name, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();
        match name.trim().to_ascii_lowercase().as_str() {
            "content-length" => content_length = value.parse().unwrap_or(0),
            "transfer-encoding" => chunked = value.eq_ignore_ascii_case("chunked"),
            "authorization" => authorization = Some(value.to_string()),
            _ => {}
        }
    }

    let body = if chunked {
        while !buf.ends_with(b"0\r\n\r\n") {
            let n = stream.read(&mut chunk).expect("read body");
            assert!(n > 0, "connection closed mid body");
            buf.extend_from_slice(&chunk[..n]);
        }
        decode_chunked(&buf[header_end..])
    } else {
        while buf.len() < header_end + content_length {
            let n = stream.read(&mut chunk).expect("read body");
            assert!(n > 0, "connection closed mid body");
            buf.extend_from_slice(&chunk[..n]);
        }
        buf[header_end..header_end + content_length].to_vec()
    };

    RecordedRequest {
        path,
        authorization,
        body: String::from_utf8_lossy(&body).to_string(),
    }
}

fn decode_chunked(mut raw: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    while let Some(line_end) = find(raw, b"\r\n") {
        let size_line = String::from_utf8_lossy(&raw[..line_end]).to_string();
        let size = usize::from_str_radix(size_line.split(';').next().unwrap_or("0").trim(), 16)
            .unwrap_or(0);
        if size == 0 {
            break;
        }
        let start = line_end + 2;
        out.extend_from_slice(&raw[start..start + size]);
        raw = &raw[start + size + 2..];
    }
    out
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
