use std::io::Read;

use bytes::Bytes;
use http::Method;
use url::Url;

use crate::{
    error::TransportError,
    transport::{HttpRequest, HttpResponse, RequestBody, Transport},
};

/// [`Transport`] backed by a blocking `ureq` agent.
pub struct UreqTransport {
    agent: ureq::Agent,
    insecure_agent: ureq::Agent,
    user_agent: String,
}

impl UreqTransport {
    pub fn new(user_agent: Option<String>) -> Self {
        #[cfg(feature = "rustls")]
        crate::transport::tls::ensure_rustls_crypto_provider();

        let config = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build();

        let insecure_tls = ureq::tls::TlsConfig::builder()
            .disable_verification(true)
            .build();
        let insecure_config = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .tls_config(insecure_tls)
            .build();

        Self {
            agent: ureq::Agent::new_with_config(config),
            insecure_agent: ureq::Agent::new_with_config(insecure_config),
            user_agent: user_agent.unwrap_or_else(default_user_agent),
        }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Transport for UreqTransport {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let HttpRequest {
            method,
            url,
            headers,
            body,
            connect_timeout,
            timeout,
            verify_tls,
        } = request;

        #[cfg(feature = "tracing")]
        let _guard = tracing::debug_span!(
            "s3.http",
            method = %method,
            host = url.host_str().unwrap_or(""),
            path = url.path(),
            body_len = body.len(),
        )
        .entered();

        let agent = if verify_tls {
            &self.agent
        } else {
            &self.insecure_agent
        };
        let opts = RequestOptions {
            headers: &headers,
            user_agent: &self.user_agent,
            connect_timeout,
            timeout,
        };

        let result = match method.as_str() {
            "GET" => {
                ensure_empty_body(&body)?;
                opts.apply(agent.get(url.as_str())).call()
            }
            "HEAD" => {
                ensure_empty_body(&body)?;
                opts.apply(agent.head(url.as_str())).call()
            }
            "DELETE" => {
                ensure_empty_body(&body)?;
                opts.apply(agent.delete(url.as_str())).call()
            }
            "PUT" => {
                let req = opts.apply(agent.put(url.as_str()));
                match body {
                    RequestBody::Empty => req.send_empty(),
                    RequestBody::Bytes(b) => req.send(b.as_ref()),
                    RequestBody::File { mut file, len } => req
                        .header(http::header::CONTENT_LENGTH, len.to_string())
                        .send(ureq::SendBody::from_reader(&mut file)),
                }
            }
            _ => {
                return Err(TransportError::new(
                    "unsupported_method",
                    format!("unsupported HTTP method {method}"),
                ));
            }
        };

        let resp = result.map_err(|err| {
            #[cfg(feature = "tracing")]
            tracing::debug!(error = ?err, "transport error");
            TransportError::new(
                error_code(&err),
                format!("{}: {err}", request_context(&method, &url)),
            )
        })?;

        let (parts, body) = resp.into_parts();
        let mut out = Vec::new();
        body.into_reader().read_to_end(&mut out).map_err(|e| {
            TransportError::new(
                "io",
                format!("failed to read response body: {}: {e}", request_context(&method, &url)),
            )
        })?;

        Ok(HttpResponse {
            status: parts.status,
            headers: parts.headers,
            body: Bytes::from(out),
        })
    }
}

struct RequestOptions<'a> {
    headers: &'a [(String, String)],
    user_agent: &'a str,
    connect_timeout: Option<std::time::Duration>,
    timeout: Option<std::time::Duration>,
}

impl RequestOptions<'_> {
    fn apply<B>(&self, mut req: ureq::RequestBuilder<B>) -> ureq::RequestBuilder<B> {
        req = req.header(http::header::USER_AGENT, self.user_agent);
        for (name, value) in self.headers {
            // ureq derives Host from the URL, which already carries the same authority.
            if name.eq_ignore_ascii_case("host") {
                continue;
            }
            req = req.header(name.as_str(), value.as_str());
        }

        if self.connect_timeout.is_some() || self.timeout.is_some() {
            req = req
                .config()
                .timeout_connect(self.connect_timeout)
                .timeout_global(self.timeout)
                .build();
        }

        req
    }
}

fn error_code(err: &ureq::Error) -> &'static str {
    match err {
        ureq::Error::Timeout(_) => "timeout",
        ureq::Error::HostNotFound => "host_not_found",
        ureq::Error::ConnectionFailed => "connection_failed",
        ureq::Error::Io(_) => "io",
        ureq::Error::Protocol(_) => "protocol",
        ureq::Error::BadUri(_) => "bad_uri",
        _ => "other",
    }
}

fn request_context(method: &Method, url: &Url) -> String {
    let authority = match (url.host_str(), url.port()) {
        (Some(host), Some(port)) => format!("{host}:{port}"),
        (Some(host), None) => host.to_string(),
        (None, _) => String::new(),
    };

    if authority.is_empty() {
        format!("{method} {}", url.path())
    } else {
        format!("{method} {authority}{}", url.path())
    }
}

fn ensure_empty_body(body: &RequestBody) -> Result<(), TransportError> {
    match body {
        RequestBody::Empty => Ok(()),
        RequestBody::Bytes(_) | RequestBody::File { .. } => Err(TransportError::new(
            "unexpected_body",
            "this method does not accept a request body",
        )),
    }
}

fn default_user_agent() -> String {
    format!("s3v2/{}", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;
    use std::io::{ErrorKind, Read, Write};
    use std::net::TcpListener;
    use std::sync::mpsc;
    use std::time::{Duration, Instant};

    /// Serves one connection with `response` and hands the raw request back.
    fn serve_once(response: &'static [u8]) -> (Url, mpsc::Receiver<Vec<u8>>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.set_nonblocking(true).unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || {
            let deadline = Instant::now() + Duration::from_secs(5);
            loop {
                match listener.accept() {
                    Ok((mut stream, _)) => {
                        let _ = stream.set_nonblocking(false);
                        let _ = stream.set_read_timeout(Some(Duration::from_secs(1)));
                        let request = read_request(&mut stream);
                        let _ = stream.write_all(response);
                        let _ = stream.flush();
                        let _ = tx.send(request);
                        break;
                    }
                    Err(err) if err.kind() == ErrorKind::WouldBlock => {
                        if Instant::now() >= deadline {
                            break;
                        }
                        std::thread::sleep(Duration::from_millis(10));
                    }
                    Err(_) => break,
                }
            }
        });

        (Url::parse(&format!("http://{addr}/")).unwrap(), rx)
    }

    fn read_request(stream: &mut std::net::TcpStream) -> Vec<u8> {
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        loop {
            if let Some(end) = request.windows(4).position(|w| w == b"\r\n\r\n") {
                let head = String::from_utf8_lossy(&request[..end]).to_ascii_lowercase();
                let content_length = head
                    .lines()
                    .find_map(|l| l.strip_prefix("content-length:"))
                    .and_then(|v| v.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if request.len() >= end + 4 + content_length {
                    break;
                }
            }
            match stream.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => request.extend_from_slice(&buf[..n]),
                Err(_) => break,
            }
        }
        request
    }

    #[test]
    fn returns_response_for_http_error_status() {
        let (url, rx) = serve_once(
            b"HTTP/1.1 404 Not Found\r\nContent-Length: 9\r\nConnection: close\r\n\r\nNoSuchKey",
        );
        let transport = UreqTransport::default();

        let mut request = HttpRequest::new(Method::GET, url);
        request.headers.push(("Date".into(), "Tue, 27 Mar 2007 19:36:42 GMT".into()));
        request.timeout = Some(Duration::from_secs(5));
        let resp = transport.send(request).unwrap();

        assert_eq!(resp.status, StatusCode::NOT_FOUND);
        assert_eq!(resp.body, Bytes::from_static(b"NoSuchKey"));

        let raw = String::from_utf8(rx.recv_timeout(Duration::from_secs(5)).unwrap()).unwrap();
        assert!(raw.starts_with("GET / HTTP/1.1\r\n"));
        assert!(raw.to_ascii_lowercase().contains("date: tue, 27 mar 2007 19:36:42 gmt\r\n"));
    }

    #[test]
    fn streams_file_body_with_content_length() {
        let (url, rx) =
            serve_once(b"HTTP/1.1 200 OK\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");

        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(b"file contents").unwrap();
        let file = std::fs::File::open(tmp.path()).unwrap();

        let mut request = HttpRequest::new(Method::PUT, url.join("obj.txt").unwrap());
        request.body = RequestBody::File { file, len: 13 };
        let resp = UreqTransport::default().send(request).unwrap();
        assert_eq!(resp.status, StatusCode::OK);

        let raw = String::from_utf8(rx.recv_timeout(Duration::from_secs(5)).unwrap()).unwrap();
        assert!(raw.starts_with("PUT /obj.txt HTTP/1.1\r\n"));
        assert!(raw.to_ascii_lowercase().contains("content-length: 13\r\n"));
        assert!(raw.ends_with("\r\n\r\nfile contents"));
    }

    #[test]
    fn refused_connection_is_a_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let mut request =
            HttpRequest::new(Method::GET, Url::parse(&format!("http://{addr}/")).unwrap());
        request.connect_timeout = Some(Duration::from_secs(2));
        let err = UreqTransport::default().send(request).unwrap_err();
        assert!(!err.code.is_empty());
        assert!(err.message.contains("GET 127.0.0.1"));
    }

    #[test]
    fn get_with_body_is_rejected_before_sending() {
        let mut request =
            HttpRequest::new(Method::GET, Url::parse("http://127.0.0.1:9/").unwrap());
        request.body = RequestBody::Bytes(Bytes::from_static(b"x"));
        let err = UreqTransport::default().send(request).unwrap_err();
        assert_eq!(err.code, "unexpected_body");
    }
}
