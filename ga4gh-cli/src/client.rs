//! Query a running server and decode the error it answers with

use anyhow::Context;
use ga4gh_error::{DecodeError, ErrorKind, ErrorPayload, StatusClass};
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// What a server answered, seen through the error registry
#[derive(Debug)]
pub enum Outcome {
    /// 2xx; nothing to decode
    Success { status: StatusCode },

    /// A registered error payload
    Error {
        status: StatusCode,
        kind: ErrorKind,
        payload: ErrorPayload,
        /// The observed status is the one the kind's status class prescribes
        status_agrees: bool,
    },

    /// A failure status whose body is not a registered error payload
    Undecodable {
        status: StatusCode,
        reason: DecodeError,
    },
}

/// Interpret a response status and body
pub fn interpret(status: StatusCode, body: &str) -> Outcome {
    if status.is_success() {
        return Outcome::Success { status };
    }

    match ErrorPayload::decode(body) {
        Ok((kind, payload)) => {
            let status_agrees = payload.matches_status(status);
            if !status_agrees {
                tracing::warn!(
                    %status,
                    kind = kind.name(),
                    expected = %kind.status_class().http_status(),
                    "status does not match the error kind"
                );
            }
            Outcome::Error {
                status,
                kind,
                payload,
                status_agrees,
            }
        }
        Err(reason) => {
            if StatusClass::from_http_status(status).is_some() {
                tracing::debug!(%status, %reason, "failure status without a registered payload");
            }
            Outcome::Undecodable { status, reason }
        }
    }
}

/// HTTP client for querying a server
pub struct ErrorFetcher {
    client: Client,
}

impl ErrorFetcher {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// GET `url`, or POST `body` as JSON when given, and interpret the answer
    pub async fn fetch(&self, url: &str, body: Option<String>) -> anyhow::Result<Outcome> {
        let req = match body {
            Some(body) => self
                .client
                .post(url)
                .header("Content-Type", "application/json")
                .body(body),
            None => self.client.get(url),
        };

        tracing::debug!(url, "fetching");
        let response = req.send().await?;
        let status = response.status();
        let text = response.text().await.context("reading response body")?;

        Ok(interpret(status, &text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one response: `head` followed by `body`, then close the connection
    async fn serve_once(head: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            socket.write_all(head.as_bytes()).await.unwrap();
            socket.write_all(body.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });

        format!("http://{}/v0.5.1/variantsets/vs1", addr)
    }

    #[tokio::test]
    async fn test_fetch_decodes_error_response() {
        let url = serve_once(
            concat!(
                "HTTP/1.1 404 Not Found\r\n",
                "Content-Type: application/json\r\n",
                "Content-Length: 60\r\n",
                "Connection: close\r\n\r\n",
            ),
            r#"{"errorCode": 1524712338, "message": "VariantSet not found"}"#,
        )
        .await;

        let fetcher = ErrorFetcher::new(Duration::from_secs(5)).unwrap();
        match fetcher.fetch(&url, None).await.unwrap() {
            Outcome::Error {
                kind,
                status_agrees,
                ..
            } => {
                assert_eq!(kind, ErrorKind::VariantSetNotFound);
                assert!(status_agrees);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_truncated_body_is_an_error() {
        let url = serve_once(
            concat!(
                "HTTP/1.1 404 Not Found\r\n",
                "Content-Type: application/json\r\n",
                "Content-Length: 500\r\n",
                "Connection: close\r\n\r\n",
            ),
            r#"{"errorCode": 1524712338, "mess"#,
        )
        .await;

        let fetcher = ErrorFetcher::new(Duration::from_secs(5)).unwrap();
        let err = fetcher.fetch(&url, None).await.unwrap_err();
        assert!(format!("{:#}", err).contains("reading response body"));
    }

    #[test]
    fn test_interpret_success() {
        assert!(matches!(
            interpret(StatusCode::OK, "{\"variantSets\": []}"),
            Outcome::Success { .. }
        ));
    }

    #[test]
    fn test_interpret_registered_error() {
        let body = r#"{"errorCode": 4118815675, "message": "callSet 'cs1' not in vs2"}"#;

        match interpret(StatusCode::NOT_FOUND, body) {
            Outcome::Error {
                kind,
                payload,
                status_agrees,
                ..
            } => {
                assert_eq!(kind, ErrorKind::CallSetNotInVariantSet);
                assert!(payload.message.contains("cs1"));
                assert!(status_agrees);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_interpret_status_mismatch() {
        let body = r#"{"errorCode": 2639844098, "message": "Request page size '-1' is invalid"}"#;

        match interpret(StatusCode::INTERNAL_SERVER_ERROR, body) {
            Outcome::Error { status_agrees, .. } => assert!(!status_agrees),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_interpret_html_error_page() {
        let outcome = interpret(StatusCode::NOT_FOUND, "<h1>Not Found</h1>");
        assert!(matches!(
            outcome,
            Outcome::Undecodable {
                reason: DecodeError::Json(_),
                ..
            }
        ));
    }

    #[test]
    fn test_interpret_unknown_code() {
        let outcome = interpret(StatusCode::BAD_REQUEST, r#"{"errorCode": 1, "message": "x"}"#);
        assert!(matches!(
            outcome,
            Outcome::Undecodable {
                reason: DecodeError::Registry(_),
                ..
            }
        ));
    }
}
