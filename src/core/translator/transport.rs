use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;

use crate::shared::error::AppResult;

pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

// Lazy static HTTP client to reuse connection pool
static CLIENT: OnceLock<Client> = OnceLock::new();

fn get_client() -> &'static Client {
    CLIENT.get_or_init(|| {
        Client::builder()
            .user_agent(concat!("autotranslate-journal/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| Client::new())
    })
}

/// Raw HTTP reply, before any provider-specific decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub reason: String,
    pub body: String,
}

impl HttpReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// POST an already-encoded form body. One attempt, no retry.
    async fn post_form(&self, url: &str, body: String) -> AppResult<HttpReply>;
}

#[async_trait]
impl<T: HttpTransport + ?Sized> HttpTransport for Arc<T> {
    async fn post_form(&self, url: &str, body: String) -> AppResult<HttpReply> {
        (**self).post_form(url, body).await
    }
}

/// Production transport over the shared `reqwest` client.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self { client: get_client().clone() }
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn post_form(&self, url: &str, body: String) -> AppResult<HttpReply> {
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let reason = status.canonical_reason().unwrap_or_default().to_string();
        // Error replies are classified by status, so an unreadable body
        // there is not a transport failure.
        let body = if status.is_success() {
            response.text().await?
        } else {
            response.text().await.unwrap_or_default()
        };

        Ok(HttpReply {
            status: status.as_u16(),
            reason,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn local_client() -> Client {
        Client::builder().no_proxy().build().unwrap()
    }

    /// Serve one canned response and hand back the raw request.
    async fn serve_once(response: &'static str) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/v2/translate", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
                if request_complete(&request) {
                    break;
                }
            }
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            String::from_utf8(request).unwrap()
        });

        (url, handle)
    }

    fn request_complete(raw: &[u8]) -> bool {
        let text = String::from_utf8_lossy(raw);
        let Some(split) = text.find("\r\n\r\n") else {
            return false;
        };
        let content_length = text[..split]
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);
        raw.len() >= split + 4 + content_length
    }

    #[tokio::test]
    async fn posts_form_body_and_reports_status() {
        let (url, server) = serve_once(
            "HTTP/1.1 429 Too Many Requests\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
        )
        .await;

        let reply = ReqwestTransport::with_client(local_client())
            .post_form(&url, "auth_key=k&text=Bonjour&target_lang=EN".to_string())
            .await
            .unwrap();

        assert_eq!(reply.status, 429);
        assert_eq!(reply.reason, "Too Many Requests");
        assert!(!reply.is_success());

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /v2/translate"));
        assert!(request.to_ascii_lowercase().contains("content-type: application/x-www-form-urlencoded"));
        assert!(request.ends_with("auth_key=k&text=Bonjour&target_lang=EN"));
    }

    #[tokio::test]
    async fn returns_body_of_successful_reply() {
        let (url, server) = serve_once(
            "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 35\r\nconnection: close\r\n\r\n{\"translations\":[{\"text\":\"Hello\"}]}",
        )
        .await;

        let reply = ReqwestTransport::with_client(local_client()).post_form(&url, "text=x".into()).await.unwrap();
        assert!(reply.is_success());
        assert_eq!(reply.body, r#"{"translations":[{"text":"Hello"}]}"#);
        server.await.unwrap();
    }

    #[tokio::test]
    async fn truncated_error_body_keeps_the_status() {
        let (url, server) = serve_once(
            "HTTP/1.1 500 Internal Server Error\r\ncontent-length: 64\r\nconnection: close\r\n\r\noops",
        )
        .await;

        let reply = ReqwestTransport::with_client(local_client()).post_form(&url, "text=x".into()).await.unwrap();
        assert_eq!(reply.status, 500);
        assert_eq!(reply.reason, "Internal Server Error");
        server.await.unwrap();
    }

    #[tokio::test]
    async fn connection_failures_are_network_errors() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/v2/translate", listener.local_addr().unwrap());
        drop(listener);

        let err = ReqwestTransport::with_client(local_client()).post_form(&url, String::new()).await.unwrap_err();
        assert!(matches!(err, crate::shared::error::AppError::Network(_)));
    }
}
