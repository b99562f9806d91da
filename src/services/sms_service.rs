use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::config::Msg91Config;
use crate::errors::{AppError, Result};

/// Delivers an OTP to a subscriber. `Ok(())` means the provider accepted it.
#[async_trait]
pub trait SmsGateway: Send + Sync {
    async fn send_otp(&self, mobile: &str, otp: &str) -> Result<()>;
}

#[derive(Clone)]
pub struct Msg91Gateway {
    config: Msg91Config,
    client: Client,
}

impl Msg91Gateway {
    pub fn new(config: Msg91Config) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    pub fn sender_id(&self) -> &str {
        &self.config.sender_id
    }

    fn international(&self, mobile: &str) -> String {
        format!("{}{}", self.config.country_code, mobile)
    }
}

#[async_trait]
impl SmsGateway for Msg91Gateway {
    async fn send_otp(&self, mobile: &str, otp: &str) -> Result<()> {
        let to = self.international(mobile);

        let response = self.client
            .post(&self.config.base_url)
            .header("Accept", "application/json")
            .form(&[
                ("template_id", self.config.template_id.as_str()),
                ("mobile", to.as_str()),
                ("authkey", self.config.auth_key.as_str()),
                ("otp", otp),
                ("sender", self.config.sender_id.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(AppError::ExternalApi(format!(
                "MSG91 returned status {}: {}",
                status, body
            )));
        }

        // MSG91 can answer 200 with {"type":"error","message":...}
        if let Ok(json) = serde_json::from_str::<Value>(&body) {
            if json.get("type").and_then(Value::as_str) == Some("error") {
                let message = json
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown error");
                return Err(AppError::ExternalApi(format!("MSG91 rejected request: {}", message)));
            }
        }

        tracing::info!("✅ OTP sent to {}: {}", mobile, body);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn gateway_for(server: &MockServer) -> Msg91Gateway {
        Msg91Gateway::new(Msg91Config {
            auth_key: "test-auth".to_string(),
            template_id: "tpl-1".to_string(),
            sender_id: "VYPMTR".to_string(),
            base_url: format!("{}/api/v5/otp", server.uri()),
            country_code: "91".to_string(),
        })
    }

    #[tokio::test]
    async fn posts_prefixed_mobile_and_code() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/v5/otp"))
            .and(body_string_contains("mobile=919990001111"))
            .and(body_string_contains("otp=123456"))
            .and(body_string_contains("authkey=test-auth"))
            .and(body_string_contains("template_id=tpl-1"))
            .and(body_string_contains("sender=VYPMTR"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "type": "success",
                "request_id": "abc"
            })))
            .expect(1)
            .mount(&server)
            .await;

        gateway_for(&server)
            .send_otp("9990001111", "123456")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn non_success_status_is_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/v5/otp"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let result = gateway_for(&server).send_otp("9990001111", "123456").await;
        assert!(matches!(result, Err(AppError::ExternalApi(ref m)) if m.contains("500")));
    }

    #[tokio::test]
    async fn error_payload_is_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/v5/otp"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "type": "error",
                "message": "Invalid authkey"
            })))
            .mount(&server)
            .await;

        let result = gateway_for(&server).send_otp("9990001111", "123456").await;
        assert!(matches!(result, Err(AppError::ExternalApi(ref m)) if m.contains("Invalid authkey")));
    }

    #[tokio::test]
    async fn truncated_success_body_is_failure() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !String::from_utf8_lossy(&request).contains("sender=VYPMTR") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            // Promise 100 bytes, deliver a handful, then hang up.
            socket
                .write_all(b"HTTP/1.1 200 OK\r\ncontent-length: 100\r\n\r\n{\"type\":")
                .await
                .unwrap();
            socket.shutdown().await.unwrap();
        });

        let gateway = Msg91Gateway::new(Msg91Config {
            auth_key: "test-auth".to_string(),
            template_id: "tpl-1".to_string(),
            sender_id: "VYPMTR".to_string(),
            base_url: format!("http://{}/api/v5/otp", addr),
            country_code: "91".to_string(),
        });

        let result = gateway.send_otp("9990001111", "123456").await;
        assert!(matches!(result, Err(AppError::ExternalApi(_))));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn unreachable_gateway_is_failure() {
        let server = MockServer::start().await;
        let gateway = gateway_for(&server);
        drop(server);

        let result = gateway.send_otp("9990001111", "123456").await;
        assert!(matches!(result, Err(AppError::ExternalApi(_))));
    }
}
