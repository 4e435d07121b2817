//! HTTP client for the inventory service.

use std::time::Duration;

use async_trait::async_trait;
use mockall::automock;
use reqwest::{Client, Response, header::AUTHORIZATION};
use serde::Serialize;
use tracing::debug;

use crate::{
    auth::Credential,
    domain::products::records::ProductId,
    inventory::{StockFailure, StockUnavailable},
};

/// Default bound on a single inventory call.
pub const DEFAULT_INVENTORY_TIMEOUT: Duration = Duration::from_secs(5);

/// Configuration for reaching the inventory service.
#[derive(Debug, Clone)]
pub struct InventoryConfig {
    /// Stock resource base URL, e.g. `"http://inventory-service:8687/api/inventory"`.
    pub base_url: String,

    /// Upper bound for each request, connect through body.
    pub timeout: Duration,
}

/// Reqwest-backed [`StockClient`].
#[derive(Debug, Clone)]
pub struct HttpStockClient {
    config: InventoryConfig,
    http: Client,
}

impl HttpStockClient {
    /// Build a client whose requests are bounded by `config.timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying HTTP client cannot be constructed.
    pub fn new(config: InventoryConfig) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Self { config, http })
    }

    fn stock_url(&self, product: ProductId) -> String {
        format!("{}/{product}", self.base_url())
    }

    fn base_url(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InitializeStockRequest {
    product_id: i64,
    quantity: u32,
}

#[async_trait]
impl StockClient for HttpStockClient {
    async fn fetch_quantity(
        &self,
        credential: &Credential,
        product: ProductId,
    ) -> Result<u32, StockUnavailable> {
        let unavailable = |cause: StockFailure| StockUnavailable::new(product, cause);

        let response = self
            .http
            .get(self.stock_url(product))
            .header(AUTHORIZATION, credential.expose())
            .send()
            .await
            .map_err(|source| unavailable(source.into()))?;

        let body = success_body(response).await.map_err(unavailable)?;

        // A null body means the inventory service holds no count for the product.
        let quantity = serde_json::from_str::<Option<u32>>(&body)
            .map_err(|source| unavailable(source.into()))?
            .unwrap_or_default();

        debug!(%product, quantity, "fetched stock quantity");

        Ok(quantity)
    }

    async fn initialize_quantity(
        &self,
        credential: &Credential,
        product: ProductId,
        quantity: u32,
    ) -> Result<(), StockUnavailable> {
        let unavailable = |cause: StockFailure| StockUnavailable::new(product, cause);

        let response = self
            .http
            .post(self.base_url())
            .header(AUTHORIZATION, credential.expose())
            .json(&InitializeStockRequest {
                product_id: product.into_i64(),
                quantity,
            })
            .send()
            .await
            .map_err(|source| unavailable(source.into()))?;

        success_body(response).await.map_err(unavailable)?;

        debug!(%product, quantity, "initialized stock quantity");

        Ok(())
    }
}

async fn success_body(response: Response) -> Result<String, StockFailure> {
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();

        return Err(StockFailure::Status { status, body });
    }

    Ok(response.text().await?)
}

/// Stock operations against the inventory service.
///
/// Calls are made once; there is no retry.
#[automock]
#[async_trait]
pub trait StockClient: Send + Sync {
    /// Read the current stock for one product.
    async fn fetch_quantity(
        &self,
        credential: &Credential,
        product: ProductId,
    ) -> Result<u32, StockUnavailable>;

    /// Register the starting stock for a newly created product.
    async fn initialize_quantity(
        &self,
        credential: &Credential,
        product: ProductId,
        quantity: u32,
    ) -> Result<(), StockUnavailable>;
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;

    use reqwest::StatusCode;

    use testresult::TestResult;
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
        sync::oneshot,
    };

    use super::*;

    /// Accepts one connection, captures the raw request and replies with `response`.
    async fn fake_inventory(response: String) -> TestResult<(SocketAddr, oneshot::Receiver<String>)> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let (sender, receiver) = oneshot::channel();

        tokio::spawn(async move {
            let Ok((mut socket, _peer)) = listener.accept().await else {
                return;
            };

            let request = read_request(&mut socket).await;

            let _write = socket.write_all(response.as_bytes()).await;
            let _shutdown = socket.shutdown().await;
            let _sent = sender.send(request);
        });

        Ok((addr, receiver))
    }

    async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
        let mut buffer = Vec::new();
        let mut chunk = [0_u8; 1024];

        loop {
            let Ok(read) = socket.read(&mut chunk).await else {
                break;
            };

            if read == 0 {
                break;
            }

            buffer.extend_from_slice(&chunk[..read]);

            let text = String::from_utf8_lossy(&buffer).to_string();

            if let Some((head, body)) = text.split_once("\r\n\r\n") {
                let content_length = head
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;

                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);

                if body.len() >= content_length {
                    return text;
                }
            }
        }

        String::from_utf8_lossy(&buffer).to_string()
    }

    fn http_response(status: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        )
    }

    fn client(addr: SocketAddr) -> TestResult<HttpStockClient> {
        Ok(HttpStockClient::new(InventoryConfig {
            base_url: format!("http://{addr}/api/inventory/"),
            timeout: Duration::from_millis(500),
        })?)
    }

    fn credential() -> Credential {
        Credential::from_authorization_header("Bearer caller-token")
            .unwrap_or_else(|| unreachable!("valid bearer header"))
    }

    #[tokio::test]
    async fn fetch_quantity_reads_integer_body_and_forwards_credential() -> TestResult {
        let (addr, request) = fake_inventory(http_response("200 OK", "7")).await?;

        let quantity = client(addr)?
            .fetch_quantity(&credential(), ProductId::from_i64(3))
            .await?;

        let request = request.await?;

        assert_eq!(quantity, 7);
        assert!(
            request.starts_with("GET /api/inventory/3 HTTP/1.1"),
            "unexpected request line: {request}"
        );
        assert!(
            request
                .to_ascii_lowercase()
                .contains("authorization: bearer caller-token"),
            "credential not forwarded: {request}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn fetch_quantity_treats_null_body_as_zero() -> TestResult {
        let (addr, _request) = fake_inventory(http_response("200 OK", "null")).await?;

        let quantity = client(addr)?
            .fetch_quantity(&credential(), ProductId::from_i64(3))
            .await?;

        assert_eq!(quantity, 0);

        Ok(())
    }

    #[tokio::test]
    async fn fetch_quantity_error_status_is_unavailable() -> TestResult {
        let (addr, _request) =
            fake_inventory(http_response("503 Service Unavailable", "\"down\"")).await?;

        let result = client(addr)?
            .fetch_quantity(&credential(), ProductId::from_i64(9))
            .await;

        assert!(
            matches!(
                result,
                Err(StockUnavailable {
                    cause: StockFailure::Status { status, .. },
                    product,
                }) if status == StatusCode::SERVICE_UNAVAILABLE && product == ProductId::from_i64(9)
            ),
            "expected status failure, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn fetch_quantity_negative_body_is_malformed() -> TestResult {
        let (addr, _request) = fake_inventory(http_response("200 OK", "-4")).await?;

        let result = client(addr)?
            .fetch_quantity(&credential(), ProductId::from_i64(3))
            .await;

        assert!(
            matches!(
                result,
                Err(StockUnavailable {
                    cause: StockFailure::Malformed(_),
                    ..
                })
            ),
            "expected malformed failure, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn fetch_quantity_unreachable_service_is_unavailable() -> TestResult {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        drop(listener);

        let result = client(addr)?
            .fetch_quantity(&credential(), ProductId::from_i64(3))
            .await;

        assert!(
            matches!(
                result,
                Err(StockUnavailable {
                    cause: StockFailure::Transport(_),
                    ..
                })
            ),
            "expected transport failure, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn fetch_quantity_times_out_as_unavailable() -> TestResult {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let _silent = tokio::spawn(async move {
            if let Ok((socket, _peer)) = listener.accept().await {
                tokio::time::sleep(Duration::from_secs(5)).await;
                drop(socket);
            }
        });

        let client = HttpStockClient::new(InventoryConfig {
            base_url: format!("http://{addr}/api/inventory"),
            timeout: Duration::from_millis(100),
        })?;

        let result = client
            .fetch_quantity(&credential(), ProductId::from_i64(3))
            .await;

        assert!(
            matches!(
                result,
                Err(StockUnavailable {
                    cause: StockFailure::Transport(ref source),
                    ..
                }) if source.is_timeout()
            ),
            "expected timeout, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn initialize_quantity_posts_camel_case_body() -> TestResult {
        let (addr, request) = fake_inventory(http_response("201 Created", "")).await?;

        client(addr)?
            .initialize_quantity(&credential(), ProductId::from_i64(12), 5)
            .await?;

        let request = request.await?;

        assert!(
            request.starts_with("POST /api/inventory HTTP/1.1"),
            "unexpected request line: {request}"
        );
        assert!(
            request.ends_with(r#"{"productId":12,"quantity":5}"#),
            "unexpected body: {request}"
        );
        assert!(
            request
                .to_ascii_lowercase()
                .contains("authorization: bearer caller-token"),
            "credential not forwarded: {request}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn initialize_quantity_error_status_is_unavailable() -> TestResult {
        let (addr, _request) =
            fake_inventory(http_response("500 Internal Server Error", "")).await?;

        let result = client(addr)?
            .initialize_quantity(&credential(), ProductId::from_i64(12), 5)
            .await;

        assert!(
            matches!(
                result,
                Err(StockUnavailable {
                    cause: StockFailure::Status { .. },
                    ..
                })
            ),
            "expected status failure, got {result:?}"
        );

        Ok(())
    }
}
