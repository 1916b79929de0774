use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};

use crate::leaderboard::LeaderboardStore;
use crate::models::{LeaderboardRow, QuestError, Result};

/// Remote spreadsheet exposed as a JSON endpoint.
///
/// `GET <url>` returns the table as `[{"name": .., "score": ..}, ..]` and
/// `PUT <url>` with the same shape replaces it.
#[derive(Debug, Clone)]
pub struct SheetStore {
    client: Client,
    url: String,
    api_token: Option<String>,
}

impl SheetStore {
    pub fn new(url: &str, api_token: Option<String>, timeout_seconds: u64) -> Result<Self> {
        if url.trim().is_empty() {
            return Err(QuestError::Config("sheet leaderboard URL is empty".to_string()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()?;

        info!("Using spreadsheet leaderboard at {}", url);
        Ok(Self {
            client,
            url: url.to_string(),
            api_token,
        })
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

#[async_trait]
impl LeaderboardStore for SheetStore {
    fn backend_name(&self) -> &'static str {
        "sheet"
    }

    async fn read(&self) -> Result<Vec<LeaderboardRow>> {
        let response = self
            .authorize(self.client.get(&self.url))
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        let rows: Vec<LeaderboardRow> = serde_json::from_str(&body)?;
        debug!("Read {} rows from spreadsheet", rows.len());
        Ok(rows)
    }

    async fn write(&self, rows: &[LeaderboardRow]) -> Result<()> {
        self.authorize(self.client.put(&self.url))
            .json(rows)
            .send()
            .await?
            .error_for_status()?;

        debug!("Wrote {} rows to spreadsheet", rows.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leaderboard::Leaderboard;
    use crate::models::LeaderboardEntry;
    use std::sync::{Arc, Mutex};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};

    #[derive(Debug, Clone)]
    struct SeenRequest {
        method: String,
        authorization: Option<String>,
        body: String,
    }

    /// Minimal spreadsheet endpoint: GET serves the table, PUT replaces it.
    struct FakeSheet {
        url: String,
        table: Arc<Mutex<String>>,
        seen: Arc<Mutex<Vec<SeenRequest>>>,
    }

    impl FakeSheet {
        async fn start(initial: &str) -> Self {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            let url = format!("http://{}/leaderboard", listener.local_addr().unwrap());
            let table = Arc::new(Mutex::new(initial.to_string()));
            let seen = Arc::new(Mutex::new(Vec::new()));

            let (server_table, server_seen) = (table.clone(), seen.clone());
            tokio::spawn(async move {
                loop {
                    let Ok((stream, _)) = listener.accept().await else { break };
                    let (table, seen) = (server_table.clone(), server_seen.clone());
                    tokio::spawn(async move { serve(stream, table, seen).await });
                }
            });

            Self { url, table, seen }
        }

        fn requests(&self) -> Vec<SeenRequest> {
            self.seen.lock().unwrap().clone()
        }
    }

    async fn serve(mut stream: TcpStream, table: Arc<Mutex<String>>, seen: Arc<Mutex<Vec<SeenRequest>>>) {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];

        let header_end = loop {
            let n = stream.read(&mut chunk).await.unwrap();
            if n == 0 {
                return;
            }
            buf.extend_from_slice(&chunk[..n]);
            if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
        };

        let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
        let mut lines = head.lines();
        let method = lines.next().unwrap_or("").split(' ').next().unwrap_or("").to_string();

        let mut content_length = 0;
        let mut authorization = None;
        for line in lines {
            if let Some((name, value)) = line.split_once(':') {
                match name.trim().to_lowercase().as_str() {
                    "content-length" => content_length = value.trim().parse().unwrap_or(0),
                    "authorization" => authorization = Some(value.trim().to_string()),
                    _ => {}
                }
            }
        }

        while buf.len() < header_end + content_length {
            let n = stream.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
        }
        let body = String::from_utf8_lossy(&buf[header_end..]).to_string();

        let response_body = if method == "PUT" {
            *table.lock().unwrap() = body.clone();
            String::new()
        } else {
            table.lock().unwrap().clone()
        };
        seen.lock().unwrap().push(SeenRequest { method, authorization, body });

        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            response_body.len(),
            response_body
        );
        stream.write_all(response.as_bytes()).await.unwrap();
        stream.shutdown().await.ok();
    }

    #[test]
    fn test_empty_url_rejected() {
        assert!(matches!(
            SheetStore::new("  ", None, 10),
            Err(QuestError::Config(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_sheet_is_an_error() {
        // Bind then release a port so nothing is listening on it.
        let addr = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap();
        let store = SheetStore::new(&format!("http://{}/leaderboard", addr), None, 1).unwrap();

        assert!(store.read().await.is_err());
    }

    #[tokio::test]
    async fn test_read_parses_mixed_cells() {
        let sheet = FakeSheet::start(
            r#"[{"name":"a","score":120},{"name":"b","score":"85"},{"name":"c","score":null}]"#,
        )
        .await;
        let store = SheetStore::new(&sheet.url, None, 5).unwrap();

        let rows = store.read().await.unwrap();

        assert_eq!(
            rows,
            vec![
                LeaderboardRow::new("a", "120"),
                LeaderboardRow::new("b", "85"),
                LeaderboardRow::new("c", ""),
            ]
        );
        let requests = sheet.requests();
        assert_eq!(requests[0].method, "GET");
        assert_eq!(requests[0].authorization, None);
    }

    #[tokio::test]
    async fn test_submit_puts_whole_table_with_bearer_token() {
        let sheet = FakeSheet::start(r#"[{"name":"a","score":120},{"name":"b","score":"x"}]"#).await;
        let store = SheetStore::new(&sheet.url, Some("s3cret".to_string()), 5).unwrap();
        let board = Leaderboard::new(Arc::new(store));

        board.submit(LeaderboardEntry::new("c", 70)).await.unwrap();

        let requests = sheet.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].method, "GET");
        assert_eq!(requests[1].method, "PUT");
        for request in &requests {
            assert_eq!(request.authorization.as_deref(), Some("Bearer s3cret"));
        }

        let put: serde_json::Value = serde_json::from_str(&requests[1].body).unwrap();
        assert_eq!(
            put,
            serde_json::json!([
                {"name": "a", "score": 120},
                {"name": "b", "score": "x"},
                {"name": "c", "score": 70}
            ])
        );
        assert_eq!(*sheet.table.lock().unwrap(), requests[1].body);

        let standings = board.standings().await;
        assert!(standings.is_available());
        let rows: Vec<(&str, Option<f64>)> = standings
            .rows
            .iter()
            .map(|s| (s.name.as_str(), s.score))
            .collect();
        assert_eq!(rows, vec![("a", Some(120.0)), ("c", Some(70.0)), ("b", None)]);
    }
}
