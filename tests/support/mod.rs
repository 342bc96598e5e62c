//! テスト用の感情分類バックエンドと一回限りのHTTP応答サーバー

#![allow(dead_code)]

use async_trait::async_trait;
use sentiment_ai_common::RawLabel;
use sentiment_ai_rust::analyzer::SentimentBackend;
use sentiment_ai_rust::error::{Result, SentimentAiError};
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// 固定ラベルを返し、受け取ったテキストを記録する
#[derive(Clone)]
pub struct MockBackend {
    pub name: String,
    pub labels: Option<Vec<RawLabel>>,
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl MockBackend {
    pub fn ok(name: &str, labels: &[(&str, f64)]) -> Self {
        Self {
            name: name.to_string(),
            labels: Some(labels.iter().map(|(l, s)| RawLabel::new(*l, *s)).collect()),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(name: &str) -> Self {
        Self {
            name: name.to_string(),
            labels: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl SentimentBackend for MockBackend {
    fn model_name(&self) -> &str {
        &self.name
    }

    fn device(&self) -> String {
        "mock".to_string()
    }

    async fn classify(&self, text: &str) -> Result<Vec<RawLabel>> {
        self.calls.lock().unwrap().push(text.to_string());
        match &self.labels {
            Some(labels) => Ok(labels.clone()),
            None => Err(SentimentAiError::Connection("connection refused".into())),
        }
    }
}

/// 1回だけ接続を受け、固定のステータスと本文を返す
///
/// 戻り値は `http://127.0.0.1:<port>` と、受け取った生リクエストを返すハンドル。
pub async fn serve_once(status: u16, body: &str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let body = body.to_string();

    let handle = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let request = read_request(&mut stream).await;

        let response = format!(
            "HTTP/1.1 {} Test\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        stream.write_all(response.as_bytes()).await.unwrap();
        stream.shutdown().await.ok();
        request
    });

    (format!("http://{}", addr), handle)
}

/// ヘッダーと Content-Length 分の本文を読み切る
async fn read_request(stream: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = stream.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf);
        if let Some(end) = text.find("\r\n\r\n") {
            let content_length = text[..end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if buf.len() >= end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}
