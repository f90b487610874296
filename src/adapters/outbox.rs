use crate::domain::model::Notification;
use crate::domain::ports::Mailer;
use crate::utils::error::{Result, SantaError};
use async_trait::async_trait;
use base64::Engine;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::io::AsyncWriteExt;

/// 單一 encoded-word 最多編碼的原始位元組數（base64 後不超過 75 字元）
const ENCODED_WORD_CHUNK: usize = 45;

/// Writes each notification as an `.eml` file instead of talking to a mail
/// server. Any MTA or mail client can pick the files up from there.
///
/// Every mailer owns its own run directory under the outbox, so a later draw
/// never mixes with the files of an earlier one. Existing files are never
/// overwritten.
#[derive(Debug)]
pub struct OutboxMailer {
    base_path: PathBuf,
    run_id: String,
    sequence: AtomicUsize,
}

impl OutboxMailer {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        let run_id = format!(
            "run-{}-{:08x}",
            chrono::Utc::now().format("%Y%m%dT%H%M%S%.6f"),
            rand::random::<u32>()
        );
        Self::with_run_id(base_path, run_id)
    }

    pub fn with_run_id(base_path: impl Into<PathBuf>, run_id: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
            run_id: run_id.into(),
            sequence: AtomicUsize::new(0),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// 本次抽籤的輸出目錄
    pub fn run_dir(&self) -> PathBuf {
        self.base_path.join(&self.run_id)
    }

    fn file_name(&self, to: &str) -> String {
        let n = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        let safe: String = to
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        format!("{:03}-{}.eml", n, safe)
    }
}

/// Encodes a header value as RFC 2047 `B` encoded-words when it is not
/// plain printable ASCII. Long values are split on character boundaries into
/// folded words.
pub fn encode_header(value: &str) -> String {
    if value.chars().all(|c| c.is_ascii() && !c.is_ascii_control()) {
        return value.to_string();
    }

    let mut words = Vec::new();
    let mut chunk = String::new();
    for c in value.chars() {
        if !chunk.is_empty() && chunk.len() + c.len_utf8() > ENCODED_WORD_CHUNK {
            words.push(std::mem::take(&mut chunk));
        }
        // 控制字元（含 CR/LF）不得進入標頭
        chunk.push(if c.is_control() { ' ' } else { c });
    }
    if !chunk.is_empty() {
        words.push(chunk);
    }

    words
        .iter()
        .map(|word| {
            format!(
                "=?UTF-8?B?{}?=",
                base64::engine::general_purpose::STANDARD.encode(word.as_bytes())
            )
        })
        .collect::<Vec<_>>()
        .join("\r\n ")
}

/// RFC 5322 格式的郵件內容，非 ASCII 的主旨以 RFC 2047 編碼
pub fn render_message(sender: &str, notification: &Notification) -> String {
    format!(
        "From: {}\r\nTo: {}\r\nSubject: {}\r\nDate: {}\r\nMIME-Version: 1.0\r\nContent-Type: text/html; charset=utf-8\r\n\r\n{}\r\n",
        sender,
        notification.to,
        encode_header(&notification.subject),
        chrono::Utc::now().to_rfc2822(),
        notification.html_body
    )
}

#[async_trait]
impl Mailer for OutboxMailer {
    async fn send(&self, sender: &str, notification: &Notification) -> Result<()> {
        let run_dir = self.run_dir();
        let full_path = run_dir.join(self.file_name(&notification.to));

        let write = async {
            tokio::fs::create_dir_all(&run_dir).await?;
            let mut file = tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&full_path)
                .await?;
            file.write_all(render_message(sender, notification).as_bytes())
                .await?;
            file.flush().await
        };

        write.await.map_err(|e| SantaError::DeliveryError {
            recipient: notification.to.clone(),
            message: format!("could not write {}: {}", full_path.display(), e),
        })?;

        tracing::debug!("Wrote {}", full_path.display());
        Ok(())
    }
}
