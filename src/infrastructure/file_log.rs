use crate::domain::customer::CustomerData;
use crate::domain::payment::{PaymentData, PaymentResponse};
use crate::domain::ports::TransactionLog;
use crate::error::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

pub const DEFAULT_LOG_PATH: &str = "transactions.log";

/// Appends two-line text entries to a log file.
///
/// Appends made through one instance never interleave. Other processes
/// writing the same file are not coordinated.
pub struct FileTransactionLog {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileTransactionLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn append(&self, entry: String) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(entry.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }
}

#[async_trait]
impl TransactionLog for FileTransactionLog {
    async fn log(
        &self,
        customer: &CustomerData,
        payment: &PaymentData,
        response: &PaymentResponse,
    ) -> Result<()> {
        self.append(format!(
            "{} paid {}\nPayment status: {}\n",
            customer.name(),
            payment.amount(),
            response.status()
        ))
        .await
    }

    async fn log_refund(&self, transaction_id: &str, response: &PaymentResponse) -> Result<()> {
        self.append(format!(
            "Refund for {}\nRefund status: {}\n",
            transaction_id,
            response.status()
        ))
        .await
    }
}
