//! Implements the `ReceiptStore` trait with a map held in memory.

use crate::model::{Receipt, ReceiptId};
use crate::store::ReceiptStore;
use crate::Result;
use anyhow::bail;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::trace;

/// An in-memory `ReceiptStore`. It starts empty and forgets everything when the process exits.
///
/// A receipt is inserted whole while the write lock is held, so a reader either finds nothing or
/// finds the complete receipt.
#[derive(Debug, Default)]
pub struct MemoryStore {
    receipts: RwLock<HashMap<ReceiptId, Arc<Receipt>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl ReceiptStore for MemoryStore {
    async fn put(&self, id: ReceiptId, receipt: Receipt) -> Result<()> {
        let mut receipts = self.receipts.write().await;
        if receipts.contains_key(&id) {
            bail!("A receipt is already stored under id {id}");
        }
        trace!("storing receipt {id}");
        receipts.insert(id, Arc::new(receipt));
        Ok(())
    }

    async fn get(&self, id: &ReceiptId) -> Result<Option<Arc<Receipt>>> {
        Ok(self.receipts.read().await.get(id).cloned())
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.receipts.read().await.len())
    }
}
