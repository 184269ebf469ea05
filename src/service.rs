//! The receipt operations: submit a receipt, look up its points, fetch it back.

use crate::error::{ErrorType, IntoResult, Res, ServiceError};
use crate::model::{Receipt, ReceiptId};
use crate::scoring;
use crate::store::{MemoryStore, ReceiptStore};
use crate::validation::{self, Policy};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

/// Validates, stores and scores receipts. Cloning is cheap; clones share the same store.
#[derive(Debug, Clone)]
pub struct ReceiptService {
    store: Arc<dyn ReceiptStore>,
    policy: Policy,
}

impl ReceiptService {
    pub fn new(store: Arc<dyn ReceiptStore>, policy: Policy) -> Self {
        Self { store, policy }
    }

    /// A service backed by an empty `MemoryStore`.
    pub fn in_memory(policy: Policy) -> Self {
        Self::new(Arc::new(MemoryStore::new()), policy)
    }

    pub fn store(&self) -> &Arc<dyn ReceiptStore> {
        &self.store
    }

    /// Validates `raw` and stores it under a fresh identifier, which is returned. A rejected
    /// receipt is not stored and the error carries `ErrorType::Rejected`.
    pub async fn submit(&self, raw: &Value) -> Res<ReceiptId> {
        let receipt = match validation::validate_with(raw, self.policy) {
            Ok(receipt) => receipt,
            Err(reason) => {
                debug!("Rejected receipt: {reason}");
                return Err(ServiceError::new(ErrorType::Rejected, reason));
            }
        };

        let id = ReceiptId::new();
        self.store
            .put(id, receipt)
            .await
            .pub_result(ErrorType::Internal)?;
        info!("Accepted receipt {id}");
        Ok(id)
    }

    /// Returns the receipt stored under `id` exactly as it was submitted.
    pub async fn receipt(&self, id: &ReceiptId) -> Res<Arc<Receipt>> {
        self.store
            .get(id)
            .await
            .pub_result(ErrorType::Internal)?
            .ok_or_else(ServiceError::not_found)
    }

    /// Returns the points earned by the receipt stored under `id`.
    pub async fn points(&self, id: &ReceiptId) -> Res<u64> {
        let receipt = self.receipt(id).await?;
        let points = scoring::score(&receipt);
        debug!(
            "Receipt {id} earns {points} points: {:?}",
            scoring::breakdown(&receipt)
        );
        Ok(points)
    }
}
