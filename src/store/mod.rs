//! Storage for accepted receipts.
//!
//! The `ReceiptStore` trait is the seam between the receipt operations and wherever receipts are
//! kept. The only implementation today is `MemoryStore`, which lives as long as the process.

mod memory;

use crate::model::{Receipt, ReceiptId};
use crate::Result;
use std::fmt::Debug;
use std::sync::Arc;

pub use memory::MemoryStore;

/// Keeps accepted receipts under their identifiers. Entries are written once and never change.
#[async_trait::async_trait]
pub trait ReceiptStore: Debug + Send + Sync {
    /// Stores `receipt` under `id`. It is an error to store two receipts under the same `id`.
    async fn put(&self, id: ReceiptId, receipt: Receipt) -> Result<()>;

    /// Returns the receipt stored under `id`, or `None` if there is none.
    async fn get(&self, id: &ReceiptId) -> Result<Option<Arc<Receipt>>>;

    /// Returns the number of stored receipts.
    async fn count(&self) -> Result<usize>;
}
