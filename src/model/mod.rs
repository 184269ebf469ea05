//! Types that represent the core data model, such as `Receipt` and `Amount`.
mod amount;
mod id;
mod receipt;

pub use amount::{Amount, AmountError};
pub use id::ReceiptId;
pub use receipt::{Description, Item, PurchaseDate, PurchaseTime, Receipt, Retailer};
