//! Data models for invoices and configuration.

pub mod config;
pub mod invoice;

pub use config::{InvexConfig, StoreConfig, UploadConfig};
pub use invoice::{
    Invoice, InvoiceAggregate, InvoiceStatus, InvoiceUpdate, LineItem, LineItemEdit,
    ParseStatusError,
};
