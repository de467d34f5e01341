//! Logging infrastructure: structured batch logging.
//!
//! Provides [`JsonlBatchLogger`], a JSONL file writer that implements
//! the [`BatchEventLogger`](confluence_application::BatchEventLogger) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlBatchLogger;
