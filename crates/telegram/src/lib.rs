//! Daily insider filing digest.
//!
//! This crate provides:
//! - Formatting of the aggregate views as HTML-mode messages
//! - A Telegram Bot API sink
//! - The publisher sending the three digest sections in order

pub mod client;
pub mod error;
pub mod format;
pub mod publisher;

pub use client::{MessageSink, TelegramClient};
pub use error::{PublishError, Result, SendError};
pub use publisher::Publisher;
