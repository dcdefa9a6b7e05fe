//! Core types for mdreport.
//!
//! This crate provides the finding model shared by the formatter and the exporters:
//! - Result events emitted by the scan engine (ResultEvent)
//! - Template information attached to each finding (Info)
//! - Severity classification (Severity, SeverityHolder)

mod event;
mod severity;

pub use event::{Info, ResultEvent};
pub use severity::{Severity, SeverityHolder};
