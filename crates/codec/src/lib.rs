//! File codecs for ReviewDesk.
//!
//! Two one-way pipelines, independent of each other:
//!
//! - **Ingress** ([`ingress`]): user uploads become [`Attachment`]s the model
//!   can read. Spreadsheets are flattened to text so tabular data arrives as
//!   something the model can reason over.
//! - **Egress** ([`egress`]): `generate_file` tool arguments become real
//!   downloadable bytes (spreadsheet workbook, word-processor document,
//!   plain text).
//!
//! Both sides carry payloads as base64 ([`encoding`]). Nothing here touches
//! the network; only [`ingress::read_upload`] touches the disk.
//!
//! [`Attachment`]: reviewdesk_core::Attachment

pub mod egress;
pub mod encoding;
pub mod ingress;
pub mod mime;
pub mod sheet;
pub mod xlsx;

pub use egress::{FileKind, encode};
pub use ingress::{Upload, ingest, ingest_all, ingest_paths, read_upload};
