// PDF export module

mod backend;
pub mod service;

pub use backend::{emit_document, DrawBackend};
pub use service::{PdfExportService, PrintPdfBackend};
