pub mod artifact;
pub mod receipt_builder;
pub mod receipt_service;

pub use artifact::{ArtifactRenderer, HtmlFileRenderer};
pub use receipt_builder::build_receipt_html;
pub use receipt_service::{ReceiptArtifact, ReceiptService};
