//! # Receipt Export
//!
//! Renders a receipt as a shareable document and hands it to the export
//! collaborator.
//!
//! ## Export Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Receipt Export                                     │
//! │                                                                         │
//! │  Receipt (immutable record)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  render_receipt_html() ── pure: item table + captured total            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ReceiptExporter (trait) ── document conversion / share dialog is      │
//! │       │                     the platform collaborator's job            │
//! │       ▼                                                                 │
//! │  HtmlFileExporter ── writes receipt_<timestamp>.html to the export     │
//! │                      directory and returns the path                    │
//! │                                                                         │
//! │  Failure surfaces to the caller as a single pass/fail error.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::future::Future;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use scanledger_core::Receipt;

// =============================================================================
// Errors
// =============================================================================

/// Export failures, surfaced to the caller as one pass/fail signal.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Writing the document failed.
    #[error("Could not write document: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Rendering
// =============================================================================

/// Renders a receipt as a standalone HTML document.
///
/// Line subtotals are computed from the frozen item text with the same
/// lenient parse the cart uses, so the document always agrees with the
/// captured total.
pub fn render_receipt_html(receipt: &Receipt) -> String {
    let items_html: String = receipt
        .items
        .iter()
        .map(|item| {
            format!(
                "        <tr>\n            <td>{}</td>\n            <td>{}</td>\n            <td>{}</td>\n            <td>{}</td>\n        </tr>\n",
                escape_html(&item.display_name()),
                escape_html(&item.quantity),
                escape_html(&item.unit_price),
                item.line_total(),
            )
        })
        .collect();

    format!(
        r#"<html>
<head>
    <style>
        body {{ font-family: Arial, sans-serif; padding: 20px; }}
        .header {{ text-align: center; margin-bottom: 30px; }}
        table {{ width: 100%; border-collapse: collapse; }}
        th, td {{ border: 1px solid #ddd; padding: 8px; text-align: left; }}
        th {{ background-color: #f2f2f2; }}
        .total {{ font-weight: bold; font-size: 18px; text-align: right; margin-top: 20px; }}
    </style>
</head>
<body>
    <div class="header">
        <h1>Receipt</h1>
        <p>Date: {date}</p>
    </div>
    <table>
        <thead>
            <tr>
                <th>Item</th>
                <th>Quantity</th>
                <th>Price</th>
                <th>Subtotal</th>
            </tr>
        </thead>
        <tbody>
{items}        </tbody>
    </table>
    <div class="total">
        Total: {total}
    </div>
</body>
</html>
"#,
        date = escape_html(&receipt.created_at),
        items = items_html,
        total = receipt.total,
    )
}

/// Builds the document file name from the receipt's timestamp.
///
/// `"Fri, Aug 7, 2026, 3:05 PM"` → `"receipt_Fri_Aug_7_2026_3_05_PM.html"`.
pub fn receipt_file_name(receipt: &Receipt) -> String {
    let mut sanitized = String::with_capacity(receipt.created_at.len());
    let mut last_was_sep = false;
    for c in receipt.created_at.chars() {
        if c.is_ascii_alphanumeric() {
            sanitized.push(c);
            last_was_sep = false;
        } else if !last_was_sep && !sanitized.is_empty() {
            sanitized.push('_');
            last_was_sep = true;
        }
    }
    while sanitized.ends_with('_') {
        sanitized.pop();
    }

    format!("receipt_{sanitized}.html")
}

/// Minimal HTML escaping for user-controlled text (labels, price text).
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

// =============================================================================
// Exporter
// =============================================================================

/// The export collaborator: turns a receipt into a shareable artifact.
pub trait ReceiptExporter: Send + Sync {
    /// Exports a receipt, returning the location of the produced document.
    fn export(
        &self,
        receipt: &Receipt,
    ) -> impl Future<Output = Result<PathBuf, ExportError>> + Send;
}

/// Writes receipt documents as HTML files into a fixed directory.
///
/// PDF conversion and the platform share dialog are downstream concerns;
/// this exporter produces the document they consume.
#[derive(Debug, Clone)]
pub struct HtmlFileExporter {
    export_dir: PathBuf,
}

impl HtmlFileExporter {
    /// Creates an exporter writing into `export_dir` (created on demand).
    pub fn new(export_dir: impl Into<PathBuf>) -> Self {
        HtmlFileExporter {
            export_dir: export_dir.into(),
        }
    }

    /// The directory documents are written to.
    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }
}

impl ReceiptExporter for HtmlFileExporter {
    async fn export(&self, receipt: &Receipt) -> Result<PathBuf, ExportError> {
        tokio::fs::create_dir_all(&self.export_dir).await?;

        let path = self.export_dir.join(receipt_file_name(receipt));
        let document = render_receipt_html(receipt);
        tokio::fs::write(&path, document).await?;

        info!(receipt_id = %receipt.id, path = %path.display(), "Receipt exported");
        Ok(path)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use scanledger_core::{LineItem, Money};

    fn receipt() -> Receipt {
        Receipt {
            id: "1700000000000".to_string(),
            created_at: "Fri, Aug 7, 2026, 3:05 PM".to_string(),
            items: vec![
                LineItem {
                    id: "item-1-1".to_string(),
                    source_code: "0123456789012".to_string(),
                    kind: "ean13".to_string(),
                    label: "Milk 2%".to_string(),
                    unit_price: "2.50".to_string(),
                    quantity: "3".to_string(),
                },
                LineItem {
                    id: "item-2-2".to_string(),
                    source_code: "Scanned price".to_string(),
                    kind: "price".to_string(),
                    label: String::new(),
                    unit_price: "4.99".to_string(),
                    quantity: "1".to_string(),
                },
            ],
            total: Money::from_cents(1249),
        }
    }

    #[test]
    fn test_render_contains_rows_and_total() {
        let html = render_receipt_html(&receipt());

        assert!(html.contains("Date: Fri, Aug 7, 2026, 3:05 PM"));
        assert!(html.contains("Milk 2%"));
        // Empty label falls back to the kind + id display name.
        assert!(html.contains("PRICE: item-2-2"));
        // Line subtotal and captured total.
        assert!(html.contains("$7.50"));
        assert!(html.contains("Total: $12.49"));
    }

    #[test]
    fn test_render_escapes_labels() {
        let mut r = receipt();
        r.items[0].label = "<script>".to_string();

        let html = render_receipt_html(&r);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_receipt_file_name() {
        assert_eq!(
            receipt_file_name(&receipt()),
            "receipt_Fri_Aug_7_2026_3_05_PM.html"
        );
    }

    #[tokio::test]
    async fn test_html_file_exporter_writes_document() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = HtmlFileExporter::new(dir.path().join("exports"));

        let path = exporter.export(&receipt()).await.unwrap();

        assert!(path.exists());
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("Total: $12.49"));
    }
}
