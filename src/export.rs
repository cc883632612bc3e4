// 📄 Export Formatter - Downloadable shopping list
// Renders the current cart as plain text or a printable HTML page. The
// artifact is write-only: it is handed to the user as a file and never
// parsed back.

use crate::cart::Cart;
use chrono::{DateTime, Utc};
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Text,
    Html,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Text => "txt",
            ExportFormat::Html => "html",
        }
    }
}

/// `grocery_list_YYYYMMDD.txt` / `grocery_list_YYYYMMDD_HHMM.html`.
pub fn suggested_filename(generated_at: DateTime<Utc>, format: ExportFormat) -> String {
    match format {
        ExportFormat::Text => format!("grocery_list_{}.txt", generated_at.format("%Y%m%d")),
        ExportFormat::Html => {
            format!("grocery_list_{}.html", generated_at.format("%Y%m%d_%H%M"))
        }
    }
}

// ============================================================================
// TEXT
// ============================================================================

/// Plain-text checklist: one `□` entry per line with qty × price = subtotal,
/// then the grand total.
pub fn render_text(cart: &Cart, generated_at: DateTime<Utc>) -> String {
    let mut out = String::new();

    out.push_str("GROCERY SHOPPING LIST\n");
    let _ = writeln!(out, "Generated: {}", generated_at.format("%Y-%m-%d %H:%M"));
    out.push_str(&"=".repeat(40));
    out.push_str("\n\n");

    for (name, line) in cart.iter() {
        let _ = writeln!(out, "□ {}", name);
        let _ = writeln!(
            out,
            "  Qty: {} × RM{:.2} = RM{:.2}\n",
            line.quantity,
            line.unit_price,
            line.subtotal()
        );
    }

    out.push_str(&"=".repeat(40));
    out.push('\n');
    let _ = writeln!(out, "TOTAL: RM{:.2}", cart.total());

    out
}

// ============================================================================
// HTML
// ============================================================================

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Self-contained HTML page meant to be opened in a browser and printed or
/// saved as a PDF.
pub fn render_html(cart: &Cart, generated_at: DateTime<Utc>) -> String {
    let mut out = String::new();

    out.push_str(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>Grocery Shopping List</title>
    <style>
        body { font-family: Arial, sans-serif; max-width: 800px; margin: 0 auto; padding: 20px; line-height: 1.6; }
        .header { text-align: center; border-bottom: 2px solid #333; padding-bottom: 20px; margin-bottom: 30px; }
        .title { font-size: 28px; font-weight: bold; color: #333; margin-bottom: 10px; }
        .date { font-size: 14px; color: #666; }
        .item { display: flex; justify-content: space-between; align-items: center; padding: 10px 0; border-bottom: 1px solid #eee; }
        .item-info { flex-grow: 1; }
        .item-name { font-weight: bold; font-size: 16px; margin-bottom: 5px; }
        .item-details { font-size: 14px; color: #666; }
        .checkbox { font-size: 20px; margin-right: 15px; }
        .subtotal { font-weight: bold; font-size: 16px; min-width: 100px; text-align: right; }
        .total-section { margin-top: 30px; padding-top: 20px; border-top: 2px solid #333; text-align: right; }
        .total { font-size: 24px; font-weight: bold; color: #333; }
        .footer { text-align: center; margin-top: 40px; padding-top: 20px; border-top: 1px solid #eee; color: #666; font-style: italic; }
        @media print { body { margin: 0; } .no-print { display: none; } }
    </style>
</head>
<body>
    <div class="header">
        <div class="title">🛒 GROCERY SHOPPING LIST</div>
"#,
    );
    let _ = writeln!(
        out,
        "        <div class=\"date\">Generated: {}</div>",
        generated_at.format("%Y-%m-%d %H:%M")
    );
    out.push_str("    </div>\n\n    <div class=\"items-section\">\n");

    for (name, line) in cart.iter() {
        let _ = writeln!(
            out,
            r#"        <div class="item">
            <div class="checkbox">☐</div>
            <div class="item-info">
                <div class="item-name">{}</div>
                <div class="item-details">Qty: {} × RM{:.2}</div>
            </div>
            <div class="subtotal">RM{:.2}</div>
        </div>"#,
            escape_html(name),
            line.quantity,
            line.unit_price,
            line.subtotal()
        );
    }

    out.push_str("    </div>\n\n    <div class=\"total-section\">\n");
    let _ = writeln!(
        out,
        "        <div class=\"total\">TOTAL: RM{:.2}</div>",
        cart.total()
    );
    out.push_str(
        r#"    </div>

    <div class="footer">
        Happy Shopping! 🛒<br>
        <small>Tip: Use Ctrl+P (or Cmd+P on Mac) to print or save as PDF</small>
    </div>
</body>
</html>
"#,
    );

    out
}

// ============================================================================
// TESTS
// ============================================================================
