//! Invoice composition.
//!
//! Renders a fixed-layout, single-page A4 invoice from a cart snapshot plus
//! an optional order confirmation, producing an in-memory PDF the caller can
//! save wherever the user chooses. Rendering is a deterministic single pass:
//! header band, supplier/customer info boxes, a metadata strip, one table
//! row per cart line at a fixed row height with alternating fill, a totals
//! summary, and a fixed footer.
//!
//! There is no pagination; the layout assumes cart sizes stay within one
//! page. Carts large enough to overflow render past the footer.

use chrono::Utc;
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};
use thiserror::Error;

use embermart_core::{Cart, Money, PaymentMethod};

use crate::api::types::OrderConfirmation;

// A4 in points.
const PAGE_WIDTH: f32 = 595.0;
const PAGE_HEIGHT: f32 = 842.0;
const MARGIN: f32 = 40.0;
const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;

const ROW_HEIGHT: f32 = 22.0;
const NAME_MAX_CHARS: usize = 42;

// Brand palette.
const BRAND_RED: Rgb = (0.72, 0.11, 0.11);
const BRAND_RED_LIGHT: Rgb = (0.97, 0.88, 0.88);
const HEADER_GRAY: Rgb = (0.25, 0.25, 0.25);
const STRIPE_GRAY: Rgb = (0.94, 0.94, 0.94);
const BOX_GRAY: Rgb = (0.96, 0.96, 0.96);
const BLACK: Rgb = (0.0, 0.0, 0.0);
const WHITE: Rgb = (1.0, 1.0, 1.0);
const MUTED: Rgb = (0.45, 0.45, 0.45);

const SUPPLIER_NAME: &str = "EmberMart Fire Safety Equipment Co.";
const SUPPLIER_ADDRESS: &str = "18 Forge Road, Unit 4";
const SUPPLIER_PHONE: &str = "+1 555 0199";
const FOOTER_CONTACT: &str = "EmberMart - support@embermart.example - +1 555 0199";
const FOOTER_TERMS: &str = "Goods remain the property of EmberMart until paid in full.";
const FOOTER_BANNER: &str = "Certified fire-safety equipment supplier - inspected and tested to NFPA standards";

type Rgb = (f32, f32, f32);

/// Errors raised while composing or writing an invoice.
#[derive(Debug, Error)]
pub enum InvoiceError {
    /// PDF construction or serialization failed.
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// Writing the document to disk failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Customer contact fields for the invoice. Any of them may be empty for
/// guest checkout; the layout falls back to "Guest Customer".
#[derive(Debug, Clone, Default)]
pub struct CustomerDetails {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// A composed invoice: a write-once, in-memory PDF.
pub struct InvoiceDocument {
    doc: Document,
    /// The invoice number printed in the metadata strip
    /// (`INV-{order}` or `DRAFT-{timestamp}`).
    pub invoice_number: String,
}

impl InvoiceDocument {
    /// Serialize the document to bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if PDF serialization fails.
    pub fn to_bytes(mut self) -> Result<Vec<u8>, InvoiceError> {
        let mut bytes = Vec::new();
        self.doc.save_to(&mut bytes)?;
        Ok(bytes)
    }

    /// Write the document to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the filesystem write fails.
    pub fn save(mut self, path: &std::path::Path) -> Result<(), InvoiceError> {
        self.doc.save(path)?;
        Ok(())
    }
}

impl std::fmt::Debug for InvoiceDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InvoiceDocument")
            .field("invoice_number", &self.invoice_number)
            .finish_non_exhaustive()
    }
}

/// Compose an invoice from a cart snapshot.
///
/// With an [`OrderConfirmation`] the invoice is finalized (`INV-{order}`,
/// backend status); without one it is a draft (`DRAFT-{unix-seconds}`,
/// unique per generation without a counter).
///
/// # Errors
///
/// Returns an error if the PDF content stream cannot be encoded.
pub fn compose(
    cart: &Cart,
    confirmation: Option<&OrderConfirmation>,
    customer: &CustomerDetails,
    payment_method: PaymentMethod,
) -> Result<InvoiceDocument, InvoiceError> {
    let invoice_number = confirmation.map_or_else(
        || format!("DRAFT-{}", Utc::now().timestamp()),
        |c| format!("INV-{}", c.order_id),
    );
    let status = confirmation.map_or("Draft", |c| c.status.label());

    let mut ops: Vec<Operation> = Vec::new();
    draw_header(&mut ops);
    draw_info_boxes(&mut ops, customer);
    draw_metadata_strip(&mut ops, &invoice_number, status, payment_method);
    let y = draw_line_table(&mut ops, cart);
    draw_totals(&mut ops, y, cart.total());
    draw_footer(&mut ops);

    let doc = build_document(ops)?;
    Ok(InvoiceDocument {
        doc,
        invoice_number,
    })
}

// =============================================================================
// Layout Sections
// =============================================================================

fn draw_header(ops: &mut Vec<Operation>) {
    fill_rect(ops, 0.0, PAGE_HEIGHT - 50.0, PAGE_WIDTH, 50.0, BRAND_RED);
    text(ops, Font::Bold, 18.0, MARGIN, PAGE_HEIGHT - 33.0, WHITE, SUPPLIER_NAME);
    text(ops, Font::Bold, 16.0, PAGE_WIDTH - 110.0, PAGE_HEIGHT - 33.0, WHITE, "INVOICE");
}

fn draw_info_boxes(ops: &mut Vec<Operation>, customer: &CustomerDetails) {
    let box_top = PAGE_HEIGHT - 72.0;
    let box_height = 72.0;
    let box_width = 250.0;
    let box_y = box_top - box_height;

    // Supplier (static)
    fill_rect(ops, MARGIN, box_y, box_width, box_height, BOX_GRAY);
    text(ops, Font::Bold, 10.0, MARGIN + 8.0, box_top - 16.0, BLACK, "Supplier");
    text(ops, Font::Regular, 9.0, MARGIN + 8.0, box_top - 32.0, BLACK, SUPPLIER_NAME);
    text(ops, Font::Regular, 9.0, MARGIN + 8.0, box_top - 46.0, BLACK, SUPPLIER_ADDRESS);
    text(ops, Font::Regular, 9.0, MARGIN + 8.0, box_top - 60.0, BLACK, SUPPLIER_PHONE);

    // Customer (from input, guest fallback)
    let cx = MARGIN + box_width + 15.0;
    let name = customer
        .name
        .as_deref()
        .filter(|n| !n.trim().is_empty())
        .unwrap_or("Guest Customer");
    let phone = customer.phone.as_deref().unwrap_or("-");
    let address = customer.address.as_deref().unwrap_or("-");

    fill_rect(ops, cx, box_y, box_width, box_height, BOX_GRAY);
    text(ops, Font::Bold, 10.0, cx + 8.0, box_top - 16.0, BLACK, "Bill To");
    text(ops, Font::Regular, 9.0, cx + 8.0, box_top - 32.0, BLACK, name);
    text(ops, Font::Regular, 9.0, cx + 8.0, box_top - 46.0, BLACK, &truncate(address, 48));
    text(ops, Font::Regular, 9.0, cx + 8.0, box_top - 60.0, BLACK, phone);
}

fn draw_metadata_strip(
    ops: &mut Vec<Operation>,
    invoice_number: &str,
    status: &str,
    payment_method: PaymentMethod,
) {
    let strip_y = PAGE_HEIGHT - 178.0;
    fill_rect(ops, MARGIN, strip_y, CONTENT_WIDTH, 24.0, STRIPE_GRAY);

    let baseline = strip_y + 8.0;
    text(ops, Font::Bold, 9.0, MARGIN + 8.0, baseline, BLACK, "Invoice:");
    text(ops, Font::Regular, 9.0, MARGIN + 48.0, baseline, BLACK, invoice_number);
    text(ops, Font::Bold, 9.0, MARGIN + 160.0, baseline, BLACK, "Date:");
    text(
        ops,
        Font::Regular,
        9.0,
        MARGIN + 190.0,
        baseline,
        BLACK,
        &Utc::now().format("%Y-%m-%d").to_string(),
    );
    text(ops, Font::Bold, 9.0, MARGIN + 270.0, baseline, BLACK, "Status:");
    text(ops, Font::Regular, 9.0, MARGIN + 306.0, baseline, BLACK, status);
    text(ops, Font::Bold, 9.0, MARGIN + 380.0, baseline, BLACK, "Payment:");
    text(
        ops,
        Font::Regular,
        9.0,
        MARGIN + 426.0,
        baseline,
        BLACK,
        payment_method.label(),
    );
}

/// Draw the line-item table; returns the y coordinate below the last row.
fn draw_line_table(ops: &mut Vec<Operation>, cart: &Cart) -> f32 {
    let table_top = PAGE_HEIGHT - 200.0;

    // Column baselines.
    let col_index = MARGIN + 8.0;
    let col_name = MARGIN + 34.0;
    let col_qty = MARGIN + 310.0;
    let col_unit = MARGIN + 360.0;
    let col_total = MARGIN + 445.0;

    // Header row
    let header_y = table_top - ROW_HEIGHT;
    fill_rect(ops, MARGIN, header_y, CONTENT_WIDTH, ROW_HEIGHT, HEADER_GRAY);
    let baseline = header_y + 7.0;
    text(ops, Font::Bold, 10.0, col_index, baseline, WHITE, "#");
    text(ops, Font::Bold, 10.0, col_name, baseline, WHITE, "Item");
    text(ops, Font::Bold, 10.0, col_qty, baseline, WHITE, "Qty");
    text(ops, Font::Bold, 10.0, col_unit, baseline, WHITE, "Unit price");
    text(ops, Font::Bold, 10.0, col_total, baseline, WHITE, "Total");

    // One row per line, alternating fill for readability
    let mut row_y = header_y;
    for (i, line) in cart.lines().iter().enumerate() {
        row_y -= ROW_HEIGHT;
        if i % 2 == 1 {
            fill_rect(ops, MARGIN, row_y, CONTENT_WIDTH, ROW_HEIGHT, STRIPE_GRAY);
        }
        let baseline = row_y + 7.0;
        text(ops, Font::Regular, 9.0, col_index, baseline, BLACK, &(i + 1).to_string());
        text(
            ops,
            Font::Regular,
            9.0,
            col_name,
            baseline,
            BLACK,
            &truncate(&line.name, NAME_MAX_CHARS),
        );
        text(ops, Font::Regular, 9.0, col_qty, baseline, BLACK, &line.quantity.to_string());
        text(ops, Font::Regular, 9.0, col_unit, baseline, BLACK, &line.unit_price.display());
        text(ops, Font::Regular, 9.0, col_total, baseline, BLACK, &line.line_total().display());
    }

    row_y
}

fn draw_totals(ops: &mut Vec<Operation>, table_bottom: f32, grand_total: Money) {
    let label_x = MARGIN + 330.0;
    let value_x = MARGIN + 445.0;
    let mut y = table_bottom - 24.0;

    let zero = Money::zero().display();
    let rows: [(&str, String); 4] = [
        ("Subtotal", grand_total.display()),
        ("Shipping", zero.clone()),
        ("Tax", zero.clone()),
        ("Discount", zero),
    ];
    for (label, value) in rows {
        text(ops, Font::Regular, 9.0, label_x, y, BLACK, label);
        text(ops, Font::Regular, 9.0, value_x, y, BLACK, &value);
        y -= 16.0;
    }

    fill_rect(ops, label_x - 8.0, y - 7.0, CONTENT_WIDTH - 322.0, 22.0, BRAND_RED_LIGHT);
    text(ops, Font::Bold, 11.0, label_x, y, BRAND_RED, "Grand total");
    text(ops, Font::Bold, 11.0, value_x, y, BRAND_RED, &grand_total.display());
}

fn draw_footer(ops: &mut Vec<Operation>) {
    text(ops, Font::Regular, 8.0, MARGIN, 78.0, MUTED, FOOTER_CONTACT);
    text(ops, Font::Regular, 8.0, MARGIN, 66.0, MUTED, FOOTER_TERMS);

    fill_rect(ops, MARGIN, 38.0, CONTENT_WIDTH, 18.0, BRAND_RED_LIGHT);
    text(ops, Font::Bold, 8.0, MARGIN + 60.0, 44.0, BRAND_RED, FOOTER_BANNER);
}

// =============================================================================
// PDF Plumbing
// =============================================================================

#[derive(Clone, Copy)]
enum Font {
    Regular,
    Bold,
}

impl Font {
    const fn resource_name(self) -> &'static [u8] {
        match self {
            Self::Regular => b"F1",
            Self::Bold => b"F2",
        }
    }
}

/// Emit a filled rectangle.
fn fill_rect(ops: &mut Vec<Operation>, x: f32, y: f32, width: f32, height: f32, color: Rgb) {
    ops.push(Operation::new("q", vec![]));
    ops.push(Operation::new(
        "rg",
        vec![color.0.into(), color.1.into(), color.2.into()],
    ));
    ops.push(Operation::new(
        "re",
        vec![x.into(), y.into(), width.into(), height.into()],
    ));
    ops.push(Operation::new("f", vec![]));
    ops.push(Operation::new("Q", vec![]));
}

/// Emit one run of text at an absolute position.
fn text(ops: &mut Vec<Operation>, font: Font, size: f32, x: f32, y: f32, color: Rgb, s: &str) {
    ops.push(Operation::new("BT", vec![]));
    ops.push(Operation::new(
        "rg",
        vec![color.0.into(), color.1.into(), color.2.into()],
    ));
    ops.push(Operation::new(
        "Tf",
        vec![Object::Name(font.resource_name().to_vec()), size.into()],
    ));
    ops.push(Operation::new("Td", vec![x.into(), y.into()]));
    ops.push(Operation::new("Tj", vec![Object::string_literal(s)]));
    ops.push(Operation::new("ET", vec![]));
}

/// Truncate display text to fit a fixed-width column.
fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{kept}...")
}

/// Assemble a one-page document around the drawn operations.
fn build_document(ops: Vec<Operation>) -> Result<Document, InvoiceError> {
    let mut doc = Document::with_version("1.5");

    let pages_id = doc.new_object_id();
    let regular_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let bold_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => regular_id,
            "F2" => bold_id,
        },
    });

    let content = Content { operations: ops };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
    });

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    Ok(doc)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use embermart_core::{CartLine, CurrencyCode, OrderId, OrderStatus, ProductId};

    use super::*;

    fn sample_cart() -> Cart {
        let mut cart = Cart::new();
        cart.add_item(CartLine {
            product_id: ProductId::new(1),
            name: "ABC Dry Chemical Extinguisher 6kg".to_string(),
            unit_price: Money::new("5000".parse().unwrap(), CurrencyCode::USD),
            available_stock: 12,
            quantity: 2,
        });
        cart.add_item(CartLine {
            product_id: ProductId::new(2),
            name: "Photoelectric Smoke Detector".to_string(),
            unit_price: Money::new("1500".parse().unwrap(), CurrencyCode::USD),
            available_stock: 30,
            quantity: 3,
        });
        cart
    }

    fn confirmation() -> OrderConfirmation {
        OrderConfirmation {
            order_id: OrderId::new(1007),
            status: OrderStatus::Pending,
            payment_method: PaymentMethod::CashOnDelivery,
        }
    }

    fn extract_text(bytes: &[u8]) -> String {
        let doc = Document::load_mem(bytes).unwrap();
        doc.extract_text(&[1]).unwrap()
    }

    #[test]
    fn test_finalized_invoice_contents() {
        let customer = CustomerDetails {
            name: Some("Dana Reed".to_string()),
            phone: Some("555-0100".to_string()),
            address: Some("7 Elm St".to_string()),
        };
        let invoice = compose(
            &sample_cart(),
            Some(&confirmation()),
            &customer,
            PaymentMethod::CashOnDelivery,
        )
        .unwrap();
        assert_eq!(invoice.invoice_number, "INV-1007");

        let bytes = invoice.to_bytes().unwrap();
        assert!(bytes.starts_with(b"%PDF"));

        let extracted = extract_text(&bytes);
        assert!(extracted.contains("INV-1007"));
        assert!(extracted.contains("Dana Reed"));
        assert!(extracted.contains("ABC Dry Chemical Extinguisher 6kg"));
        assert!(extracted.contains("Photoelectric Smoke Detector"));
        // grand total equals the cart total at generation time
        assert!(extracted.contains("$14,500"));
        assert!(extracted.contains("Pending"));
        assert!(extracted.contains("Cash on delivery"));
    }

    #[test]
    fn test_draft_invoice_without_confirmation() {
        let invoice = compose(
            &sample_cart(),
            None,
            &CustomerDetails::default(),
            PaymentMethod::Online,
        )
        .unwrap();
        assert!(invoice.invoice_number.starts_with("DRAFT-"));

        let extracted = extract_text(&invoice.to_bytes().unwrap());
        assert!(extracted.contains("DRAFT-"));
        assert!(extracted.contains("Draft"));
        assert!(extracted.contains("Guest Customer"));
    }

    #[test]
    fn test_one_table_row_per_cart_line() {
        let mut cart = Cart::new();
        for i in 1..=5_i64 {
            cart.add_item(CartLine {
                product_id: ProductId::new(i),
                name: format!("Fire Hose Reel Model {i}"),
                unit_price: Money::new("250".parse().unwrap(), CurrencyCode::USD),
                available_stock: 10,
                quantity: 1,
            });
        }

        let invoice = compose(&cart, None, &CustomerDetails::default(), PaymentMethod::Online)
            .unwrap();
        let extracted = extract_text(&invoice.to_bytes().unwrap());
        for i in 1..=5 {
            assert!(extracted.contains(&format!("Fire Hose Reel Model {i}")));
        }
    }

    #[test]
    fn test_single_page_document() {
        let invoice = compose(
            &sample_cart(),
            None,
            &CustomerDetails::default(),
            PaymentMethod::Online,
        )
        .unwrap();
        let doc = Document::load_mem(&invoice.to_bytes().unwrap()).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn test_save_writes_pdf_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("invoice.pdf");
        let invoice = compose(
            &sample_cart(),
            Some(&confirmation()),
            &CustomerDetails::default(),
            PaymentMethod::CashOnDelivery,
        )
        .unwrap();
        invoice.save(&path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_truncate_long_names() {
        assert_eq!(truncate("short", 10), "short");
        let long = "A very long product name that will not fit the column";
        let cut = truncate(long, 20);
        assert_eq!(cut.chars().count(), 20);
        assert!(cut.ends_with("..."));
    }
}
