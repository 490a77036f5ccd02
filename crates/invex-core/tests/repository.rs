//! Store behavior over an in-memory SQLite database.

use std::str::FromStr;

use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use sqlx::Row;

use invex_core::{
    InvexError, Invoice, InvoiceAggregate, InvoiceRepository, InvoiceStatus, InvoiceUpdate,
    LineItem,
};

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn item(description: &str, quantity: &str, unit_price: &str, amount: &str) -> LineItem {
    LineItem {
        description: description.to_string(),
        quantity: dec(quantity),
        unit_price: dec(unit_price),
        amount: dec(amount),
    }
}

fn aggregate(invoice_no: &str, line_items: Vec<LineItem>) -> InvoiceAggregate {
    let now = chrono::Utc::now();
    InvoiceAggregate {
        invoice: Invoice {
            id: uuid::Uuid::new_v4(),
            invoice_no: invoice_no.to_string(),
            invoice_date: "15/01/2024".to_string(),
            vendor_name: "Acme Trading Co".to_string(),
            gst_no: "22AAAAA0000A1Z5".to_string(),
            subtotal: dec("500.00"),
            tax: dec("90.00"),
            grand_total: dec("590.00"),
            status: InvoiceStatus::Uploaded,
            file_path: "uploads/a.pdf".to_string(),
            file_type: "application/pdf".to_string(),
            created_at: now,
            updated_at: now,
        },
        line_items,
    }
}

fn update_from(invoice: &Invoice) -> InvoiceUpdate {
    InvoiceUpdate {
        invoice_no: invoice.invoice_no.clone(),
        invoice_date: invoice.invoice_date.clone(),
        vendor_name: invoice.vendor_name.clone(),
        gst_no: invoice.gst_no.clone(),
        subtotal: invoice.subtotal,
        tax: invoice.tax,
        grand_total: invoice.grand_total,
        status: invoice.status,
    }
}

#[tokio::test]
async fn test_create_then_get_round_trip() {
    let repo = InvoiceRepository::open_in_memory().await.unwrap();
    let stored = aggregate(
        "INV-1",
        vec![
            item("Copper pipe", "4", "120.00", "480.00"),
            item("Brass fitting", "2", "10.00", "20.00"),
        ],
    );

    let id = repo.create(&stored).await.unwrap();
    let fetched = repo.get(id).await.unwrap();

    assert_eq!(fetched.invoice.invoice_no, "INV-1");
    assert_eq!(fetched.invoice.subtotal, dec("500.00"));
    assert_eq!(fetched.invoice.status, InvoiceStatus::Uploaded);
    assert_eq!(fetched.line_items, stored.line_items);
}

#[tokio::test]
async fn test_list_is_newest_first() {
    let repo = InvoiceRepository::open_in_memory().await.unwrap();

    let mut older = aggregate("INV-OLD", vec![]);
    older.invoice.created_at = chrono::Utc::now() - chrono::Duration::hours(1);
    let mut newer = aggregate("INV-NEW", vec![]);
    newer.invoice.created_at = chrono::Utc::now();

    repo.create(&older).await.unwrap();
    repo.create(&newer).await.unwrap();

    let listed = repo.list().await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].invoice_no, "INV-NEW");
    assert_eq!(listed[1].invoice_no, "INV-OLD");

    // Listing mutates nothing.
    let again = repo.list().await.unwrap();
    assert_eq!(again.len(), 2);
    assert_eq!(again[0].invoice_no, "INV-NEW");
}

#[tokio::test]
async fn test_get_unknown_id_is_not_found() {
    let repo = InvoiceRepository::open_in_memory().await.unwrap();
    let id = uuid::Uuid::new_v4();

    let err = repo.get(id).await.unwrap_err();
    assert!(matches!(err, InvexError::NotFound(e) if e == id));
}

#[tokio::test]
async fn test_replace_rewrites_header_and_items() {
    let repo = InvoiceRepository::open_in_memory().await.unwrap();
    let stored = aggregate("INV-1", vec![item("Widget", "1", "10.00", "10.00")]);
    let id = repo.create(&stored).await.unwrap();

    let mut update = update_from(&stored.invoice);
    update.vendor_name = "Corrected Vendor Pvt Ltd".to_string();
    update.status = InvoiceStatus::Verified;
    let new_items = vec![
        item("Widget", "2", "10.00", "20.00"),
        item("Gasket", "5", "1.00", "5.00"),
    ];

    repo.replace(id, &update, &new_items).await.unwrap();
    let fetched = repo.get(id).await.unwrap();

    assert_eq!(fetched.invoice.vendor_name, "Corrected Vendor Pvt Ltd");
    assert_eq!(fetched.invoice.status, InvoiceStatus::Verified);
    assert_eq!(fetched.line_items, new_items);
    assert_eq!(fetched.invoice.created_at, stored.invoice.created_at);
    assert!(fetched.invoice.updated_at > stored.invoice.updated_at);
}

#[tokio::test]
async fn test_replace_with_empty_items_clears_them() {
    let repo = InvoiceRepository::open_in_memory().await.unwrap();
    let stored = aggregate("INV-1", vec![item("Widget", "1", "10.00", "10.00")]);
    let id = repo.create(&stored).await.unwrap();

    repo.replace(id, &update_from(&stored.invoice), &[])
        .await
        .unwrap();

    assert!(repo.get(id).await.unwrap().line_items.is_empty());
}

#[tokio::test]
async fn test_replace_unknown_id_is_not_found() {
    let repo = InvoiceRepository::open_in_memory().await.unwrap();
    let stored = aggregate("INV-1", vec![]);
    let id = uuid::Uuid::new_v4();

    let err = repo
        .replace(id, &update_from(&stored.invoice), &[])
        .await
        .unwrap_err();
    assert!(matches!(err, InvexError::NotFound(e) if e == id));
}

#[tokio::test]
async fn test_delete_cascades_to_line_items() {
    let repo = InvoiceRepository::open_in_memory().await.unwrap();
    let stored = aggregate("INV-1", vec![item("Widget", "1", "10.00", "10.00")]);
    let id = repo.create(&stored).await.unwrap();

    repo.delete(id).await.unwrap();

    let err = repo.get(id).await.unwrap_err();
    assert!(matches!(err, InvexError::NotFound(_)));

    let orphans: i64 = sqlx::query("SELECT COUNT(*) AS n FROM line_items")
        .fetch_one(repo.pool())
        .await
        .unwrap()
        .get("n");
    assert_eq!(orphans, 0);
}

#[tokio::test]
async fn test_delete_unknown_id_is_not_found() {
    let repo = InvoiceRepository::open_in_memory().await.unwrap();
    let err = repo.delete(uuid::Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, InvexError::NotFound(_)));
}

#[tokio::test]
async fn test_create_is_atomic_across_line_items() {
    let repo = InvoiceRepository::open_in_memory().await.unwrap();

    // The second item violates the non-negative amount constraint; the
    // whole aggregate must be rolled back, header included.
    let stored = aggregate(
        "INV-BAD",
        vec![
            item("Widget", "1", "10.00", "10.00"),
            item("Refund", "1", "10.00", "-10.00"),
            item("Gasket", "1", "1.00", "1.00"),
        ],
    );

    let err = repo.create(&stored).await.unwrap_err();
    assert!(matches!(err, InvexError::Persistence(_)));

    assert!(repo.list().await.unwrap().is_empty());
    let rows: i64 = sqlx::query("SELECT COUNT(*) AS n FROM line_items")
        .fetch_one(repo.pool())
        .await
        .unwrap()
        .get("n");
    assert_eq!(rows, 0);
}

#[tokio::test]
async fn test_replace_is_atomic_across_line_items() {
    let repo = InvoiceRepository::open_in_memory().await.unwrap();
    let stored = aggregate("INV-1", vec![item("Widget", "1", "10.00", "10.00")]);
    let id = repo.create(&stored).await.unwrap();

    // The replacement set carries a negative amount; the whole
    // correction must be rolled back, leaving the stored aggregate
    // untouched.
    let mut update = update_from(&stored.invoice);
    update.vendor_name = "Should Not Stick".to_string();
    update.status = InvoiceStatus::Verified;
    let bad_items = vec![
        item("Widget", "2", "10.00", "20.00"),
        item("Refund", "1", "2.00", "-2.00"),
    ];

    let err = repo.replace(id, &update, &bad_items).await.unwrap_err();
    assert!(matches!(err, InvexError::Persistence(_)));

    let fetched = repo.get(id).await.unwrap();
    assert_eq!(fetched.invoice.vendor_name, "Acme Trading Co");
    assert_eq!(fetched.invoice.status, InvoiceStatus::Uploaded);
    assert_eq!(fetched.line_items, stored.line_items);
}

