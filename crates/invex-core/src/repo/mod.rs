//! SQLite-backed invoice store.
//!
//! Header and line items form one aggregate: every write touching both
//! runs inside a single transaction, so a failed line-item insert rolls
//! the header back too.

use std::path::Path;
use std::str::FromStr;

use rust_decimal::Decimal;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use tracing::info;
use uuid::Uuid;

use crate::error::{InvexError, PersistenceError, Result};
use crate::models::{Invoice, InvoiceAggregate, InvoiceStatus, InvoiceUpdate, LineItem};

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Invoice store over a SQLite connection pool.
#[derive(Debug, Clone)]
pub struct InvoiceRepository {
    pool: SqlitePool,
}

impl InvoiceRepository {
    /// Open (creating if necessary) the store at `path` and run
    /// pending migrations.
    pub async fn open(path: &Path) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePool::connect_with(options)
            .await
            .map_err(|e| PersistenceError::Open {
                path: path.display().to_string(),
                source: e,
            })?;

        MIGRATOR.run(&pool).await.map_err(PersistenceError::from)?;
        Ok(Self { pool })
    }

    /// Open a fresh in-memory store.
    ///
    /// Pinned to a single never-recycled connection: an in-memory
    /// SQLite database lives and dies with its connection.
    pub async fn open_in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| PersistenceError::Open {
                path: ":memory:".to_string(),
                source: e,
            })?
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|e| PersistenceError::Open {
                path: ":memory:".to_string(),
                source: e,
            })?;

        MIGRATOR.run(&pool).await.map_err(PersistenceError::from)?;
        Ok(Self { pool })
    }

    /// Underlying pool, for callers that need raw queries.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Persist a freshly extracted aggregate. All-or-nothing: if any
    /// line item is rejected, the header is not stored either.
    pub async fn create(&self, aggregate: &InvoiceAggregate) -> Result<Uuid> {
        let invoice = &aggregate.invoice;
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| query_err("begin create", e))?;

        sqlx::query(
            "INSERT INTO invoices \
             (id, invoice_no, invoice_date, vendor_name, gst_no, \
              subtotal, tax, grand_total, status, file_path, file_type, \
              created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(invoice.id.to_string())
        .bind(&invoice.invoice_no)
        .bind(&invoice.invoice_date)
        .bind(&invoice.vendor_name)
        .bind(&invoice.gst_no)
        .bind(invoice.subtotal.to_string())
        .bind(invoice.tax.to_string())
        .bind(invoice.grand_total.to_string())
        .bind(invoice.status.as_str())
        .bind(&invoice.file_path)
        .bind(&invoice.file_type)
        .bind(invoice.created_at)
        .bind(invoice.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| query_err("insert invoice", e))?;

        insert_line_items(&mut tx, invoice.id, &aggregate.line_items).await?;

        tx.commit()
            .await
            .map_err(|e| query_err("commit create", e))?;

        info!(id = %invoice.id, items = aggregate.line_items.len(), "stored invoice");
        Ok(invoice.id)
    }

    /// List invoice headers, most recently created first.
    pub async fn list(&self) -> Result<Vec<Invoice>> {
        let rows = sqlx::query("SELECT * FROM invoices ORDER BY created_at DESC, id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| query_err("list invoices", e))?;

        rows.iter()
            .map(|row| map_invoice(row).map_err(|e| query_err("decode invoice", e)))
            .collect()
    }

    /// Fetch one invoice with its line items in stored order.
    pub async fn get(&self, id: Uuid) -> Result<InvoiceAggregate> {
        let row = sqlx::query("SELECT * FROM invoices WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| query_err("get invoice", e))?
            .ok_or(InvexError::NotFound(id))?;

        let invoice = map_invoice(&row).map_err(|e| query_err("decode invoice", e))?;
        let line_items = self.line_items_for(id).await?;

        Ok(InvoiceAggregate {
            invoice,
            line_items,
        })
    }

    /// Replace an invoice's header fields and entire line-item set.
    ///
    /// The stored creation timestamp, file path, and file type are
    /// untouched; `updated_at` is refreshed.
    pub async fn replace(
        &self,
        id: Uuid,
        update: &InvoiceUpdate,
        line_items: &[LineItem],
    ) -> Result<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| query_err("begin replace", e))?;

        let result = sqlx::query(
            "UPDATE invoices SET \
             invoice_no = ?, invoice_date = ?, vendor_name = ?, gst_no = ?, \
             subtotal = ?, tax = ?, grand_total = ?, status = ?, updated_at = ? \
             WHERE id = ?",
        )
        .bind(&update.invoice_no)
        .bind(&update.invoice_date)
        .bind(&update.vendor_name)
        .bind(&update.gst_no)
        .bind(update.subtotal.to_string())
        .bind(update.tax.to_string())
        .bind(update.grand_total.to_string())
        .bind(update.status.as_str())
        .bind(chrono::Utc::now())
        .bind(id.to_string())
        .execute(&mut *tx)
        .await
        .map_err(|e| query_err("update invoice", e))?;

        if result.rows_affected() == 0 {
            return Err(InvexError::NotFound(id));
        }

        sqlx::query("DELETE FROM line_items WHERE invoice_id = ?")
            .bind(id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| query_err("clear line items", e))?;

        insert_line_items(&mut tx, id, line_items).await?;

        tx.commit()
            .await
            .map_err(|e| query_err("commit replace", e))?;

        info!(id = %id, items = line_items.len(), "replaced invoice");
        Ok(())
    }

    /// Delete an invoice; its line items go with it.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM invoices WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| query_err("delete invoice", e))?;

        if result.rows_affected() == 0 {
            return Err(InvexError::NotFound(id));
        }

        info!(id = %id, "deleted invoice");
        Ok(())
    }

    async fn line_items_for(&self, id: Uuid) -> Result<Vec<LineItem>> {
        let rows = sqlx::query(
            "SELECT description, quantity, unit_price, amount \
             FROM line_items WHERE invoice_id = ? ORDER BY id",
        )
        .bind(id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| query_err("list line items", e))?;

        rows.iter()
            .map(|row| map_line_item(row).map_err(|e| query_err("decode line item", e)))
            .collect()
    }
}

async fn insert_line_items(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    invoice_id: Uuid,
    line_items: &[LineItem],
) -> Result<()> {
    for item in line_items {
        sqlx::query(
            "INSERT INTO line_items (invoice_id, description, quantity, unit_price, amount) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(invoice_id.to_string())
        .bind(&item.description)
        .bind(item.quantity.to_string())
        .bind(item.unit_price.to_string())
        .bind(item.amount.to_string())
        .execute(&mut **tx)
        .await
        .map_err(|e| query_err("insert line item", e))?;
    }
    Ok(())
}

fn query_err(op: &'static str, source: sqlx::Error) -> InvexError {
    InvexError::Persistence(PersistenceError::Query { op, source })
}

fn map_invoice(row: &SqliteRow) -> std::result::Result<Invoice, sqlx::Error> {
    Ok(Invoice {
        id: uuid_column(row, "id")?,
        invoice_no: row.try_get("invoice_no")?,
        invoice_date: row.try_get("invoice_date")?,
        vendor_name: row.try_get("vendor_name")?,
        gst_no: row.try_get("gst_no")?,
        subtotal: decimal_column(row, "subtotal")?,
        tax: decimal_column(row, "tax")?,
        grand_total: decimal_column(row, "grand_total")?,
        status: status_column(row, "status")?,
        file_path: row.try_get("file_path")?,
        file_type: row.try_get("file_type")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn map_line_item(row: &SqliteRow) -> std::result::Result<LineItem, sqlx::Error> {
    Ok(LineItem {
        description: row.try_get("description")?,
        quantity: decimal_column(row, "quantity")?,
        unit_price: decimal_column(row, "unit_price")?,
        amount: decimal_column(row, "amount")?,
    })
}

fn decimal_column(row: &SqliteRow, column: &str) -> std::result::Result<Decimal, sqlx::Error> {
    let raw: String = row.try_get(column)?;
    Decimal::from_str(&raw).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

fn uuid_column(row: &SqliteRow, column: &str) -> std::result::Result<Uuid, sqlx::Error> {
    let raw: String = row.try_get(column)?;
    Uuid::parse_str(&raw).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

fn status_column(
    row: &SqliteRow,
    column: &str,
) -> std::result::Result<InvoiceStatus, sqlx::Error> {
    let raw: String = row.try_get(column)?;
    raw.parse().map_err(|e: crate::models::ParseStatusError| {
        sqlx::Error::ColumnDecode {
            index: column.to_string(),
            source: Box::new(e),
        }
    })
}
