use chrono::{DateTime, Utc};
use mobc::{Manager, Pool};
use rusqlite::{params, Connection, Result as SqliteResult};
use std::path::Path;
use tracing::{debug, info, warn};

use crate::models::{Source, SupplierRecord};
use crate::validator::DatasetRow;

pub struct SqliteManager {
    db_path: String,
}

impl SqliteManager {
    pub fn new(db_path: String) -> Self {
        Self { db_path }
    }
}

#[async_trait::async_trait]
impl Manager for SqliteManager {
    type Connection = Connection;
    type Error = rusqlite::Error;

    async fn connect(&self) -> Result<Self::Connection, Self::Error> {
        debug!("Opening database: {}", self.db_path);
        let conn = Connection::open(&self.db_path)?;

        // Some PRAGMAs return a result row; query_row swallows it.
        conn.query_row("PRAGMA journal_mode=WAL", [], |_| Ok(()))?;
        conn.execute("PRAGMA synchronous=NORMAL", [])?;
        conn.execute("PRAGMA temp_store=memory", [])?;

        init_database(&conn)?;
        Ok(conn)
    }

    async fn check(&self, conn: Self::Connection) -> Result<Self::Connection, Self::Error> {
        conn.query_row("SELECT 1", [], |_| Ok(()))?;
        Ok(conn)
    }
}

fn init_database(conn: &Connection) -> SqliteResult<()> {
    conn.execute(
        r#"
        CREATE TABLE IF NOT EXISTS suppliers (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            company_name TEXT NOT NULL,
            email TEXT,
            phone TEXT,
            website TEXT,
            commodity TEXT NOT NULL,
            source TEXT NOT NULL,
            snippet TEXT,
            quality_score INTEGER DEFAULT 0,
            additional_emails TEXT,
            additional_phones TEXT,
            collection_date TEXT NOT NULL,
            UNIQUE(company_name, commodity)
        )
        "#,
        [],
    )?;

    let indexes = [
        "CREATE INDEX IF NOT EXISTS idx_suppliers_commodity ON suppliers(commodity)",
        "CREATE INDEX IF NOT EXISTS idx_suppliers_email ON suppliers(email)",
        "CREATE INDEX IF NOT EXISTS idx_suppliers_source ON suppliers(source)",
        "CREATE INDEX IF NOT EXISTS idx_suppliers_quality ON suppliers(quality_score DESC)",
    ];
    for index_sql in indexes {
        conn.execute(index_sql, [])?;
    }

    Ok(())
}

pub type DbPool = Pool<SqliteManager>;

pub async fn create_db_pool(
    db_path: &str,
) -> Result<DbPool, Box<dyn std::error::Error + Send + Sync>> {
    if let Some(parent) = Path::new(db_path).parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let manager = SqliteManager::new(db_path.to_string());
    let pool = Pool::builder().max_open(10).max_idle(5).build(manager);

    info!("SQLite connection pool created: {}", db_path);
    Ok(pool)
}

/// Upsert on (company_name, commodity); re-collected suppliers overwrite
/// their previous row.
pub async fn insert_suppliers(
    pool: &DbPool,
    records: &[SupplierRecord],
) -> Result<usize, Box<dyn std::error::Error + Send + Sync>> {
    let conn = pool.get().await?;
    let mut inserted = 0;

    for record in records {
        let result = conn.execute(
            r#"
            INSERT OR REPLACE INTO suppliers
                (company_name, email, phone, website, commodity, source,
                 snippet, quality_score, additional_emails, additional_phones,
                 collection_date)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
            params![
                record.company_name,
                record.email,
                record.phone,
                record.website,
                record.commodity,
                record.source.as_str(),
                record.snippet,
                record.quality_score as i64,
                record.additional_emails,
                record.additional_phones,
                record.collection_date,
            ],
        );

        match result {
            Ok(_) => inserted += 1,
            Err(e) => warn!("Failed to save record for {}: {}", record.company_name, e),
        }
    }

    debug!("Saved {}/{} records", inserted, records.len());
    Ok(inserted)
}

pub async fn load_suppliers(
    pool: &DbPool,
) -> Result<Vec<SupplierRecord>, Box<dyn std::error::Error + Send + Sync>> {
    let conn = pool.get().await?;
    let mut stmt = conn.prepare(
        r#"
        SELECT company_name, email, phone, website, commodity, source,
               snippet, quality_score, additional_emails, additional_phones,
               collection_date
        FROM suppliers
        "#,
    )?;

    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, Option<String>>(1)?,
            row.get::<_, Option<String>>(2)?,
            row.get::<_, Option<String>>(3)?,
            row.get::<_, String>(4)?,
            row.get::<_, String>(5)?,
            row.get::<_, Option<String>>(6)?,
            row.get::<_, i64>(7)?,
            row.get::<_, Option<String>>(8)?,
            row.get::<_, Option<String>>(9)?,
            row.get::<_, DateTime<Utc>>(10)?,
        ))
    })?;

    let mut records = Vec::new();
    for row in rows {
        let (
            company_name,
            email,
            phone,
            website,
            commodity,
            source,
            snippet,
            quality_score,
            additional_emails,
            additional_phones,
            collection_date,
        ) = row?;

        let source = match Source::parse(&source) {
            Some(s) => s,
            None => {
                warn!("Skipping row with unknown source '{}'", source);
                continue;
            }
        };

        records.push(SupplierRecord {
            company_name,
            email,
            phone,
            website,
            snippet: snippet.unwrap_or_default(),
            commodity,
            source,
            collection_date,
            quality_score: quality_score.clamp(0, 100) as u8,
            additional_emails: additional_emails.unwrap_or_default(),
            additional_phones: additional_phones.unwrap_or_default(),
        });
    }

    Ok(records)
}

/// The validator consumes loosely-typed rows; everything optional.
pub async fn load_dataset_rows(
    pool: &DbPool,
) -> Result<Vec<DatasetRow>, Box<dyn std::error::Error + Send + Sync>> {
    let conn = pool.get().await?;
    let mut stmt = conn.prepare(
        r#"
        SELECT company_name, email, phone, website, commodity, snippet,
               source, collection_date, quality_score
        FROM suppliers
        "#,
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(DatasetRow {
            company_name: row.get(0)?,
            email: row.get(1)?,
            phone: row.get(2)?,
            website: row.get(3)?,
            commodity: row.get(4)?,
            snippet: row.get(5)?,
            source: row.get(6)?,
            collection_date: row.get(7)?,
            data_quality_score: row.get(8)?,
        })
    })?;

    let mut dataset = Vec::new();
    for row in rows {
        dataset.push(row?);
    }
    Ok(dataset)
}

#[derive(Debug, Clone)]
pub struct DatabaseStats {
    pub total_suppliers: i64,
    pub with_email: i64,
    pub with_phone: i64,
    pub with_website: i64,
    pub commodities_covered: i64,
    pub average_quality: f64,
}

pub async fn get_database_stats(
    pool: &DbPool,
) -> Result<DatabaseStats, Box<dyn std::error::Error + Send + Sync>> {
    let conn = pool.get().await?;

    let count = |sql: &str| -> Result<i64, rusqlite::Error> {
        conn.query_row(sql, [], |row| row.get(0))
    };

    Ok(DatabaseStats {
        total_suppliers: count("SELECT COUNT(*) FROM suppliers")?,
        with_email: count("SELECT COUNT(*) FROM suppliers WHERE email IS NOT NULL AND email != ''")?,
        with_phone: count("SELECT COUNT(*) FROM suppliers WHERE phone IS NOT NULL AND phone != ''")?,
        with_website: count(
            "SELECT COUNT(*) FROM suppliers WHERE website IS NOT NULL AND website != ''",
        )?,
        commodities_covered: count("SELECT COUNT(DISTINCT commodity) FROM suppliers")?,
        average_quality: conn.query_row(
            "SELECT COALESCE(AVG(quality_score), 0.0) FROM suppliers",
            [],
            |row| row.get(0),
        )?,
    })
}
