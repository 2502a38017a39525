//! SQLite TransactionRepository implementation.

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::db::{
    BalanceSummary, DateRange, DbError, DbResult, Transaction, TransactionDraft,
    TransactionFilter, TransactionKind, TransactionRepository,
};

/// SQLx-backed transaction repository.
pub struct SqliteTransactionRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
}

fn database_error(e: sqlx::Error) -> DbError {
    DbError::Database {
        message: e.to_string(),
    }
}

fn row_to_transaction(row: &SqliteRow) -> DbResult<Transaction> {
    let id_raw: String = row.try_get("id").map_err(database_error)?;
    let id = Uuid::parse_str(&id_raw).map_err(|_| DbError::Database {
        message: format!("stored id '{}' is not a UUID", id_raw),
    })?;

    let kind_raw: String = row.try_get("kind").map_err(database_error)?;
    let kind: TransactionKind = kind_raw.parse().map_err(|_| DbError::Database {
        message: format!("stored kind '{}' is not valid", kind_raw),
    })?;

    Ok(Transaction {
        id,
        kind,
        category: row.try_get("category").map_err(database_error)?,
        amount: row.try_get("amount").map_err(database_error)?,
        date: row.try_get("date").map_err(database_error)?,
        description: row.try_get("description").map_err(database_error)?,
        created_at: row.try_get("created_at").map_err(database_error)?,
        updated_at: row.try_get("updated_at").map_err(database_error)?,
    })
}

/// WHERE fragment plus date bind values for an optional date window.
fn range_conditions(range: &DateRange, conditions: &mut Vec<&'static str>) -> Vec<DateTime<Utc>> {
    let mut binds = Vec::new();
    if let Some(from) = range.from {
        conditions.push("date >= ?");
        binds.push(from);
    }
    if let Some(to) = range.to {
        conditions.push("date <= ?");
        binds.push(to);
    }
    binds
}

fn where_clause(conditions: &[&str]) -> String {
    if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    }
}

impl<'a> TransactionRepository for SqliteTransactionRepository<'a> {
    async fn insert(&self, draft: &TransactionDraft) -> DbResult<Transaction> {
        let now = Utc::now();
        let tx = Transaction {
            id: Uuid::new_v4(),
            kind: draft.kind,
            category: draft.category.clone(),
            amount: draft.amount,
            date: draft.date,
            description: draft.description.clone(),
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            r#"
            INSERT INTO transactions (id, kind, category, amount, date, description, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(tx.id.to_string())
        .bind(tx.kind.to_string())
        .bind(&tx.category)
        .bind(tx.amount)
        .bind(tx.date)
        .bind(&tx.description)
        .bind(tx.created_at)
        .bind(tx.updated_at)
        .execute(self.pool)
        .await
        .map_err(database_error)?;

        Ok(tx)
    }

    async fn get(&self, id: Uuid) -> DbResult<Transaction> {
        let row = sqlx::query(
            "SELECT id, kind, category, amount, date, description, created_at, updated_at
             FROM transactions WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(self.pool)
        .await
        .map_err(database_error)?;

        match row {
            Some(row) => row_to_transaction(&row),
            None => Err(DbError::NotFound { id: id.to_string() }),
        }
    }

    async fn list(&self, filter: &TransactionFilter) -> DbResult<Vec<Transaction>> {
        let mut conditions = Vec::new();
        if filter.kind.is_some() {
            conditions.push("kind = ?");
        }
        if filter.category.is_some() {
            conditions.push("category = ?");
        }
        let date_binds = range_conditions(&filter.range, &mut conditions);

        let sql = format!(
            "SELECT id, kind, category, amount, date, description, created_at, updated_at
             FROM transactions {}
             ORDER BY date DESC, created_at DESC",
            where_clause(&conditions)
        );

        let mut query = sqlx::query(&sql);
        if let Some(kind) = filter.kind {
            query = query.bind(kind.to_string());
        }
        if let Some(category) = &filter.category {
            query = query.bind(category);
        }
        for bound in date_binds {
            query = query.bind(bound);
        }

        let rows = query.fetch_all(self.pool).await.map_err(database_error)?;
        rows.iter().map(row_to_transaction).collect()
    }

    async fn replace(&self, id: Uuid, draft: &TransactionDraft) -> DbResult<Transaction> {
        let result = sqlx::query(
            r#"
            UPDATE transactions
            SET kind = ?, category = ?, amount = ?, date = ?, description = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(draft.kind.to_string())
        .bind(&draft.category)
        .bind(draft.amount)
        .bind(draft.date)
        .bind(&draft.description)
        .bind(Utc::now())
        .bind(id.to_string())
        .execute(self.pool)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound { id: id.to_string() });
        }

        // Re-read so the caller sees the preserved creation timestamp.
        self.get(id).await
    }

    async fn delete(&self, id: Uuid) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM transactions WHERE id = ?")
            .bind(id.to_string())
            .execute(self.pool)
            .await
            .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound { id: id.to_string() });
        }

        Ok(())
    }

    async fn balance(&self, range: &DateRange) -> DbResult<BalanceSummary> {
        let mut conditions = Vec::new();
        let date_binds = range_conditions(range, &mut conditions);

        let sql = format!(
            "SELECT kind, COALESCE(SUM(amount), 0) AS total
             FROM transactions {}
             GROUP BY kind",
            where_clause(&conditions)
        );

        let mut query = sqlx::query(&sql);
        for bound in date_binds {
            query = query.bind(bound);
        }

        let rows = query.fetch_all(self.pool).await.map_err(database_error)?;

        let mut summary = BalanceSummary::default();
        for row in rows {
            let kind_raw: String = row.try_get("kind").map_err(database_error)?;
            let total: f64 = row.try_get("total").map_err(database_error)?;
            match kind_raw.parse::<TransactionKind>() {
                Ok(TransactionKind::Income) => summary.total_income = total,
                Ok(TransactionKind::Expense) => summary.total_expense = total,
                Err(_) => {
                    return Err(DbError::Database {
                        message: format!("stored kind '{}' is not valid", kind_raw),
                    });
                }
            }
        }

        Ok(summary)
    }
}
