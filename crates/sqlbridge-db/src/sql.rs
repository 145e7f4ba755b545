//! The SQL-building command executor.
//!
//! [`SqlCommandExecutor`] implements [`CommandExecutor`] over any
//! [`DatabaseBackend`]: it assembles one parameterized, dialect-correct
//! statement per call and runs it through the backend. Audit values are
//! computed here (timestamps at UTC now, a fresh hyphenated UUID per row)
//! so the migration layer only ever requests the behavior via a flag.
//!
//! Upsert syntax is the one place statement *shape* diverges per dialect:
//! PostgreSQL and SQLite take `ON CONFLICT (keys) DO UPDATE SET col =
//! EXCLUDED.col`, MySQL takes `ON DUPLICATE KEY UPDATE col = VALUES(col)`.

use sqlbridge_core::SqlBridgeError;

use crate::audit::AuditColumns;
use crate::backend::DatabaseBackend;
use crate::dialect::DialectKind;
use crate::executor::{CommandExecutor, OnAction};
use crate::value::Value;

/// Builds dialect-correct statements and executes them through a backend.
pub struct SqlCommandExecutor<B: DatabaseBackend> {
    backend: B,
}

impl<B: DatabaseBackend> SqlCommandExecutor<B> {
    /// Wraps a backend.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Returns the wrapped backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn kind(&self) -> DialectKind {
        self.backend.dialect()
    }

    /// Joins identifiers, quoted for the dialect.
    fn ident_list(&self, columns: &[&str]) -> String {
        let dialect = self.kind();
        columns
            .iter()
            .map(|c| dialect.quote_ident(c))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Assembles the effective column/value pairs for an insert path.
    fn insert_pairs(
        columns: &[(&str, Value)],
        include_audit: bool,
    ) -> Vec<(String, Value)> {
        let mut pairs: Vec<(String, Value)> = columns
            .iter()
            .map(|(name, value)| ((*name).to_string(), value.clone()))
            .collect();
        if include_audit {
            pairs.extend(AuditColumns::insert_values());
        }
        pairs
    }
}

#[async_trait::async_trait]
impl<B: DatabaseBackend> CommandExecutor for SqlCommandExecutor<B> {
    fn dialect(&self) -> DialectKind {
        self.kind()
    }

    fn quote_value(&self, value: &Value) -> String {
        self.kind().quote_value(value)
    }

    async fn insert(
        &self,
        table: &str,
        columns: &[(&str, Value)],
        include_audit: bool,
    ) -> Result<u64, SqlBridgeError> {
        let dialect = self.kind();
        let pairs = Self::insert_pairs(columns, include_audit);

        let col_list = pairs
            .iter()
            .map(|(name, _)| dialect.quote_ident(name))
            .collect::<Vec<_>>()
            .join(", ");
        let placeholders = (1..=pairs.len())
            .map(|n| dialect.placeholder(n))
            .collect::<Vec<_>>()
            .join(", ");
        let params: Vec<Value> = pairs.into_iter().map(|(_, value)| value).collect();

        let sql = format!(
            "INSERT INTO {} ({col_list}) VALUES ({placeholders})",
            dialect.quote_ident(table)
        );
        self.backend.execute(&sql, &params).await
    }

    async fn batch_insert(
        &self,
        table: &str,
        columns: &[&str],
        rows: &[Vec<Value>],
        include_audit: bool,
    ) -> Result<u64, SqlBridgeError> {
        if rows.is_empty() {
            return Ok(0);
        }
        let dialect = self.kind();

        let mut col_names: Vec<String> = columns.iter().map(|c| (*c).to_string()).collect();
        if include_audit {
            col_names.extend(AuditColumns::NAMES.iter().map(|n| (*n).to_string()));
        }

        let mut params: Vec<Value> = Vec::new();
        let mut row_groups: Vec<String> = Vec::new();
        for (index, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(SqlBridgeError::DatabaseError(format!(
                    "batch insert into '{table}': row {index} has {} values, expected {}",
                    row.len(),
                    columns.len()
                )));
            }
            let mut row_values: Vec<Value> = row.clone();
            if include_audit {
                // A distinct UID per row; timestamps are computed per row too.
                row_values.extend(AuditColumns::insert_values().into_iter().map(|(_, v)| v));
            }
            let start = params.len();
            params.extend(row_values);
            let placeholders = (start + 1..=params.len())
                .map(|n| dialect.placeholder(n))
                .collect::<Vec<_>>()
                .join(", ");
            row_groups.push(format!("({placeholders})"));
        }

        let col_list = col_names
            .iter()
            .map(|c| dialect.quote_ident(c))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "INSERT INTO {} ({col_list}) VALUES {}",
            dialect.quote_ident(table),
            row_groups.join(", ")
        );
        self.backend.execute(&sql, &params).await
    }

    async fn upsert(
        &self,
        table: &str,
        key_columns: &[(&str, Value)],
        update_columns: &[(&str, Value)],
        include_audit: bool,
    ) -> Result<u64, SqlBridgeError> {
        let dialect = self.kind();

        // Insert branch: keys, updates, then full audit values.
        let mut pairs: Vec<(String, Value)> = key_columns
            .iter()
            .chain(update_columns.iter())
            .map(|(name, value)| ((*name).to_string(), value.clone()))
            .collect();
        if include_audit {
            pairs.extend(AuditColumns::insert_values());
        }

        let col_list = pairs
            .iter()
            .map(|(name, _)| dialect.quote_ident(name))
            .collect::<Vec<_>>()
            .join(", ");
        let placeholders = (1..=pairs.len())
            .map(|n| dialect.placeholder(n))
            .collect::<Vec<_>>()
            .join(", ");
        let params: Vec<Value> = pairs.into_iter().map(|(_, value)| value).collect();

        let mut sql = format!(
            "INSERT INTO {} ({col_list}) VALUES ({placeholders})",
            dialect.quote_ident(table)
        );

        // Conflict branch: update columns plus the update timestamp only.
        let mut set_columns: Vec<&str> = update_columns.iter().map(|(name, _)| *name).collect();
        if include_audit {
            set_columns.push(crate::audit::UPDATED_AT);
        }

        match dialect {
            DialectKind::Postgres | DialectKind::Sqlite => {
                let keys = self.ident_list(
                    &key_columns.iter().map(|(name, _)| *name).collect::<Vec<_>>(),
                );
                if set_columns.is_empty() {
                    sql.push_str(&format!(" ON CONFLICT ({keys}) DO NOTHING"));
                } else {
                    let assignments = set_columns
                        .iter()
                        .map(|c| {
                            let quoted = dialect.quote_ident(c);
                            format!("{quoted} = EXCLUDED.{quoted}")
                        })
                        .collect::<Vec<_>>()
                        .join(", ");
                    sql.push_str(&format!(
                        " ON CONFLICT ({keys}) DO UPDATE SET {assignments}"
                    ));
                }
            }
            DialectKind::MySql => {
                if set_columns.is_empty() {
                    sql = sql.replacen("INSERT INTO", "INSERT IGNORE INTO", 1);
                } else {
                    let assignments = set_columns
                        .iter()
                        .map(|c| {
                            let quoted = dialect.quote_ident(c);
                            format!("{quoted} = VALUES({quoted})")
                        })
                        .collect::<Vec<_>>()
                        .join(", ");
                    sql.push_str(&format!(" ON DUPLICATE KEY UPDATE {assignments}"));
                }
            }
        }

        self.backend.execute(&sql, &params).await
    }

    async fn update(
        &self,
        table: &str,
        columns: &[(&str, Value)],
        condition: &str,
        params: &[Value],
        include_audit: bool,
    ) -> Result<u64, SqlBridgeError> {
        let dialect = self.kind();

        let mut pairs: Vec<(String, Value)> = columns
            .iter()
            .map(|(name, value)| ((*name).to_string(), value.clone()))
            .collect();
        if include_audit {
            pairs.extend(AuditColumns::update_values());
        }

        let mut all_params: Vec<Value> = Vec::with_capacity(pairs.len() + params.len());
        let assignments = pairs
            .into_iter()
            .map(|(name, value)| {
                all_params.push(value);
                format!(
                    "{} = {}",
                    dialect.quote_ident(&name),
                    dialect.placeholder(all_params.len())
                )
            })
            .collect::<Vec<_>>()
            .join(", ");

        let mut sql = format!("UPDATE {} SET {assignments}", dialect.quote_ident(table));
        if !condition.is_empty() {
            sql.push_str(&format!(" WHERE {condition}"));
        }
        all_params.extend(params.iter().cloned());

        self.backend.execute(&sql, &all_params).await
    }

    async fn replace(
        &self,
        table: &str,
        column: &str,
        find: &str,
        replace_with: &str,
        condition: &str,
        params: &[Value],
    ) -> Result<u64, SqlBridgeError> {
        let dialect = self.kind();
        let quoted = dialect.quote_ident(column);

        let mut all_params: Vec<Value> =
            vec![Value::String(find.into()), Value::String(replace_with.into())];
        let mut sql = format!(
            "UPDATE {} SET {quoted} = REPLACE({quoted}, {}, {})",
            dialect.quote_ident(table),
            dialect.placeholder(1),
            dialect.placeholder(2)
        );
        if !condition.is_empty() {
            sql.push_str(&format!(" WHERE {condition}"));
        }
        all_params.extend(params.iter().cloned());

        self.backend.execute(&sql, &all_params).await
    }

    async fn drop_table_if_exists(&self, table: &str) -> Result<(), SqlBridgeError> {
        let sql = format!(
            "DROP TABLE IF EXISTS {}",
            self.kind().quote_ident(table)
        );
        self.backend.execute(&sql, &[]).await?;
        Ok(())
    }

    async fn add_primary_key(
        &self,
        name: &str,
        table: &str,
        columns: &[&str],
    ) -> Result<(), SqlBridgeError> {
        let dialect = self.kind();
        let sql = format!(
            "ALTER TABLE {} ADD CONSTRAINT {} PRIMARY KEY ({})",
            dialect.quote_ident(table),
            dialect.quote_ident(name),
            self.ident_list(columns)
        );
        self.backend.execute(&sql, &[]).await?;
        Ok(())
    }

    async fn add_foreign_key(
        &self,
        name: &str,
        table: &str,
        columns: &[&str],
        ref_table: &str,
        ref_columns: &[&str],
        on_delete: Option<OnAction>,
        on_update: Option<OnAction>,
    ) -> Result<(), SqlBridgeError> {
        let dialect = self.kind();
        let mut sql = format!(
            "ALTER TABLE {} ADD CONSTRAINT {} FOREIGN KEY ({}) REFERENCES {} ({})",
            dialect.quote_ident(table),
            dialect.quote_ident(name),
            self.ident_list(columns),
            dialect.quote_ident(ref_table),
            self.ident_list(ref_columns)
        );
        if let Some(action) = on_delete {
            sql.push_str(&format!(" ON DELETE {}", action.as_sql()));
        }
        if let Some(action) = on_update {
            sql.push_str(&format!(" ON UPDATE {}", action.as_sql()));
        }
        self.backend.execute(&sql, &[]).await?;
        Ok(())
    }

    async fn create_index(
        &self,
        name: &str,
        table: &str,
        columns: &[&str],
        unique: bool,
    ) -> Result<(), SqlBridgeError> {
        let dialect = self.kind();
        let unique_kw = if unique { "UNIQUE " } else { "" };
        let sql = format!(
            "CREATE {unique_kw}INDEX {} ON {} ({})",
            dialect.quote_ident(name),
            dialect.quote_ident(table),
            self.ident_list(columns)
        );
        self.backend.execute(&sql, &[]).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{CREATED_AT, ROW_UID, UPDATED_AT};
    use crate::backend::testing::RecordingBackend;

    fn pg() -> SqlCommandExecutor<RecordingBackend> {
        SqlCommandExecutor::new(RecordingBackend::new(DialectKind::Postgres))
    }

    fn mysql() -> SqlCommandExecutor<RecordingBackend> {
        SqlCommandExecutor::new(RecordingBackend::new(DialectKind::MySql))
    }

    fn sqlite() -> SqlCommandExecutor<RecordingBackend> {
        SqlCommandExecutor::new(RecordingBackend::new(DialectKind::Sqlite))
    }

    // ── INSERT ──────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_insert_with_audit_adds_the_trio() {
        let exec = pg();
        exec.insert("widgets", &[("name", Value::from("bolt"))], true)
            .await
            .unwrap();
        let (sql, params) = exec.backend().recorded().remove(0);
        assert!(sql.contains("\"name\""));
        assert!(sql.contains(&format!("\"{CREATED_AT}\"")));
        assert!(sql.contains(&format!("\"{UPDATED_AT}\"")));
        assert!(sql.contains(&format!("\"{ROW_UID}\"")));
        assert_eq!(params.len(), 4);
    }

    #[tokio::test]
    async fn test_insert_without_audit_exact_columns() {
        let exec = pg();
        exec.insert("widgets", &[("name", Value::from("bolt"))], false)
            .await
            .unwrap();
        let (sql, params) = exec.backend().recorded().remove(0);
        assert_eq!(sql, "INSERT INTO \"widgets\" (\"name\") VALUES ($1)");
        assert_eq!(params, vec![Value::from("bolt")]);
    }

    #[tokio::test]
    async fn test_insert_mysql_placeholders() {
        let exec = mysql();
        exec.insert("widgets", &[("a", Value::Int(1)), ("b", Value::Int(2))], false)
            .await
            .unwrap();
        let sql = exec.backend().last_sql();
        assert_eq!(sql, "INSERT INTO `widgets` (`a`, `b`) VALUES (?, ?)");
    }

    // ── BATCH INSERT ────────────────────────────────────────────────

    #[tokio::test]
    async fn test_batch_insert_multi_row() {
        let exec = pg();
        exec.batch_insert(
            "widgets",
            &["name"],
            &[vec![Value::from("a")], vec![Value::from("b")]],
            false,
        )
        .await
        .unwrap();
        let (sql, params) = exec.backend().recorded().remove(0);
        assert_eq!(
            sql,
            "INSERT INTO \"widgets\" (\"name\") VALUES ($1), ($2)"
        );
        assert_eq!(params.len(), 2);
    }

    #[tokio::test]
    async fn test_batch_insert_audit_uid_fresh_per_row() {
        let exec = sqlite();
        exec.batch_insert(
            "widgets",
            &["name"],
            &[vec![Value::from("a")], vec![Value::from("b")]],
            true,
        )
        .await
        .unwrap();
        let (sql, params) = exec.backend().recorded().remove(0);
        assert!(sql.contains(&format!("\"{ROW_UID}\"")));
        // Four values per row: name + three audit values.
        assert_eq!(params.len(), 8);
        assert_ne!(params[3], params[7]); // the two row UIDs differ
    }

    #[tokio::test]
    async fn test_batch_insert_empty_rows_is_noop() {
        let exec = pg();
        let affected = exec.batch_insert("widgets", &["name"], &[], true).await.unwrap();
        assert_eq!(affected, 0);
        assert!(exec.backend().recorded().is_empty());
    }

    #[tokio::test]
    async fn test_batch_insert_arity_mismatch_rejected() {
        let exec = pg();
        let result = exec
            .batch_insert("widgets", &["a", "b"], &[vec![Value::Int(1)]], false)
            .await;
        assert!(result.is_err());
    }

    // ── UPSERT ──────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_upsert_pg_conflict_clause() {
        let exec = pg();
        exec.upsert(
            "widgets",
            &[("sku", Value::from("X1"))],
            &[("qty", Value::Int(5))],
            false,
        )
        .await
        .unwrap();
        let sql = exec.backend().last_sql();
        assert!(sql.contains("ON CONFLICT (\"sku\") DO UPDATE SET \"qty\" = EXCLUDED.\"qty\""));
    }

    #[tokio::test]
    async fn test_upsert_pg_audit_branches_differ() {
        let exec = pg();
        exec.upsert(
            "widgets",
            &[("sku", Value::from("X1"))],
            &[("qty", Value::Int(5))],
            true,
        )
        .await
        .unwrap();
        let (sql, params) = exec.backend().recorded().remove(0);
        // Insert branch carries the full trio.
        assert!(sql.contains(&format!("\"{CREATED_AT}\"")));
        assert!(sql.contains(&format!("\"{ROW_UID}\"")));
        assert_eq!(params.len(), 5); // sku, qty, created_at, updated_at, row_uid
        // Conflict branch refreshes only the update timestamp.
        assert!(sql.contains(&format!("\"{UPDATED_AT}\" = EXCLUDED.\"{UPDATED_AT}\"")));
        assert!(!sql.contains(&format!("\"{CREATED_AT}\" = EXCLUDED")));
        assert!(!sql.contains(&format!("\"{ROW_UID}\" = EXCLUDED")));
    }

    #[tokio::test]
    async fn test_upsert_mysql_duplicate_key_clause() {
        let exec = mysql();
        exec.upsert(
            "widgets",
            &[("sku", Value::from("X1"))],
            &[("qty", Value::Int(5))],
            false,
        )
        .await
        .unwrap();
        let sql = exec.backend().last_sql();
        assert!(sql.contains("ON DUPLICATE KEY UPDATE `qty` = VALUES(`qty`)"));
    }

    #[tokio::test]
    async fn test_upsert_pg_no_updates_no_audit_does_nothing() {
        let exec = pg();
        exec.upsert("widgets", &[("sku", Value::from("X1"))], &[], false)
            .await
            .unwrap();
        let sql = exec.backend().last_sql();
        assert!(sql.ends_with("ON CONFLICT (\"sku\") DO NOTHING"));
    }

    #[tokio::test]
    async fn test_upsert_mysql_no_updates_no_audit_uses_insert_ignore() {
        let exec = mysql();
        exec.upsert("widgets", &[("sku", Value::from("X1"))], &[], false)
            .await
            .unwrap();
        let sql = exec.backend().last_sql();
        assert!(sql.starts_with("INSERT IGNORE INTO"));
    }

    // ── UPDATE ──────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_update_audit_adds_only_updated_at() {
        let exec = pg();
        exec.update("widgets", &[("qty", Value::Int(3))], "", &[], true)
            .await
            .unwrap();
        let (sql, params) = exec.backend().recorded().remove(0);
        assert!(sql.contains(&format!("\"{UPDATED_AT}\" = $2")));
        assert!(!sql.contains(CREATED_AT));
        assert!(!sql.contains(ROW_UID));
        assert_eq!(params.len(), 2);
    }

    #[tokio::test]
    async fn test_update_condition_and_params_appended() {
        let exec = sqlite();
        exec.update(
            "widgets",
            &[("qty", Value::Int(3))],
            "\"sku\" = ?",
            &[Value::from("X1")],
            false,
        )
        .await
        .unwrap();
        let (sql, params) = exec.backend().recorded().remove(0);
        assert_eq!(sql, "UPDATE \"widgets\" SET \"qty\" = ? WHERE \"sku\" = ?");
        assert_eq!(params, vec![Value::Int(3), Value::from("X1")]);
    }

    #[tokio::test]
    async fn test_update_empty_condition_no_where() {
        let exec = pg();
        exec.update("widgets", &[("qty", Value::Int(3))], "", &[], false)
            .await
            .unwrap();
        assert!(!exec.backend().last_sql().contains("WHERE"));
    }

    // ── REPLACE ─────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_replace_builds_replace_call() {
        let exec = pg();
        exec.replace("pages", "body", "http://", "https://", "", &[])
            .await
            .unwrap();
        let (sql, params) = exec.backend().recorded().remove(0);
        assert_eq!(
            sql,
            "UPDATE \"pages\" SET \"body\" = REPLACE(\"body\", $1, $2)"
        );
        assert_eq!(
            params,
            vec![Value::from("http://"), Value::from("https://")]
        );
    }

    #[tokio::test]
    async fn test_replace_with_condition() {
        let exec = sqlite();
        exec.replace(
            "pages",
            "body",
            "a",
            "b",
            "\"lang\" = ?",
            &[Value::from("en")],
        )
        .await
        .unwrap();
        let (sql, params) = exec.backend().recorded().remove(0);
        assert!(sql.ends_with("WHERE \"lang\" = ?"));
        assert_eq!(params.len(), 3);
    }

    // ── DDL ─────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_drop_table_if_exists() {
        let exec = mysql();
        exec.drop_table_if_exists("widgets").await.unwrap();
        assert_eq!(
            exec.backend().last_sql(),
            "DROP TABLE IF EXISTS `widgets`"
        );
    }

    #[tokio::test]
    async fn test_add_primary_key() {
        let exec = pg();
        exec.add_primary_key("widgets_pk", "widgets", &["id"])
            .await
            .unwrap();
        assert_eq!(
            exec.backend().last_sql(),
            "ALTER TABLE \"widgets\" ADD CONSTRAINT \"widgets_pk\" PRIMARY KEY (\"id\")"
        );
    }

    #[tokio::test]
    async fn test_add_foreign_key_with_actions() {
        let exec = pg();
        exec.add_foreign_key(
            "orders_fk",
            "orders",
            &["widget_id"],
            "widgets",
            &["id"],
            Some(OnAction::Cascade),
            Some(OnAction::Restrict),
        )
        .await
        .unwrap();
        let sql = exec.backend().last_sql();
        assert!(sql.contains("FOREIGN KEY (\"widget_id\") REFERENCES \"widgets\" (\"id\")"));
        assert!(sql.contains("ON DELETE CASCADE"));
        assert!(sql.contains("ON UPDATE RESTRICT"));
    }

    #[tokio::test]
    async fn test_add_foreign_key_without_actions() {
        let exec = sqlite();
        exec.add_foreign_key("fk", "a", &["b_id"], "b", &["id"], None, None)
            .await
            .unwrap();
        let sql = exec.backend().last_sql();
        assert!(!sql.contains("ON DELETE"));
        assert!(!sql.contains("ON UPDATE"));
    }

    #[tokio::test]
    async fn test_create_index_unique_and_plain() {
        let exec = pg();
        exec.create_index("items_sku_uq", "items", &["sku"], true)
            .await
            .unwrap();
        exec.create_index("items_sku_ix", "items", &["sku"], false)
            .await
            .unwrap();
        let recorded = exec.backend().recorded();
        assert_eq!(
            recorded[0].0,
            "CREATE UNIQUE INDEX \"items_sku_uq\" ON \"items\" (\"sku\")"
        );
        assert_eq!(
            recorded[1].0,
            "CREATE INDEX \"items_sku_ix\" ON \"items\" (\"sku\")"
        );
    }

    // ── Error propagation ───────────────────────────────────────────

    #[tokio::test]
    async fn test_backend_failure_propagates_unchanged() {
        let exec = pg();
        *exec.backend().fail_with.lock().unwrap() = Some("duplicate constraint".into());
        let err = exec
            .add_primary_key("pk", "widgets", &["id"])
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Database error: duplicate constraint");
    }

    #[tokio::test]
    async fn test_quote_value_delegates_to_dialect() {
        let exec = mysql();
        assert_eq!(exec.quote_value(&Value::from("o'clock")), "'o''clock'");
    }
}
