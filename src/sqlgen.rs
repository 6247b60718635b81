use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;

/// ===============================
/// SQL bindable value enum
/// ===============================
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Text(String),
    Int(i32),
    Decimal(Decimal),
    Date(NaiveDate),
    Bool(bool),
}

/// ===============================
/// Typed partial-update builder
/// ===============================
///
/// Assembles `UPDATE <table> SET c1 = $1, ... WHERE <key> = $n` from
/// column/value pairs enumerated by the per-entity change-set structs.
/// Column names are compile-time string literals, never caller input.
#[derive(Debug)]
pub struct UpdateBuilder {
    table: &'static str,
    assignments: Vec<(&'static str, SqlValue)>,
}

impl UpdateBuilder {
    pub fn new(table: &'static str) -> Self {
        Self {
            table,
            assignments: Vec::new(),
        }
    }

    pub fn set(mut self, column: &'static str, value: SqlValue) -> Self {
        self.assignments.push((column, value));
        self
    }

    pub fn set_opt(self, column: &'static str, value: Option<SqlValue>) -> Self {
        match value {
            Some(v) => self.set(column, v),
            None => self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn build(self, key_column: &'static str) -> (String, Vec<SqlValue>) {
        let set_clause = self
            .assignments
            .iter()
            .enumerate()
            .map(|(i, (column, _))| format!("{} = ${}", column, i + 1))
            .collect::<Vec<_>>()
            .join(", ");

        let sql = format!(
            "UPDATE {} SET {} WHERE {} = ${}",
            self.table,
            set_clause,
            key_column,
            self.assignments.len() + 1
        );

        let values = self.assignments.into_iter().map(|(_, v)| v).collect();
        (sql, values)
    }

    /// Execute against the pool, returning rows affected. An empty builder
    /// returns 0 without touching the database.
    pub async fn execute(
        self,
        pool: &PgPool,
        key_column: &'static str,
        key: i32,
    ) -> Result<u64, sqlx::Error> {
        if self.is_empty() {
            return Ok(0);
        }

        let (sql, values) = self.build(key_column);
        let mut query = sqlx::query(&sql);
        for value in values {
            query = match value {
                SqlValue::Text(v) => query.bind(v),
                SqlValue::Int(v) => query.bind(v),
                SqlValue::Decimal(v) => query.bind(v),
                SqlValue::Date(v) => query.bind(v),
                SqlValue::Bool(v) => query.bind(v),
            };
        }
        let result = query.bind(key).execute(pool).await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_numbered_placeholders() {
        let (sql, values) = UpdateBuilder::new("Project")
            .set("project_name", SqlValue::Text("Portal".into()))
            .set("budget", SqlValue::Decimal(Decimal::new(25000000, 2)))
            .build("project_number");

        assert_eq!(
            sql,
            "UPDATE Project SET project_name = $1, budget = $2 WHERE project_number = $3"
        );
        assert_eq!(values.len(), 2);
    }

    #[test]
    fn set_opt_skips_absent_fields() {
        let builder = UpdateBuilder::new("ProjectMilestone")
            .set_opt("status", Some(SqlValue::Text("completed".into())))
            .set_opt("due_date", None);

        let (sql, values) = builder.build("milestone_id");
        assert_eq!(
            sql,
            "UPDATE ProjectMilestone SET status = $1 WHERE milestone_id = $2"
        );
        assert_eq!(values, vec![SqlValue::Text("completed".into())]);
    }

    #[test]
    fn empty_builder_is_detected() {
        assert!(UpdateBuilder::new("Project").is_empty());
    }
}
