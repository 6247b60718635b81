use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct JobHistory {
    pub job_history_id: i32,
    pub title: String,
    #[schema(value_type = String, example = "110000.00")]
    pub salary: Decimal,
    #[schema(value_type = String, format = "date")]
    pub start_date: NaiveDate,
    #[schema(value_type = Option<String>, format = "date", nullable = true)]
    pub end_date: Option<NaiveDate>,
    pub is_current: bool,
}
