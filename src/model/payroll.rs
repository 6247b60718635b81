use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

/// Taxes withheld from one gross amount. Each tax is rounded to cents on
/// its own; net pay is the unrounded remainder of the subtraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Withholding {
    #[schema(value_type = String)]
    pub federal_tax: Decimal,
    #[schema(value_type = String)]
    pub state_tax: Decimal,
    #[schema(value_type = String)]
    pub other_tax: Decimal,
    #[schema(value_type = String)]
    pub net_pay: Decimal,
}

#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct PayrollRecord {
    pub payroll_id: i32,
    #[schema(value_type = String, format = "date")]
    pub pay_period_start: NaiveDate,
    #[schema(value_type = String, format = "date")]
    pub pay_period_end: NaiveDate,
    #[schema(value_type = String)]
    pub gross_pay: Decimal,
    #[schema(value_type = String)]
    pub federal_tax: Decimal,
    #[schema(value_type = String)]
    pub state_tax: Decimal,
    #[schema(value_type = String)]
    pub other_tax: Decimal,
    #[schema(value_type = String)]
    pub net_pay: Decimal,
    #[schema(value_type = String, format = "date")]
    pub payment_date: NaiveDate,
}

/// What a payroll run reports back per employee it paid.
#[derive(Debug, Serialize, ToSchema)]
pub struct PayrollRunEntry {
    pub payroll_id: i32,
    pub employee_number: i32,
    pub employee_name: String,
    #[schema(value_type = String)]
    pub gross_pay: Decimal,
    #[schema(value_type = String)]
    pub net_pay: Decimal,
}

#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct PayrollReportRow {
    pub payroll_id: i32,
    pub employee_number: i32,
    pub employee_name: String,
    pub employment_type: String,
    #[schema(value_type = String)]
    pub gross_pay: Decimal,
    #[schema(value_type = String)]
    pub federal_tax: Decimal,
    #[schema(value_type = String)]
    pub state_tax: Decimal,
    #[schema(value_type = String)]
    pub other_tax: Decimal,
    #[schema(value_type = String)]
    pub net_pay: Decimal,
    #[schema(value_type = String, format = "date")]
    pub payment_date: NaiveDate,
}

/// W-2 style totals for one employee and calendar year.
#[derive(Debug, Serialize, ToSchema)]
pub struct YearlyTaxSummary {
    #[schema(value_type = String)]
    pub total_gross: Decimal,
    #[schema(value_type = String)]
    pub total_federal: Decimal,
    #[schema(value_type = String)]
    pub total_state: Decimal,
    #[schema(value_type = String)]
    pub total_other: Decimal,
    #[schema(value_type = String)]
    pub total_net: Decimal,
    pub pay_periods: i64,
}

/// Aggregates stay optional: a department with no salaried employees has
/// no average to report, and display layers render that as zero.
#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct DepartmentPayrollRow {
    pub department_name: String,
    pub employee_count: i64,
    #[schema(value_type = Option<String>, nullable = true)]
    pub avg_salary: Option<Decimal>,
    #[schema(value_type = Option<String>, nullable = true)]
    pub total_salary: Option<Decimal>,
}
