use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use tracing::error;
use utoipa::{IntoParams, ToSchema};

use crate::hr::HrLedger;

#[derive(Deserialize, ToSchema)]
pub struct RunPayroll {
    #[schema(example = "2025-03-01", format = "date", value_type = String)]
    pub period_start: NaiveDate,

    #[schema(example = "2025-03-31", format = "date", value_type = String)]
    pub period_end: NaiveDate,

    /// Defaults to three days after the period ends.
    #[schema(example = "2025-04-03", format = "date", value_type = Option<String>, nullable = true)]
    pub payment_date: Option<NaiveDate>,
}

#[derive(Deserialize, IntoParams)]
pub struct PayrollPeriodQuery {
    /// Pay period start date
    pub period_start: NaiveDate,
    /// Pay period end date
    pub period_end: NaiveDate,
}

#[derive(Deserialize, IntoParams)]
pub struct PayrollHistoryQuery {
    /// Restrict to one calendar year
    pub year: Option<i32>,
}

#[derive(Deserialize, IntoParams)]
pub struct DepartmentQuery {
    /// Restrict to one department
    pub department_id: Option<i32>,
}

/// Run payroll for a pay period
///
/// Computes gross pay, withholds taxes and writes one immutable record per
/// eligible employee. Running the same period twice writes duplicates.
#[utoipa::path(
    post,
    path = "/api/payroll/run",
    request_body = RunPayroll,
    responses(
        (status = 201, description = "Payroll processed", body = [crate::model::payroll::PayrollRunEntry]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Payroll"
)]
pub async fn run_payroll(
    hr: web::Data<HrLedger>,
    payload: web::Json<RunPayroll>,
) -> actix_web::Result<impl Responder> {
    let entries = hr
        .process_payroll(payload.period_start, payload.period_end, payload.payment_date)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to process payroll");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    Ok(HttpResponse::Created().json(entries))
}

/// Payroll report for one pay period
#[utoipa::path(
    get,
    path = "/api/payroll/report",
    params(PayrollPeriodQuery),
    responses(
        (status = 200, description = "Payroll records for the period", body = [crate::model::payroll::PayrollReportRow])
    ),
    tag = "Payroll"
)]
pub async fn payroll_report(
    hr: web::Data<HrLedger>,
    query: web::Query<PayrollPeriodQuery>,
) -> actix_web::Result<impl Responder> {
    let rows = hr
        .payroll_report(query.period_start, query.period_end)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to fetch payroll report");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    Ok(HttpResponse::Ok().json(rows))
}

/// Payroll history for one employee
#[utoipa::path(
    get,
    path = "/api/employees/{employee_number}/payroll",
    params(
        ("employee_number", description = "Employee number"),
        PayrollHistoryQuery
    ),
    responses(
        (status = 200, description = "Payroll records, newest first", body = [crate::model::payroll::PayrollRecord])
    ),
    tag = "Payroll"
)]
pub async fn employee_payroll_history(
    hr: web::Data<HrLedger>,
    path: web::Path<i32>,
    query: web::Query<PayrollHistoryQuery>,
) -> actix_web::Result<impl Responder> {
    let employee_number = path.into_inner();

    let records = hr
        .employee_payroll_history(employee_number, query.year)
        .await
        .map_err(|e| {
            error!(error = %e, employee_number, "Failed to fetch payroll history");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    Ok(HttpResponse::Ok().json(records))
}

/// W-2 style yearly tax summary for one employee
#[utoipa::path(
    get,
    path = "/api/employees/{employee_number}/tax-summary/{year}",
    params(
        ("employee_number", description = "Employee number"),
        ("year", description = "Calendar year")
    ),
    responses(
        (status = 200, description = "Tax summary", body = crate::model::payroll::YearlyTaxSummary),
        (status = 404, description = "No payroll records for that year", body = Object, example = json!({
            "message": "No payroll records for that year"
        }))
    ),
    tag = "Payroll"
)]
pub async fn tax_summary(
    hr: web::Data<HrLedger>,
    path: web::Path<(i32, i32)>,
) -> actix_web::Result<impl Responder> {
    let (employee_number, year) = path.into_inner();

    let summary = hr
        .yearly_tax_summary(employee_number, year)
        .await
        .map_err(|e| {
            error!(error = %e, employee_number, year, "Failed to fetch tax summary");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    match summary {
        Some(s) => Ok(HttpResponse::Ok().json(s)),
        None => Ok(HttpResponse::NotFound().json(json!({
            "message": "No payroll records for that year"
        }))),
    }
}

/// Current-salary payroll summary per department
#[utoipa::path(
    get,
    path = "/api/payroll/department-summary",
    params(DepartmentQuery),
    responses(
        (status = 200, description = "Per-department salary totals", body = [crate::model::payroll::DepartmentPayrollRow])
    ),
    tag = "Payroll"
)]
pub async fn department_payroll_summary(
    hr: web::Data<HrLedger>,
    query: web::Query<DepartmentQuery>,
) -> actix_web::Result<impl Responder> {
    let rows = hr
        .department_payroll_summary(query.department_id)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to fetch department payroll summary");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    Ok(HttpResponse::Ok().json(rows))
}
