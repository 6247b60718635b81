use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;
use utoipa::ToSchema;

use crate::hr::HrLedger;
use crate::model::employee::EmploymentType;

#[derive(Deserialize, Serialize, ToSchema)]
pub struct CreateEmployee {
    #[schema(example = 1006)]
    pub employee_number: i32,

    #[schema(example = "Tom Anderson")]
    pub employee_name: String,

    #[schema(example = "Software Engineer")]
    pub title: String,

    #[schema(example = "salaried")]
    pub employment_type: EmploymentType,

    /// Required for hourly employees, ignored for salaried ones.
    #[schema(value_type = Option<String>, example = "28.50", nullable = true)]
    pub hourly_rate: Option<Decimal>,

    #[schema(example = 1, nullable = true)]
    pub department_id: Option<i32>,

    #[schema(example = 1, nullable = true)]
    pub division_id: Option<i32>,

    #[schema(example = "2025-04-01", format = "date", value_type = String)]
    pub start_date: NaiveDate,

    /// Annual salary; opens the initial job-history row when present.
    #[schema(value_type = Option<String>, example = "90000.00", nullable = true)]
    pub salary: Option<Decimal>,
}

#[derive(Deserialize, ToSchema)]
pub struct PromoteEmployee {
    #[schema(example = "Software Engineer")]
    pub new_title: String,

    #[schema(value_type = String, example = "75000.00")]
    pub new_salary: Decimal,

    #[schema(example = "2025-04-01", format = "date", value_type = String)]
    pub effective_date: NaiveDate,
}

/// Create Employee
#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = CreateEmployee,
    responses(
        (status = 201, description = "Employee created", body = Object, example = json!({
            "message": "Employee created",
            "employee_number": 1006
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn create_employee(
    hr: web::Data<HrLedger>,
    payload: web::Json<CreateEmployee>,
) -> actix_web::Result<impl Responder> {
    let employee_number = hr
        .add_employee(
            payload.employee_number,
            &payload.employee_name,
            &payload.title,
            payload.employment_type,
            payload.hourly_rate,
            payload.department_id,
            payload.division_id,
        )
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to create employee");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    if let Some(salary) = payload.salary {
        hr.add_job_history(
            employee_number,
            &payload.title,
            payload.start_date,
            salary,
            None,
            true,
        )
        .await
        .map_err(|e| {
            error!(error = %e, employee_number, "Failed to create initial job history");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;
    }

    Ok(HttpResponse::Created().json(json!({
        "message": "Employee created",
        "employee_number": employee_number
    })))
}

/// List all employees with current salary/rate and org unit
#[utoipa::path(
    get,
    path = "/api/employees",
    responses(
        (status = 200, description = "Employee roster", body = [crate::model::employee::EmployeeSummary])
    ),
    tag = "Employee"
)]
pub async fn list_employees(hr: web::Data<HrLedger>) -> actix_web::Result<impl Responder> {
    let employees = hr.list_employees().await.map_err(|e| {
        error!(error = %e, "Failed to list employees");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(employees))
}

/// Get Employee by number
#[utoipa::path(
    get,
    path = "/api/employees/{employee_number}",
    params(
        ("employee_number", description = "Employee number")
    ),
    responses(
        (status = 200, description = "Employee found", body = crate::model::employee::EmployeeDetail),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee not found"
        }))
    ),
    tag = "Employee"
)]
pub async fn get_employee(
    hr: web::Data<HrLedger>,
    path: web::Path<i32>,
) -> actix_web::Result<impl Responder> {
    let employee_number = path.into_inner();

    let detail = hr.employee_info(employee_number).await.map_err(|e| {
        error!(error = %e, employee_number, "Failed to fetch employee");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    match detail {
        Some(emp) => Ok(HttpResponse::Ok().json(emp)),
        None => Ok(HttpResponse::NotFound().json(json!({
            "message": "Employee not found"
        }))),
    }
}

/// Promote Employee
///
/// Closes the current job-history row and opens a new one with the new
/// title and salary, effective on the given date.
#[utoipa::path(
    put,
    path = "/api/employees/{employee_number}/promote",
    params(
        ("employee_number", description = "Employee number")
    ),
    request_body = PromoteEmployee,
    responses(
        (status = 200, description = "Employee promoted", body = Object, example = json!({
            "message": "Employee promoted",
            "job_history_id": 42
        })),
        (status = 404, description = "Employee not found")
    ),
    tag = "Employee"
)]
pub async fn promote_employee(
    hr: web::Data<HrLedger>,
    path: web::Path<i32>,
    payload: web::Json<PromoteEmployee>,
) -> actix_web::Result<impl Responder> {
    let employee_number = path.into_inner();

    let job_history_id = hr
        .promote(
            employee_number,
            &payload.new_title,
            payload.new_salary,
            payload.effective_date,
        )
        .await
        .map_err(|e| {
            error!(error = %e, employee_number, "Failed to promote employee");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    match job_history_id {
        Some(id) => Ok(HttpResponse::Ok().json(json!({
            "message": "Employee promoted",
            "job_history_id": id
        }))),
        None => Ok(HttpResponse::NotFound().json(json!({
            "message": "Employee not found"
        }))),
    }
}

/// Full title/salary history for one employee, newest first
#[utoipa::path(
    get,
    path = "/api/employees/{employee_number}/salary-history",
    params(
        ("employee_number", description = "Employee number")
    ),
    responses(
        (status = 200, description = "Job history records", body = [crate::model::job_history::JobHistory])
    ),
    tag = "Employee"
)]
pub async fn salary_history(
    hr: web::Data<HrLedger>,
    path: web::Path<i32>,
) -> actix_web::Result<impl Responder> {
    let employee_number = path.into_inner();

    let history = hr.salary_history(employee_number).await.map_err(|e| {
        error!(error = %e, employee_number, "Failed to fetch salary history");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(history))
}
