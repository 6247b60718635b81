use chrono::{Duration, NaiveDate};
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::info;

use crate::error::LedgerResult;
use crate::model::employee::{EmployeeDetail, EmployeeSummary, EmploymentType};
use crate::model::job_history::JobHistory;
use crate::model::payroll::{
    DepartmentPayrollRow, PayrollRecord, PayrollReportRow, PayrollRunEntry, Withholding,
    YearlyTaxSummary,
};

static FEDERAL_TAX_RATE: Lazy<Decimal> = Lazy::new(|| Decimal::new(10, 2));
static STATE_TAX_RATE: Lazy<Decimal> = Lazy::new(|| Decimal::new(5, 2));
static OTHER_TAX_RATE: Lazy<Decimal> = Lazy::new(|| Decimal::new(3, 2));

static MONTHS_PER_YEAR: Lazy<Decimal> = Lazy::new(|| Decimal::from(12u32));

// 40 hrs/week * 4 weeks: what an hourly employee is paid for when no
// project time was logged in the period.
static STANDARD_MONTHLY_HOURS: Lazy<Decimal> = Lazy::new(|| Decimal::from(160u32));

/// Monthly gross for a salaried employee: flat twelfth of the annual
/// salary, no pro-ration for partial periods.
pub fn monthly_gross(annual_salary: Decimal) -> Decimal {
    annual_salary / *MONTHS_PER_YEAR
}

pub fn hourly_gross(hourly_rate: Decimal, hours: Decimal) -> Decimal {
    hourly_rate * hours
}

/// Zero logged hours pays the 160-hour standard month.
pub fn hours_or_standard(logged_hours: Decimal) -> Decimal {
    if logged_hours.is_zero() {
        *STANDARD_MONTHLY_HOURS
    } else {
        logged_hours
    }
}

/// Withhold federal (10%), state (5%) and other (3%) taxes from a gross
/// amount. Each tax is rounded to cents independently (midpoint-to-even)
/// before the subtraction; net pay itself is never re-rounded, so it can
/// drift up to $0.03 from a line computed without intermediate rounding.
pub fn withhold(gross_pay: Decimal) -> Withholding {
    let federal_tax = (gross_pay * *FEDERAL_TAX_RATE).round_dp(2);
    let state_tax = (gross_pay * *STATE_TAX_RATE).round_dp(2);
    let other_tax = (gross_pay * *OTHER_TAX_RATE).round_dp(2);
    let net_pay = gross_pay - federal_tax - state_tax - other_tax;

    Withholding {
        federal_tax,
        state_tax,
        other_tax,
        net_pay,
    }
}

pub fn default_payment_date(period_end: NaiveDate) -> NaiveDate {
    period_end + Duration::days(3)
}

#[derive(sqlx::FromRow)]
struct EligibleEmployee {
    employee_number: i32,
    employee_name: String,
    employment_type: String,
    salary: Option<Decimal>,
    hourly_rate: Option<Decimal>,
}

#[derive(sqlx::FromRow)]
struct TaxTotalsRow {
    total_gross: Option<Decimal>,
    total_federal: Option<Decimal>,
    total_state: Option<Decimal>,
    total_other: Option<Decimal>,
    total_net: Option<Decimal>,
    pay_periods: i64,
}

/// Employee records, the job-history ledger and payroll processing.
#[derive(Clone)]
pub struct HrLedger {
    pool: PgPool,
}

impl HrLedger {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ==================== EMPLOYEE MANAGEMENT ====================

    pub async fn add_employee(
        &self,
        employee_number: i32,
        name: &str,
        title: &str,
        employment_type: EmploymentType,
        hourly_rate: Option<Decimal>,
        department_id: Option<i32>,
        division_id: Option<i32>,
    ) -> LedgerResult<i32> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO Employee
            (employee_number, employee_name, title, employment_type,
             hourly_rate, department_id, division_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING employee_number
            "#,
        )
        .bind(employee_number)
        .bind(name)
        .bind(title)
        .bind(employment_type.to_string())
        .bind(hourly_rate)
        .bind(department_id)
        .bind(division_id)
        .fetch_one(&self.pool)
        .await?;

        info!(employee_number = id, name, "employee added");
        Ok(id)
    }

    pub async fn add_job_history(
        &self,
        employee_number: i32,
        title: &str,
        start_date: NaiveDate,
        salary: Decimal,
        end_date: Option<NaiveDate>,
        is_current: bool,
    ) -> LedgerResult<i32> {
        let job_history_id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO JobHistory
            (employee_number, title, start_date, end_date, salary, is_current)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING job_history_id
            "#,
        )
        .bind(employee_number)
        .bind(title)
        .bind(start_date)
        .bind(end_date)
        .bind(salary)
        .bind(is_current)
        .fetch_one(&self.pool)
        .await?;

        info!(job_history_id, employee_number, "job history record created");
        Ok(job_history_id)
    }

    /// Promote an employee: close the current job-history row, update the
    /// denormalized title and open a new current row, all in one
    /// transaction. Returns the new job_history_id, or `None` when the
    /// employee does not exist (nothing is written in that case).
    pub async fn promote(
        &self,
        employee_number: i32,
        new_title: &str,
        new_salary: Decimal,
        effective_date: NaiveDate,
    ) -> LedgerResult<Option<i32>> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            UPDATE JobHistory
            SET end_date = $1, is_current = FALSE
            WHERE employee_number = $2 AND is_current = TRUE
            "#,
        )
        .bind(effective_date)
        .bind(employee_number)
        .execute(&mut *tx)
        .await?;

        let updated = sqlx::query("UPDATE Employee SET title = $1 WHERE employee_number = $2")
            .bind(new_title)
            .bind(employee_number)
            .execute(&mut *tx)
            .await?;

        if updated.rows_affected() == 0 {
            // dropping the transaction rolls the first update back
            return Ok(None);
        }

        let job_history_id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO JobHistory
            (employee_number, title, start_date, salary, is_current)
            VALUES ($1, $2, $3, $4, TRUE)
            RETURNING job_history_id
            "#,
        )
        .bind(employee_number)
        .bind(new_title)
        .bind(effective_date)
        .bind(new_salary)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(employee_number, new_title, "employee promoted");
        Ok(Some(job_history_id))
    }

    pub async fn employee_info(
        &self,
        employee_number: i32,
    ) -> LedgerResult<Option<EmployeeDetail>> {
        let detail = sqlx::query_as::<_, EmployeeDetail>(
            r#"
            SELECT
                e.employee_number,
                e.employee_name,
                e.title,
                e.employment_type,
                e.hourly_rate,
                jh.salary AS current_salary,
                d.department_name,
                dv.division_name,
                jh.start_date AS current_job_start
            FROM Employee e
            LEFT JOIN JobHistory jh ON e.employee_number = jh.employee_number
                AND jh.is_current = TRUE
            LEFT JOIN Department d ON e.department_id = d.department_id
            LEFT JOIN Division dv ON e.division_id = dv.division_id
            WHERE e.employee_number = $1
            "#,
        )
        .bind(employee_number)
        .fetch_optional(&self.pool)
        .await?;

        Ok(detail)
    }

    pub async fn list_employees(&self) -> LedgerResult<Vec<EmployeeSummary>> {
        let employees = sqlx::query_as::<_, EmployeeSummary>(
            r#"
            SELECT
                e.employee_number,
                e.employee_name,
                e.title,
                e.employment_type,
                COALESCE(jh.salary, 0) AS salary,
                COALESCE(e.hourly_rate, 0) AS hourly_rate,
                COALESCE(d.department_name, dv.division_name, 'Unassigned') AS org_unit
            FROM Employee e
            LEFT JOIN JobHistory jh ON e.employee_number = jh.employee_number
                AND jh.is_current = TRUE
            LEFT JOIN Department d ON e.department_id = d.department_id
            LEFT JOIN Division dv ON e.division_id = dv.division_id
            ORDER BY e.employee_number
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(employees)
    }

    pub async fn salary_history(&self, employee_number: i32) -> LedgerResult<Vec<JobHistory>> {
        let history = sqlx::query_as::<_, JobHistory>(
            r#"
            SELECT
                job_history_id,
                title,
                salary,
                start_date,
                end_date,
                is_current
            FROM JobHistory
            WHERE employee_number = $1
            ORDER BY start_date DESC
            "#,
        )
        .bind(employee_number)
        .fetch_all(&self.pool)
        .await?;

        Ok(history)
    }

    // ==================== PAYROLL PROCESSING ====================

    /// Run payroll for every eligible employee over a pay period. Payment
    /// date defaults to three days after the period ends. The whole run is
    /// one transaction: either every record is written or none. Running the
    /// same period twice writes a second, duplicate set of records; callers
    /// own at-most-once execution.
    pub async fn process_payroll(
        &self,
        period_start: NaiveDate,
        period_end: NaiveDate,
        payment_date: Option<NaiveDate>,
    ) -> LedgerResult<Vec<PayrollRunEntry>> {
        let payment_date = payment_date.unwrap_or_else(|| default_payment_date(period_end));

        let mut tx = self.pool.begin().await?;

        let employees = sqlx::query_as::<_, EligibleEmployee>(
            r#"
            SELECT
                e.employee_number,
                e.employee_name,
                e.employment_type,
                jh.salary,
                e.hourly_rate
            FROM Employee e
            LEFT JOIN JobHistory jh ON e.employee_number = jh.employee_number
                AND jh.is_current = TRUE
            WHERE e.employment_type = 'salaried' OR e.hourly_rate IS NOT NULL
            "#,
        )
        .fetch_all(&mut *tx)
        .await?;

        let mut entries = Vec::new();

        for emp in employees {
            let gross_pay = match emp.employment_type.parse::<EmploymentType>() {
                Ok(EmploymentType::Salaried) => match emp.salary {
                    Some(annual) => monthly_gross(annual),
                    None => continue,
                },
                Ok(EmploymentType::Hourly) => match emp.hourly_rate {
                    Some(rate) => {
                        let logged = sqlx::query_scalar::<_, Decimal>(
                            r#"
                            SELECT COALESCE(SUM(hours_worked), 0)
                            FROM EmployeeProject
                            WHERE employee_number = $1
                            AND start_date <= $2
                            AND (end_date IS NULL OR end_date >= $3)
                            "#,
                        )
                        .bind(emp.employee_number)
                        .bind(period_end)
                        .bind(period_start)
                        .fetch_one(&mut *tx)
                        .await?;

                        hourly_gross(rate, hours_or_standard(logged))
                    }
                    None => continue,
                },
                Err(_) => continue,
            };

            let taxes = withhold(gross_pay);

            let payroll_id = sqlx::query_scalar::<_, i32>(
                r#"
                INSERT INTO PayrollHistory
                (employee_number, pay_period_start, pay_period_end,
                 gross_pay, federal_tax, state_tax, other_tax, net_pay, payment_date)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                RETURNING payroll_id
                "#,
            )
            .bind(emp.employee_number)
            .bind(period_start)
            .bind(period_end)
            .bind(gross_pay)
            .bind(taxes.federal_tax)
            .bind(taxes.state_tax)
            .bind(taxes.other_tax)
            .bind(taxes.net_pay)
            .bind(payment_date)
            .fetch_one(&mut *tx)
            .await?;

            entries.push(PayrollRunEntry {
                payroll_id,
                employee_number: emp.employee_number,
                employee_name: emp.employee_name,
                gross_pay,
                net_pay: taxes.net_pay,
            });
        }

        tx.commit().await?;

        info!(
            records = entries.len(),
            %period_start,
            %period_end,
            %payment_date,
            "payroll processed"
        );
        Ok(entries)
    }

    pub async fn payroll_report(
        &self,
        period_start: NaiveDate,
        period_end: NaiveDate,
    ) -> LedgerResult<Vec<PayrollReportRow>> {
        let rows = sqlx::query_as::<_, PayrollReportRow>(
            r#"
            SELECT
                p.payroll_id,
                e.employee_number,
                e.employee_name,
                e.employment_type,
                p.gross_pay,
                p.federal_tax,
                p.state_tax,
                p.other_tax,
                p.net_pay,
                p.payment_date
            FROM PayrollHistory p
            JOIN Employee e ON p.employee_number = e.employee_number
            WHERE p.pay_period_start = $1 AND p.pay_period_end = $2
            ORDER BY e.employee_number
            "#,
        )
        .bind(period_start)
        .bind(period_end)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn employee_payroll_history(
        &self,
        employee_number: i32,
        year: Option<i32>,
    ) -> LedgerResult<Vec<PayrollRecord>> {
        let records = match year {
            Some(year) => {
                sqlx::query_as::<_, PayrollRecord>(
                    r#"
                    SELECT
                        payroll_id,
                        pay_period_start,
                        pay_period_end,
                        gross_pay,
                        federal_tax,
                        state_tax,
                        other_tax,
                        net_pay,
                        payment_date
                    FROM PayrollHistory
                    WHERE employee_number = $1
                    AND EXTRACT(YEAR FROM pay_period_start) = $2
                    ORDER BY pay_period_start DESC
                    "#,
                )
                .bind(employee_number)
                .bind(year)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, PayrollRecord>(
                    r#"
                    SELECT
                        payroll_id,
                        pay_period_start,
                        pay_period_end,
                        gross_pay,
                        federal_tax,
                        state_tax,
                        other_tax,
                        net_pay,
                        payment_date
                    FROM PayrollHistory
                    WHERE employee_number = $1
                    ORDER BY pay_period_start DESC
                    "#,
                )
                .bind(employee_number)
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(records)
    }

    /// W-2 style totals for one employee and calendar year. `Ok(None)` when
    /// the employee has no payroll rows for that year, which is distinct
    /// from a summary of zeros.
    pub async fn yearly_tax_summary(
        &self,
        employee_number: i32,
        year: i32,
    ) -> LedgerResult<Option<YearlyTaxSummary>> {
        let row = sqlx::query_as::<_, TaxTotalsRow>(
            r#"
            SELECT
                SUM(gross_pay) AS total_gross,
                SUM(federal_tax) AS total_federal,
                SUM(state_tax) AS total_state,
                SUM(other_tax) AS total_other,
                SUM(net_pay) AS total_net,
                COUNT(*) AS pay_periods
            FROM PayrollHistory
            WHERE employee_number = $1
            AND EXTRACT(YEAR FROM pay_period_start) = $2
            "#,
        )
        .bind(employee_number)
        .bind(year)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.total_gross.map(|total_gross| YearlyTaxSummary {
            total_gross,
            total_federal: row.total_federal.unwrap_or_default(),
            total_state: row.total_state.unwrap_or_default(),
            total_other: row.total_other.unwrap_or_default(),
            total_net: row.total_net.unwrap_or_default(),
            pay_periods: row.pay_periods,
        }))
    }

    // ==================== REPORTING ====================

    pub async fn department_payroll_summary(
        &self,
        department_id: Option<i32>,
    ) -> LedgerResult<Vec<DepartmentPayrollRow>> {
        let rows = match department_id {
            Some(department_id) => {
                sqlx::query_as::<_, DepartmentPayrollRow>(
                    r#"
                    SELECT
                        d.department_name,
                        COUNT(DISTINCT e.employee_number) AS employee_count,
                        AVG(jh.salary) AS avg_salary,
                        SUM(jh.salary) AS total_salary
                    FROM Department d
                    LEFT JOIN Employee e ON d.department_id = e.department_id
                    LEFT JOIN JobHistory jh ON e.employee_number = jh.employee_number
                        AND jh.is_current = TRUE
                    WHERE d.department_id = $1
                    GROUP BY d.department_name
                    "#,
                )
                .bind(department_id)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, DepartmentPayrollRow>(
                    r#"
                    SELECT
                        d.department_name,
                        COUNT(DISTINCT e.employee_number) AS employee_count,
                        AVG(jh.salary) AS avg_salary,
                        SUM(jh.salary) AS total_salary
                    FROM Department d
                    LEFT JOIN Employee e ON d.department_id = e.department_id
                    LEFT JOIN JobHistory jh ON e.employee_number = jh.employee_number
                        AND jh.is_current = TRUE
                    GROUP BY d.department_name
                    ORDER BY d.department_name
                    "#,
                )
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn salaried_gross_is_a_flat_twelfth() {
        assert_eq!(monthly_gross(dec("120000")), dec("10000"));
        // repeating fraction stays unrounded until persisted
        assert_eq!(monthly_gross(dec("110000")).round_dp(2), dec("9166.67"));
    }

    #[test]
    fn hourly_gross_multiplies_rate_by_hours() {
        assert_eq!(hourly_gross(dec("28.50"), dec("95.0")), dec("2707.50"));
    }

    #[test]
    fn zero_logged_hours_pays_the_standard_month() {
        assert_eq!(hours_or_standard(Decimal::ZERO), dec("160"));
        assert_eq!(hours_or_standard(dec("123.5")), dec("123.5"));
        assert_eq!(hourly_gross(dec("25.00"), hours_or_standard(Decimal::ZERO)), dec("4000.00"));
    }

    #[test]
    fn withholding_rounds_each_tax_to_cents() {
        let taxes = withhold(dec("10000"));
        assert_eq!(taxes.federal_tax, dec("1000.00"));
        assert_eq!(taxes.state_tax, dec("500.00"));
        assert_eq!(taxes.other_tax, dec("300.00"));
        assert_eq!(taxes.net_pay, dec("8200.00"));
    }

    #[test]
    fn withholding_uses_midpoint_to_even() {
        // 0.50 * 0.03 = 0.0150, which rounds to the even cent
        let taxes = withhold(dec("0.50"));
        assert_eq!(taxes.other_tax, dec("0.02"));
        // 2.50 * 0.10 = 0.250 -> 0.25 exactly, no midpoint involved
        assert_eq!(withhold(dec("2.50")).federal_tax, dec("0.25"));
    }

    #[test]
    fn net_pay_is_gross_minus_rounded_taxes() {
        let gross = dec("1234.56");
        let taxes = withhold(gross);
        assert_eq!(taxes.federal_tax, dec("123.46"));
        assert_eq!(taxes.state_tax, dec("61.73"));
        assert_eq!(taxes.other_tax, dec("37.04"));
        assert_eq!(
            taxes.net_pay,
            gross - taxes.federal_tax - taxes.state_tax - taxes.other_tax
        );

        // drift from the exact 82% line is bounded by the three roundings
        let exact = gross * dec("0.82");
        assert!((taxes.net_pay - exact).abs() <= dec("0.03"));
    }

    #[test]
    fn payment_date_defaults_to_three_days_after_period_end() {
        let period_end = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();
        assert_eq!(
            default_payment_date(period_end),
            NaiveDate::from_ymd_opt(2025, 4, 3).unwrap()
        );
    }

    #[test]
    fn march_2025_payroll_for_a_120k_salary() {
        let gross = monthly_gross(dec("120000"));
        let taxes = withhold(gross);
        assert_eq!(gross, dec("10000"));
        assert_eq!(taxes.federal_tax, dec("1000.00"));
        assert_eq!(taxes.state_tax, dec("500.00"));
        assert_eq!(taxes.other_tax, dec("300.00"));
        assert_eq!(taxes.net_pay, dec("8200.00"));
    }
}
