use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use rust_decimal::Decimal;

use workforce::config::Config;
use workforce::db::init_db;
use workforce::hr::HrLedger;
use workforce::model::assignment::TeamMember;
use workforce::model::employee::{EmployeeDetail, EmployeeSummary, EmploymentType};
use workforce::model::milestone::Milestone;
use workforce::model::payroll::PayrollReportRow;
use workforce::model::project::{ProjectRow, ProjectStatistics};
use workforce::projects::{ProjectChanges, ProjectLedger};

#[derive(Parser)]
#[command(name = "demo")]
#[command(about = "Company database walkthrough - HR/payroll and project management")]
struct Cli {
    #[command(subcommand)]
    command: Option<Section>,
}

#[derive(Subcommand)]
enum Section {
    /// HR and payroll walkthrough
    Hr,

    /// Project management walkthrough
    Projects,

    /// Combined onboarding and project-completion scenarios
    Scenarios,

    /// Run every section
    All,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let config = Config::from_env();
    let pool = init_db(&config).await;
    let hr = HrLedger::new(pool.clone());
    let pm = ProjectLedger::new(pool);

    match cli.command.unwrap_or(Section::All) {
        Section::Hr => demo_hr(&hr).await?,
        Section::Projects => demo_projects(&pm).await?,
        Section::Scenarios => demo_scenarios(&hr, &pm).await?,
        Section::All => {
            demo_hr(&hr).await?;
            demo_projects(&pm).await?;
            demo_scenarios(&hr, &pm).await?;
        }
    }

    Ok(())
}

async fn demo_hr(hr: &HrLedger) -> Result<()> {
    section_header("HR/PAYROLL APPLICATION DEMO");

    println!("1. LISTING ALL EMPLOYEES");
    let employees = hr.list_employees().await?;
    print_employee_list(&employees[..employees.len().min(10)]);
    println!("Total employees: {}\n", employees.len());

    println!("2. EMPLOYEE DETAILS (1001)");
    print_employee_info(hr.employee_info(1001).await?);

    println!("3. SALARY HISTORY (1001)");
    let history = hr.salary_history(1001).await?;
    println!(
        "{:<10} {:<30} {:>13} {:<12} {:<8}",
        "Job ID", "Title", "Salary", "Start Date", "Current"
    );
    for record in &history {
        println!(
            "{:<10} {:<30} {:>13.2} {:<12} {:<8}",
            record.job_history_id,
            record.title,
            record.salary,
            record.start_date.to_string(),
            if record.is_current { "yes" } else { "no" }
        );
    }
    println!();

    println!("4. PROCESSING PAYROLL - March 2025");
    let pay_start = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
    let pay_end = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();
    let payment_date = NaiveDate::from_ymd_opt(2025, 4, 3).unwrap();

    let records = hr
        .process_payroll(pay_start, pay_end, Some(payment_date))
        .await?;
    println!("Processed {} payroll records\n", records.len());

    println!("5. PAYROLL REPORT - March 2025");
    let report = hr.payroll_report(pay_start, pay_end).await?;
    print_payroll_report(&report[..report.len().min(10)]);

    println!("6. ANNUAL TAX SUMMARY (7001, 2025)");
    match hr.yearly_tax_summary(7001, 2025).await? {
        Some(summary) => {
            println!("  Pay Periods:     {}", summary.pay_periods);
            println!("  Total Gross Pay: ${:.2}", summary.total_gross);
            println!("  Federal Tax:     ${:.2}", summary.total_federal);
            println!("  State Tax:       ${:.2}", summary.total_state);
            println!("  Other Tax:       ${:.2}", summary.total_other);
            println!("  Total Net Pay:   ${:.2}", summary.total_net);
        }
        None => println!("  No payroll records for that year"),
    }
    println!();

    println!("7. DEPARTMENT PAYROLL SUMMARY");
    let summary = hr.department_payroll_summary(None).await?;
    println!(
        "{:<25} {:<10} {:>14} {:>14}",
        "Department", "Employees", "Avg Salary", "Total Salary"
    );
    for row in &summary {
        println!(
            "{:<25} {:<10} {:>14.2} {:>14.2}",
            row.department_name,
            row.employee_count,
            row.avg_salary.unwrap_or_default(),
            row.total_salary.unwrap_or_default()
        );
    }
    println!();

    println!("8. EMPLOYEE PROMOTION (1003)");
    println!("Promoting employee 1003 to Software Engineer");
    hr.promote(
        1003,
        "Software Engineer",
        Decimal::from(75000u32),
        NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
    )
    .await?;
    println!();

    Ok(())
}

async fn demo_projects(pm: &ProjectLedger) -> Result<()> {
    section_header("PROJECT MANAGEMENT APPLICATION DEMO");

    println!("1. LISTING ALL PROJECTS");
    print_project_list(&pm.list_projects(true).await?);

    println!("2. PROJECT DETAILS (1)");
    match pm.project_info(1).await? {
        Some(info) => {
            println!("Project Number:  {}", info.project_number);
            println!("Project Name:    {}", info.project_name);
            println!("Budget:          ${:.2}", info.budget);
            println!("Start Date:      {}", info.date_started);
            println!(
                "End Date:        {}",
                info.date_ended
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "Ongoing".to_string())
            );
            println!("Manager:         {} (ID: {})", info.manager_name, info.manager_id);
            println!("Department:      {}", info.department_name);
        }
        None => println!("Project not found"),
    }
    println!();

    println!("3. PROJECT TEAM (1)");
    print_project_team(&pm.project_team(1, true).await?);

    println!("4. PROJECT MILESTONES (1)");
    print_milestones(&pm.project_milestones(1).await?);

    println!("5. PROJECT STATISTICS (1)");
    match pm.project_statistics(1).await? {
        Some(stats) => print_project_statistics(&stats),
        None => println!("No statistics available"),
    }

    println!("6. EMPLOYEE'S PROJECT HISTORY (1001)");
    let emp_projects = pm.employee_projects(1001, false).await?;
    println!(
        "{:<8} {:<30} {:<20} {:>8} {:<10}",
        "Proj #", "Project Name", "Role", "Hours", "Status"
    );
    for proj in &emp_projects {
        let status = if proj.end_date.is_none() { "Active" } else { "Completed" };
        println!(
            "{:<8} {:<30} {:<20} {:>8.1} {:<10}",
            proj.project_number, proj.project_name, proj.role, proj.hours_worked, status
        );
    }
    println!();

    println!("7. UPDATING PROJECT HOURS");
    println!("Adding 40 hours for employee 1001 on project 1");
    if let Some(total) = pm.update_hours(1001, 1, Decimal::from(40u32)).await? {
        println!("  Total hours: {:.1}", total);
    }
    println!();

    println!("8. COMPLETING A MILESTONE");
    println!("Marking milestone 3 as completed");
    pm.complete_milestone(3, NaiveDate::from_ymd_opt(2025, 3, 20))
        .await?;
    println!();

    println!("9. DEPARTMENT PROJECTS SUMMARY");
    let summary = pm.department_projects_summary(None).await?;
    println!(
        "{:<25} {:<7} {:<7} {:>14} {:>9} {:>12}",
        "Department", "Total", "Active", "Budget", "Avg Team", "Total Hours"
    );
    for row in &summary {
        println!(
            "{:<25} {:<7} {:<7} {:>14.2} {:>9.1} {:>12.1}",
            row.department_name,
            row.total_projects,
            row.active_projects,
            row.total_budget.unwrap_or_default(),
            row.avg_team_size.unwrap_or_default(),
            row.total_person_hours.unwrap_or_default()
        );
    }
    println!();

    println!("10. EMPLOYEE PRODUCTIVITY REPORT (Top 10)");
    let productivity = pm.employee_productivity_report().await?;
    println!(
        "{:<8} {:<25} {:<25} {:<9} {:>12} {:<8}",
        "Emp #", "Name", "Title", "Projects", "Total Hours", "Current"
    );
    for row in productivity.iter().take(10) {
        println!(
            "{:<8} {:<25} {:<25} {:<9} {:>12.1} {:<8}",
            row.employee_number,
            row.employee_name,
            row.title,
            row.projects_count,
            row.total_hours.unwrap_or_default(),
            row.current_projects
        );
    }
    println!();

    println!("11. CREATING A NEW PROJECT");
    pm.create_project(
        8,
        "Cloud Infrastructure Upgrade",
        Decimal::new(30000000, 2),
        NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
        3001,
        3,
        None,
    )
    .await?;
    println!();

    println!("12. ASSIGNING TEAM TO NEW PROJECT");
    let start = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
    pm.assign(3001, 8, "Project Manager", start, Decimal::ZERO, true)
        .await?;
    pm.assign(3002, 8, "Systems Engineer", start, Decimal::ZERO, true)
        .await?;
    pm.assign(3003, 8, "Network Engineer", start, Decimal::ZERO, true)
        .await?;
    println!();

    Ok(())
}

async fn demo_scenarios(hr: &HrLedger, pm: &ProjectLedger) -> Result<()> {
    section_header("COMBINED SCENARIOS");

    println!("SCENARIO 1: Onboarding New Employee");
    println!("Step 1: Add new employee");
    hr.add_employee(
        1006,
        "Tom Anderson",
        "Software Engineer",
        EmploymentType::Salaried,
        None,
        Some(1),
        None,
    )
    .await?;

    println!("Step 2: Create job history record");
    hr.add_job_history(
        1006,
        "Software Engineer",
        NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
        Decimal::from(90000u32),
        None,
        true,
    )
    .await?;

    println!("Step 3: Assign to project");
    pm.assign(
        1006,
        1,
        "Backend Developer",
        NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
        Decimal::ZERO,
        true,
    )
    .await?;
    println!();

    println!("SCENARIO 2: Completing Project and Reassigning Team");
    println!("Step 1: Update project end date");
    pm.update_project(
        7,
        ProjectChanges {
            date_ended: NaiveDate::from_ymd_opt(2025, 3, 31),
            ..Default::default()
        },
    )
    .await?;

    println!("Step 2: Remove employees from completed project");
    let end = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();
    pm.remove(2001, 7, end).await?;
    pm.remove(2003, 7, end).await?;
    println!();

    Ok(())
}

// ==================== DISPLAY FUNCTIONS ====================

fn section_header(title: &str) {
    println!("\n{}", "=".repeat(70));
    println!("  {}", title);
    println!("{}\n", "=".repeat(70));
}

fn print_employee_info(emp_info: Option<EmployeeDetail>) {
    let Some(emp) = emp_info else {
        println!("Employee not found");
        return;
    };

    println!("Employee Number: {}", emp.employee_number);
    println!("Name:            {}", emp.employee_name);
    println!("Title:           {}", emp.title);
    println!("Employment Type: {}", emp.employment_type);

    if emp.employment_type == "salaried" {
        match emp.current_salary {
            Some(salary) => println!("Annual Salary:   ${:.2}", salary),
            None => println!("Annual Salary:   N/A"),
        }
    } else {
        match emp.hourly_rate {
            Some(rate) => println!("Hourly Rate:     ${:.2}", rate),
            None => println!("Hourly Rate:     N/A"),
        }
    }

    println!(
        "Department:      {}",
        emp.department_name.as_deref().unwrap_or("N/A")
    );
    println!(
        "Division:        {}",
        emp.division_name.as_deref().unwrap_or("N/A")
    );
    println!(
        "Job Start Date:  {}",
        emp.current_job_start
            .map(|d| d.to_string())
            .unwrap_or_else(|| "N/A".to_string())
    );
    println!();
}

fn print_employee_list(employees: &[EmployeeSummary]) {
    println!(
        "{:<8} {:<25} {:<25} {:<10} {:<18} {:<20}",
        "Emp #", "Name", "Title", "Type", "Salary/Rate", "Organization"
    );

    for emp in employees {
        let pay_str = if emp.employment_type == "salaried" {
            format!("${:.2}/year", emp.salary)
        } else {
            format!("${:.2}/hour", emp.hourly_rate)
        };

        println!(
            "{:<8} {:<25} {:<25} {:<10} {:<18} {:<20}",
            emp.employee_number, emp.employee_name, emp.title, emp.employment_type, pay_str,
            emp.org_unit
        );
    }
    println!();
}

fn print_payroll_report(rows: &[PayrollReportRow]) {
    println!(
        "{:<6} {:<8} {:<25} {:<10} {:>11} {:>9} {:>9} {:>9} {:>11}",
        "ID", "Emp #", "Name", "Type", "Gross", "Fed Tax", "State", "Other", "Net Pay"
    );

    let mut total_gross = Decimal::ZERO;
    let mut total_net = Decimal::ZERO;

    for row in rows {
        println!(
            "{:<6} {:<8} {:<25} {:<10} {:>11.2} {:>9.2} {:>9.2} {:>9.2} {:>11.2}",
            row.payroll_id,
            row.employee_number,
            row.employee_name,
            row.employment_type,
            row.gross_pay,
            row.federal_tax,
            row.state_tax,
            row.other_tax,
            row.net_pay
        );
        total_gross += row.gross_pay;
        total_net += row.net_pay;
    }

    println!("{:<62} {:>11.2} {:>31.2}", "TOTALS", total_gross, total_net);
    println!();
}

fn print_project_list(projects: &[ProjectRow]) {
    println!(
        "{:<8} {:<32} {:>14} {:<12} {:<12} {:<22} {:<10}",
        "Proj #", "Project Name", "Budget", "Start Date", "End Date", "Manager", "Status"
    );

    for proj in projects {
        let end_str = proj
            .date_ended
            .map(|d| d.to_string())
            .unwrap_or_else(|| "Ongoing".to_string());
        println!(
            "{:<8} {:<32} {:>14.2} {:<12} {:<12} {:<22} {:<10}",
            proj.project_number,
            proj.project_name,
            proj.budget,
            proj.date_started.to_string(),
            end_str,
            proj.manager_name,
            proj.status
        );
    }
    println!();
}

fn print_project_team(team: &[TeamMember]) {
    println!(
        "{:<8} {:<25} {:<25} {:<22} {:>8} {:<12}",
        "Emp #", "Name", "Title", "Role", "Hours", "Start Date"
    );

    let mut total_hours = Decimal::ZERO;
    for member in team {
        println!(
            "{:<8} {:<25} {:<25} {:<22} {:>8.1} {:<12}",
            member.employee_number,
            member.employee_name,
            member.title,
            member.role,
            member.hours_worked,
            member.start_date.to_string()
        );
        total_hours += member.hours_worked;
    }

    println!("{:<92} {:>8.1}", "Total Hours:", total_hours);
    println!();
}

fn print_milestones(milestones: &[Milestone]) {
    println!(
        "{:<6} {:<30} {:<12} {:<12} {:<14} {:<30}",
        "ID", "Milestone Name", "Due Date", "Completed", "Status", "Done"
    );

    for milestone in milestones {
        let completed = milestone
            .completion_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "N/A".to_string());
        let done = milestone.details_done.as_deref().unwrap_or("N/A");
        let done = if done.len() > 30 { &done[..27] } else { done };
        println!(
            "{:<6} {:<30} {:<12} {:<12} {:<14} {:<30}",
            milestone.milestone_id,
            milestone.milestone_name,
            milestone.due_date.to_string(),
            completed,
            milestone.status,
            done
        );
    }
    println!();
}

fn print_project_statistics(stats: &ProjectStatistics) {
    println!("Project:                {}", stats.project.project_name);
    println!("Budget:                 ${:.2}", stats.project.budget);
    println!(
        "Status:                 {}",
        if stats.project.date_ended.is_some() { "Completed" } else { "Active" }
    );
    println!("Team Members (Total):   {}", stats.team_size);
    println!("Current Team Size:      {}", stats.current_team_size);
    println!("Total Person-Hours:     {:.1}", stats.total_person_hours);
    println!("Total Milestones:       {}", stats.total_milestones);
    println!("  Completed:            {}", stats.completed_milestones);
    println!("  In Progress:          {}", stats.in_progress_milestones);
    println!("  Pending:              {}", stats.pending_milestones);

    if stats.total_milestones > 0 {
        let completion_pct =
            stats.completed_milestones as f64 / stats.total_milestones as f64 * 100.0;
        println!("  Completion Rate:      {:.1}%", completion_pct);
    }
    println!();
}
