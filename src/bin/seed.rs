use anyhow::Result;
use chrono::NaiveDate;
use clap::Parser;
use dotenvy::dotenv;
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool};

use workforce::config::Config;
use workforce::db::init_db;

const SCHEMA: &str = include_str!("../../schema.sql");

// Delete order respects foreign keys.
const TABLES: &[&str] = &[
    "ProjectMilestone",
    "PayrollHistory",
    "JobHistory",
    "EmployeeProject",
    "Project",
    "Office",
    "Building",
    "Employee",
    "Department",
    "Division",
];

#[derive(Parser)]
#[command(name = "seed")]
#[command(about = "Create the company schema and load realistic sample data")]
struct Cli {
    /// Apply schema.sql before loading data
    #[arg(long)]
    init: bool,

    /// Delete existing rows first
    #[arg(long)]
    wipe: bool,
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

    if cli.init {
        pool.execute(SCHEMA).await?;
        println!("Schema applied");
    }

    if cli.wipe {
        for table in TABLES {
            sqlx::query(&format!("DELETE FROM {}", table))
                .execute(&pool)
                .await?;
        }
        println!("Existing data cleared");
    }

    generate_divisions(&pool).await?;
    generate_departments(&pool).await?;
    generate_buildings_and_offices(&pool).await?;
    generate_employees(&pool).await?;
    update_org_heads(&pool).await?;
    generate_job_history(&pool).await?;
    generate_projects(&pool).await?;
    generate_assignments(&pool).await?;
    generate_milestones(&pool).await?;

    print_summary(&pool).await?;
    Ok(())
}

fn d(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn money(s: &str) -> Decimal {
    s.parse().unwrap()
}

async fn generate_divisions(pool: &PgPool) -> Result<()> {
    let divisions = [
        (1, "Technology Division"),
        (2, "Operations Division"),
        (3, "Corporate Division"),
        (4, "Sales & Marketing Division"),
    ];

    for (division_id, division_name) in divisions {
        sqlx::query("INSERT INTO Division (division_id, division_name) VALUES ($1, $2)")
            .bind(division_id)
            .bind(division_name)
            .execute(pool)
            .await?;
    }
    println!("Generated {} divisions", divisions.len());
    Ok(())
}

async fn generate_departments(pool: &PgPool) -> Result<()> {
    let departments = [
        (1, "Software Development", "500000.00", 1),
        (2, "Quality Assurance", "250000.00", 1),
        (3, "IT Infrastructure", "350000.00", 1),
        (4, "Manufacturing", "600000.00", 2),
        (5, "Supply Chain", "300000.00", 2),
        (6, "Human Resources", "200000.00", 3),
        (7, "Finance", "400000.00", 3),
        (8, "Legal", "350000.00", 3),
        (9, "Sales", "450000.00", 4),
        (10, "Marketing", "300000.00", 4),
    ];

    for (department_id, department_name, budget, division_id) in departments {
        sqlx::query(
            r#"
            INSERT INTO Department (department_id, department_name, budget, division_id)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(department_id)
        .bind(department_name)
        .bind(money(budget))
        .bind(division_id)
        .execute(pool)
        .await?;
    }
    println!("Generated {} departments", departments.len());
    Ok(())
}

async fn generate_buildings_and_offices(pool: &PgPool) -> Result<()> {
    let buildings = [
        ("HQ-1", "Headquarters Building", 1995, "5000000.00"),
        ("TECH-2", "Technology Center", 2010, "8000000.00"),
        ("MFG-3", "Manufacturing Facility", 2005, "12000000.00"),
    ];

    let offices = [
        ("101", "250.0", "HQ-1"),
        ("102", "180.0", "HQ-1"),
        ("103", "200.0", "HQ-1"),
        ("104", "150.0", "HQ-1"),
        ("105", "300.0", "HQ-1"),
        ("201", "200.0", "TECH-2"),
        ("202", "180.0", "TECH-2"),
        ("203", "200.0", "TECH-2"),
        ("204", "220.0", "TECH-2"),
        ("205", "180.0", "TECH-2"),
        ("206", "200.0", "TECH-2"),
        ("301", "180.0", "MFG-3"),
        ("302", "150.0", "MFG-3"),
        ("303", "200.0", "MFG-3"),
    ];

    for (building_code, building_name, year, cost) in buildings {
        sqlx::query(
            r#"
            INSERT INTO Building (building_code, building_name, year_built_or_bought, cost)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(building_code)
        .bind(building_name)
        .bind(year)
        .bind(money(cost))
        .execute(pool)
        .await?;
    }

    for (office_number, area, building_code) in offices {
        sqlx::query(
            r#"
            INSERT INTO Office (office_number, area_sqft, building_code)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(office_number)
        .bind(money(area))
        .bind(building_code)
        .execute(pool)
        .await?;
    }

    println!(
        "Generated {} buildings and {} offices",
        buildings.len(),
        offices.len()
    );
    Ok(())
}

async fn generate_employees(pool: &PgPool) -> Result<()> {
    // (number, name, title, type, hourly_rate, department)
    let employees: &[(i32, &str, &str, &str, Option<&str>, i32)] = &[
        // Software Development
        (1001, "Alice Johnson", "Senior Software Engineer", "salaried", None, 1),
        (1002, "Bob Smith", "Software Engineer", "salaried", None, 1),
        (1003, "Carol White", "Junior Developer", "salaried", None, 1),
        (1004, "David Brown", "Tech Lead", "salaried", None, 1),
        (1005, "Emma Davis", "DevOps Engineer", "salaried", None, 1),
        // QA
        (2001, "Frank Miller", "QA Manager", "salaried", None, 2),
        (2002, "Grace Wilson", "QA Engineer", "salaried", None, 2),
        (2003, "Henry Moore", "Test Automation Engineer", "salaried", None, 2),
        // IT Infrastructure
        (3001, "Irene Taylor", "IT Director", "salaried", None, 3),
        (3002, "Jack Anderson", "Systems Administrator", "salaried", None, 3),
        (3003, "Kate Thomas", "Network Engineer", "salaried", None, 3),
        // Manufacturing
        (4001, "Liam Jackson", "Manufacturing Manager", "salaried", None, 4),
        (4002, "Mia Harris", "Production Supervisor", "salaried", None, 4),
        (4003, "Noah Martin", "Assembly Technician", "hourly", Some("28.50"), 4),
        (4004, "Olivia Thompson", "Quality Inspector", "hourly", Some("25.00"), 4),
        (4005, "Paul Garcia", "Machine Operator", "hourly", Some("22.00"), 4),
        // Supply Chain
        (5001, "Quinn Martinez", "Supply Chain Director", "salaried", None, 5),
        (5002, "Rachel Robinson", "Logistics Coordinator", "salaried", None, 5),
        // HR
        (6001, "Samuel Clark", "HR Director", "salaried", None, 6),
        (6002, "Tina Rodriguez", "HR Specialist", "salaried", None, 6),
        (6003, "Uma Lewis", "Recruiter", "salaried", None, 6),
        // Finance
        (7001, "Victor Lee", "CFO", "salaried", None, 7),
        (7002, "Wendy Walker", "Senior Accountant", "salaried", None, 7),
        (7003, "Xavier Hall", "Financial Analyst", "salaried", None, 7),
        // Legal
        (8001, "Yara Allen", "General Counsel", "salaried", None, 8),
        (8002, "Zack Young", "Legal Assistant", "salaried", None, 8),
        // Sales
        (9001, "Amy King", "VP of Sales", "salaried", None, 9),
        (9002, "Brian Wright", "Sales Manager", "salaried", None, 9),
        (9003, "Chloe Lopez", "Account Executive", "salaried", None, 9),
        (9004, "Derek Hill", "Sales Representative", "salaried", None, 9),
        // Marketing
        (10001, "Ella Scott", "Marketing Director", "salaried", None, 10),
        (10002, "Felix Green", "Marketing Manager", "salaried", None, 10),
        (10003, "Gina Adams", "Content Specialist", "salaried", None, 10),
        (10004, "Hugo Baker", "Graphic Designer", "hourly", Some("35.00"), 10),
    ];

    for &(number, name, title, employment_type, hourly_rate, department_id) in employees {
        sqlx::query(
            r#"
            INSERT INTO Employee
            (employee_number, employee_name, title, employment_type,
             hourly_rate, department_id, division_id)
            VALUES ($1, $2, $3, $4, $5, $6, NULL)
            "#,
        )
        .bind(number)
        .bind(name)
        .bind(title)
        .bind(employment_type)
        .bind(hourly_rate.map(money))
        .bind(department_id)
        .execute(pool)
        .await?;
    }
    println!("Generated {} employees", employees.len());
    Ok(())
}

async fn update_org_heads(pool: &PgPool) -> Result<()> {
    let division_heads = [(1, 1004), (2, 4001), (3, 7001), (4, 9001)];
    let department_heads = [
        (1, 1004),
        (2, 2001),
        (3, 3001),
        (4, 4001),
        (5, 5001),
        (6, 6001),
        (7, 7001),
        (8, 8001),
        (9, 9001),
        (10, 10001),
    ];

    for (division_id, emp_id) in division_heads {
        sqlx::query("UPDATE Division SET division_head_emp_id = $1 WHERE division_id = $2")
            .bind(emp_id)
            .bind(division_id)
            .execute(pool)
            .await?;
    }

    for (department_id, emp_id) in department_heads {
        sqlx::query(
            "UPDATE Department SET department_head_emp_id = $1 WHERE department_id = $2",
        )
        .bind(emp_id)
        .bind(department_id)
        .execute(pool)
        .await?;
    }

    println!(
        "Updated {} division and {} department heads",
        division_heads.len(),
        department_heads.len()
    );
    Ok(())
}

async fn generate_job_history(pool: &PgPool) -> Result<()> {
    // (employee, title, start_date, salary, is_current)
    let job_history: &[(i32, &str, NaiveDate, u32, bool)] = &[
        (1001, "Senior Software Engineer", d(2023, 1, 1), 110000, true),
        (1002, "Software Engineer", d(2023, 6, 1), 85000, true),
        (1003, "Junior Developer", d(2025, 1, 1), 65000, true),
        (1004, "Tech Lead", d(2022, 1, 1), 130000, true),
        (1005, "DevOps Engineer", d(2023, 3, 1), 95000, true),
        (2001, "QA Manager", d(2022, 6, 1), 95000, true),
        (2002, "QA Engineer", d(2023, 1, 1), 75000, true),
        (2003, "Test Automation Engineer", d(2023, 9, 1), 80000, true),
        (3001, "IT Director", d(2021, 1, 1), 125000, true),
        (3002, "Systems Administrator", d(2022, 3, 1), 78000, true),
        (3003, "Network Engineer", d(2023, 1, 1), 82000, true),
        (4001, "Manufacturing Manager", d(2020, 1, 1), 105000, true),
        (4002, "Production Supervisor", d(2022, 6, 1), 72000, true),
        (5001, "Supply Chain Director", d(2021, 6, 1), 115000, true),
        (5002, "Logistics Coordinator", d(2023, 1, 1), 68000, true),
        (6001, "HR Director", d(2020, 1, 1), 120000, true),
        (6002, "HR Specialist", d(2022, 1, 1), 65000, true),
        (6003, "Recruiter", d(2023, 6, 1), 62000, true),
        (7001, "CFO", d(2019, 1, 1), 180000, true),
        (7002, "Senior Accountant", d(2021, 1, 1), 85000, true),
        (7003, "Financial Analyst", d(2023, 1, 1), 72000, true),
        (8001, "General Counsel", d(2020, 6, 1), 160000, true),
        (8002, "Legal Assistant", d(2023, 1, 1), 55000, true),
        (9001, "VP of Sales", d(2021, 1, 1), 140000, true),
        (9002, "Sales Manager", d(2022, 1, 1), 95000, true),
        (9003, "Account Executive", d(2023, 1, 1), 78000, true),
        (9004, "Sales Representative", d(2023, 6, 1), 60000, true),
        (10001, "Marketing Director", d(2021, 6, 1), 115000, true),
        (10002, "Marketing Manager", d(2022, 6, 1), 88000, true),
        (10003, "Content Specialist", d(2023, 1, 1), 65000, true),
        // Closed prior positions
        (1001, "Software Engineer", d(2020, 6, 1), 75000, false),
        (1004, "Senior Software Engineer", d(2019, 1, 1), 95000, false),
        (7001, "Finance Director", d(2017, 1, 1), 140000, false),
    ];

    for (employee, title, start_date, salary, is_current) in job_history {
        let end_date = if *is_current { None } else { Some(d(2023, 12, 31)) };
        sqlx::query(
            r#"
            INSERT INTO JobHistory
            (employee_number, title, start_date, end_date, salary, is_current)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(employee)
        .bind(title)
        .bind(start_date)
        .bind(end_date)
        .bind(Decimal::from(*salary))
        .bind(is_current)
        .execute(pool)
        .await?;
    }
    println!("Generated {} job history records", job_history.len());
    Ok(())
}

async fn generate_projects(pool: &PgPool) -> Result<()> {
    // (number, name, budget, started, ended, manager, department)
    let projects: &[(i32, &str, u32, NaiveDate, Option<NaiveDate>, i32, i32)] = &[
        (1, "Customer Portal Redesign", 250000, d(2025, 1, 15), None, 1004, 1),
        (2, "Mobile App Development", 350000, d(2023, 9, 1), Some(d(2025, 3, 1)), 1001, 1),
        (3, "Data Migration Project", 180000, d(2025, 2, 1), None, 3001, 3),
        (4, "Marketing Campaign Q1", 120000, d(2025, 1, 1), Some(d(2025, 3, 31)), 10001, 10),
        (5, "Product Line Expansion", 500000, d(2023, 11, 1), None, 4001, 4),
        (6, "Sales CRM Implementation", 200000, d(2025, 1, 10), None, 9001, 9),
        (7, "Automated Testing Framework", 150000, d(2023, 10, 1), None, 2001, 2),
    ];

    for (number, name, budget, started, ended, manager, department) in projects {
        sqlx::query(
            r#"
            INSERT INTO Project
            (project_number, project_name, budget, date_started, date_ended,
             manager_emp_id, department_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(number)
        .bind(name)
        .bind(Decimal::from(*budget))
        .bind(started)
        .bind(ended)
        .bind(manager)
        .bind(department)
        .execute(pool)
        .await?;
    }
    println!("Generated {} projects", projects.len());
    Ok(())
}

async fn generate_assignments(pool: &PgPool) -> Result<()> {
    // (employee, project, role, hours, start, end, is_current)
    let assignments: &[(i32, i32, &str, u32, NaiveDate, Option<NaiveDate>, bool)] = &[
        // Project 1: Customer Portal Redesign (active)
        (1004, 1, "Project Manager", 120, d(2025, 1, 15), None, true),
        (1001, 1, "Lead Developer", 200, d(2025, 1, 15), None, true),
        (1002, 1, "Backend Developer", 180, d(2025, 1, 15), None, true),
        (1003, 1, "Frontend Developer", 160, d(2025, 1, 20), None, true),
        (2002, 1, "QA Engineer", 80, d(2025, 2, 1), None, true),
        // Project 2: Mobile App (completed)
        (1001, 2, "Technical Lead", 450, d(2023, 9, 1), Some(d(2025, 3, 1)), false),
        (1002, 2, "Developer", 400, d(2023, 9, 1), Some(d(2025, 3, 1)), false),
        (2003, 2, "QA Automation", 200, d(2023, 11, 1), Some(d(2025, 3, 1)), false),
        // Project 3: Data Migration (active)
        (3001, 3, "Project Lead", 150, d(2025, 2, 1), None, true),
        (3002, 3, "Systems Admin", 180, d(2025, 2, 1), None, true),
        (3003, 3, "Network Support", 120, d(2025, 2, 5), None, true),
        // Project 4: Marketing Campaign (completed)
        (10001, 4, "Campaign Director", 220, d(2025, 1, 1), Some(d(2025, 3, 31)), false),
        (10002, 4, "Campaign Manager", 200, d(2025, 1, 1), Some(d(2025, 3, 31)), false),
        (10003, 4, "Content Creator", 180, d(2025, 1, 1), Some(d(2025, 3, 31)), false),
        // Project 5: Product Line Expansion (active)
        (4001, 5, "Production Manager", 250, d(2023, 11, 1), None, true),
        (4002, 5, "Supervisor", 220, d(2023, 11, 1), None, true),
        (5001, 5, "Supply Chain Lead", 180, d(2023, 11, 1), None, true),
        // Project 6: Sales CRM (active)
        (9001, 6, "Executive Sponsor", 80, d(2025, 1, 10), None, true),
        (9002, 6, "Implementation Lead", 150, d(2025, 1, 10), None, true),
        (1005, 6, "Technical Consultant", 120, d(2025, 1, 15), None, true),
        // Project 7: Testing Framework (active)
        (2001, 7, "Project Manager", 140, d(2023, 10, 1), None, true),
        (2003, 7, "Lead Engineer", 220, d(2023, 10, 1), None, true),
    ];

    for (employee, project, role, hours, start, end, is_current) in assignments {
        sqlx::query(
            r#"
            INSERT INTO EmployeeProject
            (employee_number, project_number, role, hours_worked,
             start_date, end_date, is_current)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(employee)
        .bind(project)
        .bind(role)
        .bind(Decimal::from(*hours))
        .bind(start)
        .bind(end)
        .bind(is_current)
        .execute(pool)
        .await?;
    }
    println!("Generated {} employee-project assignments", assignments.len());
    Ok(())
}

async fn generate_milestones(pool: &PgPool) -> Result<()> {
    // (project, name, description, due, completed, status, done, remaining)
    #[allow(clippy::type_complexity)]
    let milestones: &[(i32, &str, &str, NaiveDate, Option<NaiveDate>, &str, &str, &str)] = &[
        (1, "Requirements Analysis", "Gather and document requirements", d(2025, 2, 1), Some(d(2025, 2, 5)), "completed", "Requirements documented", "None"),
        (1, "UI/UX Design", "Create mockups and prototypes", d(2025, 2, 15), Some(d(2025, 2, 20)), "completed", "Designs approved", "None"),
        (1, "Backend Development", "Implement backend APIs", d(2025, 3, 15), None, "in_progress", "API endpoints 60% complete", "Authentication and admin APIs"),
        (1, "Frontend Development", "Build user interface", d(2025, 3, 20), None, "in_progress", "Core components built", "Admin dashboard and reports"),
        (1, "Testing & QA", "Quality assurance testing", d(2025, 4, 1), None, "pending", "None", "Full test coverage needed"),
        (3, "Data Assessment", "Assess current data structure", d(2025, 2, 15), Some(d(2025, 2, 18)), "completed", "Assessment complete", "None"),
        (3, "Migration Script Development", "Develop migration scripts", d(2025, 3, 1), None, "in_progress", "Scripts 70% complete", "Error handling and logging"),
        (3, "Test Migration", "Run test migration", d(2025, 3, 25), None, "pending", "None", "Waiting for scripts completion"),
        (5, "Market Research", "Research target markets", d(2023, 12, 1), Some(d(2023, 12, 15)), "completed", "Research complete", "None"),
        (5, "Product Design", "Design new product variations", d(2025, 1, 15), Some(d(2025, 1, 30)), "completed", "Designs approved", "None"),
        (5, "Prototype Development", "Build prototypes", d(2025, 2, 28), None, "in_progress", "First prototypes built", "Final iteration needed"),
        (6, "Requirements Gathering", "Define CRM requirements", d(2025, 1, 25), Some(d(2025, 1, 28)), "completed", "Requirements defined", "None"),
        (6, "System Configuration", "Configure CRM system", d(2025, 2, 15), None, "in_progress", "Basic config done", "Custom fields and workflows"),
        (6, "User Training", "Train sales team", d(2025, 3, 15), None, "pending", "None", "Training materials to be created"),
    ];

    for (project, name, description, due, completed, status, done, remaining) in milestones {
        sqlx::query(
            r#"
            INSERT INTO ProjectMilestone
            (project_number, milestone_name, description, due_date,
             completion_date, status, details_done, details_remaining)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(project)
        .bind(name)
        .bind(description)
        .bind(due)
        .bind(completed)
        .bind(status)
        .bind(done)
        .bind(remaining)
        .execute(pool)
        .await?;
    }
    println!("Generated {} project milestones", milestones.len());
    Ok(())
}

async fn print_summary(pool: &PgPool) -> Result<()> {
    println!("\nSummary:");
    for table in [
        "Division",
        "Department",
        "Employee",
        "Building",
        "Office",
        "Project",
        "EmployeeProject",
        "ProjectMilestone",
        "JobHistory",
    ] {
        let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(pool)
            .await?;
        println!("  {}: {}", table, count);
    }
    Ok(())
}
