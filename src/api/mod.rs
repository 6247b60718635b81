pub mod employee;
pub mod payroll;
pub mod project;
