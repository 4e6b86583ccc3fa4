pub mod check;
pub mod employee;
pub mod payroll;
pub mod product;
pub mod trade;
