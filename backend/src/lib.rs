//! Goldworks ERP backend: REST surface for a multi-branch jewelry/gold
//! retail operation - inventory, employees/payroll, financial instruments
//! (checks), sales/purchases and a dashboard summary.

pub mod db;
pub mod domain;
pub mod rest;
pub mod storage;
