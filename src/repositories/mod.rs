//! # Repository Layer
//!
//! This module contains repository implementations that encapsulate SeaORM
//! operations for database entities, providing a clean API for data access.

pub mod company;
pub mod counter;
pub mod employee;
pub mod salary;
pub mod user;

pub use company::{CompanyInput, CompanyRepository};
pub use counter::CounterRepository;
pub use employee::{CreateEmployeeRequest, EmployeeRepository, UpdateEmployeeRequest};
pub use salary::{SalaryFilter, SalaryInput, SalaryRepository};
pub use user::UserRepository;
