//! Storage-side models

pub mod employee;

pub use employee::Employee;
