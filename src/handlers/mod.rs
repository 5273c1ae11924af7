pub mod agencies;
pub mod auth;
pub mod customers;
pub mod operators;
pub mod phones;
pub mod records;
pub mod sales;
pub mod sales_types;
pub mod sales_users;
pub mod typifications;
