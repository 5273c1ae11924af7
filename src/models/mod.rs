pub mod agency;
pub mod auth;
pub mod catalog;
pub mod customer;
pub mod operator;
pub mod phone;
pub mod record;
pub mod sales;
pub mod sales_user;
