#![doc = include_str!("../README.md")]

pub mod cloudlets;
pub mod entity;
pub mod error;
pub mod scenario;
pub mod table;

pub use cloudlets::CloudletsTableBuilder;
pub use error::TableError;
