pub mod catalog;
pub mod customers;
pub mod expenses;
pub mod installments;
pub mod receipts;
pub mod returns;
pub mod sales;
pub mod settings;
pub mod users;
