pub mod chat;
pub mod product;
pub mod shop;
pub mod user;
