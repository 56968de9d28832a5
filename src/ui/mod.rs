pub mod login;
pub mod panels;
pub mod plot;
pub mod table;
