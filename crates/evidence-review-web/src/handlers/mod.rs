pub mod csv;
pub mod save;
