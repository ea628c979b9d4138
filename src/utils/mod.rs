pub mod money;
pub mod path;
pub mod table;
