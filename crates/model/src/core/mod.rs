pub mod data_type;
pub mod field;
pub mod utils;
pub mod value;
