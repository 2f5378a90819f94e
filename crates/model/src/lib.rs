pub mod core;
pub mod entities;
pub mod graph;
pub mod records;
