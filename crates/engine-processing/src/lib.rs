pub mod error;
pub mod graph;
pub mod producer;
pub mod sink;
pub mod sync;
