pub mod destination;
pub mod sink;
