pub mod streamer;

pub use streamer::{BatchStreamer, StreamSummary};
