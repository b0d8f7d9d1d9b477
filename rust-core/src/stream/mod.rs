//! Frame hand-off and the filter → spectrum chain

pub mod buffer;
pub mod chain;

pub use buffer::{FrameConsumer, FrameProducer, FrameQueue};
pub use chain::SignalChain;
