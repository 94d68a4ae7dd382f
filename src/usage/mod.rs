pub mod accumulator;
pub mod storage;

pub use accumulator::{Direction, Period, UsageAccumulator};
pub use storage::{FileStore, MemoryStore, UsageStore};
