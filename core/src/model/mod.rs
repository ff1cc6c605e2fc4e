pub mod filter;
pub mod task;
