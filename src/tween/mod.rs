pub mod counter;
pub mod scheduler;
