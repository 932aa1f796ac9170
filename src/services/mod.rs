pub mod progress;
pub mod scheduler;
pub mod vocabulary;
