//! Cross-subsystem integration scenarios.

mod concurrency;
mod end_to_end;
