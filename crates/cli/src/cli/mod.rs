pub mod args;
pub mod op;
pub mod ops;

pub use ops::{Edit, Format, Get, Set, Version};
