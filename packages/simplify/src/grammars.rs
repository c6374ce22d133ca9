pub mod context_free;
pub mod erasing;
pub mod nullable;
pub mod types;
pub mod unit;
pub mod useless;
