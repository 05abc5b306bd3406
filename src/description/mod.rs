
pub mod time;
