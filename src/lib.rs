#![warn(rust_2018_idioms)]

pub mod description;
pub mod lexer;

mod error;

pub use description::time::{
    marshal_time_descriptions, unmarshal_time_descriptions, TimeDescription,
};
pub use error::{Error, Result};
pub use lexer::{Lexer, Tag, Tokenizer};
