pub mod interactive;
pub mod quote;
