pub mod print;
pub mod serve;
