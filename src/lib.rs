pub mod analyzers;
pub mod distance;
pub mod output;
pub mod parser;
pub mod prepare;
pub mod trips;
