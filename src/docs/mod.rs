pub mod example;
pub mod generator;

pub use generator::DocGenerator;
