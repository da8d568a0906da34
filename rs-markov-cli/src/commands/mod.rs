pub mod build;
pub mod generate;
