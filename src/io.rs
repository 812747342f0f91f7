pub mod param_parser;
pub mod snapshot;
pub mod write_to_csv;
