//! CSV adapters for the batch command line.

pub mod request_reader;
pub mod response_writer;
