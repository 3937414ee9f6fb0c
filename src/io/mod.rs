//! Reading and writing of solver dumps.

pub mod binary;

pub use self::binary::{encode_dump, parse_dump, read_dump, write_dump};
