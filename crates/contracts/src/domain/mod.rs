pub mod a001_pilgrim;
pub mod common;
