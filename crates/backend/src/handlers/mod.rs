pub mod a001_pilgrim;
