pub mod ninepatch;
