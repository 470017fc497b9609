pub mod accounts;
pub mod assembler;
pub mod client;
pub mod fee;
pub mod payload;
pub mod pool;
