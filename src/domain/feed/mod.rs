pub mod assembler;
pub mod filter;
