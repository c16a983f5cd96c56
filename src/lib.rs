pub mod cli;
pub mod crypto;
pub mod envelope;
pub mod errors;
pub mod markup;
pub mod model;
pub mod storage;
