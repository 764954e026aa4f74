pub mod collection;
pub mod environment;
pub mod response;
pub mod tab;
pub mod workspace;
