pub mod builder;
pub mod client;
pub mod dispatcher;
