pub mod message;
pub mod policy;
pub mod session;
