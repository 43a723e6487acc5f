pub mod middleware;
pub mod password;
pub mod policy;
pub mod session;
