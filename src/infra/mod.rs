//! Concrete collaborator implementations behind the library's trait ports.

pub mod form;
pub mod http;
