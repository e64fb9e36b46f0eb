//! # Recipe Shared
//!
//! Wire types shared by the server and its clients: the form payloads with
//! their field validation, card responses, and error bodies.

pub mod dto;
pub mod response;

pub use response::{ApiResponse, ErrorResponse};
