//! # Newsdesk Shared
//!
//! Wire-level types shared between the API server and its clients: the JSON
//! envelope plus request/response DTOs.

pub mod dto;
pub mod response;

pub use response::ApiResponse;
