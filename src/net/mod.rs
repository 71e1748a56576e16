//! Network Module
//!
//! Request/response model shared by the worker and its host, plus the
//! network primitive the worker fetches through.

mod client;
mod request;
mod response;

pub use client::{HttpNetwork, Network};
pub use request::{Destination, Request, RequestKey};
pub use response::{Body, Response, ResponseType};
