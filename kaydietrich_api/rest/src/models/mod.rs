use serde::Serialize;

pub mod contact;

/// Uniform envelope for every JSON response of the API.
#[derive(Debug, Serialize)]
pub struct ApiStatus {
    pub success: bool,
    pub message: String,
}
