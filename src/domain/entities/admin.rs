use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct AdminVerifyRequest {
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AdminVerifyResponse {
    pub valid: bool,
}
