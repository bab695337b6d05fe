use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::member::Member;

/// Sign in as an already registered member
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SignInRequest {
    pub email: String,
}

/// Bearer token handed out on sign in
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SessionResponse {
    pub token: String,
    pub member: Member,
    pub expires_at: i64,
}
