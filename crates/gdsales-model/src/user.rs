// SPDX-License-Identifier: Apache-2.0

use crate::ids::UserId;
use serde::{Deserialize, Serialize};

/// Account record as exposed over the API. The password hash never leaves the
/// store layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: String,
    pub department: String,
    pub phone: Option<String>,
    pub status: String,
    pub permissions: Vec<String>,
    pub last_login: Option<String>,
    pub created_at: String,
}

pub const ADMIN_ROLE: &str = "admin";
