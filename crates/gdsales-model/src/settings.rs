// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

/// One key-value row from the settings table. Values are opaque strings; the
/// frontend decides how to interpret each key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemSetting {
    pub key: String,
    pub value: String,
    pub description: Option<String>,
    pub updated_at: String,
}
