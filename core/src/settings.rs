//! Application settings: the configurable duty-type and role-label
//! allow-lists plus the feature toggles. Persisted as a single JSON
//! document in the store.

use crate::duty::HEADQUARTERS_DUTY;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppSettings {
    pub duty_types: Vec<String>,
    pub duty_roles: Vec<String>,
    pub auto_assign_enabled: bool,
    pub notifications_enabled: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            duty_types: vec![
                "company_duty".to_string(),
                HEADQUARTERS_DUTY.to_string(),
                "patrol".to_string(),
            ],
            duty_roles: vec!["duty_officer".to_string(), "orderly".to_string()],
            auto_assign_enabled: true,
            notifications_enabled: false,
        }
    }
}

impl AppSettings {
    pub fn allows_duty_type(&self, tag: &str) -> bool {
        self.duty_types.iter().any(|t| t == tag)
    }

    pub fn allows_role(&self, tag: &str) -> bool {
        self.duty_roles.iter().any(|r| r == tag)
    }
}
