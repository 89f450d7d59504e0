//! The fixed audit event taxonomy.
//!
//! Every audit entry carries exactly one `AuditEventType`. The set is
//! closed: callers at a string boundary (HTTP handlers, middleware) parse
//! via `FromStr`, which rejects unknown names with
//! [`AuditError::InvalidEventType`] before anything touches the chain.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AuditError;

/// The coarse category an event type belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    Authentication,
    UserManagement,
    DataAccess,
    System,
    Integration,
}

/// One value from the fixed audit event enumeration.
///
/// Wire names are `snake_case` (e.g. `login_success`) and stable — they are
/// part of the canonical hash input, so renaming a variant is a breaking
/// chain migration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditEventType {
    // Authentication
    LoginSuccess,
    LoginFailure,
    Logout,
    PasswordChanged,
    TwoFactorEnrolled,
    TwoFactorFailed,
    // User management
    UserCreated,
    UserUpdated,
    UserDeactivated,
    RoleAssigned,
    // Data access
    DataAccess,
    DataModification,
    DataDeletion,
    DataExport,
    // System
    SystemStartup,
    ConfigChanged,
    IntegrityCheck,
    // Integration
    IntegrationSync,
    IntegrationFailure,
}

impl AuditEventType {
    /// All event types, in declaration order.
    pub const ALL: &'static [AuditEventType] = &[
        AuditEventType::LoginSuccess,
        AuditEventType::LoginFailure,
        AuditEventType::Logout,
        AuditEventType::PasswordChanged,
        AuditEventType::TwoFactorEnrolled,
        AuditEventType::TwoFactorFailed,
        AuditEventType::UserCreated,
        AuditEventType::UserUpdated,
        AuditEventType::UserDeactivated,
        AuditEventType::RoleAssigned,
        AuditEventType::DataAccess,
        AuditEventType::DataModification,
        AuditEventType::DataDeletion,
        AuditEventType::DataExport,
        AuditEventType::SystemStartup,
        AuditEventType::ConfigChanged,
        AuditEventType::IntegrityCheck,
        AuditEventType::IntegrationSync,
        AuditEventType::IntegrationFailure,
    ];

    /// The stable wire name of this event type.
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditEventType::LoginSuccess => "login_success",
            AuditEventType::LoginFailure => "login_failure",
            AuditEventType::Logout => "logout",
            AuditEventType::PasswordChanged => "password_changed",
            AuditEventType::TwoFactorEnrolled => "two_factor_enrolled",
            AuditEventType::TwoFactorFailed => "two_factor_failed",
            AuditEventType::UserCreated => "user_created",
            AuditEventType::UserUpdated => "user_updated",
            AuditEventType::UserDeactivated => "user_deactivated",
            AuditEventType::RoleAssigned => "role_assigned",
            AuditEventType::DataAccess => "data_access",
            AuditEventType::DataModification => "data_modification",
            AuditEventType::DataDeletion => "data_deletion",
            AuditEventType::DataExport => "data_export",
            AuditEventType::SystemStartup => "system_startup",
            AuditEventType::ConfigChanged => "config_changed",
            AuditEventType::IntegrityCheck => "integrity_check",
            AuditEventType::IntegrationSync => "integration_sync",
            AuditEventType::IntegrationFailure => "integration_failure",
        }
    }

    /// The category this event type belongs to.
    pub fn category(&self) -> EventCategory {
        match self {
            AuditEventType::LoginSuccess
            | AuditEventType::LoginFailure
            | AuditEventType::Logout
            | AuditEventType::PasswordChanged
            | AuditEventType::TwoFactorEnrolled
            | AuditEventType::TwoFactorFailed => EventCategory::Authentication,

            AuditEventType::UserCreated
            | AuditEventType::UserUpdated
            | AuditEventType::UserDeactivated
            | AuditEventType::RoleAssigned => EventCategory::UserManagement,

            AuditEventType::DataAccess
            | AuditEventType::DataModification
            | AuditEventType::DataDeletion
            | AuditEventType::DataExport => EventCategory::DataAccess,

            AuditEventType::SystemStartup
            | AuditEventType::ConfigChanged
            | AuditEventType::IntegrityCheck => EventCategory::System,

            AuditEventType::IntegrationSync | AuditEventType::IntegrationFailure => {
                EventCategory::Integration
            }
        }
    }
}

impl fmt::Display for AuditEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuditEventType {
    type Err = AuditError;

    /// Parse a wire name into an event type.
    ///
    /// This is the validation boundary for untyped callers: an unknown name
    /// is rejected here, before the writer performs any side effect.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AuditEventType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| AuditError::InvalidEventType {
                name: s.to_string(),
            })
    }
}
