//! The authorization gate — one declarative capability table.
//!
//! Every protected operation names a [`Capability`]; whether a role
//! holds it is decided here and nowhere else, so routes cannot drift
//! apart in their role checks. The gate runs strictly after token
//! validation and holds no data of its own.

use opsdeck_core::models::user::Role;

use crate::error::AuthError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Read access to the console: dashboards, lists, own
    /// notification settings, scheduling backups.
    ViewConsole,
    /// Create, update, and toggle alerts.
    ManageAlerts,
    /// Create users and change user status.
    ManageUsers,
    /// Mutate system settings.
    ManageSettings,
}

impl Capability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::ViewConsole => "view-console",
            Capability::ManageAlerts => "manage-alerts",
            Capability::ManageUsers => "manage-users",
            Capability::ManageSettings => "manage-settings",
        }
    }

    /// The capability table: which roles hold which capability.
    pub fn granted_to(self, role: Role) -> bool {
        match self {
            Capability::ViewConsole => true,
            Capability::ManageAlerts => matches!(role, Role::Admin | Role::Manager),
            Capability::ManageUsers | Capability::ManageSettings => matches!(role, Role::Admin),
        }
    }
}

/// Check a role against a required capability.
pub fn authorize(role: Role, capability: Capability) -> Result<(), AuthError> {
    if capability.granted_to(role) {
        Ok(())
    } else {
        Err(AuthError::Forbidden {
            capability: capability.as_str(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_role_can_view() {
        for role in [Role::Admin, Role::Manager, Role::User] {
            assert!(authorize(role, Capability::ViewConsole).is_ok());
        }
    }

    #[test]
    fn managers_handle_alerts_but_not_users() {
        assert!(authorize(Role::Manager, Capability::ManageAlerts).is_ok());
        assert!(authorize(Role::Manager, Capability::ManageUsers).is_err());
        assert!(authorize(Role::Manager, Capability::ManageSettings).is_err());
    }

    #[test]
    fn plain_users_only_view() {
        assert!(authorize(Role::User, Capability::ManageAlerts).is_err());
        assert!(authorize(Role::User, Capability::ManageUsers).is_err());
        assert!(authorize(Role::User, Capability::ManageSettings).is_err());
    }

    #[test]
    fn admin_holds_everything() {
        for cap in [
            Capability::ViewConsole,
            Capability::ManageAlerts,
            Capability::ManageUsers,
            Capability::ManageSettings,
        ] {
            assert!(authorize(Role::Admin, cap).is_ok());
        }
    }

    #[test]
    fn denial_names_the_capability() {
        let err = authorize(Role::User, Capability::ManageSettings).unwrap_err();
        match err {
            AuthError::Forbidden { capability } => assert_eq!(capability, "manage-settings"),
            other => panic!("expected Forbidden, got {other:?}"),
        }
    }
}
