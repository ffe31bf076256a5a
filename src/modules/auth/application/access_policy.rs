use crate::auth::application::domain::{Capability, Principal, Role};
use crate::shared::config::{parsed_or, ConfigError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AccessDenied {
    #[error("Authentication required")]
    Unauthenticated,

    #[error("Missing capability: {0}")]
    Forbidden(Capability),
}

/// Capability predicate evaluated before every user-resource handler.
///
/// Admins hold every capability. Members may view users and act on their
/// own account. Anonymous callers may only create, and only while open
/// registration is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessPolicy {
    open_registration: bool,
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self {
            open_registration: true,
        }
    }
}

impl AccessPolicy {
    pub fn new(open_registration: bool) -> Self {
        Self { open_registration }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let open_registration = parsed_or::<bool>("USERS_OPEN_REGISTRATION", true)?;
        Ok(Self { open_registration })
    }

    pub fn open_registration(&self) -> bool {
        self.open_registration
    }

    pub fn requires_authentication(&self, capability: Capability) -> bool {
        !(capability == Capability::CreateUsers && self.open_registration)
    }

    /// `target` is the id of the user the action applies to, when there is one.
    pub fn authorize(
        &self,
        principal: Option<&Principal>,
        capability: Capability,
        target: Option<i64>,
    ) -> Result<(), AccessDenied> {
        let principal = match principal {
            Some(p) => p,
            None if self.requires_authentication(capability) => {
                return Err(AccessDenied::Unauthenticated)
            }
            None => return Ok(()),
        };

        if Self::role_grants(principal, capability, target) {
            Ok(())
        } else {
            Err(AccessDenied::Forbidden(capability))
        }
    }

    fn role_grants(principal: &Principal, capability: Capability, target: Option<i64>) -> bool {
        match principal.role {
            Role::Admin => true,
            Role::Member => match capability {
                Capability::ViewUsers | Capability::CreateUsers => true,
                Capability::UpdateUsers | Capability::DeleteUsers => {
                    target == Some(principal.user_id)
                }
                Capability::RestoreUsers => false,
            },
        }
    }
}
