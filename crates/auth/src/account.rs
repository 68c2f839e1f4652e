use serde::{Deserialize, Serialize};

use storefront_core::{Entity, UserId};

use crate::Role;

/// The admin identity shown in the panel header once logged in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminAccount {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub avatar_url: String,
    pub role: Role,
}

impl AdminAccount {
    /// Account with the `admin` role and an initials avatar derived from `name`.
    pub fn admin(name: impl Into<String>, email: impl Into<String>) -> Self {
        let name = name.into();
        let avatar_url = format!(
            "https://ui-avatars.com/api/?name={}&background=random",
            name.split_whitespace().collect::<Vec<_>>().join("+")
        );
        Self {
            id: UserId::new(),
            name,
            email: email.into(),
            avatar_url,
            role: Role::admin(),
        }
    }
}

impl Entity for AdminAccount {
    type Id = UserId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
