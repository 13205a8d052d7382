use uuid::Uuid;

use crate::features::auth::model::{AuthenticatedUser, Role};

pub fn create_admin_user() -> AuthenticatedUser {
    AuthenticatedUser {
        id: Uuid::new_v4(),
        role: Role::Admin,
    }
}

pub fn create_member_user() -> AuthenticatedUser {
    AuthenticatedUser {
        id: Uuid::new_v4(),
        role: Role::Member,
    }
}
