//! User entity <-> model mapper

use clip_core::entities::User;
use clip_core::value_objects::Snowflake;

use crate::models::UserModel;

/// Convert UserModel to User entity (password hash is dropped)
impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: Snowflake::new(model.id),
            username: model.username,
            display_name: model.display_name,
            avatar: model.avatar,
            bio: model.bio,
            verified: model.verified,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
