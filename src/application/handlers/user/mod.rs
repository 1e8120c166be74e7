//! User directory and follow graph handlers.

mod delete_user;
mod details;
mod follow_user;
mod get_closest_users;
mod get_user;
mod list_follows;
mod search_users;
mod set_user_access;
mod unfollow_user;
mod update_user;

pub use delete_user::{DeleteUserCommand, DeleteUserHandler};
pub use details::UserDetails;
pub use follow_user::{FollowUserCommand, FollowUserHandler, FollowUserResult};
pub use get_closest_users::{GetClosestUsersHandler, GetClosestUsersQuery, GetClosestUsersResult};
pub use get_user::{GetUserHandler, GetUserQuery, GetUserResult};
pub use list_follows::{FollowDirection, ListFollowsHandler, ListFollowsQuery, ListFollowsResult};
pub use search_users::{SearchUsersHandler, SearchUsersQuery, SearchUsersResult};
pub use set_user_access::{
    DisableUserHandler, EnableUserHandler, SetUserAccessCommand, SetUserAccessResult,
};
pub use unfollow_user::{UnfollowUserCommand, UnfollowUserHandler, UnfollowUserResult};
pub use update_user::{UpdateUserCommand, UpdateUserHandler, UpdateUserResult};
