//! Object keys in the media bucket shared with the mobile and web clients.

use crate::domain::foundation::UserId;

/// Storage object key of a user's profile picture.
pub fn picture_object(user_id: &UserId) -> String {
    format!("profile_pictures/{}/profile.png", user_id)
}

/// Storage object key used when a user has no picture.
pub const DEFAULT_PICTURE_OBJECT: &str = "profile_pictures/default.png";

/// Storage object key of a user's certification video.
pub fn certification_video_object(user_id: &UserId) -> String {
    format!("certifications/{}/certification.mp4", user_id)
}

/// Joins a bucket base URL and an object key.
pub fn object_url(base_url: &str, object: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), object)
}
