use reqwest::Method;
use reqwest::multipart::{Form, Part};
use serde_json::json;

use focal_types::api::{AvatarChange, MeData, ProfileUpdate, UpdatedProfile};
use focal_types::error::ApiError;

use crate::ApiClient;

impl ApiClient {
    /// `GET /api/me` — the viewer's profile and stats.
    pub async fn get_me(&self) -> Result<MeData, ApiError> {
        self.send(self.request(Method::GET, "/api/me")).await
    }

    /// `PATCH /api/me` — edit-profile save. Uploading a new avatar switches
    /// the request to multipart; keeping the current one sends plain JSON
    /// with the existing URL.
    pub async fn update_me(&self, update: ProfileUpdate) -> Result<UpdatedProfile, ApiError> {
        let builder = self.request(Method::PATCH, "/api/me");

        let builder = match update.avatar {
            AvatarChange::Upload { bytes, filename } => {
                let form = Form::new()
                    .text("name", update.name)
                    .text("username", update.username)
                    .text("phone", update.phone)
                    .text("bio", update.bio)
                    .part("avatar", Part::bytes(bytes).file_name(filename));
                builder.multipart(form)
            }
            AvatarChange::Keep(avatar_url) => builder.json(&json!({
                "name": update.name,
                "username": update.username,
                "phone": update.phone,
                "bio": update.bio,
                "avatarUrl": avatar_url,
            })),
        };

        self.send(builder).await
    }
}
