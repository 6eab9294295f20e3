use super::{require_user, GatewayClient, GatewayRequest};
use crate::{
    common::{
        newtypes::{CategoryId, PostId},
        post::{image_object_path, CreatePostParams, ImageUpload, Post},
        user::SessionUser,
        validation::{validate_post, ValidationError},
    },
    frontend::utils::errors::FrontendResult,
};
use chrono::Utc;
use http::Method;
use log::info;
use serde_json::json;

impl GatewayClient {
    /// All posts including like and comment counts, computed by a stored procedure.
    pub async fn list_posts(&self) -> FrontendResult<Vec<Post>> {
        let req = GatewayRequest::new(Method::POST, &["rest", "v1", "rpc", "get_posts_with_counts"])
            .json(&json!({}))?;
        self.get(req).await
    }

    pub async fn get_post(&self, id: PostId) -> FrontendResult<Post> {
        let req = GatewayRequest::rest(Method::GET, "posts")
            .query("select", "*")
            .eq("id", id)
            .header("accept", "application/vnd.pgrst.object+json");
        self.get(req).await
    }

    /// Uploads the image, then stores the post pointing at its public url.
    pub async fn create_post(
        &self,
        title: String,
        content: String,
        category_id: Option<CategoryId>,
        image: Option<ImageUpload>,
        user: Option<&SessionUser>,
    ) -> FrontendResult<()> {
        let user = require_user(user)?;
        validate_post(&title, &content, image.is_some())?;
        let Some(image) = image else {
            return Err(ValidationError::MissingImage.into());
        };
        let path = image_object_path(&title, Utc::now(), &image.file_name);
        self.upload_image(&path, image, user).await?;
        let params = CreatePostParams {
            title,
            content,
            image_url: self.public_image_url(&path)?,
            avatar_url: user.avatar_url.clone(),
            category_id,
        };
        let req = GatewayRequest::rest(Method::POST, "posts")
            .json(&params)?
            .minimal()
            .user(user);
        self.execute(req).await
    }

    pub async fn upload_image(
        &self,
        path: &str,
        image: ImageUpload,
        user: &SessionUser,
    ) -> FrontendResult<()> {
        info!("Uploading image {path}");
        let bucket = self.config.image_bucket.as_str();
        let req = GatewayRequest::new(Method::POST, &["storage", "v1", "object", bucket, path])
            .bytes(image.content_type(), image.bytes)
            .user(user);
        self.execute(req).await
    }

    pub fn public_image_url(&self, path: &str) -> FrontendResult<String> {
        let segments: Vec<String> = ["storage", "v1", "object", "public"]
            .into_iter()
            .map(str::to_string)
            .chain([self.config.image_bucket.clone(), path.to_string()])
            .collect();
        Ok(self.request_url(&segments, &[])?.to_string())
    }
}

#[cfg(test)]
mod test {
    use crate::{
        common::post::ImageUpload,
        frontend::{
            api::test::client,
            utils::errors::{FrontendError, FrontendResult},
        },
    };

    #[test]
    fn test_public_image_url() -> FrontendResult<()> {
        assert_eq!(
            "https://resep.supabase.co/storage/v1/object/public/post-images/Rendang-1-r.jpg",
            client().public_image_url("Rendang-1-r.jpg")?
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_create_post_checks_before_upload() {
        let image = ImageUpload {
            file_name: "r.jpg".to_string(),
            bytes: vec![1, 2, 3],
        };
        let res = client()
            .create_post(
                "Rendang".to_string(),
                "Slow cook".to_string(),
                None,
                Some(image),
                None,
            )
            .await;
        assert_eq!(Err(FrontendError::NotAuthenticated), res);
    }
}
