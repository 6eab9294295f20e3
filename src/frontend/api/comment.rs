use super::{require_user, GatewayClient, GatewayRequest};
use crate::{
    common::{
        comment::{Comment, CreateCommentParams, EditCommentParams},
        newtypes::{CommentId, PostId},
        user::SessionUser,
        validation::validate_comment,
    },
    frontend::utils::errors::FrontendResult,
};
use http::Method;

impl GatewayClient {
    /// All comments of a post, oldest first.
    pub async fn list_comments(&self, post_id: PostId) -> FrontendResult<Vec<Comment>> {
        let req = GatewayRequest::rest(Method::GET, "comments")
            .query("select", "*")
            .eq("post_id", post_id)
            .query("order", "created_at.asc");
        self.get(req).await
    }

    pub async fn create_comment(
        &self,
        post_id: PostId,
        content: String,
        parent_comment_id: Option<CommentId>,
        user: Option<&SessionUser>,
    ) -> FrontendResult<()> {
        let user = require_user(user)?;
        validate_comment(&content)?;
        let params = CreateCommentParams {
            post_id,
            content,
            parent_comment_id,
            user_id: user.id,
            author: user.display_name().to_string(),
        };
        let req = GatewayRequest::rest(Method::POST, "comments")
            .json(&params)?
            .minimal()
            .user(user);
        self.execute(req).await
    }

    /// Only touches the comment if `user` wrote it. For anyone else the update silently
    /// matches no rows.
    pub async fn update_comment(
        &self,
        id: CommentId,
        content: String,
        user: Option<&SessionUser>,
    ) -> FrontendResult<()> {
        let user = require_user(user)?;
        validate_comment(&content)?;
        let req = GatewayRequest::rest(Method::PATCH, "comments")
            .eq("id", id)
            .eq("user_id", user.id)
            .json(&EditCommentParams { content })?
            .minimal()
            .user(user);
        self.execute(req).await
    }

    /// Same author scoping as [GatewayClient::update_comment].
    pub async fn delete_comment(
        &self,
        id: CommentId,
        user: Option<&SessionUser>,
    ) -> FrontendResult<()> {
        let user = require_user(user)?;
        let req = GatewayRequest::rest(Method::DELETE, "comments")
            .eq("id", id)
            .eq("user_id", user.id)
            .user(user);
        self.execute(req).await
    }
}
