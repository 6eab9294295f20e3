use super::{require_user, GatewayClient, GatewayRequest};
use crate::{
    common::{
        newtypes::PostId,
        user::SessionUser,
        vote::{CreateVoteParams, Vote, VoteChange, VoteValue},
    },
    frontend::utils::errors::FrontendResult,
};
use http::Method;
use serde_json::json;

impl GatewayClient {
    pub async fn list_votes(&self, post_id: PostId) -> FrontendResult<Vec<Vote>> {
        let req = GatewayRequest::rest(Method::GET, "votes")
            .query("select", "*")
            .eq("post_id", post_id);
        self.get(req).await
    }

    /// Like or dislike a post. Repeating the user's current vote withdraws it.
    pub async fn vote(
        &self,
        post_id: PostId,
        value: VoteValue,
        user: Option<&SessionUser>,
    ) -> FrontendResult<()> {
        let user = require_user(user)?;
        let req = GatewayRequest::rest(Method::GET, "votes")
            .query("select", "*")
            .eq("post_id", post_id)
            .eq("user_id", user.id)
            .user(user);
        let existing: Vec<Vote> = self.get(req).await?;

        let req = match VoteChange::plan(existing.first(), value) {
            VoteChange::Insert(vote) => {
                let params = CreateVoteParams {
                    post_id,
                    user_id: user.id,
                    vote,
                };
                GatewayRequest::rest(Method::POST, "votes").json(&params)?
            }
            VoteChange::Update(id, vote) => GatewayRequest::rest(Method::PATCH, "votes")
                .eq("id", id)
                .json(&json!({ "vote": vote }))?,
            VoteChange::Delete(id) => GatewayRequest::rest(Method::DELETE, "votes").eq("id", id),
        };
        self.execute(req.minimal().user(user)).await
    }
}
