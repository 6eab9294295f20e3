use super::{GatewayClient, GatewayRequest};
use crate::{
    common::{
        category::{Category, CreateCategoryParams},
        user::SessionUser,
        validation::validate_category,
    },
    frontend::utils::errors::FrontendResult,
};
use http::Method;

impl GatewayClient {
    pub async fn list_categories(&self) -> FrontendResult<Vec<Category>> {
        let req = GatewayRequest::rest(Method::GET, "categories")
            .query("select", "*")
            .query("order", "created_at.asc");
        self.get(req).await
    }

    /// Categories may be created anonymously; a signed in user's token is passed along so
    /// row policies can see who did it.
    pub async fn create_category(
        &self,
        params: &CreateCategoryParams,
        user: Option<&SessionUser>,
    ) -> FrontendResult<()> {
        validate_category(&params.name)?;
        let mut req = GatewayRequest::rest(Method::POST, "categories")
            .json(params)?
            .minimal();
        if let Some(user) = user {
            req = req.user(user);
        }
        self.execute(req).await
    }
}
