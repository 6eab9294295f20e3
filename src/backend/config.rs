use crate::{
    backend::utils::error::BackendResult,
    common::DEFAULT_IMAGE_BUCKET,
    frontend::api::GatewayConfig,
};
use config::Config;
use doku::Document;
use serde::Deserialize;
use smart_default::SmartDefault;
use std::net::SocketAddr;

#[derive(Debug, Deserialize, PartialEq, Eq, Clone, Document, SmartDefault)]
#[serde(default)]
#[serde(deny_unknown_fields)]
pub struct ResepConfig {
    /// Address where the web server listens
    #[default(SocketAddr::from(([127, 0, 0, 1], 3000)))]
    #[doku(as = "String", example = "127.0.0.1:3000")]
    pub bind: SocketAddr,
    /// Backend-as-a-service which stores posts, comments, votes and images
    pub gateway: ResepConfigGateway,
}

impl ResepConfig {
    pub fn read() -> BackendResult<Self> {
        let config = Config::builder()
            .add_source(config::File::with_name("config.toml").required(false))
            // Cant use _ as separator due to https://github.com/mehcode/config-rs/issues/391
            .add_source(config::Environment::with_prefix("RESEP").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

#[derive(Debug, Deserialize, PartialEq, Eq, Clone, Document, SmartDefault)]
#[serde(default)]
#[serde(deny_unknown_fields)]
pub struct ResepConfigGateway {
    /// Base url of the project, without any path
    #[default("http://localhost:54321")]
    #[doku(example = "https://abcdefgh.supabase.co")]
    pub url: String,
    /// Public key for anonymous access. It is sent to every browser, so never put the
    /// service role key here.
    #[default("")]
    #[doku(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub anon_key: String,
    /// Storage bucket for recipe images, must allow public reads
    #[default("post-images")]
    #[doku(example = "post-images")]
    pub image_bucket: String,
}

impl From<ResepConfigGateway> for GatewayConfig {
    fn from(value: ResepConfigGateway) -> Self {
        GatewayConfig {
            url: value.url,
            anon_key: value.anon_key,
            image_bucket: value.image_bucket,
        }
    }
}
