use crate::common::validation::ValidationError;
use leptos::prelude::*;
use log::warn;
use serde::{Deserialize, Serialize};
use std::{error::Error, fmt::Display};

pub type FrontendResult<T> = Result<T, FrontendError>;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum FrontendError {
    /// Anything that went wrong talking to the gateway: network, auth, validation on the
    /// server side or an unexpected response
    Remote(String),
    /// A mutation was attempted without a signed in user
    NotAuthenticated,
    /// Input rejected locally before any request was made
    Invalid(String),
}

impl FrontendError {
    pub fn new(message: impl Into<String>) -> Self {
        Self::Remote(message.into())
    }

    pub fn message(&self) -> String {
        self.to_string()
    }
}

pub trait FrontendResultExt<T> {
    fn error_popup<F>(self, on_success: F)
    where
        F: FnOnce(T);
}

impl<T> FrontendResultExt<T> for FrontendResult<T> {
    fn error_popup<F>(self, on_success: F)
    where
        F: FnOnce(T),
    {
        match self {
            Ok(o) => on_success(o),
            Err(e) => {
                warn!("{e}");
                if let Some(error_popup) = use_context::<WriteSignal<Option<String>>>() {
                    error_popup.set(Some(e.message()));
                }
            }
        }
    }
}

impl Display for FrontendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FrontendError::Remote(msg) | FrontendError::Invalid(msg) => write!(f, "{msg}"),
            FrontendError::NotAuthenticated => write!(f, "You must be logged in to do this"),
        }
    }
}

impl Error for FrontendError {}

impl From<ValidationError> for FrontendError {
    fn from(value: ValidationError) -> Self {
        Self::Invalid(value.to_string())
    }
}

#[cfg(feature = "ssr")]
impl From<reqwest::Error> for FrontendError {
    fn from(value: reqwest::Error) -> Self {
        Self::Remote(value.to_string())
    }
}
#[cfg(not(feature = "ssr"))]
impl From<gloo_net::Error> for FrontendError {
    fn from(value: gloo_net::Error) -> Self {
        Self::Remote(value.to_string())
    }
}

impl From<serde_json::Error> for FrontendError {
    fn from(value: serde_json::Error) -> Self {
        Self::Remote(value.to_string())
    }
}

impl From<url::ParseError> for FrontendError {
    fn from(value: url::ParseError) -> Self {
        Self::Remote(value.to_string())
    }
}
