// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request gateway: configuration, dispatch and response settlement

mod config;
#[allow(clippy::module_inception)]
mod gateway;
mod settle;

pub use config::{
    url_to_https, BuildMode, Environment, GatewayConfig, SessionExpiryMode, ENV_BASE_URL,
    ENV_MODE, ENV_PAGE_URL, ENV_TIMEOUT_SECS,
};
pub use gateway::{GatewayBuilder, RequestGateway};
pub use settle::{Reply, ResponseHandler, Settlement};
