// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request and response interception

mod interceptor_trait;

pub use interceptor_trait::{
    AuthHeaderInjector, InterceptAction, InterceptorChain, RequestInterceptor, RequestLogger,
    TIMESTAMP_HEADER_VALUE,
};
