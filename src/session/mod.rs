// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Authentication token storage
//!
//! The gateway only reads the token, and clears it when the session expires.

mod token;

pub use token::{FileTokenStore, MemoryTokenStore, TokenStore};
