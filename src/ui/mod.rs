// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Presentation capabilities injected into the gateway
//!
//! The gateway never draws anything itself: it hands error notices to a
//! [`Notifier`] and route changes to a [`Navigator`].

mod notice;
mod router;

pub use notice::{ChannelNotifier, LogNotifier, Notice, NoticeText, Notifier};
pub use router::{MemoryRouter, Navigator, ROOT_ROUTE};
