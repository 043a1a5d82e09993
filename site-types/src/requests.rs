/*
 * Copyright 2025 Security Union LLC
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 */

//! Request types for the site's JSON API.
//!
//! Query parameters for `GET /api/reviews` reuse [`crate::ReviewQuery`].

use serde::{Deserialize, Serialize};

/// Request body for `POST /api/newsletter`.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct SubscribeRequest {
    /// Address to add to the mailing list. Validated server-side.
    #[serde(default)]
    pub email: Option<String>,
}
