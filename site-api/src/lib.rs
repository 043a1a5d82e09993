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

//! Block-rendered marketing site server library.
//!
//! This crate provides the Axum router, application state, block renderers
//! and the outbound clients (CMS, Google Places, mailing list). The binary
//! entry point (`main.rs`) is a thin wrapper that calls into this library.

pub mod cache;
pub mod cms;
pub mod config;
pub mod error;
pub mod newsletter;
pub mod render;
pub mod reviews;
pub mod routes;
pub mod state;
pub mod webhook;
