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

//! HTML page routes.

use axum::{
    extract::{Path, State},
    http::Uri,
    response::{Html, IntoResponse, Redirect, Response},
};

use crate::error::AppError;
use crate::state::AppState;

const HOME_SLUG: &str = "index";
const VALID_SLUG_PATTERN: &str = "^[a-zA-Z0-9_-]+$";

fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug.len() <= 255
        && regex::Regex::new(VALID_SLUG_PATTERN).is_ok_and(|re| re.is_match(slug))
}

async fn render_slug(state: &AppState, slug: &str) -> Response {
    let page = match state.content.fetch_page(slug).await {
        Ok(Some(page)) => page,
        Ok(None) => return AppError::page_not_found(slug).into_html(),
        Err(err) => return AppError::from(err).into_html(),
    };
    let html = state.composer.compose(slug, &page).await;
    Html(html.into_string()).into_response()
}

/// GET /
pub async fn home(State(state): State<AppState>) -> Response {
    render_slug(&state, HOME_SLUG).await
}

/// GET /index
pub async fn index_redirect() -> Redirect {
    Redirect::permanent("/")
}

/// GET /{slug}
pub async fn page(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    if !is_valid_slug(&slug) {
        return AppError::page_not_found(&slug).into_html();
    }
    render_slug(&state, &slug).await
}

/// Anything no other route claims.
pub async fn not_found(uri: Uri) -> Response {
    AppError::page_not_found(uri.path().trim_start_matches('/')).into_html()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugs_are_single_safe_segments() {
        assert!(is_valid_slug("about-us"));
        assert!(is_valid_slug("menu_2025"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("../etc"));
        assert!(!is_valid_slug("caf\u{e9}"));
        assert!(!is_valid_slug(&"a".repeat(256)));
    }
}
