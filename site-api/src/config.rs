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

//! Application configuration loaded from environment variables.

use std::env;
use std::time::Duration;

use url::Url;

use crate::render::RenderMode;

const DEFAULT_SITE_URL: &str = "http://localhost:3000";
const DEFAULT_PLACES_ENDPOINT: &str = "https://places.googleapis.com/v1/places";
const DEFAULT_RESEND_API_URL: &str = "https://api.resend.com";

/// Configuration for the site server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind the HTTP server (e.g. "0.0.0.0:3000").
    pub listen_addr: String,
    /// Development renders diagnostics for unknown blocks; production hides them.
    pub render_mode: RenderMode,
    /// Public origin of the site, used for canonical links.
    pub site_url: String,
    pub cms: CmsConfig,
    pub reviews: ReviewsConfig,
    /// Browser key for Google Maps embeds on location blocks.
    pub maps_embed_key: Option<String>,
    /// Mailing list configuration. `None` when `RESEND_API_KEY` or
    /// `RESEND_AUDIENCE_ID` is unset, which disables subscriptions.
    pub newsletter: Option<NewsletterConfig>,
}

/// Sanity content lake settings.
#[derive(Debug, Clone)]
pub struct CmsConfig {
    pub project_id: String,
    pub dataset: String,
    pub api_version: String,
    pub use_cdn: bool,
    /// Shared secret for webhook signatures. `None` accepts unsigned webhooks.
    pub revalidate_secret: Option<String>,
    /// How long fetched content is served from cache before refetching.
    pub cache_ttl: Duration,
}

impl CmsConfig {
    /// Base query URL, e.g. `https://abc123.apicdn.sanity.io/v2024-10-01/data/query/production`.
    pub fn query_url(&self) -> String {
        let host = if self.use_cdn { "apicdn" } else { "api" };
        format!(
            "https://{}.{host}.sanity.io/v{}/data/query/{}",
            self.project_id,
            self.api_version.trim_start_matches('v'),
            self.dataset
        )
    }
}

/// Google Places settings.
///
/// Everything is optional here: a missing key or place id is reported per
/// lookup as a reviews error rather than failing startup.
#[derive(Debug, Clone)]
pub struct ReviewsConfig {
    pub api_key: Option<String>,
    pub default_place_id: Option<String>,
    pub default_language: Option<String>,
    pub endpoint: String,
}

impl Default for ReviewsConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            default_place_id: None,
            default_language: None,
            endpoint: DEFAULT_PLACES_ENDPOINT.to_string(),
        }
    }
}

/// Resend audience settings.
#[derive(Debug, Clone)]
pub struct NewsletterConfig {
    pub api_key: String,
    pub audience_id: String,
    pub api_url: String,
}

fn optional(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Reduce a configured site address to its origin, adding `https://` when no
/// scheme is given (hosting platforms export bare hostnames).
pub fn normalize_site_url(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    let candidate = if value.starts_with("http") {
        value.to_string()
    } else {
        format!("https://{value}")
    };
    let url = Url::parse(&candidate).ok()?;
    match url.origin() {
        origin @ url::Origin::Tuple(..) => Some(origin.ascii_serialization()),
        url::Origin::Opaque(_) => None,
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Required
    /// - `SANITY_PROJECT_ID`
    ///
    /// # Optional
    /// - `LISTEN_ADDR` (default: `"0.0.0.0:3000"`)
    /// - `SITE_ENV` (`development` | `production`, default: `production`)
    /// - `NEXT_PUBLIC_SITE_URL` or `SITE_URL`, then `VERCEL_URL`
    /// - `SANITY_DATASET` (default: `"production"`), `SANITY_API_VERSION`
    ///   (default: `"2024-10-01"`), `SANITY_USE_CDN` (default: `true`),
    ///   `SANITY_REVALIDATE_SECRET`, `CMS_CACHE_TTL_SECS` (default: `60`)
    /// - Reviews: `GOOGLE_PLACES_API_KEY`, `GOOGLE_PLACES_PLACE_ID`,
    ///   `GOOGLE_PLACES_LANGUAGE`, `GOOGLE_PLACES_ENDPOINT`
    /// - Maps: `GOOGLE_MAPS_EMBED_KEY` or `NEXT_PUBLIC_GOOGLE_MAPS_API_KEY`
    /// - Newsletter: `RESEND_API_KEY`, `RESEND_AUDIENCE_ID`, `RESEND_API_URL`
    pub fn from_env() -> Result<Self, String> {
        let project_id = optional("SANITY_PROJECT_ID")
            .ok_or("SANITY_PROJECT_ID environment variable is required")?;

        let listen_addr = env::var("LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let render_mode = match optional("SITE_ENV").as_deref() {
            None | Some("production") => RenderMode::Production,
            Some("development") => RenderMode::Development,
            Some(other) => return Err(format!("SITE_ENV must be development or production, got {other}")),
        };

        let site_url = optional("NEXT_PUBLIC_SITE_URL")
            .or_else(|| optional("SITE_URL"))
            .and_then(|v| normalize_site_url(&v))
            .or_else(|| optional("VERCEL_URL").and_then(|v| normalize_site_url(&v)))
            .unwrap_or_else(|| DEFAULT_SITE_URL.to_string());

        let use_cdn = match optional("SANITY_USE_CDN").as_deref() {
            None | Some("true") | Some("1") => true,
            Some("false") | Some("0") => false,
            Some(_) => return Err("SANITY_USE_CDN must be true or false".to_string()),
        };
        let cache_ttl_secs = optional("CMS_CACHE_TTL_SECS")
            .unwrap_or_else(|| "60".to_string())
            .parse::<u64>()
            .map_err(|_| "CMS_CACHE_TTL_SECS must be a valid integer")?;

        let cms = CmsConfig {
            project_id,
            dataset: optional("SANITY_DATASET").unwrap_or_else(|| "production".to_string()),
            api_version: optional("SANITY_API_VERSION").unwrap_or_else(|| "2024-10-01".to_string()),
            use_cdn,
            revalidate_secret: optional("SANITY_REVALIDATE_SECRET"),
            cache_ttl: Duration::from_secs(cache_ttl_secs),
        };

        let reviews = ReviewsConfig {
            api_key: optional("GOOGLE_PLACES_API_KEY"),
            default_place_id: optional("GOOGLE_PLACES_PLACE_ID"),
            default_language: optional("GOOGLE_PLACES_LANGUAGE"),
            endpoint: optional("GOOGLE_PLACES_ENDPOINT")
                .unwrap_or_else(|| DEFAULT_PLACES_ENDPOINT.to_string()),
        };

        let maps_embed_key =
            optional("GOOGLE_MAPS_EMBED_KEY").or_else(|| optional("NEXT_PUBLIC_GOOGLE_MAPS_API_KEY"));

        let newsletter = match (optional("RESEND_API_KEY"), optional("RESEND_AUDIENCE_ID")) {
            (Some(api_key), Some(audience_id)) => Some(NewsletterConfig {
                api_key,
                audience_id,
                api_url: optional("RESEND_API_URL")
                    .unwrap_or_else(|| DEFAULT_RESEND_API_URL.to_string()),
            }),
            _ => None,
        };

        Ok(Self {
            listen_addr,
            render_mode,
            site_url,
            cms,
            reviews,
            maps_embed_key,
            newsletter,
        })
    }
}
