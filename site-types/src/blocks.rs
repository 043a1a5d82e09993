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

//! CMS page blocks.
//!
//! A page is an ordered list of blocks. Every block carries a `_type`
//! discriminant and a `_key` that is unique within its page. Known
//! discriminants decode into a typed [`BlockBody`] variant; anything else
//! becomes [`BlockBody::Unknown`] so a single unrecognised block never fails
//! the page.
//!
//! GROQ projections return `null` for fields an editor never filled in, so
//! every field here is either an `Option` or a collection that treats `null`
//! as empty.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::reviews::{MinimumRating, SortOrder};

/// Deserialize `null` (or a missing field, with `#[serde(default)]`) as `T::default()`.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ---------------------------------------------------------------------------
// Tags
// ---------------------------------------------------------------------------

/// Discriminant of every block type the site knows how to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BlockTag {
    Hero1,
    Hero2,
    HeroFull,
    SectionHeader,
    LottieAnimation,
    SplitRow,
    GridRow,
    Carousel1,
    Carousel2,
    ReviewsCarousel,
    TimelineRow,
    Cta1,
    LogoCloud1,
    Faqs,
    FormNewsletter,
    FormContact,
    FormContactMap,
    LocationMap,
    AllPosts,
    MenuSection,
}

impl BlockTag {
    /// Every known tag, in CMS declaration order.
    pub const ALL: [BlockTag; 20] = [
        BlockTag::Hero1,
        BlockTag::Hero2,
        BlockTag::HeroFull,
        BlockTag::SectionHeader,
        BlockTag::LottieAnimation,
        BlockTag::SplitRow,
        BlockTag::GridRow,
        BlockTag::Carousel1,
        BlockTag::Carousel2,
        BlockTag::ReviewsCarousel,
        BlockTag::TimelineRow,
        BlockTag::Cta1,
        BlockTag::LogoCloud1,
        BlockTag::Faqs,
        BlockTag::FormNewsletter,
        BlockTag::FormContact,
        BlockTag::FormContactMap,
        BlockTag::LocationMap,
        BlockTag::AllPosts,
        BlockTag::MenuSection,
    ];

    /// The `_type` string used on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            BlockTag::Hero1 => "hero-1",
            BlockTag::Hero2 => "hero-2",
            BlockTag::HeroFull => "hero-full",
            BlockTag::SectionHeader => "section-header",
            BlockTag::LottieAnimation => "lottie-animation",
            BlockTag::SplitRow => "split-row",
            BlockTag::GridRow => "grid-row",
            BlockTag::Carousel1 => "carousel-1",
            BlockTag::Carousel2 => "carousel-2",
            BlockTag::ReviewsCarousel => "reviews-carousel",
            BlockTag::TimelineRow => "timeline-row",
            BlockTag::Cta1 => "cta-1",
            BlockTag::LogoCloud1 => "logo-cloud-1",
            BlockTag::Faqs => "faqs",
            BlockTag::FormNewsletter => "form-newsletter",
            BlockTag::FormContact => "form-contact",
            BlockTag::FormContactMap => "form-contact-map",
            BlockTag::LocationMap => "location-map",
            BlockTag::AllPosts => "all-posts",
            BlockTag::MenuSection => "menu-section",
        }
    }
}

impl fmt::Display for BlockTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned by [`BlockTag::from_str`] for a `_type` outside the known set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown block type: {0}")]
pub struct UnknownTag(pub String);

impl FromStr for BlockTag {
    type Err = UnknownTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BlockTag::ALL
            .into_iter()
            .find(|tag| tag.as_str() == s)
            .ok_or_else(|| UnknownTag(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Shared field types
// ---------------------------------------------------------------------------

/// Vertical spacing toggles shared by most sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectionPadding {
    #[serde(default, deserialize_with = "null_as_default")]
    pub top: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub bottom: bool,
}

/// A resolved CMS link. `href` is already computed by the page query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub title: Option<String>,
    pub href: Option<String>,
    /// Open in a new tab.
    #[serde(default, deserialize_with = "null_as_default")]
    pub target: bool,
    pub button_variant: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageMetadata {
    pub lqip: Option<String>,
    pub dimensions: Option<Dimensions>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAsset {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub url: Option<String>,
    pub mime_type: Option<String>,
    pub metadata: Option<ImageMetadata>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub asset: Option<ImageAsset>,
    pub alt: Option<String>,
}

impl Image {
    /// Asset URL, if the asset reference resolved.
    pub fn url(&self) -> Option<&str> {
        self.asset.as_ref()?.url.as_deref()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileAsset {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub url: Option<String>,
    pub mime_type: Option<String>,
    pub original_filename: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileRef {
    pub asset: Option<FileAsset>,
}

impl FileRef {
    pub fn url(&self) -> Option<&str> {
        self.asset.as_ref()?.url.as_deref()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortableTextSpan {
    pub text: Option<String>,
}

/// One paragraph-level node of CMS rich text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortableTextBlock {
    #[serde(rename = "_type")]
    pub kind: Option<String>,
    pub style: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub children: Vec<PortableTextSpan>,
}

impl PortableTextBlock {
    /// Concatenated text of every span.
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|span| span.text.as_deref())
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Block fields
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hero1Block {
    pub tag_line: Option<String>,
    pub title: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub body: Vec<PortableTextBlock>,
    pub image: Option<Image>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hero2Block {
    pub tag_line: Option<String>,
    pub title: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub body: Vec<PortableTextBlock>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroFullBlock {
    pub tag_line: Option<String>,
    pub title: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub body: Vec<PortableTextBlock>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub images: Vec<Image>,
    pub image: Option<Image>,
    pub height: Option<String>,
    pub overlay: Option<bool>,
    pub frosted: Option<bool>,
    pub overlay_strength: Option<f64>,
    pub content_alignment: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionHeaderBlock {
    pub padding: Option<SectionPadding>,
    pub color_variant: Option<String>,
    pub section_width: Option<String>,
    pub stack_align: Option<String>,
    pub tag_line: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LottieAnimationBlock {
    pub padding: Option<SectionPadding>,
    pub color_variant: Option<String>,
    pub section_width: Option<String>,
    pub animation_align: Option<String>,
    pub animation_size: Option<String>,
    pub title: Option<String>,
    pub aria_label: Option<String>,
    pub animation: Option<FileRef>,
    pub animation_dark: Option<FileRef>,
}

/// A column inside a split row. The CMS has several column shapes; they
/// share enough fields that one struct covers them all.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitColumn {
    #[serde(rename = "_type")]
    pub kind: Option<String>,
    pub tag_line: Option<String>,
    pub title: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub body: Vec<PortableTextBlock>,
    pub image: Option<Image>,
    pub link: Option<Link>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub list: Vec<SplitListItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitListItem {
    pub tag_line: Option<String>,
    pub title: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub body: Vec<PortableTextBlock>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitRowBlock {
    pub padding: Option<SectionPadding>,
    pub color_variant: Option<String>,
    pub section_id: Option<String>,
    pub no_gap: Option<bool>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub split_columns: Vec<SplitColumn>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridCard {
    #[serde(rename = "_key")]
    pub key: Option<String>,
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub image: Option<Image>,
    pub link: Option<Link>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridRowBlock {
    pub padding: Option<SectionPadding>,
    pub color_variant: Option<String>,
    pub grid_columns: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub columns: Vec<GridCard>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Carousel1Block {
    pub padding: Option<SectionPadding>,
    pub color_variant: Option<String>,
    pub size: Option<String>,
    pub indicators: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub name: Option<String>,
    pub title: Option<String>,
    pub image: Option<Image>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub body: Vec<PortableTextBlock>,
    pub rating: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Carousel2Block {
    pub padding: Option<SectionPadding>,
    pub color_variant: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub testimonial: Vec<Testimonial>,
}

/// Block that embeds third-party reviews for a place.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewsCarouselBlock {
    pub padding: Option<SectionPadding>,
    pub color_variant: Option<String>,
    pub section_id: Option<String>,
    pub eyebrow: Option<String>,
    pub heading: Option<String>,
    pub intro: Option<String>,
    /// Overrides the site-wide place id when set.
    pub place_id: Option<String>,
    pub language_code: Option<String>,
    pub maximum_reviews: Option<i64>,
    pub minimum_rating: Option<MinimumRating>,
    pub sort_order: Option<SortOrder>,
    pub cta: Option<Link>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
    pub tag_line: Option<String>,
    pub title: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub body: Vec<PortableTextBlock>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineRowBlock {
    pub padding: Option<SectionPadding>,
    pub color_variant: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub timelines: Vec<TimelineEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cta1Block {
    pub padding: Option<SectionPadding>,
    pub color_variant: Option<String>,
    pub section_width: Option<String>,
    pub stack_align: Option<String>,
    pub tag_line: Option<String>,
    pub title: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub body: Vec<PortableTextBlock>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoCloud1Block {
    pub padding: Option<SectionPadding>,
    pub color_variant: Option<String>,
    pub title: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Faq {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub title: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub body: Vec<PortableTextBlock>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaqsBlock {
    pub padding: Option<SectionPadding>,
    pub color_variant: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub faqs: Vec<Faq>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormNewsletterBlock {
    pub padding: Option<SectionPadding>,
    pub color_variant: Option<String>,
    pub stack_align: Option<String>,
    pub consent_text: Option<String>,
    pub button_text: Option<String>,
    pub success_message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormContactBlock {
    pub padding: Option<SectionPadding>,
    pub color_variant: Option<String>,
    pub heading: Option<String>,
    pub body: Option<String>,
    pub formspree_form_id: Option<String>,
    pub submit_button_label: Option<String>,
    pub success_message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormContactMapBlock {
    pub padding: Option<SectionPadding>,
    pub color_variant: Option<String>,
    pub heading: Option<String>,
    pub body: Option<String>,
    pub formspree_form_id: Option<String>,
    pub submit_button_label: Option<String>,
    pub success_message: Option<String>,
    pub location_name: Option<String>,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub map_zoom: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationMapBlock {
    pub padding: Option<SectionPadding>,
    pub color_variant: Option<String>,
    pub location_label: Option<String>,
    pub location_name: Option<String>,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub map_zoom: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllPostsBlock {
    pub padding: Option<SectionPadding>,
    pub color_variant: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    #[serde(rename = "_key")]
    pub key: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub dietary: Vec<String>,
    pub item_image: Option<Image>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuCategory {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<MenuItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuSectionBlock {
    pub padding: Option<SectionPadding>,
    pub eyebrow: Option<String>,
    pub title: Option<String>,
    pub section_id: Option<String>,
    pub intro: Option<String>,
    pub display_mode: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub menu_images: Vec<Image>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub categories: Vec<MenuCategory>,
}

// ---------------------------------------------------------------------------
// Block
// ---------------------------------------------------------------------------

/// Typed fields of a block, one variant per [`BlockTag`].
#[derive(Debug, Clone, PartialEq)]
pub enum BlockBody {
    Hero1(Hero1Block),
    Hero2(Hero2Block),
    HeroFull(HeroFullBlock),
    SectionHeader(SectionHeaderBlock),
    LottieAnimation(LottieAnimationBlock),
    SplitRow(SplitRowBlock),
    GridRow(GridRowBlock),
    Carousel1(Carousel1Block),
    Carousel2(Carousel2Block),
    ReviewsCarousel(ReviewsCarouselBlock),
    TimelineRow(TimelineRowBlock),
    Cta1(Cta1Block),
    LogoCloud1(LogoCloud1Block),
    Faqs(FaqsBlock),
    FormNewsletter(FormNewsletterBlock),
    FormContact(FormContactBlock),
    FormContactMap(FormContactMapBlock),
    LocationMap(LocationMapBlock),
    AllPosts(AllPostsBlock),
    MenuSection(MenuSectionBlock),
    /// A `_type` this build has no shape for.
    Unknown { tag: String },
}

impl BlockBody {
    /// The known tag, or `None` for [`BlockBody::Unknown`].
    pub fn tag(&self) -> Option<BlockTag> {
        let tag = match self {
            BlockBody::Hero1(_) => BlockTag::Hero1,
            BlockBody::Hero2(_) => BlockTag::Hero2,
            BlockBody::HeroFull(_) => BlockTag::HeroFull,
            BlockBody::SectionHeader(_) => BlockTag::SectionHeader,
            BlockBody::LottieAnimation(_) => BlockTag::LottieAnimation,
            BlockBody::SplitRow(_) => BlockTag::SplitRow,
            BlockBody::GridRow(_) => BlockTag::GridRow,
            BlockBody::Carousel1(_) => BlockTag::Carousel1,
            BlockBody::Carousel2(_) => BlockTag::Carousel2,
            BlockBody::ReviewsCarousel(_) => BlockTag::ReviewsCarousel,
            BlockBody::TimelineRow(_) => BlockTag::TimelineRow,
            BlockBody::Cta1(_) => BlockTag::Cta1,
            BlockBody::LogoCloud1(_) => BlockTag::LogoCloud1,
            BlockBody::Faqs(_) => BlockTag::Faqs,
            BlockBody::FormNewsletter(_) => BlockTag::FormNewsletter,
            BlockBody::FormContact(_) => BlockTag::FormContact,
            BlockBody::FormContactMap(_) => BlockTag::FormContactMap,
            BlockBody::LocationMap(_) => BlockTag::LocationMap,
            BlockBody::AllPosts(_) => BlockTag::AllPosts,
            BlockBody::MenuSection(_) => BlockTag::MenuSection,
            BlockBody::Unknown { .. } => return None,
        };
        Some(tag)
    }

    /// The wire `_type`, known or not.
    pub fn tag_name(&self) -> &str {
        match self {
            BlockBody::Unknown { tag } => tag,
            known => known.tag().map(BlockTag::as_str).unwrap_or_default(),
        }
    }

    fn decode(tag: BlockTag, value: Value) -> Result<Self, serde_json::Error> {
        Ok(match tag {
            BlockTag::Hero1 => BlockBody::Hero1(serde_json::from_value(value)?),
            BlockTag::Hero2 => BlockBody::Hero2(serde_json::from_value(value)?),
            BlockTag::HeroFull => BlockBody::HeroFull(serde_json::from_value(value)?),
            BlockTag::SectionHeader => BlockBody::SectionHeader(serde_json::from_value(value)?),
            BlockTag::LottieAnimation => {
                BlockBody::LottieAnimation(serde_json::from_value(value)?)
            }
            BlockTag::SplitRow => BlockBody::SplitRow(serde_json::from_value(value)?),
            BlockTag::GridRow => BlockBody::GridRow(serde_json::from_value(value)?),
            BlockTag::Carousel1 => BlockBody::Carousel1(serde_json::from_value(value)?),
            BlockTag::Carousel2 => BlockBody::Carousel2(serde_json::from_value(value)?),
            BlockTag::ReviewsCarousel => {
                BlockBody::ReviewsCarousel(serde_json::from_value(value)?)
            }
            BlockTag::TimelineRow => BlockBody::TimelineRow(serde_json::from_value(value)?),
            BlockTag::Cta1 => BlockBody::Cta1(serde_json::from_value(value)?),
            BlockTag::LogoCloud1 => BlockBody::LogoCloud1(serde_json::from_value(value)?),
            BlockTag::Faqs => BlockBody::Faqs(serde_json::from_value(value)?),
            BlockTag::FormNewsletter => BlockBody::FormNewsletter(serde_json::from_value(value)?),
            BlockTag::FormContact => BlockBody::FormContact(serde_json::from_value(value)?),
            BlockTag::FormContactMap => BlockBody::FormContactMap(serde_json::from_value(value)?),
            BlockTag::LocationMap => BlockBody::LocationMap(serde_json::from_value(value)?),
            BlockTag::AllPosts => BlockBody::AllPosts(serde_json::from_value(value)?),
            BlockTag::MenuSection => BlockBody::MenuSection(serde_json::from_value(value)?),
        })
    }
}

/// Errors raised while decoding a single block from CMS JSON.
#[derive(Debug, Error)]
pub enum BlockError {
    #[error("block is not a JSON object")]
    NotAnObject,

    #[error("block is missing `{0}`")]
    MissingField(&'static str),

    /// The tag is known but its fields do not match the expected shape.
    #[error("malformed `{tag}` block `{key}`: {source}")]
    Malformed {
        tag: BlockTag,
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// One section of a page.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// Unique within the page and stable across fetches.
    pub key: String,
    pub body: BlockBody,
}

impl Block {
    pub fn new(key: impl Into<String>, body: BlockBody) -> Self {
        Self {
            key: key.into(),
            body,
        }
    }

    /// A block whose `_type` this build does not recognise.
    pub fn unknown(tag: impl Into<String>, key: impl Into<String>) -> Self {
        Self::new(key, BlockBody::Unknown { tag: tag.into() })
    }

    pub fn tag(&self) -> Option<BlockTag> {
        self.body.tag()
    }

    pub fn tag_name(&self) -> &str {
        self.body.tag_name()
    }

    /// Decode a block from a CMS JSON object.
    pub fn from_value(value: Value) -> Result<Self, BlockError> {
        let object = value.as_object().ok_or(BlockError::NotAnObject)?;
        let tag = object
            .get("_type")
            .and_then(Value::as_str)
            .ok_or(BlockError::MissingField("_type"))?
            .to_string();
        let key = object
            .get("_key")
            .and_then(Value::as_str)
            .ok_or(BlockError::MissingField("_key"))?
            .to_string();

        let Ok(known) = tag.parse::<BlockTag>() else {
            return Ok(Self::unknown(tag, key));
        };

        let body = BlockBody::decode(known, value).map_err(|source| BlockError::Malformed {
            tag: known,
            key: key.clone(),
            source,
        })?;
        Ok(Self { key, body })
    }
}

impl<'de> Deserialize<'de> for Block {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Block::from_value(value).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Page documents
// ---------------------------------------------------------------------------

/// A CMS page: SEO metadata plus its ordered blocks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub noindex: bool,
    pub blocks: Vec<Block>,
}

/// Listing entry used by the `all-posts` block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    #[serde(rename = "_createdAt")]
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn every_tag_round_trips_through_its_wire_name() {
        for tag in BlockTag::ALL {
            assert_eq!(tag.as_str().parse::<BlockTag>(), Ok(tag));
        }
    }

    #[test]
    fn unknown_wire_name_is_rejected_by_from_str() {
        assert_eq!(
            "hero-9".parse::<BlockTag>(),
            Err(UnknownTag("hero-9".to_string()))
        );
    }

    #[test]
    fn decodes_known_block_with_null_fields() {
        let block = Block::from_value(json!({
            "_type": "section-header",
            "_key": "a1",
            "title": "Our story",
            "description": null,
            "padding": { "top": true, "bottom": null }
        }))
        .unwrap();

        assert_eq!(block.key, "a1");
        assert_eq!(block.tag(), Some(BlockTag::SectionHeader));
        let BlockBody::SectionHeader(header) = block.body else {
            panic!("expected section header");
        };
        assert_eq!(header.title.as_deref(), Some("Our story"));
        assert_eq!(header.description, None);
        assert_eq!(
            header.padding,
            Some(SectionPadding {
                top: true,
                bottom: false
            })
        );
    }

    #[test]
    fn null_collections_decode_as_empty() {
        let block = Block::from_value(json!({
            "_type": "faqs",
            "_key": "f",
            "faqs": null
        }))
        .unwrap();
        assert_eq!(block.body, BlockBody::Faqs(FaqsBlock::default()));
    }

    #[test]
    fn unknown_tag_decodes_as_unknown_body() {
        let block = Block::from_value(json!({
            "_type": "video-wall",
            "_key": "v1",
            "clips": [1, 2, 3]
        }))
        .unwrap();

        assert_eq!(block.tag(), None);
        assert_eq!(block.tag_name(), "video-wall");
        assert_eq!(block, Block::unknown("video-wall", "v1"));
    }

    #[test]
    fn missing_discriminant_is_an_error() {
        let err = Block::from_value(json!({ "_key": "k" })).unwrap_err();
        assert!(matches!(err, BlockError::MissingField("_type")));

        let err = Block::from_value(json!({ "_type": "faqs" })).unwrap_err();
        assert!(matches!(err, BlockError::MissingField("_key")));

        let err = Block::from_value(json!("faqs")).unwrap_err();
        assert!(matches!(err, BlockError::NotAnObject));
    }

    #[test]
    fn wrongly_typed_fields_are_reported_with_tag_and_key() {
        let err = Block::from_value(json!({
            "_type": "location-map",
            "_key": "map",
            "latitude": "north"
        }))
        .unwrap_err();

        match err {
            BlockError::Malformed { tag, key, .. } => {
                assert_eq!(tag, BlockTag::LocationMap);
                assert_eq!(key, "map");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn portable_text_joins_spans() {
        let block: PortableTextBlock = serde_json::from_value(json!({
            "_type": "block",
            "style": "normal",
            "children": [{ "text": "Fresh " }, { "text": null }, { "text": "bread" }]
        }))
        .unwrap();
        assert_eq!(block.text(), "Fresh bread");
    }

    #[test]
    fn block_list_deserializes_in_order() {
        let blocks: Vec<Block> = serde_json::from_value(json!([
            { "_type": "hero-1", "_key": "a", "title": "Hi" },
            { "_type": "unknown-x", "_key": "b" },
            { "_type": "faqs", "_key": "c", "faqs": [] }
        ]))
        .unwrap();

        let keys: Vec<&str> = blocks.iter().map(|b| b.key.as_str()).collect();
        assert_eq!(keys, ["a", "b", "c"]);
        assert!(matches!(blocks[1].body, BlockBody::Unknown { .. }));
    }
}
