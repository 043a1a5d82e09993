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

//! Block renderer registry and dispatcher.
//!
//! The standard registry is built from an exhaustive `match` over
//! [`BlockTag`], so a new tag without a renderer fails to compile. Blocks the
//! registry cannot serve (unknown tags, or tags left out of a custom
//! registry) become placeholders; the dispatcher never drops or reorders a
//! position.

use std::collections::HashMap;
use std::sync::Arc;

use site_types::{Block, BlockBody, BlockTag};

use super::blocks::{forms, hero, media, menu, posts, reviews, sections};
use super::{Markup, RenderContext, RenderOutput};

/// Converts one block into markup.
pub trait BlockRenderer: Send + Sync {
    fn render(&self, block: &Block, ctx: &RenderContext) -> Markup;
}

impl<F> BlockRenderer for F
where
    F: Fn(&Block, &RenderContext) -> Markup + Send + Sync,
{
    fn render(&self, block: &Block, ctx: &RenderContext) -> Markup {
        self(block, ctx)
    }
}

/// Reached only through a hand-written registration that maps a tag to
/// another tag's renderer.
fn mismatched(expected: BlockTag, block: &Block) -> Markup {
    tracing::warn!(
        expected = %expected,
        block_type = block.tag_name(),
        key = %block.key,
        "Renderer received a block of the wrong type"
    );
    Markup::empty()
}

macro_rules! typed {
    ($variant:ident, $view:path) => {
        Arc::new(|block: &Block, ctx: &RenderContext| match &block.body {
            BlockBody::$variant(fields) => $view(fields, &block.key, ctx),
            _ => mismatched(BlockTag::$variant, block),
        }) as Arc<dyn BlockRenderer>
    };
}

/// The built-in renderer for `tag`.
fn standard_renderer(tag: BlockTag) -> Arc<dyn BlockRenderer> {
    match tag {
        BlockTag::Hero1 => typed!(Hero1, hero::hero_1),
        BlockTag::Hero2 => typed!(Hero2, hero::hero_2),
        BlockTag::HeroFull => typed!(HeroFull, hero::hero_full),
        BlockTag::SectionHeader => typed!(SectionHeader, sections::section_header),
        BlockTag::LottieAnimation => typed!(LottieAnimation, media::lottie_animation),
        BlockTag::SplitRow => typed!(SplitRow, sections::split_row),
        BlockTag::GridRow => typed!(GridRow, sections::grid_row),
        BlockTag::Carousel1 => typed!(Carousel1, media::carousel_1),
        BlockTag::Carousel2 => typed!(Carousel2, media::carousel_2),
        BlockTag::ReviewsCarousel => typed!(ReviewsCarousel, reviews::reviews_carousel),
        BlockTag::TimelineRow => typed!(TimelineRow, sections::timeline_row),
        BlockTag::Cta1 => typed!(Cta1, sections::cta_1),
        BlockTag::LogoCloud1 => typed!(LogoCloud1, media::logo_cloud_1),
        BlockTag::Faqs => typed!(Faqs, sections::faqs),
        BlockTag::FormNewsletter => typed!(FormNewsletter, forms::form_newsletter),
        BlockTag::FormContact => typed!(FormContact, forms::form_contact),
        BlockTag::FormContactMap => typed!(FormContactMap, forms::form_contact_map),
        BlockTag::LocationMap => typed!(LocationMap, forms::location_map),
        BlockTag::AllPosts => typed!(AllPosts, posts::all_posts),
        BlockTag::MenuSection => typed!(MenuSection, menu::menu_section),
    }
}

/// Mapping from tag to renderer.
#[derive(Clone, Default)]
pub struct Registry {
    renderers: HashMap<BlockTag, Arc<dyn BlockRenderer>>,
}

impl Registry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Every known tag mapped to its built-in renderer.
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        for tag in BlockTag::ALL {
            registry.renderers.insert(tag, standard_renderer(tag));
        }
        registry
    }

    /// Register (or replace) the renderer for `tag`.
    pub fn register(&mut self, tag: BlockTag, renderer: impl BlockRenderer + 'static) -> &mut Self {
        self.renderers.insert(tag, Arc::new(renderer));
        self
    }

    pub fn get(&self, tag: BlockTag) -> Option<&dyn BlockRenderer> {
        self.renderers.get(&tag).map(|r| r.as_ref())
    }

    pub fn contains(&self, tag: BlockTag) -> bool {
        self.renderers.contains_key(&tag)
    }

    pub fn len(&self) -> usize {
        self.renderers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.renderers.is_empty()
    }
}

/// Renders block sequences through a [`Registry`].
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<Registry>,
}

impl Dispatcher {
    pub fn new(registry: Registry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// One output per block, in input order.
    pub fn render(&self, blocks: &[Block], ctx: &RenderContext) -> Vec<RenderOutput> {
        blocks
            .iter()
            .map(|block| self.render_block(block, ctx))
            .collect()
    }

    fn render_block(&self, block: &Block, ctx: &RenderContext) -> RenderOutput {
        let found = block
            .tag()
            .and_then(|tag| self.registry.get(tag).map(|renderer| (tag, renderer)));

        match found {
            Some((tag, renderer)) => RenderOutput::Rendered {
                key: block.key.clone(),
                tag,
                markup: renderer.render(block, ctx),
            },
            None => {
                tracing::warn!(
                    block_type = block.tag_name(),
                    key = %block.key,
                    "No component implemented for block type"
                );
                RenderOutput::Placeholder {
                    key: block.key.clone(),
                    tag: block.tag_name().to_string(),
                }
            }
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(Registry::standard())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RenderMode;
    use site_types::blocks::{FaqsBlock, Hero1Block};

    fn hero(key: &str) -> Block {
        Block::new(
            key,
            BlockBody::Hero1(Hero1Block {
                title: Some("Welcome".to_string()),
                ..Hero1Block::default()
            }),
        )
    }

    fn faqs(key: &str) -> Block {
        Block::new(key, BlockBody::Faqs(FaqsBlock::default()))
    }

    fn ctx() -> RenderContext {
        RenderContext::new(RenderMode::Production)
    }

    #[test]
    fn standard_registry_covers_every_tag() {
        let registry = Registry::standard();
        assert_eq!(registry.len(), BlockTag::ALL.len());
        for tag in BlockTag::ALL {
            assert!(registry.contains(tag), "missing renderer for {tag}");
        }
    }

    #[test]
    fn unknown_block_becomes_placeholder_in_position() {
        let blocks = vec![hero("a"), Block::unknown("unknown-x", "b"), faqs("c")];
        let outputs = Dispatcher::default().render(&blocks, &ctx());

        let keys: Vec<&str> = outputs.iter().map(RenderOutput::key).collect();
        assert_eq!(keys, ["a", "b", "c"]);
        assert!(!outputs[0].is_placeholder());
        assert_eq!(
            outputs[1],
            RenderOutput::Placeholder {
                key: "b".to_string(),
                tag: "unknown-x".to_string()
            }
        );
        assert!(!outputs[2].is_placeholder());
        assert_eq!(outputs[2].tag_name(), "faqs");
    }

    #[test]
    fn unregistered_known_tag_becomes_placeholder() {
        let mut registry = Registry::empty();
        registry.register(BlockTag::Faqs, |_: &Block, _: &RenderContext| {
            Markup::raw("<dl></dl>")
        });
        let dispatcher = Dispatcher::new(registry);

        let outputs = dispatcher.render(&[hero("a"), faqs("b")], &ctx());
        assert!(outputs[0].is_placeholder());
        assert_eq!(outputs[0].tag_name(), "hero-1");
        assert_eq!(
            outputs[1],
            RenderOutput::Rendered {
                key: "b".to_string(),
                tag: BlockTag::Faqs,
                markup: Markup::raw("<dl></dl>"),
            }
        );
    }

    #[test]
    fn output_matches_input_length_for_any_mix() {
        let dispatcher = Dispatcher::new(Registry::empty());
        let blocks: Vec<Block> = (0..25)
            .map(|i| match i % 3 {
                0 => hero(&format!("k{i}")),
                1 => faqs(&format!("k{i}")),
                _ => Block::unknown(format!("custom-{i}"), format!("k{i}")),
            })
            .collect();

        let outputs = dispatcher.render(&blocks, &ctx());
        assert_eq!(outputs.len(), blocks.len());
        for (block, output) in blocks.iter().zip(&outputs) {
            assert_eq!(block.key, output.key());
            assert!(output.is_placeholder());
        }
    }

    #[test]
    fn duplicate_blocks_are_not_deduplicated() {
        let outputs = Dispatcher::default().render(&[faqs("same"), faqs("same")], &ctx());
        assert_eq!(outputs.len(), 2);
    }

    #[test]
    fn replaced_renderer_with_wrong_variant_renders_empty() {
        let mut registry = Registry::standard();
        registry.register(BlockTag::Faqs, |block: &Block, ctx: &RenderContext| {
            standard_renderer(BlockTag::Hero1).render(block, ctx)
        });
        let outputs = Dispatcher::new(registry).render(&[faqs("c")], &ctx());
        assert_eq!(
            outputs[0],
            RenderOutput::Rendered {
                key: "c".to_string(),
                tag: BlockTag::Faqs,
                markup: Markup::empty(),
            }
        );
    }

    #[test]
    fn renders_through_builtin_view() {
        let outputs = Dispatcher::default().render(&[hero("a")], &ctx());
        let html = outputs[0].to_html(RenderMode::Production);
        assert!(html.as_str().contains("Welcome"));
        assert!(html.as_str().contains(r#"data-block="hero-1""#));
    }
}
