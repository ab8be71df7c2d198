use std::fmt;
use std::sync::Arc;

use super::tag::Tag;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Tag(usize),
}

/// A template split into literal text and placeholder references
///
/// Compilation is a single left-to-right pass: at each position the first
/// registered placeholder that matches is consumed, so text produced by one
/// tag is never scanned for another placeholder.
#[derive(Debug, Clone)]
struct CompiledTemplate {
    segments: Vec<Segment>,
}

impl CompiledTemplate {
    fn compile<C: ?Sized>(template: &str, tags: &[Tag<C>]) -> Self {
        let present: Vec<usize> = tags
            .iter()
            .enumerate()
            .filter(|(_, tag)| tag.occurs_in(template))
            .map(|(index, _)| index)
            .collect();

        if present.is_empty() {
            return Self {
                segments: vec![Segment::Literal(template.to_string())],
            };
        }

        let mut segments = Vec::new();
        let mut literal_start = 0;
        let mut pos = 0;

        while pos < template.len() {
            let rest = &template[pos..];
            let matched = present
                .iter()
                .copied()
                .find(|&index| rest.starts_with(tags[index].placeholder()));

            match matched {
                Some(index) => {
                    if literal_start < pos {
                        segments.push(Segment::Literal(template[literal_start..pos].to_string()));
                    }
                    segments.push(Segment::Tag(index));
                    pos += tags[index].placeholder().len();
                    literal_start = pos;
                }
                None => {
                    pos += rest.chars().next().map_or(1, char::len_utf8);
                }
            }
        }

        if literal_start < template.len() {
            segments.push(Segment::Literal(template[literal_start..].to_string()));
        }

        Self { segments }
    }

    fn tag_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Tag(index) => Some(*index),
            Segment::Literal(_) => None,
        })
    }

    fn render<C: ?Sized>(&self, values: &mut LazyValues<'_, C>) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Tag(index) => out.push_str(values.get(*index)),
            }
        }
        out
    }
}

/// Per-render cache of tag values, filled on first reference
struct LazyValues<'a, C: ?Sized> {
    tags: &'a [Tag<C>],
    context: &'a C,
    values: Vec<Option<String>>,
}

impl<'a, C: ?Sized> LazyValues<'a, C> {
    fn new(tags: &'a [Tag<C>], context: &'a C) -> Self {
        Self {
            tags,
            context,
            values: vec![None; tags.len()],
        }
    }

    fn get(&mut self, index: usize) -> &str {
        let tags = self.tags;
        let context = self.context;
        self.values[index].get_or_insert_with(|| tags[index].value(context))
    }
}

/// Resolve a single template against a context
///
/// Only tags whose placeholder occurs in `template` are evaluated; each is
/// evaluated once and substituted for every occurrence. Text that merely
/// resembles a placeholder is left untouched. Overlapping placeholders follow
/// the precedence documented on [`TagReplacer`].
///
/// # Example
///
/// ```
/// use authhook_core::lazytags::{resolve, Tag};
///
/// let tags: Vec<Tag<str>> = vec![Tag::new("%p", |name: &str| name.to_string())];
/// assert_eq!(resolve(&tags, "%p says hi to %p", "Alex"), "Alex says hi to Alex");
/// ```
pub fn resolve<C: ?Sized>(tags: &[Tag<C>], template: &str, context: &C) -> String {
    let compiled = CompiledTemplate::compile(template, tags);
    compiled.render(&mut LazyValues::new(tags, context))
}

/// A collection of templates bound to a tag list
///
/// Binding compiles every template once. [`TagReplacer::adapted`] renders the
/// whole collection for one context, evaluating each referenced tag once.
///
/// Placeholders are matched position by position, not tag by tag. When two
/// registered placeholders overlap in a template, the one that starts first
/// wins, and at the same start the earlier-registered one wins. This differs
/// from replacing each tag's occurrences in turn: with `bc` registered before
/// `ab`, the template `abc` renders as the `ab` value followed by `c`, where
/// tag-by-tag replacement would consume `bc` first. The standard tags
/// (`%p`, `%nick`, `%ip`, `%country`) never overlap this way, so both readings
/// agree for them.
pub struct TagReplacer<C: ?Sized> {
    tags: Arc<[Tag<C>]>,
    templates: Vec<CompiledTemplate>,
    used: Vec<usize>,
}

impl<C: ?Sized> TagReplacer<C> {
    pub fn new<I, S>(tags: Arc<[Tag<C>]>, templates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let templates: Vec<CompiledTemplate> = templates
            .into_iter()
            .map(|template| CompiledTemplate::compile(template.as_ref(), &tags))
            .collect();

        let mut used: Vec<usize> = templates
            .iter()
            .flat_map(CompiledTemplate::tag_indices)
            .collect();
        used.sort_unstable();
        used.dedup();

        Self {
            tags,
            templates,
            used,
        }
    }

    /// Placeholders referenced by at least one bound template, in registration order
    pub fn used_tags(&self) -> Vec<&str> {
        self.used
            .iter()
            .map(|&index| self.tags[index].placeholder())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Render every bound template for `context`, preserving order
    pub fn adapted(&self, context: &C) -> Vec<String> {
        let mut values = LazyValues::new(&self.tags, context);
        self.templates
            .iter()
            .map(|template| template.render(&mut values))
            .collect()
    }
}

impl<C: ?Sized> fmt::Debug for TagReplacer<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TagReplacer")
            .field("templates", &self.templates.len())
            .field("used_tags", &self.used_tags())
            .finish()
    }
}

/// A [`TagReplacer`] over items that carry a template
///
/// Keeps the original items so rendering can rebuild each one around its
/// resolved text (for commands: keep the executor, swap the template).
pub struct WrappedTagReplacer<T, C: ?Sized> {
    items: Vec<T>,
    replacer: TagReplacer<C>,
    rebuild: Arc<dyn Fn(&T, String) -> T + Send + Sync>,
}

impl<T, C: ?Sized> WrappedTagReplacer<T, C> {
    pub fn new<I, G, R>(tags: Arc<[Tag<C>]>, items: I, text_of: G, rebuild: R) -> Self
    where
        I: IntoIterator<Item = T>,
        G: Fn(&T) -> &str,
        R: Fn(&T, String) -> T + Send + Sync + 'static,
    {
        let items: Vec<T> = items.into_iter().collect();
        let replacer = TagReplacer::new(tags, items.iter().map(&text_of));
        Self {
            items,
            replacer,
            rebuild: Arc::new(rebuild),
        }
    }

    /// The bound items, unresolved
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn used_tags(&self) -> Vec<&str> {
        self.replacer.used_tags()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Rebuild every item around its template resolved for `context`
    pub fn adapted_items(&self, context: &C) -> Vec<T> {
        self.items
            .iter()
            .zip(self.replacer.adapted(context))
            .map(|(item, text)| (self.rebuild)(item, text))
            .collect()
    }
}

impl<T: fmt::Debug, C: ?Sized> fmt::Debug for WrappedTagReplacer<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WrappedTagReplacer")
            .field("items", &self.items)
            .field("replacer", &self.replacer)
            .finish_non_exhaustive()
    }
}
