use std::fmt;
use std::sync::Arc;

/// Value substituted when a tag's evaluator yields nothing
pub const DEFAULT_FALLBACK: &str = "unknown";

/// A placeholder and the function that computes its replacement
///
/// Tags are immutable once built. An empty placeholder never matches.
pub struct Tag<C: ?Sized> {
    placeholder: String,
    evaluate: Arc<dyn Fn(&C) -> Option<String> + Send + Sync>,
    fallback: String,
}

impl<C: ?Sized> Tag<C> {
    /// Create a tag whose evaluator always produces a value
    pub fn new<F>(placeholder: impl Into<String>, evaluate: F) -> Self
    where
        F: Fn(&C) -> String + Send + Sync + 'static,
    {
        Self::fallible(placeholder, move |context: &C| Some(evaluate(context)))
    }

    /// Create a tag whose evaluator may fail to produce a value
    ///
    /// A `None` from the evaluator is replaced by the fallback text
    /// ([`DEFAULT_FALLBACK`] unless changed with [`Tag::with_fallback`]).
    pub fn fallible<F>(placeholder: impl Into<String>, evaluate: F) -> Self
    where
        F: Fn(&C) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            placeholder: placeholder.into(),
            evaluate: Arc::new(evaluate),
            fallback: DEFAULT_FALLBACK.to_string(),
        }
    }

    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = fallback.into();
        self
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Whether the placeholder occurs in `text`
    pub fn occurs_in(&self, text: &str) -> bool {
        !self.placeholder.is_empty() && text.contains(self.placeholder.as_str())
    }

    /// Evaluate the tag against a context, applying the fallback
    pub fn value(&self, context: &C) -> String {
        (self.evaluate)(context).unwrap_or_else(|| self.fallback.clone())
    }
}

impl<C: ?Sized> Clone for Tag<C> {
    fn clone(&self) -> Self {
        Self {
            placeholder: self.placeholder.clone(),
            evaluate: Arc::clone(&self.evaluate),
            fallback: self.fallback.clone(),
        }
    }
}

impl<C: ?Sized> fmt::Debug for Tag<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tag")
            .field("placeholder", &self.placeholder)
            .field("fallback", &self.fallback)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infallible_tag_value() {
        let tag: Tag<str> = Tag::new("%p", |name: &str| name.to_uppercase());
        assert_eq!(tag.value("alex"), "ALEX");
    }

    #[test]
    fn test_fallible_tag_uses_default_fallback() {
        let tag: Tag<str> = Tag::fallible("%ip", |_: &str| None);
        assert_eq!(tag.value("alex"), DEFAULT_FALLBACK);
    }

    #[test]
    fn test_custom_fallback() {
        let tag: Tag<str> = Tag::fallible("%country", |_: &str| None).with_fallback("N/A");
        assert_eq!(tag.value("alex"), "N/A");
        assert_eq!(tag.fallback(), "N/A");
    }

    #[test]
    fn test_empty_placeholder_never_occurs() {
        let tag: Tag<str> = Tag::new("", |_: &str| String::new());
        assert!(!tag.occurs_in("anything"));
    }

    #[test]
    fn test_debug_omits_evaluator() {
        let tag: Tag<str> = Tag::new("%p", |s: &str| s.to_string());
        let text = format!("{:?}", tag);
        assert!(text.contains("%p"));
    }
}
