//! Name to renderer mapping.
//!
//! The registry is an ordinary value built at startup and passed by
//! reference to whoever resolves the viewer name. There is no global state:
//! the built-in set comes from the [`BUILTIN_RENDERERS`] factory list.

use super::{Renderer, csv, json, markdown, text, xlsx, yaml};

/// Name of the renderer used when the caller does not choose one.
pub const DEFAULT_RENDERER: &str = text::NAME;

/// Factory producing a fresh renderer instance.
pub type RendererFactory = fn() -> Box<dyn Renderer>;

/// Every renderer shipped with tsdump, in registration order.
pub const BUILTIN_RENDERERS: &[(&str, RendererFactory)] = &[
    (csv::NAME, || Box::new(csv::CsvRenderer)),
    (json::NAME, || Box::new(json::JsonRenderer)),
    (markdown::NAME, || Box::new(markdown::MarkdownRenderer)),
    (text::NAME, || Box::new(text::TextRenderer)),
    (xlsx::NAME, || Box::new(xlsx::XlsxRenderer)),
    (yaml::NAME, || Box::new(yaml::YamlRenderer)),
];

/// Registered renderers, kept in registration order.
///
/// Registering a name twice replaces the earlier instance but keeps the
/// name's original position in [`RendererRegistry::names`].
#[derive(Default)]
pub struct RendererRegistry {
    entries: Vec<(String, Box<dyn Renderer>)>,
}

impl std::fmt::Debug for RendererRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RendererRegistry")
            .field("names", &self.names())
            .finish()
    }
}

impl RendererRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every built-in renderer.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        for (name, factory) in BUILTIN_RENDERERS {
            registry.register(*name, factory());
        }
        registry
    }

    /// Associates `name` with `renderer`, replacing any earlier registration.
    pub fn register(&mut self, name: impl Into<String>, renderer: Box<dyn Renderer>) {
        let name = name.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = renderer,
            None => self.entries.push((name, renderer)),
        }
    }

    /// Registered names in registration order, for help and error text.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Looks up a renderer by exact, case-sensitive name.
    pub fn resolve(&self, name: &str) -> Option<&dyn Renderer> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, renderer)| renderer.as_ref())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::Database;
    use crate::render::RenderError;
    use std::io::Write;

    /// Writes a fixed marker so tests can tell instances apart.
    struct MarkerRenderer(&'static str);

    impl Renderer for MarkerRenderer {
        fn render(&self, _: &[Database], sink: &mut dyn Write) -> Result<(), RenderError> {
            sink.write_all(self.0.as_bytes())?;
            Ok(())
        }
    }

    fn render_with(registry: &RendererRegistry, name: &str) -> String {
        let mut out = Vec::new();
        registry.resolve(name).unwrap().render(&[], &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_builtin_names_in_registration_order() {
        let registry = RendererRegistry::with_builtin();
        assert_eq!(registry.names(), vec!["csv", "json", "md", "txt", "xlsx", "yaml"]);
        assert!(registry.resolve(DEFAULT_RENDERER).is_some());
    }

    #[test]
    fn test_resolve_unknown_name() {
        let registry = RendererRegistry::with_builtin();
        assert!(registry.resolve("nonexistent").is_none());
        assert!(registry.resolve("").is_none());
    }

    #[test]
    fn test_resolve_is_case_sensitive() {
        let registry = RendererRegistry::with_builtin();
        assert!(registry.resolve("json").is_some());
        assert!(registry.resolve("JSON").is_none());
    }

    #[test]
    fn test_register_overwrites_in_place() {
        let mut registry = RendererRegistry::new();
        registry.register("a", Box::new(MarkerRenderer("first")));
        registry.register("b", Box::new(MarkerRenderer("other")));
        registry.register("a", Box::new(MarkerRenderer("second")));

        assert_eq!(registry.names(), vec!["a", "b"]);
        assert_eq!(render_with(&registry, "a"), "second");
        assert_eq!(render_with(&registry, "b"), "other");
    }

    #[test]
    fn test_custom_renderer_alongside_builtin() {
        let mut registry = RendererRegistry::with_builtin();
        registry.register("marker", Box::new(MarkerRenderer("custom")));

        assert_eq!(registry.names().last(), Some(&"marker"));
        assert_eq!(render_with(&registry, "marker"), "custom");
    }
}
