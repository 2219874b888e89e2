//! Template rendering for generated sources.
//! Component and barrel templates are embedded at compile time and rendered
//! with MiniJinja; every slot value is inserted verbatim.
use crate::error::Result;
use minijinja::{AutoEscape, Environment};

/// Template for React function components (`.tsx`).
pub const REACT_TEMPLATE: &str = "react.tsx";
/// Template for Vue single-file components (`.vue`).
pub const VUE_TEMPLATE: &str = "vue.vue";
/// Template for the per-folder barrel module.
pub const INDEX_TEMPLATE: &str = "index.ts";

const TEMPLATES: [(&str, &str); 3] = [
    (REACT_TEMPLATE, include_str!("../templates/react.tsx.j2")),
    (VUE_TEMPLATE, include_str!("../templates/vue.vue.j2")),
    (INDEX_TEMPLATE, include_str!("../templates/index.ts.j2")),
];

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders a named template with the given context.
    ///
    /// # Arguments
    /// * `template` - Name of a registered template
    /// * `context` - Values for the template's named slots
    ///
    /// # Returns
    /// * `Result<String>` - Rendered source text
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String>;
}

/// MiniJinja-based template rendering engine.
pub struct MiniJinjaRenderer {
    /// MiniJinja environment with the built-in templates registered
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    /// Creates a renderer with the component and barrel templates registered.
    ///
    /// Auto-escaping is disabled: slot values are source code, not HTML.
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_keep_trailing_newline(true);
        env.set_trim_blocks(true);

        for (name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        Ok(Self { env })
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    /// # Errors
    /// * `Error::MinijinjaError` if the template is unknown or rendering fails
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String> {
        let tmpl = self.env.get_template(template)?;
        Ok(tmpl.render(context)?)
    }
}
