//! Component synthesis: binds component props into SVG markup and renders
//! the result into a framework template.

use crate::constants::{DEFAULT_COLOR, DEFAULT_TITLE_SUFFIX};
use crate::error::Result;
use crate::markup::{Attribute, Markup, Occurrence};
use crate::naming::{camel_case_attribute, ComponentName};
use crate::renderer::{TemplateRenderer, REACT_TEMPLATE, VUE_TEMPLATE};
use log::debug;
use serde::Deserialize;
use std::fmt;

/// UI framework a component is generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    React,
    Vue,
}

impl Framework {
    /// File extension of generated components, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Framework::React => "tsx",
            Framework::Vue => "vue",
        }
    }

    pub fn template(&self) -> &'static str {
        match self {
            Framework::React => REACT_TEMPLATE,
            Framework::Vue => VUE_TEMPLATE,
        }
    }

    /// Attribute binding `prop` to a host-language expression.
    ///
    /// React: `fill={color}`. Vue: `:fill="color"`.
    pub fn bind(&self, prop: &str, expression: &str) -> Attribute {
        let prop = camel_case_attribute(prop);
        match self {
            Framework::React => Attribute::new(prop, format!("{{{expression}}}")),
            Framework::Vue => Attribute::new(format!(":{prop}"), format!("\"{expression}\"")),
        }
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Framework::React => f.write_str("react"),
            Framework::Vue => f.write_str("vue"),
        }
    }
}

/// Default prop values baked into every generated component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisDefaults {
    pub color: String,
    pub title_suffix: String,
}

impl SynthesisDefaults {
    pub fn new<C: Into<String>, S: Into<String>>(color: C, title_suffix: S) -> Self {
        Self { color: color.into(), title_suffix: title_suffix.into() }
    }

    pub fn title_for(&self, name: &ComponentName) -> String {
        format!("{}{}", name, self.title_suffix)
    }
}

impl Default for SynthesisDefaults {
    fn default() -> Self {
        Self::new(DEFAULT_COLOR, DEFAULT_TITLE_SUFFIX)
    }
}

/// Turns raw SVG sources into component sources.
pub struct Synthesizer<'a> {
    renderer: &'a dyn TemplateRenderer,
    defaults: SynthesisDefaults,
}

impl<'a> Synthesizer<'a> {
    pub fn new(renderer: &'a dyn TemplateRenderer, defaults: SynthesisDefaults) -> Self {
        Self { renderer, defaults }
    }

    pub fn defaults(&self) -> &SynthesisDefaults {
        &self.defaults
    }

    /// Produces the unformatted component source for `svg`.
    ///
    /// # Errors
    /// * `Error::MarkupError` if the SVG cannot be tokenized
    /// * `Error::ElementNotFound` if the markup has no `<svg>` element
    /// * `Error::MinijinjaError` if the template fails to render
    pub fn synthesize(
        &self,
        framework: Framework,
        name: &ComponentName,
        svg: &str,
    ) -> Result<String> {
        debug!("Synthesizing {} component '{}'", framework, name);

        let body = match framework {
            Framework::React => self.rewrite_react(svg)?,
            Framework::Vue => self.rewrite_vue(name, svg)?,
        };

        let context = serde_json::json!({
            "name": name.as_str(),
            "default_color": self.defaults.color,
            "default_title": self.defaults.title_for(name),
            "body": body.trim(),
        });
        self.renderer.render(framework.template(), &context)
    }

    fn rewrite_react(&self, svg: &str) -> Result<String> {
        let framework = Framework::React;
        let mut markup = Markup::parse(svg)?;

        markup.strip_prolog();
        markup.strip_comments();
        markup.unwrap_cdata();
        markup.normalize_attributes();
        markup.escape_jsx_text();

        bind_fill(&mut markup, &framework.bind("fill", "color"))?;
        markup.add_prop("svg", &framework.bind("className", "className"), Occurrence::First)?;

        markup.remove_element("title")?;
        markup.add_element("title", "{title}", "path")?;
        Ok(markup.render())
    }

    fn rewrite_vue(&self, name: &ComponentName, svg: &str) -> Result<String> {
        let framework = Framework::Vue;
        let mut markup = Markup::parse(svg)?;

        markup.strip_prolog();

        let fill = format!("color || '{}'", self.defaults.color);
        bind_fill(&mut markup, &framework.bind("fill", &fill))?;

        let title = format!("{{{{ title || '{}' }}}}", self.defaults.title_for(name));
        markup.remove_element("title")?;
        markup.add_element("title", &title, "path")?;
        Ok(markup.render())
    }
}

/// Binds the fill on every `<path>`, or on the root `<svg>` when the icon
/// is drawn without paths.
fn bind_fill(markup: &mut Markup, fill: &Attribute) -> Result<usize> {
    if markup.count_elements("path") > 0 {
        markup.add_prop("path", fill, Occurrence::All)
    } else {
        markup.add_prop("svg", fill, Occurrence::First)
    }
}
