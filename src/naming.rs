//! Identifier derivation for generated components and JSX attributes.

use cruet::Inflector;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static INVALID_IDENTIFIER_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_$]").expect("valid identifier pattern"));

/// PascalCase component identifier derived from an SVG file name.
///
/// Two different file names may yield the same identifier; callers decide
/// what a collision means.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentName(String);

impl ComponentName {
    /// Builds the name from a file stem such as `arrow-left` or `user_add 2`.
    pub fn from_file_stem(stem: &str) -> Self {
        let pascal = stem.to_pascal_case();
        let cleaned = INVALID_IDENTIFIER_CHARS.replace_all(&pascal, "");

        let name = match cleaned.chars().next() {
            None => "Icon".to_string(),
            Some(first) if first.is_ascii_digit() => format!("Icon{cleaned}"),
            Some(_) => cleaned.into_owned(),
        };
        Self(name)
    }

    /// Builds the name from an SVG file name, dropping the `.svg` suffix.
    pub fn from_file_name(file_name: &str) -> Self {
        Self::from_file_stem(svg_stem(file_name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComponentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ComponentName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Strips a trailing `.svg` from a file name.
pub fn svg_stem(file_name: &str) -> &str {
    file_name
        .strip_suffix(crate::constants::SVG_EXTENSION)
        .unwrap_or(file_name)
}

/// Rewrites a hyphenated or namespaced attribute name to camelCase.
///
/// `stroke-width` becomes `strokeWidth` and `xlink:href` becomes `xlinkHref`.
/// Names without `-` or `:` are returned unchanged so `viewBox` survives.
pub fn camel_case_attribute(name: &str) -> String {
    if !name.contains(['-', ':']) {
        return name.to_string();
    }
    name.replace(':', "-").to_camel_case()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_name_from_kebab_case() {
        assert_eq!(ComponentName::from_file_stem("arrow-left").as_str(), "ArrowLeft");
        assert_eq!(ComponentName::from_file_stem("user_add").as_str(), "UserAdd");
        assert_eq!(ComponentName::from_file_stem("logo").as_str(), "Logo");
    }

    #[test]
    fn test_component_name_from_file_name() {
        assert_eq!(ComponentName::from_file_name("arrow-left.svg").as_str(), "ArrowLeft");
        assert_eq!(ComponentName::from_file_name("home.svg").to_string(), "Home");
    }

    #[test]
    fn test_component_name_is_valid_identifier() {
        let name = ComponentName::from_file_stem("2-columns");
        assert!(name.as_str().starts_with("Icon"));
        assert!(name.as_str().chars().all(|c| c.is_ascii_alphanumeric()));

        assert_eq!(ComponentName::from_file_stem("").as_str(), "Icon");
    }

    #[test]
    fn test_camel_case_attribute() {
        assert_eq!(camel_case_attribute("stroke-width"), "strokeWidth");
        assert_eq!(camel_case_attribute("xlink:href"), "xlinkHref");
        assert_eq!(camel_case_attribute("fill-rule"), "fillRule");
        assert_eq!(camel_case_attribute("viewBox"), "viewBox");
        assert_eq!(camel_case_attribute("d"), "d");
    }
}
