//! Markup rewriting for SVG sources.
//!
//! The rewriter works on a flat token stream produced by a small tokenizer
//! that understands tag boundaries, quoted and braced attribute values,
//! comments and declarations. It is not a validating parser: text between
//! tags is kept verbatim and unbalanced tags are left for the formatter to
//! complain about.

use crate::error::{Error, Result};
use crate::naming::camel_case_attribute;
use std::fmt;

/// A single attribute of a start tag.
///
/// `value` keeps its delimiters (`"2"`, `'2'`, `{color}`), `None` means a
/// bare boolean attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: Option<String>,
}

impl Attribute {
    pub fn new<N: Into<String>, V: Into<String>>(name: N, value: V) -> Self {
        Self { name: name.into(), value: Some(value.into()) }
    }

    /// Attribute name without a Vue binding prefix (`:fill`, `v-bind:fill`).
    pub fn key(&self) -> &str {
        let name = self.name.strip_prefix("v-bind:").unwrap_or(&self.name);
        name.strip_prefix(':').unwrap_or(name)
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{}={}", self.name, value),
            None => f.write_str(&self.name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Text(String),
    StartTag { name: String, attributes: Vec<Attribute>, self_closing: bool },
    EndTag(String),
    /// `<!-- ... -->`, kept raw
    Comment(String),
    /// `<![CDATA[ ... ]]>`, kept raw
    CData(String),
    /// `<?xml ...?>` and `<!DOCTYPE ...>`, kept raw
    Declaration(String),
    /// Inserted content that is written back untouched
    Raw(String),
}

/// Which occurrences of an element a prop binding applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occurrence {
    First,
    All,
}

/// Tokenized markup that can be edited in place and rendered back to text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markup {
    tokens: Vec<Token>,
}

impl Markup {
    pub fn parse(source: &str) -> Result<Self> {
        Ok(Self { tokens: tokenize(source)? })
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Number of start tags with the given element name.
    pub fn count_elements(&self, element: &str) -> usize {
        self.tokens
            .iter()
            .filter(|token| matches!(token, Token::StartTag { name, .. } if name == element))
            .count()
    }

    /// Rewrites every attribute name on every start tag to camelCase.
    pub fn normalize_attributes(&mut self) {
        for token in &mut self.tokens {
            if let Token::StartTag { attributes, .. } = token {
                for attribute in attributes {
                    attribute.name = camel_case_attribute(&attribute.name);
                }
            }
        }
    }

    /// Binds `attribute` on the targeted occurrences of `element`.
    ///
    /// An attribute with the same key is replaced where it stands; otherwise
    /// the binding is appended to the tag. Returns the number of tags that
    /// were rewritten.
    pub fn add_prop(
        &mut self,
        element: &str,
        attribute: &Attribute,
        occurrence: Occurrence,
    ) -> Result<usize> {
        let mut rewritten = 0;
        for token in &mut self.tokens {
            let Token::StartTag { name, attributes, .. } = token else {
                continue;
            };
            if name != element {
                continue;
            }

            match attributes.iter_mut().find(|existing| existing.key() == attribute.key()) {
                Some(existing) => *existing = attribute.clone(),
                None => attributes.push(attribute.clone()),
            }
            rewritten += 1;

            if occurrence == Occurrence::First {
                break;
            }
        }

        if rewritten == 0 {
            return Err(Error::ElementNotFound { element: element.to_string() });
        }
        Ok(rewritten)
    }

    /// Inserts `<element>content</element>` right before the first `sibling`
    /// start tag, or before the closing `</svg>` when there is no sibling.
    pub fn add_element(&mut self, element: &str, content: &str, sibling: &str) -> Result<()> {
        let sibling_position = self
            .tokens
            .iter()
            .position(|token| matches!(token, Token::StartTag { name, .. } if name == sibling));
        let position = match sibling_position {
            Some(position) => position,
            None => self
                .tokens
                .iter()
                .rposition(|token| matches!(token, Token::EndTag(name) if name == "svg"))
                .ok_or_else(|| Error::ElementNotFound { element: "svg".to_string() })?,
        };

        let inserted = [
            Token::StartTag {
                name: element.to_string(),
                attributes: Vec::new(),
                self_closing: false,
            },
            Token::Raw(content.to_string()),
            Token::EndTag(element.to_string()),
        ];
        self.tokens.splice(position..position, inserted);
        Ok(())
    }

    /// Drops every `element` together with its children.
    pub fn remove_element(&mut self, element: &str) -> Result<()> {
        let mut kept = Vec::with_capacity(self.tokens.len());
        let mut depth = 0usize;

        for token in &self.tokens {
            match token {
                Token::StartTag { name, self_closing, .. } if name == element => {
                    if !self_closing {
                        depth += 1;
                    }
                    continue;
                }
                Token::EndTag(name) if name == element && depth > 0 => {
                    depth -= 1;
                    continue;
                }
                _ if depth > 0 => continue,
                _ => kept.push(token.clone()),
            }
        }

        if depth > 0 {
            return Err(Error::MarkupError(format!("unclosed <{element}> element")));
        }
        self.tokens = kept;
        Ok(())
    }

    /// Drops `<?xml ...?>` and `<!DOCTYPE ...>` declarations.
    pub fn strip_prolog(&mut self) {
        self.tokens.retain(|token| !matches!(token, Token::Declaration(_)));
    }

    pub fn strip_comments(&mut self) {
        self.tokens.retain(|token| !matches!(token, Token::Comment(_)));
    }

    /// Replaces CDATA sections with their content as plain text.
    pub fn unwrap_cdata(&mut self) {
        for token in &mut self.tokens {
            if let Token::CData(raw) = token {
                let raw = raw.as_str();
                let inner = raw
                    .strip_prefix("<![CDATA[")
                    .and_then(|rest| rest.strip_suffix("]]>"))
                    .unwrap_or(raw)
                    .to_string();
                *token = Token::Text(inner);
            }
        }
    }

    /// Escapes braces and angle brackets in text nodes so they render
    /// literally inside JSX.
    pub fn escape_jsx_text(&mut self) {
        for token in &mut self.tokens {
            if let Token::Text(text) = token {
                if text.contains(['{', '}', '<', '>']) {
                    *text = escape_jsx(text);
                }
            }
        }
    }

    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            match token {
                Token::Text(raw)
                | Token::Comment(raw)
                | Token::CData(raw)
                | Token::Declaration(raw)
                | Token::Raw(raw) => f.write_str(raw)?,
                Token::StartTag { name, attributes, self_closing } => {
                    write!(f, "<{name}")?;
                    for attribute in attributes {
                        write!(f, " {attribute}")?;
                    }
                    f.write_str(if *self_closing { " />" } else { ">" })?;
                }
                Token::EndTag(name) => write!(f, "</{name}>")?,
            }
        }
        Ok(())
    }
}

fn escape_jsx(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '{' => escaped.push_str("{'{'}"),
            '}' => escaped.push_str("{'}'}"),
            '<' => escaped.push_str("{'<'}"),
            '>' => escaped.push_str("{'>'}"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn is_name_start(byte: u8) -> bool {
    byte.is_ascii_alphabetic() || byte == b'_'
}

fn is_name_char(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b':' | b'.')
}

fn unterminated(what: &str, offset: usize) -> Error {
    Error::MarkupError(format!("unterminated {what} at byte {offset}"))
}

/// Splits markup into tokens. Delimiters are ASCII, so every slice boundary
/// falls on a char boundary.
pub fn tokenize(source: &str) -> Result<Vec<Token>> {
    let bytes = source.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;
    let mut text_start = 0;

    while pos < bytes.len() {
        if bytes[pos] != b'<' {
            pos += 1;
            continue;
        }

        let rest = &source[pos..];
        let (token, len) = if rest.starts_with("<!--") {
            let end = rest.find("-->").ok_or_else(|| unterminated("comment", pos))? + 3;
            (Token::Comment(rest[..end].to_string()), end)
        } else if rest.starts_with("<![CDATA[") {
            let end = rest.find("]]>").ok_or_else(|| unterminated("CDATA section", pos))? + 3;
            (Token::CData(rest[..end].to_string()), end)
        } else if rest.starts_with("<?") {
            let end = rest.find("?>").ok_or_else(|| unterminated("declaration", pos))? + 2;
            (Token::Declaration(rest[..end].to_string()), end)
        } else if rest.starts_with("<!") {
            let end = rest.find('>').ok_or_else(|| unterminated("declaration", pos))? + 1;
            (Token::Declaration(rest[..end].to_string()), end)
        } else if rest.starts_with("</") && rest.len() > 2 && is_name_start(bytes[pos + 2]) {
            let end = rest.find('>').ok_or_else(|| unterminated("closing tag", pos))?;
            (Token::EndTag(rest[2..end].trim().to_string()), end + 1)
        } else if rest.len() > 1 && is_name_start(bytes[pos + 1]) {
            parse_start_tag(rest).ok_or_else(|| unterminated("tag", pos))?
        } else {
            // a stray '<' in text
            pos += 1;
            continue;
        };

        if text_start < pos {
            tokens.push(Token::Text(source[text_start..pos].to_string()));
        }
        tokens.push(token);
        pos += len;
        text_start = pos;
    }

    if text_start < bytes.len() {
        tokens.push(Token::Text(source[text_start..].to_string()));
    }
    Ok(tokens)
}

/// Parses `<name attr="v" ...>` at the start of `rest`, returning the token
/// and the number of bytes consumed.
fn parse_start_tag(rest: &str) -> Option<(Token, usize)> {
    let bytes = rest.as_bytes();
    let len = bytes.len();

    let mut i = 1;
    while i < len && is_name_char(bytes[i]) {
        i += 1;
    }
    let name = rest[1..i].to_string();
    let mut attributes = Vec::new();

    loop {
        while i < len && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i >= len {
            return None;
        }

        match bytes[i] {
            b'>' => {
                let token = Token::StartTag { name, attributes, self_closing: false };
                return Some((token, i + 1));
            }
            b'/' if bytes.get(i + 1) == Some(&b'>') => {
                let token = Token::StartTag { name, attributes, self_closing: true };
                return Some((token, i + 2));
            }
            b'/' => i += 1,
            _ => {
                let name_start = i;
                while i < len
                    && !bytes[i].is_ascii_whitespace()
                    && !matches!(bytes[i], b'=' | b'>' | b'/')
                {
                    i += 1;
                }
                if i == name_start {
                    return None;
                }
                let attribute_name = rest[name_start..i].to_string();

                while i < len && bytes[i].is_ascii_whitespace() {
                    i += 1;
                }
                let value = if i < len && bytes[i] == b'=' {
                    i += 1;
                    while i < len && bytes[i].is_ascii_whitespace() {
                        i += 1;
                    }
                    let end = attribute_value_end(bytes, i)?;
                    let value = rest[i..end].to_string();
                    i = end;
                    Some(value)
                } else {
                    None
                };

                attributes.push(Attribute { name: attribute_name, value });
            }
        }
    }
}

/// Returns the end offset (exclusive) of an attribute value starting at `start`.
fn attribute_value_end(bytes: &[u8], start: usize) -> Option<usize> {
    let quote = *bytes.get(start)?;
    match quote {
        b'"' | b'\'' => {
            let close = bytes[start + 1..].iter().position(|&b| b == quote)?;
            Some(start + 1 + close + 1)
        }
        b'{' => {
            let mut depth = 0usize;
            let mut in_string: Option<u8> = None;
            for (offset, &b) in bytes[start..].iter().enumerate() {
                match in_string {
                    Some(q) if b == q => in_string = None,
                    Some(_) => {}
                    None => match b {
                        b'"' | b'\'' | b'`' => in_string = Some(b),
                        b'{' => depth += 1,
                        b'}' => {
                            depth -= 1;
                            if depth == 0 {
                                return Some(start + offset + 1);
                            }
                        }
                        _ => {}
                    },
                }
            }
            None
        }
        _ => {
            let mut end = start;
            while end < bytes.len() && !bytes[end].is_ascii_whitespace() && bytes[end] != b'>' {
                if bytes[end] == b'/' && bytes.get(end + 1) == Some(&b'>') {
                    break;
                }
                end += 1;
            }
            (end > start).then_some(end)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARROW: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24"><path stroke-width="2" d="M5 12h14"/></svg>"#;

    #[test]
    fn test_render_is_canonical() {
        let markup = Markup::parse(ARROW).unwrap();
        assert_eq!(
            markup.render(),
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24"><path stroke-width="2" d="M5 12h14" /></svg>"#
        );
    }

    #[test]
    fn test_tokenize_kinds() {
        let tokens =
            tokenize("<?xml version=\"1.0\"?><!-- c --><svg><g/>text</svg>").unwrap();
        assert!(matches!(tokens[0], Token::Declaration(_)));
        assert!(matches!(tokens[1], Token::Comment(_)));
        assert!(matches!(&tokens[2], Token::StartTag { name, .. } if name == "svg"));
        assert!(
            matches!(&tokens[3], Token::StartTag { name, self_closing: true, .. } if name == "g")
        );
        assert_eq!(tokens[4], Token::Text("text".to_string()));
        assert_eq!(tokens[5], Token::EndTag("svg".to_string()));
    }

    #[test]
    fn test_quoted_gt_does_not_end_tag() {
        let markup = Markup::parse(r#"<svg><text data-x="a>b">hi</text></svg>"#).unwrap();
        let Token::StartTag { attributes, .. } = &markup.tokens()[1] else {
            panic!("expected a start tag");
        };
        assert_eq!(attributes[0], Attribute::new("data-x", r#""a>b""#));
    }

    #[test]
    fn test_braced_value_with_nested_braces() {
        let markup = Markup::parse("<svg style={{ color: 'red' }}></svg>").unwrap();
        assert_eq!(markup.render(), "<svg style={{ color: 'red' }}></svg>");
    }

    #[test]
    fn test_bare_and_boolean_attributes() {
        let markup = Markup::parse("<svg focusable hidden width=24/>").unwrap();
        assert_eq!(markup.render(), "<svg focusable hidden width=24 />");
    }

    #[test]
    fn test_stray_lt_is_text() {
        let markup = Markup::parse("<svg><text>1 < 2</text></svg>").unwrap();
        assert_eq!(markup.render(), "<svg><text>1 < 2</text></svg>");
    }

    #[test]
    fn test_unterminated_tag_is_an_error() {
        assert!(matches!(Markup::parse("<svg><path d=\"M0"), Err(Error::MarkupError(_))));
        assert!(matches!(Markup::parse("<svg><!-- open"), Err(Error::MarkupError(_))));
    }

    #[test]
    fn test_normalize_attributes() {
        let mut markup = Markup::parse(
            r#"<svg xmlns:xlink="x"><path stroke-width="2" fill-rule="evenodd"/></svg>"#,
        )
        .unwrap();
        markup.normalize_attributes();
        let out = markup.render();
        assert!(out.contains(r#"strokeWidth="2""#));
        assert!(out.contains(r#"fillRule="evenodd""#));
        assert!(out.contains(r#"xmlnsXlink="x""#));
        assert!(!out.contains("stroke-width"));
        assert!(!out.contains("fill-rule"));
    }

    #[test]
    fn test_add_prop_appends_binding() {
        let mut markup = Markup::parse(ARROW).unwrap();
        let count = markup
            .add_prop("path", &Attribute::new("fill", "{color}"), Occurrence::All)
            .unwrap();
        assert_eq!(count, 1);
        assert!(markup.render().contains(r#"<path stroke-width="2" d="M5 12h14" fill={color} />"#));
    }

    #[test]
    fn test_add_prop_replaces_existing_value_in_place() {
        let mut markup = Markup::parse(r##"<svg><path fill="#000" d="M1"/></svg>"##).unwrap();
        markup
            .add_prop("path", &Attribute::new("fill", "{color}"), Occurrence::All)
            .unwrap();
        let out = markup.render();
        assert_eq!(out, r#"<svg><path fill={color} d="M1" /></svg>"#);
        assert_eq!(out.matches("fill=").count(), 1);
    }

    #[test]
    fn test_add_prop_vue_binding_replaces_plain_attribute() {
        let mut markup = Markup::parse(r##"<svg><path fill="#000" d="M1"/></svg>"##).unwrap();
        markup
            .add_prop("path", &Attribute::new(":fill", r#""color""#), Occurrence::All)
            .unwrap();
        assert_eq!(markup.render(), r#"<svg><path :fill="color" d="M1" /></svg>"#);
    }

    #[test]
    fn test_add_prop_keeps_each_occurrence_own_attributes() {
        let mut markup = Markup::parse(r#"<svg><path d="M1"/><path d="M2"/></svg>"#).unwrap();
        let count = markup
            .add_prop("path", &Attribute::new("fill", "{color}"), Occurrence::All)
            .unwrap();
        assert_eq!(count, 2);
        assert_eq!(
            markup.render(),
            r#"<svg><path d="M1" fill={color} /><path d="M2" fill={color} /></svg>"#
        );
    }

    #[test]
    fn test_add_prop_first_occurrence_only() {
        let mut markup = Markup::parse(r#"<svg><svg id="inner"></svg></svg>"#).unwrap();
        markup
            .add_prop("svg", &Attribute::new("className", "{className}"), Occurrence::First)
            .unwrap();
        assert_eq!(
            markup.render(),
            r#"<svg className={className}><svg id="inner"></svg></svg>"#
        );
    }

    #[test]
    fn test_add_prop_missing_element_is_an_error() {
        let mut markup = Markup::parse("<svg><circle r=\"2\"/></svg>").unwrap();
        let result = markup.add_prop("path", &Attribute::new("fill", "{color}"), Occurrence::All);
        match result {
            Err(Error::ElementNotFound { element }) => assert_eq!(element, "path"),
            other => panic!("expected ElementNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_add_element_before_first_sibling() {
        let mut markup =
            Markup::parse(r#"<svg><g><path d="M1"/></g><path d="M2"/></svg>"#).unwrap();
        markup.add_element("title", "{title}", "path").unwrap();
        assert_eq!(
            markup.render(),
            r#"<svg><g><title>{title}</title><path d="M1" /></g><path d="M2" /></svg>"#
        );
    }

    #[test]
    fn test_add_element_falls_back_to_closing_svg() {
        let mut markup = Markup::parse(r#"<svg><circle r="2"/></svg>"#).unwrap();
        markup.add_element("title", "{title}", "path").unwrap();
        assert_eq!(markup.render(), r#"<svg><circle r="2" /><title>{title}</title></svg>"#);
    }

    #[test]
    fn test_add_element_without_svg_is_an_error() {
        let mut markup = Markup::parse("<g></g>").unwrap();
        assert!(matches!(
            markup.add_element("title", "x", "path"),
            Err(Error::ElementNotFound { .. })
        ));
    }

    #[test]
    fn test_remove_element() {
        let mut markup =
            Markup::parse(r#"<svg><title>Old <b>x</b></title><path d="M1"/></svg>"#).unwrap();
        markup.remove_element("title").unwrap();
        assert_eq!(markup.render(), r#"<svg><path d="M1" /></svg>"#);

        let mut unclosed = Markup::parse("<svg><title>Old</svg>").unwrap();
        assert!(unclosed.remove_element("title").is_err());
    }

    #[test]
    fn test_strip_prolog_and_comments() {
        let mut markup = Markup::parse(
            "<?xml version=\"1.0\"?>\n<!DOCTYPE svg><!-- Generator --><svg></svg>",
        )
        .unwrap();
        markup.strip_prolog();
        markup.strip_comments();
        assert_eq!(markup.render(), "\n<svg></svg>");
    }

    #[test]
    fn test_unwrap_cdata() {
        let mut markup =
            Markup::parse("<svg><style><![CDATA[.a{fill:red}]]></style></svg>").unwrap();
        markup.unwrap_cdata();
        markup.escape_jsx_text();
        assert_eq!(markup.render(), "<svg><style>.a{'{'}fill:red{'}'}</style></svg>");
    }

    #[test]
    fn test_escape_jsx_text_angle_brackets() {
        let mut markup = Markup::parse("<svg><text>1 < 2 > 0</text></svg>").unwrap();
        markup.escape_jsx_text();
        assert_eq!(markup.render(), "<svg><text>1 {'<'} 2 {'>'} 0</text></svg>");
    }

    #[test]
    fn test_escape_jsx_text() {
        let mut markup = Markup::parse("<svg><style>.a{fill:red}</style></svg>").unwrap();
        markup.escape_jsx_text();
        assert_eq!(markup.render(), "<svg><style>.a{'{'}fill:red{'}'}</style></svg>");
    }
}
