/// Parser for Aura component markup
///
/// The markup is XML with Aura's conventions: namespaced tags, expression
/// attributes (`{!v.value}`), and free-form text bodies. Parsing happens in
/// two stages. The first produces a raw node tree that still contains comment
/// and text siblings. The second attaches each run of comments to the element
/// that follows it, so type overrides written in comments can be read straight
/// off the element they annotate.

use crate::typegen::ast::{Comment, Element};

/// Location and description of a markup syntax error.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxError {
    pub line: usize,
    pub column: usize,
    pub message: String,
}

#[derive(Debug)]
enum Node {
    Element(RawElement),
    Comment(String),
    /// Non-whitespace character data; only its position matters
    Text,
}

#[derive(Debug)]
struct RawElement {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
}

pub struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

/// Parse markup text into its root element with comments attached.
pub fn parse_markup(source: &str) -> Result<Element, SyntaxError> {
    let mut parser = Parser::new(source);
    let (leading_comments, root) = parser.parse_document()?;
    Ok(promote_root(leading_comments, root))
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        Parser {
            input: input.strip_prefix('\u{feff}').unwrap_or(input),
            pos: 0,
        }
    }

    /// Convert the current byte position to (line, column) for error messages
    fn line_col(&self) -> (usize, usize) {
        let consumed = &self.input[..self.pos];
        let line = consumed.matches('\n').count() + 1;
        let column = match consumed.rfind('\n') {
            Some(newline) => consumed[newline + 1..].chars().count() + 1,
            None => consumed.chars().count() + 1,
        };
        (line, column)
    }

    fn error(&self, message: impl Into<String>) -> SyntaxError {
        let (line, column) = self.line_col();
        SyntaxError {
            line,
            column,
            message: message.into(),
        }
    }

    fn parse_document(&mut self) -> Result<(Vec<String>, RawElement), SyntaxError> {
        let mut comments = Vec::new();
        let mut root = None;

        loop {
            self.skip_whitespace();
            if self.peek_char().is_none() {
                break;
            }

            if self.starts_with("<?") {
                self.skip_past("?>", "Unterminated processing instruction")?;
            } else if self.starts_with("<!--") {
                let comment = self.parse_comment()?;
                if root.is_none() {
                    comments.push(comment);
                }
            } else if self.starts_with("<!") {
                // DOCTYPE and other declarations carry nothing we need
                self.skip_past(">", "Unterminated declaration")?;
            } else if self.peek_char() == Some('<') {
                if root.is_some() {
                    return Err(self.error("Unexpected element after the root element"));
                }
                root = Some(self.parse_element()?);
            } else {
                return Err(self.error("Unexpected text outside of the root element"));
            }
        }

        match root {
            Some(root) => Ok((comments, root)),
            None => Err(self.error("Missing root element")),
        }
    }

    fn parse_element(&mut self) -> Result<RawElement, SyntaxError> {
        self.expect_char('<')?;
        let name = self.parse_name()?;
        let mut attributes = Vec::new();

        loop {
            self.skip_whitespace();
            match self.peek_char() {
                Some('/') => {
                    self.advance_char();
                    self.expect_char('>')?;
                    return Ok(RawElement {
                        name,
                        attributes,
                        children: Vec::new(),
                    });
                }
                Some('>') => {
                    self.advance_char();
                    break;
                }
                Some(_) => attributes.push(self.parse_attribute()?),
                None => return Err(self.error(format!("Unclosed start tag <{}>", name))),
            }
        }

        let children = self.parse_children(&name)?;
        Ok(RawElement {
            name,
            attributes,
            children,
        })
    }

    fn parse_children(&mut self, parent: &str) -> Result<Vec<Node>, SyntaxError> {
        let mut children = Vec::new();

        loop {
            if self.peek_char().is_none() {
                return Err(self.error(format!("Unclosed tag <{}>", parent)));
            }

            if self.starts_with("</") {
                self.advance_by(2);
                let closing = self.parse_name()?;
                self.skip_whitespace();
                self.expect_char('>')?;
                if closing != parent {
                    return Err(self.error(format!(
                        "Mismatched closing tag: expected </{}>, found </{}>",
                        parent, closing
                    )));
                }
                return Ok(children);
            } else if self.starts_with("<!--") {
                children.push(Node::Comment(self.parse_comment()?));
            } else if self.starts_with("<![CDATA[") {
                self.advance_by("<![CDATA[".len());
                self.skip_past("]]>", "Unterminated CDATA section")?;
                children.push(Node::Text);
            } else if self.starts_with("<?") {
                self.skip_past("?>", "Unterminated processing instruction")?;
            } else if self.peek_char() == Some('<') {
                children.push(Node::Element(self.parse_element()?));
            } else {
                let start = self.pos;
                while let Some(ch) = self.peek_char() {
                    if ch == '<' {
                        break;
                    }
                    self.advance_char();
                }
                if !self.input[start..self.pos].trim().is_empty() {
                    children.push(Node::Text);
                }
            }
        }
    }

    fn parse_comment(&mut self) -> Result<String, SyntaxError> {
        self.advance_by("<!--".len());
        let start = self.pos;
        match self.input[self.pos..].find("-->") {
            Some(offset) => {
                let text = self.input[start..start + offset].to_string();
                self.pos = start + offset + "-->".len();
                Ok(text)
            }
            None => Err(self.error("Unterminated comment")),
        }
    }

    fn parse_attribute(&mut self) -> Result<(String, String), SyntaxError> {
        let name = self.parse_name()?;
        self.skip_whitespace();
        if self.peek_char() != Some('=') {
            return Err(self.error(format!("Attribute '{}' is missing a value", name)));
        }
        self.advance_char();
        self.skip_whitespace();

        let quote = match self.peek_char() {
            Some(q @ ('"' | '\'')) => q,
            _ => return Err(self.error(format!("Expected quoted value for attribute '{}'", name))),
        };
        self.advance_char();

        let start = self.pos;
        while let Some(ch) = self.peek_char() {
            if ch == quote {
                let value = decode_entities(&self.input[start..self.pos]);
                self.advance_char();
                return Ok((name, value));
            }
            self.advance_char();
        }

        Err(self.error(format!("Unterminated value for attribute '{}'", name)))
    }

    fn parse_name(&mut self) -> Result<String, SyntaxError> {
        let start = self.pos;
        while let Some(ch) = self.peek_char() {
            if ch.is_whitespace() || matches!(ch, '/' | '>' | '=' | '<' | '"' | '\'') {
                break;
            }
            self.advance_char();
        }

        if start == self.pos {
            return Err(self.error("Expected a name"));
        }

        Ok(self.input[start..self.pos].to_string())
    }

    fn skip_past(&mut self, terminator: &str, message: &str) -> Result<(), SyntaxError> {
        match self.input[self.pos..].find(terminator) {
            Some(offset) => {
                self.pos += offset + terminator.len();
                Ok(())
            }
            None => Err(self.error(message)),
        }
    }

    fn expect_char(&mut self, expected: char) -> Result<(), SyntaxError> {
        match self.peek_char() {
            Some(ch) if ch == expected => {
                self.pos += ch.len_utf8();
                Ok(())
            }
            Some(ch) => Err(self.error(format!("Expected '{}', found '{}'", expected, ch))),
            None => Err(self.error(format!("Expected '{}', found EOF", expected))),
        }
    }

    fn starts_with(&self, prefix: &str) -> bool {
        self.input[self.pos..].starts_with(prefix)
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance_char(&mut self) {
        if let Some(ch) = self.peek_char() {
            self.pos += ch.len_utf8();
        }
    }

    /// Advance over an ASCII prefix already checked with `starts_with`
    fn advance_by(&mut self, bytes: usize) {
        self.pos += bytes;
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek_char() {
            if !ch.is_whitespace() {
                break;
            }
            self.advance_char();
        }
    }
}

fn decode_entities(raw: &str) -> String {
    if !raw.contains('&') {
        return raw.to_string();
    }

    let mut decoded = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        decoded.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let replacement = tail.find(';').and_then(|semi| {
            let entity = &tail[1..semi];
            let ch = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                _ if entity.starts_with("#x") || entity.starts_with("#X") => {
                    u32::from_str_radix(&entity[2..], 16).ok().and_then(char::from_u32)
                }
                _ if entity.starts_with('#') => {
                    entity[1..].parse::<u32>().ok().and_then(char::from_u32)
                }
                _ => None,
            };
            ch.map(|ch| (ch, semi + 1))
        });

        match replacement {
            Some((ch, consumed)) => {
                decoded.push(ch);
                rest = &tail[consumed..];
            }
            None => {
                // Aura expressions routinely contain a bare `&&`
                decoded.push('&');
                rest = &tail[1..];
            }
        }
    }
    decoded.push_str(rest);
    decoded
}

fn promote_root(leading_comments: Vec<String>, root: RawElement) -> Element {
    let mut element = promote(root);
    element.comments = leading_comments
        .into_iter()
        .map(|text| Comment { text })
        .collect();
    element
}

/// Attach each run of comment siblings to the element that follows it.
///
/// Comments followed by text, or by nothing at all, are dropped.
fn promote(raw: RawElement) -> Element {
    let mut children = Vec::new();
    let mut pending: Vec<Comment> = Vec::new();

    for node in raw.children {
        match node {
            Node::Comment(text) => pending.push(Comment { text }),
            Node::Text => pending.clear(),
            Node::Element(child) => {
                let mut child = promote(child);
                child.comments = std::mem::take(&mut pending);
                children.push(child);
            }
        }
    }

    Element {
        name: raw.name,
        attributes: raw.attributes,
        children,
        comments: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_component_with_prolog() {
        let source = r#"<?xml version="1.0" encoding="UTF-8"?>
<aura:component controller="Ctrl">
    <aura:attribute name="label" type="String" default="Hi &amp; bye"/>
    {!v.body}
    <div class='wrapper'><c:Child aura:id="child"></c:Child></div>
</aura:component>"#;

        let root = parse_markup(source).unwrap();
        assert_eq!(root.name, "aura:component");
        assert_eq!(root.attribute("controller"), Some("Ctrl"));
        assert_eq!(root.children.len(), 2);
        assert_eq!(root.children[0].attribute("default"), Some("Hi & bye"));
        assert_eq!(root.children[1].attribute("class"), Some("wrapper"));
        assert_eq!(root.children[1].children[0].name, "c:Child");
    }

    #[test]
    fn test_comments_attach_to_following_element() {
        let source = r#"<aura:component>
    <!-- first -->
    <!-- second -->
    <aura:method name="run">
        <!-- @type {T} -->
        <aura:attribute name="params" type="Map"/>
    </aura:method>
    <!-- dangling -->
</aura:component>"#;

        let root = parse_markup(source).unwrap();
        assert_eq!(root.children.len(), 1);
        let method = &root.children[0];
        let texts: Vec<&str> = method.comments.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec![" first ", " second "]);
        assert_eq!(method.children[0].comments[0].text, " @type {T} ");
    }

    #[test]
    fn test_comment_before_text_is_dropped() {
        let source = "<aura:component><!-- lost -->text<div/></aura:component>";
        let root = parse_markup(source).unwrap();
        assert!(root.children[0].comments.is_empty());
    }

    #[test]
    fn test_bare_ampersand_in_expression() {
        let source = r#"<aura:component><aura:if isTrue="{!v.a && v.b}"/></aura:component>"#;
        let root = parse_markup(source).unwrap();
        assert_eq!(root.children[0].attribute("isTrue"), Some("{!v.a && v.b}"));
    }

    #[test]
    fn test_unclosed_tag_is_an_error() {
        let err = parse_markup("<aura:component>\n  <div>\n</aura:component>").unwrap_err();
        assert_eq!(err.line, 3);
        assert!(err.message.contains("Mismatched closing tag"), "{}", err.message);

        let err = parse_markup("<aura:component>").unwrap_err();
        assert!(err.message.contains("Unclosed tag <aura:component>"));
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let err = parse_markup("  <!-- nothing here -->  ").unwrap_err();
        assert_eq!(err.message, "Missing root element");
    }
}
