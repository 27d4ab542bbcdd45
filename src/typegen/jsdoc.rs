/// JSDoc tag extraction for helper properties
///
/// Only the tags that carry types are read: `@param {T} name`,
/// `@returns {T}` (or `@return`), and `@type {T}`. Unlike markup overrides,
/// JSDoc type expressions may nest braces (`{{a: {b: string}}}`).

use indexmap::IndexMap;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocTags {
    pub params: IndexMap<String, String>,
    pub returns: Option<String>,
    pub type_tag: Option<String>,
}

impl DocTags {
    pub fn is_empty(&self) -> bool {
        self.params.is_empty() && self.returns.is_none() && self.type_tag.is_none()
    }
}

/// `/** ... */` blocks are documentation; `//` and `/* */` comments are not.
pub fn is_doc_comment(text: &str) -> bool {
    text.starts_with("/**") && !text.starts_with("/**/")
}

/// Read the type tags of every doc comment, later tags winning.
pub fn parse_doc_tags<'c>(comments: impl IntoIterator<Item = &'c str>) -> DocTags {
    let mut tags = DocTags::default();
    for comment in comments.into_iter().filter(|text| is_doc_comment(text)) {
        let body = comment
            .trim_start_matches("/**")
            .trim_end_matches("*/");
        read_tags(body, &mut tags);
    }
    tags
}

fn read_tags(body: &str, tags: &mut DocTags) {
    let mut cursor = Cursor { text: body, pos: 0 };

    while let Some(at) = cursor.find_tag_start() {
        cursor.pos = at + 1;
        let tag = cursor.take_while(|ch| ch.is_alphanumeric());
        cursor.skip_whitespace();
        let type_expr = cursor.take_braced();

        match tag {
            "param" | "arg" | "argument" => {
                cursor.skip_whitespace();
                let raw_name = cursor.take_while(|ch| !ch.is_whitespace());
                let name = param_name(raw_name);
                if let (Some(type_expr), false) = (type_expr, name.is_empty()) {
                    tags.params.insert(name.to_string(), type_expr.to_string());
                }
            }
            "returns" | "return" => {
                if let Some(type_expr) = type_expr {
                    tags.returns = Some(type_expr.to_string());
                }
            }
            "type" => {
                if let Some(type_expr) = type_expr {
                    tags.type_tag = Some(type_expr.to_string());
                }
            }
            _ => {}
        }
    }
}

/// `[name=default]` and `...name` both document `name`.
fn param_name(raw: &str) -> &str {
    let name = raw.trim_start_matches('[').trim_end_matches(']');
    let name = name.split('=').next().unwrap_or(name);
    name.trim_start_matches("...")
}

struct Cursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Next `@` that starts a line-level tag rather than sitting inside a word
    fn find_tag_start(&self) -> Option<usize> {
        let mut search = self.pos;
        while let Some(offset) = self.text[search..].find('@') {
            let at = search + offset;
            let preceding = self.text[..at].chars().next_back();
            if preceding.map_or(true, |ch| ch.is_whitespace() || ch == '*') {
                return Some(at);
            }
            search = at + 1;
        }
        None
    }

    fn take_while(&mut self, keep: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        while let Some(ch) = self.text[self.pos..].chars().next() {
            if !keep(ch) {
                break;
            }
            self.pos += ch.len_utf8();
        }
        &self.text[start..self.pos]
    }

    fn skip_whitespace(&mut self) {
        self.take_while(char::is_whitespace);
    }

    /// Balanced `{...}` contents, trimmed. Unbalanced braces yield `None`.
    fn take_braced(&mut self) -> Option<&'a str> {
        if !self.text[self.pos..].starts_with('{') {
            return None;
        }
        let start = self.pos + 1;
        let mut depth = 0usize;
        for (offset, ch) in self.text[self.pos..].char_indices() {
            match ch {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        let end = self.pos + offset;
                        self.pos = end + 1;
                        return Some(self.text[start..end].trim());
                    }
                }
                _ => {}
            }
        }
        None
    }
}
