/// Type overrides embedded in markup comments
///
/// Authors annotate `aura:method` and `aura:attribute` elements with comments
/// such as `<!-- @type {T,R} @returns {Promise<R>} -->` to supply types that
/// cannot be expressed through the `type` attribute.

use indexmap::IndexMap;
use tracing::debug;

use crate::typegen::ast::Comment;

pub type TypeOverrides = IndexMap<String, String>;

/// Collect every `@key {type}` pair from the comments, later pairs winning.
///
/// Values end at the first `}`: nested braces are not supported and yield a
/// truncated value. An unterminated `{` takes the rest of the comment.
pub fn parse_overrides(comments: &[Comment]) -> TypeOverrides {
    let mut overrides = TypeOverrides::new();
    for comment in comments {
        debug!(comment = %comment.text, "reading type overrides");
        scan_comment(&comment.text, &mut overrides);
    }
    overrides
}

fn scan_comment(text: &str, overrides: &mut TypeOverrides) {
    let mut key: Option<&str> = None;
    let mut pos = 0;

    while let Some(ch) = text[pos..].chars().next() {
        match ch {
            '@' => {
                let start = pos + 1;
                match text[start..].find(char::is_whitespace) {
                    Some(len) => {
                        key = Some(&text[start..start + len]);
                        pos = start + len;
                    }
                    None => return,
                }
            }
            '{' => {
                let start = pos + 1;
                let (value, next) = match text[start..].find('}') {
                    Some(len) => (&text[start..start + len], start + len + 1),
                    None => (&text[start..], text.len()),
                };
                if let Some(key) = key {
                    overrides.insert(key.to_string(), value.to_string());
                }
                pos = next;
            }
            _ => pos += ch.len_utf8(),
        }
    }
}
