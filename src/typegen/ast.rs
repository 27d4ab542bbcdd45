/// Markup tree for Aura component and application files

/// A comment that precedes an element in the markup source.
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Tag name as written, e.g. `aura:attribute` or `div`
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Element>,
    /// Comments immediately preceding this element among its siblings
    pub comments: Vec<Comment>,
}

impl Element {
    pub fn new(name: &str) -> Self {
        Element {
            name: name.to_string(),
            attributes: Vec::new(),
            children: Vec::new(),
            comments: Vec::new(),
        }
    }

    /// Look up an attribute value; attribute names match case-insensitively.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn is_tag(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Direct children with the given tag name, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |child| child.is_tag(name))
    }
}
