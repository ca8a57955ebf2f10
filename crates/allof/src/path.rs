/// Token is a single segment of a Path.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub enum Token {
    /// Integer index of a JSON array.
    Index(usize),
    /// JSON object property name, without escaping.
    Property(String),
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Index(ind) => write!(f, "{ind}"),
            Token::Property(prop) => write!(f, "{}", prop.replace('~', "~0").replace('/', "~1")),
        }
    }
}

impl From<usize> for Token {
    fn from(ind: usize) -> Self {
        Token::Index(ind)
    }
}

impl From<&str> for Token {
    fn from(prop: &str) -> Self {
        Token::Property(prop.to_string())
    }
}

impl From<String> for Token {
    fn from(prop: String) -> Self {
        Token::Property(prop)
    }
}

/// Path locates a schema node from the document root.
/// It's used only to report where a merge failed, and displays
/// as a slash-joined JSON pointer ("/properties/a/items/0").
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Path(pub Vec<Token>);

impl Path {
    /// Builds an empty Path which references the document root.
    pub fn root() -> Path {
        Path(Vec::new())
    }

    /// Returns a new Path which extends this one with `token`.
    ///
    /// ```
    /// use allof::{Path, Token};
    ///
    /// let path = Path::root().child("properties").child("a").child(2usize);
    /// assert_eq!(path.to_string(), "/properties/a/2");
    /// assert_eq!(path.0.last(), Some(&Token::Index(2)));
    /// ```
    pub fn child(&self, token: impl Into<Token>) -> Path {
        let mut tokens = self.0.clone();
        tokens.push(token.into());
        Path(tokens)
    }

    pub fn push(&mut self, token: impl Into<Token>) {
        self.0.push(token.into());
    }

    pub fn pop(&mut self) -> Option<Token> {
        self.0.pop()
    }
}

impl std::fmt::Display for Path {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            return write!(f, "/");
        }
        for token in &self.0 {
            write!(f, "/{token}")?;
        }
        Ok(())
    }
}
