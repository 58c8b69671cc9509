/// Which resolved quantity of a declaration an expression reads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Attribute {
    Value,
    Width,
}

/// An integer used for a parameter value or a width. It is either a literal
/// or a reference to another declaration's value or width.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Literal(i64),
    Ref(String, Attribute),
}

impl Expr {
    /// Parses the textual form of an expression: an integer literal, `NAME`,
    /// `NAME.value`, or `NAME.width`.
    pub fn parse(text: &str) -> Option<Expr> {
        let text = text.trim();
        if let Ok(lit) = text.parse::<i64>() {
            return Some(Expr::Literal(lit));
        }

        let (name, attr) = match text.rsplit_once('.') {
            None => (text, Attribute::Value),
            Some((name, "value")) => (name, Attribute::Value),
            Some((name, "width")) => (name, Attribute::Width),
            Some(_) => return None,
        };

        if is_identifier(name) {
            Some(Expr::Ref(name.into(), attr))
        } else {
            None
        }
    }

    /// The declaration this expression reads, if any.
    pub fn reference(&self) -> Option<&str> {
        match self {
            Expr::Literal(_) => None,
            Expr::Ref(name, _) => Some(name),
        }
    }
}

pub fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
