use std::borrow::Cow;
use std::fmt;

use bytes::Bytes;

/// A decoded value of the external term format.
///
/// Terms are plain owned trees: decoding produces one, and nothing in the
/// bridge keeps it beyond the frame it came from.
#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    /// An interned symbolic name such as `command` or `ping`.
    Atom(String),
    /// Any integer that fits in 64 bits.
    Integer(i64),
    /// An IEEE-754 double. `NaN` never compares equal, so it does not round-trip by `==`.
    Float(f64),
    /// A fixed-arity ordered sequence.
    Tuple(Vec<Term>),
    /// A cons list. `tail` is `None` for a proper list; an improper tail is
    /// never itself the empty list.
    List {
        elements: Vec<Term>,
        tail: Option<Box<Term>>,
    },
    /// A byte run (`<<...>>`).
    Binary(Bytes),
    /// A compact byte list (`STRING_EXT`), at most 65535 bytes.
    String(Vec<u8>),
}

impl Term {
    pub fn atom(name: impl Into<String>) -> Self {
        Term::Atom(name.into())
    }

    pub fn tuple(elements: impl Into<Vec<Term>>) -> Self {
        Term::Tuple(elements.into())
    }

    /// A proper list.
    pub fn list(elements: impl Into<Vec<Term>>) -> Self {
        Term::List {
            elements: elements.into(),
            tail: None,
        }
    }

    /// The empty list `[]`.
    pub fn nil() -> Self {
        Term::list(Vec::<Term>::new())
    }

    /// A list ending in `tail`. An empty-list tail yields a proper list.
    pub fn improper_list(elements: impl Into<Vec<Term>>, tail: Term) -> Self {
        let tail = if tail.is_nil() {
            None
        } else {
            Some(Box::new(tail))
        };
        Term::List {
            elements: elements.into(),
            tail,
        }
    }

    pub fn binary(bytes: impl Into<Bytes>) -> Self {
        Term::Binary(bytes.into())
    }

    pub fn string(bytes: impl Into<Vec<u8>>) -> Self {
        Term::String(bytes.into())
    }

    /// The atom name, if this is an atom.
    pub fn as_atom(&self) -> Option<&str> {
        match self {
            Term::Atom(name) => Some(name),
            _ => None,
        }
    }

    pub fn is_atom(&self, name: &str) -> bool {
        self.as_atom() == Some(name)
    }

    /// Tuple elements, if this is a tuple.
    pub fn as_tuple(&self) -> Option<&[Term]> {
        match self {
            Term::Tuple(elements) => Some(elements),
            _ => None,
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Term::List { elements, tail: None } if elements.is_empty())
    }

    /// Text carried by a string-like term (binary, byte string or atom).
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Term::Atom(name) => Some(Cow::Borrowed(name)),
            Term::Binary(bytes) => Some(String::from_utf8_lossy(bytes)),
            Term::String(bytes) => Some(String::from_utf8_lossy(bytes)),
            _ => None,
        }
    }

    /// Short name of the variant, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Term::Atom(_) => "atom",
            Term::Integer(_) => "integer",
            Term::Float(_) => "float",
            Term::Tuple(_) => "tuple",
            Term::List { .. } => "list",
            Term::Binary(_) => "binary",
            Term::String(_) => "string",
        }
    }
}

impl From<&str> for Term {
    fn from(name: &str) -> Self {
        Term::atom(name)
    }
}

impl From<i64> for Term {
    fn from(value: i64) -> Self {
        Term::Integer(value)
    }
}

impl From<f64> for Term {
    fn from(value: f64) -> Self {
        Term::Float(value)
    }
}

/// Renders terms in the runtime's own literal syntax, e.g. `{command,ping}`.
impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Atom(name) => write_atom(f, name),
            Term::Integer(value) => write!(f, "{value}"),
            Term::Float(value) => write!(f, "{value:?}"),
            Term::Tuple(elements) => {
                f.write_str("{")?;
                write_seq(f, elements)?;
                f.write_str("}")
            }
            Term::List { elements, tail } => {
                f.write_str("[")?;
                write_seq(f, elements)?;
                if let Some(tail) = tail {
                    write!(f, "|{tail}")?;
                }
                f.write_str("]")
            }
            Term::Binary(bytes) => match printable(bytes) {
                Some(text) => write!(f, "<<{text:?}>>"),
                None => {
                    f.write_str("<<")?;
                    write_bytes(f, bytes)?;
                    f.write_str(">>")
                }
            },
            Term::String(bytes) => match printable(bytes) {
                Some(text) => write!(f, "{text:?}"),
                None => {
                    f.write_str("[")?;
                    write_bytes(f, bytes)?;
                    f.write_str("]")
                }
            },
        }
    }
}

fn write_atom(f: &mut fmt::Formatter<'_>, name: &str) -> fmt::Result {
    let bare = name.starts_with(|c: char| c.is_ascii_lowercase())
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '@');
    if bare {
        f.write_str(name)
    } else {
        write!(f, "'{}'", name.replace('\'', "\\'"))
    }
}

fn write_seq(f: &mut fmt::Formatter<'_>, elements: &[Term]) -> fmt::Result {
    for (i, element) in elements.iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        write!(f, "{element}")?;
    }
    Ok(())
}

fn write_bytes(f: &mut fmt::Formatter<'_>, bytes: &[u8]) -> fmt::Result {
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        write!(f, "{b}")?;
    }
    Ok(())
}

fn printable(bytes: &[u8]) -> Option<&str> {
    let text = std::str::from_utf8(bytes).ok()?;
    (!text.is_empty() && text.chars().all(|c| !c.is_control())).then_some(text)
}
