use std::{borrow::Cow, fmt};

///
/// PathSegment
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PathSegment {
    Field(Cow<'static, str>),
    Key,
    Value,
    Item,
}

impl From<&'static str> for PathSegment {
    fn from(s: &'static str) -> Self {
        Self::Field(Cow::Borrowed(s))
    }
}

impl From<String> for PathSegment {
    fn from(s: String) -> Self {
        Self::Field(Cow::Owned(s))
    }
}

///
/// FieldPath
///
/// Human-readable location of a value inside a record, rendered as
/// `TypeName ~ field.subfield.(key).(item)`.
/// Paths are built top-down; every helper returns a new path so a parent
/// path can be reused for sibling fields.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldPath {
    root: &'static str,
    segments: Vec<PathSegment>,
}

impl FieldPath {
    #[must_use]
    pub const fn new(root: &'static str) -> Self {
        Self {
            root,
            segments: Vec::new(),
        }
    }

    /// Shorthand for `FieldPath::new(root).field(field)`.
    #[must_use]
    pub fn at(root: &'static str, field: impl Into<PathSegment>) -> Self {
        Self::new(root).push(field.into())
    }

    #[must_use]
    pub fn field(&self, field: impl Into<PathSegment>) -> Self {
        self.clone().push(field.into())
    }

    #[must_use]
    pub fn key(&self) -> Self {
        self.clone().push(PathSegment::Key)
    }

    #[must_use]
    pub fn value(&self) -> Self {
        self.clone().push(PathSegment::Value)
    }

    #[must_use]
    pub fn item(&self) -> Self {
        self.clone().push(PathSegment::Item)
    }

    #[must_use]
    pub const fn root(&self) -> &'static str {
        self.root
    }

    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    fn push(mut self, seg: PathSegment) -> Self {
        self.segments.push(seg);
        self
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.root)?;

        for (i, seg) in self.segments.iter().enumerate() {
            let sep = if i == 0 { " ~ " } else { "." };
            match seg {
                PathSegment::Field(name) => write!(f, "{sep}{name}")?,
                PathSegment::Key => write!(f, "{sep}(key)")?,
                PathSegment::Value => write!(f, "{sep}(value)")?,
                PathSegment::Item => write!(f, "{sep}(item)")?,
            }
        }

        Ok(())
    }
}

///
/// TESTS
///
