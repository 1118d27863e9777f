/// Direction of a sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Column a list query can be ordered by.
pub trait SortField: Copy {
    /// Resolve the public name used in `?ordering=`.
    fn from_name(name: &str) -> Option<Self>;
}

/// Ordering requested for a list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder<F> {
    pub field: F,
    pub direction: SortDirection,
}

impl<F: SortField> SortOrder<F> {
    pub fn asc(field: F) -> Self {
        Self {
            field,
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: F) -> Self {
        Self {
            field,
            direction: SortDirection::Desc,
        }
    }

    /// Parse an `?ordering=` value such as `title` or `-created_at`.
    ///
    /// Only the first comma-separated term is used. Unknown fields yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let term = raw.split(',').map(str::trim).find(|term| !term.is_empty())?;
        let (direction, name) = match term.strip_prefix('-') {
            Some(name) => (SortDirection::Desc, name),
            None => (SortDirection::Asc, term),
        };

        F::from_name(name).map(|field| Self { field, direction })
    }

    /// Parse `raw` when present, falling back to `default` otherwise.
    pub fn parse_or(raw: Option<&str>, default: Self) -> Self {
        raw.and_then(Self::parse).unwrap_or(default)
    }
}
