//! Sort orders supplied by the caller for injection into a query.

/// Sort direction keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    /// The keyword as injected into the rendered query.
    pub fn keyword(self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }
}

/// One sort key: an unqualified attribute name of the primary entity, a
/// direction, and an optional case fold.
///
/// The property is qualified with the query's primary alias at render time
/// (`name` becomes `u.name` in `… FROM User u …`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOrder {
    property: String,
    direction: Direction,
    ignore_case: bool,
}

impl SortOrder {
    pub fn new(property: impl Into<String>, direction: Direction) -> Self {
        Self {
            property: property.into(),
            direction,
            ignore_case: false,
        }
    }

    pub fn asc(property: impl Into<String>) -> Self {
        Self::new(property, Direction::Asc)
    }

    pub fn desc(property: impl Into<String>) -> Self {
        Self::new(property, Direction::Desc)
    }

    /// Request wrapping the sort key in `lower(…)`.
    pub fn ignoring_case(mut self) -> Self {
        self.ignore_case = true;
        self
    }

    pub fn property(&self) -> &str {
        &self.property
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn ignore_case(&self) -> bool {
        self.ignore_case
    }
}
