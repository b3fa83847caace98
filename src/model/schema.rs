//! Column metadata and value types

/// Type held by a column's non-missing values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellType {
    /// No values yet, or every value is missing
    #[default]
    Null,
    Bool,
    Int,
    Float,
    String,
    Date,
    DateTime,
}

impl CellType {
    /// Smallest type holding both `self` and `other`.
    ///
    /// Ints widen to floats and dates to date-times; any other disagreement
    /// falls back to text.
    pub fn widen(self, other: CellType) -> CellType {
        match (self, other) {
            (a, b) if a == b => a,
            (CellType::Null, t) | (t, CellType::Null) => t,
            (CellType::Int, CellType::Float) | (CellType::Float, CellType::Int) => CellType::Float,
            (CellType::Date, CellType::DateTime) | (CellType::DateTime, CellType::Date) => {
                CellType::DateTime
            }
            _ => CellType::String,
        }
    }
}

/// A named column and the type of what it currently holds
#[derive(Debug, Clone)]
pub struct Column {
    pub name: String,
    pub value_type: CellType,
}

impl Column {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_type(name, CellType::Null)
    }

    pub fn with_type(name: impl Into<String>, value_type: CellType) -> Self {
        Self {
            name: name.into(),
            value_type,
        }
    }
}
