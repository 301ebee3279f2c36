//! The type lattice for cell expressions and declared column types.

use std::fmt;

/// Semantic type of a cell expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpressionType {
    /// Supertype of every type; the type of an empty cell
    Top,
    Boolean,
    String,
    Integer,
    Long,
    Double,
    Date,
}

impl ExpressionType {
    /// Check whether `self` is a subtype of `other`.
    ///
    /// `Top` is above everything and the numeric tower holds
    /// `Integer <: Long <: Double`. All other pairs are related only by
    /// identity.
    pub fn is_subtype_of(&self, other: ExpressionType) -> bool {
        use ExpressionType::*;

        match (self, other) {
            (_, Top) => true,
            (Integer, Long) | (Integer, Double) | (Long, Double) => true,
            (t, o) => *t == o,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            ExpressionType::Integer | ExpressionType::Long | ExpressionType::Double
        )
    }

    /// Map a short type reference (`"integer"`, `"date"`, ...) to a base type
    pub fn from_name(name: &str) -> Option<ExpressionType> {
        match name.trim().to_lowercase().as_str() {
            "integer" => Some(ExpressionType::Integer),
            "long" => Some(ExpressionType::Long),
            "double" => Some(ExpressionType::Double),
            "string" => Some(ExpressionType::String),
            "boolean" => Some(ExpressionType::Boolean),
            "date" => Some(ExpressionType::Date),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExpressionType::Top => "TOP",
            ExpressionType::Boolean => "BOOLEAN",
            ExpressionType::String => "STRING",
            ExpressionType::Integer => "INTEGER",
            ExpressionType::Long => "LONG",
            ExpressionType::Double => "DOUBLE",
            ExpressionType::Date => "DATE",
        }
    }
}

impl fmt::Display for ExpressionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The type a decision-table column declares for its cells.
///
/// A declared type is a base [`ExpressionType`], optionally refined by the
/// name of an external enumeration whose members are the legal string
/// values of the column.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeclaredType {
    pub base: ExpressionType,
    pub enumeration: Option<String>,
}

impl DeclaredType {
    pub fn new(base: ExpressionType) -> Self {
        Self {
            base,
            enumeration: None,
        }
    }

    pub fn enumeration(name: impl Into<String>) -> Self {
        Self {
            base: ExpressionType::String,
            enumeration: Some(name.into()),
        }
    }

    /// Build a declared type from a column's type reference.
    ///
    /// Missing or blank references declare `Top`. Unknown names are taken to
    /// be enumeration names.
    pub fn from_type_ref(type_ref: Option<&str>) -> Self {
        match type_ref.map(str::trim).filter(|s| !s.is_empty()) {
            None => Self::new(ExpressionType::Top),
            Some(name) => match ExpressionType::from_name(name) {
                Some(base) => Self::new(base),
                None => Self::enumeration(name),
            },
        }
    }
}

impl From<ExpressionType> for DeclaredType {
    fn from(base: ExpressionType) -> Self {
        Self::new(base)
    }
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.enumeration {
            Some(name) => write!(f, "{} ({})", self.base, name),
            None => write!(f, "{}", self.base),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ExpressionType::*;

    const ALL: [ExpressionType; 7] = [Top, Boolean, String, Integer, Long, Double, Date];

    #[test]
    fn test_top_is_supertype_of_everything() {
        for t in ALL {
            assert!(t.is_subtype_of(Top), "{} should be a subtype of TOP", t);
        }
        assert!(!Top.is_subtype_of(Integer));
    }

    #[test]
    fn test_numeric_tower() {
        assert!(Integer.is_subtype_of(Long));
        assert!(Integer.is_subtype_of(Double));
        assert!(Long.is_subtype_of(Double));

        assert!(!Double.is_subtype_of(Long));
        assert!(!Long.is_subtype_of(Integer));
        assert!(!Double.is_subtype_of(Integer));
    }

    #[test]
    fn test_unrelated_types() {
        assert!(String.is_subtype_of(String));
        assert!(!String.is_subtype_of(Integer));
        assert!(!Boolean.is_subtype_of(String));
        assert!(!Date.is_subtype_of(Long));
        assert!(!Integer.is_subtype_of(Date));
    }

    #[test]
    fn test_is_numeric() {
        let numeric: Vec<_> = ALL.iter().filter(|t| t.is_numeric()).collect();
        assert_eq!(numeric, vec![&Integer, &Long, &Double]);
    }

    #[test]
    fn test_declared_type_from_type_ref() {
        assert_eq!(DeclaredType::from_type_ref(Some("integer")).base, Integer);
        assert_eq!(DeclaredType::from_type_ref(Some("Long")).base, Long);
        assert_eq!(DeclaredType::from_type_ref(Some(" date ")).base, Date);
        assert_eq!(DeclaredType::from_type_ref(None).base, Top);
        assert_eq!(DeclaredType::from_type_ref(Some("  ")).base, Top);

        let declared = DeclaredType::from_type_ref(Some("com.example.Dish"));
        assert_eq!(declared.base, String);
        assert_eq!(declared.enumeration.as_deref(), Some("com.example.Dish"));
        assert_eq!(declared.to_string(), "STRING (com.example.Dish)");
    }
}
