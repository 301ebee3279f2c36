//! Lookup of enumeration members for enumeration-typed columns.

use anyhow::{Context, Result};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Supplies the legal values of a named enumeration
pub trait EnumLookup {
    /// Members of `type_name`, or `None` if no such enumeration is known
    fn members(&self, type_name: &str) -> Option<HashSet<String>>;
}

/// Lookup that knows no enumerations
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEnums;

impl EnumLookup for NoEnums {
    fn members(&self, _type_name: &str) -> Option<HashSet<String>> {
        None
    }
}

impl EnumLookup for HashMap<String, HashSet<String>> {
    fn members(&self, type_name: &str) -> Option<HashSet<String>> {
        self.get(type_name).cloned()
    }
}

impl<F> EnumLookup for F
where
    F: Fn(&str) -> Option<HashSet<String>>,
{
    fn members(&self, type_name: &str) -> Option<HashSet<String>> {
        self(type_name)
    }
}

/// Read enumerations from a JSON object mapping names to member lists
pub fn load_enums(path: impl AsRef<Path>) -> Result<HashMap<String, HashSet<String>>> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("Invalid enumeration file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn dishes() -> HashSet<String> {
        ["Steak", "Stew"].iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_map_lookup() {
        let mut enums = HashMap::new();
        enums.insert("Dish".to_string(), dishes());

        assert_eq!(enums.members("Dish"), Some(dishes()));
        assert_eq!(enums.members("Season"), None);
        assert_eq!(NoEnums.members("Dish"), None);
    }

    #[test]
    fn test_closure_lookup() {
        let lookup = |name: &str| if name == "Dish" { Some(dishes()) } else { None };
        assert_eq!(lookup.members("Dish"), Some(dishes()));
        assert_eq!(lookup.members("Other"), None);
    }

    #[test]
    fn test_load_enums() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "Dish": ["Steak", "Stew"] }}"#).unwrap();

        let enums = load_enums(file.path()).unwrap();
        assert_eq!(enums.members("Dish"), Some(dishes()));
    }
}
