use serde::{Deserialize, Serialize};

/// An entity the search pipeline can inspect: a stable identifier plus named
/// text fields. Absent fields return `None` and are treated as non-matching,
/// never as an error.
pub trait Searchable {
    fn id(&self) -> &str;
    fn field(&self, name: &str) -> Option<&str>;
}

/// One rentable item as served by the catalog backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    /// Daily rate in BRL, when published.
    #[serde(default)]
    pub daily_price: Option<f64>,
}

impl Searchable for CatalogItem {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "name" => Some(self.name.as_str()),
            "description" => self.description.as_deref(),
            "category" => self.category.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_with_optional_fields() {
        let item: CatalogItem =
            serde_json::from_str(r#"{"id": "1", "name": "Betoneira 400L"}"#).unwrap();
        assert_eq!(item.id(), "1");
        assert_eq!(item.field("name"), Some("Betoneira 400L"));
        assert_eq!(item.field("description"), None);
        assert_eq!(item.field("no_such_field"), None);
    }
}
