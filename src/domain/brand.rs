use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Root subject of an analysis run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BrandEntity {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub website: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub social_links: SocialLinks,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SocialLinks {
    #[serde(default)]
    pub twitter: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub instagram: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub value_props: Vec<String>,
}

impl BrandEntity {
    pub fn new(name: String, website: String) -> Self {
        Self {
            id: None,
            name,
            website,
            aliases: Vec::new(),
            description: String::new(),
            social_links: SocialLinks::default(),
        }
    }

    pub fn add_alias(&mut self, alias: String) {
        if !alias.is_empty() && !self.aliases.contains(&alias) {
            self.aliases.push(alias);
        }
    }

    /// All names the brand is known by, primary name first.
    pub fn known_names(&self) -> Vec<&str> {
        let mut names = vec![self.name.as_str()];
        names.extend(self.aliases.iter().map(String::as_str));
        names
    }
}

impl Product {
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            value_props: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_brand() {
        let brand = BrandEntity::new("Acme".to_string(), "https://acme.com".to_string());
        assert_eq!(brand.name, "Acme");
        assert_eq!(brand.website, "https://acme.com");
        assert!(brand.id.is_none());
        assert!(brand.aliases.is_empty());
    }

    #[test]
    fn test_add_alias_deduplicates() {
        let mut brand = BrandEntity::new("Acme".to_string(), "https://acme.com".to_string());
        brand.add_alias("Acme Corp".to_string());
        brand.add_alias("Acme Corp".to_string());
        brand.add_alias("".to_string());
        assert_eq!(brand.aliases, vec!["Acme Corp".to_string()]);
    }

    #[test]
    fn test_known_names_primary_first() {
        let mut brand = BrandEntity::new("Acme".to_string(), "https://acme.com".to_string());
        brand.add_alias("Acme Corp".to_string());
        assert_eq!(brand.known_names(), vec!["Acme", "Acme Corp"]);
    }

    #[test]
    fn test_product_gets_id() {
        let product = Product::new("Widget".to_string());
        assert!(!product.id.is_empty());
        assert!(product.value_props.is_empty());
    }
}
