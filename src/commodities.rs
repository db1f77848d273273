use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The fixed commodity vocabulary plus optional curated search terms,
/// loaded from commodities.yml.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CommodityCatalog {
    pub commodities: Vec<String>,
    #[serde(default)]
    pub search_terms: HashMap<String, Vec<String>>,
}

impl CommodityCatalog {
    pub fn len(&self) -> usize {
        self.commodities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commodities.is_empty()
    }

    /// Curated terms when the catalog has them, otherwise three generated
    /// supplier-flavored queries.
    pub fn search_terms_for(&self, commodity: &str) -> Vec<String> {
        if let Some(terms) = self.search_terms.get(commodity) {
            return terms.clone();
        }

        vec![
            format!("{} manufacturer USA", commodity),
            format!("{} supplier America", commodity),
            format!("{} distributor United States", commodity),
        ]
    }
}

pub async fn load_commodities_from_yaml(
    path: &str,
) -> std::result::Result<CommodityCatalog, Box<dyn std::error::Error + Send + Sync>> {
    let content = tokio::fs::read_to_string(path).await?;
    let catalog: CommodityCatalog = serde_yaml::from_str(&content)?;

    if catalog.is_empty() {
        return Err("commodity catalog is empty".into());
    }

    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> CommodityCatalog {
        let mut search_terms = HashMap::new();
        search_terms.insert(
            "Bearings".to_string(),
            vec![
                "bearing manufacturer USA".to_string(),
                "ball bearing supplier".to_string(),
            ],
        );
        CommodityCatalog {
            commodities: vec!["Bearings".to_string(), "Granite Slabs".to_string()],
            search_terms,
        }
    }

    #[test]
    fn curated_terms_win_over_generated() {
        let terms = catalog().search_terms_for("Bearings");
        assert_eq!(terms[0], "bearing manufacturer USA");
        assert_eq!(terms.len(), 2);
    }

    #[test]
    fn generated_terms_cover_supplier_vocabulary() {
        let terms = catalog().search_terms_for("Granite Slabs");
        assert_eq!(terms.len(), 3);
        assert!(terms[0].contains("manufacturer"));
        assert!(terms[1].contains("supplier"));
        assert!(terms[2].contains("distributor"));
    }
}
