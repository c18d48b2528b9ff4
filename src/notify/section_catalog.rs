use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use once_cell::sync::Lazy;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SectionDescriptor {
    /// Top-level key in the upstream snapshot, e.g. `normal_stock`.
    pub key: String,

    pub title: String,

    /// Prefix for the group title.
    pub icon: String,

    /// Prefix for each item's field label.
    pub item_icon: String,

    /// Prefix for the summary line.
    pub summary_icon: String,

    /// Noun phrase following the item count, e.g. "items in normal stock".
    pub summary: String,

    pub color: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SectionCatalog {
    sections: Vec<SectionDescriptor>,
}

static BUILTIN: Lazy<SectionCatalog> = Lazy::new(|| SectionCatalog {
    sections: vec![
        SectionDescriptor {
            key: "normal_stock".to_string(),
            title: "Normal Stock".to_string(),
            icon: "🔹".to_string(),
            item_icon: "🍇".to_string(),
            summary_icon: "📦".to_string(),
            summary: "items in normal stock".to_string(),
            color: 0x3498db,
        },
        SectionDescriptor {
            key: "mirage_stock".to_string(),
            title: "Mirage Stock".to_string(),
            icon: "✨".to_string(),
            item_icon: "⭐".to_string(),
            summary_icon: "🌟".to_string(),
            summary: "rare items in mirage stock".to_string(),
            color: 0xe74c3c,
        },
    ],
});

impl SectionCatalog {
    pub fn new(sections: Vec<SectionDescriptor>) -> Result<Self> {
        let catalog = Self { sections };
        catalog.validate()?;

        Ok(catalog)
    }

    pub fn builtin() -> Self {
        BUILTIN.clone()
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read section catalog {}", path.display()))?;

        Self::from_yaml(&raw)
            .with_context(|| format!("failed to load section catalog {}", path.display()))
    }

    pub fn from_yaml(raw: &str) -> Result<Self> {
        let catalog: SectionCatalog =
            serde_yaml::from_str(raw).context("failed to parse section catalog")?;

        Self::new(catalog.sections).context("section catalog validation failed")
    }

    pub fn sections(&self) -> &[SectionDescriptor] {
        &self.sections
    }

    fn validate(&self) -> Result<()> {
        if self.sections.is_empty() {
            bail!("sections must not be empty");
        }

        let mut seen = HashSet::new();
        for section in &self.sections {
            if section.key.trim().is_empty() {
                bail!("section key must not be empty");
            }
            if section.title.trim().is_empty() {
                bail!("section {} must have a title", section.key);
            }
            if !seen.insert(section.key.as_str()) {
                bail!("duplicate section key {}", section.key);
            }
        }

        Ok(())
    }
}
