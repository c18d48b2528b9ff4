use chrono::{DateTime, Utc};

use crate::notify::message::{DisplayField, Footer, MessageGroup, SenderProfile};
use crate::notify::section_catalog::{SectionCatalog, SectionDescriptor};
use crate::types::{item::Item, stock_snapshot::StockSnapshot};

const FALLBACK_TITLE: &str = "🍎 Stock Update";
const FALLBACK_DESCRIPTION: &str = "🔄 Stock updated but no item data is available";
const FALLBACK_COLOR: u32 = 0x95a5a6;

#[derive(Debug, Clone)]
pub struct NotificationBuilder {
    catalog: SectionCatalog,
    sender: SenderProfile,
}

impl NotificationBuilder {
    pub fn new(catalog: SectionCatalog, sender: SenderProfile) -> Self {
        Self { catalog, sender }
    }

    pub fn sender(&self) -> &SenderProfile {
        &self.sender
    }

    /// One group per catalog section with items, in catalog order, or a single
    /// fallback group when none has any.
    pub fn build(&self, snapshot: &StockSnapshot, now: DateTime<Utc>) -> Vec<MessageGroup> {
        let mut groups: Vec<MessageGroup> = self
            .catalog
            .sections()
            .iter()
            .filter_map(|section| {
                let items = snapshot.section_items(&section.key)?;
                if items.is_empty() {
                    return None;
                }

                Some(self.section_group(section, &items, now))
            })
            .collect();

        if groups.is_empty() {
            groups.push(self.fallback_group(now));
        }

        groups
    }

    fn section_group(
        &self,
        section: &SectionDescriptor,
        items: &[Item],
        now: DateTime<Utc>,
    ) -> MessageGroup {
        let fields = items
            .iter()
            .map(|item| DisplayField {
                name: format!("{} {}", section.item_icon, item.name),
                value: format!(
                    "💰 **USD:** ${}\n💎 **Robux:** {}",
                    item.primary_display(),
                    item.secondary_display()
                ),
                inline: true,
            })
            .collect();

        MessageGroup {
            title: format!("{} {} Update", section.icon, section.title),
            description: format!("{} {} {}", section.summary_icon, items.len(), section.summary),
            color: section.color,
            timestamp: now,
            footer: self.footer(Some(&section.title)),
            fields,
        }
    }

    fn fallback_group(&self, now: DateTime<Utc>) -> MessageGroup {
        MessageGroup {
            title: FALLBACK_TITLE.to_string(),
            description: FALLBACK_DESCRIPTION.to_string(),
            color: FALLBACK_COLOR,
            timestamp: now,
            footer: self.footer(None),
            fields: Vec::new(),
        }
    }

    fn footer(&self, section_title: Option<&str>) -> Footer {
        let text = match section_title {
            Some(title) => format!("{} • {title}", self.sender.name),
            None => self.sender.name.clone(),
        };

        Footer {
            text,
            icon_url: self.sender.avatar_url.clone(),
        }
    }
}
