//! Browsable cultural content: philosophers, paintings, locations, leaders
//! and innovations, plus the filtered gallery view over them.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DataError;
use crate::model::{Philosopher, RankingEntity};

/// The kinds of content a gallery can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Philosopher,
    Painting,
    Location,
    Leader,
    Innovation,
}

impl ContentKind {
    pub const ALL: [ContentKind; 5] = [
        ContentKind::Philosopher,
        ContentKind::Painting,
        ContentKind::Location,
        ContentKind::Leader,
        ContentKind::Innovation,
    ];

    /// File name of this kind inside a data directory.
    pub fn file_name(self) -> &'static str {
        match self {
            ContentKind::Philosopher => "philosophers.json",
            ContentKind::Painting => "paintings.json",
            ContentKind::Location => "locations.json",
            ContentKind::Leader => "leaders.json",
            ContentKind::Innovation => "innovations.json",
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            ContentKind::Philosopher => "philosopher",
            ContentKind::Painting => "painting",
            ContentKind::Location => "location",
            ContentKind::Leader => "leader",
            ContentKind::Innovation => "innovation",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentKind {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        let singular = wanted.strip_suffix('s').unwrap_or(&wanted);
        ContentKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == singular)
            .ok_or_else(|| DataError::UnknownContentKind(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Painting {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leader {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub birth: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub achievements: String,
    #[serde(default)]
    pub legacy: String,
    #[serde(default)]
    pub quote: String,
    #[serde(default, rename = "fun-desc")]
    pub fun_desc: String,
    #[serde(default)]
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Innovation {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub innovator: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub context: String,
    #[serde(default)]
    pub consequences: String,
    #[serde(default)]
    pub anecdote: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub century: String,
    #[serde(default)]
    pub image: String,
}

/// One browsable item of any content kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CatalogItem {
    Philosopher(Philosopher),
    Painting(Painting),
    Location(Location),
    Leader(Leader),
    Innovation(Innovation),
}

impl CatalogItem {
    pub fn kind(&self) -> ContentKind {
        match self {
            CatalogItem::Philosopher(_) => ContentKind::Philosopher,
            CatalogItem::Painting(_) => ContentKind::Painting,
            CatalogItem::Location(_) => ContentKind::Location,
            CatalogItem::Leader(_) => ContentKind::Leader,
            CatalogItem::Innovation(_) => ContentKind::Innovation,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            CatalogItem::Philosopher(p) => &p.id,
            CatalogItem::Painting(p) => &p.id,
            CatalogItem::Location(l) => &l.id,
            CatalogItem::Leader(l) => &l.id,
            CatalogItem::Innovation(i) => &i.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            CatalogItem::Philosopher(p) => &p.name,
            CatalogItem::Painting(p) => &p.name,
            CatalogItem::Location(l) => &l.name,
            CatalogItem::Leader(l) => &l.name,
            CatalogItem::Innovation(i) => &i.name,
        }
    }

    pub fn image(&self) -> &str {
        match self {
            CatalogItem::Philosopher(p) => &p.image,
            CatalogItem::Painting(p) => &p.image,
            CatalogItem::Location(l) => &l.image,
            CatalogItem::Leader(l) => &l.image,
            CatalogItem::Innovation(i) => &i.image,
        }
    }

    /// The grouping used by gallery filters. Locations group by region.
    pub fn category(&self) -> Option<&str> {
        let category = match self {
            CatalogItem::Painting(p) => &p.category,
            CatalogItem::Location(l) => &l.region,
            CatalogItem::Innovation(i) => &i.category,
            CatalogItem::Philosopher(_) | CatalogItem::Leader(_) => return None,
        };
        (!category.is_empty()).then_some(category.as_str())
    }

    /// Labelled detail fields, skipping empty ones.
    pub fn fields(&self) -> Vec<(&'static str, &str)> {
        let all: Vec<(&'static str, &str)> = match self {
            CatalogItem::Philosopher(p) => vec![
                ("birth", &p.birth),
                ("work", &p.work),
                ("quote", &p.quote),
                ("fun-desc", &p.fun_desc),
            ],
            CatalogItem::Painting(p) => vec![
                ("artist", &p.artist),
                ("year", &p.year),
                ("category", &p.category),
                ("description", &p.description),
            ],
            CatalogItem::Location(l) => vec![
                ("location", &l.location),
                ("region", &l.region),
                ("description", &l.description),
            ],
            CatalogItem::Leader(l) => vec![
                ("birth", &l.birth),
                ("role", &l.role),
                ("achievements", &l.achievements),
                ("legacy", &l.legacy),
                ("quote", &l.quote),
                ("fun-desc", &l.fun_desc),
            ],
            CatalogItem::Innovation(i) => vec![
                ("date", &i.date),
                ("innovator", &i.innovator),
                ("category", &i.category),
                ("century", &i.century),
                ("description", &i.description),
                ("context", &i.context),
                ("consequences", &i.consequences),
                ("anecdote", &i.anecdote),
            ],
        }
        .into_iter()
        .map(|(label, value)| (label, value.as_str()))
        .collect();
        all.into_iter().filter(|(_, value)| !value.is_empty()).collect()
    }
}

impl From<&CatalogItem> for RankingEntity {
    fn from(item: &CatalogItem) -> Self {
        if let CatalogItem::Philosopher(p) = item {
            return RankingEntity::from(p);
        }
        let details: BTreeMap<String, serde_json::Value> = item
            .fields()
            .into_iter()
            .map(|(label, value)| (label.to_string(), serde_json::Value::from(value)))
            .collect();
        RankingEntity {
            id: item.id().to_string(),
            name: item.name().to_string(),
            image: item.image().to_string(),
            details,
        }
    }
}

fn is_all(category: &str) -> bool {
    category.trim().eq_ignore_ascii_case("all")
}

/// An ordered collection of catalog items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Gallery {
    items: Vec<CatalogItem>,
}

impl Gallery {
    pub fn new(items: Vec<CatalogItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Distinct categories in order of first appearance.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for category in self.items.iter().filter_map(CatalogItem::category) {
            if !seen.iter().any(|c| c.eq_ignore_ascii_case(category)) {
                seen.push(category);
            }
        }
        seen
    }

    /// Items in `category` (case-insensitive); `None` or "All" keeps everything.
    pub fn filter(&self, category: Option<&str>) -> Vec<&CatalogItem> {
        match category {
            Some(wanted) if !is_all(wanted) => self
                .items
                .iter()
                .filter(|item| {
                    item.category()
                        .is_some_and(|c| c.eq_ignore_ascii_case(wanted.trim()))
                })
                .collect(),
            _ => self.items.iter().collect(),
        }
    }

    pub fn find(&self, id: &str) -> Option<&CatalogItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Ranking candidates for every item in `category`.
    pub fn ranking_entities(&self, category: Option<&str>) -> Vec<RankingEntity> {
        self.filter(category)
            .into_iter()
            .map(RankingEntity::from)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn painting(id: &str, category: &str) -> CatalogItem {
        CatalogItem::Painting(Painting {
            id: id.into(),
            name: format!("Painting {id}"),
            artist: "Claude Monet".into(),
            year: "1872".into(),
            description: String::new(),
            category: category.into(),
            image: format!("/images/{id}.jpg"),
        })
    }

    fn location(id: &str, region: &str) -> CatalogItem {
        CatalogItem::Location(Location {
            id: id.into(),
            name: format!("Place {id}"),
            location: "Somewhere".into(),
            region: region.into(),
            description: "A place.".into(),
            image: String::new(),
        })
    }

    #[test]
    fn content_kind_parses_singular_and_plural() {
        assert_eq!("painting".parse::<ContentKind>().unwrap(), ContentKind::Painting);
        assert_eq!("Leaders".parse::<ContentKind>().unwrap(), ContentKind::Leader);
        assert_eq!(ContentKind::Innovation.to_string(), "innovation");
        assert_eq!(
            "sculpture".parse::<ContentKind>().unwrap_err(),
            DataError::UnknownContentKind("sculpture".into())
        );
    }

    #[test]
    fn every_kind_has_a_distinct_file() {
        let names: std::collections::HashSet<_> =
            ContentKind::ALL.iter().map(|k| k.file_name()).collect();
        assert_eq!(names.len(), 5);
    }

    #[test]
    fn categories_keep_first_appearance_order() {
        let gallery = Gallery::new(vec![
            painting("1", "Impressionism"),
            painting("2", "Romanticism"),
            painting("3", "impressionism"),
            location("4", "Provence"),
        ]);
        assert_eq!(gallery.categories(), vec!["Impressionism", "Romanticism", "Provence"]);
    }

    #[test]
    fn filter_all_and_by_category() {
        let gallery = Gallery::new(vec![
            painting("1", "Impressionism"),
            painting("2", "Romanticism"),
            painting("3", "Impressionism"),
        ]);
        assert_eq!(gallery.filter(None).len(), 3);
        assert_eq!(gallery.filter(Some("All")).len(), 3);
        let ids: Vec<_> = gallery
            .filter(Some("impressionism"))
            .iter()
            .map(|i| i.id())
            .collect();
        assert_eq!(ids, vec!["1", "3"]);
        assert!(gallery.filter(Some("Cubism")).is_empty());
    }

    #[test]
    fn find_by_id() {
        let gallery = Gallery::new(vec![painting("a", "X"), location("b", "Y")]);
        assert_eq!(gallery.find("b").map(CatalogItem::kind), Some(ContentKind::Location));
        assert!(gallery.find("missing").is_none());
    }

    #[test]
    fn fields_skip_empty_values() {
        let item = painting("1", "Impressionism");
        let labels: Vec<_> = item.fields().into_iter().map(|(l, _)| l).collect();
        assert_eq!(labels, vec!["artist", "year", "category"]);
    }

    #[test]
    fn location_category_is_region() {
        assert_eq!(location("1", "Normandy").category(), Some("Normandy"));
        assert_eq!(location("2", "").category(), None);
    }

    #[test]
    fn ranking_entity_from_item_carries_fields() {
        let entity = RankingEntity::from(&painting("7", "Impressionism"));
        assert_eq!(entity.id, "7");
        assert_eq!(entity.image, "/images/7.jpg");
        assert_eq!(entity.detail("artist"), Some("Claude Monet"));
        assert_eq!(entity.detail("description"), None);
    }

    #[test]
    fn items_deserialize_with_kind_tag() {
        let json = r#"{"kind":"leader","id":"napoleon","name":"Napoleon Bonaparte","fun-desc":"Not that short."}"#;
        let item: CatalogItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.kind(), ContentKind::Leader);
        assert_eq!(item.fields(), vec![("fun-desc", "Not that short.")]);
    }
}
