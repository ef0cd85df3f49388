//! Category table: ids, keywords and display metadata.
//!
//! The registry is ordered. Its order is the tie-break order used by the
//! analyzer, so two categories with equal scores always resolve to the one
//! listed first.

use crate::error::CategoryError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Sentinel assigned when no category scores above zero.
pub const UNCATEGORIZED: &str = "Uncategorized";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Category {
    pub id: String,
    pub keywords: Vec<String>,
    #[serde(default)]
    pub description: String,
    pub suggested_name: String,
}

impl Category {
    pub fn new(
        id: impl Into<String>,
        keywords: &[&str],
        description: impl Into<String>,
        suggested_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            description: description.into(),
            suggested_name: suggested_name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRegistry {
    categories: Vec<Category>,
}

impl CategoryRegistry {
    pub fn new(categories: Vec<Category>) -> Result<Self, CategoryError> {
        let mut seen = HashSet::new();
        for category in &categories {
            validate(category)?;
            if !seen.insert(category.id.as_str()) {
                return Err(CategoryError::DuplicateId(category.id.clone()));
            }
        }
        Ok(Self { categories })
    }

    pub fn empty() -> Self {
        Self {
            categories: Vec::new(),
        }
    }

    pub fn builtin() -> Self {
        Self {
            categories: vec![
                Category::new(
                    "AI_Programming",
                    &[
                        "ai",
                        "claude",
                        "coding",
                        "programming",
                        "vibe coding",
                        "cursor",
                        "superclaude",
                    ],
                    "AI编程开发",
                    "🤖 AI编程开发",
                ),
                Category::new(
                    "Investment_Finance",
                    &[
                        "bitcoin",
                        "crypto",
                        "investment",
                        "finance",
                        "trading",
                        "加密",
                        "投资",
                    ],
                    "投资理财",
                    "💰 投资理财",
                ),
                Category::new(
                    "Health_Wellness",
                    &["康复", "健康", "筋膜", "物理治疗", "health", "wellness", "therapy"],
                    "健康养生",
                    "🏥 健康养生",
                ),
                Category::new(
                    "Gaming",
                    &["黑神话", "游戏", "game", "gaming", "wukong", "攻略"],
                    "游戏娱乐",
                    "🎮 游戏娱乐",
                ),
                Category::new(
                    "Technology_Hardware",
                    &["pc", "diy", "hardware", "tech", "computer", "rtx", "cpu"],
                    "科技硬件",
                    "🔧 科技硬件",
                ),
                Category::new(
                    "Music_Relaxation",
                    &["music", "lo-fi", "lofi", "relaxation", "音乐", "放松", "jazz"],
                    "音乐放松",
                    "🎵 音乐放松",
                ),
                Category::new(
                    "Education_Learning",
                    &["tutorial", "education", "learning", "教程", "学习", "课程"],
                    "教育学习",
                    "📚 教育学习",
                ),
            ],
        }
    }

    /// Replaces categories whose id already exists (keeping their position)
    /// and appends new ones at the end.
    pub fn with_overrides(mut self, overrides: Vec<Category>) -> Result<Self, CategoryError> {
        for category in overrides {
            validate(&category)?;
            match self.categories.iter_mut().find(|c| c.id == category.id) {
                Some(existing) => *existing = category,
                None => self.categories.push(category),
            }
        }
        Ok(self)
    }

    pub fn get(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl Default for CategoryRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

fn validate(category: &Category) -> Result<(), CategoryError> {
    if category.id.trim().is_empty() {
        return Err(CategoryError::EmptyId);
    }
    if category.id == UNCATEGORIZED {
        return Err(CategoryError::ReservedId(category.id.clone()));
    }
    if category.keywords.iter().all(|k| k.is_empty()) {
        return Err(CategoryError::NoKeywords(category.id.clone()));
    }
    Ok(())
}

/// Loads one category per `*.toml` file, in file-name order.
pub fn load_categories_from_dir(dir: &Path) -> Result<Vec<Category>, CategoryError> {
    let mut categories = Vec::new();
    if !dir.exists() {
        return Ok(categories);
    }
    let io_err = |source| CategoryError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        let path = entry.path();
        if entry.file_type().map_err(io_err)?.is_file()
            && path.extension().and_then(|e| e.to_str()) == Some("toml")
        {
            paths.push(path);
        }
    }
    paths.sort();

    for path in paths {
        let content = fs::read_to_string(&path).map_err(|source| CategoryError::Io {
            path: path.clone(),
            source,
        })?;
        let category: Category =
            toml::from_str(&content).map_err(|source| CategoryError::Parse {
                path: path.clone(),
                source,
            })?;
        categories.push(category);
    }
    Ok(categories)
}
