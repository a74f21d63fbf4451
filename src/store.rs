//! カスタムキーワードストア
//!
//! One JSON file per taxonomy (`gt_keywords.json` / `ir_keywords.json`) in
//! the store directory, mapping the normalized base to `{label, variants}`.
//! Reading is tolerant: a missing or malformed file is an empty store.
//! Writing goes through a temp file in the same directory and a rename.

use crate::error::{CuAnalyzerError, Result};
use cu_analyzer_common::{normalize_term, split_variants, CustomEntry, CustomKeywords, Taxonomy, Vocabulary};
use log::{debug, warn};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Listing view of `keywords <tax> list`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListFilter {
    Top10,
    All,
    Letter(char),
}

impl std::str::FromStr for ListFilter {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        match key.as_str() {
            "top10" | "top" | "top-10" => Ok(ListFilter::Top10),
            "all" => Ok(ListFilter::All),
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_alphabetic() => Ok(ListFilter::Letter(c)),
                    _ => Err(format!("Unknown filter: {}. Use top10, all or a letter A-Z", s)),
                }
            }
        }
    }
}

/// Sort case-insensitively and apply the filter
pub fn filter_items<S: AsRef<str>>(items: &[S], filter: ListFilter) -> Vec<String> {
    let mut sorted: Vec<String> = items.iter().map(|s| s.as_ref().to_string()).collect();
    sorted.sort_by_key(|s| s.to_lowercase());

    match filter {
        ListFilter::Top10 => sorted.into_iter().take(10).collect(),
        ListFilter::All => sorted,
        ListFilter::Letter(c) => sorted
            .into_iter()
            .filter(|s| s.to_lowercase().starts_with(c))
            .collect(),
    }
}

/// Result of a listing: the filtered items plus the unfiltered totals
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordListing {
    pub default_total: usize,
    pub defaults: Vec<String>,
    pub custom_total: usize,
    pub custom: Vec<String>,
}

/// Custom keywords of one taxonomy, bound to their file
#[derive(Debug)]
pub struct KeywordStore {
    dir: PathBuf,
    taxonomy: Taxonomy,
    keywords: CustomKeywords,
    defaults: Vec<String>,
}

impl KeywordStore {
    pub fn file_name(taxonomy: Taxonomy) -> String {
        format!("{}_keywords.json", taxonomy.prefix())
    }

    pub fn path_in(dir: &Path, taxonomy: Taxonomy) -> PathBuf {
        dir.join(Self::file_name(taxonomy))
    }

    /// Load persisted keywords; never fails
    pub fn load_keywords(dir: &Path, taxonomy: Taxonomy) -> CustomKeywords {
        let path = Self::path_in(dir, taxonomy);
        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    warn!("cannot read {}: {}", path.display(), e);
                }
                return CustomKeywords::default();
            }
        };

        match CustomKeywords::from_json_str(&content) {
            Ok(keywords) => {
                debug!("loaded {} custom keywords from {}", keywords.len(), path.display());
                keywords
            }
            Err(e) => {
                warn!("ignoring malformed keyword file {}: {}", path.display(), e);
                CustomKeywords::default()
            }
        }
    }

    pub fn open(dir: &Path, taxonomy: Taxonomy) -> Self {
        let defaults = Vocabulary::builtin().terms(taxonomy).bases().to_vec();
        Self {
            dir: dir.to_path_buf(),
            taxonomy,
            keywords: Self::load_keywords(dir, taxonomy),
            defaults,
        }
    }

    pub fn taxonomy(&self) -> Taxonomy {
        self.taxonomy
    }

    pub fn path(&self) -> PathBuf {
        Self::path_in(&self.dir, self.taxonomy)
    }

    pub fn keywords(&self) -> &CustomKeywords {
        &self.keywords
    }

    pub fn defaults(&self) -> &[String] {
        &self.defaults
    }

    /// Re-read the file, dropping in-memory state
    pub fn reload(&mut self) {
        self.keywords = Self::load_keywords(&self.dir, self.taxonomy);
    }

    pub fn save(&self) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let tmp = tempfile::Builder::new()
            .prefix(".tmp_")
            .suffix(".json")
            .tempfile_in(&self.dir)?;
        {
            let mut writer = BufWriter::new(tmp.as_file());
            serde_json::to_writer_pretty(&mut writer, &self.keywords)?;
            writer.flush()?;
        }
        // 失敗時は一時ファイルが自動削除される
        tmp.persist(self.path()).map_err(|e| e.error)?;
        debug!("saved {} custom keywords to {}", self.keywords.len(), self.path().display());
        Ok(())
    }

    /// Remove the file and empty the store
    pub fn clear(&mut self) -> Result<()> {
        match std::fs::remove_file(self.path()) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        self.keywords = CustomKeywords::default();
        Ok(())
    }

    pub fn list(&self, filter: ListFilter) -> KeywordListing {
        let custom_labels = self.keywords.labels();
        KeywordListing {
            default_total: self.defaults.len(),
            defaults: filter_items(&self.defaults, filter),
            custom_total: self.keywords.len(),
            custom: filter_items(&custom_labels, filter),
        }
    }

    fn is_default(&self, key: &str) -> bool {
        self.defaults.iter().any(|b| normalize_term(b) == key)
    }

    /// Key of an existing entry, by display label or normalized form
    fn resolve(&self, label: &str) -> Result<String> {
        let normalized = normalize_term(label);
        if self.keywords.contains(&normalized) {
            return Ok(normalized);
        }
        self.keywords
            .key_for_label(label.trim())
            .map(str::to_string)
            .ok_or_else(|| CuAnalyzerError::KeywordStore(format!("キーワードが見つかりません: {}", label)))
    }

    /// Add a base keyword with variants (`,` `;` or newline separated) and save
    pub fn add(&mut self, label: &str, variants: &str) -> Result<()> {
        let label = label.trim();
        if label.is_empty() {
            return Err(CuAnalyzerError::KeywordStore("ベースキーワードが空です".into()));
        }
        let key = normalize_term(label);
        if self.keywords.contains(&key) {
            return Err(CuAnalyzerError::KeywordStore(format!("既に追加済みです: {}", label)));
        }
        if self.is_default(&key) {
            return Err(CuAnalyzerError::KeywordStore(format!(
                "既定のキーワードに存在します: {}",
                label
            )));
        }

        self.keywords.insert(
            key,
            CustomEntry {
                label: label.to_string(),
                variants: split_variants(variants),
            },
        );
        self.save()
    }

    /// Rename a base and/or replace its variants, then save.
    ///
    /// `variants = Some("")` clears every variant; `None` keeps them.
    pub fn edit(&mut self, label: &str, rename: Option<&str>, variants: Option<&str>) -> Result<()> {
        let key = self.resolve(label)?;
        let current = self.keywords.get(&key).cloned().unwrap_or_default();

        let new_label = rename.map(str::trim).unwrap_or(current.label.as_str()).to_string();
        if new_label.is_empty() {
            return Err(CuAnalyzerError::KeywordStore("ベースラベルが空です".into()));
        }
        let new_variants = match variants {
            Some(text) => split_variants(text),
            None => current.variants.clone(),
        };
        let entry = CustomEntry {
            label: new_label.clone(),
            variants: new_variants,
        };

        let new_key = normalize_term(&new_label);
        if new_key != key {
            if self.keywords.contains(&new_key) {
                return Err(CuAnalyzerError::KeywordStore(format!(
                    "他の追加キーワードが同じ名前を使用しています: {}",
                    new_label
                )));
            }
            if self.is_default(&new_key) {
                return Err(CuAnalyzerError::KeywordStore(format!(
                    "既定のキーワードに存在します: {}",
                    new_label
                )));
            }
            self.keywords.remove(&key);
            self.keywords.insert(new_key, entry);
        } else {
            self.keywords.insert(key, entry);
        }
        self.save()
    }

    /// Delete a whole base and save; returns the removed label
    pub fn delete(&mut self, label: &str) -> Result<String> {
        let key = self.resolve(label)?;
        let removed = self.keywords.remove(&key).map(|e| e.label).unwrap_or(key);
        self.save()?;
        Ok(removed)
    }

    /// Delete selected variants of a base and save; returns how many went
    pub fn delete_variants(&mut self, label: &str, variants: &str) -> Result<usize> {
        let selected: Vec<String> = split_variants(variants).iter().map(|v| normalize_term(v)).collect();
        if selected.is_empty() {
            return Err(CuAnalyzerError::KeywordStore("バリアントが選択されていません".into()));
        }

        let key = self.resolve(label)?;
        let removed = match self.keywords.get_mut(&key) {
            Some(entry) => {
                let before = entry.variants.len();
                entry
                    .variants
                    .retain(|v| !selected.contains(&normalize_term(v)));
                before - entry.variants.len()
            }
            None => 0,
        };
        if removed > 0 {
            self.save()?;
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_list_filter_parse() {
        assert_eq!("Top10".parse::<ListFilter>(), Ok(ListFilter::Top10));
        assert_eq!("all".parse::<ListFilter>(), Ok(ListFilter::All));
        assert_eq!("S".parse::<ListFilter>(), Ok(ListFilter::Letter('s')));
        assert!("ab".parse::<ListFilter>().is_err());
        assert!("1".parse::<ListFilter>().is_err());
    }

    #[test]
    fn test_filter_items() {
        let items = ["solar", "Biogas", "smart grid", "anaerobic"];
        assert_eq!(
            filter_items(&items, ListFilter::All),
            vec!["anaerobic", "Biogas", "smart grid", "solar"]
        );
        assert_eq!(
            filter_items(&items, ListFilter::Letter('s')),
            vec!["smart grid", "solar"]
        );
        let many: Vec<String> = (0..15).map(|i| format!("k{:02}", i)).collect();
        assert_eq!(filter_items(&many, ListFilter::Top10).len(), 10);
    }

    #[test]
    fn test_missing_and_malformed_files_are_empty() {
        let dir = TempDir::new().unwrap();
        assert!(KeywordStore::load_keywords(dir.path(), Taxonomy::GreenTech).is_empty());

        std::fs::write(dir.path().join("gt_keywords.json"), "{not json").unwrap();
        assert!(KeywordStore::load_keywords(dir.path(), Taxonomy::GreenTech).is_empty());

        std::fs::write(dir.path().join("ir_keywords.json"), "[1, 2]").unwrap();
        assert!(KeywordStore::load_keywords(dir.path(), Taxonomy::Ir4).is_empty());
    }

    #[test]
    fn test_add_persists_and_rejects_duplicates() {
        let dir = TempDir::new().unwrap();
        let mut store = KeywordStore::open(dir.path(), Taxonomy::GreenTech);
        store.add("Hydrogen Storage", "h2 storage; Hydrogen Storage").unwrap();

        let reopened = KeywordStore::open(dir.path(), Taxonomy::GreenTech);
        let entry = reopened.keywords().get("hydrogen storage").unwrap();
        assert_eq!(entry.label, "Hydrogen Storage");
        assert_eq!(entry.variants, vec!["h2 storage", "Hydrogen Storage"]);

        assert!(store.add("hydrogen  storage", "").is_err());
        assert!(store.add("  ", "").is_err());
        // the file only ever holds the taxonomy's own entries
        assert!(!dir.path().join("ir_keywords.json").exists());
    }

    #[test]
    fn test_add_rejects_default_base() {
        let dir = TempDir::new().unwrap();
        let mut store = KeywordStore::open(dir.path(), Taxonomy::GreenTech);
        let existing = store.defaults()[0].to_uppercase();
        assert!(matches!(store.add(&existing, ""), Err(CuAnalyzerError::KeywordStore(_))));
    }

    #[test]
    fn test_edit_rename_and_variants() {
        let dir = TempDir::new().unwrap();
        let mut store = KeywordStore::open(dir.path(), Taxonomy::Ir4);
        store.add("Edge AI", "edge inference").unwrap();
        store.add("Digital Twin Ops", "").unwrap();

        store.edit("Edge AI", None, Some("tinyml, edge inference")).unwrap();
        assert_eq!(
            store.keywords().get("edge ai").unwrap().variants,
            vec!["tinyml", "edge inference"]
        );

        store.edit("edge ai", Some("Edge Computing AI"), None).unwrap();
        assert!(store.keywords().get("edge ai").is_none());
        let renamed = store.keywords().get("edge computing ai").unwrap();
        assert_eq!(renamed.variants, vec!["tinyml", "edge inference"]);

        assert!(store.edit("Edge Computing AI", Some("digital twin ops"), None).is_err());
        assert!(store.edit("Edge Computing AI", Some(" "), None).is_err());
        assert!(store.edit("missing", None, Some("")).is_err());

        store.edit("Edge Computing AI", None, Some("")).unwrap();
        assert!(store.keywords().get("edge computing ai").unwrap().variants.is_empty());
    }

    #[test]
    fn test_delete_and_delete_variants() {
        let dir = TempDir::new().unwrap();
        let mut store = KeywordStore::open(dir.path(), Taxonomy::GreenTech);
        store.add("Agrivoltaics", "agri-pv, agrophotovoltaics, dual-use solar").unwrap();

        assert_eq!(store.delete_variants("Agrivoltaics", "Agri-PV; dual-use solar").unwrap(), 2);
        assert_eq!(
            store.keywords().get("agrivoltaics").unwrap().variants,
            vec!["agrophotovoltaics"]
        );
        assert!(store.delete_variants("Agrivoltaics", "").is_err());

        assert_eq!(store.delete("Agrivoltaics").unwrap(), "Agrivoltaics");
        assert!(KeywordStore::open(dir.path(), Taxonomy::GreenTech).keywords().is_empty());
    }

    #[test]
    fn test_clear_removes_file() {
        let dir = TempDir::new().unwrap();
        let mut store = KeywordStore::open(dir.path(), Taxonomy::GreenTech);
        store.add("Blue Carbon", "").unwrap();
        assert!(store.path().exists());

        store.clear().unwrap();
        assert!(!store.path().exists());
        assert!(store.keywords().is_empty());
        // clearing twice is fine
        store.clear().unwrap();
    }

    #[test]
    fn test_list_counts() {
        let dir = TempDir::new().unwrap();
        let mut store = KeywordStore::open(dir.path(), Taxonomy::GreenTech);
        store.add("Zero Waste Kitchen", "").unwrap();

        let listing = store.list(ListFilter::Letter('z'));
        assert_eq!(listing.custom_total, 1);
        assert_eq!(listing.custom, vec!["Zero Waste Kitchen"]);
        assert_eq!(listing.default_total, store.defaults().len());
    }
}
