//! CU Analyzer Common Library
//!
//! GreenTech / IR4.0 キーワード照合とスコアリングのエンジン。
//! CLIから利用され、スコアリング経路ではファイルI/Oを行わない。

pub mod aggregate;
pub mod error;
pub mod export;
pub mod highlight;
pub mod matcher;
pub mod scoring;
pub mod summary;
pub mod types;
pub mod variants;
pub mod verbs;
pub mod vocabulary;

pub use aggregate::{aggregate, Category, DocumentSummary, UnitTotals};
pub use error::{Error, Result};
pub use highlight::{highlight_field, FieldHighlight, Segment, SegmentKind, UnitMark};
pub use matcher::{EngineKind, KeywordMatcher, PatternEngine, PhraseMatcher, SurfaceConflict};
pub use scoring::{field_score, CountMode, ScoringPolicy, ScoringSession, ScoringSettings, UnitScore};
pub use summary::{tally_keywords, KeywordTables, KeywordTally};
pub use types::{CompetencyUnit, Document, Field, FieldMap, MatchSpan, Profile, Taxonomy, ITEM_DELIMITER};
pub use variants::expand_phrase;
pub use verbs::{gate_field, segment_units, GatedUnit, Unit, VerbMatcher};
pub use vocabulary::{normalize_term, split_variants, CustomEntry, CustomKeywords, Vocabulary};
