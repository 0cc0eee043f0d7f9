//! Tantivy schema for task documents.
//!
//! # Schema Fields
//!
//! ## Identity
//! - `task_id`: Replacement key (STRING | STORED)
//! - `payload`: Newline-delimited stored payload, see [`codec`](crate::codec) (STORED only)
//!
//! ## Full-Text Fields (stemmed, with positions for phrase queries)
//! - `name`: Task name, searchable as `name:...`
//! - `desc`: Task description, searchable as `desc:...`
//! - `body`: Name and description together; the default free-text field
//!
//! ## Term Fields
//! - `tag`: One raw term per non-empty tag (STRING)
//! - `task_type`: Raw task type string (STRING | STORED)
//!
//! ## Geo Value-Slot
//! - `slot<N>_lat` / `slot<N>_lon`: Coordinates (FAST | STORED), where `N`
//!   is the configured geo value-slot
//!
//! # Tokenizer
//!
//! All full-text fields use one registered analyzer, [`TOKENIZER`]:
//! SimpleTokenizer → LowerCaser → Stemmer([`STEM_LANGUAGE`]).
//! The query parser resolves tokenizers through the index, so documents and
//! queries are always stemmed the same way.

use dobrika_core::{Error, Result};
use tantivy::schema::{
    Field, IndexRecordOption, Schema, SchemaBuilder, TextFieldIndexing, TextOptions, FAST, STORED,
    STRING,
};
use tantivy::tokenizer::{Language, LowerCaser, SimpleTokenizer, Stemmer, TextAnalyzer};
use tantivy::Index;

/// Schema version, recorded in snapshot manifests.
///
/// Increment this when schema fields change.
pub const SCHEMA_VERSION: u32 = 1;

/// Name of the stemming analyzer registered on every index.
pub const TOKENIZER: &str = "task_stem";

/// Stemmer language shared by the write and read paths.
pub const STEM_LANGUAGE: Language = Language::Russian;

/// Task schema holding field references and the Tantivy schema.
#[derive(Clone)]
pub struct TaskSchema {
    schema: Schema,
    geo_slot: u32,

    /// Replacement key.
    pub task_id: Field,
    /// Stored payload.
    pub payload: Field,

    /// Task name, stemmed.
    pub name: Field,
    /// Task description, stemmed.
    pub desc: Field,
    /// Name and description, stemmed; default field for text queries.
    pub body: Field,

    /// Tag terms.
    pub tag: Field,
    /// Raw task type.
    pub task_type: Field,

    /// Latitude column of the geo value-slot.
    pub geo_lat: Field,
    /// Longitude column of the geo value-slot.
    pub geo_lon: Field,
}

impl TaskSchema {
    /// Build the schema for a new index with the geo value-slot `geo_slot`.
    pub fn build(geo_slot: u32) -> Self {
        let mut builder = SchemaBuilder::new();

        // Text field options with positions (for phrase queries)
        let text_options = TextOptions::default().set_indexing_options(
            TextFieldIndexing::default()
                .set_tokenizer(TOKENIZER)
                .set_index_option(IndexRecordOption::WithFreqsAndPositions),
        );

        let task_id = builder.add_text_field("task_id", STRING | STORED);
        let payload = builder.add_text_field("payload", STORED);

        let name = builder.add_text_field("name", text_options.clone());
        let desc = builder.add_text_field("desc", text_options.clone());
        let body = builder.add_text_field("body", text_options);

        let tag = builder.add_text_field("tag", STRING);
        let task_type = builder.add_text_field("task_type", STRING | STORED);

        let (lat, lon) = geo_field_names(geo_slot);
        let geo_lat = builder.add_f64_field(&lat, FAST | STORED);
        let geo_lon = builder.add_f64_field(&lon, FAST | STORED);

        Self {
            schema: builder.build(),
            geo_slot,
            task_id,
            payload,
            name,
            desc,
            body,
            tag,
            task_type,
            geo_lat,
            geo_lon,
        }
    }

    /// Resolve field references from the schema of an existing index.
    ///
    /// Fails when the index was created for a different geo value-slot or
    /// is not a task index at all.
    pub fn from_schema(schema: &Schema, geo_slot: u32) -> Result<Self> {
        let field = |name: &str| {
            schema.get_field(name).map_err(|_| {
                Error::config(format!(
                    "Index schema has no field '{name}' (geo slot {geo_slot})"
                ))
            })
        };
        let (lat, lon) = geo_field_names(geo_slot);

        Ok(Self {
            schema: schema.clone(),
            geo_slot,
            task_id: field("task_id")?,
            payload: field("payload")?,
            name: field("name")?,
            desc: field("desc")?,
            body: field("body")?,
            tag: field("tag")?,
            task_type: field("task_type")?,
            geo_lat: field(&lat)?,
            geo_lon: field(&lon)?,
        })
    }

    /// Get the underlying Tantivy schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Configured geo value-slot.
    pub fn geo_slot(&self) -> u32 {
        self.geo_slot
    }

    /// Names of the latitude and longitude columns.
    pub fn geo_columns(&self) -> (String, String) {
        geo_field_names(self.geo_slot)
    }

    /// Register the stemming analyzer with a Tantivy index.
    ///
    /// Must be called after creating/opening an index, before writing or
    /// parsing queries.
    pub fn register_tokenizers(index: &Index) {
        let analyzer = TextAnalyzer::builder(SimpleTokenizer::default())
            .filter(LowerCaser)
            .filter(Stemmer::new(STEM_LANGUAGE))
            .build();

        index.tokenizers().register(TOKENIZER, analyzer);
    }

    /// Fields searched when free text carries no `field:` prefix.
    pub fn default_text_fields(&self) -> Vec<Field> {
        vec![self.body]
    }
}

/// Column names for a geo value-slot.
fn geo_field_names(geo_slot: u32) -> (String, String) {
    (format!("slot{geo_slot}_lat"), format!("slot{geo_slot}_lon"))
}

impl std::fmt::Debug for TaskSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskSchema")
            .field("geo_slot", &self.geo_slot)
            .field("schema_version", &SCHEMA_VERSION)
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
