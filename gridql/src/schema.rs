//! Field schemas. Every filterable field is declared once - type, collation, supported match modes
//! and global-search participation - and both compilers are driven from the same declaration.

use serde::{Deserialize, Serialize};

use crate::criteria::MatchMode;

/// Field names that address the global search criterion unless a schema overrides them.
pub const DEFAULT_GLOBAL_ALIASES: [&str; 2] = ["global", "searchValue"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldType {
    Integer,
    Text,
}

/// How text equality is decided for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TextCollation {
    /// Byte-for-byte equality, no trimming.
    #[default]
    Exact,
    /// Both sides trimmed and lowercased before comparing. Meant for long free-text fields.
    Folded,
}

/// Whether a field takes part in the global search disjunction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SearchParticipation {
    #[default]
    Never,
    Always,
    /// Only searched when the global term is a canonical integer.
    WhenNumeric,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    name: String,
    ty: FieldType,
    optional: bool,
    collation: TextCollation,
    range: bool,
    contains: bool,
    search: SearchParticipation,
}

impl FieldDef {
    pub fn integer(name: impl Into<String>) -> Self { Self::new(name.into(), FieldType::Integer) }

    pub fn text(name: impl Into<String>) -> Self { Self::new(name.into(), FieldType::Text) }

    fn new(name: String, ty: FieldType) -> Self {
        Self {
            name,
            ty,
            optional: false,
            collation: TextCollation::Exact,
            range: false,
            contains: false,
            search: SearchParticipation::Never,
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn folded(mut self) -> Self {
        self.collation = TextCollation::Folded;
        self
    }

    /// Accept dash-delimited ranges. Only meaningful for integer fields.
    pub fn with_range(mut self) -> Self {
        self.range = true;
        self
    }

    /// Accept case-insensitive substring matches.
    pub fn with_contains(mut self) -> Self {
        self.contains = true;
        self
    }

    pub fn searchable(mut self) -> Self {
        self.search = SearchParticipation::Always;
        self
    }

    pub fn searchable_when_numeric(mut self) -> Self {
        self.search = SearchParticipation::WhenNumeric;
        self
    }

    pub fn name(&self) -> &str { &self.name }
    pub fn ty(&self) -> FieldType { self.ty }
    pub fn is_optional(&self) -> bool { self.optional }
    /// Integer fields always compare exactly; folding only applies to text.
    pub fn collation(&self) -> TextCollation {
        match self.ty {
            FieldType::Text => self.collation,
            FieldType::Integer => TextCollation::Exact,
        }
    }
    pub fn search(&self) -> SearchParticipation { self.search }

    pub fn supports(&self, mode: MatchMode) -> bool {
        match mode {
            MatchMode::Eq => true,
            MatchMode::Range => self.range && self.ty == FieldType::Integer,
            MatchMode::Contains => self.contains,
        }
    }

    /// Integer fields can only ever equal a numeric search term, so they are gated the same way
    /// as fields explicitly marked `WhenNumeric`.
    pub(crate) fn numeric_gated(&self) -> bool {
        match self.search {
            SearchParticipation::Never => false,
            SearchParticipation::WhenNumeric => true,
            SearchParticipation::Always => self.ty == FieldType::Integer,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    fields: Vec<FieldDef>,
    global_aliases: Vec<String>,
}

impl Schema {
    pub fn builder() -> SchemaBuilder { SchemaBuilder::default() }

    pub fn fields(&self) -> &[FieldDef] { &self.fields }

    pub fn field(&self, name: &str) -> Option<&FieldDef> { self.fields.iter().find(|f| f.name == name) }

    pub fn global_aliases(&self) -> &[String] { &self.global_aliases }

    pub fn is_global(&self, name: &str) -> bool { self.global_aliases.iter().any(|alias| alias == name) }
}

#[derive(Debug, Default)]
pub struct SchemaBuilder {
    fields: Vec<FieldDef>,
    global_aliases: Option<Vec<String>>,
}

impl SchemaBuilder {
    pub fn field(mut self, field: FieldDef) -> Self {
        // Later declarations replace earlier ones with the same name
        self.fields.retain(|f| f.name != field.name);
        self.fields.push(field);
        self
    }

    /// Adds a global search alias. The first call replaces the default aliases.
    pub fn global_alias(mut self, alias: impl Into<String>) -> Self {
        self.global_aliases.get_or_insert_with(Vec::new).push(alias.into());
        self
    }

    pub fn build(self) -> Schema {
        let global_aliases =
            self.global_aliases.unwrap_or_else(|| DEFAULT_GLOBAL_ALIASES.iter().map(|alias| alias.to_string()).collect());
        Schema { fields: self.fields, global_aliases }
    }
}
