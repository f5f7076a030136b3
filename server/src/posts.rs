use gridql::{FieldDef, FilterCriterion, FilterSet, Filterable, RawValue, Schema, SortDirection, SortSpec, Value};
use gridql_core::{Page, PageWindow, QueryRequest};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub user_id: i64,
    pub id: i64,
    pub title: String,
    pub body: String,
}

impl Filterable for Post {
    fn value(&self, name: &str) -> Option<Value> {
        match name {
            "userId" => Some(Value::Integer(self.user_id)),
            "id" => Some(Value::Integer(self.id)),
            "title" => Some(Value::from(self.title.as_str())),
            "body" => Some(Value::from(self.body.as_str())),
            _ => None,
        }
    }
}

/// `id` takes dash ranges, `title` and `body` match substrings and `searchText` searches both.
pub fn schema() -> Schema {
    Schema::builder()
        .field(FieldDef::integer("userId"))
        .field(FieldDef::integer("id").with_range())
        .field(FieldDef::text("title").with_contains().searchable())
        .field(FieldDef::text("body").with_contains().searchable())
        .global_alias("searchText")
        .build()
}

/// Arguments of a posts query, from a query string or a JSON body.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostsQuery {
    pub page: Option<usize>,
    pub limit: Option<usize>,
    pub user_id: Option<RawValue>,
    pub id: Option<RawValue>,
    pub title: Option<RawValue>,
    pub body: Option<RawValue>,
    pub search_text: Option<RawValue>,
    pub sort_field: Option<String>,
    pub sort_order: Option<i64>,
}

impl PostsQuery {
    pub fn filters(&self) -> FilterSet {
        let mut filters = FilterSet::new();
        let mut add = |field: &str, value: &Option<RawValue>, contains: bool| {
            if let Some(value) = value {
                let criterion =
                    if contains { FilterCriterion::contains(value.clone()) } else { FilterCriterion::eq(value.clone()) };
                filters.insert(field, criterion);
            }
        };
        add("userId", &self.user_id, false);
        add("id", &self.id, false);
        add("title", &self.title, true);
        add("body", &self.body, true);
        add("searchText", &self.search_text, true);
        filters
    }

    /// `sortOrder` 1 ascends, -1 descends and 0 leaves the order alone. Both arguments are needed.
    pub fn sort(&self) -> Option<SortSpec> {
        let field = self.sort_field.as_deref().filter(|f| !f.is_empty())?;
        let direction = SortDirection::from_order(self.sort_order?)?;
        Some(SortSpec { field: field.to_string(), direction })
    }

    pub fn request(&self, default_limit: usize) -> Result<QueryRequest, ApiError> {
        let window = PageWindow::from_page(self.page.unwrap_or(1), self.limit.unwrap_or(default_limit))
            .map_err(|e| ApiError::InvalidPagination(e.to_string()))?;
        Ok(QueryRequest::new(self.filters(), self.sort(), window))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostsResponse {
    pub data: Vec<Post>,
    pub total_records: usize,
}

impl From<Page<Post>> for PostsResponse {
    fn from(page: Page<Post>) -> Self { Self { data: page.records, total_records: page.total_count } }
}
