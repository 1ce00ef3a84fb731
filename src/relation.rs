//! State for server-backed `relation` fields.
//!
//! The crate never performs the lookup itself. It hands out
//! [`RelationRequest`]s and the host answers them later with [`RelationSearch::apply`].
//! Every request carries the field's generation at issue time; typing a new
//! search term bumps the generation, so answers to outdated searches are
//! dropped instead of overwriting newer results.

use crate::schema::{FieldType, ToolField, ToolSection};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Distance from the bottom, in pixels, at which scrolling loads the next page.
pub const SCROLL_THRESHOLD: f64 = 20.0;

pub const LOADING_LABEL: &str = "Loading...";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationItem {
    pub id: serde_json::Value,
    pub label: String,
}

/// One page of search results as returned by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationPage {
    pub items: Vec<RelationItem>,
    pub has_more: bool,
}

/// A search the host should run on behalf of a field.
#[derive(Debug, Clone, PartialEq)]
pub struct RelationRequest {
    pub field: String,
    pub class: String,
    pub search: String,
    pub page: u32,
    pub filter: serde_json::Map<String, serde_json::Value>,
    pub generation: u64,
}

/// A request for the display label of an already stored relation id.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelRequest {
    pub field: String,
    pub class: String,
    pub id: serde_json::Value,
}

/// Scroll position of a field's option list.
#[derive(Debug, Clone, Copy)]
pub struct ScrollMetrics {
    pub scroll_height: f64,
    pub scroll_top: f64,
    pub client_height: f64,
}

impl ScrollMetrics {
    pub fn near_bottom(&self) -> bool {
        self.scroll_height - self.scroll_top <= self.client_height + SCROLL_THRESHOLD
    }
}

#[derive(Debug, Clone)]
pub struct RelationState {
    pub options: Vec<RelationItem>,
    pub page: u32,
    pub loading: bool,
    pub open: bool,
    pub search: String,
    pub has_more: bool,
    pub selected_label: Option<String>,
    generation: u64,
    due: Option<Instant>,
}

impl Default for RelationState {
    fn default() -> Self {
        Self {
            options: Vec::new(),
            page: 1,
            loading: false,
            open: false,
            search: String::new(),
            has_more: true,
            selected_label: None,
            generation: 0,
            due: None,
        }
    }
}

impl RelationState {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone)]
struct RelationField {
    class: String,
    filter: serde_json::Map<String, serde_json::Value>,
}

/// Relation lookup state for every relation field of one edit form.
#[derive(Debug, Clone)]
pub struct RelationSearch {
    fields: AHashMap<String, RelationField>,
    /// Relation field keys in form order.
    order: Vec<String>,
    states: AHashMap<String, RelationState>,
    debounce: Duration,
}

impl RelationSearch {
    pub fn new(sections: &[ToolSection], debounce: Duration) -> Self {
        let declared: Vec<(String, RelationField)> = sections
            .iter()
            .flat_map(|s| s.fields.iter())
            .filter(|f| f.field_type == FieldType::Relation)
            .filter_map(|f: &ToolField| {
                let class = f.relation_class.clone()?;
                Some((
                    f.property.clone(),
                    RelationField {
                        class,
                        filter: f.filter.clone().unwrap_or_default(),
                    },
                ))
            })
            .collect();
        let order = declared.iter().map(|(key, _)| key.clone()).collect();

        Self {
            fields: declared.into_iter().collect(),
            order,
            states: AHashMap::new(),
            debounce,
        }
    }

    pub fn state(&self, field: &str) -> Option<&RelationState> {
        self.states.get(field)
    }

    /// Opens or closes a field's option list. The first open loads page one.
    pub fn toggle(&mut self, field: &str) -> Option<RelationRequest> {
        if !self.fields.contains_key(field) {
            return None;
        }
        let first_open = !self.states.contains_key(field);
        let state = self.states.entry(field.to_string()).or_default();
        state.open = !state.open;
        if first_open { self.load(field, false) } else { None }
    }

    /// Records a new search term and schedules a debounced reload.
    ///
    /// Any request still in flight for this field becomes stale.
    pub fn input(&mut self, field: &str, term: &str, now: Instant) {
        if !self.fields.contains_key(field) {
            return;
        }
        let debounce = self.debounce;
        let state = self.states.entry(field.to_string()).or_default();
        state.search = term.to_string();
        state.page = 1;
        state.has_more = true;
        state.generation += 1;
        if state.loading {
            log::debug!("Superseding in-flight relation search for '{}'", field);
            state.loading = false;
        }
        state.due = Some(now + debounce);
    }

    /// Releases every debounced search whose delay has elapsed.
    pub fn poll(&mut self, now: Instant) -> Vec<RelationRequest> {
        let due: Vec<String> = self
            .states
            .iter_mut()
            .filter(|(_, s)| s.due.is_some_and(|d| d <= now))
            .map(|(field, s)| {
                s.due = None;
                field.clone()
            })
            .collect();

        due.iter().filter_map(|f| self.load(f, false)).collect()
    }

    /// Loads the next page once the list is scrolled near its bottom.
    pub fn scroll(&mut self, field: &str, metrics: ScrollMetrics) -> Option<RelationRequest> {
        if metrics.near_bottom() {
            self.load(field, true)
        } else {
            None
        }
    }

    /// Applies a page of results. Returns `false` when the answer was stale
    /// and ignored.
    pub fn apply(&mut self, request: &RelationRequest, page: RelationPage) -> bool {
        let Some(state) = self.states.get_mut(&request.field) else {
            return false;
        };
        if state.generation != request.generation || state.page != request.page {
            log::debug!(
                "Dropping stale relation page {} for '{}' (generation {}, current {})",
                request.page,
                request.field,
                request.generation,
                state.generation
            );
            return false;
        }

        if request.page == 1 {
            state.options = page.items;
        } else {
            state.options.extend(page.items);
        }
        state.has_more = page.has_more;
        state.page += 1;
        state.loading = false;
        true
    }

    /// Marks a failed request as finished so the field can load again.
    pub fn fail(&mut self, request: &RelationRequest) {
        if let Some(state) = self.states.get_mut(&request.field) {
            if state.generation == request.generation {
                state.loading = false;
            }
        }
    }

    /// Picks an option. The caller stores the returned id as the field value.
    pub fn select(&mut self, field: &str, item: &RelationItem) -> serde_json::Value {
        let state = self.states.entry(field.to_string()).or_default();
        state.selected_label = Some(item.label.clone());
        state.open = false;
        item.id.clone()
    }

    /// Label lookups needed for relation fields that already hold an id, in
    /// form order. Empty ids are skipped.
    pub fn pending_labels(
        &mut self,
        values: &serde_json::Map<String, serde_json::Value>,
    ) -> Vec<LabelRequest> {
        let mut requests = Vec::new();
        for field in &self.order {
            let Some(relation) = self.fields.get(field) else {
                continue;
            };
            let Some(id) = values.get(field).filter(|v| !is_empty_id(v)) else {
                continue;
            };
            let state = self.states.entry(field.clone()).or_default();
            if state.selected_label.is_some() {
                continue;
            }
            state.selected_label = Some(LOADING_LABEL.to_string());
            requests.push(LabelRequest {
                field: field.clone(),
                class: relation.class.clone(),
                id: id.clone(),
            });
        }
        requests
    }

    pub fn apply_label(&mut self, field: &str, label: impl Into<String>) {
        if let Some(state) = self.states.get_mut(field) {
            state.selected_label = Some(label.into());
        }
    }

    fn load(&mut self, field: &str, is_scroll: bool) -> Option<RelationRequest> {
        let relation = self.fields.get(field)?;
        let state = self.states.get_mut(field)?;
        if state.loading || (is_scroll && !state.has_more) {
            return None;
        }

        state.loading = true;
        Some(RelationRequest {
            field: field.to_string(),
            class: relation.class.clone(),
            search: state.search.clone(),
            page: state.page,
            filter: relation.filter.clone(),
            generation: state.generation,
        })
    }
}

fn is_empty_id(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => true,
        serde_json::Value::String(s) => s.is_empty(),
        _ => false,
    }
}
