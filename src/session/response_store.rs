use std::collections::BTreeMap;

use chrono::Duration;

use crate::models::response::{QuestionResponse, ResponseRecord};
use crate::models::template::Template;

/// Per-question responses keyed by question id. Writes replace, never append.
#[derive(Debug, Clone, Default)]
pub struct ResponseStore {
    entries: BTreeMap<i32, QuestionResponse>,
    /// Per-question time at clock precision; responses carry the whole seconds.
    time_spent: BTreeMap<i32, Duration>,
}

impl ResponseStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn restore(records: &[ResponseRecord]) -> Self {
        let mut store = Self::new();
        for record in records {
            store.upsert(record.to_response());
        }
        store
    }

    pub fn get(&self, question_id: i32) -> Option<&QuestionResponse> {
        self.entries.get(&question_id)
    }

    pub fn upsert(&mut self, response: QuestionResponse) {
        self.entries.insert(response.question_id, response);
    }

    /// Applies `edit` to the entry for `question_id`, starting from a placeholder when absent.
    pub fn update<F>(&mut self, question_id: i32, edit: F)
    where
        F: FnOnce(&mut QuestionResponse),
    {
        let mut response = self
            .entries
            .get(&question_id)
            .cloned()
            .unwrap_or_else(|| QuestionResponse::placeholder(question_id));
        edit(&mut response);
        self.upsert(response);
    }

    pub fn add_time(&mut self, question_id: i32, spent: Duration) {
        if spent <= Duration::zero() {
            return;
        }
        let recorded = self
            .entries
            .get(&question_id)
            .map_or(0, |r| r.time_spent_seconds);
        let total = self
            .time_spent
            .entry(question_id)
            .or_insert_with(|| Duration::seconds(recorded));
        *total = *total + spent;
        let seconds = total.num_seconds();
        self.update(question_id, |r| r.time_spent_seconds = seconds);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// One response per template question, stored or placeholder, in template order.
    pub fn snapshot_all(&self, template: &Template) -> Vec<QuestionResponse> {
        template
            .keyed_questions()
            .map(|(key, _)| {
                self.entries
                    .get(&key)
                    .cloned()
                    .unwrap_or_else(|| QuestionResponse::placeholder(key))
            })
            .collect()
    }

    pub fn non_empty(&self, template: &Template) -> Vec<QuestionResponse> {
        self.snapshot_all(template)
            .into_iter()
            .filter(QuestionResponse::has_content)
            .collect()
    }

    /// `non_empty` responses denormalized with their questions for persistence.
    pub fn non_empty_records(&self, template: &Template) -> Vec<ResponseRecord> {
        template
            .keyed_questions()
            .filter_map(|(key, question)| {
                self.entries
                    .get(&key)
                    .filter(|r| r.has_content())
                    .map(|r| ResponseRecord::new(question, r.clone()))
            })
            .collect()
    }

    pub fn answered_count(&self, template: &Template) -> usize {
        self.non_empty(template).len()
    }

    pub fn flagged_count(&self, template: &Template) -> usize {
        self.snapshot_all(template).iter().filter(|r| r.flagged).count()
    }
}
