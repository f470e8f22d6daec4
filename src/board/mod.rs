pub mod store;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A tracked job application.
///
/// `status` is a free-form string; the engine matches it to a pipeline
/// column case-insensitively and defaults to Open when it matches
/// nothing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Application {
    pub id: String,
    pub company_name: String,
    pub role_title: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub applied_date: Option<NaiveDate>,
    #[serde(default)]
    pub applied_source: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub stages: Vec<InterviewStage>,
}

/// One interview stage attached to an application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewStage {
    pub name: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub outcome: Option<String>,
}

impl Application {
    pub fn new(id: impl Into<String>, company: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            company_name: company.into(),
            role_title: role.into(),
            status: None,
            applied_date: None,
            applied_source: None,
            notes: None,
            stages: Vec::new(),
        }
    }

    /// Case-insensitive substring match over company name and role title.
    pub fn matches_search(&self, query: &str) -> bool {
        let q = query.to_lowercase();
        self.company_name.to_lowercase().contains(&q)
            || self.role_title.to_lowercase().contains(&q)
    }
}
