//! Reader persona and task.

use serde::{Deserialize, Serialize};

/// A persona description plus a task description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    /// Who is reading (e.g. "Travel Planner")
    pub persona: String,
    /// What they need to get done
    pub task: String,
}

impl Query {
    /// Create a query.
    pub fn new(persona: impl Into<String>, task: impl Into<String>) -> Self {
        Self {
            persona: persona.into(),
            task: task.into(),
        }
    }

    /// Persona and task joined into one text for similarity scoring.
    pub fn text(&self) -> String {
        format!("{} {}", self.persona, self.task)
    }

    /// Check if both fields are blank.
    pub fn is_blank(&self) -> bool {
        self.persona.trim().is_empty() && self.task.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_text() {
        let q = Query::new("Travel Planner", "Plan a 4-day trip");
        assert_eq!(q.text(), "Travel Planner Plan a 4-day trip");
        assert!(!q.is_blank());
        assert!(Query::default().is_blank());
    }
}
