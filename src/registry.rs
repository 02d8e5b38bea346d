use crate::errors::RegistryError;
use serde::{Deserialize, Serialize};

pub const MAX_TASKS: usize = 8;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct TaskRegistry {
    labels: Vec<String>,
}

impl TaskRegistry {
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.iter().any(|existing| existing == label)
    }

    pub fn add(&mut self, raw: &str) -> Result<(), RegistryError> {
        let label = raw.trim();
        if label.is_empty() {
            return Err(RegistryError::Empty);
        }
        if self.contains(label) {
            return Err(RegistryError::Exists);
        }
        if self.labels.len() >= MAX_TASKS {
            return Err(RegistryError::LimitReached);
        }
        self.labels.push(label.to_string());
        Ok(())
    }

    pub fn remove(&mut self, label: &str) -> bool {
        match self.labels.iter().position(|existing| existing == label) {
            Some(index) => {
                self.labels.remove(index);
                true
            }
            None => false,
        }
    }
}

impl From<Vec<String>> for TaskRegistry {
    fn from(stored: Vec<String>) -> Self {
        let mut registry = Self::default();
        for label in stored {
            let _ = registry.add(&label);
        }
        registry
    }
}

impl From<TaskRegistry> for Vec<String> {
    fn from(registry: TaskRegistry) -> Self {
        registry.labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_trims_and_appends_in_order() {
        let mut registry = TaskRegistry::default();
        registry.add("  Read ").unwrap();
        registry.add("Run").unwrap();
        assert_eq!(registry.labels(), ["Read", "Run"]);
    }

    #[test]
    fn duplicate_add_is_rejected() {
        let mut registry = TaskRegistry::default();
        registry.add("Meditate").unwrap();
        assert_eq!(registry.add("Meditate"), Err(RegistryError::Exists));
        assert_eq!(registry.add(" Meditate  "), Err(RegistryError::Exists));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn empty_add_is_rejected() {
        let mut registry = TaskRegistry::default();
        assert_eq!(registry.add("   "), Err(RegistryError::Empty));
        assert!(registry.is_empty());
    }

    #[test]
    fn ninth_task_hits_limit() {
        let mut registry = TaskRegistry::default();
        for i in 0..MAX_TASKS {
            registry.add(&format!("task {i}")).unwrap();
        }
        assert_eq!(registry.add("one more"), Err(RegistryError::LimitReached));
        assert_eq!(registry.len(), MAX_TASKS);
    }

    #[test]
    fn duplicate_wins_over_limit() {
        let mut registry = TaskRegistry::default();
        for i in 0..MAX_TASKS {
            registry.add(&format!("task {i}")).unwrap();
        }
        assert_eq!(registry.add("task 0"), Err(RegistryError::Exists));
    }

    #[test]
    fn remove_drops_only_the_match() {
        let mut registry = TaskRegistry::from(vec!["A".to_string(), "B".to_string()]);
        assert!(registry.remove("A"));
        assert!(!registry.remove("missing"));
        assert_eq!(registry.labels(), ["B"]);
    }

    #[test]
    fn stored_list_is_normalized_on_load() {
        let stored: Vec<String> = ["A", "A", "", "B", "C", "D", "E", "F", "G", "H", "I"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let registry: TaskRegistry =
            serde_json::from_str(&serde_json::to_string(&stored).unwrap()).unwrap();
        assert_eq!(registry.len(), MAX_TASKS);
        assert_eq!(registry.labels()[0], "A");
        assert_eq!(registry.labels()[1], "B");
        assert!(!registry.contains("I"));
    }

    #[test]
    fn serializes_as_plain_list() {
        let registry = TaskRegistry::from(vec!["Read".to_string()]);
        assert_eq!(serde_json::to_string(&registry).unwrap(), r#"["Read"]"#);
    }
}
