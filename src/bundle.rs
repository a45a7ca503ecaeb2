//! The set of repositories that together make up one application

use serde::Serialize;

/// One repository of a bundle, named `<project>.<subproject>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoDescriptor {
    pub project: String,
    pub subproject: String,
    pub name: String,
    pub description: String,
}

impl RepoDescriptor {
    pub fn new(project: &str, subproject: &str, description: &str) -> Self {
        Self {
            project: project.to_string(),
            subproject: subproject.to_string(),
            name: format!("{}.{}", project, subproject),
            description: description.to_string(),
        }
    }
}

/// Ordered, immutable list of the repositories of one application
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct RepoBundle {
    repos: Vec<RepoDescriptor>,
}

impl RepoBundle {
    /// The five repositories every project is made of
    pub fn standard(project: &str) -> Self {
        Self {
            repos: vec![
                RepoDescriptor::new(
                    project,
                    "svc",
                    "Source code for business logic and services layers",
                ),
                RepoDescriptor::new(project, "docs", "Source code for documentation website"),
                RepoDescriptor::new(project, "test", "Source code for test cases"),
                RepoDescriptor::new(
                    project,
                    "scenarios",
                    "Collection of self-contained databases (scenarios) used by test cases",
                ),
                RepoDescriptor::new(project, "ops", "Source code for tools to operate"),
            ],
        }
    }

    /// Append repositories that are not part of the standard layout
    pub fn extend(mut self, extra: impl IntoIterator<Item = RepoDescriptor>) -> Self {
        for descriptor in extra {
            if !self.contains(&descriptor.name) {
                self.repos.push(descriptor);
            }
        }
        self
    }

    /// Keep only the named repositories, in this bundle's order
    pub fn subset<S: AsRef<str>>(&self, names: &[S]) -> Self {
        Self {
            repos: self
                .repos
                .iter()
                .filter(|repo| names.iter().any(|name| name.as_ref() == repo.name))
                .cloned()
                .collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &RepoDescriptor> {
        self.repos.iter()
    }

    pub fn names(&self) -> Vec<String> {
        self.repos.iter().map(|repo| repo.name.clone()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&RepoDescriptor> {
        self.repos.iter().find(|repo| repo.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.repos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repos.is_empty()
    }
}
