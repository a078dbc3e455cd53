//! Section registry - the fixed catalog the sidebar searches and navigates
//!
//! Order here is the order of the rendered document and the order every
//! filter result preserves.

use serde::Serialize;

/// One topic entry in the documentation catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Section {
    /// Stable anchor id (unique across the registry)
    pub id: &'static str,
    /// Display title shown in the sidebar and as the section heading
    pub title: &'static str,
    /// Single glyph shown before the title
    pub icon: &'static str,
}

impl Section {
    const fn new(id: &'static str, title: &'static str, icon: &'static str) -> Self {
        Self { id, title, icon }
    }
}

/// The full ordered catalog
pub const SECTIONS: &[Section] = &[
    Section::new("overview", "Project Overview", "📘"),
    Section::new("cicd-basics", "CI/CD Fundamentals", "🔁"),
    Section::new("github-actions", "GitHub Actions Pipelines", "⚙"),
    Section::new("docker", "Docker Images", "🐳"),
    Section::new("dockerfile-best-practices", "Dockerfile Best Practices", "📦"),
    Section::new("k8s-basics", "Kubernetes Basics", "☸"),
    Section::new("k8s-deployments", "Deployments & Rollouts", "🚀"),
    Section::new("k8s-services", "Services & Ingress", "🌐"),
    Section::new("k8s-config", "ConfigMaps & Secrets", "🔐"),
    Section::new("helm", "Helm Charts", "⛵"),
    Section::new("monitoring", "Monitoring & Logging", "📈"),
    Section::new("troubleshooting", "Troubleshooting", "🛠"),
];

/// Look up a section by id
pub fn find(id: &str) -> Option<&'static Section> {
    SECTIONS.iter().find(|s| s.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_are_unique() {
        let ids: HashSet<_> = SECTIONS.iter().map(|s| s.id).collect();
        assert_eq!(ids.len(), SECTIONS.len());
    }

    #[test]
    fn test_find() {
        assert_eq!(find("k8s-basics").map(|s| s.title), Some("Kubernetes Basics"));
        assert!(find("nope").is_none());
    }
}
