use crate::domain::portfolio::{LanguageId, Project, ProjectPatch};
use std::collections::BTreeSet;

/// Association rows to write so a project's languages match the desired set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    pub to_add: Vec<LanguageId>,
    pub to_remove: Vec<LanguageId>,
}

impl Reconciliation {
    pub fn between(current: &BTreeSet<LanguageId>, desired: &BTreeSet<LanguageId>) -> Self {
        Self {
            to_add: desired.difference(current).copied().collect(),
            to_remove: current.difference(desired).copied().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }
}

/// Scalar fields whose requested value differs from the stored one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
}

impl ProjectChanges {
    /// Blank or absent values never produce a change; values are compared trimmed.
    pub fn between(current: &Project, patch: &ProjectPatch) -> Self {
        Self {
            name: candidate(patch.name.as_deref()).filter(|name| *name != current.name),
            description: candidate(patch.description.as_deref())
                .filter(|description| Some(description.as_str()) != current.description.as_deref()),
            link: candidate(patch.link.as_deref()).filter(|link| *link != current.link),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.link.is_none()
    }

    pub fn changed_fields(&self) -> Vec<&'static str> {
        let mut fields = vec![];
        if self.name.is_some() {
            fields.push("name");
        }
        if self.description.is_some() {
            fields.push("description");
        }
        if self.link.is_some() {
            fields.push("link");
        }

        fields
    }
}

fn candidate(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
