use std::collections::HashMap;
use time::OffsetDateTime;

pub type ProjectId = i64;
pub type LanguageId = i64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub description: Option<String>,
    pub link: String,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Language {
    pub id: LanguageId,
    pub name: String,
}

/// A single row of `projects ⟕ tech_stack ⟕ languages`. Projects without any
/// association come back once with both language columns empty.
#[derive(Debug, Clone)]
pub struct ProjectLanguageRow {
    pub project: Project,
    pub language_id: Option<LanguageId>,
    pub language_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectWithLanguages {
    pub project: Project,
    pub languages: Vec<String>,
}

/// Scalar fields requested by an edit. `None` means the field was absent or null.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
}

/// Collapses joined rows into one record per project, keeping the order in
/// which projects and languages first appear.
pub fn group_project_rows(rows: Vec<ProjectLanguageRow>) -> Vec<ProjectWithLanguages> {
    let mut positions: HashMap<ProjectId, usize> = HashMap::new();
    let mut projects: Vec<ProjectWithLanguages> = Vec::new();

    for row in rows {
        let position = *positions.entry(row.project.id).or_insert_with(|| {
            projects.push(ProjectWithLanguages {
                project: row.project.clone(),
                languages: vec![],
            });
            projects.len() - 1
        });

        if let (Some(_), Some(language_name)) = (row.language_id, row.language_name) {
            projects[position].languages.push(language_name);
        }
    }

    projects
}
