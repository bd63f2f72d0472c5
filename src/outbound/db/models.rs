use crate::domain::portfolio::{Language, Project, ProjectLanguageRow};
use sqlx::FromRow;
use time::OffsetDateTime;

#[derive(FromRow, Clone)]
pub struct ProjectRow {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub link: String,
    pub created_at: OffsetDateTime,
}

impl From<ProjectRow> for Project {
    fn from(value: ProjectRow) -> Self {
        Self {
            id: value.id,
            name: value.name,
            description: value.description,
            link: value.link,
            created_at: value.created_at,
        }
    }
}

#[derive(FromRow, Clone)]
pub struct LanguageRow {
    pub id: i64,
    pub name: String,
}

impl From<LanguageRow> for Language {
    fn from(value: LanguageRow) -> Self {
        Self {
            id: value.id,
            name: value.name,
        }
    }
}

pub struct LanguageRowList(pub Vec<LanguageRow>);

impl From<LanguageRowList> for Vec<Language> {
    fn from(value: LanguageRowList) -> Self {
        value.0.into_iter().map(|row| row.into()).collect()
    }
}

/// Flattened `projects ⟕ tech_stack ⟕ languages` row.
#[derive(FromRow, Clone)]
pub struct ProjectLanguageJoinRow {
    pub project_id: i64,
    pub project_name: String,
    pub description: Option<String>,
    pub link: String,
    pub created_at: OffsetDateTime,
    pub language_id: Option<i64>,
    pub language_name: Option<String>,
}

impl From<ProjectLanguageJoinRow> for ProjectLanguageRow {
    fn from(value: ProjectLanguageJoinRow) -> Self {
        Self {
            project: Project {
                id: value.project_id,
                name: value.project_name,
                description: value.description,
                link: value.link,
                created_at: value.created_at,
            },
            language_id: value.language_id,
            language_name: value.language_name,
        }
    }
}

pub struct ProjectLanguageJoinRowList(pub Vec<ProjectLanguageJoinRow>);

impl From<ProjectLanguageJoinRowList> for Vec<ProjectLanguageRow> {
    fn from(value: ProjectLanguageJoinRowList) -> Self {
        value.0.into_iter().map(|row| row.into()).collect()
    }
}
