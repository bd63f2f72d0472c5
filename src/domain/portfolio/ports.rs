use crate::domain::portfolio::{
    Language, LanguageId, ProjectChanges, ProjectId, ProjectLanguageRow, ProjectPatch,
    ProjectWithLanguages, Reconciliation, UnknownLanguages,
};
use crate::outbound::db::error::Error as DatabaseError;
use async_trait::async_trait;
use std::collections::BTreeSet;
use thiserror::Error;

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait PortfolioService: Send + Sync {
    async fn list_projects(
        &self,
        params: ListProjectsServiceParams,
    ) -> Result<ListProjectsResult, ListProjectsError>;
    async fn list_languages(&self) -> Result<ListLanguagesResult, ListLanguagesError>;
    async fn create_project(
        &self,
        params: CreateProjectServiceParams,
    ) -> Result<CreateProjectResult, CreateProjectError>;
    async fn edit_project(
        &self,
        params: EditProjectServiceParams,
    ) -> Result<EditProjectResult, EditProjectError>;
    async fn delete_project(
        &self,
        params: DeleteProjectServiceParams,
    ) -> Result<DeleteProjectResult, DeleteProjectError>;
}

//------------------------------------------------------------------------------
// List Projects
//------------------------------------------------------------------------------

pub struct ListProjectsServiceParams {
    /// Language filter; a project matches when it uses any of them. Empty means no filter.
    pub languages: Vec<String>,
}

pub struct ListProjectsResult {
    pub projects: Vec<ProjectWithLanguages>,
}

#[derive(Debug, Error)]
pub enum ListProjectsError {
    #[error(transparent)]
    InvalidLanguages(#[from] UnknownLanguages),

    #[error("failed to list projects because of database error")]
    DatabaseError(#[from] DatabaseError),
}

//------------------------------------------------------------------------------
// List Languages
//------------------------------------------------------------------------------

pub struct ListLanguagesResult {
    pub languages: Vec<Language>,
}

#[derive(Debug, Error)]
pub enum ListLanguagesError {
    #[error("failed to load language catalog because of database error")]
    DatabaseError(#[from] DatabaseError),
}

//------------------------------------------------------------------------------
// Create Project
//------------------------------------------------------------------------------

/// Raw request fields; presence and shape are checked by the service.
#[derive(Debug, Clone, Default)]
pub struct CreateProjectServiceParams {
    pub name: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
    pub languages: Option<Vec<String>>,
}

pub struct CreateProjectResult {
    pub project_id: ProjectId,
}

#[derive(Debug, Error)]
pub enum CreateProjectError {
    #[error("name, link and a non-empty languages array are required")]
    MissingFields,

    #[error(transparent)]
    InvalidLanguages(#[from] UnknownLanguages),

    #[error("failed to create project because of database error")]
    DatabaseError(#[from] DatabaseError),
}

//------------------------------------------------------------------------------
// Edit Project
//------------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct EditProjectServiceParams {
    pub project_id: ProjectId,
    pub patch: ProjectPatch,
    pub languages: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditProjectResult {
    pub project_id: ProjectId,
    pub rows_affected: u64,
    pub changed_fields: Vec<&'static str>,
    pub languages_added: Vec<String>,
    pub languages_removed: Vec<String>,
}

#[derive(Debug, Error)]
pub enum EditProjectError {
    #[error("project not found")]
    NotFound,

    #[error(transparent)]
    InvalidLanguages(#[from] UnknownLanguages),

    #[error("failed to edit project because of database error")]
    DatabaseError(#[from] DatabaseError),
}

//------------------------------------------------------------------------------
// Delete Project
//------------------------------------------------------------------------------

pub struct DeleteProjectServiceParams {
    pub project_id: ProjectId,
}

pub struct DeleteProjectResult {
    pub project_id: ProjectId,
}

#[derive(Debug, Error)]
pub enum DeleteProjectError {
    #[error("project not found")]
    NotFound,

    #[error("failed to delete project because of database error")]
    DatabaseError(#[from] DatabaseError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// Database Repository
////////////////////////////////////////////////////////////////////////////////////////////////////

/// Every method that writes more than one statement runs them in a single
/// transaction.
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait DatabaseRepository: Send + Sync + 'static {
    async fn list_languages(&self) -> Result<Vec<Language>, DatabaseError>;

    async fn list_projects(
        &self,
        params: ListProjectsDBParams,
    ) -> Result<Vec<ProjectLanguageRow>, DatabaseError>;

    async fn create_project(&self, params: CreateProjectDBParams)
    -> Result<ProjectId, DatabaseError>;

    /// Fails with `DatabaseError::NotFound` before writing anything when the
    /// project does not exist, then with `DatabaseError::InvalidLanguages` when
    /// `languages` holds unknown names.
    async fn update_project(
        &self,
        params: UpdateProjectDBParams,
    ) -> Result<UpdateProjectOutcome, DatabaseError>;

    async fn delete_project(&self, params: DeleteProjectDBParams) -> Result<(), DatabaseError>;
}

//------------------------------------------------------------------------------
// List Projects
//------------------------------------------------------------------------------

pub struct ListProjectsDBParams {
    pub languages: Vec<String>,
}

//------------------------------------------------------------------------------
// Create Project
//------------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct CreateProjectDBParams {
    pub name: String,
    pub description: Option<String>,
    pub link: String,
    pub language_ids: Vec<LanguageId>,
}

//------------------------------------------------------------------------------
// Update Project
//------------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct UpdateProjectDBParams {
    pub project_id: ProjectId,
    pub patch: ProjectPatch,
    /// Desired associations; `None` leaves the project's languages untouched.
    pub languages: Option<DesiredLanguages>,
}

/// Requested languages translated against the catalog. Unknown names are
/// rejected only after the project row is known to exist, so a missing project
/// always reports `NotFound`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DesiredLanguages {
    Known(BTreeSet<LanguageId>),
    Unknown(UnknownLanguages),
}

impl From<Result<BTreeSet<LanguageId>, UnknownLanguages>> for DesiredLanguages {
    fn from(value: Result<BTreeSet<LanguageId>, UnknownLanguages>) -> Self {
        match value {
            Ok(ids) => Self::Known(ids),
            Err(unknown) => Self::Unknown(unknown),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateProjectOutcome {
    pub rows_affected: u64,
    pub changes: ProjectChanges,
    pub reconciliation: Option<Reconciliation>,
}

//------------------------------------------------------------------------------
// Delete Project
//------------------------------------------------------------------------------

pub struct DeleteProjectDBParams {
    pub project_id: ProjectId,
}
