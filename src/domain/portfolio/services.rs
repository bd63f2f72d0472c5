use crate::domain::portfolio::{
    CreateProjectDBParams, CreateProjectError, CreateProjectResult, CreateProjectServiceParams,
    DatabaseRepository, DeleteProjectDBParams, DeleteProjectError, DeleteProjectResult,
    DeleteProjectServiceParams, DesiredLanguages, EditProjectError, EditProjectResult,
    EditProjectServiceParams, LanguageCatalog, ListLanguagesError, ListLanguagesResult,
    ListProjectsDBParams, ListProjectsError, ListProjectsResult, ListProjectsServiceParams,
    PortfolioService, UnknownLanguages, UpdateProjectDBParams, group_project_rows,
    verify_language_input,
};
use crate::outbound::db::error::Error as DatabaseError;
use async_trait::async_trait;

#[derive(Debug, Clone)]
pub struct Service<DB>
where
    DB: DatabaseRepository,
{
    db: DB,
}

impl<DB> Service<DB>
where
    DB: DatabaseRepository,
{
    pub fn new(db: DB) -> Self {
        Self { db }
    }

    async fn catalog(&self) -> Result<LanguageCatalog, DatabaseError> {
        let languages = self.db.list_languages().await?;
        tracing::debug!(languages = languages.len(), "loaded language catalog");

        Ok(LanguageCatalog::from_languages(languages))
    }
}

#[async_trait]
impl<DB> PortfolioService for Service<DB>
where
    DB: DatabaseRepository,
{
    async fn list_projects(
        &self,
        params: ListProjectsServiceParams,
    ) -> Result<ListProjectsResult, ListProjectsError> {
        if !params.languages.is_empty() {
            let catalog = self.catalog().await?;
            if !verify_language_input(&params.languages, catalog.names()) {
                return Err(UnknownLanguages(catalog.unknown(&params.languages)).into());
            }
        }

        let rows = self
            .db
            .list_projects(ListProjectsDBParams {
                languages: params.languages,
            })
            .await?;

        Ok(ListProjectsResult {
            projects: group_project_rows(rows),
        })
    }

    async fn list_languages(&self) -> Result<ListLanguagesResult, ListLanguagesError> {
        let languages = self.db.list_languages().await?;

        Ok(ListLanguagesResult { languages })
    }

    async fn create_project(
        &self,
        params: CreateProjectServiceParams,
    ) -> Result<CreateProjectResult, CreateProjectError> {
        let name = required(params.name).ok_or(CreateProjectError::MissingFields)?;
        let link = required(params.link).ok_or(CreateProjectError::MissingFields)?;
        let languages = params
            .languages
            .filter(|languages| !languages.is_empty())
            .ok_or(CreateProjectError::MissingFields)?;

        let catalog = self.catalog().await?;
        let language_ids = catalog.translate(&languages)?;

        let project_id = self
            .db
            .create_project(CreateProjectDBParams {
                name,
                description: required(params.description),
                link,
                language_ids: language_ids.into_iter().collect(),
            })
            .await?;
        tracing::debug!(project_id, "created project");

        Ok(CreateProjectResult { project_id })
    }

    async fn edit_project(
        &self,
        params: EditProjectServiceParams,
    ) -> Result<EditProjectResult, EditProjectError> {
        let (catalog, languages) = match params.languages {
            Some(languages) => {
                let catalog = self.catalog().await?;
                let desired = DesiredLanguages::from(catalog.translate(&languages));
                (catalog, Some(desired))
            }
            None => (LanguageCatalog::default(), None),
        };

        let outcome = self
            .db
            .update_project(UpdateProjectDBParams {
                project_id: params.project_id,
                patch: params.patch,
                languages,
            })
            .await
            .map_err(|e| match e {
                DatabaseError::NotFound => EditProjectError::NotFound,
                DatabaseError::InvalidLanguages(e) => EditProjectError::InvalidLanguages(e),
                e => EditProjectError::DatabaseError(e),
            })?;

        let reconciliation = outcome.reconciliation.unwrap_or_default();
        tracing::debug!(
            project_id = params.project_id,
            rows_affected = outcome.rows_affected,
            added = reconciliation.to_add.len(),
            removed = reconciliation.to_remove.len(),
            "edited project"
        );

        Ok(EditProjectResult {
            project_id: params.project_id,
            rows_affected: outcome.rows_affected,
            changed_fields: outcome.changes.changed_fields(),
            languages_added: catalog.names_of(&reconciliation.to_add),
            languages_removed: catalog.names_of(&reconciliation.to_remove),
        })
    }

    async fn delete_project(
        &self,
        params: DeleteProjectServiceParams,
    ) -> Result<DeleteProjectResult, DeleteProjectError> {
        self.db
            .delete_project(DeleteProjectDBParams {
                project_id: params.project_id,
            })
            .await
            .map_err(|e| match e {
                DatabaseError::NotFound => DeleteProjectError::NotFound,
                e => DeleteProjectError::DatabaseError(e),
            })?;
        tracing::debug!(project_id = params.project_id, "deleted project");

        Ok(DeleteProjectResult {
            project_id: params.project_id,
        })
    }
}

/// Trims the value and drops it when nothing is left.
fn required(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
