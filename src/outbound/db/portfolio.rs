use crate::domain::portfolio::{
    CreateProjectDBParams, DatabaseRepository, DeleteProjectDBParams, DesiredLanguages, Language,
    LanguageId, ListProjectsDBParams, Project, ProjectChanges, ProjectId, ProjectLanguageRow,
    Reconciliation, UpdateProjectDBParams, UpdateProjectOutcome,
};
use crate::outbound::db::error::Error;
use crate::outbound::db::models::{
    LanguageRow, LanguageRowList, ProjectLanguageJoinRow, ProjectLanguageJoinRowList, ProjectRow,
};
use crate::outbound::db::repository::Repository;
use async_trait::async_trait;
use sqlx::PgConnection;
use std::collections::BTreeSet;

const LIST_PROJECTS: &str = r#"
select
    p.id   as project_id,
    p.name as project_name,
    p.description,
    p.link,
    p.created_at,
    l.id   as language_id,
    l.name as language_name
from projects p
left join tech_stack ts on ts.project_id = p.id
left join languages l on l.id = ts.language_id
"#;

const FILTER_BY_LANGUAGES: &str = r#"
where p.id in (
    select ts.project_id
    from tech_stack ts
    join languages l on l.id = ts.language_id
    where l.name = any($1)
)
"#;

const ORDER_PROJECTS: &str = "order by p.id, l.name";

#[async_trait]
impl DatabaseRepository for Repository {
    async fn list_languages(&self) -> Result<Vec<Language>, Error> {
        let result = sqlx::query_as::<_, LanguageRow>("select id, name from languages order by id")
            .fetch_all(&self.pool)
            .await?;

        Ok(LanguageRowList(result).into())
    }

    async fn list_projects(
        &self,
        params: ListProjectsDBParams,
    ) -> Result<Vec<ProjectLanguageRow>, Error> {
        let result = if params.languages.is_empty() {
            let query = format!("{LIST_PROJECTS}{ORDER_PROJECTS}");
            sqlx::query_as::<_, ProjectLanguageJoinRow>(&query)
                .fetch_all(&self.pool)
                .await?
        } else {
            let query = format!("{LIST_PROJECTS}{FILTER_BY_LANGUAGES}{ORDER_PROJECTS}");
            sqlx::query_as::<_, ProjectLanguageJoinRow>(&query)
                .bind(params.languages)
                .fetch_all(&self.pool)
                .await?
        };

        Ok(ProjectLanguageJoinRowList(result).into())
    }

    async fn create_project(&self, params: CreateProjectDBParams) -> Result<ProjectId, Error> {
        let mut tx = self.begin().await?;

        let project_id: ProjectId = sqlx::query_scalar(
            "insert into projects (name, description, link) values ($1, $2, $3) returning id",
        )
        .bind(params.name)
        .bind(params.description)
        .bind(params.link)
        .fetch_one(&mut *tx)
        .await?;

        insert_tech_stack(&mut tx, project_id, &params.language_ids).await?;

        tx.commit().await?;

        Ok(project_id)
    }

    async fn update_project(
        &self,
        params: UpdateProjectDBParams,
    ) -> Result<UpdateProjectOutcome, Error> {
        let mut tx = self.begin().await?;

        let current: Project = sqlx::query_as::<_, ProjectRow>(
            "select id, name, description, link, created_at from projects where id = $1 for update",
        )
        .bind(params.project_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(Error::NotFound)?
        .into();

        let desired = match params.languages {
            Some(DesiredLanguages::Unknown(unknown)) => return Err(unknown.into()),
            Some(DesiredLanguages::Known(ids)) => Some(ids),
            None => None,
        };

        let changes = ProjectChanges::between(&current, &params.patch);
        let rows_affected = if changes.is_empty() {
            0
        } else {
            sqlx::query(
                r#"
update projects
set name        = coalesce($2, name),
    description = coalesce($3, description),
    link        = coalesce($4, link)
where id = $1
"#,
            )
            .bind(params.project_id)
            .bind(changes.name.as_deref())
            .bind(changes.description.as_deref())
            .bind(changes.link.as_deref())
            .execute(&mut *tx)
            .await?
            .rows_affected()
        };

        let reconciliation = match desired {
            Some(desired) => {
                let current: BTreeSet<LanguageId> = sqlx::query_scalar::<_, LanguageId>(
                    "select language_id from tech_stack where project_id = $1",
                )
                .bind(params.project_id)
                .fetch_all(&mut *tx)
                .await?
                .into_iter()
                .collect();

                let reconciliation = Reconciliation::between(&current, &desired);
                insert_tech_stack(&mut tx, params.project_id, &reconciliation.to_add).await?;
                delete_tech_stack(&mut tx, params.project_id, &reconciliation.to_remove).await?;

                Some(reconciliation)
            }
            None => None,
        };

        tx.commit().await?;

        Ok(UpdateProjectOutcome {
            rows_affected,
            changes,
            reconciliation,
        })
    }

    async fn delete_project(&self, params: DeleteProjectDBParams) -> Result<(), Error> {
        let result = sqlx::query("delete from projects where id = $1")
            .bind(params.project_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound);
        }

        Ok(())
    }
}

async fn insert_tech_stack(
    conn: &mut PgConnection,
    project_id: ProjectId,
    language_ids: &[LanguageId],
) -> Result<u64, sqlx::Error> {
    if language_ids.is_empty() {
        return Ok(0);
    }

    let result = sqlx::query(
        r#"
insert into tech_stack (project_id, language_id)
select $1, unnest($2::bigint[])
on conflict do nothing
"#,
    )
    .bind(project_id)
    .bind(language_ids)
    .execute(&mut *conn)
    .await?;

    Ok(result.rows_affected())
}

async fn delete_tech_stack(
    conn: &mut PgConnection,
    project_id: ProjectId,
    language_ids: &[LanguageId],
) -> Result<u64, sqlx::Error> {
    if language_ids.is_empty() {
        return Ok(0);
    }

    let result =
        sqlx::query("delete from tech_stack where project_id = $1 and language_id = any($2)")
            .bind(project_id)
            .bind(language_ids)
            .execute(&mut *conn)
            .await?;

    Ok(result.rows_affected())
}
