use crate::{
    entities::project::{
        NewProjectRequest, ProjectCreatedResponse, ProjectDeletedResponse, ProjectListResponse,
    },
    errors::AppError,
    repositories::project::ProjectRepository,
};
use validator::Validate;

pub struct ProjectHandler<R>
where
    R: ProjectRepository,
{
    pub project_repo: R,
}

impl<R> ProjectHandler<R>
where
    R: ProjectRepository,
{
    pub fn new(project_repo: R) -> Self {
        ProjectHandler { project_repo }
    }

    /// Handles the creation of a new project
    pub async fn create_project(
        &self,
        request: NewProjectRequest,
    ) -> Result<ProjectCreatedResponse, AppError> {
        request.validate()?;

        let new_project = request.try_into()?;

        let id = self.project_repo.create_project(&new_project).await?;

        Ok(ProjectCreatedResponse {
            message: "Project created successfully".to_string(),
            id,
        })
    }

    /// Lists all projects, most recent first
    pub async fn list_projects(&self) -> Result<ProjectListResponse, AppError> {
        let projects = self.project_repo.list_projects().await?;
        let total = self.project_repo.count_projects().await?;

        Ok(ProjectListResponse { projects, total })
    }

    /// Deletes a project by its ID
    pub async fn delete_project(&self, id: i64) -> Result<ProjectDeletedResponse, AppError> {
        self.project_repo
            .delete_project(id)
            .await
            .map_err(|e| match e {
                AppError::NotFound(_) => AppError::NotFound("Project not found".to_string()),
                _ => e,
            })?;

        Ok(ProjectDeletedResponse {
            message: "Project deleted successfully".to_string(),
        })
    }
}
