mod add_project;
mod delete_project;
mod edit_project;
mod list_languages;
mod list_projects;

pub use add_project::add_project;
pub use delete_project::delete_project;
pub use edit_project::edit_project;
pub use list_languages::list_languages;
pub use list_projects::list_projects;
