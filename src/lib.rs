mod domain;
mod infrastructure;
mod interfaces;
pub mod ai;
pub mod constants;
pub mod errors;
pub mod graceful_shutdown;
pub mod settings;

pub use domain::{entities, use_cases};
pub use infrastructure::db;
pub use interfaces::{handlers, repositories, routes};

use ai::provider::ModelChain;
use db::Database;
use repositories::sqlx_repo::{SqlxChatQueryRepo, SqlxContactRepo, SqlxProjectRepo};
use use_cases::{chat::ChatHandler, contact::ContactHandler, projects::ProjectHandler};

pub struct AppState {
    pub project_handler: AppProjectHandler,
    pub contact_handler: AppContactHandler,
    pub chat_handler: AppChatHandler,
    pub db: Database,
    pub config: settings::AppConfig,
}

pub type AppProjectHandler = ProjectHandler<SqlxProjectRepo>;
pub type AppContactHandler = ContactHandler<SqlxContactRepo>;
pub type AppChatHandler = ChatHandler<SqlxChatQueryRepo>;

impl AppState {
    pub fn new(config: &settings::AppConfig, db: Database) -> Result<Self, reqwest::Error> {
        let chain = ModelChain::from_config(config)?;
        let dialect = db.dialect();

        Ok(AppState {
            project_handler: ProjectHandler::new(SqlxProjectRepo::new(db.clone())),
            contact_handler: ContactHandler::new(SqlxContactRepo::new(db.clone())),
            chat_handler: ChatHandler::new(SqlxChatQueryRepo::new(db.clone()), chain, dialect),
            db,
            config: config.clone(),
        })
    }
}
