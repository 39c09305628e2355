use crate::infrastructure::db::Database;

#[derive(Clone)]
pub struct SqlxProjectRepo {
    pub db: Database,
}

#[derive(Clone)]
pub struct SqlxContactRepo {
    pub db: Database,
}

#[derive(Clone)]
pub struct SqlxChatQueryRepo {
    pub db: Database,
}
