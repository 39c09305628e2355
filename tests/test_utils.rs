use actix_web::{middleware::NormalizePath, web, App, HttpServer};
use portfolio_api::{
    db::{schema, Database},
    routes::configure_routes,
    settings::{AppConfig, AppEnvironment},
    AppState,
};
use reqwest::Client;
use std::{
    net::TcpListener,
    sync::atomic::{AtomicUsize, Ordering},
    time::Duration,
};

static DB_COUNTER: AtomicUsize = AtomicUsize::new(0);

pub const TEST_ADMIN_PASSWORD: &str = "test-admin-password";

pub struct TestApp {
    pub address: String,
    pub client: Client,
    pub config: AppConfig,
}

impl TestApp {
    /// Spawns the real server on an ephemeral port over a throwaway
    /// SQLite file. No AI provider keys are configured, so the chat
    /// endpoint exercises the deterministic rule-based path.
    pub async fn spawn() -> Self {
        let config = test_config();

        let db = Database::connect(&config)
            .await
            .expect("Failed to open test database");

        schema::bootstrap(&db)
            .await
            .expect("Failed to bootstrap test schema");

        let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind ephemeral port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let state = web::Data::new(
            AppState::new(&config, db).expect("Failed to build test app state"),
        );

        let server = HttpServer::new(move || {
            App::new()
                .app_data(state.clone())
                .wrap(NormalizePath::trim())
                .configure(configure_routes)
        })
        .listen(listener)
        .expect("Failed to listen on test port")
        .workers(1)
        .run();

        tokio::spawn(server);

        let client = Client::new();
        while client
            .get(format!("{}/api/health", address))
            .send()
            .await
            .is_err()
        {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        Self { address, client, config }
    }

    pub async fn create_project(&self, body: &serde_json::Value) -> reqwest::Response {
        self.client
            .post(format!("{}/api/projects", self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to POST /api/projects")
    }

    pub async fn list_projects(&self) -> serde_json::Value {
        self.client
            .get(format!("{}/api/projects", self.address))
            .send()
            .await
            .expect("Failed to GET /api/projects")
            .json()
            .await
            .expect("Failed to parse project list")
    }

    pub async fn chat(&self, message: &str) -> reqwest::Response {
        self.client
            .post(format!("{}/api/chat", self.address))
            .json(&serde_json::json!({ "message": message }))
            .send()
            .await
            .expect("Failed to POST /api/chat")
    }
}

fn test_config() -> AppConfig {
    let db_file = std::env::temp_dir().join(format!(
        "portfolio-test-{}-{}.db",
        std::process::id(),
        DB_COUNTER.fetch_add(1, Ordering::SeqCst)
    ));

    AppConfig {
        env: AppEnvironment::Testing,
        name: "Portfolio API Test".to_string(),
        port: 0,
        host: "127.0.0.1".to_string(),
        worker_count: 1,
        database_url: String::new(),
        sqlite_path: db_file.to_string_lossy().into_owned(),
        cors_allowed_origins: vec!["*".to_string()],
        admin_password: TEST_ADMIN_PASSWORD.to_string(),
        gemini_api_key: None,
        groq_api_key: None,
        huggingface_api_key: None,
        gemini_model: "gemini-1.5-flash".to_string(),
        groq_model: "llama-3.1-8b-instant".to_string(),
        huggingface_model: "mistralai/Mistral-7B-Instruct-v0.3".to_string(),
        ai_timeout_secs: 5,
    }
}

pub fn sample_project(title: &str, tech_stack: &str) -> serde_json::Value {
    serde_json::json!({
        "title": title,
        "description": format!("{} built as a portfolio piece.", title),
        "tech_stack": tech_stack,
        "github_url": "https://github.com/example/demo"
    })
}
