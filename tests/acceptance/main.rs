use cucumber::World;
use repoman::error::AppError;
use std::fmt;
use wiremock::MockServer;

#[derive(Default, World)]
pub struct RepomanWorld {
    pub server: Option<MockServer>,
    pub config_dir: Option<tempfile::TempDir>,
    pub captured_output: Vec<u8>,
    pub result: Option<Result<(), AppError>>,
}

impl RepomanWorld {
    pub fn server(&self) -> &MockServer {
        self.server
            .as_ref()
            .expect("Scenario must start with `Given a mock GitHub API`")
    }

    pub fn config_path(&mut self) -> std::path::PathBuf {
        self.config_dir
            .get_or_insert_with(|| tempfile::tempdir().expect("Failed to create temp dir"))
            .path()
            .join("github_config.yaml")
    }
}

impl fmt::Debug for RepomanWorld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RepomanWorld")
            .field("server", &self.server.as_ref().map(MockServer::uri))
            .field("config_dir", &self.config_dir)
            .field(
                "captured_output",
                &String::from_utf8_lossy(&self.captured_output),
            )
            .field("result", &self.result)
            .finish()
    }
}

#[tokio::main]
async fn main() {
    RepomanWorld::run("features").await;
}

mod steps;
