pub mod tracing;

use serde::Deserialize;

#[derive(Deserialize)]
pub struct AppCfg {
    pub database_url: String,
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    pub session_secret: String,
    #[serde(default = "default_uploads_dir")]
    pub uploads_dir: String,
}

fn default_bind_addr() -> String {
    "0.0.0.0:3000".into()
}

fn default_uploads_dir() -> String {
    "./uploads".into()
}
