use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub mapquest_api_key: Option<String>,
    pub maps_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let mapquest_api_key = env::var("MAPQUEST_API_KEY").ok().filter(|k| !k.is_empty());
        let maps_dir = env::var("MAPS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("static/maps"));
        Ok(Self {
            database_url,
            host,
            port,
            mapquest_api_key,
            maps_dir,
        })
    }
}
