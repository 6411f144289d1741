use clara_server::{ClaraServer, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let mut config = match std::env::var_os("CLARA_CONFIG") {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    };
    config.apply_env()?;

    ClaraServer::new(config).serve().await?;
    Ok(())
}
