#[cfg(feature = "ssr")]
#[tokio::main]
pub async fn main() -> resep::backend::utils::error::BackendResult<()> {
    use log::LevelFilter;
    use resep::backend::{config::ResepConfig, start};

    if std::env::args().collect::<Vec<_>>().get(1) == Some(&"--print-config".to_string()) {
        println!("{}", doku::to_toml::<ResepConfig>());
        std::process::exit(0);
    }

    env_logger::builder()
        .filter_level(LevelFilter::Warn)
        .filter_module("resep", LevelFilter::Info)
        .init();

    let config = ResepConfig::read()?;
    start(config).await?;
    Ok(())
}

#[cfg(not(feature = "ssr"))]
fn main() {}
