#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use clap::Parser;

    let config = regline::server::ServerConfig::parse();
    regline::log::init_native_log(config.log_level, config.log_dir.as_deref());
    regline::server::serve(&config).await
}

// the server only runs natively
#[cfg(target_arch = "wasm32")]
fn main() {}
