use std::process::ExitCode;

use app::create_app;
use axum_server::Handle;
use axum_server::tls_rustls::RustlsConfig;
use clap::Parser;
use config::{Args, ServerConfig};
use error::ServerError;
use weather::Clock;

mod app;
mod config;
mod error;
mod weather;
mod weather_routes;

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), ServerError> {
    let config = ServerConfig::load(args)?;
    log::info!("running in {:?} mode", config.environment);

    let app = create_app(&config, Clock::Local);
    let addr = config.address();

    log::debug!("binding to {}", addr);

    // With port 0 the real port is only known once bound.
    let handle = Handle::new();
    let listening = handle.clone();
    tokio::spawn(async move {
        if let Some(addr) = listening.listening().await {
            log::info!("listening on {}", addr);
        }
    });

    if let Some(tls) = &config.tls {
        log::info!(
            "using tls with key file {} and cert file {}",
            tls.key_file_path.display(),
            tls.cert_file_path.display()
        );
        // More than one rustls backend can end up compiled in, so pick one.
        if rustls::crypto::aws_lc_rs::default_provider()
            .install_default()
            .is_err()
        {
            log::debug!("a crypto provider was already installed");
        }
        let tls_config = RustlsConfig::from_pem_file(&tls.cert_file_path, &tls.key_file_path)
            .await
            .map_err(ServerError::Tls)?;
        axum_server::bind_rustls(addr, tls_config)
            .handle(handle)
            .serve(app.into_make_service())
            .await?;
    } else {
        axum_server::bind(addr)
            .handle(handle)
            .serve(app.into_make_service())
            .await?;
    }
    Ok(())
}
