use clap::Parser;
use miette::Result;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tokio_graceful_shutdown::{SubsystemBuilder, Toplevel};

use atlas_server::config;
use atlas_server::notify::LogNotifier;
use atlas_server::replay;
use atlas_server::web::Web;
use atlas_server::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .parse_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} {:<5} [{}] {}",
                chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();

    log::debug!("Command line: {:?}", args);

    let zones = config::load_zones(args.zones.as_deref()).map_err(|e| miette::miette!("{:#}", e))?;

    if let Some(track) = &args.replay {
        let summary = replay::replay_file(track, &zones, &LogNotifier)
            .map_err(|e| miette::miette!("{:#}", e))?;
        log::info!(
            "Replay finished: {} samples, {} notifications, last alert {}",
            summary.samples,
            summary.notifications,
            summary
                .last_alert
                .map(|kind| kind.as_str())
                .unwrap_or("none")
        );
        return Ok(());
    }

    let web = Web::new(args.port, zones, Arc::new(LogNotifier));

    Toplevel::new(|s| async move {
        s.start(SubsystemBuilder::new("Webserver", |subsys| web.run(subsys)));
    })
    .catch_signals()
    .handle_shutdown_requests(Duration::from_millis(1000))
    .await
    .map_err(Into::into)
}
