use std::{env, fs, io, net::SocketAddr, path::PathBuf, str::FromStr};
use tokio::net::TcpListener;
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

pub struct TracingGuards {
    _file_guard: Option<WorkerGuard>,
}

pub fn init_tracing(service_name: &str) -> TracingGuards {
    // RUST_LOG wins over the default filter when present.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stdout_layer = fmt::layer().with_writer(std::io::stdout);
    let (file_writer, file_guard) = match env_opt("LOG_DIR") {
        Some(dir) => match rolling_appender(PathBuf::from(dir).join(service_name), service_name) {
            Ok(appender) => {
                let (writer, guard) = tracing_appender::non_blocking(appender);
                (Some(writer), Some(guard))
            }
            Err(err) => {
                eprintln!("file logging disabled: {err}");
                (None, None)
            }
        },
        None => (None, None),
    };

    let subscriber = Registry::default()
        .with(filter)
        .with(stdout_layer)
        .with(file_writer.map(|writer| fmt::layer().with_ansi(false).with_writer(writer)));
    let _ = tracing::subscriber::set_global_default(subscriber);

    TracingGuards {
        _file_guard: file_guard,
    }
}

fn rolling_appender(log_root: PathBuf, service_name: &str) -> io::Result<RollingFileAppender> {
    fs::create_dir_all(&log_root)?;
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(service_name)
        .filename_suffix("log")
        .max_log_files(env_or("LOG_MAX_FILES", 14usize).max(1))
        .build(&log_root)
        .map_err(io::Error::other)
}

pub fn env_or<T: FromStr>(key: &str, default: T) -> T {
    // Parse typed environment values with a fallback.
    env::var(key)
        .ok()
        .and_then(|value| value.trim().parse::<T>().ok())
        .unwrap_or(default)
}

pub fn env_opt(key: &str) -> Option<String> {
    // Blank values count as unset.
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

pub async fn bind_listener(port: u16) -> io::Result<TcpListener> {
    // Bind on all interfaces for container compatibility.
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    TcpListener::bind(addr).await
}

pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %err, "ctrl-c handler unavailable");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => {},
                    _ = sigterm.recv() => {},
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "sigterm handler unavailable");
                ctrl_c.await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        ctrl_c.await;
    }

    tracing::info!("shutdown signal received");
}
