use std::str::FromStr;

use nalgebra::Vector3;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, clap::ValueEnum)]
pub enum LogFormat {
    Compact,
    Full,
    Pretty,
    Json,
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Compact => f.write_str("compact"),
            LogFormat::Full => f.write_str("full"),
            LogFormat::Pretty => f.write_str("pretty"),
            LogFormat::Json => f.write_str("json"),
        }
    }
}

#[derive(Debug, clap::Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Logging output filters; comma-separated
    #[arg(
        short,
        long,
        default_value = "warn,octomesh=info,hedron=info,inspect=info",
        env = "OCTOMESH_LOG_FILTER"
    )]
    pub log_filter: String,
    /// Logging output format
    #[arg(long, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
    /// Number of points sampled on the synthetic sphere
    #[arg(short, long, default_value_t = 2048)]
    pub points: usize,
    /// Center of the synthetic sphere
    #[arg(long, default_value = "0,0,0", value_parser = parse_vec3::<f64>, value_name = "X,Y,Z")]
    pub center: Vector3<f64>,
    /// Radius of the synthetic sphere
    #[arg(short, long, default_value_t = 1.0)]
    pub radius: f64,
    /// Depth at which the octree stores its leaves
    #[arg(short = 'd', long, default_value_t = 5)]
    pub max_depth: usize,
    /// Fraction by which the fitted octree bound is grown; within [0, 1]
    #[arg(short, long, default_value_t = octomesh::DEFAULT_SIZE_EXPAND)]
    pub size_expand: f64,
    /// Print the whole octree structure
    #[arg(long)]
    pub print_tree: bool,
}

fn parse_vec3<R: FromStr>(
    s: &str,
) -> Result<Vector3<R>, Box<dyn std::error::Error + Send + Sync + 'static>>
where
    <R as FromStr>::Err: std::error::Error + Send + Sync + 'static,
{
    let mut split = s.trim().split(',');
    let mut next = || {
        split
            .next()
            .ok_or_else(|| format!("expected 3 comma-separated components in {s:?}"))
    };
    let x = R::from_str(next()?.trim())?;
    let y = R::from_str(next()?.trim())?;
    let z = R::from_str(next()?.trim())?;
    Ok(nalgebra::vector![x, y, z])
}

/// Set up pretty log output
pub(crate) fn initialize_tracing(log_filter: &str, log_format: LogFormat) {
    let tsub = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_timer(tracing_subscriber::fmt::time::OffsetTime::new(
            time::UtcOffset::current_local_offset().unwrap_or_else(|e| {
                tracing::warn!("couldn't get local time offset: {:?}", e);
                time::UtcOffset::UTC
            }),
            time::macros::format_description!("[hour]:[minute]:[second]"),
        ))
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_env_filter(log_filter);

    match log_format {
        LogFormat::Compact => tsub.compact().init(),
        LogFormat::Full => tsub.init(),
        LogFormat::Pretty => tsub.pretty().init(),
        LogFormat::Json => tsub.json().init(),
    }
}
