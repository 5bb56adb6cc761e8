//! Point d'entrée CLI pour cadastre-overlap

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

mod cli;

use cli::Commands;

// Charger .env au démarrage
fn load_env() {
    // Chercher .env dans le répertoire courant ou parent
    if dotenvy::dotenv().is_err() {
        // Essayer depuis le répertoire du binaire
        if let Ok(exe) = std::env::current_exe() {
            if let Some(dir) = exe.parent() {
                let _ = dotenvy::from_path(dir.join(".env"));
            }
        }
    }
}

/// Recouvrement d'un polygone S-JTSK avec les parcelles cadastrales du ČÚZK
#[derive(Parser)]
#[command(name = "cadastre-overlap")]
#[command(author, version)]
#[command(about = "Calcule les parcelles cadastrales recouvertes par un polygone (EPSG:5514)")]
#[command(long_about = "Interroge le WFS INSPIRE Cadastral Parcels du ČÚZK sur l'emprise d'un polygone et calcule, pour chaque parcelle, la surface et le pourcentage recouverts.\n\nUtilisez 'serve' pour le service HTTP, 'compute' pour un calcul ponctuel.")]
struct Cli {
    /// Augmenter la verbosité (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Mode silencieux
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Charger .env avant tout
    load_env();

    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Serve { service } => {
            cli::cmd_serve(&service).await?;
        }
        Commands::Compute {
            coords,
            gml,
            include_touches,
            limit,
            geojson,
            service,
        } => {
            cli::cmd_compute(
                &coords,
                gml.as_deref(),
                include_touches,
                limit,
                geojson.as_deref(),
                &service,
            )
            .await?;
        }
    }

    Ok(())
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => Level::WARN,
        (_, 0) => Level::INFO,
        (_, 1) => Level::DEBUG,
        (_, _) => Level::TRACE,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}
