use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

use commands::{
    AnalysisAction, ChatAction, FilesAction, ProfileAction, ProjectAction, RequirementsAction,
    SolicitationsAction, SpecialtiesAction, SubtasksAction,
};

#[derive(Parser)]
#[command(name = "gremio")]
#[command(about = "Gremio - terminal client for the freelance marketplace", long_about = None)]
#[command(version)]
pub struct Cli {
    /// REST base URL (overrides config.toml and GREMIO_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// WebSocket base URL (overrides config.toml and GREMIO_WS_URL)
    #[arg(long, global = true)]
    ws_url: Option<String>,

    /// Keep config and session under this directory instead of the platform dirs
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in as client or vendor
    Login { email: String, password: String },
    /// Clear the stored session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Create a client account
    RegisterClient {
        #[arg(long)]
        names: String,
        #[arg(long)]
        surnames: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create a vendor account
    RegisterVendor {
        #[arg(long)]
        company: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Specialty code, repeatable. Defaults to the picks saved with `specialties select`.
        #[arg(long = "specialty")]
        specialties: Vec<String>,
    },
    /// Browse and pick specialties before vendor registration
    Specialties {
        #[command(subcommand)]
        action: SpecialtiesAction,
    },
    /// Show or edit the profile of the logged-in user
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
    /// List the projects of the logged-in user
    Projects,
    /// Show a project with its sub-task board and pending requests (client)
    Project {
        id: i64,
        #[command(subcommand)]
        action: Option<ProjectAction>,
    },
    /// Sub-task board (vendor)
    Subtasks {
        #[command(subcommand)]
        action: SubtasksAction,
    },
    /// Answer vendor requests on a sub-task (client)
    Solicitations {
        #[command(subcommand)]
        action: SolicitationsAction,
    },
    /// Client requirements and the vendor requirement pool
    Requirements {
        #[command(subcommand)]
        action: RequirementsAction,
    },
    /// Files attached to a project or sub-task
    Files {
        #[command(subcommand)]
        action: FilesAction,
    },
    /// Interactive chat on a project or sub-task
    Chat {
        #[command(subcommand)]
        action: ChatAction,
    },
    /// Requirement analysis conversation (client)
    Analysis {
        #[command(subcommand)]
        action: AnalysisAction,
    },
    /// Resolve a route through the guard and show where navigation lands
    Open { route: String },
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env("GREMIO_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let ctx = commands::Context::init(
        cli.data_dir.as_deref(),
        cli.api_url.as_deref(),
        cli.ws_url.as_deref(),
    )?;

    match cli.command {
        Commands::Login { email, password } => commands::auth::login(&ctx, email, password).await?,
        Commands::Logout => commands::auth::logout(&ctx).await?,
        Commands::Whoami => commands::auth::whoami(&ctx)?,
        Commands::RegisterClient {
            names,
            surnames,
            email,
            password,
        } => commands::auth::register_client(&ctx, names, surnames, email, password).await?,
        Commands::RegisterVendor {
            company,
            email,
            password,
            specialties,
        } => {
            commands::auth::register_vendor(&ctx, company, email, password, specialties).await?
        }
        Commands::Specialties { action } => commands::auth::specialties(&ctx, action).await?,
        Commands::Profile { action } => commands::auth::profile(&ctx, action).await?,
        Commands::Projects => commands::projects::list(&ctx).await?,
        Commands::Project { id, action } => commands::projects::run(&ctx, id, action).await?,
        Commands::Subtasks { action } => commands::subtasks::run(&ctx, action).await?,
        Commands::Solicitations { action } => commands::projects::solicitations(&ctx, action).await?,
        Commands::Requirements { action } => commands::requirements::run(&ctx, action).await?,
        Commands::Files { action } => commands::files::run(&ctx, action).await?,
        Commands::Chat { action } => commands::chat::run(&ctx, action).await?,
        Commands::Analysis { action } => commands::chat::analysis(&ctx, action).await?,
        Commands::Open { route } => commands::navigate::open(&ctx, &route).await?,
    }

    Ok(())
}
