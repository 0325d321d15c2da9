mod logging;
mod report;

use std::path::PathBuf;

use accounts::api::dto::UserDto;
use accounts::infra::storage::{connect, migrate};
use accounts::{
    AccountsConfig, Expand, SeaOrmUsersRepository, SeaOrmViewsRepository, User, UserField,
    UsersRepository, ViewsRepository, project_visibility,
};
use anyhow::{Context, Result, bail};
use clap::{ArgGroup, Parser, Subcommand, ValueEnum};
use time::OffsetDateTime;

/// Accounts - user identity and visibility administration
#[derive(Parser)]
#[command(name = "accounts")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to configuration file (YAML); `ACCOUNTS__*` env vars override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending schema migrations
    Migrate,
    /// List users as JSON
    List {
        /// Only users with the admin flag
        #[arg(long)]
        admins: bool,
    },
    /// Show one user as JSON
    #[command(group(ArgGroup::new("key").required(true).args(["id", "email"])))]
    Show {
        #[arg(long)]
        id: Option<i64>,
        #[arg(long)]
        email: Option<String>,
        /// Related data to load with the user
        #[arg(long, value_enum, default_value_t = ExpandArg::None)]
        expand: ExpandArg,
    },
    /// Create a user
    Create {
        #[arg(long)]
        email: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        surname: String,
        /// Defaults to the e-mail address
        #[arg(long, default_value = "")]
        company: String,
        #[arg(long, default_value = "")]
        department: String,
        #[arg(long)]
        admin: bool,
    },
    /// Activate or deactivate a user
    SetActive {
        #[arg(long)]
        id: i64,
        #[arg(long, action = clap::ArgAction::Set)]
        active: bool,
    },
    /// Delete a user and its ownerships
    Delete {
        #[arg(long)]
        id: i64,
    },
    /// Print who can see which view, grouped by company
    Visibility,
}

#[derive(Clone, Copy, ValueEnum)]
enum ExpandArg {
    None,
    Ownerships,
    Groups,
}

impl From<ExpandArg> for Expand {
    fn from(arg: ExpandArg) -> Self {
        match arg {
            ExpandArg::None => Self::None,
            ExpandArg::Ownerships => Self::Ownerships,
            ExpandArg::Groups => Self::OwnershipsWithGroups,
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AccountsConfig::load(cli.config.as_deref())
        .map_err(|e| anyhow::anyhow!("{e}"))
        .context("failed to load configuration")?;
    logging::init(&config.logging);

    // `migrate` applies migrations explicitly, independent of the flag.
    if matches!(cli.command, Commands::Migrate) {
        config.database.run_migrations = false;
    }
    let db = connect(&config.database)
        .await
        .with_context(|| format!("failed to open store at {}", config.database.url))?;

    let users = SeaOrmUsersRepository::new(db.clone());

    match cli.command {
        Commands::Migrate => {
            migrate(&db).await?;
            println!("migrations applied");
        }
        Commands::List { admins } => {
            let list = if admins {
                users.get_administrators().await?
            } else {
                users.get_all().await?
            };
            let dtos: Vec<UserDto> = list.into_iter().map(UserDto::from).collect();
            print_json(&dtos)?;
        }
        Commands::Show { id, email, expand } => {
            let found = match (id, email) {
                (Some(id), _) => users.get_by_id(id, expand.into()).await?,
                (None, Some(email)) => match users.get_by_email(&email).await? {
                    Some(user) if !matches!(expand, ExpandArg::None) => {
                        users.get_by_id(user.id, expand.into()).await?
                    }
                    other => other,
                },
                (None, None) => bail!("either --id or --email is required"),
            };
            let user = found.context("user not found")?;
            print_json(&UserDto::from(user))?;
        }
        Commands::Create {
            email,
            name,
            surname,
            company,
            department,
            admin,
        } => {
            let mut user = User::new(&email, &company, &department, &name, &surname);
            user.admin = admin;
            users
                .create(&mut user)
                .await
                .with_context(|| format!("failed to create user {email}"))?;
            print_json(&UserDto::from(user))?;
        }
        Commands::SetActive { id, active } => {
            let mut user = users
                .get_by_id(id, Expand::None)
                .await?
                .with_context(|| format!("user {id} not found"))?;
            user.active = active;
            if users.save(&mut user, &[UserField::Active]).await? == 0 {
                bail!("user {id} was deleted concurrently");
            }
            print_json(&UserDto::from(user))?;
        }
        Commands::Delete { id } => {
            let user = users
                .get_by_id(id, Expand::None)
                .await?
                .with_context(|| format!("user {id} not found"))?;
            users.delete(&user).await?;
            println!("deleted user {id}");
        }
        Commands::Visibility => {
            let views = SeaOrmViewsRepository::new(db).list_with_access().await?;
            let policy = config.visibility.policy();
            let report = project_visibility(&views, OffsetDateTime::now_utc(), &policy);
            print!("{}", report::render(&report, &policy));
        }
    }

    Ok(())
}
