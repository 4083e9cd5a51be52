use tracing_subscriber::EnvFilter;

use crate::{config::Config, error::AppError, service::registration::RegistrationSheet};

/// Initializes the global tracing subscriber.
///
/// Honours `RUST_LOG` and defaults to `info` for the bot with SQL noise turned down.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn,serenity=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Connects to the Sqlite database and runs pending migrations.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(AppError::DbErr)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<sea_orm::DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Builds the registration spreadsheet client, if one is configured.
pub fn setup_registration_sheet(config: &Config) -> Option<RegistrationSheet> {
    let Some(sheet) = config.registration_sheet.clone() else {
        tracing::warn!("No registration spreadsheet configured; every intro needs a manual check");
        return None;
    };

    Some(RegistrationSheet::new(reqwest::Client::new(), sheet))
}
