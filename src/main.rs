use eyre::{Context, Result};

use soratic::backend::new_manager;
use soratic::cli::{Command, init_logger};
use soratic::server::{self, AppState};
use soratic::storage::{new_storage, seed::seed_subjects};
use soratic::tutor::TutorService;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cmd = Command::new();
    if cmd.version() {
        cmd.print_version();
        return Ok(());
    }

    let config = cmd.get_config()?;
    init_logger(&config.log)?;

    let storage = new_storage(&config.storage)
        .await
        .wrap_err("opening storage")?;
    let created = seed_subjects(&storage).await.wrap_err("seeding subjects")?;
    if created > 0 {
        log::info!("Seeded {} subject(s)", created);
    }

    let manager = new_manager(&config.backend)?;
    let tutor = TutorService::from_manager(storage.clone(), &manager, &config.backend)?;

    let state = AppState {
        tutor,
        storage,
        auth_token: config.server.auth_token.clone(),
    };
    server::serve(&config.server, state).await
}
