use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::Context;
use hms_config::Config;
use hms_core::{CredentialGate, HospitalQuery, PatientQuery};
use hms_store::Stores;
use tracing::info;

use crate::console::Console;
use crate::session::{Services, Session};

pub struct RunInput {
    /// Overrides `storage.data_dir` from the config file.
    pub data_dir: Option<PathBuf>,
}

/// Runs the interactive login and menu session on stdin/stdout.
#[derive(Debug, Clone, Copy)]
pub struct RunStrategy;

impl super::CommandStrategy for RunStrategy {
    type Input = RunInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let mut config = Config::load()?;
        if let Some(data_dir) = input.data_dir {
            config.storage.data_dir = data_dir;
        }

        tokio::fs::create_dir_all(&config.storage.data_dir)
            .await
            .with_context(|| {
                format!(
                    "Cannot create data directory {}",
                    config.storage.data_dir.display()
                )
            })?;
        info!("Data directory: {}", config.storage.data_dir.display());

        let stores = Stores::new(
            config.storage.hospitals_path(),
            config.storage.patients_path(),
            config.storage.users_path(),
        );
        let services = Services {
            hospitals: HospitalQuery::new(stores.hospitals.clone()),
            patients: PatientQuery::new(stores.patients.clone(), stores.hospitals.clone())
                .with_hospital_check(config.patients.require_known_hospital),
            gate: CredentialGate::new(stores.users.clone())
                .with_password_storage(config.credentials.password_storage),
            overlong: config.records.overlong,
        };

        let stdout = std::io::stdout();
        let clear_screen = stdout.is_terminal();
        let console = Console::new(std::io::stdin().lock(), stdout).with_screen_clearing(clear_screen);

        Session::new(services, console).run().await
    }
}
