use hms_config::Config;

/// Creates the default configuration file at `~/hms/config.json`.
#[derive(Debug, Clone, Copy)]
pub struct InitStrategy;

impl super::CommandStrategy for InitStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let config_path = Config::create_config()?;

        println!("Created config file at: {}", config_path.display());
        println!();
        println!("Configuration options:");
        println!("   - storage.data_dir: where hospitals.txt, patients.txt and users.txt live");
        println!("   - records.overlong: \"truncate\" or \"reject\" text longer than its field");
        println!("   - patients.require_known_hospital: refuse unknown hospital ids");
        println!("   - credentials.password_storage: \"plain\" or \"sha256\"");
        Ok(())
    }
}
