/// Prints the current version of hms.
#[derive(Debug, Clone, Copy)]
pub struct VersionStrategy;

impl super::CommandStrategy for VersionStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        println!("hms {}", env!("CARGO_PKG_VERSION"));
        Ok(())
    }
}
