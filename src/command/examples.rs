use anyhow::Result;
use clap::Args;
use tracing::debug;

use crate::command::ResourceArgs;

#[derive(Debug, Args)]
pub struct Examples {
    /// Operation name, matched as a prefix of the capture directory
    pub operation: String,

    #[command(flatten)]
    pub resources: ResourceArgs,
}

impl Examples {
    pub fn run(self) -> Result<()> {
        let reader = self.resources.reader();
        debug!(config = ?reader.config(), operation = %self.operation, "Reading example responses");
        let responses = reader.read(&self.operation);
        if responses.is_empty() {
            eprintln!("{}: No example responses found.", self.operation);
            return Ok(());
        }
        print!("{}", serde_yaml::to_string(&responses)?);
        Ok(())
    }
}
