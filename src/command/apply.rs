use std::fs;
use std::fs::File;

use anyhow::{Context, Result};
use clap::Args;
use openapiv3::OpenAPI;
use restdocs2oa::openapi::apply_to_spec;

use crate::command::ResourceArgs;

#[derive(Debug, Args)]
pub struct Apply {
    /// OpenAPI document (YAML or JSON) whose operations receive the examples
    pub openapi_file: String,

    #[command(flatten)]
    pub resources: ResourceArgs,

    #[arg(short, long)]
    pub output: Option<String>,
}

impl Apply {
    pub fn run(self) -> Result<()> {
        let file = File::open(&self.openapi_file).with_context(|| format!("{}: Failed to open.", self.openapi_file))?;
        let mut spec: OpenAPI = serde_yaml::from_reader(file)?;
        eprintln!("{}: Read file to spec.", self.openapi_file);

        let reader = self.resources.reader();
        let n = apply_to_spec(&mut spec, &reader);
        eprintln!("Attached examples to {} operations.", n);

        let s = serde_yaml::to_string(&spec)?;
        if let Some(path) = self.output {
            fs::write(&path, &s)?;
            eprintln!("{}: Wrote file.", path);
        } else {
            println!("{}", s);
        }
        Ok(())
    }
}
