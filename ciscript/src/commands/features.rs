use clap::Args;
use eyre::Result;

use crate::dialect::Dialect;

#[derive(Args)]
pub struct FeaturesCommand {
    /// Shell dialect to query
    #[arg(short, long, value_enum, default_value = "bash")]
    pub shell: Dialect,
}

impl FeaturesCommand {
    pub fn run(&self) -> Result<()> {
        println!("{} supports:", self.shell.name());
        for option in self.shell.supported_options() {
            println!("  {option}");
        }
        Ok(())
    }
}
