mod execute;
mod validate;

use crate::Cli;
use crate::CommandResult;
use execute::ExecuteCmd;
use validate::ValidateCmd;

#[derive(Debug, clap::Parser)]
#[command(name = "gqlengine")]
pub(crate) enum CommandEnum {
    /// Execute a GraphQL request against a schema and a JSON root value.
    Execute(Box<ExecuteCmd>),

    /// Validate schema files and the operations alongside them.
    Validate(Box<ValidateCmd>),
}
impl CommandEnum {
    pub(crate) async fn run(self, cli: Cli) -> CommandResult {
        match self {
            Self::Execute(cmd) => cmd.run(cli).await,
            Self::Validate(cmd) => cmd.run(cli).await,
        }
    }
}
