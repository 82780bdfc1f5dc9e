use crate::output_utils;
use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use anyhow::Context;
use gqlengine_core::context::ExecutionContext;
use gqlengine_core::execution::Executor;
use gqlengine_core::execution::Request;
use gqlengine_core::schema::SchemaBuilder;
use serde_json::Map;
use serde_json::Value;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Debug, clap::Args)]
pub(crate) struct ExecuteCmd {
    #[arg(
        help="Schema SDL file to build the schema from. May be repeated to \
             build one schema from several files.",
        long,
        required=true,
    )]
    schema: Vec<PathBuf>,

    #[arg(
        help="File containing the executable GraphQL document.",
        long,
    )]
    query: PathBuf,

    #[arg(
        help="Name of the operation to run when the document defines more \
             than one.",
        long,
    )]
    operation_name: Option<String>,

    #[arg(
        help="JSON file holding an object of variable values.",
        long,
    )]
    variables: Option<PathBuf>,

    #[arg(
        help="JSON file holding the root value. Fields without a bound \
             resolver read same-named properties from their parent value.",
        long,
    )]
    root_value: Option<PathBuf>,

    #[arg(
        help="Pretty-print the JSON response.",
        long,
    )]
    pretty: bool,
}

#[inherent::inherent]
impl RunnableCommand for ExecuteCmd {
    pub async fn run(self, _cli: Cli) -> CommandResult {
        match self.execute().await {
            Ok(result) => result,
            Err(err) => CommandResult::stderr(format_args!(
                "{} {err:#}",
                output_utils::RED_X,
            )),
        }
    }
}

impl ExecuteCmd {
    async fn execute(&self) -> anyhow::Result<CommandResult> {
        log::debug!("Building schema from {} files...", self.schema.len());
        let schema = SchemaBuilder::new()
            .load_files(self.schema.clone())
            .and_then(SchemaBuilder::build)
            .context("failed to build the schema")?;

        let query = std::fs::read_to_string(&self.query)
            .with_context(|| format!("failed to read {}", self.query.display()))?;
        let mut request = Request::new(query);
        if let Some(operation_name) = &self.operation_name {
            request = request.with_operation_name(operation_name);
        }
        if let Some(path) = &self.variables {
            request = request.with_variables(read_json_object(path)?);
        }

        let mut ctx = ExecutionContext::builder();
        if let Some(path) = &self.root_value {
            ctx = ctx.root_value(read_json(path)?);
        }

        let executor = Executor::new(Arc::new(schema));
        let response = executor.execute(&request, &ctx.build()).await;
        log::debug!(
            "Request finished with {} errors.",
            response.errors.len(),
        );

        let json = response.to_json();
        let rendered =
            if self.pretty {
                serde_json::to_string_pretty(&json)?
            } else {
                serde_json::to_string(&json)?
            };

        let exit_code =
            if response.is_ok() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            };
        Ok(CommandResult::stdout(format_args!("{rendered}"))
            .with_exit_code(exit_code))
    }
}

fn read_json(path: &Path) -> anyhow::Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("{} is not valid JSON", path.display()))
}

fn read_json_object(path: &Path) -> anyhow::Result<Map<String, Value>> {
    match read_json(path)? {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        other => anyhow::bail!(
            "{} must hold a JSON object, found `{other}`",
            path.display(),
        ),
    }
}
