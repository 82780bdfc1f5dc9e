use crate::output_utils;
use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use gqlengine_core::operation::FragmentTable;
use gqlengine_core::schema::SchemaBuilder;
use gqlengine_core::validation::validate;
use gqlengine_parser::ast;
use gqlengine_parser::parse_executable;
use gqlengine_parser::parse_schema;
use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;
use walkdir::WalkDir;

#[derive(Debug, clap::Args)]
pub(crate) struct ValidateCmd {
    #[arg(
        default_values_t=[
            "graphql".to_string(),
            "graphqls".to_string(),
        ],
        help="Set of file extensions to filter to when searching for files \
             within a directory.",
        long,
        value_delimiter = ',',
    )]
    graphql_file_exts: Vec<String>,

    #[arg(
        help="Paths to one or more GraphQL files or directories containing \
             GraphQL files which need to be validated. Schema files are \
             built into one schema; executable documents are validated \
             against it.",
        name="FILE_OR_DIR_PATHS",
        required=true,
    )]
    file_or_dir_paths: Vec<PathBuf>,
}

/// A discovered file, sorted by what it parses as.
enum GraphQLFile {
    Executable {
        document: ast::Document,
        path: PathBuf,
    },
    Schema(PathBuf),
}

#[inherent::inherent]
impl RunnableCommand for ValidateCmd {
    pub async fn run(self, _cli: Cli) -> CommandResult {
        let mut errors: Vec<String> = vec![];

        // Normalize the set of file extensions to filter with
        let graphql_file_exts: HashSet<String> =
            self.graphql_file_exts.iter()
                .map(|ext| ext.trim_start_matches('.').to_string())
                .collect();

        log::debug!(
            "Scanning {} input paths...",
            self.file_or_dir_paths.len(),
        );
        let (mut file_paths, num_non_graphql_files) =
            self.find_graphql_files(&graphql_file_exts, &mut errors);

        // If the user specifies a single file path as an argument, presume the
        // user explicitly wants that file loaded and validated as a GraphQL
        // file -- even if its file extension doesn't match one of the file
        // extensions specified in `graphql_file_exts`.
        if file_paths.is_empty()
            && self.file_or_dir_paths.len() == 1
            && let Some(first_arg_path) = self.file_or_dir_paths.first()
            && first_arg_path.is_file() {
            log::warn!(
                "Proceeding to validate {first_arg_path:#?} even though it \
                doesn't match any of the --graphql-file-exts ({}).",
                graphql_file_exts.iter()
                    .map(|ext| format!("`.{ext}`"))
                    .collect::<Vec<_>>()
                    .join(", "),
            );
            file_paths.push(first_arg_path.to_owned());
        }

        log::debug!(
            "Found {} GraphQL files to be validated.",
            file_paths.len(),
        );

        let mut schema_paths = vec![];
        let mut executables = vec![];
        for path in &file_paths {
            match classify_file(path) {
                Ok(GraphQLFile::Schema(path)) => schema_paths.push(path),
                Ok(GraphQLFile::Executable { document, path }) => {
                    executables.push((path, document))
                },
                Err(err) => errors.push(err),
            }
        }

        if !errors.is_empty() {
            return CommandResult::stderr(format_args!(
                "{} GraphQL validation errors:\n{}",
                output_utils::RED_X,
                errors.join("\n"),
            ));
        }
        if schema_paths.is_empty() {
            return CommandResult::stderr(format_args!(
                "{} No schema files were found, so there is nothing to \
                validate operations against.",
                output_utils::RED_X,
            ));
        }

        let schema = match SchemaBuilder::new()
            .load_files(schema_paths)
            .and_then(SchemaBuilder::build) {
            Ok(schema) => schema,
            Err(e) => return CommandResult::stderr(format_args!(
                "{} Errors validating schema: {e}",
                output_utils::RED_X,
            )),
        };

        let mut num_operations = 0;
        for (path, document) in &executables {
            num_operations += document.operations().count();
            let fragments = FragmentTable::from_document(document);
            for err in validate(document, &fragments, &schema) {
                let location = err.locations()
                    .first()
                    .map(|pos| format!(":{pos}"))
                    .unwrap_or_default();
                errors.push(format!("{}{location}: {err}", path.display()));
            }
        }

        if !errors.is_empty() {
            return CommandResult::stderr(format_args!(
                "{} Errors validating operations:\n{}",
                output_utils::RED_X,
                errors.join("\n"),
            ));
        }

        CommandResult::stdout(format_args!(
            concat!(
                "{} All GraphQL validated successfully:\n",
                "  * Analyzed {} files.\n",
                "  * Skipped {} non-graphql files.\n",
                "  * Validated {} type definitions.\n",
                "  * Validated {} directive definitions.\n",
                "  * Validated {} operations.",
            ),
            output_utils::GREEN_CHECK,
            file_paths.len(),
            num_non_graphql_files,
            schema.defined_types().count(),
            schema.defined_directives().count(),
            num_operations,
        ))
    }
}

impl ValidateCmd {
    /// Finds all GraphQL files recursively located at or under each path
    /// passed as an arg.
    fn find_graphql_files(
        &self,
        graphql_file_exts: &HashSet<String>,
        errors: &mut Vec<String>,
    ) -> (Vec<PathBuf>, usize) {
        let mut num_non_graphql_files = 0;
        let mut file_paths = vec![];
        for path in &self.file_or_dir_paths {
            for entry in WalkDir::new(path.as_path()).follow_links(true) {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        log::trace!(
                            "Encountered an error while iterating recursive \
                            filesystem entities at/under {path:#?}."
                        );
                        errors.push(e.to_string());
                        continue
                    },
                };

                let entry_path = entry.path();
                if !entry.file_type().is_file() {
                    log::trace!("Skipping non-file: {entry_path:#?}.");
                    continue;
                }
                log::trace!("Found file at {entry_path:#?}.");
                let matches_ext = entry_path.extension()
                    .map(|ext| ext.to_string_lossy())
                    .is_some_and(|ext| graphql_file_exts.contains(ext.as_ref()));
                if !matches_ext {
                    num_non_graphql_files += 1;
                    continue;
                }
                match std::fs::canonicalize(entry_path) {
                    Ok(canonical) => file_paths.push(canonical),
                    Err(e) => errors.push(format!("{}: {e}", entry_path.display())),
                }
            }
        }
        (file_paths, num_non_graphql_files)
    }
}

/// Sorts a file into schema SDL or an executable document by trying both
/// grammars.
fn classify_file(path: &Path) -> Result<GraphQLFile, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("{}: {e}", path.display()))?;

    let schema_result = parse_schema(&content);
    if !schema_result.has_errors() {
        return Ok(GraphQLFile::Schema(path.to_owned()));
    }
    let executable_result = parse_executable(&content);
    if !executable_result.has_errors()
        && let Some(document) = executable_result.into_valid_ast() {
        return Ok(GraphQLFile::Executable {
            document,
            path: path.to_owned(),
        });
    }

    // Report against whichever grammar the file appears to be written in.
    let formatted =
        if looks_executable(&content) {
            parse_executable(&content).format_errors(Some(&content))
        } else {
            schema_result.format_errors(Some(&content))
        };
    Err(format!("{}:\n{formatted}", path.display()))
}

fn looks_executable(content: &str) -> bool {
    let first_token = content.lines()
        .map(str::trim_start)
        .find(|line| !line.is_empty() && !line.starts_with('#'))
        .unwrap_or_default();
    first_token.starts_with('{')
        || ["query", "mutation", "subscription", "fragment"]
            .iter()
            .any(|keyword| first_token.starts_with(keyword))
}
