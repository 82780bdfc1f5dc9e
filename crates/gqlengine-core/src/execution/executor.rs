use crate::ast;
use crate::context::ExecutionContext;
use crate::execution::ExecutionErrorKind;
use crate::execution::ExecutionPhase;
use crate::execution::ExecutorConfig;
use crate::execution::GraphQLError;
use crate::execution::PathSegment;
use crate::execution::Request;
use crate::execution::RequestError;
use crate::execution::Response;
use crate::execution::collect_fields::FieldCollector;
use crate::execution::input_coercion;
use crate::operation::FragmentTable;
use crate::operation::select_operation;
use crate::resolver::FieldError;
use crate::resolver::PropertyResolver;
use crate::resolver::ResolvedValue;
use crate::schema::Schema;
use crate::types::Field;
use crate::types::GraphQLType;
use crate::types::ObjectType;
use crate::types::TypeAnnotation;
use crate::validation::validate;
use futures::FutureExt;
use futures::future::BoxFuture;
use futures::future::join_all;
use serde_json::Map;
use serde_json::Number;
use serde_json::Value;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;
use tracing::Instrument;

/// Runs requests against one [`Schema`].
///
/// An executor is cheap to clone and holds no per-request state; share one
/// across requests and give each request its own [`ExecutionContext`].
///
/// ```
/// use gqlengine_core::context::ExecutionContext;
/// use gqlengine_core::execution::Executor;
/// use gqlengine_core::execution::Request;
/// use gqlengine_core::resolver::SyncResolver;
/// use gqlengine_core::schema::SchemaBuilder;
/// use std::sync::Arc;
///
/// # let runtime = tokio::runtime::Runtime::new().unwrap();
/// # runtime.block_on(async {
/// let schema = SchemaBuilder::from_str("type Query { greeting: String! }")
///     .unwrap()
///     .resolver("Query", "greeting", SyncResolver::new(|_, _, _| Ok("hello")))
///     .build()
///     .unwrap();
///
/// let executor = Executor::new(Arc::new(schema));
/// let response = executor
///     .execute(&Request::new("{ greeting }"), &ExecutionContext::default())
///     .await;
/// assert_eq!(response.to_json(), serde_json::json!({"data": {"greeting": "hello"}}));
/// # });
/// ```
#[derive(Clone, Debug)]
pub struct Executor {
    config: ExecutorConfig,
    schema: Arc<Schema>,
}

impl Executor {
    pub fn new(schema: Arc<Schema>) -> Self {
        Self::with_config(schema, ExecutorConfig::default())
    }

    pub fn with_config(schema: Arc<Schema>, config: ExecutorConfig) -> Self {
        Self { config, schema }
    }

    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Parses, validates and executes `request`.
    ///
    /// Request-level failures come back as a [`Response`] without `data`;
    /// use [`try_execute()`](Self::try_execute) to get them as a
    /// [`RequestError`] instead.
    ///
    /// `ctx` must belong to this request alone. Its loaders cache results
    /// and its cancellation flag never resets, so executing two requests
    /// with one context (or clones of it) serves the second from the
    /// first's cache and cancels both together. Build a fresh context,
    /// with fresh loaders, for every request.
    pub async fn execute(&self, request: &Request, ctx: &ExecutionContext) -> Response {
        match self.try_execute(request, ctx).await {
            Ok(response) => response,
            Err(err) => Response::from_request_error(&err, self.config.include_error_locations),
        }
    }

    /// Like [`execute()`](Self::execute), but returns request-level
    /// failures as errors. The same one-context-per-request rule applies.
    pub async fn try_execute(
        &self,
        request: &Request,
        ctx: &ExecutionContext,
    ) -> Result<Response, RequestError> {
        let operation = request.operation_name.as_deref().unwrap_or("<anonymous>");
        let span = tracing::debug_span!("execute", operation);
        self.run(request, ctx).instrument(span).await
    }

    async fn run(
        &self,
        request: &Request,
        ctx: &ExecutionContext,
    ) -> Result<Response, RequestError> {
        let mut phase = PhaseTracker::new();
        phase.advance(ExecutionPhase::Validating);

        let document = match parse_document(&request.query) {
            Ok(document) => document,
            Err(err) => return Err(phase.reject(err)),
        };
        let prepared = match self.prepare(&document, request) {
            Ok(prepared) => prepared,
            Err(err) => return Err(phase.reject(err)),
        };

        phase.advance(ExecutionPhase::Executing);
        let ctx = ctx.with_variables(prepared.variables);
        let run = ExecutionRun {
            collector: FieldCollector {
                fragments: &prepared.fragments,
                schema: &self.schema,
                variables: ctx.variables(),
            },
            config: &self.config,
            ctx: &ctx,
            errors: Mutex::new(vec![]),
            schema: &self.schema,
        };
        let serial = prepared.operation.kind == ast::OperationKind::Mutation
            && self.config.serial_mutations;
        let data = run.execute_selection_set(
            prepared.root_type,
            ctx.root_value(),
            vec![&prepared.operation.selection_set],
            vec![],
            serial,
        ).await;

        let errors = run.into_errors();
        phase.advance(ExecutionPhase::Completed);
        tracing::debug!(error_count = errors.len(), "execution finished");
        Ok(Response {
            data: Some(data.map_or(Value::Null, Value::Object)),
            errors,
        })
    }

    fn prepare<'doc>(
        &self,
        document: &'doc ast::Document,
        request: &Request,
    ) -> Result<PreparedOperation<'doc, '_>, RequestError> {
        let operation = select_operation(document, request.operation_name.as_deref())?;
        let fragments = FragmentTable::from_document(document);

        let errors = validate(document, &fragments, &self.schema);
        if !errors.is_empty() {
            return Err(RequestError::Validation(errors));
        }

        let root_type = match (operation.kind, self.schema.root_type(operation.kind)) {
            (ast::OperationKind::Subscription, _) | (_, None) => {
                return Err(RequestError::UnsupportedOperation {
                    operation_kind: operation.kind,
                    location: operation.position,
                });
            },
            (_, Some(root_type)) => root_type,
        };

        let variables = input_coercion::coerce_variable_values(
            &self.schema,
            operation,
            request.variables.as_ref(),
        ).map_err(RequestError::VariableCoercion)?;

        Ok(PreparedOperation {
            fragments,
            operation,
            root_type,
            variables,
        })
    }
}

fn parse_document(query: &str) -> Result<ast::Document, RequestError> {
    let result = gqlengine_parser::parse_executable(query);
    if result.has_errors() {
        return Err(RequestError::from_parse_errors(result.errors));
    }
    result.into_valid_ast().ok_or_else(|| RequestError::Parse(vec![]))
}

struct PreparedOperation<'doc, 's> {
    fragments: FragmentTable<'doc>,
    operation: &'doc ast::OperationDefinition,
    root_type: &'s ObjectType,
    variables: Map<String, Value>,
}

struct PhaseTracker {
    current: ExecutionPhase,
}
impl PhaseTracker {
    fn new() -> Self {
        Self {
            current: ExecutionPhase::Idle,
        }
    }

    fn advance(&mut self, next: ExecutionPhase) {
        if !self.current.can_transition_to(next) {
            tracing::warn!(from = %self.current, to = %next, "unexpected execution phase transition");
        }
        tracing::debug!(from = %self.current, to = %next, "execution phase");
        self.current = next;
    }

    fn reject(&mut self, err: RequestError) -> RequestError {
        self.advance(ExecutionPhase::Rejected);
        tracing::debug!(error = %err, "request rejected");
        self.advance(ExecutionPhase::Completed);
        err
    }
}

/// A non-null position produced no value. The error is already recorded;
/// the nearest nullable ancestor becomes null.
#[derive(Debug)]
struct Bubble;

type Completion = Result<Value, Bubble>;

/// The field being completed: its definition and every selection node
/// merged under its response key.
#[derive(Clone, Copy)]
struct FieldTarget<'f, 'doc> {
    def: &'f Field,
    nodes: &'f [&'doc ast::Field],
}
impl<'doc> FieldTarget<'_, 'doc> {
    fn label(&self) -> String {
        format!("{}.{}", self.def.parent_type_name(), self.def.name())
    }

    fn location(&self) -> Option<ast::Pos> {
        self.nodes.first().map(|node| node.position)
    }

    fn selection_sets(&self) -> Vec<&'doc ast::SelectionSet> {
        self.nodes.iter().filter_map(|node| node.selection_set.as_ref()).collect()
    }
}

/// State for one execution of one operation.
struct ExecutionRun<'r, 'doc> {
    collector: FieldCollector<'r, 'doc>,
    config: &'r ExecutorConfig,
    ctx: &'r ExecutionContext,
    errors: Mutex<Vec<GraphQLError>>,
    schema: &'r Schema,
}

impl<'doc> ExecutionRun<'_, 'doc> {
    fn into_errors(self) -> Vec<GraphQLError> {
        self.errors.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    /// Executes every field selected on `object_type`. Siblings are
    /// dispatched together unless `serial`; the result keeps selection
    /// order either way.
    fn execute_selection_set<'f>(
        &'f self,
        object_type: &'f ObjectType,
        parent: &'f Value,
        selection_sets: Vec<&'doc ast::SelectionSet>,
        path: Vec<PathSegment>,
        serial: bool,
    ) -> BoxFuture<'f, Result<Map<String, Value>, Bubble>> {
        async move {
            let fields = self.collector.collect(object_type.name(), &selection_sets);
            let mut data = Map::new();

            if serial {
                for (key, nodes) in fields {
                    let value = self.execute_field(
                        object_type,
                        parent,
                        &nodes,
                        child_path(&path, key),
                    ).await?;
                    data.insert(key.to_string(), value);
                }
                return Ok(data);
            }

            let values = join_all(fields.iter().map(|(key, nodes)| {
                self.execute_field(object_type, parent, nodes, child_path(&path, key))
            })).await;
            for (key, value) in fields.keys().zip(values) {
                data.insert(key.to_string(), value?);
            }
            Ok(data)
        }.boxed()
    }

    async fn execute_field(
        &self,
        object_type: &ObjectType,
        parent: &Value,
        nodes: &[&'doc ast::Field],
        path: Vec<PathSegment>,
    ) -> Completion {
        let Some(&node) = nodes.first() else {
            return Ok(Value::Null);
        };
        if node.name == "__typename" {
            return Ok(Value::String(object_type.name().to_string()));
        }
        let Some(def) = object_type.field(&node.name) else {
            self.record(
                ExecutionErrorKind::EngineInconsistency,
                format!("Type `{}` has no field `{}`", object_type.name(), node.name),
                Some(node.position),
                path,
                None,
            );
            return Ok(Value::Null);
        };

        let target = FieldTarget { def, nodes };
        match self.resolve_field(target, parent).await {
            Ok(resolved) => self.complete_value(def.type_annotation(), target, resolved, path).await,
            Err((kind, err)) => {
                self.record(kind, err.message().to_string(), target.location(), path, err.extensions());
                if def.type_annotation().nullable() {
                    Ok(Value::Null)
                } else {
                    Err(Bubble)
                }
            },
        }
    }

    async fn resolve_field(
        &self,
        target: FieldTarget<'_, 'doc>,
        parent: &Value,
    ) -> Result<ResolvedValue, (ExecutionErrorKind, FieldError)> {
        if self.ctx.is_cancelled() {
            return Err((
                ExecutionErrorKind::Cancelled,
                FieldError::new(format!(
                    "Execution was cancelled before `{}` was resolved",
                    target.label(),
                )),
            ));
        }

        let node = target.nodes.first().copied();
        let arguments = node.map_or(&[][..], |node| &node.arguments[..]);
        let args = input_coercion::coerce_argument_values(
            self.schema,
            target.def.parameters(),
            arguments,
            self.ctx.variables(),
        ).map_err(|err| (ExecutionErrorKind::Resolver, err))?;

        let Some(resolver) = target.def.resolver() else {
            return Ok(PropertyResolver::read(parent, target.def.name()));
        };
        resolver.resolve(parent, &args, self.ctx)
            .into_result()
            .await
            .map_err(|err| (ExecutionErrorKind::Resolver, err))
    }

    /// Completes `resolved` against `annot`, recursing into lists and
    /// objects.
    fn complete_value<'f>(
        &'f self,
        annot: &'f TypeAnnotation,
        target: FieldTarget<'f, 'doc>,
        resolved: ResolvedValue,
        path: Vec<PathSegment>,
    ) -> BoxFuture<'f, Completion> {
        async move {
            if resolved.is_null() {
                if annot.nullable() {
                    return Ok(Value::Null);
                }
                self.record(
                    ExecutionErrorKind::NonNullViolation,
                    format!("Cannot return null for non-nullable field `{}`", target.label()),
                    target.location(),
                    path,
                    None,
                );
                return Err(Bubble);
            }

            let completed = match annot {
                TypeAnnotation::List(list) => {
                    self.complete_list(list.inner_type(), target, resolved, path).await
                },
                TypeAnnotation::Named(named) => {
                    self.complete_named(named.type_name(), target, resolved, path).await
                },
            };
            match completed {
                Err(Bubble) if annot.nullable() => Ok(Value::Null),
                completed => completed,
            }
        }.boxed()
    }

    async fn complete_list(
        &self,
        item_annot: &TypeAnnotation,
        target: FieldTarget<'_, 'doc>,
        resolved: ResolvedValue,
        path: Vec<PathSegment>,
    ) -> Completion {
        let items = match resolved {
            ResolvedValue::List(items) => items,
            ResolvedValue::Leaf(Value::Array(items)) => {
                items.into_iter().map(ResolvedValue::from).collect()
            },
            other => {
                self.record(
                    ExecutionErrorKind::Resolver,
                    format!("Expected a list for field `{}`, found {}", target.label(), describe(&other)),
                    target.location(),
                    path,
                    None,
                );
                return Err(Bubble);
            },
        };

        let values = join_all(items.into_iter().enumerate().map(|(idx, item)| {
            let mut item_path = path.clone();
            item_path.push(PathSegment::Index(idx));
            self.complete_value(item_annot, target, item, item_path)
        })).await;
        values.into_iter().collect::<Result<Vec<_>, _>>().map(Value::Array)
    }

    async fn complete_named(
        &self,
        type_name: &str,
        target: FieldTarget<'_, 'doc>,
        resolved: ResolvedValue,
        path: Vec<PathSegment>,
    ) -> Completion {
        let Some(named_type) = self.schema.resolve_type(type_name) else {
            self.record(
                ExecutionErrorKind::EngineInconsistency,
                format!("Field `{}` has undefined type `{type_name}`", target.label()),
                target.location(),
                path,
                None,
            );
            return Err(Bubble);
        };

        let object_type = match named_type {
            GraphQLType::Object(object_type) => object_type,
            GraphQLType::Interface(_) | GraphQLType::Union(_) => {
                match self.resolve_abstract(named_type, target, &resolved) {
                    Ok(object_type) => object_type,
                    Err((kind, message)) => {
                        self.record(kind, message, target.location(), path, None);
                        return Err(Bubble);
                    },
                }
            },
            leaf_type => {
                return serialize_leaf(leaf_type, resolved).or_else(|reason| {
                    self.record(
                        ExecutionErrorKind::InvalidLeafValue,
                        format!("Field `{}` {reason}", target.label()),
                        target.location(),
                        path,
                        None,
                    );
                    Err(Bubble)
                });
            },
        };

        let data = match resolved {
            ResolvedValue::Object { data, .. } => data,
            ResolvedValue::Leaf(data @ Value::Object(_)) => data,
            other => {
                self.record(
                    ExecutionErrorKind::Resolver,
                    format!(
                        "Expected an object for field `{}`, found {}",
                        target.label(),
                        describe(&other),
                    ),
                    target.location(),
                    path,
                    None,
                );
                return Err(Bubble);
            },
        };
        self.execute_selection_set(object_type, &data, target.selection_sets(), path, false)
            .await
            .map(Value::Object)
    }

    /// Picks the concrete object type of an interface- or union-typed value
    /// from its type tag.
    fn resolve_abstract(
        &self,
        abstract_type: &GraphQLType,
        target: FieldTarget<'_, 'doc>,
        resolved: &ResolvedValue,
    ) -> Result<&ObjectType, (ExecutionErrorKind, String)> {
        let abstract_name = abstract_type.name();
        let inconsistency = |message: String| (ExecutionErrorKind::EngineInconsistency, message);

        let ResolvedValue::Object { type_tag, .. } = resolved else {
            return Err((
                ExecutionErrorKind::Resolver,
                format!("Expected an object for field `{}`, found {}", target.label(), describe(resolved)),
            ));
        };
        let Some(tag) = type_tag.as_deref() else {
            return Err(inconsistency(format!(
                "Abstract type `{abstract_name}` must resolve to an object type at runtime for \
                field `{}`, but the value has no type tag",
                target.label(),
            )));
        };
        let object_type = self.schema.resolve_type(tag)
            .and_then(GraphQLType::as_object)
            .filter(|object_type| self.schema.is_possible_type(abstract_name, object_type.name()))
            .ok_or_else(|| inconsistency(format!(
                "Runtime type `{tag}` is not a possible type of `{abstract_name}` for field `{}`",
                target.label(),
            )))?;

        let selection_sets = target.selection_sets();
        if self.collector.has_type_conditions(&selection_sets)
            && !self.collector.has_matching_branch(object_type.name(), &selection_sets) {
            return Err(inconsistency(format!(
                "Runtime type `{tag}` matches none of the type conditions selected on field `{}`",
                target.label(),
            )));
        }
        Ok(object_type)
    }

    fn record(
        &self,
        kind: ExecutionErrorKind,
        message: String,
        location: Option<ast::Pos>,
        path: Vec<PathSegment>,
        extensions: Option<&Map<String, Value>>,
    ) {
        let mut error = GraphQLError::new(message, kind.code()).with_path(path);
        if self.config.include_error_locations && let Some(pos) = location {
            error = error.at(pos);
        }
        if let Some(extensions) = extensions {
            let merged = error.extensions.get_or_insert_with(Map::new);
            for (key, value) in extensions {
                merged.insert(key.clone(), value.clone());
            }
        }

        match kind {
            ExecutionErrorKind::EngineInconsistency => {
                tracing::warn!(error = %error, "engine inconsistency");
            },
            _ => tracing::debug!(error = %error, code = error.code(), "field error"),
        }
        self.errors.lock().unwrap_or_else(PoisonError::into_inner).push(error);
    }
}

fn child_path(path: &[PathSegment], key: &str) -> Vec<PathSegment> {
    let mut child = path.to_vec();
    child.push(PathSegment::Key(key.to_string()));
    child
}

fn describe(resolved: &ResolvedValue) -> String {
    match resolved {
        ResolvedValue::Null => "null".to_string(),
        ResolvedValue::Leaf(value) => format!("`{value}`"),
        ResolvedValue::List(_) => "a list".to_string(),
        ResolvedValue::Object { .. } => "an object".to_string(),
    }
}

/// Serializes a resolved leaf as `leaf_type`.
fn serialize_leaf(leaf_type: &GraphQLType, resolved: ResolvedValue) -> Result<Value, String> {
    let value = match resolved {
        ResolvedValue::Leaf(value) => value,
        other => {
            return Err(format!("expected a `{}` value, found {}", leaf_type.name(), describe(&other)));
        },
    };

    let serialized = match leaf_type {
        GraphQLType::Boolean => value.as_bool().map(Value::Bool),
        GraphQLType::Float => value.as_f64().and_then(Number::from_f64).map(Value::Number),
        GraphQLType::ID => match &value {
            Value::String(s) => Some(Value::String(s.clone())),
            Value::Number(n) if n.is_i64() || n.is_u64() => Some(Value::String(n.to_string())),
            _ => None,
        },
        GraphQLType::Int => value.as_i64()
            .or_else(|| {
                value.as_f64()
                    .filter(|f| f.fract() == 0.0 && f.abs() <= f64::from(i32::MAX))
                    .map(|f| f as i64)
            })
            .and_then(|i| i32::try_from(i).ok())
            .map(Value::from),
        GraphQLType::String => value.as_str().map(Value::from),
        GraphQLType::Scalar(_) => Some(value.clone()),
        GraphQLType::Enum(enum_type) => value.as_str()
            .filter(|name| enum_type.has_value(name))
            .map(Value::from),
        GraphQLType::InputObject(_)
        | GraphQLType::Interface(_)
        | GraphQLType::Object(_)
        | GraphQLType::Union(_) => None,
    };
    serialized.ok_or_else(|| format!("cannot represent `{value}` as `{}`", leaf_type.name()))
}
