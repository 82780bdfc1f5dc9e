use crate::file_reader;
use crate::loc;
use crate::resolver::Resolver;
use crate::schema::Schema;
use crate::schema::TypeValidationError;
use crate::schema::type_validator::TypeValidator;
use crate::types::DirectiveDefinition;
use crate::types::EnumType;
use crate::types::EnumValue;
use crate::types::Field;
use crate::types::GraphQLType;
use crate::types::InputObjectType;
use crate::types::InterfaceType;
use crate::types::ObjectType;
use crate::types::Parameter;
use crate::types::ScalarType;
use crate::types::UnionType;
use crate::types::deprecation_reason;
use gqlengine_parser::GraphQLParser;
use gqlengine_parser::ast;
use gqlengine_parser::ast::OperationKind;
use indexmap::IndexMap;
use indexmap::IndexSet;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

type Result<T> = std::result::Result<T, SchemaBuildError>;

struct ResolverBinding {
    field_name: String,
    resolver: Arc<dyn Resolver>,
    type_name: String,
}

/// Utility for building a [Schema].
///
/// ```
/// use gqlengine_core::resolver::SyncResolver;
/// use gqlengine_core::schema::SchemaBuilder;
///
/// let schema = SchemaBuilder::from_str("type Query { answer: Int }")?
///     .resolver("Query", "answer", SyncResolver::new(|_, _, _| Ok(42)))
///     .build()?;
/// assert!(schema.field_of("Query", "answer").is_some());
/// # Ok::<(), gqlengine_core::schema::SchemaBuildError>(())
/// ```
pub struct SchemaBuilder {
    directive_defs: IndexMap<String, DirectiveDefinition>,
    extensions: Vec<(PathBuf, ast::TypeExtension)>,
    mutation_type: Option<NamedTypeDefLocation>,
    query_type: Option<NamedTypeDefLocation>,
    resolvers: Vec<ResolverBinding>,
    str_load_counter: u16,
    subscription_type: Option<NamedTypeDefLocation>,
    types: IndexMap<String, GraphQLType>,
}
impl SchemaBuilder {
    pub fn build(mut self) -> Result<Schema> {
        self.inject_builtins();

        let extensions = std::mem::take(&mut self.extensions);
        for (file_path, ext) in extensions {
            self.apply_extension(file_path.as_path(), ext)?;
        }

        for graphql_type in self.types.values() {
            if let GraphQLType::Enum(enum_type) = graphql_type
                && enum_type.values.is_empty() {
                return Err(SchemaBuildError::EnumWithNoVariants {
                    type_name: enum_type.name.to_string(),
                    location: enum_type.def_location.clone().into(),
                });
            }
        }

        let errors = TypeValidator::new(&self.types, &self.directive_defs).validate();
        if !errors.is_empty() {
            return Err(SchemaBuildError::TypeValidationErrors { errors });
        }

        let query_type = self.resolve_root(OperationKind::Query)?
            .ok_or(SchemaBuildError::NoQueryOperationTypeDefined)?;
        let mutation_type = self.resolve_root(OperationKind::Mutation)?;
        let subscription_type = self.resolve_root(OperationKind::Subscription)?;

        let roots = [
            (OperationKind::Query, Some(&query_type)),
            (OperationKind::Mutation, mutation_type.as_ref()),
            (OperationKind::Subscription, subscription_type.as_ref()),
        ];
        for (idx, (operation1, root1)) in roots.iter().enumerate() {
            for (operation2, root2) in &roots[idx + 1..] {
                if let (Some(root1), Some(root2)) = (root1, root2)
                    && root1.type_name == root2.type_name {
                    return Err(SchemaBuildError::NonUniqueOperationTypes {
                        reused_type_name: root1.type_name.to_string(),
                        operation1: *operation1,
                        operation1_loc: root1.def_location.clone(),
                        operation2: *operation2,
                        operation2_loc: root2.def_location.clone(),
                    });
                }
            }
        }

        let resolvers = std::mem::take(&mut self.resolvers);
        for binding in resolvers {
            let field = match self.types.get_mut(&binding.type_name) {
                Some(GraphQLType::Object(obj)) => obj.fields.get_mut(&binding.field_name),
                _ => None,
            };
            match field {
                Some(field) => field.resolver = Some(binding.resolver),
                None => return Err(SchemaBuildError::UnknownResolverTarget {
                    field_name: binding.field_name,
                    type_name: binding.type_name,
                }),
            }
        }

        let possible_types = compute_possible_types(&self.types);

        Ok(Schema {
            directive_defs: self.directive_defs,
            mutation_type: mutation_type.map(|t| t.type_name),
            possible_types,
            query_type: query_type.type_name,
            subscription_type: subscription_type.map(|t| t.type_name),
            types: self.types,
        })
    }

    /// Shorthand for `SchemaBuilder::new().load_str(None, content)`.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self> {
        Self::new().load_str(None, content)
    }

    pub fn new() -> Self {
        Self {
            directive_defs: IndexMap::new(),
            extensions: vec![],
            mutation_type: None,
            query_type: None,
            resolvers: vec![],
            str_load_counter: 0,
            subscription_type: None,
            types: IndexMap::new(),
        }
    }

    pub fn load_file(
        self,
        file_path: impl AsRef<Path>,
    ) -> Result<Self> {
        self.load_files(vec![file_path])
    }

    pub fn load_files(
        mut self,
        file_paths: Vec<impl AsRef<Path>>,
    ) -> Result<Self> {
        for file_path in file_paths {
            let file_path = file_path.as_ref();
            let file_content = file_reader::read_content(file_path)
                .map_err(|err| SchemaBuildError::SchemaFileReadError(
                    Box::new(err),
                ))?;
            self = self.load_str(
                Some(file_path.to_path_buf()),
                file_content.as_str(),
            )?;
        }
        Ok(self)
    }

    /// Loads SDL from a string. Without a `file_path`, definitions are
    /// attributed to a `str://N` pseudo-path.
    pub fn load_str(
        mut self,
        file_path: Option<PathBuf>,
        content: &str,
    ) -> Result<Self> {
        let file_path =
            if let Some(file_path) = file_path {
                file_path
            } else {
                let ctr = self.str_load_counter;
                self.str_load_counter += 1;
                PathBuf::from(format!("str://{ctr}"))
            };

        let parse_result =
            GraphQLParser::with_file_path(content, &file_path)
                .parse_schema_document();
        if parse_result.has_errors() {
            return Err(SchemaBuildError::ParseError {
                file: file_path,
                message: parse_result.format_errors(Some(content)),
            });
        }
        let Some(ast_doc) = parse_result.into_valid_ast() else {
            return Err(SchemaBuildError::ParseError {
                file: file_path,
                message: "no document was produced".to_string(),
            });
        };

        for def in ast_doc.definitions {
            self.visit_ast_def(file_path.as_path(), def)?;
        }

        Ok(self)
    }

    /// Binds `resolver` to `type_name.field_name`. The target must be a field
    /// of an object type; [`build()`](Self::build) fails otherwise.
    pub fn resolver(
        mut self,
        type_name: &str,
        field_name: &str,
        resolver: impl Resolver + 'static,
    ) -> Self {
        self.resolvers.push(ResolverBinding {
            field_name: field_name.to_string(),
            resolver: Arc::new(resolver),
            type_name: type_name.to_string(),
        });
        self
    }

    fn apply_extension(
        &mut self,
        file_path: &Path,
        ext: ast::TypeExtension,
    ) -> Result<()> {
        let type_name = ext.name().to_string();
        let ext_loc: loc::SchemaDefLocation =
            loc::FilePosition::from_pos(file_path, ext.position()).into();
        let Some(existing) = self.types.get_mut(&type_name) else {
            return Err(SchemaBuildError::ExtensionOfUndefinedType {
                type_name,
                extension_type_loc: ext_loc,
            });
        };

        match (existing, ext) {
            (GraphQLType::Scalar(scalar), ast::TypeExtension::Scalar(def)) => {
                if let Some(url) = specified_by_url(&def.directives) {
                    scalar.specified_by_url = Some(url);
                }
            },
            (GraphQLType::Object(obj), ast::TypeExtension::Object(def)) => {
                extend_interfaces(&obj.name, &mut obj.interfaces, file_path, &def.implements_interfaces, def.position)?;
                extend_fields(&obj.name, &mut obj.fields, file_path, &def.fields)?;
            },
            (GraphQLType::Interface(iface), ast::TypeExtension::Interface(def)) => {
                if def.implements_interfaces.contains(&iface.name) {
                    return Err(SchemaBuildError::InvalidSelfImplementingInterface {
                        def_location: ext_loc,
                        interface_name: iface.name.to_string(),
                    });
                }
                extend_interfaces(&iface.name, &mut iface.interfaces, file_path, &def.implements_interfaces, def.position)?;
                extend_fields(&iface.name, &mut iface.fields, file_path, &def.fields)?;
            },
            (GraphQLType::Union(union_type), ast::TypeExtension::Union(def)) => {
                for member in &def.types {
                    if !union_type.members.insert(member.to_string()) {
                        return Err(SchemaBuildError::DuplicatedUnionMember {
                            type_name: union_type.name.to_string(),
                            member_name: member.to_string(),
                            location: ext_loc.clone(),
                        });
                    }
                }
            },
            (GraphQLType::Enum(enum_type), ast::TypeExtension::Enum(def)) => {
                for value_def in &def.values {
                    insert_enum_value(enum_type, file_path, value_def)?;
                }
            },
            (GraphQLType::InputObject(input), ast::TypeExtension::InputObject(def)) => {
                for field_def in &def.fields {
                    check_dunder_name(&field_def.name, file_path, field_def.position, || {
                        format!("{}.{}", input.name, field_def.name)
                    })?;
                    let field_loc: loc::SchemaDefLocation =
                        loc::FilePosition::from_pos(file_path, field_def.position).into();
                    if let Some(prev) = input.fields.get(&field_def.name) {
                        return Err(SchemaBuildError::DuplicateFieldNameDefinition {
                            type_name: input.name.to_string(),
                            field_name: field_def.name.to_string(),
                            field_def1: prev.def_location.clone(),
                            field_def2: field_loc,
                        });
                    }
                    input.fields.insert(
                        field_def.name.to_string(),
                        Parameter::from_ast(file_path, field_def),
                    );
                }
            },
            (existing, ext) => return Err(SchemaBuildError::InvalidExtensionType {
                extension_kind: extension_kind_name(&ext),
                extension_loc: ext_loc,
                schema_type_kind: existing.kind().name(),
                type_name,
            }),
        }

        Ok(())
    }

    fn inject_builtins(&mut self) {
        for scalar in GraphQLType::BUILTIN_SCALARS {
            self.types.insert(scalar.name().to_string(), scalar);
        }
        for name in DirectiveDefinition::BUILTIN_NAMES {
            if let Some(directive) = DirectiveDefinition::builtin(name) {
                self.directive_defs.insert(name.to_string(), directive);
            }
        }
    }

    /// The explicitly declared root for `kind`, else the object type with the
    /// conventional root name.
    fn resolve_root(&self, kind: OperationKind) -> Result<Option<NamedTypeDefLocation>> {
        let declared = match kind {
            OperationKind::Query => self.query_type.as_ref(),
            OperationKind::Mutation => self.mutation_type.as_ref(),
            OperationKind::Subscription => self.subscription_type.as_ref(),
        };

        if let Some(declared) = declared {
            return match self.types.get(&declared.type_name) {
                Some(GraphQLType::Object(_)) => Ok(Some(declared.clone())),
                Some(other) => Err(SchemaBuildError::RootOperationTypeNotObject {
                    operation: kind,
                    type_kind: other.kind().name(),
                    type_name: declared.type_name.to_string(),
                    location: declared.def_location.clone(),
                }),
                None => Err(SchemaBuildError::TypeValidationErrors {
                    errors: vec![TypeValidationError::UndefinedTypeName {
                        ref_location: declared.def_location.clone(),
                        undefined_type_name: declared.type_name.to_string(),
                    }],
                }),
            };
        }

        let default_name = default_root_name(kind);
        Ok(match self.types.get(default_name) {
            Some(GraphQLType::Object(obj)) => Some(NamedTypeDefLocation {
                def_location: obj.def_location.clone().into(),
                type_name: default_name.to_string(),
            }),
            _ => None,
        })
    }

    fn visit_ast_def(
        &mut self,
        file_path: &Path,
        def: ast::TypeSystemDefinition,
    ) -> Result<()> {
        use ast::TypeSystemDefinition;
        match def {
            TypeSystemDefinition::Schema(schema_def)
                | TypeSystemDefinition::SchemaExtension(schema_def) =>
                self.visit_ast_schemablock_def(file_path, schema_def),
            TypeSystemDefinition::Type(type_def) =>
                self.visit_ast_type_def(file_path, type_def),
            TypeSystemDefinition::TypeExtension(type_ext) => {
                self.extensions.push((file_path.to_path_buf(), type_ext));
                Ok(())
            },
            TypeSystemDefinition::Directive(directive_def) =>
                self.visit_ast_directive_def(file_path, directive_def),
        }
    }

    fn visit_ast_directive_def(
        &mut self,
        file_path: &Path,
        def: ast::DirectiveDefinition,
    ) -> Result<()> {
        let def_location: loc::SchemaDefLocation =
            loc::FilePosition::from_pos(file_path, def.position).into();

        if DirectiveDefinition::BUILTIN_NAMES.contains(&def.name.as_str()) {
            return Err(SchemaBuildError::RedefinitionOfBuiltinDirective {
                directive_name: def.name,
                location: def_location,
            });
        }

        if def.name.starts_with("__") {
            return Err(SchemaBuildError::InvalidDunderPrefixedDirectiveName {
                def_location,
                directive_name: def.name,
            });
        }

        if let Some(prev) = self.directive_defs.get(&def.name) {
            return Err(SchemaBuildError::DuplicateDirectiveDefinition {
                directive_name: def.name,
                location1: prev.def_location.clone(),
                location2: def_location,
            });
        }

        for arg in &def.arguments {
            check_dunder_name(&arg.name, file_path, arg.position, || {
                format!("@{}({}:)", def.name, arg.name)
            })?;
        }

        self.directive_defs.insert(
            def.name.to_string(),
            DirectiveDefinition::from_ast(file_path, &def),
        );
        Ok(())
    }

    fn visit_ast_schemablock_def(
        &mut self,
        file_path: &Path,
        schema_def: ast::SchemaDefinition,
    ) -> Result<()> {
        let roots = [
            (OperationKind::Query, schema_def.query),
            (OperationKind::Mutation, schema_def.mutation),
            (OperationKind::Subscription, schema_def.subscription),
        ];
        for (kind, type_name) in roots {
            let Some(type_name) = type_name else {
                continue;
            };
            let location2 = NamedTypeDefLocation::from_pos(
                type_name,
                file_path,
                schema_def.position,
            );
            let slot = match kind {
                OperationKind::Query => &mut self.query_type,
                OperationKind::Mutation => &mut self.mutation_type,
                OperationKind::Subscription => &mut self.subscription_type,
            };
            if let Some(location1) = slot.take() {
                return Err(SchemaBuildError::DuplicateOperationDefinition {
                    operation: kind,
                    location1,
                    location2,
                });
            }
            *slot = Some(location2);
        }
        Ok(())
    }

    fn visit_ast_type_def(
        &mut self,
        file_path: &Path,
        type_def: ast::TypeDefinition,
    ) -> Result<()> {
        let type_name = type_def.name().to_string();
        let def_pos = loc::FilePosition::from_pos(file_path, type_def.position());

        if BUILTIN_SCALAR_NAMES.contains(&type_name.as_str()) {
            return Err(SchemaBuildError::RedefinitionOfBuiltinType {
                type_name,
                location: def_pos.into(),
            });
        }

        if type_name.starts_with("__") {
            return Err(SchemaBuildError::InvalidDunderPrefixedTypeName {
                def_location: def_pos.into(),
                type_name,
            });
        }

        if let Some(prev) = self.types.get(&type_name) {
            return Err(SchemaBuildError::DuplicateTypeDefinition {
                type_name,
                def1: prev.def_location(),
                def2: def_pos.into(),
            });
        }

        let graphql_type = match type_def {
            ast::TypeDefinition::Scalar(def) => GraphQLType::Scalar(ScalarType {
                def_location: def_pos,
                description: def.description,
                name: def.name,
                specified_by_url: specified_by_url(&def.directives),
            }),

            ast::TypeDefinition::Object(def) => {
                let mut interfaces = vec![];
                extend_interfaces(&def.name, &mut interfaces, file_path, &def.implements_interfaces, def.position)?;
                let mut fields = IndexMap::new();
                extend_fields(&def.name, &mut fields, file_path, &def.fields)?;
                GraphQLType::Object(ObjectType {
                    def_location: def_pos,
                    description: def.description,
                    fields,
                    interfaces,
                    name: def.name,
                })
            },

            ast::TypeDefinition::Interface(def) => {
                if def.implements_interfaces.contains(&def.name) {
                    return Err(SchemaBuildError::InvalidSelfImplementingInterface {
                        def_location: def_pos.into(),
                        interface_name: def.name,
                    });
                }
                let mut interfaces = vec![];
                extend_interfaces(&def.name, &mut interfaces, file_path, &def.implements_interfaces, def.position)?;
                let mut fields = IndexMap::new();
                extend_fields(&def.name, &mut fields, file_path, &def.fields)?;
                GraphQLType::Interface(InterfaceType {
                    def_location: def_pos,
                    description: def.description,
                    fields,
                    interfaces,
                    name: def.name,
                })
            },

            ast::TypeDefinition::Union(def) => {
                let mut members = IndexSet::new();
                for member in &def.types {
                    if !members.insert(member.to_string()) {
                        return Err(SchemaBuildError::DuplicatedUnionMember {
                            type_name: def.name,
                            member_name: member.to_string(),
                            location: def_pos.into(),
                        });
                    }
                }
                GraphQLType::Union(UnionType {
                    def_location: def_pos,
                    description: def.description,
                    members,
                    name: def.name,
                })
            },

            ast::TypeDefinition::Enum(def) => {
                let mut enum_type = EnumType {
                    def_location: def_pos,
                    description: def.description,
                    name: def.name,
                    values: IndexMap::new(),
                };
                for value_def in &def.values {
                    insert_enum_value(&mut enum_type, file_path, value_def)?;
                }
                GraphQLType::Enum(enum_type)
            },

            ast::TypeDefinition::InputObject(def) => {
                let mut fields: IndexMap<String, Parameter> = IndexMap::new();
                for field_def in &def.fields {
                    check_dunder_name(&field_def.name, file_path, field_def.position, || {
                        format!("{}.{}", def.name, field_def.name)
                    })?;
                    let field_loc: loc::SchemaDefLocation =
                        loc::FilePosition::from_pos(file_path, field_def.position).into();
                    if let Some(prev) = fields.get(&field_def.name) {
                        return Err(SchemaBuildError::DuplicateFieldNameDefinition {
                            type_name: def.name,
                            field_name: field_def.name.to_string(),
                            field_def1: prev.def_location.clone(),
                            field_def2: field_loc,
                        });
                    }
                    fields.insert(
                        field_def.name.to_string(),
                        Parameter::from_ast(file_path, field_def),
                    );
                }
                GraphQLType::InputObject(InputObjectType {
                    def_location: def_pos,
                    description: def.description,
                    fields,
                    name: def.name,
                })
            },
        };

        self.types.insert(type_name, graphql_type);
        Ok(())
    }
}
impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}
impl fmt::Debug for SchemaBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaBuilder")
            .field("directive_defs", &self.directive_defs)
            .field("extensions", &self.extensions)
            .field("mutation_type", &self.mutation_type)
            .field("query_type", &self.query_type)
            .field("resolvers", &self.resolvers.len())
            .field("str_load_counter", &self.str_load_counter)
            .field("subscription_type", &self.subscription_type)
            .field("types", &self.types)
            .finish()
    }
}

const BUILTIN_SCALAR_NAMES: [&str; 5] = ["Boolean", "Float", "ID", "Int", "String"];

fn default_root_name(kind: OperationKind) -> &'static str {
    match kind {
        OperationKind::Query => "Query",
        OperationKind::Mutation => "Mutation",
        OperationKind::Subscription => "Subscription",
    }
}

fn check_dunder_name(
    name: &str,
    file_path: &Path,
    pos: ast::Pos,
    owner: impl FnOnce() -> String,
) -> Result<()> {
    if name.starts_with("__") {
        return Err(SchemaBuildError::InvalidDunderPrefixedFieldName {
            def_location: loc::FilePosition::from_pos(file_path, pos).into(),
            field_path: owner(),
        });
    }
    Ok(())
}

fn extend_fields(
    type_name: &str,
    fields: &mut IndexMap<String, Field>,
    file_path: &Path,
    field_defs: &[ast::FieldDefinition],
) -> Result<()> {
    for field_def in field_defs {
        check_dunder_name(&field_def.name, file_path, field_def.position, || {
            format!("{type_name}.{}", field_def.name)
        })?;
        for arg in &field_def.arguments {
            check_dunder_name(&arg.name, file_path, arg.position, || {
                format!("{type_name}.{}({}:)", field_def.name, arg.name)
            })?;
        }

        let field = Field::from_ast(file_path, type_name, field_def);
        if let Some(prev) = fields.get(&field_def.name) {
            return Err(SchemaBuildError::DuplicateFieldNameDefinition {
                type_name: type_name.to_string(),
                field_name: field_def.name.to_string(),
                field_def1: prev.def_location.clone().into(),
                field_def2: field.def_location.into(),
            });
        }
        fields.insert(field_def.name.to_string(), field);
    }
    Ok(())
}

fn extend_interfaces(
    type_name: &str,
    interfaces: &mut Vec<String>,
    file_path: &Path,
    new_interfaces: &[String],
    pos: ast::Pos,
) -> Result<()> {
    for iface_name in new_interfaces {
        if interfaces.contains(iface_name) {
            return Err(SchemaBuildError::DuplicateInterfaceImplementsDeclaration {
                def_location: loc::FilePosition::from_pos(file_path, pos).into(),
                duplicated_interface_name: iface_name.to_string(),
                type_name: type_name.to_string(),
            });
        }
        interfaces.push(iface_name.to_string());
    }
    Ok(())
}

fn extension_kind_name(ext: &ast::TypeExtension) -> &'static str {
    match ext {
        ast::TypeExtension::Scalar(_) => "scalar",
        ast::TypeExtension::Object(_) => "type",
        ast::TypeExtension::Interface(_) => "interface",
        ast::TypeExtension::Union(_) => "union",
        ast::TypeExtension::Enum(_) => "enum",
        ast::TypeExtension::InputObject(_) => "input",
    }
}

fn insert_enum_value(
    enum_type: &mut EnumType,
    file_path: &Path,
    value_def: &ast::EnumValueDefinition,
) -> Result<()> {
    let value_pos = loc::FilePosition::from_pos(file_path, value_def.position);
    if let Some(prev) = enum_type.values.get(&value_def.name) {
        return Err(SchemaBuildError::DuplicateEnumValueDefinition {
            enum_name: enum_type.name.to_string(),
            enum_def_location: enum_type.def_location.clone().into(),
            value_def1: prev.def_location.clone().into(),
            value_def2: value_pos.into(),
        });
    }
    if matches!(value_def.name.as_str(), "true" | "false" | "null") {
        return Err(SchemaBuildError::InvalidEnumValueName {
            enum_name: enum_type.name.to_string(),
            location: value_pos.into(),
            value_name: value_def.name.to_string(),
        });
    }
    enum_type.values.insert(value_def.name.to_string(), EnumValue {
        def_location: value_pos,
        deprecation_reason: deprecation_reason(&value_def.directives),
        description: value_def.description.clone(),
        name: value_def.name.to_string(),
    });
    Ok(())
}

fn specified_by_url(directives: &[ast::Directive]) -> Option<String> {
    let directive = directives.iter().find(|d| d.name == "specifiedBy")?;
    match directive.argument("url").map(|arg| &arg.value) {
        Some(ast::Value::String(url)) => Some(url.clone()),
        _ => None,
    }
}

/// Maps each interface and union to the object types that can stand in for
/// it. Interfaces collect every object implementing them, directly or
/// through another interface.
fn compute_possible_types(
    types: &IndexMap<String, GraphQLType>,
) -> HashMap<String, IndexSet<String>> {
    let mut possible_types: HashMap<String, IndexSet<String>> = HashMap::new();
    for graphql_type in types.values() {
        match graphql_type {
            GraphQLType::Interface(iface) => {
                possible_types.entry(iface.name.to_string()).or_default();
            },
            GraphQLType::Union(union_type) => {
                possible_types.insert(
                    union_type.name.to_string(),
                    union_type.members.iter().cloned().collect(),
                );
            },
            _ => {},
        }
    }

    for graphql_type in types.values() {
        let GraphQLType::Object(obj) = graphql_type else {
            continue;
        };
        let mut pending: Vec<&str> = obj.interfaces.iter().map(String::as_str).collect();
        let mut seen: IndexSet<&str> = IndexSet::new();
        while let Some(iface_name) = pending.pop() {
            if !seen.insert(iface_name) {
                continue;
            }
            possible_types.entry(iface_name.to_string())
                .or_default()
                .insert(obj.name.to_string());
            if let Some(GraphQLType::Interface(iface)) = types.get(iface_name) {
                pending.extend(iface.interfaces.iter().map(String::as_str));
            }
        }
    }

    possible_types
}

#[derive(Debug, Error, PartialEq)]
pub enum SchemaBuildError {
    #[error("Multiple directives were defined with the same name: `@{directive_name}`")]
    DuplicateDirectiveDefinition {
        directive_name: String,
        location1: loc::SchemaDefLocation,
        location2: loc::SchemaDefLocation,
    },

    #[error("Multiple enum variants with the same name were defined on the `{enum_name}` enum")]
    DuplicateEnumValueDefinition {
        enum_name: String,
        enum_def_location: loc::SchemaDefLocation,
        value_def1: loc::SchemaDefLocation,
        value_def2: loc::SchemaDefLocation,
    },

    #[error("Multiple fields named `{field_name}` were defined on the `{type_name}` type")]
    DuplicateFieldNameDefinition {
        type_name: String,
        field_name: String,
        field_def1: loc::SchemaDefLocation,
        field_def2: loc::SchemaDefLocation,
    },

    #[error(
        "The `{type_name}` type declares that it implements the \
        `{duplicated_interface_name}` interface more than once"
    )]
    DuplicateInterfaceImplementsDeclaration {
        def_location: loc::SchemaDefLocation,
        duplicated_interface_name: String,
        type_name: String,
    },

    #[error("The {operation} root operation type was declared more than once")]
    DuplicateOperationDefinition {
        operation: OperationKind,
        location1: NamedTypeDefLocation,
        location2: NamedTypeDefLocation,
    },

    #[error("Multiple GraphQL types named `{type_name}` were defined")]
    DuplicateTypeDefinition {
        type_name: String,
        def1: loc::SchemaDefLocation,
        def2: loc::SchemaDefLocation,
    },

    #[error("The `{type_name}` union lists `{member_name}` as a member more than once")]
    DuplicatedUnionMember {
        type_name: String,
        member_name: String,
        location: loc::SchemaDefLocation,
    },

    #[error("Enum types must define one or more unique variants: `{type_name}` defines none")]
    EnumWithNoVariants {
        type_name: String,
        location: loc::SchemaDefLocation,
    },

    #[error("Attempted to extend `{type_name}`, which is not defined elsewhere")]
    ExtensionOfUndefinedType {
        type_name: String,
        extension_type_loc: loc::SchemaDefLocation,
    },

    #[error(
        "Attempted to extend the {schema_type_kind} type `{type_name}` with an \
        `extend {extension_kind}` definition"
    )]
    InvalidExtensionType {
        extension_kind: &'static str,
        extension_loc: loc::SchemaDefLocation,
        schema_type_kind: &'static str,
        type_name: String,
    },

    #[error("Custom directive names must not start with `__`: `@{directive_name}`")]
    InvalidDunderPrefixedDirectiveName {
        def_location: loc::SchemaDefLocation,
        directive_name: String,
    },

    #[error("Field and argument names must not start with `__`: `{field_path}`")]
    InvalidDunderPrefixedFieldName {
        def_location: loc::SchemaDefLocation,
        field_path: String,
    },

    #[error("Type names must not start with `__`: `{type_name}`")]
    InvalidDunderPrefixedTypeName {
        def_location: loc::SchemaDefLocation,
        type_name: String,
    },

    #[error("`{value_name}` is not a valid value name for the `{enum_name}` enum")]
    InvalidEnumValueName {
        enum_name: String,
        location: loc::SchemaDefLocation,
        value_name: String,
    },

    #[error(
        "Interface types may not declare that they implement themselves: The \
        `{interface_name}` interface does just that"
    )]
    InvalidSelfImplementingInterface {
        def_location: loc::SchemaDefLocation,
        interface_name: String,
    },

    #[error("Attempted to build a schema that has no Query operation type defined")]
    NoQueryOperationTypeDefined,

    #[error(
        "The {operation1} and {operation2} root operations are defined with \
        the same GraphQL type (`{reused_type_name}`), but all root operations \
        must be defined with different types"
    )]
    NonUniqueOperationTypes {
        reused_type_name: String,
        operation1: OperationKind,
        operation1_loc: loc::SchemaDefLocation,
        operation2: OperationKind,
        operation2_loc: loc::SchemaDefLocation,
    },

    #[error("Error parsing schema source {}:\n{message}", file.display())]
    ParseError {
        file: PathBuf,
        message: String,
    },

    #[error("Attempted to redefine the builtin directive `@{directive_name}`")]
    RedefinitionOfBuiltinDirective {
        directive_name: String,
        location: loc::SchemaDefLocation,
    },

    #[error("Attempted to redefine the builtin scalar `{type_name}`")]
    RedefinitionOfBuiltinType {
        type_name: String,
        location: loc::SchemaDefLocation,
    },

    #[error(
        "The {operation} root operation type must be an object type, but \
        `{type_name}` is a {type_kind} type"
    )]
    RootOperationTypeNotObject {
        operation: OperationKind,
        type_kind: &'static str,
        type_name: String,
        location: loc::SchemaDefLocation,
    },

    #[error("Failure while trying to read a schema file from disk: {0}")]
    SchemaFileReadError(Box<file_reader::ReadContentError>),

    #[error(
        "Encountered the following type-validation errors while building the \
        schema:\n\n{}",
        errors.iter()
            .map(|s| format!("  * {s}"))
            .collect::<Vec<_>>()
            .join("\n"),
    )]
    TypeValidationErrors {
        errors: Vec<TypeValidationError>,
    },

    #[error("A resolver was bound to `{type_name}.{field_name}`, which is not a field of any object type")]
    UnknownResolverTarget {
        field_name: String,
        type_name: String,
    },
}

/// Represents the file location of a given type's definition in the schema.
#[derive(Clone, Debug, PartialEq)]
pub struct NamedTypeDefLocation {
    pub def_location: loc::SchemaDefLocation,
    pub type_name: String,
}
impl NamedTypeDefLocation {
    pub(crate) fn from_pos(
        type_name: String,
        file: &Path,
        pos: ast::Pos,
    ) -> Self {
        Self {
            def_location: loc::FilePosition::from_pos(file, pos).into(),
            type_name,
        }
    }
}
