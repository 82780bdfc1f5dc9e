use crate::operation::FragmentTable;
use crate::schema::Schema;
use crate::schema::rotate_to_smallest;
use crate::types::GraphQLType;
use crate::types::Parameter;
use crate::types::TypeAnnotation;
use crate::validation::ValidationError;
use crate::validation::input_value_checks::VariableUsage;
use crate::validation::input_value_checks::check_input_value;
use crate::validation::input_value_checks::collect_variable_usages;
use gqlengine_parser::ast;
use gqlengine_parser::ast::DirectiveLocation;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::collections::HashSet;

/// Validates every operation and fragment of `document` against `schema`.
///
/// Fragments are resolved through `fragments`, which must have been built
/// from the same document. Returns an empty list when the document is
/// valid.
pub fn validate(
    document: &ast::Document,
    fragments: &FragmentTable<'_>,
    schema: &Schema,
) -> Vec<ValidationError> {
    let mut validator = Validator {
        errors: vec![],
        fragments,
        reported_cycles: HashSet::new(),
        schema,
        visited_fragments: HashSet::new(),
    };
    validator.validate_document(document);

    let mut unique: Vec<ValidationError> = Vec::with_capacity(validator.errors.len());
    for error in validator.errors {
        if !unique.contains(&error) {
            unique.push(error);
        }
    }
    unique
}

struct Validator<'a> {
    errors: Vec<ValidationError>,
    fragments: &'a FragmentTable<'a>,
    reported_cycles: HashSet<Vec<String>>,
    schema: &'a Schema,
    /// Fragments reached from at least one operation.
    visited_fragments: HashSet<&'a str>,
}

/// Per-operation walk state.
struct OperationScope<'a> {
    /// Names of the fragments currently being expanded, outermost first.
    chain: Vec<&'a str>,
    /// Fragments already walked for this operation.
    expanded: HashSet<&'a str>,
    name: Option<&'a str>,
    /// `None` while walking a fragment no operation uses; variable usages
    /// are not checked then.
    variables: Option<IndexMap<&'a str, &'a ast::VariableDefinition>>,
}

impl<'a> Validator<'a> {
    fn validate_document(&mut self, document: &'a ast::Document) {
        let operation_count = document.operations().count();
        let mut operation_names: HashMap<&str, ast::Pos> = HashMap::new();
        for op in document.operations() {
            match &op.name {
                Some(name) => {
                    if let Some(location1) = operation_names.insert(name, op.position) {
                        self.errors.push(ValidationError::DuplicateOperationName {
                            operation_name: name.to_string(),
                            location1,
                            location2: op.position,
                        });
                    }
                },
                None if operation_count > 1 =>
                    self.errors.push(ValidationError::AnonymousOperationNotAlone {
                        location: op.position,
                    }),
                None => {},
            }
        }

        let mut fragment_names: HashMap<&str, ast::Pos> = HashMap::new();
        for fragment in document.fragments() {
            if let Some(location1) = fragment_names.get(fragment.name.as_str()) {
                self.errors.push(ValidationError::DuplicateFragmentName {
                    fragment_name: fragment.name.to_string(),
                    location1: *location1,
                    location2: fragment.position,
                });
            } else {
                fragment_names.insert(&fragment.name, fragment.position);
            }
        }

        for op in document.operations() {
            self.validate_operation(op);
        }

        let fragments = self.fragments;
        for fragment in fragments.iter() {
            if self.visited_fragments.contains(fragment.name.as_str()) {
                continue;
            }
            let mut scope = OperationScope {
                chain: vec![],
                expanded: HashSet::new(),
                name: None,
                variables: None,
            };
            self.walk_fragment(fragment, fragment.position, &mut scope);
        }
    }

    fn validate_operation(&mut self, op: &'a ast::OperationDefinition) {
        let mut scope = OperationScope {
            chain: vec![],
            expanded: HashSet::new(),
            name: op.name.as_deref(),
            variables: None,
        };

        let mut variables: IndexMap<&'a str, &'a ast::VariableDefinition> = IndexMap::new();
        for var in &op.variable_definitions {
            if variables.contains_key(var.name.as_str()) {
                self.errors.push(ValidationError::DuplicateVariableName {
                    variable_name: var.name.to_string(),
                    location: var.position,
                });
                continue;
            }
            variables.insert(var.name.as_str(), var);
            self.validate_variable_definition(var, &mut scope);
        }
        scope.variables = Some(variables);

        let directive_location = match op.kind {
            ast::OperationKind::Query => DirectiveLocation::Query,
            ast::OperationKind::Mutation => DirectiveLocation::Mutation,
            ast::OperationKind::Subscription => DirectiveLocation::Subscription,
        };
        self.check_directives(&op.directives, directive_location, &mut scope);

        let schema = self.schema;
        let Some(root_type) = schema.root_type(op.kind)
            .and_then(|root| schema.resolve_type(root.name())) else {
            self.errors.push(ValidationError::UnsupportedOperationKind {
                operation_kind: op.kind,
                location: op.position,
            });
            return;
        };

        self.walk_selection_set(&op.selection_set, root_type, &mut scope);
        self.check_field_merging(&[(&op.selection_set, root_type)], &HashSet::new());
    }

    fn validate_variable_definition(
        &mut self,
        var: &'a ast::VariableDefinition,
        scope: &mut OperationScope<'a>,
    ) {
        let annot = TypeAnnotation::from_ast_type(&var.var_type);
        let type_name = annot.innermost_type_name();
        match self.schema.resolve_type(type_name) {
            None => self.errors.push(ValidationError::UnknownType {
                type_name: type_name.to_string(),
                location: var.position,
            }),
            Some(var_type) if !var_type.is_input_type() =>
                self.errors.push(ValidationError::NonInputVariableType {
                    variable_name: var.name.to_string(),
                    type_name: annot.to_string(),
                    location: var.position,
                }),
            Some(_) => {
                if let Some(default) = &var.default_value
                    && let Err(reason) = check_input_value(self.schema, default, &annot) {
                    self.errors.push(ValidationError::InvalidVariableDefaultValue {
                        variable_name: var.name.to_string(),
                        reason,
                        location: var.position,
                    });
                }
            },
        }
        self.check_directives(&var.directives, DirectiveLocation::VariableDefinition, scope);
    }

    fn walk_selection_set(
        &mut self,
        selection_set: &'a ast::SelectionSet,
        parent_type: &'a GraphQLType,
        scope: &mut OperationScope<'a>,
    ) {
        for selection in &selection_set.items {
            match selection {
                ast::Selection::Field(field) =>
                    self.validate_field(field, parent_type, scope),

                ast::Selection::FragmentSpread(spread) => {
                    self.check_directives(&spread.directives, DirectiveLocation::FragmentSpread, scope);
                    let fragments = self.fragments;
                    let Some(fragment) = fragments.get(&spread.fragment_name) else {
                        self.errors.push(ValidationError::UnknownFragment {
                            fragment_name: spread.fragment_name.to_string(),
                            location: spread.position,
                        });
                        continue;
                    };
                    // Unknown or non-composite conditions are reported on the
                    // fragment definition itself.
                    if let Some(condition_type) = self.schema.resolve_type(&fragment.type_condition)
                        && condition_type.is_composite()
                        && !self.schema.types_overlap(parent_type.name(), condition_type.name()) {
                        self.errors.push(ValidationError::InvalidFragmentTypeCondition {
                            fragment_name: Some(fragment.name.to_string()),
                            parent_type_name: parent_type.name().to_string(),
                            type_condition: fragment.type_condition.to_string(),
                            location: spread.position,
                        });
                    }
                    self.walk_fragment(fragment, spread.position, scope);
                },

                ast::Selection::InlineFragment(inline) => {
                    self.check_directives(&inline.directives, DirectiveLocation::InlineFragment, scope);
                    let condition_type = match &inline.type_condition {
                        None => parent_type,
                        Some(type_condition) => {
                            let Some(condition_type) = self.check_type_condition(
                                None,
                                type_condition,
                                inline.position,
                            ) else {
                                continue;
                            };
                            if !self.schema.types_overlap(parent_type.name(), condition_type.name()) {
                                self.errors.push(ValidationError::InvalidFragmentTypeCondition {
                                    fragment_name: None,
                                    parent_type_name: parent_type.name().to_string(),
                                    type_condition: type_condition.to_string(),
                                    location: inline.position,
                                });
                            }
                            condition_type
                        },
                    };
                    self.walk_selection_set(&inline.selection_set, condition_type, scope);
                },
            }
        }
    }

    /// Expands a spread of `fragment`, detecting cycles through the chain of
    /// fragments currently being expanded.
    fn walk_fragment(
        &mut self,
        fragment: &'a ast::FragmentDefinition,
        spread_location: ast::Pos,
        scope: &mut OperationScope<'a>,
    ) {
        let name = fragment.name.as_str();
        if let Some(start) = scope.chain.iter().position(|expanding| *expanding == name) {
            let cycle: Vec<String> = scope.chain[start..].iter().map(|n| n.to_string()).collect();
            let cycle = rotate_to_smallest(&cycle);
            if self.reported_cycles.insert(cycle.clone()) {
                self.errors.push(ValidationError::CyclicFragment {
                    cycle,
                    location: spread_location,
                });
            }
            return;
        }
        if !scope.expanded.insert(name) {
            return;
        }
        if scope.variables.is_some() {
            self.visited_fragments.insert(name);
        }

        self.check_directives(&fragment.directives, DirectiveLocation::FragmentDefinition, scope);
        let Some(condition_type) = self.check_type_condition(
            Some(name),
            &fragment.type_condition,
            fragment.position,
        ) else {
            return;
        };

        scope.chain.push(name);
        self.walk_selection_set(&fragment.selection_set, condition_type, scope);
        scope.chain.pop();
    }

    /// Resolves a fragment's type condition, which must name a composite
    /// type.
    fn check_type_condition(
        &mut self,
        fragment_name: Option<&str>,
        type_condition: &str,
        location: ast::Pos,
    ) -> Option<&'a GraphQLType> {
        let schema = self.schema;
        match schema.resolve_type(type_condition) {
            None => {
                self.errors.push(ValidationError::UnknownType {
                    type_name: type_condition.to_string(),
                    location,
                });
                None
            },
            Some(condition_type) if !condition_type.is_composite() => {
                self.errors.push(ValidationError::FragmentOnNonCompositeType {
                    fragment_name: fragment_name.map(str::to_string),
                    type_name: type_condition.to_string(),
                    location,
                });
                None
            },
            Some(condition_type) => Some(condition_type),
        }
    }

    fn validate_field(
        &mut self,
        field: &'a ast::Field,
        parent_type: &'a GraphQLType,
        scope: &mut OperationScope<'a>,
    ) {
        self.check_directives(&field.directives, DirectiveLocation::Field, scope);

        if field.name == "__typename" {
            for arg in &field.arguments {
                self.errors.push(ValidationError::UnknownArgument {
                    argument_name: arg.name.to_string(),
                    owner: "__typename".to_string(),
                    location: arg.position,
                });
            }
            if field.selection_set.is_some() {
                self.errors.push(ValidationError::SelectionSetOnLeafField {
                    field_name: field.name.to_string(),
                    type_name: "String!".to_string(),
                    location: field.position,
                });
            }
            return;
        }

        let Some(field_def) = parent_type.fields().and_then(|fields| fields.get(&field.name)) else {
            self.errors.push(ValidationError::UnknownField {
                field_name: field.name.to_string(),
                type_name: parent_type.name().to_string(),
                location: field.position,
            });
            return;
        };

        let owner = format!("{}.{}", parent_type.name(), field.name);
        self.check_arguments(&field.arguments, field_def.parameters(), &owner, field.position, scope);

        let schema = self.schema;
        let return_annot = field_def.type_annotation();
        let Some(return_type) = schema.resolve_type(return_annot.innermost_type_name()) else {
            return;
        };
        match (return_type.is_leaf(), &field.selection_set) {
            (true, Some(_)) => self.errors.push(ValidationError::SelectionSetOnLeafField {
                field_name: field.name.to_string(),
                type_name: return_annot.to_string(),
                location: field.position,
            }),
            (false, None) => self.errors.push(ValidationError::MissingSelectionSet {
                field_name: field.name.to_string(),
                type_name: return_annot.to_string(),
                location: field.position,
            }),
            (false, Some(selection_set)) =>
                self.walk_selection_set(selection_set, return_type, scope),
            (true, None) => {},
        }
    }

    fn check_arguments(
        &mut self,
        arguments: &[ast::Argument],
        parameters: &IndexMap<String, Parameter>,
        owner: &str,
        location: ast::Pos,
        scope: &OperationScope<'a>,
    ) {
        let mut supplied: HashSet<&str> = HashSet::new();
        for arg in arguments {
            if !supplied.insert(&arg.name) {
                self.errors.push(ValidationError::DuplicateArgument {
                    argument_name: arg.name.to_string(),
                    location: arg.position,
                });
                continue;
            }
            let Some(param) = parameters.get(&arg.name) else {
                self.errors.push(ValidationError::UnknownArgument {
                    argument_name: arg.name.to_string(),
                    owner: owner.to_string(),
                    location: arg.position,
                });
                continue;
            };

            if let Err(reason) = check_input_value(self.schema, &arg.value, param.type_annotation()) {
                self.errors.push(ValidationError::InvalidArgumentValue {
                    argument_name: arg.name.to_string(),
                    owner: owner.to_string(),
                    reason,
                    location: arg.position,
                });
            }

            let mut usages = vec![];
            collect_variable_usages(
                self.schema,
                &arg.value,
                param.type_annotation(),
                param.default_value().is_some(),
                &mut usages,
            );
            self.check_variable_usages(usages, arg.position, scope);
        }

        for param in parameters.values() {
            if param.is_required() && !supplied.contains(param.name()) {
                self.errors.push(ValidationError::MissingRequiredArgument {
                    argument_name: param.name().to_string(),
                    argument_type: param.type_annotation().to_string(),
                    owner: owner.to_string(),
                    location,
                });
            }
        }
    }

    fn check_variable_usages(
        &mut self,
        usages: Vec<VariableUsage<'_>>,
        location: ast::Pos,
        scope: &OperationScope<'a>,
    ) {
        let Some(variables) = &scope.variables else {
            return;
        };
        for usage in usages {
            let Some(var) = variables.get(usage.name) else {
                self.errors.push(ValidationError::UndefinedVariable {
                    variable_name: usage.name.to_string(),
                    operation_name: scope.name.map(str::to_string),
                    location,
                });
                continue;
            };

            let var_type = TypeAnnotation::from_ast_type(&var.var_type);
            let variable_has_default = var.default_value.as_ref()
                .is_some_and(|default| *default != ast::Value::Null);
            if !var_type.can_flow_into(
                &usage.location_type,
                variable_has_default,
                usage.location_has_default,
            ) {
                self.errors.push(ValidationError::VariableTypeMismatch {
                    variable_name: usage.name.to_string(),
                    variable_type: var_type.to_string(),
                    expected_type: usage.location_type.to_string(),
                    location,
                });
            }
        }
    }

    fn check_directives(
        &mut self,
        directives: &[ast::Directive],
        directive_location: DirectiveLocation,
        scope: &OperationScope<'a>,
    ) {
        let schema = self.schema;
        let mut seen: HashSet<&str> = HashSet::new();
        for directive in directives {
            let Some(directive_def) = schema.directive(&directive.name) else {
                self.errors.push(ValidationError::UnknownDirective {
                    directive_name: directive.name.to_string(),
                    location: directive.position,
                });
                continue;
            };

            if !directive_def.locations().contains(&directive_location) {
                self.errors.push(ValidationError::MisplacedDirective {
                    directive_name: directive.name.to_string(),
                    directive_location,
                    location: directive.position,
                });
            }
            if !seen.insert(&directive.name) && !directive_def.is_repeatable() {
                self.errors.push(ValidationError::DuplicateDirective {
                    directive_name: directive.name.to_string(),
                    location: directive.position,
                });
            }

            let owner = format!("@{}", directive.name);
            self.check_arguments(
                &directive.arguments,
                directive_def.parameters(),
                &owner,
                directive.position,
                scope,
            );
        }
    }

    /// Reports fields that share a response key but would fetch different
    /// data. `selection_sets` are merged into one response object, each
    /// paired with the type it selects on.
    ///
    /// Fragments in `expanded` were spread by an enclosing level and are not
    /// entered again, which keeps cyclic fragments from recursing forever.
    fn check_field_merging(
        &mut self,
        selection_sets: &[(&'a ast::SelectionSet, &'a GraphQLType)],
        expanded: &HashSet<&'a str>,
    ) {
        let mut expanded = expanded.clone();
        let mut by_key: IndexMap<&'a str, Vec<(&'a ast::Field, &'a GraphQLType)>> = IndexMap::new();
        for (selection_set, parent_type) in selection_sets {
            self.collect_merge_fields(selection_set, parent_type, &mut expanded, &mut by_key);
        }

        let schema = self.schema;
        for (response_key, fields) in &by_key {
            'pairs: for (i, (field_a, parent_a)) in fields.iter().enumerate() {
                for (field_b, parent_b) in &fields[i + 1..] {
                    // Distinct object types never both apply to one value.
                    let exclusive = parent_a.name() != parent_b.name()
                        && parent_a.as_object().is_some()
                        && parent_b.as_object().is_some();
                    if exclusive {
                        continue;
                    }
                    let reason =
                        if field_a.name != field_b.name {
                            format!(
                                "`{}` and `{}` are different fields",
                                field_a.name,
                                field_b.name,
                            )
                        } else if !same_arguments(&field_a.arguments, &field_b.arguments) {
                            "they have differing arguments".to_string()
                        } else {
                            continue;
                        };
                    self.errors.push(ValidationError::FieldsConflict {
                        response_key: response_key.to_string(),
                        reason,
                        location1: field_a.position,
                        location2: field_b.position,
                    });
                    break 'pairs;
                }
            }

            let sub_sets: Vec<(&'a ast::SelectionSet, &'a GraphQLType)> = fields.iter()
                .filter_map(|(field, parent_type)| {
                    let selection_set = field.selection_set.as_ref()?;
                    let field_def = parent_type.fields()?.get(&field.name)?;
                    let return_type = schema.resolve_type(
                        field_def.type_annotation().innermost_type_name(),
                    )?;
                    Some((selection_set, return_type))
                })
                .collect();
            if !sub_sets.is_empty() {
                self.check_field_merging(&sub_sets, &expanded);
            }
        }
    }

    fn collect_merge_fields(
        &self,
        selection_set: &'a ast::SelectionSet,
        parent_type: &'a GraphQLType,
        expanded: &mut HashSet<&'a str>,
        by_key: &mut IndexMap<&'a str, Vec<(&'a ast::Field, &'a GraphQLType)>>,
    ) {
        for selection in &selection_set.items {
            match selection {
                ast::Selection::Field(field) =>
                    by_key.entry(field.response_key())
                        .or_default()
                        .push((field, parent_type)),

                ast::Selection::FragmentSpread(spread) => {
                    let Some(fragment) = self.fragments.get(&spread.fragment_name) else {
                        continue;
                    };
                    if !expanded.insert(fragment.name.as_str()) {
                        continue;
                    }
                    let Some(condition_type) = self.schema.resolve_type(&fragment.type_condition) else {
                        continue;
                    };
                    self.collect_merge_fields(&fragment.selection_set, condition_type, expanded, by_key);
                },

                ast::Selection::InlineFragment(inline) => {
                    let condition_type = match &inline.type_condition {
                        None => parent_type,
                        Some(type_condition) => match self.schema.resolve_type(type_condition) {
                            Some(condition_type) => condition_type,
                            None => continue,
                        },
                    };
                    self.collect_merge_fields(&inline.selection_set, condition_type, expanded, by_key);
                },
            }
        }
    }
}

/// Argument lists match when they bind the same names to equal values,
/// in any order.
fn same_arguments(a: &[ast::Argument], b: &[ast::Argument]) -> bool {
    a.len() == b.len()
        && a.iter().all(|arg_a| {
            b.iter().any(|arg_b| arg_a.name == arg_b.name && arg_a.value == arg_b.value)
        })
}
