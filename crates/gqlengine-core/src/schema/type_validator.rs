use crate::loc;
use crate::schema::TypeValidationError;
use crate::types::DirectiveDefinition;
use crate::types::Field;
use crate::types::GraphQLType;
use crate::types::InputObjectType;
use crate::types::Parameter;
use crate::types::TypeAnnotation;
use crate::types::UnionType;
use indexmap::IndexMap;
use std::collections::HashSet;

/// Cross-type checks run once every definition and extension is loaded.
pub(crate) struct TypeValidator<'a> {
    directive_defs: &'a IndexMap<String, DirectiveDefinition>,
    errors: Vec<TypeValidationError>,
    types: &'a IndexMap<String, GraphQLType>,
}
impl<'a> TypeValidator<'a> {
    pub(crate) fn new(
        types: &'a IndexMap<String, GraphQLType>,
        directive_defs: &'a IndexMap<String, DirectiveDefinition>,
    ) -> Self {
        Self {
            directive_defs,
            errors: vec![],
            types,
        }
    }

    pub(crate) fn validate(mut self) -> Vec<TypeValidationError> {
        let types = self.types;
        for graphql_type in types.values() {
            match graphql_type {
                GraphQLType::Object(obj) => {
                    self.validate_output_fields(&obj.name, &obj.fields);
                    self.validate_implementations(
                        &obj.name,
                        &obj.def_location,
                        &obj.fields,
                        &obj.interfaces,
                    );
                },
                GraphQLType::Interface(iface) => {
                    self.validate_output_fields(&iface.name, &iface.fields);
                    self.validate_implementations(
                        &iface.name,
                        &iface.def_location,
                        &iface.fields,
                        &iface.interfaces,
                    );
                },
                GraphQLType::Union(union_type) => self.validate_union(union_type),
                GraphQLType::InputObject(input) => self.validate_input_object(input),
                _ => {},
            }
        }

        let directive_defs = self.directive_defs;
        for directive in directive_defs.values() {
            let owner_name = format!("@{}", directive.name);
            self.validate_parameters(&owner_name, &directive.parameters);
        }

        self.check_input_object_cycles();
        self.errors
    }

    fn validate_output_fields(&mut self, type_name: &str, fields: &IndexMap<String, Field>) {
        let types = self.types;
        for field in fields.values() {
            let field_type_name = field.type_annotation.innermost_type_name();
            match types.get(field_type_name) {
                None => self.errors.push(TypeValidationError::UndefinedTypeName {
                    ref_location: field.def_location.clone().into(),
                    undefined_type_name: field_type_name.to_string(),
                }),
                Some(GraphQLType::InputObject(_)) =>
                    self.errors.push(TypeValidationError::InvalidOutputFieldWithInputType {
                        def_location: field.def_location.clone(),
                        field_name: field.name.clone(),
                        input_type_name: field_type_name.to_string(),
                        parent_type_name: type_name.to_string(),
                    }),
                Some(_) => {},
            }

            let owner_name = format!("{type_name}.{}", field.name);
            self.validate_parameters(&owner_name, &field.parameters);
        }
    }

    fn validate_parameters(&mut self, owner_name: &str, params: &IndexMap<String, Parameter>) {
        let types = self.types;
        for param in params.values() {
            let param_type_name = param.type_annotation.innermost_type_name();
            match types.get(param_type_name) {
                None => self.errors.push(TypeValidationError::UndefinedTypeName {
                    ref_location: param.def_location.clone(),
                    undefined_type_name: param_type_name.to_string(),
                }),
                Some(param_type) if !param_type.is_input_type() =>
                    self.errors.push(TypeValidationError::InvalidParameterWithOutputOnlyType {
                        def_location: param.def_location.clone(),
                        owner_name: owner_name.to_string(),
                        parameter_name: param.name.clone(),
                        outputonly_type_name: param_type_name.to_string(),
                    }),
                Some(_) => {},
            }
        }
    }

    fn validate_implementations(
        &mut self,
        type_name: &str,
        def_location: &loc::FilePosition,
        fields: &IndexMap<String, Field>,
        interfaces: &[String],
    ) {
        let types = self.types;
        for iface_name in interfaces {
            let iface = match types.get(iface_name) {
                Some(GraphQLType::Interface(iface)) => iface,
                Some(_) => {
                    self.errors.push(TypeValidationError::ImplementsNonInterfaceType {
                        def_location: def_location.clone(),
                        non_interface_type_name: iface_name.clone(),
                        type_name: type_name.to_string(),
                    });
                    continue;
                },
                None => {
                    self.errors.push(TypeValidationError::ImplementsUndefinedInterface {
                        def_location: def_location.clone(),
                        type_name: type_name.to_string(),
                        undefined_interface_name: iface_name.clone(),
                    });
                    continue;
                },
            };

            // Interfaces implemented by `iface` must be declared here too.
            for inherited_name in &iface.interfaces {
                if !interfaces.contains(inherited_name) {
                    self.errors.push(TypeValidationError::MissingRecursiveInterfaceImplementation {
                        def_location: def_location.clone(),
                        inheritance_path: vec![iface_name.clone(), inherited_name.clone()],
                        missing_recursive_interface_name: inherited_name.clone(),
                        type_name: type_name.to_string(),
                    });
                }
            }

            for iface_field in iface.fields.values() {
                let Some(field) = fields.get(&iface_field.name) else {
                    self.errors.push(TypeValidationError::MissingInterfaceSpecifiedField {
                        def_location: def_location.clone(),
                        field_name: iface_field.name.clone(),
                        interface_name: iface_name.clone(),
                        type_name: type_name.to_string(),
                    });
                    continue;
                };

                let subtype_of = |sub: &str, sup: &str| is_subtype(types, sub, sup);
                if !field.type_annotation.is_covariant_with(&iface_field.type_annotation, &subtype_of) {
                    self.errors.push(TypeValidationError::InvalidInterfaceSpecifiedFieldType {
                        def_location: field.def_location.clone(),
                        expected_field_type: iface_field.type_annotation.clone(),
                        field_name: field.name.clone(),
                        interface_name: iface_name.clone(),
                        invalid_field_type: field.type_annotation.clone(),
                        type_name: type_name.to_string(),
                    });
                }

                self.validate_implemented_parameters(type_name, iface_name, field, iface_field);
            }
        }
    }

    fn validate_implemented_parameters(
        &mut self,
        type_name: &str,
        iface_name: &str,
        field: &Field,
        iface_field: &Field,
    ) {
        for iface_param in iface_field.parameters.values() {
            match field.parameters.get(&iface_param.name) {
                None => self.errors.push(TypeValidationError::MissingInterfaceSpecifiedFieldParameter {
                    def_location: field.def_location.clone(),
                    field_name: field.name.clone(),
                    interface_name: iface_name.to_string(),
                    missing_parameter_name: iface_param.name.clone(),
                    type_name: type_name.to_string(),
                }),
                Some(param) if param.type_annotation != iface_param.type_annotation =>
                    self.errors.push(TypeValidationError::InvalidInterfaceSpecifiedFieldParameterType {
                        def_location: param.def_location.clone(),
                        expected_parameter_type: iface_param.type_annotation.clone(),
                        field_name: field.name.clone(),
                        interface_name: iface_name.to_string(),
                        invalid_parameter_type: param.type_annotation.clone(),
                        parameter_name: param.name.clone(),
                        type_name: type_name.to_string(),
                    }),
                Some(_) => {},
            }
        }

        for param in field.parameters.values() {
            if param.is_required() && !iface_field.parameters.contains_key(&param.name) {
                self.errors.push(
                    TypeValidationError::InvalidRequiredAdditionalParameterOnInterfaceSpecifiedField {
                        def_location: param.def_location.clone(),
                        field_name: field.name.clone(),
                        interface_name: iface_name.to_string(),
                        parameter_name: param.name.clone(),
                        type_name: type_name.to_string(),
                    },
                );
            }
        }
    }

    fn validate_union(&mut self, union_type: &UnionType) {
        let types = self.types;
        for member_name in &union_type.members {
            match types.get(member_name) {
                None => self.errors.push(TypeValidationError::UndefinedTypeName {
                    ref_location: union_type.def_location.clone().into(),
                    undefined_type_name: member_name.clone(),
                }),
                Some(GraphQLType::Object(_)) => {},
                Some(member_type) =>
                    self.errors.push(TypeValidationError::InvalidUnionMemberTypeKind {
                        def_location: union_type.def_location.clone(),
                        member_kind: member_type.kind(),
                        member_type_name: member_name.clone(),
                        union_type_name: union_type.name.clone(),
                    }),
            }
        }
    }

    fn validate_input_object(&mut self, input: &InputObjectType) {
        let types = self.types;
        for field in input.fields.values() {
            let field_type_name = field.type_annotation.innermost_type_name();
            match types.get(field_type_name) {
                None => self.errors.push(TypeValidationError::UndefinedTypeName {
                    ref_location: field.def_location.clone(),
                    undefined_type_name: field_type_name.to_string(),
                }),
                Some(field_type) if !field_type.is_input_type() =>
                    self.errors.push(TypeValidationError::InvalidInputFieldWithOutputType {
                        def_location: field.def_location.clone(),
                        field_name: field.name.clone(),
                        invalid_type_name: field_type_name.to_string(),
                        parent_type_name: input.name.clone(),
                    }),
                Some(_) => {},
            }
        }
    }

    /// Non-null, non-list input fields that lead back to their own type make
    /// the type impossible to construct.
    fn check_input_object_cycles(&mut self) {
        let mut reported: HashSet<Vec<String>> = HashSet::new();
        let types = self.types;
        for graphql_type in types.values() {
            if let GraphQLType::InputObject(input) = graphql_type {
                let mut path = vec![input.name.clone()];
                self.walk_required_input_fields(input, &mut path, &mut reported);
            }
        }
    }

    fn walk_required_input_fields(
        &mut self,
        input: &InputObjectType,
        path: &mut Vec<String>,
        reported: &mut HashSet<Vec<String>>,
    ) {
        let types = self.types;
        for field in input.fields.values() {
            let TypeAnnotation::Named(named) = &field.type_annotation else {
                continue;
            };
            if named.nullable {
                continue;
            }
            let Some(GraphQLType::InputObject(next)) = types.get(&named.type_name) else {
                continue;
            };

            if let Some(start) = path.iter().position(|name| name == &next.name) {
                let mut cycle: Vec<String> = path[start..].to_vec();
                if reported.insert(rotate_to_smallest(&cycle)) {
                    cycle.push(next.name.clone());
                    self.errors.push(TypeValidationError::CircularInputFieldChain {
                        circular_field_path: cycle,
                    });
                }
                continue;
            }

            path.push(next.name.clone());
            self.walk_required_input_fields(next, path, reported);
            path.pop();
        }
    }
}

/// Whether `sub` is a possible type of the abstract type `sup`.
fn is_subtype(types: &IndexMap<String, GraphQLType>, sub: &str, sup: &str) -> bool {
    match types.get(sup) {
        Some(GraphQLType::Interface(_)) => match types.get(sub) {
            Some(GraphQLType::Object(obj)) => obj.interfaces.iter().any(|i| i == sup),
            Some(GraphQLType::Interface(iface)) => iface.interfaces.iter().any(|i| i == sup),
            _ => false,
        },
        Some(GraphQLType::Union(union_type)) => union_type.has_member(sub),
        _ => false,
    }
}

/// Rotates a cycle so it starts at its lexicographically smallest name, so
/// rotations of one cycle compare equal.
pub(crate) fn rotate_to_smallest(cycle: &[String]) -> Vec<String> {
    let start = cycle.iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.cmp(b))
        .map_or(0, |(idx, _)| idx);
    cycle[start..].iter().chain(cycle[..start].iter()).cloned().collect()
}
