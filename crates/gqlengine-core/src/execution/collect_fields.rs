use crate::ast;
use crate::operation::FragmentTable;
use crate::schema::Schema;
use indexmap::IndexMap;
use serde_json::Map;
use serde_json::Value;
use std::collections::HashSet;

/// Response key → every field node selected under that key, in selection
/// order.
pub(crate) type CollectedFields<'doc> = IndexMap<&'doc str, Vec<&'doc ast::Field>>;

/// Flattens selection sets for one concrete object type: evaluates
/// `@skip`/`@include`, expands the fragments whose type condition applies and
/// groups fields by response key.
pub(crate) struct FieldCollector<'a, 'doc> {
    pub(crate) fragments: &'a FragmentTable<'doc>,
    pub(crate) schema: &'a Schema,
    pub(crate) variables: &'a Map<String, Value>,
}

impl<'doc> FieldCollector<'_, 'doc> {
    pub(crate) fn collect(
        &self,
        object_type_name: &str,
        selection_sets: &[&'doc ast::SelectionSet],
    ) -> CollectedFields<'doc> {
        let mut fields = CollectedFields::new();
        let mut visited_fragments = HashSet::new();
        for selection_set in selection_sets {
            self.collect_into(object_type_name, selection_set, &mut fields, &mut visited_fragments);
        }
        fields
    }

    fn collect_into(
        &self,
        object_type_name: &str,
        selection_set: &'doc ast::SelectionSet,
        fields: &mut CollectedFields<'doc>,
        visited_fragments: &mut HashSet<&'doc str>,
    ) {
        for selection in &selection_set.items {
            if !self.should_include(selection.directives()) {
                continue;
            }
            match selection {
                ast::Selection::Field(field) => {
                    fields.entry(field.response_key()).or_default().push(field);
                },
                ast::Selection::FragmentSpread(spread) => {
                    if !visited_fragments.insert(spread.fragment_name.as_str()) {
                        continue;
                    }
                    let Some(fragment) = self.fragments.get(&spread.fragment_name) else {
                        continue;
                    };
                    if self.type_condition_applies(object_type_name, &fragment.type_condition) {
                        self.collect_into(
                            object_type_name,
                            &fragment.selection_set,
                            fields,
                            visited_fragments,
                        );
                    }
                },
                ast::Selection::InlineFragment(inline) => {
                    if let Some(type_condition) = &inline.type_condition
                        && !self.type_condition_applies(object_type_name, type_condition) {
                        continue;
                    }
                    self.collect_into(
                        object_type_name,
                        &inline.selection_set,
                        fields,
                        visited_fragments,
                    );
                },
            }
        }
    }

    /// Whether any included selection in `selection_sets` is guarded by a
    /// type condition.
    pub(crate) fn has_type_conditions(&self, selection_sets: &[&'doc ast::SelectionSet]) -> bool {
        selection_sets.iter()
            .flat_map(|selection_set| &selection_set.items)
            .filter(|selection| self.should_include(selection.directives()))
            .any(|selection| match selection {
                ast::Selection::Field(_) => false,
                ast::Selection::FragmentSpread(_) => true,
                ast::Selection::InlineFragment(inline) => inline.type_condition.is_some(),
            })
    }

    /// Whether some included selection applies to `object_type_name`: a
    /// plain field, or a fragment whose type condition holds. Fields skipped
    /// inside an applying fragment still count as a match.
    pub(crate) fn has_matching_branch(
        &self,
        object_type_name: &str,
        selection_sets: &[&'doc ast::SelectionSet],
    ) -> bool {
        selection_sets.iter()
            .any(|selection_set| self.set_has_matching_branch(object_type_name, selection_set))
    }

    fn set_has_matching_branch(&self, object_type_name: &str, selection_set: &ast::SelectionSet) -> bool {
        selection_set.items.iter()
            .filter(|selection| self.should_include(selection.directives()))
            .any(|selection| match selection {
                ast::Selection::Field(_) => true,
                ast::Selection::FragmentSpread(spread) => {
                    self.fragments.get(&spread.fragment_name).is_some_and(|fragment| {
                        self.type_condition_applies(object_type_name, &fragment.type_condition)
                    })
                },
                ast::Selection::InlineFragment(inline) => match &inline.type_condition {
                    Some(type_condition) => self.type_condition_applies(object_type_name, type_condition),
                    None => self.set_has_matching_branch(object_type_name, &inline.selection_set),
                },
            })
    }

    fn type_condition_applies(&self, object_type_name: &str, type_condition: &str) -> bool {
        type_condition == object_type_name
            || self.schema.is_possible_type(type_condition, object_type_name)
    }

    fn should_include(&self, directives: &[ast::Directive]) -> bool {
        for directive in directives {
            let condition = self.condition_of(directive);
            match directive.name.as_str() {
                "skip" if condition => return false,
                "include" if !condition => return false,
                _ => {},
            }
        }
        true
    }

    /// The `if:` argument of `@skip`/`@include`. An unbound variable reads
    /// as `false`.
    fn condition_of(&self, directive: &ast::Directive) -> bool {
        match directive.argument("if").map(|arg| &arg.value) {
            Some(ast::Value::Boolean(value)) => *value,
            Some(ast::Value::Variable(name)) => {
                self.variables.get(name).and_then(Value::as_bool).unwrap_or(false)
            },
            _ => false,
        }
    }
}
