use crate::ast::Directive;
use crate::ast::Pos;
use crate::ast::SelectionSet;
use crate::ast::Type;
use crate::ast::Value;
use std::fmt;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum OperationKind {
    Query,
    Mutation,
    Subscription,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Query => "query",
            OperationKind::Mutation => "mutation",
            OperationKind::Subscription => "subscription",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `query Name($v: T) @dir { ... }`, or the shorthand `{ ... }` (an
/// anonymous query).
#[derive(Clone, Debug, PartialEq)]
pub struct OperationDefinition {
    pub position: Pos,
    pub kind: OperationKind,
    pub name: Option<String>,
    pub variable_definitions: Vec<VariableDefinition>,
    pub directives: Vec<Directive>,
    pub selection_set: SelectionSet,
}

/// `$name: Type = default @dir`
#[derive(Clone, Debug, PartialEq)]
pub struct VariableDefinition {
    pub position: Pos,
    pub name: String,
    pub var_type: Type,
    pub default_value: Option<Value>,
    pub directives: Vec<Directive>,
}

/// `fragment Name on Type @dir { ... }`
#[derive(Clone, Debug, PartialEq)]
pub struct FragmentDefinition {
    pub position: Pos,
    pub name: String,
    pub type_condition: String,
    pub directives: Vec<Directive>,
    pub selection_set: SelectionSet,
}
