use crate::ast::Argument;
use crate::ast::Directive;
use crate::ast::Pos;

#[derive(Clone, Debug, PartialEq)]
pub struct SelectionSet {
    /// Position of the opening `{`.
    pub position: Pos,
    pub items: Vec<Selection>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Selection {
    Field(Field),
    FragmentSpread(FragmentSpread),
    InlineFragment(InlineFragment),
}

impl Selection {
    pub fn position(&self) -> Pos {
        match self {
            Selection::Field(field) => field.position,
            Selection::FragmentSpread(spread) => spread.position,
            Selection::InlineFragment(inline) => inline.position,
        }
    }

    pub fn directives(&self) -> &[Directive] {
        match self {
            Selection::Field(field) => &field.directives,
            Selection::FragmentSpread(spread) => &spread.directives,
            Selection::InlineFragment(inline) => &inline.directives,
        }
    }
}

/// `alias: name(args) @dir { ... }`
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    pub position: Pos,
    pub alias: Option<String>,
    pub name: String,
    pub arguments: Vec<Argument>,
    pub directives: Vec<Directive>,
    pub selection_set: Option<SelectionSet>,
}

impl Field {
    /// The key this field's value is stored under in the response: the
    /// alias if present, else the field name.
    pub fn response_key(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }

    pub fn argument(&self, name: &str) -> Option<&Argument> {
        self.arguments.iter().find(|arg| arg.name == name)
    }
}

/// `...Name @dir`
#[derive(Clone, Debug, PartialEq)]
pub struct FragmentSpread {
    pub position: Pos,
    pub fragment_name: String,
    pub directives: Vec<Directive>,
}

/// `... on Type @dir { ... }` (the type condition is optional)
#[derive(Clone, Debug, PartialEq)]
pub struct InlineFragment {
    pub position: Pos,
    pub type_condition: Option<String>,
    pub directives: Vec<Directive>,
    pub selection_set: SelectionSet,
}
