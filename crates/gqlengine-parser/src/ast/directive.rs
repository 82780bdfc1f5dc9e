use crate::ast::Pos;
use crate::ast::Value;

/// `name: value`
#[derive(Clone, Debug, PartialEq)]
pub struct Argument {
    pub position: Pos,
    pub name: String,
    pub value: Value,
}

/// `@name(args)`
#[derive(Clone, Debug, PartialEq)]
pub struct Directive {
    pub position: Pos,
    pub name: String,
    pub arguments: Vec<Argument>,
}

impl Directive {
    pub fn argument(&self, name: &str) -> Option<&Argument> {
        self.arguments.iter().find(|arg| arg.name == name)
    }
}
