use crate::loc;
use crate::types::Field;
use indexmap::IndexMap;

#[derive(Clone, Debug, PartialEq)]
pub struct InterfaceType {
    pub(crate) def_location: loc::FilePosition,
    pub(crate) description: Option<String>,
    pub(crate) fields: IndexMap<String, Field>,
    pub(crate) interfaces: Vec<String>,
    pub(crate) name: String,
}
impl InterfaceType {
    pub fn def_location(&self) -> &loc::FilePosition {
        &self.def_location
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> &IndexMap<String, Field> {
        &self.fields
    }

    /// Interfaces this interface itself implements.
    pub fn interfaces(&self) -> &[String] {
        &self.interfaces
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}
