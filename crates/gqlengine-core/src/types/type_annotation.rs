use crate::types::ListTypeAnnotation;
use crate::types::NamedTypeAnnotation;
use gqlengine_parser::ast;
use std::fmt;

/// The declared type of a [`Field`](crate::types::Field),
/// [`Parameter`](crate::types::Parameter) or operation variable.
///
/// Non-null wrapping is folded into a `nullable` flag on each level rather
/// than being a level of its own, so `[Int!]!` is a non-nullable list of
/// non-nullable `Int`s.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum TypeAnnotation {
    List(ListTypeAnnotation),
    Named(NamedTypeAnnotation),
}
impl TypeAnnotation {
    pub fn named(type_name: impl Into<String>, nullable: bool) -> Self {
        Self::Named(NamedTypeAnnotation {
            nullable,
            type_name: type_name.into(),
        })
    }

    pub fn list(inner_type: TypeAnnotation, nullable: bool) -> Self {
        Self::List(ListTypeAnnotation {
            inner_type: Box::new(inner_type),
            nullable,
        })
    }

    pub fn from_ast_type(ast_type: &ast::Type) -> Self {
        Self::from_ast_type_impl(ast_type, /* nullable = */ true)
    }

    fn from_ast_type_impl(ast_type: &ast::Type, nullable: bool) -> Self {
        match ast_type {
            ast::Type::List(inner) =>
                Self::list(Self::from_ast_type_impl(inner, true), nullable),
            ast::Type::Named(name) => Self::named(name.as_str(), nullable),
            ast::Type::NonNull(inner) => Self::from_ast_type_impl(inner, false),
        }
    }

    pub fn as_list_annotation(&self) -> Option<&ListTypeAnnotation> {
        if let Self::List(annot) = self {
            Some(annot)
        } else {
            None
        }
    }

    pub fn as_named_annotation(&self) -> Option<&NamedTypeAnnotation> {
        if let Self::Named(annot) = self {
            Some(annot)
        } else {
            None
        }
    }

    /// The same annotation with the outermost level made nullable.
    pub fn as_nullable(&self) -> TypeAnnotation {
        let mut annot = self.clone();
        match &mut annot {
            Self::List(list) => list.nullable = true,
            Self::Named(named) => named.nullable = true,
        }
        annot
    }

    /// The name of the type at the core of all list wrapping.
    pub fn innermost_type_name(&self) -> &str {
        match self {
            Self::List(list) => list.inner_type.innermost_type_name(),
            Self::Named(named) => &named.type_name,
        }
    }

    pub fn nullable(&self) -> bool {
        match self {
            Self::List(list) => list.nullable,
            Self::Named(named) => named.nullable,
        }
    }

    /// Whether a field of type `self` may stand in for a field of type
    /// `other` when implementing an interface.
    ///
    /// `is_subtype(sub, sup)` answers whether the named type `sub` is an
    /// object/interface that is a possible type of `sup`.
    pub(crate) fn is_covariant_with(
        &self,
        other: &TypeAnnotation,
        is_subtype: &dyn Fn(&str, &str) -> bool,
    ) -> bool {
        if !other.nullable() && self.nullable() {
            return false;
        }
        match (self, other) {
            (Self::List(this), Self::List(that)) =>
                this.inner_type.is_covariant_with(&that.inner_type, is_subtype),
            (Self::Named(this), Self::Named(that)) =>
                this.type_name == that.type_name
                    || is_subtype(&this.type_name, &that.type_name),
            _ => false,
        }
    }

    /// Whether a variable declared as `self` may be used where `location`
    /// is expected.
    ///
    /// `location_has_default` relaxes a non-null location to accept a
    /// nullable variable, as does a non-null default on the variable itself
    /// (passed as `variable_has_default`).
    pub(crate) fn can_flow_into(
        &self,
        location: &TypeAnnotation,
        variable_has_default: bool,
        location_has_default: bool,
    ) -> bool {
        if !location.nullable() && self.nullable() {
            if !variable_has_default && !location_has_default {
                return false;
            }
            return self.is_compatible_with(&location.as_nullable());
        }
        self.is_compatible_with(location)
    }

    fn is_compatible_with(&self, location: &TypeAnnotation) -> bool {
        if !location.nullable() {
            if self.nullable() {
                return false;
            }
            return self.as_nullable().is_compatible_with(&location.as_nullable());
        }
        if !self.nullable() {
            return self.as_nullable().is_compatible_with(location);
        }
        match (self, location) {
            (Self::List(this), Self::List(that)) =>
                this.inner_type.is_compatible_with(&that.inner_type),
            (Self::Named(this), Self::Named(that)) => this.type_name == that.type_name,
            _ => false,
        }
    }
}
impl fmt::Display for TypeAnnotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List(list) => write!(f, "[{}]", list.inner_type)?,
            Self::Named(named) => f.write_str(&named.type_name)?,
        }
        if !self.nullable() {
            f.write_str("!")?;
        }
        Ok(())
    }
}
