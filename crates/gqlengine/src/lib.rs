pub use gqlengine_core::*;

/// Lexing, parsing and printing of GraphQL documents.
pub mod parser {
    pub use gqlengine_parser::*;
}

#[cfg(test)]
mod tests;
