use crate::operation::FragmentTable;
use gqlengine_parser::ast;
use gqlengine_parser::parse_executable;

fn parse(source: &str) -> ast::Document {
    parse_executable(source).into_valid_ast().unwrap()
}

#[test]
fn fragments_are_looked_up_by_name() {
    let document = parse(concat!(
        "{ user { ...UserFields } }\n",
        "fragment UserFields on User { id ...Names }\n",
        "fragment Names on User { name }\n",
    ));
    let table = FragmentTable::from_document(&document);

    assert_eq!(table.len(), 2);
    assert_eq!(table.get("UserFields").unwrap().type_condition, "User");
    assert!(table.contains("Names"));
    assert!(table.get("Missing").is_none());

    let names: Vec<&str> = table.iter().map(|frag| frag.name.as_str()).collect();
    assert_eq!(names, vec!["UserFields", "Names"]);
}

#[test]
fn first_definition_of_a_name_wins() {
    let document = parse(concat!(
        "{ user { ...F } }\n",
        "fragment F on User { id }\n",
        "fragment F on Bot { name }\n",
    ));
    let table = FragmentTable::from_document(&document);

    assert_eq!(table.len(), 1);
    assert_eq!(table.get("F").unwrap().type_condition, "User");
}

#[test]
fn documents_without_fragments_give_an_empty_table() {
    let document = parse("{ ping }");
    assert!(FragmentTable::from_document(&document).is_empty());
}
