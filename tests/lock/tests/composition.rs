//! Schema composition and schema validation through the loader-facing
//! builder.

use relplan_kernel::carrier::relation::Variable;
use relplan_kernel::carrier::symbol::SymbolTable;
use relplan_kernel::operators::compose::SchemaBuilder;
use relplan_kernel::operators::library::SchemaLibrary;
use relplan_kernel::KernelError;

fn library_with_helpers(table: &mut SymbolTable) -> SchemaLibrary {
    let mut library = SchemaLibrary::new();
    library
        .insert_helper(
            SchemaBuilder::new("leave", &["who", "where"], table)
                .precondition("who", "at", "where")
                .negative_effect("who", "at", "where")
                .build()
                .unwrap(),
        )
        .unwrap();
    library
        .insert_helper(
            SchemaBuilder::new("enter", &["who", "where"], table)
                .negative_precondition("where", "is", "locked")
                .effect("who", "at", "where")
                .build()
                .unwrap(),
        )
        .unwrap();
    library
}

#[test]
fn included_templates_are_rebound_to_caller_parameters() {
    let mut table = SymbolTable::new();
    let library = library_with_helpers(&mut table);
    let walk = SchemaBuilder::new("walk", &["person", "from", "to"], &mut table)
        .include(&library, "leave", &["person", "from"])
        .include(&library, "enter", &["person", "to"])
        .build()
        .unwrap();

    let rendered = |ts: &[relplan_kernel::carrier::relation::RelationTemplate]| -> Vec<String> {
        ts.iter().map(|t| t.render(&table)).collect()
    };
    assert_eq!(rendered(walk.pos_pre()), ["(?person at ?from)"]);
    assert_eq!(rendered(walk.neg_pre()), ["not (?to is locked)"]);
    assert_eq!(rendered(walk.pos_eff()), ["(?person at ?to)"]);
    assert_eq!(rendered(walk.neg_eff()), ["not (?person at ?from)"]);
}

#[test]
fn literal_call_argument_is_interned() {
    let mut table = SymbolTable::new();
    let library = library_with_helpers(&mut table);
    let go_home = SchemaBuilder::new("go_home", &["person", "from"], &mut table)
        .include(&library, "leave", &["person", "from"])
        .include(&library, "enter", &["person", "home"])
        .build()
        .unwrap();
    let home = table.require("home").unwrap();
    let effect = &go_home.pos_eff()[0];
    assert_eq!(effect.b, Variable::Bound(home));
    assert_eq!(go_home.arity(), 2);
}

#[test]
fn unknown_dependent_schema_is_named() {
    let mut table = SymbolTable::new();
    let library = library_with_helpers(&mut table);
    let err = SchemaBuilder::new("fly", &["who"], &mut table)
        .include(&library, "takeoff", &["who"])
        .build()
        .unwrap_err();
    match err {
        KernelError::UnknownDependentSchema { name } => assert_eq!(name, "takeoff"),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn include_arity_is_checked() {
    let mut table = SymbolTable::new();
    let library = library_with_helpers(&mut table);
    let err = SchemaBuilder::new("wander", &["who"], &mut table)
        .include(&library, "leave", &["who"])
        .build()
        .unwrap_err();
    assert!(matches!(
        err,
        KernelError::ArityMismatch { expected: 2, actual: 1, .. }
    ));
}

#[test]
fn duplicate_parameter_names_are_malformed() {
    let mut table = SymbolTable::new();
    let err = SchemaBuilder::new("twice", &["x", "x"], &mut table)
        .precondition("x", "at", "x")
        .build()
        .unwrap_err();
    assert!(matches!(err, KernelError::MalformedSchema { .. }));
}

#[test]
fn helpers_are_composable_but_not_searchable() {
    let mut table = SymbolTable::new();
    let mut library = library_with_helpers(&mut table);
    let walk = SchemaBuilder::new("walk", &["person", "from", "to"], &mut table)
        .include(&library, "leave", &["person", "from"])
        .include(&library, "enter", &["person", "to"])
        .build()
        .unwrap();
    library.insert(walk).unwrap();
    let names: Vec<String> = library.searchable().iter().map(|s| s.name().to_string()).collect();
    assert_eq!(names, ["walk"]);
    assert_eq!(library.len(), 3);
    assert!(matches!(
        library.insert_helper(
            SchemaBuilder::new("walk", &["x"], &mut table)
                .precondition("x", "at", "x")
                .build()
                .unwrap()
        ),
        Err(KernelError::DuplicateSchema { .. })
    ));
}
