#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;

fn class(name: &str) -> TypeDef {
    TypeDef {
        name: name.to_string(),
        ..Default::default()
    }
}

fn derived(name: &str, base: &str) -> TypeDef {
    TypeDef {
        base: Some(base.to_string()),
        ..class(name)
    }
}

fn module(name: &str, references: &[&str], types: Vec<TypeDef>) -> ModuleDef {
    ModuleDef {
        name: name.to_string(),
        references: references.iter().map(|r| r.to_string()).collect(),
        types,
    }
}

fn id(module: &str, name: &str) -> TypeId {
    TypeId::new(module, name)
}

#[test]
fn test_declared_name_in_context_module_wins() {
    // A user type named like a primitive alias shadows the alias in its own module.
    let model = MetadataModel::from_modules([module(
        "Acme.Contracts",
        &[],
        vec![class("Guid"), class("Acme.Contracts.Order")],
    )]);
    let ctx = id("Acme.Contracts", "Acme.Contracts.Order");
    assert_eq!(
        model.resolve_str("Guid", &ctx).unwrap(),
        TypeDescriptor::Declared(id("Acme.Contracts", "Guid"))
    );
    assert_eq!(
        model.resolve_str("System.Guid", &ctx).unwrap(),
        TypeDescriptor::Primitive(Primitive::Guid)
    );
}

#[test]
fn test_referenced_modules_resolve_before_unrelated_ones() {
    let model = MetadataModel::from_modules([
        module("Other", &[], vec![class("Shared.Money")]),
        module("Acme.Contracts", &[], vec![class("Shared.Money")]),
        module("Acme.Api", &["Acme.Contracts"], vec![class("Acme.Api.Controller")]),
    ]);
    let ctx = id("Acme.Api", "Acme.Api.Controller");
    assert_eq!(
        model.resolve_str("Shared.Money", &ctx).unwrap(),
        TypeDescriptor::Declared(id("Acme.Contracts", "Shared.Money"))
    );
}

#[test]
fn test_simple_name_fallback_requires_a_unique_match() {
    let model = MetadataModel::from_modules([module(
        "M",
        &[],
        vec![class("A.Order"), class("A.Line"), class("B.Line"), class("A.Holder")],
    )]);
    let ctx = id("M", "A.Holder");
    assert_eq!(
        model.resolve_str("Order", &ctx).unwrap(),
        TypeDescriptor::Declared(id("M", "A.Order"))
    );
    assert_eq!(
        model.resolve_str("Line", &ctx).unwrap(),
        TypeDescriptor::Unresolved("Line".to_string())
    );
    assert_eq!(
        model.resolve_str("X.Order", &ctx).unwrap(),
        TypeDescriptor::Unresolved("X.Order".to_string())
    );
}

#[test]
fn test_composite_references_resolve_structurally() {
    let model = MetadataModel::from_modules([module("M", &[], vec![class("Order")])]);
    let ctx = id("M", "Order");
    assert_eq!(
        model.resolve_str("List<Order>[]", &ctx).unwrap(),
        TypeDescriptor::Array(Box::new(TypeDescriptor::Generic {
            definition: "List".to_string(),
            args: vec![TypeDescriptor::Declared(id("M", "Order"))],
        }))
    );
    assert!(matches!(
        model.resolve_str("List<", &ctx),
        Err(ModelError::InvalidTypeRef { .. })
    ));
}

#[test]
fn test_missing_dependency_blocks_enumeration() {
    let model = MetadataModel::from_modules([
        module("Acme.Api", &["Acme.Missing"], vec![class("Acme.Api.A")]),
        module("Acme.Contracts", &[], vec![class("Acme.Contracts.B")]),
    ]);
    assert_eq!(
        model.types_in("Acme.Api"),
        Err(ModelError::MissingDependency {
            module: "Acme.Api".to_string(),
            dependency: "Acme.Missing".to_string(),
        })
    );
    assert_eq!(model.missing_references("Acme.Api"), ["Acme.Missing".to_string()]);
    assert_eq!(
        model.types_in("Acme.Contracts").unwrap(),
        vec![id("Acme.Contracts", "Acme.Contracts.B")]
    );
    assert!(matches!(
        model.types_in("Nope"),
        Err(ModelError::UnknownModule(_))
    ));
}

#[test]
fn test_duplicate_module_is_skipped() {
    let model = MetadataModel::from_modules([
        module("M", &[], vec![class("First")]),
        module("M", &[], vec![class("Second")]),
    ]);
    assert_eq!(model.module_names(), vec!["M"]);
    assert_eq!(model.types_in("M").unwrap(), vec![id("M", "First")]);
}

#[test]
fn test_ancestors_follow_bases_and_interfaces() {
    let model = MetadataModel::from_modules([module(
        "M",
        &[],
        vec![
            class("IEntity"),
            TypeDef {
                interfaces: vec!["IEntity".to_string()],
                ..class("Base")
            },
            derived("Middle", "Base"),
            derived("Leaf", "Middle"),
        ],
    )]);
    let leaf = id("M", "Leaf");
    assert_eq!(
        model.ancestors(&leaf),
        vec![id("M", "Middle"), id("M", "Base"), id("M", "IEntity")]
    );
    assert!(!model.ancestors(&id("M", "Base")).contains(&leaf));
}

#[test]
fn test_cyclic_inheritance_terminates() {
    let model = MetadataModel::from_modules([module(
        "M",
        &[],
        vec![derived("A", "B"), derived("B", "A")],
    )]);
    assert_eq!(model.ancestors(&id("M", "A")), vec![id("M", "B")]);
    assert_eq!(model.ancestors(&id("M", "B")), vec![id("M", "A")]);
}

#[test]
fn test_ignore_marker_matches_exact_name_only() {
    let yaml = r#"
name: M
types:
  - name: Hidden
    annotations: [Dtogen.GenerationIgnore]
  - name: Lookalike
    annotations: [Acme.GenerationIgnore]
"#;
    let def: ModuleDef = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(def.types[0].annotations, vec![Annotation::GenerationIgnore]);
    assert_eq!(
        def.types[1].annotations,
        vec![Annotation::Other("Acme.GenerationIgnore".to_string())]
    );

    let model = MetadataModel::from_modules([def]);
    assert!(model.has_ignore_marker(&id("M", "Hidden")));
    assert!(!model.has_ignore_marker(&id("M", "Lookalike")));
}

#[test]
fn test_methods_default_to_void_and_resolve_parameters() {
    let yaml = r#"
name: M
types:
  - name: Order
  - name: OrdersController
    methods:
      - name: Save
        verb: POST
        parameters:
          - { name: order, type: Order }
      - name: GetOrder
        returns: Order
"#;
    let model = MetadataModel::from_modules([serde_yaml::from_str::<ModuleDef>(yaml).unwrap()]);
    let methods = model.methods(&id("M", "OrdersController")).unwrap();
    assert_eq!(methods.len(), 2);
    assert_eq!(methods[0].returns, TypeDescriptor::Primitive(Primitive::Void));
    assert_eq!(methods[0].verb, Some(HttpVerb::Post));
    assert_eq!(
        methods[0].parameters[0].ty,
        TypeDescriptor::Declared(id("M", "Order"))
    );
    assert_eq!(methods[1].returns, TypeDescriptor::Declared(id("M", "Order")));
}

#[test]
fn test_verb_from_method_name_prefix() {
    assert_eq!(HttpVerb::from_method_name("GetOrders"), Some(HttpVerb::Get));
    assert_eq!(HttpVerb::from_method_name("deleteOrder"), Some(HttpVerb::Delete));
    assert_eq!(HttpVerb::from_method_name("Submit"), None);
    assert_eq!(HttpVerb::from_method_name("Get"), Some(HttpVerb::Get));
    assert_eq!(HttpVerb::from_method_name("Put2"), Some(HttpVerb::Put));
}

#[test]
fn test_verb_prefix_must_end_at_a_word_boundary() {
    assert_eq!(HttpVerb::from_method_name("Getaway"), None);
    assert_eq!(HttpVerb::from_method_name("Putative"), None);
    assert_eq!(HttpVerb::from_method_name("DeletedItems"), None);
    assert_eq!(HttpVerb::from_method_name("Posted"), None);
    assert!(HttpVerb::Put.has_body());
    assert!(!HttpVerb::Get.has_body());
}

#[test]
fn test_load_directory_with_reference_fallback() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("bin")).unwrap();
    std::fs::write(
        dir.path().join("bin").join("Acme.Api.yaml"),
        "name: Acme.Api\nreferences: [Acme.Contracts]\ntypes:\n  - name: Acme.Api.C\n",
    )
    .unwrap();
    std::fs::write(
        dir.path().join("Acme.Contracts.json"),
        r#"{"name":"Acme.Contracts","types":[{"name":"Acme.Contracts.Order"}]}"#,
    )
    .unwrap();
    std::fs::write(dir.path().join("bin").join("broken.yaml"), "name: [").unwrap();

    let model = MetadataModel::load(dir.path(), &["bin/*.yaml".to_string()]).unwrap();
    assert!(model.contains_module("Acme.Api"));
    assert!(model.contains_module("Acme.Contracts"));
    assert!(model.missing_references("Acme.Api").is_empty());
    assert_eq!(
        model.types_in("Acme.Api").unwrap(),
        vec![id("Acme.Api", "Acme.Api.C")]
    );
}

#[test]
fn test_load_rejects_missing_source() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope");
    assert!(MetadataModel::load(&missing, &["*.json".to_string()]).is_err());
}

#[test]
fn test_load_toml_module() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("m.toml");
    std::fs::write(
        &path,
        "name = \"M\"\n\n[[types]]\nname = \"Color\"\nkind = \"enum\"\nvalues = [{ name = \"Red\", value = 1 }]\n",
    )
    .unwrap();
    let def = load_module_file(&path).unwrap();
    assert_eq!(def.types[0].kind, TypeKind::Enum);
    assert_eq!(def.types[0].values[0].value, 1);
}
