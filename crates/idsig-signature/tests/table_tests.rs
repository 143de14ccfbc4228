use super::*;
use idsig_common::{FqName, Visibility};
use idsig_tree::{ClassKind, DeclArena, Declaration, StructuralType};

fn module() -> (DeclArena, Parent, DeclId) {
    let mut arena = DeclArena::new();
    let lang = Parent::Package(arena.add_fragment("lang", "<stdlib>"));
    let int = arena.alloc(Declaration::class("Int", lang));
    let pkg = Parent::Package(arena.add_fragment("org.sample", "<main>"));
    (arena, pkg, int)
}

#[test]
fn test_public_declarations_get_public_signatures() {
    let (mut arena, pkg, int) = module();
    let class = arena.alloc(Declaration::class("Box", pkg));
    let f = arena.alloc(
        Declaration::function("f", Parent::Declaration(class))
            .with_return_type(StructuralType::class(int)),
    );

    let mut table = SignatureTable::new(Mangler::new(&arena), 0);
    let class_sig = table.signature_of(class).expect("class");
    let f_sig = table.signature_of(f).expect("f");

    assert_eq!(class_sig, Signature::public("org.sample", "Box", None, 0));
    assert!(f_sig.is_public());
    assert!(f_sig.hash_id().is_some());
    assert_eq!(table.local_index(), 0);
    assert_eq!(table.declaration_of(&f_sig), Some(f));
}

#[test]
fn test_private_fields_share_container_with_increasing_ids() {
    let (mut arena, pkg, int) = module();
    let class = arena.alloc(Declaration::class("Box", pkg));
    let fields: Vec<DeclId> = ["a", "b", "c"]
        .into_iter()
        .map(|name| {
            arena.alloc(
                Declaration::field(name, Parent::Declaration(class), StructuralType::class(int))
                    .with_visibility(Visibility::Private),
            )
        })
        .collect();

    let mut table = SignatureTable::new(Mangler::new(&arena), 100);
    let class_sig = table.signature_of(class).expect("class");
    let mut ids = Vec::new();
    for &field in &fields {
        match table.signature_of(field).expect("field") {
            Signature::FileLocal {
                container,
                local_id,
            } => {
                assert_eq!(*container, class_sig);
                ids.push(local_id);
            }
            other => panic!("expected file-local, got {other}"),
        }
    }

    assert_eq!(ids, vec![101, 102, 103]);
    assert_eq!(table.local_index(), 103);
}

#[test]
fn test_signatures_are_memoized() {
    let (mut arena, pkg, _) = module();
    let helper = arena.alloc(Declaration::function("helper", pkg).with_visibility(Visibility::Private));

    let mut table = SignatureTable::new(Mangler::new(&arena), 0);
    let first = table.signature_of(helper).expect("first");
    let second = table.signature_of(helper).expect("second");

    assert_eq!(first, second);
    assert_eq!(table.local_index(), 1);
    assert_eq!(table.len(), 1);
}

#[test]
fn test_private_top_level_nests_under_package() {
    let (mut arena, pkg, _) = module();
    let helper = arena.alloc(Declaration::function("helper", pkg).with_visibility(Visibility::Private));

    let mut table = SignatureTable::new(Mangler::new(&arena), 0);
    let signature = table.signature_of(helper).expect("helper");

    assert_eq!(
        signature,
        Signature::file_local(
            Signature::Public(PublicSignature::package(FqName::new("org.sample"))),
            1
        )
    );
    assert_eq!(signature.top_level_signature(), signature);
}

#[test]
fn test_member_of_private_class_nests_under_local_class() {
    let (mut arena, pkg, _) = module();
    let secret = arena.alloc(Declaration::class("Secret", pkg).with_visibility(Visibility::Private));
    let run = arena.alloc(Declaration::function("run", Parent::Declaration(secret)));

    let mut table = SignatureTable::new(Mangler::new(&arena), 0);
    assert!(!table.is_exported(run));
    let run_sig = table.signature_of(run).expect("run");
    let secret_sig = table.signature_of(secret).expect("secret");

    assert!(secret_sig.is_local());
    assert_eq!(run_sig, Signature::file_local(secret_sig.clone(), 2));
    // The container was assigned first.
    assert_eq!(
        secret_sig,
        Signature::file_local(
            Signature::Public(PublicSignature::package(FqName::new("org.sample"))),
            1
        )
    );
}

#[test]
fn test_private_accessor_and_backing_field_nest_under_property() {
    let (mut arena, pkg, int) = module();
    let class = arena.alloc(Declaration::class("Box", pkg));
    let count = arena.alloc(Declaration::property(
        "count",
        Parent::Declaration(class),
        StructuralType::class(int),
    ));
    let setter = arena.add_setter(count);
    if let Some(decl) = arena.get_mut(setter) {
        decl.visibility = Visibility::Private;
    }
    let field = arena.alloc(
        Declaration::field("count", Parent::Declaration(class), StructuralType::class(int))
            .with_visibility(Visibility::Private)
            .with_corresponding_property(count),
    );

    let mut table = SignatureTable::new(Mangler::new(&arena), 0);
    let property_sig = table.signature_of(count).expect("property");
    let setter_sig = table.signature_of(setter).expect("setter");
    let field_sig = table.signature_of(field).expect("field");

    assert_eq!(setter_sig, Signature::file_local(property_sig.clone(), 1));
    assert_eq!(field_sig, Signature::file_local(property_sig, 2));
}

#[test]
fn test_public_accessor_gets_accessor_signature() {
    let (mut arena, pkg, int) = module();
    let class = arena.alloc(Declaration::class("Box", pkg));
    let count = arena.alloc(Declaration::property(
        "count",
        Parent::Declaration(class),
        StructuralType::class(int),
    ));
    let getter = arena.add_getter(count);

    let mut table = SignatureTable::new(Mangler::new(&arena), 0);
    let signature = table.public_signature(getter).expect("getter");
    assert!(matches!(signature, Signature::Accessor { .. }));
    assert_eq!(table.declaration_of(&signature), Some(getter));
}

#[test]
fn test_assertions() {
    let (mut arena, pkg, _) = module();
    let public = arena.alloc(Declaration::function("api", pkg));
    let private = arena.alloc(Declaration::function("impl", pkg).with_visibility(Visibility::Private));

    let mut table = SignatureTable::new(Mangler::new(&arena), 0);
    assert!(table.assert_public(public).is_ok());
    assert!(table.assert_file_local(private).is_ok());
    assert!(matches!(
        table.assert_public(private),
        Err(SignatureError::NotExported { .. })
    ));
    assert!(matches!(
        table.file_local_signature(public),
        Err(SignatureError::UnexpectedlyExported { .. })
    ));
    assert!(table.is_empty());
}

#[test]
fn test_builtins_are_preloaded() {
    let (mut arena, pkg, _) = module();
    let intrinsic = arena.alloc(Declaration::function("less", pkg).with_visibility(Visibility::Private));

    let mut builtins = BuiltinRegistry::new();
    builtins.register(intrinsic, "kfun:less", 3);
    let mut table = SignatureTable::with_builtins(Mangler::new(&arena), 0, builtins);

    assert_eq!(table.len(), 1);
    assert!(table.assert_public(intrinsic).is_ok());
    assert_eq!(
        table.signature_of(intrinsic).expect("builtin"),
        Signature::built_in("kfun:less", 3)
    );
    assert_eq!(table.declaration_of(&Signature::built_in("", 3)), Some(intrinsic));
    assert_eq!(table.local_index(), 0);
}

#[test]
fn test_fake_override_shares_the_original_signature() {
    let (mut arena, pkg, int) = module();
    let base = arena.alloc(Declaration::class("Base", pkg));
    let size = arena.alloc(
        Declaration::function("size", Parent::Declaration(base))
            .with_return_type(StructuralType::class(int)),
    );
    let derived = arena.alloc(Declaration::class("Derived", pkg));
    let fake = arena.alloc(
        Declaration::function("size", Parent::Declaration(derived))
            .with_return_type(StructuralType::class(int))
            .with_fake_override_of(size),
    );

    let mut table = SignatureTable::new(Mangler::new(&arena), 0);
    assert_eq!(
        table.signature_of(fake).expect("fake"),
        table.signature_of(size).expect("size")
    );
    assert!(table.clashes().is_empty());
}

#[test]
fn test_clashes_are_recorded() {
    let (mut arena, pkg, _) = module();
    // Two fragments of the same package declaring the same function.
    let other = Parent::Package(arena.add_fragment("org.sample", "<main>"));
    let first = arena.alloc(Declaration::function("dup", pkg));
    let second = arena.alloc(Declaration::function("dup", other));

    let mut table = SignatureTable::new(Mangler::new(&arena), 0);
    let a = table.signature_of(first).expect("first");
    let b = table.signature_of(second).expect("second");

    assert_eq!(a, b);
    let clashes = table.clashes();
    assert_eq!(clashes.len(), 1);
    assert_eq!(clashes[0].first, first);
    assert_eq!(clashes[0].second, second);
    assert_eq!(clashes[0].first_mangle, clashes[0].second_mangle);
    assert_eq!(table.declaration_of(&a), Some(first));
}

#[test]
fn test_entries_follow_assignment_order() {
    let (mut arena, pkg, _) = module();
    let secret = arena.alloc(
        Declaration::class_of_kind(ClassKind::Object, "Secret", pkg)
            .with_visibility(Visibility::Private),
    );
    let run = arena.alloc(Declaration::function("run", Parent::Declaration(secret)));

    let mut table = SignatureTable::new(Mangler::new(&arena), 0);
    table.signature_of(run).expect("run");

    let order: Vec<DeclId> = table.entries().map(|(decl, _)| decl).collect();
    assert_eq!(order, vec![secret, run]);
}

#[test]
fn test_body_local_declarations_are_file_local() {
    let (mut arena, pkg, int) = module();
    let f = arena.alloc(Declaration::function("f", pkg));
    let x = arena.alloc(Declaration::variable("x", f, StructuralType::class(int)));

    let mut table = SignatureTable::new(Mangler::new(&arena), 0);
    let f_sig = table.signature_of(f).expect("f");
    assert_eq!(
        table.signature_of(x).expect("x"),
        Signature::file_local(f_sig, 1)
    );
}
