//! Cross-crate properties of mangles and signatures.

use idsig::{
    DeclArena, DeclId, Declaration, Mangler, Parent, Signature, SignatureTable, StructuralType,
    Visibility,
};
use idsig::tree::ClassKind;

struct Lang {
    unit: DeclId,
    int: DeclId,
    string: DeclId,
}

fn lang(arena: &mut DeclArena) -> Lang {
    let pkg = Parent::Package(arena.add_fragment("lang", "<stdlib>"));
    Lang {
        unit: arena.alloc(Declaration::class_of_kind(ClassKind::Object, "Unit", pkg)),
        int: arena.alloc(Declaration::class("Int", pkg)),
        string: arena.alloc(Declaration::class("String", pkg)),
    }
}

fn overload(arena: &mut DeclArena, class: DeclId, param: DeclId, ret: DeclId) -> DeclId {
    let f = arena.alloc(
        Declaration::function("f", Parent::Declaration(class))
            .with_return_type(StructuralType::class(ret)),
    );
    arena.alloc(Declaration::value_parameter("x", f, StructuralType::class(param)));
    f
}

#[test]
fn test_mangles_are_deterministic() {
    let mut arena = DeclArena::new();
    let lang = lang(&mut arena);
    let pkg = Parent::Package(arena.add_fragment("org.sample", "<main>"));
    let class = arena.alloc(Declaration::class("Box", pkg));
    let f = overload(&mut arena, class, lang.int, lang.unit);

    let first = Mangler::new(&arena).mangle(f).expect("mangle");
    let second = Mangler::new(&arena).mangle(f).expect("mangle");
    assert_eq!(first, second);

    let mut one = SignatureTable::new(Mangler::new(&arena), 0);
    let mut other = SignatureTable::new(Mangler::new(&arena), 0);
    assert_eq!(
        one.signature_of(f).expect("signature"),
        other.signature_of(f).expect("signature")
    );
}

#[test]
fn test_overloads_are_discriminated() {
    let mut arena = DeclArena::new();
    let lang = lang(&mut arena);
    let pkg = Parent::Package(arena.add_fragment("org.sample", "<main>"));
    let class = arena.alloc(Declaration::class("Box", pkg));
    let f_int = overload(&mut arena, class, lang.int, lang.unit);
    let f_string = overload(&mut arena, class, lang.string, lang.unit);

    let mut table = SignatureTable::new(Mangler::new(&arena), 0);
    let a = table.signature_of(f_int).expect("f(Int)");
    let b = table.signature_of(f_string).expect("f(String)");

    assert_ne!(a.hash_id(), b.hash_id());
    let (a, b) = (a.as_public().expect("public"), b.as_public().expect("public"));
    assert_eq!(a.declaration_fqn, b.declaration_fqn);
    assert_eq!(a.declaration_fqn.as_str(), "Box.f");
    assert!(table.clashes().is_empty());
}

#[test]
fn test_renaming_a_type_parameter_keeps_the_mangle() {
    let mangle_with = |name: &str| {
        let mut arena = DeclArena::new();
        let pkg = Parent::Package(arena.add_fragment("org.sample", "<main>"));
        let f = arena.alloc(Declaration::function("identity", pkg));
        let t = arena.alloc(Declaration::type_parameter(name, f));
        arena.alloc(Declaration::value_parameter(
            "value",
            f,
            StructuralType::type_parameter(t),
        ));
        if let Some(decl) = arena.get_mut(f) {
            decl.return_type = Some(StructuralType::type_parameter(t));
        }
        Mangler::new(&arena).mangle(f).expect("mangle")
    };

    assert_eq!(mangle_with("T"), mangle_with("U"));
}

#[test]
fn test_renaming_a_type_parameter_keeps_its_signature() {
    let signature_with = |name: &str| {
        let mut arena = DeclArena::new();
        let pkg = Parent::Package(arena.add_fragment("org.sample", "<main>"));
        let class = arena.alloc(Declaration::class("Box", pkg));
        let t = arena.alloc(Declaration::type_parameter(name, class));
        let mut table = SignatureTable::new(Mangler::new(&arena), 0);
        table.signature_of(t).expect("signature")
    };

    let t = signature_with("T");
    let u = signature_with("U");
    assert_eq!(t, u);
    assert_eq!(t.render(), u.render());
    assert!(!t.render().contains("Box.T"));
}

#[test]
fn test_internal_functions_are_salted_with_their_module() {
    let mut arena = DeclArena::new();
    let a = Parent::Package(arena.add_fragment("org.sample", "<A>"));
    let b = Parent::Package(arena.add_fragment("org.sample", "<B>"));
    let helper_a =
        arena.alloc(Declaration::function("helper", a).with_visibility(Visibility::Internal));
    let helper_b =
        arena.alloc(Declaration::function("helper", b).with_visibility(Visibility::Internal));

    let mangler = Mangler::new(&arena);
    let mangle_a = mangler.mangle(helper_a).expect("A");
    let mangle_b = mangler.mangle(helper_b).expect("B");

    assert_eq!(mangle_a, "kfun:org.sample.#helper$A(){}");
    assert_eq!(mangle_b, "kfun:org.sample.#helper$B(){}");
    assert_eq!(mangle_a.replace("$A", "$B"), mangle_b);
}

// Only function names carry the module salt. Internal properties and fields
// of different modules still collide; this pins the current behaviour.
#[test]
fn test_internal_properties_are_not_salted() {
    let mut arena = DeclArena::new();
    let lang = lang(&mut arena);
    let a = Parent::Package(arena.add_fragment("org.sample", "<A>"));
    let b = Parent::Package(arena.add_fragment("org.sample", "<B>"));
    let prop = |arena: &mut DeclArena, parent: Parent| {
        arena.alloc(
            Declaration::property("counter", parent, StructuralType::class(lang.int))
                .with_visibility(Visibility::Internal),
        )
    };
    let counter_a = prop(&mut arena, a);
    let counter_b = prop(&mut arena, b);

    let mangler = Mangler::new(&arena);
    assert_eq!(
        mangler.mangle(counter_a).expect("A"),
        mangler.mangle(counter_b).expect("B")
    );
}

#[test]
fn test_private_fields_share_their_class_container() {
    let mut arena = DeclArena::new();
    let lang = lang(&mut arena);
    let pkg = Parent::Package(arena.add_fragment("org.sample", "<main>"));
    let class = arena.alloc(Declaration::class("Box", pkg));
    let fields: Vec<DeclId> = ["a", "b", "c"]
        .into_iter()
        .map(|name| {
            arena.alloc(
                Declaration::field(name, Parent::Declaration(class), StructuralType::class(lang.int))
                    .with_visibility(Visibility::Private),
            )
        })
        .collect();

    let mut table = SignatureTable::new(Mangler::new(&arena), 0);
    let class_signature = table.signature_of(class).expect("class");
    let mut last = 0;
    for field in fields {
        let Signature::FileLocal {
            container,
            local_id,
        } = table.signature_of(field).expect("field")
        else {
            panic!("private field should be file-local");
        };
        assert_eq!(*container, class_signature);
        assert!(local_id > last);
        last = local_id;
    }
}

#[test]
fn test_members_of_private_classes_propagate_locality() {
    let mut arena = DeclArena::new();
    let pkg = Parent::Package(arena.add_fragment("org.sample", "<main>"));
    let secret = arena.alloc(Declaration::class("Secret", pkg).with_visibility(Visibility::Private));
    let member = arena.alloc(Declaration::function("reveal", Parent::Declaration(secret)));

    let mangler = Mangler::new(&arena);
    assert!(!mangler.is_exported(member));

    let mut table = SignatureTable::new(mangler, 0);
    let member_signature = table.signature_of(member).expect("member");
    let secret_signature = table.signature_of(secret).expect("class");
    let Signature::FileLocal { container, .. } = member_signature else {
        panic!("member of a private class should be file-local");
    };
    assert_eq!(*container, secret_signature);
    assert!(secret_signature.is_local());
}

#[test]
fn test_public_signatures_round_trip_through_render() {
    let mut arena = DeclArena::new();
    let lang = lang(&mut arena);
    let pkg = Parent::Package(arena.add_fragment("org.sample", "<main>"));
    let class = arena.alloc(Declaration::class("Box", pkg).with_expect(true));
    let f = overload(&mut arena, class, lang.string, lang.int);
    let helper = arena.alloc(Declaration::function("helper", pkg).with_visibility(Visibility::Private));

    let mut table = SignatureTable::new(Mangler::new(&arena), 0);
    for id in [class, f, helper] {
        let signature = table.signature_of(id).expect("signature");
        let parsed = Signature::parse(&signature.render()).expect("parse");
        assert_eq!(parsed, signature);
    }
}
