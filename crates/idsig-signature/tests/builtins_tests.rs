use super::*;

#[test]
fn test_register_with_fixed_id() {
    let mut registry = BuiltinRegistry::new();
    assert!(registry.register(DeclId(4), "kfun:less", 1).is_none());
    let replaced = registry.register(DeclId(4), "kfun:less", 2);

    assert_eq!(replaced, Some(Signature::built_in("kfun:less", 1)));
    assert_eq!(registry.get(DeclId(4)), Some(&Signature::built_in("kfun:less", 2)));
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_register_mangle_derives_a_stable_id() {
    let mut a = BuiltinRegistry::new();
    let mut b = BuiltinRegistry::new();
    let id_a = a.register_mangle(DeclId(0), "kfun:lang.internal.ir#less(lang.Int;lang.Int){}");
    let id_b = b.register_mangle(DeclId(9), "kfun:lang.internal.ir#less(lang.Int;lang.Int){}");

    assert_eq!(id_a, id_b);
    assert!(id_a < 0, "public mangle flag sets the sign bit");
    assert_eq!(id_a, hash_mangle("kfun:lang.internal.ir#less(lang.Int;lang.Int){}"));
}

#[test]
fn test_iteration_follows_registration_order() {
    let mut registry = BuiltinRegistry::new();
    registry.register(DeclId(7), "c", 3);
    registry.register(DeclId(1), "a", 1);
    registry.register(DeclId(4), "b", 2);

    let order: Vec<u32> = registry.iter().map(|(decl, _)| decl.0).collect();
    assert_eq!(order, vec![7, 1, 4]);
    assert!(registry.contains(DeclId(1)));
    assert!(!registry.contains(DeclId(2)));
}
