//! Mangling and signature assignment benchmarks.
//!
//! Builds a synthetic module of generic classes with overloaded members and
//! private helpers, then measures full mangles and a fresh signature table
//! over every declaration.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use idsig::tree::{ClassKind, TypeArgument};
use idsig::{
    DeclArena, DeclId, Declaration, Mangler, Parent, SignatureTable, StructuralType, Visibility,
};

/// Module with `classes` classes, each holding `members` overloaded
/// functions, a property and a private field.
fn synthetic_module(classes: usize, members: usize) -> (DeclArena, Vec<DeclId>) {
    let mut arena = DeclArena::new();
    let lang = Parent::Package(arena.add_fragment("lang", "<stdlib>"));
    arena.alloc(Declaration::class_of_kind(ClassKind::Object, "Unit", lang));
    let int = arena.alloc(Declaration::class("Int", lang));
    let list = arena.alloc(Declaration::class("List", lang));
    arena.alloc(Declaration::type_parameter("E", list));

    let pkg = Parent::Package(arena.add_fragment("org.bench", "<bench>"));
    for c in 0..classes {
        let class = arena.alloc(Declaration::class(format!("C{c}"), pkg));
        let t = arena.alloc(Declaration::type_parameter("T", class));
        for m in 0..members {
            let f = arena.alloc(
                Declaration::function("run", Parent::Declaration(class))
                    .with_visibility(if m % 3 == 0 { Visibility::Internal } else { Visibility::Public })
                    .with_return_type(StructuralType::generic(
                        list,
                        vec![TypeArgument::covariant(StructuralType::type_parameter(t))],
                    )),
            );
            let u = arena.alloc(
                Declaration::type_parameter("U", f)
                    .with_super_types(vec![StructuralType::class(int)]),
            );
            for p in 0..=m % 4 {
                let ty = if p % 2 == 0 {
                    StructuralType::type_parameter(u)
                } else {
                    StructuralType::class(int).nullable()
                };
                arena.alloc(Declaration::value_parameter(format!("p{p}"), f, ty));
            }
        }
        let value = arena.alloc(Declaration::property(
            "value",
            Parent::Declaration(class),
            StructuralType::type_parameter(t),
        ));
        arena.add_getter(value);
        arena.alloc(
            Declaration::field("value", Parent::Declaration(class), StructuralType::type_parameter(t))
                .with_visibility(Visibility::Private)
                .with_corresponding_property(value),
        );
    }

    let roots = arena
        .iter()
        .filter(|(_, decl)| !decl.kind.is_body_local())
        .map(|(id, _)| id)
        .collect();
    (arena, roots)
}

fn bench_mangle(c: &mut Criterion) {
    let mut group = c.benchmark_group("mangle");
    for classes in [10, 100] {
        let (arena, roots) = synthetic_module(classes, 8);
        group.bench_with_input(BenchmarkId::new("full", classes), &roots, |b, roots| {
            let mangler = Mangler::new(&arena);
            b.iter(|| {
                for &id in roots {
                    black_box(mangler.mangle(id).ok());
                }
            });
        });
        group.bench_with_input(BenchmarkId::new("hashed", classes), &roots, |b, roots| {
            let mangler = Mangler::new(&arena);
            b.iter(|| {
                for &id in roots {
                    black_box(mangler.hashed_mangle(id).ok());
                }
            });
        });
    }
    group.finish();
}

fn bench_signature_table(c: &mut Criterion) {
    let mut group = c.benchmark_group("signature_table");
    for classes in [10, 100] {
        let (arena, roots) = synthetic_module(classes, 8);
        group.bench_with_input(BenchmarkId::new("assign_all", classes), &roots, |b, roots| {
            b.iter(|| {
                let mut table = SignatureTable::new(Mangler::new(&arena), 0);
                for &id in roots {
                    black_box(table.signature_of(id).ok());
                }
                black_box(table.local_index())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_mangle, bench_signature_table);
criterion_main!(benches);
