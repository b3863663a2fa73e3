use criterion::{black_box, criterion_group, criterion_main, Criterion};
use permtree_assoc::AssociationResolver;
use permtree_types::Permission;

/// 20 sections x 10 pages x 5 apis, a third of the apis needing the heuristic tier.
fn large_catalog() -> Vec<Permission> {
    let mut catalog = Vec::new();
    let mut next_id = 0u64;
    for section in 0..20 {
        next_id += 1;
        catalog.push(Permission::menu(next_id, format!("menu:s{section}")));
        for page in 0..10 {
            next_id += 1;
            catalog.push(Permission::menu(next_id, format!("menu:s{section}:p{page}")));
            for op in 0..5 {
                next_id += 1;
                let code = if op % 3 == 0 {
                    format!("api:v2:s{section}:p{page}:op{op}")
                } else {
                    format!("api:s{section}:p{page}:op{op}")
                };
                catalog.push(Permission::api(next_id, code));
            }
        }
    }
    catalog
}

fn bench_resolve(c: &mut Criterion) {
    let catalog = large_catalog();
    let resolver = AssociationResolver::default();
    c.bench_function("resolve_1220_records", |b| {
        b.iter(|| resolver.resolve(black_box(&catalog)))
    });
}

criterion_group!(benches, bench_resolve);
criterion_main!(benches);
