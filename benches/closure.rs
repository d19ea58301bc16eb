use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use dtogen::graph::{GraphExpander, ModelSet, TypeGraph};
use dtogen::model::{
    MetadataModel, MethodDef, ModuleDef, ParameterDef, PropertyDef, TypeDef, TypeId,
};

/// `width` chains of `depth` types each; every type references the next in its
/// chain, the previous chain's type at the same depth and a shared base.
fn synthetic_model(width: usize, depth: usize) -> MetadataModel {
    let name = |chain: usize, level: usize| format!("Bench.Chain{chain}.Node{level}");
    let mut types = vec![TypeDef {
        name: "Bench.Base".to_string(),
        ..Default::default()
    }];
    for chain in 0..width {
        for level in 0..depth {
            let mut properties = vec![PropertyDef {
                name: "Id".to_string(),
                ty: "int".to_string(),
            }];
            if level + 1 < depth {
                properties.push(PropertyDef {
                    name: "Next".to_string(),
                    ty: format!("List<{}>", name(chain, level + 1)),
                });
            }
            if chain > 0 {
                properties.push(PropertyDef {
                    name: "Sibling".to_string(),
                    ty: name(chain - 1, level),
                });
            }
            types.push(TypeDef {
                name: name(chain, level),
                base: Some("Bench.Base".to_string()),
                properties,
                ..Default::default()
            });
        }
    }
    types.push(TypeDef {
        name: "Bench.RootController".to_string(),
        base: Some("ApiController".to_string()),
        methods: (0..width)
            .map(|chain| MethodDef {
                name: format!("GetChain{chain}"),
                returns: Some(name(chain, 0)),
                parameters: vec![ParameterDef {
                    name: "id".to_string(),
                    ty: "int".to_string(),
                }],
                ..Default::default()
            })
            .collect(),
        ..Default::default()
    });
    MetadataModel::from_modules([ModuleDef {
        name: "Bench".to_string(),
        references: Vec::new(),
        types,
    }])
}

fn bench_closure(c: &mut Criterion) {
    let mut group = c.benchmark_group("closure");
    for (width, depth) in [(4, 8), (16, 16), (32, 32)] {
        let model = synthetic_model(width, depth);
        let seed: ModelSet = [TypeId::new("Bench", "Bench.Chain0.Node0")].into_iter().collect();
        let label = format!("{width}x{depth}");

        group.bench_with_input(BenchmarkId::new("expand", &label), &seed, |b, seed| {
            let expander = GraphExpander::new(&model);
            b.iter(|| black_box(expander.expand(black_box(seed))))
        });
        group.bench_with_input(BenchmarkId::new("type_graph", &label), &model, |b, model| {
            b.iter(|| black_box(TypeGraph::build(model, &[])))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_closure);
criterion_main!(benches);
