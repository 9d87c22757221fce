use criterion::{criterion_group, criterion_main, Criterion};
use pagerouter::handler::{HandlerRegistry, Page};
use pagerouter::mapping::candidates;
use pagerouter::resources::StaticResources;
use pagerouter::{Mode, ResolutionCache, Settings};
use std::hint::black_box;
use std::sync::Arc;

struct Bench;
impl Page for Bench {}

const PATHS: [&str; 6] = [
    "/home.htm",
    "/edit-customer.htm",
    "/admin/add-customer.htm",
    "/admin/reports/quarterly-summary.htm",
    "/secure/login.htm",
    "/missing-page.htm",
];

fn registry() -> Arc<HandlerRegistry> {
    let registry = Arc::new(HandlerRegistry::new());
    for name in [
        "com.mycorp.Home",
        "com.mycorp.EditCustomerPage",
        "com.mycorp.admin.AddCustomer",
        "com.mycorp.admin.reports.QuarterlySummary",
    ] {
        registry.register::<Bench>(name);
    }
    registry
}

fn cache(mode: Mode) -> ResolutionCache {
    let settings = Settings::new(mode, "com.mycorp").with_exclusion("secure/*");
    ResolutionCache::with_registry(settings, registry(), &StaticResources::new(PATHS))
        .expect("failed to build resolver")
}

fn bench_candidates(c: &mut Criterion) {
    c.bench_function("name_mapper_candidates", |b| {
        b.iter(|| {
            for path in PATHS {
                black_box(candidates(black_box(path), "com.mycorp"));
            }
        })
    });
}

fn bench_resolve(c: &mut Criterion) {
    for (label, mode) in [("resolve_eager", Mode::Production), ("resolve_lazy", Mode::Development)] {
        let cache = cache(mode);
        c.bench_function(label, |b| {
            b.iter(|| {
                for path in PATHS {
                    let res = cache.resolve(path);
                    black_box(&res);
                }
            })
        });
    }
}

criterion_group!(benches, bench_candidates, bench_resolve);
criterion_main!(benches);
