use latchkey::{Constructor, DiError, Injectable, Lifetime, Registry};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

struct Database {
    url: String,
}

struct Metrics {
    name: &'static str,
}

// Never registered in these tests; keeps the 1-arg candidate unsatisfiable.
struct Tracer;

/// Service with 0-, 1-, and 2-arg candidates. `which` records the winner.
struct Reporter {
    which: &'static str,
    database: Option<Arc<Database>>,
}

impl Injectable for Reporter {
    fn constructors() -> Vec<Constructor<Self>> {
        vec![
            Constructor::nullary(|| Reporter {
                which: "nullary",
                database: None,
            }),
            Constructor::unary(|_: Arc<Tracer>| Reporter {
                which: "unary",
                database: None,
            }),
            Constructor::binary(|database: Arc<Database>, _: Arc<Metrics>| Reporter {
                which: "binary",
                database: Some(database),
            }),
        ]
    }
}

#[test]
fn richest_satisfiable_constructor_wins() {
    let registry = Registry::new();
    registry
        .register_instance(Database {
            url: "postgres://localhost".to_string(),
        })
        .unwrap();
    registry.register_instance(Metrics { name: "reporting" }).unwrap();

    // 2-arg and 0-arg are satisfiable, 1-arg is not: the 2-arg one must win.
    let reporter = registry.resolve_or_construct::<Reporter>().unwrap();
    assert_eq!(reporter.which, "binary");
    assert_eq!(reporter.database.as_ref().unwrap().url, "postgres://localhost");
}

#[test]
fn falls_back_to_poorer_constructor_when_parameters_missing() {
    // Nothing registered at all: only the nullary candidate is satisfiable.
    let registry = Registry::new();
    let reporter = registry.resolve_or_construct::<Reporter>().unwrap();
    assert_eq!(reporter.which, "nullary");
    assert!(reporter.database.is_none());
}

#[test]
fn no_suitable_constructor_when_nothing_is_satisfiable() {
    struct Strict {
        _tracer: Arc<Tracer>,
    }

    impl Injectable for Strict {
        fn constructors() -> Vec<Constructor<Self>> {
            vec![Constructor::unary(|tracer: Arc<Tracer>| Strict {
                _tracer: tracer,
            })]
        }
    }

    let registry = Registry::new();
    match registry.resolve_or_construct::<Strict>() {
        Err(DiError::NoSuitableConstructor(name)) => assert!(name.contains("Strict")),
        other => panic!("expected NoSuitableConstructor, got {:?}", other.err()),
    }
}

#[test]
fn registered_supplier_takes_precedence_over_constructors() {
    let registry = Registry::new();
    registry
        .register_singleton::<Reporter, _>(|_| {
            Ok(Reporter {
                which: "supplier",
                database: None,
            })
        })
        .unwrap();

    let reporter = registry.resolve_or_construct::<Reporter>().unwrap();
    assert_eq!(reporter.which, "supplier");
}

#[test]
fn fallback_construction_is_not_cached() {
    let registry = Registry::new();

    let a = registry.resolve_or_construct::<Reporter>().unwrap();
    let b = registry.resolve_or_construct::<Reporter>().unwrap();

    assert!(!Arc::ptr_eq(&a, &b));
    // No descriptor appears as a side effect of fallback construction.
    assert!(!registry.contains::<Reporter>());
}

#[test]
fn register_constructed_gives_constructor_types_a_lifecycle() {
    static BUILT: AtomicUsize = AtomicUsize::new(0);

    struct Audited;

    impl Injectable for Audited {
        fn constructors() -> Vec<Constructor<Self>> {
            vec![Constructor::nullary(|| {
                BUILT.fetch_add(1, Ordering::SeqCst);
                Audited
            })]
        }
    }

    let registry = Registry::new();
    registry.register_constructed::<Audited>(Lifetime::Singleton).unwrap();

    let a = registry.resolve::<Audited>().unwrap();
    let b = registry.resolve::<Audited>().unwrap();

    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(BUILT.load(Ordering::SeqCst), 1);
}

#[test]
fn constructed_services_can_depend_on_each_other() {
    struct Store;

    struct Indexer {
        _store: Arc<Store>,
    }

    impl Injectable for Store {
        fn constructors() -> Vec<Constructor<Self>> {
            vec![Constructor::nullary(|| Store)]
        }
    }

    impl Injectable for Indexer {
        fn constructors() -> Vec<Constructor<Self>> {
            vec![Constructor::unary(|store: Arc<Store>| Indexer { _store: store })]
        }
    }

    let registry = Registry::new();
    registry.register_constructed::<Store>(Lifetime::Singleton).unwrap();
    registry.register_constructed::<Indexer>(Lifetime::Singleton).unwrap();

    assert!(registry.resolve::<Indexer>().is_ok());
}

#[test]
fn ternary_candidate_resolves_all_three_parameters() {
    struct Exporter {
        summary: String,
    }

    impl Injectable for Exporter {
        fn constructors() -> Vec<Constructor<Self>> {
            vec![Constructor::ternary(
                |db: Arc<Database>, metrics: Arc<Metrics>, label: Arc<String>| Exporter {
                    summary: format!("{} {} {}", db.url, metrics.name, label),
                },
            )]
        }
    }

    let registry = Registry::new();
    registry
        .register_instance(Database {
            url: "sqlite://mem".to_string(),
        })
        .unwrap();
    registry.register_instance(Metrics { name: "export" }).unwrap();
    registry.register_instance("nightly".to_string()).unwrap();

    let exporter = registry.resolve_or_construct::<Exporter>().unwrap();
    assert_eq!(exporter.summary, "sqlite://mem export nightly");
}
