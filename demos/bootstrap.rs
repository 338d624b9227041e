//! Modular bootstrap: each subsystem contributes a small adapter function
//! that registers its services, then the composition root wires them all and
//! hands out a cloneable `Services` facade.
//!
//! Run with `cargo run --example bootstrap`.

use latchkey::{DiResult, Lifetime, Registry, Services, Symbol};
use std::sync::Arc;

// ===== Shared configuration =====

#[derive(Debug)]
struct AppConfig {
    database_url: String,
    cache_capacity: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: "postgresql://localhost:5432/app".to_string(),
            cache_capacity: 256,
        }
    }
}

// ===== Storage subsystem =====

#[derive(Debug)]
struct Database {
    connection_string: String,
}

impl Database {
    fn describe(&self) -> String {
        format!("connected to {}", self.connection_string)
    }
}

const PRIMARY_STORE: Symbol = Symbol::new("primary_store");

fn register_storage(registry: &Registry) -> DiResult<()> {
    registry.register_singleton::<Database, _>(|r| {
        let config = r.resolve::<AppConfig>()?;
        Ok(Database {
            connection_string: config.database_url.clone(),
        })
    })?;
    registry.bind_key::<Database>(PRIMARY_STORE)
}

// ===== Caching subsystem =====

#[derive(Debug)]
struct ProfileCache {
    capacity: usize,
    database: Arc<Database>,
}

fn register_caching(registry: &Registry) -> DiResult<()> {
    registry.register_singleton::<ProfileCache, _>(|r| {
        Ok(ProfileCache {
            capacity: r.resolve::<AppConfig>()?.cache_capacity,
            database: r.resolve::<Database>()?,
        })
    })
}

// ===== Request handling =====

/// Transient: a fresh handler per request, sharing the singleton cache.
struct RequestHandler {
    cache: Arc<ProfileCache>,
    request_id: u64,
}

impl RequestHandler {
    fn handle(&self) -> String {
        format!(
            "request {} served from cache(capacity={}, {})",
            self.request_id,
            self.cache.capacity,
            self.cache.database.describe()
        )
    }
}

fn register_request_handling(registry: &Registry) -> DiResult<()> {
    use std::sync::atomic::{AtomicU64, Ordering};
    static NEXT_ID: AtomicU64 = AtomicU64::new(1);

    registry.register_supplier::<RequestHandler, _>(Lifetime::Transient, |r| {
        Ok(RequestHandler {
            cache: r.resolve::<ProfileCache>()?,
            request_id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
        })
    })
}

// ===== Composition root =====

fn bootstrap() -> DiResult<Services> {
    let registry = Registry::new();
    registry.register_instance(AppConfig::default())?;
    register_storage(&registry)?;
    register_caching(&registry)?;
    register_request_handling(&registry)?;
    Ok(Services::new(registry))
}

fn main() -> DiResult<()> {
    let services = bootstrap()?;

    // Singletons: one instance however we reach it.
    let by_type = services.get::<Database>()?;
    let by_key = services.get_key_as::<Database>(PRIMARY_STORE)?;
    assert!(Arc::ptr_eq(&by_type, &by_key));
    println!("database: {}", by_type.describe());

    // Transients: a distinct handler per call over the same shared cache.
    for _ in 0..3 {
        let handler = services.get::<RequestHandler>()?;
        println!("{}", handler.handle());
    }

    for descriptor in services.registry().descriptors() {
        println!(
            "registered: {} [{:?}/{:?}] cached={}",
            descriptor.type_name, descriptor.lifetime, descriptor.source, descriptor.cached
        );
    }

    Ok(())
}
