#![allow(dead_code)]

pub mod temp_files {
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::{SystemTime, UNIX_EPOCH};

    static TEMP_COUNTER: AtomicUsize = AtomicUsize::new(0);
    static TEMP_LOCK: Mutex<()> = Mutex::new(());

    /// Creates a temporary file with a unique name
    pub fn create_temp_file(content: &str, ext: &str) -> PathBuf {
        let _lock = TEMP_LOCK.lock().unwrap();
        let counter = TEMP_COUNTER.fetch_add(1, Ordering::SeqCst);
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();

        let path = std::env::temp_dir().join(format!(
            "pagerouter_test_{}_{}_{}.{}",
            std::process::id(),
            counter,
            nanos,
            ext
        ));

        std::fs::write(&path, content).unwrap();
        path
    }

    pub fn create_temp_yaml(content: &str) -> PathBuf {
        create_temp_file(content, "yaml")
    }

    pub fn create_temp_json(content: &str) -> PathBuf {
        create_temp_file(content, "json")
    }

    /// Cleanup temporary files (best effort)
    pub fn cleanup_temp_files(paths: &[PathBuf]) {
        for path in paths {
            let _ = std::fs::remove_file(path);
        }
    }
}

pub mod loaders {
    use pagerouter::handler::{
        FieldIndex, HandlerRegistry, TypeDescriptor, TypeIntrospector, TypeLoader,
    };
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    /// Wraps a registry and counts every lookup.
    #[derive(Default)]
    pub struct CountingLoader {
        pub registry: Arc<HandlerRegistry>,
        total: AtomicUsize,
        per_name: Mutex<HashMap<String, usize>>,
        introspections: AtomicUsize,
    }

    impl CountingLoader {
        pub fn new(registry: Arc<HandlerRegistry>) -> Self {
            Self {
                registry,
                ..Self::default()
            }
        }

        pub fn total(&self) -> usize {
            self.total.load(Ordering::SeqCst)
        }

        pub fn loads_of(&self, name: &str) -> usize {
            self.per_name
                .lock()
                .unwrap()
                .get(name)
                .copied()
                .unwrap_or(0)
        }

        pub fn introspections(&self) -> usize {
            self.introspections.load(Ordering::SeqCst)
        }
    }

    impl TypeLoader for CountingLoader {
        fn load_type(&self, name: &str) -> Option<TypeDescriptor> {
            self.total.fetch_add(1, Ordering::SeqCst);
            *self
                .per_name
                .lock()
                .unwrap()
                .entry(name.to_string())
                .or_insert(0) += 1;
            self.registry.load_type(name)
        }
    }

    impl TypeIntrospector for CountingLoader {
        fn describe_bindable_fields(&self, descriptor: &TypeDescriptor) -> FieldIndex {
            self.introspections.fetch_add(1, Ordering::SeqCst);
            self.registry.describe_bindable_fields(descriptor)
        }
    }
}

pub mod fixtures {
    use pagerouter::handler::{FieldDescriptor, HandlerRegistry, Page};
    use std::sync::Arc;

    pub struct Home;
    impl Page for Home {}

    pub struct EditCustomer;
    impl Page for EditCustomer {
        fn bindable_fields() -> Vec<FieldDescriptor> {
            vec![
                FieldDescriptor::new("customer_id", "i64"),
                FieldDescriptor::new("name", "String"),
            ]
        }
    }

    /// Registry with a handful of pages under `com.mycorp`.
    pub fn registry() -> Arc<HandlerRegistry> {
        let registry = Arc::new(HandlerRegistry::new());
        registry.register::<Home>("com.mycorp.Home");
        registry.register::<EditCustomer>("com.mycorp.EditCustomerPage");
        registry.register::<Home>("com.mycorp.admin.AddCustomer");
        registry.register::<Home>("com.mycorp.Report");
        registry
    }
}
