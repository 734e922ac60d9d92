use std::collections::HashMap;
use std::io::Write;
use std::sync::Arc;

use parking_lot::Mutex;
use petite_core::prelude::*;
use petite_core::utils::naming::bean_name_of;
use petite_core::utils::params::params_for;

struct UserService {
    greeting: String,
}

struct UserRepository;

/// 基于 HashMap 的作用域，记录每次委托调用
#[derive(Default)]
struct MapScope {
    instances: Mutex<HashMap<String, BeanInstance>>,
    calls: Mutex<Vec<String>>,
}

impl Scope for MapScope {
    fn lookup(&self, name: &str) -> BeanResult<Option<BeanInstance>> {
        self.calls.lock().push(format!("lookup:{}", name));
        Ok(self.instances.lock().get(name).cloned())
    }

    fn register(&self, name: &str, instance: BeanInstance) -> BeanResult<()> {
        self.calls.lock().push(format!("register:{}", name));
        self.instances.lock().insert(name.to_string(), instance);
        Ok(())
    }

    fn remove(&self, name: &str) -> BeanResult<()> {
        self.calls.lock().push(format!("remove:{}", name));
        self.instances.lock().remove(name);
        Ok(())
    }
}

/// 后端不可用的作用域
struct UnavailableScope;

impl Scope for UnavailableScope {
    fn lookup(&self, _name: &str) -> BeanResult<Option<BeanInstance>> {
        Err(anyhow::anyhow!("session store unavailable").into())
    }

    fn register(&self, _name: &str, _instance: BeanInstance) -> BeanResult<()> {
        Err(anyhow::anyhow!("session store unavailable").into())
    }

    fn remove(&self, _name: &str) -> BeanResult<()> {
        Err(anyhow::anyhow!("session store unavailable").into())
    }
}

fn user_service_definition(scope: &Arc<dyn Scope>) -> BeanDefinition {
    BeanDefinition::of::<UserService>(bean_name_of::<UserService>(), Some(scope), WiringMode::Strict)
        .unwrap()
}

#[test]
fn test_user_service_end_to_end() {
    let scope: Arc<dyn Scope> = Arc::new(SingletonScope::new());
    let mut definition = user_service_definition(&scope);
    assert_eq!(definition.name(), "userService");

    // 装配分析阶段
    let ctor = CtorInjectionPoint::new(
        MemberDescriptor::new(TypeDescriptor::of::<UserService>(), "new"),
        vec![BeanReferences::of_name("userRepository").or(DependencyRef::of_type::<UserRepository>())],
    );
    definition.set_ctor_injection_point(ctor.clone());
    definition.mark_populated();

    let definition = Arc::new(definition);
    assert_eq!(definition.ctor_injection_point(), Some(&ctor));
    assert!(definition.property_injection_points().is_empty());
    assert!(definition.set_injection_points().is_empty());
    assert!(definition.method_injection_points().is_empty());
    assert!(definition.init_method_points().is_empty());
    assert!(definition.params().is_empty());

    // 首次获取：作用域中没有实例，外部创建后注册
    assert!(definition.scope_lookup().unwrap().is_none());
    let instance: BeanInstance = Arc::new(UserService {
        greeting: "hello".to_string(),
    });
    definition.scope_register(Arc::clone(&instance)).unwrap();

    let found = definition.scope_lookup().unwrap().unwrap();
    assert!(Arc::ptr_eq(&found, &instance));
    assert_eq!(found.downcast::<UserService>().unwrap().greeting, "hello");
}

#[test]
fn test_delegation_uses_definition_name() {
    let map_scope = Arc::new(MapScope::default());
    let scope: Arc<dyn Scope> = map_scope.clone();
    let definition = user_service_definition(&scope);

    definition.scope_register(Arc::new(UserRepository)).unwrap();
    assert!(definition.scope_lookup().unwrap().is_some());
    definition.scope_remove().unwrap();
    assert!(definition.scope_lookup().unwrap().is_none());

    assert_eq!(
        *map_scope.calls.lock(),
        vec![
            "register:userService",
            "lookup:userService",
            "remove:userService",
            "lookup:userService",
        ]
    );
    assert!(definition.scope_kind().unwrap().is::<MapScope>());
}

#[test]
fn test_storage_errors_propagate_unchanged() {
    let scope: Arc<dyn Scope> = Arc::new(UnavailableScope);
    let definition = user_service_definition(&scope);

    for result in [
        definition.scope_lookup().map(|_| ()),
        definition.scope_register(Arc::new(UserRepository)),
        definition.scope_remove(),
    ] {
        match result {
            Err(BeanError::Storage(e)) => assert_eq!(e.to_string(), "session store unavailable"),
            other => panic!("expected storage error, got {:?}", other),
        }
    }
}

#[test]
fn test_dropping_definition_keeps_scoped_instances() {
    let singleton = Arc::new(SingletonScope::new());
    let scope: Arc<dyn Scope> = singleton.clone();

    let definition = user_service_definition(&scope);
    definition.scope_register(Arc::new(UserRepository)).unwrap();
    drop(definition);

    assert!(singleton.contains("userService"));
}

#[test]
fn test_identity_and_cache_reads_are_stable() {
    let scope: Arc<dyn Scope> = Arc::new(PrototypeScope::new());
    let mut definition = user_service_definition(&scope);

    for name in ["repository", "mailer", "clock"] {
        definition.add_property_injection_point(PropertyInjectionPoint::new(
            MemberDescriptor::new(TypeDescriptor::of::<UserService>(), name),
            BeanReferences::of_name(name),
        ));
    }
    definition.add_method_injection_point(MethodInjectionPoint::new(
        MemberDescriptor::new(TypeDescriptor::of::<UserService>(), "configure"),
        vec![BeanReferences::of_type::<UserRepository>()],
    ));
    definition.add_set_injection_point(SetInjectionPoint::new(
        MemberDescriptor::new(TypeDescriptor::of::<UserService>(), "listeners"),
        TypeDescriptor::of::<UserRepository>(),
    ));
    definition.add_params(params_for(
        "userService",
        ["userService.greeting", "orderService.greeting"],
    ));
    definition.mark_populated();

    let first: Vec<_> = definition.property_injection_points().to_vec();
    let second: Vec<_> = definition.property_injection_points().to_vec();
    assert_eq!(first, second);
    assert_eq!(
        first.iter().map(|p| p.property.name.as_str()).collect::<Vec<_>>(),
        vec!["repository", "mailer", "clock"]
    );
    assert_eq!(definition.method_injection_points().len(), 1);
    assert_eq!(definition.set_injection_points().len(), 1);
    assert_eq!(definition.params(), &["userService.greeting"]);

    assert_eq!(definition.name(), "userService");
    assert!(definition.bean_type().is::<UserService>());
    assert_eq!(definition.wiring_mode(), WiringMode::Strict);
    assert!(definition.scope_kind().unwrap().is::<PrototypeScope>());
}

#[test]
fn test_default_wiring_mode_resolved_from_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[container]\ndefault_wiring_mode = \"autowire\"").unwrap();

    let config = PetiteConfig::from_file(file.path()).unwrap();
    let definition =
        BeanDefinition::of::<UserRepository>("userRepository", None, WiringMode::Default).unwrap();

    assert_eq!(definition.wiring_mode(), WiringMode::Default);
    assert_eq!(config.resolve_wiring_mode(definition.wiring_mode()), WiringMode::Autowire);
}

#[test]
fn test_missing_config_file() {
    assert!(matches!(
        PetiteConfig::from_file("/nonexistent/petite.toml"),
        Err(BeanError::Config(_))
    ));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_published_definition_is_shared_across_tasks() {
    let singleton = Arc::new(SingletonScope::new());
    let scope: Arc<dyn Scope> = singleton.clone();

    let mut definition = user_service_definition(&scope);
    definition.add_init_method_points(vec![
        InitMethodPoint::new(MemberDescriptor::new(TypeDescriptor::of::<UserService>(), "start"), 0),
        InitMethodPoint::new(MemberDescriptor::new(TypeDescriptor::of::<UserService>(), "warm"), 1),
    ]);
    definition.mark_populated();
    let definition = Arc::new(definition);

    let instance: BeanInstance = Arc::new(UserRepository);
    definition.scope_register(Arc::clone(&instance)).unwrap();

    let tasks: Vec<_> = (0..16)
        .map(|_| {
            let definition = Arc::clone(&definition);
            tokio::spawn(async move {
                let found = definition.scope_lookup().unwrap().unwrap();
                (definition.init_method_points().len(), found)
            })
        })
        .collect();

    for task in tasks {
        let (init_methods, found) = task.await.unwrap();
        assert_eq!(init_methods, 2);
        assert!(Arc::ptr_eq(&found, &instance));
    }
    assert_eq!(singleton.len(), 1);
}
