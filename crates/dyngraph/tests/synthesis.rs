// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![allow(clippy::uninlined_format_args)] // Test code readability over pedantic

//! Type resolution and synthesis
//!
//! Test levels:
//! - SY-01: structural cache keys (order-sensitive names, typed lists)
//! - SY-02: concurrent synthesis yields one type per key
//! - SY-03: producer and consumer registries that share no types

use dyngraph::runtime::{MemberAccess, SetterAccess};
use dyngraph::{
    graph_eq, DynamicObject, EnumBuilder, EnumValue, Error, GraphMapper, MapperConfig,
    MemberDescriptor, MemberKind, RegistryConfig, TypeBuilder, TypeId, TypeRef, TypeRegistry,
    Value,
};
use std::sync::{mpsc, Arc, Barrier};
use std::thread;
use std::time::Duration;


/// Route `[registry]`/`[emitter]`/`[mapper]` logs to stderr (RUST_LOG=trace).
fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .is_test(true)
        .try_init();
}

fn int32() -> TypeRef {
    TypeRef::new("System", "Int32")
}

// ============================================================================
// SY-01: cache keys
// ============================================================================

#[test]
fn test_sy01_names_are_order_sensitive() {
    init_logging();
    let registry = TypeRegistry::new();
    let a = registry.resolve_names(&["Name", "Age"]).expect("a");
    let b = registry.resolve_names(&["Age", "Name"]).expect("b");
    let c = registry
        .resolve_names(&["Name".to_string(), "Age".to_string()])
        .expect("c");
    assert_ne!(a, b);
    assert_eq!(a, c);
    assert_eq!(registry.synthesized_count(), 2);
}

#[test]
fn test_sy01_typed_key_ignores_descriptor_identity() {
    init_logging();
    let registry = TypeRegistry::new();
    let build = || {
        TypeRef::builder("Point")
            .namespace("Remote")
            .property("X", int32())
            .property("Y", int32())
            .build()
    };
    let first = registry.resolve(&build()).expect("first");
    let second = registry.resolve(&build()).expect("second");
    assert_eq!(first, second);

    let reordered = TypeRef::builder("Point")
        .namespace("Remote")
        .property("Y", int32())
        .property("X", int32())
        .build();
    assert_ne!(registry.resolve(&reordered).expect("reordered"), first);

    let retyped = TypeRef::builder("Point")
        .namespace("Remote")
        .property("X", TypeRef::new("System", "Double"))
        .property("Y", int32())
        .build();
    assert_ne!(registry.resolve(&retyped).expect("retyped"), first);
}

#[test]
fn test_sy01_loaded_type_wins() {
    init_logging();
    let registry = TypeRegistry::new();
    let point = registry
        .register(
            TypeBuilder::new("Remote", "Point")
                .property("X", TypeId::I32)
                .property("Y", TypeId::I32),
        )
        .expect("point");
    let described = TypeRef::builder("Point")
        .namespace("Remote")
        .property("X", int32())
        .build();
    assert_eq!(registry.resolve(&described), Ok(point));
    assert_eq!(registry.synthesized_count(), 0);
}

#[test]
fn test_sy01_descriptor_errors() {
    init_logging();
    let registry = TypeRegistry::new();
    assert!(matches!(
        registry.resolve(&TypeRef::builder("").build()),
        Err(Error::DescriptorInvalid(_))
    ));
    assert!(matches!(
        registry.resolve(&TypeRef::builder("Broken").array(true).build()),
        Err(Error::DescriptorInvalid(_))
    ));
    assert!(matches!(
        registry.resolve_names(&["A", "A"]),
        Err(Error::DescriptorInvalid(_))
    ));
    assert!(matches!(
        MemberDescriptor::property(TypeRef::new("A", "B"), "", int32()),
        Err(Error::DescriptorInvalid(_))
    ));
}

#[test]
fn test_sy01_custom_emitted_namespace() {
    init_logging();
    let registry = TypeRegistry::with_config(RegistryConfig {
        emitted_namespace: "Wire.Shapes".to_string(),
        synthesized_name_prefix: "Shape".to_string(),
    });
    let id = registry.resolve_names(&["Only"]).expect("synthesize");
    let def = registry.get(id).expect("def");
    assert_eq!(def.namespace(), Some("Wire.Shapes"));
    assert!(def.name().starts_with("Shape"));
    assert!(registry.is_anonymous(id).expect("anonymous"));
}

#[test]
fn test_sy01_self_nested_descriptor_returns() {
    init_logging();
    let node = |next: TypeRef| {
        TypeRef::builder("Node")
            .namespace("Remote")
            .property("Label", TypeRef::new("System", "String"))
            .property("Next", next)
            .build()
    };
    let described = node(node(TypeRef::new("Remote", "Node")));
    let registry = Arc::new(TypeRegistry::new());

    let (tx, rx) = mpsc::channel();
    let worker = {
        let registry = Arc::clone(&registry);
        thread::spawn(move || {
            let _ = tx.send(registry.resolve(&described));
        })
    };
    let id = rx
        .recv_timeout(Duration::from_secs(5))
        .expect("resolve did not return")
        .expect("resolve");
    worker.join().expect("thread panicked");

    let def = registry.get(id).expect("def");
    assert!(def.is_emitted());
    assert_eq!(def.qualified_name(), "Remote.Node");
    assert_eq!(def.properties()[1].type_id, id);
    assert_eq!(registry.synthesized_count(), 1);

    // The synthesized type carries its own cycle through the mapper.
    let generic = DynamicObject::with_type(
        TypeRef::builder("Node")
            .namespace("Remote")
            .property("Label", TypeRef::new("System", "String"))
            .property("Next", TypeRef::new("Remote", "Node"))
            .build(),
    );
    generic.set("Label", "head");
    generic.set("Next", generic.clone());
    let back = GraphMapper::new(&registry)
        .from_generic(&dyngraph::DynamicValue::Object(generic.clone()), None)
        .expect("from");
    let inst = back.as_instance().expect("instance");
    assert_eq!(inst.type_id(), id);
    let next = inst.get("Next").expect("next");
    assert!(dyngraph::Instance::ptr_eq(next.as_instance().expect("next"), inst));
    inst.clear();
    generic.clear();
}

// ============================================================================
// SY-02: concurrency
// ============================================================================

#[test]
fn test_sy02_concurrent_synthesis_is_deterministic() {
    init_logging();
    const THREADS: usize = 8;
    let registry = Arc::new(TypeRegistry::new());
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|i| {
            let registry = Arc::clone(&registry);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                let names = registry.resolve_names(&["Name", "Age"]).expect("names");
                let typed = registry
                    .resolve(
                        &TypeRef::builder("Point")
                            .namespace("Remote")
                            .property("X", TypeRef::new("System", "Int32"))
                            .property("Y", TypeRef::new("System", "Int32"))
                            .build(),
                    )
                    .expect("typed");
                // A key only this thread asks for.
                let own = registry
                    .resolve_names(&[format!("Field{}", i)])
                    .expect("own");
                (names, typed, own)
            })
        })
        .collect();

    let results: Vec<_> = handles
        .into_iter()
        .map(|h| h.join().expect("thread panicked"))
        .collect();

    let (names, typed, _) = results[0];
    assert!(results.iter().all(|(n, _, _)| *n == names));
    assert!(results.iter().all(|(_, t, _)| *t == typed));
    let mut own: Vec<TypeId> = results.iter().map(|(_, _, o)| *o).collect();
    own.sort();
    own.dedup();
    assert_eq!(own.len(), THREADS);
    assert_eq!(registry.synthesized_count(), 2 + THREADS);
}

#[test]
fn test_sy02_concurrent_conversions_share_registry() {
    init_logging();
    let registry = Arc::new(TypeRegistry::new());
    let person = registry
        .register(
            TypeBuilder::new("People", "Person")
                .string_property("Name")
                .property("Age", TypeId::I32),
        )
        .expect("person");

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                let mapper = GraphMapper::new(&registry);
                for n in 0..50 {
                    let inst = registry.instantiate(person).expect("person");
                    registry
                        .set_value(&inst, "Age", Value::I32(i * 100 + n), SetterAccess::PublicOnly)
                        .expect("age");
                    let generic = mapper.to_generic(&Value::Object(inst.clone())).expect("to");
                    let back = mapper.from_generic(&generic, None).expect("from");
                    assert!(graph_eq(&back, &Value::Object(inst)));
                }
            })
        })
        .collect();
    for h in handles {
        h.join().expect("thread panicked");
    }
}

// ============================================================================
// SY-03: producer / consumer
// ============================================================================

#[test]
fn test_sy03_consumer_without_types() {
    init_logging();
    let producer = TypeRegistry::new();
    let mood = producer
        .register(EnumBuilder::new("Remote", "Mood").variant("Calm").variant("Busy"))
        .expect("mood");
    let task = producer
        .register(
            TypeBuilder::new("Remote", "Task")
                .string_property("Title")
                .property("Priority", TypeId::U8)
                .property("Mood", mood),
        )
        .expect("task");
    let inst = producer.instantiate(task).expect("task");
    producer
        .set_value(&inst, "Title", "ship".into(), SetterAccess::PublicOnly)
        .expect("title");
    producer
        .set_value(&inst, "Priority", Value::U8(3), SetterAccess::PublicOnly)
        .expect("priority");
    producer
        .set_value(
            &inst,
            "Mood",
            Value::Enum(EnumValue {
                type_id: mood,
                value: 1,
            }),
            SetterAccess::PublicOnly,
        )
        .expect("mood");

    let generic = GraphMapper::with_config(
        &producer,
        MapperConfig::new().include_property_types(true),
    )
    .to_generic(&Value::Object(inst))
    .expect("to");

    let consumer = TypeRegistry::new();
    let back = GraphMapper::new(&consumer)
        .from_generic(&generic, None)
        .expect("from");
    let copy = back.as_instance().expect("instance");
    let def = copy.type_def();
    assert!(def.is_emitted());
    assert_eq!(def.qualified_name(), "Remote.Task");
    assert_eq!(copy.get("Title"), Ok(Value::from("ship")));
    assert_eq!(copy.get("Priority"), Ok(Value::U8(3)));
    // The enum type is unknown to the consumer: its value degrades to the
    // underlying integer.
    assert_eq!(copy.get("Mood"), Ok(Value::I64(1)));

    // Resolving the same description again hits the cache.
    let node = generic.as_object().expect("node");
    let again = consumer
        .resolve(&node.type_ref().expect("type ref"))
        .expect("resolve");
    assert_eq!(again, copy.type_id());
}

#[test]
fn test_sy03_member_descriptors_cross_registries() {
    init_logging();
    let producer = TypeRegistry::new();
    let task = producer
        .register(
            TypeBuilder::new("Remote", "Task")
                .string_property("Title")
                .field("Notes", TypeId::STRING),
        )
        .expect("task");
    let notes = producer
        .member(task, "Notes", MemberKind::Field)
        .expect("notes");
    assert_eq!(notes.to_string(), "field Remote.Task.Notes: System.String");

    let consumer = TypeRegistry::new();
    let mirror = consumer
        .register(
            TypeBuilder::new("Remote", "Task")
                .field("Notes", TypeId::STRING)
                .string_property("Title"),
        )
        .expect("mirror");
    let resolved = consumer.resolve_member(&notes).expect("resolve");
    assert_eq!(resolved.declaring_type, mirror);
    assert_eq!(resolved.slot, Some(0));

    let members: Vec<String> = consumer
        .list_members(mirror)
        .expect("members")
        .iter()
        .map(|m| format!("{} {}", m.kind(), m.name()))
        .collect();
    assert_eq!(members, ["field Notes", "property Title"]);
}

#[test]
fn test_sy03_unresolvable_enum_hint_fails_for_typed_target() {
    init_logging();
    let registry = TypeRegistry::new();
    let holder = registry
        .register(TypeBuilder::new("Local", "Holder").property("Value", TypeId::I32))
        .expect("holder");
    let node = DynamicObject::new();
    node.set(
        "Value",
        dyngraph::DynamicValue::Enum {
            type_ref: TypeRef::builder("Mood").namespace("Remote").enum_type().build(),
            value: 4,
        },
    );
    // Enum payloads coerce into integers only through an enum target.
    assert!(matches!(
        GraphMapper::new(&registry).create_object(&node, holder),
        Err(Error::TypeMismatch { .. })
    ));
}
