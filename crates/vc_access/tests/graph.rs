//! Nested objects, lists, maps and shared references.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::ptr;
use std::rc::Rc;

use indexmap::IndexMap;
use vc_access::derive::PropertyAccess;
use vc_access::info::MapShell;
use vc_access::walk::{self, Node, WalkConfig, WalkError, Walker};
use vc_access::{ContainerKind, PropertyAccess, Shared, Value};

#[derive(PropertyAccess, Default, Clone, Debug, PartialEq)]
struct Address {
    street: String,
    city: String,
}

#[derive(PropertyAccess, Default, Clone, Debug, PartialEq)]
struct Employee {
    name: String,
    home: Option<Address>,
    tags: Vec<String>,
    history: Vec<Address>,
    scores: IndexMap<String, i64>,
    offices: BTreeMap<u32, Address>,
    desk: Option<Shared<Address>>,
}

#[derive(PropertyAccess, Default, Clone, Debug)]
struct Link {
    label: String,
    next: Option<Shared<Link>>,
}

#[derive(PropertyAccess, Default, Clone, Debug, PartialEq)]
struct Directory {
    entries: HashMap<String, Address>,
    counts: HashMap<u32, i64>,
}

fn address(street: &str, city: &str) -> Address {
    Address {
        street: street.into(),
        city: city.into(),
    }
}

fn sample() -> Employee {
    let mut scores = IndexMap::new();
    scores.insert("zeta".to_owned(), 3);
    scores.insert("alpha".to_owned(), -1);

    let mut offices = BTreeMap::new();
    offices.insert(7, address("Main St 1", "Springfield"));

    Employee {
        name: "Ada".into(),
        home: Some(address("Elm St 4", "Shelbyville")),
        tags: vec!["admin".into(), "remote".into()],
        history: vec![address("Old Rd 9", "Ogdenville"), address("New Rd 2", "Ogdenville")],
        scores,
        offices,
        desk: Some(Rc::new(RefCell::new(address("Floor 3", "Springfield")))),
    }
}

fn desk_of(employee: &Employee) -> &Shared<Address> {
    employee.desk.as_ref().unwrap()
}

fn chain(labels: &[&str]) -> Shared<Link> {
    let mut next = None;
    for label in labels.iter().rev() {
        next = Some(Rc::new(RefCell::new(Link {
            label: (*label).into(),
            next,
        })));
    }
    next.unwrap()
}

#[test]
fn container_kinds() {
    let employee = Employee::default();
    let kinds: Vec<_> = employee
        .property_names()
        .map(|name| employee.container_kind(name).unwrap())
        .collect();
    assert_eq!(
        kinds,
        [
            ContainerKind::Scalar,
            ContainerKind::NestedObject,
            ContainerKind::ListOfScalar,
            ContainerKind::ListOfObject,
            ContainerKind::MapScalarValue,
            ContainerKind::MapObjectValue,
            ContainerKind::NestedObject,
        ]
    );
    assert_eq!(
        employee.create_map_container("offices").unwrap().shell(),
        MapShell::Sorted
    );
    assert!(employee.create_nested_instance("name").is_err());

    // Filled slots classify the same as empty ones.
    let filled = sample();
    for name in employee.property_names() {
        assert_eq!(
            employee.container_kind(name).unwrap(),
            filled.container_kind(name).unwrap(),
            "{name}"
        );
    }
    assert!(employee.create_map_container("tags").is_err());
}

#[test]
fn export_preserves_order() {
    let node = walk::export(&sample()).unwrap();

    let scores = node.get("scores").and_then(Node::as_map).unwrap();
    let keys: Vec<String> = scores.entries.keys().map(ToString::to_string).collect();
    assert_eq!(keys, ["zeta", "alpha"]);
    assert_eq!(scores.shell, MapShell::Ordered);

    let history = node.get("history").and_then(Node::as_list).unwrap();
    assert_eq!(history[1].get("street"), Some(&Node::scalar("New Rd 2")));
}

#[test]
fn import_round_trip() {
    let employee = sample();
    let node = walk::export(&employee).unwrap();
    let back: Employee = walk::import(&node).unwrap();
    assert_eq!(back, employee);
    assert!(walk::structurally_equal(&employee, &back).unwrap());
}

#[test]
fn deep_copy_creates_distinct_instances() {
    let employee = sample();

    let copy = walk::deep_copy(&employee).unwrap();
    let copy = copy.downcast::<Employee>().unwrap();
    let copy = copy.borrow();
    assert_eq!(*copy, employee);

    let (Some(left), Some(right)) = (&employee.desk, &copy.desk) else {
        panic!("desk was not copied");
    };
    assert!(!Rc::ptr_eq(left, right));

    // Changing the copy leaves the source alone.
    right.borrow_mut().city = "Capital City".into();
    assert_eq!(left.borrow().city, "Springfield");
}

#[test]
fn import_merges_into_existing_shared_object() {
    let desk = Rc::new(RefCell::new(address("Floor 3", "Springfield")));
    let mut employee = Employee {
        desk: Some(Rc::clone(&desk)),
        ..Employee::default()
    };

    let node = Node::object([(
        "desk",
        Node::object([("street", Node::scalar("Floor 5"))]),
    )]);
    walk::import_into(&node, &mut employee).unwrap();

    assert!(Rc::ptr_eq(employee.desk.as_ref().unwrap(), &desk));
    assert_eq!(*desk.borrow(), address("Floor 5", "Springfield"));
}

#[test]
fn import_fills_empty_slots_from_factories() {
    let node = Node::object([
        ("home", Node::object([("city", Node::scalar("Capital City"))])),
        ("desk", Node::object([("street", Node::scalar("Annex"))])),
        (
            "offices",
            Node::object([("12", Node::object([("city", Node::scalar("Ogdenville"))]))]),
        ),
    ]);
    let employee: Employee = walk::import(&node).unwrap();

    assert_eq!(employee.home.unwrap().city, "Capital City");
    assert_eq!(employee.desk.unwrap().borrow().street, "Annex");
    assert_eq!(employee.offices[&12].city, "Ogdenville");
}

#[test]
fn import_merges_into_existing_map_values() {
    let mut employee = sample();
    let node = Node::object([(
        "offices",
        Node::object([
            ("7", Node::object([("city", Node::scalar("Capital City"))])),
            ("9", Node::object([("street", Node::scalar("Annex"))])),
        ]),
    )]);
    walk::import_into(&node, &mut employee).unwrap();

    assert_eq!(employee.offices.len(), 2);
    assert_eq!(employee.offices[&7], address("Main St 1", "Capital City"));
    assert_eq!(employee.offices[&9], address("Annex", ""));
}

#[test]
fn keys_colliding_after_conversion() {
    let node = Node::object([(
        "offices",
        Node::object([
            ("1", Node::object::<&str>([])),
            ("01", Node::object::<&str>([])),
        ]),
    )]);
    let err = walk::import::<Employee>(&node).unwrap_err();
    assert!(matches!(err, WalkError::DuplicateKey { .. }));
    assert_eq!(err.path().to_string(), "offices{01}");
}

#[test]
fn hashed_maps_keep_every_entry() {
    let mut directory = Directory::default();
    let cities = ["Springfield", "Shelbyville", "Ogdenville", "Capital City"];
    for (index, city) in cities.into_iter().enumerate() {
        directory.entries.insert(format!("k{index}"), address("", city));
        directory.counts.insert(index as u32 * 10, -(index as i64));
    }
    assert_eq!(
        directory.create_map_container("entries").unwrap().shell(),
        MapShell::Hashed
    );

    let node = walk::export(&directory).unwrap();
    let entries = node.get("entries").and_then(Node::as_map).unwrap();
    assert_eq!(entries.shell, MapShell::Hashed);
    assert_eq!(entries.entries.len(), 4);

    let back: Directory = walk::import(&node).unwrap();
    assert_eq!(back, directory);
    assert!(walk::structurally_equal(&directory, &back).unwrap());

    let copy = walk::deep_copy(&directory).unwrap();
    assert_eq!(*copy.downcast::<Directory>().unwrap().borrow(), directory);
}

#[test]
fn nested_values_are_lent_in_place() {
    let employee = sample();
    let home = employee.property_ref("home").unwrap().unwrap();
    let home = home.downcast_ref::<Address>().unwrap();
    assert!(ptr::eq(home, employee.home.as_ref().unwrap()));

    assert!(employee.property_ref("desk").unwrap().is_none());
    assert!(employee.property_ref("name").unwrap().is_none());
    assert!(Employee::default().property_ref("home").unwrap().is_none());
    assert!(employee.property_ref("missing").is_err());
}

#[test]
fn invalid_map_key() {
    let node = Node::object([("offices", Node::object([("seven", Node::object::<&str>([]))]))]);
    let err = walk::import::<Employee>(&node).unwrap_err();
    assert!(matches!(err, WalkError::InvalidKey { .. }));
    assert_eq!(err.path().to_string(), "offices{seven}");
}

#[test]
fn list_where_a_map_is_expected() {
    let node = Node::object([("scores", Node::List(vec![]))]);
    let err = walk::import::<Employee>(&node).unwrap_err();
    assert!(matches!(
        err,
        WalkError::ShapeMismatch {
            expected: "map",
            found: "list",
            ..
        }
    ));
}

#[test]
fn shared_subtrees_are_exported_per_reference() {
    let desk = Rc::new(RefCell::new(address("Floor 3", "Springfield")));
    let first = Employee {
        desk: Some(Rc::clone(&desk)),
        ..Employee::default()
    };
    let second = Employee {
        desk: Some(desk),
        ..Employee::default()
    };
    assert!(walk::structurally_equal(&first, &second).unwrap());

    let _borrowed = desk_of(&first).borrow();
    assert!(walk::export(&second).is_ok());
}

#[test]
fn cycles_are_rejected() {
    let a = chain(&["a", "b"]);
    let b = Rc::clone(a.borrow().next.as_ref().unwrap());
    b.borrow_mut().next = Some(Rc::clone(&a));

    let err = walk::export(&*a.borrow()).unwrap_err();
    match &err {
        WalkError::CyclicGraph { type_path, .. } => assert!(type_path.ends_with("Link")),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(err.path().to_string(), "next.next");

    // Break the cycle so both nodes are freed.
    b.borrow_mut().next = None;
}

#[test]
fn depth_limit() {
    let head = chain(&["a", "b", "c"]);
    let walker = Walker::new(WalkConfig::new().with_max_depth(1));

    let err = walker.export(&*head.borrow()).unwrap_err();
    assert!(matches!(err, WalkError::DepthExceeded { limit: 1, .. }));
    assert_eq!(err.path().to_string(), "next.next");

    let node = walk::export(&*head.borrow()).unwrap();
    let err = walker.import::<Link>(&node).unwrap_err();
    assert!(matches!(err, WalkError::DepthExceeded { .. }));
}

#[test]
fn busy_objects() {
    let head = chain(&["a", "b"]);
    let next = Rc::clone(head.borrow().next.as_ref().unwrap());
    let _guard = next.borrow_mut();

    let err = walk::export(&*head.borrow()).unwrap_err();
    assert!(matches!(err, WalkError::ObjectBusy { .. }));
}

#[test]
fn set_property_replaces_only_the_named_slot() {
    let mut employee = sample();
    employee
        .set_property("tags", Value::List(vec![Value::from("solo")]))
        .unwrap();
    assert_eq!(employee.tags, ["solo"]);
    assert_eq!(employee.history.len(), 2);
}
