use record_file_log::dynamic::DynamicRecord;
use record_file_log::model_record;
use record_file_log::record::to_mapping;
use record_file_log::value::EnumMember;
use record_file_log::{FieldValue, LogValue, RecordMap};
use rust_decimal::Decimal;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Clone, Copy, Debug, strum::IntoStaticStr)]
enum Status {
    Active,
    Retired,
}

impl From<Status> for FieldValue {
    fn from(status: Status) -> Self {
        FieldValue::enumeration(status)
    }
}

struct Country {
    code: String,
}

struct Author {
    id: i64,
    name: String,
    country: Option<Country>,
}

struct Review {
    stars: u8,
    author: Option<Author>,
}

struct Book {
    id: Uuid,
    title: String,
    price: Decimal,
    status: Status,
    author: Option<Author>,
    reviews: Vec<Review>,
}

model_record!(Country { code });
model_record!(Author { id, name } relations { country });
model_record!(Review { stars } relations { author });
model_record!(Book { id, title, price, status } relations { author, reviews });

fn author() -> Author {
    Author {
        id: 7,
        name: "Frank Herbert".to_string(),
        country: Some(Country { code: "US".to_string() }),
    }
}

fn book(reviews: Vec<Review>) -> Book {
    Book {
        id: Uuid::from_str("0f8fad5b-d9cb-469f-a165-70867728950e").unwrap(),
        title: "Dune".to_string(),
        price: Decimal::from_str("9.99").unwrap(),
        status: Status::Active,
        author: Some(author()),
        reviews,
    }
}

fn keys(map: &RecordMap) -> Vec<&str> {
    map.keys().map(String::as_str).collect()
}

#[test]
fn scalar_fields_only_without_relationships() {
    let b = book(vec![Review { stars: 5, author: None }]);
    let map = to_mapping(&b, false).unwrap();

    assert_eq!(keys(&map), ["id", "title", "price", "status"]);
    assert_eq!(map["title"], LogValue::Scalar(FieldValue::Text("Dune".into())));
    let price = map["price"].as_scalar().unwrap();
    assert_eq!(price.downcast_ref::<Decimal>(), Some(&b.price));
    assert_eq!(map["id"].as_scalar().unwrap().downcast_ref::<Uuid>(), Some(&b.id));
}

#[test]
fn absent_relationship_is_omitted() {
    let mut b = book(Vec::new());
    b.author = None;
    let map = to_mapping(&b, true).unwrap();

    assert!(!map.contains_key("author"));
    assert_eq!(keys(&map), ["id", "title", "price", "status", "reviews"]);
}

#[test]
fn empty_to_many_is_an_empty_sequence() {
    let map = to_mapping(&book(Vec::new()), true).unwrap();
    assert_eq!(map["reviews"], LogValue::List(Vec::new()));
}

#[test]
fn to_many_produces_one_mapping_per_record() {
    let reviews = vec![
        Review { stars: 5, author: Some(author()) },
        Review { stars: 3, author: None },
        Review { stars: 4, author: None },
    ];
    let map = to_mapping(&book(reviews), true).unwrap();

    let list = map["reviews"].as_list().unwrap();
    assert_eq!(list.len(), 3);
    let stars: Vec<_> = list
        .iter()
        .map(|item| item.as_map().unwrap()["stars"].clone())
        .collect();
    let expected: Vec<_> = [5_u64, 3, 4]
        .into_iter()
        .map(|s| LogValue::Scalar(FieldValue::UInt(s)))
        .collect();
    assert_eq!(stars, expected);
    for item in list {
        assert_eq!(keys(item.as_map().unwrap()), ["stars"]);
    }
}

#[test]
fn expansion_stops_after_one_level() {
    let map = to_mapping(&book(Vec::new()), true).unwrap();

    let author = map["author"].as_map().unwrap();
    assert_eq!(keys(author), ["id", "name"]);
    assert!(!author.contains_key("country"));
}

#[test]
fn enum_field_keeps_member() {
    let mut b = book(Vec::new());
    b.status = Status::Retired;
    let map = to_mapping(&b, false).unwrap();
    let status = map["status"].as_scalar().unwrap().as_opaque().unwrap();
    assert!(status.type_name().ends_with("Status"));
    assert_eq!(status.downcast_ref::<EnumMember>().unwrap().name(), "Retired");
}

#[test]
fn dynamic_records_follow_the_same_rules() {
    let leaf = DynamicRecord::new().field("id", 3);
    let middle = DynamicRecord::new().field("id", 2).one("child", leaf);
    let root = DynamicRecord::new()
        .field("id", 1)
        .one("parent", middle.clone())
        .many("siblings", vec![middle])
        .absent("owner");

    let map = to_mapping(&root, true).unwrap();
    assert_eq!(keys(&map), ["id", "parent", "siblings"]);
    assert_eq!(keys(map["parent"].as_map().unwrap()), ["id"]);
    let sibling = map["siblings"].as_list().unwrap()[0].as_map().unwrap();
    assert_eq!(keys(sibling), ["id"]);
}

#[test]
fn boxed_self_relation() {
    struct Employee {
        name: String,
        manager: Option<Box<Employee>>,
    }
    model_record!(Employee { name } relations { manager });

    let boss = Employee { name: "Ada".into(), manager: None };
    let dev = Employee { name: "Lin".into(), manager: Some(Box::new(boss)) };

    let map = to_mapping(&dev, true).unwrap();
    assert_eq!(keys(map["manager"].as_map().unwrap()), ["name"]);
}

#[test]
fn optional_to_many_relation() {
    struct Tag {
        label: String,
    }

    struct Post {
        id: i64,
        tags: Option<Vec<Tag>>,
    }

    model_record!(Tag { label });
    model_record!(Post { id } relations { tags });

    let unset = Post { id: 1, tags: None };
    let map = to_mapping(&unset, true).unwrap();
    assert_eq!(keys(&map), ["id"]);

    let empty = Post { id: 2, tags: Some(Vec::new()) };
    let map = to_mapping(&empty, true).unwrap();
    assert_eq!(map["tags"], LogValue::List(Vec::new()));

    let tagged = Post {
        id: 3,
        tags: Some(vec![Tag { label: "rust".into() }, Tag { label: "log".into() }]),
    };
    let map = to_mapping(&tagged, true).unwrap();
    let labels: Vec<_> = map["tags"]
        .as_list()
        .unwrap()
        .iter()
        .map(|tag| tag.as_map().unwrap()["label"].clone())
        .collect();
    assert_eq!(
        labels,
        [
            LogValue::Scalar(FieldValue::Text("rust".into())),
            LogValue::Scalar(FieldValue::Text("log".into())),
        ]
    );
}
