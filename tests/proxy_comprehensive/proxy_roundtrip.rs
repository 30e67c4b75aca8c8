//! End-to-end operation tests against the in-memory crud fake.

use std::time::Duration;

use crate::common::{create_proxy, map_get};
use tupleproxy::prelude::*;

fn book(space: &ProxySpace, id: i64, name: &str, author: &str) -> Tuple {
    let mut tuple = space.new_tuple();
    tuple.put_object_by_name("id", id).unwrap();
    tuple.put_object_by_name("bucket_id", 1i64).unwrap();
    tuple.put_object_by_name("book_name", name.to_string()).unwrap();
    tuple.put_object_by_name("author", author.to_string()).unwrap();
    tuple
}

fn seed(space: &ProxySpace) {
    let books = vec![
        book(space, 1, "Dune", "Herbert"),
        book(space, 2, "Children of Dune", "Herbert"),
        book(space, 3, "Hyperion", "Simmons"),
        book(space, 4, "Ubik", "Dick"),
    ];
    space.insert_many(books).build().unwrap().execute().unwrap();
}

// =============================================================================
// Insert and replace
// =============================================================================

#[test]
fn test_insert_returns_stored_tuple() {
    let (proxy, crud) = create_proxy();
    let books = proxy.space("books");

    let inserted = books
        .insert(book(&books, 1, "Dune", "Herbert"))
        .build()
        .unwrap()
        .execute()
        .unwrap();

    assert_eq!(inserted.len(), 1);
    assert_eq!(
        inserted[0].get_by_name::<String>("book_name").unwrap(),
        Some("Dune".to_string())
    );
    assert_eq!(inserted[0].get_long(0).unwrap(), Some(1));
    assert_eq!(crud.len(), 1);
    assert_eq!(crud.calls()[0].0, "crud.insert");
}

#[test]
fn test_duplicate_insert_surfaces_remote_error() {
    let (proxy, crud) = create_proxy();
    let books = proxy.space("books");
    books
        .insert(book(&books, 1, "Dune", "Herbert"))
        .build()
        .unwrap()
        .execute()
        .unwrap();

    let result = books
        .insert(book(&books, 1, "Dune Messiah", "Herbert"))
        .build()
        .unwrap()
        .execute();

    match result {
        Err(Error::Remote { payload }) => {
            let message = map_get(&payload, "err").and_then(WireValue::as_str);
            assert!(message.unwrap().contains("Duplicate key"));
        }
        other => panic!("Expected Remote error, got {:?}", other),
    }
    assert_eq!(crud.len(), 1);
}

#[test]
fn test_replace_overwrites_existing_row() {
    let (proxy, crud) = create_proxy();
    let books = proxy.space("books");
    books
        .insert(book(&books, 1, "Dune", "Herbert"))
        .build()
        .unwrap()
        .execute()
        .unwrap();

    let replaced = books
        .replace(book(&books, 1, "Dune", "Frank Herbert"))
        .build()
        .unwrap()
        .execute()
        .unwrap();
    assert_eq!(
        replaced[0].get_by_name::<String>("author").unwrap(),
        Some("Frank Herbert".to_string())
    );

    let found = books
        .select(Condition::eq("id", 1i64))
        .build()
        .unwrap()
        .execute()
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].get_string(3).unwrap(), Some("Frank Herbert".to_string()));
    assert_eq!(crud.len(), 1);
}

// =============================================================================
// Batches
// =============================================================================

#[test]
fn test_insert_many_stops_on_first_error() {
    let (proxy, crud) = create_proxy();
    let books = proxy.space("books");
    books
        .insert(book(&books, 2, "Hyperion", "Simmons"))
        .build()
        .unwrap()
        .execute()
        .unwrap();

    let batch = vec![
        book(&books, 1, "Dune", "Herbert"),
        book(&books, 2, "Duplicate", "Nobody"),
        book(&books, 3, "Ubik", "Dick"),
    ];
    let result = books
        .insert_many(batch)
        .with_stop_on_error(true)
        .build()
        .unwrap()
        .execute();

    assert!(matches!(result, Err(Error::Remote { .. })));
    assert_eq!(crud.len(), 2);

    let (_, arguments) = crud.calls().pop().unwrap();
    assert_eq!(
        map_get(&arguments[2], "stop_on_error"),
        Some(&WireValue::from(true))
    );
}

#[test]
fn test_replace_many_writes_every_row() {
    let (proxy, crud) = create_proxy();
    let books = proxy.space("books");
    seed(&books);

    let written = books
        .replace_many(vec![
            book(&books, 1, "Dune", "F. Herbert"),
            book(&books, 5, "Solaris", "Lem"),
        ])
        .with_rollback_on_error(true)
        .build()
        .unwrap()
        .execute()
        .unwrap();

    assert_eq!(written.len(), 2);
    assert_eq!(crud.len(), 5);
}

// =============================================================================
// Select and delete
// =============================================================================

#[test]
fn test_select_filters_and_limits() {
    let (proxy, _) = create_proxy();
    let books = proxy.space("books");
    seed(&books);

    let herbert = books
        .select(Condition::eq("author", "Herbert"))
        .build()
        .unwrap()
        .execute()
        .unwrap();
    let ids: Vec<_> = herbert.iter().map(|t| t.get_long(0).unwrap()).collect();
    assert_eq!(ids, vec![Some(1), Some(2)]);

    let limited = books
        .select(Conditions::any().and(Condition::ge("id", 2i64)).with_first(2))
        .build()
        .unwrap()
        .execute()
        .unwrap();
    let ids: Vec<_> = limited.iter().map(|t| t.get_long(0).unwrap()).collect();
    assert_eq!(ids, vec![Some(2), Some(3)]);

    let everything = books.select(Conditions::any()).build().unwrap().execute().unwrap();
    assert_eq!(everything.len(), 4);
}

#[test]
fn test_selected_tuples_carry_response_metadata() {
    let (proxy, _) = create_proxy();
    let books = proxy.space("books");
    seed(&books);

    let rows = books
        .select(Condition::eq("id", 3i64))
        .build()
        .unwrap()
        .execute()
        .unwrap();
    let metadata = rows[0].metadata().unwrap();
    assert_eq!(metadata.space_name, "books");
    assert_eq!(metadata.field_position("author"), Some(3));
    assert_eq!(
        rows[0].get_by_name::<String>("book_name").unwrap(),
        Some("Hyperion".to_string())
    );
}

#[test]
fn test_delete_returns_removed_row() {
    let (proxy, crud) = create_proxy();
    let books = proxy.space("books");
    seed(&books);

    let removed = books.delete([4i64]).build().unwrap().execute().unwrap();
    assert_eq!(removed.len(), 1);
    assert_eq!(removed[0].get_string(2).unwrap(), Some("Ubik".to_string()));
    assert_eq!(crud.len(), 3);

    let missing = books.delete([4i64]).build().unwrap().execute().unwrap();
    assert!(missing.is_empty());
}

#[test]
fn test_unknown_space_is_remote_error() {
    let (proxy, _) = create_proxy();
    let result = proxy
        .space("authors")
        .select(Conditions::any())
        .build()
        .unwrap()
        .execute();
    assert!(matches!(result, Err(Error::Remote { .. })));
}

// =============================================================================
// Options
// =============================================================================

#[test]
fn test_builders_do_not_share_options() {
    let (proxy, crud) = create_proxy();
    let books = proxy.space("books");
    seed(&books);

    let first = books
        .select(Conditions::any())
        .with_timeout(Duration::from_millis(250))
        .with_mode(ReadMode::Write);
    let second = books.select(Conditions::any()).with_batch_size(10);

    first.build().unwrap().execute().unwrap();
    second.build().unwrap().execute().unwrap();

    let calls = crud.calls();
    let first_options = &calls[calls.len() - 2].1[2];
    let second_options = &calls[calls.len() - 1].1[2];

    assert_eq!(map_get(first_options, "timeout"), Some(&WireValue::from(250u64)));
    assert_eq!(map_get(first_options, "mode"), Some(&WireValue::from("write")));
    assert!(map_get(first_options, "batch_size").is_none());
    assert_eq!(map_get(second_options, "batch_size"), Some(&WireValue::from(10u32)));
    assert!(map_get(second_options, "timeout").is_none());
}
