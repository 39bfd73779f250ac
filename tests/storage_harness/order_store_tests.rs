//! Macro-generated test suite for `OrderStore` contract validation.
//!
//! The `order_store_tests!` macro generates a test module that validates any
//! `OrderStore` implementation: CRUD, ordering, idempotent lookup, bulk delete
//! and concurrent access.
//!
//! # Generated Tests
//!
//! ## CRUD
//! - `test_insert_and_find` — insert then retrieve, verify all fields
//! - `test_find_nonexistent` — unknown id returns None
//! - `test_list_empty` — list on empty store returns empty vec
//! - `test_list_ordered_by_id` — every menu combination comes back in insert order
//! - `test_update_existing` — replace all fields, verify persisted
//! - `test_update_nonexistent` — unknown id returns None
//! - `test_delete_existing` — delete then find returns None
//! - `test_delete_nonexistent` — unknown id returns false
//!
//! ## Bulk
//! - `test_count` — count follows inserts and deletes
//! - `test_find_or_create` — second call reuses the first record
//! - `test_find_or_create_distinguishes_fields` — any differing field creates
//! - `test_delete_all` — returns removed count, store empty afterwards
//!
//! ## Edge Cases
//! - `test_ids_not_reused_after_delete`
//! - `test_concurrent_access` — parallel inserts from spawned tasks

/// Generate a full `OrderStore` conformance test suite.
///
/// `$factory` must evaluate to a `Clone + 'static` `OrderStore`. It is
/// re-evaluated for each test to ensure isolation.
#[macro_export]
macro_rules! order_store_tests {
    ($factory:expr) => {
        mod order_store_contract_tests {
            use super::*;
            use pizzeria::core::order::{NewOrder, PizzaSize, PizzaType};
            use pizzeria::core::service::OrderStore;

            // ==================================================================
            // CRUD
            // ==================================================================

            #[tokio::test]
            async fn test_insert_and_find() {
                let store = $factory;

                let created = store.insert(new_order("Alice")).await.unwrap();
                assert_eq!(created.customer_name, "Alice");
                assert_eq!(created.pizza_type, PizzaType::Margherita);
                assert_eq!(created.size, PizzaSize::Medium);
                assert_eq!(created.created_at, created.updated_at);

                let found = store.find(created.id).await.unwrap();
                assert_eq!(found, Some(created));
            }

            #[tokio::test]
            async fn test_find_nonexistent() {
                let store = $factory;
                assert!(store.find(999_999).await.unwrap().is_none());
            }

            #[tokio::test]
            async fn test_list_empty() {
                let store = $factory;
                assert!(store.list().await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_list_ordered_by_id() {
                let store = $factory;
                for order in menu_orders() {
                    store.insert(order).await.unwrap();
                }

                let listed = store.list().await.unwrap();
                assert_eq!(listed.len(), 9);

                let ids: Vec<_> = listed.iter().map(|o| o.id).collect();
                let mut sorted = ids.clone();
                sorted.sort();
                assert_eq!(ids, sorted);

                let names: Vec<_> = listed.iter().map(|o| o.customer_name.clone()).collect();
                let expected: Vec<_> = menu_orders().into_iter().map(|o| o.customer_name).collect();
                assert_eq!(names, expected);
            }

            #[tokio::test]
            async fn test_update_existing() {
                let store = $factory;
                let created = store.insert(new_order("Bob")).await.unwrap();

                let updated = store
                    .update(
                        created.id,
                        NewOrder::new("Robert", PizzaType::Vegetarian, PizzaSize::Large),
                    )
                    .await
                    .unwrap()
                    .expect("order should exist");

                assert_eq!(updated.id, created.id);
                assert_eq!(updated.customer_name, "Robert");
                assert_eq!(updated.pizza_type, PizzaType::Vegetarian);
                assert_eq!(updated.size, PizzaSize::Large);
                assert_eq!(updated.created_at, created.created_at);
                assert!(updated.updated_at >= created.updated_at);

                assert_eq!(store.find(created.id).await.unwrap(), Some(updated));
            }

            #[tokio::test]
            async fn test_update_nonexistent() {
                let store = $factory;
                let result = store.update(999_999, new_order("Nobody")).await.unwrap();
                assert!(result.is_none());
                assert_eq!(store.count().await.unwrap(), 0);
            }

            #[tokio::test]
            async fn test_delete_existing() {
                let store = $factory;
                let created = store.insert(new_order("Carol")).await.unwrap();

                assert!(store.delete(created.id).await.unwrap());
                assert!(store.find(created.id).await.unwrap().is_none());
            }

            #[tokio::test]
            async fn test_delete_nonexistent() {
                let store = $factory;
                store.insert(new_order("Dave")).await.unwrap();

                assert!(!store.delete(999_999).await.unwrap());
                assert_eq!(store.count().await.unwrap(), 1);
            }

            // ==================================================================
            // Bulk
            // ==================================================================

            #[tokio::test]
            async fn test_count() {
                let store = $factory;
                assert_eq!(store.count().await.unwrap(), 0);

                let first = store.insert(new_order("Erin")).await.unwrap();
                store.insert(new_order("Frank")).await.unwrap();
                assert_eq!(store.count().await.unwrap(), 2);

                store.delete(first.id).await.unwrap();
                assert_eq!(store.count().await.unwrap(), 1);
            }

            #[tokio::test]
            async fn test_find_or_create() {
                let store = $factory;

                let (first, created) = store.find_or_create(new_order("Gina")).await.unwrap();
                assert!(created);

                let (second, created) = store.find_or_create(new_order("Gina")).await.unwrap();
                assert!(!created);
                assert_eq!(second, first);
                assert_eq!(store.count().await.unwrap(), 1);
            }

            #[tokio::test]
            async fn test_find_or_create_distinguishes_fields() {
                let store = $factory;
                store.find_or_create(new_order("Hank")).await.unwrap();

                let (_, created) = store
                    .find_or_create(NewOrder::new("Hank", PizzaType::Margherita, PizzaSize::Large))
                    .await
                    .unwrap();
                assert!(created);

                let (_, created) = store
                    .find_or_create(NewOrder::new("Hank", PizzaType::Pepperoni, PizzaSize::Medium))
                    .await
                    .unwrap();
                assert!(created);
                assert_eq!(store.count().await.unwrap(), 3);
            }

            #[tokio::test]
            async fn test_delete_all() {
                let store = $factory;
                for order in menu_orders() {
                    store.insert(order).await.unwrap();
                }

                assert_eq!(store.delete_all().await.unwrap(), 9);
                assert_eq!(store.count().await.unwrap(), 0);
                assert_eq!(store.delete_all().await.unwrap(), 0);
            }

            // ==================================================================
            // Edge Cases
            // ==================================================================

            #[tokio::test]
            async fn test_ids_not_reused_after_delete() {
                let store = $factory;
                let first = store.insert(new_order("Ivy")).await.unwrap();
                store.delete(first.id).await.unwrap();

                let second = store.insert(new_order("Jack")).await.unwrap();
                assert!(second.id > first.id);
            }

            #[tokio::test]
            async fn test_concurrent_access() {
                let store = $factory;
                let s1 = store.clone();
                let s2 = store.clone();

                let h1 = tokio::spawn(async move { s1.insert(new_order("Concurrent_A")).await });
                let h2 = tokio::spawn(async move { s2.insert(new_order("Concurrent_B")).await });

                let (r1, r2) = tokio::time::timeout(std::time::Duration::from_secs(30), async {
                    tokio::try_join!(h1, h2).unwrap()
                })
                .await
                .expect("Concurrent inserts timed out after 30s, possible deadlock");

                let a = r1.unwrap();
                let b = r2.unwrap();
                assert_ne!(a.id, b.id);

                let all = store.list().await.unwrap();
                assert_eq!(all.len(), 2, "Both concurrently inserted orders should be present");
            }
        }
    };
}
