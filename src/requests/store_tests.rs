/*
 * Unit tests for the request store
 *
 * Tests:
 * - test_store_call_dedup
 * - test_store_remove_absent
 * - test_store_destination_dedup
 * - test_store_pending_fifo
 * - test_store_nearest_destination
 * - test_store_nearest_destination_tie_goes_to_earliest
 * - test_store_earliest_call
 */

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod store_tests {
    use crate::requests::RequestStore;
    use crate::shared::Direction::{Down, Up};
    use crate::shared::{DestinationRequest, FloorCall};

    #[test]
    fn test_store_call_dedup() {
        // Arrange
        let mut store = RequestStore::new();
        let call = FloorCall { floor: 5, direction: Up };

        // Act
        let first = store.add_call(call);
        let second = store.add_call(call);
        store.add_call(FloorCall { floor: 5, direction: Down });

        // Assert
        assert!(first);
        assert!(!second);
        assert_eq!(
            store.calls(),
            vec![call, FloorCall { floor: 5, direction: Down }]
        );
    }

    #[test]
    fn test_store_remove_absent() {
        let mut store = RequestStore::new();
        store.add_call(FloorCall { floor: 2, direction: Up });

        assert!(!store.remove_call(&FloorCall { floor: 2, direction: Down }));
        assert!(!store.remove_destination(&DestinationRequest { floor: 2, car_id: 0 }));
        assert!(store.remove_call(&FloorCall { floor: 2, direction: Up }));
        assert!(store.calls().is_empty());
    }

    #[test]
    fn test_store_destination_dedup() {
        let mut store = RequestStore::new();
        let destination = DestinationRequest { floor: 3, car_id: 1 };

        assert!(store.add_destination(destination));
        assert!(!store.add_destination(destination));
        assert!(store.add_destination(DestinationRequest { floor: 3, car_id: 0 }));

        assert_eq!(store.destinations().len(), 2);
        assert!(store.contains_destination(&destination));
    }

    #[test]
    fn test_store_pending_fifo() {
        let mut store = RequestStore::new();
        assert_eq!(store.dequeue_pending(), None);
        assert!(!store.has_pending());

        store.enqueue_pending(7);
        store.enqueue_pending(2);
        store.enqueue_pending(7);

        assert_eq!(store.pending(), vec![7, 2, 7]);
        assert_eq!(store.dequeue_pending(), Some(7));
        assert_eq!(store.dequeue_pending(), Some(2));
        assert_eq!(store.dequeue_pending(), Some(7));
        assert_eq!(store.dequeue_pending(), None);
        assert!(!store.has_pending());
    }

    #[test]
    fn test_store_nearest_destination() {
        // Arrange
        let mut store = RequestStore::new();
        store.add_destination(DestinationRequest { floor: 9, car_id: 0 });
        store.add_destination(DestinationRequest { floor: 1, car_id: 1 });
        store.add_destination(DestinationRequest { floor: 7, car_id: 0 });
        store.add_destination(DestinationRequest { floor: 3, car_id: 0 });

        // Act / Assert
        assert_eq!(store.nearest_destination(0, 5), Some(7));
        assert_eq!(store.nearest_destination(1, 5), Some(1));
        assert_eq!(store.nearest_destination(2, 5), None);
    }

    #[test]
    fn test_store_nearest_destination_tie_goes_to_earliest() {
        let mut store = RequestStore::new();
        store.add_destination(DestinationRequest { floor: 6, car_id: 0 });
        store.add_destination(DestinationRequest { floor: 2, car_id: 0 });

        assert_eq!(store.nearest_destination(0, 4), Some(6));
    }

    #[test]
    fn test_store_earliest_call() {
        let mut store = RequestStore::new();
        assert_eq!(store.earliest_call(), None);

        store.add_call(FloorCall { floor: 8, direction: Down });
        store.add_call(FloorCall { floor: 1, direction: Up });

        assert_eq!(store.earliest_call(), Some(FloorCall { floor: 8, direction: Down }));
        store.remove_call(&FloorCall { floor: 8, direction: Down });
        assert_eq!(store.earliest_call(), Some(FloorCall { floor: 1, direction: Up }));
    }
}
