//! Property-based tests for connection group trees

use guacman_core::models::TreeEntry;
use guacman_core::{Connection, ConnectionGroup};
use proptest::prelude::*;

/// Strategy for a tree up to three levels deep
fn arb_tree() -> impl Strategy<Value = ConnectionGroup> {
    let leaf = (
        "[a-z]{1,8}",
        prop::collection::vec(
            ("[a-z]{1,8}", prop_oneof![Just("ssh"), Just("rdp"), Just("vnc")]),
            0..4,
        ),
    )
        .prop_map(|(name, connections)| {
            connections
                .into_iter()
                .fold(ConnectionGroup::new(name), |group, (name, protocol)| {
                    group.with_connection(Connection::new(name, protocol))
                })
        });

    leaf.prop_recursive(3, 24, 4, |inner| {
        ("[a-z]{1,8}", prop::collection::vec(inner, 0..4)).prop_map(|(name, children)| {
            children
                .into_iter()
                .fold(ConnectionGroup::new(name), ConnectionGroup::with_group)
        })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Walking a tree visits every connection and group exactly once
    #[test]
    fn walk_visits_everything(tree in arb_tree()) {
        let entries = tree.walk();
        let connections = entries
            .iter()
            .filter(|e| matches!(e, TreeEntry::Connection(..)))
            .count();
        let groups = entries
            .iter()
            .filter(|e| matches!(e, TreeEntry::Group(..)))
            .count();

        prop_assert_eq!(connections, tree.connection_count());
        // The walk starts with the group itself
        prop_assert_eq!(groups, tree.group_count() + 1);
    }

    /// The tree survives a JSON round trip through the API representation
    #[test]
    fn tree_json_is_stable(tree in arb_tree()) {
        let json = serde_json::to_string(&tree).unwrap();
        let parsed: ConnectionGroup = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(parsed, tree);
    }
}
