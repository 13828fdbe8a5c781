//! Insertion scenarios: leaf fill, leaf split, cascading split, root split

use std::cmp::Ordering;

use rstest::rstest;
use twothree::util::testing;
use twothree::{Layout, TreeBuilder, TreeError, TwoThreeTree};

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

fn bfs(tree: &TwoThreeTree<i32>) -> Vec<i32> {
    tree.values_breadth_first().into_iter().copied().collect()
}

fn three_level() -> Layout<i32> {
    /*
                    (10, 25)
          ----------------------------
         /           |               \
        (7)         (17)             (40)
        /  \        /  \            /  \
      (5)  (8)   (15)  (20)      (35)  (45)
    */
    Layout::node(vec![10, 25], vec![
        Layout::node(vec![7], vec![Layout::leaf(vec![5]), Layout::leaf(vec![8])]),
        Layout::node(vec![17], vec![Layout::leaf(vec![15]), Layout::leaf(vec![20])]),
        Layout::node(vec![40], vec![Layout::leaf(vec![35]), Layout::leaf(vec![45])]),
    ])
}

#[rstest]
#[case::leaf_with_room(
    Layout::leaf(vec![1]),
    2,
    Layout::leaf(vec![1, 2])
)]
#[case::full_root_leaf(
    Layout::leaf(vec![1, 2]),
    3,
    Layout::node(vec![2], vec![Layout::leaf(vec![1]), Layout::leaf(vec![3])])
)]
#[case::first_child_split(
    Layout::node(vec![10], vec![Layout::leaf(vec![5, 7]), Layout::leaf(vec![15])]),
    8,
    Layout::node(vec![7, 10], vec![
        Layout::leaf(vec![5]),
        Layout::leaf(vec![8]),
        Layout::leaf(vec![15]),
    ])
)]
#[case::second_child_split(
    Layout::node(vec![10], vec![Layout::leaf(vec![5, 7]), Layout::leaf(vec![15, 20])]),
    25,
    Layout::node(vec![10, 20], vec![
        Layout::leaf(vec![5, 7]),
        Layout::leaf(vec![15]),
        Layout::leaf(vec![25]),
    ])
)]
#[case::leaf_and_root_full(
    Layout::node(vec![10, 20], vec![
        Layout::leaf(vec![5, 7]),
        Layout::leaf(vec![15]),
        Layout::leaf(vec![25]),
    ]),
    8,
    Layout::node(vec![10], vec![
        Layout::node(vec![7], vec![Layout::leaf(vec![5]), Layout::leaf(vec![8])]),
        Layout::node(vec![20], vec![Layout::leaf(vec![15]), Layout::leaf(vec![25])]),
    ])
)]
fn given_tree_when_inserting_then_matches_expected(
    #[case] start: Layout<i32>,
    #[case] value: i32,
    #[case] expected: Layout<i32>,
) {
    let mut tree = start.build();
    let expected = expected.build();

    let root = tree.insert(value).unwrap();

    assert_eq!(root, tree.root());
    assert_eq!(bfs(&tree), bfs(&expected), "\nGOT:\n{}\nWANT:\n{}", tree, expected);
    assert_eq!(tree.levels(), expected.levels());
    assert_eq!(tree.height(), expected.height());
    tree.check_invariants().unwrap();
}

#[test]
fn given_fresh_tree_when_inserting_one_to_three_then_root_splits() {
    let mut tree = TwoThreeTree::new(1);
    let first_root = tree.root();

    assert_eq!(tree.insert(2).unwrap(), first_root);
    assert_eq!(tree.root_node().data(), &[1, 2]);
    assert!(tree.root_node().is_leaf());

    let root = tree.insert(3).unwrap();
    assert_ne!(root, first_root);
    assert_eq!(tree.node(root).unwrap().data(), &[2]);
    assert_eq!(tree.node(first_root).unwrap().parent(), Some(root));
    assert_eq!(tree.height(), 1);
}

#[test]
fn given_full_root_when_cascade_reaches_it_then_height_grows_by_one() {
    let mut tree = Layout::node(vec![10, 20], vec![
        Layout::leaf(vec![5, 7]),
        Layout::leaf(vec![15]),
        Layout::leaf(vec![25]),
    ])
    .build();
    let old_root = tree.root();
    assert_eq!(tree.height(), 1);

    let root = tree.insert(8).unwrap();

    assert_ne!(root, old_root);
    assert_eq!(tree.height(), 2);
    assert_eq!(tree.depth(), 3);
    // The old root survives as the left half of its own split
    assert_eq!(tree.node(old_root).unwrap().data(), &[7]);
    assert_eq!(tree.node(old_root).unwrap().parent(), Some(root));
}

#[test]
fn given_multiple_values_when_inserting_one_by_one_then_builds_three_levels() {
    let mut tree = TwoThreeTree::new(10);
    for value in [20, 5, 7, 25, 35, 40, 45, 8, 15, 17] {
        tree.insert(value).unwrap();
        tree.check_invariants().unwrap();
    }

    let expected = three_level().build();
    assert_eq!(tree, expected, "\nGOT:\n{}\nWANT:\n{}", tree, expected);
    assert_eq!(tree.levels(), expected.levels());
    assert_eq!(tree.root_node().data(), &[10, 25]);
    assert_eq!(tree.depth(), 3);
    assert_eq!(tree.height(), 2);
    assert_eq!(tree.leaf_nodes().len(), 6);
    assert_eq!(tree.len(), 11);
}

#[test]
fn given_malformed_node_when_inserting_then_invalid_node_state() {
    let mut tree = Layout::node(vec![10], vec![
        Layout::leaf(vec![5]),
        Layout::node(vec![20], vec![Layout::leaf(vec![15])]),
    ])
    .build();
    let before = bfs(&tree);

    let err = tree.insert(17).unwrap_err();

    assert!(matches!(err, TreeError::InvalidNodeState { data: 1, children: 1, .. }));
    assert_eq!(bfs(&tree), before);
}

#[test]
fn given_values_left_of_mid_when_inserting_then_route_left() {
    let mut tree = three_level().build();
    tree.insert(6).unwrap();
    tree.insert(4).unwrap();
    tree.check_invariants().unwrap();
    let values: Vec<i32> = tree.iter().copied().collect();
    assert_eq!(values, vec![4, 5, 6, 7, 8, 10, 15, 17, 20, 25, 35, 40, 45]);
}

#[derive(Debug, Clone, PartialEq)]
struct Entry {
    a: &'static str,
    b: i32,
    c: i32,
}

#[test]
fn given_custom_comparator_when_inserting_then_orders_by_it() {
    let by_b = |x: &Entry, y: &Entry| x.b.cmp(&y.b);
    let ones = Entry { a: "ones", b: 1, c: 2 };
    let tens = Entry { a: "tens", b: 10, c: 20 };

    let mut tree = TwoThreeTree::with_comparator(tens.clone(), by_b);
    tree.insert(ones.clone()).unwrap();

    let expected = TreeBuilder::new(by_b).build(Layout::leaf(vec![ones, tens]));
    assert_eq!(tree, expected);
    let labels: Vec<(&str, i32)> = tree.iter().map(|e| (e.a, e.c)).collect();
    assert_eq!(labels, vec![("ones", 2), ("tens", 20)]);
}

#[test]
fn given_reversed_comparator_when_inserting_then_descending() {
    let mut tree = TwoThreeTree::with_comparator(1, |a: &i32, b: &i32| b.cmp(a));
    for v in 2..=7 {
        tree.insert(v).unwrap();
    }
    tree.check_invariants().unwrap();
    let values: Vec<i32> = tree.iter().copied().collect();
    assert_eq!(values, vec![7, 6, 5, 4, 3, 2, 1]);
}

#[test]
fn given_duplicates_when_inserting_then_all_are_kept_in_order() {
    let by_key = |x: &(i32, u32), y: &(i32, u32)| -> Ordering { x.0.cmp(&y.0) };
    let mut tree = TwoThreeTree::with_comparator((5, 0), by_key);
    for seq in 1..=6 {
        tree.insert((5, seq)).unwrap();
        tree.check_invariants().unwrap();
    }
    assert_eq!(tree.len(), 7);
    assert!(tree.iter().all(|&(k, _)| k == 5));
    assert!(tree.contains(&(5, 99)));
}
