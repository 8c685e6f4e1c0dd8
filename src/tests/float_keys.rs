use crate::RedBlackTree;
use ordered_float::OrderedFloat;

#[test]
fn float_keys() {
    let values = vec![3.5, -1.25, 17., 0., 2.75, -8., 17.];
    let mut tree: RedBlackTree<OrderedFloat<f64>> =
        values.iter().copied().map(OrderedFloat).collect();
    assert!(tree.check_invariants().is_ok());

    let sorted: Vec<f64> = tree.iter().map(|key| key.into_inner()).collect();
    assert_eq!(sorted, vec![-8., -1.25, 0., 2.75, 3.5, 17., 17.]);
    assert_eq!(tree.min(), Some(&OrderedFloat(-8.)));
    assert_eq!(tree.max(), Some(&OrderedFloat(17.)));

    assert!(tree.delete(&OrderedFloat(17.)));
    assert!(tree.find(&OrderedFloat(17.)));
    assert!(!tree.delete(&OrderedFloat(4.)));
    assert!(tree.check_invariants().is_ok());
}
