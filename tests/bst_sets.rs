const NUM_OF_OPERATIONS: usize = 10_000;

macro_rules! bst_set_tests {
    ($($module_name:ident: $type_name:ident$(,)*)*) => {
        $(
            mod $module_name {
                use rand::Rng;
                use std::collections::BTreeSet;
                use super::NUM_OF_OPERATIONS;
                use tree_collections::$module_name::$type_name;

                #[test]
                fn int_test_set() {
                    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
                    let mut set = $type_name::new();
                    let mut expected = BTreeSet::new();

                    for _ in 0..NUM_OF_OPERATIONS {
                        let key = rng.gen_range(0, NUM_OF_OPERATIONS as u32);

                        assert_eq!(set.insert(key), expected.insert(key));
                    }

                    assert_eq!(set.len(), expected.len());
                    assert_eq!(set.min(), expected.iter().min());
                    assert_eq!(set.max(), expected.iter().max());
                    assert_eq!(
                        set.iter().collect::<Vec<&u32>>(),
                        expected.iter().collect::<Vec<&u32>>(),
                    );

                    for _ in 0..NUM_OF_OPERATIONS {
                        let key = rng.gen_range(0, NUM_OF_OPERATIONS as u32);

                        assert_eq!(set.contains(&key), expected.contains(&key));
                        assert_eq!(set.remove(&key).is_ok(), expected.remove(&key));
                    }

                    assert_eq!(set.len(), expected.len());
                    assert_eq!(
                        set.into_iter().collect::<Vec<u32>>(),
                        expected.into_iter().collect::<Vec<u32>>(),
                    );
                }

                #[test]
                fn int_test_serde() {
                    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
                    let mut set = $type_name::new();

                    for _ in 0..1000 {
                        let key = rng.gen::<u32>();

                        set.insert(key);
                    }

                    let serialized = bincode::serialize(&set).unwrap();
                    let deserialized: $type_name<u32> = bincode::deserialize(&serialized).unwrap();

                    assert_eq!(
                        set.into_iter().collect::<Vec<u32>>(),
                        deserialized.into_iter().collect::<Vec<u32>>(),
                    );
                }
            }
        )*
    }
}

bst_set_tests!(
    red_black_tree: RedBlackSet,
    vanilla_tree: VanillaSet,
);

mod red_black_tree_balance {
    use rand::Rng;
    use super::NUM_OF_OPERATIONS;
    use tree_collections::red_black_tree::RedBlackTree;

    #[test]
    fn int_test_invariants_under_churn() {
        let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
        let mut tree = RedBlackTree::new();
        let mut keys = Vec::new();

        for _ in 0..NUM_OF_OPERATIONS {
            let key = rng.gen::<u32>();

            if tree.insert(key).is_some() {
                keys.push(key);
            }
        }
        assert!(tree.is_valid());

        while let Some(key) = keys.pop() {
            assert_eq!(tree.remove(&key), Ok(key));
            if keys.len() % 512 == 0 {
                assert!(tree.is_valid());
            }
        }
        assert!(tree.is_empty());
    }

    #[test]
    fn int_test_height_is_logarithmic() {
        let mut tree = RedBlackTree::new();
        for key in 0..1024u32 {
            tree.insert(key);
        }

        // Red-black height is at most 2 * log2(n + 1).
        assert!(tree.height() <= 20);
        assert!(tree.is_valid());
    }
}
