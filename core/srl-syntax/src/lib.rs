pub mod error;
pub mod tree;

pub use error::TreeError;
pub use tree::DependencyTree;

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use srl_protocol::{Span, Token, TokenId};

    /// "'Tonight , James falls out of a boat ."
    fn boat_sentence() -> Vec<Token> {
        vec![
            Token::new(1, "'Tonight", 4, "nsubj"),
            Token::new(2, ",", 4, "punct"),
            Token::new(3, "James", 4, "nsubj"),
            Token::new(4, "falls", 0, "null"),
            Token::new(5, "out", 4, "prep"),
            Token::new(6, "of", 5, "dep"),
            Token::new(7, "a", 8, "det"),
            Token::new(8, "boat", 6, "pobj"),
            Token::new(9, ".", 4, "punct"),
        ]
    }

    fn ids(tokens: &[&Token]) -> Vec<u32> {
        tokens.iter().map(|token| token.id.0).collect()
    }

    #[test]
    fn test_head_of_single_token_span() {
        let tree = DependencyTree::new(boat_sentence());
        assert_eq!(ids(&tree.head_of_span(Span::new(3, 4))), vec![4]);
    }

    #[test]
    fn test_head_of_constituent() {
        let tree = DependencyTree::new(boat_sentence());
        // "out of a boat"
        assert_eq!(ids(&tree.head_of_span(Span::new(4, 8))), vec![5]);
        // "a boat"
        assert_eq!(ids(&tree.head_of_span(Span::new(6, 8))), vec![8]);
    }

    #[test]
    fn test_head_of_straddling_span() {
        let tree = DependencyTree::new(boat_sentence());
        // "James falls" has one head, ", James" has two.
        assert_eq!(ids(&tree.head_of_span(Span::new(2, 4))), vec![4]);
        assert_eq!(ids(&tree.head_of_span(Span::new(1, 3))), vec![2, 3]);
    }

    #[test]
    fn test_head_of_span_is_clamped() {
        let tree = DependencyTree::new(boat_sentence());
        assert_eq!(ids(&tree.head_of_span(Span::new(8, 20))), vec![9]);
        assert!(tree.head_of_span(Span::new(20, 30)).is_empty());
    }

    #[test]
    fn test_subtree_from_head() {
        let tree = DependencyTree::new(boat_sentence());
        assert_eq!(ids(&tree.subtree_from_head(4)), vec![5, 6, 7, 8]);
        assert_eq!(ids(&tree.subtree_from_head(7)), vec![7, 8]);
        assert_eq!(ids(&tree.subtree_from_head(6)), vec![7]);
        assert_eq!(tree.subtree_from_head(3).len(), 9);
        assert!(tree.subtree_from_head(9).is_empty());
    }

    #[test]
    fn test_children_and_text() {
        let tree = DependencyTree::new(boat_sentence());
        assert_eq!(tree.children(3), vec![0, 1, 2, 4, 8]);
        assert_eq!(tree.children(6), Vec::<usize>::new());
        assert_eq!(tree.root().map(|token| token.id), Some(TokenId(4)));
        assert_eq!(tree.text(Span::new(4, 8)), "out of a boat");
        assert_eq!(tree.sentence_text(), "'Tonight , James falls out of a boat .");
    }

    #[test]
    fn test_validated_accepts_tree() {
        assert!(DependencyTree::validated(boat_sentence()).is_ok());
    }

    #[test]
    fn test_validated_rejects_malformed_parses() {
        assert_eq!(DependencyTree::validated(vec![]).unwrap_err(), TreeError::Empty);

        let mut two_roots = boat_sentence();
        two_roots[8].head = TokenId::ROOT;
        assert_eq!(
            DependencyTree::validated(two_roots).unwrap_err(),
            TreeError::MultipleRoots { count: 2 }
        );

        let mut dangling = boat_sentence();
        dangling[0].head = TokenId(12);
        assert!(matches!(
            DependencyTree::validated(dangling),
            Err(TreeError::DanglingHead { .. })
        ));

        let mut gap = boat_sentence();
        gap[2].id = TokenId(7);
        assert!(matches!(
            DependencyTree::validated(gap),
            Err(TreeError::NonSequentialId { position: 2, .. })
        ));

        // "a" <-> "boat" cycle, detached from the root
        let mut cycle = boat_sentence();
        cycle[7].head = TokenId(7);
        assert!(matches!(
            DependencyTree::validated(cycle),
            Err(TreeError::Cycle { .. })
        ));

        let no_root = vec![Token::new(1, "a", 2, "dep"), Token::new(2, "b", 1, "dep")];
        assert_eq!(DependencyTree::validated(no_root).unwrap_err(), TreeError::NoRoot);
    }

    #[test]
    fn test_error_messages_show_plain_ids() {
        let mut gap = boat_sentence();
        gap[2].id = TokenId(7);
        assert_eq!(
            DependencyTree::validated(gap).unwrap_err().to_string(),
            "token at position 2 has id 7, expected 3"
        );

        let mut dangling = boat_sentence();
        dangling[0].head = TokenId(12);
        assert_eq!(
            DependencyTree::validated(dangling).unwrap_err().to_string(),
            "token 1 points to head 12, which is not in the sentence"
        );
    }

    #[test]
    fn test_subtree_tolerates_unchecked_cycle() {
        let tokens = vec![
            Token::new(1, "a", 2, "dep"),
            Token::new(2, "b", 1, "dep"),
            Token::new(3, "c", 0, "root"),
        ];
        let tree = DependencyTree::new(tokens);
        assert_eq!(ids(&tree.subtree_from_head(0)), vec![1, 2]);
    }

    /// Random single-rooted trees with shuffled token order.
    fn arb_tree() -> impl Strategy<Value = Vec<Token>> {
        (1usize..12)
            .prop_flat_map(|n| {
                let parents: Vec<_> = (1..n).map(|k| 0..k).collect();
                (parents, Just((0..n).collect::<Vec<usize>>()).prop_shuffle())
            })
            .prop_map(|(parents, order)| {
                let mut heads = vec![0u32; order.len()];
                for (k, parent) in parents.iter().enumerate() {
                    heads[order[k + 1]] = order[*parent] as u32 + 1;
                }
                heads
                    .iter()
                    .enumerate()
                    .map(|(position, head)| {
                        Token::new(position as u32 + 1, format!("w{}", position), *head, "dep")
                    })
                    .collect()
            })
    }

    proptest! {
        #[test]
        fn test_full_span_head_is_root(tokens in arb_tree()) {
            let tree = DependencyTree::validated(tokens).unwrap();
            let heads = tree.head_of_span(Span::new(0, tree.len()));
            prop_assert_eq!(heads.len(), 1);
            prop_assert!(heads[0].is_root());
        }

        #[test]
        fn test_subtree_is_sorted_and_closed(tokens in arb_tree(), pick in 0usize..12) {
            let tree = DependencyTree::new(tokens);
            let head = pick % tree.len();
            let subtree = tree.subtree_from_head(head);

            prop_assert!(subtree.windows(2).all(|pair| pair[0].id < pair[1].id));
            prop_assert!(subtree.iter().any(|token| token.position() == head));
            for token in &subtree {
                if token.position() != head {
                    prop_assert!(subtree.iter().any(|other| other.id == token.head));
                }
            }
        }

        #[test]
        fn test_subtree_of_root_is_sentence(tokens in arb_tree()) {
            let tree = DependencyTree::new(tokens);
            let root = tree.root().unwrap().position();
            prop_assert_eq!(tree.subtree_from_head(root).len(), tree.len());
        }
    }
}
