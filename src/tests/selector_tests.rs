#[cfg(test)]
mod tests {
    use crate::components::FruitKind;
    use crate::error::GameError;
    use crate::selector::{NextDropSelector, SelectionMode};
    use crate::tests::test_utils::kinds;
    use std::collections::HashSet;

    #[test]
    fn test_peek_then_select_returns_same_kind() {
        let roster = kinds(&["A", "B", "C", "D", "E"]);
        let mut selector = NextDropSelector::new(&roster, SelectionMode::Random, Some(42)).unwrap();

        for _ in 0..50 {
            let peeked = selector.peek_next();
            // Peeking twice must not re-roll either
            assert_eq!(selector.peek_next(), peeked);
            assert_eq!(selector.select_next(), peeked);
        }
    }

    #[test]
    fn test_random_draws_cover_whole_roster() {
        let roster = kinds(&["A", "B", "C", "D"]);
        let mut selector = NextDropSelector::new(&roster, SelectionMode::Random, Some(1)).unwrap();

        let seen: HashSet<FruitKind> = (0..400).map(|_| selector.select_next()).collect();

        // Largest kind is eligible too
        assert_eq!(seen.len(), roster.len());
    }

    #[test]
    fn test_consecutive_selects_are_independent_draws() {
        let roster = kinds(&["A", "B", "C", "D", "E", "F"]);
        let mut selector = NextDropSelector::new(&roster, SelectionMode::Random, Some(99)).unwrap();

        let draws: Vec<FruitKind> = (0..200).map(|_| selector.select_next()).collect();
        let changes = draws.windows(2).filter(|pair| pair[0] != pair[1]).count();

        // A selector that kept returning the same kind would show no changes
        assert!(changes > 100, "only {changes} changes in 200 draws");
    }

    #[test]
    fn test_seeded_selectors_agree() {
        let roster = kinds(&["A", "B", "C"]);
        let mut first = NextDropSelector::new(&roster, SelectionMode::Random, Some(5)).unwrap();
        let mut second = NextDropSelector::new(&roster, SelectionMode::Random, Some(5)).unwrap();

        for _ in 0..20 {
            assert_eq!(first.select_next(), second.select_next());
        }
    }

    #[test]
    fn test_sequential_mode_walks_roster() {
        let roster = kinds(&["A", "B", "C"]);
        let mut selector = NextDropSelector::new(&roster, SelectionMode::Sequential, None).unwrap();

        let names: Vec<String> = (0..7)
            .map(|_| selector.select_next().as_str().to_string())
            .collect();
        assert_eq!(names, ["A", "B", "C", "A", "B", "C", "A"]);
        assert_eq!(selector.mode(), SelectionMode::Sequential);
    }

    #[test]
    fn test_sequential_peek_does_not_skip() {
        let roster = kinds(&["A", "B", "C"]);
        let mut selector = NextDropSelector::new(&roster, SelectionMode::Sequential, None).unwrap();

        assert_eq!(selector.peek_next(), FruitKind::new("A"));
        assert_eq!(selector.select_next(), FruitKind::new("A"));
        assert_eq!(selector.select_next(), FruitKind::new("B"));
    }

    #[test]
    fn test_set_kinds_discards_peek() {
        let mut selector =
            NextDropSelector::new(&kinds(&["A", "B"]), SelectionMode::Sequential, None).unwrap();
        selector.peek_next();

        selector.set_kinds(&kinds(&["X"])).unwrap();
        assert_eq!(selector.select_next(), FruitKind::new("X"));
    }

    #[test]
    fn test_empty_roster_rejected() {
        assert!(matches!(
            NextDropSelector::new(&[], SelectionMode::Random, None),
            Err(GameError::EmptyConfiguration)
        ));

        let mut selector =
            NextDropSelector::new(&kinds(&["A"]), SelectionMode::Random, None).unwrap();
        assert!(selector.set_kinds(&[]).is_err());
        assert_eq!(selector.select_next(), FruitKind::new("A"));
    }

    #[test]
    fn test_repeated_kind_rejected() {
        assert!(matches!(
            NextDropSelector::new(&kinds(&["A", "B", "A"]), SelectionMode::Sequential, None),
            Err(GameError::DuplicateKind(_))
        ));

        let mut selector =
            NextDropSelector::new(&kinds(&["A", "B"]), SelectionMode::Sequential, None).unwrap();
        assert_eq!(
            selector.set_kinds(&kinds(&["X", "X"])),
            Err(GameError::DuplicateKind(FruitKind::new("X")))
        );
        assert_eq!(selector.select_next(), FruitKind::new("A"));
        assert_eq!(selector.select_next(), FruitKind::new("B"));
    }
}
