use liferule_lib::{
    rules::{flip, rotate90, Letters, Maps, Neighborhood, ALL_3X3, ALL_4X4, CENTER},
    Error, LifeRule, LifeRules, ParseRuleError, RuleTree, State, TreeError, VerbatimGrid,
};
use proptest::prelude::*;
use std::error::Error as StdError;

fn name(input: &str) -> Result<String, ParseRuleError> {
    input.parse::<LifeRule>().map(|rule| rule.name().to_owned())
}

/// A non-totalistic Moore rule string, without `B0`.
fn hensel_string(birth: u16, survival: u16, letters: &[u16; 18], negate: u32) -> String {
    let mut s = String::new();
    for &(marker, counts, offset) in [("B", birth & !1, 0), ("/S", survival, 9)].iter() {
        s.push_str(marker);
        for count in (0..=8u8).filter(|&c| counts & 1 << c != 0) {
            s.push((b'0' + count) as char);
            let slot = offset + count as usize;
            let set = Letters::from_bits_truncate(letters[slot]) & Letters::valid_for(count);
            if !set.is_empty() {
                if negate & 1 << slot != 0 {
                    s.push('-');
                }
                s.extend(set.chars());
            }
        }
    }
    s
}

/// A totalistic rule string in one of the three neighborhoods.
fn totalistic_string(birth: u16, survival: u16, neighborhood: Neighborhood) -> String {
    let max = neighborhood.neighbors();
    let digits = |counts: u16| -> String {
        (0..=max)
            .filter(|&c| counts & 1 << c != 0)
            .map(|c| (b'0' + c) as char)
            .collect()
    };
    let mut s = format!("B{}/S{}", digits(birth), digits(survival));
    s.extend(neighborhood.suffix());
    s
}

fn neighborhood() -> impl Strategy<Value = Neighborhood> {
    prop_oneof![
        Just(Neighborhood::Moore),
        Just(Neighborhood::Hexagonal),
        Just(Neighborhood::VonNeumann),
    ]
}

/// The 3×3 window around the cell at `row`, `col` of a 4×4 block,
/// row by row.
fn window(block: usize, row: usize, col: usize) -> [State; 9] {
    let mut cells = [State(0); 9];
    for (k, cell) in cells.iter_mut().enumerate() {
        let (r, c) = (row + k / 3 - 1, col + k % 3 - 1);
        *cell = State::from(block >> (15 - 4 * r - c) & 1 == 1);
    }
    cells
}

#[test]
fn life_names() -> Result<(), Box<dyn StdError>> {
    for input in &["B3/S23", "b3s23", "23/3", "S23/B3", "b3/s32", " B3 / S23 "] {
        assert_eq!(name(input)?, "B3/S23");
    }
    assert_eq!(name("B36/S23:T100,100")?, "B36/S23:T100,100");
    assert_eq!(name("b2/s34h")?, "B2/S34H");
    assert_eq!(name("B2ce3/S2-a")?, "B2ce3/S2-a");
    assert_eq!(name("b2ceaikn/s")?, "B2/S");
    assert_eq!(name("b2-ceaikn3/s")?, "B3/S");
    assert_eq!(name("w90")?, "W90");
    Ok(())
}

#[test]
fn set_rule_is_atomic() -> Result<(), Box<dyn StdError>> {
    let mut rules = LifeRules::new();
    let mut grid = VerbatimGrid::new();
    rules.set_rule("B2-a/S12", &mut grid)?;
    let before = rules.clone();
    for input in &["", "B2a/S12H", "B9/S", "W255", "B2-/S"] {
        assert!(matches!(
            rules.set_rule(input, &mut grid),
            Err(Error::ParseRule(_))
        ));
        assert_eq!(rules, before);
    }
    assert_eq!(rules.get_rule(), "B2-a/S12");
    Ok(())
}

#[test]
fn symmetry_closure() -> Result<(), Box<dyn StdError>> {
    let rule: LifeRule = "B2-a/S2-a".parse()?;
    let table = rule.table3x3();
    for i in (0..ALL_3X3).filter(|&i| table[i]) {
        let mut y = i;
        for _ in 0..4 {
            assert!(table[y] && table[flip(y)], "{:03x}", y);
            y = rotate90(y);
        }
    }
    Ok(())
}

#[test]
fn wolfram_tables() -> Result<(), Box<dyn StdError>> {
    let w0: LifeRule = "W0".parse()?;
    let w254: LifeRule = "W254".parse()?;
    for i in 0..ALL_3X3 {
        assert_eq!(w0.table3x3()[i], i & CENTER != 0);
        assert_eq!(w254.table3x3()[i], i & 7 != 0 || i & CENTER != 0);
    }
    Ok(())
}

#[test]
fn b0_alternates() -> Result<(), Box<dyn StdError>> {
    let rule: LifeRule = "B03/S23".parse()?;
    assert!(rule.alternate_rules());
    let even: LifeRule = "B1245678/S0145678".parse()?;
    let odd: LifeRule = "B56/S58".parse()?;
    match rule.maps() {
        Maps::Alternate { even: e, odd: o } => {
            assert_eq!(**e, *even.map(0));
            assert_eq!(**o, *odd.map(0));
        }
        Maps::Single(_) => panic!("B03/S23 must alternate"),
    }
    assert_eq!(rule.map(2), rule.map(0));
    assert_eq!(rule.map(3), rule.map(1));

    let rule: LifeRule = "B03/S238".parse()?;
    assert!(!rule.alternate_rules());
    let inverted: LifeRule = "B123478/S0123467".parse()?;
    assert_eq!(rule.map(0), inverted.map(0));
    assert_eq!(rule.name(), "B03/S238");
    Ok(())
}

#[test]
fn default_tree_is_life() -> Result<(), Box<dyn StdError>> {
    let tree = RuleTree::default_life()?;
    let rule = LifeRule::default();
    let table = rule.table3x3();
    for i in 0..ALL_3X3 {
        let bit = |b: usize| State::from(i >> b & 1 == 1);
        // Bits 2 to 0 are the top row, then 5 to 3, then 8 to 6.
        let cells = [
            bit(2),
            bit(1),
            bit(0),
            bit(5),
            bit(4),
            bit(3),
            bit(8),
            bit(7),
            bit(6),
        ];
        assert_eq!(tree.slowcalc(cells), State::from(table[i]), "{:09b}", i);
    }
    Ok(())
}

#[test]
fn life_4x4_agrees_with_tree() -> Result<(), Box<dyn StdError>> {
    let tree = RuleTree::default_life()?;
    let rule = LifeRule::default();
    let map = rule.map(0);
    for block in (0..ALL_4X4).step_by(7) {
        let expected = [(1, 1, 5), (1, 2, 4), (2, 1, 1), (2, 2, 0)]
            .iter()
            .map(|&(row, col, bit)| (tree.slowcalc(window(block, row, col)).0) << bit)
            .fold(0, |acc, b| acc | b);
        assert_eq!(map[block], expected, "{:016b}", block);
    }
    Ok(())
}

#[test]
fn tree_rejections() {
    let header = ["num_states=2", "num_neighbors=4", "num_nodes=5"];
    let wrong_level = header
        .iter()
        .chain(&["1 0 1", "2 0 0", "3 1 1", "4 2 2", "2 0 0"]);
    assert_eq!(
        RuleTree::from_lines(wrong_level),
        Err(TreeError::WrongLastLevel {
            expected: 5,
            found: 2
        })
    );
    let wrong_count = header.iter().chain(&["1 0 1 0"]);
    assert_eq!(
        RuleTree::from_lines(wrong_count),
        Err(TreeError::BadValueCount {
            line: 4,
            expected: 2,
            found: 3
        })
    );
}

proptest! {
    #[test]
    fn canonical_names_are_stable(
        birth in 0u16..512,
        survival in 0u16..512,
        letters in prop::array::uniform18(any::<u16>()),
        negate in any::<u32>(),
    ) {
        let input = hensel_string(birth, survival, &letters, negate);
        let first: LifeRule = input.parse().unwrap();
        let second: LifeRule = first.name().parse().unwrap();
        prop_assert_eq!(first.name(), second.name());
        prop_assert_eq!(first.table3x3(), second.table3x3());
    }

    #[test]
    fn hensel_tables_are_isotropic(
        birth in 0u16..512,
        survival in 0u16..512,
        letters in prop::array::uniform18(any::<u16>()),
        negate in any::<u32>(),
    ) {
        let input = hensel_string(birth, survival, &letters, negate);
        let rule: LifeRule = input.parse().unwrap();
        let table = rule.table3x3();
        for i in 0..ALL_3X3 {
            prop_assert_eq!(table[rotate90(i)], table[i]);
            prop_assert_eq!(table[flip(i)], table[i]);
        }
    }

    #[test]
    fn totalistic_tables_follow_counts(
        birth in 0u16..512,
        survival in 0u16..512,
        neighborhood in neighborhood(),
    ) {
        let input = totalistic_string(birth, survival, neighborhood);
        let rule: LifeRule = input.parse().unwrap();
        prop_assert_eq!(rule.name(), input.as_str());
        for i in 0..ALL_3X3 {
            let count = (i & neighborhood.mask()).count_ones();
            let counts = if i & CENTER == 0 { birth } else { survival };
            prop_assert_eq!(rule.table3x3()[i], counts & 1 << count != 0);
        }
    }

    #[test]
    fn compiling_is_pure(input in "[Bb]?[0-8]{0,4}/[Ss]?[0-8]{0,4}") {
        let first: LifeRule = input.parse().unwrap();
        let second: LifeRule = input.parse().unwrap();
        prop_assert_eq!(first.map(0), second.map(0));
        prop_assert_eq!(first.map(1), second.map(1));
    }
}
