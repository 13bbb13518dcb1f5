use mesp_algo::prelude::*;
use mesp_algo::utils::RequirementMask;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn mask(len: usize, bits: &[usize]) -> RequirementMask {
    let mut mask = RequirementMask::new(len);
    for &bit in bits {
        mask.set(bit, true);
    }
    mask
}

#[test]
fn test_unique_combination() {
    // Only {0, 1} + {2} covers all three requirements
    let groups = vec![vec![vec![0], vec![0, 1]], vec![vec![1], vec![2]]];
    let cover = ConstrainedSetCover::new(3, &groups, |c: &Vec<usize>| mask(3, c));
    assert_eq!(cover.num_groups(), 2);
    assert_eq!(cover.solve().as_deref(), Some(&[1, 1][..]));
}

#[test]
fn test_unsatisfiable() {
    // Requirement 2 is covered by no candidate
    let groups = vec![vec![vec![0], vec![0, 1]], vec![vec![1], vec![0]]];
    let cover = ConstrainedSetCover::new(3, &groups, |c: &Vec<usize>| mask(3, c));
    assert_eq!(cover.solve(), None);
    assert_eq!(cover.solve_from(&[Some(1), None]), None);
}

#[test]
fn test_fixed_choice_blocks_cover() {
    let groups = vec![vec![vec![0], vec![0, 1]], vec![vec![1], vec![2]]];
    let cover = ConstrainedSetCover::new(3, &groups, |c: &Vec<usize>| mask(3, c));
    assert_eq!(cover.solve_from(&[Some(0), None]), None);
    assert_eq!(cover.solve_from(&[None, Some(0)]), None);
    assert_eq!(
        cover.solve_from(&[Some(1), Some(1)]).as_deref(),
        Some(&[1, 1][..])
    );
}

#[test]
fn test_many_requirements() {
    // Masks spanning several words
    let num_requirements = 150;
    let groups: Vec<Vec<Vec<usize>>> = (0..3)
        .map(|g| {
            vec![
                (g * 50..(g + 1) * 50).collect(),
                (g * 50..(g + 1) * 50 - 1).collect(),
            ]
        })
        .collect();
    let cover = ConstrainedSetCover::new(num_requirements, &groups, |c: &Vec<usize>| {
        mask(num_requirements, c)
    });
    assert_eq!(cover.solve().as_deref(), Some(&[0, 0, 0][..]));
}

#[test]
fn test_random_against_brute_force() {
    let mut rng = StdRng::seed_from_u64(0);
    for _ in 0..200 {
        let num_requirements = rng.random_range(0..6);
        let num_groups = rng.random_range(0..4);
        let groups: Vec<Vec<Vec<usize>>> = (0..num_groups)
            .map(|_| {
                (0..rng.random_range(1..4))
                    .map(|_| {
                        (0..num_requirements)
                            .filter(|_| rng.random_bool(0.4))
                            .collect()
                    })
                    .collect()
            })
            .collect();
        let cover = ConstrainedSetCover::new(num_requirements, &groups, |c: &Vec<usize>| {
            mask(num_requirements, c)
        });

        // Enumerate all combinations
        let mut feasible = false;
        let mut choice = vec![0; num_groups];
        'outer: loop {
            let mut covered = RequirementMask::new(num_requirements);
            for (g, &c) in choice.iter().enumerate() {
                covered.union_with(&mask(num_requirements, &groups[g][c]));
            }
            if covered.is_full() {
                feasible = true;
                break;
            }
            for g in (0..num_groups).rev() {
                choice[g] += 1;
                if choice[g] < groups[g].len() {
                    continue 'outer;
                }
                choice[g] = 0;
            }
            break;
        }

        match cover.solve() {
            Some(solution) => {
                assert!(feasible);
                let mut covered = RequirementMask::new(num_requirements);
                for (g, &c) in solution.iter().enumerate() {
                    covered.union_with(&mask(num_requirements, &groups[g][c]));
                }
                assert!(covered.is_full());
            }
            None => assert!(!feasible),
        }
    }
}
