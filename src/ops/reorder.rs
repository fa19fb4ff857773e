use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::model::project::Project;

/// The host-side swap request: exchange the projects at `from` and `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSwap {
    pub to: i64,
    pub from: i64,
}

/// A planned transposition of two projects' `order_idx` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reorder {
    pub dragged_id: i64,
    pub target_id: i64,
    /// `from` is the dragged project's index, `to` the target's
    pub swap: OrderSwap,
}

/// Plan dropping `dragged_id` onto `target_id` using the indices currently
/// in `projects`. None for a self-drop or if either project is unknown.
pub fn plan_swap(projects: &[Project], dragged_id: i64, target_id: i64) -> Option<Reorder> {
    if dragged_id == target_id {
        return None;
    }
    let dragged = projects.iter().find(|p| p.id == dragged_id)?;
    let target = projects.iter().find(|p| p.id == target_id)?;
    Some(Reorder {
        dragged_id,
        target_id,
        swap: OrderSwap {
            to: target.order_idx,
            from: dragged.order_idx,
        },
    })
}

/// Apply a planned swap to a new collection. Only the two named projects
/// change; the dragged one takes `swap.to`, the target takes `swap.from`.
pub fn apply_reorder(projects: &[Project], reorder: &Reorder) -> Vec<Project> {
    projects
        .iter()
        .map(|p| {
            if p.id == reorder.dragged_id {
                Project {
                    order_idx: reorder.swap.to,
                    ..p.clone()
                }
            } else if p.id == reorder.target_id {
                Project {
                    order_idx: reorder.swap.from,
                    ..p.clone()
                }
            } else {
                p.clone()
            }
        })
        .collect()
}

/// Swap by index values, as the host does: the projects currently holding
/// `from` and `to` exchange indices. Returns false if either is missing.
pub fn swap_by_index(projects: &mut [Project], swap: OrderSwap) -> bool {
    if swap.from == swap.to {
        return projects.iter().any(|p| p.order_idx == swap.from);
    }
    let from_pos = projects.iter().position(|p| p.order_idx == swap.from);
    let to_pos = projects.iter().position(|p| p.order_idx == swap.to);
    match (from_pos, to_pos) {
        (Some(a), Some(b)) => {
            projects[a].order_idx = swap.to;
            projects[b].order_idx = swap.from;
            true
        }
        _ => false,
    }
}

/// Are the `order_idx` values exactly `0..n` with no repeats?
pub fn is_dense_permutation(projects: &[Project]) -> bool {
    let n = projects.len() as i64;
    let mut seen = HashSet::with_capacity(projects.len());
    projects
        .iter()
        .all(|p| (0..n).contains(&p.order_idx) && seen.insert(p.order_idx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn projects(order: &[i64]) -> Vec<Project> {
        order
            .iter()
            .enumerate()
            .map(|(i, idx)| Project::local(i as i64 + 1, format!("P{}", i + 1), "/p", *idx))
            .collect()
    }

    fn index_of(projects: &[Project], id: i64) -> i64 {
        projects.iter().find(|p| p.id == id).unwrap().order_idx
    }

    fn permutations(items: &[i64]) -> Vec<Vec<i64>> {
        if items.len() <= 1 {
            return vec![items.to_vec()];
        }
        let mut out = Vec::new();
        for i in 0..items.len() {
            let mut rest = items.to_vec();
            let head = rest.remove(i);
            for mut tail in permutations(&rest) {
                tail.insert(0, head);
                out.push(tail);
            }
        }
        out
    }

    #[test]
    fn drop_first_onto_third() {
        let list = projects(&[0, 1, 2]);
        let reorder = plan_swap(&list, 1, 3).unwrap();
        assert_eq!(reorder.swap, OrderSwap { to: 2, from: 0 });

        let result = apply_reorder(&list, &reorder);
        assert_eq!(index_of(&result, 1), 2);
        assert_eq!(index_of(&result, 3), 0);
        assert_eq!(index_of(&result, 2), 1);
    }

    #[test]
    fn self_drop_plans_nothing() {
        let list = projects(&[0, 1, 2]);
        assert!(plan_swap(&list, 2, 2).is_none());
    }

    #[test]
    fn unknown_ids_plan_nothing() {
        let list = projects(&[0, 1]);
        assert!(plan_swap(&list, 1, 99).is_none());
        assert!(plan_swap(&list, 99, 1).is_none());
    }

    #[test]
    fn every_swap_is_a_transposition_for_all_permutations() {
        for order in permutations(&[0, 1, 2, 3]) {
            let list = projects(&order);
            for a in 1..=4 {
                for b in 1..=4 {
                    if a == b {
                        continue;
                    }
                    let reorder = plan_swap(&list, a, b).unwrap();
                    let result = apply_reorder(&list, &reorder);
                    assert!(is_dense_permutation(&result));
                    assert_eq!(index_of(&result, a), index_of(&list, b));
                    assert_eq!(index_of(&result, b), index_of(&list, a));
                    for other in (1..=4).filter(|id| *id != a && *id != b) {
                        assert_eq!(index_of(&result, other), index_of(&list, other));
                    }
                }
            }
        }
    }

    #[test]
    fn host_swap_agrees_with_local_prediction() {
        for order in permutations(&[0, 1, 2, 3]) {
            let list = projects(&order);
            for a in 1..=4 {
                for b in (1..=4).filter(|b| *b != a) {
                    let reorder = plan_swap(&list, a, b).unwrap();
                    let predicted = apply_reorder(&list, &reorder);
                    let mut hosted = list.clone();
                    assert!(swap_by_index(&mut hosted, reorder.swap));
                    assert_eq!(hosted, predicted);
                }
            }
        }
    }

    #[test]
    fn swap_by_index_missing_index() {
        let mut list = projects(&[0, 1]);
        assert!(!swap_by_index(&mut list, OrderSwap { to: 5, from: 0 }));
        assert_eq!(index_of(&list, 1), 0);
        assert!(swap_by_index(&mut list, OrderSwap { to: 1, from: 1 }));
        assert!(!swap_by_index(&mut list, OrderSwap { to: 7, from: 7 }));
    }

    #[test]
    fn dense_permutation_check() {
        assert!(is_dense_permutation(&projects(&[2, 0, 1])));
        assert!(is_dense_permutation(&[]));
        assert!(!is_dense_permutation(&projects(&[0, 0, 1])));
        assert!(!is_dense_permutation(&projects(&[0, 1, 3])));
        assert!(!is_dense_permutation(&projects(&[-1, 0, 1])));
    }

    #[test]
    fn wire_format() {
        let json = serde_json::to_string(&OrderSwap { to: 2, from: 0 }).unwrap();
        assert_eq!(json, r#"{"to":2,"from":0}"#);
    }
}
