use petgraph::algo::tarjan_scc;
use petgraph::graphmap::DiGraphMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, TimelineError};

/// `phase_id` depends on `depends_on_phase_id`: the connector runs from the
/// upstream (`depends_on_phase_id`) bar to the downstream (`phase_id`) bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dependency {
    pub phase_id: Uuid,
    pub depends_on_phase_id: Uuid,
    /// Informational offset, displayed but never enforced.
    #[serde(default)]
    pub lag_days: Option<i32>,
}

impl Dependency {
    pub fn new(phase_id: Uuid, depends_on_phase_id: Uuid) -> Self {
        Self {
            phase_id,
            depends_on_phase_id,
            lag_days: None,
        }
    }

    pub fn with_lag(mut self, lag_days: i32) -> Self {
        self.lag_days = Some(lag_days);
        self
    }

    pub fn involves(&self, id: Uuid) -> bool {
        self.phase_id == id || self.depends_on_phase_id == id
    }
}

fn dependency_graph(dependencies: &[Dependency]) -> DiGraphMap<Uuid, ()> {
    let mut graph = DiGraphMap::new();
    for dep in dependencies {
        graph.add_edge(dep.depends_on_phase_id, dep.phase_id, ());
    }
    graph
}

/// Find one dependency cycle, returning the phases that take part in it.
///
/// Self-dependencies count as a cycle of one.
pub fn find_cycle(dependencies: &[Dependency]) -> Option<Vec<Uuid>> {
    let graph = dependency_graph(dependencies);
    tarjan_scc(&graph).into_iter().find_map(|mut component| {
        let is_cycle = component.len() > 1
            || component
                .first()
                .is_some_and(|&n| graph.contains_edge(n, n));
        if is_cycle {
            component.sort();
            Some(component)
        } else {
            None
        }
    })
}

/// Reject dependency sets that contain a cycle.
///
/// Connectors are drawn regardless; this is for callers that want to use the
/// dependencies as real ordering constraints.
pub fn validate_dependencies(dependencies: &[Dependency]) -> Result<()> {
    match find_cycle(dependencies) {
        Some(cycle) => Err(TimelineError::DependencyCycle { cycle }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: usize) -> Vec<Uuid> {
        (0..n).map(|_| Uuid::new_v4()).collect()
    }

    #[test]
    fn chain_has_no_cycle() {
        let p = ids(3);
        let deps = vec![Dependency::new(p[1], p[0]), Dependency::new(p[2], p[1])];
        assert_eq!(find_cycle(&deps), None);
        assert!(validate_dependencies(&deps).is_ok());
    }

    #[test]
    fn two_phase_cycle_is_reported() {
        let p = ids(3);
        let deps = vec![
            Dependency::new(p[0], p[1]),
            Dependency::new(p[1], p[0]),
            Dependency::new(p[2], p[0]),
        ];
        let mut expected = vec![p[0], p[1]];
        expected.sort();
        assert_eq!(find_cycle(&deps), Some(expected));
        assert!(matches!(
            validate_dependencies(&deps),
            Err(TimelineError::DependencyCycle { .. })
        ));
    }

    #[test]
    fn self_dependency_is_a_cycle() {
        let p = ids(1);
        let deps = vec![Dependency::new(p[0], p[0])];
        assert_eq!(find_cycle(&deps), Some(vec![p[0]]));
    }

    #[test]
    fn empty_list_is_valid() {
        assert!(validate_dependencies(&[]).is_ok());
    }
}
