//! The field dependency graph: one node per claimed field, edges from the
//! `@` references its tag contains.
//!
//! Nodes are kept in declaration order so traversal, scheduling, and the
//! first error reported are all deterministic.

use std::collections::HashMap;

use confweave_core::{FieldSpec, LoadError, Source};

use crate::tag;

/// One claimed field: its winning source, trimmed tag, and dependencies.
pub(crate) struct Node {
    pub field: &'static str,
    /// Index of the claiming source in the registered source list.
    pub source_index: usize,
    pub tag: String,
    pub dependencies: Vec<String>,
    pub resolved: bool,
}

pub(crate) struct Graph {
    pub nodes: Vec<Node>,
    index: HashMap<&'static str, usize>,
}

impl Graph {
    /// Scan the record's field specs and assemble the graph.
    ///
    /// Each field is claimed by the first registered source whose
    /// namespace carries a non-empty annotation on it; later matches on
    /// the same field are ignored. Fields with no matching annotation get
    /// no node and are never populated.
    pub fn build(fields: &'static [FieldSpec], sources: &[Box<dyn Source>]) -> Self {
        let mut nodes = Vec::new();
        let mut index = HashMap::new();

        for spec in fields {
            for (source_index, source) in sources.iter().enumerate() {
                let Some(raw) = spec.tag(source.name()) else {
                    continue;
                };
                let tag = raw.trim().to_owned();
                let dependencies = tag::references(&tag);
                index.insert(spec.name, nodes.len());
                nodes.push(Node {
                    field: spec.name,
                    source_index,
                    tag,
                    dependencies,
                    resolved: false,
                });
                break;
            }
        }

        Graph { nodes, index }
    }

    /// Depth-first cycle check with visited and on-stack marks.
    ///
    /// An edge to a name with no node is an unbound reference; a back-edge
    /// to a node on the current stack is a cycle, reported as the pair at
    /// which it was found.
    pub fn check_cycles(&self) -> Result<(), LoadError> {
        let mut visited = vec![false; self.nodes.len()];
        let mut on_stack = vec![false; self.nodes.len()];

        for i in 0..self.nodes.len() {
            if !visited[i] {
                self.visit(i, &mut visited, &mut on_stack)?;
            }
        }

        Ok(())
    }

    fn visit(&self, i: usize, visited: &mut [bool], on_stack: &mut [bool]) -> Result<(), LoadError> {
        visited[i] = true;
        on_stack[i] = true;

        for dep in &self.nodes[i].dependencies {
            let Some(&j) = self.index.get(dep.as_str()) else {
                return Err(LoadError::UnboundReference {
                    reference: dep.clone(),
                });
            };
            if !visited[j] {
                self.visit(j, visited, on_stack)?;
            } else if on_stack[j] {
                return Err(LoadError::CircularDependency {
                    field: self.nodes[i].field.to_owned(),
                    dependency: dep.clone(),
                });
            }
        }

        on_stack[i] = false;
        Ok(())
    }

    /// Whether every dependency of node `i` is either already resolved or
    /// not a tracked field at all (the resolver fails on truly unbound
    /// names; after `check_cycles` this branch is defensive).
    pub fn is_ready(&self, i: usize) -> bool {
        self.nodes[i].dependencies.iter().all(|dep| {
            self.index
                .get(dep.as_str())
                .is_none_or(|&j| self.nodes[j].resolved)
        })
    }

    /// Names of the fields not yet resolved, in declaration order.
    pub fn pending(&self) -> Vec<String> {
        self.nodes
            .iter()
            .filter(|n| !n.resolved)
            .map(|n| n.field.to_owned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a graph straight from `(field, tag)` pairs, bypassing source
    /// selection.
    fn graph_of(fields: &[(&'static str, &str)]) -> Graph {
        let mut nodes = Vec::new();
        let mut index = HashMap::new();
        for &(field, raw) in fields {
            let tag = raw.trim().to_owned();
            index.insert(field, nodes.len());
            nodes.push(Node {
                field,
                source_index: 0,
                tag: tag.clone(),
                dependencies: tag::references(&tag),
                resolved: false,
            });
        }
        Graph { nodes, index }
    }

    #[test]
    fn acyclic_graph_passes() {
        let g = graph_of(&[("a", "@b"), ("b", "@c"), ("c", "literal")]);
        assert!(g.check_cycles().is_ok());
    }

    #[test]
    fn diamond_is_not_a_cycle() {
        let g = graph_of(&[("a", "@b||@c"), ("b", "@d"), ("c", "@d"), ("d", "x")]);
        assert!(g.check_cycles().is_ok());
    }

    #[test]
    fn two_cycle_is_reported_with_both_names() {
        let g = graph_of(&[("a", "@b"), ("b", "@a")]);
        match g.check_cycles() {
            Err(LoadError::CircularDependency { field, dependency }) => {
                assert_eq!((field.as_str(), dependency.as_str()), ("b", "a"));
            }
            other => panic!("expected circular dependency, got {other:?}"),
        }
    }

    #[test]
    fn three_cycle_is_detected() {
        let g = graph_of(&[("a", "@b"), ("b", "@c"), ("c", "@a")]);
        assert!(matches!(
            g.check_cycles(),
            Err(LoadError::CircularDependency { .. })
        ));
    }

    #[test]
    fn self_reference_is_a_cycle() {
        let g = graph_of(&[("a", "@a")]);
        assert!(matches!(
            g.check_cycles(),
            Err(LoadError::CircularDependency { .. })
        ));
    }

    #[test]
    fn edge_to_untracked_name_is_unbound_not_circular() {
        let g = graph_of(&[("a", "@missing")]);
        match g.check_cycles() {
            Err(LoadError::UnboundReference { reference }) => assert_eq!(reference, "missing"),
            other => panic!("expected unbound reference, got {other:?}"),
        }
    }

    #[test]
    fn readiness_follows_resolution() {
        let mut g = graph_of(&[("a", "@b"), ("b", "x")]);
        assert!(!g.is_ready(0));
        assert!(g.is_ready(1));
        g.nodes[1].resolved = true;
        assert!(g.is_ready(0));
    }

    #[test]
    fn pending_lists_unresolved_in_declaration_order() {
        let mut g = graph_of(&[("a", "x"), ("b", "y"), ("c", "z")]);
        g.nodes[1].resolved = true;
        assert_eq!(g.pending(), ["a", "c"]);
    }
}
