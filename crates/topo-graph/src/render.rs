use std::fmt;
use std::io;

use topo_hash::ObjectId;

use crate::CommitNode;

/// Text rendering of a topological order.
///
/// One line per commit: its address, a space, then its branch names sorted
/// and space-joined. When the next commit in the order is not one of the
/// current commit's parents, a boundary is written between them:
///
/// ```text
/// <parents of current>=
///
/// =<children of next>
/// ```
///
/// Parents appear in declared order, children in ascending address order.
/// Either list may be empty (a root, or a commit no branch descends from).
pub struct Listing<'a> {
    order: &'a [&'a CommitNode],
}

impl<'a> Listing<'a> {
    pub fn new(order: &'a [&'a CommitNode]) -> Self {
        Self { order }
    }
}

impl fmt::Display for Listing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut resumed = false;
        for (i, node) in self.order.iter().enumerate() {
            if resumed {
                writeln!(f, "={}", join(node.children()))?;
                resumed = false;
            }

            let mut names: Vec<&str> = node.branches().iter().map(String::as_str).collect();
            names.sort_unstable();
            writeln!(f, "{} {}", node.id(), names.join(" "))?;

            if let Some(next) = self.order.get(i + 1) {
                if !node.parents().contains(&next.id()) {
                    writeln!(f, "{}=", join(node.parents()))?;
                    writeln!(f)?;
                    resumed = true;
                }
            }
        }
        Ok(())
    }
}

fn join<'i>(ids: impl IntoIterator<Item = &'i ObjectId>) -> String {
    ids.into_iter()
        .map(ObjectId::to_hex)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render `order` to a string.
pub fn render(order: &[&CommitNode]) -> String {
    Listing::new(order).to_string()
}

/// Write `order` to `out`.
pub fn write_listing<W: io::Write>(out: &mut W, order: &[&CommitNode]) -> io::Result<()> {
    write!(out, "{}", Listing::new(order))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::{topo_sort, CommitGraph, GraphBuilder};
    use topo_ref::BranchMap;

    fn oid(c: char) -> ObjectId {
        ObjectId::from_hex(&c.to_string().repeat(40)).unwrap()
    }

    fn h(c: char) -> String {
        c.to_string().repeat(40)
    }

    fn build(edges: &[(char, &str)], branches: &[(char, &str)]) -> CommitGraph {
        let reader: HashMap<ObjectId, Vec<ObjectId>> = edges
            .iter()
            .map(|(c, ps)| (oid(*c), ps.chars().map(oid).collect()))
            .collect();
        let branches: BranchMap = branches
            .iter()
            .map(|(c, name)| (oid(*c), name.to_string()))
            .collect();
        GraphBuilder::new(&reader).build(&branches).unwrap()
    }

    fn listing(graph: &CommitGraph) -> String {
        render(&topo_sort(graph).unwrap())
    }

    #[test]
    fn single_root_single_line() {
        let g = build(&[], &[('a', "main")]);
        assert_eq!(listing(&g), format!("{} main\n", h('a')));
    }

    #[test]
    fn linear_history_has_no_boundaries() {
        let g = build(&[('c', "b"), ('b', "a")], &[('c', "main")]);
        assert_eq!(
            listing(&g),
            format!("{} main\n{} \n{} \n", h('c'), h('b'), h('a'))
        );
    }

    #[test]
    fn names_are_sorted_on_one_line() {
        let g = build(&[], &[('a', "main"), ('a', "dev"), ('a', "feature/x")]);
        assert_eq!(listing(&g), format!("{} dev feature/x main\n", h('a')));
    }

    #[test]
    fn boundary_between_sibling_chains() {
        // a -> b -> c and d -> c
        let g = build(
            &[('a', "b"), ('b', "c"), ('d', "c")],
            &[('a', "main"), ('d', "dev")],
        );
        let expected = [
            format!("{} main", h('a')),
            format!("{} ", h('b')),
            format!("{}=", h('c')),
            String::new(),
            "=".to_string(),
            format!("{} dev", h('d')),
            format!("{} ", h('c')),
        ]
        .join("\n")
            + "\n";
        assert_eq!(listing(&g), expected);
    }

    #[test]
    fn boundary_between_unrelated_roots_is_empty_on_both_sides() {
        let g = build(&[], &[('a', "x"), ('b', "y")]);
        assert_eq!(
            listing(&g),
            format!("{} x\n=\n\n=\n{} y\n", h('a'), h('b'))
        );
    }

    #[test]
    fn boundary_after_merge_names_the_merge_as_child() {
        // e merges c and d, both branched from a
        let g = build(&[('e', "cd"), ('c', "a"), ('d', "a")], &[('e', "main")]);
        let expected = [
            format!("{} main", h('e')),
            format!("{} ", h('c')),
            format!("{}=", h('a')),
            String::new(),
            format!("={}", h('e')),
            format!("{} ", h('d')),
            format!("{} ", h('a')),
        ]
        .join("\n")
            + "\n";
        assert_eq!(listing(&g), expected);
    }

    #[test]
    fn boundary_lists_parents_in_declared_order() {
        // b merges c and a; its sibling e sorts between b and their shared parent a
        let g = build(&[('b', "ca"), ('e', "a")], &[('b', "main"), ('e', "other")]);
        let text = listing(&g);
        assert!(text.contains(&format!("{} {}=\n", h('c'), h('a'))), "{text}");
    }

    #[test]
    fn writer_matches_string() {
        let g = build(&[('b', "a")], &[('b', "main")]);
        let order = topo_sort(&g).unwrap();
        let mut buf = Vec::new();
        write_listing(&mut buf, &order).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), render(&order));
    }

    #[test]
    fn empty_order_renders_nothing() {
        assert_eq!(render(&[]), "");
    }
}
