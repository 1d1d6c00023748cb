//! Render a family subtree for diagnostics.

use termtree::Tree;
use tracing::instrument;

use crate::infrastructure::traits::Member;

/// Label shown for members below the rendering depth.
const TRUNCATED: &str = "…";

pub trait MemberTreeConvert {
    /// Render this member and its descendants, `max_depth` generations deep.
    fn to_tree_string(&self, max_depth: usize) -> Tree<String>;
}

impl MemberTreeConvert for dyn Member + '_ {
    #[instrument(level = "trace", skip(self))]
    fn to_tree_string(&self, max_depth: usize) -> Tree<String> {
        let root = member_label(self);
        if max_depth <= 1 {
            let tree = Tree::new(root);
            return if self.children().is_empty() {
                tree
            } else {
                tree.with_leaves([TRUNCATED.to_string()])
            };
        }

        let leaves: Vec<_> = self
            .children()
            .into_iter()
            .map(|c| c.to_tree_string(max_depth - 1))
            .collect();

        Tree::new(root).with_leaves(leaves)
    }
}

fn member_label(member: &dyn Member) -> String {
    format!(
        "{} ({}) {}",
        member.name(),
        member.birth_date(),
        member.heritage()
    )
}
